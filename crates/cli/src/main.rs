// clubdir CLI - reconcile event club labels and search the club directory

mod exit_codes;
mod process;
mod search;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Args, Parser, Subcommand};
use clubdir_recon::ReconError;
use tracing_subscriber::EnvFilter;

use exit_codes::{recon_exit_code, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE};
use search::SearchTarget;

/// Environment variable holding the diagnostics filter, e.g. `clubdir_recon=debug`.
const LOG_ENV: &str = "CLUBDIR_LOG";

#[derive(Parser)]
#[command(name = "clubdir")]
#[command(about = "Match event club labels to canonical club names, and search the directory")]
#[command(long_version = long_version())]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    #[command(flatten)]
    source: SourceArgs,

    /// Diagnostics on stderr: -v for info, -vv for debug (CLUBDIR_LOG overrides)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Where the snapshots and alias table come from. Flags override the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Config file (default: ./clubdir.toml when present)
    #[arg(long, global = true, env = "CLUBDIR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Clubs snapshot (JSON array of club records)
    #[arg(long, global = true)]
    pub clubs: Option<PathBuf>,

    /// Events snapshot (JSON array of event records)
    #[arg(long, global = true)]
    pub events: Option<PathBuf>,

    /// Alias table file, replacing the configured one
    #[arg(long, global = true)]
    pub aliases: Option<PathBuf>,

    /// Do not fall back to the alias table built into the binary
    #[arg(long, global = true)]
    pub no_builtin_aliases: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Where to write the matched-events JSON (default: output.json from config)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Exit with code 5 when any event label matched no club
    #[arg(long)]
    pub strict: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze, match, save and summarize in one pass (the default)
    #[command(after_help = "\
Examples:
  clubdir
  clubdir run --output out/matched.json
  clubdir --config clubdir.toml run --strict")]
    Run(RunArgs),

    /// Count events per raw club label, before any matching
    #[command(after_help = "\
Examples:
  clubdir analyze
  clubdir analyze --json")]
    Analyze {
        /// Print a JSON array instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Resolve event labels to clubs and write the mapping
    #[command(after_help = "\
Examples:
  clubdir match
  clubdir match --output matched.json --strict
  clubdir --no-builtin-aliases match --json")]
    Match {
        #[command(flatten)]
        run: RunArgs,

        /// Print the mapping and unmatched labels as JSON on stdout
        #[arg(long)]
        json: bool,
    },

    /// Resolve and print the summary report
    Summary {
        #[arg(long)]
        json: bool,
    },

    /// Fuzzy search clubs or events
    #[command(after_help = "\
Examples:
  clubdir search robotics
  clubdir search \"film soc\" --in events
  clubdir search acm --threshold 0.5 --limit 3 --json")]
    Search {
        /// Free-text query; blank lists everything
        query: String,

        /// What to search
        #[arg(long = "in", value_enum, default_value_t = SearchTarget::Clubs)]
        target: SearchTarget,

        /// Minimum score, exclusive (default: search.threshold from config)
        #[arg(long)]
        threshold: Option<f64>,

        /// Maximum results, 0 for all (default: search.limit from config)
        #[arg(long)]
        limit: Option<usize>,

        #[arg(long)]
        json: bool,
    },

    /// List the effective alias table
    Aliases {
        #[arg(long)]
        json: bool,
    },
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\nresolver: clubdir-recon ", env!("CARGO_PKG_VERSION"),
        "\ntarget:   ", env!("TARGET"),
    )
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    // Also installs the `log` bridge, so records from the library crates show up here.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        None => process::cmd_run(&cli.source, RunArgs::default()),
        Some(Commands::Run(run)) => process::cmd_run(&cli.source, run),
        Some(Commands::Analyze { json }) => process::cmd_analyze(&cli.source, json),
        Some(Commands::Match { run, json }) => process::cmd_match(&cli.source, run, json),
        Some(Commands::Summary { json }) => process::cmd_summary(&cli.source, json),
        Some(Commands::Search { query, target, threshold, limit, json }) => {
            search::cmd_search(&cli.source, &query, target, threshold, limit, json)
        }
        Some(Commands::Aliases { json }) => process::cmd_aliases(&cli.source, json),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    pub fn usage(msg: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, msg)
    }

    pub fn general(msg: impl Into<String>) -> Self {
        Self::new(EXIT_ERROR, msg)
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<ReconError> for CliError {
    fn from(err: ReconError) -> Self {
        let code = recon_exit_code(&err);
        let hint = match &err {
            ReconError::ConfigParse(_) | ReconError::ConfigValidation(_) => {
                Some("check clubdir.toml against the documented [data]/[output]/[aliases]/[search] keys")
            }
            ReconError::AliasParse(_) => {
                Some("alias files need `version = 1` and [[alias]] tables with fragment and variants")
            }
            ReconError::DataParse { .. } => {
                Some("snapshots must be a JSON array of objects")
            }
            ReconError::Serialize(_) | ReconError::Io(_) => None,
        };
        Self { code, message: err.to_string(), hint: hint.map(String::from) }
    }
}
