//! `clubdir run|analyze|match|summary|aliases` — batch name resolution.

use std::path::{Path, PathBuf};

use serde::Serialize;

use clubdir_recon::loader::{load_clubs_file, load_events_file, write_mapping_file};
use clubdir_recon::summary::{label_histogram, ranked_matches};
use clubdir_recon::{
    AliasTable, ClubRecord, EventCatalog, EventRecord, ProcessorConfig, ReconError, Resolution,
    ResolveSummary, Resolver,
};

use crate::exit_codes::EXIT_UNMATCHED;
use crate::{CliError, RunArgs, SourceArgs};

/// Looked up in the working directory when `--config` is not given.
const DEFAULT_CONFIG: &str = "clubdir.toml";

/// Clubs listed in the summary report.
const TOP_CLUBS: usize = 10;

// ---------------------------------------------------------------------------
// Workspace: config + sources, snapshots loaded on demand
// ---------------------------------------------------------------------------

pub struct Workspace {
    pub config: ProcessorConfig,
    /// Directory relative config paths are resolved against.
    base_dir: PathBuf,
    clubs_path: PathBuf,
    events_path: PathBuf,
    aliases: AliasTable,
}

impl Workspace {
    pub fn open(args: &SourceArgs) -> Result<Self, CliError> {
        let (mut config, base_dir) = match args.config {
            Some(ref path) => (ProcessorConfig::from_file(path)?, parent_dir(path)),
            None if Path::new(DEFAULT_CONFIG).is_file() => {
                (ProcessorConfig::from_file(Path::new(DEFAULT_CONFIG))?, PathBuf::from("."))
            }
            None => (ProcessorConfig::default(), PathBuf::from(".")),
        };
        if let Some(ref path) = args.config {
            log::info!("config: {}", path.display());
        }

        let clubs_path = args
            .clubs
            .clone()
            .unwrap_or_else(|| ProcessorConfig::resolve_path(&base_dir, &config.data.clubs));
        let events_path = args
            .events
            .clone()
            .unwrap_or_else(|| ProcessorConfig::resolve_path(&base_dir, &config.data.events));

        if args.no_builtin_aliases {
            config.aliases.builtin = false;
        }
        let aliases = match args.aliases {
            Some(ref path) => read_alias_file(path)?,
            None => config.alias_table(&base_dir)?,
        };
        log::info!("alias table: {} entries", aliases.len());

        Ok(Self { config, base_dir, clubs_path, events_path, aliases })
    }

    pub fn clubs(&self) -> Result<Vec<ClubRecord>, CliError> {
        let clubs = load_clubs_file(&self.clubs_path)?;
        log::info!("loaded {} clubs from {}", clubs.len(), self.clubs_path.display());
        Ok(clubs)
    }

    pub fn events(&self) -> Result<Vec<EventRecord>, CliError> {
        let events = load_events_file(&self.events_path)?;
        log::info!("loaded {} events from {}", events.len(), self.events_path.display());
        Ok(events)
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    fn resolver(&self) -> Resolver {
        Resolver::new(self.aliases.clone())
    }

    /// `--output` if given, else `output.json` from the config.
    fn output_path(&self, output: Option<PathBuf>) -> PathBuf {
        output.unwrap_or_else(|| ProcessorConfig::resolve_path(&self.base_dir, &self.config.output.json))
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn read_alias_file(path: &Path) -> Result<AliasTable, ReconError> {
    let input = std::fs::read_to_string(path)
        .map_err(|e| ReconError::Io(format!("cannot read {}: {e}", path.display())))?;
    AliasTable::from_toml(&input)
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))?;
    println!("{json}");
    Ok(())
}

fn display_label(label: &str) -> &str {
    if label.trim().is_empty() {
        "(blank)"
    } else {
        label
    }
}

fn strict_check(strict: bool, resolution: &Resolution) -> Result<(), CliError> {
    if !strict || resolution.unmatched.is_empty() {
        return Ok(());
    }
    Err(CliError::new(
        EXIT_UNMATCHED,
        format!(
            "{} events matched no club ({} distinct labels)",
            resolution.unmatched.len(),
            resolution.distinct_unmatched().len()
        ),
    )
    .with_hint("add an [[alias]] entry for the label, or fix it in the events snapshot"))
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

pub fn cmd_run(source: &SourceArgs, run: RunArgs) -> Result<(), CliError> {
    let ws = Workspace::open(source)?;
    let clubs = ws.clubs()?;
    let events = ws.events()?;

    print_histogram(&events);
    println!();

    let resolution = ws.resolver().resolve(&clubs, &events);
    let path = ws.output_path(run.output);
    write_mapping_file(&path, &resolution.mapping)?;
    eprintln!("wrote {}", path.display());

    print_matches(&resolution);
    println!();
    print_summary(&SummaryReport::new(&clubs, &events, &resolution));

    strict_check(run.strict, &resolution)
}

// ---------------------------------------------------------------------------
// analyze
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct LabelCount {
    label: String,
    events: usize,
}

pub fn cmd_analyze(source: &SourceArgs, json: bool) -> Result<(), CliError> {
    let ws = Workspace::open(source)?;
    let events = ws.events()?;

    if json {
        let counts: Vec<LabelCount> = label_histogram(&events)
            .into_iter()
            .map(|(label, events)| LabelCount { label, events })
            .collect();
        return print_json(&counts);
    }

    print_histogram(&events);
    Ok(())
}

fn print_histogram(events: &[EventRecord]) {
    let histogram = label_histogram(events);
    println!("Total events: {}", events.len());
    println!("Distinct club labels: {}", histogram.len());
    println!();
    println!("Events per club label:");
    for (label, count) in &histogram {
        println!("  {:>4}  {}", count, display_label(label));
    }
}

// ---------------------------------------------------------------------------
// match
// ---------------------------------------------------------------------------

pub fn cmd_match(source: &SourceArgs, run: RunArgs, json: bool) -> Result<(), CliError> {
    let ws = Workspace::open(source)?;
    let clubs = ws.clubs()?;
    let events = ws.events()?;

    let resolution = ws.resolver().resolve(&clubs, &events);
    let path = ws.output_path(run.output);
    write_mapping_file(&path, &resolution.mapping)?;
    eprintln!("wrote {}", path.display());

    if json {
        print_json(&resolution)?;
    } else {
        print_matches(&resolution);
    }

    strict_check(run.strict, &resolution)
}

fn print_matches(resolution: &Resolution) {
    println!(
        "Matched {} of {} events to {} clubs",
        resolution.matched_event_count(),
        resolution.total_events(),
        resolution.mapping.len()
    );

    if !resolution.mapping.is_empty() {
        println!();
        println!("Matched clubs:");
        for (club, events) in &resolution.mapping {
            println!("  {}: {} events", club, events.len());
        }
    }

    let distinct = resolution.distinct_unmatched();
    if !distinct.is_empty() {
        println!();
        println!("Unmatched labels ({}):", distinct.len());
        for label in distinct {
            println!("  {:?}", label);
        }
    }
}

// ---------------------------------------------------------------------------
// summary
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ClubCount<'a> {
    club: &'a str,
    events: usize,
}

#[derive(Serialize)]
struct Collaboration<'a> {
    event: &'a str,
    clubs: Vec<&'a str>,
}

#[derive(Serialize)]
struct SummaryReport<'a> {
    #[serde(flatten)]
    summary: ResolveSummary,
    unique_events: usize,
    top_clubs: Vec<ClubCount<'a>>,
    collaborations: Vec<Collaboration<'a>>,
}

impl<'a> SummaryReport<'a> {
    fn new(clubs: &[ClubRecord], events: &[EventRecord], resolution: &'a Resolution) -> Self {
        let catalog = EventCatalog::new(&resolution.mapping);
        let top_clubs = ranked_matches(&resolution.mapping)
            .into_iter()
            .take(TOP_CLUBS)
            .map(|(club, events)| ClubCount { club, events })
            .collect();
        let collaborations = catalog
            .collaborative_events()
            .into_iter()
            .map(|c| Collaboration { event: c.event.name.as_str(), clubs: c.clubs })
            .collect();

        Self {
            summary: ResolveSummary::compute(clubs, events, resolution),
            unique_events: catalog.total_unique_events(),
            top_clubs,
            collaborations,
        }
    }
}

pub fn cmd_summary(source: &SourceArgs, json: bool) -> Result<(), CliError> {
    let ws = Workspace::open(source)?;
    let clubs = ws.clubs()?;
    let events = ws.events()?;

    let resolution = ws.resolver().resolve(&clubs, &events);
    let report = SummaryReport::new(&clubs, &events, &resolution);

    if json {
        return print_json(&report);
    }
    print_summary(&report);
    Ok(())
}

fn print_summary(report: &SummaryReport<'_>) {
    let s = &report.summary;
    println!("SUMMARY");
    println!("{}", "=".repeat(50));
    println!("Total events:       {}", s.total_events);
    println!("Total clubs:        {}", s.total_clubs);
    println!("Clubs with events:  {}", s.matched_clubs);
    println!("Matched events:     {}", s.matched_events);
    println!(
        "Unmatched events:   {} ({} distinct labels)",
        s.unmatched_events, s.distinct_unmatched_labels
    );
    println!("Unique events:      {}", report.unique_events);
    println!("Match rate:         {:.1}%", s.match_rate);

    if !report.top_clubs.is_empty() {
        println!();
        println!("Top clubs by events:");
        for (i, c) in report.top_clubs.iter().enumerate() {
            println!("  {:>2}. {} ({})", i + 1, c.club, c.events);
        }
    }

    if !report.collaborations.is_empty() {
        println!();
        println!("Shared events:");
        for c in &report.collaborations {
            println!("  {}: {}", c.event, c.clubs.join(", "));
        }
    }
}

// ---------------------------------------------------------------------------
// aliases
// ---------------------------------------------------------------------------

pub fn cmd_aliases(source: &SourceArgs, json: bool) -> Result<(), CliError> {
    let ws = Workspace::open(source)?;
    let table = ws.aliases();

    if json {
        return print_json(table.entries());
    }

    println!("{} alias entries", table.len());
    for entry in table.entries() {
        println!("  {}  ->  {}", entry.fragment, entry.variants.join(", "));
    }
    Ok(())
}
