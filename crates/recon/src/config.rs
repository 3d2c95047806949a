use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::alias::AliasTable;
use crate::error::ReconError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Batch configuration, usually read from `clubdir.toml`.
///
/// Every section is optional. Relative paths are resolved against the
/// directory of the config file by [`ProcessorConfig::resolve_path`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProcessorConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub aliases: AliasConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataConfig {
    #[serde(default = "default_clubs")]
    pub clubs: String,
    #[serde(default = "default_events")]
    pub events: String,
}

fn default_clubs() -> String {
    "data/data.json".into()
}

fn default_events() -> String {
    "data/events_final.json".into()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            clubs: default_clubs(),
            events: default_events(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default = "default_output")]
    pub json: String,
}

fn default_output() -> String {
    "matched_events.json".into()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { json: default_output() }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AliasConfig {
    /// Use the alias table embedded in the binary.
    #[serde(default = "default_true")]
    pub builtin: bool,
    /// Alias table file; takes precedence over `builtin`.
    #[serde(default)]
    pub file: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Default for AliasConfig {
    fn default() -> Self {
        Self {
            builtin: true,
            file: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_threshold() -> f64 {
    0.1
}

fn default_limit() -> usize {
    20
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            limit: default_limit(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ProcessorConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: ProcessorConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ReconError> {
        let input = std::fs::read_to_string(path)
            .map_err(|e| ReconError::Io(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml(&input)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.data.clubs.trim().is_empty() {
            return Err(ReconError::ConfigValidation("data.clubs must not be empty".into()));
        }
        if self.data.events.trim().is_empty() {
            return Err(ReconError::ConfigValidation("data.events must not be empty".into()));
        }
        if self.output.json.trim().is_empty() {
            return Err(ReconError::ConfigValidation("output.json must not be empty".into()));
        }

        let t = self.search.threshold;
        if !t.is_finite() || !(0.0..1.0).contains(&t) {
            return Err(ReconError::ConfigValidation(format!(
                "search.threshold must be in [0, 1), got {t}"
            )));
        }

        if let Some(ref file) = self.aliases.file {
            if file.trim().is_empty() {
                return Err(ReconError::ConfigValidation(
                    "aliases.file must not be empty when set".into(),
                ));
            }
        }

        Ok(())
    }

    /// Resolve a configured path against `base_dir` unless it is absolute.
    pub fn resolve_path(base_dir: &Path, path: &str) -> PathBuf {
        let p = Path::new(path);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            base_dir.join(p)
        }
    }

    /// Build the alias table this config asks for: the file when one is set,
    /// otherwise the builtin table, otherwise none.
    pub fn alias_table(&self, base_dir: &Path) -> Result<AliasTable, ReconError> {
        match self.aliases.file {
            Some(ref file) => {
                let path = Self::resolve_path(base_dir, file);
                let input = std::fs::read_to_string(&path).map_err(|e| {
                    ReconError::Io(format!("cannot read {}: {e}", path.display()))
                })?;
                AliasTable::from_toml(&input)
            }
            None if self.aliases.builtin => Ok(AliasTable::builtin()),
            None => Ok(AliasTable::empty()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
