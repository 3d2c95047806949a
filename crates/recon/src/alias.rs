use serde::{Deserialize, Serialize};

use crate::error::ReconError;

/// Alias table shipped with the crate.
const BUILTIN_ALIASES: &str = include_str!("../aliases.toml");

const SUPPORTED_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// File format
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AliasFile {
    version: u32,
    #[serde(default)]
    alias: Vec<AliasFileEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AliasFileEntry {
    fragment: String,
    variants: Vec<String>,
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// A canonical-name fragment and the abbreviations accepted for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AliasEntry {
    pub fragment: String,
    pub variants: Vec<String>,
}

/// Read-only fragment -> variants lookup, tried in declaration order.
///
/// Everything is stored upper-cased so it compares directly against
/// upper-cased club names and labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: Vec<AliasEntry>,
}

impl AliasTable {
    /// A table with no entries; alias matching becomes a no-op.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The table embedded from `aliases.toml`.
    pub fn builtin() -> Self {
        // The embedded file is covered by `builtin_table_parses`; falling back
        // to an empty table keeps exact/containment matching available.
        Self::from_toml(BUILTIN_ALIASES).unwrap_or_else(|e| {
            log::error!("builtin alias table rejected: {e}");
            Self::empty()
        })
    }

    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let file: AliasFile =
            toml::from_str(input).map_err(|e| ReconError::AliasParse(e.to_string()))?;

        if file.version != SUPPORTED_VERSION {
            return Err(ReconError::AliasParse(format!(
                "unsupported alias table version {} (expected {SUPPORTED_VERSION})",
                file.version
            )));
        }

        let entries = file
            .alias
            .into_iter()
            .enumerate()
            .map(|(i, entry)| AliasEntry::new(&entry.fragment, &entry.variants, i))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { entries })
    }

    pub fn from_entries<F, V, I>(entries: I) -> Result<Self, ReconError>
    where
        I: IntoIterator<Item = (F, Vec<V>)>,
        F: AsRef<str>,
        V: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .enumerate()
            .map(|(i, (fragment, variants))| AliasEntry::new(fragment.as_ref(), &variants, i))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[AliasEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry whose fragment appears in `canonical_upper` and one of
    /// whose variants appears in `label_upper`. Both inputs must already be
    /// upper-cased.
    pub fn matches(&self, canonical_upper: &str, label_upper: &str) -> Option<&AliasEntry> {
        self.entries.iter().find(|entry| {
            canonical_upper.contains(entry.fragment.as_str())
                && entry.variants.iter().any(|v| label_upper.contains(v.as_str()))
        })
    }
}

impl AliasEntry {
    fn new<V: AsRef<str>>(fragment: &str, variants: &[V], index: usize) -> Result<Self, ReconError> {
        let fragment = fragment.trim().to_uppercase();
        if fragment.is_empty() {
            return Err(ReconError::AliasParse(format!("entry {index}: empty fragment")));
        }
        if variants.is_empty() {
            return Err(ReconError::AliasParse(format!(
                "entry {index} ('{fragment}'): no variants"
            )));
        }

        let mut upper = Vec::with_capacity(variants.len());
        for v in variants {
            let v = v.as_ref().trim().to_uppercase();
            if v.is_empty() {
                // An empty variant is contained in every label.
                return Err(ReconError::AliasParse(format!(
                    "entry {index} ('{fragment}'): empty variant"
                )));
            }
            if !upper.contains(&v) {
                upper.push(v);
            }
        }

        Ok(Self { fragment, variants: upper })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_parses() {
        let table = AliasTable::from_toml(BUILTIN_ALIASES).unwrap();
        assert_eq!(table.len(), 25);
        assert_eq!(table.entries()[0].fragment, "CODECHEF - VIT");
        assert_eq!(table.entries()[0].variants, vec!["CODECHEF", "CODE CHEF"]);
        assert_eq!(AliasTable::builtin(), table);
    }

    #[test]
    fn variants_are_uppercased_and_deduplicated() {
        let table = AliasTable::builtin();
        let iiche = table
            .entries()
            .iter()
            .find(|e| e.fragment.contains("IICHE"))
            .unwrap();
        // "IICHE" and "IIChE" collapse into one variant
        assert_eq!(iiche.variants, vec!["IICHE"]);
    }

    #[test]
    fn matches_requires_fragment_and_variant() {
        let table = AliasTable::builtin();
        let acm = "ASSOCIATION FOR COMPUTING MACHINERY (ACM)";

        let hit = table.matches(acm, "ACM VIT STUDENT CHAPTER").unwrap();
        assert_eq!(hit.fragment, acm);
        assert!(table.matches(acm, "COMPUTING CLUB").is_none());
        assert!(table.matches("CHESS CLUB", "ACM").is_none());
    }

    #[test]
    fn fragment_may_be_part_of_canonical_name() {
        let table = AliasTable::builtin();
        assert!(table
            .matches("VIT FILM SOCIETY (VFS) - CHENNAI", "FILM SOCIETY")
            .is_some());
    }

    #[test]
    fn empty_table_never_matches() {
        let table = AliasTable::empty();
        assert!(table.is_empty());
        assert!(table.matches("ASSOCIATION FOR COMPUTING MACHINERY (ACM)", "ACM").is_none());
    }

    #[test]
    fn from_entries_normalizes() {
        let table = AliasTable::from_entries([("Robotics Club (RC)", vec!["rc", "Robo"])]).unwrap();
        assert_eq!(table.entries()[0].fragment, "ROBOTICS CLUB (RC)");
        assert_eq!(table.entries()[0].variants, vec!["RC", "ROBO"]);
    }

    #[test]
    fn reject_unsupported_version() {
        let err = AliasTable::from_toml("version = 2\n").unwrap_err();
        assert!(matches!(err, ReconError::AliasParse(_)));
        assert!(err.to_string().contains("unsupported alias table version 2"));
    }

    #[test]
    fn reject_empty_variant() {
        let input = r#"
version = 1

[[alias]]
fragment = "CHESS CLUB"
variants = ["CHESS", " "]
"#;
        let err = AliasTable::from_toml(input).unwrap_err();
        assert!(matches!(err, ReconError::AliasParse(_)));
        assert!(err.to_string().contains("empty variant"));
    }

    #[test]
    fn reject_entry_without_variants() {
        let input = r#"
version = 1

[[alias]]
fragment = "CHESS CLUB"
variants = []
"#;
        let err = AliasTable::from_toml(input).unwrap_err();
        assert!(matches!(err, ReconError::AliasParse(_)));
        assert!(err.to_string().contains("no variants"));
    }

    #[test]
    fn reject_empty_fragment() {
        let input = r#"
version = 1

[[alias]]
fragment = "  "
variants = ["CC"]
"#;
        let err = AliasTable::from_toml(input).unwrap_err();
        assert!(matches!(err, ReconError::AliasParse(_)));
        assert!(err.to_string().contains("entry 0: empty fragment"));
    }

    #[test]
    fn reject_unknown_key() {
        let input = r#"
version = 1

[[alias]]
fragment = "CHESS CLUB"
variants = ["CHESS"]
abbrev = "CC"
"#;
        assert!(matches!(AliasTable::from_toml(input), Err(ReconError::AliasParse(_))));
    }
}
