use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Read a string field that snapshots sometimes write as `null`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Club records (canonical)
// ---------------------------------------------------------------------------

/// A canonical club or chapter record from the directory snapshot.
///
/// Only `name` takes part in reconciliation. The rest is carried through so
/// the same type serves search and presentation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClubRecord {
    pub serial: u32,
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub img_path: String,
    pub asc_type: ClubKind,
    pub club_type: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapter_type: Option<String>,
    pub socials: Socials,
}

impl ClubRecord {
    /// Minimal record carrying only a canonical name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ClubKind {
    #[default]
    Club,
    Chapter,
}

impl std::fmt::Display for ClubKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Club => write!(f, "CLUB"),
            Self::Chapter => write!(f, "CHAPTER"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Socials {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

// ---------------------------------------------------------------------------
// Event records (free-text club label)
// ---------------------------------------------------------------------------

/// A festival event as submitted by organizers.
///
/// `name` is not unique: co-organized events appear once per organizing
/// club, each submission carrying a different `club` label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventRecord {
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(rename = "type", deserialize_with = "null_as_empty")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub club: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub short_description: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub tagline: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub image: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub start_date: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub end_date: String,
}

impl EventRecord {
    /// Minimal record carrying an event name and its club label.
    pub fn labelled(name: impl Into<String>, club: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            club: club.into(),
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Canonical club name -> events attributed to it.
///
/// Keys iterate in first-match order and each list keeps the order events
/// were processed in, so serialized output is reproducible.
pub type ResolvedMapping = IndexMap<String, Vec<EventRecord>>;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Resolution {
    pub mapping: ResolvedMapping,
    /// Club labels that matched no canonical record, in input order,
    /// duplicates kept.
    pub unmatched: Vec<String>,
}

impl Resolution {
    pub fn matched_event_count(&self) -> usize {
        self.mapping.values().map(Vec::len).sum()
    }

    pub fn total_events(&self) -> usize {
        self.matched_event_count() + self.unmatched.len()
    }

    /// Unmatched labels with duplicates removed, first occurrence wins.
    pub fn distinct_unmatched(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.unmatched
            .iter()
            .map(String::as_str)
            .filter(|label| seen.insert(*label))
            .collect()
    }
}
