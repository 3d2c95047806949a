use serde::Serialize;

use crate::alias::AliasTable;

/// Which rule attributed a label to a canonical name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRule {
    /// Case-insensitive equality.
    Exact,
    /// One side contains the other.
    Containment,
    /// An alias-table entry links the two.
    Alias,
}

impl std::fmt::Display for MatchRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Containment => write!(f, "containment"),
            Self::Alias => write!(f, "alias"),
        }
    }
}

/// Upper-case a name for comparison. Unicode default case mapping, no locale.
pub fn fold(name: &str) -> String {
    name.to_uppercase()
}

/// Evaluate the match predicate for one canonical name against one club label.
///
/// Rules are tried in priority order and the first that holds is returned.
/// A blank canonical name or a blank label never matches.
pub fn match_rule(canonical: &str, label: &str, aliases: &AliasTable) -> Option<MatchRule> {
    if canonical.trim().is_empty() || label.trim().is_empty() {
        return None;
    }
    match_folded(&fold(canonical), &fold(label), aliases)
}

/// Same as [`match_rule`] for inputs already passed through [`fold`].
pub(crate) fn match_folded(
    canonical_upper: &str,
    label_upper: &str,
    aliases: &AliasTable,
) -> Option<MatchRule> {
    if canonical_upper.trim().is_empty() || label_upper.trim().is_empty() {
        return None;
    }

    if canonical_upper == label_upper {
        return Some(MatchRule::Exact);
    }

    if canonical_upper.contains(label_upper) || label_upper.contains(canonical_upper) {
        return Some(MatchRule::Containment);
    }

    if aliases.matches(canonical_upper, label_upper).is_some() {
        return Some(MatchRule::Alias);
    }

    None
}
