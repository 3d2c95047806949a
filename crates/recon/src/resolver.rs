use crate::alias::AliasTable;
use crate::matcher::{fold, match_folded, MatchRule};
use crate::model::{ClubRecord, EventRecord, Resolution};

/// Attributes free-text event club labels to canonical club records.
///
/// Clubs are tried in the order given and the first one that matches wins,
/// so the order of the club list is part of the result. Callers must not
/// reorder it between runs if they expect identical output.
#[derive(Debug, Clone)]
pub struct Resolver {
    aliases: AliasTable,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(AliasTable::builtin())
    }
}

/// Club name upper-cased once per resolve call.
struct FoldedClub<'a> {
    club: &'a ClubRecord,
    upper: String,
}

impl Resolver {
    pub fn new(aliases: AliasTable) -> Self {
        Self { aliases }
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Group `events` under the canonical name of the first club that matches
    /// each event's `club` label. Labels with no match are collected, in
    /// order and with duplicates, in `unmatched`.
    pub fn resolve(&self, clubs: &[ClubRecord], events: &[EventRecord]) -> Resolution {
        let folded = fold_clubs(clubs);
        let mut resolution = Resolution::default();

        for event in events {
            match self.first_match(&folded, &event.club) {
                Some((club, rule)) => {
                    log::trace!("'{}' -> '{}' ({rule})", event.club, club.name);
                    resolution
                        .mapping
                        .entry(club.name.clone())
                        .or_default()
                        .push(event.clone());
                }
                None => {
                    log::debug!("no match found for \"{}\"", event.club);
                    resolution.unmatched.push(event.club.clone());
                }
            }
        }

        log::info!(
            "resolved {} of {} events onto {} clubs",
            resolution.matched_event_count(),
            events.len(),
            resolution.mapping.len(),
        );

        resolution
    }

    /// The first club in `clubs` whose name matches `label`, with the rule that fired.
    pub fn find_club<'a>(
        &self,
        clubs: &'a [ClubRecord],
        label: &str,
    ) -> Option<(&'a ClubRecord, MatchRule)> {
        self.first_match(&fold_clubs(clubs), label)
    }

    fn first_match<'a>(
        &self,
        clubs: &[FoldedClub<'a>],
        label: &str,
    ) -> Option<(&'a ClubRecord, MatchRule)> {
        if label.trim().is_empty() {
            return None;
        }
        let label_upper = fold(label);
        clubs.iter().find_map(|c| {
            match_folded(&c.upper, &label_upper, &self.aliases).map(|rule| (c.club, rule))
        })
    }
}

fn fold_clubs(clubs: &[ClubRecord]) -> Vec<FoldedClub<'_>> {
    clubs
        .iter()
        .map(|club| FoldedClub {
            club,
            upper: fold(&club.name),
        })
        .collect()
}
