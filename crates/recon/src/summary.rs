use indexmap::IndexMap;
use serde::Serialize;

use crate::model::{ClubRecord, EventRecord, Resolution, ResolvedMapping};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolveSummary {
    pub total_events: usize,
    pub total_clubs: usize,
    pub matched_clubs: usize,
    pub matched_events: usize,
    pub unmatched_events: usize,
    pub distinct_unmatched_labels: usize,
    /// Matched events as a percentage of all events; 0 when there are none.
    pub match_rate: f64,
}

impl ResolveSummary {
    /// Compute summary statistics from a resolution and the inputs it came from.
    pub fn compute(clubs: &[ClubRecord], events: &[EventRecord], resolution: &Resolution) -> Self {
        let matched_events = resolution.matched_event_count();
        let match_rate = if events.is_empty() {
            0.0
        } else {
            matched_events as f64 / events.len() as f64 * 100.0
        };

        Self {
            total_events: events.len(),
            total_clubs: clubs.len(),
            matched_clubs: resolution.mapping.len(),
            matched_events,
            unmatched_events: events.len().saturating_sub(matched_events),
            distinct_unmatched_labels: resolution.distinct_unmatched().len(),
            match_rate,
        }
    }
}

/// Events counted per raw club label, most events first.
/// Labels with equal counts stay in first-seen order.
pub fn label_histogram(events: &[EventRecord]) -> Vec<(String, usize)> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for event in events {
        *counts.entry(event.club.as_str()).or_insert(0) += 1;
    }

    let mut histogram: Vec<(String, usize)> =
        counts.into_iter().map(|(label, n)| (label.to_string(), n)).collect();
    histogram.sort_by(|a, b| b.1.cmp(&a.1));
    histogram
}

/// Matched clubs with their event counts, most events first (stable).
pub fn ranked_matches(mapping: &ResolvedMapping) -> Vec<(&str, usize)> {
    let mut ranked: Vec<(&str, usize)> =
        mapping.iter().map(|(name, events)| (name.as_str(), events.len())).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}
