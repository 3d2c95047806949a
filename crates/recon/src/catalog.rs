//! Read-side queries over a resolved mapping.
//!
//! The same event can sit under several clubs when it was co-organized, so
//! anything that counts events deduplicates by event name first.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::Serialize;

use crate::model::{EventRecord, ResolvedMapping};

/// An event organized by more than one club.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollaborativeEvent<'a> {
    pub event: &'a EventRecord,
    pub clubs: Vec<&'a str>,
}

pub struct EventCatalog<'a> {
    mapping: &'a ResolvedMapping,
}

impl<'a> EventCatalog<'a> {
    pub fn new(mapping: &'a ResolvedMapping) -> Self {
        Self { mapping }
    }

    pub fn events_for_club(&self, club: &str) -> &'a [EventRecord] {
        self.mapping.get(club).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn club_has_events(&self, club: &str) -> bool {
        !self.events_for_club(club).is_empty()
    }

    pub fn clubs_with_events(&self) -> Vec<&'a str> {
        self.mapping.keys().map(String::as_str).collect()
    }

    /// Every event once, by name; the first club's copy is kept.
    pub fn unique_events(&self) -> Vec<&'a EventRecord> {
        let mut seen = HashSet::new();
        self.mapping
            .values()
            .flatten()
            .filter(|event| seen.insert(event.name.as_str()))
            .collect()
    }

    pub fn total_unique_events(&self) -> usize {
        self.unique_events().len()
    }

    pub fn events_by_type(&self, kind: &str) -> Vec<&'a EventRecord> {
        self.unique_events()
            .into_iter()
            .filter(|event| event.kind == kind)
            .collect()
    }

    pub fn events_count_by_type(&self, kind: &str) -> usize {
        self.events_by_type(kind).len()
    }

    /// Distinct event types in first-seen order.
    pub fn event_types(&self) -> Vec<&'a str> {
        self.type_stats().into_keys().collect()
    }

    pub fn type_stats(&self) -> IndexMap<&'a str, usize> {
        let mut stats = IndexMap::new();
        for event in self.unique_events() {
            *stats.entry(event.kind.as_str()).or_insert(0) += 1;
        }
        stats
    }

    /// Clubs that list an event with this name, in mapping order.
    pub fn collaborating_clubs(&self, event_name: &str) -> Vec<&'a str> {
        self.mapping
            .iter()
            .filter(|(_, events)| events.iter().any(|e| e.name == event_name))
            .map(|(club, _)| club.as_str())
            .collect()
    }

    pub fn is_collaborative(&self, event_name: &str) -> bool {
        self.collaborating_clubs(event_name).len() > 1
    }

    pub fn collaborative_events(&self) -> Vec<CollaborativeEvent<'a>> {
        self.unique_events()
            .into_iter()
            .filter_map(|event| {
                let clubs = self.collaborating_clubs(&event.name);
                (clubs.len() > 1).then_some(CollaborativeEvent { event, clubs })
            })
            .collect()
    }

    pub fn collaborative_events_count(&self) -> usize {
        self.collaborative_events().len()
    }
}
