//! `clubdir search` — fuzzy lookup over the club directory or the event list.

use clap::ValueEnum;

use clubdir_recon::{ClubRecord, EventRecord};
use clubdir_search::fuzzy::{search_scored, Scored};

use crate::process::{print_json, Workspace};
use crate::{CliError, SourceArgs};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SearchTarget {
    Clubs,
    Events,
}

/// Text a club is searched by: name, description, then its category tags.
fn club_text(club: &ClubRecord) -> String {
    let mut text = format!("{} {}", club.name, club.description);
    for tag in club.club_type.iter().chain(club.chapter_type.iter()) {
        text.push(' ');
        text.push_str(tag);
    }
    text
}

fn event_text(event: &EventRecord) -> String {
    format!("{} {} {}", event.name, event.tagline, event.club)
}

fn check_threshold(threshold: f64) -> Result<f64, CliError> {
    if threshold.is_finite() && (0.0..1.0).contains(&threshold) {
        Ok(threshold)
    } else {
        Err(CliError::usage(format!("--threshold must be in [0, 1), got {threshold}")))
    }
}

/// Keep the first `limit` hits; 0 keeps all of them.
fn truncate<T>(mut hits: Vec<T>, limit: usize) -> Vec<T> {
    if limit > 0 {
        hits.truncate(limit);
    }
    hits
}

pub fn cmd_search(
    source: &SourceArgs,
    query: &str,
    target: SearchTarget,
    threshold: Option<f64>,
    limit: Option<usize>,
    json: bool,
) -> Result<(), CliError> {
    let ws = Workspace::open(source)?;
    let threshold = check_threshold(threshold.unwrap_or(ws.config.search.threshold))?;
    let limit = limit.unwrap_or(ws.config.search.limit);

    match target {
        SearchTarget::Clubs => {
            let clubs = ws.clubs()?;
            let hits = truncate(search_scored(&clubs, query, club_text, threshold), limit);
            log::info!("{} clubs above {threshold} for {query:?}", hits.len());
            if json {
                return print_json(&hits);
            }
            print_hits(&hits, |club| club.name.clone());
        }
        SearchTarget::Events => {
            let events = ws.events()?;
            let hits = truncate(search_scored(&events, query, event_text, threshold), limit);
            log::info!("{} events above {threshold} for {query:?}", hits.len());
            if json {
                return print_json(&hits);
            }
            print_hits(&hits, |event| format!("{} ({})", event.name, event.club));
        }
    }
    Ok(())
}

fn print_hits<T>(hits: &[Scored<&T>], label: impl Fn(&T) -> String) {
    if hits.is_empty() {
        eprintln!("no matches");
        return;
    }
    for hit in hits {
        println!("  {:.2}  {}", hit.score, label(hit.item));
    }
}
