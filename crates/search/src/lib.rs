//! `clubdir-search` — fuzzy text search used by the directory's live filters.
//!
//! No dependencies on the reconciliation engine; callers decide what text an
//! item is searched by.

pub mod fuzzy;

pub use fuzzy::{is_match, score, search, search_scored, search_with_threshold, Scored, DEFAULT_THRESHOLD};
