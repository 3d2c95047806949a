//! `clubdir-recon` — club name reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded club and event records, returns the
//! canonical-name mapping. Loaders and config live alongside but the resolver
//! itself does no IO.

pub mod alias;
pub mod catalog;
pub mod config;
pub mod error;
pub mod loader;
pub mod matcher;
pub mod model;
pub mod resolver;
pub mod summary;

pub use alias::AliasTable;
pub use catalog::EventCatalog;
pub use config::ProcessorConfig;
pub use error::ReconError;
pub use matcher::MatchRule;
pub use model::{ClubRecord, EventRecord, Resolution, ResolvedMapping};
pub use resolver::Resolver;
pub use summary::ResolveSummary;
