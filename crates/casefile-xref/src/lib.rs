//! Cross-case identity cross-reference engine.
//!
//! Given a person attached to one case, finds every other case in which a
//! person sharing that identity appears, as an accused or as a bailer, and
//! rolls the results up into enriched rosters and dashboard statistics.
//!
//! Everything here is read-only and stateless: sources are injected through
//! the [`RosterSource`] and [`CaseDirectory`] traits and results are
//! recomputed on every call.
//!
//! [`RosterSource`]: casefile_core::source::RosterSource
//! [`CaseDirectory`]: casefile_core::source::CaseDirectory

pub mod cancel;
pub mod enrich;
pub mod error;
pub mod resolver;
pub mod stats;

#[cfg(test)]
mod fixtures;

pub use enrich::{Enricher, Strategy};
pub use error::{Error, Result};
pub use resolver::Resolver;
pub use stats::{Report, Stats, summarize};
