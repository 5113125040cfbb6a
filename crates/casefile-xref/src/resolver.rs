//! [`Resolver`] — cross-case history for a single identity.

use std::sync::Arc;

use casefile_core::{
  case::CaseHistoryEntry,
  history::CaseMatches,
  identity::IdentityKey,
  person::Role,
  source::{CaseDirectory, RosterSource},
};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{Error, Result};

/// Finds the other cases in which an identity appears.
///
/// Cloning is cheap — both sources are reference-counted.
pub struct Resolver<R, D> {
  roster:    Arc<R>,
  directory: Arc<D>,
}

impl<R, D> Clone for Resolver<R, D> {
  fn clone(&self) -> Self {
    Self {
      roster:    Arc::clone(&self.roster),
      directory: Arc::clone(&self.directory),
    }
  }
}

impl<R, D> Resolver<R, D>
where
  R: RosterSource,
  D: CaseDirectory,
{
  pub fn new(roster: Arc<R>, directory: Arc<D>) -> Self {
    Self { roster, directory }
  }

  pub fn roster(&self) -> &R { &self.roster }

  pub fn directory(&self) -> &D { &self.directory }

  /// History of `identity` outside `origin_case_id`, one entry per case.
  ///
  /// The accused roster is scanned before the bailer roster, so a case
  /// matched in both is reported as [`Role::Accused`]. Cases the directory
  /// cannot summarise are dropped with a warning. A failing roster scan or
  /// directory transport error fails the whole call.
  pub async fn resolve(
    &self,
    identity: &IdentityKey,
    origin_case_id: Uuid,
  ) -> Result<Vec<CaseHistoryEntry>> {
    if !identity.is_matchable() {
      return Ok(Vec::new());
    }

    let mut matches = CaseMatches::new();
    for role in Role::SCAN_ORDER {
      let records = self
        .roster
        .fetch_matches(role, identity, origin_case_id)
        .await
        .map_err(Error::unavailable)?;
      matches.extend(
        role,
        records
          .into_iter()
          .map(|r| r.case_id)
          .filter(|case_id| *case_id != origin_case_id),
      );
    }

    if matches.is_empty() {
      return Ok(Vec::new());
    }

    let case_ids = matches.case_ids();
    let summaries = self
      .directory
      .resolve_cases(&case_ids)
      .await
      .map_err(Error::unavailable)?;

    let (history, missing) = matches.into_history(&summaries);
    for case_id in &missing {
      warn!(%case_id, %origin_case_id, "matched case has no summary; dropped from history");
    }
    debug!(%origin_case_id, entries = history.len(), "resolved cross-case history");

    Ok(history)
  }
}
