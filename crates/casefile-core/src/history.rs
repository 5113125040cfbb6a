//! Merging roster matches into a per-case history.
//!
//! Matches are pushed in scan order: the whole accused roster first, then
//! the bailer roster. The first match seen for a case id decides the role
//! recorded for that case, so an accused match wins over a bailer match in
//! the same case.

use std::collections::{BTreeSet, HashMap, HashSet};

use uuid::Uuid;

use crate::{
  case::{CaseHistoryEntry, CaseSummary},
  person::Role,
};

/// Case ids matched for one person, deduplicated by case, in first-seen
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseMatches {
  order: Vec<(Uuid, Role)>,
  seen:  HashSet<Uuid>,
}

impl CaseMatches {
  pub fn new() -> Self { Self::default() }

  /// Record a match. Returns `false` if the case was already recorded.
  pub fn push(&mut self, case_id: Uuid, role: Role) -> bool {
    if !self.seen.insert(case_id) {
      return false;
    }
    self.order.push((case_id, role));
    true
  }

  pub fn extend(&mut self, role: Role, case_ids: impl IntoIterator<Item = Uuid>) {
    for case_id in case_ids {
      self.push(case_id, role);
    }
  }

  pub fn len(&self) -> usize { self.order.len() }

  pub fn is_empty(&self) -> bool { self.order.is_empty() }

  pub fn iter(&self) -> impl Iterator<Item = (Uuid, Role)> + '_ {
    self.order.iter().copied()
  }

  /// The distinct case ids to look up in the case directory.
  pub fn case_ids(&self) -> BTreeSet<Uuid> {
    self.order.iter().map(|(id, _)| *id).collect()
  }

  /// Attach case summaries. Cases absent from `directory` are dropped and
  /// returned in the second element so the caller can report them.
  pub fn into_history(
    self,
    directory: &HashMap<Uuid, CaseSummary>,
  ) -> (Vec<CaseHistoryEntry>, Vec<Uuid>) {
    let mut history = Vec::with_capacity(self.order.len());
    let mut missing = Vec::new();
    for (case_id, role) in self.order {
      match directory.get(&case_id) {
        Some(summary) => history.push(CaseHistoryEntry::new(summary.clone(), role)),
        None => missing.push(case_id),
      }
    }
    (history, missing)
  }
}
