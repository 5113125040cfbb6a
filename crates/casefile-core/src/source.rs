//! The read interfaces the cross-reference engine consumes.
//!
//! Both traits are implemented by storage backends (e.g.
//! `casefile-store-sqlite`) and by the in-memory [`MemoryStore`]. The engine
//! depends on these abstractions, never on a concrete backend, and never
//! writes through them.
//!
//! Implementations must tolerate many concurrent readers; the engine does no
//! synchronisation of its own.
//!
//! [`MemoryStore`]: crate::memory::MemoryStore

use std::{
  collections::{BTreeSet, HashMap},
  future::Future,
};

use uuid::Uuid;

use crate::{
  case::CaseSummary,
  identity::IdentityKey,
  person::{PersonRecord, Role},
};

/// Access to the accused and bailer rosters.
pub trait RosterSource: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Every record in the roster for `role`, in a stable roster order.
  fn fetch_roster(
    &self,
    role: Role,
  ) -> impl Future<Output = Result<Vec<PersonRecord>, Self::Error>> + Send + '_;

  /// A single record by id. Returns `None` if not found.
  fn fetch_record(
    &self,
    role: Role,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<PersonRecord>, Self::Error>> + Send + '_;

  /// Records in the `role` roster whose mobile equals `identity.mobile` or
  /// whose national ID equals `identity.national_id` (whichever are
  /// present), excluding records attached to `exclude_case_id`. Results
  /// follow roster order.
  ///
  /// An unmatchable identity yields no records.
  fn fetch_matches<'a>(
    &'a self,
    role: Role,
    identity: &'a IdentityKey,
    exclude_case_id: Uuid,
  ) -> impl Future<Output = Result<Vec<PersonRecord>, Self::Error>> + Send + 'a;
}

/// Lookup from case id to case summary.
pub trait CaseDirectory: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Summaries for the requested ids. Ids the directory cannot answer for
  /// are simply absent from the returned map; only transport failures are
  /// errors.
  fn resolve_cases<'a>(
    &'a self,
    case_ids: &'a BTreeSet<Uuid>,
  ) -> impl Future<Output = Result<HashMap<Uuid, CaseSummary>, Self::Error>> + Send + 'a;
}
