//! An in-memory roster source and case directory.
//!
//! Populated up front through `&mut self`, then shared read-only (typically
//! behind an `Arc`). Used in tests and for single-process demos.

use std::{
  collections::{BTreeSet, HashMap},
  convert::Infallible,
};

use uuid::Uuid;

use crate::{
  case::{CaseSummary, NewCase},
  identity::IdentityKey,
  person::{NewPerson, PersonRecord, Role},
  source::{CaseDirectory, RosterSource},
};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  cases:   HashMap<Uuid, CaseSummary>,
  accused: Vec<PersonRecord>,
  bailers: Vec<PersonRecord>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  pub fn add_case(&mut self, input: NewCase) -> CaseSummary {
    let summary = input.into_summary(Uuid::new_v4());
    self.cases.insert(summary.case_id, summary.clone());
    summary
  }

  /// Attach a person to a case. The case does not have to be registered;
  /// unregistered cases behave like directory misses.
  pub fn add_person(&mut self, role: Role, input: NewPerson) -> PersonRecord {
    let record = input.into_record(Uuid::new_v4(), role);
    self.roster_mut(role).push(record.clone());
    record
  }

  /// Forget a case summary while keeping the people attached to it.
  pub fn remove_case(&mut self, case_id: Uuid) -> Option<CaseSummary> {
    self.cases.remove(&case_id)
  }

  fn roster(&self, role: Role) -> &[PersonRecord] {
    match role {
      Role::Accused => &self.accused,
      Role::Bailer => &self.bailers,
    }
  }

  fn roster_mut(&mut self, role: Role) -> &mut Vec<PersonRecord> {
    match role {
      Role::Accused => &mut self.accused,
      Role::Bailer => &mut self.bailers,
    }
  }
}

impl RosterSource for MemoryStore {
  type Error = Infallible;

  async fn fetch_roster(&self, role: Role) -> Result<Vec<PersonRecord>, Infallible> {
    Ok(self.roster(role).to_vec())
  }

  async fn fetch_record(
    &self,
    role: Role,
    id: Uuid,
  ) -> Result<Option<PersonRecord>, Infallible> {
    Ok(self.roster(role).iter().find(|r| r.id == id).cloned())
  }

  async fn fetch_matches(
    &self,
    role: Role,
    identity: &IdentityKey,
    exclude_case_id: Uuid,
  ) -> Result<Vec<PersonRecord>, Infallible> {
    Ok(
      self
        .roster(role)
        .iter()
        .filter(|r| r.case_id != exclude_case_id && r.identity.matches(identity))
        .cloned()
        .collect(),
    )
  }
}

impl CaseDirectory for MemoryStore {
  type Error = Infallible;

  async fn resolve_cases(
    &self,
    case_ids: &BTreeSet<Uuid>,
  ) -> Result<HashMap<Uuid, CaseSummary>, Infallible> {
    Ok(
      case_ids
        .iter()
        .filter_map(|id| self.cases.get(id).map(|s| (*id, s.clone())))
        .collect(),
    )
  }
}
