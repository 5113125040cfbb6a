//! Person records — the entries of the accused and bailer rosters.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{case::CaseHistoryEntry, identity::IdentityKey};

/// Which roster a person record lives in.
///
/// The role is fixed by the roster; it is never a mutable field of the
/// record.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
  strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
  Accused,
  Bailer,
}

impl Role {
  /// Both roles in scan order. The accused roster is always scanned first.
  pub const SCAN_ORDER: [Role; 2] = [Role::Accused, Role::Bailer];
}

/// A person attached to a case, either as an accused party or as a bailer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
  /// Unique within its roster.
  pub id:          Uuid,
  pub case_id:     Uuid,
  pub role:        Role,
  #[serde(flatten)]
  pub identity:    IdentityKey,
  pub name:        String,
  pub father_name: Option<String>,
  pub age:         Option<u16>,
  pub gender:      Option<String>,
  pub address:     Option<String>,
}

/// Input to the seeding writes of a roster backend. The `id` is assigned by
/// the backend.
#[derive(Debug, Clone, Default)]
pub struct NewPerson {
  pub case_id:     Uuid,
  pub identity:    IdentityKey,
  pub name:        String,
  pub father_name: Option<String>,
  pub age:         Option<u16>,
  pub gender:      Option<String>,
  pub address:     Option<String>,
}

impl NewPerson {
  /// Convenience constructor with the descriptive payload left empty.
  pub fn new(case_id: Uuid, name: impl Into<String>, identity: IdentityKey) -> Self {
    Self {
      case_id,
      identity,
      name: name.into(),
      ..Default::default()
    }
  }

  pub fn into_record(self, id: Uuid, role: Role) -> PersonRecord {
    PersonRecord {
      id,
      case_id: self.case_id,
      role,
      identity: self.identity,
      name: self.name,
      father_name: self.father_name,
      age: self.age,
      gender: self.gender,
      address: self.address,
    }
  }
}

/// A person record annotated with its cross-case history.
///
/// Computed fresh on every read; never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedPersonRecord {
  #[serde(flatten)]
  pub record:                 PersonRecord,
  /// Other cases sharing this identity, at most one entry per case.
  pub history:                Vec<CaseHistoryEntry>,
  /// `history.len() + 1`; never zero.
  pub occurrence_count:       usize,
  /// A bailer who appears as an accused in some other case.
  pub was_previously_accused: bool,
}

impl EnrichedPersonRecord {
  pub fn new(
    record: PersonRecord,
    history: Vec<CaseHistoryEntry>,
    own_role: Role,
  ) -> Self {
    let occurrence_count = history.len() + 1;
    let was_previously_accused = own_role == Role::Bailer
      && history.iter().any(|h| h.role == Role::Accused);
    Self { record, history, occurrence_count, was_previously_accused }
  }

  pub fn is_repeat(&self) -> bool { self.occurrence_count > 1 }
}

/// Stable sort by `occurrence_count`, highest first. Ties keep their input
/// order.
pub fn sort_by_occurrence(records: &mut [EnrichedPersonRecord]) {
  records.sort_by(|a, b| b.occurrence_count.cmp(&a.occurrence_count));
}

#[cfg(test)]
mod tests {
  use std::str::FromStr as _;

  use super::*;
  use crate::case::CaseSummary;

  fn record(role: Role) -> PersonRecord {
    NewPerson::new(Uuid::new_v4(), "Ravi", IdentityKey::from_mobile("9000000001"))
      .into_record(Uuid::new_v4(), role)
  }

  fn entry(role: Role) -> CaseHistoryEntry {
    let summary = CaseSummary {
      case_id:       Uuid::new_v4(),
      case_number:   "FIR-1/2024".into(),
      district:      "North".into(),
      station:       "Central".into(),
      status:        "open".into(),
      incident_date: None,
    };
    CaseHistoryEntry::new(summary, role)
  }

  #[test]
  fn role_text_roundtrip() {
    assert_eq!(Role::Accused.to_string(), "accused");
    assert_eq!(Role::Bailer.as_ref(), "bailer");
    assert_eq!(Role::from_str("bailer").unwrap(), Role::Bailer);
    assert!(Role::from_str("witness").is_err());
  }

  #[test]
  fn occurrence_count_is_history_plus_one() {
    let lone = EnrichedPersonRecord::new(record(Role::Accused), vec![], Role::Accused);
    assert_eq!(lone.occurrence_count, 1);
    assert!(!lone.is_repeat());

    let repeat = EnrichedPersonRecord::new(
      record(Role::Accused),
      vec![entry(Role::Accused), entry(Role::Bailer)],
      Role::Accused,
    );
    assert_eq!(repeat.occurrence_count, 3);
    assert!(repeat.is_repeat());
  }

  #[test]
  fn accused_is_never_previously_accused() {
    let enriched = EnrichedPersonRecord::new(
      record(Role::Accused),
      vec![entry(Role::Accused)],
      Role::Accused,
    );
    assert!(!enriched.was_previously_accused);
  }

  #[test]
  fn bailer_with_accused_history_is_flagged() {
    let flagged = EnrichedPersonRecord::new(
      record(Role::Bailer),
      vec![entry(Role::Bailer), entry(Role::Accused)],
      Role::Bailer,
    );
    assert!(flagged.was_previously_accused);

    let clean = EnrichedPersonRecord::new(
      record(Role::Bailer),
      vec![entry(Role::Bailer)],
      Role::Bailer,
    );
    assert!(!clean.was_previously_accused);
  }

  #[test]
  fn sort_is_stable_and_descending() {
    let a = EnrichedPersonRecord::new(record(Role::Accused), vec![], Role::Accused);
    let b = EnrichedPersonRecord::new(
      record(Role::Accused),
      vec![entry(Role::Accused)],
      Role::Accused,
    );
    let c = EnrichedPersonRecord::new(record(Role::Accused), vec![], Role::Accused);
    let d = EnrichedPersonRecord::new(
      record(Role::Accused),
      vec![entry(Role::Accused)],
      Role::Accused,
    );

    let ids = [&a, &b, &c, &d].map(|r| r.record.id);
    let mut all = vec![a, b, c, d];
    sort_by_occurrence(&mut all);

    let sorted: Vec<Uuid> = all.iter().map(|r| r.record.id).collect();
    assert_eq!(sorted, vec![ids[1], ids[3], ids[0], ids[2]]);
  }

  #[test]
  fn enriched_record_serialises_flat() {
    let enriched = EnrichedPersonRecord::new(record(Role::Bailer), vec![], Role::Bailer);
    let json = serde_json::to_value(&enriched).unwrap();
    assert_eq!(json["role"], "bailer");
    assert_eq!(json["mobile"], "9000000001");
    assert_eq!(json["occurrence_count"], 1);
    assert_eq!(json["was_previously_accused"], false);
  }
}
