//! Case summaries and the history entries derived from them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::person::Role;

/// Read projection of a registered case (FIR), owned by the case store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseSummary {
  pub case_id:       Uuid,
  pub case_number:   String,
  pub district:      String,
  pub station:       String,
  /// Opaque to the engine; whatever the case store records.
  pub status:        String,
  pub incident_date: Option<NaiveDate>,
}

/// Input to the seeding writes of a case backend. The `case_id` is assigned
/// by the backend.
#[derive(Debug, Clone)]
pub struct NewCase {
  pub case_number:   String,
  pub district:      String,
  pub station:       String,
  pub status:        String,
  pub incident_date: Option<NaiveDate>,
}

impl NewCase {
  pub fn new(case_number: impl Into<String>) -> Self {
    Self {
      case_number:   case_number.into(),
      district:      String::new(),
      station:       String::new(),
      status:        "open".to_owned(),
      incident_date: None,
    }
  }

  pub fn into_summary(self, case_id: Uuid) -> CaseSummary {
    CaseSummary {
      case_id,
      case_number: self.case_number,
      district: self.district,
      station: self.station,
      status: self.status,
      incident_date: self.incident_date,
    }
  }
}

/// One other case in which a matching identity appears.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseHistoryEntry {
  pub case_id:       Uuid,
  pub case_number:   String,
  pub district:      String,
  pub station:       String,
  pub status:        String,
  pub incident_date: Option<NaiveDate>,
  /// The roster the match was found in.
  pub role:          Role,
}

impl CaseHistoryEntry {
  pub fn new(summary: CaseSummary, role: Role) -> Self {
    Self {
      case_id: summary.case_id,
      case_number: summary.case_number,
      district: summary.district,
      station: summary.station,
      status: summary.status,
      incident_date: summary.incident_date,
      role,
    }
  }
}
