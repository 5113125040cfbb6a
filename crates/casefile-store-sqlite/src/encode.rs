//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! UUIDs are stored as hyphenated lowercase strings; incident dates as
//! ISO 8601 calendar dates.

use casefile_core::{
  case::CaseSummary,
  identity::IdentityKey,
  person::{PersonRecord, Role},
};
use chrono::NaiveDate;
use uuid::Uuid;

use crate::Result;

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  Ok(NaiveDate::parse_from_str(s, "%Y-%m-%d")?)
}

// ─── Role ────────────────────────────────────────────────────────────────────

/// The table holding the roster for `role`.
pub fn roster_table(role: Role) -> &'static str {
  match role {
    Role::Accused => "accused",
    Role::Bailer => "bailers",
  }
}

/// Column list shared by every roster `SELECT`, in [`RawPerson`] order.
pub const PERSON_COLUMNS: &str =
  "person_id, case_id, mobile, national_id, name, father_name, age, gender, address";

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from an `accused` or `bailers` row.
pub struct RawPerson {
  pub person_id:   String,
  pub case_id:     String,
  pub mobile:      Option<String>,
  pub national_id: Option<String>,
  pub name:        String,
  pub father_name: Option<String>,
  pub age:         Option<u16>,
  pub gender:      Option<String>,
  pub address:     Option<String>,
}

impl RawPerson {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      person_id:   row.get(0)?,
      case_id:     row.get(1)?,
      mobile:      row.get(2)?,
      national_id: row.get(3)?,
      name:        row.get(4)?,
      father_name: row.get(5)?,
      age:         row.get(6)?,
      gender:      row.get(7)?,
      address:     row.get(8)?,
    })
  }

  pub fn into_record(self, role: Role) -> Result<PersonRecord> {
    Ok(PersonRecord {
      id: decode_uuid(&self.person_id)?,
      case_id: decode_uuid(&self.case_id)?,
      role,
      identity: IdentityKey::new(self.mobile, self.national_id),
      name: self.name,
      father_name: self.father_name,
      age: self.age,
      gender: self.gender,
      address: self.address,
    })
  }
}

/// Raw values read directly from a `cases` row.
pub struct RawCase {
  pub case_id:       String,
  pub case_number:   String,
  pub district:      String,
  pub station:       String,
  pub status:        String,
  pub incident_date: Option<String>,
}

impl RawCase {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      case_id:       row.get(0)?,
      case_number:   row.get(1)?,
      district:      row.get(2)?,
      station:       row.get(3)?,
      status:        row.get(4)?,
      incident_date: row.get(5)?,
    })
  }

  pub fn into_summary(self) -> Result<CaseSummary> {
    Ok(CaseSummary {
      case_id:       decode_uuid(&self.case_id)?,
      case_number:   self.case_number,
      district:      self.district,
      station:       self.station,
      status:        self.status,
      incident_date: self.incident_date.as_deref().map(decode_date).transpose()?,
    })
  }
}
