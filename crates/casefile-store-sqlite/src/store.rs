//! [`SqliteStore`] — the SQLite implementation of [`RosterSource`] and
//! [`CaseDirectory`].

use std::{
  collections::{BTreeSet, HashMap},
  path::Path,
};

use casefile_core::{
  case::{CaseSummary, NewCase},
  identity::IdentityKey,
  person::{NewPerson, PersonRecord, Role},
  source::{CaseDirectory, RosterSource},
};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use crate::{
  Error, Result,
  encode::{PERSON_COLUMNS, RawCase, RawPerson, encode_date, encode_uuid, roster_table},
  schema::SCHEMA,
};

/// Case ids per `IN (...)` lookup; keeps well under SQLite's bound
/// parameter limit.
const CASE_LOOKUP_CHUNK: usize = 500;

// ─── Store ───────────────────────────────────────────────────────────────────

/// Rosters and case directory backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Seeding writes ────────────────────────────────────────────────────────
  //
  // The engine never writes. These exist for the case-management side and
  // for tests.

  /// Register a new case and return its summary.
  pub async fn register_case(&self, input: NewCase) -> Result<CaseSummary> {
    let summary = input.into_summary(Uuid::new_v4());

    let id_str    = encode_uuid(summary.case_id);
    let number    = summary.case_number.clone();
    let district  = summary.district.clone();
    let station   = summary.station.clone();
    let status    = summary.status.clone();
    let date_str  = summary.incident_date.map(encode_date);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO cases (case_id, case_number, district, station, status, incident_date)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![id_str, number, district, station, status, date_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(summary)
  }

  /// Attach a person to an existing case in the `role` roster.
  pub async fn add_person(&self, role: Role, input: NewPerson) -> Result<PersonRecord> {
    let record = input.into_record(Uuid::new_v4(), role);

    let person_id   = encode_uuid(record.id);
    let case_id     = encode_uuid(record.case_id);
    let mobile      = record.identity.mobile().map(str::to_owned);
    let national_id = record.identity.national_id().map(str::to_owned);
    let name        = record.name.clone();
    let father_name = record.father_name.clone();
    let age         = record.age;
    let gender      = record.gender.clone();
    let address     = record.address.clone();
    let table       = roster_table(role);

    let inserted: bool = self
      .conn
      .call(move |conn| {
        let case_exists = conn
          .query_row(
            "SELECT 1 FROM cases WHERE case_id = ?1",
            rusqlite::params![case_id],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);

        if !case_exists {
          return Ok(false);
        }

        conn.execute(
          &format!(
            "INSERT INTO {table} (
               person_id, case_id, mobile, national_id,
               name, father_name, age, gender, address
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
          ),
          rusqlite::params![
            person_id,
            case_id,
            mobile,
            national_id,
            name,
            father_name,
            age,
            gender,
            address,
          ],
        )?;
        Ok(true)
      })
      .await?;

    if !inserted {
      return Err(Error::CaseNotFound(record.case_id));
    }
    Ok(record)
  }
}

// ─── RosterSource impl ───────────────────────────────────────────────────────

impl RosterSource for SqliteStore {
  type Error = Error;

  async fn fetch_roster(&self, role: Role) -> Result<Vec<PersonRecord>> {
    let table = roster_table(role);

    let raws: Vec<RawPerson> = self
      .conn
      .call(move |conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {PERSON_COLUMNS} FROM {table} ORDER BY rowid"))?;
        let rows = stmt
          .query_map([], RawPerson::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(|raw| raw.into_record(role)).collect()
  }

  async fn fetch_record(&self, role: Role, id: Uuid) -> Result<Option<PersonRecord>> {
    let table = roster_table(role);
    let id_str = encode_uuid(id);

    let raw: Option<RawPerson> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {PERSON_COLUMNS} FROM {table} WHERE person_id = ?1"),
              rusqlite::params![id_str],
              RawPerson::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(|raw| raw.into_record(role)).transpose()
  }

  async fn fetch_matches(
    &self,
    role:            Role,
    identity:        &IdentityKey,
    exclude_case_id: Uuid,
  ) -> Result<Vec<PersonRecord>> {
    if !identity.is_matchable() {
      return Ok(Vec::new());
    }

    let table       = roster_table(role);
    let exclude_str = encode_uuid(exclude_case_id);
    let mobile      = identity.mobile().map(str::to_owned);
    let national_id = identity.national_id().map(str::to_owned);

    let raws: Vec<RawPerson> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PERSON_COLUMNS} FROM {table}
           WHERE case_id != ?1
             AND ((?2 IS NOT NULL AND mobile = ?2)
               OR (?3 IS NOT NULL AND national_id = ?3))
           ORDER BY rowid"
        ))?;
        let rows = stmt
          .query_map(
            rusqlite::params![exclude_str, mobile, national_id],
            RawPerson::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(|raw| raw.into_record(role)).collect()
  }
}

// ─── CaseDirectory impl ──────────────────────────────────────────────────────

impl CaseDirectory for SqliteStore {
  type Error = Error;

  async fn resolve_cases(&self, case_ids: &BTreeSet<Uuid>) -> Result<HashMap<Uuid, CaseSummary>> {
    let ids: Vec<String> = case_ids.iter().copied().map(encode_uuid).collect();
    if ids.is_empty() {
      return Ok(HashMap::new());
    }

    let raws: Vec<RawCase> = self
      .conn
      .call(move |conn| {
        let mut rows = Vec::with_capacity(ids.len());
        for chunk in ids.chunks(CASE_LOOKUP_CHUNK) {
          let placeholders = vec!["?"; chunk.len()].join(", ");
          let mut stmt = conn.prepare(&format!(
            "SELECT case_id, case_number, district, station, status, incident_date
             FROM cases WHERE case_id IN ({placeholders})"
          ))?;
          let found = stmt
            .query_map(rusqlite::params_from_iter(chunk.iter()), RawCase::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          rows.extend(found);
        }
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(|raw| raw.into_summary().map(|s| (s.case_id, s)))
      .collect()
  }
}
