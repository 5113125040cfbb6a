//! SQL schema for the casefile SQLite store.
//!
//! Executed once at connection startup. Schema migration is owned by the
//! case-management system; this DDL only creates what is missing.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS cases (
    case_id        TEXT PRIMARY KEY,
    case_number    TEXT NOT NULL,
    district       TEXT NOT NULL,
    station        TEXT NOT NULL,
    status         TEXT NOT NULL,
    incident_date  TEXT             -- ISO 8601 date or NULL
);

-- The two rosters share one shape. Roster order is rowid order.
-- Blank identity keys are stored as NULL, never as ''.
CREATE TABLE IF NOT EXISTS accused (
    person_id    TEXT PRIMARY KEY,
    case_id      TEXT NOT NULL REFERENCES cases(case_id),
    mobile       TEXT,
    national_id  TEXT,
    name         TEXT NOT NULL,
    father_name  TEXT,
    age          INTEGER,
    gender       TEXT,
    address      TEXT
);

CREATE TABLE IF NOT EXISTS bailers (
    person_id    TEXT PRIMARY KEY,
    case_id      TEXT NOT NULL REFERENCES cases(case_id),
    mobile       TEXT,
    national_id  TEXT,
    name         TEXT NOT NULL,
    father_name  TEXT,
    age          INTEGER,
    gender       TEXT,
    address      TEXT
);

CREATE INDEX IF NOT EXISTS accused_case_idx        ON accused(case_id);
CREATE INDEX IF NOT EXISTS accused_mobile_idx      ON accused(mobile);
CREATE INDEX IF NOT EXISTS accused_national_id_idx ON accused(national_id);
CREATE INDEX IF NOT EXISTS bailers_case_idx        ON bailers(case_id);
CREATE INDEX IF NOT EXISTS bailers_mobile_idx      ON bailers(mobile);
CREATE INDEX IF NOT EXISTS bailers_national_id_idx ON bailers(national_id);

PRAGMA user_version = 1;
";
