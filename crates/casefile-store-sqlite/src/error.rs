//! Error type for `casefile-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date parse error: {0}")]
  DateParse(#[from] chrono::ParseError),

  #[error("case not found: {0}")]
  CaseNotFound(uuid::Uuid),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
