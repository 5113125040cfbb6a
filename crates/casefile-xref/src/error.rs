//! Error type for `casefile-xref`.

use casefile_core::person::Role;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  /// A roster scan or directory lookup failed at the transport level.
  /// Never converted into an empty history.
  #[error("source unavailable: {0}")]
  SourceUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),

  /// The caller's deadline or cancellation signal fired mid-flight.
  #[error("cross-reference lookup cancelled")]
  Cancelled,

  #[error("{role} record not found: {id}")]
  RecordNotFound { role: Role, id: Uuid },

  /// A fan-out task panicked.
  #[error("resolution task failed: {0}")]
  Task(#[from] tokio::task::JoinError),
}

impl Error {
  pub(crate) fn unavailable<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::SourceUnavailable(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
