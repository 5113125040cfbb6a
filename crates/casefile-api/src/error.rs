//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
///
/// A failed lookup is always an error response, never an empty list, so
/// callers can tell "no history" apart from "history unavailable".
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error(transparent)]
  Lookup(#[from] casefile_xref::Error),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    use casefile_xref::Error as X;

    let status = match &self {
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Lookup(X::RecordNotFound { .. }) => StatusCode::NOT_FOUND,
      ApiError::Lookup(X::SourceUnavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
      ApiError::Lookup(X::Cancelled) => StatusCode::GATEWAY_TIMEOUT,
      ApiError::Lookup(X::Task(_)) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
      tracing::error!(error = %self, "cross-reference lookup failed");
    }
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}
