//! JSON REST API for the casefile cross-reference engine.
//!
//! Exposes an axum [`Router`] backed by any [`RosterSource`] and
//! [`CaseDirectory`]. Auth, TLS, and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", casefile_api::api_router(state))
//! ```

pub mod error;
pub mod resolve;
pub mod rosters;
pub mod stats;

use std::{sync::Arc, time::Duration};

use axum::{Router, routing::get};
use casefile_core::source::{CaseDirectory, RosterSource};
use casefile_xref::Enricher;

pub use error::ApiError;

/// Per-request limits applied by every handler.
#[derive(Debug, Clone)]
pub struct ApiSettings {
  /// Deadline for one enrichment or lookup; exceeding it yields 504.
  pub timeout: Duration,
  /// Default size of the top repeat-offender list in `/stats`.
  pub top_n:   usize,
}

impl Default for ApiSettings {
  fn default() -> Self {
    Self { timeout: Duration::from_secs(30), top_n: 10 }
  }
}

/// Shared state threaded through all handlers.
pub struct AppState<R, D> {
  pub enricher: Enricher<R, D>,
  pub settings: Arc<ApiSettings>,
}

impl<R, D> Clone for AppState<R, D> {
  fn clone(&self) -> Self {
    Self {
      enricher: self.enricher.clone(),
      settings: Arc::clone(&self.settings),
    }
  }
}

impl<R, D> AppState<R, D> {
  pub fn new(enricher: Enricher<R, D>, settings: ApiSettings) -> Self {
    Self { enricher, settings: Arc::new(settings) }
  }
}

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<R, D>(state: AppState<R, D>) -> Router<()>
where
  R: RosterSource + 'static,
  D: CaseDirectory + 'static,
{
  Router::new()
    // Rosters
    .route("/accused", get(rosters::accused::<R, D>))
    .route("/bailers", get(rosters::bailers::<R, D>))
    .route("/{role}/{id}/history", get(rosters::history::<R, D>))
    // Single identity
    .route("/resolve", get(resolve::handler::<R, D>))
    // Analytics
    .route("/stats", get(stats::handler::<R, D>))
    .with_state(state)
}
