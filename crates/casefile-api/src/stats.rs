//! Handler for `GET /stats`.

use axum::{
  Json,
  extract::{Query, State},
};
use casefile_core::source::{CaseDirectory, RosterSource};
use casefile_xref::{Report, cancel};
use serde::Deserialize;

use crate::{AppState, error::ApiError};

#[derive(Debug, Default, Deserialize)]
pub struct StatsParams {
  /// Overrides the configured size of the top repeat-offender list.
  pub top_n: Option<usize>,
}

/// `GET /stats[?top_n=<n>]`
pub async fn handler<R, D>(
  State(state): State<AppState<R, D>>,
  Query(params): Query<StatsParams>,
) -> Result<Json<Report>, ApiError>
where
  R: RosterSource + 'static,
  D: CaseDirectory + 'static,
{
  let top_n = params.top_n.unwrap_or(state.settings.top_n);
  let report = cancel::within(state.settings.timeout, state.enricher.report(top_n)).await?;
  Ok(Json(report))
}
