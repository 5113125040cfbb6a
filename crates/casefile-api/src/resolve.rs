//! Handler for `GET /resolve`.
//!
//! Raw cross-case history for an identity that may not be on any roster yet,
//! e.g. while a new bailer is being registered.

use axum::{
  Json,
  extract::{Query, State},
};
use casefile_core::{
  case::CaseHistoryEntry,
  identity::IdentityKey,
  source::{CaseDirectory, RosterSource},
};
use casefile_xref::cancel;
use serde::Deserialize;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct ResolveParams {
  /// The case the identity belongs to; never reported back.
  pub origin_case_id: Uuid,
  pub mobile:         Option<String>,
  pub national_id:    Option<String>,
}

/// `GET /resolve?origin_case_id=<id>[&mobile=...][&national_id=...]`
///
/// An identity with neither key yields `200 []`.
pub async fn handler<R, D>(
  State(state): State<AppState<R, D>>,
  Query(params): Query<ResolveParams>,
) -> Result<Json<Vec<CaseHistoryEntry>>, ApiError>
where
  R: RosterSource + 'static,
  D: CaseDirectory + 'static,
{
  let identity = IdentityKey::new(params.mobile, params.national_id);
  let history = cancel::within(
    state.settings.timeout,
    state.enricher.resolve(&identity, params.origin_case_id),
  )
  .await?;
  Ok(Json(history))
}
