//! Handlers for the enriched roster endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/accused` | Optional `?repeat_only=true` |
//! | `GET`  | `/bailers` | Optional `?repeat_only=true`, `?suspicious_only=true` |
//! | `GET`  | `/{role}/{id}/history` | One enriched record; 404 if not found |

use axum::{
  Json,
  extract::{Path, Query, State},
};
use casefile_core::{
  person::{EnrichedPersonRecord, Role},
  source::{CaseDirectory, RosterSource},
};
use casefile_xref::cancel;
use serde::Deserialize;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

#[derive(Debug, Default, Deserialize)]
pub struct RosterParams {
  /// Only records that appear in more than one case.
  #[serde(default)]
  pub repeat_only:     bool,
  /// Only bailers with an accused record elsewhere. Bailer roster only.
  #[serde(default)]
  pub suspicious_only: bool,
}

async fn roster<R, D>(
  state: &AppState<R, D>,
  role: Role,
  params: RosterParams,
) -> Result<Vec<EnrichedPersonRecord>, ApiError>
where
  R: RosterSource + 'static,
  D: CaseDirectory + 'static,
{
  if params.suspicious_only && role != Role::Bailer {
    return Err(ApiError::BadRequest(
      "suspicious_only applies to the bailer roster".into(),
    ));
  }

  let mut records =
    cancel::within(state.settings.timeout, state.enricher.enrich_role(role)).await?;

  if params.repeat_only {
    records.retain(EnrichedPersonRecord::is_repeat);
  }
  if params.suspicious_only {
    records.retain(|r| r.was_previously_accused);
  }
  Ok(records)
}

/// `GET /accused[?repeat_only=true]`
pub async fn accused<R, D>(
  State(state): State<AppState<R, D>>,
  Query(params): Query<RosterParams>,
) -> Result<Json<Vec<EnrichedPersonRecord>>, ApiError>
where
  R: RosterSource + 'static,
  D: CaseDirectory + 'static,
{
  Ok(Json(roster(&state, Role::Accused, params).await?))
}

/// `GET /bailers[?repeat_only=true][&suspicious_only=true]`
pub async fn bailers<R, D>(
  State(state): State<AppState<R, D>>,
  Query(params): Query<RosterParams>,
) -> Result<Json<Vec<EnrichedPersonRecord>>, ApiError>
where
  R: RosterSource + 'static,
  D: CaseDirectory + 'static,
{
  Ok(Json(roster(&state, Role::Bailer, params).await?))
}

/// `GET /{role}/{id}/history`
pub async fn history<R, D>(
  State(state): State<AppState<R, D>>,
  Path((role, id)): Path<(Role, Uuid)>,
) -> Result<Json<EnrichedPersonRecord>, ApiError>
where
  R: RosterSource + 'static,
  D: CaseDirectory + 'static,
{
  let record =
    cancel::within(state.settings.timeout, state.enricher.resolve_record(role, id)).await?;
  Ok(Json(record))
}
