use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
};
use serde::de::DeserializeOwned;

use crate::app::AppState;
use crate::error::ApiError;
use crate::models::{ExtraTimeUpdate, GoalsUpdate, MatchPatch, RedCardsUpdate, YellowCardsUpdate};

use super::utils::{decode_body, parse_id};

/// Shared body of the PATCH endpoints: validate id, decode the narrow payload,
/// update its columns. Success is an empty 204; callers re-fetch to see the values.
async fn apply<P>(state: &AppState, raw_id: &str, body: &[u8]) -> Result<StatusCode, ApiError>
where
    P: DeserializeOwned + Into<MatchPatch>,
{
    let id = parse_id(raw_id)?;
    let patch: MatchPatch = decode_body::<P>(body)?.into();

    if !state.matches.apply_patch(id, patch).await? {
        return Err(ApiError::match_not_found());
    }

    tracing::debug!("Patched match {}: {:?}", id, patch);
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/matches/:id/goals - `{homeGoals, awayGoals}`
pub async fn goals(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    apply::<GoalsUpdate>(&state, &id, &body).await
}

/// PATCH /api/matches/:id/yellowcards - `{yellowCards}`
pub async fn yellow_cards(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    apply::<YellowCardsUpdate>(&state, &id, &body).await
}

/// PATCH /api/matches/:id/redcards - `{redCards}`
pub async fn red_cards(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    apply::<RedCardsUpdate>(&state, &id, &body).await
}

/// PATCH /api/matches/:id/extratime - `{extraTime}` in minutes
pub async fn extra_time(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    apply::<ExtraTimeUpdate>(&state, &id, &body).await
}
