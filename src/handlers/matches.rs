use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::models::{Match, MatchDetails};

use super::utils::{decode_body, parse_id};

/// GET /api/matches - every match in storage order; `[]` when the table is empty
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Match>>, ApiError> {
    let matches = state.matches.list().await?;
    Ok(Json(matches))
}

/// GET /api/matches/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Match>, ApiError> {
    let id = parse_id(&id)?;

    state
        .matches
        .find(id)
        .await?
        .map(Json)
        .ok_or_else(ApiError::match_not_found)
}

/// POST /api/matches - counters start at zero. Responds 200, not 201.
pub async fn create(State(state): State<AppState>, body: Bytes) -> Result<Json<Match>, ApiError> {
    let details: MatchDetails = decode_body(&body)?;

    let created = state.matches.create(&details).await?;
    tracing::info!(
        "Created match {}: {} vs {}",
        created.id,
        created.home_team,
        created.away_team
    );

    Ok(Json(created))
}

/// PUT /api/matches/:id - replaces team names and date; goals, cards and extra time are kept
pub async fn replace(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Match>, ApiError> {
    let id = parse_id(&id)?;
    let details: MatchDetails = decode_body(&body)?;

    state
        .matches
        .replace(id, &details)
        .await?
        .map(Json)
        .ok_or_else(ApiError::match_not_found)
}

/// DELETE /api/matches/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;

    if !state.matches.delete(id).await? {
        return Err(ApiError::match_not_found());
    }

    tracing::info!("Deleted match {}", id);
    Ok(StatusCode::NO_CONTENT)
}
