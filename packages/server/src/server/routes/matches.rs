//! `/matches` endpoints.
//!
//! Handlers translate HTTP into action calls; every body is wrapped in the
//! `{ success, data, message? }` envelope. Malformed ids, queries and bodies
//! are 400s.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Extension, Path, Query,
    },
    Json,
};

use crate::common::{ApiError, ApiResponse, MatchId, Page};
use crate::domains::matching::actions::{
    self, CreateMatchInput, ListMatchesQuery, UpdateMatchInput,
};
use crate::domains::matching::MatchData;
use crate::server::app::AxumAppState;
use crate::server::middleware::AuthUser;

type ApiResult<T> = Result<ApiResponse<T>, ApiError>;

fn match_id(path: Result<Path<MatchId>, PathRejection>) -> Result<MatchId, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|_| ApiError::validation("Invalid match id"))
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ApiError::validation(rejection.body_text()))
}

/// POST /matches
pub async fn create_match_handler(
    Extension(state): Extension<AxumAppState>,
    auth: AuthUser,
    body: Result<Json<CreateMatchInput>, JsonRejection>,
) -> ApiResult<MatchData> {
    let input = json_body(body)?;
    let record = actions::create_match(input, &auth.actor(), &state.deps).await?;
    Ok(ApiResponse::created(MatchData::from(record)).with_message("Match created successfully"))
}

/// GET /matches
pub async fn list_matches_handler(
    Extension(state): Extension<AxumAppState>,
    auth: AuthUser,
    query: Result<Query<ListMatchesQuery>, QueryRejection>,
) -> ApiResult<Page<MatchData>> {
    let Query(query) = query.map_err(|rejection| ApiError::validation(rejection.body_text()))?;
    let page = actions::list_matches(query, &auth.actor(), &state.deps).await?;
    Ok(ApiResponse::ok(page.map(MatchData::from)))
}

/// GET /matches/:id
pub async fn get_match_handler(
    Extension(state): Extension<AxumAppState>,
    auth: AuthUser,
    path: Result<Path<MatchId>, PathRejection>,
) -> ApiResult<MatchData> {
    let id = match_id(path)?;
    let record = actions::get_match(id, &auth.actor(), &state.deps).await?;
    Ok(ApiResponse::ok(record.into()))
}

/// PUT /matches/:id
pub async fn update_match_handler(
    Extension(state): Extension<AxumAppState>,
    auth: AuthUser,
    path: Result<Path<MatchId>, PathRejection>,
    body: Result<Json<UpdateMatchInput>, JsonRejection>,
) -> ApiResult<MatchData> {
    let id = match_id(path)?;
    let input = json_body(body)?;
    let record = actions::update_match(id, input, &auth.actor(), &state.deps).await?;
    Ok(ApiResponse::ok(MatchData::from(record)).with_message("Match updated successfully"))
}

/// DELETE /matches/:id
pub async fn delete_match_handler(
    Extension(state): Extension<AxumAppState>,
    auth: AuthUser,
    path: Result<Path<MatchId>, PathRejection>,
) -> ApiResult<Option<MatchData>> {
    let id = match_id(path)?;
    actions::delete_match(id, &auth.actor(), &state.deps).await?;
    Ok(ApiResponse::ok(None).with_message("Match deleted successfully"))
}

/// POST /matches/:id/accept
pub async fn accept_match_handler(
    Extension(state): Extension<AxumAppState>,
    auth: AuthUser,
    path: Result<Path<MatchId>, PathRejection>,
) -> ApiResult<MatchData> {
    let id = match_id(path)?;
    let record = actions::accept_match(id, &auth.actor(), &state.deps).await?;
    Ok(ApiResponse::ok(MatchData::from(record)).with_message("Match accepted"))
}

/// POST /matches/:id/reject
pub async fn reject_match_handler(
    Extension(state): Extension<AxumAppState>,
    auth: AuthUser,
    path: Result<Path<MatchId>, PathRejection>,
) -> ApiResult<MatchData> {
    let id = match_id(path)?;
    let record = actions::reject_match(id, &auth.actor(), &state.deps).await?;
    Ok(ApiResponse::ok(MatchData::from(record)).with_message("Match rejected"))
}

/// POST /matches/:id/viewed
pub async fn mark_viewed_handler(
    Extension(state): Extension<AxumAppState>,
    auth: AuthUser,
    path: Result<Path<MatchId>, PathRejection>,
) -> ApiResult<MatchData> {
    let id = match_id(path)?;
    let record = actions::mark_match_viewed(id, &auth.actor(), &state.deps).await?;
    Ok(ApiResponse::ok(record.into()))
}
