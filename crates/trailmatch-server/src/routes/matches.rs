use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use trailmatch_core::Lookup;
use trailmatch_core::matching::{Match, MatchStatus};

use super::SharedState;
use crate::error::ApiError;
use crate::response::ApiResponse;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairQuery {
    pub user_id: Option<String>,
    pub matched_user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMatchRequest {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub matched_user_id: String,
}

#[derive(Debug, Serialize)]
pub struct StatusBody {
    pub status: MatchStatus,
}

fn required(value: Option<String>, name: &str) -> Result<String, ApiError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request(format!("{} is required", name)))
}

pub async fn list(
    State(state): State<SharedState>,
    query: Result<Query<UserQuery>, QueryRejection>,
) -> Result<ApiResponse<Vec<Match>>, ApiError> {
    let Query(query) = query?;
    let user_id = required(query.user_id, "userId")?;
    let matches = state.match_service.list_matches(&user_id).await?;
    Ok(ApiResponse::ok("Matches retrieved successfully", matches))
}

pub async fn create(
    State(state): State<SharedState>,
    payload: Result<Json<CreateMatchRequest>, JsonRejection>,
) -> Result<ApiResponse<Match>, ApiError> {
    let Json(request) = payload?;
    let record = state
        .match_service
        .swipe(&request.user_id, &request.matched_user_id)
        .await?;
    Ok(ApiResponse::created("Match created successfully", record))
}

pub async fn status(
    State(state): State<SharedState>,
    query: Result<Query<PairQuery>, QueryRejection>,
) -> Result<ApiResponse<StatusBody>, ApiError> {
    let Query(query) = query?;
    let user_id = required(query.user_id, "userId")?;
    let matched_user_id = required(query.matched_user_id, "matchedUserId")?;
    match state.match_service.match_status(&user_id, &matched_user_id).await {
        Lookup::Found(record) => Ok(ApiResponse::ok(
            "Match status retrieved successfully",
            StatusBody {
                status: record.status,
            },
        )),
        Lookup::NotFound => Err(ApiError::not_found("Match not found")),
        Lookup::Failed(e) => Err(e.into()),
    }
}
