use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    extract::{Path, State},
};
use serde::Deserialize;
use trailmatch_application::UserUpdate;
use trailmatch_core::Lookup;
use trailmatch_core::user::User;

use super::SharedState;
use crate::error::ApiError;
use crate::response::ApiResponse;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteProfileRequest {
    #[serde(default)]
    pub user_id: Option<String>,
}

pub async fn list(State(state): State<SharedState>) -> Result<ApiResponse<Vec<User>>, ApiError> {
    let users = state.account_service.list_users().await?;
    Ok(ApiResponse::ok("Users retrieved successfully", users))
}

pub async fn get(
    State(state): State<SharedState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<ApiResponse<User>, ApiError> {
    let Path(id) = id?;
    match state.account_service.get_user(&id).await {
        Lookup::Found(user) => Ok(ApiResponse::ok("User retrieved successfully", user)),
        Lookup::NotFound => Err(ApiError::not_found("User not found")),
        Lookup::Failed(e) => Err(e.into()),
    }
}

pub async fn update(
    State(state): State<SharedState>,
    id: Result<Path<String>, PathRejection>,
    payload: Result<Json<UserUpdate>, JsonRejection>,
) -> Result<ApiResponse<User>, ApiError> {
    let Path(id) = id?;
    let Json(update) = payload?;
    let user = state.account_service.update_user(&id, update).await?;
    Ok(ApiResponse::ok("User updated successfully", user))
}

pub async fn delete(
    State(state): State<SharedState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<ApiResponse<()>, ApiError> {
    let Path(id) = id?;
    state.account_service.delete_account(&id).await?;
    Ok(ApiResponse::message("User deleted successfully"))
}

/// `DELETE /api/delete-profile` with the user in the body.
pub async fn delete_profile(
    State(state): State<SharedState>,
    payload: Result<Json<DeleteProfileRequest>, JsonRejection>,
) -> Result<ApiResponse<()>, ApiError> {
    let Json(request) = payload?;
    let user_id = request
        .user_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("userId is required"))?;
    state.account_service.delete_account(&user_id).await?;
    Ok(ApiResponse::message("Profile deleted successfully"))
}
