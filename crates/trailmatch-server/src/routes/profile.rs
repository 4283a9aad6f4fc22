use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    extract::{Path, State},
};
use trailmatch_core::Lookup;
use trailmatch_core::profile::UserProfile;

use super::SharedState;
use crate::error::ApiError;
use crate::response::ApiResponse;

pub async fn get(
    State(state): State<SharedState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<ApiResponse<UserProfile>, ApiError> {
    let Path(id) = id?;
    match state.profile_service.get_profile(&id).await {
        Lookup::Found(profile) => Ok(ApiResponse::ok("Profile retrieved successfully", profile)),
        Lookup::NotFound => Err(ApiError::not_found("Profile not found")),
        Lookup::Failed(e) => Err(e.into()),
    }
}

pub async fn update(
    State(state): State<SharedState>,
    id: Result<Path<String>, PathRejection>,
    payload: Result<Json<UserProfile>, JsonRejection>,
) -> Result<ApiResponse<UserProfile>, ApiError> {
    let Path(id) = id?;
    let Json(profile) = payload?;
    let saved = state.profile_service.update_profile(&id, profile).await?;
    Ok(ApiResponse::ok("Profile updated successfully", saved))
}
