use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde::Deserialize;
use trailmatch_application::SignupRequest;
use trailmatch_core::user::User;

use super::SharedState;
use crate::error::ApiError;
use crate::response::ApiResponse;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub async fn login(
    State(state): State<SharedState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiResponse<User>, ApiError> {
    let Json(request) = payload?;
    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(ApiError::bad_request("Email and password are required"));
    }
    let user = state
        .account_service
        .login(&request.email, &request.password)
        .await?;
    Ok(ApiResponse::ok("Login successful", user))
}

pub async fn signup(
    State(state): State<SharedState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<ApiResponse<User>, ApiError> {
    let Json(request) = payload?;
    let user = state.account_service.signup(request).await?;
    Ok(ApiResponse::created("User created successfully", user))
}
