use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    extract::{Path, Query, State},
};
use serde::Deserialize;
use trailmatch_core::message::{Conversation, Message};

use super::SharedState;
use super::matches::UserQuery;
use crate::error::ApiError;
use crate::response::ApiResponse;

#[derive(Debug, Deserialize)]
pub struct ConversationQuery {
    #[serde(default)]
    pub user1: String,
    #[serde(default)]
    pub user2: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    #[serde(default)]
    pub sender_id: String,
    #[serde(default)]
    pub receiver_id: String,
    #[serde(default)]
    pub content: String,
}

pub async fn conversation(
    State(state): State<SharedState>,
    query: Result<Query<ConversationQuery>, QueryRejection>,
) -> Result<ApiResponse<Vec<Message>>, ApiError> {
    let Query(query) = query?;
    let messages = state
        .messaging_service
        .get_conversation(&query.user1, &query.user2)
        .await?;
    Ok(ApiResponse::ok("Messages retrieved successfully", messages))
}

pub async fn send(
    State(state): State<SharedState>,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<ApiResponse<Message>, ApiError> {
    let Json(request) = payload?;
    let message = state
        .messaging_service
        .send(&request.sender_id, &request.receiver_id, &request.content)
        .await?;
    Ok(ApiResponse::created("Message sent successfully", message))
}

/// Everything a user sent or received.
pub async fn list_for_user(
    State(state): State<SharedState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<ApiResponse<Vec<Message>>, ApiError> {
    let Path(id) = id?;
    let messages = state.messaging_service.list_messages(&id).await?;
    Ok(ApiResponse::ok("Messages retrieved successfully", messages))
}

pub async fn conversations(
    State(state): State<SharedState>,
    query: Result<Query<UserQuery>, QueryRejection>,
) -> Result<ApiResponse<Vec<Conversation>>, ApiError> {
    let Query(query) = query?;
    let conversations = state
        .messaging_service
        .list_conversations(query.user_id.as_deref().unwrap_or_default())
        .await?;
    Ok(ApiResponse::ok("Conversations retrieved successfully", conversations))
}
