//! HTTP routes.
//!
//! Handlers are thin: they extract input, call one application service and
//! shape the result. Every route answers an unsupported method with 405,
//! an `Allow` header and `{"error": "Method X Not Allowed"}`.

pub mod assets;
pub mod auth;
pub mod contact;
pub mod matches;
pub mod messages;
pub mod profile;
pub mod users;

use std::sync::Arc;

use axum::{
    Router,
    http::Method,
    routing::{MethodRouter, delete, get, post},
};

use crate::app::AppState;
use crate::error::ApiError;

pub type SharedState = Arc<AppState>;

/// Answers any method `router` does not handle with 405.
fn allow(router: MethodRouter<SharedState>, allowed: &'static str) -> MethodRouter<SharedState> {
    router.fallback(move |method: Method| async move {
        ApiError::MethodNotAllowed {
            method,
            allow: allowed,
        }
    })
}

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        .route("/api/auth/login", allow(post(auth::login), "POST"))
        .route("/api/auth/signup", allow(post(auth::signup), "POST"))
        .route(
            "/api/delete-profile",
            allow(delete(users::delete_profile), "DELETE"),
        )
        .route("/api/fakeContact", allow(post(contact::fake_contact), "POST"))
        .route(
            "/api/match",
            allow(get(matches::list).post(matches::create), "GET, POST"),
        )
        .route("/api/match/status", allow(get(matches::status), "GET"))
        .route(
            "/api/messages",
            allow(get(messages::conversation).post(messages::send), "GET, POST"),
        )
        .route(
            "/api/conversations",
            allow(get(messages::conversations), "GET"),
        )
        .route("/api/users", allow(get(users::list), "GET"))
        .route(
            "/api/users/{id}",
            allow(
                get(users::get).put(users::update).delete(users::delete),
                "GET, PUT, DELETE",
            ),
        )
        .route(
            "/api/users/{id}/messages",
            allow(get(messages::list_for_user), "GET"),
        )
        .route(
            "/api/profile/{id}",
            allow(get(profile::get).put(profile::update), "GET, PUT"),
        )
        .route("/api/assets/{file_id}", allow(get(assets::url), "GET"))
}
