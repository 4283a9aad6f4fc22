//! HTTP shell for Trailmatch.
//!
//! # Module Structure
//!
//! - `app`: Application state and bootstrap wiring
//! - `config`: Environment configuration
//! - `error`: Error-to-status mapping
//! - `response`: Success body shape
//! - `routes`: Route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod response;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::app::AppState;

/// Builds the full router with tracing and CORS layers.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    routes::api_routes()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
