use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::{HeaderValue, Method, StatusCode, header::ALLOW},
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use trailmatch_core::TrailmatchError;

/// Error returned by route handlers.
///
/// The body is always `{"error": message}`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] TrailmatchError),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Method {method} Not Allowed")]
    MethodNotAllowed {
        method: Method,
        allow: &'static str,
    },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Domain(err) => match err {
                TrailmatchError::Validation(_) | TrailmatchError::Conflict(_) => {
                    StatusCode::BAD_REQUEST
                }
                TrailmatchError::Unauthorized => StatusCode::UNAUTHORIZED,
                TrailmatchError::NotFound { .. } => StatusCode::NOT_FOUND,
                TrailmatchError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                TrailmatchError::DataAccess(_)
                | TrailmatchError::Serialization { .. }
                | TrailmatchError::Config(_)
                | TrailmatchError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{} {}", status, self);
        } else {
            tracing::debug!("{} {}", status, self);
        }

        let mut response = (status, Json(json!({ "error": self.to_string() }))).into_response();
        if let ApiError::MethodNotAllowed { allow, .. } = self {
            response
                .headers_mut()
                .insert(ALLOW, HeaderValue::from_static(allow));
        }
        response
    }
}
