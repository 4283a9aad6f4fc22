use axum::extract::{Path, State};

use super::SharedState;
use crate::response::ApiResponse;

/// Public URL of an uploaded file. Empty when storage is not configured.
pub async fn url(
    State(state): State<SharedState>,
    Path(file_id): Path<String>,
) -> ApiResponse<String> {
    ApiResponse::ok("Asset URL", state.store_config.asset_url(&file_id))
}
