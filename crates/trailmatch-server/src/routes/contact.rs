use axum::extract::State;

use super::SharedState;
use crate::response::ApiResponse;

/// Stand-in for a contact form backend: waits, then acknowledges.
pub async fn fake_contact(State(state): State<SharedState>) -> ApiResponse<()> {
    tokio::time::sleep(state.fake_contact_delay).await;
    ApiResponse::message("Message sent successfully")
}
