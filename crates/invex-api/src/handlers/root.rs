//! Health/status handler.

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::router::ApiState;

/// Service status: static OK plus the live persistence backend id.
#[utoipa::path(
    get,
    path = "/api",
    tag = "Status",
    responses(
        (status = 200, description = "Service status")
    )
)]
pub async fn api_status(State(state): State<ApiState>) -> Json<Value> {
    Json(json!({
        "status": "OK",
        "store": state.store.backend_id(),
    }))
}
