//! HTTP handler for the job-type menu and schema projection.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use utoipa::IntoParams;

use crate::error::Result;
use crate::router::ApiState;

/// Query parameters for job creation metadata.
#[derive(Debug, Deserialize, IntoParams)]
pub struct JobCreationQuery {
    /// Job type to project; omitted means "list the menu".
    #[serde(rename = "type")]
    pub job_type: Option<String>,
}

/// Without a `type`: the menu of currently-offered job types (the
/// call triggers a registry-wide activation pass). With a `type`: the
/// projected schema for that job type, or an empty document when the
/// type is unknown or its connector is not usable right now.
#[utoipa::path(
    get,
    path = "/jobcreate",
    tag = "Jobs",
    params(JobCreationQuery),
    responses(
        (status = 200, description = "Offered job types or a projected schema")
    )
)]
pub async fn job_creation(
    State(state): State<ApiState>,
    Query(query): Query<JobCreationQuery>,
) -> Result<Json<Value>> {
    let Some(job_type) = query.job_type else {
        return Ok(Json(state.projector.list_offered().await));
    };

    let schema = state
        .projector
        .project(&job_type)
        .await
        .unwrap_or_else(|| json!({}));
    Ok(Json(schema))
}
