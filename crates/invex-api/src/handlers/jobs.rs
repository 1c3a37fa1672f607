//! HTTP handlers for job records.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use utoipa::IntoParams;

use invex_jobs::SubmitOutcome;

use crate::error::{ApiError, Result};
use crate::response::normalize_document;
use crate::router::ApiState;

/// Query parameters for the job listing.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListJobsQuery {
    /// Only records modified strictly after this RFC 3339 timestamp.
    pub timestamp: Option<String>,
}

/// Get a single job record by `pk` (or a caller-kept `id`).
#[utoipa::path(
    get,
    path = "/job/{id}",
    tag = "Jobs",
    params(
        ("id" = String, Path, description = "Job pk or id")
    ),
    responses(
        (status = 200, description = "Job record"),
        (status = 404, description = "Job not found")
    )
)]
pub async fn get_job(State(state): State<ApiState>, Path(id): Path<String>) -> Result<Json<Value>> {
    let record = state
        .jobs
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("job", &id))?;
    Ok(Json(normalize_document(record)))
}

/// List job records, optionally only those modified after `timestamp`
/// (incremental polling). The response carries the server time so the
/// caller can use it as the next `timestamp`.
#[utoipa::path(
    get,
    path = "/job",
    tag = "Jobs",
    params(ListJobsQuery),
    responses(
        (status = 200, description = "Job records"),
        (status = 400, description = "Malformed timestamp")
    )
)]
pub async fn list_jobs(
    State(state): State<ApiState>,
    Query(query): Query<ListJobsQuery>,
) -> Result<Json<Value>> {
    let since = query
        .timestamp
        .map(|raw| {
            DateTime::parse_from_rfc3339(&raw)
                .map(|t| t.with_timezone(&Utc))
                .map_err(|_| ApiError::InvalidTimestamp(raw))
        })
        .transpose()?;

    let records = state.jobs.list(since).await?;
    Ok(Json(json!({
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        "objects": records
            .into_iter()
            .map(normalize_document)
            .collect::<Vec<_>>(),
    })))
}

/// Submit a job document (guarded upsert keyed by `pk`).
///
/// A submit against an existing non-`pending` record is answered with
/// a structured "cannot change job at this state" result, not an
/// error status.
#[utoipa::path(
    post,
    path = "/job",
    tag = "Jobs",
    responses(
        (status = 200, description = "Submit outcome"),
        (status = 400, description = "Malformed job document")
    )
)]
pub async fn submit_job(
    State(state): State<ApiState>,
    Json(doc): Json<Value>,
) -> Result<Json<Value>> {
    let outcome = state.jobs.submit(doc).await?;
    let body = match outcome {
        SubmitOutcome::Saved(record) => normalize_document(record),
        SubmitOutcome::Deleted => json!({"deleted": 1}),
        SubmitOutcome::WrongState => json!({
            "status": "cannot change job at this state",
            "res": 0,
        }),
    };
    Ok(Json(body))
}
