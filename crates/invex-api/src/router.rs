//! Router configuration for the invex API.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use invex_connector::registry::ConnectorRegistry;
use invex_jobs::{JobStore, SchemaProjector};
use invex_store::DocumentStore;

use crate::handlers;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub registry: Arc<ConnectorRegistry>,
    pub projector: Arc<SchemaProjector>,
    pub jobs: Arc<JobStore>,
    pub store: Arc<dyn DocumentStore>,
}

impl ApiState {
    /// Create a new API state.
    pub fn new(
        registry: Arc<ConnectorRegistry>,
        projector: Arc<SchemaProjector>,
        jobs: Arc<JobStore>,
        store: Arc<dyn DocumentStore>,
    ) -> Self {
        Self {
            registry,
            projector,
            jobs,
            store,
        }
    }
}

/// Create the API router.
///
/// # Example
///
/// ```ignore
/// use invex_api::{api_routes, ApiState};
///
/// let app = api_routes(state);
/// ```
pub fn api_routes(state: ApiState) -> Router {
    Router::new()
        .route("/api", get(handlers::api_status))
        .route("/job", get(handlers::list_jobs))
        .route("/job", post(handlers::submit_job))
        .route("/job/:id", get(handlers::get_job))
        .route("/connector", get(handlers::read_connector_settings))
        .route("/connector", post(handlers::update_connector_settings))
        .route("/jobcreate", get(handlers::job_creation))
        .with_state(state)
}
