//! `OpenAPI` documentation for the export server.
//!
//! The generated document is served as plain JSON at
//! `/api/docs/openapi.json`; the admin UI and external tooling consume
//! it directly.

use utoipa::OpenApi;

/// `OpenAPI` documentation for the export API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "invex export API",
        version = "0.1.0",
        description = "Job registration and connector management for invex exports"
    ),
    paths(
        invex_api::handlers::root::api_status,
        invex_api::handlers::jobs::get_job,
        invex_api::handlers::jobs::list_jobs,
        invex_api::handlers::jobs::submit_job,
        invex_api::handlers::connectors::read_connector_settings,
        invex_api::handlers::connectors::update_connector_settings,
        invex_api::handlers::jobcreate::job_creation,
    ),
    tags(
        (name = "Status", description = "Service health and status"),
        (name = "Jobs", description = "Job records and creation metadata"),
        (name = "Connectors", description = "Connector settings")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_covers_all_routes() {
        let doc = ApiDoc::openapi();
        for path in ["/api", "/job", "/job/{id}", "/connector", "/jobcreate"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
