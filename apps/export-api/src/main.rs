//! invex export server
//!
//! Binds the HTTP API over an in-memory document store, registers the
//! built-in connectors and serves the admin UI bundle.

mod config;
mod logging;
mod openapi;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Json, Router};
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::OpenApi;

use invex_api::{api_routes, ApiState};
use invex_connector::config::ConnectorConfig;
use invex_connector::registry::{ConnectorRegistry, ConnectorSpec};
use invex_connector::types::ConnectorType;
use invex_connector_demo::{DemoConfig, DemoConnector};
use invex_connector_vcenter::{VCenterConfig, VCenterConnector};
use invex_jobs::{JobCatalog, JobStore, SchemaProjector};
use invex_store::{DocumentStore, MemoryStore};

use config::Config;
use openapi::ApiDoc;

#[tokio::main]
async fn main() {
    // Load configuration (fail-fast on malformed values).
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    logging::init_logging(&config.rust_log);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %config.host,
        port = config.port,
        "Starting invex export API"
    );

    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());

    let mut registry =
        ConnectorRegistry::new(store.clone()).with_connect_timeout(config.connect_timeout);
    registry.register(ConnectorSpec::new(
        ConnectorType::Demo,
        DemoConfig::secret_fields(),
        Arc::new(|| Arc::new(DemoConnector::new())),
    ));
    registry.register(ConnectorSpec::new(
        ConnectorType::VCenter,
        VCenterConfig::secret_fields(),
        Arc::new(|| Arc::new(VCenterConnector::new())),
    ));
    let registry = Arc::new(registry);

    let catalog = Arc::new(JobCatalog::builtin());
    let projector = Arc::new(SchemaProjector::new(catalog, registry.clone()));
    let jobs = Arc::new(JobStore::new(store.clone()));

    let state = ApiState::new(registry, projector, jobs, store.clone());

    let app = Router::new()
        .merge(api_routes(state))
        .route(
            "/api/docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .nest_service("/admin", ServeDir::new(&config.admin_ui_dir))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = match format!("{}:{}", config.host, config.port).parse() {
        Ok(addr) => addr,
        Err(e) => {
            eprintln!("Invalid bind address {}:{}: {e}", config.host, config.port);
            std::process::exit(1);
        }
    };

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => {
            info!(%addr, "Listening");
            listener
        }
        Err(e) => {
            eprintln!("Failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        eprintln!("Server error: {e}");
        std::process::exit(1);
    }

    info!("Server shutdown complete");
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {e}");
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
