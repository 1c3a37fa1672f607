//! # Connector Framework
//!
//! Core abstractions for connecting invex to external systems.
//!
//! A *connector* is a long-lived credentialed session to an external
//! system (a virtualization platform, a demo backend, ...) shared by
//! every job type that targets that system. This crate provides:
//!
//! - [`Connector`] - the capability trait every connector implements
//! - [`ConnectorConfig`] - typed per-variant configuration with
//!   explicit secret-field markers
//! - [`ConnectorRegistry`] - lazy instantiation, connect-with-retry
//!   and settings persistence for connector instances
//!
//! ## Lifecycle
//!
//! Connectors are instantiated lazily on first reference. Before each
//! connect attempt the registry reloads the persisted settings, so a
//! configuration change takes effect on the next request without a
//! restart. A failed connect evicts the instance; the next request
//! re-instantiates and retries, which makes the registry self-healing
//! once an unreachable system recovers.
//!
//! ## Example
//!
//! ```ignore
//! use invex_connector::prelude::*;
//!
//! let mut registry = ConnectorRegistry::new(store);
//! registry.register(ConnectorSpec::new(
//!     ConnectorType::Demo,
//!     DemoConfig::secret_fields(),
//!     Arc::new(|| Arc::new(DemoConnector::new())),
//! ));
//!
//! registry.ensure_active([ConnectorType::Demo]).await;
//! if let Some(demo) = registry.get(ConnectorType::Demo).await {
//!     let regions = demo.choices("list_regions").await?;
//! }
//! ```

pub mod config;
pub mod error;
pub mod registry;
pub mod traits;
pub mod types;

/// Prelude module for convenient imports.
///
/// ```
/// use invex_connector::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{merge_preserving_secrets, redact_secrets, ConnectorConfig};
    pub use crate::error::{ConnectorError, ConnectorResult};
    pub use crate::registry::{ConnectorFactory, ConnectorRegistry, ConnectorSpec};
    pub use crate::traits::Connector;
    pub use crate::types::ConnectorType;
}

// Re-export async_trait for connector implementors
pub use async_trait::async_trait;
