//! Connector capability trait.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ConnectorResult;
use crate::types::ConnectorType;

/// The contract every connector variant implements.
///
/// Instances are shared behind `Arc<dyn Connector>` across request
/// handlers, so all methods take `&self`; connectors keep their
/// mutable session state (tokens, flags) behind interior mutability.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Get the type of this connector.
    fn connector_type(&self) -> ConnectorType;

    /// (Re)apply persisted configuration.
    ///
    /// Called by the registry before every connect attempt, so edited
    /// settings take effect on the next activation without a restart.
    /// A document that does not decode into the connector's typed
    /// configuration is an error.
    fn load_settings(&self, settings: &Value) -> ConnectorResult<()>;

    /// Establish a session with the target system.
    async fn connect(&self) -> ConnectorResult<()>;

    /// Tear down the session.
    async fn disconnect(&self) -> ConnectorResult<()>;

    /// Whether a live session is currently held. Lightweight; called
    /// on every request that touches this connector.
    fn is_connected(&self) -> bool;

    /// Enumerate the valid values for a named choice source
    /// (e.g. `list_datacenters`). Job properties reference these
    /// sources by name; an unknown name is an error, not an empty
    /// list, so typos in the catalog fail loudly.
    async fn choices(&self, source: &str) -> ConnectorResult<Vec<String>>;
}
