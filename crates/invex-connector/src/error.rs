//! Connector error types.
//!
//! Connect failures are recovered locally by the registry (evict and
//! retry on the next request) and never surface as request-level
//! errors; the transient/permanent split exists so callers that do
//! their own retries can tell the two apart.

use thiserror::Error;

/// Error that can occur during connector operations.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// Failed to establish a session with the target system.
    #[error("connection failed: {message}")]
    ConnectionFailed {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Connect attempt exceeded the registry's timeout.
    #[error("connection timeout after {timeout_secs} seconds")]
    ConnectionTimeout { timeout_secs: u64 },

    /// The target system rejected the configured credentials.
    #[error("authentication failed: invalid credentials")]
    AuthenticationFailed,

    /// Connector configuration is invalid.
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// Connector type name is not in the closed registry table.
    #[error("unsupported connector type: {connector_type}")]
    UnsupportedConnectorType { connector_type: String },

    /// A choice source name that this connector does not provide.
    #[error("unknown choice source '{source_name}' for connector {connector_type}")]
    UnknownChoiceSource {
        connector_type: String,
        source_name: String,
    },

    /// The connector is not connected and the operation needs a session.
    #[error("connector {connector_type} is not connected")]
    NotConnected { connector_type: String },

    /// Settings persistence failed.
    #[error("settings store error: {0}")]
    Store(#[from] invex_store::StoreError),

    /// Settings document could not be decoded into the typed config.
    #[error("settings decode error: {message}")]
    SettingsDecode { message: String },
}

impl ConnectorError {
    /// Whether the condition may resolve itself and a later retry can
    /// succeed without operator intervention.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ConnectorError::ConnectionFailed { .. }
                | ConnectorError::ConnectionTimeout { .. }
                | ConnectorError::NotConnected { .. }
        )
    }

    // Convenience constructors

    /// Create a connection failed error.
    pub fn connection_failed(message: impl Into<String>) -> Self {
        ConnectorError::ConnectionFailed {
            message: message.into(),
            source: None,
        }
    }

    /// Create a connection failed error with a source.
    pub fn connection_failed_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ConnectorError::ConnectionFailed {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        ConnectorError::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// Create a settings decode error.
    pub fn settings_decode(message: impl Into<String>) -> Self {
        ConnectorError::SettingsDecode {
            message: message.into(),
        }
    }
}

/// Result type for connector operations.
pub type ConnectorResult<T> = Result<T, ConnectorError>;
