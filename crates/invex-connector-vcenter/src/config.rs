//! VCenter connector configuration.

use serde::{Deserialize, Serialize};

use invex_connector::config::ConnectorConfig;
use invex_connector::error::{ConnectorError, ConnectorResult};
use invex_connector::types::ConnectorType;

/// Configuration for the VCenter connector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VCenterConfig {
    /// vCenter host name or address.
    #[serde(default)]
    pub host: String,

    /// HTTPS port of the vSphere Automation API.
    #[serde(default = "default_port")]
    pub port: u16,

    /// SSO user name (e.g. `administrator@vsphere.local`).
    #[serde(default)]
    pub username: String,

    /// SSO password (secret).
    #[serde(default)]
    pub password: String,

    /// Skip TLS certificate verification. Lab appliances commonly run
    /// self-signed certificates; this must stay opt-in.
    #[serde(default)]
    pub insecure_tls: bool,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_port() -> u16 {
    443
}

fn default_timeout() -> u64 {
    30
}

impl Default for VCenterConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: default_port(),
            username: String::new(),
            password: String::new(),
            insecure_tls: false,
            timeout_secs: default_timeout(),
        }
    }
}

impl VCenterConfig {
    /// Base URL of the Automation API.
    pub fn base_url(&self) -> String {
        format!("https://{}:{}/rest", self.host, self.port)
    }
}

impl ConnectorConfig for VCenterConfig {
    fn connector_type() -> ConnectorType {
        ConnectorType::VCenter
    }

    fn validate(&self) -> ConnectorResult<()> {
        if self.host.is_empty() {
            return Err(ConnectorError::invalid_configuration("host is required"));
        }
        if self.username.is_empty() {
            return Err(ConnectorError::invalid_configuration(
                "username is required",
            ));
        }
        Ok(())
    }

    fn secret_fields() -> &'static [&'static str] {
        &["password"]
    }

    fn redacted(&self) -> Self {
        Self {
            password: String::new(),
            ..self.clone()
        }
    }
}
