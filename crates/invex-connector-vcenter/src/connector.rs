//! VCenter connector implementation.

use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use invex_connector::config::ConnectorConfig;
use invex_connector::error::{ConnectorError, ConnectorResult};
use invex_connector::traits::Connector;
use invex_connector::types::ConnectorType;

use crate::config::VCenterConfig;

const SESSION_HEADER: &str = "vmware-api-session-id";

/// A live vSphere Automation API session.
struct Session {
    client: Client,
    token: String,
    base_url: String,
}

/// Connector for VMware vCenter.
pub struct VCenterConnector {
    config: RwLock<VCenterConfig>,
    // None while disconnected. Guarded by a std lock: critical
    // sections only clone/replace, never await.
    session: RwLock<Option<Session>>,
}

/// Envelope used by all 6.x-era Automation API responses.
#[derive(Debug, Deserialize)]
struct ApiValue<T> {
    value: T,
}

/// One datacenter summary from `GET /rest/vcenter/datacenter`.
#[derive(Debug, Deserialize)]
struct DatacenterSummary {
    name: String,
    #[allow(dead_code)]
    datacenter: String,
}

impl VCenterConnector {
    /// Create a disconnected connector with default (invalid) settings.
    /// The registry loads persisted settings before connecting.
    pub fn new() -> Self {
        Self {
            config: RwLock::new(VCenterConfig::default()),
            session: RwLock::new(None),
        }
    }

    fn build_client(config: &VCenterConfig) -> ConnectorResult<Client> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.timeout_secs));

        if config.insecure_tls {
            builder = builder.danger_accept_invalid_certs(true);
        }

        builder.build().map_err(|e| {
            ConnectorError::invalid_configuration(format!("failed to build HTTP client: {e}"))
        })
    }

    fn current_session(&self) -> ConnectorResult<(Client, String, String)> {
        let session = self.session.read().expect("session lock");
        session
            .as_ref()
            .map(|s| (s.client.clone(), s.token.clone(), s.base_url.clone()))
            .ok_or_else(|| ConnectorError::NotConnected {
                connector_type: ConnectorType::VCenter.to_string(),
            })
    }

    async fn list_datacenters(&self) -> ConnectorResult<Vec<String>> {
        let (client, token, base_url) = self.current_session()?;

        let response = client
            .get(format!("{base_url}/vcenter/datacenter"))
            .header(SESSION_HEADER, token)
            .send()
            .await
            .map_err(|e| ConnectorError::connection_failed_with_source("datacenter list", e))?;

        if response.status() == StatusCode::UNAUTHORIZED {
            // Session expired server-side; drop ours so the registry
            // reconnects on the next request.
            self.session.write().expect("session lock").take();
            return Err(ConnectorError::NotConnected {
                connector_type: ConnectorType::VCenter.to_string(),
            });
        }
        if !response.status().is_success() {
            return Err(ConnectorError::connection_failed(format!(
                "datacenter list returned {}",
                response.status()
            )));
        }

        let body: ApiValue<Vec<DatacenterSummary>> = response
            .json()
            .await
            .map_err(|e| ConnectorError::connection_failed_with_source("datacenter decode", e))?;

        Ok(body.value.into_iter().map(|d| d.name).collect())
    }
}

impl Default for VCenterConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for VCenterConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let config = self.config.read().expect("config lock");
        f.debug_struct("VCenterConnector")
            .field("config", &config.redacted())
            .field("connected", &self.is_connected())
            .finish()
    }
}

#[async_trait]
impl Connector for VCenterConnector {
    fn connector_type(&self) -> ConnectorType {
        ConnectorType::VCenter
    }

    fn load_settings(&self, settings: &Value) -> ConnectorResult<()> {
        let config: VCenterConfig = serde_json::from_value(settings.clone())
            .map_err(|e| ConnectorError::settings_decode(e.to_string()))?;
        *self.config.write().expect("config lock") = config;
        Ok(())
    }

    async fn connect(&self) -> ConnectorResult<()> {
        let config = self.config.read().expect("config lock").clone();
        config.validate()?;

        let client = Self::build_client(&config)?;
        let base_url = config.base_url();

        debug!(host = %config.host, "Creating vCenter API session");
        let response = client
            .post(format!("{base_url}/com/vmware/cis/session"))
            .basic_auth(&config.username, Some(&config.password))
            .send()
            .await
            .map_err(|e| ConnectorError::connection_failed_with_source("session create", e))?;

        match response.status() {
            StatusCode::UNAUTHORIZED => Err(ConnectorError::AuthenticationFailed),
            status if !status.is_success() => Err(ConnectorError::connection_failed(format!(
                "session create returned {status}"
            ))),
            _ => {
                let body: ApiValue<String> = response.json().await.map_err(|e| {
                    ConnectorError::connection_failed_with_source("session decode", e)
                })?;
                *self.session.write().expect("session lock") = Some(Session {
                    client,
                    token: body.value,
                    base_url,
                });
                Ok(())
            }
        }
    }

    async fn disconnect(&self) -> ConnectorResult<()> {
        let Some(session) = self.session.write().expect("session lock").take() else {
            return Ok(());
        };

        // Best effort: the local session is gone either way.
        let result = session
            .client
            .delete(format!("{}/com/vmware/cis/session", session.base_url))
            .header(SESSION_HEADER, session.token)
            .send()
            .await;
        if let Err(e) = result {
            warn!(error = %e, "Failed to delete vCenter session");
        }
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.session.read().expect("session lock").is_some()
    }

    async fn choices(&self, source: &str) -> ConnectorResult<Vec<String>> {
        match source {
            "list_datacenters" => self.list_datacenters().await,
            other => Err(ConnectorError::UnknownChoiceSource {
                connector_type: self.connector_type().to_string(),
                source_name: other.to_string(),
            }),
        }
    }
}
