//! Demo connector implementation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use invex_connector::config::ConnectorConfig;
use invex_connector::error::{ConnectorError, ConnectorResult};
use invex_connector::traits::Connector;
use invex_connector::types::ConnectorType;

use crate::config::DemoConfig;

/// Regions the demo backend pretends to know about.
const REGIONS: &[&str] = &["eu-west", "us-east", "ap-south"];

/// In-process demo connector; always connectable.
pub struct DemoConnector {
    config: RwLock<DemoConfig>,
    connected: AtomicBool,
}

impl DemoConnector {
    /// Create a disconnected demo connector with default settings.
    pub fn new() -> Self {
        Self {
            config: RwLock::new(DemoConfig::default()),
            connected: AtomicBool::new(false),
        }
    }

    /// The configured greeting (exercised by tests).
    pub fn greeting(&self) -> String {
        self.config.read().expect("config lock").greeting.clone()
    }
}

impl Default for DemoConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DemoConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let config = self.config.read().expect("config lock");
        f.debug_struct("DemoConnector")
            .field("config", &config.redacted())
            .field("connected", &self.is_connected())
            .finish()
    }
}

#[async_trait]
impl Connector for DemoConnector {
    fn connector_type(&self) -> ConnectorType {
        ConnectorType::Demo
    }

    fn load_settings(&self, settings: &Value) -> ConnectorResult<()> {
        let config: DemoConfig = serde_json::from_value(settings.clone())
            .map_err(|e| ConnectorError::settings_decode(e.to_string()))?;
        config.validate()?;
        *self.config.write().expect("config lock") = config;
        Ok(())
    }

    async fn connect(&self) -> ConnectorResult<()> {
        debug!("Demo connector connected");
        self.connected.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn disconnect(&self) -> ConnectorResult<()> {
        self.connected.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    async fn choices(&self, source: &str) -> ConnectorResult<Vec<String>> {
        match source {
            "list_regions" => Ok(REGIONS.iter().map(|s| s.to_string()).collect()),
            other => Err(ConnectorError::UnknownChoiceSource {
                connector_type: self.connector_type().to_string(),
                source_name: other.to_string(),
            }),
        }
    }
}
