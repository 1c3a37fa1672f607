//! Demo connector configuration.

use serde::{Deserialize, Serialize};

use invex_connector::config::ConnectorConfig;
use invex_connector::error::ConnectorResult;
use invex_connector::types::ConnectorType;

/// Configuration for the demo connector.
///
/// The `api_key` field exists purely to exercise the secret-handling
/// path end to end; the demo backend never checks it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Greeting returned by the demo backend.
    #[serde(default = "default_greeting")]
    pub greeting: String,

    /// Pretend credential (secret).
    #[serde(default)]
    pub api_key: String,
}

fn default_greeting() -> String {
    "hello".to_string()
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            greeting: default_greeting(),
            api_key: String::new(),
        }
    }
}

impl ConnectorConfig for DemoConfig {
    fn connector_type() -> ConnectorType {
        ConnectorType::Demo
    }

    fn validate(&self) -> ConnectorResult<()> {
        Ok(())
    }

    fn secret_fields() -> &'static [&'static str] {
        &["api_key"]
    }

    fn redacted(&self) -> Self {
        Self {
            greeting: self.greeting.clone(),
            api_key: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_on_empty_document() {
        let config: DemoConfig = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(config.greeting, "hello");
        assert!(config.api_key.is_empty());
    }

    #[test]
    fn redacted_blanks_api_key() {
        let config = DemoConfig {
            greeting: "hi".to_string(),
            api_key: "s3cret".to_string(),
        };
        let redacted = config.redacted();
        assert_eq!(redacted.greeting, "hi");
        assert!(redacted.api_key.is_empty());
    }
}
