//! Connector configuration types.
//!
//! Each connector variant carries a typed configuration struct with an
//! explicit list of secret fields, so redaction and secret-preserving
//! merges are enforced by the type rather than by convention. The
//! persisted form is still a JSON document (the settings store is
//! schema-less); the helpers here operate on that form.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::error::ConnectorResult;
use crate::types::ConnectorType;

/// Trait for connector-specific configuration.
pub trait ConnectorConfig: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// Get the connector type this configuration is for.
    fn connector_type() -> ConnectorType;

    /// Validate the configuration.
    fn validate(&self) -> ConnectorResult<()>;

    /// Names of fields that hold secrets (persisted but never echoed).
    fn secret_fields() -> &'static [&'static str];

    /// Create a redacted copy for display. Secret fields become empty
    /// strings, matching what the settings read path returns.
    fn redacted(&self) -> Self;
}

/// Whether an incoming secret value counts as "not supplied".
///
/// The settings UI round-trips redacted documents, so an absent, null
/// or empty-string secret means "keep what is stored".
fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Merge an incoming settings document over the previously stored one,
/// preserving stored secret values when the incoming document omits or
/// blanks them. Non-secret fields always take the incoming value.
pub fn merge_preserving_secrets(
    mut incoming: Value,
    previous: Option<&Value>,
    secret_fields: &[&str],
) -> Value {
    let Some(obj) = incoming.as_object_mut() else {
        return incoming;
    };
    let Some(previous) = previous.and_then(Value::as_object) else {
        return incoming;
    };

    for &field in secret_fields {
        if is_blank(obj.get(field)) {
            if let Some(stored) = previous.get(field) {
                obj.insert(field.to_string(), stored.clone());
            }
        }
    }
    incoming
}

/// Redact secret fields in a settings document for outbound use.
/// Secret fields are rendered as empty strings; everything else is
/// passed through untouched.
pub fn redact_secrets(mut doc: Value, secret_fields: &[&str]) -> Value {
    if let Some(obj) = doc.as_object_mut() {
        for &field in secret_fields {
            if obj.contains_key(field) {
                obj.insert(field.to_string(), Value::String(String::new()));
            }
        }
    }
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SECRETS: &[&str] = &["password"];

    #[test]
    fn omitted_secret_keeps_stored_value() {
        let stored = json!({"type": "VCenterConnector", "host": "a", "password": "hunter2"});
        let incoming = json!({"type": "VCenterConnector", "host": "b"});

        let merged = merge_preserving_secrets(incoming, Some(&stored), SECRETS);
        assert_eq!(merged["host"], json!("b"));
        assert_eq!(merged["password"], json!("hunter2"));
    }

    #[test]
    fn blank_secret_keeps_stored_value() {
        let stored = json!({"password": "hunter2"});
        let incoming = json!({"password": ""});

        let merged = merge_preserving_secrets(incoming, Some(&stored), SECRETS);
        assert_eq!(merged["password"], json!("hunter2"));
    }

    #[test]
    fn supplied_secret_overwrites() {
        let stored = json!({"password": "hunter2"});
        let incoming = json!({"password": "correct-horse"});

        let merged = merge_preserving_secrets(incoming, Some(&stored), SECRETS);
        assert_eq!(merged["password"], json!("correct-horse"));
    }

    #[test]
    fn no_previous_document_passes_through() {
        let incoming = json!({"host": "a"});
        let merged = merge_preserving_secrets(incoming.clone(), None, SECRETS);
        assert_eq!(merged, incoming);
    }

    #[test]
    fn redaction_blanks_secret_and_keeps_rest() {
        let doc = json!({"host": "a", "password": "hunter2"});
        let redacted = redact_secrets(doc, SECRETS);
        assert_eq!(redacted["password"], json!(""));
        assert_eq!(redacted["host"], json!("a"));
    }

    #[test]
    fn redaction_skips_absent_fields() {
        let doc = json!({"host": "a"});
        let redacted = redact_secrets(doc, SECRETS);
        assert!(redacted.get("password").is_none());
    }
}
