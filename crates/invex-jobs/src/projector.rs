//! Schema projection.
//!
//! Derives a JSON-Schema-like document for a job type by combining
//! the descriptor's declared properties with enumerated choices pulled
//! live from the connected connector. A job type is only describable
//! while its connector is usable; everything else projects to nothing
//! so callers can treat it as "not currently offered".

use std::sync::Arc;

use serde_json::{json, Map, Value};
use tracing::warn;

use invex_connector::registry::ConnectorRegistry;

use crate::catalog::JobCatalog;

/// Projects job descriptors into schema documents.
pub struct SchemaProjector {
    catalog: Arc<JobCatalog>,
    registry: Arc<ConnectorRegistry>,
}

impl SchemaProjector {
    /// Create a projector over the given catalog and registry.
    pub fn new(catalog: Arc<JobCatalog>, registry: Arc<ConnectorRegistry>) -> Self {
        Self { catalog, registry }
    }

    /// Project the schema for `job_type`.
    ///
    /// Returns `None` for unknown job types and for job types whose
    /// required connector is not currently active. Never an error, so
    /// callers can use the result to filter a menu.
    pub async fn project(&self, job_type: &str) -> Option<Value> {
        let descriptor = self.catalog.get(job_type)?;
        let connector = self.registry.get(descriptor.connector_type).await?;

        let mut properties = Map::new();
        for property in &descriptor.properties {
            let mut schema = Map::new();
            schema.insert(
                "type".to_string(),
                Value::String(property.example.type_tag().to_string()),
            );

            if let Some(source) = property.choice_source {
                match connector.choices(source).await {
                    Ok(values) => {
                        schema.insert(
                            "enum".to_string(),
                            Value::Array(values.into_iter().map(Value::String).collect()),
                        );
                    }
                    Err(e) => {
                        // The session dropped mid-projection or the
                        // catalog names a missing source; either way
                        // the job type is not offerable right now.
                        warn!(job_type, source, error = %e,
                              "Choice enumeration failed during projection");
                        return None;
                    }
                }
            }

            properties.insert(property.name.to_string(), Value::Object(schema));
        }

        Some(json!({
            "title": format!("{job_type} Job"),
            "type": "object",
            // Rendering hints for generic form renderers, not
            // validation rules.
            "options": {
                "disable_collapse": true,
                "disable_properties": true,
            },
            "properties": properties,
        }))
    }

    /// The menu of currently-offered job types.
    ///
    /// Triggers a registry-wide activation pass, then returns a
    /// reference entry (not the full schema) for every job type whose
    /// connector is active; schemas are fetched individually by type.
    pub async fn list_offered(&self) -> Value {
        self.registry
            .ensure_active(self.catalog.required_connector_types())
            .await;

        let mut offered = Vec::new();
        for descriptor in self.catalog.descriptors() {
            if self.registry.get(descriptor.connector_type).await.is_some() {
                offered.push(json!({
                    "title": descriptor.job_type,
                    "$ref": format!("/jobcreate?type={}", descriptor.job_type),
                }));
            }
        }

        json!({ "oneOf": offered })
    }
}
