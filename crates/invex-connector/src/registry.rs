//! Connector lifecycle registry.
//!
//! Process-wide table of connector instances, one per type name. The
//! registry owns lazy instantiation, settings reload, connect (with a
//! timeout) and eviction on failure. It is constructed once at startup
//! and passed by `Arc` to request handlers; mutation is serialized per
//! connector type so concurrent requests never race a connect attempt.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use invex_store::DocumentStore;

use crate::config::{merge_preserving_secrets, redact_secrets};
use crate::error::{ConnectorError, ConnectorResult};
use crate::traits::Connector;
use crate::types::ConnectorType;

/// Collection holding one settings document per connector type.
const SETTINGS_COLLECTION: &str = "connector";

/// Default bound on a single connect attempt.
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Constructor for a connector instance. Instances start unconfigured
/// and disconnected; the registry loads settings and connects.
pub type ConnectorFactory = Arc<dyn Fn() -> Arc<dyn Connector> + Send + Sync>;

/// Startup-time registration entry: how to build a connector of a
/// given type and which of its settings fields are secret.
#[derive(Clone)]
pub struct ConnectorSpec {
    pub connector_type: ConnectorType,
    pub secret_fields: &'static [&'static str],
    pub factory: ConnectorFactory,
}

impl ConnectorSpec {
    /// Create a new spec entry.
    pub fn new(
        connector_type: ConnectorType,
        secret_fields: &'static [&'static str],
        factory: ConnectorFactory,
    ) -> Self {
        Self {
            connector_type,
            secret_fields,
            factory,
        }
    }
}

struct Entry {
    spec: ConnectorSpec,
    // Serializes instantiate/connect/evict for this type. Reads of an
    // already-active instance do not take this lock.
    guard: Mutex<()>,
}

/// Registry of live connector instances, keyed by connector type.
///
/// Invariant: at most one instance per type at any time. An instance
/// that fails to connect is removed, so the next `ensure_active` call
/// re-instantiates and retries.
pub struct ConnectorRegistry {
    entries: HashMap<ConnectorType, Entry>,
    instances: RwLock<HashMap<ConnectorType, Arc<dyn Connector>>>,
    store: Arc<dyn DocumentStore>,
    connect_timeout: Duration,
}

impl ConnectorRegistry {
    /// Create an empty registry over the given settings store.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            entries: HashMap::new(),
            instances: RwLock::new(HashMap::new()),
            store,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }

    /// Bound each connect attempt, so one unreachable system cannot
    /// stall the registry indefinitely.
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Register a connector type. Called during startup, before the
    /// registry is shared.
    pub fn register(&mut self, spec: ConnectorSpec) {
        self.entries.insert(
            spec.connector_type,
            Entry {
                spec,
                guard: Mutex::new(()),
            },
        );
    }

    /// Connector types this registry can instantiate.
    pub fn registered_types(&self) -> Vec<ConnectorType> {
        self.entries.keys().copied().collect()
    }

    /// For each distinct type in `types`: instantiate if absent, and
    /// if not connected, reload persisted settings and attempt to
    /// connect. Failures are recorded as WARN diagnostics and evict
    /// the instance; they never propagate past this boundary.
    pub async fn ensure_active(&self, types: impl IntoIterator<Item = ConnectorType>) {
        let mut seen = Vec::new();
        for ct in types {
            if seen.contains(&ct) {
                continue;
            }
            seen.push(ct);
            self.activate(ct).await;
        }
    }

    /// Get the live instance for `connector_type`, or `None` if it is
    /// not currently connected. Absence means "capability unavailable
    /// now", not an error: the next `ensure_active` will retry.
    pub async fn get(&self, connector_type: ConnectorType) -> Option<Arc<dyn Connector>> {
        self.instances
            .read()
            .await
            .get(&connector_type)
            .filter(|c| c.is_connected())
            .cloned()
    }

    /// Persist new settings for `connector_type`.
    ///
    /// Secret fields that the incoming document omits or blanks keep
    /// their stored values (merge-not-overwrite, secrets only).
    /// Returns the stored document in redacted form.
    pub async fn update_settings(
        &self,
        connector_type: ConnectorType,
        new_settings: Value,
    ) -> ConnectorResult<Value> {
        let entry = self.entry(connector_type)?;
        let key = json!(connector_type.as_str());

        let previous = self
            .store
            .find_one(SETTINGS_COLLECTION, "type", &key)
            .await?;
        let mut merged =
            merge_preserving_secrets(new_settings, previous.as_ref(), entry.spec.secret_fields);
        if let Some(obj) = merged.as_object_mut() {
            obj.insert("type".to_string(), key.clone());
        }

        self.store
            .upsert(SETTINGS_COLLECTION, "type", &key, merged.clone())
            .await?;
        Ok(redact_secrets(merged, entry.spec.secret_fields))
    }

    /// Read persisted settings for `connector_type`, secrets redacted
    /// to empty values. Returns an empty document when nothing is
    /// persisted yet.
    pub async fn read_settings(&self, connector_type: ConnectorType) -> ConnectorResult<Value> {
        let entry = self.entry(connector_type)?;
        let key = json!(connector_type.as_str());

        match self.store.find_one(SETTINGS_COLLECTION, "type", &key).await? {
            Some(doc) => Ok(redact_secrets(doc, entry.spec.secret_fields)),
            None => Ok(json!({})),
        }
    }

    fn entry(&self, connector_type: ConnectorType) -> ConnectorResult<&Entry> {
        self.entries
            .get(&connector_type)
            .ok_or_else(|| ConnectorError::UnsupportedConnectorType {
                connector_type: connector_type.to_string(),
            })
    }

    async fn activate(&self, connector_type: ConnectorType) {
        let Some(entry) = self.entries.get(&connector_type) else {
            warn!(connector = %connector_type, "Ignoring unregistered connector type");
            return;
        };

        // Serialize mutation per type: without this, two concurrent
        // requests could both see "not connected" and race a connect.
        let _guard = entry.guard.lock().await;

        let instance = {
            let existing = self.instances.read().await.get(&connector_type).cloned();
            match existing {
                Some(instance) => instance,
                None => {
                    let instance = (entry.spec.factory)();
                    self.instances
                        .write()
                        .await
                        .insert(connector_type, instance.clone());
                    instance
                }
            }
        };

        if instance.is_connected() {
            return;
        }

        // Settings are reloaded before every connect attempt so edits
        // take effect without a restart.
        match self
            .store
            .find_one(SETTINGS_COLLECTION, "type", &json!(connector_type.as_str()))
            .await
        {
            Ok(Some(settings)) => {
                if let Err(e) = instance.load_settings(&settings) {
                    self.evict(connector_type).await;
                    warn!(connector = %connector_type, error = %e,
                          "Error loading connector settings");
                    return;
                }
            }
            Ok(None) => {}
            Err(e) => {
                warn!(connector = %connector_type, error = %e,
                      "Error reading connector settings");
                return;
            }
        }

        info!(connector = %connector_type, "Trying to activate connector");
        match tokio::time::timeout(self.connect_timeout, instance.connect()).await {
            Ok(Ok(())) => {
                info!(connector = %connector_type, "Connector activated");
            }
            Ok(Err(e)) => {
                self.evict(connector_type).await;
                warn!(connector = %connector_type, error = %e,
                      "Error activating connector");
            }
            Err(_) => {
                self.evict(connector_type).await;
                warn!(connector = %connector_type,
                      timeout_secs = self.connect_timeout.as_secs(),
                      "Connector activation timed out");
            }
        }
    }

    async fn evict(&self, connector_type: ConnectorType) {
        self.instances.write().await.remove(&connector_type);
    }
}
