//! In-process document store.
//!
//! Backs the server and the test suite. Collections are created on
//! first write; each collection is a vector of JSON objects behind its
//! own lock, so writes to one document never block reads of another
//! collection.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::{DocumentStore, UpsertOutcome};

/// In-memory [`DocumentStore`] engine.
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Value>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
        }
    }

    fn require_object(doc: &Value) -> StoreResult<()> {
        if doc.is_object() {
            Ok(())
        } else {
            Err(StoreError::invalid_document("document must be a JSON object"))
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn field_matches(doc: &Value, field: &str, value: &Value) -> bool {
    doc.get(field) == Some(value)
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_one(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> StoreResult<Option<Value>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| field_matches(d, field, value)))
            .cloned())
    }

    async fn find_all(&self, collection: &str) -> StoreResult<Vec<Value>> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    async fn find_since(
        &self,
        collection: &str,
        field: &str,
        since: DateTime<Utc>,
    ) -> StoreResult<Vec<Value>> {
        let collections = self.collections.read().await;
        let Some(docs) = collections.get(collection) else {
            return Ok(Vec::new());
        };
        Ok(docs
            .iter()
            .filter(|doc| {
                doc.get(field)
                    .and_then(Value::as_str)
                    .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                    .is_some_and(|t| t.with_timezone(&Utc) > since)
            })
            .cloned()
            .collect())
    }

    async fn upsert(
        &self,
        collection: &str,
        key_field: &str,
        key_value: &Value,
        mut doc: Value,
    ) -> StoreResult<UpsertOutcome> {
        Self::require_object(&doc)?;

        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();

        if let Some(existing) = docs
            .iter_mut()
            .find(|d| field_matches(d, key_field, key_value))
        {
            // Full field replacement; the assigned _id survives.
            let id = existing.get("_id").cloned();
            if let (Some(id), Some(obj)) = (id, doc.as_object_mut()) {
                obj.insert("_id".to_string(), id);
            }
            *existing = doc;
            return Ok(UpsertOutcome::Replaced);
        }

        if let Some(obj) = doc.as_object_mut() {
            obj.entry("_id")
                .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));
        }
        docs.push(doc);
        Ok(UpsertOutcome::Inserted)
    }

    async fn delete_one(&self, collection: &str, field: &str, value: &Value) -> StoreResult<bool> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(false);
        };
        let before = docs.len();
        if let Some(pos) = docs.iter().position(|d| field_matches(d, field, value)) {
            docs.remove(pos);
        }
        Ok(docs.len() != before)
    }

    fn backend_id(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[tokio::test]
    async fn upsert_inserts_and_assigns_id() {
        let store = MemoryStore::new();
        let outcome = store
            .upsert("job", "pk", &json!("j1"), json!({"pk": "j1", "value": 5}))
            .await
            .unwrap();
        assert_eq!(outcome, UpsertOutcome::Inserted);

        let doc = store
            .find_one("job", "pk", &json!("j1"))
            .await
            .unwrap()
            .unwrap();
        assert!(doc.get("_id").and_then(Value::as_str).is_some());
        assert_eq!(doc["value"], json!(5));
    }

    #[tokio::test]
    async fn upsert_replaces_fields_but_keeps_id() {
        let store = MemoryStore::new();
        store
            .upsert("job", "pk", &json!("j1"), json!({"pk": "j1", "value": 5}))
            .await
            .unwrap();
        let id = store
            .find_one("job", "pk", &json!("j1"))
            .await
            .unwrap()
            .unwrap()["_id"]
            .clone();

        let outcome = store
            .upsert("job", "pk", &json!("j1"), json!({"pk": "j1", "other": true}))
            .await
            .unwrap();
        assert_eq!(outcome, UpsertOutcome::Replaced);

        let doc = store
            .find_one("job", "pk", &json!("j1"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(doc["_id"], id);
        assert_eq!(doc["other"], json!(true));
        // Full replacement, not a merge.
        assert!(doc.get("value").is_none());
    }

    #[tokio::test]
    async fn find_since_is_strictly_greater() {
        let store = MemoryStore::new();
        store
            .upsert(
                "job",
                "pk",
                &json!("a"),
                json!({"pk": "a", "modifytime": "2026-01-01T00:00:00Z"}),
            )
            .await
            .unwrap();
        store
            .upsert(
                "job",
                "pk",
                &json!("b"),
                json!({"pk": "b", "modifytime": "2026-01-02T00:00:00Z"}),
            )
            .await
            .unwrap();
        // Missing modifytime never matches a since filter.
        store
            .upsert("job", "pk", &json!("c"), json!({"pk": "c"}))
            .await
            .unwrap();

        let since = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let docs = store.find_since("job", "modifytime", since).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0]["pk"], json!("b"));
    }

    #[tokio::test]
    async fn delete_one_removes_only_matching() {
        let store = MemoryStore::new();
        store
            .upsert("job", "pk", &json!("a"), json!({"pk": "a"}))
            .await
            .unwrap();
        store
            .upsert("job", "pk", &json!("b"), json!({"pk": "b"}))
            .await
            .unwrap();

        assert!(store.delete_one("job", "pk", &json!("a")).await.unwrap());
        assert!(!store.delete_one("job", "pk", &json!("a")).await.unwrap());
        assert_eq!(store.find_all("job").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn non_object_documents_are_rejected() {
        let store = MemoryStore::new();
        let err = store
            .upsert("job", "pk", &json!("a"), json!("not an object"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidDocument { .. }));
    }
}
