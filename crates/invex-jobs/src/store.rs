//! Job record store and state machine.
//!
//! Job documents live in the `job` collection. The lifecycle this
//! core enforces is narrow: records enter as `pending`, an external
//! executor advances them (`processing`, terminal states), and a
//! caller may delete a record only while it is still `pending`. Any
//! other action against a non-pending record is rejected without
//! mutation.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Value};
use tracing::debug;

use invex_store::DocumentStore;

use crate::error::{JobError, JobResult};

const COLLECTION: &str = "job";

/// Initial status of every submitted job.
pub const STATUS_PENDING: &str = "pending";

/// Result of a submit call.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The document was upserted; carries the persisted record.
    Saved(Value),
    /// The guard passed and the record was removed.
    Deleted,
    /// The record exists and is no longer `pending`; nothing changed.
    WrongState,
}

/// Thin wrapper over the document store for job records.
pub struct JobStore {
    store: Arc<dyn DocumentStore>,
}

impl JobStore {
    /// Create a job store over the given document store.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Submit a job document: an idempotent upsert keyed by `pk`,
    /// guarded by the record's lifecycle state.
    ///
    /// The pending-check and the following write are separate store
    /// calls, not an atomic compare-and-swap: two concurrent submits
    /// for the same `pk` can both pass the guard, and the last write
    /// wins. Callers that need stronger guarantees must serialize
    /// their own submits (see `concurrent_submits_both_land`).
    pub async fn submit(&self, doc: Value) -> JobResult<SubmitOutcome> {
        let Value::Object(mut job) = doc else {
            return Err(JobError::NotAnObject);
        };
        let pk = job
            .get("pk")
            .cloned()
            .filter(|v| !v.is_null())
            .ok_or(JobError::MissingKey)?;

        job.insert(
            "modifytime".to_string(),
            Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)),
        );

        if let Some(existing) = self.store.find_one(COLLECTION, "pk", &pk).await? {
            let status = existing.get("status").and_then(Value::as_str);
            if status != Some(STATUS_PENDING) {
                debug!(pk = %pk, ?status, "Rejecting submit against non-pending job");
                return Ok(SubmitOutcome::WrongState);
            }
            if job.get("action").and_then(Value::as_str) == Some("delete") {
                self.store.delete_one(COLLECTION, "pk", &pk).await?;
                return Ok(SubmitOutcome::Deleted);
            }
        }

        // Status is server-controlled: whatever the caller supplied is
        // overwritten, and the transient action marker is not stored.
        job.insert(
            "status".to_string(),
            Value::String(STATUS_PENDING.to_string()),
        );
        job.remove("action");

        self.store
            .upsert(COLLECTION, "pk", &pk, Value::Object(job))
            .await?;

        let saved = self
            .store
            .find_one(COLLECTION, "pk", &pk)
            .await?
            .unwrap_or(Value::Null);
        Ok(SubmitOutcome::Saved(saved))
    }

    /// Get a single record by its `pk`, falling back to a caller-kept
    /// `id` field. `None` means not found.
    pub async fn get(&self, pk_or_id: &str) -> JobResult<Option<Value>> {
        let key = json!(pk_or_id);
        if let Some(record) = self.store.find_one(COLLECTION, "pk", &key).await? {
            return Ok(Some(record));
        }
        Ok(self.store.find_one(COLLECTION, "id", &key).await?)
    }

    /// All records, or only those modified strictly after `since`.
    /// Store-native order.
    pub async fn list(&self, since: Option<DateTime<Utc>>) -> JobResult<Vec<Value>> {
        let records = match since {
            Some(since) => {
                self.store
                    .find_since(COLLECTION, "modifytime", since)
                    .await?
            }
            None => self.store.find_all(COLLECTION).await?,
        };
        Ok(records)
    }
}
