//! # Document Store Boundary
//!
//! Persistence seam for invex. Jobs and connector settings are plain
//! JSON documents held in named collections; the engine behind the
//! trait is interchangeable (the server ships with [`MemoryStore`],
//! a Mongo- or Postgres-JSONB-backed engine would implement the same
//! trait).
//!
//! The store makes two guarantees and no more:
//!
//! - per-document write atomicity (an upsert or delete is all-or-nothing);
//! - documents come back in store-native order; callers that need an
//!   ordering sort on their side.

pub mod error;
pub mod memory;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Outcome of an upsert: whether a new document was created or an
/// existing one replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Replaced,
}

/// A schema-less document store over named collections.
///
/// Documents are JSON objects. The store assigns an opaque `_id`
/// field on insert; callers address documents by their own key fields
/// (`pk`, `type`, ...).
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Find the first document in `collection` whose `field` equals `value`.
    async fn find_one(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> StoreResult<Option<Value>>;

    /// All documents in `collection`, store-native order.
    async fn find_all(&self, collection: &str) -> StoreResult<Vec<Value>>;

    /// Documents whose RFC 3339 timestamp in `field` is strictly greater
    /// than `since`. Documents without the field (or with a malformed
    /// value) are excluded.
    async fn find_since(
        &self,
        collection: &str,
        field: &str,
        since: DateTime<Utc>,
    ) -> StoreResult<Vec<Value>>;

    /// Insert `doc` if no document has `key_field == key_value`,
    /// otherwise fully replace the existing document's fields
    /// (the assigned `_id` survives replacement).
    async fn upsert(
        &self,
        collection: &str,
        key_field: &str,
        key_value: &Value,
        doc: Value,
    ) -> StoreResult<UpsertOutcome>;

    /// Delete the first document whose `field` equals `value`.
    /// Returns `true` if a document was removed.
    async fn delete_one(&self, collection: &str, field: &str, value: &Value) -> StoreResult<bool>;

    /// Identifier of the backing engine, surfaced by the health endpoint.
    fn backend_id(&self) -> String;
}
