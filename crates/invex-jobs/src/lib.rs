//! # Job scheduling and introspection
//!
//! The job-facing core of invex:
//!
//! - [`catalog`] - the static table of known job types, each declaring
//!   the connector it runs against and its configurable properties
//! - [`projector`] - derives a JSON-Schema-like document for a job
//!   type, with enumerated choices pulled live from the connector
//! - [`store`] - the persisted job records and their lifecycle state
//!   machine (`pending` → `processing` → deleted)
//!
//! Jobs are declared here, never executed: an external executor picks
//! up `pending` records and advances them.

pub mod catalog;
pub mod error;
pub mod projector;
pub mod store;

pub use catalog::{JobCatalog, JobDescriptor, JobProperty, PropertyExample};
pub use error::{JobError, JobResult};
pub use projector::SchemaProjector;
pub use store::{JobStore, SubmitOutcome};
