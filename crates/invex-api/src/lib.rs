//! # invex HTTP API
//!
//! REST surface over the connector registry, schema projector and job
//! store. This crate translates requests into calls on the core and
//! normalizes documents on the way out; all business rules live in
//! `invex-jobs` and `invex-connector`.
//!
//! ## Endpoints
//!
//! - `GET /api` - health: static OK plus the persistence backend id
//! - `GET /job/{id}` - read one job record
//! - `GET /job?timestamp=...` - list records, optionally modified
//!   after the given RFC 3339 timestamp
//! - `POST /job` - submit (guarded upsert / delete, see `JobStore`)
//! - `GET /connector?type=...` - read connector settings, redacted
//! - `POST /connector` - write connector settings, secrets preserved
//! - `GET /jobcreate` - menu of currently-offered job types
//! - `GET /jobcreate?type=...` - schema projection for one job type

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;

pub use error::{ApiError, Result};
pub use router::{api_routes, ApiState};
