//! HTTP handlers.

pub mod connectors;
pub mod jobcreate;
pub mod jobs;
pub mod root;

pub use connectors::{read_connector_settings, update_connector_settings};
pub use jobcreate::job_creation;
pub use jobs::{get_job, list_jobs, submit_job};
pub use root::api_status;
