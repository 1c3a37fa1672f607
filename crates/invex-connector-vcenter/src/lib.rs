//! VCenter connector.
//!
//! Talks to VMware vCenter through the vSphere Automation REST API:
//! `connect` creates an API session, `disconnect` deletes it, and the
//! `list_datacenters` choice source enumerates datacenter names for
//! job property schemas.

mod config;
mod connector;

pub use config::VCenterConfig;
pub use connector::VCenterConnector;
