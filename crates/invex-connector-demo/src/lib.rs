//! Demo connector.
//!
//! An entirely in-process connector used for local evaluation and
//! tests: connecting always succeeds and the choice sources are
//! served from fixed data. It exercises the same lifecycle as a real
//! connector (settings load, connect, choice enumeration) without any
//! external dependency.

mod config;
mod connector;

pub use config::DemoConfig;
pub use connector::DemoConnector;
