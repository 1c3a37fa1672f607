//! Server configuration loaded from environment variables.
//!
//! Loading is fail-fast with validation: a malformed value stops the
//! process with a clear message instead of starting a half-configured
//! server.

use std::env;
use std::time::Duration;

use thiserror::Error;

/// Configuration loading error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {variable}: {value} ({reason})")]
    InvalidValue {
        variable: String,
        value: String,
        reason: String,
    },
}

/// Runtime configuration for the export server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address, `HOST` (default `0.0.0.0`).
    pub host: String,
    /// Bind port, `PORT` (default `8080`).
    pub port: u16,
    /// Log filter directive, `RUST_LOG` (default `info`).
    pub rust_log: String,
    /// Directory holding the admin UI bundle, `ADMIN_UI_DIR`
    /// (default `admin/ui`).
    pub admin_ui_dir: String,
    /// Bound on a single connector connect attempt,
    /// `CONNECT_TIMEOUT_SECS` (default 30).
    pub connect_timeout: Duration,
}

impl Config {
    /// Load configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = parse_var("PORT", 8080u16)?;
        let connect_timeout_secs = parse_var("CONNECT_TIMEOUT_SECS", 30u64)?;

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            admin_ui_dir: env::var("ADMIN_UI_DIR").unwrap_or_else(|_| "admin/ui".to_string()),
            connect_timeout: Duration::from_secs(connect_timeout_secs),
        })
    }
}

fn parse_var<T: std::str::FromStr>(variable: &str, default: T) -> Result<T, ConfigError> {
    match env::var(variable) {
        Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
            variable: variable.to_string(),
            value: raw,
            reason: format!("expected a {}", std::any::type_name::<T>()),
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        // Not touching the process environment keeps this test safe to
        // run in parallel with others.
        let config = Config::from_env().unwrap();
        assert!(!config.host.is_empty());
        assert!(config.connect_timeout.as_secs() > 0);
    }
}
