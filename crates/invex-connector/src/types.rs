//! Connector type names.

use serde::{Deserialize, Serialize};

/// The closed set of connector variants known to this process.
///
/// The wire names (`VCenterConnector`, `DemoConnector`) appear in
/// persisted settings documents and in the `type` query parameter of
/// the connector settings API, so they are stable identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectorType {
    /// VMware vCenter (vSphere Automation REST API).
    VCenter,
    /// In-process demo backend, used for local evaluation and tests.
    Demo,
}

impl ConnectorType {
    /// Stable wire name for this connector type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectorType::VCenter => "VCenterConnector",
            ConnectorType::Demo => "DemoConnector",
        }
    }
}

impl std::fmt::Display for ConnectorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ConnectorType {
    type Err = crate::error::ConnectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "VCenterConnector" => Ok(ConnectorType::VCenter),
            "DemoConnector" => Ok(ConnectorType::Demo),
            other => Err(crate::error::ConnectorError::UnsupportedConnectorType {
                connector_type: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_round_trip() {
        for ct in [ConnectorType::VCenter, ConnectorType::Demo] {
            let parsed: ConnectorType = ct.as_str().parse().unwrap();
            assert_eq!(parsed, ct);
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert!("HyperVConnector".parse::<ConnectorType>().is_err());
    }
}
