//! HTTP handlers for connector settings.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use utoipa::IntoParams;

use invex_connector::types::ConnectorType;

use crate::error::{ApiError, Result};
use crate::response::normalize_document;
use crate::router::ApiState;

/// Query parameters for connector settings reads.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ConnectorQuery {
    /// Connector type name (e.g. `VCenterConnector`).
    #[serde(rename = "type")]
    pub connector_type: String,
}

/// Read persisted connector settings, secret fields redacted to empty
/// values. Unknown connector types and never-configured connectors
/// both yield an empty document.
#[utoipa::path(
    get,
    path = "/connector",
    tag = "Connectors",
    params(ConnectorQuery),
    responses(
        (status = 200, description = "Redacted connector settings")
    )
)]
pub async fn read_connector_settings(
    State(state): State<ApiState>,
    Query(query): Query<ConnectorQuery>,
) -> Result<Json<Value>> {
    let Ok(connector_type) = query.connector_type.parse::<ConnectorType>() else {
        return Ok(Json(json!({})));
    };

    match state.registry.read_settings(connector_type).await {
        Ok(settings) => Ok(Json(normalize_document(settings))),
        Err(invex_connector::error::ConnectorError::UnsupportedConnectorType { .. }) => {
            Ok(Json(json!({})))
        }
        Err(e) => Err(e.into()),
    }
}

/// Persist connector settings. The document's `type` field selects
/// the connector; secret fields that are omitted or blank keep their
/// stored values. Responds with the stored document, redacted.
#[utoipa::path(
    post,
    path = "/connector",
    tag = "Connectors",
    responses(
        (status = 200, description = "Stored settings, redacted"),
        (status = 400, description = "Missing or unknown connector type")
    )
)]
pub async fn update_connector_settings(
    State(state): State<ApiState>,
    Json(settings): Json<Value>,
) -> Result<Json<Value>> {
    let connector_type = settings
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::Validation("settings document needs a 'type' field".into()))?
        .parse::<ConnectorType>()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let stored = state
        .registry
        .update_settings(connector_type, settings)
        .await?;
    Ok(Json(normalize_document(stored)))
}
