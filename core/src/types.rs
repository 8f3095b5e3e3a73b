//! Payload DTOs for the Criticide API.
//!
//! # Design
//! This layer does no business validation, so every field is optional and
//! unknown shapes (`credential`, `provider`) stay as raw JSON. The
//! mock-server crate defines its own copies; integration tests catch drift.

use serde::{Deserialize, Serialize};

/// Body of `POST /data-source`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataResourceDefinition {
    #[serde(default)]
    pub credential: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub provider: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<String>,
}

/// Body of a `GET /service-account` response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceAccount {
    pub account_id: Option<String>,
    pub created: Option<String>,
    pub label: Option<String>,
    pub revision_datetime: Option<String>,
    pub revision_number: Option<i64>,
    pub status: Option<String>,
    pub workspace: Vec<serde_json::Value>,
    pub workspace_limit: Option<i64>,
}
