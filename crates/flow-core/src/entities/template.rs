use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default objective, scope and introduction text for an audit type.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuditTemplate {
    #[serde(rename = "type")]
    pub audit_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    #[serde(default)]
    pub objective: String,
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub introduction: String,
}
