//! Response types returned as JSON by `auditflow` commands.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Audit;
use crate::enums::AuditStatus;
use crate::metrics::{AuditorMetrics, AverageMetrics, DurationMetrics};

/// Response from `auditflow finding submit`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub reference: String,
    pub items: usize,
    pub findings_identified: usize,
    /// Historical markers cleared because the finding was never confirmed.
    pub markers_cleared: usize,
}

/// Response from `auditflow audit close`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CloseResponse {
    pub audit: Audit,
    pub previous_status: AuditStatus,
}

/// Response from `auditflow audit refresh`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub checked: usize,
    pub changed: Vec<StatusChange>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub reference: String,
    pub from: AuditStatus,
    pub to: AuditStatus,
}

/// Response from the `auditflow import` commands.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub source: String,
    pub imported: usize,
    /// Rows dropped because they lacked a matching key.
    pub skipped: usize,
    /// Rows identical to records already stored.
    pub duplicates: usize,
}

/// Response from the `auditflow export` commands.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    pub path: String,
    pub sheets: Vec<String>,
    pub rows: usize,
}

/// Response from `auditflow metrics`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MetricsResponse {
    pub durations: Vec<DurationMetrics>,
    pub averages: AverageMetrics,
    pub auditors: Vec<AuditorMetrics>,
}
