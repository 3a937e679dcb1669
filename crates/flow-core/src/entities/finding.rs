use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{FindingLevel, SupportingKind};

/// A certifying or support staff member sampled during the audit.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StaffData {
    pub id: String,
    pub staff_number: String,
    pub staff_name: String,
    pub staff_scope: String,
}

/// A tool or piece of equipment checked for calibration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ToolData {
    pub id: String,
    pub serial_number: String,
    pub description: String,
    pub due_date: String,
}

/// A component sampled for release certification.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ComponentData {
    pub id: String,
    pub batch_number: String,
    pub description: String,
    /// Authorized Release Certificate reference.
    pub arc: String,
}

/// A maintenance data reference (PMO/WSO) checked against the work card.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceData {
    pub id: String,
    pub reference: String,
    pub task_name: String,
    pub operation_number: String,
    pub revision_indicator: String,
}

/// A file attached to a finding. `data` is base64.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Attachment {
    pub name: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub data: String,
}

/// Replacement payload for one kind of supporting records on a finding.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(tag = "kind", content = "records", rename_all = "snake_case")]
pub enum SupportingData {
    Staff(Vec<StaffData>),
    Tools(Vec<ToolData>),
    Components(Vec<ComponentData>),
    Maintenance(Vec<MaintenanceData>),
}

impl SupportingData {
    #[must_use]
    pub const fn kind(&self) -> SupportingKind {
        match self {
            Self::Staff(_) => SupportingKind::Staff,
            Self::Tools(_) => SupportingKind::Tools,
            Self::Components(_) => SupportingKind::Components,
            Self::Maintenance(_) => SupportingKind::Maintenance,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Staff(v) => v.len(),
            Self::Tools(v) => v.len(),
            Self::Components(v) => v.len(),
            Self::Maintenance(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The persisted form of one checklist item's finding within an audit.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FindingRecord {
    pub id: String,
    pub audit_ref: String,
    pub checklist_item_id: String,
    /// Absent in records written before the flag was stored explicitly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_finding: Option<bool>,
    #[serde(default)]
    pub finding: String,
    #[serde(default)]
    pub observation: String,
    #[serde(default)]
    pub finding_level: FindingLevel,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub is_historical: bool,
    #[serde(default)]
    pub staff_data: Vec<StaffData>,
    #[serde(default)]
    pub tool_data: Vec<ToolData>,
    #[serde(default)]
    pub component_data: Vec<ComponentData>,
    #[serde(default)]
    pub maintenance_data: Vec<MaintenanceData>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl FindingRecord {
    /// Whether a finding was identified. Legacy records infer it from the text.
    #[must_use]
    pub fn finding_identified(&self) -> bool {
        self.has_finding.unwrap_or(!self.finding.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_record_infers_has_finding_from_text() {
        let json = r#"{"id":"fnd-1","auditRef":"AUD-1","checklistItemId":"c-1","finding":"Expired stamp","observation":"","year":"2024","isHistorical":false}"#;
        let record: FindingRecord = serde_json::from_str(json).unwrap();
        assert!(record.has_finding.is_none());
        assert!(record.finding_identified());
        assert_eq!(record.finding_level, FindingLevel::Observation);
        assert!(record.attachments.is_empty());
    }

    #[test]
    fn explicit_flag_wins_over_text() {
        let json = r#"{"id":"fnd-1","auditRef":"AUD-1","checklistItemId":"c-1","hasFinding":false,"finding":"draft"}"#;
        let record: FindingRecord = serde_json::from_str(json).unwrap();
        assert!(!record.finding_identified());
    }

    #[test]
    fn supporting_data_is_tagged() {
        let data = SupportingData::Tools(vec![ToolData {
            id: "tol-1".into(),
            serial_number: "SN-42".into(),
            description: "Torque wrench".into(),
            due_date: "2025-06-01".into(),
        }]);
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["kind"], "tools");
        assert_eq!(json["records"][0]["serialNumber"], "SN-42");
        assert_eq!(data.kind(), SupportingKind::Tools);
        assert_eq!(data.len(), 1);
    }

    #[test]
    fn supporting_data_rejects_mismatched_records() {
        let json = r#"{"kind":"staff","records":[{"id":"x","serialNumber":"1","description":"d","dueDate":"d"}]}"#;
        assert!(serde_json::from_str::<SupportingData>(json).is_err());
    }
}
