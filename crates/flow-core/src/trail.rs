//! JSONL change-trail envelope.
//!
//! Every save and delete against the data directory is recorded as a
//! `ChangeRecord` in `<data_dir>/trail/<YYYY-MM-DD>.jsonl`. Records written
//! before the `v` field existed deserialize with `v == 1`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{EntityType, TrailOp};

const fn default_trail_version() -> u32 {
    1
}

/// A single mutation recorded in the change trail.
///
/// `data` holds the full document for create/update/import ops and the
/// removed key for deletes.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ChangeRecord {
    #[serde(default = "default_trail_version")]
    pub v: u32,

    /// RFC 3339 timestamp.
    pub ts: String,

    pub op: TrailOp,

    pub entity: EntityType,

    /// Storage key or entity reference that was touched.
    pub key: String,

    pub data: serde_json::Value,
}

impl ChangeRecord {
    #[must_use]
    pub fn new(op: TrailOp, entity: EntityType, key: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            v: default_trail_version(),
            ts: chrono::Utc::now().to_rfc3339(),
            op,
            entity,
            key: key.into(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_record_roundtrip() {
        let record = ChangeRecord {
            v: 1,
            ts: "2025-01-15T12:00:00Z".to_string(),
            op: TrailOp::Update,
            entity: EntityType::Finding,
            key: "auditFindings.AUD-2025-001".to_string(),
            data: serde_json::json!({"p-1": {"hasFinding": true}}),
        };
        let json = serde_json::to_string(&record).unwrap();
        let recovered: ChangeRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(recovered, record);
    }

    #[test]
    fn missing_version_defaults_to_one() {
        let json = r#"{"ts":"2025-01-01T00:00:00Z","op":"delete","entity":"audit","key":"AUD-2025-004","data":null}"#;
        let record: ChangeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.v, 1);
        assert_eq!(record.op, TrailOp::Delete);
    }

    #[test]
    fn new_stamps_current_version() {
        let record = ChangeRecord::new(
            TrailOp::Create,
            EntityType::Audit,
            "AUD-2025-001",
            serde_json::json!({}),
        );
        assert_eq!(record.v, 1);
        assert!(chrono::DateTime::parse_from_rfc3339(&record.ts).is_ok());
    }
}
