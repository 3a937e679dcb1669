use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::FindingLevel;

/// A finding imported from a previous audit cycle.
///
/// Used only to pre-populate a new audit's checklist; never authoritative.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalFinding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clause: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default)]
    pub finding: String,
    #[serde(default)]
    pub observation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finding_level: Option<FindingLevel>,
}

impl HistoricalFinding {
    /// The clause this record refers to: `clause`, falling back to `reference`.
    #[must_use]
    pub fn clause_key(&self) -> &str {
        [self.clause.as_deref(), self.reference.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .unwrap_or("")
    }

    /// Case-insensitive clause match against a checklist clause.
    #[must_use]
    pub fn matches_clause(&self, clause: &str) -> bool {
        let key = self.clause_key();
        !key.is_empty() && key.to_lowercase() == clause.to_lowercase()
    }
}
