use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One requirement of an audit matrix. Immutable reference data.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ChecklistItem {
    pub id: String,
    pub clause: String,
    pub objective: String,
    pub description: String,
    pub required: bool,
}
