//! Finding error types.

use flow_core::enums::SupportingKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FindingError {
    #[error("No checklist item '{item_id}' in this finding set")]
    UnknownItem { item_id: String },

    #[error("Item '{item_id}' has no attachment at index {index}")]
    AttachmentIndex { item_id: String, index: usize },

    #[error("Item '{item_id}' collects {expected} records, not {got}")]
    SupportingKindMismatch {
        item_id: String,
        expected: String,
        got: SupportingKind,
    },

    /// Submission blocked: required items flagged as findings without text.
    #[error("Please add finding details for: {}", .clauses.join(", "))]
    Incomplete { clauses: Vec<String> },

    #[error("Missing required fields: {0}")]
    MissingColumns(String),

    #[error("Row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Core(#[from] flow_core::errors::CoreError),

    /// The sink failed to persist the set.
    #[error("Failed to save findings: {0:#}")]
    Persist(#[from] anyhow::Error),
}
