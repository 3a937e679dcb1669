//! Store error types for flow-store.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from document storage and service operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing a document file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A stored document does not deserialize into its expected type.
    #[error("Corrupt document '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A domain rule rejected the operation (bad dates, duplicates, closure).
    #[error(transparent)]
    Core(#[from] flow_core::errors::CoreError),

    #[error(transparent)]
    Finding(#[from] flow_findings::FindingError),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StoreError {
    pub(crate) fn not_found(entity_type: &str, id: &str) -> Self {
        Self::Core(flow_core::errors::CoreError::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        })
    }

    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Self::Core(flow_core::errors::CoreError::Validation(msg.into()))
    }

    /// Whether this is a `NotFound` lookup failure.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Core(flow_core::errors::CoreError::NotFound { .. })
        )
    }
}
