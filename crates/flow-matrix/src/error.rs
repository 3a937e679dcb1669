//! Matrix error types.

use thiserror::Error;

/// A single imported row that failed the schema step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowRejection {
    /// 1-based data row number (the header is row 0).
    pub row: usize,
    pub reason: String,
}

impl std::fmt::Display for RowRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row {}: {}", self.row, self.reason)
    }
}

#[derive(Debug, Error)]
pub enum MatrixError {
    #[error("File contains no data")]
    Empty,

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("{} invalid row(s): {}", .0.len(), join_rejections(.0))]
    InvalidRows(Vec<RowRejection>),

    #[error("Duplicate checklist item id '{id}' in audit type '{audit_type}'")]
    DuplicateId { audit_type: String, id: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Workbook error: {0}")]
    Xlsx(#[from] calamine::XlsxError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn join_rejections(rejections: &[RowRejection]) -> String {
    rejections
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_lists_every_field() {
        let err = MatrixError::MissingColumns(vec!["clause".into(), "objective".into()]);
        assert_eq!(err.to_string(), "Missing required fields: clause, objective");
    }

    #[test]
    fn invalid_rows_are_numbered() {
        let err = MatrixError::InvalidRows(vec![RowRejection {
            row: 3,
            reason: "empty clause".into(),
        }]);
        assert_eq!(err.to_string(), "1 invalid row(s): row 3: empty clause");
    }
}
