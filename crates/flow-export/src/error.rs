//! Export error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Row or column index beyond what a worksheet can hold.
    #[error("Sheet '{sheet}' is too large to write")]
    TooLarge { sheet: String },

    #[error("No '{0}' header row found")]
    MissingHeader(String),
}
