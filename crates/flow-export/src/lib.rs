//! # flow-export
//!
//! Shapes audits, findings and the audit matrix into spreadsheet form and
//! renders them as XLSX or CSV.
//!
//! - [`to_spreadsheet_rows`]: checklist + findings as fixed-column rows.
//! - [`to_all_data_workbook`], [`checklist_workbook`], [`matrix_workbook`]:
//!   the three export workbooks.
//! - [`write_xlsx`], [`write_csv`], [`read_checklist_csv`]: rendering.

mod error;
mod render;
mod rows;
mod workbook;

pub use error::ExportError;
pub use render::{read_checklist_csv, write_csv, write_xlsx, xlsx_bytes};
pub use rows::{AuditRow, ChecklistRow, Tabular, TemplateRow, UserRow, to_spreadsheet_rows};
pub use workbook::{
    CHECKLIST_SHEET, MATRIX_SHEET, Sheet, Workbook, checklist_workbook, matrix_workbook,
    to_all_data_workbook,
};
