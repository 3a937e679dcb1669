//! # flow-matrix
//!
//! The audit matrix: which checklist items apply to an audit of a given type
//! and subtype.
//!
//! - [`resolve_checklist`] resolves against the built-in Part-145 matrix.
//! - [`AuditMatrix`] holds either the built-in matrix or an imported one;
//!   imported matrices are persisted and take precedence until reset.
//! - [`parse_matrix_csv`] / [`AuditMatrix::from_csv`] and [`parse_matrix_xlsx`] /
//!   [`AuditMatrix::from_xlsx`] import a matrix from CSV or a workbook.

mod builtin;
mod error;
mod import;
mod matrix;

pub use error::{MatrixError, RowRejection};
pub use import::{MatrixRow, parse_matrix_csv, parse_matrix_xlsx};
pub use matrix::{AuditMatrix, AuditTypeItems, MatrixExportRow, resolve_checklist};
