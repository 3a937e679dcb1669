//! # flow-findings
//!
//! Reconciles an audit's checklist with its saved findings and imported
//! historical findings, applies edits under the auto-save policy, and
//! validates submission.
//!
//! - [`initialize_findings`] builds the working [`FindingSet`].
//! - [`ChecklistSession`] applies edits and persists through a [`FindingSink`].
//! - [`validate_submission`] enforces finding text on flagged required items.
//! - [`parse_historical_csv`] / [`merge_historical`] import historical records.

mod error;
mod historical;
mod session;
mod set;

pub use error::FindingError;
pub use historical::{
    HistoricalImport, MergeOutcome, merge_historical, parse_date, parse_historical_csv,
};
pub use session::{ChecklistSession, FindingSink, Submission, validate_submission};
pub use set::{
    ChecklistFinding, FindingSet, HISTORICAL_MARKER, historical_marker, initialize_findings,
};
