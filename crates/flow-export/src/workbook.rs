//! Workbook model and the three export workbooks.

use chrono::NaiveDate;
use flow_core::entities::{Audit, AuditTemplate, ChecklistItem, User};
use flow_findings::FindingSet;
use flow_matrix::AuditMatrix;

use crate::rows::{AuditRow, ChecklistRow, Tabular, TemplateRow, UserRow, to_spreadsheet_rows};

pub const CHECKLIST_SHEET: &str = "Audit Checklist";
pub const MATRIX_SHEET: &str = "Audit Matrix";

/// One worksheet: optional preamble lines, a header row, then data rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub preamble: Vec<String>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Column widths in characters; columns past the end use the default.
    pub column_widths: Vec<f64>,
}

impl Sheet {
    /// Build a sheet from tabular rows. Every header is kept even when all
    /// values in that column are empty.
    pub fn from_rows<T: Tabular>(name: impl Into<String>, rows: &[T]) -> Self {
        Self {
            name: name.into(),
            preamble: Vec::new(),
            headers: T::HEADERS.iter().map(ToString::to_string).collect(),
            rows: rows.iter().map(Tabular::cells).collect(),
            column_widths: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_preamble(mut self, lines: Vec<String>) -> Self {
        self.preamble = lines;
        self
    }

    #[must_use]
    pub fn with_widths(mut self, widths: &[f64]) -> Self {
        self.column_widths = widths.to_vec();
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    #[must_use]
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    #[must_use]
    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.sheets.iter().map(|s| s.rows.len()).sum()
    }
}

/// Audits, Users and Templates sheets.
#[must_use]
pub fn to_all_data_workbook(
    users: &[User],
    audits: &[Audit],
    templates: &[AuditTemplate],
) -> Workbook {
    let audit_rows: Vec<AuditRow> = audits.iter().map(AuditRow::from).collect();
    let user_rows: Vec<UserRow> = users.iter().map(UserRow::from).collect();
    let template_rows: Vec<TemplateRow> = templates.iter().map(TemplateRow::from).collect();
    Workbook {
        sheets: vec![
            Sheet::from_rows("Audits", &audit_rows).with_widths(&[
                12.0, 30.0, 15.0, 15.0, 40.0, 12.0, 12.0, 12.0, 40.0, 20.0, 20.0,
            ]),
            Sheet::from_rows("Users", &user_rows),
            Sheet::from_rows("Templates", &template_rows),
        ],
    }
}

/// The single-sheet checklist export for one audit.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn checklist_workbook(
    audit: &Audit,
    checklist: &[ChecklistItem],
    findings: &FindingSet,
    export_date: NaiveDate,
) -> Workbook {
    let rows: Vec<ChecklistRow> = to_spreadsheet_rows(checklist, findings);
    let desc_width = rows
        .iter()
        .map(|r| r.description.chars().count())
        .fold(20, usize::max) as f64;
    let sheet = Sheet::from_rows(CHECKLIST_SHEET, &rows)
        .with_preamble(vec![
            format!("Audit Reference: {}", audit.reference),
            format!("Audit Name: {}", audit.name),
            format!("Export Date: {export_date}"),
            String::new(),
        ])
        .with_widths(&[15.0, 25.0, desc_width, 15.0, 40.0, 40.0, 10.0]);
    Workbook {
        sheets: vec![sheet],
    }
}

/// The single-sheet matrix export.
#[must_use]
pub fn matrix_workbook(matrix: &AuditMatrix) -> Workbook {
    Workbook {
        sheets: vec![
            Sheet::from_rows(MATRIX_SHEET, &matrix.export_rows())
                .with_widths(&[10.0, 15.0, 30.0, 40.0, 50.0, 10.0, 20.0]),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn all_data_keeps_every_column_when_empty() {
        let wb = to_all_data_workbook(&[], &[], &[]);
        assert_eq!(wb.sheet_names(), ["Audits", "Users", "Templates"]);
        assert_eq!(wb.sheet("Audits").unwrap().headers.len(), 11);
        assert_eq!(wb.sheet("Users").unwrap().headers.len(), 6);
        assert_eq!(wb.sheet("Templates").unwrap().headers.len(), 4);
        assert_eq!(wb.row_count(), 0);
    }

    #[test]
    fn matrix_workbook_has_one_row_per_item() {
        let wb = matrix_workbook(&AuditMatrix::builtin());
        assert_eq!(wb.sheets.len(), 1);
        assert_eq!(wb.sheets[0].name, MATRIX_SHEET);
        assert_eq!(wb.row_count(), 48);
    }
}
