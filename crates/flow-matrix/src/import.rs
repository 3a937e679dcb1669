//! Matrix import from CSV or the first sheet of an `.xlsx` workbook.
//!
//! Import runs in two steps. The reader turns the file into a header row and
//! string records; the schema step checks the header and turns each record
//! into a typed [`MatrixRow`] or a [`RowRejection`]. [`AuditMatrix::from_rows`]
//! then assembles the matrix. Any rejection fails the whole import.

use std::collections::BTreeMap;
use std::io::{Read, Seek};

use calamine::{Reader, Xlsx, open_workbook_from_rs};
use flow_core::entities::ChecklistItem;
use serde::Serialize;

use crate::error::{MatrixError, RowRejection};
use crate::matrix::{AuditMatrix, AuditTypeItems};

const REQUIRED_COLUMNS: [&str; 4] = ["clause", "auditType", "description", "objective"];

/// A schema-checked matrix row.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MatrixRow {
    pub id: Option<String>,
    pub audit_type: String,
    pub clause: String,
    pub objective: String,
    pub description: String,
    pub required: bool,
    pub subtypes: Vec<String>,
}

struct Columns {
    clause: usize,
    audit_type: usize,
    description: usize,
    objective: usize,
    required: Option<usize>,
    subtype: Option<usize>,
    id: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &[String]) -> Result<Self, MatrixError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|c| find(c).is_none())
            .map(|c| (*c).to_string())
            .collect();
        match (
            find("clause"),
            find("auditType"),
            find("description"),
            find("objective"),
        ) {
            (Some(clause), Some(audit_type), Some(description), Some(objective)) => Ok(Self {
                clause,
                audit_type,
                description,
                objective,
                required: find("required"),
                subtype: find("subtype"),
                id: find("id"),
            }),
            _ => Err(MatrixError::MissingColumns(missing)),
        }
    }
}

fn cell(record: &[String], idx: usize) -> &str {
    record.get(idx).map_or("", |c| c.trim())
}

fn parse_required(raw: &str) -> bool {
    matches!(raw.to_ascii_lowercase().as_str(), "yes" | "true" | "1")
}

fn validate_row(
    row: usize,
    record: &[String],
    cols: &Columns,
) -> Result<MatrixRow, RowRejection> {
    let reject = |reason: String| RowRejection { row, reason };

    let empty: Vec<&str> = [
        ("clause", cols.clause),
        ("auditType", cols.audit_type),
        ("description", cols.description),
        ("objective", cols.objective),
    ]
    .into_iter()
    .filter(|(_, idx)| cell(record, *idx).is_empty())
    .map(|(name, _)| name)
    .collect();
    if !empty.is_empty() {
        return Err(reject(format!("empty {}", empty.join(", "))));
    }

    Ok(MatrixRow {
        id: cols
            .id
            .map(|i| cell(record, i))
            .filter(|s| !s.is_empty())
            .map(ToString::to_string),
        audit_type: cell(record, cols.audit_type).to_lowercase(),
        clause: cell(record, cols.clause).to_string(),
        objective: cell(record, cols.objective).to_string(),
        description: cell(record, cols.description).to_string(),
        required: cols.required.is_some_and(|i| parse_required(cell(record, i))),
        subtypes: cols
            .subtype
            .map(|i| {
                cell(record, i)
                    .split(';')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default(),
    })
}

fn parse_table<I>(headers: &[String], records: I) -> Result<Vec<MatrixRow>, MatrixError>
where
    I: IntoIterator<Item = Result<Vec<String>, MatrixError>>,
{
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(MatrixError::Empty);
    }
    let cols = Columns::from_headers(headers)?;

    let mut rows = Vec::new();
    let mut rejections = Vec::new();
    for (idx, record) in records.into_iter().enumerate() {
        let record = record?;
        if record.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        match validate_row(idx + 1, &record, &cols) {
            Ok(row) => rows.push(row),
            Err(rejection) => {
                tracing::warn!(row = rejection.row, reason = %rejection.reason, "matrix row rejected");
                rejections.push(rejection);
            }
        }
    }

    if !rejections.is_empty() {
        return Err(MatrixError::InvalidRows(rejections));
    }
    if rows.is_empty() {
        return Err(MatrixError::Empty);
    }
    Ok(rows)
}

/// Parse and schema-check a matrix CSV.
///
/// # Errors
///
/// - `MatrixError::Empty` when there are no data rows.
/// - `MatrixError::MissingColumns` listing every absent required column.
/// - `MatrixError::InvalidRows` with every rejected row.
/// - `MatrixError::Csv` for malformed CSV.
pub fn parse_matrix_csv<R: Read>(reader: R) -> Result<Vec<MatrixRow>, MatrixError> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers: Vec<String> = rdr.headers()?.iter().map(ToString::to_string).collect();
    let records = rdr.records().map(|record| {
        record
            .map(|r| r.iter().map(ToString::to_string).collect())
            .map_err(MatrixError::from)
    });
    parse_table(&headers, records)
}

/// Parse and schema-check the first worksheet of an `.xlsx` workbook.
///
/// The first row is the header. Cells are read as their displayed text, so
/// numbers and booleans are accepted wherever text is.
///
/// # Errors
///
/// As [`parse_matrix_csv`], with `MatrixError::Xlsx` for an unreadable
/// workbook and `MatrixError::Empty` for a workbook without sheets.
pub fn parse_matrix_xlsx<R: Read + Seek>(reader: R) -> Result<Vec<MatrixRow>, MatrixError> {
    let mut workbook: Xlsx<R> = open_workbook_from_rs(reader)?;
    let range = workbook.worksheet_range_at(0).ok_or(MatrixError::Empty)??;
    let mut rows = range
        .rows()
        .map(|row| row.iter().map(ToString::to_string).collect::<Vec<String>>());
    let Some(headers) = rows.next() else {
        return Err(MatrixError::Empty);
    };
    parse_table(&headers, rows.map(Ok))
}

fn next_free_id(audit_type: &str, items: &[ChecklistItem]) -> String {
    (items.len() + 1..)
        .map(|n| format!("{audit_type}-{n}"))
        .find(|id| items.iter().all(|i| &i.id != id))
        .unwrap_or_default()
}

impl AuditMatrix {
    /// Assemble a matrix from validated rows.
    ///
    /// Rows without an id get `<auditType>-<n>`, `n` counting that type's
    /// items from 1 and skipping numbers an explicit id already took. Each listed subtype adds the item to its mapping.
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::Empty` for no rows and `MatrixError::DuplicateId`
    /// when two items of one type share an id.
    pub fn from_rows(rows: Vec<MatrixRow>) -> Result<Self, MatrixError> {
        if rows.is_empty() {
            return Err(MatrixError::Empty);
        }
        let mut types: Vec<AuditTypeItems> = Vec::new();
        let mut subtypes: BTreeMap<String, BTreeMap<String, Vec<String>>> = BTreeMap::new();

        for row in rows {
            let pos = if let Some(pos) = types.iter().position(|t| t.audit_type == row.audit_type) {
                pos
            } else {
                types.push(AuditTypeItems {
                    audit_type: row.audit_type.clone(),
                    items: Vec::new(),
                });
                types.len() - 1
            };
            let bucket = &mut types[pos];
            let id = match row.id {
                Some(id) => id,
                None => next_free_id(&row.audit_type, &bucket.items),
            };
            if bucket.items.iter().any(|i| i.id == id) {
                return Err(MatrixError::DuplicateId {
                    audit_type: row.audit_type,
                    id,
                });
            }
            for subtype in row.subtypes {
                subtypes
                    .entry(row.audit_type.clone())
                    .or_default()
                    .entry(subtype)
                    .or_default()
                    .push(id.clone());
            }
            bucket.items.push(ChecklistItem {
                id,
                clause: row.clause,
                objective: row.objective,
                description: row.description,
                required: row.required,
            });
        }

        Ok(Self::from_parts(types, subtypes))
    }

    /// Parse the first sheet of an `.xlsx` workbook and assemble it.
    ///
    /// # Errors
    ///
    /// Any error from [`parse_matrix_xlsx`] or [`Self::from_rows`].
    pub fn from_xlsx<R: Read + Seek>(reader: R) -> Result<Self, MatrixError> {
        let matrix = Self::from_rows(parse_matrix_xlsx(reader)?)?;
        tracing::info!(items = matrix.item_count(), "matrix imported from workbook");
        Ok(matrix)
    }

    /// Parse a matrix CSV and assemble it in one step.
    ///
    /// # Errors
    ///
    /// Any error from [`parse_matrix_csv`] or [`Self::from_rows`].
    pub fn from_csv<R: Read>(reader: R) -> Result<Self, MatrixError> {
        let matrix = Self::from_rows(parse_matrix_csv(reader)?)?;
        tracing::info!(items = matrix.item_count(), "matrix imported");
        Ok(matrix)
    }
}
