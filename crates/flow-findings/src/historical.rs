//! Historical findings CSV import.

use std::io::Read;

use chrono::{DateTime, Datelike, NaiveDate};
use flow_core::entities::HistoricalFinding;
use flow_core::enums::FindingLevel;

use crate::error::FindingError;

/// Rows parsed from a historical findings CSV.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoricalImport {
    pub records: Vec<HistoricalFinding>,
    /// Rows with neither a clause nor a reference.
    pub skipped: usize,
}

/// Outcome of merging imported records into the stored list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    pub imported: usize,
    pub duplicates: usize,
}

#[derive(Default)]
struct Columns {
    clause: Option<usize>,
    reference: Option<usize>,
    finding: Option<usize>,
    observation: Option<usize>,
    year: Option<usize>,
    date: Option<usize>,
    finding_level: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, FindingError> {
        let mut cols = Self::default();
        for (idx, header) in headers.iter().enumerate() {
            let key: String = header
                .chars()
                .filter(|c| !matches!(c, ' ' | '_' | '-'))
                .flat_map(char::to_lowercase)
                .collect();
            let slot = match key.as_str() {
                "clause" => &mut cols.clause,
                "reference" => &mut cols.reference,
                "finding" => &mut cols.finding,
                "observation" => &mut cols.observation,
                "year" => &mut cols.year,
                "date" => &mut cols.date,
                "findinglevel" | "level" => &mut cols.finding_level,
                _ => continue,
            };
            slot.get_or_insert(idx);
        }
        if cols.clause.is_none() && cols.reference.is_none() {
            return Err(FindingError::MissingColumns("clause or reference".into()));
        }
        Ok(cols)
    }
}

fn cell(record: &csv::StringRecord, idx: Option<usize>) -> Option<&str> {
    idx.and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Parse `YYYY-MM-DD`, an RFC 3339 timestamp or `DD/MM/YYYY`.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| NaiveDate::parse_from_str(raw, "%d/%m/%Y").ok())
}

/// Parse a historical findings CSV.
///
/// Headers match case-insensitively and ignore spaces, `_` and `-`;
/// unrecognized columns are ignored. A missing year is taken from the date.
///
/// # Errors
///
/// - `FindingError::MissingColumns` when neither `clause` nor `reference`
///   exists.
/// - `FindingError::InvalidRow` for an unparseable date or finding level.
///   Nothing is returned in that case.
pub fn parse_historical_csv<R: Read>(reader: R) -> Result<HistoricalImport, FindingError> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let cols = Columns::from_headers(rdr.headers()?)?;

    let mut import = HistoricalImport::default();
    for (idx, record) in rdr.records().enumerate() {
        let record = record?;
        let row = idx + 1;
        let clause = cell(&record, cols.clause);
        let reference = cell(&record, cols.reference);
        if clause.is_none() && reference.is_none() {
            tracing::warn!(row, "historical row has no clause or reference, skipped");
            import.skipped += 1;
            continue;
        }

        let date = match cell(&record, cols.date) {
            Some(raw) => Some(parse_date(raw).ok_or_else(|| FindingError::InvalidRow {
                row,
                reason: format!("unrecognized date '{raw}'"),
            })?),
            None => None,
        };
        let finding_level = match cell(&record, cols.finding_level) {
            Some(raw) => Some(raw.parse::<FindingLevel>().map_err(|e| {
                FindingError::InvalidRow {
                    row,
                    reason: e.to_string(),
                }
            })?),
            None => None,
        };
        let year = cell(&record, cols.year)
            .map(ToString::to_string)
            .or_else(|| date.map(|d| d.year().to_string()));

        import.records.push(HistoricalFinding {
            clause: clause.map(ToString::to_string),
            reference: reference.map(ToString::to_string),
            finding: cell(&record, cols.finding).unwrap_or_default().to_string(),
            observation: cell(&record, cols.observation)
                .unwrap_or_default()
                .to_string(),
            year,
            date,
            finding_level,
        });
    }
    Ok(import)
}

/// Append records not already present. Identical records are counted as
/// duplicates, including repeats within `incoming`.
pub fn merge_historical(
    stored: &mut Vec<HistoricalFinding>,
    incoming: Vec<HistoricalFinding>,
) -> MergeOutcome {
    let mut outcome = MergeOutcome::default();
    for record in incoming {
        if stored.contains(&record) {
            outcome.duplicates += 1;
        } else {
            stored.push(record);
            outcome.imported += 1;
        }
    }
    outcome
}
