//! XLSX and CSV rendering of a [`Workbook`].

use std::io::{Read, Write};
use std::path::Path;

use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook};

use crate::error::ExportError;
use crate::rows::{ChecklistRow, Tabular};
use crate::workbook::{Sheet, Workbook};

fn row_index(sheet: &Sheet, idx: usize) -> Result<u32, ExportError> {
    u32::try_from(idx).map_err(|_| ExportError::TooLarge {
        sheet: sheet.name.clone(),
    })
}

fn col_index(sheet: &Sheet, idx: usize) -> Result<u16, ExportError> {
    u16::try_from(idx).map_err(|_| ExportError::TooLarge {
        sheet: sheet.name.clone(),
    })
}

fn build_xlsx(workbook: &Workbook) -> Result<XlsxWorkbook, ExportError> {
    let mut xlsx = XlsxWorkbook::new();
    let bold = Format::new().set_bold();

    for sheet in &workbook.sheets {
        let ws = xlsx.add_worksheet();
        ws.set_name(&sheet.name)?;

        let mut row = 0usize;
        for line in &sheet.preamble {
            ws.write_string(row_index(sheet, row)?, 0, line)?;
            row += 1;
        }
        for (col, header) in sheet.headers.iter().enumerate() {
            ws.write_string_with_format(row_index(sheet, row)?, col_index(sheet, col)?, header, &bold)?;
        }
        row += 1;
        for cells in &sheet.rows {
            for (col, value) in cells.iter().enumerate() {
                ws.write_string(row_index(sheet, row)?, col_index(sheet, col)?, value)?;
            }
            row += 1;
        }
        for (col, width) in sheet.column_widths.iter().enumerate() {
            ws.set_column_width(col_index(sheet, col)?, *width)?;
        }
    }
    Ok(xlsx)
}

/// Write the workbook as an `.xlsx` file.
///
/// # Errors
///
/// `ExportError::Xlsx` on any writer failure.
pub fn write_xlsx(workbook: &Workbook, path: &Path) -> Result<(), ExportError> {
    build_xlsx(workbook)?.save(path)?;
    tracing::info!(path = %path.display(), sheets = workbook.sheets.len(), "xlsx written");
    Ok(())
}

/// Render the workbook to `.xlsx` bytes.
///
/// # Errors
///
/// `ExportError::Xlsx` on any writer failure.
pub fn xlsx_bytes(workbook: &Workbook) -> Result<Vec<u8>, ExportError> {
    Ok(build_xlsx(workbook)?.save_to_buffer()?)
}

/// Write one sheet as CSV: preamble lines as single-cell rows, then the
/// header and data rows.
///
/// # Errors
///
/// `ExportError::Csv` or `ExportError::Io` on write failure.
pub fn write_csv<W: Write>(sheet: &Sheet, writer: W) -> Result<(), ExportError> {
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(writer);
    for line in &sheet.preamble {
        wtr.write_record([line])?;
    }
    wtr.write_record(&sheet.headers)?;
    for row in &sheet.rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Parse checklist rows back from CSV written by [`write_csv`], skipping any
/// preamble before the header row.
///
/// # Errors
///
/// `ExportError::MissingHeader` when no `Clause` header row exists, or
/// `ExportError::Csv` for malformed rows.
pub fn read_checklist_csv<R: Read>(reader: R) -> Result<Vec<ChecklistRow>, ExportError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let first = ChecklistRow::HEADERS[0];

    let mut headers: Option<csv::StringRecord> = None;
    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        if let Some(h) = &headers {
            rows.push(record.deserialize(Some(h))?);
        } else if record.get(0) == Some(first) {
            headers = Some(record);
        }
    }
    if headers.is_none() {
        return Err(ExportError::MissingHeader(first.to_string()));
    }
    Ok(rows)
}
