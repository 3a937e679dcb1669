use std::io::Cursor;
use std::path::Path;

use anyhow::Context;
use flow_core::responses::ImportSummary;
use flow_export::read_checklist_csv;
use flow_findings::parse_historical_csv;
use flow_matrix::AuditMatrix;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ImportCommands;
use crate::commands::shared::files::read_input;
use crate::context::AppContext;
use crate::output::output;

/// `.xlsx` files are read as workbooks; anything else as CSV.
fn is_workbook(path: &str) -> bool {
    Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"))
}

/// Handle `auditflow import`.
pub async fn handle(
    action: &ImportCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let svc = &ctx.service;
    match action {
        ImportCommands::Matrix { path } => {
            let bytes = read_input(path).await?;
            let matrix = if is_workbook(path) {
                AuditMatrix::from_xlsx(Cursor::new(bytes))
            } else {
                AuditMatrix::from_csv(bytes.as_slice())
            }
            .with_context(|| format!("matrix import from {path} rejected"))?;
            svc.save_matrix(&matrix)?;
            output(
                &ImportSummary {
                    source: path.clone(),
                    imported: matrix.item_count(),
                    ..ImportSummary::default()
                },
                flags.format,
            )
        }
        ImportCommands::Historical { path } => {
            let bytes = read_input(path).await?;
            let import = parse_historical_csv(bytes.as_slice())
                .with_context(|| format!("historical import from {path} rejected"))?;
            output(&svc.import_historical(path, import)?, flags.format)
        }
        ImportCommands::ClearHistorical => {
            let removed = svc.clear_historical()?;
            output(&json!({ "removed": removed }), flags.format)
        }
        ImportCommands::Checklist { reference, path } => {
            let bytes = read_input(path).await?;
            let rows = read_checklist_csv(bytes.as_slice())
                .with_context(|| format!("checklist import from {path} rejected"))?;

            let matrix = svc.active_matrix()?;
            let mut session = svc.open_checklist(reference, &matrix, flags.today())?;
            let mut summary = ImportSummary {
                source: path.clone(),
                ..ImportSummary::default()
            };
            for row in rows {
                let item_id = session
                    .checklist()
                    .iter()
                    .find(|item| item.clause.trim().eq_ignore_ascii_case(row.clause.trim()))
                    .map(|item| item.id.clone());
                let Some(item_id) = item_id else {
                    tracing::warn!(clause = %row.clause, "no checklist item for clause, skipped");
                    summary.skipped += 1;
                    continue;
                };
                let identified = row.finding_identified.trim().eq_ignore_ascii_case("yes");
                session.set_has_finding(&item_id, identified)?;
                session.edit_finding_text(&item_id, &row.finding_details)?;
                session.edit_observation(&item_id, &row.observations)?;
                summary.imported += 1;
            }
            session.commit_text()?;
            tracing::info!(reference, imported = summary.imported, "checklist imported");
            output(&summary, flags.format)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::is_workbook;

    #[test]
    fn reader_follows_extension() {
        assert!(is_workbook("matrix.xlsx"));
        assert!(is_workbook("exports/Matrix.XLSX"));
        assert!(!is_workbook("matrix.csv"));
        assert!(!is_workbook("xlsx"));
    }
}
