use std::path::PathBuf;

use flow_core::responses::ExportResponse;
use flow_export::{
    Workbook, checklist_workbook, matrix_workbook, to_all_data_workbook, write_csv, xlsx_bytes,
};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ExportCommands;
use crate::commands::shared::files::write_output;
use crate::context::AppContext;
use crate::output::output;

async fn save(workbook: &Workbook, path: PathBuf, csv: bool) -> anyhow::Result<ExportResponse> {
    let bytes = if csv {
        let sheet = workbook
            .sheets
            .first()
            .ok_or_else(|| anyhow::anyhow!("nothing to export"))?;
        let mut buf = Vec::new();
        write_csv(sheet, &mut buf)?;
        buf
    } else {
        xlsx_bytes(workbook)?
    };
    write_output(&path, &bytes).await?;
    tracing::info!(path = %path.display(), rows = workbook.row_count(), "export written");
    Ok(ExportResponse {
        path: path.display().to_string(),
        sheets: workbook.sheet_names(),
        rows: workbook.row_count(),
    })
}

fn out_path(ctx: &AppContext, out: Option<&String>, default_name: &str) -> PathBuf {
    out.map_or_else(|| ctx.export_path(default_name), PathBuf::from)
}

const fn extension(csv: bool) -> &'static str {
    if csv { "csv" } else { "xlsx" }
}

/// Handle `auditflow export`.
pub async fn handle(
    action: &ExportCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let svc = &ctx.service;
    let response = match action {
        ExportCommands::Checklist { reference, out, csv } => {
            let audit = svc.get_audit(reference)?;
            let matrix = svc.active_matrix()?;
            let session = svc.open_checklist(reference, &matrix, flags.today())?;
            let workbook = checklist_workbook(
                &audit,
                session.checklist(),
                session.findings(),
                flags.today(),
            );
            let name = format!("{}_checklist.{}", audit.reference, extension(*csv));
            save(&workbook, out_path(ctx, out.as_ref(), &name), *csv).await?
        }
        ExportCommands::All { out } => {
            let workbook = to_all_data_workbook(
                &svc.list_users()?,
                &svc.list_audits()?,
                &svc.list_templates()?,
            );
            save(
                &workbook,
                out_path(ctx, out.as_ref(), "auditflow_data.xlsx"),
                false,
            )
            .await?
        }
        ExportCommands::Matrix { out, csv } => {
            let workbook = matrix_workbook(&svc.active_matrix()?);
            let name = format!("audit_matrix.{}", extension(*csv));
            save(&workbook, out_path(ctx, out.as_ref(), &name), *csv).await?
        }
    };
    output(&response, flags.format)
}
