use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Audit { action } => commands::audit::handle(&action, ctx, flags),
        Commands::Checklist { action } => commands::checklist::handle(&action, ctx, flags),
        Commands::Finding { action } => commands::finding::handle(&action, ctx, flags).await,
        Commands::Import { action } => commands::import::handle(&action, ctx, flags).await,
        Commands::Export { action } => commands::export::handle(&action, ctx, flags).await,
        Commands::User { action } => commands::user::handle(&action, ctx, flags),
        Commands::Template { action } => commands::template::handle(&action, ctx, flags),
        Commands::Pref { action } => commands::pref::handle(&action, ctx, flags),
        Commands::Metrics(args) => commands::metrics::handle(&args, ctx, flags),
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use flow_config::FlowConfig;
    use flow_core::enums::AuditStatus;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::dispatch;
    use crate::cli::Cli;
    use crate::context::AppContext;

    async fn run(ctx: &AppContext, args: &[&str]) -> anyhow::Result<()> {
        let cli = Cli::try_parse_from(
            ["auditflow", "--today", "2025-01-15"]
                .iter()
                .chain(args)
                .copied(),
        )?;
        let flags = cli.global_flags();
        dispatch(cli.command, ctx, &flags).await
    }

    fn context(dir: &TempDir) -> AppContext {
        let mut config = FlowConfig::default();
        config.storage.trail = false;
        config.general.export_dir = dir.path().join("exports").display().to_string();
        let cli = Cli::try_parse_from([
            "auditflow",
            "--data-dir",
            &dir.path().join("data").display().to_string(),
            "metrics",
        ])
        .unwrap();
        AppContext::init(config, &cli.global_flags()).unwrap()
    }

    #[tokio::test]
    async fn audit_checklist_and_export_flow() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);

        run(&ctx, &["user", "create", "alice", "--role", "Auditor"]).await.unwrap();
        run(
            &ctx,
            &[
                "audit", "create", "--name", "Hangar 2", "--type", "compliance", "--start",
                "2025-01-10", "--end", "2025-01-20",
            ],
        )
        .await
        .unwrap();
        run(&ctx, &["audit", "assign", "AUD-2025-001", "alice", "--lead"]).await.unwrap();
        run(&ctx, &["finding", "flag", "AUD-2025-001", "c-1", "true"]).await.unwrap();
        run(&ctx, &["finding", "text", "AUD-2025-001", "c-1", "Scope exceeded"])
            .await
            .unwrap();
        run(&ctx, &["checklist", "submit", "AUD-2025-001"]).await.unwrap();
        run(&ctx, &["export", "checklist", "AUD-2025-001", "--csv"]).await.unwrap();

        let audit = ctx.service.get_audit("AUD-2025-001").unwrap();
        assert_eq!(audit.status, AuditStatus::OnSite);
        assert_eq!(audit.assigned_users.len(), 1);
        let findings = ctx.service.load_findings("AUD-2025-001").unwrap();
        assert!(findings.iter().any(|f| f.checklist_item_id == "c-1" && f.finding_identified()));
        assert!(dir.path().join("exports/AUD-2025-001_checklist.csv").exists());
    }

    #[tokio::test]
    async fn close_requires_an_open_audit_on_site_or_later() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);
        run(&ctx, &["audit", "create", "--name", "Later", "--type", "product"])
            .await
            .unwrap();
        let err = run(&ctx, &["audit", "close", "AUD-2025-001"]).await.unwrap_err();
        assert!(err.to_string().contains("Preparation"));
    }

    #[tokio::test]
    async fn exported_matrix_workbook_imports_back() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);
        let path = dir.path().join("matrix.xlsx").display().to_string();
        run(&ctx, &["export", "matrix", "--out", &path]).await.unwrap();
        run(&ctx, &["import", "matrix", &path]).await.unwrap();

        assert!(ctx.service.has_custom_matrix().unwrap());
        let matrix = ctx.service.active_matrix().unwrap();
        assert_eq!(matrix.item_count(), 48);
        assert_eq!(matrix.resolve("compliance", Some("QA")).len(), 6);
    }

    #[tokio::test]
    async fn unknown_audit_is_an_error() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);
        assert!(run(&ctx, &["audit", "get", "AUD-1999-001"]).await.is_err());
    }
}
