use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    AuditCommands, ChecklistCommands, ExportCommands, FindingCommands, ImportCommands,
    PrefCommands, TemplateCommands, UserCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Audits and their lifecycle.
    Audit {
        #[command(subcommand)]
        action: AuditCommands,
    },
    /// Checklist resolution, review and submission.
    Checklist {
        #[command(subcommand)]
        action: ChecklistCommands,
    },
    /// Edit the finding for one checklist item.
    Finding {
        #[command(subcommand)]
        action: FindingCommands,
    },
    /// Import the audit matrix, historical findings or a filled checklist.
    Import {
        #[command(subcommand)]
        action: ImportCommands,
    },
    /// Spreadsheet exports.
    Export {
        #[command(subcommand)]
        action: ExportCommands,
    },
    /// Users.
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// Audit templates.
    Template {
        #[command(subcommand)]
        action: TemplateCommands,
    },
    /// Preferences: theme and current user.
    Pref {
        #[command(subcommand)]
        action: PrefCommands,
    },
    /// KPI duration and auditor workload metrics.
    Metrics(MetricsArgs),
}

#[derive(Clone, Debug, Args)]
pub struct MetricsArgs {
    /// Only audits of this type
    #[arg(long = "type")]
    pub audit_type: Option<String>,
}
