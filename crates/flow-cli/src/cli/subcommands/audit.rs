use chrono::NaiveDate;
use clap::Subcommand;

/// Audit commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuditCommands {
    /// Create an audit. The reference is generated when omitted.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long = "type")]
        audit_type: String,
        #[arg(long)]
        subtype: Option<String>,
        #[arg(long)]
        reference: Option<String>,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        start: Option<NaiveDate>,
        #[arg(long)]
        end: Option<NaiveDate>,
        #[arg(long)]
        objective: Option<String>,
        #[arg(long)]
        scope: Option<String>,
        #[arg(long)]
        introduction: Option<String>,
    },
    /// Get an audit by reference.
    Get { reference: String },
    /// List audits.
    List {
        #[arg(long)]
        status: Option<String>,
        #[arg(long = "type")]
        audit_type: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Update an audit. Empty strings clear optional fields.
    Update {
        reference: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        subtype: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        start: Option<NaiveDate>,
        #[arg(long)]
        end: Option<NaiveDate>,
        /// Remove the start date
        #[arg(long, conflicts_with = "start")]
        clear_start: bool,
        /// Remove the end date
        #[arg(long, conflicts_with = "end")]
        clear_end: bool,
        #[arg(long)]
        objective: Option<String>,
        #[arg(long)]
        scope: Option<String>,
        #[arg(long)]
        introduction: Option<String>,
    },
    /// Delete an audit and its findings.
    Delete { reference: String },
    /// Assign a user (id or username) to an audit.
    Assign {
        reference: String,
        user: String,
        /// Assign as lead auditor, replacing the current lead
        #[arg(long)]
        lead: bool,
    },
    /// Remove a user from an audit.
    Unassign { reference: String, user: String },
    /// Re-derive the status of every open audit.
    Refresh,
    /// Close an audit after report generation.
    Close { reference: String },
}
