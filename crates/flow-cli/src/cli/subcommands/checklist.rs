use clap::Subcommand;

/// Checklist commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ChecklistCommands {
    /// Resolve the checklist for an audit type and optional subtype.
    Resolve {
        #[arg(long = "type")]
        audit_type: String,
        #[arg(long)]
        subtype: Option<String>,
    },
    /// List audit types and their subtypes.
    Types,
    /// Show an audit's checklist with its current findings.
    Show { reference: String },
    /// Validate and submit an audit's checklist.
    Submit { reference: String },
    /// Discard the imported matrix and return to the built-in one.
    ResetMatrix,
}
