use clap::Subcommand;

/// Audit template commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TemplateCommands {
    /// Create or replace the template for an audit type.
    Set {
        audit_type: String,
        #[arg(long)]
        subtype: Option<String>,
        #[arg(long, default_value = "")]
        objective: String,
        #[arg(long, default_value = "")]
        scope: String,
        #[arg(long, default_value = "")]
        introduction: String,
    },
    /// Get the template for an audit type.
    Get { audit_type: String },
    /// List templates.
    List,
    /// Delete the template for an audit type.
    Delete { audit_type: String },
}
