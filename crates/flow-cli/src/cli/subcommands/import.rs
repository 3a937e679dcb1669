use clap::Subcommand;

/// Import commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ImportCommands {
    /// Replace the audit matrix from a CSV or `.xlsx` file.
    Matrix { path: String },
    /// Add historical findings from a CSV file.
    Historical { path: String },
    /// Remove all historical findings.
    ClearHistorical,
    /// Apply a checklist CSV (as exported) to an audit's findings.
    Checklist { reference: String, path: String },
}
