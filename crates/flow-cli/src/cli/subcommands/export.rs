use clap::Subcommand;

/// Export commands. Files go to `general.export_dir` unless `--out` is set.
#[derive(Clone, Debug, Subcommand)]
pub enum ExportCommands {
    /// One audit's checklist and findings.
    Checklist {
        reference: String,
        #[arg(long)]
        out: Option<String>,
        /// Write CSV instead of XLSX
        #[arg(long)]
        csv: bool,
    },
    /// Audits, users and templates workbook.
    All {
        #[arg(long)]
        out: Option<String>,
    },
    /// The active audit matrix.
    Matrix {
        #[arg(long)]
        out: Option<String>,
        /// Write CSV instead of XLSX
        #[arg(long)]
        csv: bool,
    },
}
