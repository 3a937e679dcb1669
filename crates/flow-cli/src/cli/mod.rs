use chrono::NaiveDate;
use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `auditflow` binary.
#[derive(Debug, Parser)]
#[command(name = "auditflow", version, about = "AuditFlow - regulatory audit management")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Data directory (overrides storage.data_dir)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// Evaluate statuses as of this date (YYYY-MM-DD)
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
            data_dir: self.data_dir.clone(),
            today: self.today,
        }
    }
}
