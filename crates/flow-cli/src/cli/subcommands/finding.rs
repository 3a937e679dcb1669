use clap::Subcommand;

/// Finding edit commands. Each addresses one checklist item of one audit.
#[derive(Clone, Debug, Subcommand)]
pub enum FindingCommands {
    /// Mark whether a finding was identified.
    Flag {
        reference: String,
        item: String,
        #[arg(action = clap::ArgAction::Set)]
        value: bool,
    },
    /// Set finding text.
    Text {
        reference: String,
        item: String,
        text: String,
    },
    /// Set observation text.
    Observation {
        reference: String,
        item: String,
        text: String,
    },
    /// Set the finding level: "Level 1", "Level 2" or "Observation".
    Level {
        reference: String,
        item: String,
        level: String,
    },
    /// Attach a file.
    Attach {
        reference: String,
        item: String,
        path: String,
    },
    /// Remove an attachment by position.
    Detach {
        reference: String,
        item: String,
        index: usize,
    },
    /// Replace supporting records from a JSON file of `{"kind", "records"}`.
    Supporting {
        reference: String,
        item: String,
        path: String,
    },
}
