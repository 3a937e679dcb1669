use clap::Subcommand;

/// User commands. `user` accepts an id or a username.
#[derive(Clone, Debug, Subcommand)]
pub enum UserCommands {
    /// Create a user.
    Create {
        username: String,
        /// General, Auditor, "Lead Auditor" or Admin
        #[arg(long, default_value = "General")]
        role: String,
        #[arg(long)]
        admin: bool,
    },
    /// Get a user.
    Get { user: String },
    /// List users.
    List {
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Update a user.
    Update {
        user: String,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        admin: Option<bool>,
        #[arg(long)]
        theme: Option<String>,
    },
    /// Delete a user and remove their audit assignments.
    Delete { user: String },
    /// Sign in as a user.
    Login { user: String },
    /// Add usage time in seconds.
    Usage { user: String, seconds: u64 },
}
