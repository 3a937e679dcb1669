use clap::Subcommand;

/// Preference commands.
#[derive(Clone, Debug, Subcommand)]
pub enum PrefCommands {
    /// Show or set the theme.
    Theme { value: Option<String> },
    /// Show the current user.
    Whoami,
    /// Sign out.
    Logout,
}
