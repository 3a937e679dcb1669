use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::PrefCommands;
use crate::context::AppContext;
use crate::output::output;

const DEFAULT_THEME: &str = "light";

/// Handle `auditflow pref`.
pub fn handle(action: &PrefCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let svc = &ctx.service;
    match action {
        PrefCommands::Theme { value: Some(theme) } => {
            svc.set_theme(theme)?;
            output(&json!({ "theme": theme.trim() }), flags.format)
        }
        PrefCommands::Theme { value: None } => {
            let theme = svc.theme()?.unwrap_or_else(|| DEFAULT_THEME.to_string());
            output(&json!({ "theme": theme }), flags.format)
        }
        PrefCommands::Whoami => output(&json!({ "user": svc.current_user()? }), flags.format),
        PrefCommands::Logout => {
            svc.clear_current_user()?;
            output(&json!({ "user": null }), flags.format)
        }
    }
}
