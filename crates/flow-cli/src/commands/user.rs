use flow_core::entities::User;
use flow_core::enums::UserRole;
use flow_store::updates::user::UserUpdateBuilder;
use serde::Serialize;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::UserCommands;
use crate::commands::shared::limit::{effective_limit, truncate};
use crate::commands::shared::parse::{clearable, parse_enum};
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct UserListResponse {
    users: Vec<User>,
}

/// Handle `auditflow user`.
pub fn handle(action: &UserCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let svc = &ctx.service;
    match action {
        UserCommands::Create {
            username,
            role,
            admin,
        } => {
            let user = svc.create_user(username, parse_enum::<UserRole>(role)?, *admin)?;
            output(&user, flags.format)
        }
        UserCommands::Get { user } => output(&svc.find_user(user)?, flags.format),
        UserCommands::List { role, limit } => {
            let role = role.as_deref().map(parse_enum::<UserRole>).transpose()?;
            let mut users: Vec<User> = svc
                .list_users()?
                .into_iter()
                .filter(|u| role.is_none_or(|r| u.role == r))
                .collect();
            let limit = effective_limit(*limit, flags.limit, ctx.config.general.default_limit);
            truncate(&mut users, limit);
            output(&UserListResponse { users }, flags.format)
        }
        UserCommands::Update {
            user,
            username,
            role,
            admin,
            theme,
        } => {
            let target = svc.find_user(user)?;
            let mut builder = UserUpdateBuilder::new();
            if let Some(username) = username {
                builder = builder.username(username);
            }
            if let Some(role) = role {
                builder = builder.role(parse_enum::<UserRole>(role)?);
            }
            if let Some(admin) = admin {
                builder = builder.is_admin(*admin);
            }
            if let Some(theme) = clearable(theme.as_ref()) {
                builder = builder.theme(theme);
            }
            output(&svc.update_user(&target.id, &builder.build())?, flags.format)
        }
        UserCommands::Delete { user } => {
            let target = svc.find_user(user)?;
            svc.delete_user(&target.id)?;
            output(&json!({ "deleted": target.id }), flags.format)
        }
        UserCommands::Login { user } => {
            let target = svc.find_user(user)?;
            output(&svc.record_login(&target.id)?, flags.format)
        }
        UserCommands::Usage { user, seconds } => {
            let target = svc.find_user(user)?;
            output(&svc.add_usage(&target.id, *seconds)?, flags.format)
        }
    }
}
