use flow_core::entities::Audit;
use flow_core::enums::AuditStatus;
use flow_core::lifecycle::refresh_status;
use flow_store::NewAudit;
use flow_store::updates::audit::AuditUpdateBuilder;
use serde::Serialize;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuditCommands;
use crate::commands::shared::limit::{effective_limit, truncate};
use crate::commands::shared::parse::{clearable, parse_enum};
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct AuditListResponse {
    audits: Vec<Audit>,
}

/// The audit as of `--today`. Reads never write the refreshed status back.
fn as_of(mut audit: Audit, flags: &GlobalFlags) -> Audit {
    audit.status = refresh_status(audit.status, audit.start_date, audit.end_date, flags.today());
    audit
}

/// Handle `auditflow audit`.
pub fn handle(action: &AuditCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let svc = &ctx.service;
    match action {
        AuditCommands::Create {
            name,
            audit_type,
            subtype,
            reference,
            description,
            start,
            end,
            objective,
            scope,
            introduction,
        } => {
            let audit = svc.create_audit(
                NewAudit {
                    reference: reference.clone(),
                    name: name.clone(),
                    audit_type: audit_type.clone(),
                    subtype: subtype.clone(),
                    description: description.clone(),
                    start_date: *start,
                    end_date: *end,
                    objective: objective.clone(),
                    scope: scope.clone(),
                    introduction: introduction.clone(),
                },
                flags.today(),
            )?;
            output(&audit, flags.format)
        }
        AuditCommands::Get { reference } => {
            output(&as_of(svc.get_audit(reference)?, flags), flags.format)
        }
        AuditCommands::List {
            status,
            audit_type,
            limit,
        } => {
            let status = status
                .as_deref()
                .map(parse_enum::<AuditStatus>)
                .transpose()?;
            let mut audits: Vec<Audit> = svc
                .list_audits()?
                .into_iter()
                .map(|a| as_of(a, flags))
                .filter(|a| status.is_none_or(|s| a.status == s))
                .filter(|a| {
                    audit_type
                        .as_deref()
                        .is_none_or(|t| a.audit_type.eq_ignore_ascii_case(t))
                })
                .collect();
            let limit = effective_limit(*limit, flags.limit, ctx.config.general.default_limit);
            truncate(&mut audits, limit);
            output(&AuditListResponse { audits }, flags.format)
        }
        AuditCommands::Update {
            reference,
            name,
            subtype,
            description,
            start,
            end,
            clear_start,
            clear_end,
            objective,
            scope,
            introduction,
        } => {
            let mut builder = AuditUpdateBuilder::new();
            if let Some(name) = name {
                builder = builder.name(name);
            }
            if let Some(subtype) = clearable(subtype.as_ref()) {
                builder = builder.subtype(subtype);
            }
            if let Some(description) = description {
                builder = builder.description(description);
            }
            if start.is_some() || *clear_start {
                builder = builder.start_date(*start);
            }
            if end.is_some() || *clear_end {
                builder = builder.end_date(*end);
            }
            if let Some(objective) = clearable(objective.as_ref()) {
                builder = builder.objective(objective);
            }
            if let Some(scope) = clearable(scope.as_ref()) {
                builder = builder.scope(scope);
            }
            if let Some(introduction) = clearable(introduction.as_ref()) {
                builder = builder.introduction(introduction);
            }
            let audit = svc.update_audit(reference, &builder.build(), flags.today())?;
            output(&audit, flags.format)
        }
        AuditCommands::Delete { reference } => {
            svc.delete_audit(reference)?;
            output(&json!({ "deleted": reference }), flags.format)
        }
        AuditCommands::Assign {
            reference,
            user,
            lead,
        } => {
            let user = svc.find_user(user)?;
            output(&svc.assign_user(reference, &user.id, *lead)?, flags.format)
        }
        AuditCommands::Unassign { reference, user } => {
            let user = svc.find_user(user)?;
            output(&svc.unassign_user(reference, &user.id)?, flags.format)
        }
        AuditCommands::Refresh => output(&svc.refresh_statuses(flags.today())?, flags.format),
        AuditCommands::Close { reference } => {
            let matrix = svc.active_matrix()?;
            output(
                &svc.close_audit(reference, flags.today(), &matrix)?,
                flags.format,
            )
        }
    }
}
