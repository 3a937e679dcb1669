use flow_core::entities::AuditTemplate;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TemplateCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `auditflow template`.
pub fn handle(
    action: &TemplateCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let svc = &ctx.service;
    match action {
        TemplateCommands::Set {
            audit_type,
            subtype,
            objective,
            scope,
            introduction,
        } => {
            let created = svc.save_template(AuditTemplate {
                audit_type: audit_type.clone(),
                subtype: subtype.clone(),
                objective: objective.clone(),
                scope: scope.clone(),
                introduction: introduction.clone(),
            })?;
            let template = svc.get_template(audit_type)?;
            output(
                &json!({ "created": created, "template": template }),
                flags.format,
            )
        }
        TemplateCommands::Get { audit_type } => {
            output(&svc.get_template(audit_type)?, flags.format)
        }
        TemplateCommands::List => output(&svc.list_templates()?, flags.format),
        TemplateCommands::Delete { audit_type } => {
            svc.delete_template(audit_type)?;
            output(&json!({ "deleted": audit_type }), flags.format)
        }
    }
}
