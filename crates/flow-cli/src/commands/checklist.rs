use flow_core::entities::ChecklistItem;
use flow_core::enums::FindingLevel;
use serde::Serialize;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ChecklistCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResolveResponse {
    audit_type: String,
    subtype: Option<String>,
    items: Vec<ChecklistItem>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AuditTypeSummary {
    audit_type: String,
    items: usize,
    subtypes: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChecklistEntry {
    id: String,
    clause: String,
    required: bool,
    has_finding: bool,
    finding_level: FindingLevel,
    finding: String,
    observation: String,
    is_historical: bool,
    attachments: usize,
}

#[derive(Debug, Serialize)]
struct ChecklistResponse {
    reference: String,
    items: Vec<ChecklistEntry>,
}

/// Handle `auditflow checklist`.
pub fn handle(
    action: &ChecklistCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let svc = &ctx.service;
    match action {
        ChecklistCommands::Resolve {
            audit_type,
            subtype,
        } => {
            let matrix = svc.active_matrix()?;
            let items = matrix.resolve(audit_type, subtype.as_deref());
            if items.is_empty() {
                tracing::warn!(audit_type, "no checklist items for this audit type");
            }
            output(
                &ResolveResponse {
                    audit_type: audit_type.to_lowercase(),
                    subtype: subtype.clone(),
                    items,
                },
                flags.format,
            )
        }
        ChecklistCommands::Types => {
            if svc.has_custom_matrix()? {
                tracing::info!("listing audit types from the imported matrix");
            }
            let matrix = svc.active_matrix()?;
            let types: Vec<AuditTypeSummary> = matrix
                .audit_types()
                .map(|t| AuditTypeSummary {
                    audit_type: t.to_string(),
                    items: matrix.resolve(t, None).len(),
                    subtypes: matrix.subtypes_for(t).into_iter().map(String::from).collect(),
                })
                .collect();
            output(&types, flags.format)
        }
        ChecklistCommands::Show { reference } => {
            let matrix = svc.active_matrix()?;
            let session = svc.open_checklist(reference, &matrix, flags.today())?;
            let items = session
                .checklist()
                .iter()
                .map(|item| {
                    let finding = session.findings().get(&item.id).cloned().unwrap_or_default();
                    ChecklistEntry {
                        id: item.id.clone(),
                        clause: item.clause.clone(),
                        required: item.required,
                        has_finding: finding.has_finding,
                        finding_level: finding.finding_level,
                        finding: finding.finding,
                        observation: finding.observation,
                        is_historical: finding.is_historical,
                        attachments: finding.attachments.len(),
                    }
                })
                .collect();
            output(
                &ChecklistResponse {
                    reference: reference.clone(),
                    items,
                },
                flags.format,
            )
        }
        ChecklistCommands::Submit { reference } => {
            let matrix = svc.active_matrix()?;
            output(
                &svc.submit_checklist(reference, &matrix, flags.today())?,
                flags.format,
            )
        }
        ChecklistCommands::ResetMatrix => {
            let reset = svc.reset_matrix()?;
            output(&json!({ "reset": reset }), flags.format)
        }
    }
}
