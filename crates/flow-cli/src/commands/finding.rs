use anyhow::Context;
use flow_core::entities::SupportingData;
use flow_core::enums::{FindingLevel, SupportingKind};
use flow_core::ids::{
    PREFIX_COMPONENT, PREFIX_MAINTENANCE, PREFIX_STAFF, PREFIX_TOOL, generate_id,
};
use flow_findings::ChecklistFinding;
use serde::Serialize;
use serde_json::Value;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::FindingCommands;
use crate::commands::shared::files::{read_attachment, read_input};
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FindingResponse {
    reference: String,
    item: String,
    finding: ChecklistFinding,
}

fn id_prefix(kind: &str) -> Option<&'static str> {
    match kind {
        "staff" => Some(PREFIX_STAFF),
        "tools" => Some(PREFIX_TOOL),
        "components" => Some(PREFIX_COMPONENT),
        "maintenance" => Some(PREFIX_MAINTENANCE),
        _ => None,
    }
}

/// Parse a supporting-records file, generating ids for records without one.
fn parse_supporting(bytes: &[u8]) -> anyhow::Result<SupportingData> {
    let mut doc: Value =
        serde_json::from_slice(bytes).context("supporting records file is not valid JSON")?;
    let prefix = doc
        .get("kind")
        .and_then(Value::as_str)
        .and_then(id_prefix)
        .context("supporting records need a kind: staff, tools, components or maintenance")?;
    if let Some(records) = doc.get_mut("records").and_then(Value::as_array_mut) {
        for record in records.iter_mut().filter_map(Value::as_object_mut) {
            let blank = record
                .get("id")
                .and_then(Value::as_str)
                .is_none_or(str::is_empty);
            if blank {
                record.insert("id".into(), Value::String(generate_id(prefix)?));
            }
        }
    }
    serde_json::from_value(doc).context("supporting records do not match their kind")
}

/// Handle `auditflow finding`.
pub async fn handle(
    action: &FindingCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let (reference, item) = match action {
        FindingCommands::Flag {
            reference, item, ..
        }
        | FindingCommands::Text {
            reference, item, ..
        }
        | FindingCommands::Observation {
            reference, item, ..
        }
        | FindingCommands::Level {
            reference, item, ..
        }
        | FindingCommands::Attach {
            reference, item, ..
        }
        | FindingCommands::Detach {
            reference, item, ..
        }
        | FindingCommands::Supporting {
            reference, item, ..
        } => (reference, item),
    };

    // File reads finish before the session loads, so edits merge into the
    // state as it is when they complete.
    let attachment = match action {
        FindingCommands::Attach { path, .. } => Some(read_attachment(path).await?),
        _ => None,
    };
    let supporting = match action {
        FindingCommands::Supporting { path, .. } => {
            Some(parse_supporting(&read_input(path).await?)?)
        }
        _ => None,
    };

    let matrix = ctx.service.active_matrix()?;
    let mut session = ctx
        .service
        .open_checklist(reference, &matrix, flags.today())?;

    match action {
        FindingCommands::Flag { value, .. } => session.set_has_finding(item, *value)?,
        FindingCommands::Text { text, .. } => {
            session.edit_finding_text(item, text)?;
            session.commit_text()?;
        }
        FindingCommands::Observation { text, .. } => {
            session.edit_observation(item, text)?;
            session.commit_text()?;
        }
        FindingCommands::Level { level, .. } => {
            session.set_finding_level(item, parse_enum::<FindingLevel>(level)?)?;
        }
        FindingCommands::Attach { .. } => {
            if let Some(attachment) = attachment {
                session.add_attachment(item, attachment)?;
            }
        }
        FindingCommands::Detach { index, .. } => session.remove_attachment(item, *index)?,
        FindingCommands::Supporting { .. } => {
            if let Some(data) = supporting {
                let expected = session
                    .checklist()
                    .iter()
                    .find(|i| &i.id == item)
                    .and_then(|i| SupportingKind::for_clause(&i.clause));
                tracing::debug!(item, ?expected, got = %data.kind(), "replacing supporting records");
                session.set_supporting_data(item, data)?;
            }
        }
    }

    let finding = session
        .findings()
        .get(item)
        .cloned()
        .with_context(|| format!("checklist item '{item}' not found"))?;
    output(
        &FindingResponse {
            reference: reference.clone(),
            item: item.clone(),
            finding,
        },
        flags.format,
    )
}

#[cfg(test)]
mod tests {
    use flow_core::entities::SupportingData;

    use super::parse_supporting;

    #[test]
    fn generates_missing_ids() {
        let json = br#"{"kind":"tools","records":[{"serialNumber":"T-9","description":"Torque wrench","dueDate":"2025-06-01"}]}"#;
        let SupportingData::Tools(tools) = parse_supporting(json).unwrap() else {
            panic!("expected tools");
        };
        assert!(tools[0].id.starts_with("tol-"));
        assert_eq!(tools[0].serial_number, "T-9");
    }

    #[test]
    fn rejects_unknown_kind() {
        let err = parse_supporting(br#"{"kind":"fuel","records":[]}"#).unwrap_err();
        assert!(err.to_string().contains("need a kind"));
    }
}
