use flow_core::metrics::{auditor_metrics, average_metrics, duration_metrics};
use flow_core::responses::MetricsResponse;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::MetricsArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `auditflow metrics`.
pub fn handle(args: &MetricsArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut audits = ctx.service.list_audits()?;
    if let Some(audit_type) = &args.audit_type {
        audits.retain(|a| a.audit_type.eq_ignore_ascii_case(audit_type));
    }
    let durations = duration_metrics(&audits);
    let averages = average_metrics(&durations);
    let auditors = auditor_metrics(&ctx.service.list_users()?, &audits);
    output(
        &MetricsResponse {
            durations,
            averages,
            auditors,
        },
        flags.format,
    )
}
