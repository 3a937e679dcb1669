//! Audit lifecycle rules.
//!
//! Status is derived from the audit's dates; only `Closed` is set explicitly
//! (by report generation). These are pure functions of their inputs so the
//! caller decides what "today" is.

use chrono::{Datelike, NaiveDate};

use crate::entities::{Audit, AuditTemplate};
use crate::enums::AuditStatus;
use crate::errors::CoreError;

/// Derive the date-driven status of an audit.
///
/// No start date, or today before the start date, is `Preparation`. From the
/// start date through the end date (inclusive) is `On-Site`; an open-ended
/// audit stays `On-Site` once started. After the end date is `Monitoring`.
#[must_use]
pub fn derive_status(
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    today: NaiveDate,
) -> AuditStatus {
    let Some(start) = start_date else {
        return AuditStatus::Preparation;
    };
    if today < start {
        return AuditStatus::Preparation;
    }
    match end_date {
        Some(end) if today > end => AuditStatus::Monitoring,
        _ => AuditStatus::OnSite,
    }
}

/// Recompute a stored status. `Closed` is never undone by dates.
#[must_use]
pub fn refresh_status(
    current: AuditStatus,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    today: NaiveDate,
) -> AuditStatus {
    if current.is_terminal() {
        current
    } else {
        derive_status(start_date, end_date, today)
    }
}

/// Reject an end date earlier than the start date.
///
/// # Errors
///
/// Returns `CoreError::Validation` when both dates are set and `end < start`.
pub fn validate_date_range(
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Result<(), CoreError> {
    match (start_date, end_date) {
        (Some(start), Some(end)) if end < start => Err(CoreError::Validation(format!(
            "end date {end} cannot be earlier than start date {start}"
        ))),
        _ => Ok(()),
    }
}

/// Generate the next free audit reference for `today`'s year: `AUD-2025-001`.
///
/// Picks the smallest sequence number not already taken by an existing
/// reference of the same year.
#[must_use]
pub fn next_reference<'a, I>(existing: I, today: NaiveDate) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let year = today.year();
    let prefix = format!("AUD-{year}-");
    let taken: std::collections::BTreeSet<u32> = existing
        .into_iter()
        .filter_map(|r| r.strip_prefix(&prefix))
        .filter_map(|n| n.parse().ok())
        .collect();
    let next = (1..).find(|n| !taken.contains(n)).unwrap_or(1);
    format!("{prefix}{next:03}")
}

/// Fill blank objective, scope and introduction from the audit type's template.
///
/// Values already set on the audit are kept.
pub fn apply_template(audit: &mut Audit, template: &AuditTemplate) {
    fn fill(slot: &mut Option<String>, value: &str) {
        let blank = slot.as_deref().is_none_or(str::is_empty);
        if blank && !value.is_empty() {
            *slot = Some(value.to_string());
        }
    }
    fill(&mut audit.objective, &template.objective);
    fill(&mut audit.scope, &template.scope);
    fill(&mut audit.introduction, &template.introduction);
}
