//! KPI duration and auditor workload metrics.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Audit, User};
use crate::enums::{AuditStatus, UserRole};

/// Days spent in each lifecycle phase for one audit. Negative spans clamp to 0.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DurationMetrics {
    pub reference: String,
    pub name: String,
    #[serde(rename = "type")]
    pub audit_type: String,
    pub preparation_days: i64,
    pub onsite_days: i64,
    pub monitoring_days: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AverageMetrics {
    pub avg_preparation: i64,
    pub avg_onsite: i64,
    pub avg_monitoring: i64,
}

/// How many audits a user is assigned to, split by audit type.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuditorMetrics {
    pub user_id: String,
    pub username: String,
    pub role: UserRole,
    pub total_audits: usize,
    pub by_type: BTreeMap<String, usize>,
}

/// Phase durations for each audit.
///
/// Preparation runs from creation to the start date, on-site from start to
/// end, and monitoring from the end date to the last update of a closed audit.
#[must_use]
pub fn duration_metrics(audits: &[Audit]) -> Vec<DurationMetrics> {
    audits
        .iter()
        .map(|audit| {
            let mut preparation = 0;
            let mut onsite = 0;
            let mut monitoring = 0;

            if let Some(start) = audit.start_date {
                preparation = (start - audit.created_at.date_naive()).num_days();
                if let Some(end) = audit.end_date {
                    onsite = (end - start).num_days();
                    if audit.status == AuditStatus::Closed {
                        monitoring = (audit.updated_at.date_naive() - end).num_days();
                    }
                }
            }

            DurationMetrics {
                reference: audit.reference.clone(),
                name: audit.name.clone(),
                audit_type: audit.audit_type.clone(),
                preparation_days: preparation.max(0),
                onsite_days: onsite.max(0),
                monitoring_days: monitoring.max(0),
            }
        })
        .collect()
}

/// Averages rounded to the nearest day; all zero for an empty slice.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn average_metrics(metrics: &[DurationMetrics]) -> AverageMetrics {
    if metrics.is_empty() {
        return AverageMetrics::default();
    }
    let n = metrics.len() as f64;
    let avg = |f: fn(&DurationMetrics) -> i64| {
        (metrics.iter().map(f).sum::<i64>() as f64 / n).round() as i64
    };
    AverageMetrics {
        avg_preparation: avg(|m| m.preparation_days),
        avg_onsite: avg(|m| m.onsite_days),
        avg_monitoring: avg(|m| m.monitoring_days),
    }
}

/// Assignment counts for every user who can audit.
#[must_use]
pub fn auditor_metrics(users: &[User], audits: &[Audit]) -> Vec<AuditorMetrics> {
    users
        .iter()
        .filter(|u| u.role.can_audit())
        .map(|user| {
            let mut by_type = BTreeMap::new();
            let mut total = 0;
            for audit in audits
                .iter()
                .filter(|a| a.assigned_users.iter().any(|au| au.id == user.id))
            {
                total += 1;
                *by_type.entry(audit.audit_type.clone()).or_insert(0) += 1;
            }
            AuditorMetrics {
                user_id: user.id.clone(),
                username: user.username.clone(),
                role: user.role,
                total_audits: total,
                by_type,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::AssignedUser;
    use chrono::{NaiveDate, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn audit(reference: &str, start: Option<&str>, end: Option<&str>, status: AuditStatus) -> Audit {
        Audit {
            id: format!("aud-{reference}"),
            reference: reference.into(),
            name: reference.into(),
            audit_type: "product".into(),
            subtype: None,
            description: String::new(),
            start_date: start.map(d),
            end_date: end.map(d),
            status,
            assigned_users: Vec::new(),
            objective: None,
            scope: None,
            introduction: None,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2025, 2, 4, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn durations_per_phase() {
        let audits = vec![
            audit("A", Some("2025-01-10"), Some("2025-01-20"), AuditStatus::Closed),
            audit("B", Some("2025-01-05"), Some("2025-01-07"), AuditStatus::Monitoring),
            audit("C", None, None, AuditStatus::Preparation),
        ];
        let m = duration_metrics(&audits);
        assert_eq!(
            (m[0].preparation_days, m[0].onsite_days, m[0].monitoring_days),
            (9, 10, 15)
        );
        assert_eq!(
            (m[1].preparation_days, m[1].onsite_days, m[1].monitoring_days),
            (4, 2, 0)
        );
        assert_eq!(
            (m[2].preparation_days, m[2].onsite_days, m[2].monitoring_days),
            (0, 0, 0)
        );
    }

    #[test]
    fn start_before_creation_clamps_to_zero() {
        let m = duration_metrics(&[audit(
            "A",
            Some("2024-12-01"),
            Some("2024-12-02"),
            AuditStatus::Monitoring,
        )]);
        assert_eq!(m[0].preparation_days, 0);
    }

    #[test]
    fn averages_round_and_handle_empty() {
        assert_eq!(average_metrics(&[]), AverageMetrics::default());
        let audits = vec![
            audit("A", Some("2025-01-10"), Some("2025-01-20"), AuditStatus::Closed),
            audit("B", Some("2025-01-05"), Some("2025-01-07"), AuditStatus::Monitoring),
        ];
        let avg = average_metrics(&duration_metrics(&audits));
        assert_eq!(avg.avg_preparation, 7);
        assert_eq!(avg.avg_onsite, 6);
        assert_eq!(avg.avg_monitoring, 8);
    }

    #[test]
    fn auditor_counts_by_type() {
        let users = vec![
            User {
                id: "usr-1".into(),
                username: "alice".into(),
                role: UserRole::LeadAuditor,
                is_admin: false,
                theme: None,
                last_login: None,
                total_usage_time: 0,
            },
            User {
                id: "usr-2".into(),
                username: "gina".into(),
                role: UserRole::General,
                is_admin: false,
                theme: None,
                last_login: None,
                total_usage_time: 0,
            },
        ];
        let mut a = audit("A", None, None, AuditStatus::Preparation);
        a.assigned_users.push(AssignedUser {
            id: "usr-1".into(),
            username: "alice".into(),
            role: UserRole::LeadAuditor,
        });
        let mut b = a.clone();
        b.audit_type = "process".into();
        let metrics = auditor_metrics(&users, &[a, b]);
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].total_audits, 2);
        assert_eq!(metrics[0].by_type.get("product"), Some(&1));
        assert_eq!(metrics[0].by_type.get("process"), Some(&1));
    }
}
