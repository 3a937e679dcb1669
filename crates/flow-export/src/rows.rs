//! Spreadsheet row shapes for each export.
//!
//! Field renames are the exact column headers, so the same structs drive
//! XLSX rendering, CSV writing and CSV re-parsing.

use flow_core::entities::{Audit, AuditTemplate, ChecklistItem, User};
use flow_findings::FindingSet;
use flow_matrix::MatrixExportRow;
use serde::{Deserialize, Serialize};

/// A row type with fixed column headers.
pub trait Tabular {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

fn yes_no(flag: bool) -> String {
    if flag { "Yes" } else { "No" }.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChecklistRow {
    #[serde(rename = "Clause")]
    pub clause: String,
    #[serde(rename = "Objective")]
    pub objective: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Finding Identified")]
    pub finding_identified: String,
    #[serde(rename = "Finding Details")]
    pub finding_details: String,
    #[serde(rename = "Observations")]
    pub observations: String,
    #[serde(rename = "Required")]
    pub required: String,
}

impl Tabular for ChecklistRow {
    const HEADERS: &'static [&'static str] = &[
        "Clause",
        "Objective",
        "Description",
        "Finding Identified",
        "Finding Details",
        "Observations",
        "Required",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.clause.clone(),
            self.objective.clone(),
            self.description.clone(),
            self.finding_identified.clone(),
            self.finding_details.clone(),
            self.observations.clone(),
            self.required.clone(),
        ]
    }
}

/// One row per checklist item, in checklist order. Items missing from the
/// set export as "No" with empty text.
#[must_use]
pub fn to_spreadsheet_rows(checklist: &[ChecklistItem], findings: &FindingSet) -> Vec<ChecklistRow> {
    checklist
        .iter()
        .map(|item| {
            let finding = findings.get(&item.id);
            ChecklistRow {
                clause: item.clause.clone(),
                objective: item.objective.clone(),
                description: item.description.clone(),
                finding_identified: yes_no(finding.is_some_and(|f| f.has_finding)),
                finding_details: finding.map(|f| f.finding.clone()).unwrap_or_default(),
                observations: finding.map(|f| f.observation.clone()).unwrap_or_default(),
                required: yes_no(item.required),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AuditRow {
    #[serde(rename = "Reference")]
    pub reference: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub audit_type: String,
    #[serde(rename = "Subtype")]
    pub subtype: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Start Date")]
    pub start_date: String,
    #[serde(rename = "End Date")]
    pub end_date: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Assigned Users")]
    pub assigned_users: String,
    #[serde(rename = "Created")]
    pub created: String,
    #[serde(rename = "Updated")]
    pub updated: String,
}

impl From<&Audit> for AuditRow {
    fn from(audit: &Audit) -> Self {
        Self {
            reference: audit.reference.clone(),
            name: audit.name.clone(),
            audit_type: audit.audit_type.clone(),
            subtype: audit.subtype.clone().unwrap_or_default(),
            description: audit.description.clone(),
            start_date: audit.start_date.map(|d| d.to_string()).unwrap_or_default(),
            end_date: audit.end_date.map(|d| d.to_string()).unwrap_or_default(),
            status: audit.status.to_string(),
            assigned_users: audit
                .sorted_assignees()
                .iter()
                .map(|u| u.display())
                .collect::<Vec<_>>()
                .join(", "),
            created: audit.created_at.to_rfc3339(),
            updated: audit.updated_at.to_rfc3339(),
        }
    }
}

impl Tabular for AuditRow {
    const HEADERS: &'static [&'static str] = &[
        "Reference",
        "Name",
        "Type",
        "Subtype",
        "Description",
        "Start Date",
        "End Date",
        "Status",
        "Assigned Users",
        "Created",
        "Updated",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.reference.clone(),
            self.name.clone(),
            self.audit_type.clone(),
            self.subtype.clone(),
            self.description.clone(),
            self.start_date.clone(),
            self.end_date.clone(),
            self.status.clone(),
            self.assigned_users.clone(),
            self.created.clone(),
            self.updated.clone(),
        ]
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UserRow {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Role")]
    pub role: String,
    #[serde(rename = "Admin Access")]
    pub admin_access: String,
    #[serde(rename = "Theme")]
    pub theme: String,
    #[serde(rename = "Last Login")]
    pub last_login: String,
    #[serde(rename = "Usage Time")]
    pub usage_time: String,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            role: user.role.to_string(),
            admin_access: yes_no(user.is_admin),
            theme: user
                .theme
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "Default".to_string()),
            last_login: user
                .last_login
                .map_or_else(|| "Never".to_string(), |t| t.to_rfc3339()),
            usage_time: format!("{} minutes", user.total_usage_time / 60),
        }
    }
}

impl Tabular for UserRow {
    const HEADERS: &'static [&'static str] = &[
        "Username",
        "Role",
        "Admin Access",
        "Theme",
        "Last Login",
        "Usage Time",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.username.clone(),
            self.role.clone(),
            self.admin_access.clone(),
            self.theme.clone(),
            self.last_login.clone(),
            self.usage_time.clone(),
        ]
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TemplateRow {
    #[serde(rename = "Type")]
    pub audit_type: String,
    #[serde(rename = "Subtype")]
    pub subtype: String,
    #[serde(rename = "Objective")]
    pub objective: String,
    #[serde(rename = "Scope")]
    pub scope: String,
}

impl From<&AuditTemplate> for TemplateRow {
    fn from(t: &AuditTemplate) -> Self {
        Self {
            audit_type: t.audit_type.clone(),
            subtype: t.subtype.clone().unwrap_or_default(),
            objective: t.objective.clone(),
            scope: t.scope.clone(),
        }
    }
}

impl Tabular for TemplateRow {
    const HEADERS: &'static [&'static str] = &["Type", "Subtype", "Objective", "Scope"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.audit_type.clone(),
            self.subtype.clone(),
            self.objective.clone(),
            self.scope.clone(),
        ]
    }
}

impl Tabular for MatrixExportRow {
    const HEADERS: &'static [&'static str] = &[
        "id",
        "auditType",
        "clause",
        "objective",
        "description",
        "required",
        "subtype",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.audit_type.clone(),
            self.clause.clone(),
            self.objective.clone(),
            self.description.clone(),
            self.required.clone(),
            self.subtype.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use flow_core::entities::AssignedUser;
    use flow_core::enums::{AuditStatus, UserRole};
    use flow_findings::initialize_findings;
    use pretty_assertions::assert_eq;

    fn item(id: &str, required: bool) -> ChecklistItem {
        ChecklistItem {
            id: id.into(),
            clause: format!("clause {id}"),
            objective: "obj".into(),
            description: "desc".into(),
            required,
        }
    }

    #[test]
    fn checklist_rows_follow_checklist_order() {
        let checklist = vec![item("b", true), item("a", false)];
        let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let set = initialize_findings(&checklist, &[], &[], today)
            .set_has_finding("a", true)
            .unwrap()
            .set_finding_text("a", "gap")
            .unwrap();
        let rows = to_spreadsheet_rows(&checklist, &set);
        assert_eq!(rows[0].clause, "clause b");
        assert_eq!(rows[0].finding_identified, "No");
        assert_eq!(rows[0].required, "Yes");
        assert_eq!(rows[1].finding_identified, "Yes");
        assert_eq!(rows[1].finding_details, "gap");
        assert_eq!(rows[1].required, "No");
    }

    #[test]
    fn audit_row_puts_lead_first() {
        let audit = Audit {
            id: "aud-1".into(),
            reference: "AUD-2025-001".into(),
            name: "Base".into(),
            audit_type: "process".into(),
            subtype: None,
            description: String::new(),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 10),
            end_date: None,
            status: AuditStatus::OnSite,
            assigned_users: vec![
                AssignedUser {
                    id: "u2".into(),
                    username: "bob".into(),
                    role: UserRole::Auditor,
                },
                AssignedUser {
                    id: "u1".into(),
                    username: "alice".into(),
                    role: UserRole::LeadAuditor,
                },
            ],
            objective: None,
            scope: None,
            introduction: None,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap(),
        };
        let row = AuditRow::from(&audit);
        assert_eq!(row.assigned_users, "alice (Lead Auditor), bob (Auditor)");
        assert_eq!(row.start_date, "2025-01-10");
        assert_eq!(row.end_date, "");
        assert_eq!(row.subtype, "");
        assert_eq!(row.status, "On-Site");
        assert_eq!(row.cells().len(), AuditRow::HEADERS.len());
    }

    #[test]
    fn user_row_defaults() {
        let user = User {
            id: "u1".into(),
            username: "alice".into(),
            role: UserRole::Admin,
            is_admin: true,
            theme: None,
            last_login: None,
            total_usage_time: 3659,
        };
        let row = UserRow::from(&user);
        assert_eq!(row.theme, "Default");
        assert_eq!(row.last_login, "Never");
        assert_eq!(row.usage_time, "60 minutes");
        assert_eq!(row.admin_access, "Yes");
    }
}
