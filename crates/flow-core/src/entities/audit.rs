use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{AuditStatus, UserRole};
use crate::errors::CoreError;

/// A user assigned to an audit, with the role they hold on it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AssignedUser {
    pub id: String,
    pub username: String,
    pub role: UserRole,
}

impl AssignedUser {
    /// `"username (role)"`, the form used in listings and exports.
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} ({})", self.username, self.role)
    }
}

/// An audit, keyed by its human-assigned `reference`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Audit {
    pub id: String,
    pub reference: String,
    pub name: String,
    #[serde(rename = "type")]
    pub audit_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub status: AuditStatus,
    #[serde(default)]
    pub assigned_users: Vec<AssignedUser>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objective: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub introduction: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Audit {
    /// The assigned lead auditor, if any.
    #[must_use]
    pub fn lead_auditor(&self) -> Option<&AssignedUser> {
        self.assigned_users
            .iter()
            .find(|u| u.role == UserRole::LeadAuditor)
    }

    /// Assigned users with the lead auditor first, otherwise in assignment order.
    #[must_use]
    pub fn sorted_assignees(&self) -> Vec<&AssignedUser> {
        let mut users: Vec<&AssignedUser> = self.assigned_users.iter().collect();
        users.sort_by_key(|u| u.role != UserRole::LeadAuditor);
        users
    }

    /// Assign `user` to this audit.
    ///
    /// A lead assignment replaces the current lead in place (or is inserted
    /// first when there is none). A regular assignment always carries the
    /// `Auditor` role and is rejected if the user is already on the audit.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the user is already assigned as a
    /// regular auditor.
    pub fn assign(&mut self, id: &str, username: &str, lead: bool) -> Result<(), CoreError> {
        if lead {
            let entry = AssignedUser {
                id: id.to_string(),
                username: username.to_string(),
                role: UserRole::LeadAuditor,
            };
            self.assigned_users
                .retain(|u| u.id != id || u.role == UserRole::LeadAuditor);
            match self
                .assigned_users
                .iter_mut()
                .find(|u| u.role == UserRole::LeadAuditor)
            {
                Some(existing) => *existing = entry,
                None => self.assigned_users.insert(0, entry),
            }
            return Ok(());
        }

        if self.assigned_users.iter().any(|u| u.id == id) {
            return Err(CoreError::Validation(format!(
                "user '{username}' is already assigned to audit {}",
                self.reference
            )));
        }
        self.assigned_users.push(AssignedUser {
            id: id.to_string(),
            username: username.to_string(),
            role: UserRole::Auditor,
        });
        Ok(())
    }

    /// Remove a user from the audit. Returns whether anything was removed.
    pub fn unassign(&mut self, id: &str) -> bool {
        let before = self.assigned_users.len();
        self.assigned_users.retain(|u| u.id != id);
        self.assigned_users.len() != before
    }
}
