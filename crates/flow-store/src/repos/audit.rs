//! Audit repository: CRUD, assignments, status refresh and closure.

use chrono::{NaiveDate, Utc};
use flow_core::entities::Audit;
use flow_core::enums::{AuditStatus, EntityType, TrailOp};
use flow_core::errors::CoreError;
use flow_core::ids::{PREFIX_AUDIT, generate_id};
use flow_core::lifecycle::{
    apply_template, derive_status, next_reference, refresh_status, validate_date_range,
};
use flow_core::responses::{CloseResponse, RefreshResponse, StatusChange};
use flow_findings::{initialize_findings, validate_submission};
use flow_matrix::AuditMatrix;

use crate::collection::Repository;
use crate::error::StoreError;
use crate::keys;
use crate::service::FlowService;
use crate::updates::audit::AuditUpdate;

/// Input for [`FlowService::create_audit`].
#[derive(Debug, Clone, Default)]
pub struct NewAudit {
    /// Generated as `AUD-<year>-<NNN>` when absent.
    pub reference: Option<String>,
    pub name: String,
    pub audit_type: String,
    pub subtype: Option<String>,
    pub description: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub objective: Option<String>,
    pub scope: Option<String>,
    pub introduction: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl FlowService {
    /// Create an audit with a derived status.
    ///
    /// Blank objective, scope and introduction are filled from the template
    /// for the audit type.
    ///
    /// # Errors
    ///
    /// Validation for a blank name, a taken reference or an inverted date
    /// range. Nothing is written in that case.
    pub fn create_audit(&self, new: NewAudit, today: NaiveDate) -> Result<Audit, StoreError> {
        if new.name.trim().is_empty() {
            return Err(StoreError::validation("audit name is required"));
        }
        if new.audit_type.trim().is_empty() {
            return Err(StoreError::validation("audit type is required"));
        }
        validate_date_range(new.start_date, new.end_date)?;

        let existing = self.audits.list()?;
        let reference = match non_blank(new.reference) {
            Some(reference) => {
                let reference = reference.trim().to_string();
                if existing.iter().any(|a| a.reference == reference) {
                    return Err(StoreError::validation(format!(
                        "audit reference '{reference}' already exists"
                    )));
                }
                reference
            }
            None => next_reference(existing.iter().map(|a| a.reference.as_str()), today),
        };

        let now = Utc::now();
        let audit_type = new.audit_type.trim().to_lowercase();
        let mut audit = Audit {
            id: generate_id(PREFIX_AUDIT)?,
            reference,
            name: new.name.trim().to_string(),
            subtype: non_blank(new.subtype),
            description: new.description,
            start_date: new.start_date,
            end_date: new.end_date,
            status: derive_status(new.start_date, new.end_date, today),
            assigned_users: Vec::new(),
            objective: non_blank(new.objective),
            scope: non_blank(new.scope),
            introduction: non_blank(new.introduction),
            created_at: now,
            updated_at: now,
            audit_type,
        };
        if let Some(template) = self.templates.get(&audit.audit_type)? {
            apply_template(&mut audit, &template);
        }

        self.audits.save(&audit)?;
        self.record(TrailOp::Create, EntityType::Audit, &audit.reference, &audit)?;
        tracing::info!(reference = %audit.reference, status = %audit.status, "audit created");
        Ok(audit)
    }

    /// # Errors
    ///
    /// `NotFound` when no audit has this reference.
    pub fn get_audit(&self, reference: &str) -> Result<Audit, StoreError> {
        self.audits
            .get(reference)?
            .ok_or_else(|| StoreError::not_found("audit", reference))
    }

    /// # Errors
    ///
    /// Storage or deserialization failure.
    pub fn list_audits(&self) -> Result<Vec<Audit>, StoreError> {
        self.audits.list()
    }

    /// Apply `update`. Dates are re-validated and the status re-derived
    /// unless the audit is closed.
    ///
    /// # Errors
    ///
    /// `NotFound`, or validation for a blank name or inverted date range.
    pub fn update_audit(
        &self,
        reference: &str,
        update: &AuditUpdate,
        today: NaiveDate,
    ) -> Result<Audit, StoreError> {
        let mut audit = self.get_audit(reference)?;

        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(StoreError::validation("audit name is required"));
            }
            audit.name = name.trim().to_string();
        }
        if let Some(subtype) = &update.subtype {
            audit.subtype = non_blank(subtype.clone());
        }
        if let Some(description) = &update.description {
            audit.description.clone_from(description);
        }
        if let Some(start) = update.start_date {
            audit.start_date = start;
        }
        if let Some(end) = update.end_date {
            audit.end_date = end;
        }
        if let Some(objective) = &update.objective {
            audit.objective = non_blank(objective.clone());
        }
        if let Some(scope) = &update.scope {
            audit.scope = non_blank(scope.clone());
        }
        if let Some(introduction) = &update.introduction {
            audit.introduction = non_blank(introduction.clone());
        }

        if update.touches_dates() {
            validate_date_range(audit.start_date, audit.end_date)?;
        }
        audit.status = refresh_status(audit.status, audit.start_date, audit.end_date, today);
        audit.updated_at = Utc::now();

        self.audits.save(&audit)?;
        self.record(TrailOp::Update, EntityType::Audit, reference, update)?;
        Ok(audit)
    }

    /// Delete an audit together with its finding set.
    ///
    /// # Errors
    ///
    /// `NotFound` when no audit has this reference.
    pub fn delete_audit(&self, reference: &str) -> Result<(), StoreError> {
        if !self.audits.delete(reference)? {
            return Err(StoreError::not_found("audit", reference));
        }
        let had_findings = self.store().remove(&keys::findings(reference))?;
        self.record(TrailOp::Delete, EntityType::Audit, reference, reference)?;
        tracing::info!(reference, had_findings, "audit deleted");
        Ok(())
    }

    /// Assign a user. `lead` replaces any current lead auditor.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown audit or user; validation when the user's
    /// role cannot audit or the user is already assigned.
    pub fn assign_user(
        &self,
        reference: &str,
        user_id: &str,
        lead: bool,
    ) -> Result<Audit, StoreError> {
        let mut audit = self.get_audit(reference)?;
        let user = self.get_user(user_id)?;
        if !user.role.can_audit() {
            return Err(StoreError::validation(format!(
                "user '{}' has role {} and cannot be assigned to audits",
                user.username, user.role
            )));
        }
        audit.assign(&user.id, &user.username, lead)?;
        audit.updated_at = Utc::now();

        self.audits.save(&audit)?;
        self.record(
            TrailOp::Update,
            EntityType::Audit,
            reference,
            &audit.assigned_users,
        )?;
        Ok(audit)
    }

    /// # Errors
    ///
    /// `NotFound` for an unknown audit or when the user is not assigned.
    pub fn unassign_user(&self, reference: &str, user_id: &str) -> Result<Audit, StoreError> {
        let mut audit = self.get_audit(reference)?;
        if !audit.unassign(user_id) {
            return Err(StoreError::not_found("assignment", user_id));
        }
        audit.updated_at = Utc::now();
        self.audits.save(&audit)?;
        self.record(
            TrailOp::Update,
            EntityType::Audit,
            reference,
            &audit.assigned_users,
        )?;
        Ok(audit)
    }

    /// Re-derive every open audit's status for `today`. Closed audits are
    /// left alone. Only changed audits are written.
    ///
    /// # Errors
    ///
    /// Storage failure.
    pub fn refresh_statuses(&self, today: NaiveDate) -> Result<RefreshResponse, StoreError> {
        let mut audits = self.audits.list()?;
        let mut changed = Vec::new();
        for audit in &mut audits {
            let next = refresh_status(audit.status, audit.start_date, audit.end_date, today);
            if next != audit.status {
                changed.push(StatusChange {
                    reference: audit.reference.clone(),
                    from: audit.status,
                    to: next,
                });
                audit.status = next;
                audit.updated_at = Utc::now();
            }
        }
        if !changed.is_empty() {
            self.audits.replace_all(&audits)?;
            for change in &changed {
                self.record(
                    TrailOp::Transition,
                    EntityType::Audit,
                    &change.reference,
                    change,
                )?;
            }
        }
        tracing::debug!(checked = audits.len(), changed = changed.len(), "statuses refreshed");
        Ok(RefreshResponse {
            checked: audits.len(),
            changed,
        })
    }

    /// Close an audit after report generation.
    ///
    /// The status is first brought up to date for `today`; only On-Site and
    /// Monitoring audits may close. The saved findings must pass the same
    /// completeness check as checklist submission.
    ///
    /// # Errors
    ///
    /// `NotFound`, `InvalidTransition`, or `FindingError::Incomplete`.
    pub fn close_audit(
        &self,
        reference: &str,
        today: NaiveDate,
        matrix: &AuditMatrix,
    ) -> Result<CloseResponse, StoreError> {
        let mut audit = self.get_audit(reference)?;
        let previous_status =
            refresh_status(audit.status, audit.start_date, audit.end_date, today);
        if !previous_status.can_transition_to(AuditStatus::Closed) {
            return Err(CoreError::InvalidTransition {
                entity_type: "audit".into(),
                id: reference.to_string(),
                from: previous_status.to_string(),
                to: AuditStatus::Closed.to_string(),
            }
            .into());
        }

        let checklist = matrix.resolve(&audit.audit_type, audit.subtype.as_deref());
        let saved = self.load_findings(reference)?;
        let set = initialize_findings(&checklist, &saved, &[], today);
        validate_submission(&checklist, &set)?;

        audit.status = AuditStatus::Closed;
        audit.updated_at = Utc::now();
        self.audits.save(&audit)?;
        self.record(TrailOp::Transition, EntityType::Audit, reference, &audit)?;
        tracing::info!(reference, from = %previous_status, "audit closed");
        Ok(CloseResponse {
            audit,
            previous_status,
        })
    }
}

#[cfg(test)]
mod tests {
    use flow_core::enums::UserRole;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::helpers::{create_user, d, new_audit, test_service};
    use crate::updates::audit::AuditUpdateBuilder;

    #[test]
    fn create_generates_reference_and_status() {
        let svc = test_service();
        let mut new = new_audit("Hangar 2", "Product");
        new.start_date = Some(d("2025-01-10"));
        new.end_date = Some(d("2025-01-20"));
        let audit = svc.create_audit(new, d("2025-01-15")).unwrap();
        assert_eq!(audit.reference, "AUD-2025-001");
        assert_eq!(audit.audit_type, "product");
        assert_eq!(audit.status, AuditStatus::OnSite);

        let second = svc
            .create_audit(new_audit("Line station", "process"), d("2025-01-15"))
            .unwrap();
        assert_eq!(second.reference, "AUD-2025-002");
        assert_eq!(second.status, AuditStatus::Preparation);
    }

    #[test]
    fn duplicate_reference_is_rejected() {
        let svc = test_service();
        let mut new = new_audit("A", "product");
        new.reference = Some("QA-1".into());
        svc.create_audit(new.clone(), d("2025-01-15")).unwrap();
        let err = svc.create_audit(new, d("2025-01-15")).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(svc.list_audits().unwrap().len(), 1);
    }

    #[test]
    fn inverted_dates_write_nothing() {
        let svc = test_service();
        let mut new = new_audit("A", "product");
        new.start_date = Some(d("2025-01-20"));
        new.end_date = Some(d("2025-01-10"));
        assert!(svc.create_audit(new, d("2025-01-15")).is_err());
        assert!(svc.list_audits().unwrap().is_empty());
    }

    #[test]
    fn update_rederives_status_and_validates() {
        let svc = test_service();
        let audit = svc.create_audit(new_audit("A", "product"), d("2025-01-15")).unwrap();

        let update = AuditUpdateBuilder::new()
            .start_date(Some(d("2025-01-01")))
            .end_date(Some(d("2025-01-05")))
            .build();
        let updated = svc.update_audit(&audit.reference, &update, d("2025-01-15")).unwrap();
        assert_eq!(updated.status, AuditStatus::Monitoring);

        let bad = AuditUpdateBuilder::new().end_date(Some(d("2024-12-01"))).build();
        assert!(svc.update_audit(&audit.reference, &bad, d("2025-01-15")).is_err());
        let stored = svc.get_audit(&audit.reference).unwrap();
        assert_eq!(stored.end_date, Some(d("2025-01-05")));
    }

    #[test]
    fn delete_removes_findings_document() {
        let svc = test_service();
        let audit = svc.create_audit(new_audit("A", "product"), d("2025-01-15")).unwrap();
        svc.store()
            .write(&keys::findings(&audit.reference), "[]")
            .unwrap();
        svc.delete_audit(&audit.reference).unwrap();
        assert!(svc.store().read(&keys::findings(&audit.reference)).unwrap().is_none());
        assert!(svc.get_audit(&audit.reference).unwrap_err().is_not_found());
    }

    #[test]
    fn lead_assignment_replaces_previous_lead() {
        let svc = test_service();
        let audit = svc.create_audit(new_audit("A", "product"), d("2025-01-15")).unwrap();
        let kim = create_user(&svc, "kim", UserRole::LeadAuditor);
        let lee = create_user(&svc, "lee", UserRole::LeadAuditor);
        let ann = create_user(&svc, "ann", UserRole::Auditor);

        svc.assign_user(&audit.reference, &ann.id, false).unwrap();
        svc.assign_user(&audit.reference, &kim.id, true).unwrap();
        let audit = svc.assign_user(&audit.reference, &lee.id, true).unwrap();

        let names: Vec<&str> = audit
            .sorted_assignees()
            .iter()
            .map(|u| u.username.as_str())
            .collect();
        assert_eq!(names, ["lee", "ann"]);
        assert!(svc.assign_user(&audit.reference, &ann.id, false).is_err());
    }

    #[test]
    fn general_user_cannot_be_assigned() {
        let svc = test_service();
        let audit = svc.create_audit(new_audit("A", "product"), d("2025-01-15")).unwrap();
        let gina = create_user(&svc, "gina", UserRole::General);
        assert!(svc.assign_user(&audit.reference, &gina.id, false).is_err());
    }

    #[test]
    fn refresh_moves_open_audits_only() {
        let svc = test_service();
        let mut new = new_audit("A", "product");
        new.start_date = Some(d("2025-01-10"));
        new.end_date = Some(d("2025-01-20"));
        svc.create_audit(new, d("2025-01-01")).unwrap();

        let response = svc.refresh_statuses(d("2025-01-25")).unwrap();
        assert_eq!(response.checked, 1);
        assert_eq!(response.changed.len(), 1);
        assert_eq!(response.changed[0].to, AuditStatus::Monitoring);

        let again = svc.refresh_statuses(d("2025-01-25")).unwrap();
        assert!(again.changed.is_empty());
    }

    #[test]
    fn close_requires_started_audit() {
        let svc = test_service();
        let audit = svc.create_audit(new_audit("A", "product"), d("2025-01-15")).unwrap();
        let err = svc
            .close_audit(&audit.reference, d("2025-01-15"), &AuditMatrix::builtin())
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn closed_audit_stays_closed() {
        let svc = test_service();
        let mut new = new_audit("A", "product");
        new.start_date = Some(d("2025-01-10"));
        new.end_date = Some(d("2025-01-20"));
        let audit = svc.create_audit(new, d("2025-01-15")).unwrap();

        let closed = svc
            .close_audit(&audit.reference, d("2025-01-25"), &AuditMatrix::builtin())
            .unwrap();
        assert_eq!(closed.previous_status, AuditStatus::Monitoring);
        assert_eq!(closed.audit.status, AuditStatus::Closed);

        let response = svc.refresh_statuses(d("2025-01-12")).unwrap();
        assert!(response.changed.is_empty());
        assert_eq!(
            svc.get_audit(&audit.reference).unwrap().status,
            AuditStatus::Closed
        );
    }
}
