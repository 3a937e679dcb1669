//! Finding sets: persistence, checklist sessions and submission.

use chrono::NaiveDate;
use flow_core::entities::FindingRecord;
use flow_core::enums::{EntityType, TrailOp};
use flow_core::responses::SubmitResponse;
use flow_findings::{ChecklistSession, FindingSink};
use flow_matrix::AuditMatrix;

use crate::collection::{load_json, save_json};
use crate::error::StoreError;
use crate::keys;
use crate::service::FlowService;

/// Persists a checklist session's findings through the service.
pub struct FindingWriter<'a> {
    svc: &'a FlowService,
}

impl FindingSink for FindingWriter<'_> {
    fn persist(&mut self, audit_ref: &str, records: &[FindingRecord]) -> anyhow::Result<()> {
        self.svc.save_findings(audit_ref, records)?;
        Ok(())
    }
}

impl FlowService {
    /// Saved findings for an audit; empty when the checklist was never opened.
    ///
    /// # Errors
    ///
    /// Storage failure or a corrupt findings document.
    pub fn load_findings(&self, reference: &str) -> Result<Vec<FindingRecord>, StoreError> {
        Ok(load_json(self.store(), &keys::findings(reference))?.unwrap_or_default())
    }

    /// Replace the saved findings for an audit.
    ///
    /// # Errors
    ///
    /// Storage failure.
    pub fn save_findings(
        &self,
        reference: &str,
        records: &[FindingRecord],
    ) -> Result<(), StoreError> {
        let key = keys::findings(reference);
        save_json(self.store(), &key, records)?;
        self.record(TrailOp::Update, EntityType::Finding, &key, records)?;
        tracing::debug!(reference, records = records.len(), "findings persisted");
        Ok(())
    }

    /// Open the checklist for an audit: resolve its items from `matrix` and
    /// reconcile saved and historical findings.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown audit, or a storage failure.
    pub fn open_checklist(
        &self,
        reference: &str,
        matrix: &AuditMatrix,
        today: NaiveDate,
    ) -> Result<ChecklistSession<FindingWriter<'_>>, StoreError> {
        let audit = self.get_audit(reference)?;
        let checklist = matrix.resolve(&audit.audit_type, audit.subtype.as_deref());
        let existing = self.load_findings(reference)?;
        let historical = self.list_historical()?;
        tracing::debug!(
            reference,
            items = checklist.len(),
            saved = existing.len(),
            "checklist opened"
        );
        Ok(ChecklistSession::open(
            audit.reference,
            checklist,
            &existing,
            &historical,
            FindingWriter { svc: self },
            today,
        ))
    }

    /// Validate and persist the checklist as it currently stands.
    ///
    /// # Errors
    ///
    /// `FindingError::Incomplete` when a flagged required item lacks text.
    pub fn submit_checklist(
        &self,
        reference: &str,
        matrix: &AuditMatrix,
        today: NaiveDate,
    ) -> Result<SubmitResponse, StoreError> {
        let mut session = self.open_checklist(reference, matrix, today)?;
        let submission = session.submit()?;
        Ok(SubmitResponse {
            reference: reference.to_string(),
            items: submission.findings.len(),
            findings_identified: submission.findings_identified,
            markers_cleared: submission.markers_cleared,
        })
    }
}

#[cfg(test)]
mod tests {
    use flow_core::entities::HistoricalFinding;
    use flow_findings::FindingError;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::helpers::{d, new_audit, test_service};

    fn historical(clause: &str, finding: &str) -> HistoricalFinding {
        HistoricalFinding {
            clause: Some(clause.into()),
            reference: None,
            finding: finding.into(),
            observation: String::new(),
            year: Some("2023".into()),
            date: None,
            finding_level: None,
        }
    }

    #[test]
    fn structural_edit_is_saved_immediately() {
        let svc = test_service();
        let audit = svc.create_audit(new_audit("A", "product"), d("2025-01-15")).unwrap();
        let matrix = AuditMatrix::builtin();

        let mut session = svc.open_checklist(&audit.reference, &matrix, d("2025-01-15")).unwrap();
        assert_eq!(session.checklist().len(), 5);
        session.set_has_finding("p-3", true).unwrap();
        drop(session);

        let saved = svc.load_findings(&audit.reference).unwrap();
        assert_eq!(saved.len(), 5);
        let p3 = saved.iter().find(|r| r.checklist_item_id == "p-3").unwrap();
        assert_eq!(p3.has_finding, Some(true));
        assert_eq!(p3.year, "2025");
    }

    #[test]
    fn historical_marker_is_not_persisted() {
        let svc = test_service();
        let audit = svc.create_audit(new_audit("A", "product"), d("2025-01-15")).unwrap();
        svc.store()
            .write(
                keys::HISTORICAL_FINDINGS,
                &serde_json::to_string(&[historical(
                    "145.A.48 Performance of maintenance",
                    "Torque not recorded",
                )])
                .unwrap(),
            )
            .unwrap();

        let matrix = AuditMatrix::builtin();
        let mut session = svc.open_checklist(&audit.reference, &matrix, d("2025-01-15")).unwrap();
        let p1 = session.findings().get("p-1").unwrap();
        assert!(p1.is_historical);
        assert!(p1.has_unconfirmed_marker());
        session.set_finding_level("p-2", flow_core::enums::FindingLevel::Level2).unwrap();
        drop(session);

        let saved = svc.load_findings(&audit.reference).unwrap();
        let p1 = saved.iter().find(|r| r.checklist_item_id == "p-1").unwrap();
        assert_eq!(p1.finding, "");
        assert!(!p1.is_historical);
    }

    #[test]
    fn submit_reports_missing_text() {
        let svc = test_service();
        let audit = svc.create_audit(new_audit("A", "product"), d("2025-01-15")).unwrap();
        let matrix = AuditMatrix::builtin();
        {
            let mut session =
                svc.open_checklist(&audit.reference, &matrix, d("2025-01-15")).unwrap();
            session.set_has_finding("p-1", true).unwrap();
        }
        let err = svc
            .submit_checklist(&audit.reference, &matrix, d("2025-01-15"))
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Finding(FindingError::Incomplete { .. })
        ));

        {
            let mut session =
                svc.open_checklist(&audit.reference, &matrix, d("2025-01-15")).unwrap();
            session.edit_finding_text("p-1", "Torque values missing").unwrap();
            session.commit_text().unwrap();
        }
        let response = svc
            .submit_checklist(&audit.reference, &matrix, d("2025-01-15"))
            .unwrap();
        assert_eq!(response.items, 5);
        assert_eq!(response.findings_identified, 1);
    }

    #[test]
    fn unknown_audit_cannot_open_checklist() {
        let svc = test_service();
        let err = svc
            .open_checklist("AUD-1999-001", &AuditMatrix::builtin(), d("2025-01-15"))
            .err()
            .unwrap();
        assert!(err.is_not_found());
    }
}
