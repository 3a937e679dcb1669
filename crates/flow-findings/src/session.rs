//! Checklist editing session with the auto-save policy and submission.
//!
//! Structural edits (finding flag, level, attachments, supporting records)
//! are persisted as soon as they apply. Free-text edits are held until
//! [`ChecklistSession::commit_text`], the equivalent of a field losing focus.

use chrono::{Datelike, NaiveDate};
use flow_core::entities::{Attachment, ChecklistItem, FindingRecord, HistoricalFinding, SupportingData};
use flow_core::enums::{FindingLevel, SupportingKind};

use crate::error::FindingError;
use crate::set::{FindingSet, initialize_findings};

/// Where a session writes its findings.
pub trait FindingSink {
    /// Replace the stored findings for `audit_ref` with `records`.
    ///
    /// # Errors
    ///
    /// Any storage failure, reported as `anyhow::Error`.
    fn persist(&mut self, audit_ref: &str, records: &[FindingRecord]) -> anyhow::Result<()>;
}

impl<S: FindingSink + ?Sized> FindingSink for &mut S {
    fn persist(&mut self, audit_ref: &str, records: &[FindingRecord]) -> anyhow::Result<()> {
        (**self).persist(audit_ref, records)
    }
}

/// Check that every required item flagged as a finding has non-empty
/// finding text. Whitespace counts as text.
///
/// # Errors
///
/// `FindingError::Incomplete` listing the offending clauses in checklist order.
pub fn validate_submission(checklist: &[ChecklistItem], set: &FindingSet) -> Result<(), FindingError> {
    let clauses: Vec<String> = checklist
        .iter()
        .filter(|item| item.required)
        .filter(|item| {
            set.get(&item.id)
                .is_some_and(|f| f.has_finding && f.finding.is_empty())
        })
        .map(|item| item.clause.clone())
        .collect();
    if clauses.is_empty() {
        Ok(())
    } else {
        Err(FindingError::Incomplete { clauses })
    }
}

/// The outcome of an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// The final set with unconfirmed markers cleared.
    pub findings: FindingSet,
    pub findings_identified: usize,
    pub markers_cleared: usize,
}

pub struct ChecklistSession<S: FindingSink> {
    audit_ref: String,
    checklist: Vec<ChecklistItem>,
    set: FindingSet,
    sink: S,
    today: NaiveDate,
    dirty: bool,
}

impl<S: FindingSink> ChecklistSession<S> {
    /// Open a session, reconciling saved and historical findings.
    #[must_use]
    pub fn open(
        audit_ref: impl Into<String>,
        checklist: Vec<ChecklistItem>,
        existing: &[FindingRecord],
        historical: &[HistoricalFinding],
        sink: S,
        today: NaiveDate,
    ) -> Self {
        let set = initialize_findings(&checklist, existing, historical, today);
        Self {
            audit_ref: audit_ref.into(),
            checklist,
            set,
            sink,
            today,
            dirty: false,
        }
    }

    #[must_use]
    pub fn findings(&self) -> &FindingSet {
        &self.set
    }

    #[must_use]
    pub fn checklist(&self) -> &[ChecklistItem] {
        &self.checklist
    }

    #[must_use]
    pub const fn has_pending_text(&self) -> bool {
        self.dirty
    }

    fn save(&mut self) -> Result<(), FindingError> {
        let records = self.set.to_records(&self.audit_ref, self.today.year())?;
        self.sink.persist(&self.audit_ref, &records)?;
        self.dirty = false;
        tracing::debug!(audit = %self.audit_ref, records = records.len(), "findings saved");
        Ok(())
    }

    fn apply_and_save(&mut self, next: FindingSet) -> Result<(), FindingError> {
        self.set = next;
        self.save()
    }

    /// # Errors
    ///
    /// Unknown item or persistence failure.
    pub fn set_has_finding(&mut self, item_id: &str, value: bool) -> Result<(), FindingError> {
        let next = self.set.set_has_finding(item_id, value)?;
        self.apply_and_save(next)
    }

    /// # Errors
    ///
    /// Unknown item or persistence failure.
    pub fn set_finding_level(
        &mut self,
        item_id: &str,
        level: FindingLevel,
    ) -> Result<(), FindingError> {
        let next = self.set.set_finding_level(item_id, level)?;
        self.apply_and_save(next)
    }

    /// # Errors
    ///
    /// Unknown item or persistence failure.
    pub fn add_attachment(
        &mut self,
        item_id: &str,
        attachment: Attachment,
    ) -> Result<(), FindingError> {
        let next = self.set.add_attachment(item_id, attachment)?;
        self.apply_and_save(next)
    }

    /// # Errors
    ///
    /// Unknown item, bad index or persistence failure.
    pub fn remove_attachment(&mut self, item_id: &str, index: usize) -> Result<(), FindingError> {
        let next = self.set.remove_attachment(item_id, index)?;
        self.apply_and_save(next)
    }

    /// Replace supporting records. The kind must be the one the item's clause
    /// collects.
    ///
    /// # Errors
    ///
    /// `FindingError::SupportingKindMismatch`, unknown item or persistence
    /// failure.
    pub fn set_supporting_data(
        &mut self,
        item_id: &str,
        data: SupportingData,
    ) -> Result<(), FindingError> {
        let item = self
            .checklist
            .iter()
            .find(|i| i.id == item_id)
            .ok_or_else(|| FindingError::UnknownItem {
                item_id: item_id.to_string(),
            })?;
        let expected = SupportingKind::for_clause(&item.clause);
        if expected != Some(data.kind()) {
            return Err(FindingError::SupportingKindMismatch {
                item_id: item_id.to_string(),
                expected: expected.map_or_else(|| "no supporting".to_string(), |k| k.to_string()),
                got: data.kind(),
            });
        }
        let next = self.set.set_supporting_data(item_id, data)?;
        self.apply_and_save(next)
    }

    /// Edit finding text in memory; persisted by [`Self::commit_text`].
    ///
    /// # Errors
    ///
    /// Unknown item.
    pub fn edit_finding_text(&mut self, item_id: &str, text: &str) -> Result<(), FindingError> {
        self.set = self.set.set_finding_text(item_id, text)?;
        self.dirty = true;
        Ok(())
    }

    /// Edit observation text in memory; persisted by [`Self::commit_text`].
    ///
    /// # Errors
    ///
    /// Unknown item.
    pub fn edit_observation(&mut self, item_id: &str, text: &str) -> Result<(), FindingError> {
        self.set = self.set.set_observation(item_id, text)?;
        self.dirty = true;
        Ok(())
    }

    /// Persist pending text edits. No-op when nothing is pending.
    ///
    /// # Errors
    ///
    /// Persistence failure; the edits stay pending.
    pub fn commit_text(&mut self) -> Result<(), FindingError> {
        if self.dirty {
            self.save()?;
        }
        Ok(())
    }

    /// Validate, persist the final state and return the cleaned set.
    ///
    /// On rejection nothing is persisted and the session keeps its state.
    ///
    /// # Errors
    ///
    /// `FindingError::Incomplete` or a persistence failure.
    pub fn submit(&mut self) -> Result<Submission, FindingError> {
        validate_submission(&self.checklist, &self.set)?;
        self.save()?;
        let (findings, markers_cleared) = self.set.cleaned();
        tracing::info!(audit = %self.audit_ref, markers_cleared, "checklist submitted");
        Ok(Submission {
            findings_identified: findings.identified_count(),
            findings,
            markers_cleared,
        })
    }
}
