//! The per-audit finding set and its reconciliation rules.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use flow_core::entities::{
    Attachment, ChecklistItem, ComponentData, FindingRecord, HistoricalFinding, MaintenanceData,
    StaffData, SupportingData, ToolData,
};
use flow_core::enums::FindingLevel;
use flow_core::ids::{PREFIX_FINDING, generate_id};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::FindingError;

/// Text prefix marking a finding pre-filled from a historical record.
pub const HISTORICAL_MARKER: &str = "[Previous finding from";

/// The full marker for a historical record from `year`.
#[must_use]
pub fn historical_marker(year: &str) -> String {
    format!("{HISTORICAL_MARKER} {year}]: ")
}

/// The working state of one checklist item's finding.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistFinding {
    pub has_finding: bool,
    pub finding: String,
    pub observation: String,
    pub finding_level: FindingLevel,
    #[serde(default)]
    pub is_historical: bool,
    #[serde(default)]
    pub staff_data: Vec<StaffData>,
    #[serde(default)]
    pub tool_data: Vec<ToolData>,
    #[serde(default)]
    pub component_data: Vec<ComponentData>,
    #[serde(default)]
    pub maintenance_data: Vec<MaintenanceData>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl ChecklistFinding {
    /// Text still carries a historical marker the auditor never confirmed.
    #[must_use]
    pub fn has_unconfirmed_marker(&self) -> bool {
        !self.has_finding && self.finding.starts_with(HISTORICAL_MARKER)
    }

    fn from_record(record: &FindingRecord) -> Self {
        Self {
            has_finding: record.finding_identified(),
            finding: record.finding.clone(),
            observation: record.observation.clone(),
            finding_level: record.finding_level,
            is_historical: false,
            staff_data: record.staff_data.clone(),
            tool_data: record.tool_data.clone(),
            component_data: record.component_data.clone(),
            maintenance_data: record.maintenance_data.clone(),
            attachments: record.attachments.clone(),
        }
    }

    fn from_historical(record: &HistoricalFinding, today: NaiveDate) -> Self {
        let year = record
            .year
            .clone()
            .filter(|y| !y.trim().is_empty())
            .or_else(|| record.date.map(|d| d.year().to_string()))
            .unwrap_or_else(|| today.year().to_string());
        Self {
            finding: format!("{}{}", historical_marker(&year), record.finding),
            observation: record.observation.clone(),
            finding_level: record.finding_level.unwrap_or_default(),
            is_historical: true,
            ..Self::default()
        }
    }
}

/// One [`ChecklistFinding`] per checklist item id.
///
/// Update methods leave `self` untouched and return the updated set, so a
/// failed update never loses state.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(transparent)]
pub struct FindingSet {
    entries: BTreeMap<String, ChecklistFinding>,
}

/// Build the working set for an audit's checklist.
///
/// Saved findings win: when any exist they seed the set, missing items start
/// blank and historical records are ignored. Otherwise each item is matched
/// against historical records by clause (case-insensitive) and pre-filled from
/// the most recent match. Undated records count as oldest; among equal dates
/// the first imported wins. `today` supplies the year for undated records
/// with no year.
#[must_use]
pub fn initialize_findings(
    checklist: &[ChecklistItem],
    existing: &[FindingRecord],
    historical: &[HistoricalFinding],
    today: NaiveDate,
) -> FindingSet {
    let mut entries: BTreeMap<String, ChecklistFinding> = BTreeMap::new();

    if !existing.is_empty() {
        for record in existing {
            entries.insert(
                record.checklist_item_id.clone(),
                ChecklistFinding::from_record(record),
            );
        }
        for item in checklist {
            entries.entry(item.id.clone()).or_default();
        }
        return FindingSet { entries };
    }

    let mut prefilled = 0usize;
    for item in checklist {
        let best = historical
            .iter()
            .filter(|h| h.matches_clause(&item.clause))
            .fold(None::<&HistoricalFinding>, |best, h| match best {
                Some(b) if h.date <= b.date => Some(b),
                _ => Some(h),
            });
        let finding = best.map_or_else(ChecklistFinding::default, |h| {
            prefilled += 1;
            ChecklistFinding::from_historical(h, today)
        });
        entries.insert(item.id.clone(), finding);
    }
    if prefilled > 0 {
        tracing::debug!(prefilled, "pre-filled findings from historical records");
    }
    FindingSet { entries }
}

impl FindingSet {
    #[must_use]
    pub fn get(&self, item_id: &str) -> Option<&ChecklistFinding> {
        self.entries.get(item_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ChecklistFinding)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Items flagged as findings.
    #[must_use]
    pub fn identified_count(&self) -> usize {
        self.entries.values().filter(|f| f.has_finding).count()
    }

    fn update<F>(&self, item_id: &str, apply: F) -> Result<Self, FindingError>
    where
        F: FnOnce(&mut ChecklistFinding) -> Result<(), FindingError>,
    {
        let mut next = self.clone();
        let entry = next
            .entries
            .get_mut(item_id)
            .ok_or_else(|| FindingError::UnknownItem {
                item_id: item_id.to_string(),
            })?;
        apply(entry)?;
        Ok(next)
    }

    /// # Errors
    ///
    /// `FindingError::UnknownItem` when `item_id` is not in the set.
    pub fn set_has_finding(&self, item_id: &str, value: bool) -> Result<Self, FindingError> {
        self.update(item_id, |f| {
            f.has_finding = value;
            Ok(())
        })
    }

    /// # Errors
    ///
    /// `FindingError::UnknownItem` when `item_id` is not in the set.
    pub fn set_finding_text(&self, item_id: &str, text: &str) -> Result<Self, FindingError> {
        self.update(item_id, |f| {
            f.finding = text.to_string();
            Ok(())
        })
    }

    /// # Errors
    ///
    /// `FindingError::UnknownItem` when `item_id` is not in the set.
    pub fn set_observation(&self, item_id: &str, text: &str) -> Result<Self, FindingError> {
        self.update(item_id, |f| {
            f.observation = text.to_string();
            Ok(())
        })
    }

    /// # Errors
    ///
    /// `FindingError::UnknownItem` when `item_id` is not in the set.
    pub fn set_finding_level(
        &self,
        item_id: &str,
        level: FindingLevel,
    ) -> Result<Self, FindingError> {
        self.update(item_id, |f| {
            f.finding_level = level;
            Ok(())
        })
    }

    /// # Errors
    ///
    /// `FindingError::UnknownItem` when `item_id` is not in the set.
    pub fn add_attachment(
        &self,
        item_id: &str,
        attachment: Attachment,
    ) -> Result<Self, FindingError> {
        self.update(item_id, |f| {
            f.attachments.push(attachment);
            Ok(())
        })
    }

    /// # Errors
    ///
    /// `FindingError::UnknownItem` for an unknown item and
    /// `FindingError::AttachmentIndex` when `index` is out of range.
    pub fn remove_attachment(&self, item_id: &str, index: usize) -> Result<Self, FindingError> {
        self.update(item_id, |f| {
            if index >= f.attachments.len() {
                return Err(FindingError::AttachmentIndex {
                    item_id: item_id.to_string(),
                    index,
                });
            }
            f.attachments.remove(index);
            Ok(())
        })
    }

    /// Replace one kind of supporting records wholesale.
    ///
    /// # Errors
    ///
    /// `FindingError::UnknownItem` when `item_id` is not in the set.
    pub fn set_supporting_data(
        &self,
        item_id: &str,
        data: SupportingData,
    ) -> Result<Self, FindingError> {
        self.update(item_id, |f| {
            match data {
                SupportingData::Staff(v) => f.staff_data = v,
                SupportingData::Tools(v) => f.tool_data = v,
                SupportingData::Components(v) => f.component_data = v,
                SupportingData::Maintenance(v) => f.maintenance_data = v,
            }
            Ok(())
        })
    }

    /// A copy with unconfirmed historical marker text cleared, plus how many
    /// entries were cleared.
    #[must_use]
    pub fn cleaned(&self) -> (Self, usize) {
        let mut next = self.clone();
        let mut cleared = 0;
        for finding in next.entries.values_mut() {
            if finding.has_unconfirmed_marker() {
                finding.finding.clear();
                cleared += 1;
            }
        }
        (next, cleared)
    }

    /// The persisted form of the set.
    ///
    /// Unconfirmed marker text is cleared, `isHistorical` is reset and every
    /// record is stamped with `year`.
    ///
    /// # Errors
    ///
    /// `FindingError::Core` if a record id cannot be generated.
    pub fn to_records(
        &self,
        audit_ref: &str,
        year: i32,
    ) -> Result<Vec<FindingRecord>, FindingError> {
        let (clean, _) = self.cleaned();
        clean
            .entries
            .into_iter()
            .map(|(item_id, f)| -> Result<FindingRecord, FindingError> {
                Ok(FindingRecord {
                    id: generate_id(PREFIX_FINDING)?,
                    audit_ref: audit_ref.to_string(),
                    checklist_item_id: item_id,
                    has_finding: Some(f.has_finding),
                    finding: f.finding,
                    observation: f.observation,
                    finding_level: f.finding_level,
                    year: year.to_string(),
                    is_historical: false,
                    staff_data: f.staff_data,
                    tool_data: f.tool_data,
                    component_data: f.component_data,
                    maintenance_data: f.maintenance_data,
                    attachments: f.attachments,
                })
            })
            .collect()
    }
}
