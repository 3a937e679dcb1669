//! Audit update builder.

use chrono::NaiveDate;
use serde::Serialize;

/// Fields to change on an audit. `None` leaves a field untouched; for
/// optional fields `Some(None)` clears it.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtype: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objective: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub introduction: Option<Option<String>>,
}

impl AuditUpdate {
    #[must_use]
    pub const fn touches_dates(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some()
    }
}

#[derive(Default)]
pub struct AuditUpdateBuilder(AuditUpdate);

impl AuditUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn name(mut self, val: impl Into<String>) -> Self {
        self.0.name = Some(val.into());
        self
    }

    #[must_use]
    pub fn subtype(mut self, val: Option<String>) -> Self {
        self.0.subtype = Some(val);
        self
    }

    #[must_use]
    pub fn description(mut self, val: impl Into<String>) -> Self {
        self.0.description = Some(val.into());
        self
    }

    #[must_use]
    pub const fn start_date(mut self, val: Option<NaiveDate>) -> Self {
        self.0.start_date = Some(val);
        self
    }

    #[must_use]
    pub const fn end_date(mut self, val: Option<NaiveDate>) -> Self {
        self.0.end_date = Some(val);
        self
    }

    #[must_use]
    pub fn objective(mut self, val: Option<String>) -> Self {
        self.0.objective = Some(val);
        self
    }

    #[must_use]
    pub fn scope(mut self, val: Option<String>) -> Self {
        self.0.scope = Some(val);
        self
    }

    #[must_use]
    pub fn introduction(mut self, val: Option<String>) -> Self {
        self.0.introduction = Some(val);
        self
    }

    #[must_use]
    pub fn build(self) -> AuditUpdate {
        self.0
    }
}
