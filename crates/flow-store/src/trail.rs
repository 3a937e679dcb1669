//! JSONL change-trail writer.
//!
//! Appends `ChangeRecord`s to per-day `<trail_dir>/<YYYY-MM-DD>.jsonl` files
//! using `serde_jsonlines::append_json_lines`.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use flow_core::trail::ChangeRecord;

use crate::error::StoreError;

pub struct TrailWriter {
    trail_dir: PathBuf,
    enabled: bool,
}

impl TrailWriter {
    /// Create a writer for `trail_dir`, creating the directory.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the directory cannot be created.
    pub fn new(trail_dir: PathBuf) -> Result<Self, StoreError> {
        std::fs::create_dir_all(&trail_dir).map_err(|source| StoreError::Io {
            path: trail_dir.clone(),
            source,
        })?;
        Ok(Self {
            trail_dir,
            enabled: true,
        })
    }

    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            trail_dir: PathBuf::new(),
            enabled: false,
        }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn trail_dir(&self) -> &Path {
        &self.trail_dir
    }

    fn day_file(&self, day: NaiveDate) -> PathBuf {
        self.trail_dir.join(format!("{}.jsonl", day.format("%Y-%m-%d")))
    }

    /// Append a record to the file for the day of its timestamp.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file write fails.
    pub fn append(&self, record: &ChangeRecord) -> Result<(), StoreError> {
        if !self.enabled {
            return Ok(());
        }
        let day = DateTime::parse_from_rfc3339(&record.ts)
            .map_or_else(|_| Utc::now().date_naive(), |ts| ts.date_naive());
        let path = self.day_file(day);
        serde_jsonlines::append_json_lines(&path, [record])
            .map_err(|source| StoreError::Io { path, source })?;
        Ok(())
    }

    /// All records written on `day`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` when the file exists but cannot be parsed.
    pub fn read_day(&self, day: NaiveDate) -> Result<Vec<ChangeRecord>, StoreError> {
        let path = self.day_file(day);
        if !self.enabled || !path.exists() {
            return Ok(Vec::new());
        }
        let read = || -> std::io::Result<Vec<ChangeRecord>> {
            serde_jsonlines::json_lines::<ChangeRecord, _>(&path)?.collect()
        };
        read().map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flow_core::enums::{EntityType, TrailOp};

    fn record(ts: &str, key: &str) -> ChangeRecord {
        ChangeRecord {
            v: 1,
            ts: ts.into(),
            op: TrailOp::Update,
            entity: EntityType::Audit,
            key: key.into(),
            data: serde_json::json!({}),
        }
    }

    #[test]
    fn appends_to_day_file() {
        let dir = tempfile::tempdir().unwrap();
        let writer = TrailWriter::new(dir.path().join("trail")).unwrap();
        writer.append(&record("2025-01-15T09:00:00+00:00", "AUD-2025-001")).unwrap();
        writer.append(&record("2025-01-15T10:00:00+00:00", "AUD-2025-002")).unwrap();
        writer.append(&record("2025-01-16T10:00:00+00:00", "AUD-2025-003")).unwrap();

        let day = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let records = writer.read_day(day).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].key, "AUD-2025-002");
        assert!(dir.path().join("trail/2025-01-16.jsonl").exists());
    }

    #[test]
    fn disabled_writer_is_noop() {
        let writer = TrailWriter::disabled();
        assert!(!writer.is_enabled());
        writer.append(&record("2025-01-15T09:00:00Z", "x")).unwrap();
    }
}
