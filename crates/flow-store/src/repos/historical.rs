//! Historical findings: stored list, import merge and reset.

use flow_core::entities::HistoricalFinding;
use flow_core::enums::{EntityType, TrailOp};
use flow_core::responses::ImportSummary;
use flow_findings::{HistoricalImport, merge_historical};

use crate::collection::{load_json, save_json};
use crate::error::StoreError;
use crate::keys;
use crate::service::FlowService;

impl FlowService {
    /// # Errors
    ///
    /// Storage failure or a corrupt document.
    pub fn list_historical(&self) -> Result<Vec<HistoricalFinding>, StoreError> {
        Ok(load_json(self.store(), keys::HISTORICAL_FINDINGS)?.unwrap_or_default())
    }

    /// Merge parsed records into the stored list. Records already stored are
    /// counted as duplicates and not added again.
    ///
    /// # Errors
    ///
    /// Storage failure.
    pub fn import_historical(
        &self,
        source: &str,
        import: HistoricalImport,
    ) -> Result<ImportSummary, StoreError> {
        let mut stored = self.list_historical()?;
        let outcome = merge_historical(&mut stored, import.records);
        if outcome.imported > 0 {
            save_json(self.store(), keys::HISTORICAL_FINDINGS, &stored)?;
            self.record(
                TrailOp::Import,
                EntityType::HistoricalFinding,
                keys::HISTORICAL_FINDINGS,
                &serde_json::json!({ "source": source, "imported": outcome.imported }),
            )?;
        }
        tracing::info!(
            source,
            imported = outcome.imported,
            duplicates = outcome.duplicates,
            skipped = import.skipped,
            "historical findings imported"
        );
        Ok(ImportSummary {
            source: source.to_string(),
            imported: outcome.imported,
            skipped: import.skipped,
            duplicates: outcome.duplicates,
        })
    }

    /// Remove all historical findings. Returns how many were removed.
    ///
    /// # Errors
    ///
    /// Storage failure.
    pub fn clear_historical(&self) -> Result<usize, StoreError> {
        let count = self.list_historical()?.len();
        if self.store().remove(keys::HISTORICAL_FINDINGS)? {
            self.record(
                TrailOp::Delete,
                EntityType::HistoricalFinding,
                keys::HISTORICAL_FINDINGS,
                &count,
            )?;
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use flow_findings::parse_historical_csv;
    use pretty_assertions::assert_eq;

    use crate::test_support::helpers::test_service;

    const CSV: &str = "clause,finding,year\n145.A.30 Personnel requirements,Manpower plan outdated,2022\n,,\n";

    #[test]
    fn reimport_counts_duplicates() {
        let svc = test_service();
        let first = svc
            .import_historical("h.csv", parse_historical_csv(CSV.as_bytes()).unwrap())
            .unwrap();
        assert_eq!((first.imported, first.skipped, first.duplicates), (1, 1, 0));

        let second = svc
            .import_historical("h.csv", parse_historical_csv(CSV.as_bytes()).unwrap())
            .unwrap();
        assert_eq!((second.imported, second.duplicates), (0, 1));
        assert_eq!(svc.list_historical().unwrap().len(), 1);
    }

    #[test]
    fn clear_empties_list() {
        let svc = test_service();
        svc.import_historical("h.csv", parse_historical_csv(CSV.as_bytes()).unwrap())
            .unwrap();
        assert_eq!(svc.clear_historical().unwrap(), 1);
        assert!(svc.list_historical().unwrap().is_empty());
        assert_eq!(svc.clear_historical().unwrap(), 0);
    }
}
