//! The active audit matrix: an imported one if saved, else the built-in.

use flow_core::enums::{EntityType, TrailOp};
use flow_matrix::AuditMatrix;

use crate::collection::{load_json, save_json};
use crate::error::StoreError;
use crate::keys;
use crate::service::FlowService;

impl FlowService {
    /// # Errors
    ///
    /// Storage failure or a corrupt matrix document.
    pub fn active_matrix(&self) -> Result<AuditMatrix, StoreError> {
        Ok(load_json(self.store(), keys::MATRIX)?.unwrap_or_else(AuditMatrix::builtin))
    }

    /// Whether an imported matrix overrides the built-in one.
    ///
    /// # Errors
    ///
    /// Storage failure.
    pub fn has_custom_matrix(&self) -> Result<bool, StoreError> {
        Ok(self.store().read(keys::MATRIX)?.is_some())
    }

    /// # Errors
    ///
    /// Storage failure.
    pub fn save_matrix(&self, matrix: &AuditMatrix) -> Result<(), StoreError> {
        save_json(self.store(), keys::MATRIX, matrix)?;
        self.record(
            TrailOp::Import,
            EntityType::Matrix,
            keys::MATRIX,
            &matrix.item_count(),
        )?;
        tracing::info!(items = matrix.item_count(), "audit matrix saved");
        Ok(())
    }

    /// Drop the imported matrix. Returns whether one was stored.
    ///
    /// # Errors
    ///
    /// Storage failure.
    pub fn reset_matrix(&self) -> Result<bool, StoreError> {
        let removed = self.store().remove(keys::MATRIX)?;
        if removed {
            self.record(TrailOp::Delete, EntityType::Matrix, keys::MATRIX, keys::MATRIX)?;
        }
        Ok(removed)
    }
}
