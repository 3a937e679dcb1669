//! Service layer orchestrating document mutations with the change trail.
//!
//! `FlowService` owns the key-value store, one typed collection per entity
//! and the `TrailWriter`. Repo methods live in `repos/*` as `impl FlowService`.

use std::path::Path;
use std::sync::Arc;

use flow_core::entities::{Audit, AuditTemplate, User};
use flow_core::enums::{EntityType, TrailOp};
use flow_core::trail::ChangeRecord;
use serde::Serialize;

use crate::collection::JsonCollection;
use crate::error::StoreError;
use crate::keys;
use crate::kv::{FileStore, KeyValueStore, MemoryStore};
use crate::trail::TrailWriter;

/// Every mutation method follows this protocol:
/// 1. Load and validate against current state
/// 2. Write the document
/// 3. Append a `ChangeRecord` to the trail
pub struct FlowService {
    store: Arc<dyn KeyValueStore>,
    trail: TrailWriter,
    pub(crate) audits: JsonCollection<Audit>,
    pub(crate) users: JsonCollection<User>,
    pub(crate) templates: JsonCollection<AuditTemplate>,
}

impl FlowService {
    /// Open the file-backed store rooted at `data_dir`.
    ///
    /// The trail goes to `<data_dir>/trail` when `trail_enabled`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the data or trail directory cannot be
    /// created.
    pub fn open(data_dir: &Path, trail_enabled: bool) -> Result<Self, StoreError> {
        let store = FileStore::open(data_dir)?;
        let trail = if trail_enabled {
            TrailWriter::new(data_dir.join("trail"))?
        } else {
            TrailWriter::disabled()
        };
        tracing::debug!(data_dir = %data_dir.display(), trail_enabled, "opened data directory");
        Ok(Self::from_store(Arc::new(store), trail))
    }

    /// A service over an empty in-memory store with the trail disabled.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_store(Arc::new(MemoryStore::new()), TrailWriter::disabled())
    }

    #[must_use]
    pub fn from_store(store: Arc<dyn KeyValueStore>, trail: TrailWriter) -> Self {
        Self {
            audits: JsonCollection::new(Arc::clone(&store), keys::AUDITS),
            users: JsonCollection::new(Arc::clone(&store), keys::USERS),
            templates: JsonCollection::new(Arc::clone(&store), keys::TEMPLATES),
            store,
            trail,
        }
    }

    #[must_use]
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    #[must_use]
    pub const fn trail(&self) -> &TrailWriter {
        &self.trail
    }

    /// Append a trail record for a mutation that has already been written.
    pub(crate) fn record<T: Serialize + ?Sized>(
        &self,
        op: TrailOp,
        entity: EntityType,
        key: &str,
        data: &T,
    ) -> Result<(), StoreError> {
        let data = serde_json::to_value(data).map_err(|e| StoreError::Other(e.into()))?;
        self.trail.append(&ChangeRecord::new(op, entity, key, data))
    }
}
