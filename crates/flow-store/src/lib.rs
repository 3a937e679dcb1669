//! # flow-store
//!
//! Persistence for AuditFlow: JSON documents in a key-value store, typed
//! repositories, the `FlowService` that every command goes through, and the
//! JSONL change trail.
//!
//! Each storage key maps to one JSON document (`<data_dir>/<key>.json` for
//! the file store). Writes are whole-document and last-write-wins.

pub mod collection;
pub mod error;
pub mod keys;
pub mod kv;
pub mod repos;
pub mod service;
pub mod trail;
pub mod updates;

mod test_support;

pub use collection::{JsonCollection, Keyed, Repository};
pub use error::StoreError;
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use repos::audit::NewAudit;
pub use repos::finding::FindingWriter;
pub use service::FlowService;
pub use trail::TrailWriter;
