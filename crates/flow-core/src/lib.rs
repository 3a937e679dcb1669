//! # flow-core
//!
//! Core types, ID generation, lifecycle rules, and error types for AuditFlow.
//!
//! This crate provides the foundational types shared across all AuditFlow crates:
//! - Entity structs for all domain objects (audits, users, templates, findings)
//! - Status enums with state machine transitions
//! - ID prefix constants and generation helpers
//! - Audit lifecycle rules (date-derived status, reference generation)
//! - KPI duration metrics
//! - Cross-cutting error types
//! - Change trail envelope for JSONL persistence
//! - CLI response types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod lifecycle;
pub mod metrics;
pub mod responses;
pub mod trail;
