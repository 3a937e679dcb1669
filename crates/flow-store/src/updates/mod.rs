//! Partial-update structs with builders, one per mutable entity.

pub mod audit;
pub mod user;
