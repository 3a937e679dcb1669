//! Repository implementations: `impl FlowService` blocks per entity.

pub mod audit;
pub mod finding;
pub mod historical;
pub mod matrix;
pub mod preference;
pub mod template;
pub mod user;
