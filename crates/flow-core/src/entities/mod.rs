//! Entity structs for all AuditFlow domain objects.
//!
//! JSON field names are camelCase so stored documents keep the layout the
//! application has always written. All structs derive `Serialize`,
//! `Deserialize`, and `JsonSchema` for JSON roundtrip and schema validation.

mod audit;
mod checklist;
mod finding;
mod historical;
mod template;
mod user;

pub use audit::{AssignedUser, Audit};
pub use checklist::ChecklistItem;
pub use finding::{
    Attachment, ComponentData, FindingRecord, MaintenanceData, StaffData, SupportingData, ToolData,
};
pub use historical::HistoricalFinding;
pub use template::AuditTemplate;
pub use user::User;
