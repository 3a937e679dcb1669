pub mod audit;
pub mod checklist;
pub mod export;
pub mod finding;
pub mod import;
pub mod pref;
pub mod template;
pub mod user;

pub use audit::AuditCommands;
pub use checklist::ChecklistCommands;
pub use export::ExportCommands;
pub use finding::FindingCommands;
pub use import::ImportCommands;
pub use pref::PrefCommands;
pub use template::TemplateCommands;
pub use user::UserCommands;
