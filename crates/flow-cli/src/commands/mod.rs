pub mod audit;
pub mod checklist;
pub mod dispatch;
pub mod export;
pub mod finding;
pub mod import;
pub mod metrics;
pub mod pref;
pub mod shared;
pub mod template;
pub mod user;
