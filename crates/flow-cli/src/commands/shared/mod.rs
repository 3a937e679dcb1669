pub mod files;
pub mod limit;
pub mod parse;
