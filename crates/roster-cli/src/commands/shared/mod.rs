pub mod files;
pub mod limit;
