//! # roster-schema
//!
//! JSON Schema generation, validation, and registry for Roster.
//!
//! This crate provides:
//! - `SchemaRegistry`: central store of the JSON Schemas for upload rows,
//!   entities, and reports
//! - `RowValidator`: the explicit validation step that turns each raw upload
//!   row into a tagged `RowOutcome` before it enters the pipeline
//! - Schema export for the `roster schema` command
//!
//! Types are defined in `roster-core` with `#[derive(JsonSchema)]`.

mod error;
mod registry;
pub mod rows;

pub use error::SchemaError;
pub use registry::SchemaRegistry;
pub use rows::RowValidator;
