//! Engine error types.

use roster_core::store::StoreError;
use thiserror::Error;

/// Errors that end a pipeline phase.
///
/// Only [`EngineError::EmptyBatch`] aborts a whole run. The others end the
/// allocation phase and are recorded in the report's skip reason.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The upload contained no rows at all.
    #[error("Batch contains no rows")]
    EmptyBatch,

    /// Allocation was triggered but the batch names no department.
    #[error("Batch has no department; cannot choose allocators")]
    MissingDepartment,

    /// Allocation was triggered but nobody can receive mentees.
    #[error("No active allocators{}", for_department(.department.as_deref()))]
    NoEligibleAllocators { department: Option<String> },

    /// A store call outside the per-item loops failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

fn for_department(department: Option<&str>) -> String {
    department.map_or_else(String::new, |d| format!(" for department '{d}'"))
}
