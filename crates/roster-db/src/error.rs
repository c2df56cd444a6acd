//! Database error types for roster-db.

use roster_core::store::StoreError;
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    /// Whether SQLite rejected the statement on a constraint
    /// (foreign key, unique, check, not null).
    #[must_use]
    pub fn is_constraint(&self) -> bool {
        match self {
            Self::LibSql(e) => e.to_string().to_lowercase().contains("constraint"),
            _ => false,
        }
    }
}

impl From<DatabaseError> for StoreError {
    fn from(error: DatabaseError) -> Self {
        if error.is_constraint() {
            Self::Conflict(error.to_string())
        } else {
            Self::Unavailable(error.to_string())
        }
    }
}
