//! # roster-db
//!
//! libSQL storage for Roster: students, the staff directory, and mentor
//! assignments.
//!
//! Repository methods live on [`service::RosterService`] (one `impl` block per
//! entity under `repos/`), and [`store`] adapts them to the `roster-core`
//! store traits the allocation pipeline is written against.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
pub mod store;
mod test_support;

use error::DatabaseError;
use libsql::Builder;

/// Database handle: a libSQL database and its single connection.
pub struct RosterDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl RosterDb {
    /// Open a local database file, or `":memory:"`.
    ///
    /// Runs migrations on every open; they are idempotent.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Per-connection in SQLite
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let roster_db = Self { db, conn };
        roster_db.run_migrations().await?;
        tracing::debug!(path, "db: opened");
        Ok(roster_db)
    }

    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed id via libSQL, e.g. `"stf-a3f8b2c1"`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query("SELECT ?1 || '-' || lower(hex(randomblob(4)))", [prefix])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}
