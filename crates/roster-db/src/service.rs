//! Service handle that the repository modules hang their methods on.

use crate::RosterDb;
use crate::error::DatabaseError;

/// Owns the database. Repository methods are added via `impl RosterService`
/// blocks in `repos/`.
pub struct RosterService {
    db: RosterDb,
}

impl RosterService {
    /// Open a local database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        Ok(Self {
            db: RosterDb::open_local(db_path).await?,
        })
    }

    #[must_use]
    pub const fn db(&self) -> &RosterDb {
        &self.db
    }
}
