//! # Database State
//!
//! Wraps the `Database` handle for use in commands.
//!
//! ## Thread Safety
//! `Database` holds a `SqlitePool` plus the collection write lock, both
//! safe to share. Commands may run concurrently without extra locking.

use shelf_db::Database;

/// Wrapper around `Database` for app state management.
#[derive(Debug, Clone)]
pub struct DbState {
    db: Database,
}

impl DbState {
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// Returns a reference to the inner Database.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let stock = db_state.inner().products().load_all().await?;
    /// ```
    pub fn inner(&self) -> &Database {
        &self.db
    }
}
