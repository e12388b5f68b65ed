use rusqlite::Connection;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::error::TrackerResult;
use crate::schema;

/// Handle to the expense database.
///
/// Owns a single connection behind a mutex; every operation locks, runs one
/// statement, and unlocks before returning. There is no cross-call
/// transaction state.
#[derive(Debug)]
pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    /// Open (or create) the database file and ensure the schema exists.
    pub fn open<P: AsRef<Path>>(path: P) -> TrackerResult<Store> {
        let conn = Connection::open(path)?;
        // WAL survives crashes better than the default rollback journal
        conn.pragma_update(None, "journal_mode", "WAL")?;
        let store = Store {
            conn: Mutex::new(conn),
        };
        store.initialize()?;
        Ok(store)
    }

    /// In-memory database, used by tests.
    pub fn open_in_memory() -> TrackerResult<Store> {
        let store = Store {
            conn: Mutex::new(Connection::open_in_memory()?),
        };
        store.initialize()?;
        Ok(store)
    }

    /// Create tables and seed categories. Idempotent; `open` already calls
    /// this, so explicit calls are only needed to re-check an open handle.
    pub fn initialize(&self) -> TrackerResult<()> {
        let conn = self.conn();
        schema::create_tables(&conn)?;
        schema::seed_categories(&conn)?;
        Ok(())
    }

    pub(crate) fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap()
    }
}
