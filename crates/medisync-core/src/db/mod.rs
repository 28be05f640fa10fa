//! Database layer for the MedisSync store.

mod schema;
mod reference;
mod patients;
mod encounters;
mod claims;
mod appointments;

pub use schema::*;
#[allow(unused_imports)]
pub use reference::*;
#[allow(unused_imports)]
pub use patients::*;
#[allow(unused_imports)]
pub use encounters::*;
#[allow(unused_imports)]
pub use claims::*;
#[allow(unused_imports)]
pub use appointments::*;

use rusqlite::Connection;
use std::path::Path;
use thiserror::Error;

/// Database errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

pub type DbResult<T> = Result<T, DbError>;

/// The application store: one connection owning every collection.
///
/// The product operates on session-scoped data, so [`Database::open_in_memory`]
/// is the canonical constructor; [`Database::open`] exists for hosts that want
/// a scratch file.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open a store at the given path, creating it if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Create a session-scoped in-memory store.
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Initialize schema.
    fn initialize(&self) -> DbResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }
}
