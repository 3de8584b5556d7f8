//! SQLite persistence layer.
//!
//! RULE: Only the store module talks to the database.
//! Domain modules call store methods; they never execute SQL directly.

use crate::error::DashboardResult;
use rusqlite::Connection;

mod overrides;

pub use overrides::OverrideRow;

pub struct DashboardStore {
    conn: Connection,
    path: Option<String>, // None for :memory:, Some(path) for file
}

impl DashboardStore {
    pub fn open(path: &str) -> DashboardResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (shared-memory and :memory: ignore it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        log::debug!("opened workload store at {path}");
        Ok(Self {
            conn,
            path: Some(path.to_string()),
        })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> DashboardResult<Self> {
        let conn = Connection::open(":memory:")?;
        Ok(Self { conn, path: None })
    }

    /// Reopen a new connection to the same database.
    /// For in-memory databases, this returns a new in-memory database (isolated).
    pub fn reopen(&self) -> DashboardResult<Self> {
        match &self.path {
            Some(p) => Self::open(p),
            None => Self::in_memory(),
        }
    }

    /// Reject writes on this connection (`PRAGMA query_only`).
    /// Viewing commands open the store this way.
    pub fn set_read_only(&self, read_only: bool) -> DashboardResult<()> {
        let value = if read_only { "ON" } else { "OFF" };
        self.conn.execute_batch(&format!("PRAGMA query_only = {value};"))?;
        Ok(())
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> DashboardResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_workload_overrides.sql"))?;
        Ok(())
    }
}
