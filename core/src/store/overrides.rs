//! Store methods for workload overrides.

use crate::error::DashboardResult;
use rusqlite::{params, OptionalExtension};

use super::DashboardStore;

/// A raw override row as persisted: the key is still in wire format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideRow {
    pub key:        String,
    pub percentage: i32,
    pub reasoning:  String,
}

impl DashboardStore {
    /// Insert or replace one override. A single statement, so the row is
    /// either fully written or untouched.
    pub fn upsert_override(
        &self,
        key:        &str,
        percentage: i32,
        reasoning:  &str,
    ) -> DashboardResult<()> {
        let updated_at = chrono::Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT OR REPLACE INTO workload_override (override_key, percentage, reasoning, updated_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![key, percentage, reasoning, updated_at],
        )?;
        Ok(())
    }

    pub fn all_overrides(&self) -> DashboardResult<Vec<OverrideRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT override_key, percentage, reasoning
             FROM workload_override ORDER BY override_key ASC",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(OverrideRow {
                    key:        row.get(0)?,
                    percentage: row.get(1)?,
                    reasoning:  row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn override_by_key(&self, key: &str) -> DashboardResult<Option<OverrideRow>> {
        let row = self
            .conn
            .query_row(
                "SELECT override_key, percentage, reasoning
                 FROM workload_override WHERE override_key = ?1",
                params![key],
                |row| {
                    Ok(OverrideRow {
                        key:        row.get(0)?,
                        percentage: row.get(1)?,
                        reasoning:  row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    // ── Test / summary helpers ────────────────────────────────────────

    /// Number of persisted overrides (for tests).
    pub fn override_count(&self) -> DashboardResult<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM workload_override",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
