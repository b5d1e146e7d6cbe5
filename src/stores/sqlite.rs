use rusqlite::{Connection, params};

use crate::HarnessError;
use crate::store::OrderedStore;

/// SQLite-backed candidate: an in-memory table with a plain key index.
/// Duplicate keys are separate rows. Its native range scans treat the upper
/// bound as exclusive; the inclusive variant is emulated with `<=`.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open_in_memory() -> Result<Self, HarnessError> {
        let conn = Connection::open_in_memory().map_err(|e| HarnessError::store(e.to_string()))?;
        ensure_schema(&conn)?;
        Ok(SqliteStore { conn })
    }
}

fn ensure_schema(conn: &Connection) -> Result<(), HarnessError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS records (
            key INTEGER NOT NULL,
            value TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_records_key ON records(key);",
    )
    .map_err(|e| HarnessError::store(e.to_string()))
}

fn collect_values(
    conn: &Connection,
    sql: &str,
    args: &[&dyn rusqlite::ToSql],
) -> Result<Vec<String>, HarnessError> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| HarnessError::store(e.to_string()))?;
    let rows = stmt
        .query_map(args, |row| row.get::<_, String>(0))
        .map_err(|e| HarnessError::store(e.to_string()))?;
    let mut values = Vec::new();
    for row in rows {
        values.push(row.map_err(|e| HarnessError::store(e.to_string()))?);
    }
    Ok(values)
}

impl OrderedStore for SqliteStore {
    fn insert(&mut self, key: i64, value: &str) -> Result<(), HarnessError> {
        self.conn
            .execute(
                "INSERT INTO records(key, value) VALUES(?1, ?2)",
                params![key, value],
            )
            .map_err(|e| HarnessError::store(e.to_string()))?;
        Ok(())
    }

    fn get_exact(&self, key: i64) -> Result<Vec<String>, HarnessError> {
        collect_values(
            &self.conn,
            "SELECT value FROM records WHERE key=?1",
            &[&key],
        )
    }

    fn get_all(&self, ascending: bool) -> Result<Vec<String>, HarnessError> {
        let sql = if ascending {
            "SELECT value FROM records ORDER BY key ASC, rowid ASC"
        } else {
            "SELECT value FROM records ORDER BY key DESC, rowid ASC"
        };
        collect_values(&self.conn, sql, &[])
    }

    fn get_range(
        &self,
        low: i64,
        high: i64,
        inclusive_high: bool,
    ) -> Result<Vec<String>, HarnessError> {
        let sql = if inclusive_high {
            "SELECT value FROM records WHERE key>=?1 AND key<=?2 ORDER BY key ASC"
        } else {
            "SELECT value FROM records WHERE key>=?1 AND key<?2 ORDER BY key ASC"
        };
        collect_values(&self.conn, sql, &[&low, &high])
    }

    fn remove(&mut self, key: i64, value: &str) -> Result<bool, HarnessError> {
        let affected = self
            .conn
            .execute(
                "DELETE FROM records WHERE rowid = (
                    SELECT rowid FROM records WHERE key=?1 AND value=?2 LIMIT 1
                )",
                params![key, value],
            )
            .map_err(|e| HarnessError::store(e.to_string()))?;
        Ok(affected > 0)
    }
}
