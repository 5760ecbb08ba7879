//! Database connection and operations

use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::sync::Arc;

use crate::migrations::run_migrations;
use crate::Result;

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        // WAL mode for better concurrent performance
        let _: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;

        run_migrations(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        run_migrations(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock();
        f(&conn)
    }

    /// Raw JSON text stored under `scope`/`key`
    pub fn get_value(&self, scope: &str, key: &str) -> Result<Option<String>> {
        self.with_connection(|conn| {
            let value = conn
                .query_row(
                    "SELECT value FROM kv_store WHERE scope = ?1 AND key = ?2",
                    [scope, key],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(value)
        })
    }

    /// Upsert; the newest write replaces whatever was there.
    pub fn set_value(&self, scope: &str, key: &str, value: &str) -> Result<()> {
        let updated_at = Utc::now().to_rfc3339();
        self.with_connection(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO kv_store (scope, key, value, updated_at)
                 VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![scope, key, value, updated_at],
            )?;
            Ok(())
        })
    }

    pub fn keys_in_scope(&self, scope: &str) -> Result<Vec<String>> {
        self.with_connection(|conn| {
            let mut stmt =
                conn.prepare("SELECT key FROM kv_store WHERE scope = ?1 ORDER BY key")?;
            let keys = stmt
                .query_map([scope], |row| row.get(0))?
                .collect::<std::result::Result<Vec<String>, _>>()?;
            Ok(keys)
        })
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        db.with_connection(|conn| {
            let count: i32 =
                conn.query_row("SELECT COUNT(*) FROM kv_store", [], |row| row.get(0))?;
            assert_eq!(count, 0);
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_scopes_do_not_collide() {
        let db = Database::open_in_memory().unwrap();
        db.set_value("github", "accessToken", "\"a\"").unwrap();
        db.set_value("gitlab", "accessToken", "\"b\"").unwrap();

        assert_eq!(
            db.get_value("github", "accessToken").unwrap().as_deref(),
            Some("\"a\"")
        );
        assert_eq!(
            db.get_value("gitlab", "accessToken").unwrap().as_deref(),
            Some("\"b\"")
        );
        assert_eq!(db.keys_in_scope("github").unwrap(), vec!["accessToken"]);
    }

    #[test]
    fn test_set_overwrites() {
        let db = Database::open_in_memory().unwrap();
        db.set_value("github", "accessToken", "1").unwrap();
        db.set_value("github", "accessToken", "2").unwrap();

        assert_eq!(
            db.get_value("github", "accessToken").unwrap().as_deref(),
            Some("2")
        );
        assert_eq!(db.keys_in_scope("github").unwrap().len(), 1);
    }
}
