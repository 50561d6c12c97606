//! SQLite product store for the labeling tools.

pub mod products;
pub mod schema;

use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::{Connection, OpenFlags};

/// Thread-safe database handle wrapping a single SQLite connection.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open or create a database at the given path and ensure the schema exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self::wrap(conn);
        db.configure()?;
        db.migrate()?;
        Ok(db)
    }

    /// Open an existing database without write access.
    ///
    /// Fails when the file does not exist. The schema is not touched, so a
    /// database without a `products` table only fails once it is queried.
    pub fn open_read_only(path: impl AsRef<Path>) -> Result<Self, DbError> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self::wrap(conn))
    }

    /// Create an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self::wrap(conn);
        db.configure()?;
        db.migrate()?;
        Ok(db)
    }

    /// Access the underlying connection with a closure.
    pub fn with_conn<F, R>(&self, f: F) -> Result<R, DbError>
    where
        F: FnOnce(&Connection) -> Result<R, DbError>,
    {
        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        f(&conn)
    }

    fn wrap(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    fn configure(&self) -> Result<(), DbError> {
        self.with_conn(|conn| {
            conn.execute_batch("PRAGMA busy_timeout=5000;")?;
            Ok(())
        })
    }

    fn migrate(&self) -> Result<(), DbError> {
        self.with_conn(|conn| {
            schema::run_migrations(conn)?;
            Ok(())
        })
    }
}

/// Database error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Database lock poisoned")]
    LockPoisoned,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory_creates_products_table() {
        let db = Database::open_in_memory().expect("Failed to create test DB");
        assert!(db.list_products().unwrap().is_empty());
    }

    #[test]
    fn test_open_read_only_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = Database::open_read_only(dir.path().join("missing.db"));
        assert!(result.is_err());
    }

    #[test]
    fn test_open_read_only_sees_rows_written_by_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scanner_db.db");
        {
            let db = Database::open(&path).unwrap();
            db.insert_product("5901234123457", "Still Water", "330")
                .unwrap();
        }

        let db = Database::open_read_only(&path).unwrap();
        let products = db.list_products().unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Still Water");
    }

    #[test]
    fn test_read_only_database_without_table_fails_on_query() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.db");
        Connection::open(&path)
            .unwrap()
            .execute_batch("CREATE TABLE other (id INTEGER);")
            .unwrap();

        let db = Database::open_read_only(&path).unwrap();
        assert!(matches!(db.list_products(), Err(DbError::Sqlite(_))));
    }
}
