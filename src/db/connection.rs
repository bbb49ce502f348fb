use rusqlite::Connection;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::time::Duration;
use tracing::{debug, info};

use crate::errors::ServerError;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

// Per-thread connections, keyed by database path.
thread_local! {
    static DB_CONNS: RefCell<HashMap<String, Connection>> = RefCell::new(HashMap::new());
}

#[derive(Clone, Debug)]
pub struct Database {
    path: String,
}

impl Database {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Provides this thread's connection to the closure.
    ///
    /// Calls must not be nested on the same thread.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, ServerError>
    where
        F: FnOnce(&mut Connection) -> Result<T, ServerError>,
    {
        DB_CONNS
            .try_with(|cell| {
                let mut conns = cell
                    .try_borrow_mut()
                    .map_err(|_| ServerError::InternalError)?;
                if !conns.contains_key(&self.path) {
                    let conn = open_connection(&self.path)?;
                    conns.insert(self.path.clone(), conn);
                }
                let conn = conns
                    .get_mut(&self.path)
                    .ok_or(ServerError::InternalError)?;
                f(conn)
            })
            .map_err(|_| ServerError::InternalError)?
    }
}

fn open_connection(path: &str) -> Result<Connection, ServerError> {
    let conn = Connection::open(path).map_err(|e| ServerError::db("open DB failed", e))?;

    // Concurrent writers wait for the lock instead of failing with SQLITE_BUSY.
    conn.busy_timeout(BUSY_TIMEOUT)
        .map_err(|e| ServerError::db("set busy timeout failed", e))?;
    conn.pragma_update(None, "foreign_keys", true)
        .map_err(|e| ServerError::db("enable foreign keys failed", e))?;
    let mode: String = conn
        .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
        .map_err(|e| ServerError::db("set journal mode failed", e))?;

    debug!(path, journal_mode = %mode, "opened sqlite connection");
    Ok(conn)
}

/// Initialize database from a SQL schema file
pub fn init_db(db: &Database, schema_path: &str) -> Result<(), ServerError> {
    let schema_sql = fs::read_to_string(schema_path)
        .map_err(|e| ServerError::DbError(format!("Failed to read schema file: {e}")))?;

    db.with_conn(|conn| {
        conn.execute_batch(&schema_sql)
            .map_err(|e| ServerError::db("Failed to apply schema", e))
    })?;

    info!(schema_path, db_path = db.path(), "database initialized");
    Ok(())
}
