// Database module

pub mod migrations;
pub mod schema;

use std::path::Path;

use anyhow::Result;
use rusqlite::Connection;

/// Open or create a catalog database at the given path.
///
/// The path is an explicit argument; there is no global storage location.
pub fn open_db(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;

    // Enable foreign keys (must be done per connection)
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    // Enable WAL mode for better concurrency
    conn.execute_batch("PRAGMA journal_mode = WAL;")?;

    // Run migrations
    migrations::run_migrations(&conn)?;

    Ok(conn)
}
