// Database module

pub mod migrations;

use std::path::{Path, PathBuf};

use anyhow::Result;
use rusqlite::Connection;

use crate::constants::{DB_FILENAME, GONEXT_FOLDER, PHOTOS_FOLDER};

/// Open or create a database at the given path and bring its schema current.
/// Idempotent, safe to call on every process start.
pub fn open_db(db_path: &Path) -> Result<Connection> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let conn = Connection::open(db_path)?;

    // Enable foreign keys (must be done per connection)
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    // Enable WAL mode for better concurrency
    conn.execute_batch("PRAGMA journal_mode = WAL;")?;

    conn.execute_batch("PRAGMA busy_timeout = 5000;")?;

    // Run migrations
    migrations::run_migrations(&conn)?;

    Ok(conn)
}

/// Default data directory: ~/.gonext
pub fn default_data_dir() -> Result<PathBuf> {
    let base = directories::BaseDirs::new()
        .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
    Ok(base.home_dir().join(GONEXT_FOLDER))
}

/// Get the database path for a data directory
pub fn get_db_path(data_dir: &Path) -> PathBuf {
    data_dir.join(DB_FILENAME)
}

/// Get the managed photos folder for a data directory
pub fn get_photos_dir(data_dir: &Path) -> PathBuf {
    data_dir.join(PHOTOS_FOLDER)
}

/// Initialize the data directory structure
pub fn init_data_folders(data_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(data_dir)?;
    std::fs::create_dir_all(data_dir.join(PHOTOS_FOLDER))?;
    Ok(())
}
