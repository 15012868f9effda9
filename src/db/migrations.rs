// Database migrations
// Migrations are forward-only. Never edit or delete a migration after it ships.
// Every statement is written idempotently (IF NOT EXISTS) so a batch that was
// interrupted before its version bump can be retried on the next launch.

use anyhow::Result;
use rusqlite::Connection;

/// All migrations in order. Each migration is a SQL string.
const MIGRATIONS: &[&str] = &[
    // Migration 1: Initial schema
    r#"
    -- Places: points of interest, independent of any trip
    CREATE TABLE IF NOT EXISTS places (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        description TEXT,
        visitlater INTEGER NOT NULL DEFAULT 1,
        liked INTEGER NOT NULL DEFAULT 0,
        lat REAL,
        lng REAL,
        createdAt TEXT NOT NULL
    );

    -- Photos attached to a place
    CREATE TABLE IF NOT EXISTS photos (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        placeId INTEGER NOT NULL,
        filePath TEXT NOT NULL,
        createdAt TEXT NOT NULL,
        FOREIGN KEY (placeId) REFERENCES places(id) ON DELETE CASCADE
    );

    -- Trips: named, optionally dated itineraries
    CREATE TABLE IF NOT EXISTS trips (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        description TEXT,
        startDate TEXT,
        endDate TEXT,
        current INTEGER NOT NULL DEFAULT 0,
        createdAt TEXT NOT NULL
    );

    -- Ordered stops within a trip.
    -- placeId is deliberately not an enforced foreign key: itinerary rows
    -- outlive a deleted place and surface as "place removed" in joined reads.
    CREATE TABLE IF NOT EXISTS trip_places (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        tripId INTEGER NOT NULL,
        placeId INTEGER NOT NULL,
        "order" INTEGER NOT NULL DEFAULT 0,
        visited INTEGER NOT NULL DEFAULT 0,
        visitDate TEXT,
        notes TEXT,
        createdAt TEXT NOT NULL,
        FOREIGN KEY (tripId) REFERENCES trips(id) ON DELETE CASCADE
    );

    -- Photos attached to a stop
    CREATE TABLE IF NOT EXISTS trip_place_photos (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        tripPlaceId INTEGER NOT NULL,
        filePath TEXT NOT NULL,
        createdAt TEXT NOT NULL,
        FOREIGN KEY (tripPlaceId) REFERENCES trip_places(id) ON DELETE CASCADE
    );

    -- Indexes for owner-scoped lookups
    CREATE INDEX IF NOT EXISTS idx_photos_placeId ON photos(placeId);
    CREATE INDEX IF NOT EXISTS idx_trip_places_tripId ON trip_places(tripId);
    CREATE INDEX IF NOT EXISTS idx_trip_place_photos_tripPlaceId ON trip_place_photos(tripPlaceId);
    "#,
];

/// Get current schema version from database
fn get_schema_version(conn: &Connection) -> Result<u32> {
    let version: u32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    Ok(version)
}

/// Run all pending migrations (crash-safe).
/// A database at or beyond the target version is left untouched.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    let current_version = get_schema_version(conn)?;
    let target_version = MIGRATIONS.len() as u32;

    if current_version >= target_version {
        return Ok(());
    }

    // Apply pending migrations one-by-one. The version bump comes after its
    // batch, so a failed batch is re-attempted on the next launch.
    for (i, migration) in MIGRATIONS.iter().enumerate() {
        let migration_version = (i + 1) as u32;
        if migration_version <= current_version {
            continue;
        }

        conn.execute_batch(migration)?;
        conn.execute_batch(&format!("PRAGMA user_version = {}", migration_version))?;

        log::info!("Applied migration {}", migration_version);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_init_creates_all_tables() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();

        run_migrations(&conn).unwrap();

        let count: i32 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table'
                 AND name IN ('places','photos','trips','trip_places','trip_place_photos')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 5, "All 5 tables should exist");

        let version = get_schema_version(&conn).unwrap();
        assert_eq!(version, MIGRATIONS.len() as u32);
    }

    #[test]
    fn test_migrations_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();

        // Run twice -- second call must be a no-op
        run_migrations(&conn).unwrap();
        let tables_first: i32 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table'",
                [],
                |row| row.get(0),
            )
            .unwrap();

        run_migrations(&conn).unwrap();

        let tables_second: i32 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables_first, tables_second);
        assert_eq!(get_schema_version(&conn).unwrap(), MIGRATIONS.len() as u32);
    }

    #[test]
    fn test_newer_version_left_untouched() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA user_version = 99").unwrap();

        run_migrations(&conn).unwrap();

        // No tables created, version not rewound
        let tables: i32 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='places'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 0);
        assert_eq!(get_schema_version(&conn).unwrap(), 99);
    }
}
