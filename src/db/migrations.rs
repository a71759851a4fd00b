// Database migrations
// Migrations are forward-only. Never edit or delete a migration after it ships.

use anyhow::Result;
use rusqlite::Connection;

/// All migrations in order. Each migration is a SQL string.
const MIGRATIONS: &[&str] = &[
    // Migration 1: Initial schema
    r#"
    -- Films
    CREATE TABLE films (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        year INTEGER NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        UNIQUE(title, year)
    );

    -- Actors. Names are deduplicated on insert by exact match; duplicate
    -- rows from legacy data are consolidated by merge_duplicate_actors.
    CREATE TABLE actors (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    -- Brands
    CREATE TABLE brands (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    -- Watches: one row per (brand, model) pair ever recorded
    CREATE TABLE watches (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        brand_id INTEGER NOT NULL REFERENCES brands(id),
        model TEXT NOT NULL,
        verification TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        UNIQUE(brand_id, model)
    );

    -- Characters. Names are not scoped to a film, and duplicates from
    -- legacy data are consolidated by merge_duplicate_characters.
    CREATE TABLE characters (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    -- Sightings: one row = one actor wearing one watch in one film
    CREATE TABLE sightings (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        film_id INTEGER NOT NULL REFERENCES films(id),
        actor_id INTEGER NOT NULL REFERENCES actors(id),
        character_id INTEGER NOT NULL REFERENCES characters(id),
        watch_id INTEGER NOT NULL REFERENCES watches(id),
        narrative TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        UNIQUE(film_id, actor_id, character_id, watch_id)
    );

    -- Indexes for common queries
    CREATE INDEX idx_watches_brand ON watches(brand_id);
    CREATE INDEX idx_actors_name ON actors(name);
    CREATE INDEX idx_characters_name ON characters(name);
    CREATE INDEX idx_sightings_film ON sightings(film_id);
    CREATE INDEX idx_sightings_actor ON sightings(actor_id);
    CREATE INDEX idx_sightings_character ON sightings(character_id);
    CREATE INDEX idx_sightings_watch ON sightings(watch_id);
    "#,
];

/// Get current schema version from database
fn get_schema_version(conn: &Connection) -> Result<u32> {
    let version: u32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    Ok(version)
}

/// Run all pending migrations (crash-safe)
pub fn run_migrations(conn: &Connection) -> Result<()> {
    let current_version = get_schema_version(conn)?;
    let target_version = MIGRATIONS.len() as u32;

    // Refuse to open a DB created by a newer build
    if current_version > target_version {
        anyhow::bail!(
            "Database schema version {} is newer than this build supports (max {}).",
            current_version,
            target_version
        );
    }

    if current_version == target_version {
        return Ok(());
    }

    // Apply pending migrations one-by-one
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
