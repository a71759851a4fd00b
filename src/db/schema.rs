// Low-level query helpers for the catalog schema
//
// Reference rows (films, actors, brands, watches, characters) are created on
// first mention and deduplicated by exact, case-sensitive match.

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::Result;

/// Films are unique by (title, year); the first reference creates the row.
pub fn get_or_create_film(conn: &Connection, title: &str, year: i32) -> Result<i64> {
    conn.execute(
        "INSERT OR IGNORE INTO films (title, year) VALUES (?1, ?2)",
        params![title, year],
    )?;
    let id = conn.query_row(
        "SELECT id FROM films WHERE title = ?1 AND year = ?2",
        params![title, year],
        |row| row.get(0),
    )?;
    Ok(id)
}

pub fn get_or_create_brand(conn: &Connection, name: &str) -> Result<i64> {
    conn.execute(
        "INSERT OR IGNORE INTO brands (name) VALUES (?1)",
        params![name],
    )?;
    let id = conn.query_row(
        "SELECT id FROM brands WHERE name = ?1",
        params![name],
        |row| row.get(0),
    )?;
    Ok(id)
}

/// OR IGNORE keeps the verification level recorded when the watch was first
/// seen; later inserts never overwrite it.
pub fn get_or_create_watch(
    conn: &Connection,
    brand_id: i64,
    model: &str,
    verification: &str,
) -> Result<i64> {
    conn.execute(
        "INSERT OR IGNORE INTO watches (brand_id, model, verification) VALUES (?1, ?2, ?3)",
        params![brand_id, model, verification],
    )?;
    let id = conn.query_row(
        "SELECT id FROM watches WHERE brand_id = ?1 AND model = ?2",
        params![brand_id, model],
        |row| row.get(0),
    )?;
    Ok(id)
}

pub fn get_or_create_actor(conn: &Connection, name: &str) -> Result<i64> {
    let existing: Option<i64> = conn
        .query_row(
            "SELECT id FROM actors WHERE name = ?1 LIMIT 1",
            params![name],
            |row| row.get(0),
        )
        .optional()?;
    if let Some(id) = existing {
        return Ok(id);
    }
    conn.execute("INSERT INTO actors (name) VALUES (?1)", params![name])?;
    Ok(conn.last_insert_rowid())
}

/// Character names are not scoped to a film: an existing name is reused
/// wherever it appears next.
pub fn get_or_create_character(conn: &Connection, name: &str) -> Result<i64> {
    let existing: Option<i64> = conn
        .query_row(
            "SELECT id FROM characters WHERE name = ?1 LIMIT 1",
            params![name],
            |row| row.get(0),
        )
        .optional()?;
    if let Some(id) = existing {
        return Ok(id);
    }
    conn.execute("INSERT INTO characters (name) VALUES (?1)", params![name])?;
    Ok(conn.last_insert_rowid())
}

/// Look up a sighting by its identifying (film, actor, watch) triple.
pub fn find_sighting(
    conn: &Connection,
    film_id: i64,
    actor_id: i64,
    watch_id: i64,
) -> Result<Option<i64>> {
    let id = conn
        .query_row(
            "SELECT id FROM sightings WHERE film_id = ?1 AND actor_id = ?2 AND watch_id = ?3",
            params![film_id, actor_id, watch_id],
            |row| row.get(0),
        )
        .optional()?;
    Ok(id)
}

pub fn insert_sighting(
    conn: &Connection,
    film_id: i64,
    actor_id: i64,
    character_id: i64,
    watch_id: i64,
    narrative: &str,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO sightings (film_id, actor_id, character_id, watch_id, narrative)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![film_id, actor_id, character_id, watch_id, narrative],
    )?;
    Ok(conn.last_insert_rowid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        migrations::run_migrations(&conn).unwrap();
        conn
    }

    #[test]
    fn test_get_or_create_film_is_idempotent() {
        let conn = setup();
        let a = get_or_create_film(&conn, "Skyfall", 2012).unwrap();
        let b = get_or_create_film(&conn, "Skyfall", 2012).unwrap();
        assert_eq!(a, b);

        // Same title, different year is a different film
        let c = get_or_create_film(&conn, "Skyfall", 2013).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_actor_dedup_is_case_sensitive() {
        let conn = setup();
        let a = get_or_create_actor(&conn, "Daniel Craig").unwrap();
        let b = get_or_create_actor(&conn, "Daniel Craig").unwrap();
        let c = get_or_create_actor(&conn, "daniel craig").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_watch_keeps_first_verification() {
        let conn = setup();
        let brand_id = get_or_create_brand(&conn, "Rolex").unwrap();
        let a = get_or_create_watch(&conn, brand_id, "Submariner", "Confirmed").unwrap();
        let b = get_or_create_watch(&conn, brand_id, "Submariner", "Speculative").unwrap();
        assert_eq!(a, b);

        let verification: String = conn
            .query_row(
                "SELECT verification FROM watches WHERE id = ?1",
                params![a],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(verification, "Confirmed");
    }

    #[test]
    fn test_character_reused_across_films() {
        let conn = setup();
        let a = get_or_create_character(&conn, "Jack").unwrap();
        let b = get_or_create_character(&conn, "Jack").unwrap();
        assert_eq!(a, b);
    }
}
