// Lookup queries and statistics
//
// All name/title matching is substring, case-insensitive (SQL LIKE).

use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use crate::constants::TOP_BRANDS_LIMIT;
use crate::error::Result;

/// One sighting as seen from an actor query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorSighting {
    pub title: String,
    pub year: i32,
    pub brand: String,
    pub model: String,
    pub character: String,
    pub narrative: Option<String>,
}

/// One sighting as seen from a brand query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandSighting {
    pub title: String,
    pub year: i32,
    pub actor: String,
    pub model: String,
    pub character: String,
    pub narrative: Option<String>,
}

/// One sighting as seen from a film query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilmSighting {
    pub title: String,
    pub year: i32,
    pub actor: String,
    pub brand: String,
    pub model: String,
    pub character: String,
    pub narrative: Option<String>,
}

/// Candidate near-duplicate row for manual review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarEntry {
    pub id: i64,
    pub film: String,
    pub actor: String,
    pub character: String,
    pub watch: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandCount {
    pub brand: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stats {
    pub films: i64,
    pub actors: i64,
    pub brands: i64,
    pub entries: i64,
    pub top_brands: Vec<BrandCount>,
}

/// All watches worn by actors whose name contains the pattern, newest
/// film first.
pub fn query_by_actor(conn: &Connection, pattern: &str) -> Result<Vec<ActorSighting>> {
    let mut stmt = conn.prepare(
        "SELECT f.title, f.year, b.name, w.model, c.name, s.narrative
         FROM sightings s
         JOIN films f ON s.film_id = f.id
         JOIN actors a ON s.actor_id = a.id
         JOIN characters c ON s.character_id = c.id
         JOIN watches w ON s.watch_id = w.id
         JOIN brands b ON w.brand_id = b.id
         WHERE a.name LIKE ?1
         ORDER BY f.year DESC",
    )?;
    let rows = stmt.query_map(params![like(pattern)], |row| {
        Ok(ActorSighting {
            title: row.get(0)?,
            year: row.get(1)?,
            brand: row.get(2)?,
            model: row.get(3)?,
            character: row.get(4)?,
            narrative: row.get(5)?,
        })
    })?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row?);
    }
    Ok(results)
}

/// All films featuring watches of brands whose name contains the pattern,
/// newest film first.
pub fn query_by_brand(conn: &Connection, pattern: &str) -> Result<Vec<BrandSighting>> {
    let mut stmt = conn.prepare(
        "SELECT f.title, f.year, a.name, w.model, c.name, s.narrative
         FROM sightings s
         JOIN films f ON s.film_id = f.id
         JOIN actors a ON s.actor_id = a.id
         JOIN characters c ON s.character_id = c.id
         JOIN watches w ON s.watch_id = w.id
         JOIN brands b ON w.brand_id = b.id
         WHERE b.name LIKE ?1
         ORDER BY f.year DESC",
    )?;
    let rows = stmt.query_map(params![like(pattern)], |row| {
        Ok(BrandSighting {
            title: row.get(0)?,
            year: row.get(1)?,
            actor: row.get(2)?,
            model: row.get(3)?,
            character: row.get(4)?,
            narrative: row.get(5)?,
        })
    })?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row?);
    }
    Ok(results)
}

/// All watches seen in films whose title contains the pattern, ordered by
/// actor name.
pub fn query_by_film(conn: &Connection, pattern: &str) -> Result<Vec<FilmSighting>> {
    let mut stmt = conn.prepare(
        "SELECT f.title, f.year, a.name, b.name, w.model, c.name, s.narrative
         FROM sightings s
         JOIN films f ON s.film_id = f.id
         JOIN actors a ON s.actor_id = a.id
         JOIN characters c ON s.character_id = c.id
         JOIN watches w ON s.watch_id = w.id
         JOIN brands b ON w.brand_id = b.id
         WHERE f.title LIKE ?1
         ORDER BY a.name",
    )?;
    let rows = stmt.query_map(params![like(pattern)], |row| {
        Ok(FilmSighting {
            title: row.get(0)?,
            year: row.get(1)?,
            actor: row.get(2)?,
            brand: row.get(3)?,
            model: row.get(4)?,
            character: row.get(5)?,
            narrative: row.get(6)?,
        })
    })?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row?);
    }
    Ok(results)
}

/// Entries matching both an actor and a film pattern, in insertion order.
/// Surfaces near-duplicates the uniqueness check cannot catch, e.g. the
/// same watch entered twice with different model spellings.
pub fn find_similar(
    conn: &Connection,
    actor_pattern: &str,
    film_pattern: &str,
) -> Result<Vec<SimilarEntry>> {
    let mut stmt = conn.prepare(
        "SELECT s.id, f.title, f.year, a.name, c.name, b.name, w.model
         FROM sightings s
         JOIN films f ON s.film_id = f.id
         JOIN actors a ON s.actor_id = a.id
         JOIN characters c ON s.character_id = c.id
         JOIN watches w ON s.watch_id = w.id
         JOIN brands b ON w.brand_id = b.id
         WHERE a.name LIKE ?1 AND f.title LIKE ?2
         ORDER BY s.id",
    )?;
    let rows = stmt.query_map(params![like(actor_pattern), like(film_pattern)], |row| {
        let title: String = row.get(1)?;
        let year: i32 = row.get(2)?;
        let brand: String = row.get(5)?;
        let model: String = row.get(6)?;
        Ok(SimilarEntry {
            id: row.get(0)?,
            film: format!("{} ({})", title, year),
            actor: row.get(3)?,
            character: row.get(4)?,
            watch: format!("{} {}", brand, model),
        })
    })?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row?);
    }
    Ok(results)
}

/// Catalog totals plus the most-sighted brands.
pub fn stats(conn: &Connection) -> Result<Stats> {
    let films = count(conn, "films")?;
    let actors = count(conn, "actors")?;
    let brands = count(conn, "brands")?;
    let entries = count(conn, "sightings")?;

    let mut stmt = conn.prepare(
        "SELECT b.name, COUNT(*) as sighting_count
         FROM sightings s
         JOIN watches w ON s.watch_id = w.id
         JOIN brands b ON w.brand_id = b.id
         GROUP BY b.name
         ORDER BY sighting_count DESC
         LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![TOP_BRANDS_LIMIT], |row| {
        Ok(BrandCount {
            brand: row.get(0)?,
            count: row.get(1)?,
        })
    })?;

    let mut top_brands = Vec::new();
    for row in rows {
        top_brands.push(row?);
    }

    Ok(Stats {
        films,
        actors,
        brands,
        entries,
        top_brands,
    })
}

fn like(pattern: &str) -> String {
    format!("%{}%", pattern)
}

fn count(conn: &Connection, table: &str) -> Result<i64> {
    let n = conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
        row.get(0)
    })?;
    Ok(n)
}
