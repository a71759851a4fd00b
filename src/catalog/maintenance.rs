// Catalog maintenance: merges, brand repair, deletions
//
// These operations exist to clean up after data-entry mistakes and parser
// misfires. Each runs in its own transaction.

use rusqlite::{params, params_from_iter, Connection};
use serde::{Deserialize, Serialize};

use crate::constants::STOPWORD_BRANDS;
use crate::error::{FilmWatchError, Result};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MergeReport {
    /// Rows deleted after repointing their sightings.
    pub merged: usize,
    /// Name groups that had duplicates.
    pub groups: usize,
}

/// Consolidate actors sharing the same exact name.
pub fn merge_duplicate_actors(conn: &mut Connection) -> Result<MergeReport> {
    merge_by_name(conn, "actors", "actor_id")
}

/// Consolidate characters sharing the same exact name. Names are not
/// scoped to a film, so same-named characters from unrelated films merge
/// into one record.
pub fn merge_duplicate_characters(conn: &mut Connection) -> Result<MergeReport> {
    merge_by_name(conn, "characters", "character_id")
}

/// Group rows by exact name, keep the lowest id per group, repoint all
/// sighting references to the kept id, and delete the rest.
fn merge_by_name(conn: &mut Connection, table: &str, fk_column: &str) -> Result<MergeReport> {
    let tx = conn.transaction()?;

    let groups: Vec<Vec<i64>> = {
        let mut stmt = tx.prepare(&format!(
            "SELECT GROUP_CONCAT(id) FROM {} GROUP BY name HAVING COUNT(*) > 1",
            table
        ))?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut out = Vec::new();
        for row in rows {
            let ids: Vec<i64> = row?.split(',').filter_map(|id| id.parse().ok()).collect();
            out.push(ids);
        }
        out
    };

    let mut merged = 0usize;
    for ids in &groups {
        let keep_id = match ids.iter().min() {
            Some(id) => *id,
            None => continue,
        };
        for old_id in ids.iter().filter(|id| **id != keep_id) {
            tx.execute(
                &format!(
                    "UPDATE sightings SET {} = ?1 WHERE {} = ?2",
                    fk_column, fk_column
                ),
                params![keep_id, old_id],
            )?;
            tx.execute(
                &format!("DELETE FROM {} WHERE id = ?1", table),
                params![old_id],
            )?;
            merged += 1;
        }
    }

    tx.commit()?;

    if merged > 0 {
        log::info!("merged {} duplicate {} rows ({} groups)", merged, table, groups.len());
    }

    Ok(MergeReport {
        merged,
        groups: groups.len(),
    })
}

/// Repair watches whose brand is a bare article ("a"/"an") left behind when
/// a watch phrase didn't split the way the sentence shapes expect. The real
/// brand is recovered from the first word of the stored model string. Never
/// touches a watch whose brand is not a stopword.
pub fn fix_misassigned_brands(conn: &mut Connection) -> Result<usize> {
    let tx = conn.transaction()?;

    let placeholders = stopword_placeholders();

    let bad_watches: Vec<(i64, String)> = {
        let mut stmt = tx.prepare(&format!(
            "SELECT w.id, w.model
             FROM watches w
             JOIN brands b ON w.brand_id = b.id
             WHERE b.name IN ({})",
            placeholders
        ))?;
        let rows = stmt.query_map(params_from_iter(STOPWORD_BRANDS), |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        out
    };

    let mut fixed = 0usize;
    for (watch_id, model) in &bad_watches {
        let (new_brand, new_model) = match model.split_once(char::is_whitespace) {
            Some((first, rest)) => (first.to_string(), rest.trim().to_string()),
            None => (model.clone(), model.clone()),
        };
        if new_brand.is_empty() {
            continue;
        }

        tx.execute(
            "INSERT OR IGNORE INTO brands (name) VALUES (?1)",
            params![new_brand],
        )?;
        let new_brand_id: i64 = tx.query_row(
            "SELECT id FROM brands WHERE name = ?1",
            params![new_brand],
            |row| row.get(0),
        )?;

        tx.execute(
            "UPDATE watches SET brand_id = ?1, model = ?2 WHERE id = ?3",
            params![new_brand_id, new_model, watch_id],
        )?;
        fixed += 1;
    }

    // Drop article brands nothing references anymore
    tx.execute(
        &format!(
            "DELETE FROM brands
             WHERE name IN ({})
             AND id NOT IN (SELECT DISTINCT brand_id FROM watches)",
            placeholders
        ),
        params_from_iter(STOPWORD_BRANDS),
    )?;

    tx.commit()?;

    if fixed > 0 {
        log::info!("fixed {} watches with bad brand names", fixed);
    }

    Ok(fixed)
}

/// Delete a brand, refusing while any watch still references it.
pub fn delete_brand(conn: &Connection, brand_id: i64) -> Result<()> {
    let watch_count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM watches WHERE brand_id = ?1",
        params![brand_id],
        |row| row.get(0),
    )?;
    if watch_count > 0 {
        return Err(FilmWatchError::BrandInUse(watch_count));
    }

    conn.execute("DELETE FROM brands WHERE id = ?1", params![brand_id])?;
    Ok(())
}

/// Hard-delete a single sighting by id.
pub fn delete_sighting(conn: &Connection, sighting_id: i64) -> Result<()> {
    let deleted = conn.execute(
        "DELETE FROM sightings WHERE id = ?1",
        params![sighting_id],
    )?;
    if deleted == 0 {
        return Err(FilmWatchError::SightingNotFound(sighting_id));
    }
    Ok(())
}

fn stopword_placeholders() -> String {
    STOPWORD_BRANDS
        .iter()
        .map(|_| "?")
        .collect::<Vec<_>>()
        .join(", ")
}
