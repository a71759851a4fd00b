// Transactional entry insert with duplicate detection

use rusqlite::Connection;

use crate::db::schema;
use crate::error::{FilmWatchError, Result};
use crate::parser::ParsedEntry;

/// Insert a parsed entry, creating any missing film/brand/watch/actor rows
/// along the way.
///
/// The whole call runs in one transaction. A sighting already recording the
/// same (film, actor, watch) triple aborts the call with `DuplicateEntry`,
/// rolling back every reference row created by it. Returns the new
/// sighting's id.
pub fn insert_entry(conn: &mut Connection, entry: &ParsedEntry) -> Result<i64> {
    let tx = conn.transaction()?;

    let film_id = schema::get_or_create_film(&tx, &entry.title, entry.year)?;
    let brand_id = schema::get_or_create_brand(&tx, &entry.brand)?;
    let watch_id = schema::get_or_create_watch(&tx, brand_id, &entry.model, &entry.verification)?;
    let actor_id = schema::get_or_create_actor(&tx, &entry.actor)?;

    if schema::find_sighting(&tx, film_id, actor_id, watch_id)?.is_some() {
        return Err(FilmWatchError::DuplicateEntry(format!(
            "{} wearing {} {} in {} already exists in the catalog",
            entry.actor, entry.brand, entry.model, entry.title
        )));
    }

    let character_id = schema::get_or_create_character(&tx, &entry.character)?;
    let sighting_id = schema::insert_sighting(
        &tx,
        film_id,
        actor_id,
        character_id,
        watch_id,
        &entry.narrative,
    )?;

    tx.commit()?;

    log::debug!(
        "recorded sighting {}: {} wearing {} {} in {} ({})",
        sighting_id,
        entry.actor,
        entry.brand,
        entry.model,
        entry.title,
        entry.year
    );

    Ok(sighting_id)
}
