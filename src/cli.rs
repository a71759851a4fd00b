// Film Watch Catalog CLI binary

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rusqlite::Connection;

use filmwatch::catalog;
use filmwatch::constants::DB_FILENAME;
use filmwatch::db::open_db;
use filmwatch::parser::parse_entry;

#[derive(Parser)]
#[command(name = "filmwatch")]
#[command(about = "Film Watch Catalog - watches worn by actors on screen", long_about = None)]
#[command(version)]
struct Cli {
    /// Database path
    #[arg(long, global = true, default_value = DB_FILENAME)]
    db: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create (or migrate) the catalog database
    Init,

    /// Parse a free-text entry and add it to the catalog
    Add {
        /// Entry text, e.g. "Daniel Craig wears a Rolex Submariner in Skyfall (2012)"
        entry: String,
        /// Override the narrative note stored with the sighting
        #[arg(long)]
        narrative: Option<String>,
    },

    /// List sightings for an actor (substring match)
    Actor {
        name: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List sightings for a brand (substring match)
    Brand {
        name: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List watches seen in a film (substring match)
    Film {
        title: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show catalog statistics
    Stats {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List entries matching an actor and a film, for duplicate review
    FindSimilar {
        actor: String,
        film: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Delete a single entry by id
    DeleteEntry {
        id: i64,
    },

    /// Merge actor records sharing the same name
    MergeActors,

    /// Merge character records sharing the same name
    MergeCharacters,

    /// Repair watches whose brand was parsed as "a"/"an"
    FixBrands,

    /// Delete a brand that no watch references
    DeleteBrand {
        id: i64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut conn = open_db(&cli.db)?;

    match cli.command {
        Commands::Init => {
            println!("Catalog ready at {}", cli.db.display());
            Ok(())
        }
        Commands::Add { entry, narrative } => cmd_add(&mut conn, &entry, narrative),
        Commands::Actor { name, json } => cmd_actor(&conn, &name, json),
        Commands::Brand { name, json } => cmd_brand(&conn, &name, json),
        Commands::Film { title, json } => cmd_film(&conn, &title, json),
        Commands::Stats { json } => cmd_stats(&conn, json),
        Commands::FindSimilar { actor, film, json } => cmd_find_similar(&conn, &actor, &film, json),
        Commands::DeleteEntry { id } => {
            catalog::delete_sighting(&conn, id)?;
            println!("Deleted entry {}", id);
            Ok(())
        }
        Commands::MergeActors => {
            let report = catalog::merge_duplicate_actors(&mut conn)?;
            println!(
                "Merged {} duplicate actors into {} unique actors",
                report.merged, report.groups
            );
            Ok(())
        }
        Commands::MergeCharacters => {
            let report = catalog::merge_duplicate_characters(&mut conn)?;
            println!(
                "Merged {} duplicate characters into {} unique characters",
                report.merged, report.groups
            );
            Ok(())
        }
        Commands::FixBrands => {
            let fixed = catalog::fix_misassigned_brands(&mut conn)?;
            println!("Fixed {} watches with bad brand names", fixed);
            Ok(())
        }
        Commands::DeleteBrand { id } => {
            catalog::delete_brand(&conn, id)?;
            println!("Deleted brand {}", id);
            Ok(())
        }
    }
}

fn cmd_add(conn: &mut Connection, entry: &str, narrative: Option<String>) -> Result<()> {
    let mut parsed = parse_entry(entry)?;
    if let Some(narrative) = narrative {
        parsed.narrative = narrative;
    }

    catalog::insert_entry(conn, &parsed)?;
    println!(
        "Successfully added: {} wearing {} {} in {} ({})",
        parsed.actor, parsed.brand, parsed.model, parsed.title, parsed.year
    );
    Ok(())
}

fn cmd_actor(conn: &Connection, name: &str, json: bool) -> Result<()> {
    let rows = catalog::query_by_actor(conn, name)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No sightings found for actor '{}'", name);
        return Ok(());
    }
    for row in &rows {
        println!(
            "{} ({})  {} {}  as {}",
            row.title, row.year, row.brand, row.model, row.character
        );
    }
    println!("{} sighting(s)", rows.len());
    Ok(())
}

fn cmd_brand(conn: &Connection, name: &str, json: bool) -> Result<()> {
    let rows = catalog::query_by_brand(conn, name)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No sightings found for brand '{}'", name);
        return Ok(());
    }
    for row in &rows {
        println!(
            "{} ({})  {} as {} wearing {}",
            row.title, row.year, row.actor, row.character, row.model
        );
    }
    println!("{} sighting(s)", rows.len());
    Ok(())
}

fn cmd_film(conn: &Connection, title: &str, json: bool) -> Result<()> {
    let rows = catalog::query_by_film(conn, title)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No sightings found for film '{}'", title);
        return Ok(());
    }
    for row in &rows {
        println!(
            "{} ({})  {} as {} wearing {} {}",
            row.title, row.year, row.actor, row.character, row.brand, row.model
        );
    }
    println!("{} sighting(s)", rows.len());
    Ok(())
}

fn cmd_stats(conn: &Connection, json: bool) -> Result<()> {
    let stats = catalog::stats(conn)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Films:   {}", stats.films);
    println!("Actors:  {}", stats.actors);
    println!("Brands:  {}", stats.brands);
    println!("Entries: {}", stats.entries);
    if !stats.top_brands.is_empty() {
        println!("Top brands:");
        for brand in &stats.top_brands {
            println!("  {:>3}  {}", brand.count, brand.brand);
        }
    }
    Ok(())
}

fn cmd_find_similar(conn: &Connection, actor: &str, film: &str, json: bool) -> Result<()> {
    let entries = catalog::find_similar(conn, actor, film)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No entries match actor '{}' and film '{}'", actor, film);
        return Ok(());
    }
    for entry in &entries {
        println!(
            "#{}  {}  {} as {}  {}",
            entry.id, entry.film, entry.actor, entry.character, entry.watch
        );
    }
    println!("{} entry(ies)", entries.len());
    Ok(())
}
