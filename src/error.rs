// Film Watch Catalog error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilmWatchError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Could not parse entry: {0}")]
    Parse(String),

    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    #[error("Entry not found: {0}")]
    SightingNotFound(i64),

    #[error("Cannot delete brand - {0} watches are using it")]
    BrandInUse(i64),
}

pub type Result<T> = std::result::Result<T, FilmWatchError>;
