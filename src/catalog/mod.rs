// Catalog operations over an open database connection
//
// Each public operation is atomic: it either commits all of its writes or
// rolls every one of them back before returning an error.

pub mod insert;
pub mod maintenance;
pub mod queries;


pub use insert::insert_entry;
pub use maintenance::{
    delete_brand, delete_sighting, fix_misassigned_brands, merge_duplicate_actors,
    merge_duplicate_characters, MergeReport,
};
pub use queries::{
    find_similar, query_by_actor, query_by_brand, query_by_film, stats, ActorSighting,
    BrandCount, BrandSighting, FilmSighting, SimilarEntry, Stats,
};
