pub mod artifacts;
pub mod poster_store;

pub use artifacts::load_catalog;
pub use poster_store::{CacheEntry, FsPosterStore, InMemoryPosterStore, PosterFile, PosterStore};
