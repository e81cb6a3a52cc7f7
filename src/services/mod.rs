pub mod catalog;
pub mod posters;
pub mod providers;
pub mod recommendations;
pub mod title_search;

pub use catalog::{Catalog, ScoredMovie, SimilarityMatrix};
pub use posters::{PosterCache, PosterStatus};
