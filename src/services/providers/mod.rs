/// Remote poster providers
///
/// The poster cache only talks to a provider on a cache miss. Providers report
/// failures as errors; the cache decides what to remember about them.
use crate::{error::AppResult, models::MovieId};

pub mod tmdb;

pub use tmdb::TmdbClient;

/// Trait for remote poster sources
///
/// A lookup happens in two steps: resolve the movie's poster path from its
/// metadata, then download the image behind that path.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PosterSource: Send + Sync {
    /// Fetch the poster path from the movie's metadata
    ///
    /// Returns `Ok(None)` when the metadata exists but carries no usable poster.
    async fn poster_path(&self, movie_id: MovieId) -> AppResult<Option<String>>;

    /// Download the image behind a poster path
    async fn download(&self, poster_path: &str) -> AppResult<Vec<u8>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
