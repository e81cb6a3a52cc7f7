use std::fmt::Display;

use crate::{error::AppResult, models::MovieId};

pub mod fs;
pub mod memory;

pub use fs::FsPosterStore;
pub use memory::InMemoryPosterStore;

/// Cached state of a poster for one movie id
///
/// The only transitions are `Unknown -> Success` and
/// `Unknown -> PermanentFailure`. Clearing the store resets ids to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheEntry {
    Unknown,
    Success,
    PermanentFailure,
}

/// File that records a poster state on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PosterFile {
    Image(MovieId),
    FailureMarker(MovieId),
}

impl Display for PosterFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PosterFile::Image(id) => write!(f, "{}.jpg", id),
            PosterFile::FailureMarker(id) => write!(f, "{}.fail", id),
        }
    }
}

/// Key-value storage behind the poster cache
///
/// Implementations only persist state; deciding when to fetch or give up
/// belongs to [`crate::services::posters::PosterCache`].
#[async_trait::async_trait]
pub trait PosterStore: Send + Sync {
    /// Current state for `movie_id`
    async fn entry(&self, movie_id: MovieId) -> AppResult<CacheEntry>;

    /// Persist poster bytes, moving the id to `Success`
    async fn save_image(&self, movie_id: MovieId, bytes: &[u8]) -> AppResult<()>;

    /// Record that the poster is not retrievable, moving the id to `PermanentFailure`
    async fn mark_failed(&self, movie_id: MovieId) -> AppResult<()>;

    /// Poster bytes, if the id is in `Success`
    async fn load_image(&self, movie_id: MovieId) -> AppResult<Option<Vec<u8>>>;

    /// Store name for logging and debugging
    fn name(&self) -> &'static str;
}
