use std::sync::Arc;

use crate::{
    db::{CacheEntry, PosterStore},
    models::MovieId,
    services::providers::PosterSource,
};

/// Outcome of a poster lookup
///
/// Failures never surface as errors: callers only learn that no image exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosterStatus {
    Available,
    Unavailable,
}

/// Memoizing poster fetcher
///
/// Every id is fetched from the remote source at most once. Successful
/// downloads are kept in the store, and so is every failure, so an id that
/// failed once is never looked up again until the store is cleared.
#[derive(Clone)]
pub struct PosterCache {
    store: Arc<dyn PosterStore>,
    source: Arc<dyn PosterSource>,
}

impl PosterCache {
    pub fn new(store: Arc<dyn PosterStore>, source: Arc<dyn PosterSource>) -> Self {
        tracing::info!(
            store = store.name(),
            source = source.name(),
            "Poster cache enabled"
        );
        Self { store, source }
    }

    /// Ensures `movie_id` has a terminal cache state and reports it
    pub async fn resolve(&self, movie_id: MovieId) -> PosterStatus {
        match self.store.entry(movie_id).await {
            Ok(CacheEntry::Success) => PosterStatus::Available,
            Ok(CacheEntry::PermanentFailure) => PosterStatus::Unavailable,
            Ok(CacheEntry::Unknown) => self.fetch_and_remember(movie_id).await,
            Err(e) => {
                tracing::warn!(
                    movie_id = %movie_id,
                    error = %e,
                    "Poster cache read failed"
                );
                PosterStatus::Unavailable
            }
        }
    }

    /// Poster bytes for `movie_id`, fetching them on first use
    pub async fn get_poster(&self, movie_id: MovieId) -> Option<Vec<u8>> {
        if self.resolve(movie_id).await == PosterStatus::Unavailable {
            return None;
        }

        match self.store.load_image(movie_id).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(
                    movie_id = %movie_id,
                    error = %e,
                    "Failed to read cached poster"
                );
                None
            }
        }
    }

    async fn fetch_and_remember(&self, movie_id: MovieId) -> PosterStatus {
        if !movie_id.is_valid() {
            tracing::debug!(movie_id = %movie_id, "Invalid movie id, skipping poster lookup");
            return self.remember_failure(movie_id).await;
        }

        let poster_path = match self.source.poster_path(movie_id).await {
            Ok(Some(path)) => path,
            Ok(None) => {
                tracing::info!(movie_id = %movie_id, "Movie has no poster");
                return self.remember_failure(movie_id).await;
            }
            Err(e) => {
                tracing::warn!(
                    movie_id = %movie_id,
                    source = self.source.name(),
                    error = %e,
                    "Poster metadata lookup failed"
                );
                return self.remember_failure(movie_id).await;
            }
        };

        let bytes = match self.source.download(&poster_path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(
                    movie_id = %movie_id,
                    poster_path = %poster_path,
                    error = %e,
                    "Poster download failed"
                );
                return self.remember_failure(movie_id).await;
            }
        };

        if let Err(e) = self.store.save_image(movie_id, &bytes).await {
            tracing::error!(movie_id = %movie_id, error = %e, "Failed to cache poster");
            return self.remember_failure(movie_id).await;
        }

        tracing::info!(movie_id = %movie_id, bytes = bytes.len(), "Poster cached");
        PosterStatus::Available
    }

    async fn remember_failure(&self, movie_id: MovieId) -> PosterStatus {
        if let Err(e) = self.store.mark_failed(movie_id).await {
            tracing::error!(
                movie_id = %movie_id,
                error = %e,
                "Failed to write poster failure marker"
            );
        }
        PosterStatus::Unavailable
    }
}
