use std::collections::HashMap;

use tokio::sync::RwLock;

use super::{CacheEntry, PosterStore};
use crate::{error::AppResult, models::MovieId};

#[derive(Debug, Clone)]
enum StoredPoster {
    Image(Vec<u8>),
    Failed,
}

/// Poster store kept entirely in memory
#[derive(Debug, Default)]
pub struct InMemoryPosterStore {
    entries: RwLock<HashMap<MovieId, StoredPoster>>,
}

impl InMemoryPosterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every entry, returning all ids to `Unknown`
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

#[async_trait::async_trait]
impl PosterStore for InMemoryPosterStore {
    async fn entry(&self, movie_id: MovieId) -> AppResult<CacheEntry> {
        let entries = self.entries.read().await;
        Ok(match entries.get(&movie_id) {
            Some(StoredPoster::Image(_)) => CacheEntry::Success,
            Some(StoredPoster::Failed) => CacheEntry::PermanentFailure,
            None => CacheEntry::Unknown,
        })
    }

    async fn save_image(&self, movie_id: MovieId, bytes: &[u8]) -> AppResult<()> {
        self.entries
            .write()
            .await
            .insert(movie_id, StoredPoster::Image(bytes.to_vec()));
        Ok(())
    }

    async fn mark_failed(&self, movie_id: MovieId) -> AppResult<()> {
        self.entries
            .write()
            .await
            .insert(movie_id, StoredPoster::Failed);
        Ok(())
    }

    async fn load_image(&self, movie_id: MovieId) -> AppResult<Option<Vec<u8>>> {
        let entries = self.entries.read().await;
        Ok(match entries.get(&movie_id) {
            Some(StoredPoster::Image(bytes)) => Some(bytes.clone()),
            _ => None,
        })
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_state_transitions() {
        let store = InMemoryPosterStore::new();

        assert_eq!(store.entry(MovieId(1)).await.unwrap(), CacheEntry::Unknown);

        store.save_image(MovieId(1), &[1, 2, 3]).await.unwrap();
        store.mark_failed(MovieId(2)).await.unwrap();

        assert_eq!(store.entry(MovieId(1)).await.unwrap(), CacheEntry::Success);
        assert_eq!(
            store.entry(MovieId(2)).await.unwrap(),
            CacheEntry::PermanentFailure
        );
        assert_eq!(store.load_image(MovieId(1)).await.unwrap(), Some(vec![1, 2, 3]));
        assert_eq!(store.load_image(MovieId(2)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clear() {
        let store = InMemoryPosterStore::new();
        store.mark_failed(MovieId(7)).await.unwrap();

        store.clear().await;

        assert_eq!(store.entry(MovieId(7)).await.unwrap(), CacheEntry::Unknown);
    }
}
