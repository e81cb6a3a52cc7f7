use std::path::{Path, PathBuf};

use chrono::Utc;

use super::{CacheEntry, PosterFile, PosterStore};
use crate::{error::AppResult, models::MovieId};

/// Poster store backed by a directory
///
/// Each id maps to at most one of `{id}.jpg` (success) or `{id}.fail`
/// (permanent failure). No file means the id is unknown.
#[derive(Debug, Clone)]
pub struct FsPosterStore {
    cache_dir: PathBuf,
}

impl FsPosterStore {
    /// Opens the store, creating the cache directory if needed
    pub fn new(cache_dir: impl Into<PathBuf>) -> AppResult<Self> {
        let cache_dir = cache_dir.into();
        std::fs::create_dir_all(&cache_dir)?;

        tracing::info!(cache_dir = %cache_dir.display(), "Poster cache directory ready");

        Ok(Self { cache_dir })
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn path_for(&self, file: PosterFile) -> PathBuf {
        self.cache_dir.join(file.to_string())
    }
}

#[async_trait::async_trait]
impl PosterStore for FsPosterStore {
    async fn entry(&self, movie_id: MovieId) -> AppResult<CacheEntry> {
        if tokio::fs::try_exists(self.path_for(PosterFile::Image(movie_id))).await? {
            return Ok(CacheEntry::Success);
        }
        if tokio::fs::try_exists(self.path_for(PosterFile::FailureMarker(movie_id))).await? {
            return Ok(CacheEntry::PermanentFailure);
        }
        Ok(CacheEntry::Unknown)
    }

    async fn save_image(&self, movie_id: MovieId, bytes: &[u8]) -> AppResult<()> {
        let path = self.path_for(PosterFile::Image(movie_id));
        if let Err(e) = tokio::fs::write(&path, bytes).await {
            // A truncated image would read back as Success
            let _ = tokio::fs::remove_file(&path).await;
            return Err(e.into());
        }
        Ok(())
    }

    async fn mark_failed(&self, movie_id: MovieId) -> AppResult<()> {
        let path = self.path_for(PosterFile::FailureMarker(movie_id));
        tokio::fs::write(&path, Utc::now().to_rfc3339()).await?;
        Ok(())
    }

    async fn load_image(&self, movie_id: MovieId) -> AppResult<Option<Vec<u8>>> {
        match tokio::fs::read(self.path_for(PosterFile::Image(movie_id))).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn name(&self) -> &'static str {
        "filesystem"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let cache_dir = dir.path().join("nested").join("posters");

        let store = FsPosterStore::new(&cache_dir).unwrap();
        assert!(cache_dir.is_dir());
        assert_eq!(store.cache_dir(), cache_dir.as_path());
    }

    #[test]
    fn test_path_for_uses_movie_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsPosterStore::new(dir.path()).unwrap();

        assert_eq!(
            store.path_for(PosterFile::Image(MovieId(603))),
            dir.path().join("603.jpg")
        );
        assert_eq!(
            store.path_for(PosterFile::FailureMarker(MovieId(603))),
            dir.path().join("603.fail")
        );
    }

    #[tokio::test]
    async fn test_unknown_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsPosterStore::new(dir.path()).unwrap();

        assert_eq!(store.entry(MovieId(1)).await.unwrap(), CacheEntry::Unknown);
        assert_eq!(store.load_image(MovieId(1)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_image() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsPosterStore::new(dir.path()).unwrap();

        store.save_image(MovieId(603), b"jpeg-bytes").await.unwrap();

        assert_eq!(store.entry(MovieId(603)).await.unwrap(), CacheEntry::Success);
        assert_eq!(
            store.load_image(MovieId(603)).await.unwrap(),
            Some(b"jpeg-bytes".to_vec())
        );
        assert_eq!(std::fs::read(dir.path().join("603.jpg")).unwrap(), b"jpeg-bytes");
    }

    #[tokio::test]
    async fn test_mark_failed() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsPosterStore::new(dir.path()).unwrap();

        store.mark_failed(MovieId(42)).await.unwrap();

        assert_eq!(
            store.entry(MovieId(42)).await.unwrap(),
            CacheEntry::PermanentFailure
        );
        assert!(dir.path().join("42.fail").exists());
        assert_eq!(store.load_image(MovieId(42)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clearing_directory_resets_state() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsPosterStore::new(dir.path()).unwrap();

        store.mark_failed(MovieId(42)).await.unwrap();
        std::fs::remove_file(dir.path().join("42.fail")).unwrap();

        assert_eq!(store.entry(MovieId(42)).await.unwrap(), CacheEntry::Unknown);
    }
}
