use std::path::Path;

use serde::de::DeserializeOwned;

use crate::{
    error::{AppError, AppResult},
    models::Movie,
    services::catalog::{Catalog, SimilarityMatrix},
};

/// Loads the movie table and similarity matrix into a catalog
///
/// Both files are read once at startup. Any I/O, parse or alignment failure
/// is returned as an error and should abort startup.
pub async fn load_catalog(movies_path: &Path, similarity_path: &Path) -> AppResult<Catalog> {
    let movies: Vec<Movie> = read_json(movies_path).await?;
    let rows: Vec<Vec<f32>> = read_json(similarity_path).await?;

    let similarity = SimilarityMatrix::from_rows(rows)?;
    let catalog = Catalog::new(movies, similarity)?;

    tracing::info!(
        movies = catalog.len(),
        movies_path = %movies_path.display(),
        similarity_path = %similarity_path.display(),
        "Catalog loaded"
    );

    Ok(catalog)
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let raw = tokio::fs::read(path).await.map_err(|e| {
        AppError::DataLoad(format!("Failed to read {}: {}", path.display(), e))
    })?;

    serde_json::from_slice(&raw)
        .map_err(|e| AppError::DataLoad(format!("Failed to parse {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MovieId;
    use std::{fs, path::PathBuf};
    use tempfile::TempDir;

    fn write_artifacts(dir: &TempDir, movies: &str, similarity: &str) -> (PathBuf, PathBuf) {
        let movies_path = dir.path().join("movies.json");
        let similarity_path = dir.path().join("similarity.json");
        fs::write(&movies_path, movies).unwrap();
        fs::write(&similarity_path, similarity).unwrap();
        (movies_path, similarity_path)
    }

    #[test]
    fn test_load_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let (movies_path, similarity_path) = write_artifacts(
            &dir,
            r#"[
                {"movie_id": 19995, "title": "Avatar", "tags": "alien future"},
                {"id": 285, "title": "Pirates of the Caribbean: At World's End"},
                {"tmdb_id": 206647, "title": "Spectre"}
            ]"#,
            "[[1.0, 0.2, 0.3], [0.2, 1.0, 0.1], [0.3, 0.1, 1.0]]",
        );

        let catalog = tokio_test::block_on(load_catalog(&movies_path, &similarity_path)).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.movies()[1].movie_id, MovieId(285));

        let results = catalog.recommend("Avatar", 1).unwrap();
        assert_eq!(results[0].movie.title, "Spectre");
    }

    #[test]
    fn test_load_catalog_prefers_movie_id_column() {
        let dir = tempfile::tempdir().unwrap();
        let (movies_path, similarity_path) = write_artifacts(
            &dir,
            r#"[
                {"id": 1, "movie_id": 19995, "title": "Avatar"},
                {"id": 285, "title": "Pirates of the Caribbean: At World's End"}
            ]"#,
            "[[1.0, 0.5], [0.5, 1.0]]",
        );

        let catalog = tokio_test::block_on(load_catalog(&movies_path, &similarity_path)).unwrap();
        assert_eq!(catalog.movies()[0].movie_id, MovieId(19995));
        assert_eq!(catalog.movies()[1].movie_id, MovieId(285));
    }

    #[test]
    fn test_load_catalog_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");

        let err = tokio_test::block_on(load_catalog(&missing, &missing)).unwrap_err();
        assert!(matches!(err, AppError::DataLoad(_)));
    }

    #[test]
    fn test_load_catalog_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let (movies_path, similarity_path) =
            write_artifacts(&dir, r#"[{"title": "No id"}]"#, "[[1.0]]");

        let err = tokio_test::block_on(load_catalog(&movies_path, &similarity_path)).unwrap_err();
        assert!(matches!(err, AppError::DataLoad(_)));
    }

    #[test]
    fn test_load_catalog_misaligned() {
        let dir = tempfile::tempdir().unwrap();
        let (movies_path, similarity_path) = write_artifacts(
            &dir,
            r#"[{"movie_id": 1, "title": "A"}, {"movie_id": 2, "title": "B"}]"#,
            "[[1.0]]",
        );

        let err = tokio_test::block_on(load_catalog(&movies_path, &similarity_path)).unwrap_err();
        assert!(matches!(err, AppError::DataLoad(_)));
    }
}
