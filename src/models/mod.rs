use serde::{Deserialize, Serialize};

mod movie;

pub use movie::{Movie, MovieId};

/// Title entry returned by the search endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TitleSummary {
    pub movie_id: MovieId,
    pub title: String,
}

impl From<&Movie> for TitleSummary {
    fn from(movie: &Movie) -> Self {
        Self {
            movie_id: movie.movie_id,
            title: movie.title.clone(),
        }
    }
}

/// What the client should display for a recommended movie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Poster {
    /// Cached poster served by this API
    Image { url: String },
    /// No poster available; render the title's initial instead
    Placeholder { initial: char },
}

impl Poster {
    pub fn image_for(movie_id: MovieId) -> Self {
        Poster::Image {
            url: format!("/api/v1/posters/{}", movie_id),
        }
    }

    pub fn placeholder_for(movie: &Movie) -> Self {
        Poster::Placeholder {
            initial: movie.initial(),
        }
    }
}

/// A single recommended movie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub movie_id: MovieId,
    pub title: String,
    pub score: f32,
    pub overview: Option<String>,
    pub poster: Poster,
}

// ============================================================================
// TMDb API Types
// ============================================================================

/// Subset of the TMDb `GET /movie/{id}` response
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    pub id: Option<i64>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl TmdbMovieDetails {
    /// Poster path if the response carries a usable one
    pub fn usable_poster_path(self) -> Option<String> {
        self.poster_path
            .map(|path| path.trim().to_string())
            .filter(|path| !path.trim_start_matches('/').is_empty())
    }
}
