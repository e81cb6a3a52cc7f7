use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::error::AppError;

/// TMDb identifier for a movie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub i64);

impl MovieId {
    /// TMDb ids are strictly positive
    pub fn is_valid(&self) -> bool {
        self.0 > 0
    }
}

impl Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A row of the movie table
///
/// The row's position in the catalog is its index into the similarity matrix.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "RawMovie")]
pub struct Movie {
    pub movie_id: MovieId,
    pub title: String,
    pub tags: Option<String>,
}

/// Movie record as exported, with the id under any of its known column names
#[derive(Debug, Deserialize)]
struct RawMovie {
    movie_id: Option<MovieId>,
    id: Option<MovieId>,
    #[serde(rename = "movieId")]
    movie_id_camel: Option<MovieId>,
    tmdb_id: Option<MovieId>,
    title: String,
    #[serde(default)]
    tags: Option<String>,
}

impl TryFrom<RawMovie> for Movie {
    type Error = AppError;

    /// `movie_id` wins; the other columns are only consulted when it is absent
    fn try_from(raw: RawMovie) -> Result<Self, Self::Error> {
        let movie_id = raw
            .movie_id
            .or(raw.id)
            .or(raw.movie_id_camel)
            .or(raw.tmdb_id)
            .ok_or_else(|| {
                AppError::DataLoad(format!("Movie '{}' has no id column", raw.title))
            })?;

        Ok(Self {
            movie_id,
            title: raw.title,
            tags: raw.tags,
        })
    }
}

impl Movie {
    pub fn new(movie_id: i64, title: impl Into<String>) -> Self {
        Self {
            movie_id: MovieId(movie_id),
            title: title.into(),
            tags: None,
        }
    }

    /// Short overview built from the tag string, one tag per space
    pub fn overview(&self) -> Option<String> {
        self.tags
            .as_deref()
            .filter(|tags| !tags.is_empty())
            .map(|tags| tags.replace(' ', ", "))
    }

    /// Letter shown in place of a missing poster
    pub fn initial(&self) -> char {
        self.title
            .chars()
            .next()
            .and_then(|c| c.to_uppercase().next())
            .unwrap_or('?')
    }
}
