use std::{cmp::Ordering, collections::HashMap};

use crate::{
    error::{AppError, AppResult},
    models::{Movie, MovieId},
};

/// Square matrix of precomputed pairwise similarity scores
///
/// Entry `(i, j)` is the similarity between catalog rows `i` and `j`.
/// Symmetry is assumed by callers but never checked.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f32>,
}

impl SimilarityMatrix {
    /// Builds a matrix from rows, rejecting anything that is not square
    pub fn from_rows(rows: Vec<Vec<f32>>) -> AppResult<Self> {
        let size = rows.len();
        let mut values = Vec::with_capacity(size * size);

        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(AppError::DataLoad(format!(
                    "Similarity matrix is not square: row {} has {} columns, expected {}",
                    index,
                    row.len(),
                    size
                )));
            }
            values.extend(row);
        }

        Ok(Self { size, values })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Similarity scores between row `index` and every row
    pub fn row(&self, index: usize) -> &[f32] {
        let start = index * self.size;
        &self.values[start..start + self.size]
    }
}

/// A catalog movie paired with its similarity to the query
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMovie<'a> {
    pub movie: &'a Movie,
    pub score: f32,
}

/// In-memory movie table with its aligned similarity matrix
///
/// Loaded once at startup and never mutated, so it can be shared freely
/// behind an `Arc`.
#[derive(Debug)]
pub struct Catalog {
    movies: Vec<Movie>,
    similarity: SimilarityMatrix,
    /// Title -> first row index carrying that title
    title_index: HashMap<String, usize>,
    id_index: HashMap<MovieId, usize>,
}

impl Catalog {
    /// Creates a catalog, checking that movie rows line up with matrix rows
    pub fn new(movies: Vec<Movie>, similarity: SimilarityMatrix) -> AppResult<Self> {
        if movies.len() != similarity.size() {
            return Err(AppError::DataLoad(format!(
                "Catalog has {} movies but similarity matrix is {}x{}",
                movies.len(),
                similarity.size(),
                similarity.size()
            )));
        }

        let mut title_index = HashMap::with_capacity(movies.len());
        let mut id_index = HashMap::with_capacity(movies.len());
        for (index, movie) in movies.iter().enumerate() {
            title_index.entry(movie.title.clone()).or_insert(index);
            id_index.entry(movie.movie_id).or_insert(index);
        }

        Ok(Self {
            movies,
            similarity,
            title_index,
            id_index,
        })
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn contains_id(&self, movie_id: MovieId) -> bool {
        self.id_index.contains_key(&movie_id)
    }

    pub fn movie_by_id(&self, movie_id: MovieId) -> Option<&Movie> {
        self.id_index.get(&movie_id).map(|&index| &self.movies[index])
    }

    /// Row index of an exact, case-sensitive title match
    pub fn index_of(&self, title: &str) -> AppResult<usize> {
        self.title_index
            .get(title)
            .copied()
            .ok_or_else(|| AppError::NotFound(format!("Movie '{}' not found in catalog", title)))
    }

    /// Returns the `n` movies most similar to `title`, best first
    ///
    /// The query movie itself is never part of the result. Equal scores are
    /// ordered by catalog index, and NaN scores rank after every number.
    pub fn recommend(&self, title: &str, n: usize) -> AppResult<Vec<ScoredMovie<'_>>> {
        let query = self.index_of(title)?;
        let row = self.similarity.row(query);

        let mut ranked: Vec<usize> = (0..row.len()).filter(|&index| index != query).collect();
        ranked.sort_by(|&a, &b| by_descending_score(row[a], row[b]).then(a.cmp(&b)));
        ranked.truncate(n);

        Ok(ranked
            .into_iter()
            .map(|index| ScoredMovie {
                movie: &self.movies[index],
                score: row[index],
            })
            .collect())
    }

    /// Case-insensitive substring search over titles, in catalog order
    ///
    /// Returns an empty vector when nothing matches.
    pub fn find_titles(&self, query: &str) -> Vec<&Movie> {
        let needle = query.to_lowercase();
        self.movies
            .iter()
            .filter(|movie| movie.title.to_lowercase().contains(&needle))
            .collect()
    }
}

fn by_descending_score(a: f32, b: f32) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}
