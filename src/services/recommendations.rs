use crate::{
    error::AppResult,
    models::{Poster, Recommendation},
    services::{
        catalog::Catalog,
        posters::{PosterCache, PosterStatus},
    },
};

/// Recommends the `n` movies most similar to `title`
///
/// Posters are resolved one movie at a time in ranking order. With no poster
/// cache configured every result carries a placeholder and nothing touches
/// the network.
pub async fn get_recommendations(
    catalog: &Catalog,
    posters: Option<&PosterCache>,
    title: &str,
    n: usize,
) -> AppResult<Vec<Recommendation>> {
    let matches = catalog.recommend(title, n)?;

    let mut recommendations = Vec::with_capacity(matches.len());
    for scored in matches {
        let movie = scored.movie;
        let has_poster = match posters {
            Some(cache) => cache.resolve(movie.movie_id).await == PosterStatus::Available,
            None => false,
        };
        let poster = if has_poster {
            Poster::image_for(movie.movie_id)
        } else {
            Poster::placeholder_for(movie)
        };

        recommendations.push(Recommendation {
            movie_id: movie.movie_id,
            title: movie.title.clone(),
            score: scored.score,
            overview: movie.overview(),
            poster,
        });
    }

    tracing::info!(
        query = %title,
        requested = n,
        results = recommendations.len(),
        "Recommendations computed"
    );

    Ok(recommendations)
}
