use crate::{models::TitleSummary, services::catalog::Catalog};

/// Service function for title search
///
/// Narrows the catalog to titles containing `query`, ignoring case. A blank
/// query, or one that matches nothing, returns the whole catalog so the
/// caller always has something to pick from.
pub fn search_titles(catalog: &Catalog, query: &str) -> Vec<TitleSummary> {
    let query = query.trim();

    let matches = if query.is_empty() {
        Vec::new()
    } else {
        catalog.find_titles(query)
    };

    if matches.is_empty() {
        if !query.is_empty() {
            tracing::debug!(query = %query, "No title matched, returning full catalog");
        }
        return catalog.movies().iter().map(TitleSummary::from).collect();
    }

    matches.into_iter().map(TitleSummary::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::Movie,
        services::catalog::SimilarityMatrix,
    };

    fn catalog() -> Catalog {
        let movies = vec![
            Movie::new(155, "The Dark Knight"),
            Movie::new(49026, "The Dark Knight Rises"),
            Movie::new(603, "The Matrix"),
        ];
        Catalog::new(movies, SimilarityMatrix::from_rows(vec![vec![0.0; 3]; 3]).unwrap()).unwrap()
    }

    fn titles(results: Vec<TitleSummary>) -> Vec<String> {
        results.into_iter().map(|t| t.title).collect()
    }

    #[test]
    fn test_search_filters() {
        assert_eq!(
            titles(search_titles(&catalog(), "dark")),
            vec!["The Dark Knight", "The Dark Knight Rises"]
        );
    }

    #[test]
    fn test_blank_query_returns_all() {
        assert_eq!(search_titles(&catalog(), "  ").len(), 3);
    }

    #[test]
    fn test_no_match_falls_back_to_all() {
        assert_eq!(
            titles(search_titles(&catalog(), "zzz")),
            vec!["The Dark Knight", "The Dark Knight Rises", "The Matrix"]
        );
    }
}
