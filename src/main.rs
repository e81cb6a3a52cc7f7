use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use movie_recommender::{
    db::{load_catalog, FsPosterStore},
    routes::{create_router, AppState},
    services::{providers::TmdbClient, PosterCache},
    Config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("movie_recommender=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let catalog = Arc::new(load_catalog(&config.movies_path, &config.similarity_path).await?);

    let posters = match config.api_key() {
        Some(api_key) => {
            let store = FsPosterStore::new(&config.poster_cache_dir)?;
            let client = TmdbClient::new(
                api_key.to_string(),
                config.tmdb_api_url.clone(),
                config.tmdb_image_base.clone(),
                config.http_timeout(),
            )?;
            Some(PosterCache::new(Arc::new(store), Arc::new(client)))
        }
        None => {
            tracing::warn!("TMDB_API_KEY not set, posters will use placeholders");
            None
        }
    };

    let state = Arc::new(AppState::new(catalog, posters));
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
