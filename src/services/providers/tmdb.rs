/// TMDb API provider
///
/// API Flow:
/// 1. Metadata: /movie/{id} → `poster_path`
/// 2. Image: {image_base}/{poster_path} → JPEG bytes
use std::time::Duration;

use reqwest::{Client as HttpClient, Response};

use crate::{
    error::{AppError, AppResult},
    models::{MovieId, TmdbMovieDetails},
    services::providers::PosterSource,
};

const LANGUAGE: &str = "en-US";

#[derive(Clone)]
pub struct TmdbClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    image_base: String,
}

impl TmdbClient {
    pub fn new(
        api_key: String,
        api_url: String,
        image_base: String,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            image_base: image_base.trim_end_matches('/').to_string(),
        })
    }

    fn movie_url(&self, movie_id: MovieId) -> String {
        format!("{}/movie/{}", self.api_url, movie_id)
    }

    fn image_url(&self, poster_path: &str) -> String {
        format!("{}/{}", self.image_base, poster_path.trim_start_matches('/'))
    }

    async fn ensure_success(response: Response, what: &str) -> AppResult<Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(AppError::ExternalApi(format!(
            "TMDb {} returned status {}: {}",
            what, status, body
        )))
    }
}

#[async_trait::async_trait]
impl PosterSource for TmdbClient {
    async fn poster_path(&self, movie_id: MovieId) -> AppResult<Option<String>> {
        let response = self
            .http_client
            .get(self.movie_url(movie_id))
            .query(&[("api_key", self.api_key.as_str()), ("language", LANGUAGE)])
            .send()
            .await?;

        let response = Self::ensure_success(response, "movie lookup").await?;

        let details: TmdbMovieDetails = response.json().await?;
        let poster_path = details.usable_poster_path();

        tracing::debug!(
            movie_id = %movie_id,
            has_poster = poster_path.is_some(),
            provider = "tmdb",
            "Movie metadata fetched"
        );

        Ok(poster_path)
    }

    async fn download(&self, poster_path: &str) -> AppResult<Vec<u8>> {
        let response = self
            .http_client
            .get(self.image_url(poster_path))
            .send()
            .await?;

        let response = Self::ensure_success(response, "image download").await?;

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(AppError::ExternalApi(format!(
                "TMDb returned an empty image for {}",
                poster_path
            )));
        }

        Ok(bytes.to_vec())
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
