use serde::Deserialize;
use std::{path::PathBuf, time::Duration};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDb API key. Poster lookups are disabled when unset or empty.
    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    /// TMDb REST API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// TMDb image CDN base URL (size segment included)
    #[serde(default = "default_tmdb_image_base")]
    pub tmdb_image_base: String,

    /// Directory holding cached posters and failure markers
    #[serde(default = "default_poster_cache_dir")]
    pub poster_cache_dir: PathBuf,

    /// Movie table (JSON array of records)
    #[serde(default = "default_movies_path")]
    pub movies_path: PathBuf,

    /// Similarity matrix aligned with the movie table (JSON array of rows)
    #[serde(default = "default_similarity_path")]
    pub similarity_path: PathBuf,

    /// Per-request timeout for TMDb calls
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_base() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_poster_cache_dir() -> PathBuf {
    PathBuf::from("poster_cache")
}

fn default_movies_path() -> PathBuf {
    PathBuf::from("data/movies.json")
}

fn default_similarity_path() -> PathBuf {
    PathBuf::from("data/similarity.json")
}

fn default_http_timeout_secs() -> u64 {
    10
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// The API key, if one is configured and non-blank
    pub fn api_key(&self) -> Option<&str> {
        self.tmdb_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
