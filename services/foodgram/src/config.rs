use std::path::PathBuf;

use anyhow::Context as _;

use foodgram_domain::pagination::DEFAULT_LIMIT;

/// Foodgram service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct FoodgramConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// TCP port for the HTTP server (default 8000). Env var: `FOODGRAM_PORT`.
    pub port: u16,
    /// Externally visible origin used for media, pagination and short links
    /// (default `http://localhost:8000`). Env var: `PUBLIC_URL`.
    pub public_url: String,
    /// Directory holding uploaded images (default `media`). Env var: `MEDIA_ROOT`.
    pub media_root: PathBuf,
    /// Page size when a list request has no `limit` (default 6). Env var: `PAGE_SIZE`.
    pub page_size: u32,
}

impl FoodgramConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup so parsing can be tested without
    /// touching the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;
        let port = match lookup("FOODGRAM_PORT") {
            Some(v) => v.parse().context("FOODGRAM_PORT must be a port number")?,
            None => 8000,
        };
        let page_size = match lookup("PAGE_SIZE") {
            Some(v) => v.parse().context("PAGE_SIZE must be a positive integer")?,
            None => DEFAULT_LIMIT,
        };
        let public_url = lookup("PUBLIC_URL")
            .unwrap_or_else(|| "http://localhost:8000".to_owned())
            .trim_end_matches('/')
            .to_owned();
        let media_root = lookup("MEDIA_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("media"));
        Ok(Self {
            database_url,
            port,
            public_url,
            media_root,
            page_size,
        })
    }
}
