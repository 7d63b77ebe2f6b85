use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use anyhow::anyhow;

#[derive(Debug, Clone)]
pub struct Config {
    pub dataset_path: String,
    pub merged_path: String,
    pub new_movies_path: String,
    pub sentiment_path: String,
    pub listing_base_url: String,
    pub api_base_url: String,
    pub review_base_url: String,
    pub stop_imdbid: Option<String>,
    pub page_cap: u32,
    pub batch_size: usize,
    pub max_workers: usize,
    pub inter_batch_delay: Duration,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            dataset_path: var_or("DATASET_PATH", "data/bechdel_movies.csv"),
            merged_path: var_or("MERGED_PATH", "data/bechdel_movies_combined.csv"),
            new_movies_path: var_or("NEW_MOVIES_PATH", "data/new_movies.csv"),
            sentiment_path: var_or("SENTIMENT_PATH", "data/bechdel_movies_with_sentiment.csv"),
            listing_base_url: var_or("LISTING_BASE_URL", "https://bechdeltest.com"),
            api_base_url: var_or("API_BASE_URL", "https://bechdeltest.com/api/v1"),
            review_base_url: var_or("REVIEW_BASE_URL", "https://www.imdb.com"),
            stop_imdbid: env::var("STOP_IMDBID").ok().filter(|v| !v.is_empty()),
            page_cap: parse_or("PAGE_CAP", 3)?,
            batch_size: parse_or("BATCH_SIZE", 100)?,
            max_workers: parse_or("MAX_WORKERS", 10)?,
            inter_batch_delay: Duration::from_secs(parse_or("INTER_BATCH_DELAY_SECS", 10)?),
            request_timeout: Duration::from_secs(parse_or("REQUEST_TIMEOUT_SECS", 10)?),
        })
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_or<T: FromStr>(key: &str, default: T) -> anyhow::Result<T>
where
    T::Err: Display,
{
    match env::var(key) {
        Ok(v) if !v.is_empty() => v.parse().map_err(|e| anyhow!("invalid {}: {}", key, e)),
        _ => Ok(default),
    }
}
