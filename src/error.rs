use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{url} returned {status}")]
    HttpStatus { status: StatusCode, url: String },

    #[error("malformed response: {0}")]
    Parse(String),

    #[error("dataset schema: {0}")]
    Schema(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("i/o: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
