// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Every failure is surfaced to the caller as-is; nothing here is retried.
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request to {url} failed with status {status}")]
    HttpStatus { url: String, status: u16 },

    /// The page no longer has the structure the extractor expects.
    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Unrecognized month label: '{0}'")]
    UnrecognizedMonthLabel(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Failed to load lexicon from {path}: {source}")]
    Lexicon {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Sentiment error: {0}")]
    Sentiment(String),
}

impl ScrapeError {
    /// True for transport failures and non-2xx responses.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_) | Self::HttpStatus { .. })
    }
}
