// src/lib.rs

//! Small scrapers for Google Correlate, Google News, Google Trends and
//! plain article pages, plus the text and time-series clean-up that turns
//! what they return into something worth analysing.

pub mod client;
pub mod config;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod logging;
pub mod normalizer;
pub mod query;
pub mod sentiment;
pub mod timeseries;

pub use client::{Article, GoogleClient, article_domain};
pub use config::{ScraperConfig, ToneCredentials};
pub use error::{Result, ScrapeError};
pub use extractor::ExtractedTerm;
pub use fetcher::{FetchRequest, Fetcher, HttpFetcher};
pub use normalizer::{Lexicon, WordList, normalize};
pub use query::SearchQuery;
pub use sentiment::{ToneAnalyzer, ToneScore, flatten_tones};
pub use timeseries::{DateRange, TimePoint, decode_series, month_to_range, try_month_to_range};
