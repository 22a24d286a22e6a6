// src/fetcher/mod.rs

use async_trait::async_trait;
use reqwest::Client;
use std::collections::BTreeMap;
use tracing::debug;

use crate::config::ScraperConfig;
use crate::error::{Result, ScrapeError};

pub const USER_AGENT_HEADER: &str = "User-Agent";

/// A single GET. The spoofed `User-Agent` is set at construction and
/// cannot be left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub headers: BTreeMap<String, String>,
}

impl FetchRequest {
    pub fn new(url: impl Into<String>, user_agent: &str) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(USER_AGENT_HEADER.to_string(), user_agent.to_string());
        Self {
            url: url.into(),
            headers,
        }
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.headers.get(USER_AGENT_HEADER).map(String::as_str)
    }
}

/// Anything that can turn a request into the raw response body.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, request: &FetchRequest) -> Result<Vec<u8>>;
}

/// The reqwest-backed fetcher used outside of tests.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a client with the configured timeout. Timeouts and TLS are the
    /// client's business; callers only see `ScrapeError::Network`.
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<Vec<u8>> {
        let mut builder = self.client.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await?;
        if !response.status().is_success() {
            return Err(ScrapeError::HttpStatus {
                url: request.url.clone(),
                status: response.status().as_u16(),
            });
        }

        let body = response.bytes().await?;
        debug!(
            "Fetched {} bytes from {} as '{}'",
            body.len(),
            request.url,
            request.user_agent().unwrap_or_default()
        );
        Ok(body.to_vec())
    }
}
