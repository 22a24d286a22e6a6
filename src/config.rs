// src/config.rs

use crate::error::{Result, ScrapeError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// The identity every request is sent with. Google refuses obvious scrapers,
/// so we present ourselves as an old desktop Firefox.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows; U; Windows NT 5.1; en-US; rv:1.9.0.7) Gecko/2009021910 Firefox/3.0.7";

pub const DEFAULT_LEXICON_PATH: &str = "/usr/share/dict/words";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub user_agent: String,
    pub timeout_secs: u64,
    pub lexicon_path: PathBuf,
    pub tone: Option<ToneCredentials>,
}

/// Credentials for the tone analyzer. Always handed to `ToneAnalyzer::new`
/// explicitly; nothing keeps them around globally.
#[derive(Debug, Clone, Deserialize)]
pub struct ToneCredentials {
    pub username: String,
    pub password: String,
    #[serde(default = "default_tone_version")]
    pub version: String,
    #[serde(default = "default_tone_endpoint")]
    pub endpoint: String,
}

fn default_tone_version() -> String {
    "2016-05-19".to_string()
}

fn default_tone_endpoint() -> String {
    "https://gateway.watsonplatform.net/tone-analyzer/api/v3/tone".to_string()
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            lexicon_path: PathBuf::from(DEFAULT_LEXICON_PATH),
            tone: None,
        }
    }
}

impl ScraperConfig {
    /// Layers an optional TOML file and `TRENDSCRAPE__*` environment variables
    /// over the defaults. Meant for binaries; the library itself only ever
    /// receives a finished `ScraperConfig`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("TRENDSCRAPE")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| ScrapeError::Config(e.to_string()))?;

        let config: ScraperConfig = settings
            .try_deserialize()
            .map_err(|e| ScrapeError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn validate(&self) -> Result<()> {
        if self.user_agent.trim().is_empty() {
            return Err(ScrapeError::Config("user_agent must not be empty".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(ScrapeError::Config(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
