// src/sentiment/mod.rs

use reqwest::{Client, Request};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{ScraperConfig, ToneCredentials};
use crate::error::{Result, ScrapeError};

const FLATTENED_CATEGORIES: usize = 3;
const FLATTENED_TONES: usize = 3;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ToneResponse {
    #[serde(default)]
    pub sentences_tone: Vec<SentenceTone>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SentenceTone {
    #[serde(default)]
    pub tone_categories: Vec<ToneCategory>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToneCategory {
    pub category_name: String,
    #[serde(default)]
    pub tones: Vec<Tone>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Tone {
    pub tone_name: String,
    pub score: f64,
}

/// One row of the flattened tone table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToneScore {
    pub category_name: String,
    pub tone_name: String,
    pub score: f64,
}

#[derive(Serialize)]
struct ToneRequest<'a> {
    text: &'a str,
}

/// Client for the tone analyzer service.
pub struct ToneAnalyzer {
    client: Client,
    credentials: ToneCredentials,
}

impl ToneAnalyzer {
    pub fn new(credentials: ToneCredentials, config: &ScraperConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()?;
        Ok(Self { client, credentials })
    }

    /// POST to the endpoint with basic auth, the API version as a query
    /// parameter and `{"text": ...}` as the body.
    pub fn tone_request(&self, text: &str) -> Result<Request> {
        let request = self
            .client
            .post(&self.credentials.endpoint)
            .query(&[("version", self.credentials.version.trim())])
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .json(&ToneRequest { text })
            .build()?;
        Ok(request)
    }

    pub async fn analyze(&self, text: &str) -> Result<ToneResponse> {
        info!("Sending {} characters to the tone analyzer", text.len());
        let request = self.tone_request(text)?;
        let response = self.client.execute(request).await?;

        if !response.status().is_success() {
            return Err(ScrapeError::HttpStatus {
                url: self.credentials.endpoint.clone(),
                status: response.status().as_u16(),
            });
        }

        let tones: ToneResponse = response.json().await?;
        debug!("Tone analyzer returned {} sentences", tones.sentences_tone.len());
        Ok(tones)
    }
}

/// Flattens the first sentence into 3x3 (category, tone, score) rows.
///
/// The category name follows the outer index but the tones are always read
/// from category 0, so every category repeats the first category's tones.
/// Existing consumers rely on this layout.
pub fn flatten_tones(response: &ToneResponse) -> Result<Vec<ToneScore>> {
    let sentence = response
        .sentences_tone
        .first()
        .ok_or_else(|| ScrapeError::Sentiment("response has no sentence tones".to_string()))?;
    let categories = &sentence.tone_categories;
    let first = categories
        .first()
        .ok_or_else(|| ScrapeError::Sentiment("sentence has no tone categories".to_string()))?;

    let mut rows = Vec::with_capacity(FLATTENED_CATEGORIES * FLATTENED_TONES);
    for i in 0..FLATTENED_CATEGORIES {
        let category = categories.get(i).ok_or_else(|| {
            ScrapeError::Sentiment(format!("missing tone category {}", i))
        })?;
        for j in 0..FLATTENED_TONES {
            let tone = first.tones.get(j).ok_or_else(|| {
                ScrapeError::Sentiment(format!("missing tone {} in category 0", j))
            })?;
            rows.push(ToneScore {
                category_name: category.category_name.clone(),
                tone_name: tone.tone_name.clone(),
                score: tone.score,
            });
        }
    }
    Ok(rows)
}
