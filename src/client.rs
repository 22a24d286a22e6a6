// src/client.rs

use scraper::Html;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, info};
use url::{Position, Url};
use whatlang::detect;

use crate::config::ScraperConfig;
use crate::error::Result;
use crate::extractor::{self, ExtractedTerm};
use crate::fetcher::{FetchRequest, Fetcher};
use crate::normalizer::{self, Lexicon};
use crate::query::{self, SearchQuery};
use crate::timeseries::{self, DateRange, TimePoint};

/// The dictionary-filtered words of an article and the language they are in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Article {
    pub words: Vec<String>,
    pub language: String,
}

impl Article {
    pub fn text(&self) -> String {
        self.words.join(" ")
    }
}

/// Runs each scrape end to end: build the URL, fetch once, parse, extract.
/// Holds no state between calls beyond its collaborators.
pub struct GoogleClient<F, L> {
    fetcher: F,
    lexicon: L,
    user_agent: String,
}

impl<F: Fetcher, L: Lexicon> GoogleClient<F, L> {
    pub fn new(fetcher: F, lexicon: L, config: &ScraperConfig) -> Self {
        Self {
            fetcher,
            lexicon,
            user_agent: config.user_agent.clone(),
        }
    }

    async fn fetch_document(&self, url: &str) -> Result<Html> {
        info!("Fetching {}", url);
        let request = FetchRequest::new(url, &self.user_agent);
        let body = self.fetcher.fetch(&request).await?;
        Ok(Html::parse_document(&String::from_utf8_lossy(&body)))
    }

    /// Terms that Google Correlate considers related to `term`, led by the
    /// term itself at 1.0, keeping only scores strictly above `min_percent`%.
    pub async fn correlated_terms(&self, term: &str, min_percent: f64) -> Result<Vec<ExtractedTerm>> {
        let query = SearchQuery::new(term)?;
        let document = self.fetch_document(&query::correlate_url(&query)).await?;

        let threshold = min_percent / 100.0;
        let terms: Vec<ExtractedTerm> = extractor::extract_scored_terms(&document)?
            .pair_with_query(term)
            .into_iter()
            .filter(|t| t.score > threshold)
            .collect();

        debug!("{} correlated terms above {}", terms.len(), threshold);
        Ok(terms)
    }

    /// Unique article URLs from a Google News search over a date window.
    pub async fn news_links(&self, term: &str, date_start: &str, date_end: &str) -> Result<BTreeSet<String>> {
        let query = SearchQuery::with_dates(term, date_start, date_end)?;
        let document = self.fetch_document(&query::news_url(&query)?).await?;

        let links = extractor::extract_links(&document);
        info!("Found {} unique news links for '{}'", links.len(), term);
        Ok(links)
    }

    pub async fn article(&self, url: &str) -> Result<Article> {
        let document = self.fetch_document(url).await?;
        let raw_text = extractor::extract_paragraph_text(&document);
        let words = normalizer::normalize(&raw_text, &self.lexicon);

        let language = match detect(&words.join(" ")) {
            Some(info) => info.lang().code().to_string(),
            None => "unknown".to_string(),
        };

        info!("Kept {} words from {} [Lang: {}]", words.len(), url, language);
        Ok(Article { words, language })
    }

    /// Monthly search interest for `term` since January 2004.
    pub async fn search_frequency(&self, term: &str) -> Result<Vec<TimePoint>> {
        let query = SearchQuery::new(term)?;
        let document = self.fetch_document(&query::frequency_url(&query)).await?;

        let script = extractor::extract_series_script(&document)?;
        let points = timeseries::decode_series(&script)?;
        info!("Decoded {} monthly points for '{}'", points.len(), term);
        Ok(points)
    }

    /// `search_frequency` with each month turned into a date window.
    pub async fn frequency_ranges(&self, term: &str) -> Result<Vec<DateRange>> {
        let points = self.search_frequency(term).await?;
        Ok(points.iter().map(TimePoint::to_range).collect())
    }
}

/// `scheme://host[:port]/` of the site an article lives on.
pub fn article_domain(url: &str) -> Result<String> {
    let url = Url::parse(url)?;
    Ok(format!("{}/", &url[..Position::AfterPort]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_USER_AGENT;
    use crate::error::ScrapeError;
    use crate::fetcher::USER_AGENT_HEADER;
    use crate::normalizer::WordList;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Serves canned pages and remembers what was asked for.
    #[derive(Default)]
    struct FakeFetcher {
        pages: HashMap<String, String>,
        requests: Mutex<Vec<FetchRequest>>,
    }

    impl FakeFetcher {
        fn with_page(mut self, url: &str, body: &str) -> Self {
            self.pages.insert(url.to_string(), body.to_string());
            self
        }

        fn requested_urls(&self) -> Vec<String> {
            self.requests.lock().unwrap().iter().map(|r| r.url.clone()).collect()
        }
    }

    #[async_trait]
    impl Fetcher for FakeFetcher {
        async fn fetch(&self, request: &FetchRequest) -> Result<Vec<u8>> {
            self.requests.lock().unwrap().push(request.clone());
            self.pages
                .get(&request.url)
                .map(|body| body.as_bytes().to_vec())
                .ok_or_else(|| ScrapeError::HttpStatus {
                    url: request.url.clone(),
                    status: 404,
                })
        }
    }

    fn client(fetcher: FakeFetcher) -> GoogleClient<FakeFetcher, WordList> {
        let lexicon = WordList::from_words([
            "the", "central", "bank", "raised", "rates", "again", "today", "and", "markets",
            "fell", "sharply", "in", "reply",
        ]);
        GoogleClient::new(fetcher, lexicon, &ScraperConfig::default())
    }

    #[tokio::test]
    async fn test_correlated_terms_filters_by_percent() {
        let url = "https://www.google.com/trends/correlate/search?e=flu+season&t=weekly&p=us";
        let page = r#"<div id="results">
            <span>flu symptoms</span><small>0.95</small>
            <a onclick="addHash(this);">cold remedy</a><small>0.85</small>
            <a onclick="addHash(this);">cough</a><small>0.40</small>
        </div>"#;
        let client = client(FakeFetcher::default().with_page(url, page));

        let all = client.correlated_terms("Flu Season", 0.0).await.unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(all[0].text, "Flu Season");
        assert_eq!(all[0].score, 1.0);

        let strong = client.correlated_terms("Flu Season", 90.0).await.unwrap();
        let texts: Vec<&str> = strong.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["Flu Season", "flu symptoms"]);
    }

    #[tokio::test]
    async fn test_every_request_carries_the_spoofed_user_agent() {
        let fetcher = FakeFetcher::default();
        let client = client(fetcher);
        let _ = client.article("https://example.com/missing").await;

        let requests = client.fetcher.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].headers.get(USER_AGENT_HEADER).map(String::as_str),
            Some(DEFAULT_USER_AGENT)
        );
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates() {
        let client = client(FakeFetcher::default());
        let err = client.correlated_terms("anything", 0.0).await.unwrap_err();
        assert!(err.is_network());
    }

    #[tokio::test]
    async fn test_changed_page_is_an_extraction_error() {
        let url = "https://www.google.com/trends/correlate/search?e=x&t=weekly&p=us";
        let client = client(FakeFetcher::default().with_page(url, "<p>Correlate has been shut down</p>"));
        assert!(matches!(
            client.correlated_terms("x", 0.0).await,
            Err(ScrapeError::Extraction(_))
        ));
    }

    #[tokio::test]
    async fn test_news_links_builds_dated_url() {
        let url = query::news_url(&SearchQuery::with_dates("interest rates", "2017-01-01", "2017-02-01").unwrap()).unwrap();
        let page = r#"<a href="/url?q=https://a.example.com/story&sa=U">1</a>
            <a href="/url?q=https://a.example.com/story&sa=U&ved=x">1 again</a>"#;
        let fetcher = FakeFetcher::default().with_page(&url, page);
        let client = client(fetcher);

        let links = client
            .news_links("interest rates", "2017-01-01", "2017-02-01")
            .await
            .unwrap();
        assert_eq!(links.len(), 1);
        assert!(links.contains("https://a.example.com/story"));
        assert!(client.fetcher.requested_urls()[0].contains("as_mindate=01%2F01%2F2017"));
    }

    #[tokio::test]
    async fn test_news_links_rejects_backwards_window() {
        let client = client(FakeFetcher::default());
        let result = client.news_links("rates", "2017-02-01", "2017-01-01").await;
        assert!(matches!(result, Err(ScrapeError::InvalidQuery(_))));
        assert!(client.fetcher.requested_urls().is_empty());
    }

    #[tokio::test]
    async fn test_article_is_normalized() {
        let url = "https://news.example.com/2017/rates";
        let page = r#"<html><body>
            <div class="byline">By Staff</div>
            <p>The central bank raised rates again today.</p>
            <p>Markets fell sharply in reply, down 2%.</p>
        </body></html>"#;
        let client = client(FakeFetcher::default().with_page(url, page));

        let article = client.article(url).await.unwrap();
        assert_eq!(
            article.text(),
            "The central bank raised rates again today Markets fell sharply in reply"
        );
    }

    #[tokio::test]
    async fn test_search_frequency_decodes_fourth_script() {
        let url = "https://www.google.com/trends/fetchComponent?hl=en-US&q=rust&cid=TIMESERIES_GRAPH_0&export=5&w=500&h=300";
        // The serialized tag opens with `<script type="text/javascript">` (31 chars).
        let opening = r#"<script type="text/javascript">"#;
        let head = "x".repeat(573 - opening.len());
        let fragment = r#""f":"January 2004"},"v":0,y,37,"f":"December 2004"},"v":0,y,50"#;
        let tail = "z".repeat(386 - "</script>".len());
        let page = format!(
            r#"<html><head>
            <script type="text/javascript">a</script>
            <script type="text/javascript">b</script>
            <script type="text/javascript">c</script>
            <script type="text/javascript">{}{}{}</script>
            </head></html>"#,
            head, fragment, tail
        );
        let client = client(FakeFetcher::default().with_page(url, &page));

        let points = client.search_frequency("Rust").await.unwrap();
        assert_eq!(
            points,
            vec![
                TimePoint { label: "January 2004".to_string(), value: 37 },
                TimePoint { label: "December 2004".to_string(), value: 50 },
            ]
        );

        let ranges = client.frequency_ranges("Rust").await.unwrap();
        assert_eq!(ranges[1].start_date, "2004-12-01");
        assert_eq!(ranges[1].end_date, "2004-12-31");
        assert_eq!(ranges[1].value, 50);
    }

    #[test]
    fn test_article_domain() {
        assert_eq!(
            article_domain("https://www.nytimes.com/2017/01/02/business/rates.html?x=1").unwrap(),
            "https://www.nytimes.com/"
        );
        assert_eq!(
            article_domain("http://localhost:8080/a/b").unwrap(),
            "http://localhost:8080/"
        );
        assert!(article_domain("not a url").is_err());
    }
}
