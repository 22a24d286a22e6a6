// src/extractor/mod.rs

use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeSet;
use std::sync::OnceLock;
use tracing::debug;

use crate::error::{Result, ScrapeError};

static RESULTS_SELECTOR: OnceLock<Selector> = OnceLock::new();
static SCORE_SELECTOR: OnceLock<Selector> = OnceLock::new();
static FIRST_TERM_SELECTOR: OnceLock<Selector> = OnceLock::new();
static TERM_SELECTOR: OnceLock<Selector> = OnceLock::new();
static ANCHOR_SELECTOR: OnceLock<Selector> = OnceLock::new();
static PARAGRAPH_SELECTOR: OnceLock<Selector> = OnceLock::new();
static SCRIPT_SELECTOR: OnceLock<Selector> = OnceLock::new();

/// `onclick` value that marks a correlated term anchor.
pub const TERM_ONCLICK_MARKER: &str = "addHash(this);";

/// Google wraps outbound news links in a redirect; this is how they start.
pub const LINK_MARKER: &str = "href=\"/url?q=";
const LINK_PREFIX: &str = "/url?q=";
const LINK_END: &str = "&amp";

pub const PARAGRAPH_SEPARATOR: &str = ". ";

/// The time series lives in the fourth javascript block of the page.
pub const SERIES_SCRIPT_INDEX: usize = 3;

fn selector(cell: &'static OnceLock<Selector>, css: &str) -> &'static Selector {
    cell.get_or_init(|| Selector::parse(css).expect("hard-coded selector is valid"))
}

/// A related term and how strongly it correlates with the query.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedTerm {
    pub text: String,
    pub score: f64,
}

/// Terms and scores as they were collected from the results region.
/// Entries are related by position only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoredTerms {
    pub terms: Vec<String>,
    pub scores: Vec<f64>,
}

impl ScoredTerms {
    /// The queried term always correlates perfectly with itself and leads the
    /// list. The rest are zipped, so a surplus on either side is dropped.
    pub fn pair_with_query(&self, query_term: &str) -> Vec<ExtractedTerm> {
        let mut paired = Vec::with_capacity(self.scores.len() + 1);
        paired.push(ExtractedTerm {
            text: query_term.to_string(),
            score: 1.0,
        });
        paired.extend(
            self.terms
                .iter()
                .zip(&self.scores)
                .map(|(text, score)| ExtractedTerm {
                    text: text.clone(),
                    score: *score,
                }),
        );
        paired
    }
}

/// Reads the correlated terms out of the `div#results` region.
pub fn extract_scored_terms(document: &Html) -> Result<ScoredTerms> {
    let results = document
        .select(selector(&RESULTS_SELECTOR, "div#results"))
        .next()
        .ok_or_else(|| ScrapeError::Extraction("no div with id 'results' on page".to_string()))?;

    let scores = results
        .select(selector(&SCORE_SELECTOR, "small"))
        .map(|node| {
            let raw = node.inner_html();
            raw.trim().parse::<f64>().map_err(|e| {
                ScrapeError::Extraction(format!("correlation score '{}' is not a number: {}", raw, e))
            })
        })
        .collect::<Result<Vec<f64>>>()?;

    // The first term is rendered as a plain span, the rest as anchors.
    let mut terms: Vec<String> = results
        .select(selector(&FIRST_TERM_SELECTOR, "span"))
        .next()
        .map(|span| span.inner_html())
        .into_iter()
        .collect();

    terms.extend(
        results
            .select(selector(&TERM_SELECTOR, "a[onclick]"))
            .filter(|a| a.value().attr("onclick") == Some(TERM_ONCLICK_MARKER))
            .map(|a| a.inner_html()),
    );

    debug!("Extracted {} terms and {} scores", terms.len(), scores.len());
    Ok(ScoredTerms { terms, scores })
}

/// Collects the unique redirect targets of every news result anchor.
pub fn extract_links(document: &Html) -> BTreeSet<String> {
    document
        .select(selector(&ANCHOR_SELECTOR, "a"))
        .map(|anchor| anchor.html())
        .filter(|html| html.contains(LINK_MARKER))
        .filter_map(|html| link_target(&html))
        .collect()
}

fn link_target(anchor_html: &str) -> Option<String> {
    let start = anchor_html.find(LINK_PREFIX)? + LINK_PREFIX.len();
    let rest = &anchor_html[start..];
    let end = rest.find(LINK_END).or_else(|| rest.find('"'))?;
    Some(rest[..end].to_string())
}

/// Every `<p>` serialized with its markup, joined into one blob.
pub fn extract_paragraph_text(document: &Html) -> String {
    document
        .select(selector(&PARAGRAPH_SELECTOR, "p"))
        .map(|p| p.html())
        .collect::<Vec<_>>()
        .join(PARAGRAPH_SEPARATOR)
}

/// The serialized `<script type="text/javascript">` block holding the
/// time-series data.
pub fn extract_series_script(document: &Html) -> Result<String> {
    let scripts: Vec<ElementRef> = document
        .select(selector(&SCRIPT_SELECTOR, r#"script[type="text/javascript"]"#))
        .collect();

    scripts
        .get(SERIES_SCRIPT_INDEX)
        .map(|script| script.html())
        .ok_or_else(|| {
            ScrapeError::Decode(format!(
                "expected at least {} javascript blocks, found {}",
                SERIES_SCRIPT_INDEX + 1,
                scripts.len()
            ))
        })
}
