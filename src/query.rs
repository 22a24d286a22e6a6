// src/query.rs

use chrono::NaiveDate;

use crate::error::{Result, ScrapeError};

pub const CORRELATE_TEMPLATE: &str =
    "https://www.google.com/trends/correlate/search?e={term}&t=weekly&p=us";

pub const NEWS_TEMPLATE: &str = "https://www.google.com/search?cf=all&hl=en&pz=1&ned=us&tbm=nws&gl=us&as_epq={term}&as_occt=any&as_drrb=b&as_mindate={st1}&as_maxdate={end1}&tbs=cdr%3A1%2Ccd_min%3A{st2}%2Ccd_max%3A{end2}&authuser=0&tbas=0";

pub const FREQUENCY_TEMPLATE: &str = "https://www.google.com/trends/fetchComponent?hl=en-US&q={term}&cid=TIMESERIES_GRAPH_0&export=5&w=500&h=300";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// What the user asked for. The date window only matters for news search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub raw_term: String,
    pub date_start: Option<NaiveDate>,
    pub date_end: Option<NaiveDate>,
}

impl SearchQuery {
    pub fn new(term: &str) -> Result<Self> {
        if term.trim().is_empty() {
            return Err(ScrapeError::InvalidQuery(
                "search term must not be empty".to_string(),
            ));
        }
        Ok(Self {
            raw_term: term.to_string(),
            date_start: None,
            date_end: None,
        })
    }

    /// Both dates are `YYYY-MM-DD` and the window must not run backwards.
    pub fn with_dates(term: &str, start: &str, end: &str) -> Result<Self> {
        let mut query = Self::new(term)?;
        let date_start = parse_date(start)?;
        let date_end = parse_date(end)?;
        if date_start > date_end {
            return Err(ScrapeError::InvalidQuery(format!(
                "start date {} is after end date {}",
                start, end
            )));
        }
        query.date_start = Some(date_start);
        query.date_end = Some(date_end);
        Ok(query)
    }

    fn date_window(&self) -> Result<(NaiveDate, NaiveDate)> {
        match (self.date_start, self.date_end) {
            (Some(start), Some(end)) => Ok((start, end)),
            _ => Err(ScrapeError::InvalidQuery(
                "news search needs both a start and an end date".to_string(),
            )),
        }
    }
}

fn parse_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|e| ScrapeError::InvalidQuery(format!("bad date '{}': {}", date, e)))
}

/// Fills every `{name}` slot of `template` with its value in a single pass.
/// Substituted text is written out as-is and never scanned for slots again.
/// Slots without a value are left in place.
pub fn build_url(template: &str, params: &[(&str, &str)]) -> String {
    let mut url = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        url.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            rest = &rest[open..];
            break;
        };

        let name = &after[..close];
        match params.iter().find(|(slot, _)| *slot == name) {
            Some((_, value)) => url.push_str(value),
            None => url.push_str(&rest[open..open + close + 2]),
        }
        rest = &after[close + 1..];
    }

    url.push_str(rest);
    url
}

/// Spaces become `+` and the whole term is lower-cased. Nothing else is
/// escaped: other URL-unsafe characters pass straight through.
pub fn format_term(term: &str) -> String {
    term.replace(' ', "+").to_lowercase()
}

/// `2020-03-05` -> `03%2F05%2F2020`.
pub fn format_news_date(date: NaiveDate) -> String {
    date.format("%m%%2F%d%%2F%Y").to_string()
}

pub fn correlate_url(query: &SearchQuery) -> String {
    build_url(CORRELATE_TEMPLATE, &[("term", &format_term(&query.raw_term))])
}

/// The term is wrapped in `%22` quotes for an exact-phrase search and the
/// date window fills four slots.
pub fn news_url(query: &SearchQuery) -> Result<String> {
    let (start, end) = query.date_window()?;
    let term = format!("%22{}%22", format_term(&query.raw_term));
    let start = format_news_date(start);
    let end = format_news_date(end);

    Ok(build_url(
        NEWS_TEMPLATE,
        &[
            ("term", &term),
            ("st1", &start),
            ("end1", &end),
            ("st2", &start),
            ("end2", &end),
        ],
    ))
}

pub fn frequency_url(query: &SearchQuery) -> String {
    build_url(FREQUENCY_TEMPLATE, &[("term", &format_term(&query.raw_term))])
}
