// src/timeseries/mod.rs

pub mod months;

pub use months::{DateRange, SENTINEL_DATE, month_to_range, try_month_to_range};

use serde::Serialize;

use crate::error::{Result, ScrapeError};

// Where the chart data sits inside the serialized script block. These are
// tied to one version of the Trends page and are not derived from anything.
const FRAGMENT_HEAD_OFFSET: usize = 573;
const FRAGMENT_TAIL_OFFSET: usize = 386;

const LABEL_MARKER: &str = "\"f\":";
const VALUE_DISTANCE: usize = 3;
const LABEL_PREFIX_LEN: usize = 5;
const LABEL_SUFFIX_LEN: usize = 2;

/// Search interest for one month, normalized so the peak month is 100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimePoint {
    pub label: String,
    pub value: i64,
}

impl TimePoint {
    pub fn to_range(&self) -> DateRange {
        month_to_range(&self.label, self.value)
    }
}

/// Cuts the chart data out of the serialized script block.
pub fn series_fragment(script_blob: &str) -> Result<String> {
    let length = script_blob.chars().count();
    if length < FRAGMENT_HEAD_OFFSET + FRAGMENT_TAIL_OFFSET {
        return Err(ScrapeError::Decode(format!(
            "script block is {} characters, too short to hold the series",
            length
        )));
    }

    Ok(script_blob
        .chars()
        .skip(FRAGMENT_HEAD_OFFSET)
        .take(length - FRAGMENT_HEAD_OFFSET - FRAGMENT_TAIL_OFFSET)
        .collect())
}

/// Decodes the time series held in the serialized script block.
pub fn decode_series(script_blob: &str) -> Result<Vec<TimePoint>> {
    decode_fields(&series_fragment(script_blob)?)
}

/// Splits the fragment on commas and pairs every `"f":` field with the
/// field three places after it.
pub fn decode_fields(fragment: &str) -> Result<Vec<TimePoint>> {
    let fields: Vec<&str> = fragment.split(',').collect();

    fields
        .iter()
        .enumerate()
        .filter(|(_, field)| field.starts_with(LABEL_MARKER))
        .map(|(i, field)| {
            let raw_value = fields.get(i + VALUE_DISTANCE).ok_or_else(|| {
                ScrapeError::Decode(format!("no value field after label field {}", i))
            })?;
            let value = raw_value.trim().parse::<i64>().map_err(|e| {
                ScrapeError::Decode(format!("value '{}' is not an integer: {}", raw_value, e))
            })?;
            Ok(TimePoint {
                label: trim_label(field),
                value,
            })
        })
        .collect()
}

fn trim_label(field: &str) -> String {
    let length = field.chars().count();
    field
        .chars()
        .skip(LABEL_PREFIX_LEN)
        .take(length.saturating_sub(LABEL_PREFIX_LEN + LABEL_SUFFIX_LEN))
        .collect()
}
