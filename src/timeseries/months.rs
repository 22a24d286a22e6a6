// src/timeseries/months.rs

use serde::Serialize;

use crate::error::{Result, ScrapeError};

/// Stands in for both dates when a label cannot be read.
pub const SENTINEL_DATE: &str = "9999-12-31";

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// One month of search interest as a date window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start_date: String,
    pub end_date: String,
    pub value: i64,
}

impl DateRange {
    fn sentinel(value: i64) -> Self {
        Self {
            start_date: SENTINEL_DATE.to_string(),
            end_date: SENTINEL_DATE.to_string(),
            value,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.start_date == SENTINEL_DATE && self.end_date == SENTINEL_DATE
    }
}

/// Maps `"<Month> <YYYY>"` to the first of that month and the first of the
/// next. December ends on the 31st of the same year instead of rolling over.
/// Unknown month names give the sentinel window rather than an error.
pub fn month_to_range(label: &str, value: i64) -> DateRange {
    let Some((month, year)) = label.split_once(' ') else {
        return DateRange::sentinel(value);
    };
    let Some(index) = MONTHS.iter().position(|name| *name == month) else {
        return DateRange::sentinel(value);
    };

    let month_number = index + 1;
    let end_date = if month_number == 12 {
        format!("{}-12-31", year)
    } else {
        format!("{}-{:02}-01", year, month_number + 1)
    };

    DateRange {
        start_date: format!("{}-{:02}-01", year, month_number),
        end_date,
        value,
    }
}

/// Same mapping, but an unreadable label is an error instead of the sentinel.
pub fn try_month_to_range(label: &str, value: i64) -> Result<DateRange> {
    let range = month_to_range(label, value);
    if range.is_sentinel() {
        return Err(ScrapeError::UnrecognizedMonthLabel(label.to_string()));
    }
    Ok(range)
}
