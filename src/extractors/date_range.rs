// src/extractors/date_range.rs
//! Free-text week/date descriptors ("April 12 - May 18, 2025", "April 1-7", "2025", ...)
//! into calendar ranges. Anything unrecognized or invalid is `None`, never an error.

use chrono::{Datelike, NaiveDate, Utc};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::wiki::models::DateRange;

// --- Regex Patterns (Lazy Static), tried in this order ---
static TRAILING_DASHES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*-{2,}\s*$").expect("Failed to compile TRAILING_DASHES_RE"));

// "April 12 - May 18, 2025"
static CROSS_MONTH_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z]+)\s+(\d{1,2})\s*-\s*([A-Za-z]+)\s+(\d{1,2}),\s*(\d{4})$")
        .expect("Failed to compile CROSS_MONTH_RANGE_RE")
});

// "April 23, 2025"
static FULL_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z]+)\s+(\d{1,2}),\s*(\d{4})$").expect("Failed to compile FULL_DATE_RE")
});

// "April 1-7"
static DAY_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z]+)\s+(\d{1,2})\s*-\s*(\d{1,2})$").expect("Failed to compile DAY_RANGE_RE")
});

// "January 2"
static MONTH_DAY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z]+)\s+(\d{1,2})$").expect("Failed to compile MONTH_DAY_RE")
});

// "April"
static MONTH_ONLY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z]+)$").expect("Failed to compile MONTH_ONLY_RE"));

// "2025"
static YEAR_ONLY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})$").expect("Failed to compile YEAR_ONLY_RE"));

const MONTH_NAMES: [&str; 12] = [
    "january", "february", "march", "april", "may", "june",
    "july", "august", "september", "october", "november", "december",
];

/// Parses a descriptor, resolving year-less grammars against the current year in `zone`.
pub fn parse_date_range(descriptor: &str, zone: Tz) -> Option<DateRange> {
    let current_year = Utc::now().with_timezone(&zone).year();
    parse_date_range_in_year(descriptor, current_year)
}

/// Same as [`parse_date_range`] with an explicit implied year.
pub fn parse_date_range_in_year(descriptor: &str, current_year: i32) -> Option<DateRange> {
    let cleaned = TRAILING_DASHES_RE.replace(descriptor.trim(), "");
    let text = cleaned.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(caps) = CROSS_MONTH_RANGE_RE.captures(text) {
        let year = caps[5].parse().ok()?;
        let start = calendar_date(year, &caps[1], &caps[2])?;
        let end = calendar_date(year, &caps[3], &caps[4])?;
        return DateRange::new(start, Some(end));
    }

    if let Some(caps) = FULL_DATE_RE.captures(text) {
        let year = caps[3].parse().ok()?;
        let start = calendar_date(year, &caps[1], &caps[2])?;
        return DateRange::new(start, None);
    }

    if let Some(caps) = DAY_RANGE_RE.captures(text) {
        let start = calendar_date(current_year, &caps[1], &caps[2])?;
        let end = calendar_date(current_year, &caps[1], &caps[3])?;
        return DateRange::new(start, Some(end));
    }

    if let Some(caps) = MONTH_DAY_RE.captures(text) {
        let start = calendar_date(current_year, &caps[1], &caps[2])?;
        return DateRange::new(start, None);
    }

    if let Some(caps) = MONTH_ONLY_RE.captures(text) {
        let month = month_number(&caps[1])?;
        let start = NaiveDate::from_ymd_opt(current_year, month, 1)?;
        let end = last_day_of_month(current_year, month)?;
        return DateRange::new(start, Some(end));
    }

    if let Some(caps) = YEAR_ONLY_RE.captures(text) {
        let year = caps[1].parse().ok()?;
        let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
        let end = NaiveDate::from_ymd_opt(year, 12, 31)?;
        return DateRange::new(start, Some(end));
    }

    tracing::trace!("Unrecognized date descriptor: '{}'", text);
    None
}

/// Full English month name, any case.
fn month_number(name: &str) -> Option<u32> {
    let lowered = name.to_lowercase();
    MONTH_NAMES
        .iter()
        .position(|m| *m == lowered)
        .map(|index| index as u32 + 1)
}

fn calendar_date(year: i32, month: &str, day: &str) -> Option<NaiveDate> {
    let month = month_number(month)?;
    let day = day.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}
