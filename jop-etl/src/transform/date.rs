//! Air date parsing with a fixed fallback

use chrono::NaiveDate;
use jop_common::AirDate;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

const MONTH_NAMES: [&str; 12] = [
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december",
];

/// Full month name, day, optional comma, year; abbreviations are not accepted
static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i)([a-z]+)\s+(\d{1,2}),?\s+(\d{4})$").expect("Invalid air date regex")
});

fn parse_strict(text: &str) -> Option<NaiveDate> {
    let caps = DATE_PATTERN.captures(text)?;
    let month_name = caps[1].to_lowercase();
    let month = MONTH_NAMES.iter().position(|m| *m == month_name)? as u32 + 1;
    let day = caps[2].parse().ok()?;
    let year = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Result of parsing an air date string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedAirDate {
    /// The text matched one of the accepted layouts
    Parsed(AirDate),
    /// Nothing matched; carries the 1983-01-01 fallback
    Fallback(AirDate),
}

impl ParsedAirDate {
    pub fn is_fallback(&self) -> bool {
        matches!(self, ParsedAirDate::Fallback(_))
    }

    pub fn into_air_date(self) -> AirDate {
        match self {
            ParsedAirDate::Parsed(date) | ParsedAirDate::Fallback(date) => date,
        }
    }
}

/// Parse "Month D, YYYY" or "Month D YYYY", reporting whether the fallback was used
pub fn parse_air_date_tagged(text: &str) -> ParsedAirDate {
    let text = text.trim();

    parse_strict(text)
        .map(|date| ParsedAirDate::Parsed(AirDate::from_date(date)))
        .unwrap_or_else(|| {
            warn!("Could not parse date: {:?}", text);
            ParsedAirDate::Fallback(AirDate::fallback())
        })
}

/// Parse an air date; unparseable text yields 1983-01-01
pub fn parse_air_date(text: &str) -> AirDate {
    parse_air_date_tagged(text).into_air_date()
}
