//! Canonical records stored in the three collections
//!
//! `Episode` is the merged per-broadcast record; `Color` and `Subject` are
//! aggregate tables derived from all episodes on every load.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Year, month and day used when an air date cannot be parsed
pub const FALLBACK_AIR_DATE: (i32, u32, u32) = (1983, 1, 1);

/// Structured air date of an episode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirDate {
    pub date: NaiveDate,
    pub year: i32,
    /// Month number, 1-12
    pub month: u32,
    pub day: u32,
    /// Lowercase full English month name ("january")
    pub month_name: String,
    /// "YYYY-MM-DD"
    pub formatted: String,
}

impl AirDate {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            date,
            year: date.year(),
            month: date.month(),
            day: date.day(),
            month_name: date.format("%B").to_string().to_lowercase(),
            formatted: date.format("%Y-%m-%d").to_string(),
        }
    }

    /// The 1983-01-01 air date substituted for unparseable input
    pub fn fallback() -> Self {
        let (year, month, day) = FALLBACK_AIR_DATE;
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .expect("fallback air date is a valid calendar date");
        Self::from_date(date)
    }
}

/// One color used in an episode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeColor {
    pub name: String,
    pub hex: Option<String>,
}

/// Merged episode record, keyed by `episode_num`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub episode_num: i64,
    pub painting_index: i64,
    pub title: String,
    pub season: i64,
    pub episode: i64,
    pub air_date: AirDate,
    pub colors: Vec<EpisodeColor>,
    pub subjects: Vec<String>,
    pub youtube_url: String,
    pub img_src: String,
    pub num_colors: usize,
    pub num_subjects: usize,
}

impl Episode {
    pub fn color_names(&self) -> Vec<String> {
        self.colors.iter().map(|c| c.name.clone()).collect()
    }
}

/// Aggregate row: one unique color across all episodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub name: String,
    /// Hex of the first occurrence
    pub hex: Option<String>,
    pub episode_count: usize,
    pub episodes: Vec<i64>,
}

/// Aggregate row: one unique subject across all episodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub name: String,
    pub episode_count: usize,
    pub episodes: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_air_date_from_date() {
        let date = NaiveDate::from_ymd_opt(1983, 1, 11).unwrap();
        let air_date = AirDate::from_date(date);
        assert_eq!(air_date.year, 1983);
        assert_eq!(air_date.month, 1);
        assert_eq!(air_date.day, 11);
        assert_eq!(air_date.month_name, "january");
        assert_eq!(air_date.formatted, "1983-01-11");
    }

    #[test]
    fn test_fallback_air_date() {
        let air_date = AirDate::fallback();
        assert_eq!(air_date.formatted, "1983-01-01");
        assert_eq!(air_date.month_name, "january");
    }

    #[test]
    fn test_air_date_serializes_date_as_iso_string() {
        let air_date = AirDate::from_date(NaiveDate::from_ymd_opt(1994, 9, 7).unwrap());
        let value = serde_json::to_value(&air_date).unwrap();
        assert_eq!(value["date"], "1994-09-07");
        assert_eq!(value["month_name"], "september");
    }
}
