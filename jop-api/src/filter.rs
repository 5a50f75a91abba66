//! Episode filter engine
//!
//! Three optional criteria are supported: air month, subject substrings
//! and color substrings. The match mode combines both the substrings
//! within one criterion and the criteria with each other.

use std::fmt;
use std::str::FromStr;

use jop_common::db::Stored;
use jop_common::Episode;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// How multiple substrings and multiple criteria combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Every given criterion (and substring) must match
    All,
    /// At least one given criterion (and substring) must match
    #[default]
    Any,
}

impl MatchMode {
    fn combine(self, mut results: impl Iterator<Item = bool>) -> bool {
        match self {
            MatchMode::All => results.all(|b| b),
            MatchMode::Any => results.any(|b| b),
        }
    }
}

impl FromStr for MatchMode {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(MatchMode::All),
            "any" => Ok(MatchMode::Any),
            _ => Err(ApiError::BadRequest(
                "match parameter must be \"any\" or \"all\"".to_string(),
            )),
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::All => write!(f, "all"),
            MatchMode::Any => write!(f, "any"),
        }
    }
}

/// Parsed filter criteria; `None` means the criterion was not given
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterCriteria {
    /// Lowercase full month name
    pub month: Option<String>,
    pub subjects: Option<Vec<String>>,
    pub colors: Option<Vec<String>>,
}

/// True if any of `values` contains `needle`, case-insensitively
fn contains_substring<'a>(values: impl Iterator<Item = &'a str>, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    values.map(str::to_lowercase).any(|v| v.contains(&needle))
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.month.is_none() && self.subjects.is_none() && self.colors.is_none()
    }

    /// Whether one episode passes under `mode`
    pub fn matches(&self, episode: &Episode, mode: MatchMode) -> bool {
        let mut results = Vec::with_capacity(3);

        if let Some(month) = &self.month {
            results.push(episode.air_date.month_name.eq_ignore_ascii_case(month));
        }

        if let Some(subjects) = &self.subjects {
            results.push(mode.combine(subjects.iter().map(|needle| {
                contains_substring(episode.subjects.iter().map(String::as_str), needle)
            })));
        }

        if let Some(colors) = &self.colors {
            results.push(mode.combine(colors.iter().map(|needle| {
                contains_substring(episode.colors.iter().map(|c| c.name.as_str()), needle)
            })));
        }

        results.is_empty() || mode.combine(results.into_iter())
    }
}

/// Keep the episodes matching `criteria`, preserving order
///
/// No criteria keeps everything, whatever the mode.
pub fn filter_episodes(
    episodes: Vec<Stored<Episode>>,
    criteria: &FilterCriteria,
    mode: MatchMode,
) -> Vec<Stored<Episode>> {
    if criteria.is_empty() {
        return episodes;
    }

    episodes
        .into_iter()
        .filter(|stored| criteria.matches(&stored.document, mode))
        .collect()
}

// ============================================================================
// Request parameters
// ============================================================================

/// A comma-separated string or a list of strings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    One(String),
    Many(Vec<String>),
}

impl StringOrList {
    /// Split, trim and drop blanks; `None` if nothing remains
    fn into_items(self) -> Option<Vec<String>> {
        let items: Vec<String> = match self {
            StringOrList::One(s) => s.split(',').map(|s| s.trim().to_string()).collect(),
            StringOrList::Many(list) => list.into_iter().map(|s| s.trim().to_string()).collect(),
        };
        let items: Vec<String> = items.into_iter().filter(|s| !s.is_empty()).collect();
        (!items.is_empty()).then_some(items)
    }
}

/// Filter parameters from a JSON body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterParams {
    pub month: Option<String>,
    pub subjects: Option<StringOrList>,
    pub colors: Option<StringOrList>,
    #[serde(rename = "match")]
    pub match_type: Option<String>,
}

/// Filter parameters from a query string
///
/// Repeated `subjects`/`colors` keys accumulate; for `month` and `match` the
/// first occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterQuery {
    pub month: Option<String>,
    pub subjects: Vec<String>,
    pub colors: Vec<String>,
    pub match_type: Option<String>,
}

impl FilterQuery {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "month" => {
                    query.month.get_or_insert(value);
                }
                "match" => {
                    query.match_type.get_or_insert(value);
                }
                "subjects" => query.subjects.push(value),
                "colors" => query.colors.push(value),
                _ => {}
            }
        }
        query
    }
}

/// Each query value may itself be comma-separated
fn join_values(values: Vec<String>) -> Option<StringOrList> {
    (!values.is_empty()).then(|| StringOrList::One(values.join(",")))
}

impl From<FilterQuery> for FilterParams {
    fn from(query: FilterQuery) -> Self {
        Self {
            month: query.month,
            subjects: join_values(query.subjects),
            colors: join_values(query.colors),
            match_type: query.match_type,
        }
    }
}

impl FilterParams {
    /// Validate the match mode and normalize the criteria
    ///
    /// An unknown match mode is rejected before anything else is looked at.
    pub fn parse(self) -> Result<(FilterCriteria, MatchMode), ApiError> {
        let mode = match self.match_type.as_deref() {
            Some(m) => m.parse()?,
            None => MatchMode::default(),
        };

        let month = self
            .month
            .map(|m| m.trim().to_lowercase())
            .filter(|m| !m.is_empty());

        let criteria = FilterCriteria {
            month,
            subjects: self.subjects.and_then(StringOrList::into_items),
            colors: self.colors.and_then(StringOrList::into_items),
        };

        Ok((criteria, mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jop_common::{AirDate, EpisodeColor};

    fn episode(episode_num: i64, month: u32, subjects: &[&str], colors: &[&str]) -> Stored<Episode> {
        let date = air_date_in(month);
        Stored {
            id: format!("guid-{}", episode_num),
            document: Episode {
                episode_num,
                painting_index: episode_num,
                title: format!("Painting {}", episode_num),
                season: 1,
                episode: episode_num,
                air_date: date,
                colors: colors
                    .iter()
                    .map(|name| EpisodeColor {
                        name: name.to_string(),
                        hex: None,
                    })
                    .collect(),
                subjects: subjects.iter().map(|s| s.to_string()).collect(),
                youtube_url: String::new(),
                img_src: String::new(),
                num_colors: colors.len(),
                num_subjects: subjects.len(),
            },
        }
    }

    fn air_date_in(month: u32) -> AirDate {
        let mut date = AirDate::fallback();
        if month != 1 {
            let names = ["", "january", "february", "march", "april"];
            date.month = month;
            date.month_name = names[month as usize].to_string();
        }
        date
    }

    fn numbers(episodes: &[Stored<Episode>]) -> Vec<i64> {
        episodes.iter().map(|e| e.document.episode_num).collect()
    }

    fn subjects(items: &[&str]) -> Option<Vec<String>> {
        Some(items.iter().map(|s| s.to_string()).collect())
    }

    fn sample() -> Vec<Stored<Episode>> {
        vec![
            episode(1, 1, &["Mountain", "Tree"], &["Titanium White", "Prussian Blue"]),
            episode(2, 2, &["Ocean"], &["Phthalo Blue"]),
            episode(3, 1, &["Snowy Mountain", "Cabin"], &["Titanium White"]),
        ]
    }

    #[test]
    fn test_subject_substrings_all_and_any() {
        let episodes = vec![
            episode(1, 1, &["Mountain", "Tree"], &[]),
            episode(2, 1, &["Ocean"], &[]),
        ];
        let criteria = FilterCriteria {
            subjects: subjects(&["mount", "tree"]),
            ..Default::default()
        };

        let all = filter_episodes(episodes.clone(), &criteria, MatchMode::All);
        assert_eq!(numbers(&all), vec![1]);

        let any = filter_episodes(episodes, &criteria, MatchMode::Any);
        assert_eq!(numbers(&any), vec![1]);
    }

    #[test]
    fn test_any_mode_needs_only_one_substring() {
        let criteria = FilterCriteria {
            subjects: subjects(&["cabin", "ocean"]),
            ..Default::default()
        };
        assert_eq!(numbers(&filter_episodes(sample(), &criteria, MatchMode::Any)), vec![2, 3]);
        assert!(filter_episodes(sample(), &criteria, MatchMode::All).is_empty());
    }

    #[test]
    fn test_month_is_case_insensitive() {
        let criteria = FilterCriteria {
            month: Some("JANUARY".into()),
            ..Default::default()
        };
        assert_eq!(numbers(&filter_episodes(sample(), &criteria, MatchMode::Any)), vec![1, 3]);
    }

    #[test]
    fn test_criteria_combine_by_mode() {
        let criteria = FilterCriteria {
            month: Some("january".into()),
            subjects: None,
            colors: subjects(&["phthalo"]),
        };

        // january OR phthalo
        assert_eq!(numbers(&filter_episodes(sample(), &criteria, MatchMode::Any)), vec![1, 2, 3]);
        // january AND phthalo
        assert!(filter_episodes(sample(), &criteria, MatchMode::All).is_empty());
    }

    #[test]
    fn test_no_criteria_keeps_everything() {
        let criteria = FilterCriteria::default();
        for mode in [MatchMode::All, MatchMode::Any] {
            assert_eq!(numbers(&filter_episodes(sample(), &criteria, mode)), vec![1, 2, 3]);
        }
    }

    #[test]
    fn test_filter_is_idempotent() {
        let criteria = FilterCriteria {
            month: Some("january".into()),
            subjects: subjects(&["mountain"]),
            colors: subjects(&["white"]),
        };
        for mode in [MatchMode::All, MatchMode::Any] {
            let once = filter_episodes(sample(), &criteria, mode);
            let twice = filter_episodes(once.clone(), &criteria, mode);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_params_from_query_string() {
        let query = FilterQuery {
            month: Some("  January ".into()),
            subjects: vec!["mountain, tree,,".into()],
            colors: vec![],
            match_type: Some("ALL".into()),
        };

        let (criteria, mode) = FilterParams::from(query).parse().unwrap();
        assert_eq!(mode, MatchMode::All);
        assert_eq!(criteria.month.as_deref(), Some("january"));
        assert_eq!(criteria.subjects, subjects(&["mountain", "tree"]));
        assert_eq!(criteria.colors, None);
    }

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_repeated_query_keys() {
        let query = FilterQuery::from_pairs(pairs(&[
            ("subjects", "tree"),
            ("month", "March"),
            ("subjects", "cabin,lake"),
            ("match", "all"),
            ("month", "May"),
            ("match", "bogus"),
            ("page", "2"),
        ]));
        assert_eq!(query.month.as_deref(), Some("March"));
        assert_eq!(query.match_type.as_deref(), Some("all"));

        let (criteria, mode) = FilterParams::from(query).parse().unwrap();
        assert_eq!(mode, MatchMode::All);
        assert_eq!(criteria.subjects, subjects(&["tree", "cabin", "lake"]));
        assert_eq!(criteria.colors, None);
    }

    #[test]
    fn test_params_from_json_list() {
        let params: FilterParams = serde_json::from_str(
            r#"{"colors": ["Titanium White", " ", "Prussian Blue"], "subjects": "cabin"}"#,
        )
        .unwrap();

        let (criteria, mode) = params.parse().unwrap();
        assert_eq!(mode, MatchMode::Any);
        assert_eq!(criteria.colors, subjects(&["Titanium White", "Prussian Blue"]));
        assert_eq!(criteria.subjects, subjects(&["cabin"]));
    }

    #[test]
    fn test_blank_values_are_not_criteria() {
        let params = FilterParams {
            month: Some("   ".into()),
            subjects: Some(StringOrList::One(" , ".into())),
            colors: Some(StringOrList::Many(vec![])),
            match_type: None,
        };
        let (criteria, _) = params.parse().unwrap();
        assert!(criteria.is_empty());
    }

    #[test]
    fn test_invalid_match_mode_rejected() {
        let params = FilterParams {
            match_type: Some("most".into()),
            ..Default::default()
        };
        assert!(matches!(params.parse(), Err(ApiError::BadRequest(_))));
    }
}
