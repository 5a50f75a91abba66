//! Typed records produced by the extract stage
//!
//! One type per raw source. Constructors derive the season/episode and
//! episode_num fields so every record honors the same numbering rules.

/// Episodes per season in every source
pub const EPISODES_PER_SEASON: i64 = 13;

/// Season and episode (both 1-based) for a 1-based episode number
pub fn season_and_episode(episode_num: i64) -> (i64, i64) {
    let zero_based = episode_num - 1;
    (
        zero_based.div_euclid(EPISODES_PER_SEASON) + 1,
        zero_based.rem_euclid(EPISODES_PER_SEASON) + 1,
    )
}

/// Episode number for a season/episode pair
pub fn episode_number(season: i64, episode: i64) -> i64 {
    (season - 1) * EPISODES_PER_SEASON + episode
}

/// One usable line of the title/date source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEpisodeDate {
    /// 1-based line position in the source file
    pub episode_num: i64,
    pub title: String,
    pub air_date_str: String,
    pub season: i64,
    pub episode: i64,
}

impl RawEpisodeDate {
    pub fn new(episode_num: i64, title: impl Into<String>, air_date_str: impl Into<String>) -> Self {
        let (season, episode) = season_and_episode(episode_num);
        Self {
            episode_num,
            title: title.into(),
            air_date_str: air_date_str.into(),
            season,
            episode,
        }
    }
}

/// A color name with its positional hex value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawColor {
    pub name: String,
    pub hex: Option<String>,
}

/// One row of the color usage table
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawColorEntry {
    pub painting_index: i64,
    /// Same as `painting_index`
    pub episode_num: i64,
    pub title: String,
    pub season: i64,
    pub episode: i64,
    pub img_src: String,
    pub youtube_src: String,
    pub colors: Vec<RawColor>,
    pub num_colors: usize,
}

impl RawColorEntry {
    /// Pair names with hex values by position
    pub fn pair_colors(names: Vec<String>, hex_values: Vec<String>) -> Vec<RawColor> {
        let mut hex_values = hex_values.into_iter();
        names
            .into_iter()
            .map(|name| RawColor {
                name: name.trim().to_string(),
                hex: hex_values.next(),
            })
            .collect()
    }
}

/// One row of the subject flag table
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawSubjectEntry {
    pub episode_num: i64,
    /// "S01E01"
    pub episode_code: String,
    pub title: String,
    pub season: i64,
    pub episode: i64,
    pub subjects: Vec<String>,
}

/// Output of the extract stage
#[derive(Debug, Clone, Default)]
pub struct ExtractedData {
    pub episode_dates: Vec<RawEpisodeDate>,
    pub colors: Vec<RawColorEntry>,
    pub subjects: Vec<RawSubjectEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_boundaries() {
        assert_eq!(season_and_episode(1), (1, 1));
        assert_eq!(season_and_episode(13), (1, 13));
        assert_eq!(season_and_episode(14), (2, 1));
        assert_eq!(season_and_episode(403), (31, 13));
    }

    #[test]
    fn test_episode_number_inverts_season_and_episode() {
        for n in 1..=60 {
            let (season, episode) = season_and_episode(n);
            assert_eq!(episode_number(season, episode), n);
        }
    }

    #[test]
    fn test_raw_episode_date_derives_season() {
        let raw = RawEpisodeDate::new(27, "Mountain Reflections", "June 26, 1984");
        assert_eq!(raw.season, 3);
        assert_eq!(raw.episode, 1);
    }

    #[test]
    fn test_pair_colors_leaves_missing_hex_absent() {
        let colors = RawColorEntry::pair_colors(
            vec!["Bright Red".into(), " Van Dyke Brown ".into()],
            vec!["#DB0000".into()],
        );
        assert_eq!(colors[0].hex.as_deref(), Some("#DB0000"));
        assert_eq!(colors[1].name, "Van Dyke Brown");
        assert_eq!(colors[1].hex, None);
    }
}
