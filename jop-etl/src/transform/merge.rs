//! Join the three extracted sources into one record per episode
//!
//! The date source drives: its order is the output order and every one of
//! its entries produces exactly one episode. Color and subject rows are
//! left-joined on `episode_num`; a missing row contributes empty fields.

use std::collections::{HashMap, HashSet};

use jop_common::{Episode, EpisodeColor};
use tracing::{info, warn};

use super::date::parse_air_date;
use super::normalize::{clean_title, normalize_color_name, normalize_subject_name};
use crate::error::{EtlError, EtlResult};
use crate::records::{RawColorEntry, RawEpisodeDate, RawSubjectEntry};

/// Build a lookup keyed by episode_num; a repeated key replaces the earlier entry
fn index_by_episode<'a, T>(
    source: &'static str,
    entries: &'a [T],
    key: impl Fn(&T) -> i64,
) -> HashMap<i64, &'a T> {
    let mut lookup = HashMap::with_capacity(entries.len());
    for entry in entries {
        let episode_num = key(entry);
        if lookup.insert(episode_num, entry).is_some() {
            warn!(
                source = source,
                episode_num = episode_num,
                "Duplicate episode number, later row replaces earlier one"
            );
        }
    }
    lookup
}

/// Normalize names and drop repeats (case-insensitive), keeping first hex and order
fn merge_colors(entry: Option<&RawColorEntry>) -> Vec<EpisodeColor> {
    let Some(entry) = entry else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    entry
        .colors
        .iter()
        .filter_map(|color| {
            let name = normalize_color_name(&color.name);
            if name.is_empty() || !seen.insert(name.to_lowercase()) {
                return None;
            }
            Some(EpisodeColor {
                name,
                hex: color.hex.clone(),
            })
        })
        .collect()
}

/// Normalize names; repeats are kept
fn merge_subjects(entry: Option<&RawSubjectEntry>) -> Vec<String> {
    entry
        .map(|e| {
            e.subjects
                .iter()
                .map(|s| normalize_subject_name(s))
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

fn merge_episode(
    date: &RawEpisodeDate,
    color: Option<&RawColorEntry>,
    subject: Option<&RawSubjectEntry>,
) -> Episode {
    let title = match color {
        Some(c) if !c.title.trim().is_empty() => clean_title(&c.title),
        _ => clean_title(&date.title),
    };

    let colors = merge_colors(color);
    let subjects = merge_subjects(subject);

    Episode {
        episode_num: date.episode_num,
        painting_index: color.map(|c| c.painting_index).unwrap_or(date.episode_num),
        title,
        season: date.season,
        episode: date.episode,
        air_date: parse_air_date(&date.air_date_str),
        num_colors: colors.len(),
        num_subjects: subjects.len(),
        colors,
        subjects,
        youtube_url: color.map(|c| c.youtube_src.clone()).unwrap_or_default(),
        img_src: color.map(|c| c.img_src.clone()).unwrap_or_default(),
    }
}

/// Merge the extracted sources into canonical episodes
///
/// Fails only when `dates` is empty, since there is then nothing to
/// number episodes by.
pub fn merge(
    dates: &[RawEpisodeDate],
    colors: &[RawColorEntry],
    subjects: &[RawSubjectEntry],
) -> EtlResult<Vec<Episode>> {
    if dates.is_empty() {
        return Err(EtlError::NoEpisodes);
    }

    let colors_by_episode = index_by_episode("colors", colors, |c| c.episode_num);
    let subjects_by_episode = index_by_episode("subjects", subjects, |s| s.episode_num);

    let episodes: Vec<Episode> = dates
        .iter()
        .map(|date| {
            merge_episode(
                date,
                colors_by_episode.get(&date.episode_num).copied(),
                subjects_by_episode.get(&date.episode_num).copied(),
            )
        })
        .collect();

    info!("Merged {} episodes", episodes.len());
    Ok(episodes)
}
