//! Unique color and subject tables with usage counts
//!
//! Both tables are sorted by `episode_count` descending. The sort is stable,
//! so equal counts stay in first-encounter order.

use std::collections::HashMap;

use jop_common::{Color, Episode, Subject};
use tracing::info;

/// Name → accumulated entry, remembering first-encounter order
struct Tally<T> {
    index: HashMap<String, usize>,
    entries: Vec<T>,
}

impl<T> Tally<T> {
    fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    fn entry(&mut self, name: &str, create: impl FnOnce() -> T) -> &mut T {
        let existing = self.index.get(name).copied();
        let position = match existing {
            Some(position) => position,
            None => {
                self.entries.push(create());
                self.index.insert(name.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[position]
    }
}

pub fn extract_unique_colors(episodes: &[Episode]) -> Vec<Color> {
    let mut tally = Tally::new();

    for episode in episodes {
        for color in &episode.colors {
            let entry = tally.entry(&color.name, || Color {
                name: color.name.clone(),
                hex: color.hex.clone(),
                episode_count: 0,
                episodes: Vec::new(),
            });
            entry.episodes.push(episode.episode_num);
            entry.episode_count = entry.episodes.len();
        }
    }

    let mut colors = tally.entries;
    colors.sort_by(|a, b| b.episode_count.cmp(&a.episode_count));

    info!("Found {} unique colors", colors.len());
    colors
}

/// Subject occurrences are counted as-is, so a subject repeated within one
/// episode lists that episode twice.
pub fn extract_unique_subjects(episodes: &[Episode]) -> Vec<Subject> {
    let mut tally = Tally::new();

    for episode in episodes {
        for subject in &episode.subjects {
            let entry = tally.entry(subject, || Subject {
                name: subject.clone(),
                episode_count: 0,
                episodes: Vec::new(),
            });
            entry.episodes.push(episode.episode_num);
            entry.episode_count = entry.episodes.len();
        }
    }

    let mut subjects = tally.entries;
    subjects.sort_by(|a, b| b.episode_count.cmp(&a.episode_count));

    info!("Found {} unique subjects", subjects.len());
    subjects
}
