//! HTTP API handlers for jop-api

pub mod catalog;
pub mod docs;
pub mod episodes;
pub mod fallback;
pub mod health;
pub mod stats;

pub use catalog::{list_colors, list_subjects};
pub use docs::api_documentation;
pub use episodes::{filter_episodes_get, filter_episodes_post, get_episode, list_episodes};
pub use fallback::not_found;
pub use health::health_routes;
pub use stats::get_stats;

use jop_common::db::Stored;
use jop_common::Episode;
use serde::Serialize;

/// A stored document with its guid exposed as `id`
#[derive(Debug, Serialize)]
pub struct WithId<T> {
    pub id: String,
    #[serde(flatten)]
    pub document: T,
}

impl<T> From<Stored<T>> for WithId<T> {
    fn from(stored: Stored<T>) -> Self {
        Self {
            id: stored.id,
            document: stored.document,
        }
    }
}

/// Episode as returned to clients: stored fields plus `id` and `color_names`
#[derive(Debug, Serialize)]
pub struct FormattedEpisode {
    pub id: String,
    #[serde(flatten)]
    pub episode: Episode,
    pub color_names: Vec<String>,
}

impl From<Stored<Episode>> for FormattedEpisode {
    fn from(stored: Stored<Episode>) -> Self {
        Self {
            color_names: stored.document.color_names(),
            id: stored.id,
            episode: stored.document,
        }
    }
}

pub fn format_episodes(episodes: Vec<Stored<Episode>>) -> Vec<FormattedEpisode> {
    episodes.into_iter().map(FormattedEpisode::from).collect()
}
