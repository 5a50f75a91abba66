//! Transform stage: normalize, merge and aggregate extracted records

pub mod aggregates;
pub mod date;
pub mod merge;
pub mod normalize;

pub use aggregates::{extract_unique_colors, extract_unique_subjects};
pub use date::{parse_air_date, parse_air_date_tagged, ParsedAirDate};
pub use merge::merge;
pub use normalize::{clean_title, normalize_color_name, normalize_subject_name, title_case};

use jop_common::{Color, Episode, Subject};
use tracing::info;

use crate::error::EtlResult;
use crate::records::ExtractedData;

/// Everything the load stage writes
#[derive(Debug, Clone, Default)]
pub struct TransformedData {
    pub episodes: Vec<Episode>,
    pub colors: Vec<Color>,
    pub subjects: Vec<Subject>,
}

pub fn transform_all(raw: &ExtractedData) -> EtlResult<TransformedData> {
    info!("Starting data transformation...");

    let episodes = merge(&raw.episode_dates, &raw.colors, &raw.subjects)?;
    let colors = extract_unique_colors(&episodes);
    let subjects = extract_unique_subjects(&episodes);

    Ok(TransformedData {
        episodes,
        colors,
        subjects,
    })
}
