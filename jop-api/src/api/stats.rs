//! GET /stats - collection totals and most used colors/subjects

use axum::{extract::State, Json};
use jop_common::db;
use jop_common::{Color, Episode, Subject};
use serde::Serialize;

use crate::error::ApiResult;
use crate::AppState;

/// Entries in each top list
pub const TOP_N: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_episodes: i64,
    pub total_colors: i64,
    pub total_subjects: i64,
    pub top_colors: Vec<UsageCount>,
    pub top_subjects: Vec<UsageCount>,
}

/// Highest counts first; equal counts keep their input order
pub fn top_usage(mut usage: Vec<UsageCount>, n: usize) -> Vec<UsageCount> {
    usage.sort_by(|a, b| b.count.cmp(&a.count));
    usage.truncate(n);
    usage
}

pub async fn get_stats(State(state): State<AppState>) -> ApiResult<Json<StatsResponse>> {
    let pool = &state.db;

    let colors = db::find_all::<Color>(pool, None, None)
        .await?
        .into_iter()
        .map(|s| UsageCount {
            name: s.document.name,
            count: s.document.episode_count,
        })
        .collect::<Vec<_>>();
    let subjects = db::find_all::<Subject>(pool, None, None)
        .await?
        .into_iter()
        .map(|s| UsageCount {
            name: s.document.name,
            count: s.document.episode_count,
        })
        .collect::<Vec<_>>();

    Ok(Json(StatsResponse {
        total_episodes: db::count::<Episode>(pool).await?,
        total_colors: colors.len() as i64,
        total_subjects: subjects.len() as i64,
        top_colors: top_usage(colors, TOP_N),
        top_subjects: top_usage(subjects, TOP_N),
    }))
}
