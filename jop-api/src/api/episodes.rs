//! Episode endpoints: list, fetch one, filter

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use jop_common::db::{self, Stored};
use jop_common::Episode;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{error, info};

use super::{format_episodes, FormattedEpisode};
use crate::error::{ApiError, ApiResult};
use crate::filter::{self, FilterCriteria, FilterParams, FilterQuery, MatchMode};
use crate::pagination::PageQuery;
use crate::AppState;

/// GET /episodes response
#[derive(Debug, Serialize)]
pub struct EpisodePage {
    pub episodes: Vec<FormattedEpisode>,
    /// Episodes in this page
    pub total: usize,
    pub page: i64,
    pub per_page: i64,
}

/// Raw query string pairs, in order, repeated keys included
type QueryPairs = Result<Query<Vec<(String, String)>>, QueryRejection>;

/// GET /episodes?page=&per_page=
pub async fn list_episodes(
    State(state): State<AppState>,
    query: QueryPairs,
) -> ApiResult<Json<EpisodePage>> {
    let Query(pairs) = query?;
    let pagination = PageQuery::from_pairs(pairs).pagination()?;

    let episodes = db::find_all::<Episode>(
        &state.db,
        Some(pagination.per_page),
        Some(pagination.offset),
    )
    .await?;

    let episodes = format_episodes(episodes);
    Ok(Json(EpisodePage {
        total: episodes.len(),
        episodes,
        page: pagination.page,
        per_page: pagination.per_page,
    }))
}

/// GET /episodes/:id
///
/// `id` is a store guid, or an episode number / painting index.
pub async fn get_episode(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<FormattedEpisode>> {
    db::find_episode(&state.db, &id)
        .await?
        .map(|stored| Json(FormattedEpisode::from(stored)))
        .ok_or_else(|| ApiError::NotFound("Episode not found".to_string()))
}

/// Criteria echoed back in filter responses
#[derive(Debug, Serialize)]
pub struct FiltersApplied {
    pub month: Option<String>,
    pub subjects: Option<Vec<String>>,
    pub colors: Option<Vec<String>>,
    pub match_type: MatchMode,
}

/// GET|POST /episodes/filter response
#[derive(Debug, Serialize)]
pub struct FilterResponse {
    pub episodes: Vec<FormattedEpisode>,
    pub total: usize,
    pub filters_applied: FiltersApplied,
}

/// Load every episode and apply the filter
///
/// A store failure is logged and reported as no matches.
async fn run_filter(
    pool: &SqlitePool,
    criteria: &FilterCriteria,
    mode: MatchMode,
) -> Vec<Stored<Episode>> {
    let episodes = match db::find_all::<Episode>(pool, None, None).await {
        Ok(episodes) => episodes,
        Err(e) => {
            error!("Error filtering episodes: {}", e);
            return Vec::new();
        }
    };

    let total = episodes.len();
    let matched = filter::filter_episodes(episodes, criteria, mode);
    info!("Filtered {} episodes from {} total", matched.len(), total);
    matched
}

async fn respond(pool: &SqlitePool, params: FilterParams) -> ApiResult<Json<FilterResponse>> {
    let (criteria, mode) = params.parse()?;
    let episodes = format_episodes(run_filter(pool, &criteria, mode).await);

    Ok(Json(FilterResponse {
        total: episodes.len(),
        episodes,
        filters_applied: FiltersApplied {
            month: criteria.month,
            subjects: criteria.subjects,
            colors: criteria.colors,
            match_type: mode,
        },
    }))
}

/// GET /episodes/filter?month=&subjects=&colors=&match=
pub async fn filter_episodes_get(
    State(state): State<AppState>,
    query: QueryPairs,
) -> ApiResult<Json<FilterResponse>> {
    let Query(pairs) = query?;
    respond(&state.db, FilterQuery::from_pairs(pairs).into()).await
}

/// POST /episodes/filter with a JSON body; an empty body means no criteria
pub async fn filter_episodes_post(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<FilterResponse>> {
    let params = if body.iter().all(u8::is_ascii_whitespace) {
        FilterParams::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {}", e)))?
    };

    respond(&state.db, params).await
}
