//! Aggregate tables: GET /colors and GET /subjects

use axum::{extract::State, Json};
use jop_common::db::{self, Document};
use jop_common::{Color, Subject};
use serde::Serialize;
use sqlx::SqlitePool;

use super::WithId;
use crate::error::ApiResult;
use crate::AppState;

/// GET /colors response
#[derive(Debug, Serialize)]
pub struct ColorList {
    pub colors: Vec<WithId<Color>>,
    pub total: usize,
}

/// GET /subjects response
#[derive(Debug, Serialize)]
pub struct SubjectList {
    pub subjects: Vec<WithId<Subject>>,
    pub total: usize,
}

/// Whole collection sorted by name ascending
async fn sorted_by_name<T: Document>(
    pool: &SqlitePool,
    name: impl Fn(&T) -> &str,
) -> ApiResult<Vec<WithId<T>>> {
    let mut items: Vec<WithId<T>> = db::find_all::<T>(pool, None, None)
        .await?
        .into_iter()
        .map(WithId::from)
        .collect();
    items.sort_by(|a, b| name(&a.document).cmp(name(&b.document)));
    Ok(items)
}

pub async fn list_colors(State(state): State<AppState>) -> ApiResult<Json<ColorList>> {
    let colors = sorted_by_name(&state.db, |c: &Color| c.name.as_str()).await?;
    Ok(Json(ColorList {
        total: colors.len(),
        colors,
    }))
}

pub async fn list_subjects(State(state): State<AppState>) -> ApiResult<Json<SubjectList>> {
    let subjects = sorted_by_name(&state.db, |s: &Subject| s.name.as_str()).await?;
    Ok(Json(SubjectList {
        total: subjects.len(),
        subjects,
    }))
}
