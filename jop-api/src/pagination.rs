//! Pagination for episode listing

use crate::error::ApiError;

/// Page size when none is requested
pub const DEFAULT_PER_PAGE: i64 = 50;

/// Largest accepted page size
pub const MAX_PER_PAGE: i64 = 500;

/// Raw `page`/`per_page` query values
///
/// Kept as strings so a non-numeric value becomes a structured 400 instead
/// of a plain-text extractor rejection. A repeated key keeps its first value.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PageQuery {
    pub page: Option<String>,
    pub per_page: Option<String>,
}

/// Sanitized page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Current page number (1-indexed)
    pub page: i64,
    pub per_page: i64,
    /// Offset for LIMIT/OFFSET
    pub offset: i64,
}

/// Clamp a requested page and page size into valid bounds
///
/// ```
/// use jop_api::pagination::calculate_pagination;
///
/// let p = calculate_pagination(3, 50);
/// assert_eq!(p.offset, 100);
///
/// let p = calculate_pagination(0, 10_000);
/// assert_eq!(p.page, 1);
/// assert_eq!(p.per_page, 500);
/// ```
pub fn calculate_pagination(requested_page: i64, requested_per_page: i64) -> Pagination {
    let page = requested_page.max(1);
    let per_page = requested_per_page.clamp(1, MAX_PER_PAGE);

    Pagination {
        page,
        per_page,
        offset: (page - 1).saturating_mul(per_page),
    }
}

fn parse_param(name: &str, value: Option<&str>, default: i64) -> Result<i64, ApiError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(default),
        Some(v) => v
            .parse::<i64>()
            .map_err(|_| ApiError::BadRequest(format!("{} must be an integer", name))),
    }
}

impl PageQuery {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "page" => {
                    query.page.get_or_insert(value);
                }
                "per_page" => {
                    query.per_page.get_or_insert(value);
                }
                _ => {}
            }
        }
        query
    }

    pub fn pagination(&self) -> Result<Pagination, ApiError> {
        Ok(calculate_pagination(
            parse_param("page", self.page.as_deref(), 1)?,
            parse_param("per_page", self.per_page.as_deref(), DEFAULT_PER_PAGE)?,
        ))
    }
}
