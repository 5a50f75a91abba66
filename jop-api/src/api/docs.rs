//! GET / - self-describing API documentation

use axum::Json;
use serde_json::{json, Value};

pub async fn api_documentation() -> Json<Value> {
    Json(json!({
        "name": "Joy of Painting API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "API for filtering Bob Ross episodes by month, subjects, and colors",
        "endpoints": {
            "GET /": "API documentation",
            "GET /episodes": "Get all episodes (page, per_page)",
            "GET /episodes/<id>": "Get specific episode by ID or episode number",
            "GET /episodes/filter": "Filter episodes with query parameters",
            "POST /episodes/filter": "Filter episodes with JSON body",
            "GET /colors": "Get all available colors",
            "GET /subjects": "Get all available subjects",
            "GET /health": "Database connectivity check",
            "GET /stats": "Collection totals and most used colors and subjects",
        },
        "filter_parameters": {
            "month": "Filter by month name (e.g., january, february)",
            "subjects": "Filter by subjects (comma-separated)",
            "colors": "Filter by colors (comma-separated)",
            "match": "Match type: \"any\" (default) or \"all\"",
        },
        "examples": {
            "filter_by_month": "/episodes/filter?month=january",
            "filter_by_subjects_any": "/episodes/filter?subjects=mountain,tree&match=any",
            "filter_by_colors_all": "/episodes/filter?colors=Prussian Blue,Titanium White&match=all",
            "combined_filters": "/episodes/filter?month=january&subjects=mountain&colors=blue&match=all",
        },
    }))
}
