//! # Joy of Painting Common Library
//!
//! Shared code for the ETL loader and the HTTP API:
//! - Episode, color and subject records
//! - Document store over SQLite (three collections)
//! - Configuration loading
//! - Common error type

pub mod config;
pub mod db;
pub mod error;
pub mod models;

pub use error::{Error, Result};
pub use models::{AirDate, Color, Episode, EpisodeColor, Subject};
