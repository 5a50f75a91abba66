//! Error types for jop-etl
//!
//! Only run-invalidating conditions surface here. A malformed row is
//! logged and skipped by the extractor instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EtlError {
    /// One or more raw input files do not exist
    #[error("Missing required data files: {}", .0.join(", "))]
    MissingInputs(Vec<String>),

    /// The title/date source produced no usable lines
    #[error("No episode data extracted; nothing to anchor episode numbering to")]
    NoEpisodes,

    /// Replacing a collection failed
    #[error("Failed to load {collection}: {source}")]
    Load {
        collection: &'static str,
        #[source]
        source: jop_common::Error,
    },

    /// jop-common error
    #[error(transparent)]
    Common(#[from] jop_common::Error),
}

/// Result type for ETL stages
pub type EtlResult<T> = Result<T, EtlError>;
