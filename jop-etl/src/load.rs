//! Load stage: replace each collection with freshly transformed documents
//!
//! A collection is cleared and refilled as a unit. Collections are loaded
//! colors, subjects, episodes, so a failure part-way leaves the episode
//! collection holding the previous run.

use jop_common::config::DataFiles;
use jop_common::db::{self, Document};
use jop_common::{Color, Episode, Subject};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::error::{EtlError, EtlResult};
use crate::extract::extract_all;
use crate::transform::{transform_all, TransformedData};

/// Document count per collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CollectionCounts {
    pub episodes: i64,
    pub colors: i64,
    pub subjects: i64,
}

impl CollectionCounts {
    pub fn is_empty(&self) -> bool {
        self.episodes == 0
    }
}

async fn replace_collection<T: Document>(pool: &SqlitePool, documents: &[T]) -> EtlResult<usize> {
    let wrap = |source: jop_common::Error| EtlError::Load {
        collection: T::COLLECTION,
        source,
    };

    db::delete_all::<T>(pool).await.map_err(wrap)?;
    if documents.is_empty() {
        return Ok(0);
    }
    let guids = db::insert_many(pool, documents).await.map_err(wrap)?;

    info!("Loaded {} {}", guids.len(), T::COLLECTION);
    Ok(guids.len())
}

pub async fn load_colors(pool: &SqlitePool, colors: &[Color]) -> EtlResult<usize> {
    replace_collection(pool, colors).await
}

pub async fn load_subjects(pool: &SqlitePool, subjects: &[Subject]) -> EtlResult<usize> {
    replace_collection(pool, subjects).await
}

pub async fn load_episodes(pool: &SqlitePool, episodes: &[Episode]) -> EtlResult<usize> {
    replace_collection(pool, episodes).await
}

/// Write all three collections in dependency order
pub async fn load_all(pool: &SqlitePool, data: &TransformedData) -> EtlResult<CollectionCounts> {
    info!("Starting data load...");

    let colors = load_colors(pool, &data.colors).await?;
    let subjects = load_subjects(pool, &data.subjects).await?;
    let episodes = load_episodes(pool, &data.episodes).await?;

    Ok(CollectionCounts {
        episodes: episodes as i64,
        colors: colors as i64,
        subjects: subjects as i64,
    })
}

/// Count what is actually stored
pub async fn verify_data_integrity(pool: &SqlitePool) -> EtlResult<CollectionCounts> {
    let counts = CollectionCounts {
        episodes: db::count::<Episode>(pool).await?,
        colors: db::count::<Color>(pool).await?,
        subjects: db::count::<Subject>(pool).await?,
    };

    info!(
        episodes = counts.episodes,
        colors = counts.colors,
        subjects = counts.subjects,
        "Data integrity check"
    );
    Ok(counts)
}

/// Fail with the names of any input files that do not exist
pub fn check_inputs(files: &DataFiles) -> EtlResult<()> {
    let missing = files.missing();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(EtlError::MissingInputs(missing))
    }
}

/// Extract and transform without touching the store
pub fn prepare(files: &DataFiles) -> EtlResult<TransformedData> {
    check_inputs(files)?;
    let raw = extract_all(files);
    transform_all(&raw)
}

/// Full pipeline: validate inputs, extract, transform, replace collections
///
/// Returns the counts read back from the store after loading.
pub async fn run_full_etl(pool: &SqlitePool, files: &DataFiles) -> EtlResult<CollectionCounts> {
    info!("Starting full ETL process...");

    let data = prepare(files)?;
    let loaded = load_all(pool, &data).await?;
    let stored = verify_data_integrity(pool).await?;

    if stored != loaded {
        warn!(?loaded, ?stored, "Stored counts differ from loaded counts");
    }

    info!("ETL process completed successfully!");
    Ok(stored)
}
