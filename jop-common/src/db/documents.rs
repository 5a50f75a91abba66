//! Generic collection operations
//!
//! list-all, find-by-id, insert-many and delete-all over any document type.
//! Each call is atomic on its own; nothing here composes calls into a
//! larger transaction.

use crate::models::{Color, Episode, Subject};
use crate::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

/// A record type stored as JSON in one collection
pub trait Document: Serialize + DeserializeOwned + Send + Sync {
    /// Collection (table) name
    const COLLECTION: &'static str;
}

impl Document for Episode {
    const COLLECTION: &'static str = "episodes";
}

impl Document for Color {
    const COLLECTION: &'static str = "colors";
}

impl Document for Subject {
    const COLLECTION: &'static str = "subjects";
}

/// A document together with its persisted identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stored<T> {
    pub id: String,
    pub document: T,
}

pub(crate) fn decode<T: Document>(guid: String, json: &str) -> Result<Stored<T>> {
    Ok(Stored {
        id: guid,
        document: serde_json::from_str(json)?,
    })
}

/// List documents in insertion order, with optional LIMIT/OFFSET
pub async fn find_all<T: Document>(
    pool: &SqlitePool,
    limit: Option<i64>,
    offset: Option<i64>,
) -> Result<Vec<Stored<T>>> {
    // LIMIT -1 means no limit in SQLite
    let rows: Vec<(String, String)> = sqlx::query_as(&format!(
        "SELECT guid, document FROM {} ORDER BY rowid LIMIT ? OFFSET ?",
        T::COLLECTION
    ))
    .bind(limit.unwrap_or(-1))
    .bind(offset.unwrap_or(0).max(0))
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|(guid, json)| decode(guid, &json))
        .collect()
}

/// Fetch one document by guid
pub async fn find_by_guid<T: Document>(pool: &SqlitePool, guid: &str) -> Result<Option<Stored<T>>> {
    let row: Option<(String, String)> = sqlx::query_as(&format!(
        "SELECT guid, document FROM {} WHERE guid = ?",
        T::COLLECTION
    ))
    .bind(guid)
    .fetch_optional(pool)
    .await?;

    row.map(|(guid, json)| decode(guid, &json)).transpose()
}

/// Insert documents in order within one transaction, returning their new guids
pub async fn insert_many<T: Document>(pool: &SqlitePool, documents: &[T]) -> Result<Vec<String>> {
    let sql = format!(
        "INSERT INTO {} (guid, document) VALUES (?, ?)",
        T::COLLECTION
    );

    let mut tx = pool.begin().await?;
    let mut guids = Vec::with_capacity(documents.len());

    for document in documents {
        let guid = Uuid::new_v4().to_string();
        let json = serde_json::to_string(document)?;

        sqlx::query(&sql)
            .bind(&guid)
            .bind(json)
            .execute(&mut *tx)
            .await?;

        guids.push(guid);
    }

    tx.commit().await?;
    Ok(guids)
}

/// Remove every document in the collection, returning the deleted count
pub async fn delete_all<T: Document>(pool: &SqlitePool) -> Result<u64> {
    let result = sqlx::query(&format!("DELETE FROM {}", T::COLLECTION))
        .execute(pool)
        .await?;

    tracing::info!(
        collection = T::COLLECTION,
        deleted = result.rows_affected(),
        "Cleared collection"
    );
    Ok(result.rows_affected())
}

/// Number of documents in the collection
pub async fn count<T: Document>(pool: &SqlitePool) -> Result<i64> {
    let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", T::COLLECTION))
        .fetch_one(pool)
        .await?;
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_database;

    fn subject(name: &str, episodes: Vec<i64>) -> Subject {
        Subject {
            name: name.to_string(),
            episode_count: episodes.len(),
            episodes,
        }
    }

    #[tokio::test]
    async fn test_insert_then_list_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let pool = init_database(&dir.path().join("store.db")).await.unwrap();

        let subjects = vec![
            subject("Tree", vec![1, 2, 3]),
            subject("Barn", vec![2]),
            subject("Clouds", vec![1, 3]),
        ];
        let guids = insert_many(&pool, &subjects).await.unwrap();
        assert_eq!(guids.len(), 3);

        let stored: Vec<Stored<Subject>> = find_all(&pool, None, None).await.unwrap();
        let names: Vec<&str> = stored.iter().map(|s| s.document.name.as_str()).collect();
        assert_eq!(names, vec!["Tree", "Barn", "Clouds"]);
        assert_eq!(stored[0].id, guids[0]);
    }

    #[tokio::test]
    async fn test_limit_and_offset() {
        let dir = tempfile::tempdir().unwrap();
        let pool = init_database(&dir.path().join("store.db")).await.unwrap();

        let subjects: Vec<Subject> = (1..=5).map(|i| subject(&format!("S{}", i), vec![i])).collect();
        insert_many(&pool, &subjects).await.unwrap();

        let page: Vec<Stored<Subject>> = find_all(&pool, Some(2), Some(2)).await.unwrap();
        let names: Vec<&str> = page.iter().map(|s| s.document.name.as_str()).collect();
        assert_eq!(names, vec!["S3", "S4"]);

        let past_end: Vec<Stored<Subject>> = find_all(&pool, Some(2), Some(10)).await.unwrap();
        assert!(past_end.is_empty());
    }

    #[tokio::test]
    async fn test_delete_all_and_count() {
        let dir = tempfile::tempdir().unwrap();
        let pool = init_database(&dir.path().join("store.db")).await.unwrap();

        insert_many(&pool, &[subject("Tree", vec![1]), subject("Lake", vec![1])])
            .await
            .unwrap();
        assert_eq!(count::<Subject>(&pool).await.unwrap(), 2);
        assert_eq!(count::<Color>(&pool).await.unwrap(), 0);

        assert_eq!(delete_all::<Subject>(&pool).await.unwrap(), 2);
        assert_eq!(count::<Subject>(&pool).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_find_by_guid() {
        let dir = tempfile::tempdir().unwrap();
        let pool = init_database(&dir.path().join("store.db")).await.unwrap();

        let guids = insert_many(&pool, &[subject("Cabin", vec![7])]).await.unwrap();

        let found: Option<Stored<Subject>> = find_by_guid(&pool, &guids[0]).await.unwrap();
        assert_eq!(found.unwrap().document.name, "Cabin");

        let missing: Option<Stored<Subject>> = find_by_guid(&pool, "no-such-guid").await.unwrap();
        assert!(missing.is_none());
    }
}
