//! Episode lookups beyond the generic collection operations

use super::documents::{decode, find_all, find_by_guid, Stored};
use crate::models::Episode;
use crate::Result;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Find an episode by persisted identifier, falling back to its number
///
/// A valid UUID is looked up as a guid. Anything else that parses as an
/// integer matches `episode_num` or `painting_index`. Other input finds
/// nothing.
pub async fn find_episode(pool: &SqlitePool, id: &str) -> Result<Option<Stored<Episode>>> {
    let id = id.trim();

    if Uuid::parse_str(id).is_ok() {
        return find_by_guid(pool, id).await;
    }

    match id.parse::<i64>() {
        Ok(number) => find_episode_by_number(pool, number).await,
        Err(_) => Ok(None),
    }
}

/// First episode (in collection order) whose episode_num or painting_index equals `number`
pub async fn find_episode_by_number(
    pool: &SqlitePool,
    number: i64,
) -> Result<Option<Stored<Episode>>> {
    let row: Option<(String, String)> = sqlx::query_as(
        r#"
        SELECT guid, document FROM episodes
        WHERE json_extract(document, '$.episode_num') = ?
           OR json_extract(document, '$.painting_index') = ?
        ORDER BY rowid
        LIMIT 1
        "#,
    )
    .bind(number)
    .bind(number)
    .fetch_optional(pool)
    .await?;

    row.map(|(guid, json)| decode(guid, &json)).transpose()
}

/// Lightweight reachability check: read at most one episode
pub async fn ping(pool: &SqlitePool) -> Result<()> {
    find_all::<Episode>(pool, Some(1), None).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{init_database, insert_many};
    use crate::models::AirDate;

    fn episode(episode_num: i64, painting_index: i64) -> Episode {
        Episode {
            episode_num,
            painting_index,
            title: format!("Painting {}", episode_num),
            season: 1,
            episode: episode_num,
            air_date: AirDate::fallback(),
            colors: vec![],
            subjects: vec![],
            youtube_url: String::new(),
            img_src: String::new(),
            num_colors: 0,
            num_subjects: 0,
        }
    }

    #[tokio::test]
    async fn test_find_by_guid_and_number() {
        let dir = tempfile::tempdir().unwrap();
        let pool = init_database(&dir.path().join("store.db")).await.unwrap();

        let guids = insert_many(&pool, &[episode(1, 282), episode(2, 283)])
            .await
            .unwrap();

        let by_guid = find_episode(&pool, &guids[1]).await.unwrap().unwrap();
        assert_eq!(by_guid.document.episode_num, 2);

        let by_num = find_episode(&pool, "1").await.unwrap().unwrap();
        assert_eq!(by_num.id, guids[0]);

        let by_painting = find_episode(&pool, "283").await.unwrap().unwrap();
        assert_eq!(by_painting.document.episode_num, 2);
    }

    #[tokio::test]
    async fn test_unknown_identifiers_find_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let pool = init_database(&dir.path().join("store.db")).await.unwrap();
        insert_many(&pool, &[episode(1, 1)]).await.unwrap();

        assert!(find_episode(&pool, "not-an-id").await.unwrap().is_none());
        assert!(find_episode(&pool, "999").await.unwrap().is_none());
        assert!(find_episode(&pool, &Uuid::new_v4().to_string())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_ping() {
        let dir = tempfile::tempdir().unwrap();
        let pool = init_database(&dir.path().join("store.db")).await.unwrap();
        assert!(ping(&pool).await.is_ok());

        let missing = crate::db::connect_readonly(&dir.path().join("absent.db")).unwrap();
        assert!(ping(&missing).await.is_err());
    }
}
