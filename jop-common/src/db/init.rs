//! Database initialization
//!
//! The loader opens the store read-write and creates the collections on
//! first run; the API opens it read-only and lazily, so a missing store
//! shows up as a failing health check instead of a startup crash.

use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Collections created by `init_database`
pub const COLLECTIONS: [&str; 3] = ["episodes", "colors", "subjects"];

/// Open (creating if needed) the store and its collections
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&pool)
        .await?;

    for collection in COLLECTIONS {
        create_collection(&pool, collection).await?;
    }

    Ok(pool)
}

async fn create_collection(pool: &SqlitePool, name: &str) -> Result<()> {
    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            guid TEXT PRIMARY KEY,
            document TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
        name
    ))
    .execute(pool)
    .await?;

    Ok(())
}

/// Open the store read-only without touching it yet
///
/// Connections are established on first use; queries fail with a database
/// error while the file is absent.
pub fn connect_readonly(db_path: &Path) -> Result<SqlitePool> {
    if !db_path.exists() {
        warn!(
            "Database not found: {} (run jop-etl to create it)",
            db_path.display()
        );
    }

    let options = SqliteConnectOptions::from_str(&format!("sqlite://{}", db_path.display()))?
        .read_only(true)
        .create_if_missing(false);

    Ok(SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect_lazy_with(options))
}
