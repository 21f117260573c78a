//! SQLite implementation of [`SlotStore`].
//!
//! Migrations are embedded at compile time from `./migrations` (relative to
//! the crate root) and run on every connect. The runtime-checked
//! `sqlx::query` form is used so no `DATABASE_URL` is needed to build.

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use super::SlotStore;

#[derive(Clone, Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) the SQLite database at `url` and run pending
    /// migrations, e.g. `"sqlite://ocm.db"`.
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    /// A private in-memory database.
    ///
    /// Every pooled connection to `sqlite::memory:` would see its own empty
    /// database, so the pool is pinned to a single connection that never
    /// expires.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    /// Wait for in-flight queries and close every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl SlotStore for SqliteStore {
    async fn get_slot(&self, key: &str) -> Result<Option<String>, sqlx::Error> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM kv_slots WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(v,)| v))
    }

    async fn put_slot(&self, key: &str, value: &str) -> Result<(), sqlx::Error> {
        let updated_at = chrono::Utc::now().to_rfc3339();
        sqlx::query(
            "INSERT INTO kv_slots (key, value, updated_at) VALUES (?1, ?2, ?3) \
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
        )
        .bind(key)
        .bind(value)
        .bind(&updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn missing_slot_reads_as_none() {
        let store = SqliteStore::in_memory().await.unwrap();
        assert_eq!(store.get_slot("nothing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn put_replaces_whole_value() {
        let store = SqliteStore::in_memory().await.unwrap();
        store.put_slot("k", "[1,2]").await.unwrap();
        store.put_slot("k", "[3]").await.unwrap();
        assert_eq!(store.get_slot("k").await.unwrap().as_deref(), Some("[3]"));
    }

    #[tokio::test]
    async fn file_database_survives_reconnect() {
        let path = std::env::temp_dir().join(format!("ocm-{}.db", uuid::Uuid::new_v4()));
        let url = format!("sqlite://{}", path.display());

        let first = SqliteStore::connect(&url).await.unwrap();
        first.put_slot("oc_materials_db", "[]").await.unwrap();
        first.close().await;

        let second = SqliteStore::connect(&url).await.unwrap();
        assert_eq!(
            second.get_slot("oc_materials_db").await.unwrap().as_deref(),
            Some("[]")
        );
        let _ = std::fs::remove_file(&path);
    }
}
