use std::str::FromStr;

use async_trait::async_trait;
use netto_core::store::{KeyValueStore, StoreError};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

const IN_MEMORY: &str = ":memory:";

/// [`KeyValueStore`] backed by the `kv_store` table.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens `path`, creating the file if needed. `":memory:"` opens an
    /// ephemeral database on a single connection.
    pub async fn new(path: &str) -> Result<Self, StoreError> {
        let (options, pool_options) = if path == IN_MEMORY {
            let options = SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| StoreError::Connection(e.to_string()))?;
            // The database lives and dies with its one connection.
            let pool_options = SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
            (options, pool_options)
        } else {
            let options = SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true);
            (options, SqlitePoolOptions::new().max_connections(4))
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        info!(path, "opened sqlite store");
        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        debug!(key, found = value.is_some(), "kv get");
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?, ?, strftime('%Y-%m-%dT%H:%M:%SZ', 'now'))
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Backend(e.to_string()))?;

        debug!(key, bytes = value.len(), "kv set");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        debug!(key, "kv remove");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    async fn memory_store() -> SqliteStore {
        let store = SqliteStore::new(IN_MEMORY).await.unwrap();
        store.run_migrations().await.unwrap();
        store
    }

    #[tokio::test]
    async fn get_missing_key_is_none() {
        let store = memory_store().await;

        assert_eq!(store.get("absent").await, Ok(None));
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let store = memory_store().await;
        store.set("toolstack.nettoit.v1", r#"{"data":{}}"#).await.unwrap();

        assert_eq!(
            store.get("toolstack.nettoit.v1").await,
            Ok(Some(r#"{"data":{}}"#.to_string()))
        );
    }

    #[tokio::test]
    async fn set_upserts_existing_key() {
        let store = memory_store().await;
        store.set("k", "first").await.unwrap();
        store.set("k", "second").await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM kv_store")
            .fetch_one(&store.pool)
            .await
            .unwrap();

        assert_eq!(count, 1);
        assert_eq!(store.get("k").await, Ok(Some("second".to_string())));
    }

    #[tokio::test]
    async fn remove_deletes_and_tolerates_missing() {
        let store = memory_store().await;
        store.set("k", "v").await.unwrap();
        store.remove("k").await.unwrap();
        store.remove("k").await.unwrap();

        assert_eq!(store.get("k").await, Ok(None));
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let store = memory_store().await;

        assert!(store.run_migrations().await.is_ok());
    }

    #[tokio::test]
    async fn file_store_persists_across_connections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("netto.db");
        let path = path.to_str().unwrap();

        {
            let store = SqliteStore::new(path).await.unwrap();
            store.run_migrations().await.unwrap();
            store.set("k", "kept").await.unwrap();
            store.pool.close().await;
        }

        let reopened = SqliteStore::new(path).await.unwrap();
        reopened.run_migrations().await.unwrap();

        assert_eq!(reopened.get("k").await, Ok(Some("kept".to_string())));
    }
}
