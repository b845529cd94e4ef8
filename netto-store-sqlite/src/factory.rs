use async_trait::async_trait;

use netto_core::store::{KeyValueStore, StoreConfig, StoreError, StoreFactory};

use crate::repository::SqliteStore;

/// [`StoreFactory`] for SQLite.
///
/// ```rust,no_run
/// use netto_core::store::StoreRegistry;
/// use netto_store_sqlite::SqliteStoreFactory;
///
/// let mut registry = StoreRegistry::new();
/// registry.register(Box::new(SqliteStoreFactory));
/// ```
pub struct SqliteStoreFactory;

#[async_trait]
impl StoreFactory for SqliteStoreFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Opens `config.connection_string` (a file path or `":memory:"`) and
    /// runs migrations. An empty connection string means `:memory:`.
    async fn create(&self, config: &StoreConfig) -> Result<Box<dyn KeyValueStore>, StoreError> {
        let path = if config.connection_string.trim().is_empty() {
            ":memory:"
        } else {
            config.connection_string.as_str()
        };

        let store = SqliteStore::new(path).await?;
        store.run_migrations().await?;
        Ok(Box::new(store))
    }
}
