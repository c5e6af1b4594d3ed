use async_trait::async_trait;

use hail_core::db::{LedgerStore, StoreConfig, StoreError, StoreFactory};

use crate::repository::SqliteLedgerStore;

/// [`StoreFactory`] for SQLite.
///
/// ```rust,no_run
/// use hail_core::db::StoreRegistry;
/// use hail_db_sqlite::SqliteStoreFactory;
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

    /// Open `config.location` (a file path or `:memory:`) and migrate it.
    async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn LedgerStore>, StoreError> {
        let location = if config.location.is_empty() {
            ":memory:"
        } else {
            config.location.as_str()
        };

        let store = SqliteLedgerStore::new(location, &config.slot).await?;
        store.run_migrations().await?;
        Ok(Box::new(store))
    }
}
