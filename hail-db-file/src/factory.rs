use async_trait::async_trait;

use hail_core::db::{LedgerStore, StoreConfig, StoreError, StoreFactory};

use crate::store::JsonFileStore;

/// [`StoreFactory`] for the `"file"` backend.
///
/// `config.location` is the directory holding `<slot>.json`; empty means
/// the current directory.
pub struct FileStoreFactory;

#[async_trait]
impl StoreFactory for FileStoreFactory {
    fn backend_name(&self) -> &'static str {
        "file"
    }

    async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn LedgerStore>, StoreError> {
        if config.slot.trim().is_empty() {
            return Err(StoreError::Configuration(
                "file backend needs a non-empty slot name".to_string(),
            ));
        }

        let dir = if config.location.is_empty() {
            "."
        } else {
            config.location.as_str()
        };
        Ok(Box::new(JsonFileStore::in_dir(dir, &config.slot)))
    }
}
