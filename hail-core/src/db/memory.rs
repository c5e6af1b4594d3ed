use std::sync::Mutex;

use async_trait::async_trait;

use super::factory::{StoreConfig, StoreFactory};
use super::store::{LedgerStore, StoreError};

/// Process-local store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `document`.
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: Mutex::new(Some(document.into())),
        }
    }
}

#[async_trait]
impl LedgerStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn read_document(&self) -> Result<Option<String>, StoreError> {
        let guard = self
            .document
            .lock()
            .map_err(|e| StoreError::Io(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn write_document(&self, document: &str) -> Result<(), StoreError> {
        let mut guard = self
            .document
            .lock()
            .map_err(|e| StoreError::Io(e.to_string()))?;
        *guard = Some(document.to_string());
        Ok(())
    }
}

pub struct MemoryStoreFactory;

#[async_trait]
impl StoreFactory for MemoryStoreFactory {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(&self, _config: &StoreConfig) -> Result<Box<dyn LedgerStore>, StoreError> {
        Ok(Box::new(MemoryStore::new()))
    }
}
