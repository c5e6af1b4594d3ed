use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Durable slot holding the ledger's JSON document.
///
/// A store knows nothing about records. It reads and replaces one opaque
/// document; the [`Ledger`](crate::ledger::Ledger) owns parsing and
/// grouping.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Short name used in log lines, e.g. `"file"`.
    fn backend_name(&self) -> &'static str;

    /// Current document, or `None` when nothing has been written yet.
    async fn read_document(&self) -> Result<Option<String>, StoreError>;

    /// Replaces the whole document.
    async fn write_document(&self, document: &str) -> Result<(), StoreError>;
}
