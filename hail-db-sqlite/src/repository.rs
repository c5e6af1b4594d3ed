use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::debug;

use hail_core::db::{LedgerStore, StoreError};

/// Ledger document kept in one row of `ledger_documents`, keyed by slot.
pub struct SqliteLedgerStore {
    pool: SqlitePool,
    slot: String,
}

impl SqliteLedgerStore {
    /// Open `location`, a file path (created if missing) or `:memory:`.
    pub async fn new(
        location: &str,
        slot: &str,
    ) -> Result<Self, StoreError> {
        let connected = if location == ":memory:" {
            // Every in-memory connection is its own database.
            SqlitePoolOptions::new()
                .max_connections(1)
                .connect("sqlite::memory:")
                .await
        } else {
            let options = SqliteConnectOptions::new()
                .filename(location)
                .create_if_missing(true);
            SqlitePool::connect_with(options).await
        };
        let pool = connected.map_err(|e| StoreError::Connection(e.to_string()))?;

        Ok(Self::new_with_pool(pool, slot))
    }

    pub fn new_with_pool(
        pool: SqlitePool,
        slot: &str,
    ) -> Self {
        Self {
            pool,
            slot: slot.to_string(),
        }
    }

    pub async fn run_migrations(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }
}

#[async_trait]
impl LedgerStore for SqliteLedgerStore {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn read_document(&self) -> Result<Option<String>, StoreError> {
        sqlx::query_scalar::<_, String>("SELECT document FROM ledger_documents WHERE slot = ?")
            .bind(&self.slot)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    async fn write_document(&self, document: &str) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO ledger_documents (slot, document, updated_at)
             VALUES (?, ?, ?)
             ON CONFLICT(slot) DO UPDATE SET
                document = excluded.document,
                updated_at = excluded.updated_at",
        )
        .bind(&self.slot)
        .bind(document)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        debug!(slot = %self.slot, bytes = document.len(), "ledger document written");
        Ok(())
    }
}
