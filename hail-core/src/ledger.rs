//! Persisted history of estimate records, grouped per customer and vehicle.
//!
//! The ledger keeps every record in one JSON array held by a
//! [`LedgerStore`]. Each mutation reads the whole array, changes it and
//! writes it back. There is no locking: the last writer wins.
//!
//! The `try_*` methods report failures. The others log them and degrade to
//! an empty result (reads) or a dropped write.

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::db::{LedgerStore, StoreError};
use crate::models::{CustomerSummary, EstimateRecord};

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("ledger document is not a JSON array: {0}")]
    Malformed(String),

    #[error("failed to encode ledger document: {0}")]
    Encode(String),
}

pub struct Ledger {
    store: Box<dyn LedgerStore>,
    history_limit: Option<usize>,
}

impl Ledger {
    pub fn new(store: Box<dyn LedgerStore>) -> Self {
        Self {
            store,
            history_limit: None,
        }
    }

    /// Keep at most `limit` records; older ones are dropped on `append`.
    pub fn with_history_limit(
        mut self,
        limit: Option<usize>,
    ) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn history_limit(&self) -> Option<usize> {
        self.history_limit
    }

    // =========================================================================
    // strict operations
    // =========================================================================

    /// Every record that decodes. Elements that fail to decode are logged
    /// and skipped; the rest still load.
    ///
    /// # Errors
    /// [`LedgerError::Store`] when the store cannot be read and
    /// [`LedgerError::Malformed`] when the document is not a JSON array.
    pub async fn try_load_all(&self) -> Result<Vec<EstimateRecord>, LedgerError> {
        let Some(document) = self.store.read_document().await? else {
            debug!(backend = self.store.backend_name(), "no ledger document yet");
            return Ok(Vec::new());
        };
        if document.trim().is_empty() {
            return Ok(Vec::new());
        }

        let elements: Vec<Value> =
            serde_json::from_str(&document).map_err(|e| LedgerError::Malformed(e.to_string()))?;
        let total = elements.len();

        let records: Vec<EstimateRecord> = elements
            .into_iter()
            .enumerate()
            .filter_map(|(index, element)| {
                serde_json::from_value(element)
                    .map_err(|e| warn!(index, error = %e, "skipping unreadable estimate record"))
                    .ok()
            })
            .collect();

        debug!(
            backend = self.store.backend_name(),
            loaded = records.len(),
            skipped = total - records.len(),
            "ledger loaded"
        );
        Ok(records)
    }

    /// Overwrite the persisted collection with `records`.
    pub async fn try_replace_all(
        &self,
        records: &[EstimateRecord],
    ) -> Result<(), LedgerError> {
        let document =
            serde_json::to_string_pretty(records).map_err(|e| LedgerError::Encode(e.to_string()))?;
        self.store.write_document(&document).await?;

        debug!(
            backend = self.store.backend_name(),
            count = records.len(),
            "ledger saved"
        );
        Ok(())
    }

    /// Read, push `record`, apply the history limit, write back.
    ///
    /// Fails without writing when the current document cannot be read.
    pub async fn try_append(
        &self,
        record: EstimateRecord,
    ) -> Result<(), LedgerError> {
        let mut records = self.try_load_all().await?;
        records.push(record);
        self.save_appended(records).await
    }

    /// Strict form of [`Ledger::grouped_summaries`].
    pub async fn try_grouped_summaries(&self) -> Result<Vec<CustomerSummary>, LedgerError> {
        Ok(group_records(self.try_load_all().await?))
    }

    /// Strict form of [`Ledger::summary_for`].
    pub async fn try_summary_for(
        &self,
        customer_name: &str,
        vehicle_id: &str,
    ) -> Result<Option<CustomerSummary>, LedgerError> {
        Ok(find_summary(
            self.try_grouped_summaries().await?,
            customer_name,
            vehicle_id,
        ))
    }

    // =========================================================================
    // best-effort operations
    // =========================================================================

    /// Like [`Ledger::try_append`], but a failed read starts from an empty
    /// list and a failed write is logged.
    pub async fn append(
        &self,
        record: EstimateRecord,
    ) {
        let mut records = self.load_all().await;
        records.push(record);
        if let Err(e) = self.save_appended(records).await {
            error!(error = %e, "failed to append estimate record");
        }
    }

    pub async fn load_all(&self) -> Vec<EstimateRecord> {
        self.try_load_all().await.unwrap_or_else(|e| {
            error!(error = %e, "failed to load ledger");
            Vec::new()
        })
    }

    pub async fn replace_all(
        &self,
        records: &[EstimateRecord],
    ) {
        if let Err(e) = self.try_replace_all(records).await {
            error!(error = %e, "failed to save ledger");
        }
    }

    /// Drop every record.
    pub async fn clear(&self) {
        self.replace_all(&[]).await;
    }

    /// One summary per `(customer_name, vehicle_id)` pair.
    ///
    /// Summaries are sorted by customer name then vehicle id, both compared
    /// case-insensitively. Records inside a summary are newest first.
    pub async fn grouped_summaries(&self) -> Vec<CustomerSummary> {
        group_records(self.load_all().await)
    }

    /// Summary for the exact `(customer_name, vehicle_id)` pair.
    pub async fn summary_for(
        &self,
        customer_name: &str,
        vehicle_id: &str,
    ) -> Option<CustomerSummary> {
        find_summary(self.grouped_summaries().await, customer_name, vehicle_id)
    }

    async fn save_appended(
        &self,
        mut records: Vec<EstimateRecord>,
    ) -> Result<(), LedgerError> {
        if let Some(limit) = self.history_limit {
            apply_history_limit(&mut records, limit);
        }
        self.try_replace_all(&records).await
    }
}

/// Drops the oldest records until at most `limit` remain. Survivors keep
/// their stored order; equal timestamps favor the later entry.
fn apply_history_limit(
    records: &mut Vec<EstimateRecord>,
    limit: usize,
) {
    if records.len() <= limit {
        return;
    }

    let mut by_age: Vec<usize> = (0..records.len()).collect();
    by_age.sort_by_key(|&index| records[index].created_at_epoch_millis());

    let mut keep = vec![true; records.len()];
    for &index in &by_age[..records.len() - limit] {
        keep[index] = false;
    }

    let mut flags = keep.into_iter();
    records.retain(|_| flags.next().unwrap_or(false));
    debug!(limit, "history trimmed");
}

fn find_summary(
    summaries: Vec<CustomerSummary>,
    customer_name: &str,
    vehicle_id: &str,
) -> Option<CustomerSummary> {
    summaries.into_iter().find(|summary| {
        summary.customer_name() == customer_name && summary.vehicle_id() == vehicle_id
    })
}

fn group_records(records: Vec<EstimateRecord>) -> Vec<CustomerSummary> {
    let mut groups: HashMap<(String, String), Vec<EstimateRecord>> = HashMap::new();

    for record in records {
        let key = (
            record.customer_name().to_string(),
            record.vehicle_id().to_string(),
        );
        groups.entry(key).or_default().push(record);
    }

    let mut summaries: Vec<CustomerSummary> = groups
        .into_iter()
        .map(|((name, vin), records)| CustomerSummary::from_records(name, vin, records))
        .collect();
    // Case-insensitive name then VIN; exact bytes break ties.
    summaries.sort_by_cached_key(|summary| {
        (
            summary.customer_name().to_lowercase(),
            summary.vehicle_id().to_lowercase(),
            summary.customer_name().to_string(),
            summary.vehicle_id().to_string(),
        )
    });
    summaries
}
