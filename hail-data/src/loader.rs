use std::io::Read;

use hail_core::calculations::PricingEngine;
use hail_core::{
    CostOutcome, DentSize, EstimateRecord, Ledger, LedgerError, NewEstimateRecord, PanelType,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur when importing a panel batch.
#[derive(Debug, Error)]
pub enum BatchLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("CSV parse error on line {line}: {message}")]
    InvalidRow { line: u64, message: String },

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

impl From<csv::Error> for BatchLoaderError {
    fn from(err: csv::Error) -> Self {
        match err.position() {
            Some(position) => BatchLoaderError::InvalidRow {
                line: position.line(),
                message: err.to_string(),
            },
            None => BatchLoaderError::CsvParse(err.to_string()),
        }
    }
}

/// A single row of the panel batch CSV.
///
/// - `customer_name`, `vin`: who the estimate is for
/// - `panel`: panel code (HOOD, ROOF, LFD, ...)
/// - `dent_size`: D, N, Q or H
/// - `dent_count`: number of dents on the panel
/// - `aluminum`: true/false, yes/no, y/n or 1/0 (blank means steel)
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PanelBatchRecord {
    pub customer_name: String,
    pub vin: String,
    pub panel: String,
    pub dent_size: String,
    pub dent_count: i64,
    #[serde(deserialize_with = "deserialize_flag")]
    pub aluminum: bool,
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s.as_deref().map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") | Some("false") | Some("no") | Some("n") | Some("0") => Ok(false),
        Some("true") | Some("yes") | Some("y") | Some("1") => Ok(true),
        Some(other) => Err(serde::de::Error::custom(format!(
            "invalid aluminum flag '{other}'"
        ))),
    }
}

/// A row that was priced but not saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based position among the data rows.
    pub row: usize,
    pub reason: String,
}

/// Outcome of [`PanelBatchLoader::load`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub saved: usize,
    pub custom_repairs: usize,
    pub skipped: Vec<SkippedRow>,
    /// Sum of the saved rows that priced in dollars.
    pub priced_total: Decimal,
}

/// Imports panel damage rows from CSV, prices each one and appends it to a
/// [`Ledger`].
pub struct PanelBatchLoader;

impl PanelBatchLoader {
    /// Parse panel rows from a CSV reader.
    ///
    /// The first row that fails to deserialize aborts the parse.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<PanelBatchRecord>, BatchLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: PanelBatchRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Price every row and append the priced and custom-repair ones.
    ///
    /// Rows the engine rejects (`N/A`) or that cannot form a record are
    /// reported in [`LoadReport::skipped`] and never written. A store failure
    /// stops the load; rows appended before it stay saved.
    pub async fn load(
        ledger: &Ledger,
        engine: &PricingEngine,
        records: &[PanelBatchRecord],
    ) -> Result<LoadReport, BatchLoaderError> {
        let mut report = LoadReport::default();

        for (index, row) in records.iter().enumerate() {
            let row_number = index + 1;
            let outcome = engine.quote(&row.panel, &row.dent_size, row.dent_count, row.aluminum);

            let record = match Self::to_record(row, &outcome) {
                Ok(record) => record,
                Err(reason) => {
                    warn!(row = row_number, %reason, "skipping batch row");
                    report.skipped.push(SkippedRow {
                        row: row_number,
                        reason,
                    });
                    continue;
                }
            };

            ledger.try_append(record).await?;

            report.saved += 1;
            match outcome {
                CostOutcome::Priced(amount) => report.priced_total += amount,
                CostOutcome::CustomRepair => report.custom_repairs += 1,
                CostOutcome::NotApplicable(_) => {}
            }
        }

        debug!(
            saved = report.saved,
            skipped = report.skipped.len(),
            "batch load finished"
        );
        Ok(report)
    }

    fn to_record(
        row: &PanelBatchRecord,
        outcome: &CostOutcome,
    ) -> Result<EstimateRecord, String> {
        if let CostOutcome::NotApplicable(_) = outcome {
            return Err(outcome.to_string());
        }

        // The engine accepted both codes, so these parse.
        let panel_type = PanelType::parse(&row.panel.trim().to_uppercase())
            .ok_or_else(|| format!("unknown panel '{}'", row.panel))?;
        let dent_size = DentSize::parse(&row.dent_size.trim().to_uppercase())
            .ok_or_else(|| format!("unknown dent size '{}'", row.dent_size))?;
        let dent_count = u16::try_from(row.dent_count)
            .map_err(|_| format!("dent count {} out of range", row.dent_count))?;

        EstimateRecord::create(NewEstimateRecord {
            customer_name: row.customer_name.trim().to_string(),
            vehicle_id: row.vin.trim().to_string(),
            panel_type,
            dent_size,
            dent_count,
            is_aluminum: row.aluminum,
            cost_result: outcome.to_string(),
        })
        .map_err(|e| e.to_string())
    }
}
