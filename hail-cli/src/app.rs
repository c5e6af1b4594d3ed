use anyhow::{Context, Result, bail};
use chrono::Utc;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info};

use hail_core::calculations::{InvoiceTotals, PanelInput, PricingEngine, VehicleQuote};
use hail_core::db::{MemoryStoreFactory, StoreRegistry};
use hail_core::{DentSize, Ledger, PanelType};
use hail_db_file::FileStoreFactory;
use hail_db_sqlite::SqliteStoreFactory;

use crate::cli::{Commands, LedgerCommand};
use crate::config::Settings;
use crate::report;

/// Registry with every backend this binary ships.
pub fn build_registry() -> StoreRegistry {
    let mut registry = StoreRegistry::new();
    registry.register(Box::new(FileStoreFactory));
    registry.register(Box::new(SqliteStoreFactory));
    registry.register(Box::new(MemoryStoreFactory));
    registry
}

pub async fn open_ledger(settings: &Settings) -> Result<Ledger> {
    let config = settings.store_config();
    debug!(backend = %config.backend, location = %config.location, "opening store");

    let store = build_registry()
        .create(&config)
        .await
        .with_context(|| format!("failed to open '{}' store", config.backend))?;
    Ok(Ledger::new(store).with_history_limit(settings.ledger.history_limit))
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PanelSpecError {
    #[error("panel '{0}' must look like PANEL:SIZE:COUNT or PANEL:SIZE:COUNT:al")]
    Shape(String),

    #[error("unknown panel type '{0}'")]
    UnknownPanel(String),

    #[error("unknown dent size '{0}' (expected D, N, Q or H)")]
    UnknownSize(String),

    #[error("dent count '{0}' must be a whole number from 1 to 300")]
    BadCount(String),

    #[error("unknown panel flag '{0}' (expected al)")]
    UnknownFlag(String),
}

/// Parse `PANEL:SIZE:COUNT[:al]`, e.g. `roof:q:40:al`.
pub fn parse_panel_spec(spec: &str) -> Result<PanelInput, PanelSpecError> {
    let parts: Vec<&str> = spec.split(':').map(str::trim).collect();
    let (panel, size, count, flag) = match parts.as_slice() {
        [panel, size, count] => (*panel, *size, *count, None),
        [panel, size, count, flag] => (*panel, *size, *count, Some(*flag)),
        _ => return Err(PanelSpecError::Shape(spec.to_string())),
    };

    let panel_type = PanelType::parse(&panel.to_uppercase())
        .ok_or_else(|| PanelSpecError::UnknownPanel(panel.to_string()))?;
    let dent_size = DentSize::parse(&size.to_uppercase())
        .ok_or_else(|| PanelSpecError::UnknownSize(size.to_string()))?;
    let dent_count = count
        .parse::<u16>()
        .ok()
        .filter(|n| (1..=300).contains(n))
        .ok_or_else(|| PanelSpecError::BadCount(count.to_string()))?;
    let is_aluminum = match flag {
        None => false,
        Some(f) if f.eq_ignore_ascii_case("al") => true,
        Some(f) => return Err(PanelSpecError::UnknownFlag(f.to_string())),
    };

    Ok(PanelInput {
        panel_type,
        dent_size,
        dent_count,
        is_aluminum,
    })
}

/// Run one command and return what to print.
///
/// Pricing a single panel never opens the store.
pub async fn run(
    settings: &Settings,
    command: Commands,
) -> Result<String> {
    match command {
        Commands::Quote {
            panel,
            size,
            count,
            aluminum,
        } => Ok(format!(
            "{}\n",
            PricingEngine::new().estimate(&panel, &size, count, aluminum)
        )),
        Commands::Ledger(command) => {
            let ledger = open_ledger(settings).await?;
            execute(&ledger, settings.invoice.tax_rate, command).await
        }
    }
}

/// Run one history command against an open ledger.
pub async fn execute(
    ledger: &Ledger,
    tax_rate: Decimal,
    command: LedgerCommand,
) -> Result<String> {
    match command {
        LedgerCommand::Save {
            customer,
            vin,
            panels,
        } => {
            let inputs = panels
                .iter()
                .map(|spec| parse_panel_spec(spec))
                .collect::<Result<Vec<_>, _>>()?;
            let quote = VehicleQuote::calculate(&PricingEngine::new(), &customer, &vin, &inputs)?;

            let records = quote.records(Utc::now().timestamp_millis());
            let saved = records.len();
            for record in records {
                ledger
                    .try_append(record)
                    .await
                    .context("failed to save estimate")?;
            }
            info!(customer = %quote.customer_name, saved, "estimates saved");

            let mut out = report::render_quote(&quote);
            out.push_str(&format!("Saved {saved} estimate(s).\n"));
            Ok(out)
        }

        LedgerCommand::History { json } => {
            let summaries = ledger
                .try_grouped_summaries()
                .await
                .context("failed to read estimate history")?;
            if json {
                let mut text = serde_json::to_string_pretty(&summaries)?;
                text.push('\n');
                Ok(text)
            } else {
                Ok(report::render_history(&summaries))
            }
        }

        LedgerCommand::Invoice { customer, vin } => {
            let Some(summary) = ledger
                .try_summary_for(&customer, &vin)
                .await
                .context("failed to read estimate history")?
            else {
                bail!("no saved estimates for '{customer}' with VIN '{vin}'");
            };
            let totals = InvoiceTotals::for_summary(&summary, tax_rate);
            Ok(report::render_invoice(&summary, &totals))
        }

        LedgerCommand::Clear { yes } => {
            if !yes {
                bail!("refusing to clear history without --yes");
            }
            ledger
                .try_replace_all(&[])
                .await
                .context("failed to clear estimate history")?;
            info!("estimate history cleared");
            Ok("Estimate history cleared.\n".to_string())
        }
    }
}
