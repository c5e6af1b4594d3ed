use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use hail_core::calculations::PricingEngine;
use hail_core::db::{StoreConfig, StoreRegistry};
use hail_core::Ledger;
use hail_data::PanelBatchLoader;
use hail_db_file::FileStoreFactory;
use hail_db_sqlite::SqliteStoreFactory;

/// Price a CSV batch of damaged panels and append them to the estimate
/// history.
///
/// The CSV file should have the following columns:
/// - customer_name: Customer the estimate is for
/// - vin: Vehicle identification number
/// - panel: Panel code (HOOD, ROOF, TRUNK, LFF, LFD, LG, LQ, LRAIL, RFF, ...)
/// - dent_size: D, N, Q or H
/// - dent_count: Number of dents (1-300)
/// - aluminum: true/false (blank means steel)
#[derive(Parser, Debug)]
#[command(name = "hail-data-loader")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing panel rows
    #[arg(short, long)]
    file: PathBuf,

    /// Storage backend: file or sqlite
    #[arg(short, long, default_value = "file")]
    backend: String,

    /// Backend location (directory for file, database path for sqlite)
    #[arg(short, long, default_value = ".")]
    store: String,

    /// Document slot inside the store
    #[arg(long, default_value = hail_core::db::DEFAULT_SLOT)]
    slot: String,

    /// Keep only this many newest records
    #[arg(long)]
    history_limit: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .compact()
        .init();

    let args = Args::parse();

    let mut registry = StoreRegistry::new();
    registry.register(Box::new(FileStoreFactory));
    registry.register(Box::new(SqliteStoreFactory));

    let config = StoreConfig {
        backend: args.backend.clone(),
        location: args.store.clone(),
        slot: args.slot.clone(),
    };
    let store = registry
        .create(&config)
        .await
        .with_context(|| format!("Failed to open {} store at {}", args.backend, args.store))?;
    let ledger = Ledger::new(store).with_history_limit(args.history_limit);

    println!("Loading panels from: {}", args.file.display());

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let records = PanelBatchLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", args.file.display()))?;

    println!("Parsed {} rows from CSV", records.len());

    let report = PanelBatchLoader::load(&ledger, &PricingEngine::new(), &records)
        .await
        .context("Failed to save estimates")?;

    for skipped in &report.skipped {
        println!("  row {}: {}", skipped.row, skipped.reason);
    }
    println!(
        "Saved {} estimates ({} custom repair, {} skipped), priced total ${:.2}.",
        report.saved,
        report.custom_repairs,
        report.skipped.len(),
        report.priced_total
    );

    Ok(())
}
