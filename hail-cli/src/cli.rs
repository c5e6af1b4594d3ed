use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Hail-damage repair estimates and per-customer invoice history.
#[derive(Debug, Parser)]
#[command(name = "hail-estimator", version, about)]
pub struct Cli {
    /// Settings file. Defaults to `hail-estimator.toml` when it exists.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Storage backend (file, sqlite or memory). Overrides the settings file.
    #[arg(long, global = true)]
    pub backend: Option<String>,

    /// Backend location: a directory for `file`, a database path for `sqlite`.
    #[arg(long, global = true)]
    pub store: Option<String>,

    /// Log filter, e.g. `debug` or `hail_core=trace`.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Commands {
    /// Price a single panel and print the cost
    Quote {
        /// Panel code: HOOD, ROOF, TRUNK, LFF, LFD, LG, LQ, LRAIL, RFF, RFD, RG, RQ, RRAIL
        panel: String,

        /// Largest dent size: D, N, Q or H
        size: String,

        /// Number of dents (1-300)
        #[arg(allow_negative_numbers = true)]
        count: i64,

        /// Panel is aluminum (1.5x)
        #[arg(short, long)]
        aluminum: bool,
    },

    #[command(flatten)]
    Ledger(LedgerCommand),
}

/// Subcommands that read or write the estimate history.
#[derive(Debug, Subcommand, Clone)]
pub enum LedgerCommand {
    /// Price one or more panels for a customer and save them to the history
    Save {
        /// Customer name
        #[arg(short = 'n', long)]
        customer: String,

        /// Vehicle identification number
        #[arg(short, long)]
        vin: String,

        /// Panels as PANEL:SIZE:COUNT[:al], e.g. HOOD:D:3 ROOF:Q:40:al
        #[arg(required = true)]
        panels: Vec<String>,
    },

    /// Show saved estimates grouped by customer and vehicle
    History {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show the invoice for one customer's vehicle
    Invoice {
        /// Customer name, exactly as saved
        #[arg(short = 'n', long)]
        customer: String,

        /// Vehicle identification number, exactly as saved
        #[arg(short, long)]
        vin: String,
    },

    /// Delete every saved estimate
    Clear {
        /// Required; clearing cannot be undone
        #[arg(long)]
        yes: bool,
    },
}
