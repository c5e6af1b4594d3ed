pub mod calculations;
pub mod db;
pub mod ledger;
pub mod models;

pub use calculations::{InvoiceTotals, PricingEngine, PricingTable, VehicleQuote};
pub use db::{LedgerStore, StoreConfig, StoreError, StoreFactory, StoreRegistry};
pub use ledger::{Ledger, LedgerError};
pub use models::*;
