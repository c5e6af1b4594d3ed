//! Pricing logic for hail-damage repair estimates.
//!
//! The pricing engine looks up a base price per panel, vehicle quotes total
//! several panels, and invoice totals add sales tax to a customer summary.

pub mod common;
pub mod invoice;
pub mod pricing_engine;
pub mod pricing_table;
pub mod quote;

pub use invoice::{DEFAULT_TAX_RATE, InvoiceTotals};
pub use pricing_engine::{PricingEngine, PricingError};
pub use pricing_table::{ALUMINUM_MULTIPLIER, DentCountBracket, PriceCell, PricingTable};
pub use quote::{PanelInput, PanelQuote, QuoteError, VehicleQuote};
