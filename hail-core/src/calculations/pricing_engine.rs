//! Turns raw panel inputs into a cost string.
//!
//! The engine never fails hard: bad input comes back as an `N/A: <reason>`
//! outcome and manual-quote cells as `CR: Custom Repair Needed`.
//!
//! # Example
//!
//! ```
//! use hail_core::calculations::PricingEngine;
//!
//! let engine = PricingEngine::new();
//!
//! assert_eq!(engine.estimate("HOOD", "D", 3, false), "$125.00");
//! assert_eq!(engine.estimate("hood", "d", 3, true), "$187.50");
//! assert_eq!(engine.estimate("HOOD", "H", 80, false), "CR: Custom Repair Needed");
//! assert!(engine.estimate("FENDER", "D", 5, false).starts_with("N/A"));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::trace;

use crate::calculations::common::round_half_up;
use crate::calculations::pricing_table::{
    ALUMINUM_MULTIPLIER, DentCountBracket, PricingTable,
};
use crate::models::{CostOutcome, DentSize, PanelType};

/// Reasons a panel cannot be priced. The messages are the text shown after
/// `N/A: `.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PricingError {
    #[error("Invalid input.")]
    InvalidInput,

    #[error("Unknown panel type.")]
    UnknownPanelType,

    #[error("Number of dents out of range (1-300).")]
    DentCountOutOfRange,

    #[error("Unknown dent size category for selected panel/dents.")]
    UnknownDentSize,
}

impl From<PricingError> for CostOutcome {
    fn from(err: PricingError) -> Self {
        CostOutcome::NotApplicable(err.to_string())
    }
}

/// Stateless price lookup over a [`PricingTable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PricingEngine {
    table: PricingTable,
}

impl PricingEngine {
    pub fn new() -> Self {
        Self {
            table: PricingTable::new(),
        }
    }

    /// Prices one panel and returns the display string.
    ///
    /// Equivalent to `self.quote(..).to_string()`.
    pub fn estimate(
        &self,
        panel_type: &str,
        dent_size: &str,
        dent_count: i64,
        is_aluminum: bool,
    ) -> String {
        self.quote(panel_type, dent_size, dent_count, is_aluminum)
            .to_string()
    }

    /// Prices one panel from raw text inputs.
    ///
    /// Panel and size codes are trimmed and uppercased before lookup. Checks
    /// run in this order: blank input or non-positive count, unknown panel,
    /// count above 300, unknown size.
    pub fn quote(
        &self,
        panel_type: &str,
        dent_size: &str,
        dent_count: i64,
        is_aluminum: bool,
    ) -> CostOutcome {
        match self.resolve(panel_type, dent_size, dent_count) {
            Ok((panel, size, bracket)) => self.price_cell(panel, size, bracket, is_aluminum),
            Err(err) => err.into(),
        }
    }

    /// Prices one panel from already-parsed inputs.
    pub fn quote_panel(
        &self,
        panel: PanelType,
        size: DentSize,
        dent_count: i64,
        is_aluminum: bool,
    ) -> CostOutcome {
        if dent_count <= 0 {
            return PricingError::InvalidInput.into();
        }
        match DentCountBracket::for_count(dent_count) {
            Some(bracket) => self.price_cell(panel, size, bracket, is_aluminum),
            None => PricingError::DentCountOutOfRange.into(),
        }
    }

    fn resolve(
        &self,
        panel_type: &str,
        dent_size: &str,
        dent_count: i64,
    ) -> Result<(PanelType, DentSize, DentCountBracket), PricingError> {
        let panel_code = panel_type.trim().to_uppercase();
        let size_code = dent_size.trim().to_uppercase();

        if panel_code.is_empty() || size_code.is_empty() || dent_count <= 0 {
            return Err(PricingError::InvalidInput);
        }

        let panel = PanelType::parse(&panel_code).ok_or(PricingError::UnknownPanelType)?;
        let bracket =
            DentCountBracket::for_count(dent_count).ok_or(PricingError::DentCountOutOfRange)?;
        let size = DentSize::parse(&size_code).ok_or(PricingError::UnknownDentSize)?;

        Ok((panel, size, bracket))
    }

    fn price_cell(
        &self,
        panel: PanelType,
        size: DentSize,
        bracket: DentCountBracket,
        is_aluminum: bool,
    ) -> CostOutcome {
        let cell = self.table.cell(panel, bracket, size);
        trace!(%panel, %size, bracket = %bracket.label(), ?cell, "price cell");

        let Some(base) = cell.base_price() else {
            return CostOutcome::CustomRepair;
        };
        let cost: Decimal = if is_aluminum {
            base * ALUMINUM_MULTIPLIER
        } else {
            base
        };
        CostOutcome::Priced(round_half_up(cost))
    }
}
