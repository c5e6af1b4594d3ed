//! Multi-panel quotes for a single vehicle.
//!
//! A quote prices every damaged panel on one car, totals the panels that
//! came back with a dollar amount, and produces one [`EstimateRecord`] per
//! panel for the ledger.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::warn;

use crate::calculations::PricingEngine;
use crate::models::{
    CostOutcome, DentSize, EstimateRecord, NewEstimateRecord, PanelType,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuoteError {
    #[error("customer name is required")]
    MissingCustomerName,

    #[error("vehicle VIN is required")]
    MissingVehicleId,

    #[error("no panels added to calculate")]
    NoPanels,
}

/// Damage description for one panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelInput {
    pub panel_type: PanelType,
    pub dent_size: DentSize,
    pub dent_count: u16,
    pub is_aluminum: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelQuote {
    pub input: PanelInput,
    pub outcome: CostOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleQuote {
    pub customer_name: String,
    pub vehicle_id: String,
    pub panels: Vec<PanelQuote>,
}

impl VehicleQuote {
    /// Prices every panel in `inputs`, in order.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError`] when the customer name or VIN is blank, or when
    /// `inputs` is empty.
    pub fn calculate(
        engine: &PricingEngine,
        customer_name: &str,
        vehicle_id: &str,
        inputs: &[PanelInput],
    ) -> Result<Self, QuoteError> {
        let customer_name = customer_name.trim();
        let vehicle_id = vehicle_id.trim();

        if customer_name.is_empty() {
            return Err(QuoteError::MissingCustomerName);
        }
        if vehicle_id.is_empty() {
            return Err(QuoteError::MissingVehicleId);
        }
        if inputs.is_empty() {
            return Err(QuoteError::NoPanels);
        }

        let panels = inputs
            .iter()
            .map(|input| PanelQuote {
                input: *input,
                outcome: engine.quote_panel(
                    input.panel_type,
                    input.dent_size,
                    i64::from(input.dent_count),
                    input.is_aluminum,
                ),
            })
            .collect();

        Ok(Self {
            customer_name: customer_name.to_string(),
            vehicle_id: vehicle_id.to_string(),
            panels,
        })
    }

    /// Sum of the panels priced in dollars.
    pub fn total(&self) -> Decimal {
        self.panels
            .iter()
            .filter_map(|panel| panel.outcome.amount())
            .sum()
    }

    /// True when every panel has a dollar amount (no `CR`, no `N/A`).
    pub fn all_priced(&self) -> bool {
        self.panels.iter().all(|panel| panel.outcome.is_priced())
    }

    /// One ledger record per panel, all stamped `created_at_epoch_millis`.
    ///
    /// Panels whose inputs cannot form a record (dent count outside 1-300)
    /// are logged and left out.
    pub fn records(
        &self,
        created_at_epoch_millis: i64,
    ) -> Vec<EstimateRecord> {
        self.panels
            .iter()
            .filter_map(|panel| {
                let new = NewEstimateRecord {
                    customer_name: self.customer_name.clone(),
                    vehicle_id: self.vehicle_id.clone(),
                    panel_type: panel.input.panel_type,
                    dent_size: panel.input.dent_size,
                    dent_count: panel.input.dent_count,
                    is_aluminum: panel.input.is_aluminum,
                    cost_result: panel.outcome.to_string(),
                };
                match EstimateRecord::create_at(new, created_at_epoch_millis) {
                    Ok(record) => Some(record),
                    Err(error) => {
                        warn!(panel = %panel.input.panel_type, %error, "panel not recorded");
                        None
                    }
                }
            })
            .collect()
    }
}
