//! Subtotal, sales tax and grand total for one customer's vehicle.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::round_half_up;
use crate::models::CustomerSummary;

/// Sales tax applied to invoices when no rate is configured (8.25%).
pub const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(825, 0, 0, false, 4);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    /// Sum of priced records; custom repairs and diagnostics are excluded.
    pub subtotal: Decimal,
    pub tax_rate: Decimal,
    pub tax: Decimal,
    /// `subtotal + tax`, both already rounded to cents.
    pub total: Decimal,
}

impl InvoiceTotals {
    pub fn for_summary(
        summary: &CustomerSummary,
        tax_rate: Decimal,
    ) -> Self {
        Self::from_subtotal(summary.total_cost(), tax_rate)
    }

    pub fn from_subtotal(
        subtotal: Decimal,
        tax_rate: Decimal,
    ) -> Self {
        let subtotal = round_half_up(subtotal);
        let tax = round_half_up(subtotal * tax_rate);

        Self {
            subtotal,
            tax_rate,
            tax,
            total: subtotal + tax,
        }
    }

    /// Tax rate as a percentage string, e.g. `8.25%`.
    pub fn tax_rate_percent(&self) -> String {
        format!("{}%", (self.tax_rate * Decimal::ONE_HUNDRED).normalize())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{DentSize, EstimateRecord, NewEstimateRecord, PanelType};

    #[test]
    fn default_rate_is_eight_and_a_quarter_percent() {
        assert_eq!(DEFAULT_TAX_RATE, dec!(0.0825));
    }

    #[test]
    fn tax_rounds_half_up_to_cents() {
        let totals = InvoiceTotals::from_subtotal(dec!(187.50), DEFAULT_TAX_RATE);

        // 187.50 * 0.0825 = 15.46875
        assert_eq!(totals.subtotal, dec!(187.50));
        assert_eq!(totals.tax, dec!(15.47));
        assert_eq!(totals.total, dec!(202.97));
    }

    #[test]
    fn zero_rate_leaves_total_unchanged() {
        let totals = InvoiceTotals::from_subtotal(dec!(300), Decimal::ZERO);

        assert_eq!(totals.tax, dec!(0));
        assert_eq!(totals.total, dec!(300));
    }

    #[test]
    fn summary_totals_exclude_custom_repair() {
        let mut summary = CustomerSummary::new("Kim", "VIN");
        for (cost, at) in [("$400.00", 1), ("CR: Custom Repair Needed", 2)] {
            summary.add_record(
                EstimateRecord::create_at(
                    NewEstimateRecord {
                        customer_name: "Kim".to_string(),
                        vehicle_id: "VIN".to_string(),
                        panel_type: PanelType::Hood,
                        dent_size: DentSize::Quarter,
                        dent_count: 4,
                        is_aluminum: false,
                        cost_result: cost.to_string(),
                    },
                    at,
                )
                .unwrap(),
            );
        }

        let totals = InvoiceTotals::for_summary(&summary, DEFAULT_TAX_RATE);

        assert_eq!(totals.subtotal, dec!(400.00));
        assert_eq!(totals.tax, dec!(33.00));
        assert_eq!(totals.total, dec!(433.00));
    }

    #[test]
    fn percent_label() {
        let totals = InvoiceTotals::from_subtotal(dec!(1), DEFAULT_TAX_RATE);

        assert_eq!(totals.tax_rate_percent(), "8.25%");
    }
}
