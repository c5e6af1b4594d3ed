//! Plain-text rendering for terminal output.

use std::fmt::Write;

use hail_core::calculations::common::format_currency;
use hail_core::calculations::{InvoiceTotals, VehicleQuote};
use hail_core::{CustomerSummary, EstimateRecord};

fn aluminum_label(is_aluminum: bool) -> &'static str {
    if is_aluminum { "Yes" } else { "No" }
}

/// One line per panel followed by the priced total.
pub fn render_quote(quote: &VehicleQuote) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Customer: {}", quote.customer_name);
    let _ = writeln!(out, "VIN: {}", quote.vehicle_id);

    for panel in &quote.panels {
        let _ = writeln!(
            out,
            "  {:<6} {:>3} x {:<11}  Aluminum: {:<3}  {}",
            panel.input.panel_type,
            panel.input.dent_count,
            panel.input.dent_size.label(),
            aluminum_label(panel.input.is_aluminum),
            panel.outcome
        );
    }

    let _ = writeln!(out, "Total Estimated Cost: {}", format_currency(quote.total()));
    if !quote.all_priced() {
        let _ = writeln!(out, "Some panels need a custom repair quote or were not priced.");
    }
    out
}

fn render_record(
    out: &mut String,
    record: &EstimateRecord,
) {
    let _ = writeln!(
        out,
        "  Date: {} | Panel: {} | Dents: {} ({}) | Aluminum: {} | Cost: {}",
        record.formatted_date(),
        record.panel_type(),
        record.dent_count(),
        record.dent_size(),
        aluminum_label(record.is_aluminum()),
        record.cost_result()
    );
}

/// Every customer block in the order given.
pub fn render_history(summaries: &[CustomerSummary]) -> String {
    if summaries.is_empty() {
        return "No saved estimates.\n".to_string();
    }

    let mut out = String::new();
    for (i, summary) in summaries.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "Customer: {}", summary.customer_name());
        let _ = writeln!(out, "VIN: {}", summary.vehicle_id());
        let _ = writeln!(
            out,
            "Total for Customer: {}",
            format_currency(summary.total_cost())
        );
        for record in summary.records() {
            render_record(&mut out, record);
        }
    }
    out
}

pub fn render_invoice(
    summary: &CustomerSummary,
    totals: &InvoiceTotals,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Hail Damage Repair Invoice");
    let _ = writeln!(out, "Customer: {}", summary.customer_name());
    let _ = writeln!(out, "VIN: {}", summary.vehicle_id());
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:<18} {:<8} {:<12} {:<8} {}",
        "Date", "Panel", "Dents", "Aluminum", "Cost"
    );
    for record in summary.records() {
        let _ = writeln!(
            out,
            "{:<18} {:<8} {:<12} {:<8} {}",
            record.formatted_date(),
            record.panel_type().as_str(),
            format!("{} ({})", record.dent_count(), record.dent_size().as_str()),
            aluminum_label(record.is_aluminum()),
            record.cost_result()
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Subtotal: {}", format_currency(totals.subtotal));
    let _ = writeln!(
        out,
        "Tax ({}): {}",
        totals.tax_rate_percent(),
        format_currency(totals.tax)
    );
    let _ = writeln!(out, "Total: {}", format_currency(totals.total));
    out
}

#[cfg(test)]
mod tests {
    use hail_core::calculations::{DEFAULT_TAX_RATE, PanelInput, PricingEngine};
    use hail_core::{DentSize, NewEstimateRecord, PanelType};
    use pretty_assertions::assert_eq;

    use super::*;

    fn summary() -> CustomerSummary {
        let mut summary = CustomerSummary::new("Dana Reyes", "1HGCM82633A004352");
        for (panel, cost, at) in [
            (PanelType::Hood, "$125.00", 1_754_476_200_000),
            (PanelType::Trunk, "CR: Custom Repair Needed", 1_754_476_300_000),
        ] {
            summary.add_record(
                EstimateRecord::create_at(
                    NewEstimateRecord {
                        customer_name: "Dana Reyes".to_string(),
                        vehicle_id: "1HGCM82633A004352".to_string(),
                        panel_type: panel,
                        dent_size: DentSize::Dime,
                        dent_count: 3,
                        is_aluminum: false,
                        cost_result: cost.to_string(),
                    },
                    at,
                )
                .unwrap(),
            );
        }
        summary
    }

    #[test]
    fn empty_history() {
        assert_eq!(render_history(&[]), "No saved estimates.\n");
    }

    #[test]
    fn history_block_lists_newest_first() {
        let text = render_history(&[summary()]);
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "Customer: Dana Reyes");
        assert_eq!(lines[1], "VIN: 1HGCM82633A004352");
        assert_eq!(lines[2], "Total for Customer: $125.00");
        assert!(lines[3].contains("Panel: TRUNK"));
        assert!(lines[3].ends_with("Cost: CR: Custom Repair Needed"));
        assert!(lines[4].contains("Panel: HOOD | Dents: 3 (D) | Aluminum: No | Cost: $125.00"));
    }

    #[test]
    fn invoice_totals_section() {
        let summary = summary();
        let totals = InvoiceTotals::for_summary(&summary, DEFAULT_TAX_RATE);

        let text = render_invoice(&summary, &totals);

        assert!(text.contains("Subtotal: $125.00\n"));
        assert!(text.contains("Tax (8.25%): $10.31\n"));
        assert!(text.ends_with("Total: $135.31\n"));
    }

    #[test]
    fn quote_reports_total_and_unpriced_panels() {
        let engine = PricingEngine::new();
        let quote = VehicleQuote::calculate(
            &engine,
            "Dana Reyes",
            "1HGCM82633A004352",
            &[
                PanelInput {
                    panel_type: PanelType::Hood,
                    dent_size: DentSize::Dime,
                    dent_count: 3,
                    is_aluminum: true,
                },
                PanelInput {
                    panel_type: PanelType::Lq,
                    dent_size: DentSize::HalfDollar,
                    dent_count: 60,
                    is_aluminum: false,
                },
            ],
        )
        .unwrap();

        let text = render_quote(&quote);

        assert!(text.contains("  HOOD     3 x Dime         Aluminum: Yes  $187.50\n"));
        assert!(text.contains("CR: Custom Repair Needed"));
        assert!(text.contains("Total Estimated Cost: $187.50\n"));
        assert!(text.contains("custom repair quote"));
    }
}
