use rust_decimal::Decimal;

use crate::calculations::common::format_currency;

/// Display text for a cell that needs a manual quote.
pub const CUSTOM_REPAIR_TEXT: &str = "CR: Custom Repair Needed";

/// Prefix of every diagnostic cost string.
pub const NOT_APPLICABLE_PREFIX: &str = "N/A";

/// The three shapes a cost result can take.
///
/// Records persist the [`Display`](std::fmt::Display) form; [`CostOutcome::parse`]
/// recovers the variant from stored text so totals can skip anything that is
/// not a dollar amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CostOutcome {
    /// A dollar amount, already rounded to cents.
    Priced(Decimal),
    /// Requires a manual quote.
    CustomRepair,
    /// Inputs could not be priced. Holds the reason without the `N/A: ` prefix.
    NotApplicable(String),
}

impl CostOutcome {
    /// Classifies stored cost text.
    ///
    /// Anything that is neither a `$` amount nor a `CR` sentinel is treated as
    /// not applicable, including the bare `"N/A"` placeholder.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();

        if text.starts_with("CR") {
            return Self::CustomRepair;
        }

        if let Some(amount) = text.strip_prefix('$') {
            if let Ok(value) = amount.trim().replace(',', "").parse::<Decimal>() {
                return Self::Priced(value);
            }
        }

        let reason = text
            .strip_prefix(NOT_APPLICABLE_PREFIX)
            .map(|rest| rest.trim_start_matches(':').trim())
            .unwrap_or(text);
        Self::NotApplicable(reason.to_string())
    }

    /// The dollar amount, if this outcome counts toward a total.
    pub fn amount(&self) -> Option<Decimal> {
        match self {
            Self::Priced(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_priced(&self) -> bool {
        matches!(self, Self::Priced(_))
    }
}

impl std::fmt::Display for CostOutcome {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::Priced(value) => f.write_str(&format_currency(*value)),
            Self::CustomRepair => f.write_str(CUSTOM_REPAIR_TEXT),
            Self::NotApplicable(reason) if reason.is_empty() => f.write_str(NOT_APPLICABLE_PREFIX),
            Self::NotApplicable(reason) => write!(f, "{NOT_APPLICABLE_PREFIX}: {reason}"),
        }
    }
}
