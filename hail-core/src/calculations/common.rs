//! Money helpers shared by the pricing engine, quotes and invoices.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 round away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use hail_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount as `$` followed by exactly two decimals.
///
/// No thousands separator and no locale handling.
///
/// ```
/// use rust_decimal_macros::dec;
/// use hail_core::calculations::common::format_currency;
///
/// assert_eq!(format_currency(dec!(187.5)), "$187.50");
/// assert_eq!(format_currency(dec!(1500)), "$1500.00");
/// ```
pub fn format_currency(value: Decimal) -> String {
    format!("${:.2}", round_half_up(value))
}
