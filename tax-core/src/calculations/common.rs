//! Common utility functions for tax calculations.
//!
//! The engine itself never rounds; these helpers turn exact results into
//! amounts fit for display.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a monetary amount to cents, midpoint away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(10209.615)), dec!(10209.62));
/// assert_eq!(round_half_up(dec!(7529.55)), dec!(7529.55));
/// assert_eq!(round_half_up(dec!(-0.005)), dec!(-0.01));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts a fractional rate to a percentage rounded to two places.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::rate_as_percent;
///
/// assert_eq!(rate_as_percent(dec!(0.205)), dec!(20.50));
/// assert_eq!(rate_as_percent(dec!(0.17739165)), dec!(17.74));
/// ```
pub fn rate_as_percent(rate: Decimal) -> Decimal {
    round_half_up(rate.saturating_mul(Decimal::ONE_HUNDRED))
}
