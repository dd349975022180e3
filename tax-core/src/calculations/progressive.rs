//! Progressive marginal tax engine.
//!
//! Each bracket's rate applies only to the slice of income that falls
//! inside that bracket. Walking the brackets in ascending order, the engine
//! hands every bracket as much of the remaining income as its width allows
//! and records the result as a band.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::TaxBracket;
//! use tax_core::calculations::compute_tax;
//!
//! let brackets = vec![
//!     TaxBracket::new(dec!(0), Some(dec!(50197)), dec!(0.15)),
//!     TaxBracket::new(dec!(50197), Some(dec!(100392)), dec!(0.205)),
//!     TaxBracket::new(dec!(100392), None, dec!(0.26)),
//! ];
//!
//! let result = compute_tax(dec!(100000), &brackets);
//!
//! assert_eq!(result.bands.len(), 2);
//! assert_eq!(result.total, dec!(17739.165));
//! assert_eq!(result.effective_rate, dec!(0.17739165));
//! ```

use rust_decimal::Decimal;

use crate::models::{TaxBandResult, TaxBracket, TaxCalculationResult};

/// Computes the tax owed on `income` under `brackets`.
///
/// Brackets must be ascending by `min` and contiguous; that is not checked
/// here (see [`crate::check_brackets`]). Malformed schedules give wrong
/// numbers, never a panic: arithmetic saturates at [`Decimal::MAX`] and
/// [`Decimal::MIN`]. Nothing is rounded.
///
/// A bracket whose `min` is at or above `income` contributes no band, and
/// an income of zero or less yields [`TaxCalculationResult::zero`].
pub fn compute_tax(
    income: Decimal,
    brackets: &[TaxBracket],
) -> TaxCalculationResult {
    if income <= Decimal::ZERO {
        return TaxCalculationResult::zero();
    }

    let mut total = Decimal::ZERO;
    let mut remaining = income;
    let mut bands = Vec::new();

    for bracket in brackets {
        if income <= bracket.min {
            continue;
        }

        let taxable = match bracket.width() {
            Some(width) => remaining.min(width),
            None => remaining,
        };
        let tax = taxable.saturating_mul(bracket.rate);

        bands.push(TaxBandResult {
            min: bracket.min,
            max: bracket.max,
            rate: bracket.rate,
            taxable,
            tax,
        });

        total = total.saturating_add(tax);
        remaining = remaining.saturating_sub(taxable);
        if remaining <= Decimal::ZERO {
            break;
        }
    }

    TaxCalculationResult {
        total,
        effective_rate: effective_rate(total, income),
        bands,
    }
}

/// `total / income` for a positive income, saturating on overflow.
fn effective_rate(
    total: Decimal,
    income: Decimal,
) -> Decimal {
    total.checked_div(income).unwrap_or(if total.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    })
}
