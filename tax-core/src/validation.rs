//! Validation of raw calculator input.
//!
//! Input arrives untyped (a form field, a CLI argument, a JSON body), so
//! both validators take a [`serde_json::Value`] and hand back the parsed
//! value on success. The `Display` text of [`ValidationError`] is the
//! message shown to the user.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;
use thiserror::Error;

use crate::models::{SUPPORTED_YEARS, describe_years};

/// Rejection of a raw income or year value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Income must be a number.")]
    IncomeNotANumber,

    #[error("Income must be zero or greater.")]
    IncomeNegative,

    /// Finite, but past what [`Decimal`] can hold (about 7.9e28).
    #[error("Income is too large.")]
    IncomeTooLarge,

    #[error("Year must be a number or string.")]
    YearNotNumberOrString,

    #[error("Year must be {}.", describe_years(.supported))]
    UnsupportedYear { supported: Vec<i32> },
}

/// Accepts a finite, non-negative number or numeric string.
///
/// Strings are trimmed and may use `,` as a thousands separator. Values
/// too small for [`Decimal`] to resolve read as zero.
pub fn validate_income(raw: &Value) -> Result<Decimal, ValidationError> {
    let income = match raw {
        Value::Number(number) => parse_income_text(&number.to_string()),
        Value::String(text) => parse_income_text(text),
        _ => Err(ValidationError::IncomeNotANumber),
    }?;

    if income < Decimal::ZERO {
        return Err(ValidationError::IncomeNegative);
    }
    Ok(income)
}

/// Accepts one of [`SUPPORTED_YEARS`], given as a number or numeric string.
pub fn validate_year(raw: &Value) -> Result<i32, ValidationError> {
    validate_year_in(raw, &SUPPORTED_YEARS)
}

/// Accepts one of `supported`, given as a number or numeric string.
pub fn validate_year_in(
    raw: &Value,
    supported: &[i32],
) -> Result<i32, ValidationError> {
    let coerced = match raw {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => return Err(ValidationError::YearNotNumberOrString),
    };

    coerced
        .and_then(|year| {
            supported
                .iter()
                .copied()
                .find(|candidate| f64::from(*candidate) == year)
        })
        .ok_or_else(|| ValidationError::UnsupportedYear {
            supported: supported.to_vec(),
        })
}

/// Validates both inputs, income first, stopping at the first failure.
pub fn validate_inputs(
    income: &Value,
    year: &Value,
    supported: &[i32],
) -> Result<(Decimal, i32), ValidationError> {
    let income = validate_income(income)?;
    let year = validate_year_in(year, supported)?;
    Ok((income, year))
}

fn parse_income_text(text: &str) -> Result<Decimal, ValidationError> {
    let normalized = text.trim().replace(',', "");
    if normalized.is_empty() {
        return Err(ValidationError::IncomeNotANumber);
    }
    if let Ok(income) =
        Decimal::from_str(&normalized).or_else(|_| Decimal::from_scientific(&normalized))
    {
        return Ok(income);
    }

    // Numeric text Decimal cannot hold: sort out why by magnitude.
    match normalized.parse::<f64>() {
        Ok(value) if !value.is_finite() => Err(ValidationError::IncomeNotANumber),
        Ok(value) if value < 0.0 => Err(ValidationError::IncomeNegative),
        Ok(value) if value >= 1.0 => Err(ValidationError::IncomeTooLarge),
        Ok(_) => Ok(Decimal::ZERO),
        Err(_) => Err(ValidationError::IncomeNotANumber),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use serde_json::json;

    use super::*;

    // =========================================================================
    // validate_income
    // =========================================================================

    #[test]
    fn income_rejects_non_numeric_string() {
        let err = validate_income(&json!("abc")).unwrap_err();

        assert_eq!(err, ValidationError::IncomeNotANumber);
        assert_eq!(err.to_string(), "Income must be a number.");
    }

    #[test]
    fn income_rejects_negative_number() {
        let err = validate_income(&json!(-1)).unwrap_err();

        assert_eq!(err, ValidationError::IncomeNegative);
        assert_eq!(err.to_string(), "Income must be zero or greater.");
    }

    #[test]
    fn income_accepts_positive_number() {
        assert_eq!(validate_income(&json!(1000)), Ok(dec!(1000)));
    }

    #[test]
    fn income_accepts_zero() {
        assert_eq!(validate_income(&json!(0)), Ok(Decimal::ZERO));
    }

    #[test]
    fn income_accepts_fractional_number() {
        assert_eq!(validate_income(&json!(1234.56)), Ok(dec!(1234.56)));
    }

    #[test]
    fn income_accepts_numeric_string_with_separators() {
        assert_eq!(validate_income(&json!(" 85,000.50 ")), Ok(dec!(85000.50)));
    }

    #[test]
    fn income_accepts_scientific_notation() {
        assert_eq!(validate_income(&json!("1.5e4")), Ok(dec!(15000)));
    }

    #[test]
    fn income_rejects_negative_string() {
        assert_eq!(
            validate_income(&json!("-250")),
            Err(ValidationError::IncomeNegative)
        );
    }

    #[test]
    fn income_rejects_empty_string() {
        assert_eq!(
            validate_income(&json!("   ")),
            Err(ValidationError::IncomeNotANumber)
        );
    }

    #[test]
    fn income_rejects_nan_text() {
        assert_eq!(
            validate_income(&json!("NaN")),
            Err(ValidationError::IncomeNotANumber)
        );
    }

    #[test]
    fn income_beyond_decimal_range_is_too_large() {
        for raw in [json!(1e30), json!("1e30"), json!("100,000,000,000,000,000,000,000,000,000")] {
            let err = validate_income(&raw).unwrap_err();

            assert_eq!(err, ValidationError::IncomeTooLarge, "{raw}");
            assert_eq!(err.to_string(), "Income is too large.");
        }
    }

    #[test]
    fn income_beyond_decimal_range_below_zero_is_negative() {
        assert_eq!(
            validate_income(&json!(-1e30)),
            Err(ValidationError::IncomeNegative)
        );
    }

    #[test]
    fn income_at_decimal_max_is_accepted() {
        let raw = json!(Decimal::MAX.to_string());

        assert_eq!(validate_income(&raw), Ok(Decimal::MAX));
    }

    #[test]
    fn income_rejects_infinity_text() {
        assert_eq!(
            validate_income(&json!("inf")),
            Err(ValidationError::IncomeNotANumber)
        );
    }

    #[test]
    fn income_rejects_non_scalar_values() {
        for raw in [json!(null), json!(true), json!([1]), json!({"income": 1})] {
            assert_eq!(
                validate_income(&raw),
                Err(ValidationError::IncomeNotANumber),
                "{raw}"
            );
        }
    }

    // =========================================================================
    // validate_year
    // =========================================================================

    #[test]
    fn year_rejects_unsupported_year_naming_the_set() {
        let err = validate_year(&json!(2018)).unwrap_err();

        assert_eq!(err.to_string(), "Year must be 2019, 2020, 2021, or 2022.");
    }

    #[test]
    fn year_accepts_supported_number() {
        assert_eq!(validate_year(&json!(2022)), Ok(2022));
    }

    #[test]
    fn year_accepts_supported_string() {
        assert_eq!(validate_year(&json!("2022")), Ok(2022));
    }

    #[test]
    fn year_accepts_padded_string_and_whole_float() {
        assert_eq!(validate_year(&json!(" 2019 ")), Ok(2019));
        assert_eq!(validate_year(&json!(2021.0)), Ok(2021));
    }

    #[test]
    fn year_rejects_fractional_year() {
        assert!(matches!(
            validate_year(&json!(2021.5)),
            Err(ValidationError::UnsupportedYear { .. })
        ));
    }

    #[test]
    fn year_rejects_unparseable_string() {
        assert!(matches!(
            validate_year(&json!("next year")),
            Err(ValidationError::UnsupportedYear { .. })
        ));
    }

    #[test]
    fn year_rejects_non_number_non_string() {
        let err = validate_year(&json!(null)).unwrap_err();

        assert_eq!(err, ValidationError::YearNotNumberOrString);
        assert_eq!(err.to_string(), "Year must be a number or string.");
        assert_eq!(
            validate_year(&json!(true)),
            Err(ValidationError::YearNotNumberOrString)
        );
    }

    #[test]
    fn year_checks_against_configured_set() {
        assert_eq!(validate_year_in(&json!(2023), &[2022, 2023]), Ok(2023));

        let err = validate_year_in(&json!(2019), &[2022, 2023]).unwrap_err();
        assert_eq!(err.to_string(), "Year must be 2022 or 2023.");
    }

    // =========================================================================
    // validate_inputs
    // =========================================================================

    #[test]
    fn inputs_report_income_error_first() {
        let err = validate_inputs(&json!(-5), &json!(1999), &SUPPORTED_YEARS).unwrap_err();

        assert_eq!(err, ValidationError::IncomeNegative);
    }

    #[test]
    fn inputs_return_parsed_values() {
        assert_eq!(
            validate_inputs(&json!("100000"), &json!(2022), &SUPPORTED_YEARS),
            Ok((dec!(100000), 2022))
        );
    }
}
