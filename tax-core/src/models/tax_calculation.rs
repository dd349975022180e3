use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The part of a single bracket that was actually taxed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBandResult {
    pub min: Decimal,
    /// `None` when the source bracket was open-ended.
    pub max: Option<Decimal>,
    pub rate: Decimal,
    /// Income that fell inside this band.
    pub taxable: Decimal,
    /// `taxable * rate`, unrounded.
    pub tax: Decimal,
}

/// Outcome of running an income through a bracket schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxCalculationResult {
    pub total: Decimal,
    /// `total / income`, or zero when there was no positive income.
    pub effective_rate: Decimal,
    pub bands: Vec<TaxBandResult>,
}

impl TaxCalculationResult {
    /// The result for an income with nothing to tax.
    pub fn zero() -> Self {
        Self {
            total: Decimal::ZERO,
            effective_rate: Decimal::ZERO,
            bands: Vec::new(),
        }
    }

    /// Sum of the taxable amounts across all bands, saturating.
    pub fn taxed_income(&self) -> Decimal {
        self.bands
            .iter()
            .fold(Decimal::ZERO, |sum, band| sum.saturating_add(band.taxable))
    }
}
