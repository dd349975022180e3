//! Observable state of the calculator.
//!
//! The presentation layer never mutates this; it subscribes to the
//! [`crate::TaxCalculator`] and renders whichever variant is current.

use tax_core::TaxCalculationResult;

/// Where the most recent calculation stands.
///
/// Exactly one of "in flight", "failed", or "succeeded" holds at a time, so
/// a result and an error can never be shown together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CalculatorState {
    /// Nothing has been asked yet.
    #[default]
    Idle,
    /// A validate → fetch → compute cycle is in flight.
    Loading,
    Succeeded(TaxCalculationResult),
    /// The single user-facing message for the failed attempt.
    Failed(String),
}

impl CalculatorState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&TaxCalculationResult> {
        match self {
            Self::Succeeded(result) => Some(result),
            _ => None,
        }
    }
}
