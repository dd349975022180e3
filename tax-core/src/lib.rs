//! Progressive tax computation core.
//!
//! [`validation`] gates raw input, [`calculations::compute_tax`] turns an
//! income and a bracket schedule into a [`TaxCalculationResult`], and
//! [`source`] defines where schedules come from.

pub mod calculations;
pub mod models;
pub mod source;
pub mod validation;

pub use calculations::compute_tax;
pub use models::*;
pub use source::{BracketSource, SourceError};
pub use validation::{ValidationError, validate_income, validate_year, validate_year_in};
