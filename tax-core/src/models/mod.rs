mod tax_bracket;
mod tax_calculation;
mod tax_year;

pub use tax_bracket::{BracketError, TaxBracket, check_brackets};
pub use tax_calculation::{TaxBandResult, TaxCalculationResult};
pub use tax_year::{SUPPORTED_YEARS, describe_years};
