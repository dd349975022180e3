//! Bracket sources backing the calculator: the remote tax-year service and
//! an offline CSV file.

mod csv_source;
mod http;

pub use csv_source::{BracketFileError, BracketRecord, CsvBracketSource, CsvSourceFactory};
pub use http::{HttpBracketSource, HttpSourceFactory, decode_response};
