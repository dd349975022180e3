use async_trait::async_trait;
use thiserror::Error;

use crate::models::{BracketError, TaxBracket};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SourceError {
    /// The source refused the request and explained why; shown verbatim.
    #[error("{0}")]
    Rejected(String),

    /// The source failed with a status code and no usable explanation.
    #[error("Failed to fetch tax brackets.")]
    Status(u16),

    #[error("{0}")]
    Transport(String),

    #[error("Invalid tax bracket data: {0}")]
    Malformed(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<BracketError> for SourceError {
    fn from(err: BracketError) -> Self {
        SourceError::Malformed(err.to_string())
    }
}

/// Supplies the bracket schedule for a tax year.
///
/// Implementations return brackets ascending by `min`; the trusted ones
/// run [`crate::check_brackets`] before returning.
#[async_trait]
pub trait BracketSource: Send + Sync {
    /// Short label for logs, e.g. the backend name and location.
    fn describe(&self) -> String;

    async fn get_tax_brackets(&self, tax_year: i32) -> Result<Vec<TaxBracket>, SourceError>;
}
