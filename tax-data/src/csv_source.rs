//! Offline bracket source backed by a CSV file.
//!
//! ## CSV Format
//!
//! | Column     | Required | Type    | Notes                              |
//! |------------|----------|---------|------------------------------------|
//! | `tax_year` | yes      | integer | e.g. `2022`                        |
//! | `min`      | yes      | decimal | lower bound of the bracket         |
//! | `max`      | yes      | decimal | leave empty for the top bracket    |
//! | `rate`     | yes      | decimal | marginal rate, e.g. `0.205`        |
//!
//! ```csv
//! tax_year,min,max,rate
//! 2022,0,50197,0.15
//! 2022,50197,,0.205
//! ```
//!
//! Rows may appear in any order; each year's rows are sorted by `min` and
//! must form a contiguous schedule.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::source::{BracketSourceFactory, SourceConfig};
use tax_core::{BracketError, BracketSource, SourceError, TaxBracket, check_brackets};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur when loading a bracket file.
#[derive(Debug, Error)]
pub enum BracketFileError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("brackets for {tax_year} are invalid: {source}")]
    Schedule {
        tax_year: i32,
        #[source]
        source: BracketError,
    },
}

impl From<csv::Error> for BracketFileError {
    fn from(err: csv::Error) -> Self {
        BracketFileError::CsvParse(err.to_string())
    }
}

impl From<BracketFileError> for SourceError {
    fn from(err: BracketFileError) -> Self {
        SourceError::Configuration(err.to_string())
    }
}

/// A single row of the bracket file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub tax_year: i32,
    pub min: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max: Option<Decimal>,
    pub rate: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Bracket schedules for every year found in a CSV file.
#[derive(Debug, Clone)]
pub struct CsvBracketSource {
    origin: String,
    schedules: BTreeMap<i32, Vec<TaxBracket>>,
}

impl CsvBracketSource {
    /// Parse bracket rows from any reader.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketRecord>, BracketFileError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Group rows by year, order each year by `min`, and check every
    /// schedule.
    pub fn from_records(
        origin: impl Into<String>,
        records: Vec<BracketRecord>,
    ) -> Result<Self, BracketFileError> {
        let mut schedules: BTreeMap<i32, Vec<TaxBracket>> = BTreeMap::new();
        for record in records {
            schedules
                .entry(record.tax_year)
                .or_default()
                .push(TaxBracket::new(record.min, record.max, record.rate));
        }

        for (tax_year, brackets) in &mut schedules {
            brackets.sort_by(|a, b| a.min.cmp(&b.min));
            check_brackets(brackets).map_err(|source| BracketFileError::Schedule {
                tax_year: *tax_year,
                source,
            })?;
        }

        Ok(Self {
            origin: origin.into(),
            schedules,
        })
    }

    /// Read and check the file at `path`.
    pub async fn open(path: &Path) -> Result<Self, BracketFileError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| BracketFileError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let records = Self::parse(bytes.as_slice())?;
        let source = Self::from_records(path.display().to_string(), records)?;

        info!(path = %path.display(), years = ?source.years(), "loaded bracket file");
        Ok(source)
    }

    /// Years with a schedule, ascending.
    pub fn years(&self) -> Vec<i32> {
        self.schedules.keys().copied().collect()
    }
}

#[async_trait]
impl BracketSource for CsvBracketSource {
    fn describe(&self) -> String {
        format!("csv {}", self.origin)
    }

    async fn get_tax_brackets(&self, tax_year: i32) -> Result<Vec<TaxBracket>, SourceError> {
        match self.schedules.get(&tax_year) {
            Some(brackets) => {
                debug!(tax_year, count = brackets.len(), "serving brackets from file");
                Ok(brackets.clone())
            }
            None => {
                warn!(tax_year, origin = %self.origin, "no brackets for year");
                Err(SourceError::Rejected(format!("Unsupported year: {tax_year}")))
            }
        }
    }
}

/// Registers the `csv` backend; `location` is the file path.
pub struct CsvSourceFactory;

#[async_trait]
impl BracketSourceFactory for CsvSourceFactory {
    fn backend_name(&self) -> &'static str {
        "csv"
    }

    async fn create(&self, config: &SourceConfig) -> Result<Box<dyn BracketSource>, SourceError> {
        let source = CsvBracketSource::open(Path::new(&config.location)).await?;
        Ok(Box::new(source))
    }
}
