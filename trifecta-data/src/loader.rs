use std::fs::File;
use std::io::Read;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use trifecta_core::{TaxBracket, TaxRateTable, TaxRateTableError};

/// Errors that can occur when loading tax bracket data.
#[derive(Debug, Error)]
pub enum TaxBracketLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Invalid bracket table: {0}")]
    InvalidTable(#[from] TaxRateTableError),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<csv::Error> for TaxBracketLoaderError {
    fn from(err: csv::Error) -> Self {
        TaxBracketLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from the tax brackets CSV file.
///
/// - `min_income`: lower bound of the bracket
/// - `max_income`: upper bound of the bracket (empty for unlimited)
/// - `rate`: marginal rate as a decimal (e.g., 0.10 for 10%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TaxBracketRecord {
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
}

impl From<TaxBracketRecord> for TaxBracket {
    fn from(record: TaxBracketRecord) -> Self {
        TaxBracket::new(record.min_income, record.max_income, record.rate)
    }
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

/// Loader for federal bracket schedules stored as CSV.
pub struct TaxBracketLoader;

impl TaxBracketLoader {
    /// Parse bracket records from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file or
    /// a byte slice. Rows are returned in file order and are not validated
    /// as a schedule; see [`TaxBracketLoader::into_table`].
    pub fn parse<R: Read>(reader: R) -> Result<Vec<TaxBracketRecord>, TaxBracketLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: TaxBracketRecord = result?;
            records.push(record);
        }

        debug!(count = records.len(), "parsed bracket records");
        Ok(records)
    }

    /// Turn parsed records into a validated [`TaxRateTable`].
    pub fn into_table(
        records: Vec<TaxBracketRecord>
    ) -> Result<TaxRateTable, TaxBracketLoaderError> {
        let brackets = records.into_iter().map(TaxBracket::from).collect();
        Ok(TaxRateTable::new(brackets)?)
    }

    /// Parse and validate a schedule in one step.
    pub fn load<R: Read>(reader: R) -> Result<TaxRateTable, TaxBracketLoaderError> {
        Self::into_table(Self::parse(reader)?)
    }

    pub fn load_from_path(path: &Path) -> Result<TaxRateTable, TaxBracketLoaderError> {
        let file = File::open(path).map_err(|source| TaxBracketLoaderError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::load(file)
    }
}
