//! CSV Data Loader Module
//! Parses crime statistics CSV text into an ordered dataset of records.

use std::num::ParseIntError;

use csv::{ReaderBuilder, StringRecord, Trim};
use thiserror::Error;
use tracing::debug;

use super::record::{CrimeRecord, Dataset, FIELD_COUNT};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("malformed row on line {line}: expected 11 fields, found {found}")]
    FieldCount { line: u64, found: usize },
    #[error("malformed row on line {line}: cannot parse '{token}' as an integer")]
    InvalidInteger {
        line: u64,
        token: String,
        #[source]
        source: ParseIntError,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Loads crime statistics from CSV text.
///
/// The first line is a header and is never parsed. Every following non-blank
/// line must hold exactly [`FIELD_COUNT`] integers; a single bad row fails the
/// whole load.
pub struct DataLoader {
    builder: ReaderBuilder,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        let mut builder = ReaderBuilder::new();
        builder.has_headers(false).flexible(true).trim(Trim::All);
        Self { builder }
    }

    /// Parse a whole CSV document into a dataset.
    pub fn load_str(&self, text: &str) -> Result<Dataset, LoaderError> {
        // The header is cut off by hand so a blank or oddly quoted first line
        // is still consumed as the header.
        let body = text.split_once('\n').map_or("", |(_, rest)| rest);

        let mut reader = self.builder.from_reader(body.as_bytes());
        let mut dataset = Dataset::new();
        for result in reader.records() {
            let record = result?;
            if is_blank(&record) {
                continue;
            }
            // +1 for the header line removed above.
            let line = record.position().map_or(0, |p| p.line()) + 1;
            dataset.push(parse_record(&record, line)?);
        }

        debug!(records = dataset.len(), "dataset loaded");
        Ok(dataset)
    }
}

/// A whitespace-only line trims down to a single empty field.
fn is_blank(record: &StringRecord) -> bool {
    record.len() == 1 && record[0].is_empty()
}

/// Parse one data record. `line` is 1-based and only used for errors.
fn parse_record(record: &StringRecord, line: u64) -> Result<CrimeRecord, LoaderError> {
    if record.len() != FIELD_COUNT {
        return Err(LoaderError::FieldCount {
            line,
            found: record.len(),
        });
    }

    let mut fields = [0i64; FIELD_COUNT];
    for (slot, token) in fields.iter_mut().zip(record.iter()) {
        *slot = token
            .parse::<i64>()
            .map_err(|source| LoaderError::InvalidInteger {
                line,
                token: token.to_string(),
                source,
            })?;
    }

    Ok(CrimeRecord::from_fields(fields))
}
