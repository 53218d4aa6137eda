//! Candle input parsing.

use candlefold_types::Candle;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::debug;

use crate::FormatError;

/// Input format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputFormat {
    /// CSV with a `date,open,high,low,close,volume` header.
    #[default]
    Csv,
    /// JSON array, bare or wrapped as `{"data": [...]}`.
    Json,
    /// One JSON candle per line.
    Ndjson,
}

impl InputFormat {
    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Ndjson => "ndjson",
        }
    }

    /// Infers the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()?.to_str()?.parse().ok()
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl std::str::FromStr for InputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" | "txt" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "ndjson" | "jsonl" => Ok(Self::Ndjson),
            _ => Err(FormatError::UnknownFormat(s.to_string())),
        }
    }
}

/// The shapes a JSON candle document may take.
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonDocument {
    Bare(Vec<Candle>),
    Envelope { data: Vec<Candle> },
}

/// Reads candle sequences from CSV, JSON, or NDJSON.
///
/// Candles are returned in file order; nothing is sorted or validated
/// beyond field decoding.
#[derive(Debug, Clone, Copy)]
pub struct CandleReader {
    format: InputFormat,
    delimiter: u8,
}

impl CandleReader {
    /// Creates a reader for the given format.
    #[must_use]
    pub const fn new(format: InputFormat) -> Self {
        Self {
            format,
            delimiter: b',',
        }
    }

    /// Sets the CSV field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Returns the input format.
    #[must_use]
    pub const fn format(&self) -> InputFormat {
        self.format
    }

    /// Reads all candles from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or a record is invalid.
    pub fn read_path(&self, path: &Path) -> Result<Vec<Candle>, FormatError> {
        let file = File::open(path)?;
        let candles = self.read(BufReader::new(file))?;
        debug!(path = %path.display(), count = candles.len(), format = %self.format, "read candles");
        Ok(candles)
    }

    /// Reads all candles from a reader.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or a record is invalid.
    pub fn read<R: Read>(&self, reader: R) -> Result<Vec<Candle>, FormatError> {
        match self.format {
            InputFormat::Csv => self.read_csv(reader),
            InputFormat::Json => {
                let document: JsonDocument = serde_json::from_reader(reader)?;
                Ok(match document {
                    JsonDocument::Bare(candles) | JsonDocument::Envelope { data: candles } => {
                        candles
                    }
                })
            }
            InputFormat::Ndjson => read_ndjson(BufReader::new(reader)),
        }
    }

    #[cfg(feature = "csv")]
    fn read_csv<R: Read>(&self, reader: R) -> Result<Vec<Candle>, FormatError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let candles = csv_reader.deserialize().collect::<Result<Vec<Candle>, _>>()?;
        Ok(candles)
    }

    #[cfg(not(feature = "csv"))]
    fn read_csv<R: Read>(&self, _reader: R) -> Result<Vec<Candle>, FormatError> {
        Err(FormatError::UnknownFormat(
            "csv (support not compiled in)".to_string(),
        ))
    }
}

fn read_ndjson<R: BufRead>(reader: R) -> Result<Vec<Candle>, FormatError> {
    let mut candles = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let candle = serde_json::from_str(&line).map_err(|e| FormatError::InvalidRecord {
            line: index + 1,
            message: e.to_string(),
        })?;
        candles.push(candle);
    }
    Ok(candles)
}
