//! Error types for candlefold.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::TimeframeParseError;

/// Result type alias for candlefold operations.
pub type Result<T> = std::result::Result<T, CandlefoldError>;

/// Errors raised by the resampler.
///
/// Both kinds are detected before any output is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResampleError {
    /// The timeframe is zero, negative, or too large.
    #[error("Invalid timeframe: {minutes} minutes (expected a positive integer)")]
    InvalidTimeframe {
        /// The rejected minute count.
        minutes: i64,
    },

    /// A candle is timestamped earlier than the one before it.
    #[error("Unsorted input at index {index}: {current} precedes {previous}")]
    UnsortedInput {
        /// Position of the offending candle.
        index: usize,
        /// Timestamp of the preceding candle.
        previous: DateTime<Utc>,
        /// Timestamp of the offending candle.
        current: DateTime<Utc>,
    },
}

/// Errors that can occur while sourcing, resampling, or writing candles.
#[derive(Error, Debug)]
pub enum CandlefoldError {
    /// Resampling failed.
    #[error(transparent)]
    Resample(#[from] ResampleError),

    /// Timeframe text could not be parsed.
    #[error(transparent)]
    Timeframe(#[from] TimeframeParseError),

    /// The source has no candles for this instrument.
    #[error("Unknown instrument: {0}")]
    UnknownInstrument(String),

    /// Invalid input data.
    #[error("Parse error: {0}")]
    Parse(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Output format error.
    #[error("Format error: {0}")]
    Format(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
