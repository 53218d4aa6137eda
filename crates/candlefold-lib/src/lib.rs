//! OHLCV candle resampling library.
//!
//! This is a facade crate that re-exports functionality from the candlefold
//! workspace crates, and adds the candle source and service layer.
//!
//! # Quick Start
//!
//! ```
//! use candlefold_lib::prelude::*;
//! use chrono::{TimeDelta, TimeZone, Utc};
//!
//! let start = Utc.with_ymd_and_hms(2024, 1, 15, 9, 15, 0).unwrap();
//! let minutes: Vec<Candle> = (0..10)
//!     .map(|i| Candle::new(start + TimeDelta::minutes(i), 1.0, 2.0, 0.5, 1.5, Some(10.0)))
//!     .collect();
//!
//! let source = MemorySource::new().with_series("nifty", minutes);
//! let service = CandleService::new(source);
//!
//! let five_minute = service.get_candles("nifty", Some(5))?;
//! assert_eq!(five_minute.len(), 2);
//! assert_eq!(five_minute[0].volume, Some(50.0));
//! # Ok::<(), CandlefoldError>(())
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/candlefold/candlefold/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod source;

#[cfg(feature = "aggregate")]
mod service;

// Re-export core types
pub use candlefold_types::*;

pub use source::{CandleSource, MemorySource};

#[cfg(feature = "format")]
pub use source::FileSource;

#[cfg(feature = "aggregate")]
pub use service::CandleService;

// Re-export resampling
#[cfg(feature = "aggregate")]
pub use candlefold_aggregate::{CandleResampler, base_granularity, resample, resample_with};

// Re-export readers and formatters
#[cfg(feature = "format")]
pub use candlefold_format::{
    CandleReader, CsvFormatter, FormatError, Formatter, InputFormat, JsonFormatter, JsonStyle,
    OutputFormat,
};

#[cfg(all(feature = "format", feature = "parquet"))]
pub use candlefold_format::ParquetFormatter;

/// Prelude module for convenient imports.
///
/// ```
/// use candlefold_lib::prelude::*;
/// ```
pub mod prelude {
    pub use candlefold_types::{
        Anchor, Candle, CandlefoldError, ResampleError, ResampleOptions, Result, Timeframe,
    };

    pub use crate::{CandleSource, MemorySource};

    #[cfg(feature = "format")]
    pub use crate::FileSource;

    #[cfg(feature = "aggregate")]
    pub use crate::CandleService;

    #[cfg(feature = "aggregate")]
    pub use candlefold_aggregate::{CandleResampler, resample, resample_with};

    #[cfg(feature = "format")]
    pub use candlefold_format::{
        CandleReader, CsvFormatter, Formatter, InputFormat, JsonFormatter, OutputFormat,
    };

    #[cfg(all(feature = "format", feature = "parquet"))]
    pub use candlefold_format::ParquetFormatter;
}
