//! Candle readers and output formatters for candlefold.
//!
//! This crate moves candle sequences in and out of files:
//!
//! - [`CandleReader`] - CSV, JSON, or NDJSON input
//! - [`CsvFormatter`] - CSV output
//! - [`JsonFormatter`] - JSON array, NDJSON, or `{"msg", "data"}` envelope output
//! - [`ParquetFormatter`] - Apache Parquet columnar output

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/candlefold/candlefold/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod formatter;
mod json;
mod reader;

#[cfg(feature = "parquet")]
mod parquet;

pub use crate::csv::CsvFormatter;
pub use formatter::{FormatError, Formatter, OutputFormat};
pub use json::{JsonFormatter, JsonStyle};
pub use reader::{CandleReader, InputFormat};

#[cfg(feature = "parquet")]
pub use crate::parquet::ParquetFormatter;
