//! OHLCV candle resampling for candlefold.
//!
//! This crate converts fine-grained candles into coarser buckets:
//!
//! - [`resample`] / [`resample_with`] - Batch bucket-and-fold over a slice
//! - [`CandleResampler`] - Streaming resampler
//! - [`base_granularity`] - Smallest spacing in an input sequence

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/candlefold/candlefold/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod granularity;
mod resampler;

pub use granularity::base_granularity;
pub use resampler::{CandleResampler, resample, resample_with};
