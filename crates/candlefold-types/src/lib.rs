//! Core types for the candlefold OHLCV resampler.
//!
//! This crate provides the fundamental data structures used throughout candlefold:
//!
//! - [`Candle`] - One OHLCV interval keyed by its start instant
//! - [`Timeframe`] - Validated output bucket width in minutes
//! - [`Anchor`] - Placement of bucket boundaries
//! - [`ResampleOptions`] - Anchor plus daily re-anchoring switch
//! - [`ResampleError`] - Resampler contract violations

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/candlefold/candlefold/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod anchor;
mod candle;
mod error;
mod time;
mod timeframe;

pub use anchor::{Anchor, AnchorParseError, ResampleOptions};
pub use candle::Candle;
pub use error::{CandlefoldError, ResampleError, Result};
pub use time::{parse_timestamp, truncate_to_minute};
pub use timeframe::{Timeframe, TimeframeParseError};
