//! Base granularity detection.

use candlefold_types::Candle;
use chrono::TimeDelta;

/// Returns the smallest positive spacing between consecutive candles.
///
/// This is the input's base granularity. Returns `None` when the slice has
/// fewer than two distinct timestamps.
#[must_use]
pub fn base_granularity(candles: &[Candle]) -> Option<TimeDelta> {
    candles
        .windows(2)
        .map(|pair| pair[1].timestamp - pair[0].timestamp)
        .filter(|gap| *gap > TimeDelta::zero())
        .min()
}
