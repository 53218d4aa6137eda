//! Synthetic candle series for candlefold benchmarks.

use candlefold_lib::Candle;
use chrono::{DateTime, TimeDelta, TimeZone, Utc};

/// Shape of a generated minute series.
#[derive(Debug, Clone, Copy)]
pub struct SeriesConfig {
    /// Number of candles to generate.
    pub candles: usize,
    /// Skip a minute after every `gap_every` candles. Zero means no gaps.
    pub gap_every: usize,
    /// Every `missing_volume_every`-th candle has no volume. Zero means never.
    pub missing_volume_every: usize,
    /// Timestamp of the first candle.
    pub start: DateTime<Utc>,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            candles: 100_000,
            gap_every: 0,
            missing_volume_every: 0,
            start: Utc
                .with_ymd_and_hms(2024, 1, 15, 3, 45, 0)
                .single()
                .unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        }
    }
}

/// Generate a sorted minute series following a deterministic random walk.
pub fn minute_series(config: &SeriesConfig) -> Vec<Candle> {
    let mut state: u64 = 0x2545_F491_4F6C_DD1D;
    let mut next_unit = move || {
        // xorshift64
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state >> 11) as f64 / (1u64 << 53) as f64
    };

    let mut candles = Vec::with_capacity(config.candles);
    let mut timestamp = config.start;
    let mut price = 100.0;

    for i in 0..config.candles {
        let open = price;
        let close = open * (1.0 + (next_unit() - 0.5) * 0.002);
        let high = open.max(close) * (1.0 + next_unit() * 0.001);
        let low = open.min(close) * (1.0 - next_unit() * 0.001);
        let volume = if config.missing_volume_every > 0 && i % config.missing_volume_every == 0 {
            None
        } else {
            Some((next_unit() * 1000.0).round())
        };

        candles.push(Candle::new(timestamp, open, high, low, close, volume));

        price = close;
        timestamp += TimeDelta::minutes(1);
        if config.gap_every > 0 && (i + 1) % config.gap_every == 0 {
            timestamp += TimeDelta::minutes(1);
        }
    }

    candles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_is_sorted_and_consistent() {
        let config = SeriesConfig {
            candles: 500,
            gap_every: 7,
            missing_volume_every: 11,
            ..SeriesConfig::default()
        };
        let candles = minute_series(&config);

        assert_eq!(candles.len(), 500);
        assert!(candles.windows(2).all(|pair| pair[0].timestamp < pair[1].timestamp));
        assert!(candles.iter().all(|c| c.low <= c.open.min(c.close)));
        assert!(candles.iter().all(|c| c.high >= c.open.max(c.close)));
        assert_eq!(candles.iter().filter(|c| c.volume.is_none()).count(), 46);
    }
}
