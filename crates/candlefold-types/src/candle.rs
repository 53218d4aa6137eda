//! OHLCV candle data structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::time::deserialize_timestamp;

/// Price action over one fixed time interval.
///
/// Serializes as `{open, high, low, close, volume, date}`, where `date` is
/// the interval's start instant. Price invariants such as `high >= low` are
/// not checked here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Opening price.
    pub open: f64,
    /// Highest price during the interval.
    pub high: f64,
    /// Lowest price during the interval.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Traded quantity, if the source reported one.
    #[serde(default)]
    pub volume: Option<f64>,
    /// Interval start (UTC).
    #[serde(
        rename = "date",
        alias = "timestamp",
        deserialize_with = "deserialize_timestamp"
    )]
    pub timestamp: DateTime<Utc>,
}

impl Candle {
    /// Creates a new candle.
    #[must_use]
    pub const fn new(
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: Option<f64>,
    ) -> Self {
        Self {
            open,
            high,
            low,
            close,
            volume,
            timestamp,
        }
    }

    /// Returns the volume, treating a missing value as zero.
    #[must_use]
    pub fn volume_or_zero(&self) -> f64 {
        self.volume.unwrap_or(0.0)
    }

    /// Returns the price range (high - low).
    #[must_use]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Returns the body size (|close - open|).
    #[must_use]
    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    /// Returns true if the candle closed above its open.
    #[must_use]
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Returns true if the candle closed below its open.
    #[must_use]
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    /// Returns the typical price ((high + low + close) / 3).
    #[must_use]
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::TimeZone;

    fn create_test_candle() -> Candle {
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 15, 9, 15, 0).unwrap();
        Candle::new(timestamp, 100.0, 105.0, 98.0, 102.0, Some(1500.0))
    }

    #[test]
    fn test_range_and_body() {
        let candle = create_test_candle();
        assert_relative_eq!(candle.range(), 7.0);
        assert_relative_eq!(candle.body(), 2.0);
        assert_relative_eq!(candle.typical_price(), (105.0 + 98.0 + 102.0) / 3.0);
    }

    #[test]
    fn test_direction() {
        let candle = create_test_candle();
        assert!(candle.is_bullish());
        assert!(!candle.is_bearish());

        let flipped = Candle {
            close: 99.0,
            ..candle
        };
        assert!(flipped.is_bearish());
    }

    #[test]
    fn test_volume_or_zero() {
        let candle = Candle {
            volume: None,
            ..create_test_candle()
        };
        assert_relative_eq!(candle.volume_or_zero(), 0.0);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(create_test_candle()).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 6);
        assert_eq!(json["date"], "2024-01-15T09:15:00Z");
        assert_eq!(json["volume"], 1500.0);
    }

    #[test]
    fn test_deserialize_naive_date_and_null_volume() {
        let candle: Candle = serde_json::from_str(
            r#"{"open":1.0,"high":2.0,"low":0.5,"close":1.5,"volume":null,"date":"2024-01-15T09:15:00"}"#,
        )
        .unwrap();
        assert_eq!(candle.volume, None);
        assert_eq!(
            candle.timestamp,
            Utc.with_ymd_and_hms(2024, 1, 15, 9, 15, 0).unwrap()
        );

        let missing: Candle = serde_json::from_str(
            r#"{"open":1.0,"high":2.0,"low":0.5,"close":1.5,"date":"2024-01-15T09:15:00Z"}"#,
        )
        .unwrap();
        assert_eq!(missing.volume, None);
    }
}
