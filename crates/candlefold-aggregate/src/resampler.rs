//! Bucket-and-fold candle resampling.

use candlefold_types::{
    Anchor, Candle, ResampleError, ResampleOptions, Timeframe, truncate_to_minute,
};
use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, info};

/// Resamples candles into buckets of `timeframe_minutes`, anchored at the
/// first candle.
///
/// # Errors
///
/// Returns [`ResampleError::InvalidTimeframe`] if `timeframe_minutes` is not
/// strictly positive, or [`ResampleError::UnsortedInput`] if the candles are
/// not in non-decreasing timestamp order. No output is produced on error.
pub fn resample(candles: &[Candle], timeframe_minutes: i64) -> Result<Vec<Candle>, ResampleError> {
    let timeframe = Timeframe::from_minutes(timeframe_minutes)?;
    resample_with(candles, timeframe, ResampleOptions::default())
}

/// Resamples candles with an explicit timeframe and options.
///
/// # Errors
///
/// Returns [`ResampleError::UnsortedInput`] if the candles are not in
/// non-decreasing timestamp order.
pub fn resample_with(
    candles: &[Candle],
    timeframe: Timeframe,
    options: ResampleOptions,
) -> Result<Vec<Candle>, ResampleError> {
    let mut resampler = CandleResampler::with_options(timeframe, options);
    let mut buckets = Vec::new();

    for candle in candles {
        if let Some(bucket) = resampler.push(*candle)? {
            buckets.push(bucket);
        }
    }
    buckets.extend(resampler.finish());

    info!(
        input = candles.len(),
        output = buckets.len(),
        %timeframe,
        anchor = %options.anchor,
        "resampled candles"
    );
    Ok(buckets)
}

/// Streaming candle resampler.
///
/// Folds candles into buckets of the configured timeframe, emitting each
/// bucket once a candle arrives that falls outside it.
#[derive(Debug)]
pub struct CandleResampler {
    timeframe: Timeframe,
    options: ResampleOptions,
    current: Option<CandleBuilder>,
    last_timestamp: Option<DateTime<Utc>>,
    pushed: usize,
}

impl CandleResampler {
    /// Creates a resampler anchored at the first candle.
    #[must_use]
    pub const fn new(timeframe: Timeframe) -> Self {
        Self::with_options(timeframe, ResampleOptions::new())
    }

    /// Creates a resampler with explicit options.
    #[must_use]
    pub const fn with_options(timeframe: Timeframe, options: ResampleOptions) -> Self {
        Self {
            timeframe,
            options,
            current: None,
            last_timestamp: None,
            pushed: 0,
        }
    }

    /// Returns the output timeframe.
    #[must_use]
    pub const fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    /// Returns the options in effect.
    #[must_use]
    pub const fn options(&self) -> ResampleOptions {
        self.options
    }

    /// Folds one candle, potentially emitting a completed bucket.
    ///
    /// Returns `Ok(Some(bucket))` when this candle closes the bucket in
    /// progress, `Ok(None)` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ResampleError::UnsortedInput`] if the candle is older than
    /// the previous one. The resampler's state is left unchanged.
    pub fn push(&mut self, candle: Candle) -> Result<Option<Candle>, ResampleError> {
        self.check_order(candle.timestamp)?;
        self.last_timestamp = Some(candle.timestamp);
        self.pushed += 1;

        match self.current.take() {
            Some(mut builder) if self.belongs(&builder, candle.timestamp) => {
                builder.update(&candle);
                self.current = Some(builder);
                Ok(None)
            }
            Some(builder) => {
                let start = self.next_bucket_start(&builder, candle.timestamp);
                debug!(
                    start = %builder.start,
                    candles = builder.count,
                    "bucket closed"
                );
                self.current = Some(CandleBuilder::new(start, self.timeframe, &candle));
                Ok(Some(builder.finish()))
            }
            None => {
                let start = self.first_bucket_start(candle.timestamp);
                self.current = Some(CandleBuilder::new(start, self.timeframe, &candle));
                Ok(None)
            }
        }
    }

    /// Finishes resampling, returning the bucket in progress, if any.
    #[must_use]
    pub fn finish(self) -> Option<Candle> {
        self.current.map(CandleBuilder::finish)
    }

    fn check_order(&self, timestamp: DateTime<Utc>) -> Result<(), ResampleError> {
        match self.last_timestamp {
            Some(previous) if timestamp < previous => Err(ResampleError::UnsortedInput {
                index: self.pushed,
                previous,
                current: timestamp,
            }),
            _ => Ok(()),
        }
    }

    /// Half-open membership test, plus the day check when re-anchoring daily.
    fn belongs(&self, builder: &CandleBuilder, timestamp: DateTime<Utc>) -> bool {
        timestamp < builder.end && !self.crosses_day(builder, timestamp)
    }

    fn crosses_day(&self, builder: &CandleBuilder, timestamp: DateTime<Utc>) -> bool {
        self.options.reanchor_daily && timestamp.date_naive() != builder.start.date_naive()
    }

    /// Start of the very first bucket for a candle at `timestamp`.
    fn first_bucket_start(&self, timestamp: DateTime<Utc>) -> DateTime<Utc> {
        match self.options.anchor {
            Anchor::FirstCandle => truncate_to_minute(timestamp),
            Anchor::Grid { origin } => grid_cell_start(origin, timestamp, self.timeframe),
        }
    }

    /// Start of the bucket that follows `builder` and contains `timestamp`.
    ///
    /// Empty buckets between the two are skipped, never emitted.
    fn next_bucket_start(&self, builder: &CandleBuilder, timestamp: DateTime<Utc>) -> DateTime<Utc> {
        if self.crosses_day(builder, timestamp) {
            return truncate_to_minute(timestamp);
        }

        let width = timeframe_millis(self.timeframe);
        let steps = (timestamp - builder.start).num_milliseconds() / width;
        if steps > 1 {
            debug!(skipped = steps - 1, after = %builder.start, "skipped empty buckets");
        }
        builder.start + TimeDelta::milliseconds(steps * width)
    }
}

/// Start of the grid cell `origin + k * timeframe` containing `timestamp`.
fn grid_cell_start(
    origin: DateTime<Utc>,
    timestamp: DateTime<Utc>,
    timeframe: Timeframe,
) -> DateTime<Utc> {
    let width = timeframe_millis(timeframe);
    let steps = (timestamp - origin).num_milliseconds().div_euclid(width);
    let start = origin + TimeDelta::milliseconds(steps * width);
    // Sub-millisecond offsets before the origin truncate toward zero.
    if start > timestamp {
        start - timeframe.duration()
    } else {
        start
    }
}

fn timeframe_millis(timeframe: Timeframe) -> i64 {
    i64::from(timeframe.minutes()) * 60_000
}

/// Running aggregate for the bucket in progress.
#[derive(Debug)]
struct CandleBuilder {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
    count: usize,
}

impl CandleBuilder {
    /// Opens a bucket with its first candle.
    fn new(start: DateTime<Utc>, timeframe: Timeframe, candle: &Candle) -> Self {
        Self {
            start,
            end: start + timeframe.duration(),
            open: candle.open,
            high: candle.high,
            low: candle.low,
            close: candle.close,
            volume: candle.volume_or_zero(),
            count: 1,
        }
    }

    /// Folds another candle into the bucket.
    fn update(&mut self, candle: &Candle) {
        self.high = self.high.max(candle.high);
        self.low = self.low.min(candle.low);
        self.close = candle.close;
        self.volume += candle.volume_or_zero();
        self.count += 1;
    }

    /// Closes the bucket.
    const fn finish(self) -> Candle {
        Candle::new(
            self.start,
            self.open,
            self.high,
            self.low,
            self.close,
            Some(self.volume),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, hour, minute, second)
            .unwrap()
    }

    fn make_candle(hour: u32, minute: u32, high: f64, low: f64, volume: Option<f64>) -> Candle {
        Candle::new(at(hour, minute, 0), low + 1.0, high, low, high - 1.0, volume)
    }

    fn five_minutes() -> Timeframe {
        Timeframe::from_minutes(5).unwrap()
    }

    #[test]
    fn test_streaming_emits_on_boundary() {
        let mut resampler = CandleResampler::new(five_minutes());

        assert!(resampler.push(make_candle(9, 15, 10.0, 8.0, Some(1.0))).unwrap().is_none());
        assert!(resampler.push(make_candle(9, 19, 12.0, 9.0, Some(2.0))).unwrap().is_none());

        let bucket = resampler
            .push(make_candle(9, 20, 11.0, 7.0, Some(4.0)))
            .unwrap()
            .unwrap();
        assert_eq!(bucket.timestamp, at(9, 15, 0));
        assert_relative_eq!(bucket.high, 12.0);
        assert_relative_eq!(bucket.low, 8.0);
        assert_eq!(bucket.volume, Some(3.0));

        let last = resampler.finish().unwrap();
        assert_eq!(last.timestamp, at(9, 20, 0));
        assert_eq!(last.volume, Some(4.0));
    }

    #[test]
    fn test_open_and_close_come_from_ends_of_bucket() {
        let first = Candle::new(at(9, 15, 0), 100.0, 101.0, 99.0, 100.5, None);
        let middle = Candle::new(at(9, 16, 0), 100.5, 103.0, 100.0, 102.0, None);
        let last = Candle::new(at(9, 17, 0), 102.0, 102.5, 98.0, 99.0, None);

        let out = resample(&[first, middle, last], 5).unwrap();

        assert_eq!(out.len(), 1);
        assert_relative_eq!(out[0].open, 100.0);
        assert_relative_eq!(out[0].close, 99.0);
        assert_relative_eq!(out[0].high, 103.0);
        assert_relative_eq!(out[0].low, 98.0);
        assert_eq!(out[0].volume, Some(0.0));
    }

    #[test]
    fn test_first_bucket_truncates_seconds() {
        let candle = Candle::new(at(9, 15, 42), 1.0, 2.0, 0.5, 1.5, Some(10.0));
        let mut resampler = CandleResampler::new(five_minutes());
        assert!(resampler.push(candle).unwrap().is_none());

        let bucket = resampler.finish().unwrap();
        assert_eq!(bucket.timestamp, at(9, 15, 0));
    }

    #[test]
    fn test_gap_advances_by_whole_timeframes() {
        let out = resample(
            &[
                make_candle(9, 15, 10.0, 8.0, None),
                make_candle(9, 47, 10.0, 8.0, None),
            ],
            5,
        )
        .unwrap();

        let starts: Vec<_> = out.iter().map(|c| c.timestamp).collect();
        assert_eq!(starts, vec![at(9, 15, 0), at(9, 45, 0)]);
    }

    #[test]
    fn test_unsorted_candle_is_rejected_without_state_change() {
        let mut resampler = CandleResampler::new(five_minutes());
        resampler.push(make_candle(9, 16, 10.0, 8.0, Some(1.0))).unwrap();

        let err = resampler
            .push(make_candle(9, 15, 10.0, 8.0, Some(1.0)))
            .unwrap_err();
        assert_eq!(
            err,
            ResampleError::UnsortedInput {
                index: 1,
                previous: at(9, 16, 0),
                current: at(9, 15, 0),
            }
        );

        let bucket = resampler.finish().unwrap();
        assert_eq!(bucket.volume, Some(1.0));
    }

    #[test]
    fn test_equal_timestamps_share_a_bucket() {
        let out = resample(
            &[
                make_candle(9, 15, 10.0, 8.0, Some(1.0)),
                make_candle(9, 15, 11.0, 8.0, Some(1.0)),
            ],
            1,
        )
        .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].volume, Some(2.0));
    }

    #[test]
    fn test_grid_anchor_aligns_to_origin() {
        let options = ResampleOptions::new().with_anchor(Anchor::epoch());
        let out = resample_with(
            &[
                make_candle(9, 17, 10.0, 8.0, None),
                make_candle(9, 19, 10.0, 8.0, None),
                make_candle(9, 20, 10.0, 8.0, None),
            ],
            five_minutes(),
            options,
        )
        .unwrap();

        let starts: Vec<_> = out.iter().map(|c| c.timestamp).collect();
        assert_eq!(starts, vec![at(9, 15, 0), at(9, 20, 0)]);
    }

    #[test]
    fn test_grid_cell_before_origin() {
        let origin = at(9, 15, 0);
        let start = grid_cell_start(origin, at(9, 11, 30), five_minutes());
        assert_eq!(start, at(9, 10, 0));
    }

    #[test]
    fn test_reanchor_daily_splits_overnight_bucket() {
        let late = Candle::new(at(23, 58, 0), 1.0, 1.0, 1.0, 1.0, Some(1.0));
        let early = Candle::new(
            Utc.with_ymd_and_hms(2024, 1, 16, 0, 1, 0).unwrap(),
            2.0,
            2.0,
            2.0,
            2.0,
            Some(1.0),
        );
        let timeframe = Timeframe::from_minutes(15).unwrap();

        let plain = resample_with(&[late, early], timeframe, ResampleOptions::new()).unwrap();
        assert_eq!(plain.len(), 1);

        let options = ResampleOptions::new().with_reanchor_daily(true);
        let split = resample_with(&[late, early], timeframe, options).unwrap();
        assert_eq!(split.len(), 2);
        assert_eq!(split[1].timestamp, early.timestamp);
    }

    #[test]
    fn test_malformed_prices_pass_through() {
        let inverted = Candle::new(at(9, 15, 0), 5.0, 1.0, 9.0, 5.0, None);
        let out = resample(&[inverted], 5).unwrap();
        assert_relative_eq!(out[0].high, 1.0);
        assert_relative_eq!(out[0].low, 9.0);
    }
}
