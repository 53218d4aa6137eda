//! Info command implementation.

use anyhow::Result;
use candlefold_lib::{Candle, base_granularity};
use chrono::{DateTime, TimeDelta, Utc};
use std::path::Path;

use crate::display::{self, InputKind};

/// Aggregate statistics over a candle file.
struct Summary {
    count: usize,
    first: DateTime<Utc>,
    last: DateTime<Utc>,
    sorted: bool,
    granularity: Option<TimeDelta>,
    high: f64,
    low: f64,
    bullish: usize,
    bearish: usize,
    widest_range: f64,
    mean_body: f64,
    total_volume: f64,
    missing_volume: usize,
    /// Volume-weighted typical price, absent when no volume traded.
    vwap: Option<f64>,
}

impl Summary {
    fn from_candles(candles: &[Candle]) -> Option<Self> {
        let (first, last) = (candles.first()?, candles.last()?);

        let mut summary = Self {
            count: candles.len(),
            first: first.timestamp,
            last: last.timestamp,
            sorted: candles
                .windows(2)
                .all(|pair| pair[0].timestamp <= pair[1].timestamp),
            granularity: base_granularity(candles),
            high: f64::NEG_INFINITY,
            low: f64::INFINITY,
            bullish: 0,
            bearish: 0,
            widest_range: 0.0,
            mean_body: 0.0,
            total_volume: 0.0,
            missing_volume: 0,
            vwap: None,
        };

        let mut body_sum = 0.0;
        let mut weighted_price = 0.0;
        for candle in candles {
            summary.high = summary.high.max(candle.high);
            summary.low = summary.low.min(candle.low);
            summary.bullish += usize::from(candle.is_bullish());
            summary.bearish += usize::from(candle.is_bearish());
            summary.widest_range = summary.widest_range.max(candle.range());
            body_sum += candle.body();

            let volume = candle.volume_or_zero();
            summary.total_volume += volume;
            summary.missing_volume += usize::from(candle.volume.is_none());
            weighted_price += candle.typical_price() * volume;
        }

        summary.mean_body = body_sum / summary.count as f64;
        if summary.total_volume > 0.0 {
            summary.vwap = Some(weighted_price / summary.total_volume);
        }
        Some(summary)
    }
}

/// Print a summary of a candle file.
pub(crate) fn show_info(input: &Path, input_format: Option<InputKind>, delimiter: char) -> Result<()> {
    let candles = display::read_candles(input, input_format, delimiter)?;

    println!("File: {}", input.display());
    println!("Candles: {}", candles.len());

    let Some(summary) = Summary::from_candles(&candles) else {
        return Ok(());
    };

    println!("First: {}", summary.first.to_rfc3339());
    println!("Last: {}", summary.last.to_rfc3339());
    println!("Sorted: {}", if summary.sorted { "yes" } else { "no" });
    if let Some(granularity) = summary.granularity {
        println!("Granularity: {}", display::format_granularity(granularity));
    }

    println!();
    println!("High: {}", summary.high);
    println!("Low: {}", summary.low);
    println!(
        "Bullish / bearish / flat: {} / {} / {}",
        summary.bullish,
        summary.bearish,
        summary.count - summary.bullish - summary.bearish
    );
    println!("Widest range: {}", summary.widest_range);
    println!("Mean body: {:.4}", summary.mean_body);

    println!();
    println!("Total volume: {}", summary.total_volume);
    println!("Missing volume: {}", summary.missing_volume);
    if let Some(vwap) = summary.vwap {
        println!("VWAP: {vwap:.4}");
    }

    Ok(())
}
