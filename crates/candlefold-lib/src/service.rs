//! Candle retrieval with optional resampling.

use candlefold_aggregate::resample_with;
use candlefold_types::{Candle, ResampleOptions, Result, Timeframe};
use tracing::debug;

use crate::CandleSource;

/// Serves an instrument's candles, resampled when a timeframe is requested.
#[derive(Debug, Clone)]
pub struct CandleService<S> {
    source: S,
    options: ResampleOptions,
}

impl<S: CandleSource> CandleService<S> {
    /// Creates a service over a source with default resample options.
    #[must_use]
    pub const fn new(source: S) -> Self {
        Self {
            source,
            options: ResampleOptions::new(),
        }
    }

    /// Sets the resample options.
    #[must_use]
    pub const fn with_options(mut self, options: ResampleOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the underlying source.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Returns the candles for `instrument`.
    ///
    /// With `timeframe_minutes` absent the source's candles are returned
    /// unchanged; otherwise they are resampled to that many minutes.
    ///
    /// # Errors
    ///
    /// Returns an invalid-timeframe error before touching the source if the
    /// timeframe is not strictly positive, any error from the source, or an
    /// unsorted-input error if the source broke its ordering contract.
    pub fn get_candles(&self, instrument: &str, timeframe_minutes: Option<i64>) -> Result<Vec<Candle>> {
        let timeframe = timeframe_minutes.map(Timeframe::from_minutes).transpose()?;
        let candles = self.source.candles(instrument)?;

        match timeframe {
            None => {
                debug!(instrument, count = candles.len(), "serving raw candles");
                Ok(candles)
            }
            Some(timeframe) => {
                debug!(instrument, %timeframe, count = candles.len(), "resampling candles");
                Ok(resample_with(&candles, timeframe, self.options)?)
            }
        }
    }
}
