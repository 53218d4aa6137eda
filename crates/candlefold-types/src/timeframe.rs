//! Resampling timeframe definitions.

use chrono::TimeDelta;
use derive_more::{Display, Into};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::str::FromStr;
use thiserror::Error;

use crate::ResampleError;

/// Output bucket width, a strictly positive number of minutes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, Into,
)]
#[serde(try_from = "i64", into = "u32")]
#[display("{_0}m")]
pub struct Timeframe(NonZeroU32);

impl Timeframe {
    /// One-minute buckets.
    pub const ONE_MINUTE: Self = Self(NonZeroU32::MIN);

    /// Creates a timeframe from a non-zero minute count.
    #[must_use]
    pub const fn new(minutes: NonZeroU32) -> Self {
        Self(minutes)
    }

    /// Creates a timeframe from a signed minute count.
    ///
    /// # Errors
    ///
    /// Returns [`ResampleError::InvalidTimeframe`] if `minutes` is zero,
    /// negative, or does not fit in a `u32`.
    pub fn from_minutes(minutes: i64) -> Result<Self, ResampleError> {
        u32::try_from(minutes)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Self)
            .ok_or(ResampleError::InvalidTimeframe { minutes })
    }

    /// Returns the width in minutes.
    #[must_use]
    pub const fn minutes(&self) -> u32 {
        self.0.get()
    }

    /// Returns the width as a duration.
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.0.get()))
    }
}

impl TryFrom<i64> for Timeframe {
    type Error = ResampleError;

    fn try_from(minutes: i64) -> Result<Self, Self::Error> {
        Self::from_minutes(minutes)
    }
}

impl From<Timeframe> for u32 {
    fn from(timeframe: Timeframe) -> Self {
        timeframe.minutes()
    }
}

impl FromStr for Timeframe {
    type Err = TimeframeParseError;

    /// Parses `5`, `5m`, `90min`, `1h`, `4h`, `1d`, or the unit-first forms
    /// `m5`, `h1`, `d1`. A bare number is a minute count.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        let malformed = || TimeframeParseError::Malformed(s.to_string());

        let split = lowered
            .char_indices()
            .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && c == '-')))
            .map_or(lowered.len(), |(i, _)| i);
        let (number, unit) = if split == 0 {
            let split = lowered
                .find(|c: char| !c.is_ascii_alphabetic())
                .unwrap_or(lowered.len());
            let (unit, number) = lowered.split_at(split);
            (number, unit)
        } else {
            lowered.split_at(split)
        };

        let scale: i64 = match unit {
            "" | "m" | "min" | "mins" | "minute" | "minutes" => 1,
            "h" | "hr" | "hour" | "hours" => 60,
            "d" | "day" | "days" | "daily" => 1440,
            _ => return Err(malformed()),
        };
        let value: i64 = number.parse().map_err(|_| malformed())?;
        let minutes = value
            .checked_mul(scale)
            .ok_or(ResampleError::InvalidTimeframe { minutes: value })?;

        Ok(Self::from_minutes(minutes)?)
    }
}

/// Error returned when parsing a timeframe string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeframeParseError {
    /// The text is not a recognizable timeframe.
    #[error("invalid timeframe '{0}', expected minutes or a value like 5m, 1h, 1d")]
    Malformed(String),

    /// The text names a timeframe that is not strictly positive.
    #[error(transparent)]
    Invalid(#[from] ResampleError),
}
