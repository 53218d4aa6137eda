//! Bucket anchoring and resample options.

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::time::parse_timestamp;

/// Placement of bucket boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Anchor {
    /// The first bucket starts at the first candle's minute; every later
    /// boundary is a whole number of timeframes after it.
    #[default]
    FirstCandle,
    /// Boundaries sit at `origin + k * timeframe` for integer `k`.
    Grid {
        /// Any instant on the grid.
        origin: DateTime<Utc>,
    },
}

impl Anchor {
    /// Grid aligned to the Unix epoch (:00, :05, :10 for five minutes).
    #[must_use]
    pub const fn epoch() -> Self {
        Self::Grid {
            origin: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    /// Grid aligned to the 09:15 IST equity session open.
    #[must_use]
    pub fn session_open() -> Self {
        let ist = FixedOffset::east_opt(5 * 3600 + 30 * 60);
        let origin = ist
            .and_then(|tz| tz.with_ymd_and_hms(1970, 1, 1, 9, 15, 0).single())
            .map_or(DateTime::<Utc>::UNIX_EPOCH, |dt| dt.with_timezone(&Utc));
        Self::Grid { origin }
    }

    /// Returns true for grid anchoring.
    #[must_use]
    pub const fn is_grid(&self) -> bool {
        matches!(self, Self::Grid { .. })
    }
}

impl std::fmt::Display for Anchor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FirstCandle => write!(f, "first"),
            Self::Grid { origin } => write!(f, "{}", origin.to_rfc3339()),
        }
    }
}

impl FromStr for Anchor {
    type Err = AnchorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "first" | "first-candle" | "data" => Ok(Self::FirstCandle),
            "epoch" | "wall-clock" | "clock" => Ok(Self::epoch()),
            "session" | "nse" => Ok(Self::session_open()),
            _ => parse_timestamp(s)
                .map(|origin| Self::Grid { origin })
                .ok_or_else(|| AnchorParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid anchor string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid anchor '{0}', expected one of: first, epoch, session, or an RFC 3339 origin")]
pub struct AnchorParseError(String);

/// Options controlling how candles are bucketed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResampleOptions {
    /// Bucket boundary placement.
    pub anchor: Anchor,
    /// Start a fresh bucket, anchored at the candle itself, whenever a
    /// candle falls on a new UTC calendar day.
    pub reanchor_daily: bool,
}

impl ResampleOptions {
    /// Creates the default options (first-candle anchoring, no daily reset).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            anchor: Anchor::FirstCandle,
            reanchor_daily: false,
        }
    }

    /// Sets the anchor.
    #[must_use]
    pub const fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Sets whether buckets restart at each new day.
    #[must_use]
    pub const fn with_reanchor_daily(mut self, reanchor_daily: bool) -> Self {
        self.reanchor_daily = reanchor_daily;
        self
    }
}
