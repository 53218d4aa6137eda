//! Display utilities and format plumbing for the candlefold CLI.

use anyhow::{Context, Result, bail};
use candlefold_lib::prelude::*;
use chrono::TimeDelta;
use clap::ValueEnum;
use std::io::Write;
use std::path::Path;

/// Output format for resampled candles.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    Csv,
    Json,
    Ndjson,
    Parquet,
}

impl Format {
    /// Returns the file extension for this format.
    pub(crate) const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Ndjson => "ndjson",
            Self::Parquet => "parquet",
        }
    }

    /// Picks the explicit format, else the output path's extension, else JSON.
    pub(crate) fn resolve(explicit: Option<Self>, output: Option<&Path>) -> Self {
        explicit
            .or_else(|| output.and_then(OutputFormat::from_path).map(Self::from))
            .unwrap_or(Self::Json)
    }
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Csv => Self::Csv,
            OutputFormat::Json => Self::Json,
            OutputFormat::Ndjson => Self::Ndjson,
            OutputFormat::Parquet => Self::Parquet,
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Input format for candle files.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum InputKind {
    Csv,
    Json,
    Ndjson,
}

impl From<InputKind> for InputFormat {
    fn from(kind: InputKind) -> Self {
        match kind {
            InputKind::Csv => Self::Csv,
            InputKind::Json => Self::Json,
            InputKind::Ndjson => Self::Ndjson,
        }
    }
}

/// Read candles from a file, resolving the format from the flag or extension.
pub(crate) fn read_candles(
    input: &Path,
    input_format: Option<InputKind>,
    delimiter: char,
) -> Result<Vec<Candle>> {
    let format = match input_format {
        Some(kind) => InputFormat::from(kind),
        None => InputFormat::from_path(input).with_context(|| {
            format!(
                "Cannot infer input format of {}; pass --input-format",
                input.display()
            )
        })?,
    };
    let delimiter = u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .with_context(|| format!("Delimiter must be a single ASCII character, got {delimiter:?}"))?;

    let candles = CandleReader::new(format)
        .with_delimiter(delimiter)
        .read_path(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    Ok(candles)
}

/// JSON layout flags from the command line.
#[derive(Clone, Copy, Default)]
pub(crate) struct JsonLayout {
    pub(crate) pretty: bool,
    pub(crate) envelope: bool,
}

/// Write candles to a writer in the specified format.
pub(crate) fn write_candles<W: Write + Send>(
    candles: &[Candle],
    writer: W,
    format: Format,
    layout: JsonLayout,
) -> Result<()> {
    match format {
        Format::Csv => {
            let formatter = CsvFormatter::new();
            formatter.write_candles(candles, writer)?;
        }
        Format::Json => {
            let formatter = if layout.envelope {
                JsonFormatter::envelope()
            } else {
                JsonFormatter::new()
            };
            formatter.with_pretty(layout.pretty).write_candles(candles, writer)?;
        }
        Format::Ndjson => {
            let formatter = JsonFormatter::ndjson();
            formatter.write_candles(candles, writer)?;
        }
        Format::Parquet => {
            #[cfg(feature = "parquet")]
            {
                let formatter = ParquetFormatter::new();
                formatter.write_candles(candles, writer)?;
            }
            #[cfg(not(feature = "parquet"))]
            {
                let _ = writer;
                bail!("Parquet support not compiled in");
            }
        }
    }

    Ok(())
}

/// Render a granularity as the largest whole unit (e.g. `5m`, `1h`, `30s`).
pub(crate) fn format_granularity(delta: TimeDelta) -> String {
    let seconds = delta.num_seconds();
    if seconds > 0 && seconds % 86_400 == 0 {
        format!("{}d", seconds / 86_400)
    } else if seconds > 0 && seconds % 3600 == 0 {
        format!("{}h", seconds / 3600)
    } else if seconds > 0 && seconds % 60 == 0 {
        format!("{}m", seconds / 60)
    } else if seconds > 0 {
        format!("{seconds}s")
    } else {
        format!("{}ms", delta.num_milliseconds())
    }
}

/// Fail early on formats that cannot go to a terminal stream.
pub(crate) fn ensure_streamable(format: Format, to_stdout: bool) -> Result<()> {
    if to_stdout && matches!(format, Format::Parquet) {
        bail!("Parquet output needs a file; pass --output");
    }
    Ok(())
}
