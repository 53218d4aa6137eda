//! Resample command implementation.

use anyhow::{Context, Result};
use candlefold_lib::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

use crate::display::{self, Format, InputKind, JsonLayout};

/// Arguments for the resample command.
pub(crate) struct ResampleArgs {
    pub(crate) input: PathBuf,
    pub(crate) timeframe: Option<Timeframe>,
    pub(crate) anchor: Anchor,
    pub(crate) reanchor_daily: bool,
    pub(crate) input_format: Option<InputKind>,
    pub(crate) delimiter: char,
    pub(crate) sort: bool,
    pub(crate) output: Option<PathBuf>,
    pub(crate) format: Option<Format>,
    pub(crate) pretty: bool,
    pub(crate) envelope: bool,
    pub(crate) quiet: bool,
}

/// Execute the resample command.
pub(crate) fn resample(args: ResampleArgs) -> Result<()> {
    let format = Format::resolve(args.format, args.output.as_deref());
    display::ensure_streamable(format, args.output.is_none())?;

    let layout = JsonLayout {
        pretty: args.pretty,
        envelope: args.envelope,
    };
    if layout.envelope && !matches!(format, Format::Json) {
        warn!(%format, "--envelope only applies to json output");
    }

    let start_time = Instant::now();
    let mut candles = display::read_candles(&args.input, args.input_format, args.delimiter)?;
    info!(path = %args.input.display(), count = candles.len(), "read candles");

    if args.sort {
        candles.sort_by_key(|candle| candle.timestamp);
    }

    let output_candles = match args.timeframe {
        None => candles,
        Some(timeframe) => {
            let options = ResampleOptions::new()
                .with_anchor(args.anchor)
                .with_reanchor_daily(args.reanchor_daily);
            resample_with(&candles, timeframe, options).with_context(|| {
                if args.sort {
                    format!("Failed to resample {}", args.input.display())
                } else {
                    format!(
                        "Failed to resample {} (pass --sort to order the input first)",
                        args.input.display()
                    )
                }
            })?
        }
    };

    if output_candles.is_empty() {
        warn!(path = %args.input.display(), "input contained no candles");
    }

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            display::write_candles(&output_candles, &mut writer, format, layout)?;
            writer.flush()?;

            if !args.quiet {
                eprintln!(
                    "Wrote {} candles to {} ({format}) in {:.2?}",
                    output_candles.len(),
                    path.display(),
                    start_time.elapsed()
                );
            }
        }
        None => {
            let mut writer = BufWriter::new(std::io::stdout());
            display::write_candles(&output_candles, &mut writer, format, layout)?;
            writer.flush()?;
        }
    }

    Ok(())
}
