//! candlefold CLI - OHLCV candle resampler.

use anyhow::Result;
use candlefold_lib::{Anchor, Timeframe};
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;

use display::{Format, InputKind};

#[derive(Parser)]
#[command(name = "candlefold")]
#[command(about = "Resample OHLCV candles to coarser timeframes", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resample a candle file to a coarser timeframe
    Resample {
        /// Input file (CSV, JSON, or NDJSON)
        input: PathBuf,

        /// Bucket width: minutes (5) or 5m, 1h, 1d. Omit to pass candles through.
        #[arg(short, long, allow_hyphen_values = true)]
        timeframe: Option<Timeframe>,

        /// Bucket anchor: first, epoch, session, or an RFC 3339 origin
        #[arg(long, default_value = "first")]
        anchor: Anchor,

        /// Start a new bucket at the first candle of each UTC day
        #[arg(long)]
        reanchor_daily: bool,

        /// Input format. Defaults to the input file's extension.
        #[arg(long, value_enum)]
        input_format: Option<InputKind>,

        /// CSV input delimiter
        #[arg(long, default_value = ",")]
        delimiter: char,

        /// Sort input candles by timestamp before resampling
        #[arg(long)]
        sort: bool,

        /// Output file path. Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format. Defaults to the output file's extension, else json.
        #[arg(short, long, value_enum)]
        format: Option<Format>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Wrap JSON output as {"msg": "done", "data": [...]}
        #[arg(long)]
        envelope: bool,
    },

    /// Summarize a candle file
    Info {
        /// Input file (CSV, JSON, or NDJSON)
        input: PathBuf,

        /// Input format. Defaults to the input file's extension.
        #[arg(long, value_enum)]
        input_format: Option<InputKind>,

        /// CSV input delimiter
        #[arg(long, default_value = ",")]
        delimiter: char,
    },
}

/// Installs the stderr log subscriber. `RUST_LOG` overrides the flags.
fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Resample {
            input,
            timeframe,
            anchor,
            reanchor_daily,
            input_format,
            delimiter,
            sort,
            output,
            format,
            pretty,
            envelope,
        } => commands::resample::resample(commands::resample::ResampleArgs {
            input,
            timeframe,
            anchor,
            reanchor_daily,
            input_format,
            delimiter,
            sort,
            output,
            format,
            pretty,
            envelope,
            quiet: cli.quiet,
        }),
        Commands::Info {
            input,
            input_format,
            delimiter,
        } => commands::info::show_info(&input, input_format, delimiter),
    }
}
