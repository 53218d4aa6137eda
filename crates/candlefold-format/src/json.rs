//! JSON output format.

use candlefold_types::Candle;
use serde::Serialize;
use std::io::Write;

use crate::{FormatError, Formatter};

/// Layout of the JSON document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    /// A bare array of candles.
    #[default]
    Array,
    /// One candle object per line.
    Ndjson,
    /// The candle array wrapped as `{"msg": "done", "data": [...]}`, the shape
    /// candle APIs respond with. [`CandleReader`](crate::CandleReader) accepts
    /// it back.
    Envelope,
}

/// Response wrapper written by [`JsonStyle::Envelope`].
#[derive(Serialize)]
struct Envelope<'a> {
    msg: &'static str,
    data: &'a [Candle],
}

/// JSON formatter.
///
/// Each candle is written as `{"open","high","low","close","volume","date"}`
/// with `volume` as `null` when absent.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    style: JsonStyle,
    pretty: bool,
}

impl JsonFormatter {
    /// Array-style formatter.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_style(JsonStyle::Array)
    }

    /// NDJSON formatter.
    #[must_use]
    pub const fn ndjson() -> Self {
        Self::with_style(JsonStyle::Ndjson)
    }

    /// Envelope-style formatter.
    #[must_use]
    pub const fn envelope() -> Self {
        Self::with_style(JsonStyle::Envelope)
    }

    /// Formatter for an explicit style.
    #[must_use]
    pub const fn with_style(style: JsonStyle) -> Self {
        Self {
            style,
            pretty: false,
        }
    }

    /// Indents the document. Ignored for NDJSON, which is one line per record.
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Returns the layout in use.
    #[must_use]
    pub const fn style(&self) -> JsonStyle {
        self.style
    }

    fn write_document<W: Write, T: Serialize + ?Sized>(
        &self,
        writer: &mut W,
        value: &T,
    ) -> Result<(), FormatError> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, value)?;
        } else {
            serde_json::to_writer(&mut *writer, value)?;
        }
        writeln!(writer)?;
        Ok(())
    }
}

impl Formatter for JsonFormatter {
    fn write_candles<W: Write + Send>(
        &self,
        candles: &[Candle],
        mut writer: W,
    ) -> Result<(), FormatError> {
        match self.style {
            JsonStyle::Array => self.write_document(&mut writer, candles)?,
            JsonStyle::Envelope => self.write_document(
                &mut writer,
                &Envelope {
                    msg: "done",
                    data: candles,
                },
            )?,
            JsonStyle::Ndjson => {
                for candle in candles {
                    serde_json::to_writer(&mut writer, candle)?;
                    writeln!(writer)?;
                }
            }
        }
        writer.flush()?;
        Ok(())
    }

    fn extension(&self) -> &str {
        match self.style {
            JsonStyle::Array | JsonStyle::Envelope => "json",
            JsonStyle::Ndjson => "ndjson",
        }
    }
}
