//! CSV output format.

use candlefold_types::Candle;
use chrono::SecondsFormat;
use std::io::Write;

use crate::{FormatError, Formatter};

/// CSV formatter.
#[derive(Debug, Clone)]
pub struct CsvFormatter {
    /// Field delimiter (default: comma).
    delimiter: char,
    /// Whether to include header row.
    include_header: bool,
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Creates a tab-separated values (TSV) formatter.
    #[must_use]
    pub const fn tsv() -> Self {
        Self {
            delimiter: '\t',
            include_header: true,
        }
    }
}

impl Formatter for CsvFormatter {
    fn write_candles<W: Write + Send>(
        &self,
        candles: &[Candle],
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            writeln!(writer, "date{d}open{d}high{d}low{d}close{d}volume")?;
        }

        for candle in candles {
            // Fractional seconds appear only when non-zero.
            let date = candle.timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true);
            // Missing volume stays an empty field.
            let volume = candle.volume.map(|v| v.to_string()).unwrap_or_default();
            writeln!(
                writer,
                "{date}{d}{}{d}{}{d}{}{d}{}{d}{}",
                candle.open,
                candle.high,
                candle.low,
                candle.close,
                volume
            )?;
        }

        writer.flush()?;
        Ok(())
    }

    fn extension(&self) -> &str {
        "csv"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CandleReader, InputFormat};
    use chrono::{TimeDelta, TimeZone, Utc};
    use std::io::Cursor;

    fn create_test_candle(volume: Option<f64>) -> Candle {
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 15, 9, 15, 0).unwrap();
        Candle::new(timestamp, 21650.5, 21670.0, 21640.25, 21662.0, volume)
    }

    #[test]
    fn test_csv_candles() {
        let formatter = CsvFormatter::new();
        let candles = vec![create_test_candle(Some(1200.0))];
        let mut output = Cursor::new(Vec::new());

        formatter.write_candles(&candles, &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(result.starts_with("date,open,high,low,close,volume\n"));
        assert!(result.contains("2024-01-15T09:15:00Z,21650.5,21670,21640.25,21662,1200"));
    }

    #[test]
    fn test_csv_missing_volume_is_empty() {
        let formatter = CsvFormatter::new().with_header(false);
        let candles = vec![create_test_candle(None)];
        let mut output = Cursor::new(Vec::new());

        formatter.write_candles(&candles, &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(!result.contains("date,open"));
        assert!(result.trim_end().ends_with("21662,"));
    }

    #[test]
    fn test_csv_keeps_subsecond_timestamps() {
        let base = Utc.with_ymd_and_hms(2024, 1, 15, 9, 15, 0).unwrap();
        let candles = vec![
            Candle::new(base + TimeDelta::milliseconds(250), 1.0, 2.0, 0.5, 1.5, Some(10.0)),
            Candle::new(base + TimeDelta::seconds(1), 1.5, 2.5, 1.0, 2.0, None),
        ];
        let mut output = Cursor::new(Vec::new());

        CsvFormatter::new()
            .write_candles(&candles, &mut output)
            .unwrap();

        let bytes = output.into_inner();
        let text = String::from_utf8(bytes.clone()).unwrap();
        assert!(text.contains("2024-01-15T09:15:00.250Z,"));
        assert!(text.contains("2024-01-15T09:15:01Z,"));

        let reread = CandleReader::new(InputFormat::Csv)
            .read(bytes.as_slice())
            .unwrap();
        assert_eq!(reread, candles);
    }

    #[test]
    fn test_tsv() {
        let formatter = CsvFormatter::tsv();
        let mut output = Cursor::new(Vec::new());

        formatter
            .write_candles(&[create_test_candle(None)], &mut output)
            .unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(result.contains("date\topen\thigh"));
    }
}
