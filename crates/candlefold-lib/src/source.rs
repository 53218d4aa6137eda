//! Candle sources.

use candlefold_types::{Candle, CandlefoldError, Result};
use std::collections::HashMap;

#[cfg(feature = "format")]
use candlefold_format::{CandleReader, InputFormat};
#[cfg(feature = "format")]
use std::path::{Component, Path, PathBuf};
#[cfg(feature = "format")]
use tracing::{debug, warn};

/// Supplies raw candles for one instrument at a time.
pub trait CandleSource {
    /// Returns the instrument's candles in ascending timestamp order.
    ///
    /// An instrument with no candles yields an empty vector.
    ///
    /// # Errors
    ///
    /// Returns [`CandlefoldError::UnknownInstrument`] if the source does not
    /// know the instrument, or an I/O or parse error from the backing store.
    fn candles(&self, instrument: &str) -> Result<Vec<Candle>>;
}

impl<S: CandleSource + ?Sized> CandleSource for &S {
    fn candles(&self, instrument: &str) -> Result<Vec<Candle>> {
        (**self).candles(instrument)
    }
}

/// In-memory candle store keyed by instrument.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    series: HashMap<String, Vec<Candle>>,
}

impl MemorySource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores candles for an instrument, replacing any previous series.
    ///
    /// The series is sorted by timestamp on insert.
    pub fn insert(&mut self, instrument: impl Into<String>, mut candles: Vec<Candle>) {
        candles.sort_by_key(|c| c.timestamp);
        self.series.insert(instrument.into().to_lowercase(), candles);
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with_series(mut self, instrument: impl Into<String>, candles: Vec<Candle>) -> Self {
        self.insert(instrument, candles);
        self
    }

    /// Returns the known instruments.
    pub fn instruments(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }
}

impl CandleSource for MemorySource {
    fn candles(&self, instrument: &str) -> Result<Vec<Candle>> {
        self.series
            .get(&instrument.to_lowercase())
            .cloned()
            .ok_or_else(|| CandlefoldError::UnknownInstrument(instrument.to_string()))
    }
}

/// Reads `<root>/<instrument>.<ext>` files.
#[cfg(feature = "format")]
#[derive(Debug, Clone)]
pub struct FileSource {
    root: PathBuf,
    reader: CandleReader,
    sort: bool,
}

#[cfg(feature = "format")]
impl FileSource {
    /// Creates a source over files of `format` in `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, format: InputFormat) -> Self {
        Self {
            root: root.into(),
            reader: CandleReader::new(format),
            sort: false,
        }
    }

    /// Sets the reader, e.g. to change the CSV delimiter.
    #[must_use]
    pub const fn with_reader(mut self, reader: CandleReader) -> Self {
        self.reader = reader;
        self
    }

    /// Sorts each file's candles by timestamp after reading.
    ///
    /// Off by default, so out-of-order files surface as resample errors.
    #[must_use]
    pub const fn with_sort(mut self, sort: bool) -> Self {
        self.sort = sort;
        self
    }

    /// Returns the file backing an instrument.
    ///
    /// Returns `None` unless the name is a single plain path component, so
    /// lookups never leave the source directory.
    #[must_use]
    pub fn path_for(&self, instrument: &str) -> Option<PathBuf> {
        if instrument.contains(std::path::is_separator) {
            return None;
        }
        let mut components = Path::new(instrument).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Some(
                self.root
                    .join(format!("{instrument}.{}", self.reader.format().extension())),
            ),
            _ => None,
        }
    }

    /// Returns the directory this source reads from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(feature = "format")]
impl CandleSource for FileSource {
    fn candles(&self, instrument: &str) -> Result<Vec<Candle>> {
        let Some(path) = self.path_for(instrument) else {
            warn!(instrument, "rejected instrument name outside the source directory");
            return Err(CandlefoldError::UnknownInstrument(instrument.to_string()));
        };
        if !path.is_file() {
            return Err(CandlefoldError::UnknownInstrument(instrument.to_string()));
        }

        let mut candles = self.reader.read_path(&path)?;
        if self.sort {
            candles.sort_by_key(|c| c.timestamp);
        }
        debug!(instrument, count = candles.len(), "loaded candles from file");
        Ok(candles)
    }
}
