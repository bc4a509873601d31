//! Traits for parsing, serialization, and the collaborator seams of
//! langoverlay.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Cursor, Write},
    path::Path,
};

use crate::{error::Error, types::Bundle};

/// A trait for parsing and writing a text format from/to one source.
///
/// # Example
///
/// ```rust,no_run
/// use langoverlay::traits::Parser;
/// let overrides = langoverlay::OverrideSet::read_from("overrides/fi.txt")?;
/// overrides.write_to("overrides/fi_copy.txt")?;
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Parser {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Parse from file path.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = File::open(path).map_err(Error::Io)?;
        let reader = BufReader::new(file);
        Self::from_reader(reader)
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error>;

    /// Write to file path.
    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        self.to_writer(writer)
    }

    /// Parse from a string.
    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(s))
    }

    /// Parse from bytes.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(bytes))
    }
}

/// Supplies raw variable bundles and the fallback relation for locales.
///
/// Implementations expose a direct name → mapping lookup; a locale with no
/// data source yields an empty bundle, never an error. Only a data source
/// that exists but cannot be read or decoded is an error.
pub trait BundleSource {
    /// Loads the named variable for a locale, empty when the locale has no
    /// data.
    fn load_variable(&self, locale: &str, variable: &str) -> Result<Bundle, Error>;

    /// The locale consulted when the target lacks a key, if any.
    fn fallback_locale(&self, locale: &str) -> Option<String>;
}

/// Persists override text per storage key and locale.
///
/// Last write wins; implementations are not expected to detect concurrent
/// saves.
pub trait OverrideStorage {
    /// Reads the persisted override text, `None` when nothing was saved yet.
    fn read(&self, storage_key: &str, locale: &str) -> Result<Option<String>, Error>;

    /// Writes the persisted override text. A failure here is fatal to the
    /// save operation and is propagated to the caller verbatim.
    fn write(&mut self, storage_key: &str, locale: &str, text: &str) -> Result<(), Error>;
}
