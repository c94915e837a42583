//! Scoped-file persistence for values with a text encoding.
//!
//! [`save`] and [`load`] open the file, hand a buffered stream to the
//! value's own [`Persist`] routine, and close it when done. Failing to
//! open the file reports the path.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::codec::{read_index, write_index, LineReader};
use crate::error::{FormatError, PersistError};
use crate::index::NamedIndex;

/// A value that can encode itself to, and decode itself from, the
/// line-oriented text format.
pub trait Persist: Sized {
    /// Encode `self` to `w`.
    fn write_to(&self, w: &mut dyn Write) -> Result<(), FormatError>;

    /// Decode a value from `r`, consuming exactly the lines it wrote.
    fn read_from(r: &mut LineReader<'_>) -> Result<Self, FormatError>;
}

impl Persist for NamedIndex {
    fn write_to(&self, w: &mut dyn Write) -> Result<(), FormatError> {
        write_index(w, self)
    }

    fn read_from(r: &mut LineReader<'_>) -> Result<Self, FormatError> {
        read_index(r)
    }
}

/// Write `value` to the file at `path`, creating or truncating it.
pub fn save<T: Persist>(path: impl AsRef<Path>, value: &T) -> Result<(), PersistError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| PersistError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    value.write_to(&mut writer)?;
    writer.flush().map_err(FormatError::from)?;
    tracing::debug!(path = %path.display(), "saved");
    Ok(())
}

/// Read a value from the file at `path`.
pub fn load<T: Persist>(path: impl AsRef<Path>) -> Result<T, PersistError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| PersistError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = BufReader::new(file);
    let value = T::read_from(&mut LineReader::new(&mut reader))?;
    tracing::debug!(path = %path.display(), "loaded");
    Ok(value)
}

/// Encode `value` into a `String`.
pub fn to_text<T: Persist>(value: &T) -> Result<String, FormatError> {
    let mut buf = Vec::new();
    value.write_to(&mut buf)?;
    String::from_utf8(buf).map_err(|e| FormatError::Malformed {
        detail: format!("encoded text is not UTF-8: {e}"),
    })
}

/// Decode a value from `text`.
pub fn from_text<T: Persist>(text: &str) -> Result<T, FormatError> {
    let mut bytes = text.as_bytes();
    T::read_from(&mut LineReader::new(&mut bytes))
}
