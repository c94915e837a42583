//! Error types for the nomen toolkit.
//!
//! Organized by subsystem: name-index construction and lookup, translation,
//! text format decoding, and file persistence. Every integrity violation
//! surfaces as one of these; a name that simply disappeared between two
//! schema versions is not an error and is represented by `None`.

use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors from building or querying a [`NamedIndex`](crate::NamedIndex).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NameError {
    /// The name contains whitespace.
    MalformedName {
        /// The rejected name.
        name: String,
    },
    /// The name is already present in the index.
    DuplicateName {
        /// The rejected name.
        name: String,
    },
    /// The name is not present in the index.
    NameNotFound {
        /// The name that was looked up.
        name: String,
    },
    /// The index is outside `[0, size)`.
    IndexOutOfRange {
        /// The index that was looked up.
        index: usize,
        /// Number of names in the index.
        size: usize,
    },
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedName { name } => {
                write!(f, "malformed name {name:?}: names must not contain whitespace")
            }
            Self::DuplicateName { name } => write!(f, "duplicate name '{name}'"),
            Self::NameNotFound { name } => write!(f, "name '{name}' not found"),
            Self::IndexOutOfRange { index, size } => {
                write!(f, "index {index} out of range for {size} names")
            }
        }
    }
}

impl Error for NameError {}

/// Which extent of a container a shape check was made against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// The length of a 1-D sequence.
    Sequence,
    /// The row count of a 2-D array.
    Rows,
    /// The column count of a 2-D array.
    Cols,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequence => write!(f, "sequence length"),
            Self::Rows => write!(f, "row count"),
            Self::Cols => write!(f, "column count"),
        }
    }
}

/// Errors from applying a translator to stored data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TranslateError {
    /// A non-empty target does not match the size of the old index.
    ///
    /// Signals that the caller lost track of which schema version its
    /// data was laid out against.
    ShapeMismatch {
        /// The extent that was checked.
        axis: Axis,
        /// Size the target should have had.
        expected: usize,
        /// Size the target actually had.
        found: usize,
    },
    /// A stored index does not refer to any slot of the old index.
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of names in the old index.
        size: usize,
    },
}

impl fmt::Display for TranslateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeMismatch {
                axis,
                expected,
                found,
            } => write!(f, "shape mismatch: {axis} is {found}, expected 0 or {expected}"),
            Self::IndexOutOfRange { index, size } => {
                write!(f, "stored index {index} out of range for old index of {size} names")
            }
        }
    }
}

impl Error for TranslateError {}

/// Errors from decoding the line-oriented text format.
#[derive(Debug)]
pub enum FormatError {
    /// An I/O error occurred during read or write.
    Io(io::Error),
    /// The leading tag line did not match.
    UnexpectedTag {
        /// Tag the decoder expected.
        expected: &'static str,
        /// What was found instead.
        found: String,
    },
    /// The format version is not the one this build reads and writes.
    VersionMismatch {
        /// Version found in the input.
        found: u32,
        /// Version this build supports.
        expected: u32,
    },
    /// The input is truncated or a line could not be parsed.
    Malformed {
        /// Human-readable description of what went wrong.
        detail: String,
    },
    /// A decoded name was rejected by the index.
    InvalidName(NameError),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::UnexpectedTag { expected, found } => {
                write!(f, "expected tag \"{expected}\", got \"{found}\"")
            }
            Self::VersionMismatch { found, expected } => {
                write!(f, "format version is {found}, expected {expected}")
            }
            Self::Malformed { detail } => write!(f, "malformed input: {detail}"),
            Self::InvalidName(e) => write!(f, "invalid name in input: {e}"),
        }
    }
}

impl Error for FormatError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::InvalidName(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for FormatError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<NameError> for FormatError {
    fn from(e: NameError) -> Self {
        Self::InvalidName(e)
    }
}

/// Errors from saving or loading a value through a file.
#[derive(Debug)]
pub enum PersistError {
    /// The file could not be opened or created.
    Open {
        /// Path that failed to open.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
    /// Encoding or decoding the file contents failed.
    Format(FormatError),
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { path, source } => {
                write!(f, "failed to open {}: {source}", path.display())
            }
            Self::Format(e) => write!(f, "{e}"),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::Format(e) => Some(e),
        }
    }
}

impl From<FormatError> for PersistError {
    fn from(e: FormatError) -> Self {
        Self::Format(e)
    }
}
