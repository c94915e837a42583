//! Line-oriented text encode/decode for [`NamedIndex`].
//!
//! ```text
//! NamedIndex
//! VERSION 1
//! COUNT <n>
//! <name_0>
//! ...
//! <name_n-1>
//! ```
//!
//! The tag and version must match exactly on load; there is no
//! forward or backward compatibility. Names are read in order, so the
//! decoded index assigns the same ids as the encoded one.

use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::error::FormatError;
use crate::index::NamedIndex;

/// Tag line opening every encoded [`NamedIndex`].
pub const INDEX_TAG: &str = "NamedIndex";

/// Current text format version for [`NamedIndex`].
pub const INDEX_FORMAT_VERSION: u32 = 1;

/// Reads newline-terminated lines and tracks the line number for
/// diagnostics.
///
/// Shared by every decoder in the workspace so nested values (an index
/// inside a mapping table) report positions relative to the whole input.
pub struct LineReader<'a> {
    inner: &'a mut dyn BufRead,
    line_no: usize,
}

impl<'a> LineReader<'a> {
    /// Wrap a buffered reader.
    pub fn new(inner: &'a mut dyn BufRead) -> Self {
        Self { inner, line_no: 0 }
    }

    /// Number of lines consumed so far.
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    /// Read the next line without its terminator.
    ///
    /// End of input is an error: every caller knows how many lines it
    /// still expects.
    pub fn next_line(&mut self) -> Result<String, FormatError> {
        let mut line = String::new();
        let n = self.inner.read_line(&mut line)?;
        if n == 0 {
            return Err(FormatError::Malformed {
                detail: format!("unexpected end of input after line {}", self.line_no),
            });
        }
        self.line_no += 1;
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(line)
    }

    /// Consume a line that must equal `tag`.
    pub fn expect_tag(&mut self, tag: &'static str) -> Result<(), FormatError> {
        let line = self.next_line()?;
        if line != tag {
            return Err(FormatError::UnexpectedTag {
                expected: tag,
                found: line,
            });
        }
        Ok(())
    }

    /// Consume a `"<key> <value>"` line and parse the value.
    pub fn keyed_value<T: FromStr>(&mut self, key: &str) -> Result<T, FormatError> {
        let line = self.next_line()?;
        let value = match line.split_once(' ') {
            Some((k, v)) if k == key => v,
            _ => {
                return Err(FormatError::Malformed {
                    detail: format!(
                        "line {}: expected \"{key} <value>\", got \"{line}\"",
                        self.line_no
                    ),
                })
            }
        };
        value.trim().parse().map_err(|_| FormatError::Malformed {
            detail: format!("line {}: invalid {key} value \"{value}\"", self.line_no),
        })
    }
}

/// Encode `index` in the text format.
pub fn write_index(w: &mut dyn Write, index: &NamedIndex) -> Result<(), FormatError> {
    writeln!(w, "{INDEX_TAG}")?;
    writeln!(w, "VERSION {INDEX_FORMAT_VERSION}")?;
    writeln!(w, "COUNT {}", index.len())?;
    for name in index.names() {
        writeln!(w, "{name}")?;
    }
    Ok(())
}

/// Decode one index, validating tag, version and every name.
pub fn read_index(r: &mut LineReader<'_>) -> Result<NamedIndex, FormatError> {
    r.expect_tag(INDEX_TAG)?;
    let version: u32 = r.keyed_value("VERSION")?;
    if version != INDEX_FORMAT_VERSION {
        return Err(FormatError::VersionMismatch {
            found: version,
            expected: INDEX_FORMAT_VERSION,
        });
    }
    let count: usize = r.keyed_value("COUNT")?;
    let mut index = NamedIndex::new();
    for _ in 0..count {
        let name = r.next_line()?;
        index.add_name(name)?;
    }
    tracing::trace!(count, line = r.line_no(), "decoded named index");
    Ok(index)
}
