//! Core types for the nomen schema-evolution toolkit.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the [`NamedIndex`] bijection between names and dense indices, the
//! error types used throughout the workspace, the line-oriented text
//! codec, and scoped-file persistence.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod error;
pub mod index;
pub mod persist;

pub use codec::{read_index, write_index, LineReader, INDEX_FORMAT_VERSION, INDEX_TAG};
pub use error::{Axis, FormatError, NameError, PersistError, TranslateError};
pub use index::{NameDiff, NamedIndex};
pub use persist::{from_text, load, save, to_text, Persist};
