//! Index translation and schema-driven re-layout for nomen.
//!
//! When the [`NamedIndex`](nomen_core::NamedIndex) behind some data
//! changes, an [`IndexTranslator`] computes where each old slot now
//! lives and re-lays-out dependent sequences ([`SlotSeq`]) and 2-D arrays
//! ([`Grid`]) to match.
//!
//! # Architecture
//!
//! - [`IndexTranslator`] owns the old→new correspondence and the generic
//!   1-D algorithm; row and column translation of a [`Grid`] delegate to it
//! - [`Translatable`] is the remapping hook a data type implements: a
//!   side-effect-free check followed by the re-layout itself
//! - [`Mappable`] adds a [`MappingTable`] so a type derives its own
//!   translators from successive schema versions
//!
//! Everything is synchronous and works on exclusively borrowed data.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod grid;
pub mod slots;
pub mod table;
pub mod translatable;
pub mod translator;

pub use grid::Grid;
pub use slots::SlotSeq;
pub use table::{MappingTable, TABLE_TAG};
pub use translatable::{Mappable, Translatable};
pub use translator::IndexTranslator;
