//! nomen: schema evolution for named, densely indexed data.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the nomen sub-crates. A program keeps a stable set of named slots (class
//! labels, feature dimensions) in a [`NamedIndex`](index::NamedIndex); when
//! the set changes, every array indexed by the old set is re-laid-out to
//! the new one through an [`IndexTranslator`](translate::IndexTranslator).
//!
//! # Quick start
//!
//! ```rust
//! use nomen::prelude::*;
//!
//! #[derive(Default)]
//! struct Classifier {
//!     mappings: MappingTable,
//!     bias: Vec<f32>,
//!     confusion: Grid<u32>,
//! }
//!
//! impl Translatable for Classifier {
//!     fn check_translator(
//!         &self,
//!         id: &str,
//!         translator: &IndexTranslator,
//!     ) -> Result<(), TranslateError> {
//!         if id == "classes" {
//!             translator.check_sequence(&self.bias)?;
//!             translator.check_rows(&self.confusion)?;
//!             translator.check_cols(&self.confusion)?;
//!         }
//!         Ok(())
//!     }
//!
//!     fn apply_translator(
//!         &mut self,
//!         id: &str,
//!         translator: &IndexTranslator,
//!     ) -> Result<(), TranslateError> {
//!         if id == "classes" {
//!             translator.translate(&mut self.bias, 0.0)?;
//!             translator.translate_rows(&mut self.confusion, 0)?;
//!             translator.translate_cols(&mut self.confusion, 0)?;
//!         }
//!         Ok(())
//!     }
//! }
//!
//! impl Mappable for Classifier {
//!     fn mapping_table(&self) -> &MappingTable { &self.mappings }
//!     fn mapping_table_mut(&mut self) -> &mut MappingTable { &mut self.mappings }
//! }
//!
//! let mut clf = Classifier::default();
//! let v1 = NamedIndex::from_names(["car", "pedestrian", "bicyclist"]).unwrap();
//! clf.apply_mapping("classes", &v1).unwrap();
//! assert_eq!(clf.bias, vec![0.0; 3]);
//! assert_eq!((clf.confusion.rows(), clf.confusion.cols()), (3, 3));
//!
//! clf.bias = vec![0.5, 0.25, 0.125];
//! let v2 = NamedIndex::from_names(["bicyclist", "car", "bus"]).unwrap();
//! clf.apply_mapping("classes", &v2).unwrap();
//! assert_eq!(clf.bias, vec![0.125, 0.5, 0.0]);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`index`] | `nomen-core` | `NamedIndex`, error types, text codec, file persistence |
//! | [`translate`] | `nomen-translate` | `IndexTranslator`, `Grid`, `SlotSeq`, `Translatable`, `Mappable` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Named indices, errors, codec and persistence (`nomen-core`).
pub use nomen_core as index;

/// Translators, re-layout targets and the mapping traits (`nomen-translate`).
pub use nomen_translate as translate;

/// Common imports for working with nomen.
///
/// ```rust
/// use nomen::prelude::*;
/// ```
pub mod prelude {
    pub use nomen_core::{
        load, save, Axis, FormatError, NameDiff, NameError, NamedIndex, Persist, PersistError,
        TranslateError,
    };
    pub use nomen_translate::{
        Grid, IndexTranslator, Mappable, MappingTable, SlotSeq, Translatable,
    };
}
