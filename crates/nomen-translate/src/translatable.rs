//! The remapping capability: [`Translatable`] for values that can be
//! re-laid-out by a translator, and [`Mappable`] for values that also
//! remember which schema each of their identifiers currently follows.

use nomen_core::{NamedIndex, TranslateError};

use crate::table::MappingTable;
use crate::translator::IndexTranslator;

/// A value whose layout depends on one or more named indices.
///
/// Implementors re-lay-out the fields governed by `id` using the
/// translator's operations and ignore identifiers they do not know.
/// Translation is two-phase: [`check_translator`](Self::check_translator)
/// validates every governed field without touching it, and
/// [`apply_translator`](Self::apply_translator) must not fail once the
/// check has passed. The translator's `check_*` methods mirror its
/// re-layout operations for this purpose.
///
/// Implementations should treat an empty field as not yet allocated;
/// [`IndexTranslator::translate`] does this automatically, so the first
/// translation from an empty index allocates every dependent field.
///
/// Lightweight values (a single score vector, one label) implement only
/// this trait and rely on their owner to supply a translator that matches
/// their current shape.
///
/// # Examples
///
/// ```
/// use nomen_core::{NamedIndex, TranslateError};
/// use nomen_translate::{IndexTranslator, Translatable};
///
/// struct Scores(Vec<f32>);
///
/// impl Translatable for Scores {
///     fn check_translator(
///         &self,
///         id: &str,
///         translator: &IndexTranslator,
///     ) -> Result<(), TranslateError> {
///         if id == "classes" {
///             translator.check_sequence(&self.0)?;
///         }
///         Ok(())
///     }
///
///     fn apply_translator(
///         &mut self,
///         id: &str,
///         translator: &IndexTranslator,
///     ) -> Result<(), TranslateError> {
///         if id == "classes" {
///             translator.translate(&mut self.0, 0.0)?;
///         }
///         Ok(())
///     }
/// }
///
/// let old = NamedIndex::from_names(["car", "bus"]).unwrap();
/// let new = NamedIndex::from_names(["bus", "tram"]).unwrap();
/// let mut scores = Scores(vec![0.9, 0.1]);
/// scores
///     .apply_translator("classes", &IndexTranslator::new(&old, &new))
///     .unwrap();
/// assert_eq!(scores.0, vec![0.1, 0.0]);
/// ```
pub trait Translatable {
    /// Fail if [`apply_translator`](Self::apply_translator) with the same
    /// arguments would fail. Must not modify anything.
    fn check_translator(
        &self,
        id: &str,
        translator: &IndexTranslator,
    ) -> Result<(), TranslateError>;

    /// Update internal state laid out against `translator.old_index()` to
    /// match `translator.new_index()`, for the schema named `id`.
    fn apply_translator(
        &mut self,
        id: &str,
        translator: &IndexTranslator,
    ) -> Result<(), TranslateError>;
}

/// Forwards the same identifier and translator to every element.
impl<T: Translatable> Translatable for Vec<T> {
    fn check_translator(
        &self,
        id: &str,
        translator: &IndexTranslator,
    ) -> Result<(), TranslateError> {
        self.iter()
            .try_for_each(|item| item.check_translator(id, translator))
    }

    fn apply_translator(
        &mut self,
        id: &str,
        translator: &IndexTranslator,
    ) -> Result<(), TranslateError> {
        for item in self.iter_mut() {
            item.apply_translator(id, translator)?;
        }
        Ok(())
    }
}

/// A [`Translatable`] that owns the current [`NamedIndex`] of each of its
/// identifiers and derives translators itself.
///
/// Implementors provide access to their [`MappingTable`]; the provided
/// methods do the rest. Each identifier is translated independently and
/// only when its own schema changes.
///
/// There is no internal locking. A mapping that fails its check leaves
/// both the data and the table as they were, so the caller can repair the
/// offending field and retry.
pub trait Mappable: Translatable {
    /// The table of current indices.
    fn mapping_table(&self) -> &MappingTable;

    /// Mutable access to the table of current indices.
    fn mapping_table_mut(&mut self) -> &mut MappingTable;

    /// The current index for `id`, if any.
    fn mapping(&self, id: &str) -> Option<&NamedIndex> {
        self.mapping_table().get(id)
    }

    /// Returns `true` if a schema has been applied under `id`.
    fn has_mapping(&self, id: &str) -> bool {
        self.mapping_table().contains(id)
    }

    /// Move to `new_index` for `id`.
    ///
    /// The translator runs from the index currently recorded for `id`, or
    /// from an empty index if there is none yet, in which case every
    /// dependent field is allocated at the new size. `new_index` becomes
    /// current only after [`apply_translator`](Translatable::apply_translator)
    /// succeeds.
    fn apply_mapping(&mut self, id: &str, new_index: &NamedIndex) -> Result<(), TranslateError> {
        let translator = match self.mapping(id) {
            Some(current) => IndexTranslator::new(current, new_index),
            None => IndexTranslator::new(&NamedIndex::new(), new_index),
        };
        self.apply_recorded_translator(id, &translator)
    }

    /// Apply every association of `other`, in its iteration order.
    fn apply_mappings_from(&mut self, other: &MappingTable) -> Result<(), TranslateError> {
        for (id, index) in other.iter() {
            self.apply_mapping(id, index)?;
        }
        Ok(())
    }

    /// Run an externally built translator, then record its new index as
    /// current for `id`.
    ///
    /// The translator's old index must describe this value's current
    /// layout for `id`; only shape mismatches and out-of-range stored
    /// indices are detected, before anything is modified.
    fn apply_recorded_translator(
        &mut self,
        id: &str,
        translator: &IndexTranslator,
    ) -> Result<(), TranslateError> {
        tracing::debug!(
            id,
            old_size = translator.old_size(),
            new_size = translator.new_size(),
            removed = translator.removed_names().count(),
            added = translator.added_names().count(),
            "applying mapping"
        );
        self.check_translator(id, translator)?;
        self.apply_translator(id, translator)?;
        self.mapping_table_mut()
            .record(id, translator.new_index().clone());
        Ok(())
    }
}
