//! The [`IndexTranslator`]: old-index to new-index correspondence and the
//! generic re-layout operations built on it.

use std::fmt;

use nomen_core::{Axis, NamedIndex, TranslateError};

use crate::grid::Grid;
use crate::slots::SlotSeq;

/// Correspondence from the indices of an old [`NamedIndex`] to those of a
/// new one, computed by matching names.
///
/// Built once per schema change and discarded after use. Both indices are
/// owned copies, so the translator stays valid whatever happens to the
/// values it was built from.
///
/// A name present in the old index but absent from the new one has no
/// correspondence (`None`). A name that only appears in the new index
/// receives no slot from the old data and is filled with the caller's
/// default by the re-layout operations. A rename is therefore a removal
/// plus an addition.
///
/// # Examples
///
/// ```
/// use nomen_core::NamedIndex;
/// use nomen_translate::IndexTranslator;
///
/// let old = NamedIndex::from_names(["car", "pedestrian", "bicyclist"]).unwrap();
/// let new = NamedIndex::from_names(["pedestrian", "bicyclist", "motorcyclist"]).unwrap();
/// let translator = IndexTranslator::new(&old, &new);
///
/// let mut scores = vec![10, 1, 2];
/// translator.translate(&mut scores, 0).unwrap();
/// assert_eq!(scores, vec![1, 2, 0]);
///
/// assert_eq!(translator.translate_id(Some(0)).unwrap(), None);
/// assert_eq!(translator.translate_id(Some(2)).unwrap(), Some(1));
/// ```
#[derive(Clone, Debug)]
pub struct IndexTranslator {
    old: NamedIndex,
    new: NamedIndex,
    old_to_new: Vec<Option<usize>>,
}

impl IndexTranslator {
    /// Compute the correspondence from `old` to `new`.
    pub fn new(old: &NamedIndex, new: &NamedIndex) -> Self {
        Self::from_owned(old.clone(), new.clone())
    }

    /// Like [`new`](Self::new), taking ownership of both indices.
    pub fn from_owned(old: NamedIndex, new: NamedIndex) -> Self {
        let old_to_new = old.names().map(|name| new.get_id(name)).collect();
        Self {
            old,
            new,
            old_to_new,
        }
    }

    /// The translator from `index` to itself.
    pub fn identity(index: &NamedIndex) -> Self {
        Self::new(index, index)
    }

    /// The index data is being translated from.
    pub fn old_index(&self) -> &NamedIndex {
        &self.old
    }

    /// The index data is being translated to.
    pub fn new_index(&self) -> &NamedIndex {
        &self.new
    }

    /// Number of names in the old index.
    pub fn old_size(&self) -> usize {
        self.old.len()
    }

    /// Number of names in the new index.
    pub fn new_size(&self) -> usize {
        self.new.len()
    }

    /// The full correspondence table, one entry per old index.
    pub fn correspondences(&self) -> &[Option<usize>] {
        &self.old_to_new
    }

    /// Returns `true` if every old index maps to itself and no names were
    /// added.
    pub fn is_identity(&self) -> bool {
        self.old == self.new
    }

    /// Names of the old index with no counterpart in the new one.
    pub fn removed_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.old
            .names()
            .zip(&self.old_to_new)
            .filter(|(_, new)| new.is_none())
            .map(|(name, _)| name)
    }

    /// Names of the new index with no counterpart in the old one.
    pub fn added_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.new.names().filter(|name| !self.old.has_name(name))
    }

    /// The new index for `old`, or `None` if its name was removed.
    ///
    /// Fails if `old` is not a valid index of the old [`NamedIndex`].
    pub fn to_new(&self, old: usize) -> Result<Option<usize>, TranslateError> {
        self.old_to_new
            .get(old)
            .copied()
            .ok_or(TranslateError::IndexOutOfRange {
                index: old,
                size: self.old_size(),
            })
    }

    /// Translate a stored index-or-`None`.
    ///
    /// `None` stays `None`: a "not applicable" marker is never given a
    /// meaning by translation.
    pub fn translate_id(&self, id: Option<usize>) -> Result<Option<usize>, TranslateError> {
        match id {
            None => Ok(None),
            Some(old) => self.to_new(old),
        }
    }

    /// Translate every stored index-or-`None` in place.
    ///
    /// Nothing is written unless every entry is valid.
    pub fn translate_ids(&self, ids: &mut [Option<usize>]) -> Result<(), TranslateError> {
        self.check_ids(ids)?;
        for id in ids.iter_mut() {
            *id = id.and_then(|old| self.old_to_new[old]);
        }
        Ok(())
    }

    /// Re-lay-out a sequence indexed by the old index.
    ///
    /// The result has [`new_size`](Self::new_size) slots. Slot `j` holds the
    /// old slot whose name now lives at `j`; slots for names new to this
    /// schema are set to `default`.
    ///
    /// An empty `target` is treated as not yet allocated and becomes
    /// `new_size` copies of `default`. Any other length must equal
    /// [`old_size`](Self::old_size).
    pub fn translate<S: SlotSeq>(
        &self,
        target: &mut S,
        default: S::Item,
    ) -> Result<(), TranslateError> {
        self.relayout(target, default, Axis::Sequence)
    }

    /// Re-lay-out a grid whose rows are indexed by the old index.
    ///
    /// Each column is translated as a sequence; the column count and the
    /// order of columns are unchanged. A grid with zero rows is allocated
    /// to `new_size` rows of `default`.
    pub fn translate_rows<T: Clone>(
        &self,
        target: &mut Grid<T>,
        default: T,
    ) -> Result<(), TranslateError> {
        self.check_rows(target)?;
        let cols = target.cols();
        let mut columns = Vec::with_capacity(cols);
        for c in 0..cols {
            let mut column: Vec<T> = target.column(c).cloned().collect();
            self.relayout(&mut column, default.clone(), Axis::Rows)?;
            columns.push(column);
        }
        *target = Grid::from_fn(self.new_size(), cols, |r, c| columns[c][r].clone());
        Ok(())
    }

    /// Re-lay-out a grid whose columns are indexed by the old index.
    ///
    /// Mirror of [`translate_rows`](Self::translate_rows): each row is
    /// translated as a sequence.
    pub fn translate_cols<T: Clone>(
        &self,
        target: &mut Grid<T>,
        default: T,
    ) -> Result<(), TranslateError> {
        self.check_cols(target)?;
        let rows = target.rows();
        let mut translated = Vec::with_capacity(rows);
        for r in 0..rows {
            let mut row: Vec<T> = target.row(r).map(<[T]>::to_vec).unwrap_or_default();
            self.relayout(&mut row, default.clone(), Axis::Cols)?;
            translated.push(row);
        }
        *target = Grid::from_fn(rows, self.new_size(), |r, c| translated[r][c].clone());
        Ok(())
    }

    /// Fails exactly when [`translate_ids`](Self::translate_ids) would.
    pub fn check_ids(&self, ids: &[Option<usize>]) -> Result<(), TranslateError> {
        match ids.iter().flatten().find(|&&id| id >= self.old_size()) {
            Some(&bad) => Err(TranslateError::IndexOutOfRange {
                index: bad,
                size: self.old_size(),
            }),
            None => Ok(()),
        }
    }

    /// Fails exactly when [`translate`](Self::translate) would.
    pub fn check_sequence<S: SlotSeq>(&self, target: &S) -> Result<(), TranslateError> {
        self.check_extent(target.slot_len(), Axis::Sequence)
    }

    /// Fails exactly when [`translate_rows`](Self::translate_rows) would.
    pub fn check_rows<T>(&self, target: &Grid<T>) -> Result<(), TranslateError> {
        self.check_extent(target.rows(), Axis::Rows)
    }

    /// Fails exactly when [`translate_cols`](Self::translate_cols) would.
    pub fn check_cols<T>(&self, target: &Grid<T>) -> Result<(), TranslateError> {
        self.check_extent(target.cols(), Axis::Cols)
    }

    fn check_extent(&self, found: usize, axis: Axis) -> Result<(), TranslateError> {
        if found == 0 || found == self.old_size() {
            Ok(())
        } else {
            Err(TranslateError::ShapeMismatch {
                axis,
                expected: self.old_size(),
                found,
            })
        }
    }

    fn relayout<S: SlotSeq>(
        &self,
        target: &mut S,
        default: S::Item,
        axis: Axis,
    ) -> Result<(), TranslateError> {
        self.check_extent(target.slot_len(), axis)?;
        let mut out = S::filled(self.new_size(), default);
        if target.slot_len() > 0 {
            for (old, new) in self.old_to_new.iter().enumerate() {
                let Some(new) = *new else { continue };
                if let (Some(src), Some(dst)) = (target.slot(old), out.slot_mut(new)) {
                    *dst = src.clone();
                }
            }
        }
        *target = out;
        Ok(())
    }

    /// Render both indices and the correspondence table, each line
    /// prefixed with `prefix`.
    pub fn status(&self, prefix: &str) -> String {
        let mut out = format!("{prefix}Old mapping:\n{}", self.old.status(prefix));
        out.push_str(&format!("{prefix}New mapping:\n{}", self.new.status(prefix)));
        for (old, (name, new)) in self.old.names().zip(&self.old_to_new).enumerate() {
            let new = new.map(|n| n.to_string()).unwrap_or_default();
            out.push_str(&format!("{prefix}{old} <-> {new}\t\t{name}\n"));
        }
        out
    }
}

impl fmt::Display for IndexTranslator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.status(""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use smallvec::{smallvec, SmallVec};
    use std::collections::VecDeque;

    fn index(names: &[&str]) -> NamedIndex {
        NamedIndex::from_names(names.iter().copied()).unwrap()
    }

    fn old_classes() -> NamedIndex {
        index(&["car", "pedestrian", "bicyclist"])
    }

    #[test]
    fn removal_produces_none() {
        let t = IndexTranslator::new(&old_classes(), &index(&["bicyclist", "car"]));
        assert_eq!(t.to_new(0).unwrap(), Some(1));
        assert_eq!(t.to_new(1).unwrap(), None);
        assert_eq!(t.to_new(2).unwrap(), Some(0));
        assert_eq!(t.correspondences(), &[Some(1), None, Some(0)]);
        assert_eq!(t.removed_names().collect::<Vec<_>>(), vec!["pedestrian"]);
        assert_eq!(t.added_names().count(), 0);
    }

    #[test]
    fn to_new_rejects_out_of_range() {
        let t = IndexTranslator::identity(&old_classes());
        assert_eq!(
            t.to_new(3),
            Err(TranslateError::IndexOutOfRange { index: 3, size: 3 })
        );
    }

    #[test]
    fn translate_id_preserves_none() {
        let t = IndexTranslator::new(&old_classes(), &index(&["bicyclist"]));
        assert_eq!(t.translate_id(None).unwrap(), None);
        assert_eq!(t.translate_id(Some(0)).unwrap(), None);
        assert_eq!(t.translate_id(Some(2)).unwrap(), Some(0));
        assert!(t.translate_id(Some(9)).is_err());
    }

    #[test]
    fn translate_ids_is_all_or_nothing() {
        let new = index(&["pedestrian", "bicyclist", "motorcyclist"]);
        let t = IndexTranslator::new(&old_classes(), &new);

        let mut labels = vec![Some(0), Some(0), Some(2), Some(1), None];
        t.translate_ids(&mut labels).unwrap();
        assert_eq!(labels, vec![None, None, Some(1), Some(0), None]);

        let mut bad = vec![Some(1), Some(7)];
        assert!(t.translate_ids(&mut bad).is_err());
        assert_eq!(bad, vec![Some(1), Some(7)]);
    }

    #[test]
    fn sequence_translation_drops_and_defaults() {
        let new = index(&["pedestrian", "bicyclist", "motorcyclist"]);
        let t = IndexTranslator::new(&old_classes(), &new);
        let mut v = vec![10, 1, 2];
        t.translate(&mut v, 0).unwrap();
        assert_eq!(v, vec![1, 2, 0]);
        assert_eq!(t.added_names().collect::<Vec<_>>(), vec!["motorcyclist"]);
    }

    #[test]
    fn empty_sequence_is_allocated() {
        let t = IndexTranslator::new(&NamedIndex::new(), &old_classes());
        let mut v: Vec<f64> = Vec::new();
        t.translate(&mut v, 0.25).unwrap();
        assert_eq!(v, vec![0.25; 3]);

        // Allocation also applies when the old index is non-empty.
        let t = IndexTranslator::identity(&old_classes());
        let mut d: VecDeque<u8> = VecDeque::new();
        t.translate(&mut d, 4).unwrap();
        assert_eq!(d, VecDeque::from(vec![4, 4, 4]));
    }

    #[test]
    fn wrong_length_is_shape_mismatch() {
        let t = IndexTranslator::identity(&old_classes());
        let mut v = vec![1, 2];
        assert_eq!(
            t.translate(&mut v, 0),
            Err(TranslateError::ShapeMismatch {
                axis: Axis::Sequence,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(v, vec![1, 2]);
    }

    #[test]
    fn smallvec_targets_translate() {
        let t = IndexTranslator::new(&old_classes(), &index(&["bicyclist", "car", "bus"]));
        let mut v: SmallVec<[f32; 4]> = smallvec![0.5, 0.25, 0.125];
        t.translate(&mut v, -1.0).unwrap();
        assert_eq!(v.as_slice(), &[0.125, 0.5, -1.0]);
    }

    #[test]
    fn translate_rows_moves_whole_rows() {
        let new = index(&["pedestrian", "bicyclist", "motorcyclist"]);
        let t = IndexTranslator::new(&old_classes(), &new);
        // One column per sample; +1 marks the sample's class.
        let mut labels = Grid::from_rows(vec![
            vec![1, 1, -1, -1],
            vec![-1, -1, -1, 1],
            vec![-1, -1, 1, -1],
        ])
        .unwrap();
        t.translate_rows(&mut labels, 0).unwrap();
        let expected = Grid::from_rows(vec![
            vec![-1, -1, -1, 1],
            vec![-1, -1, 1, -1],
            vec![0, 0, 0, 0],
        ])
        .unwrap();
        assert_eq!(labels, expected);
    }

    #[test]
    fn translate_cols_moves_whole_columns() {
        let new = index(&["pedestrian", "bicyclist", "motorcyclist"]);
        let t = IndexTranslator::new(&old_classes(), &new);
        let mut g = Grid::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        t.translate_cols(&mut g, 9).unwrap();
        assert_eq!(g, Grid::from_rows(vec![vec![2, 3, 9], vec![5, 6, 9]]).unwrap());
    }

    #[test]
    fn grid_axis_mismatch_names_axis() {
        let t = IndexTranslator::identity(&old_classes());
        let mut g = Grid::new(2, 3, 0);
        assert_eq!(
            t.translate_rows(&mut g, 0),
            Err(TranslateError::ShapeMismatch {
                axis: Axis::Rows,
                expected: 3,
                found: 2
            })
        );
        let mut g = Grid::new(3, 2, 0);
        assert!(matches!(
            t.translate_cols(&mut g, 0),
            Err(TranslateError::ShapeMismatch { axis: Axis::Cols, .. })
        ));
        assert_eq!(g, Grid::new(3, 2, 0));
    }

    #[test]
    fn checks_agree_with_translations() {
        let t = IndexTranslator::new(&old_classes(), &index(&["bicyclist"]));
        assert!(t.check_sequence(&vec![1, 2, 3]).is_ok());
        assert!(t.check_sequence(&Vec::<i32>::new()).is_ok());
        assert_eq!(
            t.check_sequence(&VecDeque::from(vec![1, 2])),
            Err(TranslateError::ShapeMismatch {
                axis: Axis::Sequence,
                expected: 3,
                found: 2
            })
        );

        let g = Grid::new(3, 2, 0);
        assert!(t.check_rows(&g).is_ok());
        assert!(matches!(
            t.check_cols(&g),
            Err(TranslateError::ShapeMismatch { axis: Axis::Cols, found: 2, .. })
        ));

        assert!(t.check_ids(&[Some(2), None]).is_ok());
        assert_eq!(
            t.check_ids(&[Some(0), Some(3)]),
            Err(TranslateError::IndexOutOfRange { index: 3, size: 3 })
        );
    }

    #[test]
    fn empty_grid_axis_is_allocated() {
        let t = IndexTranslator::new(&NamedIndex::new(), &old_classes());
        let mut g: Grid<i32> = Grid::new(0, 2, 0);
        t.translate_rows(&mut g, 7).unwrap();
        assert_eq!(g, Grid::new(3, 2, 7));

        let mut g: Grid<i32> = Grid::new(4, 0, 0);
        t.translate_cols(&mut g, 1).unwrap();
        assert_eq!(g, Grid::new(4, 3, 1));
    }

    #[test]
    fn status_lists_correspondences() {
        let t = IndexTranslator::new(&index(&["a", "b"]), &index(&["b"]));
        let status = t.to_string();
        assert!(status.starts_with("Old mapping:\n0: a\n1: b\nNew mapping:\n0: b\n"));
        assert!(status.contains("0 <-> \t\ta\n"));
        assert!(status.contains("1 <-> 0\t\tb\n"));
    }

    fn arb_names() -> impl Strategy<Value = Vec<String>> {
        prop::collection::hash_set("[a-z]{1,5}", 0..10).prop_map(|set| set.into_iter().collect())
    }

    fn arb_pair() -> impl Strategy<Value = (NamedIndex, NamedIndex)> {
        (arb_names(), arb_names(), any::<bool>()).prop_map(|(a, b, merge)| {
            let old = NamedIndex::from_names(a).unwrap();
            let mut new = NamedIndex::from_names(b).unwrap();
            if merge {
                new.merge(&old);
            }
            (old, new)
        })
    }

    proptest! {
        #[test]
        fn identity_maps_every_index_to_itself(names in arb_names()) {
            let nm = NamedIndex::from_names(names).unwrap();
            let t = IndexTranslator::identity(&nm);
            prop_assert!(t.is_identity());
            for i in 0..nm.len() {
                prop_assert_eq!(t.to_new(i).unwrap(), Some(i));
            }
        }

        #[test]
        fn correspondences_match_names((old, new) in arb_pair()) {
            let t = IndexTranslator::new(&old, &new);
            prop_assert_eq!(t.correspondences().len(), old.len());
            for (i, name) in old.names().enumerate() {
                match t.to_new(i).unwrap() {
                    Some(j) => prop_assert_eq!(new.to_name(j).unwrap(), name),
                    None => prop_assert!(!new.has_name(name)),
                }
            }
        }

        #[test]
        fn translated_values_follow_their_names((old, new) in arb_pair()) {
            let t = IndexTranslator::new(&old, &new);
            let mut values: Vec<Option<String>> = old.names().map(|n| Some(n.to_owned())).collect();
            t.translate(&mut values, None).unwrap();
            prop_assert_eq!(values.len(), new.len());
            for (j, value) in values.iter().enumerate() {
                let name = new.to_name(j).unwrap();
                if old.has_name(name) {
                    prop_assert_eq!(value.as_deref(), Some(name));
                } else {
                    prop_assert_eq!(value, &None);
                }
            }
        }

        #[test]
        fn rows_equal_transposed_cols((old, new) in arb_pair(), cols in 0usize..4) {
            let t = IndexTranslator::new(&old, &new);
            let grid = Grid::from_fn(old.len(), cols, |r, c| (r * 10 + c) as i64);

            let mut by_rows = grid.clone();
            t.translate_rows(&mut by_rows, -1).unwrap();

            let mut by_cols = grid.transpose();
            t.translate_cols(&mut by_cols, -1).unwrap();

            prop_assert_eq!(by_rows, by_cols.transpose());
        }
    }
}
