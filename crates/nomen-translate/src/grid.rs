//! Dense row-major 2-D arrays.

use std::ops::{Index, IndexMut};

use nomen_core::{Axis, TranslateError};

/// A dense `rows × cols` array stored row-major.
///
/// Either axis may be indexed by a [`NamedIndex`](nomen_core::NamedIndex);
/// see [`IndexTranslator::translate_rows`](crate::IndexTranslator::translate_rows)
/// and [`IndexTranslator::translate_cols`](crate::IndexTranslator::translate_cols).
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T> Grid<T> {
    /// A `0 × 0` grid.
    pub fn empty() -> Self {
        Self {
            rows: 0,
            cols: 0,
            data: Vec::new(),
        }
    }

    /// A `rows × cols` grid with every cell set to `fill`.
    pub fn new(rows: usize, cols: usize, fill: T) -> Self
    where
        T: Clone,
    {
        Self {
            rows,
            cols,
            data: vec![fill; rows * cols],
        }
    }

    /// A `rows × cols` grid with cell `(r, c)` set to `f(r, c)`.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Self { rows, cols, data }
    }

    /// Build a grid from row vectors. All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, TranslateError> {
        let cols = rows.first().map_or(0, Vec::len);
        let n_rows = rows.len();
        let mut data = Vec::with_capacity(n_rows * cols);
        for row in rows {
            if row.len() != cols {
                return Err(TranslateError::ShapeMismatch {
                    axis: Axis::Cols,
                    expected: cols,
                    found: row.len(),
                });
            }
            data.extend(row);
        }
        Ok(Self {
            rows: n_rows,
            cols,
            data,
        })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns `true` if the grid holds no cells.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The cell at `(row, col)`, or `None` if out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Mutable access to the cell at `(row, col)`.
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        if row < self.rows && col < self.cols {
            self.data.get_mut(row * self.cols + col)
        } else {
            None
        }
    }

    /// Row `row` as a slice.
    pub fn row(&self, row: usize) -> Option<&[T]> {
        if row < self.rows {
            let start = row * self.cols;
            Some(&self.data[start..start + self.cols])
        } else {
            None
        }
    }

    /// Iterate over column `col` from top to bottom.
    pub fn column(&self, col: usize) -> impl Iterator<Item = &T> + '_ {
        let cols = self.cols;
        let take = if col < cols { self.rows } else { 0 };
        self.data.iter().skip(col).step_by(cols.max(1)).take(take)
    }

    /// The cells in row-major order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// A `cols × rows` grid with cell `(c, r)` equal to `self[(r, c)]`.
    pub fn transpose(&self) -> Self
    where
        T: Clone,
    {
        Self::from_fn(self.cols, self.rows, |r, c| self.data[c * self.cols + r].clone())
    }
}

impl<T> Default for Grid<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(
            row < self.rows && col < self.cols,
            "cell ({row}, {col}) out of range for {}x{} grid",
            self.rows,
            self.cols
        );
        &self.data[row * self.cols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        assert!(
            row < self.rows && col < self.cols,
            "cell ({row}, {col}) out of range for {}x{} grid",
            self.rows,
            self.cols
        );
        &mut self.data[row * self.cols + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Grid<i32> {
        Grid::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap()
    }

    #[test]
    fn from_rows_is_row_major() {
        let g = sample();
        assert_eq!(g.rows(), 2);
        assert_eq!(g.cols(), 3);
        assert_eq!(g.as_slice(), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(g[(1, 0)], 4);
        assert_eq!(g.row(0), Some(&[1, 2, 3][..]));
        assert_eq!(g.column(2).copied().collect::<Vec<_>>(), vec![3, 6]);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = Grid::from_rows(vec![vec![1, 2], vec![3]]).unwrap_err();
        assert_eq!(
            err,
            TranslateError::ShapeMismatch {
                axis: Axis::Cols,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn out_of_range_access_returns_none() {
        let mut g = sample();
        assert!(g.get(2, 0).is_none());
        assert!(g.get(0, 3).is_none());
        assert!(g.get_mut(5, 5).is_none());
        assert!(g.row(2).is_none());
        assert_eq!(g.column(3).count(), 0);
    }

    #[test]
    fn transpose_swaps_axes() {
        let t = sample().transpose();
        assert_eq!(t.rows(), 3);
        assert_eq!(t.cols(), 2);
        assert_eq!(t.as_slice(), &[1, 4, 2, 5, 3, 6]);
        assert_eq!(t.transpose(), sample());
    }

    #[test]
    fn empty_grids() {
        let g: Grid<u8> = Grid::default();
        assert!(g.is_empty());
        assert_eq!(g.column(0).count(), 0);
        let wide: Grid<u8> = Grid::new(0, 4, 0);
        assert!(wide.is_empty());
        assert_eq!(wide.cols(), 4);
        assert_eq!(wide.transpose().rows(), 4);
    }

    #[test]
    fn index_mut_writes_cell() {
        let mut g = Grid::new(2, 2, 0);
        g[(0, 1)] = 9;
        *g.get_mut(1, 0).unwrap() = 7;
        assert_eq!(g.as_slice(), &[0, 9, 7, 0]);
    }
}
