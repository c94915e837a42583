//! The [`NamedIndex`] bijection between names and dense indices.

use std::fmt;
use std::fmt::Write as _;
use std::ops::{Add, AddAssign};

use indexmap::IndexSet;

use crate::error::NameError;

/// An ordered, duplicate-free sequence of names.
///
/// The position of a name is its index: the n-th name added gets index
/// `n`. Lookups in both directions are O(1). An index only ever grows by
/// appending; a schema change is expressed by building a new `NamedIndex`
/// and handing it to a translator, never by editing one in place.
///
/// Equality is order-sensitive. Use [`is_permutation`](Self::is_permutation)
/// to compare name sets regardless of order.
///
/// # Examples
///
/// ```
/// use nomen_core::NamedIndex;
///
/// let mut classes = NamedIndex::new();
/// classes.add_names(["car", "pedestrian", "bicyclist"]).unwrap();
///
/// assert_eq!(classes.len(), 3);
/// assert_eq!(classes.to_id("pedestrian").unwrap(), 1);
/// assert_eq!(classes.to_name(2).unwrap(), "bicyclist");
/// assert!(classes.add_name("car").is_err());
/// assert!(classes.add_name("traffic light").is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct NamedIndex {
    names: IndexSet<String>,
}

impl NamedIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from names in order.
    ///
    /// Fails on the first malformed or duplicate name.
    pub fn from_names<I, S>(names: I) -> Result<Self, NameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index = Self::new();
        index.add_names(names)?;
        Ok(index)
    }

    /// Append `name` at the next free index and return that index.
    ///
    /// Names must contain no whitespace and not already be present.
    pub fn add_name(&mut self, name: impl Into<String>) -> Result<usize, NameError> {
        let name = name.into();
        if !is_valid_name(&name) {
            return Err(NameError::MalformedName { name });
        }
        if self.names.contains(name.as_str()) {
            return Err(NameError::DuplicateName { name });
        }
        let (id, _) = self.names.insert_full(name);
        Ok(id)
    }

    /// Append each name in order. Stops at the first rejected name; names
    /// before it stay added.
    pub fn add_names<I, S>(&mut self, names: I) -> Result<(), NameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.add_name(name)?;
        }
        Ok(())
    }

    /// Append every name of `other` that is not already present.
    ///
    /// Existing names keep their indices; the appended tail follows
    /// `other`'s order.
    pub fn merge(&mut self, other: &NamedIndex) {
        for name in other.names() {
            if !self.names.contains(name) {
                self.names.insert(name.to_owned());
            }
        }
    }

    /// A copy of `self` with [`merge`](Self::merge)`(other)` applied.
    ///
    /// Not symmetric: `self` determines the leading order.
    pub fn union(&self, other: &NamedIndex) -> NamedIndex {
        let mut merged = self.clone();
        merged.merge(other);
        merged
    }

    /// The name at `id`.
    pub fn to_name(&self, id: usize) -> Result<&str, NameError> {
        self.get_name(id).ok_or(NameError::IndexOutOfRange {
            index: id,
            size: self.len(),
        })
    }

    /// The index of `name`.
    pub fn to_id(&self, name: &str) -> Result<usize, NameError> {
        self.get_id(name).ok_or_else(|| NameError::NameNotFound {
            name: name.to_owned(),
        })
    }

    /// The name at `id`, or `None` if out of range.
    pub fn get_name(&self, id: usize) -> Option<&str> {
        self.names.get_index(id).map(String::as_str)
    }

    /// The index of `name`, or `None` if absent.
    pub fn get_id(&self, name: &str) -> Option<usize> {
        self.names.get_index_of(name)
    }

    /// Returns `true` if `name` is present.
    pub fn has_name(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Returns `true` if `id` is a valid index.
    pub fn has_id(&self, id: usize) -> bool {
        id < self.names.len()
    }

    /// Number of names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if no names have been added.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate over names in index order.
    pub fn names(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }

    /// Returns `true` if both indices hold the same names, in any order.
    pub fn is_permutation(&self, other: &NamedIndex) -> bool {
        self.len() == other.len() && self.names().all(|name| other.has_name(name))
    }

    /// Names present on only one side.
    pub fn diff(&self, other: &NamedIndex) -> NameDiff {
        NameDiff {
            here_but_not_there: self
                .names()
                .filter(|name| !other.has_name(name))
                .map(str::to_owned)
                .collect(),
            there_but_not_here: other
                .names()
                .filter(|name| !self.has_name(name))
                .map(str::to_owned)
                .collect(),
        }
    }

    /// Render one `"<prefix><id>: <name>"` line per name.
    pub fn status(&self, prefix: &str) -> String {
        let mut out = String::new();
        for (id, name) in self.names().enumerate() {
            let _ = writeln!(out, "{prefix}{id}: {name}");
        }
        out
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.chars().any(char::is_whitespace)
}

impl PartialEq for NamedIndex {
    fn eq(&self, other: &Self) -> bool {
        // IndexSet equality ignores order; index assignment must match here.
        self.len() == other.len() && self.names().eq(other.names())
    }
}

impl Eq for NamedIndex {}

impl AddAssign<&NamedIndex> for NamedIndex {
    fn add_assign(&mut self, other: &NamedIndex) {
        self.merge(other);
    }
}

impl Add<&NamedIndex> for &NamedIndex {
    type Output = NamedIndex;

    fn add(self, other: &NamedIndex) -> NamedIndex {
        self.union(other)
    }
}

impl fmt::Display for NamedIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.status(""))
    }
}

/// The two one-sided set differences between a pair of indices.
///
/// Produced by [`NamedIndex::diff`]. Each side keeps the order of the
/// index it came from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NameDiff {
    /// Names in the receiver but not in the argument.
    pub here_but_not_there: Vec<String>,
    /// Names in the argument but not in the receiver.
    pub there_but_not_here: Vec<String>,
}

impl NameDiff {
    /// Returns `true` if both sides are empty, i.e. the indices are
    /// permutations of each other.
    pub fn is_empty(&self) -> bool {
        self.here_but_not_there.is_empty() && self.there_but_not_here.is_empty()
    }
}

impl fmt::Display for NameDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "here_but_not_there:")?;
        for name in &self.here_but_not_there {
            writeln!(f, "{name}")?;
        }
        writeln!(f, "there_but_not_here:")?;
        for name in &self.there_but_not_here {
            writeln!(f, "{name}")?;
        }
        Ok(())
    }
}
