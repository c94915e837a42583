//! [`MappingTable`]: the identifier → current [`NamedIndex`] associations
//! of a mapped container.

use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;

use nomen_core::{FormatError, LineReader, NamedIndex, Persist};

/// Tag line opening an encoded [`MappingTable`].
pub const TABLE_TAG: &str = "MappingTable";

/// Current named indices of a container, keyed by mapping identifier.
///
/// Each identifier governs one independent schema, e.g. `"classes"` for a
/// label space and `"features"` for a weight vector. Entries are created
/// on first association and replaced wholesale afterwards; there is no
/// removal. Iteration is in identifier order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MappingTable {
    mappings: BTreeMap<String, NamedIndex>,
}

impl MappingTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current index for `id`, or `None` if no schema has been
    /// applied under that identifier.
    pub fn get(&self, id: &str) -> Option<&NamedIndex> {
        self.mappings.get(id)
    }

    /// Returns `true` if `id` has a current index.
    pub fn contains(&self, id: &str) -> bool {
        self.mappings.contains_key(id)
    }

    /// Make `index` current for `id`, returning the index it replaces.
    pub fn record(&mut self, id: impl Into<String>, index: NamedIndex) -> Option<NamedIndex> {
        self.mappings.insert(id.into(), index)
    }

    /// Number of identifiers.
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    /// Returns `true` if no identifier has an index.
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Iterate over `(identifier, index)` pairs in identifier order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &NamedIndex)> + '_ {
        self.mappings.iter().map(|(id, index)| (id.as_str(), index))
    }

    /// Returns `true` if both tables have the same identifiers and each
    /// pair of indices holds the same names, in any order.
    pub fn is_permutation_of(&self, other: &MappingTable) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(id, index)| other.get(id).is_some_and(|o| o.is_permutation(index)))
    }

    /// Render each identifier followed by its index listing.
    pub fn status(&self, prefix: &str) -> String {
        let mut out = String::new();
        for (id, index) in self.iter() {
            out.push_str(&format!("{prefix}NamedIndex \"{id}\"\n"));
            out.push_str(&index.status(prefix));
        }
        out
    }
}

impl fmt::Display for MappingTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.status(""))
    }
}

impl Persist for MappingTable {
    /// ```text
    /// MappingTable
    /// COUNT <n>
    /// <identifier>
    /// <encoded NamedIndex>
    /// ...
    /// ```
    fn write_to(&self, w: &mut dyn Write) -> Result<(), FormatError> {
        writeln!(w, "{TABLE_TAG}")?;
        writeln!(w, "COUNT {}", self.len())?;
        for (id, index) in self.iter() {
            if id.is_empty() || id.contains(['\n', '\r']) {
                return Err(FormatError::Malformed {
                    detail: format!("mapping identifier {id:?} cannot be written on one line"),
                });
            }
            writeln!(w, "{id}")?;
            index.write_to(w)?;
        }
        Ok(())
    }

    /// Restores the table verbatim. No translation is run; data loaded
    /// alongside must already match the restored indices.
    fn read_from(r: &mut LineReader<'_>) -> Result<Self, FormatError> {
        r.expect_tag(TABLE_TAG)?;
        let count: usize = r.keyed_value("COUNT")?;
        let mut table = MappingTable::new();
        for _ in 0..count {
            let id = r.next_line()?;
            if id.is_empty() {
                return Err(FormatError::Malformed {
                    detail: format!("line {}: empty mapping identifier", r.line_no()),
                });
            }
            let index = NamedIndex::read_from(r)?;
            if table.record(id.clone(), index).is_some() {
                return Err(FormatError::Malformed {
                    detail: format!("line {}: identifier \"{id}\" appears twice", r.line_no()),
                });
            }
        }
        tracing::trace!(count, "decoded mapping table");
        Ok(table)
    }
}
