//! Benchmark profiles for the nomen schema-evolution toolkit.
//!
//! - [`wide_index`]: `n` synthetic names
//! - [`shuffled`]: a deterministic permutation of an index
//! - [`evolved`]: an index with every k-th name dropped and new names appended

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use nomen_core::NamedIndex;

/// An index of `n` names `slot_0 .. slot_{n-1}`.
pub fn wide_index(n: usize) -> NamedIndex {
    NamedIndex::from_names((0..n).map(|i| format!("slot_{i}"))).unwrap()
}

/// A deterministic permutation of `index` driven by `seed`.
pub fn shuffled(index: &NamedIndex, seed: u64) -> NamedIndex {
    let mut names: Vec<&str> = index.names().collect();
    let mut state = seed | 1;
    for i in (1..names.len()).rev() {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let j = (state >> 33) as usize % (i + 1);
        names.swap(i, j);
    }
    NamedIndex::from_names(names).unwrap()
}

/// `index` with every `drop_every`-th name removed and `added` fresh
/// names appended.
///
/// # Panics
///
/// If `index` already holds one of the `fresh_{i}` names.
pub fn evolved(index: &NamedIndex, drop_every: usize, added: usize) -> NamedIndex {
    let kept = index
        .names()
        .enumerate()
        .filter(|(i, _)| drop_every == 0 || i % drop_every != 0)
        .map(|(_, name)| name.to_owned());
    let fresh = (0..added).map(|i| format!("fresh_{i}"));
    NamedIndex::from_names(kept.chain(fresh)).unwrap()
}
