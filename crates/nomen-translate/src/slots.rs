//! The [`SlotSeq`] capability: an indexable sequence that can be rebuilt
//! at a new length.
//!
//! Translation never grows or shrinks a sequence in place. It builds a
//! fresh sequence of the new size filled with a default, copies surviving
//! slots across, and swaps it in. Any container that can do those three
//! things can be re-laid-out by an
//! [`IndexTranslator`](crate::IndexTranslator).

use std::collections::VecDeque;

use smallvec::{Array, SmallVec};

/// A dense sequence of slots addressed by position.
pub trait SlotSeq {
    /// The per-slot value.
    type Item: Clone;

    /// Number of slots.
    fn slot_len(&self) -> usize;

    /// The slot at `index`, or `None` if out of range.
    fn slot(&self, index: usize) -> Option<&Self::Item>;

    /// Mutable access to the slot at `index`, or `None` if out of range.
    fn slot_mut(&mut self, index: usize) -> Option<&mut Self::Item>;

    /// A sequence of `len` slots, each set to `value`.
    fn filled(len: usize, value: Self::Item) -> Self
    where
        Self: Sized;
}

impl<T: Clone> SlotSeq for Vec<T> {
    type Item = T;

    fn slot_len(&self) -> usize {
        self.len()
    }

    fn slot(&self, index: usize) -> Option<&T> {
        self.get(index)
    }

    fn slot_mut(&mut self, index: usize) -> Option<&mut T> {
        self.get_mut(index)
    }

    fn filled(len: usize, value: T) -> Self {
        vec![value; len]
    }
}

impl<T: Clone> SlotSeq for VecDeque<T> {
    type Item = T;

    fn slot_len(&self) -> usize {
        self.len()
    }

    fn slot(&self, index: usize) -> Option<&T> {
        self.get(index)
    }

    fn slot_mut(&mut self, index: usize) -> Option<&mut T> {
        self.get_mut(index)
    }

    fn filled(len: usize, value: T) -> Self {
        VecDeque::from(vec![value; len])
    }
}

impl<A> SlotSeq for SmallVec<A>
where
    A: Array,
    A::Item: Clone,
{
    type Item = A::Item;

    fn slot_len(&self) -> usize {
        self.len()
    }

    fn slot(&self, index: usize) -> Option<&A::Item> {
        self.get(index)
    }

    fn slot_mut(&mut self, index: usize) -> Option<&mut A::Item> {
        self.get_mut(index)
    }

    fn filled(len: usize, value: A::Item) -> Self {
        SmallVec::from_elem(value, len)
    }
}
