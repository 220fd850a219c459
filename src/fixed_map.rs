//! A tiny fixed-capacity index-to-value mapping.
//!
//! Backs the initializer-list and for-each demos: it can be built from a
//! bracketed list, reassigned from another list, indexed, and iterated.
//! Deliberately minimal; this is a teaching container, not a collection you
//! would reach for in real code.

use std::ops::{Index, IndexMut};

/// Maximum number of values a [`FixedMap`] can hold.
pub const CAPACITY: usize = 16;

/// Index → value mapping over at most [`CAPACITY`] integers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedMap {
    slots: [i32; CAPACITY],
    len: usize,
}

impl FixedMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with `values`, list-assignment style.
    ///
    /// Panics if `values` exceeds [`CAPACITY`]; a list that long is a bug in
    /// the calling demo, not an input to recover from.
    pub fn assign(&mut self, values: &[i32]) {
        assert!(
            values.len() <= CAPACITY,
            "FixedMap can hold at most {CAPACITY} values, got {}",
            values.len()
        );
        self.len = values.len();
        self.slots[..values.len()].copy_from_slice(values);
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, i32> {
        self.slots[..self.len].iter()
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.slots[..self.len]
    }
}

impl From<&[i32]> for FixedMap {
    fn from(values: &[i32]) -> Self {
        let mut map = Self::new();
        map.assign(values);
        map
    }
}

impl<const N: usize> From<[i32; N]> for FixedMap {
    fn from(values: [i32; N]) -> Self {
        Self::from(values.as_slice())
    }
}

impl Index<usize> for FixedMap {
    type Output = i32;

    fn index(&self, index: usize) -> &i32 {
        assert!(index < self.len, "index {index} out of bounds (len {})", self.len);
        &self.slots[index]
    }
}

impl IndexMut<usize> for FixedMap {
    fn index_mut(&mut self, index: usize) -> &mut i32 {
        assert!(index < self.len, "index {index} out of bounds (len {})", self.len);
        &mut self.slots[index]
    }
}

impl<'a> IntoIterator for &'a FixedMap {
    type Item = &'a i32;
    type IntoIter = std::slice::Iter<'a, i32>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_from_a_bracketed_list() {
        let map = FixedMap::from([5, 4, 3, 2, 1]);
        assert_eq!(map.len(), 5);
        assert_eq!(map.as_slice(), &[5, 4, 3, 2, 1]);
        assert_eq!(map[0], 5);
        assert_eq!(map[4], 1);
    }

    #[test]
    fn assignment_replaces_previous_contents() {
        let mut map = FixedMap::from([5, 4, 3]);
        map.assign(&[1, 3, 5, 7, 9, 11]);
        assert_eq!(map.as_slice(), &[1, 3, 5, 7, 9, 11]);
    }

    #[test]
    fn indexed_writes_stick() {
        let mut map = FixedMap::from([1, 2, 3]);
        map[1] = 20;
        assert_eq!(map.as_slice(), &[1, 20, 3]);
    }

    #[test]
    fn iterates_in_insertion_order() {
        let map = FixedMap::from([7, 8, 9]);
        let collected: Vec<i32> = map.iter().copied().collect();
        assert_eq!(collected, vec![7, 8, 9]);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn indexing_past_the_end_panics() {
        let map = FixedMap::from([1, 2]);
        let _ = map[2];
    }

    #[test]
    #[should_panic(expected = "at most")]
    fn assigning_past_capacity_panics() {
        let mut map = FixedMap::new();
        map.assign(&[0; CAPACITY + 1]);
    }
}
