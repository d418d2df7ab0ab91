/*!
# Indexed Sets

[`IndexedSet`] stores elements densely in a `Vec` and keeps an element -> position map, so
membership, insertion and removal are O(1) and every element owns a stable slot index
until it is removed. Removal moves the last element into the freed slot.

Graph stores use the slot index to address parallel `Vec`s of adjacency lists.
*/

use std::hash::Hash;

use fxhash::FxHashMap;

/// A set supporting fast insertion, removal, position lookup and iteration.
#[derive(Debug, Clone)]
pub struct IndexedSet<T> {
    data: Vec<T>,
    positions: FxHashMap<T, usize>,
}

impl<T> Default for IndexedSet<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            positions: FxHashMap::default(),
        }
    }
}

impl<T: Clone + Eq + Hash> IndexedSet<T> {
    /// Creates an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value` and returns its slot together with *true* if it was newly inserted
    pub fn insert(&mut self, value: T) -> (usize, bool) {
        if let Some(&pos) = self.positions.get(&value) {
            return (pos, false);
        }

        let pos = self.data.len();
        self.positions.insert(value.clone(), pos);
        self.data.push(value);
        (pos, true)
    }

    /// Removes `value` and returns the slot it occupied.
    ///
    /// The last element is moved into the freed slot; callers keeping parallel storage
    /// must mirror this with `swap_remove(slot)`.
    pub fn swap_remove(&mut self, value: &T) -> Option<usize> {
        let pos = self.positions.remove(value)?;

        self.data.swap_remove(pos);
        if pos < self.data.len() {
            self.positions.insert(self.data[pos].clone(), pos);
        }

        Some(pos)
    }

    /// Returns the slot of `value`
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.positions.get(value).copied()
    }

    /// Returns the element stored in `slot`
    /// ** Panics if `slot >= len` **
    pub fn get(&self, slot: usize) -> &T {
        &self.data[slot]
    }

    /// Returns *true* if `value` is in the set
    pub fn contains(&self, value: &T) -> bool {
        self.positions.contains_key(value)
    }

    /// Iterates over all elements in slot order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Removes all elements
    pub fn clear(&mut self) {
        self.data.clear();
        self.positions.clear();
    }

    /// Returns the number of elements
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns *true* if the set is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    use super::*;

    #[test]
    fn insert_and_remove() {
        let mut set = IndexedSet::new();
        assert_eq!(set.insert("a"), (0, true));
        assert_eq!(set.insert("b"), (1, true));
        assert_eq!(set.insert("c"), (2, true));
        assert_eq!(set.insert("a"), (0, false));

        assert_eq!(set.swap_remove(&"a"), Some(0));
        assert_eq!(set.index_of(&"c"), Some(0));
        assert_eq!(*set.get(0), "c");
        assert_eq!(set.swap_remove(&"a"), None);
        assert_eq!(set.iter().copied().collect_vec(), vec!["c", "b"]);
    }

    #[test]
    fn random_against_hashset() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);
        let mut set = IndexedSet::new();
        let mut reference = std::collections::HashSet::new();

        for _ in 0..2000 {
            let x: u32 = rng.random_range(0..50);
            if rng.random_bool(0.6) {
                assert_eq!(set.insert(x).1, reference.insert(x));
            } else {
                assert_eq!(set.swap_remove(&x).is_some(), reference.remove(&x));
            }

            assert_eq!(set.len(), reference.len());
            for (slot, v) in set.iter().enumerate() {
                assert_eq!(set.index_of(v), Some(slot));
            }
        }
    }
}
