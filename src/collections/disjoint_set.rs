/*!
# Disjoint Set

Union-find over arbitrary hashable elements. Elements are mapped to dense indices; the
forest itself is stored as parent/rank arrays over these indices.

`find` compresses the whole path to the root, `union` hangs the root of lower rank below
the root of higher rank (incrementing the rank on ties). Both run in amortized
*O(α(n))*.
*/

use std::hash::Hash;

use fxhash::FxHashMap;

use crate::error::{GraphError, Result};

/// Union by rank with full path compression.
#[derive(Debug, Clone)]
pub struct ForestDisjointSet<T> {
    indices: FxHashMap<T, usize>,
    elements: Vec<T>,
    parents: Vec<usize>,
    ranks: Vec<u32>,
    set_count: usize,
}

impl<T> Default for ForestDisjointSet<T> {
    fn default() -> Self {
        Self {
            indices: FxHashMap::default(),
            elements: Vec::new(),
            parents: Vec::new(),
            ranks: Vec::new(),
            set_count: 0,
        }
    }
}

impl<T> ForestDisjointSet<T>
where
    T: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty structure with space for `capacity` elements
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            indices: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            elements: Vec::with_capacity(capacity),
            parents: Vec::with_capacity(capacity),
            ranks: Vec::with_capacity(capacity),
            set_count: 0,
        }
    }

    /// Number of elements ever added
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Number of disjoint sets
    pub fn set_count(&self) -> usize {
        self.set_count
    }

    /// Returns *true* if `element` was added
    pub fn contains(&self, element: &T) -> bool {
        self.indices.contains_key(element)
    }

    /// Adds `element` as a singleton set.
    /// Returns *false* (and does nothing) if it is already present.
    pub fn make_set(&mut self, element: T) -> bool {
        if self.contains(&element) {
            return false;
        }

        let index = self.elements.len();
        self.indices.insert(element.clone(), index);
        self.elements.push(element);
        self.parents.push(index);
        self.ranks.push(0);
        self.set_count += 1;
        true
    }

    /// Returns the representative of the set containing `element` or `None` if unknown
    pub fn find(&mut self, element: &T) -> Option<T> {
        let index = *self.indices.get(element)?;
        let root = self.find_root(index);
        Some(self.elements[root].clone())
    }

    /// Merges the sets containing `x` and `y`.
    /// Returns *true* if they were disjoint before.
    ///
    /// Fails with [`GraphError::VertexNotFound`] if either element is unknown.
    pub fn union(&mut self, x: &T, y: &T) -> Result<bool> {
        let (x, y) = (self.index_of(x)?, self.index_of(y)?);
        let (x, y) = (self.find_root(x), self.find_root(y));
        if x == y {
            return Ok(false);
        }

        match self.ranks[x].cmp(&self.ranks[y]) {
            std::cmp::Ordering::Less => self.parents[x] = y,
            std::cmp::Ordering::Greater => self.parents[y] = x,
            std::cmp::Ordering::Equal => {
                self.parents[y] = x;
                self.ranks[x] += 1;
            }
        }
        self.set_count -= 1;
        Ok(true)
    }

    /// Returns *true* if `x` and `y` belong to the same set.
    ///
    /// Fails with [`GraphError::VertexNotFound`] if either element is unknown.
    pub fn are_in_same_set(&mut self, x: &T, y: &T) -> Result<bool> {
        let (x, y) = (self.index_of(x)?, self.index_of(y)?);
        Ok(self.find_root(x) == self.find_root(y))
    }

    /// Removes all elements
    pub fn clear(&mut self) {
        self.indices.clear();
        self.elements.clear();
        self.parents.clear();
        self.ranks.clear();
        self.set_count = 0;
    }

    fn index_of(&self, element: &T) -> Result<usize> {
        self.indices
            .get(element)
            .copied()
            .ok_or(GraphError::VertexNotFound)
    }

    fn find_root(&mut self, index: usize) -> usize {
        let mut root = index;
        while self.parents[root] != root {
            root = self.parents[root];
        }

        let mut current = index;
        while self.parents[current] != root {
            let next = self.parents[current];
            self.parents[current] = root;
            current = next;
        }
        root
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    use super::*;

    #[test]
    fn unions_chain_transitively() {
        let mut sets = ForestDisjointSet::new();
        for x in 1..=4 {
            assert!(sets.make_set(x));
        }
        assert!(!sets.make_set(1));
        assert_eq!(sets.set_count(), 4);

        assert!(sets.union(&1, &2).unwrap());
        assert!(sets.union(&3, &4).unwrap());
        assert!(!sets.are_in_same_set(&1, &4).unwrap());
        assert!(sets.union(&2, &3).unwrap());
        assert!(sets.are_in_same_set(&1, &4).unwrap());

        // idempotent
        assert!(!sets.union(&4, &1).unwrap());
        assert_eq!(sets.set_count(), 1);
        assert_eq!(sets.element_count(), 4);
    }

    #[test]
    fn unknown_elements() {
        let mut sets = ForestDisjointSet::new();
        sets.make_set("a");
        assert_eq!(sets.find(&"b"), None);
        assert_eq!(sets.union(&"a", &"b"), Err(GraphError::VertexNotFound));
        assert_eq!(sets.are_in_same_set(&"b", &"a"), Err(GraphError::VertexNotFound));
        assert_eq!(sets.find(&"a"), Some("a"));
        assert!(sets.contains(&"a"));

        sets.clear();
        assert!(!sets.contains(&"a"));
        assert_eq!(sets.set_count(), 0);
    }

    #[test]
    fn random_unions_against_naive_partition() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);
        for _ in 0..20 {
            let n = rng.random_range(1..100u32);
            let mut sets = ForestDisjointSet::with_capacity(n as usize);
            let mut label = (0..n).collect_vec();
            for x in 0..n {
                sets.make_set(x);
            }

            for _ in 0..n {
                let x = rng.random_range(0..n);
                let y = rng.random_range(0..n);

                let merged = sets.union(&x, &y).unwrap();
                let (lx, ly) = (label[x as usize], label[y as usize]);
                assert_eq!(merged, lx != ly);
                for l in label.iter_mut() {
                    if *l == ly {
                        *l = lx;
                    }
                }

                let representative = sets.find(&x);
                assert_eq!(sets.find(&x), representative);
            }

            assert_eq!(sets.set_count(), label.iter().unique().count());
            for x in 0..n {
                for y in 0..n {
                    assert_eq!(
                        sets.are_in_same_set(&x, &y).unwrap(),
                        label[x as usize] == label[y as usize]
                    );
                }
            }
        }
    }
}
