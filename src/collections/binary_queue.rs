/*!
# Binary Queue

A binary min-heap over items whose priorities live outside the queue.

The queue caches the priority it was given for every item. When the external priority of a
queued item changes, the caller passes the new priority function to
[`BinaryQueue::update`], which moves the item up or down. Items are unique: enqueuing an
item that is already queued behaves like an update.
*/

use std::hash::Hash;

use fxhash::FxHashMap;

use crate::error::{GraphError, Result};

/// Binary min-heap with an item -> position index.
#[derive(Debug, Clone)]
pub struct BinaryQueue<T, P> {
    heap: Vec<(P, T)>,
    positions: FxHashMap<T, usize>,
}

impl<T, P> Default for BinaryQueue<T, P> {
    fn default() -> Self {
        Self {
            heap: Vec::new(),
            positions: FxHashMap::default(),
        }
    }
}

impl<T, P> BinaryQueue<T, P>
where
    T: Clone + Eq + Hash,
    P: PartialOrd,
{
    /// Creates an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty queue with space for `capacity` items
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            positions: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Number of queued items
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns *true* if no item is queued
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns *true* if `item` is queued
    pub fn contains(&self, item: &T) -> bool {
        self.positions.contains_key(item)
    }

    /// Returns the item with minimum priority without removing it
    pub fn peek(&self) -> Option<&T> {
        self.heap.first().map(|(_, item)| item)
    }

    /// Returns the cached priority of the minimum item
    pub fn peek_priority(&self) -> Option<&P> {
        self.heap.first().map(|(p, _)| p)
    }

    /// Inserts `item` with priority `priority_of(&item)` in O(log n).
    /// If `item` is already queued, its priority is updated instead.
    pub fn enqueue(&mut self, item: T, priority_of: impl Fn(&T) -> P) {
        if self.contains(&item) {
            self.update(&item, priority_of);
            return;
        }

        let pos = self.heap.len();
        self.positions.insert(item.clone(), pos);
        self.heap.push((priority_of(&item), item));
        self.sift_up(pos);
    }

    /// Removes and returns the item with minimum priority.
    /// Fails with [`GraphError::EmptyQueue`] if the queue is empty.
    pub fn dequeue(&mut self) -> Result<T> {
        if self.heap.is_empty() {
            return Err(GraphError::EmptyQueue);
        }

        let last = self.heap.len() - 1;
        self.swap(0, last);
        let (_, item) = self.heap.pop().ok_or(GraphError::EmptyQueue)?;
        self.positions.remove(&item);

        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Ok(item)
    }

    /// Refreshes the priority of a queued `item` and restores the heap order in O(log n).
    /// Returns *false* if `item` is not queued.
    pub fn update(&mut self, item: &T, priority_of: impl Fn(&T) -> P) -> bool {
        let Some(&pos) = self.positions.get(item) else {
            return false;
        };

        self.heap[pos].0 = priority_of(item);
        let pos = self.sift_up(pos);
        self.sift_down(pos);
        true
    }

    /// Removes all items
    pub fn clear(&mut self) {
        self.heap.clear();
        self.positions.clear();
    }

    /// Returns all queued items ordered by their cached priority without modifying the queue
    pub fn to_vec_sorted(&self) -> Vec<T> {
        let mut items: Vec<_> = self.heap.iter().collect();
        items.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        items.into_iter().map(|(_, item)| item.clone()).collect()
    }

    fn less(&self, i: usize, j: usize) -> bool {
        self.heap[i].0 < self.heap[j].0
    }

    fn swap(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        self.heap.swap(i, j);
        for k in [i, j] {
            if let Some(pos) = self.positions.get_mut(&self.heap[k].1) {
                *pos = k;
            }
        }
    }

    /// Moves the entry at `pos` up and returns its final position
    fn sift_up(&mut self, mut pos: usize) -> usize {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if !self.less(pos, parent) {
                break;
            }
            self.swap(pos, parent);
            pos = parent;
        }
        pos
    }

    fn sift_down(&mut self, mut pos: usize) {
        loop {
            let left = 2 * pos + 1;
            let right = left + 1;
            let mut smallest = pos;

            if left < self.heap.len() && self.less(left, smallest) {
                smallest = left;
            }
            if right < self.heap.len() && self.less(right, smallest) {
                smallest = right;
            }
            if smallest == pos {
                return;
            }

            self.swap(pos, smallest);
            pos = smallest;
        }
    }
}
