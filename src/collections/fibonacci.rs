/*!
# Fibonacci Heap

An arena backed Fibonacci heap.

Cells live in a `Vec` of slots and are linked through indices: every cell knows its parent,
one child, and its left/right siblings in a circular list. Dequeued slots are recycled;
each slot carries a generation counter so a [`CellHandle`] to a dequeued cell is detected
as stale instead of silently addressing a recycled cell.

All priority comparisons go through the injected comparison function, adjusted by the
[`HeapDirection`]: `Increasing` dequeues the smallest priority first, `Decreasing` the
largest.

## Complexity
- `enqueue`, `top`, decrease-key: O(1) amortized
- `dequeue`: O(log n) amortized
- increase-key: O(degree + number of roots)
*/

use std::{cmp::Ordering, hash::Hash};

use fxhash::FxHashMap;

use crate::error::{GraphError, Result};

/// Order in which a heap releases its cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HeapDirection {
    /// Smallest priority first
    #[default]
    Increasing,
    /// Largest priority first
    Decreasing,
}

/// Handle to a cell of a [`FibonacciHeap`]. Stays valid until the cell is dequeued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellHandle {
    index: usize,
    generation: u32,
}

#[derive(Debug, Clone)]
struct Cell<P, V> {
    priority: P,
    value: V,
    parent: Option<usize>,
    child: Option<usize>,
    left: usize,
    right: usize,
    degree: usize,
    marked: bool,
}

#[derive(Debug, Clone)]
struct Slot<P, V> {
    generation: u32,
    cell: Option<Cell<P, V>>,
}

/// Natural ordering of `P`
pub type NaturalOrder<P> = fn(&P, &P) -> Ordering;

/// Fibonacci heap storing values `V` under priorities `P`, ordered by `C`.
#[derive(Clone)]
pub struct FibonacciHeap<P, V, C = NaturalOrder<P>> {
    slots: Vec<Slot<P, V>>,
    free: Vec<usize>,
    top: Option<usize>,
    count: usize,
    direction: HeapDirection,
    compare: C,
}

impl<P: Ord, V> FibonacciHeap<P, V> {
    /// Creates an empty heap using the natural order of `P`
    pub fn new(direction: HeapDirection) -> Self {
        Self::with_comparison(direction, <P as Ord>::cmp)
    }
}

impl<P, V, C> FibonacciHeap<P, V, C>
where
    C: Fn(&P, &P) -> Ordering,
{
    /// Creates an empty heap ordered by `compare`
    pub fn with_comparison(direction: HeapDirection, compare: C) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            top: None,
            count: 0,
            direction,
            compare,
        }
    }

    pub fn direction(&self) -> HeapDirection {
        self.direction
    }

    /// Number of queued cells
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns *true* if `handle` refers to a queued cell
    pub fn contains(&self, handle: CellHandle) -> bool {
        self.resolve(handle).is_ok()
    }

    /// Priority of the cell behind `handle`
    pub fn priority(&self, handle: CellHandle) -> Option<&P> {
        let index = self.resolve(handle).ok()?;
        Some(&self.cell(index).priority)
    }

    /// Value of the cell behind `handle`
    pub fn value(&self, handle: CellHandle) -> Option<&V> {
        let index = self.resolve(handle).ok()?;
        Some(&self.cell(index).value)
    }

    /// The cell that would be dequeued next
    pub fn top(&self) -> Option<(&P, &V)> {
        let cell = self.cell(self.top?);
        Some((&cell.priority, &cell.value))
    }

    /// Inserts `value` with `priority` in O(1)
    pub fn enqueue(&mut self, priority: P, value: V) -> CellHandle {
        let cell = Cell {
            priority,
            value,
            parent: None,
            child: None,
            left: 0,
            right: 0,
            degree: 0,
            marked: false,
        };

        let index = match self.free.pop() {
            Some(index) => {
                self.slots[index].cell = Some(cell);
                index
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    cell: Some(cell),
                });
                self.slots.len() - 1
            }
        };

        let c = self.cell_mut(index);
        c.left = index;
        c.right = index;
        self.add_root(index);
        self.count += 1;

        CellHandle {
            index,
            generation: self.slots[index].generation,
        }
    }

    /// Removes and returns the top cell.
    /// Fails with [`GraphError::EmptyQueue`] if the heap is empty.
    pub fn dequeue(&mut self) -> Result<(P, V)> {
        let Some(z) = self.top else {
            return Err(GraphError::EmptyQueue);
        };

        if let Some(child) = self.cell(z).child {
            for c in self.siblings(child) {
                self.unlink(c);
                let cell = self.cell_mut(c);
                cell.parent = None;
                cell.marked = false;
                self.splice(z, c);
            }
            let cell = self.cell_mut(z);
            cell.child = None;
            cell.degree = 0;
        }

        let next = self.cell(z).right;
        self.unlink(z);
        self.top = (next != z).then_some(next);
        if self.top.is_some() {
            self.consolidate();
        }
        self.count -= 1;

        let slot = &mut self.slots[z];
        slot.generation = slot.generation.wrapping_add(1);
        let cell = slot.cell.take().ok_or(GraphError::EmptyQueue)?;
        self.free.push(z);

        Ok((cell.priority, cell.value))
    }

    /// Changes the priority of the cell behind `handle`.
    ///
    /// Moving the cell towards the top cuts it from its parent if the heap order breaks and
    /// performs cascading cuts. Moving it away from the top releases its children into the
    /// root list. Fails with `InvalidOperation` if the handle is stale.
    pub fn change_key(&mut self, handle: CellHandle, priority: P) -> Result<()> {
        let i = self.resolve(handle)?;
        let ord = self.order(&priority, &self.cell(i).priority);
        self.cell_mut(i).priority = priority;

        match ord {
            Ordering::Less => {
                if let Some(parent) = self.cell(i).parent {
                    if self.precedes(i, parent) {
                        self.cut(i, parent);
                        self.cascading_cut(parent);
                    }
                }
                if self.top.is_some_and(|t| self.precedes(i, t)) {
                    self.top = Some(i);
                }
            }
            Ordering::Greater => {
                let was_top = self.top == Some(i);
                if let Some(child) = self.cell(i).child {
                    for c in self.siblings(child) {
                        self.unlink(c);
                        self.cell_mut(c).marked = false;
                        self.add_root(c);
                    }
                    let cell = self.cell_mut(i);
                    cell.child = None;
                    cell.degree = 0;
                }
                if was_top {
                    self.select_top();
                }
            }
            Ordering::Equal => {}
        }
        Ok(())
    }

    /// Dequeues every cell in order
    pub fn drain_ordered(&mut self) -> Vec<(P, V)> {
        let mut result = Vec::with_capacity(self.count);
        while let Ok(entry) = self.dequeue() {
            result.push(entry);
        }
        result
    }

    fn resolve(&self, handle: CellHandle) -> Result<usize> {
        match self.slots.get(handle.index) {
            Some(slot) if slot.generation == handle.generation && slot.cell.is_some() => {
                Ok(handle.index)
            }
            _ => Err(GraphError::invalid_operation("stale or foreign cell handle")),
        }
    }

    fn cell(&self, index: usize) -> &Cell<P, V> {
        match &self.slots[index].cell {
            Some(cell) => cell,
            None => unreachable!("linked cell {index} was dequeued"),
        }
    }

    fn cell_mut(&mut self, index: usize) -> &mut Cell<P, V> {
        match &mut self.slots[index].cell {
            Some(cell) => cell,
            None => unreachable!("linked cell {index} was dequeued"),
        }
    }

    /// Ordering of two priorities with respect to the heap direction
    fn order(&self, a: &P, b: &P) -> Ordering {
        match self.direction {
            HeapDirection::Increasing => (self.compare)(a, b),
            HeapDirection::Decreasing => (self.compare)(b, a),
        }
    }

    /// Returns *true* if cell `a` must be released strictly before cell `b`
    fn precedes(&self, a: usize, b: usize) -> bool {
        self.order(&self.cell(a).priority, &self.cell(b).priority) == Ordering::Less
    }

    /// All cells of the circular list containing `start`, beginning with `start`
    fn siblings(&self, start: usize) -> Vec<usize> {
        let mut result = vec![start];
        let mut current = self.cell(start).right;
        while current != start {
            result.push(current);
            current = self.cell(current).right;
        }
        result
    }

    /// Inserts the singleton `node` to the right of `anchor`
    fn splice(&mut self, anchor: usize, node: usize) {
        let right = self.cell(anchor).right;
        let cell = self.cell_mut(node);
        cell.left = anchor;
        cell.right = right;
        self.cell_mut(anchor).right = node;
        self.cell_mut(right).left = node;
    }

    /// Removes `node` from its circular list, leaving it a singleton
    fn unlink(&mut self, node: usize) {
        let (left, right) = {
            let cell = self.cell(node);
            (cell.left, cell.right)
        };
        self.cell_mut(left).right = right;
        self.cell_mut(right).left = left;
        let cell = self.cell_mut(node);
        cell.left = node;
        cell.right = node;
    }

    /// Adds the singleton `node` to the root list and updates the top
    fn add_root(&mut self, node: usize) {
        self.cell_mut(node).parent = None;
        match self.top {
            None => self.top = Some(node),
            Some(top) => {
                self.splice(top, node);
                if self.precedes(node, top) {
                    self.top = Some(node);
                }
            }
        }
    }

    /// Rescans the root list for the top cell
    fn select_top(&mut self) {
        let Some(start) = self.top else {
            return;
        };
        let mut best = start;
        for r in self.siblings(start) {
            if self.precedes(r, best) {
                best = r;
            }
        }
        self.top = Some(best);
    }

    /// Makes root `child` a child of root `parent`
    fn link(&mut self, child: usize, parent: usize) {
        self.unlink(child);
        let cell = self.cell_mut(child);
        cell.parent = Some(parent);
        cell.marked = false;

        match self.cell(parent).child {
            Some(first) => self.splice(first, child),
            None => self.cell_mut(parent).child = Some(child),
        }
        self.cell_mut(parent).degree += 1;
    }

    /// Combines roots of equal degree until all root degrees are distinct
    fn consolidate(&mut self) {
        let Some(start) = self.top else {
            return;
        };

        let mut by_degree: Vec<Option<usize>> = Vec::new();
        for w in self.siblings(start) {
            let mut x = w;
            let mut degree = self.cell(x).degree;
            loop {
                if by_degree.len() <= degree {
                    by_degree.resize(degree + 1, None);
                }
                let Some(mut y) = by_degree[degree].take() else {
                    break;
                };
                if self.precedes(y, x) {
                    std::mem::swap(&mut x, &mut y);
                }
                self.link(y, x);
                degree += 1;
            }
            by_degree[degree] = Some(x);
        }

        let mut best: Option<usize> = None;
        for root in by_degree.into_iter().flatten() {
            best = match best {
                Some(b) if !self.precedes(root, b) => Some(b),
                _ => Some(root),
            };
        }
        self.top = best;
    }

    /// Moves `node` from the child list of `parent` to the root list
    fn cut(&mut self, node: usize, parent: usize) {
        if self.cell(parent).child == Some(node) {
            let right = self.cell(node).right;
            self.cell_mut(parent).child = (right != node).then_some(right);
        }
        self.unlink(node);
        self.cell_mut(parent).degree -= 1;
        self.cell_mut(node).marked = false;
        self.add_root(node);
    }

    fn cascading_cut(&mut self, mut node: usize) {
        while let Some(parent) = self.cell(node).parent {
            if !self.cell(node).marked {
                self.cell_mut(node).marked = true;
                return;
            }
            self.cut(node, parent);
            node = parent;
        }
    }
}

/// A priority queue of unique values (typically vertices) on top of a [`FibonacciHeap`].
///
/// Keeps a value -> handle map so priorities can be changed by value. The queue always
/// releases in [`HeapDirection::Increasing`] order of its comparison function.
#[derive(Clone)]
pub struct FibonacciQueue<V, P, C = NaturalOrder<P>> {
    heap: FibonacciHeap<P, V, C>,
    handles: FxHashMap<V, CellHandle>,
}

impl<V, P> FibonacciQueue<V, P>
where
    V: Clone + Eq + Hash,
    P: Ord,
{
    /// Creates an empty queue using the natural order of `P`
    pub fn new() -> Self {
        Self::with_comparison(<P as Ord>::cmp)
    }
}

impl<V, P> Default for FibonacciQueue<V, P>
where
    V: Clone + Eq + Hash,
    P: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, P, C> FibonacciQueue<V, P, C>
where
    V: Clone + Eq + Hash,
    C: Fn(&P, &P) -> Ordering,
{
    /// Creates an empty queue releasing the least element according to `compare` first
    pub fn with_comparison(compare: C) -> Self {
        Self {
            heap: FibonacciHeap::with_comparison(HeapDirection::Increasing, compare),
            handles: FxHashMap::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns *true* if `value` is queued
    pub fn contains(&self, value: &V) -> bool {
        self.handles.contains_key(value)
    }

    /// Current priority of a queued `value`
    pub fn priority_of(&self, value: &V) -> Option<&P> {
        self.heap.priority(*self.handles.get(value)?)
    }

    /// Queues `value` with `priority`; if it is already queued its priority is changed
    pub fn enqueue(&mut self, value: V, priority: P) {
        if let Some(&handle) = self.handles.get(&value) {
            // handles of queued values are always live
            let _ = self.heap.change_key(handle, priority);
            return;
        }
        let handle = self.heap.enqueue(priority, value.clone());
        self.handles.insert(value, handle);
    }

    /// Changes the priority of a queued `value`.
    /// Fails with `VertexNotFound` if `value` is not queued.
    pub fn update(&mut self, value: &V, priority: P) -> Result<()> {
        let handle = *self.handles.get(value).ok_or(GraphError::VertexNotFound)?;
        self.heap.change_key(handle, priority)
    }

    /// Next value to be dequeued
    pub fn peek(&self) -> Option<&V> {
        self.heap.top().map(|(_, v)| v)
    }

    /// Removes and returns the next value
    pub fn dequeue(&mut self) -> Result<V> {
        self.dequeue_with_priority().map(|(v, _)| v)
    }

    /// Removes and returns the next value together with its priority
    pub fn dequeue_with_priority(&mut self) -> Result<(V, P)> {
        let (priority, value) = self.heap.dequeue()?;
        self.handles.remove(&value);
        Ok((value, priority))
    }

    /// Removes all values
    pub fn clear(&mut self) {
        while self.heap.dequeue().is_ok() {}
        self.handles.clear();
    }
}
