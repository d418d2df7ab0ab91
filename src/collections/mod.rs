/*!
# Collections

Priority queues and the union-find structure used by the algorithms:

- [`BinaryQueue`]: binary min-heap with an item -> position index; the priority of an item is
  supplied by the caller at `enqueue`/`update` time (topological sort, Kruskal)
- [`FibonacciHeap`]: arena backed Fibonacci heap with decrease/increase-key through
  generation checked [`CellHandle`]s
- [`FibonacciQueue`]: vertex keyed priority queue on top of [`FibonacciHeap`] (Dijkstra)
- [`ForestDisjointSet`]: union by rank with path compression (Kruskal)
*/

pub mod binary_queue;
pub mod disjoint_set;
pub mod fibonacci;

pub use binary_queue::BinaryQueue;
pub use disjoint_set::ForestDisjointSet;
pub use fibonacci::{CellHandle, FibonacciHeap, FibonacciQueue, HeapDirection};
