/*!
# Graph Algorithms

All algorithms are re-exported at the top level of this module, so you can simply do:
```rust
use qgraphs::algo::*;
```
and gain access to shortest paths, spanning trees, topological sort, flows and the shared
framework types.

Every algorithm is a configurable struct: construct it with the graph, its strategies
(weights, relaxer, edge chain, factories) and a [`CancelHandle`], subscribe to its events or
attach [observers](observers), then call [`Algorithm::compute`] (or
[`RootedAlgorithm::compute_from`]) and read the results through its accessors.

- [`framework`]: lifecycle, cancellation and root vertex handling
- [`observers`]: predecessor and edge recorders attachable to algorithm events
- [`shortest_path`]: Dijkstra and Bellman-Ford with pluggable distance relaxers
- [`KruskalMinimumSpanningTree`]
- [`SourceFirstTopologicalSort`]
- [`EdgeDepthFirstSearch`]
- [`CyclePoppingRandomTree`] with [`MarkovEdgeChain`] strategies
- [`max_flow`]: graph augmentors, Edmonds-Karp and maximum bipartite matching
*/

pub mod framework;
pub mod max_flow;
pub mod observers;
pub mod shortest_path;

mod edge_dfs;
mod random_tree;
mod spanning_tree;
mod topological;

pub use edge_dfs::*;
pub use framework::*;
pub use max_flow::*;
pub use observers::*;
pub use random_tree::*;
pub use shortest_path::*;
pub use spanning_tree::*;
pub use topological::*;
