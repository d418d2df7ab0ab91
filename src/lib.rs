/*!
`qgraphs` is a generic graph data structure & algorithms library.

# Representation

**Vertices** are opaque, user supplied values: anything that is `Clone + Eq + Hash` (see
[`vertex::Vertex`]). **Edges** are values as well and only need to report their two
endpoints (see [`edge::GraphEdge`]); the crate ships plain, undirected, tagged, terminal and
merged edge types.

Graphs are described by small capability traits in [`ops`] (vertex set, edge set, out-edges,
in-edges, mutation, ...). Algorithms ask for exactly the capabilities they need, so they run
on every representation providing them, including graphs whose edges are computed by a
closure.

### Available Representations

See the [`repr`] module for the full list of graph stores:

- [`AdjacencyGraph`](crate::repr::AdjacencyGraph) (directed)
- [`BidirectionalAdjacencyGraph`](crate::repr::BidirectionalAdjacencyGraph) (directed, with
  in-edges)
- [`UndirectedAdjacencyGraph`](crate::repr::UndirectedAdjacencyGraph)
- [`DelegateImplicitGraph`](crate::repr::DelegateImplicitGraph) and
  [`DelegateVertexListGraph`](crate::repr::DelegateVertexListGraph)
- [`ClusteredAdjacencyGraph`](crate::repr::ClusteredAdjacencyGraph)

# Design

All algorithms are provided as configurable structs sharing one lifecycle: construct,
subscribe to events, `compute`, read results. Long running loops poll a shared cancellation
flag and stop cooperatively. See [`algo::framework`] for details.

# Usage

There are *5* core submodules you probably want to interact with:
- [`prelude`] includes vertices, edges, errors, events, the capability traits and all
  graph representations,
- [`algo`] includes the algorithms, the algorithm framework and observers,
- [`collections`] includes the priority queues and the disjoint-set forest backing the
  algorithms,
- [`events`] includes the listener lists algorithms publish their progress through,
- [`utils`] includes small helpers such as predecessor path reconstruction.

In most use-cases, `use qgraphs::{prelude::*, algo::*};` suffices for your needs.
*/

pub mod algo;
pub mod collections;
pub mod edge;
pub mod error;
pub mod events;
pub mod ops;
pub mod repr;
pub(crate) mod testing;
pub mod utils;
pub mod vertex;

/// `qgraphs::prelude` includes definitions for vertices and edges, errors, events, all
/// capability traits as well as all implemented representations.
pub mod prelude {
    pub use super::{edge::*, error::GraphError, events::*, ops::*, repr::*, vertex::*};
}
