/*!
# Graph Representations

Concrete graph stores implementing the capability traits of [`crate::ops`].

## Provided Representations

- [`AdjacencyGraph`]: directed, out-edge lists only
- [`BidirectionalAdjacencyGraph`]: directed, out- and in-edge lists
- [`UndirectedAdjacencyGraph`]: undirected, every edge stored at both endpoints
- [`DelegateImplicitGraph`] / [`DelegateVertexListGraph`]: out-edges computed by a closure
- [`ClusteredAdjacencyGraph`]: a tree of nested [`AdjacencyGraph`] clusters

## Design
The adjacency stores keep their vertices in an [`IndexedSet`] and address per-vertex
edge lists through the vertex slot. Removing a vertex moves the last vertex into the freed
slot, so vertex iteration order is insertion order only as long as nothing is removed.
*/

use crate::{edge::*, error::*, ops::*, utils::IndexedSet, vertex::*};

mod clustered;
mod delegate;
mod directed;
mod undirected;

pub use clustered::*;
pub use delegate::*;
pub use directed::*;
pub use undirected::*;

/// Removes the first element equal to `item` (keeping the order of the rest)
fn remove_first<E: PartialEq>(list: &mut Vec<E>, item: &E) -> bool {
    match list.iter().position(|x| x == item) {
        Some(pos) => {
            list.remove(pos);
            true
        }
        None => false,
    }
}

pub(crate) mod macros {
    /// Implements `GraphType`, `ImplicitVertexSet`, `VertexSet` and a slot lookup for stores
    /// with fields `vertices: IndexedSet<V>` and `allow_parallel_edges: bool`
    macro_rules! impl_common_graph_ops {
        ($graph:ident, $directed:literal) => {
            impl<V, E> GraphType for $graph<V, E>
            where
                V: Vertex,
                E: GraphEdge<V>,
            {
                type Vertex = V;
                type Edge = E;

                fn is_directed(&self) -> bool {
                    $directed
                }

                fn allow_parallel_edges(&self) -> bool {
                    self.allow_parallel_edges
                }
            }

            impl<V, E> ImplicitVertexSet for $graph<V, E>
            where
                V: Vertex,
                E: GraphEdge<V>,
            {
                fn contains_vertex(&self, vertex: &V) -> bool {
                    self.vertices.contains(vertex)
                }
            }

            impl<V, E> VertexSet for $graph<V, E>
            where
                V: Vertex,
                E: GraphEdge<V>,
            {
                fn vertices(&self) -> impl Iterator<Item = V> + '_ {
                    self.vertices.iter().cloned()
                }

                fn vertex_count(&self) -> usize {
                    self.vertices.len()
                }
            }

            impl<V, E> Default for $graph<V, E>
            where
                V: Vertex,
                E: GraphEdge<V>,
            {
                fn default() -> Self {
                    Self::new(false)
                }
            }

            impl<V, E> $graph<V, E>
            where
                V: Vertex,
                E: GraphEdge<V>,
            {
                /// Slot of `vertex` in the per-vertex storage
                /// ** Panics if `vertex` is not part of the graph **
                fn slot(&self, vertex: &V) -> usize {
                    let Some(slot) = self.vertices.index_of(vertex) else {
                        panic!("vertex is not part of the graph");
                    };
                    slot
                }

                /// Slots of both endpoints or `VertexNotFound`
                fn endpoint_slots(&self, edge: &E) -> Result<(usize, usize)> {
                    match (
                        self.vertices.index_of(edge.source()),
                        self.vertices.index_of(edge.target()),
                    ) {
                        (Some(s), Some(t)) => Ok((s, t)),
                        _ => Err(GraphError::VertexNotFound),
                    }
                }
            }
        };
    }

    pub(crate) use impl_common_graph_ops;
}
