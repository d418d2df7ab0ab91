/*!
# Directed Graph Representations

- [`AdjacencyGraph`] stores **only outgoing edges**; in-edges are not available.
- [`BidirectionalAdjacencyGraph`] stores **both outgoing and incoming edges**, enabling
  [`BidirectionalGraph`] queries such as in-degrees (used by flow augmentation).

Edge lists keep insertion order; removal of a single edge preserves the order of the rest.
*/

use crate::testing::test_graph_ops;

use super::{macros::impl_common_graph_ops, *};

/// A directed graph storing only **outgoing edges**.
#[derive(Clone, Debug)]
pub struct AdjacencyGraph<V, E> {
    vertices: IndexedSet<V>,
    out_edges: Vec<Vec<E>>,
    num_edges: usize,
    allow_parallel_edges: bool,
}

/// A directed graph storing **both outgoing and incoming edges**.
#[derive(Clone, Debug)]
pub struct BidirectionalAdjacencyGraph<V, E> {
    vertices: IndexedSet<V>,
    out_edges: Vec<Vec<E>>,
    in_edges: Vec<Vec<E>>,
    num_edges: usize,
    allow_parallel_edges: bool,
}

impl_common_graph_ops!(AdjacencyGraph, true);
impl_common_graph_ops!(BidirectionalAdjacencyGraph, true);

impl<V: Vertex, E: GraphEdge<V>> GraphNew for AdjacencyGraph<V, E> {
    fn new(allow_parallel_edges: bool) -> Self {
        Self {
            vertices: IndexedSet::new(),
            out_edges: Vec::new(),
            num_edges: 0,
            allow_parallel_edges,
        }
    }
}

impl<V: Vertex, E: GraphEdge<V>> GraphNew for BidirectionalAdjacencyGraph<V, E> {
    fn new(allow_parallel_edges: bool) -> Self {
        Self {
            vertices: IndexedSet::new(),
            out_edges: Vec::new(),
            in_edges: Vec::new(),
            num_edges: 0,
            allow_parallel_edges,
        }
    }
}

macro_rules! impl_out_edge_ops {
    ($graph:ident) => {
        impl<V: Vertex, E: GraphEdge<V>> ImplicitGraph for $graph<V, E> {
            fn try_out_edges(&self, vertex: &V) -> Option<impl Iterator<Item = E> + '_> {
                let slot = self.vertices.index_of(vertex)?;
                Some(self.out_edges[slot].iter().cloned())
            }

            fn out_degree(&self, vertex: &V) -> usize {
                self.out_edges[self.slot(vertex)].len()
            }
        }

        impl<V: Vertex, E: GraphEdge<V>> IncidenceGraph for $graph<V, E> {}

        impl<V: Vertex, E: GraphEdge<V>> EdgeSet for $graph<V, E> {
            fn edges(&self) -> impl Iterator<Item = E> + '_ {
                self.out_edges.iter().flatten().cloned()
            }

            fn edge_count(&self) -> usize {
                self.num_edges
            }

            fn contains_edge(&self, edge: &E) -> bool {
                self.vertices
                    .index_of(edge.source())
                    .is_some_and(|s| self.out_edges[s].contains(edge))
            }
        }

        impl<V: Vertex, E: GraphEdge<V>> $graph<V, E> {
            /// Returns *true* if adding an edge `source -> target` would create a forbidden
            /// parallel edge
            fn rejects_parallel(&self, source_slot: usize, target: &V) -> bool {
                !self.allow_parallel_edges
                    && self.out_edges[source_slot]
                        .iter()
                        .any(|e| e.target() == target)
            }
        }
    };
}

impl_out_edge_ops!(AdjacencyGraph);
impl_out_edge_ops!(BidirectionalAdjacencyGraph);

impl<V: Vertex, E: GraphEdge<V>> MutableVertexGraph for AdjacencyGraph<V, E> {
    fn add_vertex(&mut self, vertex: V) -> bool {
        let (_, added) = self.vertices.insert(vertex);
        if added {
            self.out_edges.push(Vec::new());
        }
        added
    }

    fn remove_vertex(&mut self, vertex: &V) -> bool {
        let Some(slot) = self.vertices.index_of(vertex) else {
            return false;
        };

        let mut removed = self.out_edges[slot].len();
        self.out_edges[slot].clear();
        for list in self.out_edges.iter_mut() {
            let before = list.len();
            list.retain(|e| e.target() != vertex);
            removed += before - list.len();
        }
        self.num_edges -= removed;

        self.vertices.swap_remove(vertex);
        self.out_edges.swap_remove(slot);
        true
    }
}

impl<V: Vertex, E: GraphEdge<V>> MutableEdgeGraph for AdjacencyGraph<V, E> {
    fn add_edge(&mut self, edge: E) -> Result<bool> {
        let (s, _) = self.endpoint_slots(&edge)?;
        if self.rejects_parallel(s, edge.target()) {
            return Ok(false);
        }

        self.out_edges[s].push(edge);
        self.num_edges += 1;
        Ok(true)
    }

    fn remove_edge(&mut self, edge: &E) -> bool {
        let Some(s) = self.vertices.index_of(edge.source()) else {
            return false;
        };
        let removed = remove_first(&mut self.out_edges[s], edge);
        self.num_edges -= removed as usize;
        removed
    }
}

impl<V: Vertex, E: GraphEdge<V>> MutableGraph for AdjacencyGraph<V, E> {
    fn clear(&mut self) {
        self.vertices.clear();
        self.out_edges.clear();
        self.num_edges = 0;
    }
}

impl<V: Vertex, E: GraphEdge<V>> AdjacencyGraph<V, E> {
    /// Removes all out-edges of `vertex` and returns how many were removed
    /// ** Panics if `vertex` is not part of the graph **
    pub fn clear_out_edges(&mut self, vertex: &V) -> usize {
        let slot = self.slot(vertex);
        let removed = self.out_edges[slot].len();
        self.out_edges[slot].clear();
        self.num_edges -= removed;
        removed
    }
}

impl<V: Vertex, E: GraphEdge<V>> BidirectionalGraph for BidirectionalAdjacencyGraph<V, E> {
    fn in_edges(&self, vertex: &V) -> impl Iterator<Item = E> + '_ {
        self.in_edges[self.slot(vertex)].iter().cloned()
    }

    fn in_degree(&self, vertex: &V) -> usize {
        self.in_edges[self.slot(vertex)].len()
    }
}

impl<V: Vertex, E: GraphEdge<V>> MutableVertexGraph for BidirectionalAdjacencyGraph<V, E> {
    fn add_vertex(&mut self, vertex: V) -> bool {
        let (_, added) = self.vertices.insert(vertex);
        if added {
            self.out_edges.push(Vec::new());
            self.in_edges.push(Vec::new());
        }
        added
    }

    fn remove_vertex(&mut self, vertex: &V) -> bool {
        let Some(slot) = self.vertices.index_of(vertex) else {
            return false;
        };

        let outgoing = std::mem::take(&mut self.out_edges[slot]);
        let incoming = std::mem::take(&mut self.in_edges[slot]);

        for e in &outgoing {
            if e.target() != vertex {
                let t = self.slot(e.target());
                remove_first(&mut self.in_edges[t], e);
            }
        }

        // self-loops were already counted among the outgoing edges
        let mut removed = outgoing.len();
        for e in &incoming {
            if e.source() != vertex {
                let s = self.slot(e.source());
                remove_first(&mut self.out_edges[s], e);
                removed += 1;
            }
        }
        self.num_edges -= removed;

        self.vertices.swap_remove(vertex);
        self.out_edges.swap_remove(slot);
        self.in_edges.swap_remove(slot);
        true
    }
}

impl<V: Vertex, E: GraphEdge<V>> MutableEdgeGraph for BidirectionalAdjacencyGraph<V, E> {
    fn add_edge(&mut self, edge: E) -> Result<bool> {
        let (s, t) = self.endpoint_slots(&edge)?;
        if self.rejects_parallel(s, edge.target()) {
            return Ok(false);
        }

        self.in_edges[t].push(edge.clone());
        self.out_edges[s].push(edge);
        self.num_edges += 1;
        Ok(true)
    }

    fn remove_edge(&mut self, edge: &E) -> bool {
        let Ok((s, t)) = self.endpoint_slots(edge) else {
            return false;
        };
        if !remove_first(&mut self.out_edges[s], edge) {
            return false;
        }
        remove_first(&mut self.in_edges[t], edge);
        self.num_edges -= 1;
        true
    }
}

impl<V: Vertex, E: GraphEdge<V>> MutableGraph for BidirectionalAdjacencyGraph<V, E> {
    fn clear(&mut self) {
        self.vertices.clear();
        self.out_edges.clear();
        self.in_edges.clear();
        self.num_edges = 0;
    }
}

test_graph_ops!(
    test_adjacency_graph,
    AdjacencyGraph,
    Edge,
    false,
    (
        GraphNew,
        VertexSet,
        EdgeSet,
        ImplicitGraph,
        IncidenceGraph,
        MutableGraph,
        ParallelEdges
    )
);

test_graph_ops!(
    test_bidirectional_adjacency_graph,
    BidirectionalAdjacencyGraph,
    Edge,
    false,
    (
        GraphNew,
        VertexSet,
        EdgeSet,
        ImplicitGraph,
        IncidenceGraph,
        BidirectionalGraph,
        MutableGraph,
        ParallelEdges
    )
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_loops_are_counted_once() {
        let mut graph = BidirectionalAdjacencyGraph::<u8, Edge<u8>>::new(false);
        graph.add_vertex_range([0, 1]);
        graph.add_edge(Edge(0, 0)).unwrap();
        graph.add_edge(Edge(0, 1)).unwrap();
        graph.add_edge(Edge(1, 0)).unwrap();

        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.degree(&0), 4);

        assert!(graph.remove_vertex(&0));
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.is_in_edges_empty(&1));
        assert!(graph.is_out_edges_empty(&1));
    }

    #[test]
    fn clear_out_edges() {
        let mut graph =
            AdjacencyGraph::<u8, Edge<u8>>::from_edges([Edge(0, 1), Edge(0, 2), Edge(1, 2)]);
        assert_eq!(graph.clear_out_edges(&0), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.out_edge(&1, 0), Some(Edge(1, 2)));
    }
}
