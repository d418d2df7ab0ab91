use crate::testing::test_graph_ops;

use super::{macros::impl_common_graph_ops, *};

/// An undirected graph storing every edge in the adjacency lists of both endpoints
/// (self-loops once).
///
/// Parallel edges are detected on the unordered pair of endpoints. [`EdgeSet::edges`]
/// reports every edge once, in the orientation it was inserted with.
#[derive(Clone, Debug)]
pub struct UndirectedAdjacencyGraph<V, E> {
    vertices: IndexedSet<V>,
    adjacent: Vec<Vec<E>>,
    num_edges: usize,
    allow_parallel_edges: bool,
}

impl_common_graph_ops!(UndirectedAdjacencyGraph, false);

impl<V: Vertex, E: GraphEdge<V>> GraphNew for UndirectedAdjacencyGraph<V, E> {
    fn new(allow_parallel_edges: bool) -> Self {
        Self {
            vertices: IndexedSet::new(),
            adjacent: Vec::new(),
            num_edges: 0,
            allow_parallel_edges,
        }
    }
}

impl<V: Vertex, E: GraphEdge<V>> UndirectedGraph for UndirectedAdjacencyGraph<V, E> {
    fn adjacent_edges(&self, vertex: &V) -> impl Iterator<Item = E> + '_ {
        self.adjacent[self.slot(vertex)].iter().cloned()
    }

    fn adjacent_degree(&self, vertex: &V) -> usize {
        self.adjacent[self.slot(vertex)].len()
    }
}

impl<V: Vertex, E: GraphEdge<V>> EdgeSet for UndirectedAdjacencyGraph<V, E> {
    fn edges(&self) -> impl Iterator<Item = E> + '_ {
        self.adjacent.iter().enumerate().flat_map(move |(slot, list)| {
            list.iter()
                .filter(move |e| self.vertices.index_of(e.source()) == Some(slot))
                .cloned()
        })
    }

    fn edge_count(&self) -> usize {
        self.num_edges
    }

    fn contains_edge(&self, edge: &E) -> bool {
        self.vertices
            .index_of(edge.source())
            .is_some_and(|s| self.adjacent[s].contains(edge))
    }
}

impl<V: Vertex, E: GraphEdge<V>> MutableVertexGraph for UndirectedAdjacencyGraph<V, E> {
    fn add_vertex(&mut self, vertex: V) -> bool {
        let (_, added) = self.vertices.insert(vertex);
        if added {
            self.adjacent.push(Vec::new());
        }
        added
    }

    fn remove_vertex(&mut self, vertex: &V) -> bool {
        let Some(slot) = self.vertices.index_of(vertex) else {
            return false;
        };

        let incident = std::mem::take(&mut self.adjacent[slot]);
        for e in &incident {
            if let Some(other) = e.other_end(vertex).filter(|&w| w != vertex) {
                let o = self.slot(other);
                remove_first(&mut self.adjacent[o], e);
            }
        }
        self.num_edges -= incident.len();

        self.vertices.swap_remove(vertex);
        self.adjacent.swap_remove(slot);
        true
    }
}

impl<V: Vertex, E: GraphEdge<V>> MutableEdgeGraph for UndirectedAdjacencyGraph<V, E> {
    fn add_edge(&mut self, edge: E) -> Result<bool> {
        let (s, t) = self.endpoint_slots(&edge)?;
        if !self.allow_parallel_edges {
            let (u, v) = (edge.source(), edge.target());
            if self.adjacent[s]
                .iter()
                .any(|e| e.other_end(u).is_some_and(|w| w == v))
            {
                return Ok(false);
            }
        }

        if s != t {
            self.adjacent[t].push(edge.clone());
        }
        self.adjacent[s].push(edge);
        self.num_edges += 1;
        Ok(true)
    }

    fn remove_edge(&mut self, edge: &E) -> bool {
        let Some(s) = self.vertices.index_of(edge.source()) else {
            return false;
        };
        let Some(pos) = self.adjacent[s].iter().position(|e| e == edge) else {
            return false;
        };

        // The stored instance may differ in orientation for order-independent edge types
        let stored = self.adjacent[s].remove(pos);
        let source = edge.source();
        if let Some(other) = stored.other_end(source).filter(|&w| w != source) {
            let o = self.slot(other);
            remove_first(&mut self.adjacent[o], &stored);
        }
        self.num_edges -= 1;
        true
    }
}

impl<V: Vertex, E: GraphEdge<V>> MutableGraph for UndirectedAdjacencyGraph<V, E> {
    fn clear(&mut self) {
        self.vertices.clear();
        self.adjacent.clear();
        self.num_edges = 0;
    }
}

test_graph_ops!(
    test_undirected_adjacency_graph,
    UndirectedAdjacencyGraph,
    UndirectedEdge,
    true,
    (
        GraphNew,
        VertexSet,
        EdgeSet,
        UndirectedGraph,
        MutableGraph,
        ParallelEdges
    )
);
