/*!
# Graph Capabilities

Graphs are described by small capability traits instead of one monolithic interface.
Algorithms ask for exactly the capabilities they need, e.g. the cycle-popping random tree
only needs [`VertexSet`] and [`ImplicitGraph`], so it also runs on a closure backed
[`DelegateImplicitGraph`](crate::repr::DelegateImplicitGraph).

All iterators yield owned vertices and edges (cloned from the store), which keeps the
traits implementable by graphs that compute their edges on the fly.
*/

use crate::{edge::GraphEdge, error::Result, vertex::Vertex};

/// Base trait of every graph: fixes vertex and edge type and reports basic properties.
pub trait GraphType {
    type Vertex: Vertex;
    type Edge: GraphEdge<Self::Vertex>;

    /// Returns *true* if edge orientation matters
    fn is_directed(&self) -> bool;

    /// Returns *true* if several edges between the same endpoints may coexist
    fn allow_parallel_edges(&self) -> bool;
}

/// Membership test for vertices without requiring enumeration
pub trait ImplicitVertexSet: GraphType {
    /// Returns *true* if `vertex` is part of the graph
    fn contains_vertex(&self, vertex: &Self::Vertex) -> bool;
}

/// Provides getters pertaining to the vertices of a graph
pub trait VertexSet: ImplicitVertexSet {
    /// Returns an iterator over all vertices
    fn vertices(&self) -> impl Iterator<Item = Self::Vertex> + '_;

    /// Returns the number of vertices
    fn vertex_count(&self) -> usize;

    /// Returns *true* if the graph has no vertices (and thus no edges)
    fn is_vertices_empty(&self) -> bool {
        self.vertex_count() == 0
    }
}

/// Provides getters pertaining to the edges of a graph
pub trait EdgeSet: GraphType {
    /// Returns an iterator over all edges.
    /// Undirected graphs report every edge once.
    fn edges(&self) -> impl Iterator<Item = Self::Edge> + '_;

    /// Returns the number of edges
    fn edge_count(&self) -> usize;

    /// Returns *true* if the graph has no edges
    fn is_edges_empty(&self) -> bool {
        self.edge_count() == 0
    }

    /// Returns *true* if `edge` is stored in the graph
    fn contains_edge(&self, edge: &Self::Edge) -> bool;
}

/// Out-edge access; the full edge set need not be known.
pub trait ImplicitGraph: ImplicitVertexSet {
    /// Returns an iterator over the out-edges of `vertex` or `None` if `vertex` is not part
    /// of the graph
    fn try_out_edges(
        &self,
        vertex: &Self::Vertex,
    ) -> Option<impl Iterator<Item = Self::Edge> + '_>;

    /// Returns an iterator over the out-edges of `vertex`.
    /// ** Panics if `vertex` is not part of the graph **
    fn out_edges(&self, vertex: &Self::Vertex) -> impl Iterator<Item = Self::Edge> + '_ {
        let Some(edges) = self.try_out_edges(vertex) else {
            panic!("vertex is not part of the graph");
        };
        edges
    }

    /// Returns the number of out-edges of `vertex`
    /// ** Panics if `vertex` is not part of the graph **
    fn out_degree(&self, vertex: &Self::Vertex) -> usize {
        self.out_edges(vertex).count()
    }

    /// Returns *true* if `vertex` has no out-edges
    /// ** Panics if `vertex` is not part of the graph **
    fn is_out_edges_empty(&self, vertex: &Self::Vertex) -> bool {
        self.out_degree(vertex) == 0
    }

    /// Returns the `index`-th out-edge of `vertex` if it exists
    /// ** Panics if `vertex` is not part of the graph **
    fn out_edge(&self, vertex: &Self::Vertex, index: usize) -> Option<Self::Edge> {
        self.out_edges(vertex).nth(index)
    }
}

/// Edge lookup by endpoints
pub trait IncidenceGraph: ImplicitGraph {
    /// Returns some edge from `source` to `target` if one exists
    fn try_get_edge(&self, source: &Self::Vertex, target: &Self::Vertex) -> Option<Self::Edge> {
        self.try_out_edges(source)?
            .find(|e| e.target() == target)
    }

    /// Returns all edges from `source` to `target` or `None` if `source` is not part of
    /// the graph
    fn try_get_edges(
        &self,
        source: &Self::Vertex,
        target: &Self::Vertex,
    ) -> Option<Vec<Self::Edge>> {
        Some(
            self.try_out_edges(source)?
                .filter(|e| e.target() == target)
                .collect(),
        )
    }

    /// Returns *true* if there is an edge from `source` to `target`
    fn contains_edge_between(&self, source: &Self::Vertex, target: &Self::Vertex) -> bool {
        self.try_get_edge(source, target).is_some()
    }
}

/// Directed graphs that additionally store in-edges
pub trait BidirectionalGraph: IncidenceGraph {
    /// Returns an iterator over the in-edges of `vertex`
    /// ** Panics if `vertex` is not part of the graph **
    fn in_edges(&self, vertex: &Self::Vertex) -> impl Iterator<Item = Self::Edge> + '_;

    /// Returns the number of in-edges of `vertex`
    /// ** Panics if `vertex` is not part of the graph **
    fn in_degree(&self, vertex: &Self::Vertex) -> usize {
        self.in_edges(vertex).count()
    }

    /// Returns *true* if `vertex` has no in-edges
    /// ** Panics if `vertex` is not part of the graph **
    fn is_in_edges_empty(&self, vertex: &Self::Vertex) -> bool {
        self.in_degree(vertex) == 0
    }

    /// Returns in-degree plus out-degree
    /// ** Panics if `vertex` is not part of the graph **
    fn degree(&self, vertex: &Self::Vertex) -> usize {
        self.in_degree(vertex) + self.out_degree(vertex)
    }
}

/// Graphs whose edges have no orientation
pub trait UndirectedGraph: ImplicitVertexSet {
    /// Returns an iterator over all edges incident to `vertex`; self-loops are reported once
    /// ** Panics if `vertex` is not part of the graph **
    fn adjacent_edges(&self, vertex: &Self::Vertex) -> impl Iterator<Item = Self::Edge> + '_;

    /// Returns the number of edges incident to `vertex`
    /// ** Panics if `vertex` is not part of the graph **
    fn adjacent_degree(&self, vertex: &Self::Vertex) -> usize {
        self.adjacent_edges(vertex).count()
    }

    /// Returns *true* if no edge is incident to `vertex`
    /// ** Panics if `vertex` is not part of the graph **
    fn is_adjacent_edges_empty(&self, vertex: &Self::Vertex) -> bool {
        self.adjacent_degree(vertex) == 0
    }

    /// Returns some edge connecting `u` and `v` (in either orientation)
    fn try_get_adjacent_edge(&self, u: &Self::Vertex, v: &Self::Vertex) -> Option<Self::Edge> {
        if !self.contains_vertex(u) {
            return None;
        }
        self.adjacent_edges(u)
            .find(|e| e.other_end(u).is_some_and(|w| w == v))
    }
}

/// Provides functions to insert/delete vertices
pub trait MutableVertexGraph: VertexSet {
    /// Adds `vertex` to the graph.
    /// Returns *true* exactly if the vertex was not present previously.
    fn add_vertex(&mut self, vertex: Self::Vertex) -> bool;

    /// Adds all vertices in the collection and returns the number of newly added ones
    fn add_vertex_range(&mut self, vertices: impl IntoIterator<Item = Self::Vertex>) -> usize {
        vertices
            .into_iter()
            .filter(|v| self.add_vertex(v.clone()))
            .count()
    }

    /// Removes `vertex` together with all its incident edges.
    /// Returns *true* if the vertex was present.
    fn remove_vertex(&mut self, vertex: &Self::Vertex) -> bool;

    /// Removes every vertex matching `predicate` and returns how many were removed
    fn remove_vertex_if(&mut self, mut predicate: impl FnMut(&Self::Vertex) -> bool) -> usize {
        let doomed: Vec<_> = self.vertices().filter(|v| predicate(v)).collect();
        doomed.iter().filter(|v| self.remove_vertex(v)).count()
    }
}

/// Provides functions to insert/delete edges
pub trait MutableEdgeGraph: EdgeSet {
    /// Adds `edge` to the graph.
    /// Returns *true* exactly if the edge was added; if parallel edges are forbidden and an
    /// edge between the same endpoints exists, nothing happens and *false* is returned.
    ///
    /// Fails with [`VertexNotFound`](crate::error::GraphError::VertexNotFound) if an
    /// endpoint is not part of the graph.
    fn add_edge(&mut self, edge: Self::Edge) -> Result<bool>;

    /// Adds all edges in the collection and returns the number of added ones
    fn add_edge_range(&mut self, edges: impl IntoIterator<Item = Self::Edge>) -> Result<usize> {
        let mut added = 0;
        for edge in edges {
            added += self.add_edge(edge)? as usize;
        }
        Ok(added)
    }

    /// Removes `edge` from the graph. Returns *true* if it was present.
    fn remove_edge(&mut self, edge: &Self::Edge) -> bool;

    /// Removes every edge matching `predicate` and returns how many were removed
    fn remove_edge_if(&mut self, mut predicate: impl FnMut(&Self::Edge) -> bool) -> usize {
        let doomed: Vec<_> = self.edges().filter(|e| predicate(e)).collect();
        doomed.iter().filter(|e| self.remove_edge(e)).count()
    }
}

/// Full editing support
pub trait MutableGraph: MutableVertexGraph + MutableEdgeGraph {
    /// Adds the endpoints of `edge` if missing and then the edge itself
    fn add_vertices_and_edge(&mut self, edge: Self::Edge) -> Result<bool> {
        self.add_vertex(edge.source().clone());
        self.add_vertex(edge.target().clone());
        self.add_edge(edge)
    }

    /// Adds all edges (and missing endpoints) and returns the number of added edges
    fn add_vertices_and_edge_range(
        &mut self,
        edges: impl IntoIterator<Item = Self::Edge>,
    ) -> Result<usize> {
        let mut added = 0;
        for edge in edges {
            added += self.add_vertices_and_edge(edge)? as usize;
        }
        Ok(added)
    }

    /// Removes all vertices and edges
    fn clear(&mut self);
}

/// Creates an empty graph
pub trait GraphNew {
    /// Creates an empty graph; `allow_parallel_edges` is fixed for the graph's lifetime
    fn new(allow_parallel_edges: bool) -> Self;
}

/// A super trait for creating a graph from scratch from a set of edges
pub trait GraphFromScratch: GraphType + Sized {
    /// Creates a graph containing exactly the given edges and their endpoints.
    /// Parallel edges are not allowed.
    fn from_edges(edges: impl IntoIterator<Item = impl Into<Self::Edge>>) -> Self;
}

impl<G> GraphFromScratch for G
where
    G: GraphNew + MutableGraph,
{
    fn from_edges(edges: impl IntoIterator<Item = impl Into<G::Edge>>) -> Self {
        let mut graph = Self::new(false);
        for edge in edges {
            // endpoints are inserted right before, so this cannot fail
            let _ = graph.add_vertices_and_edge(edge.into());
        }
        graph
    }
}
