/*!
# Delegate Graphs

Graphs whose out-edges are computed on demand by a user closure
`Fn(&V) -> Option<Vec<E>>`, where `None` means "vertex not in graph". Useful for graphs that
are too large or too dynamic to materialize, e.g. state spaces explored by a search.

- [`DelegateImplicitGraph`] knows nothing but the closure; it implements [`ImplicitGraph`]
  and [`IncidenceGraph`].
- [`DelegateVertexListGraph`] additionally knows its vertex list and restricts the
  closure's edges to that list, which makes it a full [`VertexSet`] + [`EdgeSet`].
*/

use std::marker::PhantomData;

use super::*;

/// A directed graph computing out-edges through a closure.
pub struct DelegateImplicitGraph<V, E, F> {
    try_get_out_edges: F,
    allow_parallel_edges: bool,
    _types: PhantomData<fn(&V) -> E>,
}

impl<V, E, F> DelegateImplicitGraph<V, E, F>
where
    V: Vertex,
    E: GraphEdge<V>,
    F: Fn(&V) -> Option<Vec<E>>,
{
    pub fn new(try_get_out_edges: F) -> Self {
        Self {
            try_get_out_edges,
            allow_parallel_edges: true,
            _types: PhantomData,
        }
    }

    /// Sets the reported parallel edge policy (default *true*)
    pub fn set_parallel_edges(&mut self, allow: bool) {
        self.allow_parallel_edges = allow;
    }

    /// Sets the reported parallel edge policy (default *true*)
    pub fn parallel_edges(mut self, allow: bool) -> Self {
        self.set_parallel_edges(allow);
        self
    }
}

impl<V, E, F> GraphType for DelegateImplicitGraph<V, E, F>
where
    V: Vertex,
    E: GraphEdge<V>,
    F: Fn(&V) -> Option<Vec<E>>,
{
    type Vertex = V;
    type Edge = E;

    fn is_directed(&self) -> bool {
        true
    }

    fn allow_parallel_edges(&self) -> bool {
        self.allow_parallel_edges
    }
}

impl<V, E, F> ImplicitVertexSet for DelegateImplicitGraph<V, E, F>
where
    V: Vertex,
    E: GraphEdge<V>,
    F: Fn(&V) -> Option<Vec<E>>,
{
    fn contains_vertex(&self, vertex: &V) -> bool {
        (self.try_get_out_edges)(vertex).is_some()
    }
}

impl<V, E, F> ImplicitGraph for DelegateImplicitGraph<V, E, F>
where
    V: Vertex,
    E: GraphEdge<V>,
    F: Fn(&V) -> Option<Vec<E>>,
{
    fn try_out_edges(&self, vertex: &V) -> Option<impl Iterator<Item = E> + '_> {
        (self.try_get_out_edges)(vertex).map(Vec::into_iter)
    }
}

impl<V, E, F> IncidenceGraph for DelegateImplicitGraph<V, E, F>
where
    V: Vertex,
    E: GraphEdge<V>,
    F: Fn(&V) -> Option<Vec<E>>,
{
}

/// A [`DelegateImplicitGraph`] restricted to an explicit vertex list.
///
/// Out-edges reported by the closure are filtered to those whose target is in the list;
/// vertices outside the list are not part of the graph even if the closure knows them.
pub struct DelegateVertexListGraph<V, E, F> {
    vertices: IndexedSet<V>,
    delegate: DelegateImplicitGraph<V, E, F>,
}

impl<V, E, F> DelegateVertexListGraph<V, E, F>
where
    V: Vertex,
    E: GraphEdge<V>,
    F: Fn(&V) -> Option<Vec<E>>,
{
    pub fn new(vertices: impl IntoIterator<Item = V>, try_get_out_edges: F) -> Self {
        let mut set = IndexedSet::new();
        for v in vertices {
            set.insert(v);
        }
        Self {
            vertices: set,
            delegate: DelegateImplicitGraph::new(try_get_out_edges),
        }
    }
}

impl<V, E, F> GraphType for DelegateVertexListGraph<V, E, F>
where
    V: Vertex,
    E: GraphEdge<V>,
    F: Fn(&V) -> Option<Vec<E>>,
{
    type Vertex = V;
    type Edge = E;

    fn is_directed(&self) -> bool {
        true
    }

    fn allow_parallel_edges(&self) -> bool {
        self.delegate.allow_parallel_edges
    }
}

impl<V, E, F> ImplicitVertexSet for DelegateVertexListGraph<V, E, F>
where
    V: Vertex,
    E: GraphEdge<V>,
    F: Fn(&V) -> Option<Vec<E>>,
{
    fn contains_vertex(&self, vertex: &V) -> bool {
        self.vertices.contains(vertex)
    }
}

impl<V, E, F> VertexSet for DelegateVertexListGraph<V, E, F>
where
    V: Vertex,
    E: GraphEdge<V>,
    F: Fn(&V) -> Option<Vec<E>>,
{
    fn vertices(&self) -> impl Iterator<Item = V> + '_ {
        self.vertices.iter().cloned()
    }

    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}

impl<V, E, F> ImplicitGraph for DelegateVertexListGraph<V, E, F>
where
    V: Vertex,
    E: GraphEdge<V>,
    F: Fn(&V) -> Option<Vec<E>>,
{
    fn try_out_edges(&self, vertex: &V) -> Option<impl Iterator<Item = E> + '_> {
        if !self.vertices.contains(vertex) {
            return None;
        }
        let edges = self.delegate.try_out_edges(vertex)?;
        Some(edges.filter(|e| self.vertices.contains(e.target())))
    }
}

impl<V, E, F> IncidenceGraph for DelegateVertexListGraph<V, E, F>
where
    V: Vertex,
    E: GraphEdge<V>,
    F: Fn(&V) -> Option<Vec<E>>,
{
}

impl<V, E, F> EdgeSet for DelegateVertexListGraph<V, E, F>
where
    V: Vertex,
    E: GraphEdge<V>,
    F: Fn(&V) -> Option<Vec<E>>,
{
    fn edges(&self) -> impl Iterator<Item = E> + '_ {
        self.vertices
            .iter()
            .filter_map(|v| self.try_out_edges(v))
            .flatten()
    }

    fn edge_count(&self) -> usize {
        self.edges().count()
    }

    fn contains_edge(&self, edge: &E) -> bool {
        self.try_out_edges(edge.source())
            .is_some_and(|mut edges| edges.any(|e| &e == edge))
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    /// Vertices `0..n` on a directed cycle
    fn cycle(n: u32) -> impl Fn(&u32) -> Option<Vec<Edge<u32>>> {
        move |&v| (v < n).then(|| vec![Edge(v, (v + 1) % n)])
    }

    #[test]
    fn implicit_graph_uses_closure() {
        let graph = DelegateImplicitGraph::new(cycle(4));
        assert!(graph.contains_vertex(&3));
        assert!(!graph.contains_vertex(&4));
        assert_eq!(graph.out_edges(&3).collect_vec(), vec![Edge(3, 0)]);
        assert!(graph.try_out_edges(&9).is_none());
        assert_eq!(graph.out_degree(&1), 1);
        assert!(graph.contains_edge_between(&1, &2));
        assert!(graph.allow_parallel_edges());
        assert!(!graph.parallel_edges(false).allow_parallel_edges());
    }

    #[test]
    fn vertex_list_restricts_edges() {
        let graph = DelegateVertexListGraph::new([0, 1, 2], cycle(4));
        assert_eq!(graph.vertex_count(), 3);
        assert!(!graph.contains_vertex(&3));
        assert_eq!(
            graph.edges().sorted().collect_vec(),
            vec![Edge(0, 1), Edge(1, 2)]
        );
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.contains_edge(&Edge(0, 1)));
        assert!(!graph.contains_edge(&Edge(2, 3)));
        assert!(graph.is_out_edges_empty(&2));
    }
}
