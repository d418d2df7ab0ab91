/*!
# Clustered Graphs

A [`ClusteredAdjacencyGraph`] is a tree of clusters. Every cluster wraps its own
[`AdjacencyGraph`] and the root cluster holds the whole graph.

Invariant: a vertex or edge present in a cluster is present in every ancestor up to the
root. Hence
- adding to a cluster cascades to all ancestors that miss the vertex/edge,
- removing from any cluster removes from the whole tree, since the root contains it.

Clusters are addressed by [`ClusterId`]; ids of removed clusters are never reused.
*/

use super::*;

/// Handle of a cluster inside a [`ClusteredAdjacencyGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterId(usize);

impl ClusterId {
    /// The root cluster, which always exists
    pub const ROOT: ClusterId = ClusterId(0);
}

#[derive(Clone, Debug)]
struct Cluster<V, E> {
    graph: AdjacencyGraph<V, E>,
    parent: Option<ClusterId>,
    children: Vec<ClusterId>,
    collapsed: bool,
}

impl<V: Vertex, E: GraphEdge<V>> Cluster<V, E> {
    fn new(parent: Option<ClusterId>, allow_parallel_edges: bool) -> Self {
        Self {
            graph: AdjacencyGraph::new(allow_parallel_edges),
            parent,
            children: Vec::new(),
            collapsed: false,
        }
    }
}

/// A directed graph organized as a tree of nested clusters.
#[derive(Clone, Debug)]
pub struct ClusteredAdjacencyGraph<V, E> {
    root: Cluster<V, E>,
    /// Non-root clusters; slot `i` holds cluster id `i + 1`
    clusters: Vec<Option<Cluster<V, E>>>,
    allow_parallel_edges: bool,
}

impl<V: Vertex, E: GraphEdge<V>> GraphNew for ClusteredAdjacencyGraph<V, E> {
    fn new(allow_parallel_edges: bool) -> Self {
        Self {
            root: Cluster::new(None, allow_parallel_edges),
            clusters: Vec::new(),
            allow_parallel_edges,
        }
    }
}

impl<V: Vertex, E: GraphEdge<V>> Default for ClusteredAdjacencyGraph<V, E> {
    fn default() -> Self {
        Self::new(false)
    }
}

impl<V: Vertex, E: GraphEdge<V>> ClusteredAdjacencyGraph<V, E> {
    fn get(&self, id: ClusterId) -> Result<&Cluster<V, E>> {
        if id == ClusterId::ROOT {
            return Ok(&self.root);
        }
        self.clusters
            .get(id.0 - 1)
            .and_then(Option::as_ref)
            .ok_or_else(|| GraphError::invalid_argument("unknown cluster"))
    }

    fn get_mut(&mut self, id: ClusterId) -> Result<&mut Cluster<V, E>> {
        if id == ClusterId::ROOT {
            return Ok(&mut self.root);
        }
        self.clusters
            .get_mut(id.0 - 1)
            .and_then(Option::as_mut)
            .ok_or_else(|| GraphError::invalid_argument("unknown cluster"))
    }

    /// `id` and all its ancestors, root first
    fn lineage(&self, id: ClusterId) -> Result<Vec<ClusterId>> {
        let mut lineage = vec![id];
        let mut current = self.get(id)?.parent;
        while let Some(parent) = current {
            lineage.push(parent);
            current = self.get(parent)?.parent;
        }
        lineage.reverse();
        Ok(lineage)
    }

    /// `id` and all its descendants
    fn subtree(&self, id: ClusterId) -> Result<Vec<ClusterId>> {
        let mut subtree = vec![id];
        let mut i = 0;
        while i < subtree.len() {
            subtree.extend(self.get(subtree[i])?.children.iter().copied());
            i += 1;
        }
        Ok(subtree)
    }

    /// Ids of all live clusters, root first
    fn all_clusters(&self) -> impl Iterator<Item = ClusterId> + '_ {
        std::iter::once(ClusterId::ROOT).chain(
            self.clusters
                .iter()
                .enumerate()
                .filter(|(_, c)| c.is_some())
                .map(|(i, _)| ClusterId(i + 1)),
        )
    }

    /// Graph wrapped by cluster `id`
    pub fn cluster_graph(&self, id: ClusterId) -> Result<&AdjacencyGraph<V, E>> {
        Ok(&self.get(id)?.graph)
    }

    /// Creates an empty child cluster of `parent`
    pub fn add_cluster(&mut self, parent: ClusterId) -> Result<ClusterId> {
        self.get(parent)?;
        let id = ClusterId(self.clusters.len() + 1);
        self.clusters
            .push(Some(Cluster::new(Some(parent), self.allow_parallel_edges)));
        self.get_mut(parent)?.children.push(id);
        Ok(id)
    }

    /// Removes cluster `id` together with all its descendants.
    /// Vertices and edges stay in the ancestors.
    ///
    /// The root cannot be removed.
    pub fn remove_cluster(&mut self, id: ClusterId) -> Result<()> {
        if id == ClusterId::ROOT {
            return Err(GraphError::invalid_operation("cannot remove the root cluster"));
        }

        let subtree = self.subtree(id)?;
        if let Some(parent) = self.get(id)?.parent {
            self.get_mut(parent)?.children.retain(|&c| c != id);
        }
        for c in subtree {
            self.clusters[c.0 - 1] = None;
        }
        Ok(())
    }

    /// Direct child clusters of `id`
    pub fn clusters_of(&self, id: ClusterId) -> Result<&[ClusterId]> {
        Ok(&self.get(id)?.children)
    }

    /// Number of direct child clusters of `id`
    pub fn cluster_count(&self, id: ClusterId) -> Result<usize> {
        Ok(self.get(id)?.children.len())
    }

    /// Parent of cluster `id` (`None` for the root)
    pub fn parent_of(&self, id: ClusterId) -> Result<Option<ClusterId>> {
        Ok(self.get(id)?.parent)
    }

    /// Returns the collapsed flag of cluster `id`
    pub fn is_collapsed(&self, id: ClusterId) -> Result<bool> {
        Ok(self.get(id)?.collapsed)
    }

    /// Sets the collapsed flag of cluster `id`; the flag carries no semantics of its own
    pub fn set_collapsed(&mut self, id: ClusterId, collapsed: bool) -> Result<()> {
        self.get_mut(id)?.collapsed = collapsed;
        Ok(())
    }

    /// Adds `vertex` to cluster `id` and every ancestor missing it.
    /// Returns *true* if the vertex was new to cluster `id`.
    pub fn add_vertex_to(&mut self, id: ClusterId, vertex: V) -> Result<bool> {
        let mut added = false;
        for c in self.lineage(id)? {
            added = self.get_mut(c)?.graph.add_vertex(vertex.clone());
        }
        Ok(added)
    }

    /// Adds `edge` to cluster `id` and every ancestor missing it.
    ///
    /// Fails with `VertexNotFound` if an endpoint is not part of cluster `id`.
    pub fn add_edge_to(&mut self, id: ClusterId, edge: E) -> Result<bool> {
        let graph = &self.get(id)?.graph;
        if !graph.contains_vertex(edge.source()) || !graph.contains_vertex(edge.target()) {
            return Err(GraphError::VertexNotFound);
        }

        let mut added = false;
        for c in self.lineage(id)? {
            let graph = &mut self.get_mut(c)?.graph;
            added = !graph.contains_edge(&edge) && graph.add_edge(edge.clone())?;
        }
        Ok(added)
    }

    /// Adds the endpoints of `edge` and then the edge to cluster `id` (and its ancestors)
    pub fn add_vertices_and_edge_to(&mut self, id: ClusterId, edge: E) -> Result<bool> {
        self.add_vertex_to(id, edge.source().clone())?;
        self.add_vertex_to(id, edge.target().clone())?;
        self.add_edge_to(id, edge)
    }

    /// Removes `vertex` and its incident edges from every cluster, provided cluster `id`
    /// contains it. Returns *false* if cluster `id` does not contain it.
    pub fn remove_vertex_from(&mut self, id: ClusterId, vertex: &V) -> Result<bool> {
        if !self.get(id)?.graph.contains_vertex(vertex) {
            return Ok(false);
        }
        let ids = self.all_clusters().collect::<Vec<_>>();
        for c in ids {
            self.get_mut(c)?.graph.remove_vertex(vertex);
        }
        Ok(true)
    }

    /// Removes `edge` from every cluster, provided cluster `id` contains it.
    /// Returns *false* if cluster `id` does not contain it.
    pub fn remove_edge_from(&mut self, id: ClusterId, edge: &E) -> Result<bool> {
        if !self.get(id)?.graph.contains_edge(edge) {
            return Ok(false);
        }
        let ids = self.all_clusters().collect::<Vec<_>>();
        for c in ids {
            self.get_mut(c)?.graph.remove_edge(edge);
        }
        Ok(true)
    }

    /// Empties cluster `id`: removes its child clusters and clears its graph.
    /// Ancestors keep their vertices and edges.
    pub fn clear_cluster(&mut self, id: ClusterId) -> Result<()> {
        let children = self.get(id)?.children.clone();
        for child in children {
            self.remove_cluster(child)?;
        }
        self.get_mut(id)?.graph.clear();
        Ok(())
    }
}

impl<V: Vertex, E: GraphEdge<V>> GraphType for ClusteredAdjacencyGraph<V, E> {
    type Vertex = V;
    type Edge = E;

    fn is_directed(&self) -> bool {
        true
    }

    fn allow_parallel_edges(&self) -> bool {
        self.allow_parallel_edges
    }
}

impl<V: Vertex, E: GraphEdge<V>> ImplicitVertexSet for ClusteredAdjacencyGraph<V, E> {
    fn contains_vertex(&self, vertex: &V) -> bool {
        self.root.graph.contains_vertex(vertex)
    }
}

impl<V: Vertex, E: GraphEdge<V>> VertexSet for ClusteredAdjacencyGraph<V, E> {
    fn vertices(&self) -> impl Iterator<Item = V> + '_ {
        self.root.graph.vertices()
    }

    fn vertex_count(&self) -> usize {
        self.root.graph.vertex_count()
    }
}

impl<V: Vertex, E: GraphEdge<V>> EdgeSet for ClusteredAdjacencyGraph<V, E> {
    fn edges(&self) -> impl Iterator<Item = E> + '_ {
        self.root.graph.edges()
    }

    fn edge_count(&self) -> usize {
        self.root.graph.edge_count()
    }

    fn contains_edge(&self, edge: &E) -> bool {
        self.root.graph.contains_edge(edge)
    }
}

impl<V: Vertex, E: GraphEdge<V>> ImplicitGraph for ClusteredAdjacencyGraph<V, E> {
    fn try_out_edges(&self, vertex: &V) -> Option<impl Iterator<Item = E> + '_> {
        self.root.graph.try_out_edges(vertex)
    }

    fn out_degree(&self, vertex: &V) -> usize {
        self.root.graph.out_degree(vertex)
    }
}

impl<V: Vertex, E: GraphEdge<V>> IncidenceGraph for ClusteredAdjacencyGraph<V, E> {}

impl<V: Vertex, E: GraphEdge<V>> MutableVertexGraph for ClusteredAdjacencyGraph<V, E> {
    fn add_vertex(&mut self, vertex: V) -> bool {
        self.root.graph.add_vertex(vertex)
    }

    fn remove_vertex(&mut self, vertex: &V) -> bool {
        self.remove_vertex_from(ClusterId::ROOT, vertex)
            .unwrap_or(false)
    }
}

impl<V: Vertex, E: GraphEdge<V>> MutableEdgeGraph for ClusteredAdjacencyGraph<V, E> {
    fn add_edge(&mut self, edge: E) -> Result<bool> {
        self.root.graph.add_edge(edge)
    }

    fn remove_edge(&mut self, edge: &E) -> bool {
        self.remove_edge_from(ClusterId::ROOT, edge).unwrap_or(false)
    }
}

impl<V: Vertex, E: GraphEdge<V>> MutableGraph for ClusteredAdjacencyGraph<V, E> {
    fn clear(&mut self) {
        self.clusters.clear();
        self.root.children.clear();
        self.root.graph.clear();
    }
}
