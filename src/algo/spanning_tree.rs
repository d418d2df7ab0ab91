/*!
# Minimum Spanning Tree

Kruskal's algorithm: edges are examined in order of increasing weight and every edge that
connects two different components (tracked in a [`ForestDisjointSet`]) becomes a tree edge.
On a disconnected graph the result is a minimum spanning forest.
*/

use super::{framework::*, observers::TreeBuilderAlgorithm};
use crate::{
    collections::{BinaryQueue, ForestDisjointSet},
    edge::GraphEdge,
    error::*,
    events::Event,
    ops::*,
};

/// Kruskal's minimum spanning tree over the edge list of a graph.
pub struct KruskalMinimumSpanningTree<'a, G, W>
where
    G: GraphType,
{
    graph: &'a G,
    weights: W,
    core: AlgorithmCore,
    spanning_tree_edges: Vec<G::Edge>,
    total_weight: f64,
    examine_edge: Event<G::Edge>,
    tree_edge: Event<G::Edge>,
}

impl<'a, G, W> KruskalMinimumSpanningTree<'a, G, W>
where
    G: VertexSet + EdgeSet,
    W: Fn(&G::Edge) -> f64,
{
    pub fn new(graph: &'a G, weights: W, cancel: CancelHandle) -> Self {
        Self {
            graph,
            weights,
            core: AlgorithmCore::new(cancel),
            spanning_tree_edges: Vec::new(),
            total_weight: 0.0,
            examine_edge: Event::new(),
            tree_edge: Event::new(),
        }
    }

    /// Tree edges in the order they were selected
    pub fn spanning_tree_edges(&self) -> &[G::Edge] {
        &self.spanning_tree_edges
    }

    /// Sum of the weights of all tree edges
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Fired for every edge taken from the queue
    pub fn examine_edge(&self) -> &Event<G::Edge> {
        &self.examine_edge
    }
}

impl<G, W> Algorithm for KruskalMinimumSpanningTree<'_, G, W>
where
    G: VertexSet + EdgeSet,
    W: Fn(&G::Edge) -> f64,
{
    fn core(&self) -> &AlgorithmCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AlgorithmCore {
        &mut self.core
    }

    fn initialize(&mut self) -> Result<()> {
        self.spanning_tree_edges.clear();
        self.total_weight = 0.0;
        Ok(())
    }

    fn internal_compute(&mut self) -> Result<()> {
        let graph = self.graph;

        let mut sets = ForestDisjointSet::with_capacity(graph.vertex_count());
        for v in graph.vertices() {
            sets.make_set(v);
        }
        if self.is_cancelling() {
            return Ok(());
        }

        let mut queue = BinaryQueue::with_capacity(graph.edge_count());
        for edge in graph.edges() {
            queue.enqueue(edge, |e| (self.weights)(e));
        }
        if self.is_cancelling() {
            return Ok(());
        }

        while let Ok(edge) = queue.dequeue() {
            if self.is_cancelling() {
                return Ok(());
            }
            self.examine_edge.fire(&edge);

            if sets.union(edge.source(), edge.target())? {
                self.total_weight += (self.weights)(&edge);
                self.tree_edge.fire(&edge);
                self.spanning_tree_edges.push(edge);
            }
        }
        Ok(())
    }
}

impl<G, W> TreeBuilderAlgorithm<G::Edge> for KruskalMinimumSpanningTree<'_, G, W>
where
    G: GraphType,
{
    fn tree_edge_event(&self) -> &Event<G::Edge> {
        &self.tree_edge
    }
}
