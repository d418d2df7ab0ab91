use fxhash::FxHashSet;
use tracing::debug;

use super::{
    Augmentation, BipartiteEndpoints, EdmondsKarpMaximumFlow, GraphAugmentor,
    ReversedEdgeAugmentor,
};
use crate::{algo::framework::*, error::*, ops::*};

/// Maximum bipartite matching by reduction to unit-capacity maximum flow.
///
/// A super source is connected to every source vertex and every sink vertex to a super
/// sink, missing reversed edges are added with capacity `0` and all other edges get
/// capacity `1`. Edges saturated by an Edmonds-Karp flow between the super vertices form
/// the matching. All vertices and edges added on the way are removed again, whether the
/// computation succeeds or not.
pub struct MaximumBipartiteMatching<'a, G, VF, EF>
where
    G: GraphType,
{
    graph: &'a mut G,
    sources: Vec<G::Vertex>,
    sinks: Vec<G::Vertex>,
    vertex_factory: VF,
    edge_factory: EF,
    core: AlgorithmCore,
    matched_edges: Vec<G::Edge>,
}

impl<'a, G, VF, EF> MaximumBipartiteMatching<'a, G, VF, EF>
where
    G: MutableGraph + IncidenceGraph,
    VF: FnMut() -> G::Vertex,
    EF: FnMut(&G::Vertex, &G::Vertex) -> G::Edge,
{
    /// `vertex_factory` must produce two vertices not yet in `graph`
    pub fn new(
        graph: &'a mut G,
        sources: impl IntoIterator<Item = G::Vertex>,
        sinks: impl IntoIterator<Item = G::Vertex>,
        vertex_factory: VF,
        edge_factory: EF,
        cancel: CancelHandle,
    ) -> Self {
        Self {
            graph,
            sources: sources.into_iter().collect(),
            sinks: sinks.into_iter().collect(),
            vertex_factory,
            edge_factory,
            core: AlgorithmCore::new(cancel),
            matched_edges: Vec::new(),
        }
    }

    /// Edges of the matching found by the last computation
    pub fn matched_edges(&self) -> &[G::Edge] {
        &self.matched_edges
    }

    fn match_augmented(
        &mut self,
        augmentation: &Augmentation<G::Vertex, G::Edge>,
    ) -> Result<()> {
        if self.is_cancelling() {
            return Ok(());
        }

        let mut reverser = ReversedEdgeAugmentor::new();
        let result = reverser
            .add_reversed_edges(self.graph, &mut self.edge_factory)
            .and_then(|()| self.maximize_flow(augmentation, &reverser));

        if reverser.is_augmented() {
            let removed = reverser.remove_reversed_edges(self.graph);
            return result.and(removed);
        }
        result
    }

    fn maximize_flow(
        &mut self,
        augmentation: &Augmentation<G::Vertex, G::Edge>,
        reverser: &ReversedEdgeAugmentor<G::Vertex, G::Edge>,
    ) -> Result<()> {
        let graph: &G = self.graph;
        let added: FxHashSet<G::Edge> = reverser.augmented_edges().iter().cloned().collect();
        let capacity = |e: &G::Edge| if added.contains(e) { 0.0 } else { 1.0 };

        let mut flow = EdmondsKarpMaximumFlow::new(
            graph,
            capacity,
            reverser.reversed_edges(),
            self.core.cancel_handle().clone(),
        );
        let size = flow.compute_flow(
            augmentation.super_source().clone(),
            augmentation.super_sink().clone(),
        )?;

        let matched = graph
            .edges()
            .filter(|e| {
                !added.contains(e)
                    && !augmentation.touches_super_vertex(e)
                    && flow.residual_capacity(e) < f64::EPSILON
            })
            .collect();
        debug!(size, "maximum bipartite matching");
        self.matched_edges = matched;
        Ok(())
    }
}

impl<G, VF, EF> Algorithm for MaximumBipartiteMatching<'_, G, VF, EF>
where
    G: MutableGraph + IncidenceGraph,
    VF: FnMut() -> G::Vertex,
    EF: FnMut(&G::Vertex, &G::Vertex) -> G::Edge,
{
    fn core(&self) -> &AlgorithmCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AlgorithmCore {
        &mut self.core
    }

    fn initialize(&mut self) -> Result<()> {
        self.matched_edges.clear();
        Ok(())
    }

    fn internal_compute(&mut self) -> Result<()> {
        let plan = BipartiteEndpoints {
            sources: self.sources.clone(),
            sinks: self.sinks.clone(),
        };
        let mut augmentor = GraphAugmentor::with_plan(
            &mut *self.graph,
            plan,
            &mut self.vertex_factory,
            &mut self.edge_factory,
            self.core.cancel_handle().clone(),
        );
        let augmented = augmentor.compute();
        let Some(augmentation) = augmentor.into_augmentation() else {
            return augmented;
        };

        let result = augmented.and_then(|()| self.match_augmented(&augmentation));
        augmentation.rollback(self.graph);
        result
    }
}
