use crate::{
    algo::framework::*,
    edge::GraphEdge,
    error::*,
    events::Event,
    ops::*,
    vertex::Vertex,
};

/// The vertices and edges an augmentation added to a graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Augmentation<V, E> {
    super_source: V,
    super_sink: V,
    augmented_edges: Vec<E>,
}

impl<V: Vertex, E: GraphEdge<V>> Augmentation<V, E> {
    pub fn super_source(&self) -> &V {
        &self.super_source
    }

    pub fn super_sink(&self) -> &V {
        &self.super_sink
    }

    /// Edges added between the super vertices and the graph, in insertion order
    pub fn augmented_edges(&self) -> &[E] {
        &self.augmented_edges
    }

    /// Returns *true* if `edge` starts or ends in one of the super vertices
    pub fn touches_super_vertex(&self, edge: &E) -> bool {
        edge.is_adjacent(&self.super_source) || edge.is_adjacent(&self.super_sink)
    }

    /// Removes all augmented edges and both super vertices from `graph`
    pub fn rollback<G>(self, graph: &mut G)
    where
        G: MutableGraph<Vertex = V, Edge = E>,
    {
        for edge in self.augmented_edges.iter().rev() {
            graph.remove_edge(edge);
        }
        graph.remove_vertex(&self.super_sink);
        graph.remove_vertex(&self.super_source);
    }
}

/// Chooses the vertices connected to the super source and the super sink
pub trait AugmentationPlan<G: GraphType> {
    /// Returns `(sources, sinks)`
    fn sources_and_sinks(&self, graph: &G) -> (Vec<G::Vertex>, Vec<G::Vertex>);
}

/// Vertices without in-edges are sources, vertices without out-edges are sinks
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiSourceSink;

impl<G> AugmentationPlan<G> for MultiSourceSink
where
    G: VertexSet + BidirectionalGraph,
{
    fn sources_and_sinks(&self, graph: &G) -> (Vec<G::Vertex>, Vec<G::Vertex>) {
        let sources = graph
            .vertices()
            .filter(|v| graph.is_in_edges_empty(v))
            .collect();
        let sinks = graph
            .vertices()
            .filter(|v| graph.is_out_edges_empty(v))
            .collect();
        (sources, sinks)
    }
}

/// Explicit source and sink lists
#[derive(Debug, Clone)]
pub struct BipartiteEndpoints<V> {
    pub sources: Vec<V>,
    pub sinks: Vec<V>,
}

impl<G, V> AugmentationPlan<G> for BipartiteEndpoints<V>
where
    G: GraphType<Vertex = V>,
    V: Vertex,
{
    fn sources_and_sinks(&self, _: &G) -> (Vec<V>, Vec<V>) {
        (self.sources.clone(), self.sinks.clone())
    }
}

/// Events of a [`GraphAugmentor`]
pub struct AugmentorEvents<V, E> {
    pub super_source_added: Event<V>,
    pub super_sink_added: Event<V>,
    pub edge_added: Event<E>,
}

impl<V, E> Default for AugmentorEvents<V, E> {
    fn default() -> Self {
        Self {
            super_source_added: Event::new(),
            super_sink_added: Event::new(),
            edge_added: Event::new(),
        }
    }
}

/// Adds a super source and a super sink to a graph and connects them according to `P`.
///
/// The augmentation stays in the graph until [`GraphAugmentor::rollback`] is called or the
/// [`Augmentation`] returned by [`GraphAugmentor::into_augmentation`] is rolled back.
/// Computing again without a rollback fails with `InvalidOperation`.
pub struct GraphAugmentor<'a, G, P, VF, EF>
where
    G: GraphType,
{
    graph: &'a mut G,
    plan: P,
    vertex_factory: VF,
    edge_factory: EF,
    core: AlgorithmCore,
    augmentation: Option<Augmentation<G::Vertex, G::Edge>>,
    events: AugmentorEvents<G::Vertex, G::Edge>,
}

/// Connects every source (no in-edges) and every sink (no out-edges) to the super vertices
pub type MultiSourceSinkGraphAugmentor<'a, G, VF, EF> =
    GraphAugmentor<'a, G, MultiSourceSink, VF, EF>;

/// Connects given source and sink vertices to the super vertices
pub type BipartiteToMaximumFlowGraphAugmentor<'a, G, VF, EF> =
    GraphAugmentor<'a, G, BipartiteEndpoints<<G as GraphType>::Vertex>, VF, EF>;

impl<'a, G, VF, EF> GraphAugmentor<'a, G, MultiSourceSink, VF, EF>
where
    G: MutableGraph + BidirectionalGraph,
    VF: FnMut() -> G::Vertex,
    EF: FnMut(&G::Vertex, &G::Vertex) -> G::Edge,
{
    pub fn new(
        graph: &'a mut G,
        vertex_factory: VF,
        edge_factory: EF,
        cancel: CancelHandle,
    ) -> Self {
        Self::with_plan(graph, MultiSourceSink, vertex_factory, edge_factory, cancel)
    }
}

impl<'a, G, VF, EF> GraphAugmentor<'a, G, BipartiteEndpoints<G::Vertex>, VF, EF>
where
    G: MutableGraph,
    VF: FnMut() -> G::Vertex,
    EF: FnMut(&G::Vertex, &G::Vertex) -> G::Edge,
{
    pub fn new(
        graph: &'a mut G,
        sources: impl IntoIterator<Item = G::Vertex>,
        sinks: impl IntoIterator<Item = G::Vertex>,
        vertex_factory: VF,
        edge_factory: EF,
        cancel: CancelHandle,
    ) -> Self {
        let plan = BipartiteEndpoints {
            sources: sources.into_iter().collect(),
            sinks: sinks.into_iter().collect(),
        };
        Self::with_plan(graph, plan, vertex_factory, edge_factory, cancel)
    }
}

impl<'a, G, P, VF, EF> GraphAugmentor<'a, G, P, VF, EF>
where
    G: MutableGraph,
    P: AugmentationPlan<G>,
    VF: FnMut() -> G::Vertex,
    EF: FnMut(&G::Vertex, &G::Vertex) -> G::Edge,
{
    pub fn with_plan(
        graph: &'a mut G,
        plan: P,
        vertex_factory: VF,
        edge_factory: EF,
        cancel: CancelHandle,
    ) -> Self {
        Self {
            graph,
            plan,
            vertex_factory,
            edge_factory,
            core: AlgorithmCore::new(cancel),
            augmentation: None,
            events: AugmentorEvents::default(),
        }
    }

    pub fn events(&self) -> &AugmentorEvents<G::Vertex, G::Edge> {
        &self.events
    }

    /// Returns *true* while the graph carries the augmentation
    pub fn is_augmented(&self) -> bool {
        self.augmentation.is_some()
    }

    pub fn super_source(&self) -> Option<&G::Vertex> {
        self.augmentation.as_ref().map(Augmentation::super_source)
    }

    pub fn super_sink(&self) -> Option<&G::Vertex> {
        self.augmentation.as_ref().map(Augmentation::super_sink)
    }

    pub fn augmented_edges(&self) -> &[G::Edge] {
        match &self.augmentation {
            Some(augmentation) => augmentation.augmented_edges(),
            None => &[],
        }
    }

    pub fn augmentation(&self) -> Option<&Augmentation<G::Vertex, G::Edge>> {
        self.augmentation.as_ref()
    }

    /// Removes the augmentation from the graph. Does nothing if the graph is not augmented.
    pub fn rollback(&mut self) {
        if let Some(augmentation) = self.augmentation.take() {
            augmentation.rollback(self.graph);
        }
    }

    /// Releases the graph, handing the responsibility for the rollback to the caller
    pub fn into_augmentation(self) -> Option<Augmentation<G::Vertex, G::Edge>> {
        self.augmentation
    }

    fn add_super_vertex(&mut self) -> Result<G::Vertex> {
        let vertex = (self.vertex_factory)();
        if !self.graph.add_vertex(vertex.clone()) {
            return Err(GraphError::invalid_argument(
                "vertex factory returned a vertex already in the graph",
            ));
        }
        Ok(vertex)
    }

    fn add_augmented_edge(&mut self, source: &G::Vertex, target: &G::Vertex) -> Result<()> {
        let edge = (self.edge_factory)(source, target);
        if !self.graph.add_edge(edge.clone())? {
            return Err(GraphError::ParallelEdgeNotAllowed);
        }
        self.events.edge_added.fire(&edge);
        if let Some(augmentation) = self.augmentation.as_mut() {
            augmentation.augmented_edges.push(edge);
        }
        Ok(())
    }
}

impl<G, P, VF, EF> Algorithm for GraphAugmentor<'_, G, P, VF, EF>
where
    G: MutableGraph,
    P: AugmentationPlan<G>,
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
        if self.is_augmented() {
            return Err(GraphError::invalid_operation("graph is already augmented"));
        }
        Ok(())
    }

    fn internal_compute(&mut self) -> Result<()> {
        let (sources, sinks) = self.plan.sources_and_sinks(self.graph);

        let super_source = self.add_super_vertex()?;
        self.events.super_source_added.fire(&super_source);
        let super_sink = match self.add_super_vertex() {
            Ok(sink) => sink,
            Err(err) => {
                self.graph.remove_vertex(&super_source);
                return Err(err);
            }
        };
        self.events.super_sink_added.fire(&super_sink);

        self.augmentation = Some(Augmentation {
            super_source: super_source.clone(),
            super_sink: super_sink.clone(),
            augmented_edges: Vec::new(),
        });

        for v in &sources {
            if self.is_cancelling() {
                return Ok(());
            }
            self.add_augmented_edge(&super_source, v)?;
        }
        for v in &sinks {
            if self.is_cancelling() {
                return Ok(());
            }
            self.add_augmented_edge(v, &super_sink)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        edge::Edge,
        repr::{AdjacencyGraph, BidirectionalAdjacencyGraph},
    };

    fn counter(start: u32) -> impl FnMut() -> u32 {
        let mut next = start;
        move || {
            next += 1;
            next
        }
    }

    fn edge(s: &u32, t: &u32) -> Edge<u32> {
        Edge(*s, *t)
    }

    #[test]
    fn multi_source_sink() {
        let mut graph = BidirectionalAdjacencyGraph::<u32, Edge<u32>>::from_edges([
            Edge(0, 1),
            Edge(0, 2),
            Edge(1, 3),
            Edge(2, 3),
            Edge(4, 3),
        ]);
        graph.add_vertex(5);
        let (vertices, edges) = (graph.vertex_count(), graph.edge_count());

        let mut augmentor = MultiSourceSinkGraphAugmentor::new(
            &mut graph,
            counter(99),
            edge,
            NeverCancel::handle(),
        );
        augmentor.compute().unwrap();

        assert!(augmentor.is_augmented());
        assert_eq!(augmentor.super_source(), Some(&100));
        assert_eq!(augmentor.super_sink(), Some(&101));
        assert_eq!(
            augmentor.augmented_edges(),
            &[
                Edge(100, 0),
                Edge(100, 4),
                Edge(100, 5),
                Edge(3, 101),
                Edge(5, 101)
            ]
        );

        augmentor.reset();
        assert!(matches!(
            augmentor.compute(),
            Err(GraphError::InvalidOperation(_))
        ));

        augmentor.rollback();
        assert!(!augmentor.is_augmented());
        assert_eq!(graph.vertex_count(), vertices);
        assert_eq!(graph.edge_count(), edges);
        assert!(!graph.contains_vertex(&100));
    }

    #[test]
    fn bipartite_endpoints() {
        let mut graph = AdjacencyGraph::<u32, Edge<u32>>::from_edges([Edge(0, 10), Edge(1, 10)]);

        let mut augmentor = BipartiteToMaximumFlowGraphAugmentor::new(
            &mut graph,
            [0, 1],
            [10],
            counter(49),
            edge,
            NeverCancel::handle(),
        );
        augmentor.compute().unwrap();
        let augmentation = augmentor.into_augmentation().unwrap();

        assert_eq!(
            augmentation.augmented_edges(),
            &[Edge(50, 0), Edge(50, 1), Edge(10, 51)]
        );
        assert!(augmentation.touches_super_vertex(&Edge(10, 51)));
        assert!(!augmentation.touches_super_vertex(&Edge(0, 10)));
        assert_eq!(graph.edge_count(), 5);

        augmentation.rollback(&mut graph);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.vertex_count(), 3);
    }

    #[test]
    fn factory_must_create_new_vertices() {
        let mut graph = AdjacencyGraph::<u32, Edge<u32>>::from_edges([Edge(0, 1)]);
        let mut augmentor = BipartiteToMaximumFlowGraphAugmentor::new(
            &mut graph,
            [0],
            [1],
            || 1,
            edge,
            NeverCancel::handle(),
        );
        assert!(matches!(
            augmentor.compute(),
            Err(GraphError::InvalidArgument(_))
        ));
        assert!(!augmentor.is_augmented());
    }

    #[test]
    fn unknown_endpoint_aborts() {
        let mut graph = AdjacencyGraph::<u32, Edge<u32>>::from_edges([Edge(0, 1)]);
        let mut augmentor = BipartiteToMaximumFlowGraphAugmentor::new(
            &mut graph,
            [7],
            [1],
            counter(9),
            edge,
            NeverCancel::handle(),
        );
        assert_eq!(augmentor.compute(), Err(GraphError::VertexNotFound));
        assert_eq!(augmentor.state(), ComputationState::Aborted);

        augmentor.rollback();
        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }
}
