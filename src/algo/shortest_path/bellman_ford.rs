use std::cmp::Ordering;

use super::*;
use crate::{
    algo::{framework::*, observers::TreeBuilderAlgorithm},
    ops::*,
};

/// Bellman-Ford single source paths.
///
/// Relaxes every edge up to `|V| - 1` times (stopping early once a round relaxes nothing)
/// and then checks for an edge that could still be relaxed, i.e. a negative cycle
/// reachable from the root. Negative weights are allowed.
pub struct BellmanFordShortestPath<'a, G, W, R = ShortestDistanceRelaxer>
where
    G: GraphType,
{
    graph: &'a G,
    weights: W,
    relaxer: R,
    core: AlgorithmCore,
    root: RootVertex<G::Vertex>,
    result: ShortestPathCore<G::Vertex, G::Edge>,
    events: ShortestPathEvents<G::Vertex, G::Edge>,
    found_negative_cycle: bool,
    fail_on_negative_cycle: bool,
}

impl<'a, G, W> BellmanFordShortestPath<'a, G, W>
where
    G: VertexSet + EdgeSet,
    W: Fn(&G::Edge) -> f64,
{
    pub fn new(graph: &'a G, weights: W, cancel: CancelHandle) -> Self {
        Self::with_relaxer(graph, weights, ShortestDistanceRelaxer, cancel)
    }
}

impl<'a, G, W, R> BellmanFordShortestPath<'a, G, W, R>
where
    G: VertexSet + EdgeSet,
    W: Fn(&G::Edge) -> f64,
    R: DistanceRelaxer,
{
    pub fn with_relaxer(graph: &'a G, weights: W, relaxer: R, cancel: CancelHandle) -> Self {
        Self {
            graph,
            weights,
            relaxer,
            core: AlgorithmCore::new(cancel),
            root: RootVertex::default(),
            result: ShortestPathCore::default(),
            events: ShortestPathEvents::default(),
            found_negative_cycle: false,
            fail_on_negative_cycle: false,
        }
    }

    /// If set, a negative cycle aborts the computation with
    /// [`GraphError::NegativeCycleGraph`] instead of only being reported
    pub fn set_fail_on_negative_cycle(&mut self, fail: bool) {
        self.fail_on_negative_cycle = fail;
    }

    /// Builder variant of [`Self::set_fail_on_negative_cycle`]
    pub fn fail_on_negative_cycle(mut self, fail: bool) -> Self {
        self.set_fail_on_negative_cycle(fail);
        self
    }

    /// Returns *true* if the last computation found a negative cycle reachable from the root
    pub fn found_negative_cycle(&self) -> bool {
        self.found_negative_cycle
    }

    pub fn events(&self) -> &ShortestPathEvents<G::Vertex, G::Edge> {
        &self.events
    }

    /// Improved distance of the target of `edge`, if `edge` relaxes it
    fn relaxed_distance(&self, edge: &G::Edge) -> Option<f64> {
        let initial = self.relaxer.initial_distance();
        let source = self.result.distance_or(edge.source(), initial);
        if source == initial {
            return None;
        }
        let candidate = self.relaxer.combine(source, (self.weights)(edge));
        let target = self.result.distance_or(edge.target(), initial);
        (self.relaxer.compare(candidate, target) == Ordering::Less).then_some(candidate)
    }
}

impl<G, W, R> Algorithm for BellmanFordShortestPath<'_, G, W, R>
where
    G: VertexSet + EdgeSet,
    W: Fn(&G::Edge) -> f64,
    R: DistanceRelaxer,
{
    fn core(&self) -> &AlgorithmCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AlgorithmCore {
        &mut self.core
    }

    fn initialize(&mut self) -> Result<()> {
        let graph = self.graph;
        self.result.clear();
        self.found_negative_cycle = false;
        for v in graph.vertices() {
            self.events.initialize_vertex.fire(&v);
        }
        Ok(())
    }

    fn internal_compute(&mut self) -> Result<()> {
        let graph = self.graph;
        let root = self.root.require(|v| graph.contains_vertex(v))?;
        self.result.mark_computed();
        self.result.set_root(root, self.relaxer.root_distance());

        for _ in 1..graph.vertex_count() {
            let mut relaxed_any = false;
            for edge in graph.edges() {
                if self.is_cancelling() {
                    return Ok(());
                }
                self.events.examine_edge.fire(&edge);

                match self.relaxed_distance(&edge) {
                    Some(distance) => {
                        relaxed_any = true;
                        self.result
                            .relax(edge.target().clone(), distance, edge.clone());
                        self.events.tree_edge.fire(&edge);
                    }
                    None => self.events.edge_not_relaxed.fire(&edge),
                }
            }
            if !relaxed_any {
                break;
            }
        }

        self.found_negative_cycle = graph
            .edges()
            .any(|e| self.relaxed_distance(&e).is_some());
        if self.found_negative_cycle && self.fail_on_negative_cycle {
            return Err(GraphError::NegativeCycleGraph);
        }
        Ok(())
    }
}

impl<G, W, R> RootedAlgorithm for BellmanFordShortestPath<'_, G, W, R>
where
    G: VertexSet + EdgeSet,
    W: Fn(&G::Edge) -> f64,
    R: DistanceRelaxer,
{
    type Root = G::Vertex;

    fn root_vertex(&self) -> &RootVertex<G::Vertex> {
        &self.root
    }

    fn root_vertex_mut(&mut self) -> &mut RootVertex<G::Vertex> {
        &mut self.root
    }
}

impl<G, W, R> ShortestPathAlgorithm for BellmanFordShortestPath<'_, G, W, R>
where
    G: VertexSet + EdgeSet,
    W: Fn(&G::Edge) -> f64,
    R: DistanceRelaxer,
{
    type PathEdge = G::Edge;

    fn shortest_paths(&self) -> &ShortestPathCore<G::Vertex, G::Edge> {
        &self.result
    }
}

impl<G, W, R> TreeBuilderAlgorithm<G::Edge> for BellmanFordShortestPath<'_, G, W, R>
where
    G: GraphType,
{
    fn tree_edge_event(&self) -> &Event<G::Edge> {
        &self.events.tree_edge
    }
}

#[cfg(test)]
mod tests {
    use fxhash::FxHashMap;
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::{
        algo::shortest_path::DijkstraShortestPath,
        edge::Edge,
        repr::AdjacencyGraph,
    };

    type Graph = AdjacencyGraph<u32, Edge<u32>>;
    type Weights = FxHashMap<Edge<u32>, f64>;

    fn weighted(edges: &[(u32, u32, f64)]) -> (Graph, Weights) {
        let graph = AdjacencyGraph::from_edges(edges.iter().map(|&(u, v, _)| Edge(u, v)));
        let weights = edges.iter().map(|&(u, v, w)| (Edge(u, v), w)).collect();
        (graph, weights)
    }

    fn search<'a>(
        graph: &'a Graph,
        weights: &'a Weights,
    ) -> BellmanFordShortestPath<'a, Graph, impl Fn(&Edge<u32>) -> f64 + 'a> {
        BellmanFordShortestPath::new(graph, move |e: &Edge<u32>| weights[e], NeverCancel::handle())
    }

    #[test]
    fn negative_weights_without_cycle() {
        let (graph, weights) = weighted(&[(0, 1, 4.0), (0, 2, 1.0), (2, 1, -2.0), (1, 3, 1.0)]);
        let mut bf = search(&graph, &weights);
        bf.compute_from(0).unwrap();

        assert!(!bf.found_negative_cycle());
        assert_eq!(bf.try_get_distance(&1), Ok(Some(-1.0)));
        assert_eq!(bf.try_get_distance(&3), Ok(Some(0.0)));
        assert_eq!(
            bf.shortest_path_to(&3),
            Ok(Some(vec![Edge(0, 2), Edge(2, 1), Edge(1, 3)]))
        );
    }

    #[test]
    fn negative_cycle() {
        let (graph, weights) = weighted(&[(0, 1, 1.0), (1, 2, -3.0), (2, 1, 1.0), (3, 0, 1.0)]);
        let mut bf = search(&graph, &weights);
        bf.compute_from(0).unwrap();
        assert!(bf.found_negative_cycle());
        assert_eq!(bf.state(), ComputationState::Finished);

        let mut bf = search(&graph, &weights).fail_on_negative_cycle(true);
        assert_eq!(bf.compute_from(0), Err(GraphError::NegativeCycleGraph));
        assert_eq!(bf.state(), ComputationState::Aborted);

        // the cycle is not reachable from 2's side of the graph
        let (graph, weights) = weighted(&[(0, 1, 1.0), (1, 0, -3.0), (2, 3, 1.0)]);
        let mut bf = search(&graph, &weights).fail_on_negative_cycle(true);
        bf.compute_from(2).unwrap();
        assert_eq!(bf.try_get_distance(&3), Ok(Some(1.0)));
        assert_eq!(bf.try_get_distance(&0), Ok(None));
    }

    #[test]
    fn critical_path() {
        let (graph, weights) = weighted(&[(0, 1, 1.0), (0, 2, 4.0), (1, 3, 2.0), (2, 3, 1.0)]);
        let mut bf = BellmanFordShortestPath::with_relaxer(
            &graph,
            |e: &Edge<u32>| weights[e],
            CriticalDistanceRelaxer,
            NeverCancel::handle(),
        );
        bf.compute_from(0).unwrap();
        assert_eq!(bf.try_get_distance(&3), Ok(Some(5.0)));
        assert_eq!(bf.shortest_path_to(&3), Ok(Some(vec![Edge(0, 2), Edge(2, 3)])));
    }

    #[test]
    fn agrees_with_dijkstra() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);
        for _ in 0..30 {
            let n = rng.random_range(2..20u32);
            let edges = (0..rng.random_range(0..4 * n))
                .map(|_| {
                    (
                        rng.random_range(0..n),
                        rng.random_range(0..n),
                        rng.random_range(0..10) as f64,
                    )
                })
                .unique_by(|&(u, v, _)| (u, v))
                .collect_vec();
            let (mut graph, weights) = weighted(&edges);
            graph.add_vertex_range(0..n);

            let mut dijkstra = DijkstraShortestPath::new(
                &graph,
                |e: &Edge<u32>| weights[e],
                NeverCancel::handle(),
            );
            let mut bf = search(&graph, &weights);
            dijkstra.compute_from(0).unwrap();
            bf.compute_from(0).unwrap();

            assert!(!bf.found_negative_cycle());
            for v in 0..n {
                assert_eq!(dijkstra.try_get_distance(&v), bf.try_get_distance(&v));
            }
        }
    }
}
