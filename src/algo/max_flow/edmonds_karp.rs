use std::collections::VecDeque;

use fxhash::FxHashMap;
use tracing::trace;

use crate::{
    algo::framework::*,
    edge::GraphEdge,
    error::*,
    events::Event,
    ops::*,
    utils::try_get_path,
    vertex::*,
};

/// Edmonds-Karp maximum flow.
///
/// Every edge must be paired with a reversed edge (see
/// [`ReversedEdgeAugmentor`](super::ReversedEdgeAugmentor)). Flow is pushed along shortest
/// augmenting paths (by number of edges) in the residual graph; pushing `d` units over an
/// edge lowers its residual capacity by `d` and raises the residual capacity of its reverse
/// by `d`.
///
/// ```
/// use qgraphs::{algo::*, prelude::*};
///
/// let graph = AdjacencyGraph::<u32, Edge<u32>>::from_edges([
///     Edge(0, 1), Edge(1, 0), Edge(1, 2), Edge(2, 1),
/// ]);
/// let reversed = graph.edges().map(|e| (e, e.reversed())).collect();
/// let capacity = |e: &Edge<u32>| if e.0 < e.1 { 2.0 } else { 0.0 };
///
/// let cancel = NeverCancel::handle();
/// let mut flow = EdmondsKarpMaximumFlow::new(&graph, capacity, &reversed, cancel);
/// assert_eq!(flow.compute_flow(0, 2), Ok(2.0));
/// ```
pub struct EdmondsKarpMaximumFlow<'a, G, C>
where
    G: GraphType,
{
    graph: &'a G,
    capacities: C,
    reversed_edges: &'a FxHashMap<G::Edge, G::Edge>,
    core: AlgorithmCore,
    source: Option<G::Vertex>,
    sink: Option<G::Vertex>,
    residual_capacities: FxHashMap<G::Edge, f64>,
    predecessors: VertexMap<G::Vertex, G::Edge>,
    max_flow: f64,
    augmenting_path: Event<Vec<G::Edge>>,
}

impl<'a, G, C> EdmondsKarpMaximumFlow<'a, G, C>
where
    G: VertexSet + EdgeSet + ImplicitGraph,
    C: Fn(&G::Edge) -> f64,
{
    pub fn new(
        graph: &'a G,
        capacities: C,
        reversed_edges: &'a FxHashMap<G::Edge, G::Edge>,
        cancel: CancelHandle,
    ) -> Self {
        Self {
            graph,
            capacities,
            reversed_edges,
            core: AlgorithmCore::new(cancel),
            source: None,
            sink: None,
            residual_capacities: FxHashMap::default(),
            predecessors: VertexMap::default(),
            max_flow: 0.0,
            augmenting_path: Event::new(),
        }
    }

    pub fn set_source(&mut self, source: G::Vertex) {
        self.source = Some(source);
    }

    pub fn set_sink(&mut self, sink: G::Vertex) {
        self.sink = Some(sink);
    }

    pub fn source(&self) -> Option<&G::Vertex> {
        self.source.as_ref()
    }

    pub fn sink(&self) -> Option<&G::Vertex> {
        self.sink.as_ref()
    }

    /// Sets source and sink, computes and returns the maximum flow
    pub fn compute_flow(&mut self, source: G::Vertex, sink: G::Vertex) -> Result<f64> {
        self.set_source(source);
        self.set_sink(sink);
        self.compute()?;
        Ok(self.max_flow)
    }

    /// Value of the flow found by the last computation
    pub fn max_flow(&self) -> f64 {
        self.max_flow
    }

    /// Remaining capacity of every edge; `capacity - flow` for edges carrying flow
    pub fn residual_capacities(&self) -> &FxHashMap<G::Edge, f64> {
        &self.residual_capacities
    }

    /// Residual capacity of `edge` or `0` if it is unknown
    pub fn residual_capacity(&self, edge: &G::Edge) -> f64 {
        self.residual_capacities.get(edge).copied().unwrap_or(0.0)
    }

    /// Flow carried by `edge`, i.e. its capacity minus its residual capacity.
    ///
    /// Fails with `EdgeNotFound` if `edge` was not part of the computation.
    pub fn flow(&self, edge: &G::Edge) -> Result<f64> {
        let residual = self
            .residual_capacities
            .get(edge)
            .ok_or(GraphError::EdgeNotFound)?;
        Ok((self.capacities)(edge) - residual)
    }

    /// Tree edges of the last breadth-first search over the residual graph
    pub fn predecessors(&self) -> &VertexMap<G::Vertex, G::Edge> {
        &self.predecessors
    }

    /// Fired with every augmenting path before flow is pushed along it
    pub fn augmenting_path(&self) -> &Event<Vec<G::Edge>> {
        &self.augmenting_path
    }

    /// Breadth-first search from `source` over edges with positive residual capacity.
    /// Returns *true* once `sink` is discovered.
    fn search_residual_graph(&mut self, source: &G::Vertex, sink: &G::Vertex) -> bool {
        let graph = self.graph;
        self.predecessors.clear();

        let mut visited = VertexSetOf::default();
        visited.insert(source.clone());
        let mut queue = VecDeque::from([source.clone()]);

        while let Some(u) = queue.pop_front() {
            for edge in graph.out_edges(&u) {
                if self.residual_capacity(&edge) <= 0.0 {
                    continue;
                }
                let v = edge.target().clone();
                if !visited.insert(v.clone()) {
                    continue;
                }
                self.predecessors.insert(v.clone(), edge);
                if v == *sink {
                    return true;
                }
                queue.push_back(v);
            }
        }
        false
    }

    fn push_flow(&mut self, path: &[G::Edge]) -> Result<f64> {
        let delta = path
            .iter()
            .map(|e| self.residual_capacity(e))
            .fold(f64::INFINITY, f64::min);

        for edge in path {
            let reversed = self
                .reversed_edges
                .get(edge)
                .ok_or_else(|| GraphError::invalid_operation("edge without reversed edge"))?;
            if let Some(residual) = self.residual_capacities.get_mut(edge) {
                *residual -= delta;
            }
            if let Some(residual) = self.residual_capacities.get_mut(reversed) {
                *residual += delta;
            }
        }
        Ok(delta)
    }
}

impl<G, C> Algorithm for EdmondsKarpMaximumFlow<'_, G, C>
where
    G: VertexSet + EdgeSet + ImplicitGraph,
    C: Fn(&G::Edge) -> f64,
{
    fn core(&self) -> &AlgorithmCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AlgorithmCore {
        &mut self.core
    }

    fn initialize(&mut self) -> Result<()> {
        let graph = self.graph;
        self.max_flow = 0.0;
        self.predecessors.clear();
        self.residual_capacities.clear();

        let (Some(source), Some(sink)) = (&self.source, &self.sink) else {
            return Err(GraphError::invalid_operation("source and sink must be set"));
        };
        if !graph.contains_vertex(source) || !graph.contains_vertex(sink) {
            return Err(GraphError::VertexNotFound);
        }
        if source == sink {
            return Err(GraphError::invalid_argument("source and sink must differ"));
        }

        for edge in graph.edges() {
            let capacity = (self.capacities)(&edge);
            if capacity < 0.0 {
                return Err(GraphError::NegativeCapacity);
            }
            if !self.reversed_edges.contains_key(&edge) {
                return Err(GraphError::invalid_operation(
                    "every edge needs a reversed edge",
                ));
            }
            self.residual_capacities.insert(edge, capacity);
        }
        Ok(())
    }

    fn internal_compute(&mut self) -> Result<()> {
        let (Some(source), Some(sink)) = (self.source.clone(), self.sink.clone()) else {
            return Err(GraphError::invalid_operation("source and sink must be set"));
        };

        while !self.is_cancelling() && self.search_residual_graph(&source, &sink) {
            let Some(path) = try_get_path(&self.predecessors, &sink) else {
                break;
            };
            self.augmenting_path.fire(&path);
            let delta = self.push_flow(&path)?;
            trace!(delta, length = path.len(), "pushed flow along augmenting path");
            self.max_flow += delta;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::{edge::Edge, repr::AdjacencyGraph};

    type Graph = AdjacencyGraph<u32, Edge<u32>>;

    /// Adds every missing reverse with capacity zero
    fn flow_network(edges: &[(u32, u32, f64)]) -> (Graph, FxHashMap<Edge<u32>, f64>) {
        let mut capacities: FxHashMap<Edge<u32>, f64> = FxHashMap::default();
        for &(u, v, c) in edges {
            *capacities.entry(Edge(u, v)).or_default() += c;
            capacities.entry(Edge(v, u)).or_default();
        }
        let graph = Graph::from_edges(capacities.keys().copied().sorted());
        (graph, capacities)
    }

    fn reverses(graph: &Graph) -> FxHashMap<Edge<u32>, Edge<u32>> {
        graph.edges().map(|e| (e, e.reversed())).collect()
    }

    fn max_flow(edges: &[(u32, u32, f64)], source: u32, sink: u32) -> Result<f64> {
        let (graph, capacities) = flow_network(edges);
        let reversed = reverses(&graph);
        let mut flow = EdmondsKarpMaximumFlow::new(
            &graph,
            |e: &Edge<u32>| capacities[e],
            &reversed,
            NeverCancel::handle(),
        );
        flow.compute_flow(source, sink)
    }

    #[test]
    fn textbook_network() {
        let edges = [
            (0, 1, 16.0),
            (0, 2, 13.0),
            (2, 1, 4.0),
            (1, 3, 12.0),
            (3, 2, 9.0),
            (2, 4, 14.0),
            (4, 3, 7.0),
            (3, 5, 20.0),
            (4, 5, 4.0),
        ];
        let (graph, capacities) = flow_network(&edges);
        let reversed = reverses(&graph);
        let mut flow = EdmondsKarpMaximumFlow::new(
            &graph,
            |e: &Edge<u32>| capacities[e],
            &reversed,
            NeverCancel::handle(),
        );

        let paths = Rc::new(RefCell::new(0));
        let counter = paths.clone();
        let _sub = flow
            .augmenting_path()
            .subscribe(move |_: &Vec<Edge<u32>>| *counter.borrow_mut() += 1);

        assert_eq!(flow.compute_flow(0, 5), Ok(23.0));
        assert_eq!(flow.max_flow(), 23.0);
        assert!(*paths.borrow() > 0);

        // Flow conservation and capacity constraints on the original edges
        let flow_on = |e: &Edge<u32>| flow.flow(e).unwrap().max(0.0);
        for v in 1..5 {
            let incoming: f64 = graph.edges().filter(|e| e.1 == v).map(|e| flow_on(&e)).sum();
            let outgoing: f64 = graph.edges().filter(|e| e.0 == v).map(|e| flow_on(&e)).sum();
            assert!((incoming - outgoing).abs() < 1e-9);
        }
        assert!(flow.residual_capacities().values().all(|&r| r >= 0.0));
        // The sink is not reachable in the final residual graph
        assert!(!flow.predecessors().contains_key(&5));
        assert_eq!(flow.flow(&Edge(3, 5)), Ok(19.0));
        assert_eq!(flow.flow(&Edge(5, 0)), Err(GraphError::EdgeNotFound));
    }

    #[test]
    fn disconnected_sink() {
        assert_eq!(max_flow(&[(0, 1, 3.0), (2, 3, 5.0)], 0, 3), Ok(0.0));
    }

    #[test]
    fn invalid_input() {
        assert_eq!(
            max_flow(&[(0, 1, 3.0)], 0, 0),
            Err(GraphError::invalid_argument("source and sink must differ"))
        );
        assert_eq!(max_flow(&[(0, 1, 3.0)], 0, 9), Err(GraphError::VertexNotFound));
        assert_eq!(
            max_flow(&[(0, 1, -1.0)], 0, 1),
            Err(GraphError::NegativeCapacity)
        );

        let graph = Graph::from_edges([Edge(0, 1)]);
        let reversed = FxHashMap::default();
        let mut flow = EdmondsKarpMaximumFlow::new(
            &graph,
            |_: &Edge<u32>| 1.0,
            &reversed,
            NeverCancel::handle(),
        );
        assert!(matches!(
            flow.compute_flow(0, 1),
            Err(GraphError::InvalidOperation(_))
        ));

        flow.reset();
        assert!(matches!(flow.compute(), Err(GraphError::InvalidOperation(_))));
    }

    /// Minimum cut by enumerating all vertex bipartitions
    fn brute_force_min_cut(n: u32, edges: &[(u32, u32, f64)], source: u32, sink: u32) -> f64 {
        (0..1u32 << n)
            .filter(|mask| mask & (1u32 << source) != 0 && mask & (1u32 << sink) == 0)
            .map(|mask| {
                edges
                    .iter()
                    .filter(|&&(u, v, _)| mask & (1u32 << u) != 0 && mask & (1u32 << v) == 0)
                    .map(|(_, _, c)| c)
                    .sum::<f64>()
            })
            .fold(f64::INFINITY, f64::min)
    }

    #[test]
    fn random_networks_against_min_cut() {
        let rng = &mut Pcg64Mcg::seed_from_u64(11);
        for _ in 0..100 {
            let n = rng.random_range(2..8u32);
            let mut edges = (0..rng.random_range(0..3 * n))
                .map(|_| {
                    (
                        rng.random_range(0..n),
                        rng.random_range(0..n),
                        rng.random_range(0..10) as f64,
                    )
                })
                .collect_vec();
            // Every vertex is an endpoint
            edges.extend((0..n).map(|v| (v, v, 0.0)));

            let flow = max_flow(&edges, 0, n - 1).unwrap();
            assert_eq!(flow, brute_force_min_cut(n, &edges, 0, n - 1));
        }
    }

    #[test]
    fn cancellation() {
        let (graph, capacities) =
            flow_network(&[(0, 1, 1.0), (0, 2, 1.0), (1, 3, 1.0), (2, 3, 1.0)]);
        let reversed = reverses(&graph);
        let flag = CancelFlag::new();
        let mut flow = EdmondsKarpMaximumFlow::new(
            &graph,
            |e: &Edge<u32>| capacities[e],
            &reversed,
            flag.handle(),
        );

        let trigger = flag.clone();
        let _sub = flow.augmenting_path().subscribe(move |_| trigger.cancel());

        assert_eq!(flow.compute_flow(0, 3), Ok(1.0));
        assert_eq!(flow.state(), ComputationState::Aborted);
    }
}
