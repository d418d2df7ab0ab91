use std::cmp::Ordering;

use super::*;
use crate::{
    algo::{
        framework::*,
        observers::{TreeBuilderAlgorithm, VertexTimeStamperAlgorithm},
    },
    collections::FibonacciQueue,
    ops::*,
};

/// Dijkstra's algorithm on a [`FibonacciQueue`].
///
/// Edge weights are supplied by `weights`. Under a relaxer that
/// [rejects negative weights](DistanceRelaxer::rejects_negative_weights), a negative weight
/// aborts the computation with [`GraphError::NegativeWeight`]. Only the out-edges of
/// reached vertices are inspected, so any [`ImplicitGraph`] with a vertex list works.
///
/// ```
/// use qgraphs::{algo::*, prelude::*};
///
/// let graph = AdjacencyGraph::<u32, Edge<u32>>::from_edges([Edge(0, 1), Edge(1, 2), Edge(0, 2)]);
/// let mut dijkstra = DijkstraShortestPath::new(&graph, |e: &Edge<u32>| {
///     if e.0 == 0 && e.1 == 2 { 5.0 } else { 1.0 }
/// }, NeverCancel::handle());
///
/// dijkstra.compute_from(0).unwrap();
/// assert_eq!(dijkstra.try_get_distance(&2), Ok(Some(2.0)));
/// ```
pub struct DijkstraShortestPath<'a, G, W, R = ShortestDistanceRelaxer>
where
    G: GraphType,
{
    graph: &'a G,
    weights: W,
    relaxer: R,
    core: AlgorithmCore,
    root: RootVertex<G::Vertex>,
    result: ShortestPathCore<G::Vertex, G::Edge>,
    colors: VertexMap<G::Vertex, GraphColor>,
    events: ShortestPathEvents<G::Vertex, G::Edge>,
}

impl<'a, G, W> DijkstraShortestPath<'a, G, W>
where
    G: VertexSet + ImplicitGraph,
    W: Fn(&G::Edge) -> f64,
{
    /// Creates a shortest distance search
    pub fn new(graph: &'a G, weights: W, cancel: CancelHandle) -> Self {
        Self::with_relaxer(graph, weights, ShortestDistanceRelaxer, cancel)
    }
}

impl<'a, G, W, R> DijkstraShortestPath<'a, G, W, R>
where
    G: VertexSet + ImplicitGraph,
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
            colors: VertexMap::default(),
            events: ShortestPathEvents::default(),
        }
    }

    pub fn events(&self) -> &ShortestPathEvents<G::Vertex, G::Edge> {
        &self.events
    }

    pub fn relaxer(&self) -> &R {
        &self.relaxer
    }

    /// Color of `vertex` after the computation: black once finished, gray while queued
    pub fn vertex_color(&self, vertex: &G::Vertex) -> Option<GraphColor> {
        self.colors.get(vertex).copied()
    }
}

impl<G, W, R> Algorithm for DijkstraShortestPath<'_, G, W, R>
where
    G: VertexSet + ImplicitGraph,
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
        self.colors.clear();
        for v in graph.vertices() {
            self.colors.insert(v.clone(), GraphColor::White);
            self.events.initialize_vertex.fire(&v);
        }
        Ok(())
    }

    fn internal_compute(&mut self) -> Result<()> {
        let graph = self.graph;
        let root = self.root.require(|v| graph.contains_vertex(v))?;
        self.result.mark_computed();

        let relaxer = self.relaxer.clone();
        let initial = relaxer.initial_distance();
        let mut queue =
            FibonacciQueue::with_comparison(move |a: &f64, b: &f64| relaxer.compare(*a, *b));

        let root_distance = self.relaxer.root_distance();
        self.result.set_root(root.clone(), root_distance);
        self.colors.insert(root.clone(), GraphColor::Gray);
        queue.enqueue(root.clone(), root_distance);
        self.events.discover_vertex.fire(&root);

        loop {
            if self.is_cancelling() {
                return Ok(());
            }
            let Ok((u, du)) = queue.dequeue_with_priority() else {
                break;
            };
            self.events.examine_vertex.fire(&u);

            for edge in graph.out_edges(&u) {
                self.events.examine_edge.fire(&edge);

                let weight = (self.weights)(&edge);
                if weight < 0.0 && self.relaxer.rejects_negative_weights() {
                    return Err(GraphError::NegativeWeight);
                }

                let v = edge.target();
                let candidate = self.relaxer.combine(du, weight);
                if self
                    .relaxer
                    .compare(candidate, self.result.distance_or(v, initial))
                    != Ordering::Less
                {
                    self.events.edge_not_relaxed.fire(&edge);
                    continue;
                }

                self.result.relax(v.clone(), candidate, edge.clone());
                self.events.tree_edge.fire(&edge);

                match self.colors.get(v).copied().unwrap_or_default() {
                    GraphColor::White => {
                        self.colors.insert(v.clone(), GraphColor::Gray);
                        queue.enqueue(v.clone(), candidate);
                        self.events.discover_vertex.fire(v);
                    }
                    GraphColor::Gray => queue.update(v, candidate)?,
                    GraphColor::Black => {}
                }
            }

            self.colors.insert(u.clone(), GraphColor::Black);
            self.events.finish_vertex.fire(&u);
        }
        Ok(())
    }
}

impl<G, W, R> RootedAlgorithm for DijkstraShortestPath<'_, G, W, R>
where
    G: VertexSet + ImplicitGraph,
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

impl<G, W, R> ShortestPathAlgorithm for DijkstraShortestPath<'_, G, W, R>
where
    G: VertexSet + ImplicitGraph,
    W: Fn(&G::Edge) -> f64,
    R: DistanceRelaxer,
{
    type PathEdge = G::Edge;

    fn shortest_paths(&self) -> &ShortestPathCore<G::Vertex, G::Edge> {
        &self.result
    }
}

impl<G, W, R> TreeBuilderAlgorithm<G::Edge> for DijkstraShortestPath<'_, G, W, R>
where
    G: GraphType,
{
    fn tree_edge_event(&self) -> &Event<G::Edge> {
        &self.events.tree_edge
    }
}

impl<G, W, R> VertexTimeStamperAlgorithm<G::Vertex> for DijkstraShortestPath<'_, G, W, R>
where
    G: GraphType,
{
    fn discover_vertex_event(&self) -> &Event<G::Vertex> {
        &self.events.discover_vertex
    }

    fn finish_vertex_event(&self) -> &Event<G::Vertex> {
        &self.events.finish_vertex
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
        algo::observers::{Observer, VertexPredecessorRecorderObserver, VertexRecorderObserver},
        edge::Edge,
        repr::{AdjacencyGraph, DelegateVertexListGraph},
    };

    fn diamond() -> (AdjacencyGraph<char, Edge<char>>, FxHashMap<Edge<char>, f64>) {
        let weights: FxHashMap<_, _> = [
            (Edge('A', 'B'), 1.0),
            (Edge('A', 'C'), 4.0),
            (Edge('B', 'D'), 2.0),
            (Edge('C', 'D'), 1.0),
        ]
        .into_iter()
        .collect();
        let mut graph = AdjacencyGraph::from_edges(weights.keys().copied().sorted());
        graph.add_vertex('E');
        (graph, weights)
    }

    #[test]
    fn diamond_distances() {
        let (graph, weights) = diamond();
        let mut dijkstra =
            DijkstraShortestPath::new(&graph, |e: &Edge<char>| weights[e], NeverCancel::handle());

        assert!(matches!(
            dijkstra.try_get_distance(&'D'),
            Err(GraphError::InvalidOperation(_))
        ));

        dijkstra.compute_from('A').unwrap();
        assert_eq!(dijkstra.state(), ComputationState::Finished);
        assert_eq!(dijkstra.try_get_distance(&'A'), Ok(Some(0.0)));
        assert_eq!(dijkstra.try_get_distance(&'C'), Ok(Some(4.0)));
        assert_eq!(dijkstra.try_get_distance(&'D'), Ok(Some(3.0)));
        assert_eq!(dijkstra.try_get_distance(&'E'), Ok(None));
        assert_eq!(
            dijkstra.shortest_path_to(&'D'),
            Ok(Some(vec![Edge('A', 'B'), Edge('B', 'D')]))
        );
        assert_eq!(dijkstra.shortest_path_to(&'E'), Ok(None));
        assert_eq!(dijkstra.distance(&'D'), Ok(3.0));
        assert_eq!(dijkstra.distance(&'E'), Err(GraphError::NoPathFound));
        assert_eq!(dijkstra.shortest_path(&'E'), Err(GraphError::NoPathFound));
        assert_eq!(dijkstra.shortest_path(&'A'), Ok(vec![]));
        assert_eq!(dijkstra.vertex_color(&'E'), Some(GraphColor::White));
        assert_eq!(dijkstra.vertex_color(&'D'), Some(GraphColor::Black));
    }

    #[test]
    fn root_errors() {
        let (graph, weights) = diamond();
        let mut dijkstra =
            DijkstraShortestPath::new(&graph, |e: &Edge<char>| weights[e], NeverCancel::handle());

        assert!(matches!(
            dijkstra.compute(),
            Err(GraphError::InvalidOperation(_))
        ));
        assert_eq!(dijkstra.state(), ComputationState::Aborted);

        dijkstra.reset();
        assert_eq!(dijkstra.compute_from('Z'), Err(GraphError::VertexNotFound));
    }

    #[test]
    fn negative_weight_aborts() {
        let (graph, weights) = diamond();
        let mut dijkstra = DijkstraShortestPath::new(
            &graph,
            |e: &Edge<char>| if e.1 == 'D' { -1.0 } else { weights[e] },
            NeverCancel::handle(),
        );
        assert_eq!(dijkstra.compute_from('A'), Err(GraphError::NegativeWeight));
        assert_eq!(dijkstra.state(), ComputationState::Aborted);
    }

    #[test]
    fn widest_path() {
        let (graph, weights) = diamond();
        let mut dijkstra = DijkstraShortestPath::with_relaxer(
            &graph,
            |e: &Edge<char>| weights[e],
            WidestPathRelaxer,
            NeverCancel::handle(),
        );
        dijkstra.compute_from('A').unwrap();

        // A->B->D has bottleneck 1, A->C->D has bottleneck 1, A->C has 4
        assert_eq!(dijkstra.try_get_distance(&'C'), Ok(Some(4.0)));
        assert_eq!(dijkstra.try_get_distance(&'D'), Ok(Some(1.0)));
        assert_eq!(dijkstra.try_get_distance(&'A'), Ok(Some(f64::INFINITY)));
    }

    #[test]
    fn widest_path_accepts_negative_weights() {
        let (graph, weights) = diamond();
        let mut dijkstra = DijkstraShortestPath::with_relaxer(
            &graph,
            |e: &Edge<char>| if e.1 == 'D' { -1.0 } else { weights[e] },
            WidestPathRelaxer,
            NeverCancel::handle(),
        );
        dijkstra.compute_from('A').unwrap();

        assert_eq!(dijkstra.state(), ComputationState::Finished);
        assert_eq!(dijkstra.try_get_distance(&'B'), Ok(Some(1.0)));
        assert_eq!(dijkstra.try_get_distance(&'D'), Ok(Some(-1.0)));
    }

    #[test]
    fn observers_and_events() {
        let (graph, weights) = diamond();
        let mut dijkstra =
            DijkstraShortestPath::new(&graph, |e: &Edge<char>| weights[e], NeverCancel::handle());

        let predecessors = VertexPredecessorRecorderObserver::<char, Edge<char>>::new();
        let discovered = VertexRecorderObserver::new();
        let _p = predecessors.attach(&dijkstra);
        let _d = discovered.attach(&dijkstra);

        let not_relaxed = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let nr = not_relaxed.clone();
        let _n = dijkstra
            .events()
            .edge_not_relaxed
            .subscribe(move |e: &Edge<char>| nr.borrow_mut().push(*e));

        dijkstra.compute_from('A').unwrap();
        assert_eq!(discovered.vertices(), vec!['A', 'B', 'C', 'D']);
        assert_eq!(*not_relaxed.borrow(), vec![Edge('C', 'D')]);
        assert_eq!(
            predecessors.try_get_path(&'D'),
            Some(vec![Edge('A', 'B'), Edge('B', 'D')])
        );
    }

    #[test]
    fn cancellation_stops_early() {
        let (graph, weights) = diamond();
        let flag = CancelFlag::new();
        let mut dijkstra =
            DijkstraShortestPath::new(&graph, |e: &Edge<char>| weights[e], flag.handle());

        let f = flag.clone();
        let _sub = dijkstra
            .events()
            .finish_vertex
            .subscribe(move |_| f.cancel());

        dijkstra.compute_from('A').unwrap();
        assert_eq!(dijkstra.state(), ComputationState::Aborted);
        assert_eq!(dijkstra.try_get_distance(&'D'), Ok(None));
    }

    #[test]
    fn runs_on_delegate_graph() {
        // vertices 0..10, i -> i + 1 and i -> i + 2
        let graph = DelegateVertexListGraph::new(0..10, |&v: &u32| {
            (v < 10).then(|| {
                [v + 1, v + 2]
                    .into_iter()
                    .filter(|&w| w < 10)
                    .map(|w| Edge(v, w))
                    .collect_vec()
            })
        });
        let mut dijkstra =
            DijkstraShortestPath::new(&graph, |_: &Edge<u32>| 1.0, NeverCancel::handle());
        dijkstra.compute_from(0).unwrap();
        assert_eq!(dijkstra.try_get_distance(&9), Ok(Some(5.0)));
        assert_eq!(dijkstra.try_get_distance(&1), Ok(Some(1.0)));
    }

    /// Floyd-Warshall on vertices `0..n`
    fn brute_force(n: usize, edges: &[(u32, u32, f64)]) -> Vec<Vec<f64>> {
        let mut dist = vec![vec![f64::INFINITY; n]; n];
        for (i, row) in dist.iter_mut().enumerate() {
            row[i] = 0.0;
        }
        for &(u, v, w) in edges {
            let d = &mut dist[u as usize][v as usize];
            *d = d.min(w);
        }
        for k in 0..n {
            for i in 0..n {
                for j in 0..n {
                    let through = dist[i][k] + dist[k][j];
                    if through < dist[i][j] {
                        dist[i][j] = through;
                    }
                }
            }
        }
        dist
    }

    #[test]
    fn random_graphs_against_brute_force() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);
        for _ in 0..30 {
            let n = rng.random_range(2..15u32);
            let m = rng.random_range(0..(3 * n));
            let edges = (0..m)
                .map(|_| {
                    (
                        rng.random_range(0..n),
                        rng.random_range(0..n),
                        rng.random_range(0..20) as f64,
                    )
                })
                .unique_by(|&(u, v, _)| (u, v))
                .collect_vec();
            let weights: FxHashMap<Edge<u32>, f64> =
                edges.iter().map(|&(u, v, w)| (Edge(u, v), w)).collect();

            let mut graph = AdjacencyGraph::<u32, Edge<u32>>::new(false);
            graph.add_vertex_range(0..n);
            graph
                .add_edge_range(edges.iter().map(|&(u, v, _)| Edge(u, v)))
                .unwrap();

            let expected = brute_force(n as usize, &edges);
            for root in 0..n {
                let mut dijkstra = DijkstraShortestPath::new(
                    &graph,
                    |e: &Edge<u32>| weights[e],
                    NeverCancel::handle(),
                );
                dijkstra.compute_from(root).unwrap();

                for v in 0..n {
                    let want = expected[root as usize][v as usize];
                    let got = dijkstra.try_get_distance(&v).unwrap();
                    if want.is_infinite() {
                        assert_eq!(got, None);
                    } else {
                        assert_eq!(got, Some(want));
                        let path = dijkstra.shortest_path_to(&v).unwrap().unwrap();
                        assert_eq!(path.iter().map(|e| weights[e]).sum::<f64>(), want);
                    }
                }
            }
        }
    }
}
