/*!
# Random Spanning Trees

[`CyclePoppingRandomTree`] samples a spanning tree (an in-tree, every edge pointing towards
the root) with Wilson's cycle popping algorithm. Every vertex not yet in the tree starts a
random walk; the walk overwrites the successor of each vertex it passes, which erases
loops, and ends on reaching the tree. The walk is then added to the tree.

Transitions are drawn by a [`MarkovEdgeChain`]. With the uniform
[`NormalizedMarkovEdgeChain`] the sampled tree is uniformly distributed among all in-trees
of the chosen root.

Without a root, every attempt lets each walked vertex become a root with probability
`epsilon` (halved before each attempt, starting at `1/2`). An attempt creating a second root
is discarded and the whole state is reinitialized.

A rooted walk only ends once it reaches the tree, so a rooted computation fails with
[`GraphError::NoPathFound`] if some vertex cannot reach the root. With
[`CyclePoppingRandomTree::exclude_tried_edges`] enabled, a walk instead stops once every
out-edge of its current vertex was tried, and such vertices are left hanging off a partial
tree.
*/

use fxhash::FxHashSet;
use rand::{Rng, SeedableRng, distr::weighted::WeightedIndex, seq::IndexedRandom};
use rand_distr::{Bernoulli, Distribution};
use rand_pcg::Pcg64Mcg;
use smallvec::SmallVec;
use tracing::trace;

use super::{framework::*, observers::TreeBuilderAlgorithm};
use crate::{edge::GraphEdge, error::*, events::Event, ops::*, vertex::*};

/// Draws the next edge of a random walk
pub trait MarkovEdgeChain<V, E> {
    /// Picks one of `edges` (the candidate out-edges of `vertex`).
    /// Returns `None` if no edge can be chosen.
    fn try_get_successor_from<R>(&mut self, edges: &[E], vertex: &V, rng: &mut R) -> Option<E>
    where
        R: Rng + ?Sized;

    /// Picks one of the out-edges of `vertex` in `graph`
    fn try_get_successor<G, R>(&mut self, graph: &G, vertex: &V, rng: &mut R) -> Option<E>
    where
        G: ImplicitGraph<Vertex = V, Edge = E>,
        R: Rng + ?Sized,
    {
        let edges: SmallVec<[E; 8]> = graph.try_out_edges(vertex)?.collect();
        self.try_get_successor_from(&edges[..], vertex, rng)
    }
}

/// Uniform choice among the candidate edges
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizedMarkovEdgeChain;

impl<V, E: Clone> MarkovEdgeChain<V, E> for NormalizedMarkovEdgeChain {
    fn try_get_successor_from<R>(&mut self, edges: &[E], _: &V, rng: &mut R) -> Option<E>
    where
        R: Rng + ?Sized,
    {
        edges.choose(rng).cloned()
    }
}

/// Choice with probability proportional to `weights(edge)`.
///
/// No edge is chosen if all candidate weights are zero or any weight is negative.
#[derive(Debug, Clone)]
pub struct WeightedMarkovEdgeChain<F> {
    weights: F,
}

impl<F> WeightedMarkovEdgeChain<F> {
    pub fn new(weights: F) -> Self {
        Self { weights }
    }
}

impl<V, E, F> MarkovEdgeChain<V, E> for WeightedMarkovEdgeChain<F>
where
    E: Clone,
    F: FnMut(&E) -> f64,
{
    fn try_get_successor_from<R>(&mut self, edges: &[E], _: &V, rng: &mut R) -> Option<E>
    where
        R: Rng + ?Sized,
    {
        let weights: SmallVec<[f64; 8]> = edges.iter().map(&mut self.weights).collect();
        let index = WeightedIndex::new(weights).ok()?;
        edges.get(index.sample(rng)).cloned()
    }
}

/// Deterministic choice cycling through the candidate edges of every vertex
#[derive(Debug, Clone)]
pub struct RoundRobinEdgeChain<V> {
    next: VertexMap<V, usize>,
}

impl<V> Default for RoundRobinEdgeChain<V> {
    fn default() -> Self {
        Self {
            next: VertexMap::default(),
        }
    }
}

impl<V> RoundRobinEdgeChain<V> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<V: Vertex, E: Clone> MarkovEdgeChain<V, E> for RoundRobinEdgeChain<V> {
    fn try_get_successor_from<R>(&mut self, edges: &[E], vertex: &V, _: &mut R) -> Option<E>
    where
        R: Rng + ?Sized,
    {
        if edges.is_empty() {
            return None;
        }
        let next = self.next.entry(vertex.clone()).or_insert(0);
        let edge = edges[*next % edges.len()].clone();
        *next += 1;
        Some(edge)
    }
}

/// Events of a [`CyclePoppingRandomTree`]
pub struct RandomTreeEvents<V, E> {
    pub initialize_vertex: Event<V>,
    /// Fired when a vertex joins the tree
    pub finish_vertex: Event<V>,
    /// Fired for every step of a walk, including steps later erased by a loop
    pub tree_edge: Event<E>,
    /// Fired when a vertex becomes a root
    pub clear_tree_vertex: Event<V>,
}

impl<V, E> Default for RandomTreeEvents<V, E> {
    fn default() -> Self {
        Self {
            initialize_vertex: Event::new(),
            finish_vertex: Event::new(),
            tree_edge: Event::new(),
            clear_tree_vertex: Event::new(),
        }
    }
}

/// Wilson's cycle popping random tree sampler
pub struct CyclePoppingRandomTree<'a, G, C = NormalizedMarkovEdgeChain>
where
    G: GraphType,
{
    graph: &'a G,
    edge_chain: C,
    rng: Pcg64Mcg,
    exclude_tried_edges: bool,
    core: AlgorithmCore,
    root: RootVertex<G::Vertex>,
    colors: VertexMap<G::Vertex, GraphColor>,
    successors: VertexMap<G::Vertex, Option<G::Edge>>,
    events: RandomTreeEvents<G::Vertex, G::Edge>,
}

impl<'a, G> CyclePoppingRandomTree<'a, G>
where
    G: VertexSet + ImplicitGraph,
{
    /// Sampler with uniform transitions and an entropy seeded generator
    pub fn new(graph: &'a G, cancel: CancelHandle) -> Self {
        Self::with_edge_chain(graph, NormalizedMarkovEdgeChain, cancel)
    }
}

impl<'a, G, C> CyclePoppingRandomTree<'a, G, C>
where
    G: VertexSet + ImplicitGraph,
    C: MarkovEdgeChain<G::Vertex, G::Edge>,
{
    pub fn with_edge_chain(graph: &'a G, edge_chain: C, cancel: CancelHandle) -> Self {
        Self {
            graph,
            edge_chain,
            rng: Pcg64Mcg::from_os_rng(),
            exclude_tried_edges: false,
            core: AlgorithmCore::new(cancel),
            root: RootVertex::default(),
            colors: VertexMap::default(),
            successors: VertexMap::default(),
            events: RandomTreeEvents::default(),
        }
    }

    /// Replaces the generator by one seeded with `seed`
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.set_rng(Pcg64Mcg::seed_from_u64(seed));
        self
    }

    pub fn set_rng(&mut self, rng: Pcg64Mcg) {
        self.rng = rng;
    }

    /// If set, a walk never retries an edge it already took and stops once the current
    /// vertex has no untried out-edge left
    pub fn set_exclude_tried_edges(&mut self, exclude: bool) {
        self.exclude_tried_edges = exclude;
    }

    pub fn exclude_tried_edges(mut self, exclude: bool) -> Self {
        self.set_exclude_tried_edges(exclude);
        self
    }

    pub fn edge_chain(&self) -> &C {
        &self.edge_chain
    }

    pub fn edge_chain_mut(&mut self) -> &mut C {
        &mut self.edge_chain
    }

    pub fn events(&self) -> &RandomTreeEvents<G::Vertex, G::Edge> {
        &self.events
    }

    /// Samples a tree without a fixed root
    pub fn random_tree(&mut self) -> Result<()> {
        self.clear_root();
        self.compute()
    }

    /// Samples a tree rooted at `root`.
    /// Fails with `VertexNotFound` if `root` is not in the graph and with `NoPathFound` if a
    /// vertex cannot reach `root` while tried edges are not excluded.
    pub fn random_tree_with_root(&mut self, root: G::Vertex) -> Result<()> {
        if !self.graph.contains_vertex(&root) {
            return Err(GraphError::VertexNotFound);
        }
        self.compute_from(root)
    }

    /// Color of `vertex`: black once it joined the tree.
    /// Fails with `VertexNotFound` if `vertex` was never initialized.
    pub fn vertex_color(&self, vertex: &G::Vertex) -> Result<GraphColor> {
        self.colors
            .get(vertex)
            .copied()
            .ok_or(GraphError::VertexNotFound)
    }

    /// Edge leaving every vertex towards the root; `None` for roots
    pub fn successors(&self) -> &VertexMap<G::Vertex, Option<G::Edge>> {
        &self.successors
    }

    /// The edges of the sampled tree
    pub fn successor_tree_edges(&self) -> Vec<G::Edge> {
        self.successors.values().flatten().cloned().collect()
    }

    fn reset_tree(&mut self) {
        let graph = self.graph;
        self.colors.clear();
        self.successors.clear();
        for v in graph.vertices() {
            self.colors.insert(v.clone(), GraphColor::White);
            self.events.initialize_vertex.fire(&v);
        }
    }

    fn not_in_tree(&self, vertex: &G::Vertex) -> bool {
        self.colors.get(vertex) == Some(&GraphColor::White)
    }

    fn set_in_tree(&mut self, vertex: &G::Vertex) {
        self.colors.insert(vertex.clone(), GraphColor::Black);
        self.events.finish_vertex.fire(vertex);
    }

    fn make_root(&mut self, vertex: &G::Vertex) {
        self.successors.insert(vertex.clone(), None);
        self.events.clear_tree_vertex.fire(vertex);
        self.set_in_tree(vertex);
    }

    /// Records `edge` as the successor of `vertex` and returns the next vertex of the walk
    fn step(&mut self, vertex: G::Vertex, edge: G::Edge) -> G::Vertex {
        let next = edge.target().clone();
        self.events.tree_edge.fire(&edge);
        self.successors.insert(vertex, Some(edge));
        next
    }

    fn try_get_successor(
        &mut self,
        tried: &mut FxHashSet<G::Edge>,
        vertex: &G::Vertex,
    ) -> Option<G::Edge> {
        let graph = self.graph;
        if !self.exclude_tried_edges {
            return self
                .edge_chain
                .try_get_successor(graph, vertex, &mut self.rng);
        }

        let edges: SmallVec<[G::Edge; 8]> = graph
            .try_out_edges(vertex)?
            .filter(|e| !tried.contains(e))
            .collect();
        let successor = self
            .edge_chain
            .try_get_successor_from(&edges[..], vertex, &mut self.rng)?;
        tried.insert(successor.clone());
        Some(successor)
    }

    /// Walks from `vertex` until the tree is reached.
    /// Returns *false* if the walk was cancelled.
    fn explore(&mut self, vertex: &G::Vertex) -> bool {
        let mut tried = FxHashSet::default();
        let mut current = vertex.clone();
        while self.not_in_tree(&current) {
            if self.is_cancelling() {
                return false;
            }
            let Some(successor) = self.try_get_successor(&mut tried, &current) else {
                break;
            };
            current = self.step(current, successor);
        }
        true
    }

    /// Adds the walk starting at `vertex` to the tree
    fn colorize(&mut self, vertex: &G::Vertex) {
        let mut current = vertex.clone();
        while self.not_in_tree(&current) {
            self.set_in_tree(&current);
            match self.successors.get(&current) {
                Some(Some(edge)) => current = edge.target().clone(),
                _ => break,
            }
        }
    }

    /// Whether every vertex has a path to `root`
    fn all_reach(&self, root: &G::Vertex) -> bool {
        let graph = self.graph;
        let mut reaching = FxHashSet::default();
        reaching.insert(root.clone());

        let mut changed = true;
        while changed && reaching.len() < graph.vertex_count() {
            changed = false;
            for v in graph.vertices() {
                if reaching.contains(&v) {
                    continue;
                }
                if graph.out_edges(&v).any(|e| reaching.contains(e.target())) {
                    reaching.insert(v);
                    changed = true;
                }
            }
        }
        reaching.len() == graph.vertex_count()
    }

    fn rooted_tree(&mut self, root: G::Vertex) -> Result<()> {
        let graph = self.graph;
        // Memoryless walks only end in the tree
        if !self.exclude_tried_edges && !self.all_reach(&root) {
            return Err(GraphError::NoPathFound);
        }
        self.make_root(&root);

        for v in graph.vertices() {
            if self.is_cancelling() || !self.explore(&v) {
                return Ok(());
            }
            self.colorize(&v);
        }
        Ok(())
    }

    /// Like [`Self::explore`], but every walked vertex becomes a root with probability
    /// `chance`. Returns *false* once a second root was created.
    fn explore_with_roots(
        &mut self,
        vertex: &G::Vertex,
        chance: &Bernoulli,
        roots: &mut usize,
    ) -> bool {
        let mut tried = FxHashSet::default();
        let mut current = vertex.clone();
        while self.not_in_tree(&current) {
            if self.is_cancelling() {
                break;
            }
            if chance.sample(&mut self.rng) {
                self.make_root(&current);
                *roots += 1;
                if *roots > 1 {
                    return false;
                }
            } else {
                let Some(successor) = self.try_get_successor(&mut tried, &current) else {
                    break;
                };
                current = self.step(current, successor);
            }
        }
        true
    }

    /// One root free attempt. Returns *false* if it created more than one root.
    fn attempt(&mut self, epsilon: f64) -> Result<bool> {
        let graph = self.graph;
        let chance =
            Bernoulli::new(epsilon).map_err(|err| GraphError::invalid_argument(err.to_string()))?;
        self.reset_tree();

        let mut roots = 0;
        for v in graph.vertices() {
            if self.is_cancelling() {
                break;
            }
            if !self.explore_with_roots(&v, &chance, &mut roots) {
                trace!(epsilon, "second root, attempt discarded");
                return Ok(false);
            }
            self.colorize(&v);
        }
        Ok(true)
    }

    fn root_free_tree(&mut self) -> Result<()> {
        let mut epsilon = 1.0;
        loop {
            if self.is_cancelling() {
                return Ok(());
            }
            epsilon /= 2.0;
            trace!(epsilon, "random tree attempt");
            if self.attempt(epsilon)? {
                return Ok(());
            }
        }
    }
}

impl<G, C> Algorithm for CyclePoppingRandomTree<'_, G, C>
where
    G: VertexSet + ImplicitGraph,
    C: MarkovEdgeChain<G::Vertex, G::Edge>,
{
    fn core(&self) -> &AlgorithmCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AlgorithmCore {
        &mut self.core
    }

    fn initialize(&mut self) -> Result<()> {
        self.reset_tree();
        Ok(())
    }

    fn internal_compute(&mut self) -> Result<()> {
        let graph = self.graph;
        match self.root.get().cloned() {
            Some(root) if !graph.contains_vertex(&root) => Err(GraphError::VertexNotFound),
            Some(root) => self.rooted_tree(root),
            None => self.root_free_tree(),
        }
    }
}

impl<G, C> RootedAlgorithm for CyclePoppingRandomTree<'_, G, C>
where
    G: VertexSet + ImplicitGraph,
    C: MarkovEdgeChain<G::Vertex, G::Edge>,
{
    type Root = G::Vertex;

    fn root_vertex(&self) -> &RootVertex<G::Vertex> {
        &self.root
    }

    fn root_vertex_mut(&mut self) -> &mut RootVertex<G::Vertex> {
        &mut self.root
    }
}

impl<G: GraphType, C> TreeBuilderAlgorithm<G::Edge> for CyclePoppingRandomTree<'_, G, C> {
    fn tree_edge_event(&self) -> &Event<G::Edge> {
        &self.events.tree_edge
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use fxhash::FxHashMap;
    use itertools::Itertools;

    use super::*;
    use crate::{edge::Edge, repr::AdjacencyGraph};

    type Graph = AdjacencyGraph<u32, Edge<u32>>;

    /// Asserts that every vertex is black and its successor chain ends in a root within
    /// `|V|` steps. Returns the roots.
    fn assert_in_tree<C>(tree: &CyclePoppingRandomTree<'_, Graph, C>, graph: &Graph) -> Vec<u32>
    where
        C: MarkovEdgeChain<u32, Edge<u32>>,
    {
        let mut roots = Vec::new();
        for v in graph.vertices() {
            assert_eq!(tree.vertex_color(&v), Ok(GraphColor::Black));

            let mut current = v;
            let mut steps = 0;
            while let Some(Some(edge)) = tree.successors().get(&current) {
                assert_eq!(edge.0, current);
                current = edge.1;
                steps += 1;
                assert!(steps <= graph.vertex_count());
            }
            assert_eq!(tree.successors().get(&current), Some(&None));
            roots.push(current);
        }
        roots.into_iter().unique().collect()
    }

    fn cycle_with_chords(n: u32, chords: usize, rng: &mut Pcg64Mcg) -> Graph {
        let mut graph = Graph::from_edges((0..n).map(|u| Edge(u, (u + 1) % n)));
        for _ in 0..chords {
            graph
                .add_edge(Edge(rng.random_range(0..n), rng.random_range(0..n)))
                .unwrap();
        }
        graph
    }

    #[test]
    fn uniform_on_symmetric_cycle() {
        let graph = Graph::from_edges(
            (0..4u32).flat_map(|u| [Edge(u, (u + 1) % 4), Edge((u + 1) % 4, u)]),
        );
        let mut tree = CyclePoppingRandomTree::new(&graph, NeverCancel::handle()).with_seed(42);

        let mut counts: FxHashMap<Vec<Edge<u32>>, usize> = FxHashMap::default();
        for _ in 0..4000 {
            tree.reset();
            tree.random_tree_with_root(0).unwrap();
            assert_eq!(assert_in_tree(&tree, &graph), vec![0]);

            let edges = tree.successor_tree_edges().into_iter().sorted().collect_vec();
            assert_eq!(edges.len(), 3);
            *counts.entry(edges).or_default() += 1;
        }

        assert_eq!(counts.len(), 4);
        for &count in counts.values() {
            assert!((850..=1150).contains(&count), "count {count}");
        }
    }

    #[test]
    fn root_free_uniform_on_symmetric_cycle() {
        let graph = Graph::from_edges(
            (0..4u32).flat_map(|u| [Edge(u, (u + 1) % 4), Edge((u + 1) % 4, u)]),
        );
        let mut tree = CyclePoppingRandomTree::new(&graph, NeverCancel::handle()).with_seed(7);

        // An unrooted spanning tree of the 4-cycle is identified by its undirected edges
        let mut counts: FxHashMap<Vec<(u32, u32)>, usize> = FxHashMap::default();
        for _ in 0..4000 {
            tree.reset();
            tree.random_tree().unwrap();
            assert_eq!(assert_in_tree(&tree, &graph).len(), 1);

            let edges = tree
                .successor_tree_edges()
                .into_iter()
                .map(|Edge(u, v)| (u.min(v), u.max(v)))
                .sorted()
                .collect_vec();
            assert_eq!(edges.len(), 3);
            *counts.entry(edges).or_default() += 1;
        }

        assert_eq!(counts.len(), 4);
        for &count in counts.values() {
            assert!((850..=1150).contains(&count), "count {count}");
        }
    }

    #[test]
    fn rooted_chains_reach_root() {
        let rng = &mut Pcg64Mcg::seed_from_u64(11);
        for _ in 0..30 {
            let n = rng.random_range(1..25u32);
            let graph = cycle_with_chords(n, rng.random_range(0..2 * n as usize), rng);
            let root = rng.random_range(0..n);

            let mut tree =
                CyclePoppingRandomTree::new(&graph, NeverCancel::handle()).with_seed(rng.random());
            tree.random_tree_with_root(root).unwrap();
            assert_eq!(assert_in_tree(&tree, &graph), vec![root]);
            assert_eq!(tree.successor_tree_edges().len(), n as usize - 1);
        }
    }

    #[test]
    fn root_free_tree_has_single_root() {
        let rng = &mut Pcg64Mcg::seed_from_u64(13);
        for _ in 0..30 {
            let n = rng.random_range(1..25u32);
            let graph = cycle_with_chords(n, rng.random_range(0..n as usize), rng);

            let mut tree =
                CyclePoppingRandomTree::new(&graph, NeverCancel::handle()).with_seed(rng.random());
            tree.set_root(0);
            tree.random_tree().unwrap();
            assert_eq!(tree.try_get_root(), None);
            assert_eq!(assert_in_tree(&tree, &graph).len(), 1);
        }
    }

    #[test]
    fn events_and_errors() {
        let graph = Graph::from_edges([Edge(1, 0), Edge(2, 1)]);
        let mut tree = CyclePoppingRandomTree::new(&graph, NeverCancel::handle()).with_seed(1);

        let cleared = Rc::new(RefCell::new(Vec::new()));
        let log = cleared.clone();
        let _sub = tree
            .events()
            .clear_tree_vertex
            .subscribe(move |v| log.borrow_mut().push(*v));

        assert_eq!(tree.vertex_color(&0), Err(GraphError::VertexNotFound));
        assert_eq!(tree.random_tree_with_root(9), Err(GraphError::VertexNotFound));

        tree.random_tree_with_root(0).unwrap();
        assert_eq!(*cleared.borrow(), vec![0]);
        assert_eq!(
            tree.successor_tree_edges().into_iter().sorted().collect_vec(),
            vec![Edge(1, 0), Edge(2, 1)]
        );
    }

    #[test]
    fn excluding_tried_edges_terminates() {
        let graph = Graph::from_edges([Edge(1, 2), Edge(2, 1), Edge(3, 3)]);
        let mut tree = CyclePoppingRandomTree::new(&graph, NeverCancel::handle())
            .with_seed(3)
            .exclude_tried_edges(true);
        tree.random_tree_with_root(3).unwrap();

        assert_eq!(tree.state(), ComputationState::Finished);
        for v in 1..=3 {
            assert_eq!(tree.vertex_color(&v), Ok(GraphColor::Black));
        }
    }

    #[test]
    fn unreachable_root_fails() {
        let graph = Graph::from_edges([Edge(1, 2), Edge(2, 1), Edge(3, 3)]);
        let mut tree = CyclePoppingRandomTree::new(&graph, NeverCancel::handle()).with_seed(3);

        assert_eq!(tree.random_tree_with_root(3), Err(GraphError::NoPathFound));
        assert_eq!(tree.state(), ComputationState::Aborted);

        // Every vertex reaches 1 through the cycle or is 1 itself, except 3
        tree.reset();
        assert_eq!(tree.random_tree_with_root(1), Err(GraphError::NoPathFound));

        let graph = Graph::from_edges([Edge(1, 2), Edge(2, 1), Edge(3, 1)]);
        let mut tree = CyclePoppingRandomTree::new(&graph, NeverCancel::handle()).with_seed(3);
        tree.random_tree_with_root(1).unwrap();
        assert_eq!(assert_in_tree(&tree, &graph), vec![1]);
    }

    #[test]
    fn cancellation_stops_walk() {
        let graph = Graph::from_edges([Edge(1, 0), Edge(1, 2), Edge(2, 1)]);
        let flag = CancelFlag::new();
        let mut tree = CyclePoppingRandomTree::new(&graph, flag.handle()).with_seed(5);

        let trigger = flag.clone();
        let _sub = tree.events().tree_edge.subscribe(move |_| trigger.cancel());
        tree.random_tree_with_root(0).unwrap();
        assert_eq!(tree.state(), ComputationState::Aborted);
    }

    #[test]
    fn edge_chains() {
        let rng = &mut Pcg64Mcg::seed_from_u64(17);
        let edges = [Edge(0, 1), Edge(0, 2), Edge(0, 3)];

        let mut round_robin = RoundRobinEdgeChain::new();
        let picked = (0..4)
            .map(|_| round_robin.try_get_successor_from(&edges[..], &0, rng))
            .collect_vec();
        assert_eq!(
            picked,
            vec![Some(Edge(0, 1)), Some(Edge(0, 2)), Some(Edge(0, 3)), Some(Edge(0, 1))]
        );
        assert_eq!(
            round_robin.try_get_successor_from(&edges[..], &5, rng),
            Some(Edge(0, 1))
        );

        let mut weighted =
            WeightedMarkovEdgeChain::new(|e: &Edge<u32>| if e.1 == 2 { 1.0 } else { 0.0 });
        for _ in 0..20 {
            assert_eq!(weighted.try_get_successor_from(&edges[..], &0, rng), Some(Edge(0, 2)));
        }
        let mut zero = WeightedMarkovEdgeChain::new(|_: &Edge<u32>| 0.0);
        assert_eq!(zero.try_get_successor_from(&edges[..], &0, rng), None);

        let graph = Graph::from_edges(edges);
        let mut uniform = NormalizedMarkovEdgeChain;
        for _ in 0..20 {
            let edge = uniform.try_get_successor(&graph, &0, rng).unwrap();
            assert!(edges.contains(&edge));
        }
        assert_eq!(uniform.try_get_successor(&graph, &3, rng), None);
        assert_eq!(uniform.try_get_successor(&graph, &9, rng), None);
    }
}
