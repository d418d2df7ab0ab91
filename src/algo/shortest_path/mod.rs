/*!
# Shortest Paths

Single source path algorithms parameterized by a [`DistanceRelaxer`]:

- [`DijkstraShortestPath`]: Fibonacci queue backed Dijkstra, non-negative weights only
- [`BellmanFordShortestPath`]: edge relaxation rounds with negative cycle detection

The relaxer decides how distances are combined along a path and which of two distances is
better, so the same algorithms compute
shortest ([`ShortestDistanceRelaxer`]), longest ([`CriticalDistanceRelaxer`]) and widest
([`WidestPathRelaxer`]) paths.

Results are stored in a [`ShortestPathCore`]: distances and predecessor edges exist only
for vertices reached from the root.
*/

use std::cmp::Ordering;

use crate::{
    edge::GraphEdge,
    error::*,
    events::Event,
    utils::try_get_path,
    vertex::*,
};

use super::framework::RootedAlgorithm;

mod bellman_ford;
mod dijkstra;

pub use bellman_ford::*;
pub use dijkstra::*;

/// Combination and comparison of path distances
pub trait DistanceRelaxer: Clone {
    /// Distance of a vertex that was not reached yet
    fn initial_distance(&self) -> f64;

    /// Distance of the root
    fn root_distance(&self) -> f64 {
        0.0
    }

    /// Distance of a path of length `distance` extended by an edge of weight `weight`
    fn combine(&self, distance: f64, weight: f64) -> f64;

    /// `Less` if `a` is the better distance
    fn compare(&self, a: f64, b: f64) -> Ordering;

    /// Whether a negative edge weight invalidates the search
    fn rejects_negative_weights(&self) -> bool {
        false
    }
}

/// Sum of weights, smaller is better
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortestDistanceRelaxer;

impl DistanceRelaxer for ShortestDistanceRelaxer {
    fn initial_distance(&self) -> f64 {
        f64::INFINITY
    }

    fn combine(&self, distance: f64, weight: f64) -> f64 {
        distance + weight
    }

    fn compare(&self, a: f64, b: f64) -> Ordering {
        a.total_cmp(&b)
    }

    fn rejects_negative_weights(&self) -> bool {
        true
    }
}

/// Sum of weights, larger is better
#[derive(Debug, Clone, Copy, Default)]
pub struct CriticalDistanceRelaxer;

impl DistanceRelaxer for CriticalDistanceRelaxer {
    fn initial_distance(&self) -> f64 {
        f64::NEG_INFINITY
    }

    fn combine(&self, distance: f64, weight: f64) -> f64 {
        distance + weight
    }

    fn compare(&self, a: f64, b: f64) -> Ordering {
        b.total_cmp(&a)
    }
}

/// Bottleneck (minimum weight) of a path, larger is better
#[derive(Debug, Clone, Copy, Default)]
pub struct WidestPathRelaxer;

impl DistanceRelaxer for WidestPathRelaxer {
    fn initial_distance(&self) -> f64 {
        f64::NEG_INFINITY
    }

    fn root_distance(&self) -> f64 {
        f64::INFINITY
    }

    fn combine(&self, distance: f64, weight: f64) -> f64 {
        distance.min(weight)
    }

    fn compare(&self, a: f64, b: f64) -> Ordering {
        b.total_cmp(&a)
    }
}

/// Distances and predecessor edges of a single source computation
#[derive(Debug, Clone)]
pub struct ShortestPathCore<V, E> {
    distances: VertexMap<V, f64>,
    predecessors: VertexMap<V, E>,
    computed: bool,
}

impl<V, E> Default for ShortestPathCore<V, E> {
    fn default() -> Self {
        Self {
            distances: VertexMap::default(),
            predecessors: VertexMap::default(),
            computed: false,
        }
    }
}

impl<V, E> ShortestPathCore<V, E>
where
    V: Vertex,
    E: GraphEdge<V>,
{
    /// Returns *true* once a computation ran
    pub fn is_computed(&self) -> bool {
        self.computed
    }

    /// Distances of all reached vertices
    pub fn distances(&self) -> &VertexMap<V, f64> {
        &self.distances
    }

    /// Incoming tree edge of every reached vertex except the root
    pub fn predecessors(&self) -> &VertexMap<V, E> {
        &self.predecessors
    }

    /// Distance of `vertex`; `Ok(None)` if it was not reached.
    ///
    /// Fails with `InvalidOperation` if nothing was computed yet.
    pub fn try_get_distance(&self, vertex: &V) -> Result<Option<f64>> {
        if !self.computed {
            return Err(GraphError::invalid_operation(
                "distances are only available after a computation",
            ));
        }
        Ok(self.distances.get(vertex).copied())
    }

    /// Edges of the path from `root` to `target`; `Ok(None)` if `target` was not reached.
    ///
    /// Fails with `InvalidOperation` if nothing was computed yet.
    pub fn path_to(&self, root: &V, target: &V) -> Result<Option<Vec<E>>> {
        if self.try_get_distance(target)?.is_none() {
            return Ok(None);
        }
        if target == root {
            return Ok(Some(Vec::new()));
        }
        Ok(try_get_path(&self.predecessors, target))
    }

    pub(crate) fn clear(&mut self) {
        self.distances.clear();
        self.predecessors.clear();
        self.computed = false;
    }

    pub(crate) fn distance_or(&self, vertex: &V, initial: f64) -> f64 {
        self.distances.get(vertex).copied().unwrap_or(initial)
    }

    pub(crate) fn set_root(&mut self, root: V, distance: f64) {
        self.predecessors.remove(&root);
        self.distances.insert(root, distance);
    }

    pub(crate) fn relax(&mut self, vertex: V, distance: f64, edge: E) {
        self.distances.insert(vertex.clone(), distance);
        self.predecessors.insert(vertex, edge);
    }

    pub(crate) fn mark_computed(&mut self) {
        self.computed = true;
    }
}

/// Events of the shortest path algorithms.
///
/// Bellman-Ford fires `initialize_vertex`, `examine_edge`, `tree_edge` and
/// `edge_not_relaxed` only.
pub struct ShortestPathEvents<V, E> {
    pub initialize_vertex: Event<V>,
    pub discover_vertex: Event<V>,
    pub examine_vertex: Event<V>,
    pub finish_vertex: Event<V>,
    pub examine_edge: Event<E>,
    /// Fired whenever an edge improved the distance of its target
    pub tree_edge: Event<E>,
    pub edge_not_relaxed: Event<E>,
}

impl<V, E> Default for ShortestPathEvents<V, E> {
    fn default() -> Self {
        Self {
            initialize_vertex: Event::new(),
            discover_vertex: Event::new(),
            examine_vertex: Event::new(),
            finish_vertex: Event::new(),
            examine_edge: Event::new(),
            tree_edge: Event::new(),
            edge_not_relaxed: Event::new(),
        }
    }
}

/// Read access to the results of single source path algorithms
pub trait ShortestPathAlgorithm: RootedAlgorithm {
    type PathEdge: GraphEdge<Self::Root>;

    fn shortest_paths(&self) -> &ShortestPathCore<Self::Root, Self::PathEdge>;

    /// Distance of `vertex` from the root; `Ok(None)` if unreachable.
    /// Fails with `InvalidOperation` if the algorithm was never computed.
    fn try_get_distance(&self, vertex: &Self::Root) -> Result<Option<f64>> {
        self.shortest_paths().try_get_distance(vertex)
    }

    /// Edges of the best path from the root to `target`; `Ok(None)` if unreachable.
    /// Fails with `InvalidOperation` if the algorithm was never computed.
    fn shortest_path_to(&self, target: &Self::Root) -> Result<Option<Vec<Self::PathEdge>>> {
        let root = self
            .try_get_root()
            .ok_or_else(|| GraphError::invalid_operation("root vertex not set"))?;
        self.shortest_paths().path_to(root, target)
    }

    /// Distance of `vertex` from the root. Fails with `NoPathFound` if it was not reached.
    fn distance(&self, vertex: &Self::Root) -> Result<f64> {
        self.try_get_distance(vertex)?
            .ok_or(GraphError::NoPathFound)
    }

    /// Edges of the best path from the root to `target`.
    /// Fails with `NoPathFound` if `target` was not reached.
    fn shortest_path(&self, target: &Self::Root) -> Result<Vec<Self::PathEdge>> {
        self.shortest_path_to(target)?
            .ok_or(GraphError::NoPathFound)
    }
}
