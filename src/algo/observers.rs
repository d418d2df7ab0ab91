/*!
# Observers

Algorithms publish their progress through [`Event`]s. The traits in this module expose
the common event surfaces so that observers can be written once and attached to every
algorithm providing the surface:

- [`TreeBuilderAlgorithm`]: edges added to a search/spanning tree
- [`VertexTimeStamperAlgorithm`]: discovery and finishing of vertices
- [`EdgePredecessorRecorderAlgorithm`]: edge-to-edge tree structure of edge based searches

[`Observer::attach`] returns a [`Subscription`]; the observer records for as long as the
subscription is alive. Observers keep their state behind `Rc<RefCell<_>>`, so the recorded
data can be read while the algorithm still holds the listener.
*/

use std::{cell::RefCell, rc::Rc};

use fxhash::FxHashMap;

use crate::{
    edge::GraphEdge,
    events::{Event, Subscription},
    utils::try_get_path,
    vertex::*,
};

/// Algorithms building a tree edge by edge
pub trait TreeBuilderAlgorithm<E> {
    fn tree_edge_event(&self) -> &Event<E>;
}

/// Algorithms discovering and finishing vertices
pub trait VertexTimeStamperAlgorithm<V> {
    fn discover_vertex_event(&self) -> &Event<V>;

    fn finish_vertex_event(&self) -> &Event<V>;
}

/// Edge based searches reporting `(parent edge, tree edge)` pairs
pub trait EdgePredecessorRecorderAlgorithm<E> {
    fn discover_tree_edge_event(&self) -> &Event<(E, E)>;

    fn finish_edge_event(&self) -> &Event<E>;
}

/// Something that can listen to an algorithm of type `A`
pub trait Observer<A: ?Sized> {
    /// Starts recording; recording stops when the subscription is dropped
    #[must_use = "dropping the subscription detaches the observer immediately"]
    fn attach(&self, algorithm: &A) -> Subscription;
}

/// Records for every vertex the tree edge it was reached by
#[derive(Debug)]
pub struct VertexPredecessorRecorderObserver<V, E> {
    predecessors: Rc<RefCell<VertexMap<V, E>>>,
}

impl<V, E> Default for VertexPredecessorRecorderObserver<V, E> {
    fn default() -> Self {
        Self {
            predecessors: Rc::new(RefCell::new(VertexMap::default())),
        }
    }
}

impl<V, E> VertexPredecessorRecorderObserver<V, E>
where
    V: Vertex,
    E: GraphEdge<V>,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the recorded vertex -> incoming tree edge map
    pub fn vertex_predecessors(&self) -> VertexMap<V, E> {
        self.predecessors.borrow().clone()
    }

    /// Path of tree edges leading to `vertex`, or `None` if it has no predecessor
    pub fn try_get_path(&self, vertex: &V) -> Option<Vec<E>> {
        try_get_path(&self.predecessors.borrow(), vertex)
    }

    pub fn clear(&self) {
        self.predecessors.borrow_mut().clear();
    }
}

impl<V, E, A> Observer<A> for VertexPredecessorRecorderObserver<V, E>
where
    V: Vertex + 'static,
    E: GraphEdge<V> + 'static,
    A: TreeBuilderAlgorithm<E> + ?Sized,
{
    fn attach(&self, algorithm: &A) -> Subscription {
        let predecessors = self.predecessors.clone();
        algorithm.tree_edge_event().subscribe(move |edge: &E| {
            predecessors
                .borrow_mut()
                .insert(edge.target().clone(), edge.clone());
        })
    }
}

/// Records tree edges in the order they were reported
#[derive(Debug)]
pub struct EdgeRecorderObserver<E> {
    edges: Rc<RefCell<Vec<E>>>,
}

impl<E> Default for EdgeRecorderObserver<E> {
    fn default() -> Self {
        Self {
            edges: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl<E: Clone> EdgeRecorderObserver<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edges(&self) -> Vec<E> {
        self.edges.borrow().clone()
    }

    pub fn clear(&self) {
        self.edges.borrow_mut().clear();
    }
}

impl<E, A> Observer<A> for EdgeRecorderObserver<E>
where
    E: Clone + 'static,
    A: TreeBuilderAlgorithm<E> + ?Sized,
{
    fn attach(&self, algorithm: &A) -> Subscription {
        let edges = self.edges.clone();
        algorithm
            .tree_edge_event()
            .subscribe(move |edge: &E| edges.borrow_mut().push(edge.clone()))
    }
}

/// Records discovered vertices in discovery order
#[derive(Debug)]
pub struct VertexRecorderObserver<V> {
    vertices: Rc<RefCell<Vec<V>>>,
}

impl<V> Default for VertexRecorderObserver<V> {
    fn default() -> Self {
        Self {
            vertices: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl<V: Clone> VertexRecorderObserver<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> Vec<V> {
        self.vertices.borrow().clone()
    }

    pub fn clear(&self) {
        self.vertices.borrow_mut().clear();
    }
}

impl<V, A> Observer<A> for VertexRecorderObserver<V>
where
    V: Clone + 'static,
    A: VertexTimeStamperAlgorithm<V> + ?Sized,
{
    fn attach(&self, algorithm: &A) -> Subscription {
        let vertices = self.vertices.clone();
        algorithm
            .discover_vertex_event()
            .subscribe(move |v: &V| vertices.borrow_mut().push(v.clone()))
    }
}

#[derive(Debug)]
struct EdgePredecessors<E> {
    predecessors: FxHashMap<E, E>,
    end_path_edges: Vec<E>,
}

/// Records the edge-to-edge tree of an edge based search.
///
/// Every finished edge that is no other edge's predecessor ends a path; [`Self::all_paths`]
/// reconstructs these paths back to the edge the search started with.
#[derive(Debug)]
pub struct EdgePredecessorRecorderObserver<V, E> {
    state: Rc<RefCell<EdgePredecessors<E>>>,
    _vertex: std::marker::PhantomData<V>,
}

impl<V, E> Default for EdgePredecessorRecorderObserver<V, E> {
    fn default() -> Self {
        Self {
            state: Rc::new(RefCell::new(EdgePredecessors {
                predecessors: FxHashMap::default(),
                end_path_edges: Vec::new(),
            })),
            _vertex: std::marker::PhantomData,
        }
    }
}

impl<V, E> EdgePredecessorRecorderObserver<V, E>
where
    V: Vertex,
    E: GraphEdge<V>,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the recorded edge -> predecessor edge map
    pub fn edge_predecessors(&self) -> FxHashMap<E, E> {
        self.state.borrow().predecessors.clone()
    }

    /// Edges ending a path, in finishing order
    pub fn end_path_edges(&self) -> Vec<E> {
        self.state.borrow().end_path_edges.clone()
    }

    /// Path from the start of the search to `edge` (inclusive)
    pub fn path(&self, edge: &E) -> Vec<E> {
        let state = self.state.borrow();
        let mut path = vec![edge.clone()];
        let mut current = edge;
        while let Some(predecessor) = state.predecessors.get(current) {
            if path.len() > state.predecessors.len() {
                break;
            }
            path.push(predecessor.clone());
            current = predecessor;
        }
        path.reverse();
        path
    }

    /// One path per end path edge
    pub fn all_paths(&self) -> Vec<Vec<E>> {
        self.end_path_edges().iter().map(|e| self.path(e)).collect()
    }

    /// Path to `edge` consisting only of edges not yet claimed in `colors`.
    ///
    /// Walks backwards from `edge` and stops at the first edge whose color is not white;
    /// every edge taken is colored black. Edges missing from `colors` count as white.
    pub fn merged_path(&self, edge: &E, colors: &mut FxHashMap<E, GraphColor>) -> Vec<E> {
        let state = self.state.borrow();
        let mut path = Vec::new();
        let mut current = Some(edge);

        while let Some(e) = current {
            if colors.get(e).copied().unwrap_or_default() != GraphColor::White {
                break;
            }
            colors.insert(e.clone(), GraphColor::Black);
            path.push(e.clone());
            current = state.predecessors.get(e);
        }
        path.reverse();
        path
    }

    /// Edge disjoint paths covering the recorded tree, one per end path edge
    pub fn all_merged_paths(&self) -> Vec<Vec<E>> {
        let mut colors = FxHashMap::default();
        self.end_path_edges()
            .iter()
            .map(|e| self.merged_path(e, &mut colors))
            .collect()
    }

    pub fn clear(&self) {
        let mut state = self.state.borrow_mut();
        state.predecessors.clear();
        state.end_path_edges.clear();
    }
}

impl<V, E, A> Observer<A> for EdgePredecessorRecorderObserver<V, E>
where
    V: Vertex + 'static,
    E: GraphEdge<V> + 'static,
    A: EdgePredecessorRecorderAlgorithm<E> + ?Sized,
{
    fn attach(&self, algorithm: &A) -> Subscription {
        let state = self.state.clone();
        let discovered = algorithm
            .discover_tree_edge_event()
            .subscribe(move |(parent, edge): &(E, E)| {
                state
                    .borrow_mut()
                    .predecessors
                    .insert(edge.clone(), parent.clone());
            });

        let state = self.state.clone();
        let finished = algorithm.finish_edge_event().subscribe(move |edge: &E| {
            let mut state = state.borrow_mut();
            if !state.predecessors.values().any(|p| p == edge) {
                state.end_path_edges.push(edge.clone());
            }
        });

        discovered.join(finished)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::Edge;

    #[derive(Default)]
    struct Fake {
        tree_edge: Event<Edge<u32>>,
        discover: Event<u32>,
        finish: Event<u32>,
        discover_tree_edge: Event<(Edge<u32>, Edge<u32>)>,
        finish_edge: Event<Edge<u32>>,
    }

    impl TreeBuilderAlgorithm<Edge<u32>> for Fake {
        fn tree_edge_event(&self) -> &Event<Edge<u32>> {
            &self.tree_edge
        }
    }

    impl VertexTimeStamperAlgorithm<u32> for Fake {
        fn discover_vertex_event(&self) -> &Event<u32> {
            &self.discover
        }

        fn finish_vertex_event(&self) -> &Event<u32> {
            &self.finish
        }
    }

    impl EdgePredecessorRecorderAlgorithm<Edge<u32>> for Fake {
        fn discover_tree_edge_event(&self) -> &Event<(Edge<u32>, Edge<u32>)> {
            &self.discover_tree_edge
        }

        fn finish_edge_event(&self) -> &Event<Edge<u32>> {
            &self.finish_edge
        }
    }

    #[test]
    fn tree_recorders() {
        let fake = Fake::default();
        let predecessors = VertexPredecessorRecorderObserver::<u32, Edge<u32>>::new();
        let edges = EdgeRecorderObserver::new();
        let vertices = VertexRecorderObserver::new();

        {
            let _a = predecessors.attach(&fake);
            let _b = edges.attach(&fake);
            let _c = vertices.attach(&fake);

            fake.discover.fire(&0);
            for e in [Edge(0, 1), Edge(1, 2), Edge(0, 3)] {
                fake.discover.fire(&e.1);
                fake.tree_edge.fire(&e);
            }
        }
        // detached
        fake.tree_edge.fire(&Edge(3, 4));

        assert_eq!(vertices.vertices(), vec![0, 1, 2, 3]);
        assert_eq!(edges.edges(), vec![Edge(0, 1), Edge(1, 2), Edge(0, 3)]);
        assert_eq!(
            predecessors.try_get_path(&2),
            Some(vec![Edge(0, 1), Edge(1, 2)])
        );
        assert_eq!(predecessors.try_get_path(&4), None);
        assert_eq!(predecessors.vertex_predecessors().len(), 3);

        edges.clear();
        assert!(edges.edges().is_empty());
    }

    #[test]
    fn edge_predecessor_paths() {
        let fake = Fake::default();
        let recorder = EdgePredecessorRecorderObserver::<u32, Edge<u32>>::new();
        let _sub = recorder.attach(&fake);

        // edge search tree: (0,1) -> (1,2) -> (2,3), (1,2) -> (2,4)
        let (a, b, c, d) = (Edge(0, 1), Edge(1, 2), Edge(2, 3), Edge(2, 4));
        fake.discover_tree_edge.fire(&(a, b));
        fake.discover_tree_edge.fire(&(b, c));
        fake.finish_edge.fire(&c);
        fake.discover_tree_edge.fire(&(b, d));
        fake.finish_edge.fire(&d);
        fake.finish_edge.fire(&b);
        fake.finish_edge.fire(&a);

        assert_eq!(recorder.end_path_edges(), vec![c, d]);
        assert_eq!(recorder.all_paths(), vec![vec![a, b, c], vec![a, b, d]]);
        assert_eq!(recorder.all_merged_paths(), vec![vec![a, b, c], vec![d]]);

        let mut colors = FxHashMap::default();
        colors.insert(b, GraphColor::Gray);
        assert_eq!(recorder.merged_path(&c, &mut colors), vec![c]);
        assert_eq!(colors.get(&c), Some(&GraphColor::Black));

        recorder.clear();
        assert!(recorder.edge_predecessors().is_empty());
    }
}
