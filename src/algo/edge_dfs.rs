/*!
# Edge Depth-First Search

A depth-first search whose state lives on the edges instead of the vertices: every edge is
colored white (unseen), gray (on the current path) or black (finished). Starting from the
out-edges of the root (if any) and then from every still white edge, the search follows
the out-edges of each edge's target. The recursion is unrolled into an explicit stack, so
deep graphs do not overflow the call stack.

Edges are identified by value; parallel edges with identical data share one color.
*/

use fxhash::FxHashMap;

use super::{
    framework::*,
    observers::{EdgePredecessorRecorderAlgorithm, TreeBuilderAlgorithm},
};
use crate::{edge::GraphEdge, error::*, events::Event, ops::*, vertex::GraphColor};

/// Events of an [`EdgeDepthFirstSearch`]
pub struct EdgeDfsEvents<V, E> {
    pub initialize_edge: Event<E>,
    /// Fired for the root and for every vertex whose out-edges start a new search tree
    pub start_vertex: Event<V>,
    /// Fired for every edge starting a new search tree
    pub start_edge: Event<E>,
    /// `(parent, edge)`: `edge` is a white out-edge of the target of `parent`
    pub discover_tree_edge: Event<(E, E)>,
    pub tree_edge: Event<E>,
    pub back_edge: Event<E>,
    pub forward_or_cross_edge: Event<E>,
    pub finish_edge: Event<E>,
}

impl<V, E> Default for EdgeDfsEvents<V, E> {
    fn default() -> Self {
        Self {
            initialize_edge: Event::new(),
            start_vertex: Event::new(),
            start_edge: Event::new(),
            discover_tree_edge: Event::new(),
            tree_edge: Event::new(),
            back_edge: Event::new(),
            forward_or_cross_edge: Event::new(),
            finish_edge: Event::new(),
        }
    }
}

struct Frame<E> {
    edge: E,
    out_edges: Vec<E>,
    next: usize,
    depth: usize,
}

/// Depth-first search over the edges of a graph
pub struct EdgeDepthFirstSearch<'a, G>
where
    G: GraphType,
{
    graph: &'a G,
    core: AlgorithmCore,
    root: RootVertex<G::Vertex>,
    edge_colors: FxHashMap<G::Edge, GraphColor>,
    max_depth: usize,
    events: EdgeDfsEvents<G::Vertex, G::Edge>,
}

impl<'a, G> EdgeDepthFirstSearch<'a, G>
where
    G: VertexSet + EdgeSet + IncidenceGraph,
{
    pub fn new(graph: &'a G, cancel: CancelHandle) -> Self {
        Self {
            graph,
            core: AlgorithmCore::new(cancel),
            root: RootVertex::default(),
            edge_colors: FxHashMap::default(),
            max_depth: usize::MAX,
            events: EdgeDfsEvents::default(),
        }
    }

    /// Edges deeper than `max_depth` below a start edge are not visited
    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth;
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.set_max_depth(max_depth);
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn events(&self) -> &EdgeDfsEvents<G::Vertex, G::Edge> {
        &self.events
    }

    pub fn edge_colors(&self) -> &FxHashMap<G::Edge, GraphColor> {
        &self.edge_colors
    }

    pub fn edge_color(&self, edge: &G::Edge) -> Option<GraphColor> {
        self.edge_colors.get(edge).copied()
    }

    fn is_white(&self, edge: &G::Edge) -> bool {
        self.edge_color(edge) == Some(GraphColor::White)
    }

    /// Runs the search from every white out-edge of `vertex`.
    /// Returns *false* if the search was cancelled.
    fn visit_out_edges(&mut self, vertex: &G::Vertex) -> bool {
        let graph = self.graph;
        let mut started = false;
        for edge in graph.out_edges(vertex) {
            if self.is_cancelling() {
                return false;
            }
            if !self.is_white(&edge) {
                continue;
            }
            if !started {
                self.events.start_vertex.fire(vertex);
                started = true;
            }
            self.events.start_edge.fire(&edge);
            if !self.visit(edge) {
                return false;
            }
        }
        true
    }

    /// Runs the search tree below `start`. Returns *false* if the search was cancelled.
    fn visit(&mut self, start: G::Edge) -> bool {
        let mut stack = Vec::new();
        self.push_frame(&mut stack, start, 0);

        while let Some(frame) = stack.last_mut() {
            let Some(edge) = frame.out_edges.get(frame.next).cloned() else {
                if let Some(finished) = stack.pop() {
                    self.edge_colors.insert(finished.edge.clone(), GraphColor::Black);
                    self.events.finish_edge.fire(&finished.edge);
                }
                continue;
            };
            frame.next += 1;
            let (parent, depth) = (frame.edge.clone(), frame.depth);

            if self.is_cancelling() {
                return false;
            }
            match self.edge_color(&edge).unwrap_or_default() {
                GraphColor::White => {
                    self.events.discover_tree_edge.fire(&(parent, edge.clone()));
                    self.push_frame(&mut stack, edge, depth + 1);
                }
                GraphColor::Gray => self.events.back_edge.fire(&edge),
                GraphColor::Black => self.events.forward_or_cross_edge.fire(&edge),
            }
        }
        true
    }

    fn push_frame(&mut self, stack: &mut Vec<Frame<G::Edge>>, edge: G::Edge, depth: usize) {
        if depth > self.max_depth {
            return;
        }
        let graph = self.graph;
        self.edge_colors.insert(edge.clone(), GraphColor::Gray);
        self.events.tree_edge.fire(&edge);
        stack.push(Frame {
            out_edges: graph.out_edges(edge.target()).collect(),
            edge,
            next: 0,
            depth,
        });
    }
}

impl<G> Algorithm for EdgeDepthFirstSearch<'_, G>
where
    G: VertexSet + EdgeSet + IncidenceGraph,
{
    fn core(&self) -> &AlgorithmCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AlgorithmCore {
        &mut self.core
    }

    fn initialize(&mut self) -> Result<()> {
        let graph = self.graph;
        self.edge_colors.clear();
        for edge in graph.edges() {
            self.edge_colors.insert(edge.clone(), GraphColor::White);
            self.events.initialize_edge.fire(&edge);
        }
        Ok(())
    }

    fn internal_compute(&mut self) -> Result<()> {
        let graph = self.graph;

        if let Some(root) = self.root.get().cloned() {
            if !graph.contains_vertex(&root) {
                return Err(GraphError::VertexNotFound);
            }
            // The root starts a tree even without white out-edges
            self.events.start_vertex.fire(&root);
            for edge in graph.out_edges(&root) {
                if self.is_cancelling() {
                    return Ok(());
                }
                if self.is_white(&edge) {
                    self.events.start_edge.fire(&edge);
                    if !self.visit(edge) {
                        return Ok(());
                    }
                }
            }
        }

        for v in graph.vertices() {
            if !self.visit_out_edges(&v) {
                return Ok(());
            }
        }
        Ok(())
    }
}

impl<G> RootedAlgorithm for EdgeDepthFirstSearch<'_, G>
where
    G: VertexSet + EdgeSet + IncidenceGraph,
{
    type Root = G::Vertex;

    fn root_vertex(&self) -> &RootVertex<G::Vertex> {
        &self.root
    }

    fn root_vertex_mut(&mut self) -> &mut RootVertex<G::Vertex> {
        &mut self.root
    }
}

impl<G: GraphType> TreeBuilderAlgorithm<G::Edge> for EdgeDepthFirstSearch<'_, G> {
    fn tree_edge_event(&self) -> &Event<G::Edge> {
        &self.events.tree_edge
    }
}

impl<G: GraphType> EdgePredecessorRecorderAlgorithm<G::Edge> for EdgeDepthFirstSearch<'_, G> {
    fn discover_tree_edge_event(&self) -> &Event<(G::Edge, G::Edge)> {
        &self.events.discover_tree_edge
    }

    fn finish_edge_event(&self) -> &Event<G::Edge> {
        &self.events.finish_edge
    }
}
