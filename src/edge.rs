/*!
# Edge Representation

An edge is defined by its two endpoints, `source` and `target`. Whether the orientation
matters is up to the graph storing it; the edge types only differ in the extra data they
carry and in how they compare:

- [`Edge`]: plain `(source, target)` pair
- [`UndirectedEdge`]: equality and hashing ignore the orientation
- [`TaggedEdge`]: carries a mutable tag and notifies listeners when it changes
- [`TermEdge`]: additionally stores terminal indices at both endpoints
- [`MergedEdge`]: a chain of edges condensed into a single edge
*/

use std::{
    fmt::{Debug, Display},
    hash::{Hash, Hasher},
};

use crate::{events::Event, vertex::Vertex};

/// Common interface of all edge types.
///
/// Edges are values: they are cloned into algorithm state and compared structurally, so two
/// parallel edges with identical data are indistinguishable.
pub trait GraphEdge<V>: Clone + Eq + Hash {
    /// Returns the source endpoint
    fn source(&self) -> &V;

    /// Returns the target endpoint
    fn target(&self) -> &V;

    /// Returns *true* if source and target are equal
    fn is_self_edge(&self) -> bool
    where
        V: PartialEq,
    {
        self.source() == self.target()
    }

    /// Returns the endpoint opposite to `vertex` or `None` if `vertex` is no endpoint
    fn other_end(&self, vertex: &V) -> Option<&V>
    where
        V: PartialEq,
    {
        if self.source() == vertex {
            Some(self.target())
        } else if self.target() == vertex {
            Some(self.source())
        } else {
            None
        }
    }

    /// Returns *true* if `vertex` is one of the endpoints
    fn is_adjacent(&self, vertex: &V) -> bool
    where
        V: PartialEq,
    {
        self.source() == vertex || self.target() == vertex
    }
}

/// Creates edges between two existing vertices, e.g. augmented or reversed edges.
pub type EdgeFactory<V, E> = Box<dyn FnMut(&V, &V) -> E>;

/// A plain edge `(source, target)`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Edge<V>(pub V, pub V);

impl<V: Vertex> GraphEdge<V> for Edge<V> {
    fn source(&self) -> &V {
        &self.0
    }

    fn target(&self) -> &V {
        &self.1
    }
}

impl<V: Clone> Edge<V> {
    /// Reverses the edge by switching the endpoints
    pub fn reversed(&self) -> Self {
        Edge(self.1.clone(), self.0.clone())
    }
}

impl<V: Display> Display for Edge<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.0, self.1)
    }
}

impl<V: Debug> Debug for Edge<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:?},{:?})", self.0, self.1)
    }
}

impl<V> From<(V, V)> for Edge<V> {
    fn from(value: (V, V)) -> Self {
        Edge(value.0, value.1)
    }
}

impl<V: Clone> From<&(V, V)> for Edge<V> {
    fn from(value: &(V, V)) -> Self {
        Edge(value.0.clone(), value.1.clone())
    }
}

/// An edge whose equality and hash ignore the orientation: `{u, v} == {v, u}`.
///
/// The stored orientation is kept so `source`/`target` still return the endpoints in the
/// order they were given.
#[derive(Copy, Clone, Debug)]
pub struct UndirectedEdge<V>(pub V, pub V);

impl<V: Vertex + Ord> UndirectedEdge<V> {
    /// Returns the edge with the smaller endpoint first
    pub fn normalized(&self) -> Self {
        if self.0 <= self.1 {
            self.clone()
        } else {
            UndirectedEdge(self.1.clone(), self.0.clone())
        }
    }

    /// Returns *true* if the smaller endpoint comes first
    pub fn is_normalized(&self) -> bool {
        self.0 <= self.1
    }
}

impl<V: PartialEq> PartialEq for UndirectedEdge<V> {
    fn eq(&self, other: &Self) -> bool {
        (self.0 == other.0 && self.1 == other.1) || (self.0 == other.1 && self.1 == other.0)
    }
}

impl<V: Eq> Eq for UndirectedEdge<V> {}

impl<V: Hash> Hash for UndirectedEdge<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Order-independent combination of both endpoint hashes
        let single = |v: &V| {
            let mut h = fxhash::FxHasher::default();
            v.hash(&mut h);
            h.finish()
        };
        let (a, b) = (single(&self.0), single(&self.1));
        (a.min(b), a.max(b)).hash(state);
    }
}

impl<V: Vertex> GraphEdge<V> for UndirectedEdge<V> {
    fn source(&self) -> &V {
        &self.0
    }

    fn target(&self) -> &V {
        &self.1
    }
}

impl<V> From<(V, V)> for UndirectedEdge<V> {
    fn from(value: (V, V)) -> Self {
        UndirectedEdge(value.0, value.1)
    }
}

/// An edge carrying a mutable tag.
///
/// [`TaggedEdge::set_tag`] fires [`TaggedEdge::tag_changed`] with the new tag, but only if
/// the value actually changed. Clones start without listeners.
pub struct TaggedEdge<V, T> {
    source: V,
    target: V,
    tag: T,
    tag_changed: Event<T>,
}

impl<V, T> TaggedEdge<V, T>
where
    T: PartialEq + 'static,
{
    pub fn new(source: V, target: V, tag: T) -> Self {
        Self {
            source,
            target,
            tag,
            tag_changed: Event::new(),
        }
    }

    /// Returns the current tag
    pub fn tag(&self) -> &T {
        &self.tag
    }

    /// Replaces the tag and notifies listeners if the value differs from the old one
    pub fn set_tag(&mut self, tag: T) {
        if self.tag == tag {
            return;
        }
        self.tag = tag;
        self.tag_changed.fire(&self.tag);
    }

    /// Event fired with the new tag after every effective [`TaggedEdge::set_tag`]
    pub fn tag_changed(&self) -> &Event<T> {
        &self.tag_changed
    }
}

impl<V: Clone, T: Clone + PartialEq + 'static> Clone for TaggedEdge<V, T> {
    fn clone(&self) -> Self {
        Self::new(self.source.clone(), self.target.clone(), self.tag.clone())
    }
}

impl<V: PartialEq, T: PartialEq> PartialEq for TaggedEdge<V, T> {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.target == other.target && self.tag == other.tag
    }
}

impl<V: Eq, T: Eq> Eq for TaggedEdge<V, T> {}

impl<V: Hash, T: Hash> Hash for TaggedEdge<V, T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source.hash(state);
        self.target.hash(state);
        self.tag.hash(state);
    }
}

impl<V: Debug, T: Debug> Debug for TaggedEdge<V, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:?},{:?})[{:?}]", self.source, self.target, self.tag)
    }
}

impl<V, T> GraphEdge<V> for TaggedEdge<V, T>
where
    V: Vertex,
    T: Clone + Eq + Hash + 'static,
{
    fn source(&self) -> &V {
        &self.source
    }

    fn target(&self) -> &V {
        &self.target
    }
}

/// An edge between two terminals of multi-port vertices.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct TermEdge<V> {
    source: V,
    target: V,
    source_terminal: usize,
    target_terminal: usize,
}

impl<V> TermEdge<V> {
    pub fn new(source: V, target: V, source_terminal: usize, target_terminal: usize) -> Self {
        Self {
            source,
            target,
            source_terminal,
            target_terminal,
        }
    }

    /// Creates an edge between the terminals `0` of both vertices
    pub fn with_default_terminals(source: V, target: V) -> Self {
        Self::new(source, target, 0, 0)
    }

    pub fn source_terminal(&self) -> usize {
        self.source_terminal
    }

    pub fn target_terminal(&self) -> usize {
        self.target_terminal
    }
}

impl<V: Vertex> GraphEdge<V> for TermEdge<V> {
    fn source(&self) -> &V {
        &self.source
    }

    fn target(&self) -> &V {
        &self.target
    }
}

/// A chain of edges condensed into a single edge from the source of the first edge to the
/// target of the last one.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct MergedEdge<V, E> {
    source: V,
    target: V,
    edges: Vec<E>,
}

impl<V, E> MergedEdge<V, E>
where
    V: Vertex,
    E: GraphEdge<V>,
{
    /// Creates an empty chain between `source` and `target`
    pub fn new(source: V, target: V) -> Self {
        Self {
            source,
            target,
            edges: Vec::new(),
        }
    }

    /// Wraps a single edge
    pub fn from_edge(edge: E) -> Self {
        Self {
            source: edge.source().clone(),
            target: edge.target().clone(),
            edges: vec![edge],
        }
    }

    /// Replaced edges in chain order
    pub fn edges(&self) -> &[E] {
        &self.edges
    }

    /// Mutable access to the replaced edges
    pub fn edges_mut(&mut self) -> &mut Vec<E> {
        &mut self.edges
    }

    /// Concatenates `incoming` (ending at some vertex `x`) and `outgoing` (starting at `x`)
    /// into a chain from `incoming.source` to `outgoing.target`.
    pub fn merge(incoming: &Self, outgoing: &Self) -> Self {
        let mut edges = Vec::with_capacity(incoming.edges.len() + outgoing.edges.len());
        edges.extend(incoming.edges.iter().cloned());
        edges.extend(outgoing.edges.iter().cloned());

        Self {
            source: incoming.source.clone(),
            target: outgoing.target.clone(),
            edges,
        }
    }
}

impl<V, E> GraphEdge<V> for MergedEdge<V, E>
where
    V: Vertex,
    E: GraphEdge<V>,
{
    fn source(&self) -> &V {
        &self.source
    }

    fn target(&self) -> &V {
        &self.target
    }
}
