/*!
# Vertex Representation

Vertices are opaque, user supplied identities. Any type that can be cloned, compared for
equality and hashed can act as a vertex: integers, strings, small structs or handles into
some external arena.

Vertices never carry data themselves; algorithms keep their per-vertex state in maps keyed
by the vertex (see [`VertexMap`]).
*/

use std::hash::Hash;

use fxhash::{FxHashMap, FxHashSet};

/// Identity bound for vertices. Implemented for every `Clone + Eq + Hash` type.
pub trait Vertex: Clone + Eq + Hash {}

impl<T> Vertex for T where T: Clone + Eq + Hash {}

/// Per-vertex state map used by algorithms
pub type VertexMap<V, T> = FxHashMap<V, T>;

/// Set of vertices
pub type VertexSetOf<V> = FxHashSet<V>;

/// Produces fresh vertices on demand, e.g. the super source and super sink of a flow
/// augmentation. Every call must return a vertex not yet present in the graph.
pub type VertexFactory<V> = Box<dyn FnMut() -> V>;

/// Coloring used by traversals and the cycle-popping random tree:
/// - `White`: not yet seen
/// - `Gray`: discovered but not finished
/// - `Black`: finished (for random trees: part of the tree)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GraphColor {
    #[default]
    White,
    Gray,
    Black,
}
