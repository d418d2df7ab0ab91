use fxhash::FxHashMap;
use tracing::debug;

use crate::{edge::GraphEdge, error::*, events::Event, ops::*, vertex::Vertex};

/// Pairs every edge of a graph with an edge in the opposite direction.
///
/// Existing opposite edges are reused; missing ones are created by an edge factory and added
/// to the graph until [`ReversedEdgeAugmentor::remove_reversed_edges`] takes them out again.
/// Self-loops are their own reverse.
pub struct ReversedEdgeAugmentor<V, E> {
    reversed_edges: FxHashMap<E, E>,
    augmented_edges: Vec<E>,
    augmented: bool,
    reversed_edge_added: Event<E>,
    _vertex: std::marker::PhantomData<V>,
}

impl<V: Vertex, E: GraphEdge<V>> Default for ReversedEdgeAugmentor<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Vertex, E: GraphEdge<V>> ReversedEdgeAugmentor<V, E> {
    pub fn new() -> Self {
        Self {
            reversed_edges: FxHashMap::default(),
            augmented_edges: Vec::new(),
            augmented: false,
            reversed_edge_added: Event::new(),
            _vertex: Default::default(),
        }
    }

    /// Maps every edge to its reverse; complete while augmented
    pub fn reversed_edges(&self) -> &FxHashMap<E, E> {
        &self.reversed_edges
    }

    /// Edges added by the augmentation
    pub fn augmented_edges(&self) -> &[E] {
        &self.augmented_edges
    }

    pub fn is_augmented(&self) -> bool {
        self.augmented
    }

    /// Fired for every edge added to the graph
    pub fn reversed_edge_added(&self) -> &Event<E> {
        &self.reversed_edge_added
    }

    /// Adds a reversed edge for every edge of `graph` that has none yet.
    ///
    /// Fails with `InvalidOperation` if the graph is already augmented and with
    /// `ParallelEdgeNotAllowed` if the graph rejects a new edge.
    pub fn add_reversed_edges<G, F>(&mut self, graph: &mut G, mut edge_factory: F) -> Result<()>
    where
        G: MutableGraph<Vertex = V, Edge = E> + IncidenceGraph,
        F: FnMut(&V, &V) -> E,
    {
        if self.augmented {
            return Err(GraphError::invalid_operation("graph is already augmented"));
        }

        self.reversed_edges.clear();
        self.augmented_edges.clear();

        let mut missing = Vec::new();
        for edge in graph.edges() {
            if self.reversed_edges.contains_key(&edge) {
                continue;
            }
            match graph.try_get_edge(edge.target(), edge.source()) {
                Some(reversed) => {
                    self.reversed_edges.insert(edge, reversed);
                }
                None => missing.push(edge),
            }
        }

        self.augmented = true;
        for edge in missing {
            let reversed = edge_factory(edge.target(), edge.source());
            if !graph.add_edge(reversed.clone())? {
                return Err(GraphError::ParallelEdgeNotAllowed);
            }
            self.reversed_edges.insert(edge.clone(), reversed.clone());
            self.reversed_edges.insert(reversed.clone(), edge);
            self.reversed_edge_added.fire(&reversed);
            self.augmented_edges.push(reversed);
        }

        debug!(added = self.augmented_edges.len(), "added reversed edges");
        Ok(())
    }

    /// Removes all edges added by [`ReversedEdgeAugmentor::add_reversed_edges`].
    ///
    /// Fails with `InvalidOperation` if the graph is not augmented.
    pub fn remove_reversed_edges<G>(&mut self, graph: &mut G) -> Result<()>
    where
        G: MutableGraph<Vertex = V, Edge = E>,
    {
        if !self.augmented {
            return Err(GraphError::invalid_operation("graph is not augmented"));
        }

        for edge in self.augmented_edges.drain(..) {
            graph.remove_edge(&edge);
        }
        self.reversed_edges.clear();
        self.augmented = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::{edge::Edge, repr::AdjacencyGraph};

    #[test]
    fn adds_only_missing_reverses() {
        let mut graph =
            AdjacencyGraph::<u32, Edge<u32>>::from_edges([Edge(0, 1), Edge(1, 0), Edge(1, 2)]);
        let mut augmentor = ReversedEdgeAugmentor::new();

        let added = Rc::new(RefCell::new(Vec::new()));
        let log = added.clone();
        let _sub = augmentor
            .reversed_edge_added()
            .subscribe(move |e: &Edge<u32>| log.borrow_mut().push(*e));

        augmentor
            .add_reversed_edges(&mut graph, |s, t| Edge(*s, *t))
            .unwrap();

        assert!(augmentor.is_augmented());
        assert_eq!(augmentor.augmented_edges(), &[Edge(2, 1)]);
        assert_eq!(*added.borrow(), vec![Edge(2, 1)]);
        assert_eq!(graph.edge_count(), 4);

        let reversed = augmentor.reversed_edges();
        assert_eq!(reversed.len(), 4);
        for (edge, reverse) in reversed {
            assert_eq!(edge.reversed(), *reverse);
            assert_eq!(reversed[reverse], *edge);
        }

        assert!(matches!(
            augmentor.add_reversed_edges(&mut graph, |s, t| Edge(*s, *t)),
            Err(GraphError::InvalidOperation(_))
        ));

        augmentor.remove_reversed_edges(&mut graph).unwrap();
        assert!(!augmentor.is_augmented());
        assert!(augmentor.reversed_edges().is_empty());
        assert_eq!(graph.edge_count(), 3);
        assert!(!graph.contains_edge(&Edge(2, 1)));

        assert!(matches!(
            augmentor.remove_reversed_edges(&mut graph),
            Err(GraphError::InvalidOperation(_))
        ));
    }

    #[test]
    fn self_loops_are_their_own_reverse() {
        let mut graph = AdjacencyGraph::<u32, Edge<u32>>::from_edges([Edge(3, 3)]);
        let mut augmentor = ReversedEdgeAugmentor::new();
        augmentor
            .add_reversed_edges(&mut graph, |s, t| Edge(*s, *t))
            .unwrap();

        assert!(augmentor.augmented_edges().is_empty());
        assert_eq!(augmentor.reversed_edges()[&Edge(3, 3)], Edge(3, 3));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn rejected_edge_keeps_augmentation_removable() {
        let mut graph = AdjacencyGraph::<u32, Edge<u32>>::from_edges([Edge(0, 1), Edge(2, 3)]);
        let mut augmentor = ReversedEdgeAugmentor::new();

        // The first reverse duplicates an existing edge and is rejected
        let result = augmentor.add_reversed_edges(&mut graph, |_, _| Edge(0, 1));
        assert_eq!(result, Err(GraphError::ParallelEdgeNotAllowed));
        assert!(augmentor.is_augmented());

        augmentor.remove_reversed_edges(&mut graph).unwrap();
        assert_eq!(graph.edge_count(), 2);
    }
}
