/*!
# Utilities

Small helpers shared by graph stores and algorithms:
- [`IndexedSet`]: insertion ordered set with O(1) position lookup, the vertex index of the
  adjacency stores,
- [`try_get_path`]: predecessor map walk shared by shortest paths and recorder observers.
*/

use crate::{edge::GraphEdge, vertex::*};

pub mod set;

pub use set::IndexedSet;

/// Follows `predecessors` (vertex -> incoming tree edge) backwards from `target` and returns
/// the edges of the path in forward order. Returns `None` if `target` has no predecessor.
///
/// A cyclic predecessor map stops after every vertex was visited once.
pub fn try_get_path<V, E>(predecessors: &VertexMap<V, E>, target: &V) -> Option<Vec<E>>
where
    V: Vertex,
    E: GraphEdge<V>,
{
    let mut path = Vec::new();
    let mut current = target;
    while let Some(edge) = predecessors.get(current) {
        if path.len() > predecessors.len() {
            break;
        }
        path.push(edge.clone());
        current = edge.source();
        if current == target {
            break;
        }
    }

    if path.is_empty() {
        return None;
    }
    path.reverse();
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::Edge;

    #[test]
    fn path_from_predecessors() {
        let mut preds = VertexMap::default();
        preds.insert(1, Edge(0, 1));
        preds.insert(2, Edge(1, 2));
        preds.insert(3, Edge(2, 3));

        assert_eq!(
            try_get_path(&preds, &3),
            Some(vec![Edge(0, 1), Edge(1, 2), Edge(2, 3)])
        );
        assert_eq!(try_get_path(&preds, &0), None);
    }

    #[test]
    fn cyclic_predecessors_terminate() {
        let mut preds = VertexMap::default();
        preds.insert(1, Edge(2, 1));
        preds.insert(2, Edge(1, 2));

        let path = try_get_path(&preds, &1).unwrap();
        assert!(path.len() <= 3);
    }
}
