/*!
# Topological Sort

[`SourceFirstTopologicalSort`] repeatedly removes a vertex with in-degree zero. All vertices
sit in a [`BinaryQueue`] keyed by their remaining in-degree; whenever a vertex is removed,
the in-degrees of its out-neighbors are decremented and their queue positions refreshed.
If the minimum remaining in-degree is not zero, the graph contains a cycle.
*/

use super::framework::*;
use crate::{
    collections::BinaryQueue,
    edge::GraphEdge,
    error::*,
    events::Event,
    ops::*,
    vertex::*,
};

/// Source first topological sort on a directed graph
pub struct SourceFirstTopologicalSort<'a, G>
where
    G: GraphType,
{
    graph: &'a G,
    core: AlgorithmCore,
    sorted_vertices: Vec<G::Vertex>,
    in_degrees: VertexMap<G::Vertex, usize>,
    vertex_added: Event<G::Vertex>,
}

impl<'a, G> SourceFirstTopologicalSort<'a, G>
where
    G: VertexSet + EdgeSet + ImplicitGraph,
{
    pub fn new(graph: &'a G, cancel: CancelHandle) -> Self {
        Self {
            graph,
            core: AlgorithmCore::new(cancel),
            sorted_vertices: Vec::new(),
            in_degrees: VertexMap::default(),
            vertex_added: Event::new(),
        }
    }

    /// Vertices in topological order (complete only after a finished computation)
    pub fn sorted_vertices(&self) -> &[G::Vertex] {
        &self.sorted_vertices
    }

    /// Remaining in-degrees; all zero after a finished computation
    pub fn in_degrees(&self) -> &VertexMap<G::Vertex, usize> {
        &self.in_degrees
    }

    /// Fired whenever a vertex is appended to the sorted list
    pub fn vertex_added(&self) -> &Event<G::Vertex> {
        &self.vertex_added
    }

    fn in_degree(&self, vertex: &G::Vertex) -> usize {
        self.in_degrees.get(vertex).copied().unwrap_or(0)
    }
}

impl<G> Algorithm for SourceFirstTopologicalSort<'_, G>
where
    G: VertexSet + EdgeSet + ImplicitGraph,
{
    fn core(&self) -> &AlgorithmCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AlgorithmCore {
        &mut self.core
    }

    fn initialize(&mut self) -> Result<()> {
        let graph = self.graph;
        self.sorted_vertices.clear();
        self.in_degrees.clear();

        for v in graph.vertices() {
            self.in_degrees.insert(v, 0);
        }
        for edge in graph.edges() {
            if edge.is_self_edge() {
                return Err(GraphError::NonAcyclicGraph);
            }
            *self.in_degrees.entry(edge.target().clone()).or_insert(0) += 1;
        }
        Ok(())
    }

    fn internal_compute(&mut self) -> Result<()> {
        let graph = self.graph;

        let mut queue = BinaryQueue::with_capacity(graph.vertex_count());
        for v in graph.vertices() {
            queue.enqueue(v, |v| self.in_degree(v));
        }

        while let Some(&degree) = queue.peek_priority() {
            if self.is_cancelling() {
                return Ok(());
            }
            if degree != 0 {
                return Err(GraphError::NonAcyclicGraph);
            }
            let vertex = queue.dequeue()?;
            self.vertex_added.fire(&vertex);

            for edge in graph.out_edges(&vertex) {
                let target = edge.target();
                if let Some(d) = self.in_degrees.get_mut(target) {
                    *d = d.saturating_sub(1);
                }
                queue.update(target, |v| self.in_degree(v));
            }
            self.sorted_vertices.push(vertex);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use itertools::Itertools;
    use rand::{Rng, SeedableRng, seq::SliceRandom};
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::{edge::Edge, repr::AdjacencyGraph};

    type Graph = AdjacencyGraph<u32, Edge<u32>>;

    fn sort(graph: &Graph) -> Result<Vec<u32>> {
        let mut sort = SourceFirstTopologicalSort::new(graph, NeverCancel::handle());
        sort.compute()?;
        Ok(sort.sorted_vertices().to_vec())
    }

    #[test]
    fn chain_and_events() {
        let graph = Graph::from_edges([Edge(3, 1), Edge(1, 2), Edge(2, 0)]);
        let mut sort = SourceFirstTopologicalSort::new(&graph, NeverCancel::handle());

        let added = Rc::new(RefCell::new(Vec::new()));
        let log = added.clone();
        let _sub = sort
            .vertex_added()
            .subscribe(move |v| log.borrow_mut().push(*v));

        sort.compute().unwrap();
        assert_eq!(sort.sorted_vertices(), &[3, 1, 2, 0]);
        assert_eq!(*added.borrow(), vec![3, 1, 2, 0]);
        assert!(sort.in_degrees().values().all(|&d| d == 0));
    }

    #[test]
    fn cycles_are_rejected() {
        let graph = Graph::from_edges([Edge(0, 1), Edge(1, 1)]);
        assert_eq!(sort(&graph), Err(GraphError::NonAcyclicGraph));

        let graph = Graph::from_edges([Edge(0, 1), Edge(1, 2), Edge(2, 1)]);
        let mut sort = SourceFirstTopologicalSort::new(&graph, NeverCancel::handle());
        assert_eq!(sort.compute(), Err(GraphError::NonAcyclicGraph));
        assert_eq!(sort.state(), ComputationState::Aborted);
        assert_eq!(sort.sorted_vertices(), &[0]);
    }

    #[test]
    fn empty_graph() {
        assert_eq!(sort(&Graph::new(false)), Ok(vec![]));
    }

    #[test]
    fn random_dags() {
        let rng = &mut Pcg64Mcg::seed_from_u64(7);
        for _ in 0..50 {
            let n = rng.random_range(1..30u32);
            let mut order = (0..n).collect_vec();
            order.shuffle(rng);

            let edges = (0..rng.random_range(0..3 * n))
                .filter_map(|_| {
                    let i = rng.random_range(0..n as usize);
                    let j = rng.random_range(0..n as usize);
                    (i < j).then(|| Edge(order[i], order[j]))
                })
                .unique()
                .collect_vec();

            let mut graph = Graph::new(false);
            graph.add_vertex_range(0..n);
            graph.add_edge_range(edges.iter().cloned()).unwrap();

            let sorted = sort(&graph).unwrap();
            assert_eq!(sorted.len(), n as usize);
            let position = |v: u32| sorted.iter().position(|&x| x == v).unwrap();
            for Edge(u, v) in edges {
                assert!(position(u) < position(v));
            }
        }
    }

    #[test]
    fn cancellation() {
        let graph = Graph::from_edges([Edge(0, 1), Edge(1, 2)]);
        let flag = CancelFlag::new();
        let mut sort = SourceFirstTopologicalSort::new(&graph, flag.handle());

        let trigger = flag.clone();
        let _sub = sort.vertex_added().subscribe(move |_| trigger.cancel());
        sort.compute().unwrap();

        assert_eq!(sort.state(), ComputationState::Aborted);
        assert_eq!(sort.sorted_vertices(), &[0]);
    }
}
