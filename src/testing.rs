/// Generates the shared capability tests for a graph representation.
///
/// `test_graph_ops!(module, Graph, EdgeType, undirected, (Capability, ...))` instantiates
/// `Graph<u32, EdgeType<u32>>` and checks every listed capability against a plain edge
/// list on random graphs.
macro_rules! test_graph_ops {
    ($env:ident, $graph:ident, $edge:ident, $undirected:literal, ($($trait:ident),*)) => {
        #[cfg(test)]
        mod $env {
            #[allow(unused_imports)]
            use crate::{edge::*, error::GraphError, ops::*, repr::*, testing::test_graph_ops};
            use rand::{Rng, SeedableRng};
            use rand_pcg::Pcg64Mcg;
            use itertools::Itertools;

            type G = $graph<u32, $edge<u32>>;

            /// Orientation-independent key for undirected graphs
            fn key(u: u32, v: u32) -> (u32, u32) {
                if $undirected {
                    (u.min(v), u.max(v))
                } else {
                    (u, v)
                }
            }

            /// Creates a list of at most `m_ub` distinct random edges for vertices `0..n`
            fn random_edges<R: Rng>(rng: &mut R, n: u32, m_ub: usize) -> Vec<(u32, u32)> {
                let mut edges = (0..m_ub)
                    .map(|_| key(rng.random_range(0..n), rng.random_range(0..n)))
                    .collect_vec();
                edges.sort_unstable();
                edges.dedup();
                edges
            }

            fn build(n: u32, edges: &[(u32, u32)]) -> G {
                let mut graph = G::new(false);
                assert_eq!(graph.add_vertex_range(0..n), n as usize);
                for &(u, v) in edges {
                    assert!(graph.add_edge($edge(u, v)).unwrap());
                }
                graph
            }

            /// Random graphs of several sizes and densities
            fn instances() -> Vec<(u32, Vec<(u32, u32)>)> {
                let rng = &mut Pcg64Mcg::seed_from_u64(3);
                let mut result = Vec::new();
                for n in [5u32, 10, 30] {
                    for m_ub in [n, 3 * n, 8 * n] {
                        for _ in 0..3 {
                            result.push((n, random_edges(rng, n, m_ub as usize)));
                        }
                    }
                }
                result
            }

            $(
                test_graph_ops!($graph<$edge, $undirected>: $trait);
            )*
        }
    };
    ($graph:ident<$edge:ident, $undirected:literal>: GraphNew) => {
        #[test]
        fn graph_new() {
            let graph = G::new(false);
            assert!(graph.is_vertices_empty());
            assert!(graph.is_edges_empty());
            assert_eq!(graph.is_directed(), !$undirected);
            assert!(!graph.allow_parallel_edges());
            assert!(G::new(true).allow_parallel_edges());
        }
    };
    ($graph:ident<$edge:ident, $undirected:literal>: VertexSet) => {
        #[test]
        fn vertex_set() {
            for (n, edges) in instances() {
                let graph = build(n, &edges);
                assert_eq!(graph.vertex_count(), n as usize);
                assert_eq!(graph.vertices().sorted().collect_vec(), (0..n).collect_vec());
                assert!((0..n).all(|u| graph.contains_vertex(&u)));
                assert!(!graph.contains_vertex(&n));
            }
        }
    };
    ($graph:ident<$edge:ident, $undirected:literal>: EdgeSet) => {
        #[test]
        fn edge_set() {
            for (n, edges) in instances() {
                let graph = build(n, &edges);
                assert_eq!(graph.edge_count(), edges.len());

                let got = graph
                    .edges()
                    .map(|e| key(*e.source(), *e.target()))
                    .sorted()
                    .collect_vec();
                assert_eq!(got, edges);

                for &(u, v) in &edges {
                    assert!(graph.contains_edge(&$edge(u, v)));
                }
                assert!(!graph.contains_edge(&$edge(n, 0)));
            }
        }
    };
    ($graph:ident<$edge:ident, $undirected:literal>: ImplicitGraph) => {
        #[test]
        fn implicit_graph() {
            for (n, edges) in instances() {
                let graph = build(n, &edges);
                for u in 0..n {
                    let targets = graph.out_edges(&u).map(|e| *e.target()).sorted().collect_vec();
                    let expected = edges
                        .iter()
                        .filter(|&&(x, _)| x == u)
                        .map(|&(_, y)| y)
                        .collect_vec();
                    assert_eq!(targets, expected);
                    assert_eq!(graph.out_degree(&u), expected.len());
                    assert_eq!(graph.is_out_edges_empty(&u), expected.is_empty());
                    assert_eq!(
                        graph.out_edge(&u, 0).map(|e| *e.source()),
                        (!expected.is_empty()).then_some(u)
                    );
                }
                assert!(graph.try_out_edges(&n).is_none());
            }
        }
    };
    ($graph:ident<$edge:ident, $undirected:literal>: IncidenceGraph) => {
        #[test]
        fn incidence_graph() {
            for (n, edges) in instances() {
                let graph = build(n, &edges);
                for u in 0..n {
                    for v in 0..n {
                        let present = edges.binary_search(&(u, v)).is_ok();
                        assert_eq!(graph.contains_edge_between(&u, &v), present);
                        assert_eq!(graph.try_get_edge(&u, &v).is_some(), present);
                        assert_eq!(
                            graph.try_get_edges(&u, &v).map(|es| es.len()),
                            Some(present as usize)
                        );
                    }
                }
                assert_eq!(graph.try_get_edges(&n, &0), None);
            }
        }
    };
    ($graph:ident<$edge:ident, $undirected:literal>: BidirectionalGraph) => {
        #[test]
        fn bidirectional_graph() {
            for (n, edges) in instances() {
                let graph = build(n, &edges);
                for v in 0..n {
                    let sources = graph.in_edges(&v).map(|e| *e.source()).sorted().collect_vec();
                    let expected = edges
                        .iter()
                        .filter(|&&(_, y)| y == v)
                        .map(|&(x, _)| x)
                        .sorted()
                        .collect_vec();
                    assert_eq!(sources, expected);
                    assert_eq!(graph.in_degree(&v), expected.len());
                    assert_eq!(graph.degree(&v), expected.len() + graph.out_degree(&v));
                }
            }
        }
    };
    ($graph:ident<$edge:ident, $undirected:literal>: UndirectedGraph) => {
        #[test]
        fn undirected_graph() {
            for (n, edges) in instances() {
                let graph = build(n, &edges);
                for u in 0..n {
                    let neighbors = graph
                        .adjacent_edges(&u)
                        .map(|e| *e.other_end(&u).unwrap())
                        .sorted()
                        .collect_vec();
                    let expected = edges
                        .iter()
                        .filter_map(|&(x, y)| {
                            if x == u {
                                Some(y)
                            } else if y == u {
                                Some(x)
                            } else {
                                None
                            }
                        })
                        .sorted()
                        .collect_vec();
                    assert_eq!(neighbors, expected);
                    assert_eq!(graph.adjacent_degree(&u), expected.len());
                }
            }
        }
    };
    ($graph:ident<$edge:ident, $undirected:literal>: MutableGraph) => {
        #[test]
        fn mutable_graph() {
            let rng = &mut Pcg64Mcg::seed_from_u64(3);
            for (n, mut edges) in instances() {
                let mut graph = build(n, &edges);
                let mut alive = (0..n).collect_vec();

                for _ in 0..n / 2 {
                    if rng.random_bool(0.5) && !edges.is_empty() {
                        let (u, v) = edges.remove(rng.random_range(0..edges.len()));
                        assert!(graph.remove_edge(&$edge(u, v)));
                        assert!(!graph.remove_edge(&$edge(u, v)));
                    } else {
                        let x = alive.swap_remove(rng.random_range(0..alive.len()));
                        assert!(graph.remove_vertex(&x));
                        assert!(!graph.remove_vertex(&x));
                        assert!(!graph.contains_vertex(&x));
                        edges.retain(|&(u, v)| u != x && v != x);
                    }

                    assert_eq!(graph.vertex_count(), alive.len());
                    assert_eq!(graph.edge_count(), edges.len());
                    let got = graph
                        .edges()
                        .map(|e| key(*e.source(), *e.target()))
                        .sorted()
                        .collect_vec();
                    assert_eq!(got, edges);
                }

                let loops = edges.iter().filter(|&&(u, v)| u == v).count();
                assert_eq!(graph.remove_edge_if(|e| e.is_self_edge()), loops);
                assert_eq!(graph.edge_count(), edges.len() - loops);

                let odd = alive.iter().filter(|&&u| u % 2 == 1).count();
                assert_eq!(graph.remove_vertex_if(|&u| u % 2 == 1), odd);
                assert!(graph.edges().all(|e| e.source() % 2 == 0 && e.target() % 2 == 0));

                graph.clear();
                assert!(graph.is_vertices_empty());
                assert!(graph.is_edges_empty());
            }
        }
    };
    ($graph:ident<$edge:ident, $undirected:literal>: ParallelEdges) => {
        #[test]
        fn parallel_edges() {
            let mut graph = G::new(false);
            graph.add_vertex_range([0, 1]);
            assert!(graph.add_edge($edge(0, 1)).unwrap());
            assert!(!graph.add_edge($edge(0, 1)).unwrap());
            assert_eq!(graph.add_edge($edge(0, 7)), Err(GraphError::VertexNotFound));
            assert_eq!(graph.edge_count(), 1);

            let mut graph = G::new(true);
            graph.add_vertex_range([0, 1]);
            assert!(graph.add_edge($edge(0, 1)).unwrap());
            assert!(graph.add_edge($edge(0, 1)).unwrap());
            assert_eq!(graph.edge_count(), 2);
            assert!(graph.remove_edge(&$edge(0, 1)));
            assert_eq!(graph.edge_count(), 1);

            let mut graph = G::new(false);
            assert!(graph.add_vertices_and_edge($edge(4, 5)).unwrap());
            assert_eq!(graph.vertex_count(), 2);
        }
    };
}

pub(crate) use test_graph_ops;
