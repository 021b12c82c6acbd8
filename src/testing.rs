/// Installs a test logger once; later calls are no-ops. Run tests with `RUST_LOG=debug` to see
/// the algorithms' log output.
#[cfg(test)]
pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Every graph kind should keep its adjacency consistent under random edits
macro_rules! test_graph_ops {
    ($env:ident, $kind:expr, ($($trait:ident),*)) => {
        #[cfg(test)]
        mod $env {
            use crate::{prelude::*, testing::test_graph_ops};
            use fxhash::FxHashMap;
            use rand::{Rng, SeedableRng};
            use rand_pcg::Pcg64Mcg;

            type Model = FxHashMap<(NodeIndex, NodeIndex), NumEdges>;

            fn key(u: NodeIndex, v: NodeIndex) -> (NodeIndex, NodeIndex) {
                if $kind.is_directed() { (u, v) } else { (u.min(v), u.max(v)) }
            }

            /// Applies random insertions / removals on nodes `0..n` to a graph and to a model
            /// counting the edges between every pair
            fn random_graph<R: Rng>(rng: &mut R, n: NodeIndex, ops: usize) -> (AdjGraph<NodeIndex>, Model) {
                let mut graph = AdjGraph::new($kind);
                graph.add_nodes_from(0..n);
                let mut model = Model::default();

                for _ in 0..ops {
                    let u = rng.random_range(0..n);
                    let v = rng.random_range(0..n);
                    let count = model.entry(key(u, v)).or_default();

                    if rng.random_bool(0.7) {
                        graph.add_edge(u, v);
                        if $kind.is_multigraph() || *count == 0 {
                            *count += 1;
                        }
                    } else if *count > 0 {
                        assert!(graph.remove_edge(&u, &v).is_ok());
                        *count -= 1;
                    } else {
                        assert!(graph.remove_edge(&u, &v).is_err());
                    }
                }

                model.retain(|_, c| *c > 0);
                graph.assert_invariants();
                (graph, model)
            }

            $(
                test_graph_ops!($kind => $trait);
            )*
        }
    };
    ($kind:expr => AdjacencyList) => {
        #[test]
        fn test_adjacency_list() {
            let rng = &mut Pcg64Mcg::seed_from_u64(3);

            for n in [5, 20, 50] {
                for ops in [n as usize, 5 * n as usize, 20 * n as usize] {
                    let (graph, model) = random_graph(rng, n, ops);

                    assert_eq!(graph.number_of_nodes(), n);
                    assert_eq!(graph.number_of_edges(), model.values().sum::<NumEdges>());

                    for u in 0..n {
                        let mut degree = 0;
                        for (&(a, b), &c) in &model {
                            if a == u {
                                degree += c;
                            }
                            if b == u {
                                degree += c;
                            }
                        }
                        assert_eq!(graph.degree(&u), Ok(degree));

                        for v in graph.neighbors_of(u) {
                            assert!(model.contains_key(&key(u, v)));
                        }
                        assert_eq!(
                            graph.number_of_neighbors(u) as usize,
                            model.keys().filter(|&&(a, b)| a == u || (!$kind.is_directed() && b == u)).count()
                        );
                    }
                }
            }
        }
    };
    ($kind:expr => DirectedAdjacencyList) => {
        #[test]
        fn test_directed_adjacency_list() {
            assert!($kind.is_directed());
            let rng = &mut Pcg64Mcg::seed_from_u64(3);

            for n in [5, 20, 50] {
                let (graph, model) = random_graph(rng, n, 10 * n as usize);

                for u in 0..n {
                    let expected: NumEdges = model
                        .iter()
                        .filter(|&(&(_, b), _)| b == u)
                        .map(|(_, &c)| c)
                        .sum();
                    assert_eq!(graph.in_degree(&u), Ok(expected));

                    for w in graph.in_neighbors_of(u) {
                        assert!(graph.has_edge_between(w, u));
                        assert!(model.contains_key(&(w, u)));
                    }
                }
            }
        }
    };
    ($kind:expr => EdgeList) => {
        #[test]
        fn test_edge_list() {
            let rng = &mut Pcg64Mcg::seed_from_u64(4);

            for n in [5, 20, 50] {
                let (graph, model) = random_graph(rng, n, 10 * n as usize);

                assert_eq!(graph.edge_refs().count() as NumEdges, graph.number_of_edges());
                for e in graph.edge_refs() {
                    assert!(model.contains_key(&key(e.source, e.target)));
                }

                for u in 0..n {
                    for v in 0..n {
                        let c = model.get(&key(u, v)).copied().unwrap_or(0);
                        assert_eq!(graph.number_of_edges_between(&u, &v), c);
                        assert_eq!(graph.has_edge(&u, &v), c > 0);
                    }
                }
            }
        }
    };
}

pub(crate) use test_graph_ops;
