use itertools::Itertools;
use lgraphs::{algo::*, gens::*, prelude::*};
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

fn sorted<N: Ord + Clone>(nodes: Vec<&N>) -> Vec<N> {
    nodes.into_iter().cloned().sorted().collect()
}

#[test]
fn path_is_one_component_of_bridges() {
    let g = path_graph(4, GraphKind::UNDIRECTED);

    let components = g.connected_components().unwrap();
    assert_eq!(components.len(), 1);
    assert_eq!(sorted(components[0].clone()), vec![0, 1, 2, 3]);

    let bridges = g.bridges(None).unwrap();
    assert_eq!(bridges.len(), 3);
    for (u, v) in [(0, 1), (1, 2), (2, 3)] {
        assert!(bridges.iter().any(|&(a, b)| (*a, *b) == (u, v) || (*a, *b) == (v, u)));
    }
}

#[test]
fn cycle_has_no_bridges() {
    let g = cycle_graph(4, GraphKind::UNDIRECTED);
    assert!(g.bridges(None).unwrap().is_empty());
    assert_eq!(g.has_bridges(None), Ok(false));
}

#[test]
fn barbell_has_one_bridge() {
    let g = barbell_graph(10, 0).unwrap();
    let bridges = g.bridges(None).unwrap();

    assert_eq!(bridges.len(), 1);
    let (u, v) = bridges[0];
    assert_eq!((*u.min(v), *u.max(v)), (9, 10));
}

#[test]
fn successors_and_predecessors() {
    let mut g = AdjGraph::digraph();
    g.add_edge(1, 2);

    assert_eq!(g.successors(&1).unwrap().collect_vec(), vec![&2]);
    assert_eq!(g.predecessors(&2).unwrap().collect_vec(), vec![&1]);

    g.remove_node(&1).unwrap();
    assert_eq!(g.predecessors(&2).unwrap().count(), 0);
    assert!(g.successors(&1).is_err());
}

#[test]
fn residual_of_single_edge() {
    let mut g = AdjGraph::digraph();
    g.add_edge_with("s", "t", attrs! { "capacity" => 5 });
    g.add_edge_with("t", "x", attrs! { "capacity" => 1 });

    let mut r = build_residual_network(&g, DEFAULT_CAPACITY).unwrap();
    assert_eq!(r.flow(&"s", &"t"), Ok(0.0));
    assert_eq!(r.flow(&"t", &"s"), Ok(0.0));

    r.push_flow(&"s", &"t", 5.0).unwrap();
    assert_eq!(r.excess(&"s"), Ok(-5.0));
    assert_eq!(r.excess(&"t"), Ok(5.0));
    assert_eq!(r.excess(&"x"), Ok(0.0));
    assert_eq!(r.residual_capacity(&"s", &"t"), Ok(0.0));
    assert_eq!(r.residual_capacity(&"t", &"s"), Ok(5.0));
}

#[test]
fn connectivity_of_degenerate_graphs() {
    let null = AdjGraph::<u32>::graph();
    assert_eq!(
        null.is_connected().err().map(|e| e.kind()),
        Some(ErrorKind::PointlessConcept)
    );

    let isolated = empty_graph(3, GraphKind::UNDIRECTED);
    assert_eq!(isolated.is_connected(), Ok(false));
}

#[test]
fn components_partition_the_nodes() {
    let rng = &mut Pcg64Mcg::seed_from_u64(7);

    for p in [0.01, 0.03, 0.1] {
        let g = AdjGraph::gnp(rng, 100, p, GraphKind::UNDIRECTED);
        let flat = g
            .connected_components()
            .unwrap()
            .into_iter()
            .flatten()
            .copied()
            .sorted()
            .collect_vec();
        assert_eq!(flat, (0..100).collect_vec());
    }
}

#[test]
fn bridges_disconnect() {
    let rng = &mut Pcg64Mcg::seed_from_u64(8);

    for _ in 0..10 {
        let g = AdjGraph::gnp(rng, 40, 0.06, GraphKind::UNDIRECTED);
        let components = g.number_connected_components().unwrap();
        let bridges = g
            .bridges(None)
            .unwrap()
            .into_iter()
            .map(|(u, v)| (*u.min(v), *u.max(v)))
            .collect_vec();

        for (u, v) in g.edges().map(|(u, v)| (*u, *v)).collect_vec() {
            let mut h = g.copy();
            h.remove_edge(&u, &v).unwrap();
            let splits = h.number_connected_components().unwrap() > components;
            assert_eq!(splits, bridges.contains(&(u.min(v), u.max(v))), "({u}, {v})");
        }
    }
}

#[test]
fn transpose_and_round_trip() {
    let rng = &mut Pcg64Mcg::seed_from_u64(9);
    let g = AdjGraph::gnp(rng, 30, 0.2, GraphKind::DIRECTED);

    for (u, v) in g.edges() {
        assert!(g.successors(u).unwrap().contains(v));
        assert!(g.predecessors(v).unwrap().contains(u));
    }

    let h = AdjGraph::gnp(rng, 30, 0.2, GraphKind::UNDIRECTED);
    let round = h.to_undirected().to_directed();
    assert_eq!(round.nodes().collect_vec(), h.nodes().collect_vec());
    assert_eq!(round.number_of_edges(), 2 * h.number_of_edges());
    for (u, v) in h.edges() {
        assert!(round.has_edge(u, v) && round.has_edge(v, u));
    }
}

#[test]
fn flow_is_conserved() {
    let mut g = AdjGraph::digraph();
    g.add_weighted_edges_from(
        [
            (0, 1, 10.0),
            (0, 2, 10.0),
            (1, 2, 2.0),
            (1, 3, 4.0),
            (1, 4, 8.0),
            (2, 4, 9.0),
            (4, 3, 6.0),
            (3, 5, 10.0),
            (4, 5, 10.0),
        ],
        DEFAULT_CAPACITY,
    );

    let r = EdmondsKarp::new(&g, &0, &5, DEFAULT_CAPACITY)
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(r.flow_value, Some(19.0));
    for u in 1..5 {
        assert_eq!(r.excess(&u), Ok(0.0));
    }
    for (u, v) in g.edges() {
        assert_eq!(r.flow(u, v).unwrap(), -r.flow(v, u).unwrap());
    }
}
