use log::debug;

use super::*;

/// A single augmentation: the flow pushed along a shortest augmenting path
#[derive(Debug, Clone, PartialEq)]
pub struct Augmentation {
    /// Node indices of the residual network from source to sink
    pub path: Vec<NodeIndex>,
    pub amount: f64,
}

/// Edmonds-Karp maximum flow as an iterator over augmentations.
///
/// Each step finds a shortest augmenting path by a BFS over the arcs with positive residual
/// capacity and saturates its bottleneck. The iterator ends once the sink is unreachable; the
/// flow is then maximum and stored in [`ResidualNetwork::flow_value`].
///
/// # Examples
/// ```
/// use lgraphs::{prelude::*, algo::*};
///
/// let mut g = AdjGraph::digraph();
/// g.add_weighted_edges_from(
///     [("s", "a", 2.0), ("s", "b", 2.0), ("a", "t", 1.0), ("b", "t", 3.0), ("a", "b", 1.0)],
///     DEFAULT_CAPACITY,
/// );
///
/// let mut ek = EdmondsKarp::new(&g, &"s", &"t", DEFAULT_CAPACITY).unwrap();
/// let amounts: Vec<f64> = ek.by_ref().map(|aug| aug.unwrap().amount).collect();
/// assert_eq!(amounts, vec![1.0, 2.0, 1.0]);
/// assert_eq!(ek.flow_value(), 4.0);
/// ```
#[derive(Debug, Clone)]
pub struct EdmondsKarp<N: NodeId> {
    residual: ResidualNetwork<N>,
    source: NodeIndex,
    sink: NodeIndex,
    value: f64,
    augmentations: usize,
    done: bool,
}

impl<N: NodeId> EdmondsKarp<N> {
    /// Prepares a maximum flow computation on the residual network of `graph`.
    ///
    /// Fails with
    /// - `NotImplementedForKind` if `graph` is a multigraph,
    /// - `NotFound` if `source` or `sink` is missing,
    /// - `PointlessConcept` if `source == sink`,
    /// - `Unbounded` if an infinite-capacity path connects `source` to `sink`.
    pub fn new<G>(graph: &G, source: &N, sink: &N, capacity: &str) -> Result<Self>
    where
        G: EdgeList<NodeId = N>,
    {
        let residual = build_residual_network(graph, capacity)?;
        Self::from_residual(residual, source, sink)
    }

    /// Like [`EdmondsKarp::new`] on an existing residual network whose flow is kept
    pub fn from_residual(residual: ResidualNetwork<N>, source: &N, sink: &N) -> Result<Self> {
        let s = residual.try_index_of(source)?;
        let t = residual.try_index_of(sink)?;
        if s == t {
            return Err(GraphError::pointless(
                "source and sink are the same node",
            ));
        }
        detect_unboundedness(&residual, source, sink)?;

        let value = residual.excess(sink)?;
        Ok(Self {
            residual,
            source: s,
            sink: t,
            value,
            augmentations: 0,
            done: false,
        })
    }

    /// Value of the flow pushed so far
    pub fn flow_value(&self) -> f64 {
        self.value
    }

    /// Number of augmentations performed so far
    pub fn number_of_augmentations(&self) -> usize {
        self.augmentations
    }

    pub fn residual(&self) -> &ResidualNetwork<N> {
        &self.residual
    }

    /// Runs to completion and returns the residual network carrying a maximum flow
    pub fn run(mut self) -> Result<ResidualNetwork<N>> {
        for augmentation in self.by_ref() {
            augmentation?;
        }
        Ok(self.residual)
    }

    /// Shortest path of arcs with positive residual capacity from source to sink
    fn augmenting_path(&self) -> Option<Vec<EdgeIndex>> {
        let open = self.residual.filter_arcs(|arc| arc.residual() > 0.0);
        let parents = BFSWithPredecessor::new(&open, self.source)
            .stop_at(self.sink)
            .parent_array();

        if parents[self.sink as usize] == self.sink {
            return None;
        }

        let mut path = Vec::new();
        let mut v = self.sink;
        while v != self.source {
            let u = parents[v as usize];
            path.push(self.residual.arc_between(u, v)?);
            v = u;
        }
        path.reverse();
        Some(path)
    }

    fn finish(&mut self) {
        self.done = true;
        self.residual.flow_value = Some(self.value);
        debug!(
            "maximum flow of value {} after {} augmentations",
            self.value, self.augmentations
        );
    }
}

impl<N: NodeId> Iterator for EdmondsKarp<N> {
    type Item = Result<Augmentation>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let Some(arcs) = self.augmenting_path() else {
            self.finish();
            return None;
        };

        let amount = arcs
            .iter()
            .map(|&a| self.residual.arc(a).residual())
            .fold(f64::INFINITY, f64::min);

        for &a in &arcs {
            if let Err(e) = self.residual.push_flow_on(a, amount) {
                self.done = true;
                return Some(Err(e));
            }
        }

        self.value += amount;
        self.augmentations += 1;

        if self.value * 2.0 > self.residual.inf() {
            self.done = true;
            return Some(Err(GraphError::Unbounded(
                "infinite capacity path, flow unbounded above".to_string(),
            )));
        }

        let mut path = vec![self.source];
        path.extend(arcs.iter().map(|&a| self.residual.arc(a).head));
        Some(Ok(Augmentation { path, amount }))
    }
}

/// A minimum cut: its value and the partition `(reachable, non_reachable)` with the source on
/// the reachable side
pub type Cut<'a, N> = (f64, (Vec<&'a N>, Vec<&'a N>));

/// Maximum flows and minimum cuts on graphs whose edges carry capacities.
///
/// Capacities are read from the edge attribute `capacity` (usually [`DEFAULT_CAPACITY`]); a
/// missing attribute means infinite capacity.
pub trait MaxFlow: EdgeList + Sized {
    /// Returns the value of a maximum flow and the flow on every edge
    fn maximum_flow(
        &self,
        source: &Self::NodeId,
        sink: &Self::NodeId,
        capacity: &str,
    ) -> Result<(f64, FlowDict<Self::NodeId>)> {
        let residual = EdmondsKarp::new(self, source, sink, capacity)?.run()?;
        let value = residual.flow_value.unwrap_or_default();
        Ok((value, build_flow_dict(self, &residual)))
    }

    fn maximum_flow_value(
        &self,
        source: &Self::NodeId,
        sink: &Self::NodeId,
        capacity: &str,
    ) -> Result<f64> {
        let residual = EdmondsKarp::new(self, source, sink, capacity)?.run()?;
        Ok(residual.flow_value.unwrap_or_default())
    }

    /// Returns the value of a minimum `source`-`sink` cut and its partition. The sink side holds
    /// every node that can still reach the sink in the residual network of a maximum flow.
    ///
    /// # Examples
    /// ```
    /// use lgraphs::{prelude::*, algo::*};
    ///
    /// let mut g = AdjGraph::digraph();
    /// g.add_weighted_edges_from([("x", "a", 3.0), ("a", "b", 1.0), ("b", "y", 3.0)], DEFAULT_CAPACITY);
    ///
    /// let (value, (reachable, non_reachable)) = g.minimum_cut(&"x", &"y", DEFAULT_CAPACITY).unwrap();
    /// assert_eq!(value, 1.0);
    /// assert_eq!(reachable, vec![&"x", &"a"]);
    /// assert_eq!(non_reachable, vec![&"b", &"y"]);
    /// ```
    fn minimum_cut(
        &self,
        source: &Self::NodeId,
        sink: &Self::NodeId,
        capacity: &str,
    ) -> Result<Cut<'_, Self::NodeId>> {
        let residual = EdmondsKarp::new(self, source, sink, capacity)?.run()?;
        let value = residual.flow_value.unwrap_or_default();

        let open = residual.filter_arcs(|arc| arc.residual() > 0.0);
        let reversed = ReverseView::new(&open);
        let t = residual.try_index_of(sink)?;

        let mut reaches_sink = residual.vertex_bitset_unset();
        for u in reversed.bfs_from(t) {
            reaches_sink.set_bit(u);
        }

        let (non_reachable, reachable): (Vec<_>, Vec<_>) = self
            .vertices()
            .map(|u| self.node_id(u))
            .partition(|id| residual.index_of(id).is_some_and(|r| reaches_sink.get_bit(r)));

        Ok((value, (reachable, non_reachable)))
    }
}

impl<G> MaxFlow for G where G: EdgeList + Sized {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{attrs, gens::*, testing::init_logging};

    fn clrs() -> AdjGraph<&'static str> {
        let mut g = AdjGraph::digraph();
        g.add_weighted_edges_from(
            [
                ("s", "v1", 16.0),
                ("s", "v2", 13.0),
                ("v1", "v3", 12.0),
                ("v2", "v1", 4.0),
                ("v2", "v4", 14.0),
                ("v3", "v2", 9.0),
                ("v3", "t", 20.0),
                ("v4", "v3", 7.0),
                ("v4", "t", 4.0),
            ],
            DEFAULT_CAPACITY,
        );
        g
    }

    fn assert_conservation<N: NodeId>(r: &ResidualNetwork<N>, s: &N, t: &N) {
        for u in r.nodes() {
            if u != s && u != t {
                assert_eq!(r.excess(u), Ok(0.0), "{u:?}");
            }
        }
        for pair in r.arcs().collect_vec().chunks(2) {
            assert_eq!(pair[0].flow, -pair[1].flow);
            assert!(pair[0].flow <= pair[0].capacity && pair[1].flow <= pair[1].capacity);
        }
    }

    #[test]
    fn textbook_network() {
        init_logging();
        let g = clrs();

        let (value, flows) = g.maximum_flow(&"s", &"t", DEFAULT_CAPACITY).unwrap();
        assert_eq!(value, 23.0);
        assert_eq!(flows[&"s"].values().sum::<f64>(), 23.0);
        assert_eq!(flows[&"v3"][&"t"] + flows[&"v4"][&"t"], 23.0);

        let r = EdmondsKarp::new(&g, &"s", &"t", DEFAULT_CAPACITY)
            .unwrap()
            .run()
            .unwrap();
        assert_eq!(r.flow_value, Some(23.0));
        assert_eq!(r.excess(&"t"), Ok(23.0));
        assert_conservation(&r, &"s", &"t");

        let (cut, (reachable, non_reachable)) = g.minimum_cut(&"s", &"t", DEFAULT_CAPACITY).unwrap();
        assert_eq!(cut, 23.0);
        assert_eq!(reachable, vec![&"s", &"v1", &"v2", &"v4"]);
        assert_eq!(non_reachable, vec![&"v3", &"t"]);
    }

    #[test]
    fn shortest_paths_first() {
        let g = clrs();
        let mut ek = EdmondsKarp::new(&g, &"s", &"t", DEFAULT_CAPACITY).unwrap();

        let mut lengths = Vec::new();
        for aug in ek.by_ref() {
            lengths.push(aug.unwrap().path.len());
        }
        assert!(lengths.is_sorted());
        assert_eq!(ek.flow_value(), 23.0);
        assert_eq!(ek.number_of_augmentations(), lengths.len());
        assert_eq!(ek.next(), None);
    }

    #[test]
    fn undirected_flow() {
        let mut g = AdjGraph::graph();
        g.add_weighted_edges_from(
            [(0, 1, 3.0), (1, 2, 2.0), (0, 2, 1.0), (2, 3, 5.0)],
            DEFAULT_CAPACITY,
        );

        assert_eq!(g.maximum_flow_value(&0, &3, DEFAULT_CAPACITY), Ok(3.0));
        assert_eq!(g.maximum_flow_value(&3, &0, DEFAULT_CAPACITY), Ok(3.0));
    }

    #[test]
    fn disconnected_and_zero() {
        let mut g = AdjGraph::digraph();
        g.add_edge_with(0, 1, attrs! { "capacity" => 2 });
        g.add_edge_with(2, 3, attrs! { "capacity" => 2 });
        assert_eq!(g.maximum_flow_value(&0, &3, DEFAULT_CAPACITY), Ok(0.0));

        let (value, (reachable, non_reachable)) = g.minimum_cut(&0, &3, DEFAULT_CAPACITY).unwrap();
        assert_eq!(value, 0.0);
        assert_eq!(reachable, vec![&0, &1]);
        assert_eq!(non_reachable, vec![&2, &3]);
    }

    #[test]
    fn errors() {
        let g = clrs();
        let kind = |r: Result<f64>| r.err().map(|e| e.kind());

        assert_eq!(
            kind(g.maximum_flow_value(&"s", &"s", DEFAULT_CAPACITY)),
            Some(ErrorKind::PointlessConcept)
        );
        assert_eq!(
            kind(g.maximum_flow_value(&"s", &"z", DEFAULT_CAPACITY)),
            Some(ErrorKind::NotFound)
        );
        assert_eq!(
            kind(g.maximum_flow_value(&"s", &"t", "missing")),
            Some(ErrorKind::Unbounded)
        );

        let mut multi = AdjGraph::multidigraph();
        multi.add_edge(0, 1);
        assert_eq!(
            kind(multi.maximum_flow_value(&0, &1, DEFAULT_CAPACITY)),
            Some(ErrorKind::NotImplementedForKind)
        );
    }

    #[test]
    fn infinite_edges_off_the_cut() {
        let mut g = AdjGraph::digraph();
        g.add_edge("s", "a");
        g.add_edge_with("a", "t", attrs! { "capacity" => 5 });
        g.add_edge("a", "b");
        g.add_edge("b", "t");
        g.add_edge_with("s", "b", attrs! { "capacity" => 1 });
        assert_eq!(
            g.maximum_flow_value(&"s", &"t", DEFAULT_CAPACITY).err().map(|e| e.kind()),
            Some(ErrorKind::Unbounded)
        );

        let mut g = AdjGraph::digraph();
        g.add_edge("s", "a");
        g.add_edge_with("a", "t", attrs! { "capacity" => 5 });
        g.add_edge_with("s", "t", attrs! { "capacity" => 2 });
        assert_eq!(g.maximum_flow_value(&"s", &"t", DEFAULT_CAPACITY), Ok(7.0));
    }

    #[test]
    fn random_flows_match_cuts() {
        use rand::{Rng, SeedableRng};
        use rand_pcg::Pcg64Mcg;

        let rng = &mut Pcg64Mcg::seed_from_u64(42);
        for _ in 0..20 {
            let g = AdjGraph::gnp(rng, 30, 0.15, GraphKind::DIRECTED);
            let mut capacitated = AdjGraph::digraph();
            capacitated.add_nodes_from(g.nodes().copied());
            for (u, v) in g.edges() {
                capacitated.add_edge_with(*u, *v, attrs! { "capacity" => rng.random_range(1..10u32) });
            }

            let r = EdmondsKarp::new(&capacitated, &0, &29, DEFAULT_CAPACITY)
                .unwrap()
                .run()
                .unwrap();
            assert_conservation(&r, &0, &29);

            let (cut, (reachable, non_reachable)) =
                capacitated.minimum_cut(&0, &29, DEFAULT_CAPACITY).unwrap();
            assert_eq!(r.flow_value, Some(cut));
            assert!(reachable.contains(&&0) && non_reachable.contains(&&29));

            let crossing: f64 = capacitated
                .edge_refs()
                .filter(|e| {
                    reachable.contains(&capacitated.node_id(e.source))
                        && non_reachable.contains(&capacitated.node_id(e.target))
                })
                .map(|e| e.attrs.numeric(DEFAULT_CAPACITY).unwrap().unwrap())
                .sum();
            assert_eq!(crossing, cut);
        }
    }
}
