/*!
# Residual Networks

Bookkeeping shared by augmenting-path flow algorithms.

The residual network `R` of a capacity graph `G` has the same nodes as `G` (in the same order)
and contains the pair of arcs `(u, v)` and `(v, u)` iff `(u, v)` is not a self-loop and at least
one of `(u, v)` and `(v, u)` exists in `G` with positive capacity. Arcs are stored in pairs:
arc `2i` and arc `2i + 1` are mates, and their flows always satisfy `flow(u, v) == -flow(v, u)`.

Infinite (or missing) capacities are replaced by a finite sentinel, three times the sum of all
finite capacities (or `1` if that sum is zero). The residual capacity of an infinite arc is thus
always at least `2/3` of the sentinel while finite arcs never exceed `1/3`, so moving more than a
third of the sentinel to the sink proves an infinite-capacity path.

```
use lgraphs::{prelude::*, algo::*};

let mut g = AdjGraph::digraph();
g.add_weighted_edges_from([("s", "t", 5.0)], DEFAULT_CAPACITY);

let mut r = build_residual_network(&g, DEFAULT_CAPACITY).unwrap();
r.push_flow(&"s", &"t", 5.0).unwrap();

assert_eq!(r.flow(&"t", &"s"), Ok(-5.0));
assert_eq!(r.excess(&"s"), Ok(-5.0));
assert_eq!(r.excess(&"t"), Ok(5.0));
```
*/

use std::slice::Iter;

use fxhash::FxHashMap;
use log::debug;

use super::*;

/// Attribute key under which capacities are looked up by default
pub const DEFAULT_CAPACITY: &str = "capacity";

/// Flow per edge of the capacity graph: `flow[u][v]`
pub type FlowDict<N> = FxHashMap<N, FxHashMap<N, f64>>;

/// A single arc of a [`ResidualNetwork`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResidualArc {
    pub tail: NodeIndex,
    pub head: NodeIndex,
    pub capacity: f64,
    pub flow: f64,
}

impl ResidualArc {
    /// Amount of flow that can still be pushed along the arc
    pub fn residual(&self) -> f64 {
        self.capacity - self.flow
    }
}

/// Residual network of a capacity graph; see the [module documentation](self).
///
/// The network is a simple directed graph and implements the graph traits of [`crate::ops`], so
/// every traversal runs on it directly.
#[derive(Debug, Clone)]
pub struct ResidualNetwork<N: NodeId> {
    ids: Vec<N>,
    index: FxHashMap<N, NodeIndex>,
    arcs: Vec<ResidualArc>,
    out: Vec<Vec<EdgeIndex>>,
    lookup: FxHashMap<(NodeIndex, NodeIndex), EdgeIndex>,
    inf: f64,
    /// Value of the flow computed by the last algorithm run on this network
    pub flow_value: Option<f64>,
    empty: AttrMap,
}

impl<N: NodeId> ResidualNetwork<N> {
    fn with_nodes(ids: Vec<N>, inf: f64) -> Self {
        let index = ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i as NodeIndex))
            .collect();
        let n = ids.len();

        Self {
            ids,
            index,
            arcs: Vec::new(),
            out: vec![Vec::new(); n],
            lookup: FxHashMap::default(),
            inf,
            flow_value: None,
            empty: AttrMap::new(),
        }
    }

    /// Installs the arc pair `(u, v)`, `(v, u)` or, if present, overwrites their capacities
    fn set_capacities(&mut self, u: NodeIndex, v: NodeIndex, forward: f64, backward: f64) {
        if let Some(&a) = self.lookup.get(&(u, v)) {
            self.arcs[a as usize].capacity = forward;
            self.arcs[mate(a) as usize].capacity = backward;
            return;
        }

        let a = self.arcs.len() as EdgeIndex;
        for (tail, head, capacity) in [(u, v, forward), (v, u, backward)] {
            let arc = self.arcs.len() as EdgeIndex;
            self.arcs.push(ResidualArc {
                tail,
                head,
                capacity,
                flow: 0.0,
            });
            self.out[tail as usize].push(arc);
            self.lookup.insert((tail, head), arc);
        }
        debug_assert_eq!(self.lookup[&(v, u)], mate(a));
    }

    /// The finite value standing in for infinite capacities
    pub fn inf(&self) -> f64 {
        self.inf
    }

    /// Returns *true* if the arc had infinite capacity in the capacity graph
    pub fn is_infinite(&self, arc: &ResidualArc) -> bool {
        arc.capacity == self.inf
    }

    /// All arcs; `arcs().nth(2i)` and `arcs().nth(2i + 1)` are mates
    pub fn arcs(&self) -> impl Iterator<Item = &ResidualArc> + '_ {
        self.arcs.iter()
    }

    /// Number of arcs (twice the number of arc pairs)
    pub fn number_of_arcs(&self) -> usize {
        self.arcs.len()
    }

    /// Index of the arc `u -> v`
    pub fn arc_between(&self, u: NodeIndex, v: NodeIndex) -> Option<EdgeIndex> {
        self.lookup.get(&(u, v)).copied()
    }

    /// The arc with index `a`
    /// ** Panics if `a` is not an arc index **
    pub fn arc(&self, a: EdgeIndex) -> &ResidualArc {
        &self.arcs[a as usize]
    }

    /// Indices of the arcs leaving `u`
    pub fn out_arcs(&self, u: NodeIndex) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.out[u as usize].iter().copied()
    }

    fn try_arc(&self, u: &N, v: &N) -> Result<EdgeIndex> {
        let (iu, iv) = (self.try_index_of(u)?, self.try_index_of(v)?);
        self.arc_between(iu, iv)
            .ok_or_else(|| GraphError::edge_not_found(u, v))
    }

    /// Pushes `amount` units along arc `a` and cancels them on its mate.
    /// Fails with `Unfeasible` if `amount` exceeds the residual capacity of `a`.
    pub fn push_flow_on(&mut self, a: EdgeIndex, amount: f64) -> Result<()> {
        let arc = self.arcs[a as usize];
        if amount.is_nan() || amount < 0.0 {
            return Err(GraphError::Algorithm(format!(
                "cannot push {amount} units of flow"
            )));
        }
        if amount > arc.residual() {
            return Err(GraphError::Unfeasible(format!(
                "pushing {amount} exceeds the residual capacity {} of arc ({}, {})",
                arc.residual(),
                arc.tail,
                arc.head
            )));
        }

        self.arcs[a as usize].flow += amount;
        self.arcs[mate(a) as usize].flow -= amount;
        Ok(())
    }

    /// Pushes `amount` units of flow from `u` to `v`
    pub fn push_flow(&mut self, u: &N, v: &N, amount: f64) -> Result<()> {
        let a = self.try_arc(u, v)?;
        self.push_flow_on(a, amount)
    }

    pub fn flow(&self, u: &N, v: &N) -> Result<f64> {
        Ok(self.arc(self.try_arc(u, v)?).flow)
    }

    pub fn capacity(&self, u: &N, v: &N) -> Result<f64> {
        Ok(self.arc(self.try_arc(u, v)?).capacity)
    }

    pub fn residual_capacity(&self, u: &N, v: &N) -> Result<f64> {
        Ok(self.arc(self.try_arc(u, v)?).residual())
    }

    /// Inflow minus outflow of `node`
    pub fn excess(&self, node: &N) -> Result<f64> {
        let u = self.try_index_of(node)?;
        Ok(-self.out_arcs(u).map(|a| self.arc(a).flow).sum::<f64>())
    }

    /// Resets the flow of every arc to zero
    pub fn clear_flow(&mut self) {
        for arc in &mut self.arcs {
            arc.flow = 0.0;
        }
        self.flow_value = None;
    }

    /// Adapter showing only the arcs for which `keep` holds
    pub fn filter_arcs<F>(&self, keep: F) -> ArcFilter<'_, N, F>
    where
        F: Fn(&ResidualArc) -> bool,
    {
        ArcFilter {
            residual: self,
            keep,
        }
    }
}

/// The mate of arc `a`
fn mate(a: EdgeIndex) -> EdgeIndex {
    a ^ 1
}

/// Builds the residual network of `graph` with zero flow, reading capacities from the edge
/// attribute `capacity`. Missing and infinite capacities become the sentinel.
///
/// Fails with `NotImplementedForKind` for multigraphs and with `AlgorithmError` if a capacity is
/// not numeric.
pub fn build_residual_network<G>(graph: &G, capacity: &str) -> Result<ResidualNetwork<G::NodeId>>
where
    G: EdgeList,
{
    graph.require_simple("build_residual_network")?;

    let dense: Vec<Option<NodeIndex>> = {
        let mut dense = vec![None; graph.node_bound() as usize];
        for (i, u) in graph.vertices().enumerate() {
            dense[u as usize] = Some(i as NodeIndex);
        }
        dense
    };
    let to_dense = |u: NodeIndex| dense[u as usize].unwrap_or(u);

    let mut edges = Vec::new();
    for e in graph.edge_refs() {
        if e.is_loop() {
            continue;
        }
        let cap = e.attrs.numeric(capacity)?.unwrap_or(f64::INFINITY);
        if cap > 0.0 {
            edges.push((to_dense(e.source), to_dense(e.target), cap));
        }
    }

    let finite: f64 = edges
        .iter()
        .map(|&(_, _, cap)| cap)
        .filter(|cap| cap.is_finite())
        .sum();
    let inf = if finite > 0.0 { 3.0 * finite } else { 1.0 };

    let mut residual = ResidualNetwork::with_nodes(graph.nodes().cloned().collect(), inf);
    let directed = graph.is_directed();
    for (u, v, cap) in edges {
        let r = cap.min(inf);
        if !directed {
            residual.set_capacities(u, v, r, r);
        } else if let Some(a) = residual.arc_between(u, v) {
            residual.arcs[a as usize].capacity = r;
        } else {
            residual.set_capacities(u, v, r, 0.0);
        }
    }

    debug!(
        "built residual network with {} nodes, {} arcs and sentinel {}",
        residual.number_of_nodes(),
        residual.number_of_arcs(),
        inf
    );
    Ok(residual)
}

/// Fails with `Unbounded` if `sink` is reachable from `source` on infinite-capacity arcs only
pub fn detect_unboundedness<N: NodeId>(residual: &ResidualNetwork<N>, source: &N, sink: &N) -> Result<()> {
    let s = residual.try_index_of(source)?;
    let t = residual.try_index_of(sink)?;

    let infinite = residual.filter_arcs(|arc| residual.is_infinite(arc));
    if s != t && BFS::new(&infinite, s).is_node_reachable(t) {
        debug!("infinite capacity path from {source:?} to {sink:?}");
        return Err(GraphError::Unbounded(
            "infinite capacity path, flow unbounded above".to_string(),
        ));
    }
    Ok(())
}

/// Reads the flow of every edge of `graph` off `residual`. Edges without positive flow get `0`.
pub fn build_flow_dict<G>(graph: &G, residual: &ResidualNetwork<G::NodeId>) -> FlowDict<G::NodeId>
where
    G: EdgeList,
{
    graph
        .vertices()
        .map(|u| {
            let id = graph.node_id(u);
            let mut flows: FxHashMap<_, _> = graph
                .neighbors_of(u)
                .map(|v| (graph.node_id(v).clone(), 0.0))
                .collect();

            if let Some(r) = residual.index_of(id) {
                for a in residual.out_arcs(r) {
                    let arc = residual.arc(a);
                    if arc.flow > 0.0 {
                        flows.insert(residual.node_id(arc.head).clone(), arc.flow);
                    }
                }
            }
            (id.clone(), flows)
        })
        .collect()
}

impl<N: NodeId> GraphType for ResidualNetwork<N> {
    fn kind(&self) -> GraphKind {
        GraphKind::DIRECTED
    }
}

impl<N: NodeId> GraphNodeOrder for ResidualNetwork<N> {
    type NodeId = N;

    fn node_bound(&self) -> NumNodes {
        self.ids.len() as NumNodes
    }

    fn number_of_nodes(&self) -> NumNodes {
        self.ids.len() as NumNodes
    }

    fn vertices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        0..self.node_bound()
    }

    fn contains_vertex(&self, u: NodeIndex) -> bool {
        u < self.node_bound()
    }

    fn node_id(&self, u: NodeIndex) -> &N {
        &self.ids[u as usize]
    }

    fn index_of(&self, id: &N) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }
}

/// Heads of a list of arcs
pub struct ArcEnds<'a> {
    arcs: &'a [ResidualArc],
    iter: Iter<'a, EdgeIndex>,
}

impl Iterator for ArcEnds<'_> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<NodeIndex> {
        let &a = self.iter.next()?;
        Some(self.arcs[a as usize].head)
    }
}

impl<N: NodeId> AdjacencyList for ResidualNetwork<N> {
    type NeighborIter<'a>
        = ArcEnds<'a>
    where
        Self: 'a;

    fn neighbors_of(&self, u: NodeIndex) -> ArcEnds<'_> {
        ArcEnds {
            arcs: &self.arcs,
            iter: self.out[u as usize].iter(),
        }
    }

    fn degree_of(&self, u: NodeIndex) -> NumEdges {
        2 * self.out_degree_of(u)
    }

    fn out_degree_of(&self, u: NodeIndex) -> NumEdges {
        self.out[u as usize].len() as NumEdges
    }
}

impl<N: NodeId> DirectedAdjacencyList for ResidualNetwork<N> {
    type InNeighborIter<'a>
        = ArcEnds<'a>
    where
        Self: 'a;

    // every arc `u -> v` has its mate `v -> u`
    fn in_neighbors_of(&self, u: NodeIndex) -> ArcEnds<'_> {
        self.neighbors_of(u)
    }

    fn in_degree_of(&self, u: NodeIndex) -> NumEdges {
        self.out_degree_of(u)
    }
}

impl<N: NodeId> AdjacencyTest for ResidualNetwork<N> {
    fn has_edge_between(&self, u: NodeIndex, v: NodeIndex) -> bool {
        self.lookup.contains_key(&(u, v))
    }
}

impl<N: NodeId> EdgeList for ResidualNetwork<N> {
    fn graph_attrs(&self) -> &AttrMap {
        &self.empty
    }

    fn node_attrs_of(&self, _u: NodeIndex) -> &AttrMap {
        &self.empty
    }

    fn edges_from(&self, u: NodeIndex) -> impl Iterator<Item = EdgeRef<'_>> + '_ {
        self.out_arcs(u).map(move |a| {
            let arc = self.arc(a);
            EdgeRef {
                source: arc.tail,
                target: arc.head,
                key: 0,
                attrs: &self.empty,
            }
        })
    }

    fn edges_into(&self, u: NodeIndex) -> impl Iterator<Item = EdgeRef<'_>> + '_ {
        self.edges_from(u).map(EdgeRef::reversed)
    }

    fn edges_between(&self, u: NodeIndex, v: NodeIndex) -> impl Iterator<Item = EdgeRef<'_>> + '_ {
        self.arc_between(u, v)
            .into_iter()
            .map(move |_| EdgeRef {
                source: u,
                target: v,
                key: 0,
                attrs: &self.empty,
            })
    }
}

/// A [`ResidualNetwork`] restricted to the arcs satisfying a predicate, e.g. those with positive
/// residual capacity. Traversals run on the adapter without copying the network.
pub struct ArcFilter<'a, N: NodeId, F> {
    residual: &'a ResidualNetwork<N>,
    keep: F,
}

/// Neighbors of a node in an [`ArcFilter`]
pub struct FilteredArcEnds<'a, F> {
    arcs: &'a [ResidualArc],
    iter: Iter<'a, EdgeIndex>,
    keep: &'a F,
    incoming: bool,
}

impl<F> Iterator for FilteredArcEnds<'_, F>
where
    F: Fn(&ResidualArc) -> bool,
{
    type Item = NodeIndex;

    fn next(&mut self) -> Option<NodeIndex> {
        let (arcs, keep, incoming) = (self.arcs, self.keep, self.incoming);
        self.iter.find_map(|&a| {
            // for incoming neighbors the arc in question is the mate `head -> u`
            let arc = if incoming {
                &arcs[mate(a) as usize]
            } else {
                &arcs[a as usize]
            };
            keep(arc).then_some(if incoming { arc.tail } else { arc.head })
        })
    }
}

impl<N: NodeId, F> ArcFilter<'_, N, F>
where
    F: Fn(&ResidualArc) -> bool,
{
    fn ends(&self, u: NodeIndex, incoming: bool) -> FilteredArcEnds<'_, F> {
        FilteredArcEnds {
            arcs: &self.residual.arcs,
            iter: self.residual.out[u as usize].iter(),
            keep: &self.keep,
            incoming,
        }
    }
}

impl<N: NodeId, F> GraphType for ArcFilter<'_, N, F> {
    fn kind(&self) -> GraphKind {
        GraphKind::DIRECTED
    }
}

impl<N: NodeId, F> GraphNodeOrder for ArcFilter<'_, N, F> {
    type NodeId = N;

    fn node_bound(&self) -> NumNodes {
        self.residual.node_bound()
    }

    fn number_of_nodes(&self) -> NumNodes {
        self.residual.number_of_nodes()
    }

    fn vertices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.residual.vertices()
    }

    fn contains_vertex(&self, u: NodeIndex) -> bool {
        self.residual.contains_vertex(u)
    }

    fn node_id(&self, u: NodeIndex) -> &N {
        self.residual.node_id(u)
    }

    fn index_of(&self, id: &N) -> Option<NodeIndex> {
        self.residual.index_of(id)
    }
}

impl<N: NodeId, F> AdjacencyList for ArcFilter<'_, N, F>
where
    F: Fn(&ResidualArc) -> bool,
{
    type NeighborIter<'b>
        = FilteredArcEnds<'b, F>
    where
        Self: 'b;

    fn neighbors_of(&self, u: NodeIndex) -> Self::NeighborIter<'_> {
        self.ends(u, false)
    }

    fn degree_of(&self, u: NodeIndex) -> NumEdges {
        self.out_degree_of(u) + self.in_degree_of(u)
    }

    fn out_degree_of(&self, u: NodeIndex) -> NumEdges {
        self.ends(u, false).count() as NumEdges
    }
}

impl<N: NodeId, F> DirectedAdjacencyList for ArcFilter<'_, N, F>
where
    F: Fn(&ResidualArc) -> bool,
{
    type InNeighborIter<'b>
        = FilteredArcEnds<'b, F>
    where
        Self: 'b;

    fn in_neighbors_of(&self, u: NodeIndex) -> Self::InNeighborIter<'_> {
        self.ends(u, true)
    }

    fn in_degree_of(&self, u: NodeIndex) -> NumEdges {
        self.ends(u, true).count() as NumEdges
    }
}
