use std::fmt::Debug;

use fxhash::FxHashMap;

use super::neighborhood::Neighborhood;
use crate::{attr::AttrMap, edge::*, error::*, node::*, ops::*};

#[derive(Clone)]
pub(crate) struct NodeSlot<N> {
    pub(crate) id: N,
    pub(crate) attrs: AttrMap,
    /// successors; all neighbors if undirected
    pub(crate) out: Neighborhood,
    /// predecessors; unused if undirected
    pub(crate) inc: Neighborhood,
}

/// Attributed adjacency graph over arbitrary node ids.
///
/// Nodes live in an arena of slots (indexed by [`NodeIndex`]) in insertion order, edges in a
/// separate arena of attribute maps (indexed by [`EdgeIndex`]). Both endpoints of an undirected
/// edge, or the successor and predecessor side of a directed edge, point to the same edge slot;
/// there is exactly one attribute map per logical edge.
///
/// The kind of graph is fixed at construction:
/// ```
/// use lgraphs::prelude::*;
///
/// let mut g = AdjGraph::digraph();
/// g.add_edge("a", "b");
///
/// assert!(g.is_directed());
/// assert_eq!(g.successors(&"a").unwrap().collect::<Vec<_>>(), vec![&"b"]);
/// assert_eq!(g.predecessors(&"a").unwrap().count(), 0);
/// ```
///
/// All borrows handed out by queries, views and traversals keep the graph immutable while they
/// are alive, so a graph cannot be mutated during an iteration over it.
#[derive(Clone)]
pub struct AdjGraph<N> {
    kind: GraphKind,
    nodes: Vec<Option<NodeSlot<N>>>,
    index: FxHashMap<N, NodeIndex>,
    num_nodes: NumNodes,
    edges: Vec<Option<AttrMap>>,
    free_edges: Vec<EdgeIndex>,
    num_edges: NumEdges,
    attrs: AttrMap,
}

/// Compact the node arena once it holds this many more dead slots than live ones
const COMPACTION_SLACK: usize = 32;

impl<N: NodeId> Default for AdjGraph<N> {
    fn default() -> Self {
        Self::new(GraphKind::UNDIRECTED)
    }
}

impl<N: NodeId> AdjGraph<N> {
    /// Creates an empty graph of the given kind
    pub fn new(kind: GraphKind) -> Self {
        Self {
            kind,
            nodes: Vec::new(),
            index: FxHashMap::default(),
            num_nodes: 0,
            edges: Vec::new(),
            free_edges: Vec::new(),
            num_edges: 0,
            attrs: AttrMap::new(),
        }
    }

    /// Creates an empty undirected simple graph
    pub fn graph() -> Self {
        Self::new(GraphKind::UNDIRECTED)
    }

    /// Creates an empty directed simple graph
    pub fn digraph() -> Self {
        Self::new(GraphKind::DIRECTED)
    }

    /// Creates an empty undirected multigraph
    pub fn multigraph() -> Self {
        Self::new(GraphKind::MULTI_UNDIRECTED)
    }

    /// Creates an empty directed multigraph
    pub fn multidigraph() -> Self {
        Self::new(GraphKind::MULTI_DIRECTED)
    }

    /// Creates an empty graph of the same kind as `other`
    pub fn with_kind_from<G: GraphType>(other: &G) -> Self {
        Self::new(other.kind())
    }

    /// ** Panics if `u` is not a live index **
    pub(crate) fn slot(&self, u: NodeIndex) -> &NodeSlot<N> {
        match self.nodes.get(u as usize) {
            Some(Some(slot)) => slot,
            _ => panic!("node index {u} is not live"),
        }
    }

    fn slot_mut(&mut self, u: NodeIndex) -> &mut NodeSlot<N> {
        match self.nodes.get_mut(u as usize) {
            Some(Some(slot)) => slot,
            _ => panic!("node index {u} is not live"),
        }
    }

    pub(crate) fn edge_slot_attrs(&self, e: EdgeIndex) -> &AttrMap {
        match self.edges.get(e as usize) {
            Some(Some(attrs)) => attrs,
            _ => panic!("edge slot {e} is vacant"),
        }
    }

    fn edge_slot_attrs_mut(&mut self, e: EdgeIndex) -> &mut AttrMap {
        match self.edges.get_mut(e as usize) {
            Some(Some(attrs)) => attrs,
            _ => panic!("edge slot {e} is vacant"),
        }
    }

    pub(crate) fn ref_of(&self, source: NodeIndex, target: NodeIndex, key: EdgeKey, e: EdgeIndex) -> EdgeRef<'_> {
        EdgeRef {
            source,
            target,
            key,
            attrs: self.edge_slot_attrs(e),
        }
    }

    /// Returns the index of `id`, inserting the node first if it is absent
    pub(crate) fn ensure_node(&mut self, id: N) -> NodeIndex {
        if let Some(&u) = self.index.get(&id) {
            return u;
        }

        let u = self.nodes.len() as NodeIndex;
        self.index.insert(id.clone(), u);
        self.nodes.push(Some(NodeSlot {
            id,
            attrs: AttrMap::new(),
            out: Neighborhood::default(),
            inc: Neighborhood::default(),
        }));
        self.num_nodes += 1;
        u
    }

    /// Inserts a node if it is not already present
    pub fn add_node(&mut self, id: N) {
        self.ensure_node(id);
    }

    /// Inserts a node if absent and merges `attrs` into its attributes
    pub fn add_node_with(&mut self, id: N, attrs: AttrMap) {
        let u = self.ensure_node(id);
        self.slot_mut(u).attrs.update(attrs);
    }

    pub fn add_nodes_from<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = N>,
    {
        for id in ids {
            self.ensure_node(id);
        }
    }

    pub fn add_nodes_with_attrs_from<I>(&mut self, nodes: I)
    where
        I: IntoIterator<Item = (N, AttrMap)>,
    {
        for (id, attrs) in nodes {
            self.add_node_with(id, attrs);
        }
    }

    /// Mutable access to the attributes of a node
    pub fn node_attrs_mut(&mut self, id: &N) -> Result<&mut AttrMap> {
        let u = self.try_index_of(id)?;
        Ok(&mut self.slot_mut(u).attrs)
    }

    /// Mutable access to the attributes of the graph itself
    pub fn graph_attrs_mut(&mut self) -> &mut AttrMap {
        &mut self.attrs
    }

    fn alloc_edge(&mut self, attrs: AttrMap) -> EdgeIndex {
        self.num_edges += 1;
        match self.free_edges.pop() {
            Some(e) => {
                self.edges[e as usize] = Some(attrs);
                e
            }
            None => {
                self.edges.push(Some(attrs));
                (self.edges.len() - 1) as EdgeIndex
            }
        }
    }

    fn free_edge(&mut self, e: EdgeIndex) {
        self.edges[e as usize] = None;
        self.free_edges.push(e);
        self.num_edges -= 1;
    }

    /// Installs a new edge `u -> v` with an unused key on both sides of the adjacency
    fn insert_edge(&mut self, u: NodeIndex, v: NodeIndex, key: EdgeKey, attrs: AttrMap) {
        let e = self.alloc_edge(attrs);
        self.slot_mut(u).out.insert(v, key, e);
        if self.kind.is_directed() {
            self.slot_mut(v).inc.insert(u, key, e);
        } else if u != v {
            self.slot_mut(v).out.insert(u, key, e);
        }
    }

    /// Adds an edge (and missing endpoints) and returns its key.
    /// On simple graphs an existing edge is kept, multigraphs get a new parallel edge.
    pub fn add_edge(&mut self, u: N, v: N) -> EdgeKey {
        self.add_edge_with(u, v, AttrMap::new())
    }

    /// Like [`AdjGraph::add_edge`]; on simple graphs `attrs` are merged into an existing edge
    pub fn add_edge_with(&mut self, u: N, v: N, attrs: AttrMap) -> EdgeKey {
        let u = self.ensure_node(u);
        let v = self.ensure_node(v);

        if self.kind.is_multigraph() {
            let key = self.slot(u).out.next_key(v);
            self.insert_edge(u, v, key, attrs);
            key
        } else {
            match self.slot(u).out.edge_slot(v, 0) {
                Some(e) => self.edge_slot_attrs_mut(e).update(attrs),
                None => self.insert_edge(u, v, 0, attrs),
            }
            0
        }
    }

    /// Adds the parallel edge `(u, v, key)` to a multigraph, merging `attrs` if it exists.
    /// Fails with `NotImplementedForKind` on simple graphs.
    pub fn add_edge_with_key(&mut self, u: N, v: N, key: EdgeKey, attrs: AttrMap) -> Result<EdgeKey> {
        if !self.kind.is_multigraph() {
            return Err(GraphError::not_implemented("add_edge_with_key", self.kind));
        }

        let u = self.ensure_node(u);
        let v = self.ensure_node(v);
        match self.slot(u).out.edge_slot(v, key) {
            Some(e) => self.edge_slot_attrs_mut(e).update(attrs),
            None => self.insert_edge(u, v, key, attrs),
        }
        Ok(key)
    }

    pub fn add_edges_from<I>(&mut self, edges: I)
    where
        I: IntoIterator<Item = (N, N)>,
    {
        for (u, v) in edges {
            self.add_edge(u, v);
        }
    }

    pub fn add_edges_with_attrs_from<I>(&mut self, edges: I)
    where
        I: IntoIterator<Item = (N, N, AttrMap)>,
    {
        for (u, v, attrs) in edges {
            self.add_edge_with(u, v, attrs);
        }
    }

    /// Adds edges `(u, v)` storing the third entry under `weight_key`
    pub fn add_weighted_edges_from<I>(&mut self, edges: I, weight_key: &str)
    where
        I: IntoIterator<Item = (N, N, f64)>,
    {
        for (u, v, w) in edges {
            let mut attrs = AttrMap::new();
            attrs.insert(weight_key, w);
            self.add_edge_with(u, v, attrs);
        }
    }

    /// Mutable access to the attributes of the edge `u -> v` (the first parallel edge)
    pub fn edge_attrs_mut(&mut self, u: &N, v: &N) -> Result<&mut AttrMap> {
        let e = self
            .edge_slot_between(u, v, None)
            .ok_or_else(|| GraphError::edge_not_found(u, v))?;
        Ok(self.edge_slot_attrs_mut(e))
    }

    pub fn edge_attrs_with_key_mut(&mut self, u: &N, v: &N, key: EdgeKey) -> Result<&mut AttrMap> {
        let e = self
            .edge_slot_between(u, v, Some(key))
            .ok_or_else(|| GraphError::edge_not_found(u, v))?;
        Ok(self.edge_slot_attrs_mut(e))
    }

    fn edge_slot_between(&self, u: &N, v: &N, key: Option<EdgeKey>) -> Option<EdgeIndex> {
        let (u, v) = (self.index_of(u)?, self.index_of(v)?);
        let out = &self.slot(u).out;
        match key {
            Some(key) => out.edge_slot(v, key),
            None => out.bundle(v)?.first().map(|&(_, e)| e),
        }
    }

    /// Removes a node and all incident edges.
    /// Fails with `NodeNotFound` if the node is absent.
    pub fn remove_node(&mut self, id: &N) -> Result<()> {
        let u = self.try_index_of(id)?;
        let Some(slot) = self.nodes[u as usize].take() else {
            return Err(GraphError::node_not_found(id));
        };
        self.index.remove(id);
        self.num_nodes -= 1;

        let directed = self.kind.is_directed();
        for v in slot.out.neighbors().filter(|&v| v != u) {
            let other = self.slot_mut(v);
            if directed {
                other.inc.remove_neighbor(u);
            } else {
                other.out.remove_neighbor(u);
            }
        }
        for (_, _, e) in slot.out.entries() {
            self.free_edge(e);
        }

        if directed {
            for w in slot.inc.neighbors().filter(|&w| w != u) {
                self.slot_mut(w).out.remove_neighbor(u);
            }
            // self-loops were freed through `out` already
            for (_, _, e) in slot.inc.entries().filter(|&(w, _, _)| w != u) {
                self.free_edge(e);
            }
        }

        if self.nodes.len() > 2 * self.num_nodes as usize + COMPACTION_SLACK {
            self.compact();
        }
        Ok(())
    }

    /// Removes all given nodes that are present; missing nodes are ignored
    pub fn remove_nodes_from<'a, I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = &'a N>,
        N: 'a,
    {
        for id in ids {
            let _ = self.remove_node(id);
        }
    }

    fn remove_edge_impl(&mut self, u: &N, v: &N, key: Option<EdgeKey>) -> Result<()> {
        let not_found = || GraphError::edge_not_found(u, v);
        let ui = self.index_of(u).ok_or_else(not_found)?;
        let vi = self.index_of(v).ok_or_else(not_found)?;

        let (key, e) = self
            .slot_mut(ui)
            .out
            .remove(vi, key)
            .ok_or_else(not_found)?;

        if self.kind.is_directed() {
            self.slot_mut(vi).inc.remove(ui, Some(key));
        } else if ui != vi {
            self.slot_mut(vi).out.remove(ui, Some(key));
        }
        self.free_edge(e);
        Ok(())
    }

    /// Removes the edge `u -> v`; on multigraphs the most recently added parallel edge.
    /// Fails with `EdgeNotFound` if there is no such edge.
    pub fn remove_edge(&mut self, u: &N, v: &N) -> Result<()> {
        self.remove_edge_impl(u, v, None)
    }

    /// Removes the parallel edge `(u, v, key)`
    pub fn remove_edge_with_key(&mut self, u: &N, v: &N, key: EdgeKey) -> Result<()> {
        self.remove_edge_impl(u, v, Some(key))
    }

    /// Removes all given edges that are present; missing edges are ignored
    pub fn remove_edges_from<'a, I>(&mut self, edges: I)
    where
        I: IntoIterator<Item = (&'a N, &'a N)>,
        N: 'a,
    {
        for (u, v) in edges {
            let _ = self.remove_edge(u, v);
        }
    }

    /// Removes all nodes, edges and graph attributes
    pub fn clear(&mut self) {
        *self = Self::new(self.kind);
    }

    /// Removes all edges but keeps nodes and attributes
    pub fn clear_edges(&mut self) {
        for slot in self.nodes.iter_mut().flatten() {
            slot.out.clear();
            slot.inc.clear();
        }
        self.edges.clear();
        self.free_edges.clear();
        self.num_edges = 0;
    }

    /// Drops dead node slots and renumbers the remaining nodes in insertion order
    fn compact(&mut self) {
        let mut new_index = vec![INVALID_NODE; self.nodes.len()];
        let mut next: NodeIndex = 0;
        for (old, slot) in self.nodes.iter().enumerate() {
            if slot.is_some() {
                new_index[old] = next;
                next += 1;
            }
        }

        log::trace!(
            "compacting node arena from {} slots to {} nodes",
            self.nodes.len(),
            next
        );

        self.nodes.retain(Option::is_some);
        for slot in self.nodes.iter_mut().flatten() {
            slot.out.remap(&new_index);
            slot.inc.remap(&new_index);
        }
        for u in self.index.values_mut() {
            *u = new_index[*u as usize];
        }
    }

    /// Asserts the representation invariants: index map and slots agree, every adjacency entry
    /// has its mirror pointing to the same live edge slot and all counters are exact.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        assert_eq!(self.index.len(), self.num_nodes as usize);
        for (id, &u) in &self.index {
            assert_eq!(&self.slot(u).id, id);
        }

        let mut referenced = 0;
        for u in self.vertices() {
            let slot = self.slot(u);
            assert_eq!(slot.out.entries().count() as NumEdges, slot.out.num_of_edges());
            for (v, key, e) in slot.out.entries() {
                assert!(self.edges[e as usize].is_some());
                let mirror = if self.kind.is_directed() {
                    &self.slot(v).inc
                } else {
                    &self.slot(v).out
                };
                assert_eq!(mirror.edge_slot(u, key), Some(e));
                if self.kind.is_directed() || u <= v {
                    referenced += 1;
                }
            }
            if self.kind.is_directed() {
                for (w, key, e) in slot.inc.entries() {
                    assert_eq!(self.slot(w).out.edge_slot(u, key), Some(e));
                }
            } else {
                assert_eq!(slot.inc.num_of_edges(), 0);
            }
        }
        assert_eq!(referenced, self.num_edges);
        assert_eq!(
            self.edges.iter().filter(|e| e.is_some()).count(),
            self.num_edges as usize
        );
    }
}

impl<N> GraphType for AdjGraph<N> {
    fn kind(&self) -> GraphKind {
        self.kind
    }
}

impl<N: NodeId> GraphNodeOrder for AdjGraph<N> {
    type NodeId = N;

    fn node_bound(&self) -> NumNodes {
        self.nodes.len() as NumNodes
    }

    fn number_of_nodes(&self) -> NumNodes {
        self.num_nodes
    }

    fn vertices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(u, slot)| slot.as_ref().map(|_| u as NodeIndex))
    }

    fn contains_vertex(&self, u: NodeIndex) -> bool {
        matches!(self.nodes.get(u as usize), Some(Some(_)))
    }

    fn node_id(&self, u: NodeIndex) -> &N {
        &self.slot(u).id
    }

    fn index_of(&self, id: &N) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }
}

impl<N: NodeId> AdjacencyList for AdjGraph<N> {
    type NeighborIter<'a>
        = std::iter::Copied<std::slice::Iter<'a, NodeIndex>>
    where
        Self: 'a;

    fn neighbors_of(&self, u: NodeIndex) -> Self::NeighborIter<'_> {
        self.slot(u).out.neighbors()
    }

    fn number_of_neighbors(&self, u: NodeIndex) -> NumNodes {
        self.slot(u).out.num_of_neighbors()
    }

    fn degree_of(&self, u: NodeIndex) -> NumEdges {
        let slot = self.slot(u);
        if self.kind.is_directed() {
            slot.out.num_of_edges() + slot.inc.num_of_edges()
        } else {
            let loops = slot.out.bundle(u).map_or(0, |b| b.len() as NumEdges);
            slot.out.num_of_edges() + loops
        }
    }

    fn out_degree_of(&self, u: NodeIndex) -> NumEdges {
        if self.kind.is_directed() {
            self.slot(u).out.num_of_edges()
        } else {
            self.degree_of(u)
        }
    }
}

impl<N: NodeId> DirectedAdjacencyList for AdjGraph<N> {
    type InNeighborIter<'a>
        = std::iter::Copied<std::slice::Iter<'a, NodeIndex>>
    where
        Self: 'a;

    fn in_neighbors_of(&self, u: NodeIndex) -> Self::InNeighborIter<'_> {
        let slot = self.slot(u);
        if self.kind.is_directed() {
            slot.inc.neighbors()
        } else {
            slot.out.neighbors()
        }
    }

    fn in_degree_of(&self, u: NodeIndex) -> NumEdges {
        if self.kind.is_directed() {
            self.slot(u).inc.num_of_edges()
        } else {
            self.degree_of(u)
        }
    }
}

impl<N: NodeId> AdjacencyTest for AdjGraph<N> {
    fn has_edge_between(&self, u: NodeIndex, v: NodeIndex) -> bool {
        self.slot(u).out.has_neighbor(v)
    }
}

impl<N: NodeId> EdgeList for AdjGraph<N> {
    fn graph_attrs(&self) -> &AttrMap {
        &self.attrs
    }

    fn node_attrs_of(&self, u: NodeIndex) -> &AttrMap {
        &self.slot(u).attrs
    }

    fn edges_from(&self, u: NodeIndex) -> impl Iterator<Item = EdgeRef<'_>> + '_ {
        self.slot(u)
            .out
            .entries()
            .map(move |(v, key, e)| self.ref_of(u, v, key, e))
    }

    fn edges_into(&self, u: NodeIndex) -> impl Iterator<Item = EdgeRef<'_>> + '_ {
        let slot = self.slot(u);
        let side = if self.kind.is_directed() {
            &slot.inc
        } else {
            &slot.out
        };
        side.entries()
            .map(move |(w, key, e)| self.ref_of(w, u, key, e))
    }

    fn edges_between(&self, u: NodeIndex, v: NodeIndex) -> impl Iterator<Item = EdgeRef<'_>> + '_ {
        self.slot(u)
            .out
            .entries_towards(v)
            .map(move |(key, e)| self.ref_of(u, v, key, e))
    }

    fn number_of_edges(&self) -> NumEdges {
        self.num_edges
    }
}

impl<N: NodeId> Debug for AdjGraph<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdjGraph")
            .field("kind", &self.kind)
            .field("nodes", &self.nodes().collect::<Vec<_>>())
            .field("edges", &self.edges_with_keys().collect::<Vec<_>>())
            .finish()
    }
}


crate::testing::test_graph_ops!(
    undirected_ops,
    GraphKind::UNDIRECTED,
    (AdjacencyList, EdgeList)
);
crate::testing::test_graph_ops!(
    directed_ops,
    GraphKind::DIRECTED,
    (AdjacencyList, DirectedAdjacencyList, EdgeList)
);
crate::testing::test_graph_ops!(
    multi_undirected_ops,
    GraphKind::MULTI_UNDIRECTED,
    (AdjacencyList, EdgeList)
);
crate::testing::test_graph_ops!(
    multi_directed_ops,
    GraphKind::MULTI_DIRECTED,
    (AdjacencyList, DirectedAdjacencyList, EdgeList)
);
