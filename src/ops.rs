/*!
# Graph Operations

The capability set every graph-like object exposes. [`AdjGraph`](crate::repr::AdjGraph), all
views and the residual network implement (parts of) this trait stack, so every algorithm
works on any of them:

- [`GraphType`]: directedness & multiplicity flags, checked at runtime
- [`GraphNodeOrder`]: node ids, dense node indices and iteration in insertion order
- [`AdjacencyList`] / [`DirectedAdjacencyList`]: neighbor and degree queries on indices
- [`AdjacencyTest`]: edge existence on indices
- [`EdgeList`]: attributed edges and node attributes
- [`GraphQuery`]: the id-level query surface, implemented for every [`EdgeList`]
*/

use std::fmt::Display;

use crate::{
    attr::AttrMap,
    edge::{EdgeKey, EdgeRef, NumEdges},
    error::{GraphError, Result},
    node::{NodeBitSet, NodeId, NodeIndex, NumNodes},
    repr::AdjGraph,
};

/// Kind of a graph: directed or undirected, simple or multigraph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GraphKind {
    directed: bool,
    multigraph: bool,
}

impl GraphKind {
    pub const UNDIRECTED: Self = Self::new(false, false);
    pub const DIRECTED: Self = Self::new(true, false);
    pub const MULTI_UNDIRECTED: Self = Self::new(false, true);
    pub const MULTI_DIRECTED: Self = Self::new(true, true);

    pub const fn new(directed: bool, multigraph: bool) -> Self {
        Self {
            directed,
            multigraph,
        }
    }

    pub const fn is_directed(&self) -> bool {
        self.directed
    }

    pub const fn is_multigraph(&self) -> bool {
        self.multigraph
    }

    /// Same multiplicity, directed
    pub const fn as_directed(self) -> Self {
        Self::new(true, self.multigraph)
    }

    /// Same multiplicity, undirected
    pub const fn as_undirected(self) -> Self {
        Self::new(false, self.multigraph)
    }
}

impl Display for GraphKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let dir = if self.directed { "directed" } else { "undirected" };
        if self.multigraph {
            write!(f, "{dir} multi")
        } else {
            write!(f, "{dir}")
        }
    }
}

/// Runtime flags of a graph, plus the fail-fast kind checks used by algorithms
pub trait GraphType {
    fn kind(&self) -> GraphKind;

    fn is_directed(&self) -> bool {
        self.kind().is_directed()
    }

    fn is_undirected(&self) -> bool {
        !self.kind().is_directed()
    }

    fn is_multigraph(&self) -> bool {
        self.kind().is_multigraph()
    }

    /// Fails with `NotImplementedForKind` if the graph is directed
    fn require_undirected(&self, operation: &'static str) -> Result<()> {
        if self.is_directed() {
            Err(GraphError::not_implemented(operation, self.kind()))
        } else {
            Ok(())
        }
    }

    /// Fails with `NotImplementedForKind` if the graph is undirected
    fn require_directed(&self, operation: &'static str) -> Result<()> {
        if self.is_directed() {
            Ok(())
        } else {
            Err(GraphError::not_implemented(operation, self.kind()))
        }
    }

    /// Fails with `NotImplementedForKind` if the graph is a multigraph
    fn require_simple(&self, operation: &'static str) -> Result<()> {
        if self.is_multigraph() {
            Err(GraphError::not_implemented(operation, self.kind()))
        } else {
            Ok(())
        }
    }
}

/// Provides the node set of a graph, both as user ids and as dense indices
pub trait GraphNodeOrder: GraphType {
    type NodeId: NodeId;

    /// Exclusive upper bound on all node indices (live or not)
    fn node_bound(&self) -> NumNodes;

    /// Returns the number of (visible) nodes of the graph
    fn number_of_nodes(&self) -> NumNodes;

    /// Returns an iterator over all node indices in ascending, i.e. insertion, order
    fn vertices(&self) -> impl Iterator<Item = NodeIndex> + '_;

    /// Returns *true* if `u` is the index of a (visible) node
    fn contains_vertex(&self, u: NodeIndex) -> bool;

    /// Returns the id of node `u`.
    /// ** Panics if `u` is not a live index **
    fn node_id(&self, u: NodeIndex) -> &Self::NodeId;

    /// Returns the index of a (visible) node
    fn index_of(&self, id: &Self::NodeId) -> Option<NodeIndex>;

    /// Like [`GraphNodeOrder::index_of`], but fails with `NodeNotFound`
    fn try_index_of(&self, id: &Self::NodeId) -> Result<NodeIndex> {
        self.index_of(id)
            .ok_or_else(|| GraphError::node_not_found(id))
    }

    fn has_node(&self, id: &Self::NodeId) -> bool {
        self.index_of(id).is_some()
    }

    /// Return the number of nodes as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns *true* if the graph has no nodes (and thus no edges)
    fn is_empty(&self) -> bool {
        self.number_of_nodes() == 0
    }

    /// Returns an iterator over all node ids in insertion order
    fn nodes(&self) -> impl Iterator<Item = &Self::NodeId> + '_ {
        self.vertices().map(|u| self.node_id(u))
    }

    /// Returns empty bitset with one entry per node index
    fn vertex_bitset_unset(&self) -> NodeBitSet {
        NodeBitSet::new(self.node_bound())
    }
}

/// Traits pertaining getters for neighborhoods & degrees on node indices
pub trait AdjacencyList: GraphNodeOrder {
    type NeighborIter<'a>: Iterator<Item = NodeIndex> + 'a
    where
        Self: 'a;

    /// Returns an iterator over the distinct neighbors of `u` in insertion order.
    /// For directed graphs these are the successors.
    /// ** Panics if `u` is not a live index **
    fn neighbors_of(&self, u: NodeIndex) -> Self::NeighborIter<'_>;

    /// Returns the number of distinct neighbors (successors) of `u`
    /// ** Panics if `u` is not a live index **
    fn number_of_neighbors(&self, u: NodeIndex) -> NumNodes {
        self.neighbors_of(u).count() as NumNodes
    }

    /// Returns the degree of `u`:
    /// - undirected: number of incident edges, self-loops counted twice
    /// - directed: in-degree plus out-degree
    ///
    /// Parallel edges are counted individually.
    /// ** Panics if `u` is not a live index **
    fn degree_of(&self, u: NodeIndex) -> NumEdges;

    /// Returns the number of outgoing edges of `u` (equal to `degree_of` for undirected graphs)
    /// ** Panics if `u` is not a live index **
    fn out_degree_of(&self, u: NodeIndex) -> NumEdges;
}

/// Additional getters for the incoming side of directed graphs.
///
/// Undirected graphs implement this trait as well; their in-neighbors are their neighbors.
pub trait DirectedAdjacencyList: AdjacencyList {
    type InNeighborIter<'a>: Iterator<Item = NodeIndex> + 'a
    where
        Self: 'a;

    /// Returns an iterator over the distinct predecessors of `u`
    /// ** Panics if `u` is not a live index **
    fn in_neighbors_of(&self, u: NodeIndex) -> Self::InNeighborIter<'_>;

    /// Returns the number of incoming edges of `u`
    /// ** Panics if `u` is not a live index **
    fn in_degree_of(&self, u: NodeIndex) -> NumEdges;
}

/// Edge existence on node indices
pub trait AdjacencyTest: GraphNodeOrder {
    /// Returns *true* if there is at least one edge `u -> v` (`u - v` if undirected)
    /// ** Panics if `u` is not a live index **
    fn has_edge_between(&self, u: NodeIndex, v: NodeIndex) -> bool;
}

/// Access to attributed edges and attribute maps
pub trait EdgeList: DirectedAdjacencyList + AdjacencyTest {
    /// Attributes of the graph itself
    fn graph_attrs(&self) -> &AttrMap;

    /// Attributes of node `u`
    /// ** Panics if `u` is not a live index **
    fn node_attrs_of(&self, u: NodeIndex) -> &AttrMap;

    /// All edges leaving `u` (incident to `u` if undirected), grouped by neighbor in insertion
    /// order. Every parallel edge is reported individually.
    /// ** Panics if `u` is not a live index **
    fn edges_from(&self, u: NodeIndex) -> impl Iterator<Item = EdgeRef<'_>> + '_;

    /// All edges entering `u`, reported as `(w, u)`
    /// ** Panics if `u` is not a live index **
    fn edges_into(&self, u: NodeIndex) -> impl Iterator<Item = EdgeRef<'_>> + '_;

    /// All (parallel) edges `u -> v`
    /// ** Panics if `u` is not a live index **
    fn edges_between(&self, u: NodeIndex, v: NodeIndex) -> impl Iterator<Item = EdgeRef<'_>> + '_;

    /// Every edge of the graph exactly once: grouped by source node in insertion order; an
    /// undirected edge is reported from the endpoint that was inserted first.
    fn edge_refs(&self) -> impl Iterator<Item = EdgeRef<'_>> + '_ {
        let directed = self.is_directed();
        self.vertices().flat_map(move |u| {
            self.edges_from(u)
                .filter(move |e| directed || e.target >= u)
        })
    }

    /// Returns the number of edges of the graph
    fn number_of_edges(&self) -> NumEdges {
        self.edge_refs().count() as NumEdges
    }
}

/// Degree of `u` derived from attributed edges, following [`AdjacencyList::degree_of`]
pub(crate) fn degree_from_edges<G: EdgeList>(graph: &G, u: NodeIndex) -> NumEdges {
    if graph.is_directed() {
        (graph.edges_from(u).count() + graph.edges_into(u).count()) as NumEdges
    } else {
        graph
            .edges_from(u)
            .map(|e| if e.is_loop() { 2 } else { 1 })
            .sum()
    }
}

/// The id-level query surface. Implemented for every [`EdgeList`], i.e. for graphs and views.
pub trait GraphQuery: EdgeList {
    /// Attributes of a node
    fn node_attrs(&self, id: &Self::NodeId) -> Result<&AttrMap> {
        Ok(self.node_attrs_of(self.try_index_of(id)?))
    }

    fn nodes_with_data(&self) -> impl Iterator<Item = (&Self::NodeId, &AttrMap)> + '_ {
        self.vertices()
            .map(|u| (self.node_id(u), self.node_attrs_of(u)))
    }

    /// Neighbors (successors if directed) of a node in insertion order
    fn neighbors(&self, id: &Self::NodeId) -> Result<impl Iterator<Item = &Self::NodeId> + '_> {
        let u = self.try_index_of(id)?;
        Ok(self.neighbors_of(u).map(|v| self.node_id(v)))
    }

    /// Same as [`GraphQuery::neighbors`]
    fn successors(&self, id: &Self::NodeId) -> Result<impl Iterator<Item = &Self::NodeId> + '_> {
        self.neighbors(id)
    }

    /// Predecessors of a node (neighbors if undirected)
    fn predecessors(
        &self,
        id: &Self::NodeId,
    ) -> Result<impl Iterator<Item = &Self::NodeId> + '_> {
        let u = self.try_index_of(id)?;
        Ok(self.in_neighbors_of(u).map(|v| self.node_id(v)))
    }

    /// The adjacency row of a node: every (parallel) edge as `(neighbor, edge)`
    fn adj(
        &self,
        id: &Self::NodeId,
    ) -> Result<impl Iterator<Item = (&Self::NodeId, EdgeRef<'_>)> + '_> {
        let u = self.try_index_of(id)?;
        Ok(self.edges_from(u).map(|e| (self.node_id(e.target), e)))
    }

    fn degree(&self, id: &Self::NodeId) -> Result<NumEdges> {
        Ok(self.degree_of(self.try_index_of(id)?))
    }

    /// In-degree of a node (degree if undirected)
    fn in_degree(&self, id: &Self::NodeId) -> Result<NumEdges> {
        let u = self.try_index_of(id)?;
        Ok(if self.is_directed() {
            self.in_degree_of(u)
        } else {
            self.degree_of(u)
        })
    }

    /// Out-degree of a node (degree if undirected)
    fn out_degree(&self, id: &Self::NodeId) -> Result<NumEdges> {
        let u = self.try_index_of(id)?;
        Ok(if self.is_directed() {
            self.out_degree_of(u)
        } else {
            self.degree_of(u)
        })
    }

    /// Sum of the numeric attribute `weight` over all incident edges; a missing attribute
    /// counts as `1`, self-loops of undirected graphs count twice.
    fn weighted_degree(&self, id: &Self::NodeId, weight: &str) -> Result<f64> {
        let u = self.try_index_of(id)?;

        let mut total = 0.0;
        for e in self.edges_from(u) {
            let w = e.attrs.numeric(weight)?.unwrap_or(1.0);
            total += if !self.is_directed() && e.is_loop() {
                2.0 * w
            } else {
                w
            };
        }
        if self.is_directed() {
            for e in self.edges_into(u) {
                total += e.attrs.numeric(weight)?.unwrap_or(1.0);
            }
        }

        Ok(total)
    }

    /// Every edge exactly once as a pair of node ids
    fn edges(&self) -> impl Iterator<Item = (&Self::NodeId, &Self::NodeId)> + '_ {
        self.edge_refs()
            .map(|e| (self.node_id(e.source), self.node_id(e.target)))
    }

    fn edges_with_data(
        &self,
    ) -> impl Iterator<Item = (&Self::NodeId, &Self::NodeId, &AttrMap)> + '_ {
        self.edge_refs()
            .map(|e| (self.node_id(e.source), self.node_id(e.target), e.attrs))
    }

    fn edges_with_keys(
        &self,
    ) -> impl Iterator<Item = (&Self::NodeId, &Self::NodeId, EdgeKey)> + '_ {
        self.edge_refs()
            .map(|e| (self.node_id(e.source), self.node_id(e.target), e.key))
    }

    /// Returns *true* if both nodes exist and are connected by an edge `u -> v`
    fn has_edge(&self, u: &Self::NodeId, v: &Self::NodeId) -> bool {
        match (self.index_of(u), self.index_of(v)) {
            (Some(u), Some(v)) => self.has_edge_between(u, v),
            _ => false,
        }
    }

    fn has_edge_with_key(&self, u: &Self::NodeId, v: &Self::NodeId, key: EdgeKey) -> bool {
        self.edge_attrs_with_key(u, v, key).is_ok()
    }

    /// Attributes of the edge `u -> v`; for multigraphs those of the first parallel edge
    fn edge_attrs(&self, u: &Self::NodeId, v: &Self::NodeId) -> Result<&AttrMap> {
        let not_found = || GraphError::edge_not_found(u, v);
        let (ui, vi) = (
            self.index_of(u).ok_or_else(not_found)?,
            self.index_of(v).ok_or_else(not_found)?,
        );
        self.edges_between(ui, vi)
            .next()
            .map(|e| e.attrs)
            .ok_or_else(not_found)
    }

    fn edge_attrs_with_key(
        &self,
        u: &Self::NodeId,
        v: &Self::NodeId,
        key: EdgeKey,
    ) -> Result<&AttrMap> {
        let not_found = || GraphError::edge_not_found(u, v);
        let (ui, vi) = (
            self.index_of(u).ok_or_else(not_found)?,
            self.index_of(v).ok_or_else(not_found)?,
        );
        self.edges_between(ui, vi)
            .find(|e| e.key == key)
            .map(|e| e.attrs)
            .ok_or_else(not_found)
    }

    /// Number of (parallel) edges `u -> v`; `0` if either node is missing
    fn number_of_edges_between(&self, u: &Self::NodeId, v: &Self::NodeId) -> NumEdges {
        match (self.index_of(u), self.index_of(v)) {
            (Some(u), Some(v)) => self.edges_between(u, v).count() as NumEdges,
            _ => 0,
        }
    }

    fn selfloop_edges(&self) -> impl Iterator<Item = (&Self::NodeId, &Self::NodeId)> + '_ {
        self.vertices().flat_map(move |u| {
            self.edges_between(u, u)
                .map(move |_| (self.node_id(u), self.node_id(u)))
        })
    }

    fn number_of_selfloops(&self) -> NumEdges {
        self.selfloop_edges().count() as NumEdges
    }

    /// Frozen copy of this graph (or view) with all attributes cloned
    fn to_adj_graph(&self) -> AdjGraph<Self::NodeId> {
        AdjGraph::from_graph(self)
    }
}

impl<G> GraphQuery for G where G: EdgeList {}
