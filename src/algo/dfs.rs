/*!
Depth-first search as an explicit state machine.

[`DfsLabeledEdges`] keeps one stack frame per node on the current DFS path, each holding the
lazily consumed neighbor iterator of its node. It reports every edge inspected by the search
with a [`DfsEvent`]; all other DFS products (edges, pre- and postorder, trees) are filters of
this event stream. The stack is explicit, so deep graphs do not exhaust the call stack.
*/

use super::*;
use fxhash::FxHashMap;
use std::{cmp::Ordering, vec::IntoIter};

/// Classification of an edge inspected by a depth-first search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DfsEvent {
    /// `(u, v)` discovers `v`; `(r, r)` starts the search at root `r`
    Forward,
    /// `(u, v)` leads to an already discovered `v`
    NonTree,
    /// The search returns from `v` to its parent `u`; `(r, r)` finishes root `r`
    Reverse,
    /// `v` was discovered at the depth limit and is finished without being expanded
    ReverseDepthLimit,
}

/// An inspected edge `(u, v)` on node indices with its classification
pub type LabeledEdge = (NodeIndex, NodeIndex, DfsEvent);

enum Children<I> {
    Lazy(I),
    Sorted(IntoIter<NodeIndex>),
}

impl<I: Iterator<Item = NodeIndex>> Iterator for Children<I> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<NodeIndex> {
        match self {
            Children::Lazy(iter) => iter.next(),
            Children::Sorted(iter) => iter.next(),
        }
    }
}

struct Frame<'a, G: AdjacencyList + 'a> {
    node: NodeIndex,
    children: Children<G::NeighborIter<'a>>,
}

/// Iterator over the labeled edges of a depth-first search on node indices.
///
/// The search starts at every root (in the given order) that has not been discovered by the
/// searches from earlier roots.
pub struct DfsLabeledEdges<'a, G: AdjacencyList> {
    graph: &'a G,
    roots: IntoIter<NodeIndex>,
    visited: NodeBitSet,
    stack: Vec<Frame<'a, G>>,
    depth_limit: NumNodes,
    order: Option<NeighborOrder<'a>>,
    queued: Option<LabeledEdge>,
}

impl<'a, G: AdjacencyList> DfsLabeledEdges<'a, G> {
    pub fn new<I>(graph: &'a G, roots: I) -> Self
    where
        I: IntoIterator<Item = NodeIndex>,
    {
        Self {
            graph,
            roots: roots.into_iter().collect_vec().into_iter(),
            visited: graph.vertex_bitset_unset(),
            stack: Vec::new(),
            depth_limit: NumNodes::MAX,
            order: None,
            queued: None,
        }
    }

    /// Nodes at depth `limit` (roots having depth `0`) are discovered but not expanded.
    /// Roots are always expanded.
    pub fn with_depth_limit(mut self, limit: NumNodes) -> Self {
        self.depth_limit = limit;
        self
    }

    pub fn with_neighbor_order(mut self, order: NeighborOrder<'a>) -> Self {
        self.order = Some(order);
        self
    }

    fn frame(&self, node: NodeIndex) -> Frame<'a, G> {
        let graph = self.graph;
        let children = match &self.order {
            None => Children::Lazy(graph.neighbors_of(node)),
            Some(order) => {
                let mut neighbors = graph.neighbors_of(node).collect_vec();
                neighbors.sort_by(|&a, &b| order(a, b));
                Children::Sorted(neighbors.into_iter())
            }
        };
        Frame { node, children }
    }
}

impl<G: AdjacencyList> Iterator for DfsLabeledEdges<'_, G> {
    type Item = LabeledEdge;

    fn next(&mut self) -> Option<LabeledEdge> {
        if let Some(edge) = self.queued.take() {
            return Some(edge);
        }

        if let Some(frame) = self.stack.last_mut() {
            let parent = frame.node;

            return Some(match frame.children.next() {
                Some(child) if self.visited.get_bit(child) => (parent, child, DfsEvent::NonTree),
                Some(child) => {
                    self.visited.set_bit(child);
                    if (self.stack.len() as NumNodes) < self.depth_limit {
                        let frame = self.frame(child);
                        self.stack.push(frame);
                    } else {
                        self.queued = Some((parent, child, DfsEvent::ReverseDepthLimit));
                    }
                    (parent, child, DfsEvent::Forward)
                }
                None => {
                    self.stack.pop();
                    match self.stack.last() {
                        Some(grandparent) => (grandparent.node, parent, DfsEvent::Reverse),
                        None => (parent, parent, DfsEvent::Reverse),
                    }
                }
            });
        }

        let visited = &self.visited;
        let root = self.roots.by_ref().find(|&r| !visited.get_bit(r))?;
        self.visited.set_bit(root);

        let frame = self.frame(root);
        self.stack.push(frame);
        Some((root, root, DfsEvent::Forward))
    }
}

/// Configurable depth-first search on node ids.
///
/// Without a source, the search restarts at every undiscovered node in insertion order.
///
/// # Examples
/// ```
/// use lgraphs::{prelude::*, algo::*};
///
/// let mut g = AdjGraph::graph();
/// g.add_edges_from([(0, 1), (1, 2), (2, 0), (2, 3)]);
///
/// let pre: Vec<_> = g.dfs(Some(&0)).unwrap().preorder().collect();
/// assert_eq!(pre, vec![&0, &1, &2, &3]);
/// let post: Vec<_> = g.dfs(Some(&0)).unwrap().postorder().collect();
/// assert_eq!(post, vec![&3, &2, &1, &0]);
/// ```
pub struct Dfs<'a, G: AdjacencyList> {
    graph: &'a G,
    source: Option<NodeIndex>,
    depth_limit: Option<NumNodes>,
    order: Option<NeighborOrder<'a>>,
}

impl<'a, G: AdjacencyList> Dfs<'a, G> {
    /// Fails with `NodeNotFound` if `source` is given but not in the graph
    pub fn new(graph: &'a G, source: Option<&G::NodeId>) -> Result<Self> {
        Ok(Self {
            graph,
            source: source.map(|s| graph.try_index_of(s)).transpose()?,
            depth_limit: None,
            order: None,
        })
    }

    pub fn depth_limit(mut self, limit: NumNodes) -> Self {
        self.depth_limit = Some(limit);
        self
    }

    pub fn maybe_depth_limit(mut self, limit: Option<NumNodes>) -> Self {
        self.depth_limit = limit;
        self
    }

    pub fn sort_neighbors_by<F>(mut self, cmp: F) -> Self
    where
        F: Fn(&G::NodeId, &G::NodeId) -> Ordering + 'a,
    {
        let graph = self.graph;
        self.order = Some(Box::new(move |a, b| cmp(graph.node_id(a), graph.node_id(b))));
        self
    }

    /// The underlying index-level search
    pub fn search(self) -> DfsLabeledEdges<'a, G> {
        let graph = self.graph;
        let mut search = match self.source {
            Some(s) => DfsLabeledEdges::new(graph, [s]),
            None => DfsLabeledEdges::new(graph, graph.vertices()),
        };
        if let Some(limit) = self.depth_limit {
            search = search.with_depth_limit(limit);
        }
        if let Some(order) = self.order {
            search = search.with_neighbor_order(order);
        }
        search
    }

    /// All inspected edges with their classification
    pub fn labeled_edges(
        self,
    ) -> impl Iterator<Item = (&'a G::NodeId, &'a G::NodeId, DfsEvent)> + 'a {
        let graph = self.graph;
        self.search()
            .map(move |(u, v, event)| (graph.node_id(u), graph.node_id(v), event))
    }

    /// Tree edges `(parent, child)` in discovery order
    pub fn edges(self) -> impl Iterator<Item = (&'a G::NodeId, &'a G::NodeId)> + 'a {
        self.labeled_edges()
            .filter(|(u, v, event)| *event == DfsEvent::Forward && u != v)
            .map(|(u, v, _)| (u, v))
    }

    /// Nodes in the order they are discovered
    pub fn preorder(self) -> impl Iterator<Item = &'a G::NodeId> + 'a {
        self.labeled_edges()
            .filter(|(_, _, event)| *event == DfsEvent::Forward)
            .map(|(_, v, _)| v)
    }

    /// Nodes in the order they are finished; nodes at the depth limit finish right away
    pub fn postorder(self) -> impl Iterator<Item = &'a G::NodeId> + 'a {
        self.labeled_edges()
            .filter(|(_, _, event)| {
                matches!(event, DfsEvent::Reverse | DfsEvent::ReverseDepthLimit)
            })
            .map(|(_, v, _)| v)
    }

    /// `(child, parent)` for every node discovered from a parent
    pub fn predecessors(self) -> impl Iterator<Item = (&'a G::NodeId, &'a G::NodeId)> + 'a {
        self.edges().map(|(p, c)| (c, p))
    }

    /// `(parent, children)` for every node with children, ordered by the first discovery of a
    /// child of the parent
    pub fn successors(self) -> Vec<(&'a G::NodeId, Vec<&'a G::NodeId>)> {
        let graph = self.graph;
        let mut slot_of = FxHashMap::default();
        let mut successors: Vec<(NodeIndex, Vec<&'a G::NodeId>)> = Vec::new();

        for (u, v, event) in self.search() {
            if event != DfsEvent::Forward || u == v {
                continue;
            }
            let slot = *slot_of.entry(u).or_insert_with(|| {
                successors.push((u, Vec::new()));
                successors.len() - 1
            });
            successors[slot].1.push(graph.node_id(v));
        }

        successors
            .into_iter()
            .map(|(u, children)| (graph.node_id(u), children))
            .collect()
    }

    /// The DFS forest as a directed graph without attributes, oriented away from the roots.
    /// Contains the source only, or every node if no source was given, plus all tree edges.
    pub fn tree(self) -> AdjGraph<G::NodeId> {
        let graph = self.graph;
        let mut tree = AdjGraph::digraph();
        match self.source {
            Some(s) => tree.add_node(graph.node_id(s).clone()),
            None => tree.add_nodes_from(graph.nodes().cloned()),
        }
        tree.add_edges_from(self.edges().map(|(u, v)| (u.clone(), v.clone())));
        tree
    }
}

/// Depth-first searches directly on graphs and views
pub trait DepthFirstSearch: AdjacencyList + Sized {
    /// Returns a configurable depth-first search from `source` (all nodes if `None`)
    fn dfs(&self, source: Option<&Self::NodeId>) -> Result<Dfs<'_, Self>> {
        Dfs::new(self, source)
    }

    fn dfs_labeled_edges(
        &self,
        source: Option<&Self::NodeId>,
        depth_limit: Option<NumNodes>,
    ) -> Result<impl Iterator<Item = (&Self::NodeId, &Self::NodeId, DfsEvent)> + '_> {
        Ok(self.dfs(source)?.maybe_depth_limit(depth_limit).labeled_edges())
    }

    fn dfs_edges(
        &self,
        source: Option<&Self::NodeId>,
        depth_limit: Option<NumNodes>,
    ) -> Result<impl Iterator<Item = (&Self::NodeId, &Self::NodeId)> + '_> {
        Ok(self.dfs(source)?.maybe_depth_limit(depth_limit).edges())
    }

    fn dfs_preorder_nodes(
        &self,
        source: Option<&Self::NodeId>,
        depth_limit: Option<NumNodes>,
    ) -> Result<impl Iterator<Item = &Self::NodeId> + '_> {
        Ok(self.dfs(source)?.maybe_depth_limit(depth_limit).preorder())
    }

    fn dfs_postorder_nodes(
        &self,
        source: Option<&Self::NodeId>,
        depth_limit: Option<NumNodes>,
    ) -> Result<impl Iterator<Item = &Self::NodeId> + '_> {
        Ok(self.dfs(source)?.maybe_depth_limit(depth_limit).postorder())
    }

    fn dfs_tree(
        &self,
        source: Option<&Self::NodeId>,
        depth_limit: Option<NumNodes>,
    ) -> Result<AdjGraph<Self::NodeId>> {
        Ok(self.dfs(source)?.maybe_depth_limit(depth_limit).tree())
    }

    fn dfs_predecessors(
        &self,
        source: Option<&Self::NodeId>,
        depth_limit: Option<NumNodes>,
    ) -> Result<impl Iterator<Item = (&Self::NodeId, &Self::NodeId)> + '_> {
        Ok(self.dfs(source)?.maybe_depth_limit(depth_limit).predecessors())
    }

    fn dfs_successors(
        &self,
        source: Option<&Self::NodeId>,
        depth_limit: Option<NumNodes>,
    ) -> Result<Vec<(&Self::NodeId, Vec<&Self::NodeId>)>> {
        Ok(self.dfs(source)?.maybe_depth_limit(depth_limit).successors())
    }
}

impl<G> DepthFirstSearch for G where G: AdjacencyList + Sized {}
