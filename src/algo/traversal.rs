/*!
Breadth-first traversals and traversal-derived utilities.

This module provides:
- The index-level [`TraversalSearch`] iterator (BFS with and without predecessor tracking)
  that every other search of this crate is built on, including the flow algorithms.
- The id-level [`Bfs`] builder with depth limits and neighbor ordering.
- Layers, descendants and ancestors.
- Topological generations for directed acyclic graphs (Kahn's algorithm).
- The [`Traversal`] trait exposing all of the above directly on graphs and views.

Traversal iterators are lazy: they borrow the graph and only expand the frontier on `next`.
*/

use super::*;
use std::{cmp::Ordering, collections::VecDeque, marker::PhantomData};

/// Comparator on node indices used to sort neighbors before they are discovered
pub type NeighborOrder<'a> = Box<dyn Fn(NodeIndex, NodeIndex) -> Ordering + 'a>;

/// Abstraction for items yielded by a traversal iterator.
///
/// A `SequencedItem` encodes the **node currently visited**
/// and an **optional predecessor**, its parent in the traversal tree.
///
/// Two implementations are provided:
/// - [`NodeIndex`] stores only the node.
/// - [`PredecessorOfNode`] stores `(predecessor, node)` pairs.
pub trait SequencedItem: Clone + Copy {
    /// Constructs a new item with a predecessor.
    fn new_with_predecessor(predecessor: NodeIndex, item: NodeIndex) -> Self;

    /// Constructs a new item without predecessor information.
    fn new_without_predecessor(item: NodeIndex) -> Self;

    /// Returns the node represented by this item.
    fn item(&self) -> NodeIndex;

    /// Returns the predecessor of this node, if any.
    fn predecessor(&self) -> Option<NodeIndex>;

    fn predecessor_with_item(&self) -> (Option<NodeIndex>, NodeIndex) {
        (self.predecessor(), self.item())
    }
}

impl SequencedItem for NodeIndex {
    fn new_with_predecessor(_: NodeIndex, item: NodeIndex) -> Self {
        item
    }
    fn new_without_predecessor(item: NodeIndex) -> Self {
        item
    }
    fn item(&self) -> NodeIndex {
        *self
    }
    fn predecessor(&self) -> Option<NodeIndex> {
        None
    }
}

/// `(predecessor, node)`; a root is encoded as `(node, node)`
pub type PredecessorOfNode = (NodeIndex, NodeIndex);

impl SequencedItem for PredecessorOfNode {
    fn new_with_predecessor(predecessor: NodeIndex, item: NodeIndex) -> Self {
        (predecessor, item)
    }
    fn new_without_predecessor(item: NodeIndex) -> Self {
        (item, item)
    }
    fn item(&self) -> NodeIndex {
        self.1
    }
    fn predecessor(&self) -> Option<NodeIndex> {
        if self.0 == self.1 { None } else { Some(self.0) }
    }
}

/// The frontier of a traversal
pub trait NodeSequencer<T> {
    /// Creates a new sequencer initialized with a single node.
    fn init(u: T) -> Self;

    fn push(&mut self, item: T);

    fn pop(&mut self) -> Option<T>;

    /// Returns the number of items currently in the frontier.
    fn cardinality(&self) -> usize;
}

impl<T> NodeSequencer<T> for VecDeque<T> {
    fn init(u: T) -> Self {
        Self::from(vec![u])
    }
    fn push(&mut self, u: T) {
        self.push_back(u)
    }
    fn pop(&mut self) -> Option<T> {
        self.pop_front()
    }
    fn cardinality(&self) -> usize {
        self.len()
    }
}

/// Generic traversal iterator.
///
/// Maintains an explicit frontier of nodes to visit and a set of discovered nodes; a node is
/// marked when it enters the frontier, so every node is yielded at most once.
/// Optionally, a depth limit stops the expansion of nodes at that depth, a comparator orders
/// the neighbors of each expanded node and a stopper node ends the search once it is reached.
pub struct TraversalSearch<'a, G, S, I, V = NodeBitSet>
where
    G: AdjacencyList,
    S: NodeSequencer<I>,
    I: SequencedItem,
    V: Set<NodeIndex>,
{
    graph: &'a G,
    visited: V,
    sequencer: S,
    stop_at: Option<NodeIndex>,
    depth_limit: Option<(NumNodes, Vec<NumNodes>)>,
    order: Option<NeighborOrder<'a>>,
    _item: PhantomData<I>,
}

/// A **breadth-first search** iterator using a custom visited-set
pub type BFSWithSet<'a, G, V> = TraversalSearch<'a, G, VecDeque<NodeIndex>, NodeIndex, V>;

/// A BFS iterator visiting nodes in breadth-first order from a given start node
pub type BFS<'a, G> = TraversalSearch<'a, G, VecDeque<NodeIndex>, NodeIndex, NodeBitSet>;

/// A BFS iterator that records predecessors, i.e. yields the edges of the BFS tree
pub type BFSWithPredecessor<'a, G> =
    TraversalSearch<'a, G, VecDeque<PredecessorOfNode>, PredecessorOfNode, NodeBitSet>;

impl<G, S, I, V> Iterator for TraversalSearch<'_, G, S, I, V>
where
    G: AdjacencyList,
    S: NodeSequencer<I>,
    I: SequencedItem,
    V: Set<NodeIndex>,
{
    type Item = I;

    fn next(&mut self) -> Option<Self::Item> {
        let popped = self.sequencer.pop()?;
        let u = popped.item();

        if self.stop_at == Some(u) {
            while self.sequencer.pop().is_some() {} // drop all
            return Some(popped);
        }

        if self.expands(u) {
            let graph = self.graph;
            if let Some(order) = &self.order {
                let mut neighbors = graph.neighbors_of(u).collect_vec();
                neighbors.sort_by(|&a, &b| order(a, b));
                for v in neighbors {
                    self.discover(u, v);
                }
            } else {
                for v in graph.neighbors_of(u) {
                    self.discover(u, v);
                }
            }
        }

        Some(popped)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (
            self.sequencer.cardinality(),
            Some(self.graph.len().saturating_sub(self.visited.len()) + self.sequencer.cardinality()),
        )
    }
}

impl<'a, G, S, I, V> TraversalSearch<'a, G, S, I, V>
where
    G: AdjacencyList,
    S: NodeSequencer<I>,
    I: SequencedItem,
    V: Set<NodeIndex> + FromCapacity,
{
    /// Creates a new traversal iterator starting from `start`.
    pub fn new(graph: &'a G, start: NodeIndex) -> Self {
        let mut visited =
            V::from_total_used_capacity(graph.node_bound() as usize, graph.len());
        visited.insert(start);
        Self {
            graph,
            visited,
            sequencer: S::init(I::new_without_predecessor(start)),
            stop_at: None,
            depth_limit: None,
            order: None,
            _item: PhantomData,
        }
    }
}

impl<'a, G, S, I, V> TraversalSearch<'a, G, S, I, V>
where
    G: AdjacencyList,
    S: NodeSequencer<I>,
    I: SequencedItem,
    V: Set<NodeIndex>,
{
    fn expands(&self, u: NodeIndex) -> bool {
        match &self.depth_limit {
            None => true,
            Some((limit, depths)) => depths[u as usize] < *limit,
        }
    }

    fn discover(&mut self, u: NodeIndex, v: NodeIndex) {
        if self.visited.insert(v) {
            return;
        }

        if let Some((_, depths)) = &mut self.depth_limit {
            depths[v as usize] = depths[u as usize] + 1;
        }
        self.sequencer.push(I::new_with_predecessor(u, v));
    }

    /// Nodes at depth `limit` (the start node having depth `0`) are yielded but not expanded.
    /// Has to be called before the first call to `next`.
    pub fn set_depth_limit(&mut self, limit: NumNodes) {
        self.depth_limit = Some((limit, vec![0; self.graph.node_bound() as usize]));
    }

    pub fn with_depth_limit(mut self, limit: NumNodes) -> Self {
        self.set_depth_limit(limit);
        self
    }

    /// Neighbors of each expanded node are discovered in the order given by `order`
    pub fn set_neighbor_order(&mut self, order: NeighborOrder<'a>) {
        self.order = Some(order);
    }

    pub fn with_neighbor_order(mut self, order: NeighborOrder<'a>) -> Self {
        self.set_neighbor_order(order);
        self
    }

    /// Tries to restart the search at a yet unvisited node and returns
    /// true iff successful. Requires that search came to a hold earlier,
    /// i.e. self.next() returned None
    pub fn try_restart_at_unvisited(&mut self) -> bool {
        assert_eq!(self.sequencer.cardinality(), 0);
        let node = self.graph.vertices().find(|u| !self.visited.contains(u));
        match node {
            None => false,
            Some(x) => {
                self.visited.insert(x);
                if let Some((_, depths)) = &mut self.depth_limit {
                    depths[x as usize] = 0;
                }
                self.sequencer.push(I::new_without_predecessor(x));
                true
            }
        }
    }

    /// Sets a stopper node. If this node is reached, the iterator returns it and afterwards only None.
    pub fn set_stop_at(&mut self, stopper: NodeIndex) {
        self.stop_at = Some(stopper);
    }

    /// Sets a stopper node. If this node is reached, the iterator returns it and afterwards only None.
    pub fn stop_at(mut self, stopper: NodeIndex) -> Self {
        self.set_stop_at(stopper);
        self
    }

    /// Returns *true* if `u` has been discovered so far
    pub fn did_visit_node(&self, u: NodeIndex) -> bool {
        self.visited.contains(&u)
    }

    /// Consumes the traversal search and returns true iff the requested node can be visited, i.e.
    /// if there exists a (directed) path from the start node to u.
    ///
    /// # Warning
    /// It is undefined behavior to call the method on a partially executed iterator.
    pub fn is_node_reachable(mut self, u: NodeIndex) -> bool {
        assert_eq!(self.sequencer.cardinality(), 1);
        self.visited.remove(&u);
        self.next();
        self.any(|v| v.item() == u)
    }
}

impl<G, S, V> TraversalSearch<'_, G, S, PredecessorOfNode, V>
where
    G: AdjacencyList,
    S: NodeSequencer<PredecessorOfNode>,
    V: Set<NodeIndex>,
{
    /// Consumes the iterator and records the parent of each visited node into `tree`.
    /// Entries of unvisited nodes (and the roots) remain unchanged.
    ///
    /// # Requirements
    /// `tree.len()` must be at least `graph.node_bound()`.
    pub fn parent_array_into(&mut self, tree: &mut [NodeIndex]) {
        for pred_with_item in self.by_ref() {
            if let Some(p) = pred_with_item.predecessor() {
                tree[pred_with_item.item() as usize] = p;
            }
        }
    }

    /// Like [`TraversalSearch::parent_array_into`] on a fresh array where every node is its own parent
    pub fn parent_array(&mut self) -> Vec<NodeIndex> {
        let mut tree: Vec<_> = (0..self.graph.node_bound()).collect();
        self.parent_array_into(&mut tree);
        tree
    }
}

/// Configurable breadth-first search from a single source on node ids.
///
/// # Examples
/// ```
/// use lgraphs::{prelude::*, algo::*};
///
/// let mut g = AdjGraph::digraph();
/// g.add_edges_from([(0, 2), (0, 1), (1, 3), (2, 4)]);
///
/// let edges: Vec<_> = g.bfs(&0).unwrap().sort_neighbors_by(|a, b| a.cmp(b)).edges().collect();
/// assert_eq!(edges, vec![(&0, &1), (&0, &2), (&1, &3), (&2, &4)]);
/// ```
pub struct Bfs<'a, G: AdjacencyList> {
    graph: &'a G,
    source: NodeIndex,
    depth_limit: Option<NumNodes>,
    order: Option<NeighborOrder<'a>>,
}

impl<'a, G: AdjacencyList> Bfs<'a, G> {
    /// Fails with `NodeNotFound` if `source` is not in the graph
    pub fn new(graph: &'a G, source: &G::NodeId) -> Result<Self> {
        Ok(Self {
            graph,
            source: graph.try_index_of(source)?,
            depth_limit: None,
            order: None,
        })
    }

    /// Only nodes at depth below `limit` are expanded
    pub fn depth_limit(mut self, limit: NumNodes) -> Self {
        self.depth_limit = Some(limit);
        self
    }

    /// Like [`Bfs::depth_limit`], but `None` removes the limit
    pub fn maybe_depth_limit(mut self, limit: Option<NumNodes>) -> Self {
        self.depth_limit = limit;
        self
    }

    /// Neighbors of every expanded node are discovered in the order given by `cmp`
    pub fn sort_neighbors_by<F>(mut self, cmp: F) -> Self
    where
        F: Fn(&G::NodeId, &G::NodeId) -> Ordering + 'a,
    {
        let graph = self.graph;
        self.order = Some(Box::new(move |a, b| cmp(graph.node_id(a), graph.node_id(b))));
        self
    }

    /// The underlying index-level search
    pub fn search(self) -> BFSWithPredecessor<'a, G> {
        let mut search = BFSWithPredecessor::new(self.graph, self.source);
        if let Some(limit) = self.depth_limit {
            search.set_depth_limit(limit);
        }
        if let Some(order) = self.order {
            search.set_neighbor_order(order);
        }
        search
    }

    /// Tree edges `(parent, child)` in the order the children are discovered
    pub fn edges(self) -> impl Iterator<Item = (&'a G::NodeId, &'a G::NodeId)> + 'a {
        let graph = self.graph;
        self.search().filter_map(move |item| {
            item.predecessor()
                .map(|p| (graph.node_id(p), graph.node_id(item.item())))
        })
    }

    /// `(child, parent)` pairs in the order the children are discovered
    pub fn predecessors(self) -> impl Iterator<Item = (&'a G::NodeId, &'a G::NodeId)> + 'a {
        self.edges().map(|(p, c)| (c, p))
    }

    /// `(parent, children)` for every expanded node with at least one child, in the order the
    /// parents are expanded. The source is always reported, possibly with no children.
    pub fn successors(self) -> impl Iterator<Item = (&'a G::NodeId, Vec<&'a G::NodeId>)> + 'a {
        let (graph, source) = (self.graph, self.source);
        let mut edges = self
            .search()
            .filter_map(|item| item.predecessor().map(|p| (p, item.item())))
            .peekable();
        let mut first = true;

        std::iter::from_fn(move || {
            let parent = match edges.peek() {
                Some(&(p, _)) => p,
                None if first => source,
                None => return None,
            };
            first = false;

            let mut children = Vec::new();
            while let Some((_, c)) = edges.next_if(|&(p, _)| p == parent) {
                children.push(graph.node_id(c));
            }
            Some((graph.node_id(parent), children))
        })
    }

    /// The BFS tree as a directed graph without attributes, oriented away from the source
    pub fn tree(self) -> AdjGraph<G::NodeId> {
        let mut tree = AdjGraph::digraph();
        tree.add_node(self.graph.node_id(self.source).clone());
        tree.add_edges_from(self.edges().map(|(u, v)| (u.clone(), v.clone())));
        tree
    }
}

/// Iterator over the BFS layers of a set of sources: the sources first, then all nodes at
/// distance one from them, and so on.
pub struct BfsLayers<'a, G: AdjacencyList> {
    graph: &'a G,
    visited: NodeBitSet,
    layer: Vec<NodeIndex>,
}

impl<'a, G: AdjacencyList> BfsLayers<'a, G> {
    /// Duplicate sources are reported once
    pub fn new<I>(graph: &'a G, sources: I) -> Self
    where
        I: IntoIterator<Item = NodeIndex>,
    {
        let mut visited = graph.vertex_bitset_unset();
        let layer = sources
            .into_iter()
            .filter(|&u| !visited.set_bit(u))
            .collect();
        Self {
            graph,
            visited,
            layer,
        }
    }
}

impl<'a, G: AdjacencyList> Iterator for BfsLayers<'a, G> {
    type Item = Vec<&'a G::NodeId>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.layer.is_empty() {
            return None;
        }

        let graph = self.graph;
        let mut next_layer = Vec::new();
        for &u in &self.layer {
            for v in graph.neighbors_of(u) {
                if !self.visited.set_bit(v) {
                    next_layer.push(v);
                }
            }
        }

        let layer = std::mem::replace(&mut self.layer, next_layer);
        Some(layer.into_iter().map(|u| graph.node_id(u)).collect())
    }
}

/// Topological generations by Kahn's algorithm: a node is in generation `i` if its longest
/// incoming path has `i` arcs.
///
/// Yields `Ok(generation)` as long as nodes without remaining predecessors exist. If the graph
/// has a cycle, the nodes on or behind it are never released and the final item is an
/// `Unfeasible` error.
pub struct TopologicalGenerations<'a, G> {
    graph: &'a G,
    in_degs: Vec<NumNodes>,
    remaining: NumNodes,
    generation: Vec<NodeIndex>,
    done: bool,
}

impl<'a, G: DirectedAdjacencyList> TopologicalGenerations<'a, G> {
    /// Fails with `NotImplementedForKind` on undirected graphs
    pub fn new(graph: &'a G) -> Result<Self> {
        graph.require_directed("topological_generations")?;

        // parallel arcs count once here and are released once below
        let mut in_degs = vec![0; graph.node_bound() as usize];
        for u in graph.vertices() {
            for v in graph.neighbors_of(u) {
                in_degs[v as usize] += 1;
            }
        }

        let generation = graph
            .vertices()
            .filter(|&u| in_degs[u as usize] == 0)
            .collect();

        Ok(Self {
            graph,
            in_degs,
            remaining: graph.number_of_nodes(),
            generation,
            done: false,
        })
    }
}

impl<G: DirectedAdjacencyList> Iterator for TopologicalGenerations<'_, G> {
    type Item = Result<Vec<NodeIndex>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if self.generation.is_empty() {
            self.done = true;
            return (self.remaining > 0).then(|| {
                Err(GraphError::Unfeasible(
                    "graph contains a cycle".to_string(),
                ))
            });
        }

        let graph = self.graph;
        let mut next_generation = Vec::new();
        for &u in &self.generation {
            for v in graph.neighbors_of(u) {
                self.in_degs[v as usize] -= 1;
                if self.in_degs[v as usize] == 0 {
                    next_generation.push(v);
                }
            }
        }

        let generation = std::mem::replace(&mut self.generation, next_generation);
        self.remaining -= generation.len() as NumNodes;
        Some(Ok(generation))
    }
}

/// Provides convenient traversal methods (BFS, reachability, topological order)
pub trait Traversal: AdjacencyList + Sized {
    /// Returns an iterator over the node indices reachable from `start` in BFS order.
    ///
    /// # Examples
    /// ```
    /// use lgraphs::{prelude::*, algo::*};
    ///
    /// let mut g = AdjGraph::graph();
    /// g.add_edges_from([("a", "b"), ("b", "c")]);
    ///
    /// let order: Vec<_> = g.bfs_from(0).collect();
    /// assert_eq!(order, vec![0, 1, 2]);
    /// ```
    fn bfs_from(&self, start: NodeIndex) -> BFS<'_, Self> {
        BFS::new(self, start)
    }

    /// Returns a BFS iterator starting from `start` that additionally
    /// yields the predecessor of each node.
    fn bfs_with_predecessor(&self, start: NodeIndex) -> BFSWithPredecessor<'_, Self> {
        BFSWithPredecessor::new(self, start)
    }

    /// Returns a configurable breadth-first search from `source`
    fn bfs(&self, source: &Self::NodeId) -> Result<Bfs<'_, Self>> {
        Bfs::new(self, source)
    }

    /// BFS tree edges from `source`; only nodes at depth below `depth_limit` are expanded
    fn bfs_edges(
        &self,
        source: &Self::NodeId,
        depth_limit: Option<NumNodes>,
    ) -> Result<impl Iterator<Item = (&Self::NodeId, &Self::NodeId)> + '_> {
        Ok(self.bfs(source)?.maybe_depth_limit(depth_limit).edges())
    }

    /// The BFS tree rooted at `source` as a directed graph
    fn bfs_tree(
        &self,
        source: &Self::NodeId,
        depth_limit: Option<NumNodes>,
    ) -> Result<AdjGraph<Self::NodeId>> {
        Ok(self.bfs(source)?.maybe_depth_limit(depth_limit).tree())
    }

    /// `(child, parent)` for every node discovered from `source`
    fn bfs_predecessors(
        &self,
        source: &Self::NodeId,
        depth_limit: Option<NumNodes>,
    ) -> Result<impl Iterator<Item = (&Self::NodeId, &Self::NodeId)> + '_> {
        Ok(self.bfs(source)?.maybe_depth_limit(depth_limit).predecessors())
    }

    /// `(parent, children)` in BFS order, see [`Bfs::successors`]
    fn bfs_successors(
        &self,
        source: &Self::NodeId,
        depth_limit: Option<NumNodes>,
    ) -> Result<impl Iterator<Item = (&Self::NodeId, Vec<&Self::NodeId>)> + '_> {
        Ok(self.bfs(source)?.maybe_depth_limit(depth_limit).successors())
    }

    /// BFS layers of `sources`. Fails with `NodeNotFound` if any source is missing.
    fn bfs_layers<'s, I>(&self, sources: I) -> Result<BfsLayers<'_, Self>>
    where
        I: IntoIterator<Item = &'s Self::NodeId>,
        Self::NodeId: 's,
    {
        let sources = sources
            .into_iter()
            .map(|id| self.try_index_of(id))
            .collect::<Result<Vec<_>>>()?;
        Ok(BfsLayers::new(self, sources))
    }

    /// All nodes at shortest-path distance exactly `distance` from `source`
    fn descendants_at_distance(
        &self,
        source: &Self::NodeId,
        distance: NumNodes,
    ) -> Result<Vec<&Self::NodeId>> {
        Ok(self
            .bfs_layers([source])?
            .nth(distance as usize)
            .unwrap_or_default())
    }

    /// All nodes reachable from `source` (excluding `source`) in BFS order
    fn descendants(&self, source: &Self::NodeId) -> Result<Vec<&Self::NodeId>> {
        let u = self.try_index_of(source)?;
        Ok(self.bfs_from(u).skip(1).map(|v| self.node_id(v)).collect())
    }

    /// All nodes that can reach `target` (excluding `target`) in BFS order of the reversed graph
    fn ancestors(&self, target: &Self::NodeId) -> Result<Vec<&Self::NodeId>>
    where
        Self: DirectedAdjacencyList,
    {
        if self.is_undirected() {
            return self.descendants(target);
        }

        let u = self.try_index_of(target)?;
        let reversed = ReverseView::new(self);
        Ok(reversed
            .bfs_from(u)
            .skip(1)
            .map(|v| self.node_id(v))
            .collect())
    }

    /// Index-level topological generations, see [`TopologicalGenerations`]
    fn topological_generations_of(&self) -> Result<TopologicalGenerations<'_, Self>>
    where
        Self: DirectedAdjacencyList,
    {
        TopologicalGenerations::new(self)
    }

    /// Topological generations of a DAG.
    /// Fails with `NotImplementedForKind` if undirected and `Unfeasible` if there is a cycle.
    ///
    /// # Examples
    /// ```
    /// use lgraphs::{prelude::*, algo::*};
    ///
    /// let mut g = AdjGraph::digraph();
    /// g.add_edges_from([(2, 3), (1, 3), (3, 4)]);
    /// assert_eq!(g.topological_generations().unwrap(), vec![vec![&2, &1], vec![&3], vec![&4]]);
    /// ```
    fn topological_generations(&self) -> Result<Vec<Vec<&Self::NodeId>>>
    where
        Self: DirectedAdjacencyList,
    {
        self.topological_generations_of()?
            .map(|generation| -> Result<Vec<_>> {
                Ok(generation?
                    .into_iter()
                    .map(|u| self.node_id(u))
                    .collect())
            })
            .collect()
    }

    /// All nodes such that every arc points from an earlier to a later node
    fn topological_sort(&self) -> Result<Vec<&Self::NodeId>>
    where
        Self: DirectedAdjacencyList,
    {
        Ok(self
            .topological_generations()?
            .into_iter()
            .flatten()
            .collect())
    }

    /// Returns *true* if the graph is directed and has no directed cycle
    fn is_directed_acyclic_graph(&self) -> bool
    where
        Self: DirectedAdjacencyList,
    {
        self.topological_generations_of()
            .is_ok_and(|mut generations| generations.all(|generation| generation.is_ok()))
    }
}

impl<G> Traversal for G where G: AdjacencyList + Sized {}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::gens::*;
    use itertools::Itertools;

    fn tree() -> AdjGraph<u32> {
        let mut g = AdjGraph::graph();
        g.connect_path([0, 1, 2, 3, 4, 5, 6]);
        g.connect_path([2, 7, 8, 9, 10]);
        g
    }

    fn disconnected() -> AdjGraph<u32> {
        let mut g = AdjGraph::graph();
        g.add_edges_from([(0, 1), (2, 3)]);
        g.connect_path([2, 7, 8, 9, 10]);
        g
    }

    fn diamond() -> AdjGraph<u32> {
        let mut g = AdjGraph::graph();
        g.add_edges_from([(0, 1), (1, 2), (1, 3), (2, 4), (3, 4)]);
        g
    }

    #[test]
    fn bfs_order() {
        let g = diamond();
        assert_eq!(g.bfs_from(0).collect_vec(), vec![0, 1, 2, 3, 4]);
        assert_eq!(
            g.bfs_edges(&0, None).unwrap().collect_vec(),
            vec![(&0, &1), (&1, &2), (&1, &3), (&2, &4)]
        );
        assert!(g.bfs_edges(&7, None).is_err());
    }

    #[test]
    fn successors_and_predecessors() {
        let g = diamond();
        assert_eq!(
            g.bfs_successors(&0, None).unwrap().collect_vec(),
            vec![(&0, vec![&1]), (&1, vec![&2, &3]), (&2, vec![&4])]
        );
        assert_eq!(
            g.bfs_predecessors(&0, None).unwrap().collect_vec(),
            vec![(&1, &0), (&2, &1), (&3, &1), (&4, &2)]
        );

        let mut isolated = AdjGraph::graph();
        isolated.add_nodes_from([1, 2]);
        assert_eq!(
            isolated.bfs_successors(&1, None).unwrap().collect_vec(),
            vec![(&1, vec![])]
        );
        let t = isolated.bfs_tree(&1, None).unwrap();
        assert_eq!(t.nodes().collect_vec(), vec![&1]);
        assert_eq!(t.number_of_edges(), 0);
    }

    #[test]
    fn reverse_direction() {
        let mut d = AdjGraph::digraph();
        d.add_edges_from([(0, 1), (1, 2), (1, 3), (2, 4), (3, 4)]);
        let r = d.reverse_view().unwrap();
        assert_eq!(
            r.bfs_edges(&4, None).unwrap().collect_vec(),
            vec![(&4, &2), (&4, &3), (&2, &1), (&1, &0)]
        );
    }

    #[test]
    fn sorted_neighbors() {
        let mut d = AdjGraph::digraph();
        d.add_edges_from([(0, 1), (0, 2), (1, 4), (1, 3), (2, 5)]);

        let asc = d.bfs(&0).unwrap().sort_neighbors_by(|a, b| a.cmp(b)).edges().collect_vec();
        assert_eq!(asc, vec![(&0, &1), (&0, &2), (&1, &3), (&1, &4), (&2, &5)]);

        let desc = d.bfs(&0).unwrap().sort_neighbors_by(|a, b| b.cmp(a)).edges().collect_vec();
        assert_eq!(desc, vec![(&0, &2), (&0, &1), (&2, &5), (&1, &4), (&1, &3)]);
    }

    #[test]
    fn depth_limited() {
        let g = tree();
        assert_eq!(
            g.bfs_edges(&9, Some(4)).unwrap().collect_vec(),
            vec![(&9, &8), (&9, &10), (&8, &7), (&7, &2), (&2, &1), (&2, &3)]
        );
        assert_eq!(
            g.bfs_successors(&1, Some(3)).unwrap().collect_vec(),
            vec![(&1, vec![&0, &2]), (&2, vec![&3, &7]), (&3, vec![&4]), (&7, vec![&8])]
        );
        assert_eq!(
            g.bfs_predecessors(&1, Some(3)).unwrap().sorted().collect_vec(),
            vec![(&0, &1), (&2, &1), (&3, &2), (&4, &3), (&7, &2), (&8, &7)]
        );

        let t = g.bfs_tree(&3, Some(1)).unwrap();
        assert!(t.is_directed());
        assert_eq!(t.edges().sorted().collect_vec(), vec![(&3, &2), (&3, &4)]);

        let d = disconnected();
        assert_eq!(
            d.bfs_predecessors(&7, Some(2)).unwrap().sorted().collect_vec(),
            vec![(&2, &7), (&3, &2), (&8, &7), (&9, &8)]
        );
        assert_eq!(g.bfs_edges(&0, Some(0)).unwrap().count(), 0);
    }

    #[test]
    fn layers() {
        let g = diamond();
        assert_eq!(
            g.bfs_layers([&0]).unwrap().collect_vec(),
            vec![vec![&0], vec![&1], vec![&2, &3], vec![&4]]
        );
        assert!(g.bfs_layers([&0, &42]).is_err());

        let t = tree();
        assert_eq!(t.bfs_layers([&0]).unwrap().count(), 7);
        assert_eq!(t.descendants_at_distance(&0, 3).unwrap(), vec![&3, &7]);
        assert_eq!(t.descendants_at_distance(&0, 9).unwrap(), Vec::<&u32>::new());

        let d = disconnected();
        assert_eq!(
            d.bfs_layers([&2]).unwrap().collect_vec(),
            vec![vec![&2], vec![&3, &7], vec![&8], vec![&9], vec![&10]]
        );
        assert_eq!(
            d.bfs_layers([&0, &2, &0]).unwrap().next(),
            Some(vec![&0, &2])
        );
    }

    #[test]
    fn stopper_and_parents() {
        let g = path_graph(4, GraphKind::UNDIRECTED);
        assert_eq!(g.bfs_from(0).stop_at(1).collect_vec(), vec![0, 1]);
        assert_eq!(g.bfs_with_predecessor(1).parent_array(), vec![1, 1, 1, 2]);
        assert!(g.bfs_from(0).is_node_reachable(3));
    }

    #[test]
    fn restart() {
        let g = disconnected();
        let mut bfs = g.bfs_from(0);
        assert_eq!(bfs.by_ref().count(), 2);
        assert!(bfs.try_restart_at_unvisited());
        assert_eq!(bfs.by_ref().count(), 6);
        assert!(!bfs.try_restart_at_unvisited());
    }

    #[test]
    fn reachability() {
        let mut d = AdjGraph::digraph();
        d.add_edges_from([("a", "b"), ("b", "c"), ("d", "c")]);

        assert_eq!(d.descendants(&"a").unwrap(), vec![&"b", &"c"]);
        assert_eq!(d.ancestors(&"c").unwrap(), vec![&"b", &"d", &"a"]);
        assert!(d.ancestors(&"z").is_err());

        let u = diamond();
        assert_eq!(u.ancestors(&4).unwrap().len(), 4);
    }

    #[test]
    fn topological() {
        let mut d = AdjGraph::multidigraph();
        d.add_edges_from([(2, 0), (1, 0), (0, 3), (0, 4), (0, 5), (3, 6), (3, 6)]);

        let order = d.topological_sort().unwrap();
        assert_eq!(order.len(), 7);
        for (u, v) in d.edges() {
            let pos = |x| order.iter().position(|&y| y == x);
            assert!(pos(u) < pos(v));
        }
        assert!(d.is_directed_acyclic_graph());

        d.add_edge(6, 2);
        assert_eq!(
            d.topological_sort().err().map(|e| e.kind()),
            Some(ErrorKind::Unfeasible)
        );
        assert!(!d.is_directed_acyclic_graph());

        let mut looped = AdjGraph::digraph();
        looped.add_edge(0, 0);
        assert!(!looped.is_directed_acyclic_graph());

        let u = diamond();
        assert_eq!(
            u.topological_sort().err().map(|e| e.kind()),
            Some(ErrorKind::NotImplementedForKind)
        );
        assert!(!u.is_directed_acyclic_graph());
    }
}
