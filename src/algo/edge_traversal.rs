/*!
Traversals that report edges instead of nodes.

[`EdgeDfs`] and [`EdgeBfs`] report every edge reachable from their sources exactly once:
parallel edges individually, and edges into already discovered nodes as well. Every node's edges
are collected when the node is discovered and consumed through a cursor that survives restarts
from later sources.

On directed graphs an [`EdgeOrientation`] decides which edges leave a node; every reported edge
carries the [`EdgeDirection`] it was followed in. Undirected graphs ignore the orientation and
report all edges as [`EdgeDirection::Forward`], seen from the endpoint they were reached from.
*/

use super::*;
use fxhash::FxHashSet;
use std::{collections::VecDeque, vec::IntoIter};

/// Which edges of a directed graph a traversal follows out of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EdgeOrientation {
    /// Outgoing edges, from source to target
    #[default]
    Original,
    /// Incoming edges, from target to source
    Reverse,
    /// Outgoing edges first, then incoming edges
    Ignore,
}

/// The direction an edge was followed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeDirection {
    /// From `source` to `target`
    Forward,
    /// From `target` to `source`
    Reverse,
}

/// An edge reported by an edge traversal on node indices
pub type TraversedEdge<'a> = (EdgeRef<'a>, EdgeDirection);

/// An edge reported by an edge traversal on node ids: `(source, target, key, direction)`
pub type OrientedEdge<'a, N> = (&'a N, &'a N, EdgeKey, EdgeDirection);

/// State shared by both edge traversals
struct EdgeWalk<'a, G> {
    graph: &'a G,
    orientation: EdgeOrientation,
    discovered: NodeBitSet,
    pending: Vec<IntoIter<TraversedEdge<'a>>>,
    traversed: FxHashSet<(NodeIndex, NodeIndex, EdgeKey)>,
}

impl<'a, G: EdgeList> EdgeWalk<'a, G> {
    fn new(graph: &'a G, orientation: EdgeOrientation) -> Self {
        Self {
            graph,
            orientation,
            discovered: graph.vertex_bitset_unset(),
            pending: vec![Vec::new().into_iter(); graph.node_bound() as usize],
            traversed: FxHashSet::default(),
        }
    }

    /// Collects the edges leaving `u`; returns *false* if `u` was discovered before
    fn discover(&mut self, u: NodeIndex) -> bool {
        if self.discovered.set_bit(u) {
            return false;
        }

        let graph = self.graph;
        let forward = |e: EdgeRef<'a>| (e, EdgeDirection::Forward);
        let reverse = |e: EdgeRef<'a>| (e, EdgeDirection::Reverse);
        let edges: Vec<_> = match (graph.is_directed(), self.orientation) {
            (false, _) | (true, EdgeOrientation::Original) => {
                graph.edges_from(u).map(forward).collect()
            }
            (true, EdgeOrientation::Reverse) => graph.edges_into(u).map(reverse).collect(),
            (true, EdgeOrientation::Ignore) => graph
                .edges_from(u)
                .map(forward)
                .chain(graph.edges_into(u).map(reverse))
                .collect(),
        };
        self.pending[u as usize] = edges.into_iter();
        true
    }

    fn next_edge_of(&mut self, u: NodeIndex) -> Option<TraversedEdge<'a>> {
        self.pending[u as usize].next()
    }

    /// Returns *true* the first time the edge is seen from either side
    fn traverse(&mut self, edge: &EdgeRef) -> bool {
        let id = if self.graph.is_directed() {
            (edge.source, edge.target, edge.key)
        } else {
            let Edge(u, v) = edge.edge().normalized();
            (u, v, edge.key)
        };
        self.traversed.insert(id)
    }
}

/// The node a traversal continues at after following `edge`
fn head_of((edge, direction): &TraversedEdge) -> NodeIndex {
    match direction {
        EdgeDirection::Forward => edge.target,
        EdgeDirection::Reverse => edge.source,
    }
}

/// Depth-first traversal over edges. Always continues at the most recently reached node that
/// still has an unseen edge.
pub struct EdgeDfs<'a, G> {
    walk: EdgeWalk<'a, G>,
    sources: IntoIter<NodeIndex>,
    stack: Vec<NodeIndex>,
}

impl<'a, G: EdgeList> EdgeDfs<'a, G> {
    /// Searches from every source in order; sources reached before only resume their cursor
    pub fn new<I>(graph: &'a G, sources: I, orientation: EdgeOrientation) -> Self
    where
        I: IntoIterator<Item = NodeIndex>,
    {
        Self {
            walk: EdgeWalk::new(graph, orientation),
            sources: sources.into_iter().collect_vec().into_iter(),
            stack: Vec::new(),
        }
    }
}

impl<'a, G: EdgeList> Iterator for EdgeDfs<'a, G> {
    type Item = TraversedEdge<'a>;

    fn next(&mut self) -> Option<TraversedEdge<'a>> {
        loop {
            let Some(&u) = self.stack.last() else {
                let source = self.sources.next()?;
                self.walk.discover(source);
                self.stack.push(source);
                continue;
            };

            match self.walk.next_edge_of(u) {
                None => {
                    self.stack.pop();
                }
                Some(edge) if self.walk.traverse(&edge.0) => {
                    let v = head_of(&edge);
                    self.walk.discover(v);
                    self.stack.push(v);
                    return Some(edge);
                }
                Some(_) => {}
            }
        }
    }
}

/// Breadth-first traversal over edges. All sources start in the queue, so the edges of every
/// source come before those of nodes discovered from them.
pub struct EdgeBfs<'a, G> {
    walk: EdgeWalk<'a, G>,
    queue: VecDeque<NodeIndex>,
}

impl<'a, G: EdgeList> EdgeBfs<'a, G> {
    pub fn new<I>(graph: &'a G, sources: I, orientation: EdgeOrientation) -> Self
    where
        I: IntoIterator<Item = NodeIndex>,
    {
        let mut walk = EdgeWalk::new(graph, orientation);
        let queue = sources.into_iter().filter(|&s| walk.discover(s)).collect();
        Self { walk, queue }
    }
}

impl<'a, G: EdgeList> Iterator for EdgeBfs<'a, G> {
    type Item = TraversedEdge<'a>;

    fn next(&mut self) -> Option<TraversedEdge<'a>> {
        loop {
            let &u = self.queue.front()?;
            let Some(edge) = self.walk.next_edge_of(u) else {
                self.queue.pop_front();
                continue;
            };

            let v = head_of(&edge);
            if self.walk.discover(v) {
                self.queue.push_back(v);
            }
            if self.walk.traverse(&edge.0) {
                return Some(edge);
            }
        }
    }
}

/// Edge traversals on node ids.
///
/// # Examples
/// ```
/// use lgraphs::{prelude::*, algo::*};
///
/// let mut g = AdjGraph::multidigraph();
/// g.add_edges_from([(0, 1), (1, 0), (1, 0)]);
///
/// let edges: Vec<_> = g
///     .edge_dfs(None, EdgeOrientation::Original)
///     .unwrap()
///     .map(|(u, v, key, _)| (*u, *v, key))
///     .collect();
/// assert_eq!(edges, vec![(0, 1, 0), (1, 0, 0), (1, 0, 1)]);
/// ```
pub trait EdgeTraversal: EdgeList + Sized {
    /// Edges in depth-first order from `sources` (all nodes in insertion order if `None`).
    /// Fails with `NodeNotFound` if a source is not in the graph.
    fn edge_dfs(
        &self,
        sources: Option<&[Self::NodeId]>,
        orientation: EdgeOrientation,
    ) -> Result<impl Iterator<Item = OrientedEdge<'_, Self::NodeId>> + '_> {
        let sources = source_indices(self, sources)?;
        Ok(with_ids(self, EdgeDfs::new(self, sources, orientation)))
    }

    /// Edges in breadth-first order from `sources` (all nodes in insertion order if `None`).
    /// Fails with `NodeNotFound` if a source is not in the graph.
    fn edge_bfs(
        &self,
        sources: Option<&[Self::NodeId]>,
        orientation: EdgeOrientation,
    ) -> Result<impl Iterator<Item = OrientedEdge<'_, Self::NodeId>> + '_> {
        let sources = source_indices(self, sources)?;
        Ok(with_ids(self, EdgeBfs::new(self, sources, orientation)))
    }
}

impl<G> EdgeTraversal for G where G: EdgeList + Sized {}

fn source_indices<G: GraphNodeOrder>(graph: &G, sources: Option<&[G::NodeId]>) -> Result<Vec<NodeIndex>> {
    match sources {
        Some(ids) => ids.iter().map(|s| graph.try_index_of(s)).collect(),
        None => Ok(graph.vertices().collect()),
    }
}

fn with_ids<'a, G, I>(graph: &'a G, edges: I) -> impl Iterator<Item = OrientedEdge<'a, G::NodeId>> + 'a
where
    G: GraphNodeOrder,
    I: Iterator<Item = TraversedEdge<'a>> + 'a,
{
    edges.map(move |(e, direction)| {
        (graph.node_id(e.source), graph.node_id(e.target), e.key, direction)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gens::*;
    use super::EdgeDirection::{Forward as F, Reverse as R};
    use super::EdgeOrientation::{Ignore, Original, Reverse};

    const DFS_EDGES: [(i32, i32); 5] = [(0, 1), (1, 0), (1, 0), (2, 1), (3, 1)];
    const BFS_EDGES: [(i32, i32); 6] = [(0, 1), (1, 0), (1, 0), (2, 0), (2, 1), (3, 1)];

    fn graph_of(kind: GraphKind, edges: &[(i32, i32)]) -> AdjGraph<i32> {
        let mut g = AdjGraph::new(kind);
        g.add_edges_from(edges.iter().copied());
        g
    }

    fn pairs<'a, N: Clone + 'a>(
        edges: impl Iterator<Item = OrientedEdge<'a, N>>,
    ) -> Vec<(N, N, EdgeDirection)> {
        edges.map(|(u, v, _, d)| (u.clone(), v.clone(), d)).collect()
    }

    fn keyed<'a, N: Clone + 'a>(
        edges: impl Iterator<Item = OrientedEdge<'a, N>>,
    ) -> Vec<(N, N, EdgeKey, EdgeDirection)> {
        edges.map(|(u, v, k, d)| (u.clone(), v.clone(), k, d)).collect()
    }

    #[test]
    fn dfs_simple_graphs() {
        let g = graph_of(GraphKind::UNDIRECTED, &DFS_EDGES);
        assert_eq!(
            pairs(g.edge_dfs(None, Original).unwrap()),
            vec![(0, 1, F), (1, 2, F), (1, 3, F)]
        );
        // undirected graphs have no reverse side
        assert_eq!(
            pairs(g.edge_dfs(None, Reverse).unwrap()),
            pairs(g.edge_dfs(None, Original).unwrap())
        );

        let g = graph_of(GraphKind::DIRECTED, &DFS_EDGES);
        assert_eq!(
            pairs(g.edge_dfs(None, Original).unwrap()),
            vec![(0, 1, F), (1, 0, F), (2, 1, F), (3, 1, F)]
        );
        assert_eq!(
            pairs(g.edge_dfs(None, Reverse).unwrap()),
            vec![(1, 0, R), (0, 1, R), (2, 1, R), (3, 1, R)]
        );
        assert_eq!(
            pairs(g.edge_dfs(None, Ignore).unwrap()),
            vec![(0, 1, F), (1, 0, F), (2, 1, R), (3, 1, R)]
        );
    }

    #[test]
    fn dfs_multigraphs() {
        let g = graph_of(GraphKind::MULTI_UNDIRECTED, &DFS_EDGES);
        assert_eq!(
            keyed(g.edge_dfs(None, Original).unwrap()),
            vec![(0, 1, 0, F), (1, 0, 1, F), (0, 1, 2, F), (1, 2, 0, F), (1, 3, 0, F)]
        );

        let g = graph_of(GraphKind::MULTI_DIRECTED, &DFS_EDGES);
        assert_eq!(
            keyed(g.edge_dfs(None, Original).unwrap()),
            vec![(0, 1, 0, F), (1, 0, 0, F), (1, 0, 1, F), (2, 1, 0, F), (3, 1, 0, F)]
        );
        assert_eq!(
            keyed(g.edge_dfs(None, Reverse).unwrap()),
            vec![(1, 0, 0, R), (0, 1, 0, R), (1, 0, 1, R), (2, 1, 0, R), (3, 1, 0, R)]
        );
        assert_eq!(
            keyed(g.edge_dfs(None, Ignore).unwrap()),
            vec![(0, 1, 0, F), (1, 0, 0, F), (1, 0, 1, R), (2, 1, 0, R), (3, 1, 0, R)]
        );
    }

    #[test]
    fn dfs_along_path() {
        let g = path_graph(4, GraphKind::DIRECTED);
        assert_eq!(
            pairs(g.edge_dfs(Some(&[0]), Original).unwrap()),
            vec![(0, 1, F), (1, 2, F), (2, 3, F)]
        );
        assert_eq!(
            pairs(g.edge_dfs(Some(&[3]), Reverse).unwrap()),
            vec![(2, 3, R), (1, 2, R), (0, 1, R)]
        );
        assert_eq!(
            pairs(g.edge_dfs(Some(&[0]), Ignore).unwrap()),
            vec![(0, 1, F), (1, 2, F), (2, 3, F)]
        );
    }

    #[test]
    fn bfs_simple_graphs() {
        let mut g = graph_of(GraphKind::UNDIRECTED, &BFS_EDGES);
        assert_eq!(
            pairs(g.edge_bfs(None, Original).unwrap()),
            vec![(0, 1, F), (0, 2, F), (1, 2, F), (1, 3, F)]
        );
        g.add_edge(4, 5);
        assert_eq!(
            pairs(g.edge_bfs(Some(&[0]), Original).unwrap()),
            vec![(0, 1, F), (0, 2, F), (1, 2, F), (1, 3, F)]
        );

        let g = graph_of(GraphKind::DIRECTED, &BFS_EDGES);
        assert_eq!(
            pairs(g.edge_bfs(None, Original).unwrap()),
            vec![(0, 1, F), (1, 0, F), (2, 0, F), (2, 1, F), (3, 1, F)]
        );
        assert_eq!(
            pairs(g.edge_bfs(None, Reverse).unwrap()),
            vec![(1, 0, R), (2, 0, R), (0, 1, R), (2, 1, R), (3, 1, R)]
        );
        assert_eq!(
            pairs(g.edge_bfs(None, Ignore).unwrap()),
            vec![(0, 1, F), (1, 0, R), (2, 0, R), (2, 1, R), (3, 1, R)]
        );
    }

    #[test]
    fn bfs_multigraphs() {
        let g = graph_of(GraphKind::MULTI_UNDIRECTED, &BFS_EDGES);
        assert_eq!(
            keyed(g.edge_bfs(None, Original).unwrap()),
            vec![
                (0, 1, 0, F),
                (0, 1, 1, F),
                (0, 1, 2, F),
                (0, 2, 0, F),
                (1, 2, 0, F),
                (1, 3, 0, F)
            ]
        );

        let g = graph_of(GraphKind::MULTI_DIRECTED, &BFS_EDGES);
        assert_eq!(
            keyed(g.edge_bfs(None, Original).unwrap()),
            vec![
                (0, 1, 0, F),
                (1, 0, 0, F),
                (1, 0, 1, F),
                (2, 0, 0, F),
                (2, 1, 0, F),
                (3, 1, 0, F)
            ]
        );
        assert_eq!(
            keyed(g.edge_bfs(None, Reverse).unwrap()),
            vec![
                (1, 0, 0, R),
                (1, 0, 1, R),
                (2, 0, 0, R),
                (0, 1, 0, R),
                (2, 1, 0, R),
                (3, 1, 0, R)
            ]
        );
        assert_eq!(
            keyed(g.edge_bfs(None, Ignore).unwrap()),
            vec![
                (0, 1, 0, F),
                (1, 0, 0, R),
                (1, 0, 1, R),
                (2, 0, 0, R),
                (2, 1, 0, R),
                (3, 1, 0, R)
            ]
        );
    }

    #[test]
    fn empty_and_missing_sources() {
        let g = AdjGraph::<i32>::graph();
        assert_eq!(g.edge_dfs(None, Original).unwrap().count(), 0);
        assert_eq!(g.edge_bfs(None, Original).unwrap().count(), 0);

        let g = graph_of(GraphKind::DIRECTED, &DFS_EDGES);
        assert_eq!(
            g.edge_bfs(Some(&[0, 7]), Original).err().map(|e| e.kind()),
            Some(ErrorKind::NotFound)
        );
        assert!(g.edge_dfs(Some(&[9]), Ignore).is_err());
    }

    #[test]
    fn every_reachable_edge_once() {
        use rand::SeedableRng;
        use rand_pcg::Pcg64Mcg;

        let rng = &mut Pcg64Mcg::seed_from_u64(11);
        for kind in [GraphKind::UNDIRECTED, GraphKind::DIRECTED] {
            let g = AdjGraph::gnp(rng, 40, 0.1, kind);
            let m = g.number_of_edges() as usize;

            assert_eq!(g.edge_dfs(None, Original).unwrap().count(), m);
            assert_eq!(g.edge_bfs(None, Original).unwrap().count(), m);
            assert_eq!(g.edge_dfs(None, Ignore).unwrap().count(), m);
            assert_eq!(g.edge_bfs(None, Reverse).unwrap().count(), m);
        }
    }
}
