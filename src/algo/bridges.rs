use fxhash::FxHashSet;

use super::*;

/// A chain of a chain decomposition as a sequence of consecutive edges
pub type Chain<'a, N> = Vec<(&'a N, &'a N)>;

/// Chain decompositions, bridges and local bridges of undirected graphs.
///
/// An edge is a *bridge* if its removal increases the number of connected components, i.e. if it
/// lies on no cycle. Equivalently, it is covered by no chain of a chain decomposition.
pub trait Bridges: EdgeList + Sized {
    /// Computes the chain decomposition of the graph (or of the component of `root`).
    ///
    /// A DFS first orients every tree edge towards the root and every nontree edge away from the
    /// ancestor. Then, for each node in preorder and each of its nontree edges, the chain starts
    /// with the nontree edge and follows parents until it reaches a node visited by an earlier
    /// chain. Parallel edges of multigraphs are traversed as one.
    ///
    /// # Examples
    /// ```
    /// use lgraphs::{prelude::*, algo::*};
    ///
    /// let mut g = AdjGraph::graph();
    /// g.add_edges_from([(0, 1), (1, 2), (2, 0), (2, 3)]);
    ///
    /// assert_eq!(g.chain_decomposition(None).unwrap(), vec![vec![(&0, &2), (&2, &1), (&1, &0)]]);
    /// ```
    fn chain_decomposition(&self, root: Option<&Self::NodeId>) -> Result<Vec<Chain<'_, Self::NodeId>>> {
        self.require_undirected("chain_decomposition")?;
        let forest = CycleForest::new(self, root)?;
        Ok(forest
            .chains()
            .into_iter()
            .map(|chain| {
                chain
                    .into_iter()
                    .map(|(u, v)| (self.node_id(u), self.node_id(v)))
                    .collect()
            })
            .collect())
    }

    /// Returns all bridges of the graph (or of the component of `root`) in edge order.
    ///
    /// On multigraphs, an edge with parallel copies is never a bridge.
    ///
    /// # Examples
    /// ```
    /// use lgraphs::{prelude::*, algo::*, gens::*};
    ///
    /// let g = barbell_graph(10, 0).unwrap();
    /// assert_eq!(g.bridges(None).unwrap(), vec![(&9, &10)]);
    /// ```
    fn bridges(&self, root: Option<&Self::NodeId>) -> Result<Vec<(&Self::NodeId, &Self::NodeId)>> {
        self.require_undirected("bridges")?;
        let forest = CycleForest::new(self, root)?;

        let chain_edges: FxHashSet<(NodeIndex, NodeIndex)> = forest
            .chains()
            .into_iter()
            .flatten()
            .flat_map(|(u, v)| [(u, v), (v, u)])
            .collect();

        let nodes = match root {
            Some(root) => {
                let mut component = self.vertex_bitset_unset();
                for u in self.bfs_from(self.try_index_of(root)?) {
                    component.set_bit(u);
                }
                component
            }
            None => {
                let mut all = self.vertex_bitset_unset();
                for u in self.vertices() {
                    all.set_bit(u);
                }
                all
            }
        };

        let multigraph = self.is_multigraph();
        Ok(self
            .vertices()
            .filter(|&u| nodes.get_bit(u))
            .flat_map(|u| {
                self.neighbors_of(u)
                    .filter(move |&v| v >= u)
                    .map(move |v| (u, v))
            })
            .filter(|uv| !chain_edges.contains(uv))
            .filter(|&(u, v)| !multigraph || self.edges_between(u, v).nth(1).is_none())
            .map(|(u, v)| (self.node_id(u), self.node_id(v)))
            .collect())
    }

    /// Returns *true* if the graph (or the component of `root`) contains a bridge
    fn has_bridges(&self, root: Option<&Self::NodeId>) -> Result<bool> {
        Ok(!self.bridges(root)?.is_empty())
    }

    /// Returns all *local bridges*: edges whose endpoints have no common neighbor, i.e. edges
    /// that lie in no triangle
    fn local_bridges(&self) -> Result<Vec<(&Self::NodeId, &Self::NodeId)>> {
        self.require_undirected("local_bridges")?;
        self.require_simple("local_bridges")?;

        let mut marked = self.vertex_bitset_unset();
        Ok(self
            .edge_refs()
            .filter(|e| is_local_bridge(self, &mut marked, e.source, e.target))
            .map(|e| (self.node_id(e.source), self.node_id(e.target)))
            .collect())
    }

    /// Like [`Bridges::local_bridges`] but additionally reports the *span* of each local bridge:
    /// the length of a shortest path between its endpoints once the bridge is removed, or `None`
    /// if they become disconnected.
    ///
    /// # Examples
    /// ```
    /// use lgraphs::{prelude::*, algo::*, gens::*};
    ///
    /// let g = cycle_graph(9, GraphKind::UNDIRECTED);
    /// assert!(g.local_bridges_with_span().unwrap().contains(&(&0, &8, Some(8))));
    /// ```
    fn local_bridges_with_span(&self) -> Result<Vec<(&Self::NodeId, &Self::NodeId, Option<NumNodes>)>> {
        let bridges = self.local_bridges()?;

        bridges
            .into_iter()
            .map(|(u, v)| {
                let view = self.restricted_view([], [(u.clone(), v.clone())]);
                let span = view
                    .bfs_layers([u])?
                    .position(|layer| layer.contains(&v))
                    .map(|d| d as NumNodes);
                Ok((u, v, span))
            })
            .collect()
    }
}

impl<G> Bridges for G where G: EdgeList + Sized {}

fn is_local_bridge<G: AdjacencyList>(graph: &G, marked: &mut NodeBitSet, u: NodeIndex, v: NodeIndex) -> bool {
    for w in graph.neighbors_of(u) {
        marked.set_bit(w);
    }
    let shares_neighbor = graph.neighbors_of(v).any(|w| marked.get_bit(w));
    for w in graph.neighbors_of(u) {
        marked.clear_bit(w);
    }
    !shares_neighbor
}

/// Parent pointers of a DFS forest together with the nontree edges directed from the ancestor
struct CycleForest {
    parent: Vec<Option<NodeIndex>>,
    preorder: Vec<NodeIndex>,
    nontree: Vec<Vec<NodeIndex>>,
}

impl CycleForest {
    fn new<G: AdjacencyList>(graph: &G, root: Option<&G::NodeId>) -> Result<Self> {
        let roots = match root {
            Some(root) => vec![graph.try_index_of(root)?],
            None => graph.vertices().collect_vec(),
        };

        let n = graph.node_bound() as usize;
        let mut forest = Self {
            parent: vec![None; n],
            preorder: Vec::with_capacity(graph.len()),
            nontree: vec![Vec::new(); n],
        };
        let mut seen: FxHashSet<(NodeIndex, NodeIndex)> = FxHashSet::default();

        for (u, v, event) in DfsLabeledEdges::new(graph, roots) {
            match event {
                DfsEvent::Forward => {
                    if u != v {
                        forest.parent[v as usize] = Some(u);
                    }
                    forest.preorder.push(v);
                }
                // `u` reaches the discovered `v`: either its parent, an ancestor or a finished
                // descendant whose edge to `u` is already recorded
                DfsEvent::NonTree => {
                    if forest.parent[u as usize] != Some(v) && !seen.contains(&(u, v)) {
                        seen.insert((v, u));
                        forest.nontree[v as usize].push(u);
                    }
                }
                _ => {}
            }
        }

        Ok(forest)
    }

    fn chains(&self) -> Vec<Vec<(NodeIndex, NodeIndex)>> {
        let mut visited = vec![false; self.parent.len()];
        let mut chains = Vec::new();

        for &root in &self.preorder {
            visited[root as usize] = true;

            for &w in &self.nontree[root as usize] {
                let (mut u, mut v) = (root, w);
                let mut chain = Vec::new();
                loop {
                    chain.push((u, v));
                    if visited[v as usize] {
                        break;
                    }
                    visited[v as usize] = true;

                    let Some(p) = self.parent[v as usize] else {
                        break;
                    };
                    (u, v) = (v, p);
                }
                chains.push(chain);
            }
        }

        chains
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::gens::*;

    fn single_bridge() -> AdjGraph<u32> {
        let mut g = AdjGraph::graph();
        g.add_edges_from([
            (1, 2),
            (2, 3),
            (3, 4),
            (3, 5),
            (5, 6),
            (6, 7),
            (7, 8),
            (5, 9),
            (9, 10),
            (1, 3),
            (1, 4),
            (2, 5),
            (5, 10),
            (6, 8),
        ]);
        g
    }

    #[test]
    fn chains() {
        let g = single_bridge();
        let chains = g.chain_decomposition(Some(&1)).unwrap();

        assert_eq!(
            chains,
            vec![
                vec![(&1, &4), (&4, &3), (&3, &2), (&2, &1)],
                vec![(&1, &3)],
                vec![(&2, &5), (&5, &3)],
                vec![(&5, &10), (&10, &9), (&9, &5)],
                vec![(&6, &8), (&8, &7), (&7, &6)],
            ]
        );

        let mut forest = AdjGraph::graph();
        forest.add_edges_from([(0, 1), (1, 2), (3, 4)]);
        assert!(forest.chain_decomposition(None).unwrap().is_empty());
    }

    #[test]
    fn bridges() {
        assert_eq!(single_bridge().bridges(Some(&1)).unwrap(), vec![(&5, &6)]);
        assert_eq!(barbell_graph(3, 0).unwrap().bridges(Some(&0)).unwrap(), vec![(&2, &3)]);

        for n in [1, 5, 10] {
            let g = path_graph(n, GraphKind::UNDIRECTED);
            assert_eq!(g.bridges(None).unwrap(), g.edges().collect_vec());
        }

        let mut g = AdjGraph::graph();
        g.connect_path([0, 1, 2]);
        g.connect_path([4, 5, 6]);
        assert_eq!(g.bridges(Some(&4)).unwrap(), vec![(&4, &5), (&5, &6)]);
        assert_eq!(g.bridges(None).unwrap().len(), 4);
    }

    #[test]
    fn bridges_in_multigraph() {
        let mut g = AdjGraph::multigraph();
        g.add_edges_from([(0, 1), (0, 2), (1, 2), (1, 2), (2, 3), (3, 4), (3, 4)]);
        assert_eq!(g.bridges(None).unwrap(), vec![(&2, &3)]);
        assert_eq!(g.has_bridges(None), Ok(true));

        g.add_edges_from([(0, 1), (0, 2), (2, 3)]);
        assert_eq!(g.has_bridges(None), Ok(false));
    }

    #[test]
    fn errors() {
        let mut g = AdjGraph::graph();
        g.add_nodes_from([1, 2, 3]);
        assert_eq!(
            g.has_bridges(Some(&6)).err().map(|e| e.kind()),
            Some(ErrorKind::NotFound)
        );
        assert_eq!(g.has_bridges(Some(&1)), Ok(false));

        let d = path_graph(3, GraphKind::DIRECTED);
        assert_eq!(
            d.bridges(None).err().map(|e| e.kind()),
            Some(ErrorKind::NotImplementedForKind)
        );
        assert_eq!(
            AdjGraph::<u32>::multigraph().local_bridges().err().map(|e| e.kind()),
            Some(ErrorKind::NotImplementedForKind)
        );
    }

    #[test]
    fn self_loops_are_not_bridges() {
        let mut g = AdjGraph::graph();
        g.add_edges_from([(0, 0), (0, 1)]);
        assert_eq!(g.bridges(None).unwrap(), vec![(&0, &1)]);
    }

    #[test]
    fn local_bridges() {
        let barbell = barbell_graph(4, 0).unwrap();
        let square = cycle_graph(4, GraphKind::UNDIRECTED);
        let triangle = cycle_graph(3, GraphKind::UNDIRECTED);

        assert_eq!(barbell.local_bridges().unwrap(), vec![(&3, &4)]);
        assert_eq!(barbell.local_bridges_with_span().unwrap(), vec![(&3, &4, None)]);

        assert_eq!(square.local_bridges().unwrap(), square.edges().collect_vec());
        assert!(square
            .local_bridges_with_span()
            .unwrap()
            .into_iter()
            .all(|(_, _, span)| span == Some(3)));

        assert!(triangle.local_bridges().unwrap().is_empty());
    }
}
