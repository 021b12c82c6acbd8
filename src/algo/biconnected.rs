/*!
Biconnected components and articulation points of undirected graphs.

Both are read off a single low-point walk over the events of [`DfsLabeledEdges`]: every tree
and back edge is pushed on an edge stack, and once the subtree of a child `c` of `p` is finished
with `low[c] >= discovery[p]`, the edges above the tree edge `(p, c)` form one block and `p`
separates it from the rest (roots only if they have more than one child).

Parallel edges collapse onto their endpoints, so a dyad is a block of its own.
*/

use fxhash::FxHashSet;

use super::{
    connectivity::{ids_of, require_nonempty},
    *,
};

/// Item of the index-level walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockEvent {
    /// Edges of a biconnected component in the order the search consumed them
    Component(Vec<Edge>),
    /// A cut vertex; reported once per block it separates
    ArticulationPoint(NodeIndex),
}

/// Index-level iterator over the blocks and cut vertices of a graph. Components are reported as
/// soon as they close, articulation points right after the block proving them.
pub struct BiconnectedComponents<'a, G: AdjacencyList> {
    search: DfsLabeledEdges<'a, G>,
    discovery: Vec<NumNodes>,
    low: Vec<NumNodes>,
    parent: Vec<NodeIndex>,
    tree_edge_at: Vec<usize>,
    edge_stack: Vec<Edge>,
    root_children: NumNodes,
    discovered: NumNodes,
    queued: Option<BlockEvent>,
}

impl<'a, G: AdjacencyList> BiconnectedComponents<'a, G> {
    pub fn new(graph: &'a G) -> Self {
        let n = graph.node_bound() as usize;
        Self {
            search: DfsLabeledEdges::new(graph, graph.vertices()),
            discovery: vec![0; n],
            low: vec![0; n],
            parent: (0..graph.node_bound()).collect(),
            tree_edge_at: vec![0; n],
            edge_stack: Vec::new(),
            root_children: 0,
            discovered: 0,
            queued: None,
        }
    }

    fn discover(&mut self, u: NodeIndex) {
        self.discovery[u as usize] = self.discovered;
        self.low[u as usize] = self.discovered;
        self.discovered += 1;
    }

    /// Pops every edge pushed since the tree edge into `child`
    fn close_block(&mut self, child: NodeIndex) -> BlockEvent {
        BlockEvent::Component(self.edge_stack.split_off(self.tree_edge_at[child as usize]))
    }
}

impl<G: AdjacencyList> Iterator for BiconnectedComponents<'_, G> {
    type Item = BlockEvent;

    fn next(&mut self) -> Option<BlockEvent> {
        if let Some(event) = self.queued.take() {
            return Some(event);
        }

        loop {
            let (u, v, event) = self.search.next()?;
            let (ui, vi) = (u as usize, v as usize);

            match event {
                DfsEvent::Forward if u == v => {
                    self.root_children = 0;
                    self.discover(v);
                }
                DfsEvent::Forward => {
                    self.discover(v);
                    self.parent[vi] = u;
                    self.tree_edge_at[vi] = self.edge_stack.len();
                    self.edge_stack.push(Edge(u, v));
                }
                DfsEvent::NonTree => {
                    // edges to finished descendants were pushed from the other side already
                    if v != self.parent[ui] && self.discovery[vi] <= self.discovery[ui] {
                        self.low[ui] = self.low[ui].min(self.discovery[vi]);
                        self.edge_stack.push(Edge(u, v));
                    }
                }
                DfsEvent::Reverse if u == v => {
                    if self.root_children > 1 {
                        return Some(BlockEvent::ArticulationPoint(u));
                    }
                }
                DfsEvent::Reverse if self.parent[ui] == u => {
                    self.root_children += 1;
                    return Some(self.close_block(v));
                }
                DfsEvent::Reverse => {
                    let separates = self.low[vi] >= self.discovery[ui];
                    self.low[ui] = self.low[ui].min(self.low[vi]);
                    if separates {
                        self.queued = Some(BlockEvent::ArticulationPoint(u));
                        return Some(self.close_block(v));
                    }
                }
                DfsEvent::ReverseDepthLimit => {}
            }
        }
    }
}

/// Biconnected components and cut vertices of undirected graphs.
///
/// # Examples
/// ```
/// use lgraphs::{prelude::*, algo::*, gens::*};
///
/// let mut g = path_graph(4, GraphKind::UNDIRECTED);
/// assert_eq!(g.articulation_points().unwrap(), vec![&2, &1]);
/// assert_eq!(g.is_biconnected(), Ok(false));
///
/// g.add_edge(0, 3);
/// assert_eq!(g.is_biconnected(), Ok(true));
/// ```
pub trait Biconnectivity: AdjacencyList + Sized {
    /// Edges of every biconnected component; each edge lies in exactly one component
    fn biconnected_component_edges(&self) -> Result<Vec<Vec<(&Self::NodeId, &Self::NodeId)>>> {
        self.require_undirected("biconnected_component_edges")?;
        Ok(blocks(self)
            .map(|edges| {
                edges
                    .into_iter()
                    .map(|Edge(u, v)| (self.node_id(u), self.node_id(v)))
                    .collect()
            })
            .collect())
    }

    /// Nodes of every biconnected component in order of appearance. Articulation points belong
    /// to several components; isolated nodes to none.
    fn biconnected_components(&self) -> Result<Vec<Vec<&Self::NodeId>>> {
        self.require_undirected("biconnected_components")?;
        Ok(blocks(self).map(|edges| ids_of(self, nodes_of(&edges))).collect())
    }

    /// Nodes whose removal increases the number of connected components, each reported once
    fn articulation_points(&self) -> Result<Vec<&Self::NodeId>> {
        self.require_undirected("articulation_points")?;
        let mut seen = FxHashSet::default();
        Ok(BiconnectedComponents::new(self)
            .filter_map(|event| match event {
                BlockEvent::ArticulationPoint(u) if seen.insert(u) => Some(self.node_id(u)),
                _ => None,
            })
            .collect())
    }

    /// Returns *true* if the graph is connected and has no articulation point. Graphs with a
    /// single node have no biconnected component and are not biconnected.
    fn is_biconnected(&self) -> Result<bool> {
        self.require_undirected("is_biconnected")?;
        require_nonempty(self, "biconnectivity")?;

        let mut components = blocks(self);
        let Some(first) = components.next() else {
            return Ok(false);
        };
        if components.next().is_some() {
            return Ok(false);
        }
        Ok(nodes_of(&first).len() == self.len())
    }
}

impl<G> Biconnectivity for G where G: AdjacencyList + Sized {}

fn blocks<G: AdjacencyList>(graph: &G) -> impl Iterator<Item = Vec<Edge>> + '_ {
    BiconnectedComponents::new(graph).filter_map(|event| match event {
        BlockEvent::Component(edges) => Some(edges),
        BlockEvent::ArticulationPoint(_) => None,
    })
}

fn nodes_of(edges: &[Edge]) -> Vec<NodeIndex> {
    edges.iter().flat_map(|&Edge(u, v)| [u, v]).unique().collect()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::gens::*;

    fn sorted_blocks<N: Ord + Clone>(components: Vec<Vec<&N>>) -> Vec<Vec<N>> {
        components
            .into_iter()
            .map(|c| c.into_iter().cloned().sorted().collect_vec())
            .sorted()
            .collect()
    }

    #[test]
    fn path_blocks() {
        let g = path_graph(4, GraphKind::UNDIRECTED);
        assert_eq!(
            g.biconnected_component_edges().unwrap(),
            vec![vec![(&2, &3)], vec![(&1, &2)], vec![(&0, &1)]]
        );
        assert_eq!(g.articulation_points().unwrap(), vec![&2, &1]);
    }

    #[test]
    fn barbell_cut_vertices() {
        let g = barbell_graph(10, 0).unwrap();

        assert_eq!(
            g.articulation_points().unwrap().into_iter().copied().sorted().collect_vec(),
            vec![9, 10]
        );

        let blocks = sorted_blocks(g.biconnected_components().unwrap());
        assert_eq!(
            blocks,
            vec![(0..10).collect_vec(), vec![9, 10], (10..20).collect_vec()]
        );
        assert_eq!(g.is_biconnected(), Ok(false));
    }

    #[test]
    fn cycle_is_biconnected() {
        let g = cycle_graph(6, GraphKind::UNDIRECTED);
        assert!(g.articulation_points().unwrap().is_empty());
        assert_eq!(g.biconnected_components().unwrap().len(), 1);
        assert_eq!(g.is_biconnected(), Ok(true));
    }

    #[test]
    fn bowtie() {
        let mut g = AdjGraph::graph();
        g.add_edges_from([(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 2)]);

        assert_eq!(g.articulation_points().unwrap(), vec![&2]);
        assert_eq!(
            sorted_blocks(g.biconnected_components().unwrap()),
            vec![vec![0, 1, 2], vec![2, 3, 4]]
        );
    }

    #[test]
    fn degenerate_inputs() {
        let kind = |r: Result<bool>| r.err().map(|e| e.kind());

        assert_eq!(
            kind(AdjGraph::<u32>::graph().is_biconnected()),
            Some(ErrorKind::PointlessConcept)
        );
        assert!(AdjGraph::<u32>::graph().articulation_points().unwrap().is_empty());
        assert_eq!(empty_graph(1, GraphKind::UNDIRECTED).is_biconnected(), Ok(false));
        assert_eq!(
            kind(path_graph(3, GraphKind::DIRECTED).is_biconnected()),
            Some(ErrorKind::NotImplementedForKind)
        );
        assert!(path_graph(3, GraphKind::DIRECTED).articulation_points().is_err());

        let mut dyad = AdjGraph::multigraph();
        dyad.add_edges_from([(0, 1), (0, 1)]);
        assert_eq!(dyad.is_biconnected(), Ok(true));
        assert_eq!(dyad.biconnected_component_edges().unwrap(), vec![vec![(&0, &1)]]);
    }

    #[test]
    fn cut_vertices_disconnect() {
        let rng = &mut Pcg64Mcg::seed_from_u64(5);

        for _ in 0..10 {
            let g = AdjGraph::gnp(rng, 30, 0.08, GraphKind::UNDIRECTED);
            let components = g.number_connected_components().unwrap();
            let cuts = g.articulation_points().unwrap();

            for u in g.nodes() {
                let mut h = g.copy();
                h.remove_node(u).unwrap();
                let splits = h.number_connected_components().unwrap() > components;
                assert_eq!(splits, cuts.contains(&u), "{u}");
            }

            let edges = g
                .biconnected_component_edges()
                .unwrap()
                .into_iter()
                .flatten()
                .map(|(u, v)| (*u.min(v), *u.max(v)))
                .collect_vec();
            assert_eq!(edges.len() as NumEdges, g.number_of_edges());
            assert!(edges.iter().all_unique());
        }
    }
}
