use crate::{attr::AttrMap, edge::*, node::*, ops::*};

/// Read-through view treating every arc of a directed graph as an undirected edge.
///
/// On simple graphs reciprocal arcs `u -> v` and `v -> u` become one edge; seen from `u` the
/// edge carries the attributes of `u -> v`. On multigraphs the keys of both directions are
/// united, an incoming key being dropped if the same key also exists outgoing.
/// On undirected graphs the view is the identity.
pub struct UndirectedView<'g, G> {
    graph: &'g G,
}

impl<'g, G: EdgeList> UndirectedView<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &'g G {
        self.graph
    }

    /// Returns *true* if the incoming arc `e = (w, u)` is already reported as an outgoing one of `u`
    fn covered_by_out(&self, e: &EdgeRef) -> bool {
        if self.graph.is_multigraph() {
            self.graph
                .edges_between(e.target, e.source)
                .any(|out| out.key == e.key)
        } else {
            self.graph.has_edge_between(e.target, e.source)
        }
    }
}

/// Out-neighbors followed by the in-neighbors that are no out-neighbors
pub struct UnionNeighbors<'a, G: DirectedAdjacencyList + 'a> {
    graph: &'a G,
    u: NodeIndex,
    out: G::NeighborIter<'a>,
    inc: Option<G::InNeighborIter<'a>>,
}

impl<'a, G: DirectedAdjacencyList + AdjacencyTest> Iterator for UnionNeighbors<'a, G> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<NodeIndex> {
        if let Some(v) = self.out.next() {
            return Some(v);
        }

        let (graph, u) = (self.graph, self.u);
        self.inc
            .as_mut()?
            .find(|&w| !graph.has_edge_between(u, w))
    }
}

impl<G: GraphType> GraphType for UndirectedView<'_, G> {
    fn kind(&self) -> GraphKind {
        self.graph.kind().as_undirected()
    }
}

impl<G: EdgeList> GraphNodeOrder for UndirectedView<'_, G> {
    type NodeId = G::NodeId;

    fn node_bound(&self) -> NumNodes {
        self.graph.node_bound()
    }

    fn number_of_nodes(&self) -> NumNodes {
        self.graph.number_of_nodes()
    }

    fn vertices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.vertices()
    }

    fn contains_vertex(&self, u: NodeIndex) -> bool {
        self.graph.contains_vertex(u)
    }

    fn node_id(&self, u: NodeIndex) -> &G::NodeId {
        self.graph.node_id(u)
    }

    fn index_of(&self, id: &G::NodeId) -> Option<NodeIndex> {
        self.graph.index_of(id)
    }
}

impl<G: EdgeList> AdjacencyList for UndirectedView<'_, G> {
    type NeighborIter<'a>
        = UnionNeighbors<'a, G>
    where
        Self: 'a;

    fn neighbors_of(&self, u: NodeIndex) -> Self::NeighborIter<'_> {
        let graph: &G = self.graph;
        UnionNeighbors {
            graph,
            u,
            out: graph.neighbors_of(u),
            inc: graph.is_directed().then(|| graph.in_neighbors_of(u)),
        }
    }

    fn degree_of(&self, u: NodeIndex) -> NumEdges {
        if self.graph.is_directed() {
            degree_from_edges(self, u)
        } else {
            self.graph.degree_of(u)
        }
    }

    fn out_degree_of(&self, u: NodeIndex) -> NumEdges {
        self.degree_of(u)
    }
}

impl<G: EdgeList> DirectedAdjacencyList for UndirectedView<'_, G> {
    type InNeighborIter<'a>
        = UnionNeighbors<'a, G>
    where
        Self: 'a;

    fn in_neighbors_of(&self, u: NodeIndex) -> Self::InNeighborIter<'_> {
        self.neighbors_of(u)
    }

    fn in_degree_of(&self, u: NodeIndex) -> NumEdges {
        self.degree_of(u)
    }
}

impl<G: EdgeList> AdjacencyTest for UndirectedView<'_, G> {
    fn has_edge_between(&self, u: NodeIndex, v: NodeIndex) -> bool {
        self.graph.has_edge_between(u, v) || self.graph.has_edge_between(v, u)
    }
}

impl<G: EdgeList> EdgeList for UndirectedView<'_, G> {
    fn graph_attrs(&self) -> &AttrMap {
        self.graph.graph_attrs()
    }

    fn node_attrs_of(&self, u: NodeIndex) -> &AttrMap {
        self.graph.node_attrs_of(u)
    }

    fn edges_from(&self, u: NodeIndex) -> impl Iterator<Item = EdgeRef<'_>> + '_ {
        let directed = self.graph.is_directed();
        self.graph.edges_from(u).chain(
            self.graph
                .edges_into(u)
                .filter(move |e| directed && !self.covered_by_out(e))
                .map(EdgeRef::reversed),
        )
    }

    fn edges_into(&self, u: NodeIndex) -> impl Iterator<Item = EdgeRef<'_>> + '_ {
        self.edges_from(u).map(EdgeRef::reversed)
    }

    fn edges_between(&self, u: NodeIndex, v: NodeIndex) -> impl Iterator<Item = EdgeRef<'_>> + '_ {
        let directed = self.graph.is_directed();
        self.graph.edges_between(u, v).chain(
            self.graph
                .edges_between(v, u)
                .filter(move |e| directed && !self.covered_by_out(e))
                .map(EdgeRef::reversed),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::{attrs, ops::*, repr::AdjGraph, views::GraphViews};
    use itertools::Itertools;

    #[test]
    fn reciprocal_arcs_collapse() {
        let mut g = AdjGraph::digraph();
        g.add_edge_with(0, 1, attrs! { "w" => 1 });
        g.add_edge_with(1, 0, attrs! { "w" => 2 });
        g.add_edge(2, 1);
        g.add_edge(3, 3);

        let u = g.undirected_view();
        assert!(u.is_undirected());
        assert_eq!(u.number_of_edges(), 3);
        assert_eq!(u.neighbors(&1).unwrap().collect_vec(), vec![&0, &2]);
        assert_eq!(u.degree(&1), Ok(2));
        assert_eq!(u.degree(&3), Ok(2));
        assert!(u.has_edge(&1, &2));
        assert_eq!(u.edge_attrs(&1, &0).unwrap().numeric("w"), Ok(Some(2.0)));
        assert_eq!(u.edges().collect_vec(), vec![(&0, &1), (&1, &2), (&3, &3)]);
    }

    #[test]
    fn multigraph_keys_unite() {
        let mut g = AdjGraph::multidigraph();
        g.add_edge(0, 1);
        g.add_edge(0, 1);
        g.add_edge(1, 0);
        g.add_edge_with_key(1, 0, 5, Default::default()).unwrap();

        let u = g.undirected_view();
        // (1, 0, 0) is covered by (0, 1, 0)
        assert_eq!(
            u.edges_with_keys().collect_vec(),
            vec![(&0, &1, 0), (&0, &1, 1), (&0, &1, 5)]
        );
        assert_eq!(u.number_of_edges_between(&1, &0), 3);
        assert_eq!(u.degree(&0), Ok(3));
    }

    #[test]
    fn identity_on_undirected() {
        let mut g = AdjGraph::graph();
        g.add_edges_from([(0, 1), (1, 2)]);
        let u = g.undirected_view();
        assert_eq!(u.edges().collect_vec(), g.edges().collect_vec());
        assert_eq!(u.neighbors(&1).unwrap().collect_vec(), vec![&0, &2]);
        assert_eq!(u.degree(&1), Ok(2));
    }
}
