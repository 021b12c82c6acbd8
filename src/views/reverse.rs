use crate::{attr::AttrMap, edge::*, node::*, ops::*};

/// Read-through view of a directed graph with every arc reversed
pub struct ReverseView<'g, G> {
    graph: &'g G,
}

impl<'g, G> ReverseView<'g, G> {
    /// Callers check directedness; on undirected graphs the view is the identity
    pub(crate) fn new(graph: &'g G) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &'g G {
        self.graph
    }
}

impl<G: GraphType> GraphType for ReverseView<'_, G> {
    fn kind(&self) -> GraphKind {
        self.graph.kind()
    }
}

impl<G: GraphNodeOrder> GraphNodeOrder for ReverseView<'_, G> {
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

impl<G: DirectedAdjacencyList> AdjacencyList for ReverseView<'_, G> {
    type NeighborIter<'a>
        = G::InNeighborIter<'a>
    where
        Self: 'a;

    fn neighbors_of(&self, u: NodeIndex) -> Self::NeighborIter<'_> {
        let graph: &G = self.graph;
        graph.in_neighbors_of(u)
    }

    fn degree_of(&self, u: NodeIndex) -> NumEdges {
        self.graph.degree_of(u)
    }

    fn out_degree_of(&self, u: NodeIndex) -> NumEdges {
        self.graph.in_degree_of(u)
    }
}

impl<G: DirectedAdjacencyList> DirectedAdjacencyList for ReverseView<'_, G> {
    type InNeighborIter<'a>
        = G::NeighborIter<'a>
    where
        Self: 'a;

    fn in_neighbors_of(&self, u: NodeIndex) -> Self::InNeighborIter<'_> {
        let graph: &G = self.graph;
        graph.neighbors_of(u)
    }

    fn in_degree_of(&self, u: NodeIndex) -> NumEdges {
        self.graph.out_degree_of(u)
    }
}

impl<G: AdjacencyTest> AdjacencyTest for ReverseView<'_, G> {
    fn has_edge_between(&self, u: NodeIndex, v: NodeIndex) -> bool {
        self.graph.has_edge_between(v, u)
    }
}

impl<G: EdgeList> EdgeList for ReverseView<'_, G> {
    fn graph_attrs(&self) -> &AttrMap {
        self.graph.graph_attrs()
    }

    fn node_attrs_of(&self, u: NodeIndex) -> &AttrMap {
        self.graph.node_attrs_of(u)
    }

    fn edges_from(&self, u: NodeIndex) -> impl Iterator<Item = EdgeRef<'_>> + '_ {
        self.graph.edges_into(u).map(EdgeRef::reversed)
    }

    fn edges_into(&self, u: NodeIndex) -> impl Iterator<Item = EdgeRef<'_>> + '_ {
        self.graph.edges_from(u).map(EdgeRef::reversed)
    }

    fn edges_between(&self, u: NodeIndex, v: NodeIndex) -> impl Iterator<Item = EdgeRef<'_>> + '_ {
        self.graph.edges_between(v, u).map(EdgeRef::reversed)
    }

    fn number_of_edges(&self) -> NumEdges {
        self.graph.number_of_edges()
    }
}

#[cfg(test)]
mod tests {
    use crate::{attrs, error::ErrorKind, ops::*, repr::AdjGraph, views::GraphViews};
    use itertools::Itertools;

    #[test]
    fn swaps_directions() {
        let mut g = AdjGraph::digraph();
        g.add_edge_with(0, 1, attrs! { "w" => 4 });
        g.add_edge(1, 2);
        g.add_edge(0, 2);

        let r = g.reverse_view().unwrap();
        assert_eq!(r.successors(&2).unwrap().collect_vec(), vec![&1, &0]);
        assert_eq!(r.predecessors(&0).unwrap().collect_vec(), vec![&1, &2]);
        assert_eq!(r.out_degree(&2), Ok(2));
        assert_eq!(r.in_degree(&2), Ok(0));
        assert!(r.has_edge(&1, &0) && !r.has_edge(&0, &1));
        assert!(std::ptr::eq(
            r.edge_attrs(&1, &0).unwrap(),
            g.edge_attrs(&0, &1).unwrap()
        ));
        assert_eq!(r.number_of_edges(), 3);
        assert_eq!(
            r.edges().sorted().collect_vec(),
            vec![(&1, &0), (&2, &0), (&2, &1)]
        );
    }

    #[test]
    fn undirected_rejected() {
        let g = AdjGraph::<u32>::graph();
        assert_eq!(
            g.reverse_view().err().map(|e| e.kind()),
            Some(ErrorKind::NotImplementedForKind)
        );
    }
}
