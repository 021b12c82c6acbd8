use super::filters::*;
use crate::{attr::AttrMap, edge::*, node::*, ops::*};

/// Read-through view of the nodes and edges of a graph that pass a node and an edge filter.
///
/// An edge is visible if both endpoints and the edge itself pass. Nothing is copied; every query
/// consults the underlying graph and the filters.
pub struct SubgraphView<'g, G, NF = NoFilter, EF = NoFilter> {
    graph: &'g G,
    node_filter: NF,
    edge_filter: EF,
    num_nodes: NumNodes,
}

impl<'g, G, NF, EF> SubgraphView<'g, G, NF, EF>
where
    G: EdgeList,
    NF: NodeFilter<G::NodeId>,
    EF: EdgeFilter<G::NodeId>,
{
    pub fn new(graph: &'g G, node_filter: NF, edge_filter: EF) -> Self {
        let num_nodes = graph
            .vertices()
            .filter(|&u| node_filter.show_node(graph.node_id(u)))
            .count() as NumNodes;

        Self {
            graph,
            node_filter,
            edge_filter,
            num_nodes,
        }
    }

    /// The graph this view reads from
    pub fn graph(&self) -> &'g G {
        self.graph
    }

    fn shows_vertex(&self, u: NodeIndex) -> bool {
        self.node_filter.show_node(self.graph.node_id(u))
    }

    fn shows_arc(&self, source: NodeIndex, target: NodeIndex, key: EdgeKey) -> bool {
        if self.edge_filter.is_trivial() {
            return true;
        }

        let (u, v) = if self.graph.is_undirected() && source > target {
            (target, source)
        } else {
            (source, target)
        };
        self.edge_filter
            .show_edge(self.graph.node_id(u), self.graph.node_id(v), key)
    }

    fn shows_any_arc(&self, source: NodeIndex, target: NodeIndex) -> bool {
        self.edge_filter.is_trivial()
            || self
                .graph
                .edges_between(source, target)
                .any(|e| self.shows_arc(source, target, e.key))
    }
}

/// Visible neighbors of a node in a [`SubgraphView`]
pub struct SubgraphNeighbors<'a, 'g, G, NF, EF, I> {
    view: &'a SubgraphView<'g, G, NF, EF>,
    u: NodeIndex,
    incoming: bool,
    inner: I,
}

impl<G, NF, EF, I> Iterator for SubgraphNeighbors<'_, '_, G, NF, EF, I>
where
    G: EdgeList,
    NF: NodeFilter<G::NodeId>,
    EF: EdgeFilter<G::NodeId>,
    I: Iterator<Item = NodeIndex>,
{
    type Item = NodeIndex;

    fn next(&mut self) -> Option<NodeIndex> {
        let (view, u, incoming) = (self.view, self.u, self.incoming);
        self.inner.find(|&v| {
            view.shows_vertex(v)
                && if incoming {
                    view.shows_any_arc(v, u)
                } else {
                    view.shows_any_arc(u, v)
                }
        })
    }
}

impl<G, NF, EF> GraphType for SubgraphView<'_, G, NF, EF>
where
    G: GraphType,
{
    fn kind(&self) -> GraphKind {
        self.graph.kind()
    }
}

impl<G, NF, EF> GraphNodeOrder for SubgraphView<'_, G, NF, EF>
where
    G: EdgeList,
    NF: NodeFilter<G::NodeId>,
    EF: EdgeFilter<G::NodeId>,
{
    type NodeId = G::NodeId;

    fn node_bound(&self) -> NumNodes {
        self.graph.node_bound()
    }

    fn number_of_nodes(&self) -> NumNodes {
        self.num_nodes
    }

    fn vertices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.vertices().filter(move |&u| self.shows_vertex(u))
    }

    fn contains_vertex(&self, u: NodeIndex) -> bool {
        self.graph.contains_vertex(u) && self.shows_vertex(u)
    }

    fn node_id(&self, u: NodeIndex) -> &G::NodeId {
        self.graph.node_id(u)
    }

    fn index_of(&self, id: &G::NodeId) -> Option<NodeIndex> {
        self.graph
            .index_of(id)
            .filter(|_| self.node_filter.show_node(id))
    }
}

impl<'g, G, NF, EF> AdjacencyList for SubgraphView<'g, G, NF, EF>
where
    G: EdgeList,
    NF: NodeFilter<G::NodeId>,
    EF: EdgeFilter<G::NodeId>,
{
    type NeighborIter<'a>
        = SubgraphNeighbors<'a, 'g, G, NF, EF, G::NeighborIter<'a>>
    where
        Self: 'a;

    fn neighbors_of(&self, u: NodeIndex) -> Self::NeighborIter<'_> {
        let graph: &G = self.graph;
        SubgraphNeighbors {
            view: self,
            u,
            incoming: false,
            inner: graph.neighbors_of(u),
        }
    }

    fn degree_of(&self, u: NodeIndex) -> NumEdges {
        degree_from_edges(self, u)
    }

    fn out_degree_of(&self, u: NodeIndex) -> NumEdges {
        if self.is_directed() {
            self.edges_from(u).count() as NumEdges
        } else {
            self.degree_of(u)
        }
    }
}

impl<'g, G, NF, EF> DirectedAdjacencyList for SubgraphView<'g, G, NF, EF>
where
    G: EdgeList,
    NF: NodeFilter<G::NodeId>,
    EF: EdgeFilter<G::NodeId>,
{
    type InNeighborIter<'a>
        = SubgraphNeighbors<'a, 'g, G, NF, EF, G::InNeighborIter<'a>>
    where
        Self: 'a;

    fn in_neighbors_of(&self, u: NodeIndex) -> Self::InNeighborIter<'_> {
        let graph: &G = self.graph;
        SubgraphNeighbors {
            view: self,
            u,
            incoming: true,
            inner: graph.in_neighbors_of(u),
        }
    }

    fn in_degree_of(&self, u: NodeIndex) -> NumEdges {
        if self.is_directed() {
            self.edges_into(u).count() as NumEdges
        } else {
            self.degree_of(u)
        }
    }
}

impl<G, NF, EF> AdjacencyTest for SubgraphView<'_, G, NF, EF>
where
    G: EdgeList,
    NF: NodeFilter<G::NodeId>,
    EF: EdgeFilter<G::NodeId>,
{
    fn has_edge_between(&self, u: NodeIndex, v: NodeIndex) -> bool {
        self.shows_vertex(u)
            && self.shows_vertex(v)
            && self.graph.has_edge_between(u, v)
            && self.shows_any_arc(u, v)
    }
}

impl<G, NF, EF> EdgeList for SubgraphView<'_, G, NF, EF>
where
    G: EdgeList,
    NF: NodeFilter<G::NodeId>,
    EF: EdgeFilter<G::NodeId>,
{
    fn graph_attrs(&self) -> &AttrMap {
        self.graph.graph_attrs()
    }

    fn node_attrs_of(&self, u: NodeIndex) -> &AttrMap {
        self.graph.node_attrs_of(u)
    }

    fn edges_from(&self, u: NodeIndex) -> impl Iterator<Item = EdgeRef<'_>> + '_ {
        self.graph
            .edges_from(u)
            .filter(move |e| self.shows_vertex(e.target) && self.shows_arc(e.source, e.target, e.key))
    }

    fn edges_into(&self, u: NodeIndex) -> impl Iterator<Item = EdgeRef<'_>> + '_ {
        self.graph
            .edges_into(u)
            .filter(move |e| self.shows_vertex(e.source) && self.shows_arc(e.source, e.target, e.key))
    }

    fn edges_between(&self, u: NodeIndex, v: NodeIndex) -> impl Iterator<Item = EdgeRef<'_>> + '_ {
        let visible = self.shows_vertex(u) && self.shows_vertex(v);
        self.graph
            .edges_between(u, v)
            .filter(move |e| visible && self.shows_arc(u, v, e.key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{attrs, repr::AdjGraph, views::GraphViews};
    use itertools::Itertools;

    fn path() -> AdjGraph<u32> {
        let mut g = AdjGraph::graph();
        g.add_edges_from([(0, 1), (1, 2), (2, 3), (3, 4)]);
        g
    }

    #[test]
    fn induced_subgraph() {
        let g = path();
        let h = g.subgraph([1, 2, 3, 7]);

        assert_eq!(h.number_of_nodes(), 3);
        assert_eq!(h.nodes().collect_vec(), vec![&1, &2, &3]);
        assert_eq!(h.edges().collect_vec(), vec![(&1, &2), (&2, &3)]);
        assert_eq!(h.neighbors(&1).unwrap().collect_vec(), vec![&2]);
        assert_eq!(h.degree(&1), Ok(1));
        assert!(!h.has_node(&0));
        assert!(h.neighbors(&0).is_err());
        assert!(!h.has_edge(&0, &1));
    }

    #[test]
    fn closures_as_filters() {
        let g = path();
        let h = g.subgraph_view(|u: &u32| *u != 2, |u: &u32, v: &u32, _: EdgeKey| !(*u == 0 && *v == 1));

        assert_eq!(h.edges().collect_vec(), vec![(&3, &4)]);
        assert_eq!(h.number_of_edges(), 1);
        assert_eq!(h.degree(&1), Ok(0));
    }

    #[test]
    fn reads_through_attributes() {
        let mut g = AdjGraph::digraph();
        g.add_edge_with("a", "b", attrs! { "w" => 2 });
        g.add_node_with("a", attrs! { "color" => "red" });

        let h = g.restricted_view(["c"], []);
        assert!(std::ptr::eq(
            h.edge_attrs(&"a", &"b").unwrap(),
            g.edge_attrs(&"a", &"b").unwrap()
        ));
        assert_eq!(
            h.node_attrs(&"a").unwrap().get("color").and_then(|c| c.as_str()),
            Some("red")
        );
    }

    #[test]
    fn view_of_view() {
        let g = path();
        let h = g.restricted_view([0], []);
        let k = h.restricted_view([4], [(2, 1)]);

        assert_eq!(k.nodes().collect_vec(), vec![&1, &2, &3]);
        assert_eq!(k.edges().collect_vec(), vec![(&2, &3)]);
        assert_eq!(k.to_adj_graph().number_of_edges(), 1);
    }

    #[test]
    fn directed_in_and_out() {
        let mut g = AdjGraph::digraph();
        g.add_edges_from([(0, 1), (2, 1), (1, 3)]);
        let h = g.restricted_view([2], []);

        assert_eq!(h.predecessors(&1).unwrap().collect_vec(), vec![&0]);
        assert_eq!(h.in_degree(&1), Ok(1));
        assert_eq!(h.out_degree(&1), Ok(1));
        assert_eq!(h.degree(&1), Ok(2));
    }

    #[test]
    fn multigraph_keys() {
        let mut g = AdjGraph::multigraph();
        g.add_edge(0, 1);
        g.add_edge(0, 1);
        g.add_edge(1, 2);

        let h = g.subgraph_view(NoFilter, HideMultiEdges::new([(1, 0, 1)]));
        assert_eq!(h.number_of_edges_between(&0, &1), 1);
        assert!(h.has_edge_with_key(&1, &0, 0));
        assert!(!h.has_edge_with_key(&0, &1, 1));
        assert_eq!(h.degree(&1), Ok(2));

        let e = g.edge_subgraph_with_keys([(0, 1, 1)]);
        assert_eq!(e.nodes().collect_vec(), vec![&0, &1]);
        assert_eq!(e.edges_with_keys().collect_vec(), vec![(&0, &1, 1)]);
    }
}
