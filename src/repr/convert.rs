use super::AdjGraph;
use crate::{attr::AttrMap, edge::EdgeKey, error::Result, node::NodeId, ops::*, views::GraphViews};

impl<N: NodeId> AdjGraph<N> {
    /// Inserts `(u, v, key)` keeping the key on multigraphs; existing edges get `attrs` merged
    fn put_edge(&mut self, u: N, v: N, key: EdgeKey, attrs: AttrMap) {
        if self.is_multigraph() {
            // cannot fail on multigraphs
            let _ = self.add_edge_with_key(u, v, key, attrs);
        } else {
            self.add_edge_with(u, v, attrs);
        }
    }

    /// Empty graph of kind `kind` with the nodes, node attributes and graph attributes of `self`
    fn copy_nodes_as(&self, kind: GraphKind) -> Self {
        let mut h = Self::new(kind);
        *h.graph_attrs_mut() = self.graph_attrs().clone();
        h.add_nodes_with_attrs_from(
            self.nodes_with_data()
                .map(|(id, attrs)| (id.clone(), attrs.clone())),
        );
        h
    }

    /// Frozen copy of any graph or view, preserving node order, keys and attributes
    pub fn from_graph<G>(graph: &G) -> Self
    where
        G: EdgeList<NodeId = N> + ?Sized,
    {
        let mut h = Self::new(graph.kind());
        *h.graph_attrs_mut() = graph.graph_attrs().clone();
        for u in graph.vertices() {
            h.add_node_with(graph.node_id(u).clone(), graph.node_attrs_of(u).clone());
        }
        for e in graph.edge_refs() {
            h.put_edge(
                graph.node_id(e.source).clone(),
                graph.node_id(e.target).clone(),
                e.key,
                e.attrs.clone(),
            );
        }
        h
    }

    /// Deep copy of the graph
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Independent copy of the subgraph induced by `nodes`; ids not in the graph are ignored
    pub fn subgraph_copy<I>(&self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
    {
        self.subgraph(nodes).to_adj_graph()
    }

    /// Directed copy: every undirected edge becomes the two arcs `u -> v` and `v -> u`
    /// (with the same key on multigraphs) carrying equal attributes.
    pub fn to_directed(&self) -> Self {
        if self.is_directed() {
            return self.clone();
        }

        let mut h = self.copy_nodes_as(self.kind().as_directed());
        for u in self.vertices() {
            for e in self.edges_from(u) {
                h.put_edge(
                    self.node_id(u).clone(),
                    self.node_id(e.target).clone(),
                    e.key,
                    e.attrs.clone(),
                );
            }
        }
        h
    }

    /// Undirected copy: reciprocal arcs collapse into one edge whose attributes are merged,
    /// the arc visited last winning on conflicting keys.
    pub fn to_undirected(&self) -> Self {
        if self.is_undirected() {
            return self.clone();
        }

        let mut h = self.copy_nodes_as(self.kind().as_undirected());
        for e in self.edge_refs() {
            h.put_edge(
                self.node_id(e.source).clone(),
                self.node_id(e.target).clone(),
                e.key,
                e.attrs.clone(),
            );
        }
        h
    }

    /// Copy with every arc reversed. Directed graphs only.
    pub fn reverse(&self) -> Result<Self> {
        self.require_directed("reverse")?;

        let mut h = self.copy_nodes_as(self.kind());
        for e in self.edge_refs() {
            h.put_edge(
                self.node_id(e.target).clone(),
                self.node_id(e.source).clone(),
                e.key,
                e.attrs.clone(),
            );
        }
        Ok(h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{attrs, error::ErrorKind};
    use itertools::Itertools;

    #[test]
    fn to_directed_duplicates() {
        let mut g = AdjGraph::graph();
        g.add_edge_with("a", "b", attrs! { "w" => 1 });
        g.add_edge("b", "c");

        let d = g.to_directed();
        assert!(d.is_directed());
        assert_eq!(d.number_of_edges(), 4);
        assert!(d.has_edge(&"b", &"a"));
        assert_eq!(d.edge_attrs(&"b", &"a"), d.edge_attrs(&"a", &"b"));
        assert!(!std::ptr::eq(
            d.edge_attrs(&"b", &"a").unwrap(),
            d.edge_attrs(&"a", &"b").unwrap()
        ));
        d.assert_invariants();
    }

    #[test]
    fn to_undirected_merges() {
        let mut g = AdjGraph::digraph();
        g.add_edge_with(0, 1, attrs! { "w" => 1, "x" => true });
        g.add_edge_with(1, 0, attrs! { "w" => 2 });
        g.add_edge(1, 2);

        let u = g.to_undirected();
        assert_eq!(u.number_of_edges(), 2);
        let a = u.edge_attrs(&1, &0).unwrap();
        assert_eq!(a.numeric("w"), Ok(Some(2.0)));
        assert!(a.contains_key("x"));
        u.assert_invariants();
    }

    #[test]
    fn round_trip() {
        let mut g = AdjGraph::graph();
        g.add_edges_from([(0, 1), (1, 2), (2, 0), (2, 3)]);
        g.add_node(4);

        let h = g.to_undirected().to_directed();
        assert_eq!(h.nodes().collect_vec(), g.nodes().collect_vec());
        assert_eq!(h.number_of_edges(), 2 * g.number_of_edges());
        for (u, v) in g.edges() {
            assert!(h.has_edge(u, v) && h.has_edge(v, u));
        }
    }

    #[test]
    fn reverse_copy() {
        let mut g = AdjGraph::multidigraph();
        g.add_edge(0, 1);
        g.add_edge(0, 1);
        g.add_edge(1, 2);

        let r = g.reverse().unwrap();
        assert_eq!(r.number_of_edges_between(&1, &0), 2);
        assert!(r.has_edge(&2, &1) && !r.has_edge(&1, &2));
        r.assert_invariants();

        assert_eq!(
            AdjGraph::<u32>::graph().reverse().err().map(|e| e.kind()),
            Some(ErrorKind::NotImplementedForKind)
        );
    }

    #[test]
    fn induced_copy() {
        let mut g = AdjGraph::digraph();
        g.add_edge_with(0, 1, attrs! { "w" => 4 });
        g.add_edges_from([(1, 2), (2, 0), (2, 3)]);

        let mut h = g.subgraph_copy([0, 1, 2, 9]);
        assert!(h.is_directed());
        assert_eq!(h.nodes().collect_vec(), vec![&0, &1, &2]);
        assert_eq!(h.number_of_edges(), 3);

        h.edge_attrs_mut(&0, &1).unwrap().insert("w", 5);
        assert_eq!(g.edge_attrs(&0, &1).unwrap().numeric("w"), Ok(Some(4.0)));
        h.assert_invariants();
    }

    #[test]
    fn frozen_copy() {
        let mut g = AdjGraph::multigraph();
        g.add_edge_with_key(0, 1, 7, attrs! { "c" => 3 }).unwrap();
        g.add_edge(1, 2);
        g.graph_attrs_mut().insert("name", "m");

        let h = g.to_adj_graph();
        assert!(h.is_multigraph());
        assert!(h.has_edge_with_key(&1, &0, 7));
        assert_eq!(h.graph_attrs(), g.graph_attrs());
        assert_eq!(h.edges_with_keys().collect_vec(), g.edges_with_keys().collect_vec());
    }
}
