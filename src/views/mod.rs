/*!
# Graph Views

Read-only windows onto a graph that copy nothing. Every query is answered by consulting the
underlying graph, so a view always reflects the graph's attributes; the borrow checker keeps
the graph from being mutated while a view is alive.

- [`SubgraphView`]: nodes and edges passing a [`NodeFilter`] and an [`EdgeFilter`]
- [`ReverseView`]: a directed graph with every arc reversed
- [`UndirectedView`]: a directed graph with every arc read as an undirected edge

Views implement the same trait stack as [`AdjGraph`](crate::repr::AdjGraph), hence every
algorithm runs on them and views of views are possible.
Use [`GraphQuery::to_adj_graph`](crate::ops::GraphQuery::to_adj_graph) to freeze a view into an
independent graph.

```
use lgraphs::prelude::*;

let mut g = AdjGraph::graph();
g.add_edges_from([(0, 1), (1, 2), (2, 3)]);

let h = g.subgraph([1, 2, 3]);
assert_eq!(h.number_of_edges(), 2);
assert!(!h.has_node(&0));
```
*/

pub mod filters;
mod reverse;
mod subgraph;
mod undirected;

pub use filters::*;
pub use reverse::ReverseView;
pub use subgraph::{SubgraphNeighbors, SubgraphView};
pub use undirected::{UndirectedView, UnionNeighbors};

use crate::{edge::EdgeKey, error::Result, ops::*};

/// Pairs (and their reverses if `symmetric`)
fn with_reverses<N: Clone, T>(
    items: Vec<(N, N, T)>,
    symmetric: bool,
) -> impl Iterator<Item = (N, N, T)>
where
    T: Copy,
{
    items.into_iter().flat_map(move |(u, v, t)| {
        let rev = symmetric.then(|| (v.clone(), u.clone(), t));
        std::iter::once((u, v, t)).chain(rev)
    })
}

/// Constructors of views, implemented for every graph-like object
pub trait GraphViews: EdgeList + Sized {
    /// View of the nodes passing `node_filter` and the edges passing `edge_filter`
    fn subgraph_view<NF, EF>(&self, node_filter: NF, edge_filter: EF) -> SubgraphView<'_, Self, NF, EF>
    where
        NF: NodeFilter<Self::NodeId>,
        EF: EdgeFilter<Self::NodeId>,
    {
        SubgraphView::new(self, node_filter, edge_filter)
    }

    /// View induced by `nodes`. Ids not in the graph are ignored.
    fn subgraph<I>(&self, nodes: I) -> SubgraphView<'_, Self, ShowNodes<Self::NodeId>, NoFilter>
    where
        I: IntoIterator<Item = Self::NodeId>,
    {
        SubgraphView::new(self, nodes.into_iter().collect(), NoFilter)
    }

    /// View of the given edges and their endpoints.
    /// Undirected graphs match `(u, v)` in either orientation; on multigraphs all parallel edges
    /// between the pair are shown.
    fn edge_subgraph<I>(
        &self,
        edges: I,
    ) -> SubgraphView<'_, Self, ShowNodes<Self::NodeId>, ShowDiEdges<Self::NodeId>>
    where
        I: IntoIterator<Item = (Self::NodeId, Self::NodeId)>,
    {
        let edges = edges.into_iter().map(|(u, v)| (u, v, ())).collect::<Vec<_>>();
        let nodes = edges
            .iter()
            .flat_map(|(u, v, _)| [u.clone(), v.clone()])
            .collect();

        let arcs = with_reverses(edges, self.is_undirected())
            .map(|(u, v, _)| (u, v))
            .collect();
        SubgraphView::new(self, nodes, arcs)
    }

    /// View of the given keyed edges and their endpoints
    fn edge_subgraph_with_keys<I>(
        &self,
        edges: I,
    ) -> SubgraphView<'_, Self, ShowNodes<Self::NodeId>, ShowMultiDiEdges<Self::NodeId>>
    where
        I: IntoIterator<Item = (Self::NodeId, Self::NodeId, EdgeKey)>,
    {
        let edges = edges.into_iter().collect::<Vec<_>>();
        let nodes = edges
            .iter()
            .flat_map(|(u, v, _)| [u.clone(), v.clone()])
            .collect();

        let arcs = with_reverses(edges, self.is_undirected()).collect();
        SubgraphView::new(self, nodes, arcs)
    }

    /// View hiding `nodes` (with their incident edges) and the edges `edges`.
    /// Undirected graphs hide `(u, v)` in either orientation.
    fn restricted_view<I, J>(
        &self,
        nodes: I,
        edges: J,
    ) -> SubgraphView<'_, Self, HideNodes<Self::NodeId>, HideDiEdges<Self::NodeId>>
    where
        I: IntoIterator<Item = Self::NodeId>,
        J: IntoIterator<Item = (Self::NodeId, Self::NodeId)>,
    {
        let edges = edges.into_iter().map(|(u, v)| (u, v, ())).collect();
        let arcs = with_reverses(edges, self.is_undirected())
            .map(|(u, v, _)| (u, v))
            .collect();
        SubgraphView::new(self, nodes.into_iter().collect(), arcs)
    }

    /// View with every arc reversed. Fails with `NotImplementedForKind` on undirected graphs.
    fn reverse_view(&self) -> Result<ReverseView<'_, Self>> {
        self.require_directed("reverse_view")?;
        Ok(ReverseView::new(self))
    }

    /// View reading every arc as an undirected edge
    fn undirected_view(&self) -> UndirectedView<'_, Self> {
        UndirectedView::new(self)
    }
}

impl<G> GraphViews for G where G: EdgeList {}
