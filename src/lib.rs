/*!
`lgraphs` is a graph data structure & algorithms library for **l**abelled graphs:
nodes are identified by arbitrary hashable ids and nodes, edges and the graph itself carry
attribute maps.

# Representation

All four kinds of graphs share the single representation [`AdjGraph`](crate::repr::AdjGraph):

- **undirected** and **directed** graphs,
- simple graphs and **multigraphs**, where parallel edges are told apart by an [`EdgeKey`](crate::edge::EdgeKey).

The kind is a runtime flag ([`GraphKind`](crate::ops::GraphKind)). Operations that are defined for
some kinds only fail with [`GraphError::NotImplementedForKind`](crate::error::GraphError) otherwise.

Each node has an id (any type implementing [`NodeId`](crate::node::NodeId)) and a dense internal
[`NodeIndex`](crate::node::NodeIndex) assigned in insertion order. Algorithms run on indices, the
public surface speaks ids. Iteration order is always insertion order.

Attributes are [`AttrMap`](crate::attr::AttrMap)s of tagged [`AttrValue`](crate::attr::AttrValue)s.
Both endpoints of an undirected edge share the same attribute map.

# Design

All algorithms are provided as configurable structs that one can alter using the *Builder* /
*Setter* pattern before running them on a graph (e.g. [`algo::Bfs`], [`algo::EdmondsKarp`]).
Commonly used functionality is also implemented via traits on the graph itself, so that
`graph.connected_components()` or `graph.bfs_edges(&source, None)` just work.

Every graph-like object (graphs, [`views`], the residual network of [`algo::residual`])
implements the trait stack of [`ops`], so algorithms accept all of them.

# Usage

There are *4* core submodules you probably want to interact with:
- [`prelude`] includes attributes, errors, nodes, edges, basic graph operations, the graph itself and views,
- [`algo`] includes traversals (BFS, DFS, edge traversals, topological order), connectivity, biconnected components, bridges and flows,
- [`gens`] includes classic graph families, substructures and random `G(n,p)` graphs,
- [`views`] includes read-through subgraph, reversed and undirected views.

In most use-cases, `use lgraphs::{prelude::*, algo::*};` suffices.

```
use lgraphs::{prelude::*, algo::*};

let mut g = AdjGraph::graph();
g.add_edges_from([("a", "b"), ("b", "c"), ("x", "y")]);

assert_eq!(g.number_connected_components().unwrap(), 2);
assert_eq!(g.bfs_edges(&"a", None).unwrap().collect::<Vec<_>>(), vec![(&"a", &"b"), (&"b", &"c")]);
```
*/

pub mod algo;
pub mod attr;
pub mod edge;
pub mod error;
pub mod gens;
pub mod node;
pub mod ops;
pub mod repr;
pub(crate) mod testing;
pub mod utils;
pub mod views;

/// `lgraphs::prelude` includes attributes, errors, definitions for nodes and edges, all basic
/// graph operation traits, the graph representation and views.
pub mod prelude {
    pub use super::{
        attr::*,
        attrs,
        edge::*,
        error::*,
        node::*,
        ops::*,
        repr::*,
        views::*,
    };
}
