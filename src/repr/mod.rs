/*!
# Graph Representation

A single storage backend, [`AdjGraph`], serves all four kinds of graphs (undirected, directed and
their multigraph variants). The kind is a runtime flag checked by algorithms that only make
sense for some kinds.

Internally, nodes are slots in an arena indexed by [`NodeIndex`](crate::node::NodeIndex), each
slot holding an insertion-ordered out-adjacency (and an in-adjacency if directed). Parallel
edges between the same pair of nodes are kept in a small bundle keyed by
[`EdgeKey`](crate::edge::EdgeKey).
*/

mod convert;
mod graph;
mod neighborhood;

pub use graph::AdjGraph;
