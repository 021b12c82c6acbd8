use std::fmt::{Debug, Display};

use crate::{attr::AttrMap, node::NodeIndex};

/// Index-level edge between two node indices.
/// It is up to the context whether an `Edge` is directed or not.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge(pub NodeIndex, pub NodeIndex);

/// We limit the number of edges to `2^32 - 1`.
pub type NumEdges = u32;

/// Key distinguishing parallel edges between the same pair of nodes.
/// Simple graphs use key `0` for every edge.
pub type EdgeKey = u32;

/// Slot of an edge in the edge arena of an [`AdjGraph`](crate::repr::AdjGraph)
pub type EdgeIndex = u32;

impl Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.0, self.1)
    }
}

impl Debug for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

impl Edge {
    /// Normalizes the edge such that the endpoint with smaller index comes first
    pub fn normalized(&self) -> Self {
        Edge(self.0.min(self.1), self.0.max(self.1))
    }

    /// Returns true if the endpoint with smaller index comes first
    pub fn is_normalized(&self) -> bool {
        self.0 <= self.1
    }

    /// Returns true if both endpoints are equal
    pub fn is_loop(&self) -> bool {
        self.0 == self.1
    }

    /// Reverses the edge by switching the endpoints
    pub fn reverse(&self) -> Self {
        Edge(self.1, self.0)
    }

    /// Simple bijection from `0..n^2` to all possible (directed) edges of `n` nodes
    pub fn from_u64(x: u64, n: u64) -> Self {
        debug_assert!(x < n * n);
        Edge((x / n) as NodeIndex, (x % n) as NodeIndex)
    }
}

impl From<(NodeIndex, NodeIndex)> for Edge {
    fn from(value: (NodeIndex, NodeIndex)) -> Self {
        Edge(value.0, value.1)
    }
}

/// A borrowed edge as seen from the adjacency of its `source`.
///
/// For undirected graphs the same logical edge is reported as `(u, v)` from `u` and
/// as `(v, u)` from `v`; both carry a reference to the *same* attribute map.
#[derive(Clone, Copy)]
pub struct EdgeRef<'a> {
    pub source: NodeIndex,
    pub target: NodeIndex,
    pub key: EdgeKey,
    pub attrs: &'a AttrMap,
}

impl<'a> EdgeRef<'a> {
    /// The same edge with its endpoints switched
    pub fn reversed(self) -> Self {
        Self {
            source: self.target,
            target: self.source,
            ..self
        }
    }

    /// Index-level endpoints
    pub fn edge(&self) -> Edge {
        Edge(self.source, self.target)
    }

    pub fn is_loop(&self) -> bool {
        self.source == self.target
    }
}

impl Debug for EdgeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})#{} {:?}", self.source, self.target, self.key, self.attrs)
    }
}
