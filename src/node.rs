/*!
# Node Representation

A node is identified by a user-chosen id (any [`NodeId`]) and, internally, by a dense
[`NodeIndex`] into the node arena of its graph.

We choose `NodeIndex = u32` as almost all use-cases involve less than `2^32` nodes.
Indices are assigned in insertion order and iterating them in ascending order is iterating
nodes in insertion order. They stay valid until a node removal compacts the arena, so
user code should hold on to ids and only algorithms should work with indices.
*/

use std::{fmt::Debug, hash::Hash};

use stream_bitset::bitset::BitSetImpl;

/// Dense internal handle of a live node
pub type NodeIndex = u32;

/// Index-Value that is considered invalid
pub const INVALID_NODE: NodeIndex = NodeIndex::MAX;

/// There can be at most `2^32 - 1` nodes in a graph!
pub type NumNodes = NodeIndex;

/// BitSet over node indices
pub type NodeBitSet = BitSetImpl<NodeIndex>;

/// Anything that can identify a node: hashable, comparable and cheap enough to clone.
pub trait NodeId: Clone + Eq + Hash + Debug {}

impl<T> NodeId for T where T: Clone + Eq + Hash + Debug {}
