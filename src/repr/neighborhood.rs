use std::{iter::Copied, slice::Iter};

use fxhash::FxHashMap;
use smallvec::SmallVec;

use crate::{edge::*, node::*};

/// Parallel edges towards one neighbor: `(key, slot in the edge arena)` in insertion order.
/// Simple graphs hold exactly one entry with key `0`.
pub(crate) type Bundle = SmallVec<[(EdgeKey, EdgeIndex); 1]>;

/// One side (out or in) of the adjacency of a node.
///
/// Neighbors are kept in insertion order next to a hash map for O(1) lookup of the bundle
/// towards a given neighbor. Removing a neighbor keeps the order of all others.
#[derive(Debug, Clone, Default)]
pub(crate) struct Neighborhood {
    order: Vec<NodeIndex>,
    bundles: FxHashMap<NodeIndex, Bundle>,
    num_edges: NumEdges,
}

impl Neighborhood {
    /// Returns the number of distinct neighbors
    pub fn num_of_neighbors(&self) -> NumNodes {
        self.order.len() as NumNodes
    }

    /// Returns the number of edges (parallel edges counted individually)
    pub fn num_of_edges(&self) -> NumEdges {
        self.num_edges
    }

    pub fn neighbors(&self) -> Copied<Iter<'_, NodeIndex>> {
        self.order.iter().copied()
    }

    pub fn has_neighbor(&self, v: NodeIndex) -> bool {
        self.bundles.contains_key(&v)
    }

    pub fn bundle(&self, v: NodeIndex) -> Option<&Bundle> {
        self.bundles.get(&v)
    }

    /// Slot of the edge towards `v` with key `key`
    pub fn edge_slot(&self, v: NodeIndex, key: EdgeKey) -> Option<EdgeIndex> {
        self.bundles
            .get(&v)?
            .iter()
            .find_map(|&(k, e)| (k == key).then_some(e))
    }

    /// Smallest key `>= len(bundle)` not yet used towards `v`
    pub fn next_key(&self, v: NodeIndex) -> EdgeKey {
        match self.bundles.get(&v) {
            None => 0,
            Some(bundle) => {
                let mut key = bundle.len() as EdgeKey;
                while bundle.iter().any(|&(k, _)| k == key) {
                    key += 1;
                }
                key
            }
        }
    }

    /// Adds an edge towards `v`. The caller guarantees that `key` is unused towards `v`.
    pub fn insert(&mut self, v: NodeIndex, key: EdgeKey, slot: EdgeIndex) {
        debug_assert!(self.edge_slot(v, key).is_none());

        let bundle = self.bundles.entry(v).or_insert_with(|| {
            self.order.push(v);
            Bundle::new()
        });
        bundle.push((key, slot));
        self.num_edges += 1;
    }

    /// Removes the edge towards `v` with key `key` and returns its key and slot.
    /// `None` removes the most recently inserted parallel edge.
    pub fn remove(&mut self, v: NodeIndex, key: Option<EdgeKey>) -> Option<(EdgeKey, EdgeIndex)> {
        let bundle = self.bundles.get_mut(&v)?;
        let pos = match key {
            None => bundle.len().checked_sub(1)?,
            Some(key) => bundle.iter().position(|&(k, _)| k == key)?,
        };

        let entry = bundle.remove(pos);
        self.num_edges -= 1;

        if bundle.is_empty() {
            self.bundles.remove(&v);
            self.remove_from_order(v);
        }

        Some(entry)
    }

    /// Removes all edges towards `v` and returns their bundle
    pub fn remove_neighbor(&mut self, v: NodeIndex) -> Option<Bundle> {
        let bundle = self.bundles.remove(&v)?;
        self.num_edges -= bundle.len() as NumEdges;
        self.remove_from_order(v);
        Some(bundle)
    }

    fn remove_from_order(&mut self, v: NodeIndex) {
        if let Some(pos) = self.order.iter().position(|&w| w == v) {
            self.order.remove(pos);
        }
    }

    /// Iterates `(neighbor, key, slot)` in insertion order of neighbors, then of keys
    pub fn entries(&self) -> impl Iterator<Item = (NodeIndex, EdgeKey, EdgeIndex)> + '_ {
        self.order.iter().flat_map(move |&v| {
            self.bundles
                .get(&v)
                .into_iter()
                .flatten()
                .map(move |&(k, e)| (v, k, e))
        })
    }

    /// Iterates `(key, slot)` of all edges towards `v`
    pub fn entries_towards(&self, v: NodeIndex) -> impl Iterator<Item = (EdgeKey, EdgeIndex)> + '_ {
        self.bundles.get(&v).into_iter().flatten().copied()
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.bundles.clear();
        self.num_edges = 0;
    }

    /// Renames all neighbors according to `new_index` (indexed by old index)
    pub fn remap(&mut self, new_index: &[NodeIndex]) {
        for v in self.order.iter_mut() {
            *v = new_index[*v as usize];
        }
        self.bundles = self
            .bundles
            .drain()
            .map(|(v, bundle)| (new_index[v as usize], bundle))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn keeps_insertion_order() {
        let mut nb = Neighborhood::default();
        nb.insert(5, 0, 10);
        nb.insert(2, 0, 11);
        nb.insert(7, 0, 12);
        nb.insert(2, 1, 13);

        assert_eq!(nb.neighbors().collect_vec(), vec![5, 2, 7]);
        assert_eq!(nb.num_of_neighbors(), 3);
        assert_eq!(nb.num_of_edges(), 4);

        assert_eq!(nb.remove(5, Some(0)), Some((0, 10)));
        assert_eq!(nb.neighbors().collect_vec(), vec![2, 7]);
        assert_eq!(
            nb.entries().collect_vec(),
            vec![(2, 0, 11), (2, 1, 13), (7, 0, 12)]
        );
    }

    #[test]
    fn parallel_keys() {
        let mut nb = Neighborhood::default();
        assert_eq!(nb.next_key(1), 0);
        nb.insert(1, 0, 0);
        nb.insert(1, 2, 1);
        // len = 2, but key 2 is taken
        assert_eq!(nb.next_key(1), 3);

        // without key, the latest parallel edge goes first
        assert_eq!(nb.remove(1, None), Some((2, 1)));
        assert_eq!(nb.edge_slot(1, 0), Some(0));
        assert_eq!(nb.remove(1, Some(4)), None);

        assert_eq!(nb.remove_neighbor(1).map(|b| b.len()), Some(1));
        assert!(!nb.has_neighbor(1));
        assert_eq!(nb.num_of_edges(), 0);
    }

    #[test]
    fn remap() {
        let mut nb = Neighborhood::default();
        nb.insert(4, 0, 0);
        nb.insert(2, 0, 1);
        nb.remap(&[0, 0, 1, 0, 2]);

        assert_eq!(nb.neighbors().collect_vec(), vec![2, 1]);
        assert_eq!(nb.edge_slot(2, 0), Some(0));
        assert_eq!(nb.edge_slot(1, 0), Some(1));
    }
}
