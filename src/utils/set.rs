/*!
# Generalized Sets

Traversals keep their visited-state in anything implementing [`Set<NodeIndex>`]:
- dense searches (most of them) use a [`NodeBitSet`],
- searches expected to touch only few nodes of a huge graph can use an `FxHashSet`.
*/

use std::{
    collections::HashSet,
    hash::{BuildHasher, Hash},
};

use crate::node::*;

/// Minimalist trait for a set-like collection
pub trait Set<T> {
    /// Inserts `value` into the set.
    /// Returns `true` if the element was already present.
    fn insert(&mut self, value: T) -> bool;

    fn insert_multiple<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in iter {
            self.insert(value);
        }
    }

    /// Removes `value` from the set.
    /// Returns `true` if the element was present.
    fn remove(&mut self, value: &T) -> bool;

    fn contains(&self, value: &T) -> bool;

    fn clear(&mut self);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T, S> Set<T> for HashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn insert(&mut self, value: T) -> bool {
        !HashSet::insert(self, value)
    }

    fn remove(&mut self, value: &T) -> bool {
        HashSet::remove(self, value)
    }

    fn contains(&self, value: &T) -> bool {
        HashSet::contains(self, value)
    }

    fn clear(&mut self) {
        HashSet::clear(self);
    }

    fn len(&self) -> usize {
        HashSet::len(self)
    }
}

impl Set<NodeIndex> for NodeBitSet {
    fn insert(&mut self, value: NodeIndex) -> bool {
        self.set_bit(value)
    }

    fn remove(&mut self, value: &NodeIndex) -> bool {
        self.clear_bit(*value)
    }

    fn contains(&self, value: &NodeIndex) -> bool {
        self.get_bit(*value)
    }

    fn clear(&mut self) {
        self.clear_all();
    }

    fn len(&self) -> usize {
        self.cardinality() as usize
    }
}
