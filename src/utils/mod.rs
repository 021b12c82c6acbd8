/*!
# Utilities

Small helpers shared by algorithms and generators:
- the [`Set`] abstraction over visited-states of traversals,
- [`GeometricJumper`](self::geometric::GeometricJumper), the sampler behind [`G(n,p)`](crate::gens::Gnp) graphs,
- [`Probability`] and [`FromCapacity`].
*/

use std::{collections::HashSet, hash::RandomState};

use fxhash::{FxBuildHasher, FxHashSet};
use num::{One, Zero};

use crate::node::*;

pub mod geometric;
pub mod set;

pub use set::Set;

/// Helper trait for probalities
pub trait Probability {
    /// Returns *true* if the probality is valid (ie. between `0` and `1`)
    fn is_valid_probability(&self) -> bool;
}

impl<P> Probability for P
where
    P: Zero + One + PartialOrd,
{
    fn is_valid_probability(&self) -> bool {
        Self::zero().le(self) && Self::one().ge(self)
    }
}

/// Helper trait for sets that can be initialized for a known universe.
///
/// `total` is an exclusive upper bound on the elements, `used` an estimate of how many will be
/// inserted. Dense structures size by the former, hashing structures by the latter.
pub trait FromCapacity: Sized {
    fn from_total_used_capacity(total: usize, used: usize) -> Self;
}

impl FromCapacity for NodeBitSet {
    fn from_total_used_capacity(total: usize, _used: usize) -> Self {
        Self::new(total as NumNodes)
    }
}

impl<T> FromCapacity for HashSet<T, RandomState> {
    fn from_total_used_capacity(_total: usize, used: usize) -> Self {
        Self::with_capacity(used)
    }
}

impl<T> FromCapacity for FxHashSet<T> {
    fn from_total_used_capacity(_total: usize, used: usize) -> Self {
        Self::with_capacity_and_hasher(used, FxBuildHasher::default())
    }
}
