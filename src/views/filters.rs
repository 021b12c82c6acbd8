/*!
# View Filters

Filters decide what a [`SubgraphView`](super::SubgraphView) shows. Any closure
`Fn(&N) -> bool` is a [`NodeFilter`] and any closure `Fn(&N, &N, EdgeKey) -> bool` is an
[`EdgeFilter`]; the structs of this module cover the common cases of showing or hiding an explicit
set of nodes or edges.

The `*Edges` filters are symmetric (`(u, v)` also matches `(v, u)`) and meant for undirected
graphs, the `*DiEdges` variants match ordered pairs only. The `*Multi*` variants match the key
as well.
*/

use fxhash::{FxHashMap, FxHashSet};

use crate::{edge::EdgeKey, node::NodeId};

/// Decides whether a node is visible
pub trait NodeFilter<N> {
    fn show_node(&self, id: &N) -> bool;
}

/// Decides whether an edge is visible. Undirected views always ask with the endpoint inserted
/// first as `u`.
pub trait EdgeFilter<N> {
    fn show_edge(&self, u: &N, v: &N, key: EdgeKey) -> bool;

    /// Returns *true* if the filter shows every edge; views then skip asking
    fn is_trivial(&self) -> bool {
        false
    }
}

impl<N, F> NodeFilter<N> for F
where
    F: Fn(&N) -> bool,
{
    fn show_node(&self, id: &N) -> bool {
        self(id)
    }
}

impl<N, F> EdgeFilter<N> for F
where
    F: Fn(&N, &N, EdgeKey) -> bool,
{
    fn show_edge(&self, u: &N, v: &N, key: EdgeKey) -> bool {
        self(u, v, key)
    }
}

/// Shows everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFilter;

impl<N> NodeFilter<N> for NoFilter {
    fn show_node(&self, _: &N) -> bool {
        true
    }
}

impl<N> EdgeFilter<N> for NoFilter {
    fn show_edge(&self, _: &N, _: &N, _: EdgeKey) -> bool {
        true
    }

    fn is_trivial(&self) -> bool {
        true
    }
}

/// Shows only the given nodes
#[derive(Debug, Clone)]
pub struct ShowNodes<N>(FxHashSet<N>);

/// Hides the given nodes
#[derive(Debug, Clone)]
pub struct HideNodes<N>(FxHashSet<N>);

impl<N: NodeId> NodeFilter<N> for ShowNodes<N> {
    fn show_node(&self, id: &N) -> bool {
        self.0.contains(id)
    }
}

impl<N: NodeId> NodeFilter<N> for HideNodes<N> {
    fn show_node(&self, id: &N) -> bool {
        !self.0.contains(id)
    }
}

impl<N: NodeId> FromIterator<N> for ShowNodes<N> {
    fn from_iter<I: IntoIterator<Item = N>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<N: NodeId> FromIterator<N> for HideNodes<N> {
    fn from_iter<I: IntoIterator<Item = N>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Ordered pairs with optional keys.
/// A pair inserted without key matches every key.
#[derive(Debug, Clone)]
struct PairSet<N> {
    pairs: FxHashMap<N, FxHashMap<N, Option<FxHashSet<EdgeKey>>>>,
}

impl<N> Default for PairSet<N> {
    fn default() -> Self {
        Self {
            pairs: FxHashMap::default(),
        }
    }
}

impl<N: NodeId> PairSet<N> {
    fn insert(&mut self, u: N, v: N, key: Option<EdgeKey>) {
        let entry = self
            .pairs
            .entry(u)
            .or_default()
            .entry(v)
            .or_insert_with(|| key.map(|_| FxHashSet::default()));

        match (entry, key) {
            (Some(keys), Some(key)) => {
                keys.insert(key);
            }
            (entry, None) => *entry = None,
            (None, Some(_)) => {}
        }
    }

    fn contains(&self, u: &N, v: &N, key: EdgeKey) -> bool {
        match self.pairs.get(u).and_then(|row| row.get(v)) {
            None => false,
            Some(None) => true,
            Some(Some(keys)) => keys.contains(&key),
        }
    }
}

macro_rules! pair_filter {
    ($(#[$doc:meta])* $name:ident, item: ($($item:ident),+), symmetric: $sym:literal, show: $show:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $name<N>(PairSet<N>);

        impl<N: NodeId> EdgeFilter<N> for $name<N> {
            fn show_edge(&self, u: &N, v: &N, key: EdgeKey) -> bool {
                let hit = self.0.contains(u, v, key) || ($sym && self.0.contains(v, u, key));
                hit == $show
            }
        }

        impl<N: NodeId> $name<N> {
            pub fn new<I>(edges: I) -> Self
            where
                I: IntoIterator<Item = ($($item),+)>,
            {
                edges.into_iter().collect()
            }
        }

        impl<N: NodeId> FromIterator<($($item),+)> for $name<N> {
            fn from_iter<I: IntoIterator<Item = ($($item),+)>>(iter: I) -> Self {
                let mut set = PairSet::default();
                for edge in iter {
                    pair_filter!(@insert set, edge, $($item),+);
                }
                Self(set)
            }
        }
    };
    (@insert $set:ident, $edge:ident, N, N) => {
        $set.insert($edge.0, $edge.1, None)
    };
    (@insert $set:ident, $edge:ident, N, N, EdgeKey) => {
        $set.insert($edge.0, $edge.1, Some($edge.2))
    };
}

pair_filter!(
    /// Shows only the given edges (in either orientation)
    ShowEdges, item: (N, N), symmetric: true, show: true
);
pair_filter!(
    /// Hides the given edges (in either orientation)
    HideEdges, item: (N, N), symmetric: true, show: false
);
pair_filter!(
    /// Shows only the given arcs
    ShowDiEdges, item: (N, N), symmetric: false, show: true
);
pair_filter!(
    /// Hides the given arcs
    HideDiEdges, item: (N, N), symmetric: false, show: false
);
pair_filter!(
    /// Shows only the given keyed edges (in either orientation)
    ShowMultiEdges, item: (N, N, EdgeKey), symmetric: true, show: true
);
pair_filter!(
    /// Hides the given keyed edges (in either orientation)
    HideMultiEdges, item: (N, N, EdgeKey), symmetric: true, show: false
);
pair_filter!(
    /// Shows only the given keyed arcs
    ShowMultiDiEdges, item: (N, N, EdgeKey), symmetric: false, show: true
);
pair_filter!(
    /// Hides the given keyed arcs
    HideMultiDiEdges, item: (N, N, EdgeKey), symmetric: false, show: false
);
