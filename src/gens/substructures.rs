/*!
# Substructure Generators

This module provides utility methods to generate additional **substructures**
inside an already existing graph.

It allows adding common motifs such as:

- **Paths**
- **Cycles**
- **Cliques**
- **Stars**

Missing nodes are added on the fly.

# Example

```rust
use lgraphs::{prelude::*, gens::*};

let mut g = AdjGraph::graph();
g.connect_path(["a", "b", "c"]);
g.connect_cycle(["c", "d", "e"]);
g.connect_clique(["a", "c", "e"], false);

assert_eq!(g.number_of_edges(), 2 + 3 + 2);
assert!(g.has_edge(&"a", &"e"));
```
*/

use itertools::Itertools;

use super::*;

/// Trait for creating additional **substructures** (paths, cycles, cliques, stars)
/// inside an already existing graph.
pub trait GeneratorSubstructures: GraphNodeOrder {
    /// Connects the given nodes in order with a **simple path**.
    ///
    /// Each consecutive pair of nodes is connected by a single edge.
    ///
    /// # Example
    /// ```rust
    /// use lgraphs::{prelude::*, gens::*};
    ///
    /// let mut g = AdjGraph::digraph();
    /// g.connect_path([0, 1, 2, 3]);
    ///
    /// assert!(g.has_edge(&0, &1));
    /// assert!(g.has_edge(&1, &2));
    /// assert!(g.has_edge(&2, &3));
    /// ```
    fn connect_path<P>(&mut self, nodes_on_path: P)
    where
        P: IntoIterator<Item = Self::NodeId>;

    /// Connects the given nodes with a **cycle**.
    ///
    /// - Consecutive nodes are connected by edges.
    /// - Additionally, the last node is connected back to the first.
    fn connect_cycle<C>(&mut self, nodes_in_cycle: C)
    where
        C: IntoIterator<Item = Self::NodeId>;

    /// Connects all given nodes into a **clique** (complete subgraph).
    ///
    /// - If `with_loops` is `true`, each node also gets a self-loop.
    /// - Directed graphs receive both arcs between every pair.
    fn connect_clique<C>(&mut self, nodes: C, with_loops: bool)
    where
        C: IntoIterator<Item = Self::NodeId>;

    /// Connects `center` to each of the `leaves`
    fn connect_star<L>(&mut self, center: Self::NodeId, leaves: L)
    where
        L: IntoIterator<Item = Self::NodeId>;
}

impl<N: NodeId> GeneratorSubstructures for AdjGraph<N> {
    fn connect_path<P>(&mut self, nodes_on_path: P)
    where
        P: IntoIterator<Item = N>,
    {
        for (u, v) in nodes_on_path.into_iter().tuple_windows() {
            self.add_edge(u, v);
        }
    }

    fn connect_cycle<C>(&mut self, nodes_in_cycle: C)
    where
        C: IntoIterator<Item = N>,
    {
        let mut iter = nodes_in_cycle.into_iter();

        if let Some(first) = iter.next() {
            let mut prev = first.clone();
            for cur in iter {
                self.add_edge(prev, cur.clone());
                prev = cur;
            }

            self.add_edge(prev, first);
        }
    }

    fn connect_clique<C>(&mut self, nodes: C, with_loops: bool)
    where
        C: IntoIterator<Item = N>,
    {
        let nodes = nodes.into_iter().unique().collect_vec();
        let directed = self.is_directed();

        for (i, u) in nodes.iter().enumerate() {
            self.add_node(u.clone());
            if with_loops {
                self.add_edge(u.clone(), u.clone());
            }
            for v in &nodes[i + 1..] {
                self.add_edge(u.clone(), v.clone());
                if directed {
                    self.add_edge(v.clone(), u.clone());
                }
            }
        }
    }

    fn connect_star<L>(&mut self, center: N, leaves: L)
    where
        L: IntoIterator<Item = N>,
    {
        self.add_node(center.clone());
        for leaf in leaves {
            self.add_edge(center.clone(), leaf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_path() {
        {
            let mut g = AdjGraph::<u32>::graph();
            g.connect_path([]);
            assert_eq!(g.number_of_edges(), 0);
        }

        {
            let mut g = AdjGraph::graph();
            g.connect_path([1]);
            assert_eq!(g.number_of_edges(), 0);
        }

        {
            let mut g = AdjGraph::digraph();
            g.connect_path([2, 1]);
            assert_eq!(g.number_of_edges(), 1);
            assert!(g.has_edge(&2, &1));
            assert!(!g.has_edge(&1, &2));
        }

        {
            let mut g = AdjGraph::graph();
            g.connect_path([0, 3, 1, 4]);
            assert_eq!(
                g.edges().collect_vec(),
                vec![(&0, &3), (&3, &1), (&1, &4)]
            );
        }
    }

    #[test]
    fn test_connect_cycle() {
        {
            let mut g = AdjGraph::<u32>::graph();
            g.connect_cycle([]);
            assert_eq!(g.number_of_edges(), 0);
        }

        {
            let mut g = AdjGraph::graph();
            g.connect_cycle([1]);
            assert_eq!(g.number_of_edges(), 1);
            assert!(g.has_edge(&1, &1));
        }

        {
            let mut g = AdjGraph::digraph();
            g.connect_cycle([0, 3, 1, 4]);
            assert_eq!(
                g.edges().collect_vec(),
                vec![(&0, &3), (&3, &1), (&1, &4), (&4, &0)]
            );
        }
    }

    #[test]
    fn test_connect_clique() {
        {
            let mut g = AdjGraph::<u32>::graph();
            g.connect_clique([], true);
            assert_eq!(g.number_of_edges(), 0);
        }

        {
            let mut g = AdjGraph::graph();
            g.connect_clique([1], false);
            assert_eq!(g.number_of_edges(), 0);
            assert_eq!(g.number_of_nodes(), 1);
        }

        {
            let mut g = AdjGraph::graph();
            g.connect_clique([1], true);
            assert_eq!(g.number_of_edges(), 1);
            assert!(g.has_edge(&1, &1));
        }

        {
            let mut g = AdjGraph::graph();
            g.connect_clique([1, 2, 4, 2], false);
            assert_eq!(g.number_of_edges(), 3);
        }

        {
            let mut g = AdjGraph::digraph();
            g.connect_clique([1, 2, 4], true);
            assert_eq!(g.number_of_edges(), 9);
        }
    }

    #[test]
    fn test_connect_star() {
        let mut g = AdjGraph::multigraph();
        g.connect_star('c', ['x', 'y', 'x']);
        assert_eq!(g.degree(&'c'), Ok(3));
        assert_eq!(g.number_of_edges_between(&'c', &'x'), 2);

        let mut lonely = AdjGraph::graph();
        lonely.connect_star('c', []);
        assert!(lonely.has_node(&'c'));
    }
}
