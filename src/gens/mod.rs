/*!
# Graph Generators

Classic graph families over the nodes `0..n` (as `u32`), a suite of substructures that can be
added to an existing graph and the random `G(n,p)` model.

Random generators follow a builder-style pattern:

1. Create a generator instance (e.g., `Gnp::new()`).
2. Set parameters using trait methods (e.g., `.nodes(n).prob(p)`).
3. Generate edges via `generate()` or `stream()`.

```
use lgraphs::{prelude::*, gens::*};

let g = barbell_graph(3, 2).unwrap();
assert_eq!(g.number_of_nodes(), 8);
assert_eq!(g.number_of_edges(), 3 + 3 + 3);
```
*/

use rand::Rng;

use crate::prelude::*;

mod gnp;
mod substructures;

pub use gnp::*;
pub use substructures::*;

/// Trait for generators that allow setting the number of nodes.
pub trait NumNodesGen {
    /// Sets the number of nodes in the graph generator.
    fn nodes(self, n: NumNodes) -> Self;
}

/// Trait for generators that allow setting the average degree.
pub trait AverageDegreeGen {
    /// Set the average degree of this generator.
    fn avg_deg(self, deg: f64) -> Self;
}

/// General trait for a configurable random edge generator.
///
/// Types implementing this trait can produce a complete edge list
/// or a lazily-evaluated stream (iterator) of edges.
pub trait GraphGenerator {
    /// Generates a list of random edges.
    ///
    /// This collects the full result from `stream()` into a `Vec<Edge>` as default.
    fn generate<R>(&self, rng: &mut R) -> Vec<Edge>
    where
        R: Rng,
    {
        self.stream(rng).collect()
    }

    /// Creates a lazy iterator (stream) over generated edges.
    fn stream<R>(&self, rng: &mut R) -> impl Iterator<Item = Edge>
    where
        R: Rng;
}

/// Graph of the given kind with nodes `0..n` and no edges
pub fn empty_graph(n: NumNodes, kind: GraphKind) -> AdjGraph<u32> {
    let mut graph = AdjGraph::new(kind);
    graph.add_nodes_from(0..n);
    graph
}

/// Path `0 - 1 - ... - (n-1)`
pub fn path_graph(n: NumNodes, kind: GraphKind) -> AdjGraph<u32> {
    let mut graph = empty_graph(n, kind);
    graph.connect_path(0..n);
    graph
}

/// Path `0 - 1 - ... - (n-1)` closed by the edge `(n-1, 0)`.
/// For `n = 1` this is a self-loop.
pub fn cycle_graph(n: NumNodes, kind: GraphKind) -> AdjGraph<u32> {
    let mut graph = empty_graph(n, kind);
    graph.connect_cycle(0..n);
    graph
}

/// All edges between distinct nodes of `0..n`; directed graphs get both arcs
pub fn complete_graph(n: NumNodes, kind: GraphKind) -> AdjGraph<u32> {
    let mut graph = empty_graph(n, kind);
    graph.connect_clique(0..n, false);
    graph
}

/// Center `0` joined to the `n` leaves `1..=n`
pub fn star_graph(n: NumNodes, kind: GraphKind) -> AdjGraph<u32> {
    let mut graph = empty_graph(n + 1, kind);
    graph.connect_star(0, 1..=n);
    graph
}

/// Two undirected cliques on `m1` nodes joined by a path on `m2` nodes.
///
/// The left clique is `0..m1`, the path `m1..m1+m2` and the right clique `m1+m2..2*m1+m2`.
/// The bridging edges are `(m1-1, m1)` and `(m1+m2-1, m1+m2)`; with `m2 = 0` the cliques are
/// joined directly.
///
/// Fails with `AlgorithmError` if `m1 < 2`.
pub fn barbell_graph(m1: NumNodes, m2: NumNodes) -> Result<AdjGraph<u32>> {
    if m1 < 2 {
        return Err(GraphError::Algorithm(format!(
            "invalid barbell graph: m1 = {m1} must be at least 2"
        )));
    }

    let right = m1 + m2;
    let mut graph = empty_graph(2 * m1 + m2, GraphKind::UNDIRECTED);
    graph.connect_clique(0..m1, false);
    graph.connect_path(m1 - 1..right + 1);
    graph.connect_clique(right..right + m1, false);
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    #[test]
    fn families() {
        for kind in [GraphKind::UNDIRECTED, GraphKind::DIRECTED] {
            let arcs = if kind.is_directed() { 2 } else { 1 };

            assert_eq!(empty_graph(4, kind).number_of_edges(), 0);
            assert_eq!(path_graph(5, kind).number_of_edges(), 4);
            assert_eq!(cycle_graph(5, kind).number_of_edges(), 5);
            assert_eq!(complete_graph(5, kind).number_of_edges(), 10 * arcs);
            assert_eq!(star_graph(4, kind).number_of_nodes(), 5);
            assert_eq!(star_graph(4, kind).out_degree(&0), Ok(4));
        }

        assert_eq!(cycle_graph(1, GraphKind::UNDIRECTED).number_of_selfloops(), 1);
        assert_eq!(path_graph(0, GraphKind::UNDIRECTED).number_of_nodes(), 0);
        assert_eq!(
            path_graph(3, GraphKind::DIRECTED).edges().collect_vec(),
            vec![(&0, &1), (&1, &2)]
        );
    }

    #[test]
    fn barbell() {
        let g = barbell_graph(4, 2).unwrap();
        assert_eq!(g.number_of_nodes(), 10);
        assert_eq!(g.number_of_edges(), 6 + 6 + 3);
        assert!(g.has_edge(&3, &4));
        assert!(g.has_edge(&5, &6));
        assert!(!g.has_edge(&3, &6));

        let joined = barbell_graph(3, 0).unwrap();
        assert_eq!(joined.number_of_edges(), 7);
        assert!(joined.has_edge(&2, &3));

        assert_eq!(
            barbell_graph(1, 3).err().map(|e| e.kind()),
            Some(ErrorKind::AlgorithmError)
        );
    }
}
