use itertools::Itertools;

use crate::{
    gens::*,
    utils::{Probability, geometric::GeometricJumper},
};

/// A G(n, p) graph can be defined by either a probability or the average degree which is more
/// common in practice
#[derive(Debug, Copy, Clone, Default)]
enum GnpType {
    /// No value has been set yet
    #[default]
    NotSet,
    /// Direct probability value
    Prob(f64),
    /// Average degree of a node
    AvgDeg(f64),
}

/// `G(n,p)` graphs contain every possible edge of `n` nodes with probability `p` independently.
///
/// The generator enumerates all `n^2` ordered pairs and jumps geometrically between the hits.
/// Undirected generators keep only the normalized pairs, so every unordered pair is drawn once.
/// Self-loops are excluded unless enabled with [`Gnp::loops`].
#[derive(Debug, Copy, Clone)]
pub struct Gnp {
    n: u64,
    p: GnpType,
    directed: bool,
    loops: bool,
}

impl Default for Gnp {
    fn default() -> Self {
        Self {
            n: 0,
            p: GnpType::NotSet,
            directed: false,
            loops: false,
        }
    }
}

impl Gnp {
    /// Creates a new empty `G(n,p)` generator
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates `p` directly
    /// ** Panics if `p` is not a probability **
    pub fn prob(mut self, prob: f64) -> Self {
        assert!(prob.is_valid_probability());
        self.p = GnpType::Prob(prob);
        self
    }

    /// Draws ordered pairs instead of unordered ones
    pub fn directed(mut self, directed: bool) -> Self {
        self.directed = directed;
        self
    }

    /// Allows self-loops
    pub fn loops(mut self, loops: bool) -> Self {
        self.loops = loops;
        self
    }

    fn probability(&self) -> f64 {
        match self.p {
            GnpType::NotSet => panic!("Probability of Gnp was not set!"),
            GnpType::Prob(p) => p,
            GnpType::AvgDeg(d) => {
                let p = d / self.n.max(1) as f64;
                assert!(
                    p.is_valid_probability(),
                    "The average degree is invalid for the given n!"
                );
                p
            }
        }
    }
}

impl NumNodesGen for Gnp {
    /// Updates `n`
    fn nodes(mut self, n: NumNodes) -> Self {
        self.n = n as u64;
        self
    }
}

impl AverageDegreeGen for Gnp {
    /// Updates `p` such that `p = d/n`.
    /// Note that this conversion will only be done when calling `stream/generate`.
    fn avg_deg(mut self, deg: f64) -> Self {
        self.p = GnpType::AvgDeg(deg);
        self
    }
}

impl GraphGenerator for Gnp {
    /// Creates a streaming generator over random `G(n,p)` edges
    fn stream<R: Rng>(&self, rng: &mut R) -> impl Iterator<Item = Edge> {
        let p = self.probability();
        let (n, directed, loops) = (self.n, self.directed, self.loops);

        GeometricJumper::new(p)
            .stop_at(n * n)
            .iter(rng)
            .map(move |x| Edge::from_u64(x, n))
            .filter(move |e| (loops || !e.is_loop()) && (directed || e.is_normalized()))
    }
}

impl AdjGraph<u32> {
    /// Random `G(n,p)` graph of the given kind over the nodes `0..n`.
    ///
    /// Multigraph kinds are accepted but never receive parallel edges.
    ///
    /// # Examples
    /// ```
    /// use lgraphs::prelude::*;
    /// use rand::SeedableRng;
    ///
    /// let mut rng = rand::rngs::StdRng::seed_from_u64(3);
    /// let g = AdjGraph::gnp(&mut rng, 10, 1.0, GraphKind::UNDIRECTED);
    /// assert_eq!(g.number_of_edges(), 45);
    /// ```
    pub fn gnp<R: Rng>(rng: &mut R, n: NumNodes, p: f64, kind: GraphKind) -> Self {
        let mut graph = empty_graph(n, kind);
        let edges = Gnp::new()
            .nodes(n)
            .prob(p)
            .directed(kind.is_directed())
            .stream(rng)
            .map(|Edge(u, v)| (u, v))
            .collect_vec();
        graph.add_edges_from(edges);
        graph
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    #[test]
    fn degenerate_probabilities() {
        let rng = &mut Pcg64Mcg::seed_from_u64(1);

        assert_eq!(Gnp::new().nodes(20).prob(0.0).generate(rng).len(), 0);
        assert_eq!(Gnp::new().nodes(20).prob(1.0).generate(rng).len(), 190);
        assert_eq!(
            Gnp::new().nodes(20).prob(1.0).directed(true).generate(rng).len(),
            380
        );
        assert_eq!(
            Gnp::new().nodes(20).prob(1.0).loops(true).generate(rng).len(),
            210
        );
        assert_eq!(Gnp::new().nodes(0).prob(0.5).generate(rng).len(), 0);
    }

    #[test]
    fn edges_are_valid() {
        let rng = &mut Pcg64Mcg::seed_from_u64(2);

        for directed in [false, true] {
            let edges = Gnp::new()
                .nodes(50)
                .avg_deg(5.0)
                .directed(directed)
                .generate(rng);

            assert!(edges.iter().all(|e| !e.is_loop() && e.0 < 50 && e.1 < 50));
            assert!(directed || edges.iter().all(|e| e.is_normalized()));
            assert!(edges.iter().tuple_windows().all(|(a, b)| (a.0, a.1) < (b.0, b.1)));
        }
    }

    #[test]
    fn expected_density() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);
        let n = 200;
        let g = AdjGraph::gnp(rng, n, 0.1, GraphKind::UNDIRECTED);

        let expected = 0.1 * (n * (n - 1) / 2) as f64;
        let m = g.number_of_edges() as f64;
        assert_eq!(g.number_of_nodes(), n);
        assert!((m - expected).abs() < 0.1 * expected, "{m} vs {expected}");
    }
}
