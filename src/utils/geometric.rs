use rand::Rng;
use rand_distr::{Distribution, Geometric, StandardGeometric};

use crate::utils::Probability;

/// Distribution of the number of failures before the next success of independent Bernoulli
/// trials. The degenerate probabilities `0` and `1` and the common case `1/2` get their own arm.
#[derive(Debug, Copy, Clone)]
enum Gaps {
    Never,
    Always,
    OneHalf(StandardGeometric),
    General(Geometric),
}

impl Gaps {
    fn from_prob(prob: f64) -> Self {
        if prob == 0.0 {
            Self::Never
        } else if prob == 1.0 {
            Self::Always
        } else if prob == 0.5 {
            Self::OneHalf(StandardGeometric)
        } else {
            match Geometric::new(prob) {
                Ok(distr) => Self::General(distr),
                Err(_) => Self::Never,
            }
        }
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<u64> {
        match self {
            Self::Never => None,
            Self::Always => Some(0),
            Self::OneHalf(distr) => Some(distr.sample(rng)),
            Self::General(distr) => Some(distr.sample(rng)),
        }
    }
}

/// A geometric jumper enumerates the successes among the trials `0, 1, 2, ...` where each
/// trial succeeds independently with probability `prob`, by jumping over the failures.
/// Enumeration ends at the optional stop value (exclusive).
#[derive(Debug, Copy, Clone)]
pub struct GeometricJumper {
    prob: f64,
    stop: Option<u64>,
}

impl GeometricJumper {
    /// ** Panics if `prob` is not a valid probability **
    pub fn new(prob: f64) -> Self {
        assert!(prob.is_valid_probability(), "{prob} is not a probability");
        Self { prob, stop: None }
    }

    /// Only trials below `stop` are enumerated
    pub fn stop_at(mut self, stop: u64) -> Self {
        self.stop = Some(stop);
        self
    }

    pub fn iter<R: Rng>(self, rng: &mut R) -> GeometricJumperIter<'_, R> {
        GeometricJumperIter {
            gaps: Gaps::from_prob(self.prob),
            rng,
            stop: self.stop.unwrap_or(u64::MAX),
            cur: 0,
        }
    }
}

/// Iterator over the successful trials of a [`GeometricJumper`] in increasing order
#[derive(Debug)]
pub struct GeometricJumperIter<'a, R: Rng> {
    gaps: Gaps,
    rng: &'a mut R,
    stop: u64,
    cur: u64,
}

impl<R: Rng> Iterator for GeometricJumperIter<'_, R> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.cur >= self.stop {
            return None;
        }

        let gap = self.gaps.sample(self.rng)?;
        let hit = match self.cur.checked_add(gap) {
            Some(hit) if hit < self.stop => hit,
            _ => {
                self.cur = self.stop;
                return None;
            }
        };

        self.cur = hit + 1;
        Some(hit)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    #[test]
    fn wrong_prob() {
        for prob in [-10.0, -0.001, 1.0001, 3.4] {
            assert!(std::panic::catch_unwind(|| GeometricJumper::new(prob)).is_err());
        }
    }

    #[test]
    fn degenerate_probabilities() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);

        for stop in [3, 10] {
            assert_eq!(
                GeometricJumper::new(1.0).stop_at(stop).iter(rng).collect::<Vec<_>>(),
                (0..stop).collect::<Vec<_>>()
            );
        }

        assert_eq!(GeometricJumper::new(0.0).iter(rng).count(), 0);
    }

    #[test]
    fn strictly_increasing() {
        let rng = &mut Pcg64Mcg::seed_from_u64(4);
        let hits: Vec<u64> = GeometricJumper::new(0.3).stop_at(1000).iter(rng).collect();
        assert!(hits.windows(2).all(|w| w[0] < w[1]));
        assert!(hits.iter().all(|&x| x < 1000));
    }

    #[test]
    fn occurences() {
        let rng = &mut Pcg64Mcg::seed_from_u64(5);

        let stop = 100u64;
        let mut occurences = vec![0; stop as usize];
        for _ in 0..1000 {
            for x in GeometricJumper::new(0.25).stop_at(stop).iter(rng) {
                occurences[x as usize] += 1;
            }
        }

        assert!(occurences.into_iter().all(|x| (150..350).contains(&x)));
    }
}
