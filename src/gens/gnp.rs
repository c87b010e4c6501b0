use crate::{gens::*, utils::*};

/// `G(n,p)` graphs contain every possible edge of a graph with `n` nodes with probability `p`
/// independent from each other.
///
/// Candidates are all `n^2` ordered pairs; normalization for undirected graphs and
/// self-loop filtering are up to the caller.
#[derive(Debug, Copy, Clone, Default)]
pub struct Gnp {
    n: u64,
    p: f64,
}

impl Gnp {
    /// Creates a new empty `G(n,p)` generator
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates `n`
    pub fn nodes(mut self, n: NumNodes) -> Self {
        self.n = n as u64;
        self
    }

    /// Updates `p`
    /// ** Panics if `p` is not in `[0, 1]` **
    pub fn prob(mut self, prob: f64) -> Self {
        assert!(prob.is_valid_probility());
        self.p = prob;
        self
    }

    /// Creates a lazy iterator over random `G(n,p)` edges.
    ///
    /// Instead of one coin flip per candidate, the distance to the next selected candidate
    /// is drawn from a geometric distribution.
    pub fn stream<'r, R: Rng>(&self, rng: &'r mut R) -> impl Iterator<Item = Edge> + use<'r, R> {
        let n = self.n;
        let max_value = n * n;
        let p = self.p;
        let log_q = (1.0 - p).ln();

        let mut cur: u64 = 0;
        std::iter::from_fn(move || {
            if p <= 0.0 {
                return None;
            }

            let skip = if p >= 1.0 {
                0
            } else {
                // `1 - random` lies in (0, 1] and thus has a finite logarithm
                let x: f64 = 1.0 - rng.random::<f64>();
                (x.ln() / log_q).floor() as u64
            };

            cur = cur.saturating_add(skip);
            if cur >= max_value {
                return None;
            }

            let edge = Edge((cur / n) as Node, (cur % n) as Node);
            cur += 1;
            Some(edge)
        })
    }
}
