/*!
# Utilities

Small helpers shared by algorithms and generators:
- [`NodeMapper`] translates node ids between a graph and one of its induced subgraphs,
- [`Probability`] validates probabilities of random generators.
*/

use num::{One, Zero};

pub mod node_mapper;

pub use node_mapper::NodeMapper;

/// Helper trait for probalities
pub trait Probability {
    /// Returns *true* if the probality is valid (ie. between `0` and `1`)
    fn is_valid_probility(&self) -> bool;
}

impl<P> Probability for P
where
    P: Zero + One + PartialOrd,
{
    fn is_valid_probility(&self) -> bool {
        Self::zero().le(self) && Self::one().ge(self)
    }
}
