/*!
# Graph Generators

- [`GeneratorSubstructures`] adds paths, cycles and cliques to an existing graph,
- [`classic`] builds the named graphs used throughout the connectivity literature
  (complete graphs, grids, Petersen graph, platonic solids, ...),
- [`Gnp`] / [`RandomGraph`] produce seeded Erdős–Rényi graphs for property tests.
*/

use rand::Rng;

use crate::prelude::*;

pub mod classic;
mod gnp;
mod substructures;

pub use classic::*;
pub use gnp::*;
pub use substructures::*;

/// Trait for building full graph instances from random models.
pub trait RandomGraph: Sized {
    /// Creates a random `G(n,p)` graph using edge probability `p`.
    fn gnp<R>(rng: &mut R, n: NumNodes, p: f64) -> Self
    where
        R: Rng;

    /// Creates a `G(n,p)` graph with no self-loops.
    fn gnp_no_loops<R>(rng: &mut R, n: NumNodes, p: f64) -> Self
    where
        R: Rng;
}

impl<G> RandomGraph for G
where
    G: GraphFromScratch + GraphType,
{
    fn gnp<R>(rng: &mut R, n: NumNodes, p: f64) -> Self
    where
        R: Rng,
    {
        Self::from_edges(
            n,
            Gnp::new()
                .nodes(n)
                .prob(p)
                .stream(rng)
                .filter(|e| Self::is_directed() || e.is_normalized()),
        )
    }

    fn gnp_no_loops<R>(rng: &mut R, n: NumNodes, p: f64) -> Self
    where
        R: Rng,
    {
        Self::from_edges(
            n,
            Gnp::new()
                .nodes(n)
                .prob(p)
                .stream(rng)
                .filter(|e| !e.is_loop() && (Self::is_directed() || e.is_normalized())),
        )
    }
}
