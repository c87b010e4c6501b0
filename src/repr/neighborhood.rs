use itertools::Itertools;
use smallvec::{Array, SmallVec};
use std::{iter::Copied, slice::Iter};

use super::*;

/// Basic Neighborhood-Impl. using `Vec<Node>`
#[derive(Default, Clone, Debug)]
pub struct ArrNeighborhood(pub Vec<Node>);

/// Like [`ArrNeighborhood`] but uses `SmallVec<[Node; N]>` instead.
/// Prefer this if the graph is known to be sparse.
#[derive(Default, Clone, Debug)]
pub struct SparseNeighborhood<const N: usize = 8>(pub SmallVec<[Node; N]>)
where
    [Node; N]: Array<Item = Node>;

/// Both neighborhoods are vector-like; removal swaps the last neighbor into the gap
/// and thus does not preserve the insertion order.
macro_rules! impl_vec_neighborhood {
    () => {
        fn num_of_neighbors(&self) -> NumNodes {
            self.0.len() as NumNodes
        }

        type NeighborhoodIter<'a>
            = Copied<Iter<'a, Node>>
        where
            Self: 'a;

        fn neighbors(&self) -> Self::NeighborhoodIter<'_> {
            self.0.iter().copied()
        }

        fn add_neighbor(&mut self, u: Node) {
            self.0.push(u);
        }

        fn try_remove_neighbor(&mut self, u: Node) -> bool {
            if let Some((pos, _)) = self.0.iter().find_position(|&&x| x == u) {
                self.0.swap_remove(pos);
                true
            } else {
                false
            }
        }

        fn clear(&mut self) {
            self.0.clear();
        }
    };
}

impl Neighborhood for ArrNeighborhood {
    impl_vec_neighborhood!();
}

impl<const N: usize> Neighborhood for SparseNeighborhood<N>
where
    [Node; N]: Array<Item = Node>,
{
    impl_vec_neighborhood!();
}
