/*!
# Directed Graph Representations

[`DirectedGraphIn`] stores **both outgoing and incoming neighborhoods**,
so `in_neighbors_of` and `in_degree_of` are as cheap as their outgoing counterparts.
This matters for the flow algorithms which constantly walk edges backwards.

- [`AdjArrayIn`]: adjacency arrays (`Vec<Node>`)
- [`SparseAdjArrayIn`]: sparse adjacency arrays using inline small vectors
*/

use crate::{
    repr::macros::{impl_common_graph_ops, impl_try_add_edge},
    testing::test_graph_ops,
};

use super::*;

/// A directed graph storing **both outgoing and incoming neighborhoods**.
///
/// # Type parameters
/// - `OutNbs`: [`Neighborhood`] implementation used for outgoing adjacency.
/// - `InNbs`: [`Neighborhood`] implementation used for incoming adjacency.
#[derive(Clone)]
pub struct DirectedGraphIn<OutNbs, InNbs>
where
    OutNbs: Neighborhood,
    InNbs: Neighborhood,
{
    out_nbs: Vec<OutNbs>,
    in_nbs: Vec<InNbs>,
    num_edges: NumEdges,
}

/// Directed graph using adjacency arrays for both outgoing and incoming neighborhoods.
pub type AdjArrayIn = DirectedGraphIn<ArrNeighborhood, ArrNeighborhood>;

/// Directed graph using sparse adjacency arrays for both outgoing and incoming neighborhoods.
pub type SparseAdjArrayIn = DirectedGraphIn<SparseNeighborhood, SparseNeighborhood>;

impl_common_graph_ops!(DirectedGraphIn<out_nbs : OutNbs, in_nbs: InNbs> => out_nbs, Directed);

impl<OutNbs, InNbs> DirectedAdjacencyList for DirectedGraphIn<OutNbs, InNbs>
where
    OutNbs: Neighborhood,
    InNbs: Neighborhood,
{
    type InNeighborIter<'a>
        = <InNbs as Neighborhood>::NeighborhoodIter<'a>
    where
        Self: 'a;

    fn in_neighbors_of(&self, u: Node) -> Self::InNeighborIter<'_> {
        self.in_nbs[u as usize].neighbors()
    }

    fn in_degree_of(&self, u: Node) -> NumNodes {
        self.in_nbs[u as usize].num_of_neighbors()
    }
}

impl<OutNbs, InNbs> AdjacencyTest for DirectedGraphIn<OutNbs, InNbs>
where
    OutNbs: Neighborhood,
    InNbs: Neighborhood,
{
    fn has_edge(&self, u: Node, v: Node) -> bool {
        // scan the shorter of both lists
        if self.out_nbs[u as usize].num_of_neighbors() <= self.in_nbs[v as usize].num_of_neighbors()
        {
            self.out_nbs[u as usize].has_neighbor(v)
        } else {
            self.in_nbs[v as usize].has_neighbor(u)
        }
    }
}

impl<OutNbs, InNbs> GraphEdgeEditing for DirectedGraphIn<OutNbs, InNbs>
where
    OutNbs: Neighborhood,
    InNbs: Neighborhood,
{
    fn add_edge(&mut self, u: Node, v: Node) {
        self.out_nbs[u as usize].add_neighbor(v);
        self.in_nbs[v as usize].add_neighbor(u);
        self.num_edges += 1;
    }

    impl_try_add_edge!(self);

    fn try_remove_edge(&mut self, u: Node, v: Node) -> bool {
        if self.out_nbs[u as usize].try_remove_neighbor(v) {
            assert!(self.in_nbs[v as usize].try_remove_neighbor(u));
            self.num_edges -= 1;
            true
        } else {
            false
        }
    }
}

impl<OutNbs, InNbs> GraphLocalEdgeEditing for DirectedGraphIn<OutNbs, InNbs>
where
    OutNbs: Neighborhood,
    InNbs: Neighborhood,
{
    fn remove_edges_at_node(&mut self, u: Node) {
        let out_nbs = std::mem::take(&mut self.out_nbs[u as usize]);
        for v in out_nbs.neighbors() {
            if v != u {
                assert!(self.in_nbs[v as usize].try_remove_neighbor(u));
            }
            self.num_edges -= 1;
        }

        // self-loops were already counted above
        let in_nbs = std::mem::take(&mut self.in_nbs[u as usize]);
        for v in in_nbs.neighbors().filter(|&v| v != u) {
            assert!(self.out_nbs[v as usize].try_remove_neighbor(u));
            self.num_edges -= 1;
        }
    }
}

// ---------- Testing ----------

test_graph_ops!(
    test_adj_array_in,
    AdjArrayIn,
    false,
    (
        GraphNew,
        AdjacencyList,
        DirectedAdjacencyList,
        GraphEdgeEditing
    )
);

test_graph_ops!(
    test_sparse_adj_array_in,
    SparseAdjArrayIn,
    false,
    (
        GraphNew,
        AdjacencyList,
        DirectedAdjacencyList,
        GraphEdgeEditing
    )
);
