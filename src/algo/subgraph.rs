/*!
# Subgraph Algorithms

Vertex-induced subgraphs together with the [`NodeMapper`] translating between the ids of the
host graph and the (compact) ids of the subgraph.
*/

use super::*;

/// A trait for creating vertex-induced subgraphs from a graph.
pub trait Subgraph: Sized {
    /// Creates a **vertex-induced subgraph** restricted to `vertices`.
    /// The i-th entry of `vertices` becomes node `i` of the subgraph.
    ///
    /// # Returns
    /// A tuple `(graph, mapping)` with the induced subgraph and the node remapping
    /// (`old` = host id, `new` = subgraph id).
    ///
    /// ** Panics if `vertices` contains a node twice or a node `>= n` **
    fn vertex_induced_as<GO>(&self, vertices: &[Node]) -> (GO, NodeMapper)
    where
        GO: GraphFromScratch + GraphType;

    /// Creates a vertex-induced subgraph of the same type as `Self`.
    fn vertex_induced(&self, vertices: &[Node]) -> (Self, NodeMapper)
    where
        Self: GraphFromScratch + GraphType,
    {
        self.vertex_induced_as(vertices)
    }
}

impl<G> Subgraph for G
where
    G: AdjacencyList + GraphType,
{
    fn vertex_induced_as<GO>(&self, vertices: &[Node]) -> (GO, NodeMapper)
    where
        GO: GraphFromScratch + GraphType,
    {
        let new_n = vertices.len() as NumNodes;
        let mut mapping = NodeMapper::with_capacity(self.number_of_nodes());

        for (new, &old) in vertices.iter().enumerate() {
            mapping.map_node_to(old, new as Node);
        }

        // Prevent moving mapping into the closure
        let mapping_ref = &mapping;
        let graph = GO::from_edges(
            new_n,
            vertices.iter().flat_map(|&u| {
                let new_u = mapping_ref.new_id_of(u).unwrap_or(INVALID_NODE);
                self.neighbors_of(u).filter_map(move |v| {
                    let e = Edge(new_u, mapping_ref.new_id_of(v)?);
                    (GO::is_directed() || Self::is_directed() || e.is_normalized()).then_some(e)
                })
            }),
        );

        (graph, mapping)
    }
}
