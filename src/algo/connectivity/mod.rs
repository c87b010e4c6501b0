/*!
# Flow-Based Connectivity

Node and edge connectivity, minimum cuts, disjoint paths, all minimum node cutsets and
(edge) k-components. Everything is reduced to maximum flows in an [`AuxiliaryDigraph`];
the flow algorithm is selected by a [`FlowFunc`].

Repeated queries on the same graph should go through [`NodeConnectivity`] or
[`EdgeConnectivity`], which build the auxiliary digraph and its residual network once:

```
use uconn::{prelude::*, algo::*, gens::*};

let graph: AdjArrayUndir = icosahedral_graph();
assert_eq!(node_connectivity(&graph, None, None, FlowFunc::default()).unwrap(), 5);

let mut queries = NodeConnectivity::new(&graph).unwrap().flow_func(FlowFunc::Dinitz);
assert_eq!(queries.local_connectivity(0, 6, None).unwrap(), 5);
assert_eq!(queries.minimum_st_cut(0, 6).unwrap().len(), 5);
```
*/

use itertools::Itertools;
use log::debug;

use super::*;

mod auxiliary;
mod disjoint_paths;
mod edge_connectivity;
mod edge_kcomponents;
mod kcomponents;
mod kcutsets;
mod node_connectivity;

pub use auxiliary::*;
pub use disjoint_paths::*;
pub use edge_connectivity::*;
pub use edge_kcomponents::*;
pub use kcomponents::*;
pub use kcutsets::*;
pub use node_connectivity::*;

/// Either both endpoints of a local query are given or none
fn endpoints(s: Option<Node>, t: Option<Node>) -> Result<Option<(Node, Node)>> {
    match (s, t) {
        (Some(s), Some(t)) => Ok(Some((s, t))),
        (None, None) => Ok(None),
        _ => Err(Error::MissingEndpoint),
    }
}

fn require_endpoints<G: GraphNodeOrder>(graph: &G, s: Node, t: Node) -> Result<()> {
    graph.require_vertex(s)?;
    graph.require_vertex(t)?;
    if s == t {
        return Err(Error::SourceIsSink(s));
    }
    Ok(())
}

/// Neighbors of `u` in any direction, without `u` itself, sorted and without repetitions
fn distinct_neighbors<G: StaticGraph>(graph: &G, u: Node) -> Vec<Node> {
    graph
        .all_neighbors_of(u)
        .filter(|&v| v != u)
        .sorted_unstable()
        .dedup()
        .collect()
}

/// Undirected copy without loops and parallel edges
fn simple_undirected_copy<G: StaticGraph>(graph: &G) -> AdjArrayUndir {
    let mut copy = AdjArrayUndir::new(graph.number_of_nodes());
    for Edge(u, v) in graph.edges(true) {
        if u != v {
            copy.try_add_edge(u, v);
        }
    }
    copy
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use crate::gens::*;

    /// Named graphs with their node and edge connectivity
    pub(crate) fn known_graphs() -> Vec<(&'static str, AdjArrayUndir, NumNodes, NumNodes)> {
        vec![
            ("icosahedral", icosahedral_graph(), 5, 5),
            ("octahedral", octahedral_graph(), 4, 4),
            ("dodecahedral", dodecahedral_graph(), 3, 3),
            ("petersen", petersen_graph(), 3, 3),
            ("grid 4x5", grid_2d_graph(4, 5), 2, 2),
            ("cycle 7", cycle_graph(7), 2, 2),
            ("path 6", path_graph(6), 1, 1),
        ]
    }

    /// Two paths without any edge in between
    pub(crate) fn two_paths() -> AdjArrayUndir {
        AdjArrayUndir::from_edges(6, [(0, 1), (1, 2), (3, 4), (4, 5)])
    }

    /// Returns *true* if deleting `separator` leaves at least two nodes in different
    /// (weakly connected) components
    pub(crate) fn is_separator<G>(graph: &G, separator: &[Node]) -> bool
    where
        G: StaticGraph,
    {
        let removed = NodeBitSet::new_with_bits_set(graph.number_of_nodes(), separator.iter().copied());
        let Some(start) = graph.vertices_range().find(|&u| !removed.get_bit(u)) else {
            return false;
        };

        let mut visited = removed.clone();
        visited.set_bit(start);
        let mut stack = vec![start];
        while let Some(u) = stack.pop() {
            for v in graph.all_neighbors_of(u) {
                if !visited.set_bit(v) {
                    stack.push(v);
                }
            }
        }

        (visited.cardinality() as usize) < graph.len()
    }

    #[test]
    fn endpoint_resolution() {
        assert_eq!(endpoints(None, None), Ok(None));
        assert_eq!(endpoints(Some(1), Some(2)), Ok(Some((1, 2))));
        assert_eq!(endpoints(Some(1), None), Err(Error::MissingEndpoint));
        assert_eq!(endpoints(None, Some(2)), Err(Error::MissingEndpoint));

        let graph = two_paths();
        assert_eq!(require_endpoints(&graph, 0, 6), Err(Error::NodeNotFound(6)));
        assert_eq!(require_endpoints(&graph, 2, 2), Err(Error::SourceIsSink(2)));
        assert_eq!(distinct_neighbors(&graph, 1), [0, 2]);
    }
}
