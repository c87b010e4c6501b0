/*!
# Condensation and Antichains

Contracting every strongly connected component of a digraph into a single node yields an
acyclic graph, the *condensation*. Downward closed node sets of such a DAG are in one-to-one
correspondence with its antichains, which [`Antichains`] enumerates lazily.
*/

use super::*;

/// The condensation of a directed graph.
///
/// Component `c` is node `c` of [`Condensation::dag`]; its members are listed by
/// [`Condensation::members`]. The DAG has no parallel arcs and no loops.
pub struct Condensation {
    dag: AdjArrayIn,
    members: Vec<Vec<Node>>,
    component_of: Vec<Node>,
}

impl Condensation {
    /// Computes the strongly connected components of `graph` and contracts them
    pub fn new<G>(graph: &G) -> Self
    where
        G: DirectedAdjacencyList,
    {
        let members: Vec<Vec<Node>> = graph.strongly_connected_components().collect();

        let mut component_of = vec![INVALID_NODE; graph.len()];
        for (c, scc) in members.iter().enumerate() {
            for &u in scc {
                component_of[u as usize] = c as Node;
            }
        }

        let mut dag = AdjArrayIn::new(members.len() as NumNodes);
        for u in graph.vertices_range() {
            let cu = component_of[u as usize];
            for v in graph.out_neighbors_of(u) {
                let cv = component_of[v as usize];
                if cu != cv {
                    dag.try_add_edge(cu, cv);
                }
            }
        }

        Self {
            dag,
            members,
            component_of,
        }
    }

    /// The acyclic graph of components
    pub fn dag(&self) -> &AdjArrayIn {
        &self.dag
    }

    /// Nodes of the input graph forming component `c`
    pub fn members(&self, c: Node) -> &[Node] {
        &self.members[c as usize]
    }

    /// Component containing node `u` of the input graph
    pub fn component_of(&self, u: Node) -> Node {
        self.component_of[u as usize]
    }

    pub fn number_of_components(&self) -> NumNodes {
        self.members.len() as NumNodes
    }
}

/// Returns for every node of `dag` the set of nodes reachable from it, the node itself included.
pub fn reflexive_descendants<G>(dag: &G) -> Vec<NodeBitSet>
where
    G: AdjacencyList,
{
    dag.vertices_range()
        .map(|u| dag.bfs(u).into_visited())
        .collect()
}

/// Lazy enumeration of all antichains of a DAG, starting with the empty antichain.
///
/// Each antichain is generated exactly once: a partial antichain is only ever extended by
/// nodes coming later in topological order that are incomparable to its last element.
pub struct Antichains {
    closure: Vec<NodeBitSet>,
    stacks: Vec<(Vec<Node>, Vec<Node>)>,
}

impl Antichains {
    /// ** Panics if `dag` contains a cycle **
    pub fn new<G>(dag: &G) -> Self
    where
        G: DirectedAdjacencyList,
    {
        let mut order: Vec<Node> = dag.topo_search().collect();
        assert_eq!(order.len(), dag.len(), "antichains require an acyclic graph");
        order.reverse();

        Self {
            closure: reflexive_descendants(dag),
            stacks: vec![(Vec::new(), order)],
        }
    }

    /// Nodes reachable from `u`, including `u`
    pub fn descendants_of(&self, u: Node) -> &NodeBitSet {
        &self.closure[u as usize]
    }

    fn comparable(&self, u: Node, v: Node) -> bool {
        self.closure[u as usize].get_bit(v) || self.closure[v as usize].get_bit(u)
    }
}

impl Iterator for Antichains {
    type Item = Vec<Node>;

    fn next(&mut self) -> Option<Self::Item> {
        let (antichain, mut stack) = self.stacks.pop()?;

        while let Some(x) = stack.pop() {
            let new_stack = stack
                .iter()
                .copied()
                .filter(|&t| !self.comparable(x, t))
                .collect();

            let mut new_antichain = antichain.clone();
            new_antichain.push(x);
            self.stacks.push((new_antichain, new_stack));
        }

        Some(antichain)
    }
}

/// Provides [`Antichains`] directly on graphs
pub trait AntichainSearch: DirectedAdjacencyList + Sized {
    /// Returns an iterator over all antichains of the (acyclic) graph
    fn antichains(&self) -> Antichains {
        Antichains::new(self)
    }
}

impl<G> AntichainSearch for G where G: DirectedAdjacencyList + Sized {}
