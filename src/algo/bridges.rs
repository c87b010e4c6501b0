/*!
# Bridges and Biconnected Components

Both are derived from one depth-first search computing discovery times and low points
(Hopcroft-Tarjan). The search keeps an explicit call stack, so long paths do not overflow
the native stack.
*/

use super::*;

pub trait Bridges: AdjacencyList + GraphType<Dir = Undirected> {
    /// Returns all edges whose removal increases the number of connected components.
    /// Every bridge `(u, v)` is reported with `u` as the endpoint discovered first.
    fn compute_bridges(&self) -> Vec<Edge> {
        let mut search = LowpointSearch::new(self);
        search.run();
        search.bridges
    }

    /// Returns the node sets of all biconnected components (maximal subgraphs without
    /// articulation point). Isolated nodes are not part of any component; a bridge forms
    /// a component of two nodes.
    fn biconnected_components(&self) -> Vec<Vec<Node>> {
        let mut search = LowpointSearch::new(self);
        search.run();
        search.components
    }
}

impl<G> Bridges for G where G: AdjacencyList + GraphType<Dir = Undirected> {}

struct LowpointSearch<'a, G>
where
    G: AdjacencyList + GraphType<Dir = Undirected>,
{
    graph: &'a G,
    visited: NodeBitSet,
    nodes_info: Vec<NodeInfo>,
    time: Node,

    call_stack: Vec<StackFrame<'a, G>>,
    edge_stack: Vec<Edge>,
    in_component: NodeBitSet,

    bridges: Vec<Edge>,
    components: Vec<Vec<Node>>,
}

struct StackFrame<'a, G>
where
    G: AdjacencyList + 'a,
{
    node: Node,
    parent: Node,
    skipped_parent_edge: bool,
    neighbors: G::NeighborIter<'a>,
}

impl<'a, G> LowpointSearch<'a, G>
where
    G: AdjacencyList + GraphType<Dir = Undirected>,
{
    fn new(graph: &'a G) -> Self {
        let n = graph.number_of_nodes();
        Self {
            graph,
            visited: NodeBitSet::new(n),
            nodes_info: vec![NodeInfo::default(); n as usize],
            time: 0,
            call_stack: Vec::new(),
            edge_stack: Vec::new(),
            in_component: NodeBitSet::new(n),
            bridges: Vec::new(),
            components: Vec::new(),
        }
    }

    fn run(&mut self) {
        for u in self.graph.vertices_range() {
            if self.graph.degree_of(u) == 0 || self.visited.set_bit(u) {
                continue;
            }

            self.discover(u, u);
            self.search();
        }
    }

    fn discover(&mut self, parent: Node, u: Node) {
        self.time += 1;
        self.nodes_info[u as usize] = NodeInfo {
            discovery: self.time,
            low: self.time,
        };
        self.call_stack.push(StackFrame {
            node: u,
            parent,
            skipped_parent_edge: parent == u,
            neighbors: self.graph.neighbors_of(u),
        });
    }

    fn search(&mut self) {
        while let Some(frame) = self.call_stack.last_mut() {
            let u = frame.node;

            if let Some(v) = frame.neighbors.next() {
                if v == frame.parent && !frame.skipped_parent_edge {
                    // only the tree edge itself is ignored; parallel edges count as back edges
                    frame.skipped_parent_edge = true;
                    continue;
                }
                if v == u {
                    continue;
                }

                if !self.visited.set_bit(v) {
                    self.edge_stack.push(Edge(u, v));
                    self.discover(u, v);
                } else if self.nodes_info[v as usize].discovery < self.nodes_info[u as usize].discovery
                {
                    let v_disc = self.nodes_info[v as usize].discovery;
                    self.nodes_info[u as usize].update_low(v_disc);
                    self.edge_stack.push(Edge(u, v));
                }
                continue;
            }

            let parent = frame.parent;
            self.call_stack.pop();
            if parent == u {
                continue;
            }

            let info_u = self.nodes_info[u as usize];
            self.nodes_info[parent as usize].update_low(info_u.low);

            if info_u.low > self.nodes_info[parent as usize].discovery {
                self.bridges.push(Edge(parent, u));
            }

            if info_u.low >= self.nodes_info[parent as usize].discovery {
                self.pop_component(Edge(parent, u));
            }
        }
    }

    /// Pops all edges up to (and including) `tree_edge` and records their endpoints as one component
    fn pop_component(&mut self, tree_edge: Edge) {
        let mut component = Vec::new();
        while let Some(e) = self.edge_stack.pop() {
            for x in [e.0, e.1] {
                if !self.in_component.set_bit(x) {
                    component.push(x);
                }
            }
            if e == tree_edge {
                break;
            }
        }

        for &x in &component {
            self.in_component.clear_bit(x);
        }
        self.components.push(component);
    }
}

#[derive(Clone, Copy, Default)]
struct NodeInfo {
    low: Node,
    discovery: Node,
}

impl NodeInfo {
    fn update_low(&mut self, value: Node) {
        self.low = self.low.min(value);
    }
}
