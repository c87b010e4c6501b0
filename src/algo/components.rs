/*!
# Components

Connected components of undirected graphs, weakly connected components of arbitrary graphs
and strongly connected components (Tarjan) of directed graphs, all exposed as iterators.
*/

use std::{collections::VecDeque, iter::FusedIterator};

use itertools::Itertools;

use super::*;

pub trait Connectivity: AdjacencyList + Traversal + Sized {
    /// Returns an iterator over the connected components of an undirected graph
    fn connected_components(&self) -> ConnectedComponents<'_, Self>
    where
        Self: GraphType<Dir = Undirected>,
    {
        ConnectedComponents::new(self)
    }

    /// Returns an iterator over the connected components of the graph after deleting `ignore`
    fn connected_components_exclude_nodes<I>(&self, ignore: I) -> ConnectedComponents<'_, Self>
    where
        I: IntoIterator<Item = Node>,
        Self: GraphType<Dir = Undirected>,
    {
        ConnectedComponents::new(self).exclude_nodes(ignore)
    }

    /// Returns *true* if the undirected graph has at least one node and exactly one component
    fn is_connected(&self) -> bool
    where
        Self: GraphType<Dir = Undirected>,
    {
        !self.is_empty() && self.bfs(0).count() == self.len()
    }

    /// Returns the strongly connected components of the graph
    fn strongly_connected_components(&self) -> StronglyConnectedComponents<'_, Self>
    where
        Self: DirectedAdjacencyList,
    {
        StronglyConnectedComponents::new(self)
    }

    /// Returns the strongly connected components of the graph.
    /// In contrast to [`Connectivity::strongly_connected_components`], this methods includes SCCs of size 1
    /// if and only if the node has a self-loop
    fn strongly_connected_components_no_singletons(&self) -> StronglyConnectedComponents<'_, Self>
    where
        Self: DirectedAdjacencyList,
    {
        StronglyConnectedComponents::new(self).include_singletons(false)
    }

    /// Returns *true* if the graph has at least one node and every node reaches every other node
    fn is_strongly_connected(&self) -> bool
    where
        Self: DirectedAdjacencyList,
    {
        !self.is_empty() && self.strongly_connected_components().nth(1).is_none()
    }
}

impl<G> Connectivity for G where G: AdjacencyList + Sized {}

/// Components that ignore edge directions. For undirected graphs these are the connected components.
pub trait WeakConnectivity: StaticGraph {
    /// Returns the weakly connected components in order of their smallest node
    fn weakly_connected_components(&self) -> Vec<Vec<Node>> {
        let mut visited = self.vertex_bitset_unset();
        let mut queue = VecDeque::new();
        let mut components = Vec::new();

        for root in self.vertices_range() {
            if visited.set_bit(root) {
                continue;
            }

            let mut component = vec![root];
            queue.push_back(root);
            while let Some(u) = queue.pop_front() {
                for v in self.all_neighbors_of(u) {
                    if !visited.set_bit(v) {
                        component.push(v);
                        queue.push_back(v);
                    }
                }
            }
            components.push(component);
        }

        components
    }

    /// Returns *true* if the graph has at least one node and is connected when ignoring directions
    fn is_weakly_connected(&self) -> bool {
        !self.is_empty() && self.weakly_connected_components().len() == 1
    }
}

impl<G: StaticGraph> WeakConnectivity for G {}

pub struct ConnectedComponents<'a, G>
where
    G: AdjacencyList + GraphType<Dir = Undirected>,
{
    bfs: BFS<'a, G>,
}

impl<'a, G> ConnectedComponents<'a, G>
where
    G: AdjacencyList + GraphType<Dir = Undirected>,
{
    pub fn new(graph: &'a G) -> Self {
        Self {
            bfs: BFS::unstarted(graph),
        }
    }

    /// Treats the given nodes as deleted from the graph
    pub fn set_exclude_nodes<I>(&mut self, exclude: I)
    where
        I: IntoIterator<Item = Node>,
    {
        self.bfs.exclude_nodes(exclude);
    }

    pub fn exclude_nodes<I>(mut self, exclude: I) -> Self
    where
        I: IntoIterator<Item = Node>,
    {
        self.set_exclude_nodes(exclude);
        self
    }
}

impl<G> Iterator for ConnectedComponents<'_, G>
where
    G: AdjacencyList + GraphType<Dir = Undirected>,
{
    type Item = Vec<Node>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let cc = self.bfs.by_ref().collect_vec();
            if !cc.is_empty() {
                return Some(cc);
            }

            if !self.bfs.try_restart_at_unvisited() {
                return None;
            }
        }
    }
}

impl<G> FusedIterator for ConnectedComponents<'_, G> where
    G: AdjacencyList + GraphType<Dir = Undirected>
{
}

/// Implementation of Tarjan's Algorithm for Strongly Connected Components.
/// It is designed as an iterator that emits the nodes of one strongly connected component at a
/// time. Observe that the order of nodes within a component is non-deterministic; the order of the
/// components themselves are in the reverse topological order of the SCCs (i.e. if each SCC
/// were contracted into a single node).
pub struct StronglyConnectedComponents<'a, G>
where
    G: DirectedAdjacencyList,
{
    graph: &'a G,
    idx: Node,

    states: Vec<NodeState>,
    potentially_unvisited: usize,

    include_singletons: bool,

    path_stack: Vec<Node>,
    call_stack: Vec<StackFrame<'a, G>>,
}

impl<'a, G> StronglyConnectedComponents<'a, G>
where
    G: DirectedAdjacencyList,
{
    /// Construct the iterator for some graph
    pub fn new(graph: &'a G) -> Self {
        Self {
            graph,
            idx: 0,
            states: vec![Default::default(); graph.len()],
            potentially_unvisited: 0,

            include_singletons: true,

            path_stack: Vec::with_capacity(32),
            call_stack: Vec::with_capacity(32),
        }
    }

    /// Each node that is not part of a circle is returned as its own SCC.
    /// By setting `include = false`, those nodes are not returned.
    pub fn set_include_singletons(&mut self, include: bool) {
        self.include_singletons = include;
    }

    pub fn include_singletons(mut self, include: bool) -> Self {
        self.set_include_singletons(include);
        self
    }

    /// Like in a DFS computing a spanning forest, each node is visited at least once:
    /// after exhausting everything reachable from a root, continue with an untouched node.
    fn next_unvisited_node(&mut self) -> Option<Node> {
        while self.potentially_unvisited < self.graph.len() {
            if !self.states[self.potentially_unvisited].visited {
                let v = self.potentially_unvisited as Node;
                self.push_node(v, None);
                return Some(v);
            }

            self.potentially_unvisited += 1;
        }
        None
    }

    /// Put a pristine stack frame on the call stack, i.e. the first step of a recursive call.
    fn push_node(&mut self, node: Node, parent: Option<Node>) {
        self.call_stack.push(StackFrame {
            node,
            parent: parent.unwrap_or(node),
            initial_stack_len: 0,
            first_call: true,
            has_loop: false,
            neighbors: self.graph.out_neighbors_of(node),
        });
    }

    fn search(&mut self) -> Option<Vec<Node>> {
        // Recursion is simulated by `call_stack` whose frames own the neighbor iterators;
        // this allows pausing between components and avoids stack overflows on long paths.
        'recurse: while let Some(frame) = self.call_stack.last_mut() {
            let v = frame.node;

            if frame.first_call {
                frame.first_call = false;
                frame.initial_stack_len = self.path_stack.len() as Node;

                self.states[v as usize].visit(self.idx);
                self.idx += 1;

                self.path_stack.push(v);
            }

            for w in frame.neighbors.by_ref() {
                let w_state = self.states[w as usize];
                frame.has_loop |= w == v;

                if !w_state.visited {
                    self.push_node(w, Some(v));
                    continue 'recurse;
                } else if w_state.on_stack {
                    self.states[v as usize].try_lower_link(w_state.index);
                }
            }

            let frame = self.call_stack.pop()?;
            let state = self.states[v as usize];

            self.states[frame.parent as usize].try_lower_link(state.low_link);

            if state.is_root() {
                if !self.include_singletons
                    && self.path_stack.last() == Some(&v)
                    && !frame.has_loop
                {
                    self.states[v as usize].on_stack = false;
                    self.path_stack.pop();
                } else {
                    let component = self.path_stack.split_off(frame.initial_stack_len as usize);

                    for &w in &component {
                        self.states[w as usize].on_stack = false;
                    }

                    debug_assert_eq!(component.first(), Some(&v));

                    return Some(component);
                }
            }
        }

        None
    }
}

impl<G> Iterator for StronglyConnectedComponents<'_, G>
where
    G: DirectedAdjacencyList,
{
    type Item = Vec<Node>;

    /// Returns either a vector of node ids that form an SCC or None if no further SCC was found
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(x) = self.search() {
                return Some(x);
            }

            self.next_unvisited_node()?;
        }
    }
}

impl<G> FusedIterator for StronglyConnectedComponents<'_, G> where G: DirectedAdjacencyList {}

struct StackFrame<'a, T>
where
    T: DirectedAdjacencyList + 'a,
{
    node: Node,
    parent: Node,
    initial_stack_len: Node,
    first_call: bool,
    has_loop: bool,
    neighbors: T::NeighborIter<'a>,
}

#[derive(Debug, Clone, Copy, Default)]
struct NodeState {
    visited: bool,
    on_stack: bool,
    index: Node,
    low_link: Node,
}

impl NodeState {
    fn visit(&mut self, u: Node) {
        debug_assert!(!self.visited);
        self.index = u;
        self.low_link = u;
        self.visited = true;
        self.on_stack = true;
    }

    fn try_lower_link(&mut self, l: Node) {
        self.low_link = self.low_link.min(l);
    }

    fn is_root(&self) -> bool {
        self.index == self.low_link
    }
}

/// Sorts the nodes in each component increasingly and then the components themselves lexicographically.
pub fn sort_components(mut components: Vec<Vec<Node>>) -> Vec<Vec<Node>> {
    components.iter_mut().for_each(|comp| comp.sort_unstable());
    components.sort_unstable();
    components
}

#[cfg(test)]
mod test {
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    use super::*;
    use crate::gens::*;

    #[test]
    fn connected_components() {
        let mut graph = AdjArrayUndir::new(7);
        graph.add_edges([(1, 2), (2, 3), (4, 5)]);

        let ccs = sort_components(graph.connected_components().collect_vec());
        assert_eq!(ccs, vec![vec![0], vec![1, 2, 3], vec![4, 5], vec![6]]);
        assert!(!graph.is_connected());

        let ccs = sort_components(graph.connected_components_exclude_nodes([0, 2]).collect_vec());
        assert_eq!(ccs, vec![vec![1], vec![3], vec![4, 5], vec![6]]);

        graph.add_edges([(0, 1), (3, 4), (5, 6)]);
        assert!(graph.is_connected());
        assert!(!AdjArrayUndir::new(0).is_connected());
    }

    #[test]
    fn weak_components() {
        let graph = AdjArrayIn::from_edges(6, [(1, 0), (1, 2), (3, 2), (5, 4)]);
        assert_eq!(
            graph.weakly_connected_components(),
            vec![vec![0, 1, 2, 3], vec![4, 5]]
        );
        assert!(!graph.is_weakly_connected());
        assert!(AdjArrayIn::from_edges(3, [(0, 1), (2, 1)]).is_weakly_connected());
    }

    #[test]
    pub fn scc() {
        let graph = AdjArrayIn::from_edges(
            8,
            [
                (0, 1),
                (1, 2),
                (1, 4),
                (1, 5),
                (2, 6),
                (2, 3),
                (3, 2),
                (3, 7),
                (4, 0),
                (4, 5),
                (5, 6),
                (6, 5),
                (7, 3),
                (7, 6),
            ],
        );

        let sccs = graph.strongly_connected_components().collect_vec();
        assert_eq!(sccs.len(), 3);
        // reverse topological order: the sink component {5, 6} comes first
        assert_eq!(sccs[0].iter().copied().sorted().collect_vec(), [5, 6]);

        let sccs = sort_components(sccs);
        assert_eq!(sccs[0], [0, 1, 4]);
        assert_eq!(sccs[1], [2, 3, 7]);
        assert_eq!(sccs[2], [5, 6]);
        assert!(!graph.is_strongly_connected());
    }

    #[test]
    pub fn scc_singletons() {
        // {0,1} and {4,5} are scc pairs, 2 is a loop, 3 is a singleton
        let graph = AdjArrayIn::from_edges(6, [(0, 1), (1, 0), (2, 2), (4, 5), (5, 4)]);

        let sccs = sort_components(graph.strongly_connected_components().collect_vec());
        assert_eq!(sccs, vec![vec![0, 1], vec![2], vec![3], vec![4, 5]]);

        let sccs = sort_components(
            graph
                .strongly_connected_components_no_singletons()
                .collect_vec(),
        );
        assert_eq!(sccs, vec![vec![0, 1], vec![2], vec![4, 5]]);
    }

    #[test]
    fn scc_gnp() {
        let rng = &mut Pcg64::seed_from_u64(1234);

        for i in 0..10 {
            let n = 2000;
            let graph: AdjArrayIn = AdjArrayIn::gnp(rng, n, 0.5 / (n as f64) * (i as f64));
            assert_eq!(
                StronglyConnectedComponents::new(&graph)
                    .map(|x| x.len())
                    .sum::<usize>(),
                n as usize
            );
        }
    }

    #[test]
    fn scc_long_cycle() {
        // assert that we can deal with very deep stacks
        let n: Node = 10_000;
        let mut graph = AdjArrayIn::new(n);
        graph.connect_cycle(0..n);
        let sccs = graph.strongly_connected_components().collect_vec();
        assert_eq!(sccs.len(), 1);
        assert_eq!(sccs[0].len(), n as usize);
        assert!(graph.is_strongly_connected());
    }
}
