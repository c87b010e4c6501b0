/*!
# Residual Network

Arcs are stored in pairs: arc `a` and its reverse `a ^ 1` always exist together and carry
opposite flows. A pair is created for every non-loop edge with positive capacity of the input
graph; the reverse of a directed input arc has capacity 0 unless it is an input arc itself.
*/

use std::ops::Range;

use fxhash::FxHashMap;

use super::*;

/// Working graph of all flow algorithms. See the module documentation for the arc layout.
///
/// Infinite capacities are replaced by [`ResidualNetwork::inf`], which is three times the sum
/// of all finite capacities (or 1 if there are none). A flow larger than half of it can only
/// stem from a path of infinite capacity. Without infinite edges, `inf` saturates at
/// [`Capacity::MAX`] and no flow is ever reported as unbounded.
#[derive(Debug, Clone)]
pub struct ResidualNetwork {
    out_arcs: Vec<Vec<usize>>,
    head: Vec<Node>,
    capacity: Vec<Capacity>,
    flow: Vec<Capacity>,
    arc_of: FxHashMap<Edge, usize>,
    inf: Capacity,
    has_infinite: bool,
    flow_value: Capacity,
}

impl ResidualNetwork {
    /// Builds the residual network of `graph` with a zero flow.
    ///
    /// Fails with [`Error::NotImplementedFor`] if `graph` is a multigraph and with
    /// [`Error::InvalidParameter`] if a residual capacity could exceed [`Capacity::MAX`], i.e. if
    /// the finite capacities plus `inf` per infinite edge (twice that if undirected) do not fit.
    pub fn new<G>(graph: &G, capacities: &Capacities) -> Result<Self>
    where
        G: StaticGraph,
    {
        if graph.is_multigraph() {
            return Err(Error::NotImplementedFor("multigraph"));
        }

        let undirected = G::is_undirected();
        let edges: Vec<(Edge, Option<Capacity>)> = graph
            .edges(undirected)
            .filter(|e| !e.is_loop())
            .map(|Edge(u, v)| (Edge(u, v), capacities.capacity_of(u, v, undirected)))
            .filter(|&(_, c)| c.is_none_or(|c| c > 0))
            .collect();

        const TOO_LARGE: Error = Error::InvalidParameter("capacities exceed the range of Capacity");

        let mut finite_sum: Capacity = 0;
        let mut infinite_edges: Capacity = 0;
        for &(_, c) in &edges {
            match c {
                Some(c) => finite_sum = finite_sum.checked_add(c).ok_or(TOO_LARGE)?,
                None => infinite_edges += 1,
            }
        }

        let inf = match (infinite_edges, finite_sum) {
            (_, 0) => 1,
            (0, sum) => sum.saturating_mul(3),
            (_, sum) => sum.checked_mul(3).ok_or(TOO_LARGE)?,
        };

        // the residual capacity of an undirected pair reaches twice its capacity
        let directions = if undirected { 2 } else { 1 };
        infinite_edges
            .checked_mul(inf)
            .and_then(|c| c.checked_add(finite_sum))
            .and_then(|c| c.checked_mul(directions))
            .ok_or(TOO_LARGE)?;

        let mut network = Self {
            out_arcs: vec![Vec::new(); graph.len()],
            head: Vec::with_capacity(2 * edges.len()),
            capacity: Vec::with_capacity(2 * edges.len()),
            flow: Vec::with_capacity(2 * edges.len()),
            arc_of: FxHashMap::default(),
            inf,
            has_infinite: infinite_edges > 0,
            flow_value: 0,
        };

        for (Edge(u, v), c) in edges {
            let c = c.map_or(inf, |c| c.min(inf));
            if undirected {
                network.add_pair(u, v, c, c);
            } else if let Some(&a) = network.arc_of.get(&Edge(u, v)) {
                network.capacity[a] = c;
            } else {
                network.add_pair(u, v, c, 0);
            }
        }

        Ok(network)
    }

    /// Builds the residual network of `graph` where every edge has capacity 1
    pub fn with_unit_capacities<G>(graph: &G) -> Result<Self>
    where
        G: StaticGraph,
    {
        Self::new(graph, &Capacities::unit())
    }

    fn add_pair(&mut self, u: Node, v: Node, forward: Capacity, backward: Capacity) -> usize {
        let a = self.head.len();
        for (tail, head, capacity) in [(u, v, forward), (v, u, backward)] {
            let arc = self.head.len();
            self.head.push(head);
            self.capacity.push(capacity);
            self.flow.push(0);
            self.out_arcs[tail as usize].push(arc);
            self.arc_of.insert(Edge(tail, head), arc);
        }
        a
    }

    /// Adds an arc `(u, v)` with capacity `c`. If the arc exists already, its capacity is
    /// raised to at least `c`. Flows are left untouched.
    ///
    /// ** Panics if `u == v` or one of them is not a node **
    pub fn add_arc(&mut self, u: Node, v: Node, c: Capacity) {
        assert_ne!(u, v);
        match self.arc_of.get(&Edge(u, v)) {
            Some(&a) => self.capacity[a] = self.capacity[a].max(c),
            None => {
                self.add_pair(u, v, c, 0);
            }
        }
    }

    pub fn number_of_nodes(&self) -> NumNodes {
        self.out_arcs.len() as NumNodes
    }

    pub fn vertices_range(&self) -> Range<Node> {
        0..self.number_of_nodes()
    }

    /// Number of arcs, i.e. twice the number of arc pairs
    pub fn number_of_arcs(&self) -> usize {
        self.head.len()
    }

    /// The finite stand-in for infinite capacities
    pub fn inf(&self) -> Capacity {
        self.inf
    }

    /// Value of the flow computed last
    pub fn flow_value(&self) -> Capacity {
        self.flow_value
    }

    pub(crate) fn set_flow_value(&mut self, value: Capacity) {
        self.flow_value = value;
    }

    /// Returns the id of arc `(u, v)` if it exists
    pub fn arc(&self, u: Node, v: Node) -> Option<usize> {
        self.arc_of.get(&Edge(u, v)).copied()
    }

    /// Ids of all arcs leaving `u`
    pub fn arcs_of(&self, u: Node) -> &[usize] {
        &self.out_arcs[u as usize]
    }

    pub fn head(&self, a: usize) -> Node {
        self.head[a]
    }

    pub fn tail(&self, a: usize) -> Node {
        self.head[a ^ 1]
    }

    pub fn capacity(&self, a: usize) -> Capacity {
        self.capacity[a]
    }

    pub fn flow(&self, a: usize) -> Capacity {
        self.flow[a]
    }

    /// Remaining capacity of arc `a`
    #[inline]
    pub fn residual(&self, a: usize) -> Capacity {
        self.capacity[a] - self.flow[a]
    }

    /// Flow on arc `(u, v)`, 0 if the arc does not exist
    pub fn flow_on(&self, u: Node, v: Node) -> Capacity {
        self.arc(u, v).map_or(0, |a| self.flow[a])
    }

    /// Sends `delta` units along arc `a`
    #[inline]
    pub(crate) fn push(&mut self, a: usize, delta: Capacity) {
        self.flow[a] += delta;
        self.flow[a ^ 1] -= delta;
    }

    /// Sets all flows (and the flow value) back to zero
    pub fn reset_flows(&mut self) {
        self.flow.iter_mut().for_each(|f| *f = 0);
        self.flow_value = 0;
    }

    /// Checks the endpoints of a flow computation and resets all flows
    pub(crate) fn prepare(&mut self, s: Node, t: Node) -> Result<()> {
        for u in [s, t] {
            if u >= self.number_of_nodes() {
                return Err(Error::NodeNotFound(u));
            }
        }
        if s == t {
            return Err(Error::SourceIsSink(s));
        }
        self.reset_flows();
        Ok(())
    }

    /// All arcs with positive capacity and positive flow as `(arc, flow)`
    pub fn flow_dict(&self) -> Vec<(Edge, Capacity)> {
        (0..self.number_of_arcs())
            .filter(|&a| self.capacity[a] > 0 && self.flow[a] > 0)
            .map(|a| (Edge(self.tail(a), self.head[a]), self.flow[a]))
            .collect()
    }

    /// Graph view of all arcs with positive residual capacity
    pub fn unsaturated(&self) -> UnsaturatedArcs<'_> {
        UnsaturatedArcs { network: self }
    }

    /// Nodes reachable from `s` via arcs with positive residual capacity
    pub fn reachable_from(&self, s: Node) -> NodeBitSet {
        self.unsaturated().bfs(s).into_visited()
    }

    /// Nodes from which `t` is reachable via arcs with positive residual capacity
    pub fn nodes_reaching(&self, t: Node) -> NodeBitSet {
        let view = self.unsaturated();
        let mut visited = NodeBitSet::new(self.number_of_nodes());
        visited.set_bit(t);
        let mut stack = vec![t];
        while let Some(u) = stack.pop() {
            for v in view.in_neighbors_of(u) {
                if !visited.set_bit(v) {
                    stack.push(v);
                }
            }
        }
        visited
    }

    /// Minimum cut induced by the current flow: the sink side contains all nodes that can
    /// still reach `t`, the source side all others. Both sides are sorted.
    pub fn min_cut_partition(&self, t: Node) -> (Vec<Node>, Vec<Node>) {
        let sink_side = self.nodes_reaching(t);
        self.vertices_range().partition(|&u| !sink_side.get_bit(u))
    }

    /// Source side of [`ResidualNetwork::min_cut_partition`] as a bitset
    pub fn min_cut_source_set(&self, t: Node) -> NodeBitSet {
        let sink_side = self.nodes_reaching(t);
        let mut source_side = NodeBitSet::new_all_set(self.number_of_nodes());
        for u in sink_side.iter_set_bits() {
            source_side.clear_bit(u);
        }
        source_side
    }

    /// Arcs with positive capacity from `source_side` to its complement
    pub fn cut_arcs<'a>(&'a self, source_side: &'a NodeBitSet) -> impl Iterator<Item = Edge> + 'a {
        source_side.iter_set_bits().flat_map(move |u| {
            self.out_arcs[u as usize].iter().filter_map(move |&a| {
                let v = self.head[a];
                (self.capacity[a] > 0 && !source_side.get_bit(v)).then_some(Edge(u, v))
            })
        })
    }

    /// Fails with [`Error::Unbounded`] if `t` is reachable from `s` using only arcs of
    /// infinite capacity
    pub(crate) fn detect_unboundedness(&self, s: Node, t: Node) -> Result<()> {
        if !self.has_infinite {
            return Ok(());
        }

        let mut visited = NodeBitSet::new(self.number_of_nodes());
        visited.set_bit(s);
        let mut queue = std::collections::VecDeque::from(vec![s]);
        while let Some(u) = queue.pop_front() {
            for &a in &self.out_arcs[u as usize] {
                let v = self.head[a];
                if self.capacity[a] == self.inf && !visited.set_bit(v) {
                    if v == t {
                        return Err(Error::Unbounded);
                    }
                    queue.push_back(v);
                }
            }
        }
        Ok(())
    }

    /// Fails with [`Error::Unbounded`] if an augmentation of `delta` can only stem from a path
    /// of infinite capacity
    #[inline]
    pub(crate) fn check_bounded(&self, delta: Capacity) -> Result<()> {
        if self.has_infinite && delta > self.inf / 2 {
            Err(Error::Unbounded)
        } else {
            Ok(())
        }
    }

    /// Asserts capacity bounds, antisymmetry and conservation at all nodes but `s` and `t`
    pub(crate) fn debug_assert_valid_flow(&self, s: Node, t: Node) {
        if !cfg!(debug_assertions) {
            return;
        }

        for a in 0..self.number_of_arcs() {
            debug_assert!(self.flow[a] <= self.capacity[a], "flow exceeds capacity");
            debug_assert_eq!(self.flow[a], -self.flow[a ^ 1]);
        }
        for u in self.vertices_range() {
            let net: Capacity = self.out_arcs[u as usize].iter().map(|&a| self.flow[a]).sum();
            if u == t {
                debug_assert_eq!(-net, self.flow_value, "flow into sink differs from flow value");
            } else if u != s {
                debug_assert_eq!(net, 0, "flow conservation violated at {u}");
            }
        }
    }
}

/// Graph view of a [`ResidualNetwork`] restricted to arcs with positive residual capacity
#[derive(Clone, Copy)]
pub struct UnsaturatedArcs<'a> {
    network: &'a ResidualNetwork,
}

pub struct UnsaturatedNeighbors<'a> {
    network: &'a ResidualNetwork,
    arcs: std::slice::Iter<'a, usize>,
    reverse: bool,
}

impl Iterator for UnsaturatedNeighbors<'_> {
    type Item = Node;

    fn next(&mut self) -> Option<Node> {
        loop {
            let &a = self.arcs.next()?;
            let arc = if self.reverse { a ^ 1 } else { a };
            if self.network.residual(arc) > 0 {
                return Some(self.network.head[a]);
            }
        }
    }
}

impl GraphType for UnsaturatedArcs<'_> {
    type Dir = Directed;
}

impl GraphNodeOrder for UnsaturatedArcs<'_> {
    type VertexIter<'b>
        = Range<Node>
    where
        Self: 'b;

    fn number_of_nodes(&self) -> NumNodes {
        self.network.number_of_nodes()
    }

    fn vertices(&self) -> Self::VertexIter<'_> {
        self.vertices_range()
    }
}

impl AdjacencyList for UnsaturatedArcs<'_> {
    type NeighborIter<'b>
        = UnsaturatedNeighbors<'b>
    where
        Self: 'b;

    fn neighbors_of(&self, u: Node) -> Self::NeighborIter<'_> {
        UnsaturatedNeighbors {
            network: self.network,
            arcs: self.network.out_arcs[u as usize].iter(),
            reverse: false,
        }
    }

    fn degree_of(&self, u: Node) -> NumNodes {
        self.neighbors_of(u).count() as NumNodes
    }
}

impl DirectedAdjacencyList for UnsaturatedArcs<'_> {
    type InNeighborIter<'b>
        = UnsaturatedNeighbors<'b>
    where
        Self: 'b;

    fn in_neighbors_of(&self, u: Node) -> Self::InNeighborIter<'_> {
        UnsaturatedNeighbors {
            network: self.network,
            arcs: self.network.out_arcs[u as usize].iter(),
            reverse: true,
        }
    }

    fn in_degree_of(&self, u: Node) -> NumNodes {
        self.in_neighbors_of(u).count() as NumNodes
    }
}
