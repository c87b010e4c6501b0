/*!
# Edge Connectivity

The local edge connectivity of `s` and `t` is the value of a maximum `s`-`t` flow in the
edge-duplication [`AuxiliaryDigraph`] with unit capacities.

For the global value, the minimum degree is an upper bound and only few pairs have to be
checked (Esfahanian):
- **undirected**: every dominating set `D` is λ-covering, so it suffices to compute the local
  connectivity between one member of `D` and all others;
- **directed**: for every cut `(S, V \ S)` some pair of cyclically consecutive nodes crosses
  from `S` to `V \ S`, so the `n` pairs `(v_i, v_{i+1 mod n})` suffice.
*/

use super::*;

/// Edge connectivity queries on one graph sharing a single auxiliary digraph and residual
/// network.
///
/// # Example
/// ```
/// use uconn::{prelude::*, algo::*, gens::*};
///
/// let graph: AdjArrayUndir = grid_2d_graph(3, 4);
/// let mut queries = EdgeConnectivity::new(&graph).unwrap().flow_func(FlowFunc::Dinitz);
///
/// assert_eq!(queries.connectivity(None).unwrap(), 2);
/// assert_eq!(queries.local_connectivity(5, 6, None).unwrap(), 3);
/// assert_eq!(queries.minimum_cut().unwrap().len(), 2);
/// ```
pub struct EdgeConnectivity<'a, G> {
    graph: &'a G,
    auxiliary: AuxiliaryDigraph,
    residual: ResidualNetwork,
    flow_func: FlowFunc,
}

impl<'a, G> EdgeConnectivity<'a, G>
where
    G: StaticGraph,
{
    /// Builds the edge-duplication digraph of `graph` and its residual network
    pub fn new(graph: &'a G) -> Result<Self> {
        Self::from_auxiliary(graph, AuxiliaryDigraph::for_edge_connectivity(graph))
    }

    /// Reuses an edge-duplication digraph of `graph`.
    /// Fails with [`Error::InvalidAuxiliary`] if it is a node-splitting digraph.
    pub fn from_auxiliary(graph: &'a G, auxiliary: AuxiliaryDigraph) -> Result<Self> {
        auxiliary.require_edge_form(graph.number_of_nodes())?;
        let residual = auxiliary.residual_network()?;
        Ok(Self {
            graph,
            auxiliary,
            residual,
            flow_func: FlowFunc::default(),
        })
    }

    pub fn from_parts(
        graph: &'a G,
        auxiliary: AuxiliaryDigraph,
        residual: ResidualNetwork,
    ) -> Result<Self> {
        auxiliary.require_edge_form(graph.number_of_nodes())?;
        auxiliary.require_residual(&residual)?;
        Ok(Self {
            graph,
            auxiliary,
            residual,
            flow_func: FlowFunc::default(),
        })
    }

    pub fn into_parts(self) -> (AuxiliaryDigraph, ResidualNetwork) {
        (self.auxiliary, self.residual)
    }

    /// Selects the maximum-flow algorithm (default: Edmonds-Karp)
    pub fn set_flow_func(&mut self, flow_func: FlowFunc) {
        self.flow_func = flow_func;
    }

    /// Builder variant of [`EdgeConnectivity::set_flow_func`]
    pub fn flow_func(mut self, flow_func: FlowFunc) -> Self {
        self.set_flow_func(flow_func);
        self
    }

    pub fn auxiliary(&self) -> &AuxiliaryDigraph {
        &self.auxiliary
    }

    /// Local edge connectivity of `s` and `t`: the minimum number of edges whose removal
    /// destroys all `s`-`t` paths. With a `cutoff` the computation may stop once the value
    /// reaches it.
    pub fn local_connectivity(
        &mut self,
        s: Node,
        t: Node,
        cutoff: Option<NumNodes>,
    ) -> Result<NumNodes> {
        require_endpoints(self.graph, s, t)?;
        local_edge_flow(&mut self.residual, self.flow_func, s, t, cutoff)
    }

    /// A minimum set of edges separating `t` from `s`, sorted. Every edge `(u, v)` is
    /// reported with `u` on the side of `s`.
    pub fn minimum_st_cut(&mut self, s: Node, t: Node) -> Result<Vec<Edge>> {
        require_endpoints(self.graph, s, t)?;
        st_edge_cut(&mut self.residual, self.flow_func, s, t)
    }

    /// Global edge connectivity, at most `cutoff` if given; 0 if the graph is not (weakly)
    /// connected
    pub fn connectivity(&mut self, cutoff: Option<NumNodes>) -> Result<NumNodes> {
        if !self.graph.is_weakly_connected() {
            return Ok(0);
        }

        let mut lambda = min_degree_cut(self.graph).len() as NumNodes;
        if let Some(cutoff) = cutoff {
            lambda = lambda.min(cutoff);
        }

        let pairs = covering_pairs(self.graph);
        for &(s, t) in &pairs {
            if lambda == 0 {
                break;
            }
            lambda = lambda.min(self.local_connectivity(s, t, Some(lambda))?);
        }

        debug!("edge connectivity {lambda} after {} flow computations", pairs.len());
        Ok(lambda)
    }

    /// A minimum set of edges whose removal disconnects the graph, sorted.
    /// Fails with [`Error::NotConnected`] if the graph is not (weakly) connected.
    pub fn minimum_cut(&mut self) -> Result<Vec<Edge>> {
        if !self.graph.is_weakly_connected() {
            return Err(Error::NotConnected);
        }

        let mut min_cut = min_degree_cut(self.graph);
        for (s, t) in covering_pairs(self.graph) {
            let cut = self.minimum_st_cut(s, t)?;
            if cut.len() <= min_cut.len() {
                min_cut = cut;
            }
        }

        debug!("minimum edge cut {min_cut:?}");
        Ok(min_cut)
    }
}

/// The edges incident to a node of minimum degree. For directed graphs the smaller of the
/// outgoing and incoming arcs of any node; loops are ignored.
fn min_degree_cut<G: StaticGraph>(graph: &G) -> Vec<Edge> {
    let mut best: Option<Vec<Edge>> = None;
    for u in graph.vertices_range() {
        let outgoing = graph
            .out_neighbors_of(u)
            .filter(|&v| v != u)
            .map(|v| Edge(u, v))
            .sorted_unstable()
            .dedup()
            .collect_vec();
        let candidate = if G::is_directed() {
            let incoming = graph
                .in_neighbors_of(u)
                .filter(|&v| v != u)
                .map(|v| Edge(v, u))
                .sorted_unstable()
                .dedup()
                .collect_vec();
            if incoming.len() < outgoing.len() {
                incoming
            } else {
                outgoing
            }
        } else {
            outgoing
        };

        if best.as_ref().is_none_or(|b| candidate.len() < b.len()) {
            best = Some(candidate);
        }
    }
    best.unwrap_or_default()
}

/// Pairs whose local edge connectivities include the global one unless it equals the
/// minimum degree
fn covering_pairs<G: StaticGraph>(graph: &G) -> Vec<(Node, Node)> {
    let n = graph.number_of_nodes();
    if n < 2 {
        return Vec::new();
    }

    if G::is_directed() {
        return (0..n).map(|i| (i, (i + 1) % n)).collect();
    }

    // complete graphs only have dominating sets of size 1
    graph
        .vertices_range()
        .map(|start| dominating_set(graph, start))
        .find(|dominators| dominators.len() > 1)
        .map(|dominators| {
            let v = dominators[0];
            dominators[1..].iter().map(|&w| (v, w)).collect()
        })
        .unwrap_or_default()
}

/// Greedily computes a dominating set containing `start`: every node is either in the set or
/// a successor of a member. Members are returned in insertion order, `start` first.
///
/// ** Panics if `start >= n` **
pub fn dominating_set<G>(graph: &G, start: Node) -> Vec<Node>
where
    G: AdjacencyList,
{
    let mut dominated = graph.vertex_bitset_unset();
    let mut dominators = Vec::new();

    for v in std::iter::once(start).chain(graph.vertices_range()) {
        if dominated.set_bit(v) {
            continue;
        }
        dominators.push(v);
        for w in graph.neighbors_of(v) {
            dominated.set_bit(w);
        }
    }

    dominators
}

fn local_edge_flow(
    residual: &mut ResidualNetwork,
    flow_func: FlowFunc,
    s: Node,
    t: Node,
    cutoff: Option<NumNodes>,
) -> Result<NumNodes> {
    let value = flow_func
        .value_only()
        .run_on(residual, s, t, cutoff.map(Capacity::from))?;
    Ok(value as NumNodes)
}

fn st_edge_cut(
    residual: &mut ResidualNetwork,
    flow_func: FlowFunc,
    s: Node,
    t: Node,
) -> Result<Vec<Edge>> {
    flow_func.value_only().run_on(residual, s, t, None)?;

    let source_side = residual.min_cut_source_set(t);
    let cut = residual.cut_arcs(&source_side).sorted_unstable().collect_vec();

    debug_assert_eq!(cut.len() as Capacity, residual.flow_value());
    Ok(cut)
}

/// Runs `f` on the given residual network of an edge-duplication digraph, building missing
/// structures
fn with_edge_residual<G, T>(
    graph: &G,
    auxiliary: Option<&AuxiliaryDigraph>,
    residual: Option<&mut ResidualNetwork>,
    f: impl FnOnce(&mut ResidualNetwork) -> Result<T>,
) -> Result<T>
where
    G: StaticGraph,
{
    let built;
    let auxiliary = match auxiliary {
        Some(auxiliary) => auxiliary,
        None => {
            built = AuxiliaryDigraph::for_edge_connectivity(graph);
            &built
        }
    };
    auxiliary.require_edge_form(graph.number_of_nodes())?;

    match residual {
        Some(residual) => {
            auxiliary.require_residual(residual)?;
            f(residual)
        }
        None => f(&mut auxiliary.residual_network()?),
    }
}

/// Computes the local edge connectivity of `s` and `t`.
/// See [`EdgeConnectivity::local_connectivity`].
///
/// `auxiliary` and `residual` are reused if given. Fails with [`Error::InvalidAuxiliary`] if
/// `auxiliary` is a node-splitting digraph.
pub fn local_edge_connectivity<G>(
    graph: &G,
    s: Node,
    t: Node,
    flow_func: FlowFunc,
    auxiliary: Option<&AuxiliaryDigraph>,
    residual: Option<&mut ResidualNetwork>,
    cutoff: Option<NumNodes>,
) -> Result<NumNodes>
where
    G: StaticGraph,
{
    require_endpoints(graph, s, t)?;
    with_edge_residual(graph, auxiliary, residual, |residual| {
        local_edge_flow(residual, flow_func, s, t, cutoff)
    })
}

/// Computes the local edge connectivity of `s` and `t` if both are given and the global
/// edge connectivity if none is given. Fails with [`Error::MissingEndpoint`] otherwise.
pub fn edge_connectivity<G>(
    graph: &G,
    s: Option<Node>,
    t: Option<Node>,
    flow_func: FlowFunc,
    cutoff: Option<NumNodes>,
) -> Result<NumNodes>
where
    G: StaticGraph,
{
    match endpoints(s, t)? {
        Some((s, t)) => local_edge_connectivity(graph, s, t, flow_func, None, None, cutoff),
        None => EdgeConnectivity::new(graph)?
            .flow_func(flow_func)
            .connectivity(cutoff),
    }
}

/// Computes a minimum `s`-`t` edge cut. See [`EdgeConnectivity::minimum_st_cut`].
pub fn minimum_st_edge_cut<G>(
    graph: &G,
    s: Node,
    t: Node,
    flow_func: FlowFunc,
    auxiliary: Option<&AuxiliaryDigraph>,
    residual: Option<&mut ResidualNetwork>,
) -> Result<Vec<Edge>>
where
    G: StaticGraph,
{
    require_endpoints(graph, s, t)?;
    with_edge_residual(graph, auxiliary, residual, |residual| {
        st_edge_cut(residual, flow_func, s, t)
    })
}

/// Computes a minimum `s`-`t` edge cut if both endpoints are given and a minimum edge cut
/// of the whole graph if none is given
pub fn minimum_edge_cut<G>(
    graph: &G,
    s: Option<Node>,
    t: Option<Node>,
    flow_func: FlowFunc,
) -> Result<Vec<Edge>>
where
    G: StaticGraph,
{
    match endpoints(s, t)? {
        Some((s, t)) => minimum_st_edge_cut(graph, s, t, flow_func, None, None),
        None => EdgeConnectivity::new(graph)?.flow_func(flow_func).minimum_cut(),
    }
}
