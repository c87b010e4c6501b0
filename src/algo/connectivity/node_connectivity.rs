/*!
# Node Connectivity

The local node connectivity of `s` and `t` is the value of a maximum `sB`-`tA` flow in the
node-splitting [`AuxiliaryDigraph`]. The global node connectivity follows Esfahanian's
algorithm 11: for a node `v` of minimum degree it suffices to consider `v` together with
all its non-neighbors and all non-adjacent pairs of neighbors of `v`. The smallest value
found so far is passed as `cutoff` to all later flow computations.
*/

use fxhash::FxHashMap;

use super::*;

/// Node connectivity queries on one graph sharing a single auxiliary digraph and residual
/// network.
///
/// # Example
/// ```
/// use uconn::{prelude::*, algo::*, gens::*};
///
/// let graph: AdjArrayUndir = petersen_graph();
/// let mut queries = NodeConnectivity::new(&graph).unwrap();
///
/// assert_eq!(queries.connectivity().unwrap(), 3);
/// assert_eq!(queries.minimum_cut().unwrap().len(), 3);
/// ```
pub struct NodeConnectivity<'a, G> {
    graph: &'a G,
    auxiliary: AuxiliaryDigraph,
    residual: ResidualNetwork,
    flow_func: FlowFunc,
}

impl<'a, G> NodeConnectivity<'a, G>
where
    G: StaticGraph,
{
    /// Builds the node-splitting digraph of `graph` and its residual network
    pub fn new(graph: &'a G) -> Result<Self> {
        Self::from_auxiliary(graph, AuxiliaryDigraph::for_node_connectivity(graph))
    }

    /// Reuses a node-splitting digraph of `graph`.
    /// Fails with [`Error::InvalidAuxiliary`] if it has no suitable mapping.
    pub fn from_auxiliary(graph: &'a G, auxiliary: AuxiliaryDigraph) -> Result<Self> {
        auxiliary.require_node_mapping(graph.number_of_nodes())?;
        let residual = auxiliary.residual_network()?;
        Ok(Self {
            graph,
            auxiliary,
            residual,
            flow_func: FlowFunc::default(),
        })
    }

    /// Reuses a node-splitting digraph of `graph` together with its residual network
    pub fn from_parts(
        graph: &'a G,
        auxiliary: AuxiliaryDigraph,
        residual: ResidualNetwork,
    ) -> Result<Self> {
        auxiliary.require_node_mapping(graph.number_of_nodes())?;
        auxiliary.require_residual(&residual)?;
        Ok(Self {
            graph,
            auxiliary,
            residual,
            flow_func: FlowFunc::default(),
        })
    }

    /// Returns the auxiliary digraph and the residual network for further reuse
    pub fn into_parts(self) -> (AuxiliaryDigraph, ResidualNetwork) {
        (self.auxiliary, self.residual)
    }

    /// Selects the maximum-flow algorithm (default: Edmonds-Karp)
    pub fn set_flow_func(&mut self, flow_func: FlowFunc) {
        self.flow_func = flow_func;
    }

    /// Builder variant of [`NodeConnectivity::set_flow_func`]
    pub fn flow_func(mut self, flow_func: FlowFunc) -> Self {
        self.set_flow_func(flow_func);
        self
    }

    pub fn auxiliary(&self) -> &AuxiliaryDigraph {
        &self.auxiliary
    }

    /// Local node connectivity of `s` and `t`: the minimum number of nodes other than `s`
    /// and `t` whose removal destroys all `s`-`t` paths. If `t` is a successor of `s`, the
    /// arc `(s, t)` counts as one additional path.
    ///
    /// With a `cutoff` the computation may stop once the value reaches it (see
    /// [`FlowAlgorithm::compute`]).
    pub fn local_connectivity(
        &mut self,
        s: Node,
        t: Node,
        cutoff: Option<NumNodes>,
    ) -> Result<NumNodes> {
        require_endpoints(self.graph, s, t)?;
        local_node_flow(&self.auxiliary, &mut self.residual, self.flow_func, s, t, cutoff)
    }

    /// A minimum set of nodes (other than `s` and `t`) separating `t` from `s`, sorted.
    /// Empty if `(s, t)` is an edge.
    pub fn minimum_st_cut(&mut self, s: Node, t: Node) -> Result<Vec<Node>> {
        require_endpoints(self.graph, s, t)?;
        st_node_cut(self.graph, &self.auxiliary, &mut self.residual, self.flow_func, s, t)
    }

    /// Global node connectivity; 0 if the graph is not (weakly) connected
    pub fn connectivity(&mut self) -> Result<NumNodes> {
        if !self.graph.is_weakly_connected() {
            return Ok(0);
        }

        let candidates = GlobalCandidates::new(self.graph);
        let mut k = candidates.initial_separator.len() as NumNodes;
        for &(x, y) in &candidates.pairs {
            if k == 0 {
                break;
            }
            k = k.min(self.local_connectivity(x, y, Some(k))?);
        }

        debug!("node connectivity {k} after {} flow computations", candidates.pairs.len());
        Ok(k)
    }

    /// A minimum set of nodes whose removal disconnects the graph, sorted.
    /// Fails with [`Error::NotConnected`] if the graph is not (weakly) connected.
    pub fn minimum_cut(&mut self) -> Result<Vec<Node>> {
        if !self.graph.is_weakly_connected() {
            return Err(Error::NotConnected);
        }

        let candidates = GlobalCandidates::new(self.graph);
        let mut min_cut = candidates.initial_separator;
        for &(x, y) in &candidates.pairs {
            let cut = self.minimum_st_cut(x, y)?;
            if cut.len() <= min_cut.len() {
                min_cut = cut;
            }
        }

        debug!("minimum node cut {min_cut:?}");
        Ok(min_cut)
    }
}

/// The pairs whose local connectivity determines the global one
struct GlobalCandidates {
    /// Neighborhood of a node of minimum degree
    initial_separator: Vec<Node>,
    pairs: Vec<(Node, Node)>,
}

impl GlobalCandidates {
    fn new<G: StaticGraph>(graph: &G) -> Self {
        let Some((v, _)) = graph.min_degree_node() else {
            return Self {
                initial_separator: Vec::new(),
                pairs: Vec::new(),
            };
        };

        let neighbors = distinct_neighbors(graph, v);
        let initial_separator = if G::is_directed() {
            let successors = graph
                .out_neighbors_of(v)
                .filter(|&u| u != v)
                .sorted_unstable()
                .dedup()
                .collect_vec();
            let predecessors = graph
                .in_neighbors_of(v)
                .filter(|&u| u != v)
                .sorted_unstable()
                .dedup()
                .collect_vec();
            if predecessors.len() < successors.len() {
                predecessors
            } else {
                successors
            }
        } else {
            neighbors.clone()
        };

        let is_neighbor =
            NodeBitSet::new_with_bits_set(graph.number_of_nodes(), neighbors.iter().copied());
        let mut pairs = Vec::new();
        for w in graph.vertices_range() {
            if w == v || is_neighbor.get_bit(w) {
                continue;
            }
            pairs.push((v, w));
            if G::is_directed() {
                pairs.push((w, v));
            }
        }

        for (&x, &y) in neighbors.iter().tuple_combinations() {
            if !graph.has_edge(x, y) {
                pairs.push((x, y));
            }
            if G::is_directed() && !graph.has_edge(y, x) {
                pairs.push((y, x));
            }
        }

        Self {
            initial_separator,
            pairs,
        }
    }
}

fn local_node_flow(
    auxiliary: &AuxiliaryDigraph,
    residual: &mut ResidualNetwork,
    flow_func: FlowFunc,
    s: Node,
    t: Node,
    cutoff: Option<NumNodes>,
) -> Result<NumNodes> {
    let value = flow_func.value_only().run_on(
        residual,
        auxiliary.node_b(s),
        auxiliary.node_a(t),
        cutoff.map(Capacity::from),
    )?;
    Ok(value as NumNodes)
}

fn st_node_cut<G: StaticGraph>(
    graph: &G,
    auxiliary: &AuxiliaryDigraph,
    residual: &mut ResidualNetwork,
    flow_func: FlowFunc,
    s: Node,
    t: Node,
) -> Result<Vec<Node>> {
    if graph.has_edge(s, t) {
        return Ok(Vec::new());
    }

    let sink = auxiliary.node_a(t);
    flow_func
        .value_only()
        .run_on(residual, auxiliary.node_b(s), sink, None)?;

    // every cut arc is either internal or enters `tA`
    let source_side = residual.min_cut_source_set(sink);
    let cut = residual
        .cut_arcs(&source_side)
        .flat_map(|Edge(x, y)| [auxiliary.id(x), auxiliary.id(y)])
        .filter(|&u| u != s && u != t)
        .sorted_unstable()
        .dedup()
        .collect_vec();

    debug_assert_eq!(cut.len() as Capacity, residual.flow_value());
    Ok(cut)
}

/// Runs `f` on the given auxiliary digraph and residual network, building missing ones
fn with_node_structures<G, T>(
    graph: &G,
    auxiliary: Option<&AuxiliaryDigraph>,
    residual: Option<&mut ResidualNetwork>,
    f: impl FnOnce(&AuxiliaryDigraph, &mut ResidualNetwork) -> Result<T>,
) -> Result<T>
where
    G: StaticGraph,
{
    let built;
    let auxiliary = match auxiliary {
        Some(auxiliary) => auxiliary,
        None => {
            built = AuxiliaryDigraph::for_node_connectivity(graph);
            &built
        }
    };
    auxiliary.require_node_mapping(graph.number_of_nodes())?;

    match residual {
        Some(residual) => {
            auxiliary.require_residual(residual)?;
            f(auxiliary, residual)
        }
        None => f(auxiliary, &mut auxiliary.residual_network()?),
    }
}

/// Computes the local node connectivity of `s` and `t`.
/// See [`NodeConnectivity::local_connectivity`].
///
/// `auxiliary` and `residual` are reused if given; otherwise they are built on the fly.
/// Fails with [`Error::InvalidAuxiliary`] if `auxiliary` is not a node-splitting digraph
/// of `graph`.
pub fn local_node_connectivity<G>(
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
    with_node_structures(graph, auxiliary, residual, |auxiliary, residual| {
        local_node_flow(auxiliary, residual, flow_func, s, t, cutoff)
    })
}

/// Computes the local node connectivity of `s` and `t` if both are given and the global
/// node connectivity if none is given. Fails with [`Error::MissingEndpoint`] otherwise.
pub fn node_connectivity<G>(
    graph: &G,
    s: Option<Node>,
    t: Option<Node>,
    flow_func: FlowFunc,
) -> Result<NumNodes>
where
    G: StaticGraph,
{
    match endpoints(s, t)? {
        Some((s, t)) => local_node_connectivity(graph, s, t, flow_func, None, None, None),
        None => NodeConnectivity::new(graph)?.flow_func(flow_func).connectivity(),
    }
}

/// Computes a minimum `s`-`t` node cut. See [`NodeConnectivity::minimum_st_cut`].
pub fn minimum_st_node_cut<G>(
    graph: &G,
    s: Node,
    t: Node,
    flow_func: FlowFunc,
    auxiliary: Option<&AuxiliaryDigraph>,
    residual: Option<&mut ResidualNetwork>,
) -> Result<Vec<Node>>
where
    G: StaticGraph,
{
    require_endpoints(graph, s, t)?;
    with_node_structures(graph, auxiliary, residual, |auxiliary, residual| {
        st_node_cut(graph, auxiliary, residual, flow_func, s, t)
    })
}

/// Computes a minimum `s`-`t` node cut if both endpoints are given and a minimum node cut
/// of the whole graph if none is given
pub fn minimum_node_cut<G>(
    graph: &G,
    s: Option<Node>,
    t: Option<Node>,
    flow_func: FlowFunc,
) -> Result<Vec<Node>>
where
    G: StaticGraph,
{
    match endpoints(s, t)? {
        Some((s, t)) => minimum_st_node_cut(graph, s, t, flow_func, None, None),
        None => NodeConnectivity::new(graph)?.flow_func(flow_func).minimum_cut(),
    }
}

/// Average local node connectivity over all ordered (directed) or unordered (undirected)
/// pairs of nodes; 0 for graphs with fewer than two nodes
pub fn average_node_connectivity<G>(graph: &G, flow_func: FlowFunc) -> Result<f64>
where
    G: StaticGraph,
{
    let mut queries = NodeConnectivity::new(graph)?.flow_func(flow_func);

    let mut sum = 0u64;
    let mut pairs = 0u64;
    for (u, v) in graph.vertices_range().tuple_combinations() {
        sum += queries.local_connectivity(u, v, None)? as u64;
        pairs += 1;
        if G::is_directed() {
            sum += queries.local_connectivity(v, u, None)? as u64;
            pairs += 1;
        }
    }

    Ok(if pairs == 0 {
        0.0
    } else {
        sum as f64 / pairs as f64
    })
}

/// Local node connectivity between all pairs of `nodes` (all nodes if `None`).
/// For undirected graphs both orientations of a pair hold the same value.
pub fn all_pairs_node_connectivity<G>(
    graph: &G,
    nodes: Option<&[Node]>,
    flow_func: FlowFunc,
) -> Result<FxHashMap<Node, FxHashMap<Node, NumNodes>>>
where
    G: StaticGraph,
{
    let nodes = match nodes {
        Some(nodes) => {
            for &u in nodes {
                graph.require_vertex(u)?;
            }
            nodes.iter().copied().sorted_unstable().dedup().collect_vec()
        }
        None => graph.vertices_range().collect_vec(),
    };

    let mut queries = NodeConnectivity::new(graph)?.flow_func(flow_func);
    let mut result: FxHashMap<Node, FxHashMap<Node, NumNodes>> =
        nodes.iter().map(|&u| (u, FxHashMap::default())).collect();

    for (&u, &v) in nodes.iter().tuple_combinations() {
        let k = queries.local_connectivity(u, v, None)?;
        let reverse = if G::is_directed() {
            queries.local_connectivity(v, u, None)?
        } else {
            k
        };

        result.entry(u).or_default().insert(v, k);
        result.entry(v).or_default().insert(u, reverse);
    }

    Ok(result)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        algo::connectivity::test::{is_separator, known_graphs, two_paths},
        gens::*,
        testing::log_init_test,
    };

    #[test]
    fn known_connectivities() {
        log_init_test();
        for (name, graph, kappa, _) in known_graphs() {
            for flow_func in FlowFunc::ALL {
                assert_eq!(
                    node_connectivity(&graph, None, None, flow_func).unwrap(),
                    kappa,
                    "{name} {}",
                    flow_func.name()
                );
            }

            let cut = minimum_node_cut(&graph, None, None, FlowFunc::default()).unwrap();
            assert_eq!(cut.len() as NumNodes, kappa, "{name}");
            assert!(is_separator(&graph, &cut), "{name}: {cut:?}");
        }
    }

    #[test]
    fn symmetric_digraphs() {
        for (name, graph, kappa, _) in known_graphs().into_iter().take(4) {
            let directed: AdjArrayIn = AdjArrayIn::from_edges(
                graph.number_of_nodes(),
                graph.edges(false),
            );
            assert_eq!(
                node_connectivity(&directed, None, None, FlowFunc::default()).unwrap(),
                kappa,
                "{name}"
            );
        }
    }

    #[test]
    fn complete_graphs() {
        for n in [2, 5, 10] {
            let graph: AdjArrayUndir = complete_graph(n);
            let digraph: AdjArrayIn = complete_graph(n);
            for flow_func in FlowFunc::ALL {
                assert_eq!(node_connectivity(&graph, None, None, flow_func).unwrap(), n - 1);
                assert_eq!(node_connectivity(&digraph, None, None, flow_func).unwrap(), n - 1);
            }
            assert_eq!(
                minimum_node_cut(&graph, None, None, FlowFunc::default()).unwrap().len() as NumNodes,
                n - 1
            );
        }
    }

    #[test]
    fn local_queries() {
        let graph: AdjArrayUndir = icosahedral_graph();
        for flow_func in FlowFunc::ALL {
            assert_eq!(node_connectivity(&graph, Some(0), Some(6), flow_func).unwrap(), 5);
            let cut = minimum_node_cut(&graph, Some(0), Some(6), flow_func).unwrap();
            assert_eq!(cut.len(), 5);
            assert!(!cut.contains(&0) && !cut.contains(&6));
        }

        // adjacent nodes cannot be separated
        assert!(minimum_st_node_cut(&graph, 0, 1, FlowFunc::default(), None, None)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn cutoff_on_complete_graph() {
        let graph: AdjArrayUndir = complete_graph(5);
        for flow_func in FlowFunc::ALL {
            if matches!(flow_func, FlowFunc::PreflowPush(_)) {
                continue;
            }
            for cutoff in [1, 2, 3] {
                assert_eq!(
                    local_node_connectivity(&graph, 0, 4, flow_func, None, None, Some(cutoff))
                        .unwrap(),
                    cutoff,
                    "{}",
                    flow_func.name()
                );
            }
        }
    }

    #[test]
    fn disconnected_graphs() {
        let graph = two_paths();
        for flow_func in FlowFunc::ALL {
            assert_eq!(node_connectivity(&graph, None, None, flow_func).unwrap(), 0);
            assert_eq!(node_connectivity(&graph, Some(0), Some(5), flow_func).unwrap(), 0);
        }
        assert_eq!(
            minimum_node_cut(&graph, None, None, FlowFunc::default()),
            Err(Error::NotConnected)
        );
        assert_eq!(
            minimum_node_cut(&graph, Some(0), Some(5), FlowFunc::default()),
            Ok(Vec::new())
        );
    }

    #[test]
    fn bad_input() {
        let graph: AdjArrayUndir = petersen_graph();
        assert_eq!(
            node_connectivity(&graph, Some(0), None, FlowFunc::default()),
            Err(Error::MissingEndpoint)
        );
        assert_eq!(
            node_connectivity(&graph, Some(0), Some(10), FlowFunc::default()),
            Err(Error::NodeNotFound(10))
        );
        assert_eq!(
            minimum_node_cut(&graph, None, Some(3), FlowFunc::default()),
            Err(Error::MissingEndpoint)
        );

        let edge_form = build_auxiliary_edge_connectivity(&graph);
        assert_eq!(
            local_node_connectivity(&graph, 0, 5, FlowFunc::default(), Some(&edge_form), None, None)
                .unwrap_err()
                .kind(),
            ErrorKind::Internal
        );
        assert!(NodeConnectivity::from_auxiliary(&graph, edge_form).is_err());
    }

    #[test]
    fn reuse_is_idempotent() {
        let graph: AdjArrayUndir = dodecahedral_graph();
        let auxiliary = build_auxiliary_node_connectivity(&graph);
        let mut residual = auxiliary.residual_network().unwrap();

        for (u, v) in graph.vertices_range().tuple_combinations().take(60) {
            let fresh = local_node_connectivity(&graph, u, v, FlowFunc::Dinitz, None, None, None).unwrap();
            let reused = local_node_connectivity(
                &graph,
                u,
                v,
                FlowFunc::Dinitz,
                Some(&auxiliary),
                Some(&mut residual),
                None,
            )
            .unwrap();
            assert_eq!(fresh, reused);
        }

        let mut queries = NodeConnectivity::from_parts(&graph, auxiliary, residual).unwrap();
        let first = queries.minimum_st_cut(0, 10).unwrap();
        assert_eq!(queries.minimum_st_cut(0, 10).unwrap(), first);
        let (auxiliary, _) = queries.into_parts();
        assert_eq!(auxiliary.mapping(), Some(20));
    }

    #[test]
    fn st_cuts_separate() {
        let graph: AdjArrayUndir = grid_2d_graph(4, 4);
        let mut queries = NodeConnectivity::new(&graph).unwrap();
        for (s, t) in [(0, 15), (1, 14), (5, 10)] {
            let cut = queries.minimum_st_cut(s, t).unwrap();
            assert_eq!(cut.len() as NumNodes, queries.local_connectivity(s, t, None).unwrap());

            let reachable = graph.bfs(s).with_nodes_excluded(cut.iter().copied()).into_visited();
            assert!(!reachable.get_bit(t), "{s} {t} {cut:?}");
        }
    }

    #[test]
    fn averages_and_all_pairs() {
        let graph: AdjArrayUndir = complete_graph(4);
        // adjacent pairs count the connecting edge
        assert_eq!(average_node_connectivity(&graph, FlowFunc::default()).unwrap(), 3.0);
        assert_eq!(average_node_connectivity(&AdjArrayUndir::new(1), FlowFunc::default()).unwrap(), 0.0);

        let graph: AdjArrayUndir = path_graph(4);
        let all_pairs = all_pairs_node_connectivity(&graph, None, FlowFunc::default()).unwrap();
        assert_eq!(all_pairs.len(), 4);
        for (u, v) in (0..4).tuple_combinations() {
            assert_eq!(all_pairs[&u][&v], 1);
            assert_eq!(all_pairs[&v][&u], 1);
        }

        let subset = all_pairs_node_connectivity(&graph, Some(&[3, 0, 3][..]), FlowFunc::default()).unwrap();
        assert_eq!(subset.len(), 2);
        assert_eq!(subset[&0][&3], 1);

        let directed = AdjArrayIn::from_edges(3, [(0, 1), (1, 2)]);
        let all_pairs = all_pairs_node_connectivity(&directed, None, FlowFunc::default()).unwrap();
        assert_eq!(all_pairs[&0][&2], 1);
        assert_eq!(all_pairs[&2][&0], 0);
    }
}
