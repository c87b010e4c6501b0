/*!
# All Minimum Node Cuts

Kanevsky's algorithm enumerates every minimum node cut of a connected undirected graph with
node connectivity `k`:

1. Let `X` be the `k` nodes of highest degree. If `X` separates the graph, it is a cut.
2. Every other minimum cut misses some `x` in `X` and separates it from some non-neighbor `v`.
   For each such pair with a maximum `xB`-`vA` flow of value `k`, the minimum `xB`-`vA` cuts
   of the node-splitting digraph are exactly the node sets `S` closed under residual arcs
   that contain `xB` but not `vA`. In the condensation of the residual graph these are the
   nodes reachable from `xB` together with the descendants of an antichain of the *free*
   components (reachable neither from `xB` nor reaching `vA`).
3. A closed set yields a node cut if all arcs leaving it are internal arcs of nodes other
   than `x` and `v`.
4. Afterwards the synthetic arcs `xB -> vA` and `vB -> xA` are added, so cuts separating `x`
   and `v` are not found again for later pairs.

Cycles and complete graphs are answered directly.
*/

use std::collections::VecDeque;

use fxhash::FxHashSet;

use super::*;

/// Lazy enumeration of all minimum node cuts of a connected undirected graph.
///
/// Every cut is yielded once, as a sorted vector. Flow computations for a pair `(x, v)` only
/// happen once all cuts of the previous pair have been consumed.
///
/// # Example
/// ```
/// use uconn::{prelude::*, algo::*, gens::*};
///
/// let graph: AdjArrayUndir = grid_2d_graph(5, 5);
/// let cuts: Vec<Vec<Node>> = AllNodeCuts::new(&graph)
///     .unwrap()
///     .flow_func(FlowFunc::Dinitz)
///     .collect::<Result<_, _>>()
///     .unwrap();
///
/// assert_eq!(cuts.len(), 4);
/// assert!(cuts.contains(&vec![1, 5]));
/// ```
pub struct AllNodeCuts<'a, G> {
    graph: &'a G,
    k: Option<NumNodes>,
    flow_func: FlowFunc,
    state: State,
}

enum State {
    Start,
    Listed(std::vec::IntoIter<Vec<Node>>),
    Search(Box<KanevskySearch>),
    Done,
}

/// Mutable state of the general algorithm. Auxiliary digraph and residual network grow by
/// the synthetic arcs of all pairs processed so far.
struct KanevskySearch {
    k: NumNodes,
    auxiliary: AuxiliaryDigraph,
    residual: ResidualNetwork,
    seen: FxHashSet<Vec<Node>>,
    queued: Option<Vec<Node>>,
    pairs: VecDeque<(Node, Node)>,
    current: Option<PairCuts>,
}

/// Closed sets of the residual graph for one pair `(x, v)`
struct PairCuts {
    x: Node,
    v: Node,
    reachable: NodeBitSet,
    condensation: Condensation,
    /// Component of the condensation for every node of the free sub-DAG
    free: Vec<Node>,
    antichains: Antichains,
}

impl<'a, G> AllNodeCuts<'a, G>
where
    G: StaticGraph,
{
    /// Fails with [`Error::NotImplementedFor`] on directed graphs and with
    /// [`Error::NotConnected`] on disconnected graphs
    pub fn new(graph: &'a G) -> Result<Self> {
        if G::is_directed() {
            return Err(Error::NotImplementedFor("directed"));
        }
        if !graph.is_weakly_connected() {
            return Err(Error::NotConnected);
        }

        Ok(Self {
            graph,
            k: None,
            flow_func: FlowFunc::default(),
            state: State::Start,
        })
    }

    /// Uses `k` as node connectivity instead of computing it
    pub fn set_k(&mut self, k: NumNodes) {
        self.k = Some(k);
    }

    /// Builder variant of [`AllNodeCuts::set_k`]
    pub fn k(mut self, k: NumNodes) -> Self {
        self.set_k(k);
        self
    }

    /// Selects the maximum-flow algorithm (default: Edmonds-Karp)
    pub fn set_flow_func(&mut self, flow_func: FlowFunc) {
        self.flow_func = flow_func;
    }

    /// Builder variant of [`AllNodeCuts::set_flow_func`]
    pub fn flow_func(mut self, flow_func: FlowFunc) -> Self {
        self.set_flow_func(flow_func);
        self
    }

    fn start(&self) -> Result<State> {
        let n = self.graph.number_of_nodes();

        if self
            .graph
            .vertices_range()
            .all(|u| distinct_neighbors(self.graph, u).len() as NumNodes + 1 == n)
        {
            let cuts = self.graph.vertices_range().combinations(n as usize - 1).collect_vec();
            return Ok(State::Listed(cuts.into_iter()));
        }

        if self.graph.number_of_edges() == n && self.graph.degrees().all(|d| d == 2) {
            let cuts = self
                .graph
                .vertices_range()
                .tuple_combinations()
                .filter(|&(u, v)| !self.graph.has_edge(u, v))
                .map(|(u, v)| vec![u, v])
                .collect_vec();
            return Ok(State::Listed(cuts.into_iter()));
        }

        let k = match self.k {
            Some(k) => k,
            None => NodeConnectivity::new(self.graph)?
                .flow_func(self.flow_func)
                .connectivity()?,
        };

        let mut by_degree = self.graph.vertices_range().collect_vec();
        by_degree.sort_by_key(|&u| std::cmp::Reverse(self.graph.degree_of(u)));
        let top = by_degree.into_iter().take(k as usize).sorted_unstable().collect_vec();

        let mut seen = FxHashSet::default();
        let queued = is_separating_set(self.graph, &top).then(|| {
            seen.insert(top.clone());
            top.clone()
        });

        // a cut separating two members of `top` also separates one of them from a non-member
        let mut pairs = VecDeque::new();
        for &x in &top {
            for v in self.graph.vertices_range() {
                if top.binary_search(&v).is_err() && !self.graph.has_edge(x, v) {
                    pairs.push_back((x, v));
                }
            }
        }
        debug!("kanevsky: k = {k}, top-degree nodes {top:?}, {} pairs", pairs.len());

        let auxiliary = AuxiliaryDigraph::for_node_connectivity(self.graph);
        let residual = auxiliary.residual_network()?;
        Ok(State::Search(Box::new(KanevskySearch {
            k,
            auxiliary,
            residual,
            seen,
            queued,
            pairs,
            current: None,
        })))
    }
}

impl<G> Iterator for AllNodeCuts<'_, G>
where
    G: StaticGraph,
{
    type Item = Result<Vec<Node>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match &mut self.state {
                State::Start => match self.start() {
                    Ok(state) => self.state = state,
                    Err(e) => {
                        self.state = State::Done;
                        return Some(Err(e));
                    }
                },
                State::Listed(cuts) => return cuts.next().map(Ok),
                State::Search(search) => {
                    let item = search.next_cut(self.flow_func).transpose();
                    if !matches!(item, Some(Ok(_))) {
                        self.state = State::Done;
                    }
                    return item;
                }
                State::Done => return None,
            }
        }
    }
}

impl KanevskySearch {
    fn next_cut(&mut self, flow_func: FlowFunc) -> Result<Option<Vec<Node>>> {
        if let Some(cut) = self.queued.take() {
            debug!("kanevsky: top-degree cut {cut:?}");
            return Ok(Some(cut));
        }

        loop {
            if let Some(pair) = self.current.as_mut() {
                while let Some(antichain) = pair.antichains.next() {
                    let source_side = pair.closed_set(&antichain);
                    let Some(cut) = node_cut_of(
                        &self.auxiliary,
                        &self.residual,
                        &source_side,
                        self.k,
                        pair.x,
                        pair.v,
                    ) else {
                        continue;
                    };

                    if self.seen.insert(cut.clone()) {
                        debug!("kanevsky: cut {cut:?} separating {} and {}", pair.x, pair.v);
                        return Ok(Some(cut));
                    }
                }

                let (x, v) = (pair.x, pair.v);
                self.current = None;
                self.add_synthetic_arcs(x, v);
            }

            let Some((x, v)) = self.pairs.pop_front() else {
                return Ok(None);
            };

            let source = self.auxiliary.node_b(x);
            let sink = self.auxiliary.node_a(v);
            let value = flow_func
                .two_phase()
                .run_on(&mut self.residual, source, sink, None)?;

            if value == Capacity::from(self.k) {
                self.current = Some(PairCuts::new(&self.residual, x, v, source, sink));
            }
        }
    }

    /// Equivalent to adding the edge `{x, v}` to the input graph
    fn add_synthetic_arcs(&mut self, x: Node, v: Node) {
        let aux = &mut self.auxiliary;
        let (xb, va, vb, xa) = (aux.node_b(x), aux.node_a(v), aux.node_b(v), aux.node_a(x));
        aux.add_arc(xb, va);
        aux.add_arc(vb, xa);
        self.residual.add_arc(xb, va, 1);
        self.residual.add_arc(vb, xa, 1);
    }
}

impl PairCuts {
    fn new(residual: &ResidualNetwork, x: Node, v: Node, source: Node, sink: Node) -> Self {
        let reachable = residual.reachable_from(source);
        let reaching = residual.nodes_reaching(sink);
        let condensation = Condensation::new(&residual.unsaturated());

        let mut index_of = vec![INVALID_NODE; condensation.number_of_components() as usize];
        let mut free = Vec::new();
        for c in 0..condensation.number_of_components() {
            let u = condensation.members(c)[0];
            if !reachable.get_bit(u) && !reaching.get_bit(u) {
                index_of[c as usize] = free.len() as Node;
                free.push(c);
            }
        }

        let mut free_dag = AdjArrayIn::new(free.len() as NumNodes);
        for (i, &c) in free.iter().enumerate() {
            for d in condensation.dag().out_neighbors_of(c) {
                let j = index_of[d as usize];
                if j != INVALID_NODE {
                    free_dag.try_add_edge(i as Node, j);
                }
            }
        }

        Self {
            x,
            v,
            reachable,
            antichains: Antichains::new(&free_dag),
            condensation,
            free,
        }
    }

    /// Nodes reachable from the source together with all free components below `antichain`
    fn closed_set(&self, antichain: &[Node]) -> NodeBitSet {
        let mut closed = self.reachable.clone();
        for &a in antichain {
            for d in self.antichains.descendants_of(a).iter_set_bits() {
                for &u in self.condensation.members(self.free[d as usize]) {
                    closed.set_bit(u);
                }
            }
        }
        closed
    }
}

/// Maps the arcs leaving `source_side` to a node cut of size `k` avoiding `x` and `v`, if
/// all of them are internal
fn node_cut_of(
    auxiliary: &AuxiliaryDigraph,
    residual: &ResidualNetwork,
    source_side: &NodeBitSet,
    k: NumNodes,
    x: Node,
    v: Node,
) -> Option<Vec<Node>> {
    let mut cut = Vec::new();
    for Edge(a, b) in residual.cut_arcs(source_side) {
        if !auxiliary.is_internal_arc(a, b) {
            return None;
        }
        cut.push(auxiliary.id(a));
    }
    cut.sort_unstable();
    cut.dedup();

    (cut.len() == k as usize && !cut.contains(&x) && !cut.contains(&v)).then_some(cut)
}

/// Returns *true* if removing `cut` from the connected graph leaves it disconnected or
/// with a single node
pub fn is_separating_set<G>(graph: &G, cut: &[Node]) -> bool
where
    G: StaticGraph,
{
    let removed = NodeBitSet::new_with_bits_set(graph.number_of_nodes(), cut.iter().copied());
    let remaining = graph.len() - removed.cardinality() as usize;
    if remaining <= 1 {
        return true;
    }

    let Some(start) = graph.vertices_range().find(|&u| !removed.get_bit(u)) else {
        return true;
    };
    graph.bfs(start).with_nodes_excluded(cut.iter().copied()).count() < remaining
}

/// Returns a lazy iterator over all minimum node cuts of `graph`. If `k` is given, it is used
/// as node connectivity. See [`AllNodeCuts`].
pub fn all_node_cuts<G>(
    graph: &G,
    k: Option<NumNodes>,
    flow_func: FlowFunc,
) -> Result<AllNodeCuts<'_, G>>
where
    G: StaticGraph,
{
    let mut cuts = AllNodeCuts::new(graph)?.flow_func(flow_func);
    if let Some(k) = k {
        cuts.set_k(k);
    }
    Ok(cuts)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        algo::connectivity::test::{is_separator, known_graphs, two_paths},
        gens::*,
        testing::log_init_test,
    };
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    fn collect_cuts<G: StaticGraph>(graph: &G, flow_func: FlowFunc) -> Vec<Vec<Node>> {
        all_node_cuts(graph, None, flow_func)
            .unwrap()
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    /// All node sets of size `k` whose removal disconnects the graph
    fn brute_force_cuts<G: StaticGraph>(graph: &G, k: NumNodes) -> Vec<Vec<Node>> {
        graph
            .vertices_range()
            .combinations(k as usize)
            .filter(|cut| is_separator(graph, cut))
            .collect()
    }

    #[test]
    fn pairs_skip_top_degree_nodes() {
        let graph: AdjArrayUndir = petersen_graph();
        let State::Search(search) = AllNodeCuts::new(&graph).unwrap().start().unwrap() else {
            panic!("petersen graph is neither complete nor a cycle");
        };

        let top = search.pairs.iter().map(|&(x, _)| x).unique().collect_vec();
        assert_eq!(top.len(), 3);
        // every top node has 6 non-neighbors, some of them in `top` itself
        assert!(search.pairs.len() < 18);
        for &(x, v) in &search.pairs {
            assert!(!top.contains(&v));
            assert!(!graph.has_edge(x, v));
        }

        let cuts = collect_cuts(&graph, FlowFunc::default()).into_iter().sorted().collect_vec();
        assert_eq!(cuts, brute_force_cuts(&graph, 3));
    }

    #[test]
    fn grid_cuts() {
        log_init_test();
        let graph: AdjArrayUndir = grid_2d_graph(5, 5);
        for flow_func in FlowFunc::ALL {
            let cuts = collect_cuts(&graph, flow_func).into_iter().sorted().collect_vec();
            assert_eq!(cuts, [vec![1, 5], vec![3, 9], vec![15, 21], vec![19, 23]], "{}", flow_func.name());
        }
    }

    #[test]
    fn known_graphs_have_valid_cuts() {
        for (name, graph, kappa, _) in known_graphs() {
            let cuts = collect_cuts(&graph, FlowFunc::default());
            assert!(!cuts.is_empty(), "{name}");
            assert!(cuts.iter().all_unique(), "{name}");
            for cut in &cuts {
                assert_eq!(cut.len() as NumNodes, kappa, "{name}: {cut:?}");
                assert!(is_separator(&graph, cut), "{name}: {cut:?}");
            }
        }
    }

    #[test]
    fn matches_brute_force() {
        let rng = &mut Pcg64Mcg::seed_from_u64(5);
        let mut checked = 0;
        while checked < 12 {
            let graph = AdjArrayUndir::gnp_no_loops(rng, 9, 0.4);
            if !graph.is_connected() {
                continue;
            }
            checked += 1;

            let k = node_connectivity(&graph, None, None, FlowFunc::default()).unwrap();
            let expected = brute_force_cuts(&graph, k);
            for flow_func in [FlowFunc::EdmondsKarp, FlowFunc::BoykovKolmogorov] {
                let cuts = collect_cuts(&graph, flow_func).into_iter().sorted().collect_vec();
                if expected.is_empty() {
                    // complete graphs
                    assert_eq!(cuts.len(), 9);
                } else {
                    assert_eq!(cuts, expected, "{graph:?}");
                }
            }
        }
    }

    #[test]
    fn special_cases() {
        let cycle: AdjArrayUndir = cycle_graph(6);
        let cuts = collect_cuts(&cycle, FlowFunc::default());
        assert_eq!(cuts.len(), 15 - 6);
        assert!(cuts.iter().all(|cut| cut.len() == 2 && !cycle.has_edge(cut[0], cut[1])));

        let complete: AdjArrayUndir = complete_graph(5);
        let cuts = collect_cuts(&complete, FlowFunc::default());
        assert_eq!(cuts.len(), 5);
        assert!(cuts.iter().all(|cut| cut.len() == 4));
    }

    #[test]
    fn laziness_and_given_k() {
        let graph: AdjArrayUndir = grid_2d_graph(4, 6);
        let first = all_node_cuts(&graph, Some(2), FlowFunc::default())
            .unwrap()
            .next()
            .unwrap()
            .unwrap();
        assert_eq!(first.len(), 2);
        assert!(is_separator(&graph, &first));
    }

    #[test]
    fn preconditions() {
        assert_eq!(
            AllNodeCuts::new(&two_paths()).err(),
            Some(Error::NotConnected)
        );
        let directed: AdjArrayIn = cycle_graph(4);
        assert_eq!(
            all_node_cuts(&directed, None, FlowFunc::default()).err(),
            Some(Error::NotImplementedFor("directed"))
        );
    }

    #[test]
    fn separating_sets() {
        let graph: AdjArrayUndir = path_graph(5);
        assert!(is_separating_set(&graph, &[2]));
        assert!(!is_separating_set(&graph, &[0]));
        assert!(is_separating_set(&graph, &[0, 1, 2, 3]));
    }
}
