/*!
# Maximum Flows

Five interchangeable maximum-flow algorithms working on a shared [`ResidualNetwork`]:

- [`EdmondsKarp`]: augmenting paths found by a bidirectional BFS,
- [`Dinitz`]: blocking flows on BFS level graphs,
- [`ShortestAugmentingPath`]: distance labels with current-arc DFS (optionally two-phase),
- [`PreflowPush`]: highest-label push-relabel with global relabeling and gap heuristic,
- [`BoykovKolmogorov`]: two growing search trees with orphan adoption.

All of them implement [`FlowAlgorithm`]; the enum [`FlowFunc`] selects one of them at runtime
and is what the connectivity algorithms accept. [`gomory_hu_tree`] condenses all pairwise
minimum cuts of an undirected graph into a single tree.

```
use uconn::{prelude::*, algo::*};

let graph = AdjArrayIn::from_edges(4, [(0, 1), (0, 2), (1, 3), (2, 3), (1, 2)]);
let caps = Capacities::unit();

for flow_func in FlowFunc::ALL {
    assert_eq!(maximum_flow_value(&graph, 0, 3, &caps, flow_func).unwrap(), 2);
}
```
*/

use fxhash::FxHashMap;
use log::debug;

use super::*;

mod boykov_kolmogorov;
mod dinitz;
mod edmonds_karp;
mod gomory_hu;
mod preflow_push;
mod residual;
mod shortest_augmenting_path;

pub use boykov_kolmogorov::*;
pub use dinitz::*;
pub use edmonds_karp::*;
pub use gomory_hu::*;
pub use preflow_push::*;
pub use residual::*;
pub use shortest_augmenting_path::*;

/// Capacities and flow values are integral
pub type Capacity = i64;

/// Edge capacities: explicitly set values plus a default for all other edges.
/// A default of `None` stands for infinite capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capacities {
    explicit: FxHashMap<Edge, Capacity>,
    default: Option<Capacity>,
}

impl Capacities {
    /// Every edge has capacity `c` unless set otherwise
    pub fn uniform(c: Capacity) -> Self {
        Self {
            explicit: FxHashMap::default(),
            default: Some(c),
        }
    }

    /// Every edge has capacity 1 unless set otherwise
    pub fn unit() -> Self {
        Self::uniform(1)
    }

    /// Every edge has infinite capacity unless set otherwise
    pub fn infinite() -> Self {
        Self {
            explicit: FxHashMap::default(),
            default: None,
        }
    }

    /// Sets the capacity of edge `(u, v)`
    pub fn set_capacity(&mut self, u: Node, v: Node, c: Capacity) {
        self.explicit.insert(Edge(u, v), c);
    }

    /// Builder variant of [`Capacities::set_capacity`]
    pub fn with_capacity(mut self, u: Node, v: Node, c: Capacity) -> Self {
        self.set_capacity(u, v, c);
        self
    }

    /// Returns the capacity of edge `(u, v)` or `None` if it is infinite.
    /// If `undirected`, a capacity stored for `(v, u)` applies as well.
    pub fn capacity_of(&self, u: Node, v: Node, undirected: bool) -> Option<Capacity> {
        self.explicit
            .get(&Edge(u, v))
            .or_else(|| {
                undirected
                    .then(|| self.explicit.get(&Edge(v, u)))
                    .flatten()
            })
            .copied()
            .or(self.default)
    }
}

impl<E: Into<Edge>> FromIterator<(E, Capacity)> for Capacities {
    /// Collects explicit capacities; all other edges get capacity 1
    fn from_iter<I: IntoIterator<Item = (E, Capacity)>>(iter: I) -> Self {
        let mut caps = Self::unit();
        for (e, c) in iter {
            let Edge(u, v) = e.into();
            caps.set_capacity(u, v, c);
        }
        caps
    }
}

/// A maximum-flow algorithm operating on a [`ResidualNetwork`].
pub trait FlowAlgorithm {
    /// Resets all flows of `residual` and computes a maximum `s`-`t` flow in it.
    /// Returns the flow value, which is also stored in the network.
    ///
    /// If `cutoff` is given, the algorithm may stop as soon as the flow value reaches it.
    /// The value returned is then at least `cutoff` (but possibly smaller than the maximum).
    ///
    /// Fails if `s` or `t` is not a node, if `s == t`, or if the flow is unbounded.
    fn compute(
        &self,
        residual: &mut ResidualNetwork,
        s: Node,
        t: Node,
        cutoff: Option<Capacity>,
    ) -> Result<Capacity>;
}

/// Runtime selection of a [`FlowAlgorithm`]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FlowFunc {
    #[default]
    EdmondsKarp,
    Dinitz,
    ShortestAugmentingPath(ShortestAugmentingPath),
    PreflowPush(PreflowPush),
    BoykovKolmogorov,
}

impl FlowFunc {
    /// One default-configured instance of every algorithm
    pub const ALL: [FlowFunc; 5] = [
        FlowFunc::EdmondsKarp,
        FlowFunc::Dinitz,
        FlowFunc::ShortestAugmentingPath(ShortestAugmentingPath::new()),
        FlowFunc::PreflowPush(PreflowPush::new()),
        FlowFunc::BoykovKolmogorov,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FlowFunc::EdmondsKarp => "edmonds-karp",
            FlowFunc::Dinitz => "dinitz",
            FlowFunc::ShortestAugmentingPath(_) => "shortest-augmenting-path",
            FlowFunc::PreflowPush(_) => "preflow-push",
            FlowFunc::BoykovKolmogorov => "boykov-kolmogorov",
        }
    }

    /// Configuration for computations that still need a complete flow afterwards:
    /// shortest augmenting path switches to its two-phase variant.
    pub fn two_phase(self) -> Self {
        match self {
            FlowFunc::ShortestAugmentingPath(sap) => {
                FlowFunc::ShortestAugmentingPath(sap.two_phase(true))
            }
            other => other,
        }
    }

    /// Configuration for computations that only need flow values or minimum cuts:
    /// additionally, preflow-push stops after its first phase.
    pub fn value_only(self) -> Self {
        match self.two_phase() {
            FlowFunc::PreflowPush(pp) => FlowFunc::PreflowPush(pp.value_only(true)),
            other => other,
        }
    }

    /// Returns *true* if the computed flow is a valid flow (and not only a preflow)
    fn yields_flow(&self) -> bool {
        !matches!(self, FlowFunc::PreflowPush(pp) if pp.is_value_only())
    }

    /// Computes a maximum flow in a (possibly reused) residual network
    pub fn run_on(
        &self,
        residual: &mut ResidualNetwork,
        s: Node,
        t: Node,
        cutoff: Option<Capacity>,
    ) -> Result<Capacity> {
        self.compute(residual, s, t, cutoff)
    }
}

impl FlowAlgorithm for FlowFunc {
    fn compute(
        &self,
        residual: &mut ResidualNetwork,
        s: Node,
        t: Node,
        cutoff: Option<Capacity>,
    ) -> Result<Capacity> {
        let value = match self {
            FlowFunc::EdmondsKarp => EdmondsKarp.compute(residual, s, t, cutoff),
            FlowFunc::Dinitz => Dinitz.compute(residual, s, t, cutoff),
            FlowFunc::ShortestAugmentingPath(sap) => sap.compute(residual, s, t, cutoff),
            FlowFunc::PreflowPush(pp) => pp.compute(residual, s, t, cutoff),
            FlowFunc::BoykovKolmogorov => BoykovKolmogorov.compute(residual, s, t, cutoff),
        }?;

        debug!("{}: flow value {value} from {s} to {t}", self.name());
        if self.yields_flow() {
            residual.debug_assert_valid_flow(s, t);
        }

        Ok(value)
    }
}

impl From<ShortestAugmentingPath> for FlowFunc {
    fn from(value: ShortestAugmentingPath) -> Self {
        FlowFunc::ShortestAugmentingPath(value)
    }
}

impl From<PreflowPush> for FlowFunc {
    fn from(value: PreflowPush) -> Self {
        FlowFunc::PreflowPush(value)
    }
}

/// Computes a maximum `s`-`t` flow in `graph` and returns its value together with the
/// residual network holding the flow (see [`ResidualNetwork::flow_dict`]).
pub fn maximum_flow<G>(
    graph: &G,
    s: Node,
    t: Node,
    capacities: &Capacities,
    flow_func: FlowFunc,
    cutoff: Option<Capacity>,
) -> Result<(Capacity, ResidualNetwork)>
where
    G: StaticGraph,
{
    graph.require_vertex(s)?;
    graph.require_vertex(t)?;

    let mut residual = ResidualNetwork::new(graph, capacities)?;
    let value = flow_func.run_on(&mut residual, s, t, cutoff)?;
    Ok((value, residual))
}

/// Computes the value of a maximum `s`-`t` flow in `graph`
pub fn maximum_flow_value<G>(
    graph: &G,
    s: Node,
    t: Node,
    capacities: &Capacities,
    flow_func: FlowFunc,
) -> Result<Capacity>
where
    G: StaticGraph,
{
    Ok(maximum_flow(graph, s, t, capacities, flow_func.value_only(), None)?.0)
}

/// Computes a minimum `s`-`t` cut of `graph` and returns its capacity and the node
/// partition `(source side, sink side)`
pub fn minimum_cut<G>(
    graph: &G,
    s: Node,
    t: Node,
    capacities: &Capacities,
    flow_func: FlowFunc,
) -> Result<(Capacity, (Vec<Node>, Vec<Node>))>
where
    G: StaticGraph,
{
    let (value, residual) = maximum_flow(graph, s, t, capacities, flow_func.value_only(), None)?;
    Ok((value, residual.min_cut_partition(t)))
}

/// Computes the capacity of a minimum `s`-`t` cut of `graph`
pub fn minimum_cut_value<G>(
    graph: &G,
    s: Node,
    t: Node,
    capacities: &Capacities,
    flow_func: FlowFunc,
) -> Result<Capacity>
where
    G: StaticGraph,
{
    maximum_flow_value(graph, s, t, capacities, flow_func)
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64;

    use crate::{gens::*, testing::log_init_test};

    /// Undirected network with maximum flow 4 from 0 to 6
    pub(crate) fn topcoder() -> (AdjArrayUndir, Capacities) {
        let (x, a, b, c, d, e, y) = (0, 1, 2, 3, 4, 5, 6);
        let edges = [
            ((x, a), 3),
            ((x, b), 1),
            ((a, c), 3),
            ((b, c), 5),
            ((b, d), 4),
            ((d, e), 2),
            ((c, y), 2),
            ((e, y), 3),
        ];
        let graph = AdjArrayUndir::from_edges(7, edges.iter().map(|&(e, _)| e));
        (graph, edges.into_iter().collect())
    }

    /// Directed network with maximum flow 2000 from 0 to 3
    pub(crate) fn digraph1() -> (AdjArrayIn, Capacities) {
        let edges = [
            ((0, 1), 1000),
            ((0, 2), 1000),
            ((1, 2), 1),
            ((1, 3), 1000),
            ((2, 3), 1000),
        ];
        let graph = AdjArrayIn::from_edges(4, edges.iter().map(|&(e, _)| e));
        (graph, edges.into_iter().collect())
    }

    /// Sum of capacities of arcs from the source side to the sink side
    fn cut_capacity(residual: &ResidualNetwork, source_side: &[Node]) -> Capacity {
        let set = NodeBitSet::new_with_bits_set(residual.number_of_nodes(), source_side.iter().copied());
        source_side
            .iter()
            .flat_map(|&u| residual.arcs_of(u).iter().copied())
            .filter(|&a| !set.get_bit(residual.head(a)))
            .map(|a| residual.capacity(a))
            .sum()
    }

    fn assert_max_flow<G: StaticGraph>(graph: &G, caps: &Capacities, s: Node, t: Node, expected: Capacity) {
        for flow_func in FlowFunc::ALL {
            let (value, residual) = maximum_flow(graph, s, t, caps, flow_func, None).unwrap();
            assert_eq!(value, expected, "{}", flow_func.name());
            assert_eq!(residual.flow_value(), expected);

            let (cut_value, (source_side, sink_side)) =
                minimum_cut(graph, s, t, caps, flow_func).unwrap();
            assert_eq!(cut_value, expected, "{}", flow_func.name());
            assert!(source_side.contains(&s));
            assert!(sink_side.contains(&t));
            assert_eq!(source_side.len() + sink_side.len(), graph.len());

            let residual = ResidualNetwork::new(graph, caps).unwrap();
            assert_eq!(cut_capacity(&residual, &source_side), expected, "{}", flow_func.name());
        }
    }

    #[test]
    fn known_networks() {
        log_init_test();

        let (graph, caps) = topcoder();
        assert_max_flow(&graph, &caps, 0, 6, 4);

        let (graph, caps) = digraph1();
        assert_max_flow(&graph, &caps, 0, 3, 2000);

        // classic textbook network, value 23
        let graph = AdjArrayIn::from_edges(
            6,
            [(0, 1), (0, 2), (1, 2), (2, 1), (1, 3), (3, 2), (2, 4), (4, 3), (3, 5), (4, 5)],
        );
        let caps: Capacities = [
            ((0, 1), 16),
            ((0, 2), 13),
            ((1, 2), 10),
            ((2, 1), 4),
            ((1, 3), 12),
            ((3, 2), 9),
            ((2, 4), 14),
            ((4, 3), 7),
            ((3, 5), 20),
            ((4, 5), 4),
        ]
        .into_iter()
        .collect();
        assert_max_flow(&graph, &caps, 0, 5, 23);
    }

    #[test]
    fn disconnected_and_trivial() {
        let graph = AdjArrayIn::from_edges(4, [(0, 1), (2, 3)]);
        assert_max_flow(&graph, &Capacities::unit(), 0, 3, 0);
        assert_max_flow(&graph, &Capacities::unit(), 3, 2, 0);

        let single = AdjArrayIn::from_edges(2, [(0, 1)]);
        assert_max_flow(&single, &Capacities::uniform(7), 0, 1, 7);
    }

    #[test]
    fn reject_bad_endpoints() {
        let (graph, caps) = digraph1();
        for flow_func in FlowFunc::ALL {
            assert_eq!(
                maximum_flow(&graph, 0, 9, &caps, flow_func, None).unwrap_err(),
                Error::NodeNotFound(9)
            );
            assert_eq!(
                maximum_flow(&graph, 2, 2, &caps, flow_func, None).unwrap_err(),
                Error::SourceIsSink(2)
            );
        }
    }

    #[test]
    fn huge_capacities() {
        let quarter = Capacity::MAX / 4;
        let directed = AdjArrayIn::from_edges(3, [(0, 1), (1, 2)]);
        let undirected = AdjArrayUndir::from_edges(3, [(0, 1), (1, 2)]);
        let caps = Capacities::uniform(quarter);
        for flow_func in FlowFunc::ALL {
            assert_eq!(maximum_flow_value(&directed, 0, 2, &caps, flow_func).unwrap(), quarter);
            assert_eq!(maximum_flow_value(&undirected, 2, 0, &caps, flow_func).unwrap(), quarter);
        }

        let star = AdjArrayIn::from_edges(4, [(0, 1), (0, 2), (0, 3), (1, 3), (2, 3)]);
        let caps = Capacities::uniform(Capacity::MAX / 3);
        for flow_func in FlowFunc::ALL {
            assert_eq!(
                maximum_flow_value(&star, 0, 3, &caps, flow_func).unwrap_err().kind(),
                ErrorKind::BadInput
            );
        }
    }

    #[test]
    fn unbounded() {
        // path of infinite capacity 0 -> 1 -> 2 next to a finite arc
        let graph = AdjArrayIn::from_edges(4, [(0, 1), (1, 2), (0, 3), (3, 2)]);
        let caps = Capacities::infinite().with_capacity(0, 3, 5);
        for flow_func in FlowFunc::ALL {
            assert_eq!(
                maximum_flow(&graph, 0, 2, &caps, flow_func, None).unwrap_err(),
                Error::Unbounded,
                "{}",
                flow_func.name()
            );
        }

        // infinite arcs that are not on an s-t path are harmless
        let caps = Capacities::infinite().with_capacity(0, 1, 2).with_capacity(0, 3, 5);
        for flow_func in FlowFunc::ALL {
            assert_eq!(maximum_flow_value(&graph, 0, 2, &caps, flow_func).unwrap(), 7);
        }
    }

    #[test]
    fn cutoff_stops_early() {
        let graph: AdjArrayIn = complete_graph(8);
        let caps = Capacities::unit();
        for flow_func in FlowFunc::ALL {
            let (value, _) = maximum_flow(&graph, 0, 7, &caps, flow_func, None).unwrap();
            assert_eq!(value, 7);

            let (value, _) = maximum_flow(&graph, 0, 7, &caps, flow_func, Some(3)).unwrap();
            assert!(value >= 3, "{}", flow_func.name());
            assert!(value <= 7);
        }

        for flow_func in [FlowFunc::EdmondsKarp, FlowFunc::BoykovKolmogorov] {
            // both augment one unit-path at a time
            let (value, _) = maximum_flow(&graph, 0, 7, &caps, flow_func, Some(3)).unwrap();
            assert_eq!(value, 3);
        }
    }

    #[test]
    fn reuse_residual() {
        let (graph, caps) = topcoder();
        let mut residual = ResidualNetwork::new(&graph, &caps).unwrap();
        for flow_func in FlowFunc::ALL {
            assert_eq!(flow_func.run_on(&mut residual, 0, 6, None).unwrap(), 4);
            assert_eq!(flow_func.run_on(&mut residual, 6, 0, None).unwrap(), 4);
            assert_eq!(flow_func.run_on(&mut residual, 1, 2, None).unwrap(), 4);
        }
    }

    #[test]
    fn flow_dict_is_a_flow() {
        let (graph, caps) = digraph1();
        for flow_func in FlowFunc::ALL.map(FlowFunc::two_phase) {
            let (_, residual) = maximum_flow(&graph, 0, 3, &caps, flow_func, None).unwrap();
            let flows = residual.flow_dict();

            let into_sink: Capacity = flows.iter().filter(|(e, _)| e.1 == 3).map(|&(_, f)| f).sum();
            assert_eq!(into_sink, 2000);
            for &(Edge(u, v), f) in &flows {
                assert!(f <= caps.capacity_of(u, v, false).unwrap());
            }
        }
    }

    #[test]
    fn algorithms_agree_on_random_networks() {
        let rng = &mut Pcg64::seed_from_u64(0x1234_5678);

        for round in 0..60 {
            let n = rng.random_range(2..25);
            let graph = AdjArrayIn::gnp_no_loops(rng, n, 0.2);
            let caps: Capacities = graph
                .edges(false)
                .map(|e| (e, rng.random_range(0..10)))
                .collect();
            let s = rng.random_range(0..n);
            let t = (s + 1 + rng.random_range(0..n - 1)) % n;

            let values = FlowFunc::ALL
                .iter()
                .map(|&ff| {
                    let (value, (source_side, _)) = minimum_cut(&graph, s, t, &caps, ff).unwrap();
                    let residual = ResidualNetwork::new(&graph, &caps).unwrap();
                    assert_eq!(cut_capacity(&residual, &source_side), value, "round {round} {}", ff.name());
                    value
                })
                .collect_vec();

            assert!(values.iter().all_equal(), "round {round}: {values:?}");
        }
    }
}
