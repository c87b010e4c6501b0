/*!
# Edge k-Components

A *k-edge-connected component* is a maximal node set whose nodes pairwise have local edge
connectivity at least `k` in the whole graph. A *k-edge-connected subgraph* is a maximal node
set inducing a subgraph of edge connectivity at least `k`. Every k-edge-connected subgraph
lies inside a k-edge-connected component, but not vice versa: the paths certifying the
connectivity of a component may leave it.

Both partition the nodes; nodes without partners form singletons.

- [`k_edge_components`] answers small `k` by (strongly) connected components and bridges and
  otherwise queries an [`EdgeComponentAuxGraph`] (Wang et al.): a weighted tree built by
  recursive minimum `s`-`t` cuts whose components above weight `k` are the answer.
- [`k_edge_subgraphs`] peels nodes of degree below `k` and splits the rest along global
  minimum edge cuts until every part is k-edge-connected (Zhou et al.).

Internally both work on a loop-free digraph in which an undirected edge becomes a pair of
opposite arcs. This keeps all cut values and degrees of undirected inputs.
*/

use std::collections::VecDeque;

use log::trace;

use super::*;

/// Returns the k-edge-connected components of `graph`, each sorted, in lexicographic order.
///
/// Fails with [`Error::InvalidParameter`] if `k == 0` and with [`Error::NotImplementedFor`] on
/// multigraphs.
///
/// # Example
/// ```
/// use uconn::{prelude::*, algo::*};
///
/// // nodes 0 and 1 are joined by three paths of length 2
/// let graph = AdjArrayUndir::from_edges(5, [(0, 2), (2, 1), (0, 3), (3, 1), (0, 4), (4, 1)]);
///
/// assert_eq!(k_edge_components(&graph, 3).unwrap(), vec![vec![0, 1], vec![2], vec![3], vec![4]]);
/// assert_eq!(k_edge_subgraphs(&graph, 3).unwrap().count(), 5);
/// ```
pub fn k_edge_components<G>(graph: &G, k: NumNodes) -> Result<Vec<Vec<Node>>>
where
    G: StaticGraph,
{
    require_simple(graph, k)?;

    match (G::is_directed(), k) {
        (true, 1) => Ok(sort_components(graph.strongly_connected_components().collect())),
        (false, 1) => Ok(sort_components(graph.weakly_connected_components())),
        (false, 2) => bridge_components(graph),
        _ => EdgeComponentAuxGraph::construct(graph, FlowFunc::default())?.k_edge_components(k),
    }
}

/// Lazily enumerates the k-edge-connected subgraphs of `graph`, every node set sorted.
///
/// Fails with [`Error::InvalidParameter`] if `k == 0` and with [`Error::NotImplementedFor`] on
/// multigraphs. These checks happen before anything is yielded.
pub fn k_edge_subgraphs<G>(graph: &G, k: NumNodes) -> Result<KEdgeSubgraphs>
where
    G: StaticGraph,
{
    require_simple(graph, k)?;

    if k <= 1 || (G::is_undirected() && k == 2) {
        return Ok(KEdgeSubgraphs::listed(k, k_edge_components(graph, k)?));
    }

    let ids = graph.vertices_range().collect_vec();
    Ok(KEdgeSubgraphs::new(k, arc_copy(graph), ids))
}

/// Returns the connected components of an undirected graph after deleting all bridges, i.e.
/// its 2-edge-connected components. Each is sorted, in lexicographic order.
///
/// Fails with [`Error::NotImplementedFor`] on directed graphs and multigraphs.
pub fn bridge_components<G>(graph: &G) -> Result<Vec<Vec<Node>>>
where
    G: StaticGraph,
{
    if G::is_directed() {
        return Err(Error::NotImplementedFor("directed"));
    }
    if graph.is_multigraph() {
        return Err(Error::NotImplementedFor("multigraph"));
    }

    let mut copy = simple_undirected_copy(graph);
    let bridges = copy.compute_bridges();
    debug!("{} bridges", bridges.len());
    copy.remove_edges(bridges);

    Ok(sort_components(copy.connected_components().collect()))
}

fn require_simple<G: StaticGraph>(graph: &G, k: NumNodes) -> Result<()> {
    if k < 1 {
        return Err(Error::InvalidParameter("k must be at least 1"));
    }
    if graph.is_multigraph() {
        return Err(Error::NotImplementedFor("multigraph"));
    }
    Ok(())
}

/// Loop-free digraph with the arcs of a directed graph, or both orientations of every edge
/// of an undirected one
fn arc_copy<G: StaticGraph>(graph: &G) -> AdjArrayIn {
    AdjArrayIn::from_edges(
        graph.number_of_nodes(),
        graph.vertices_range().flat_map(|u| {
            graph
                .out_neighbors_of(u)
                .filter(move |&v| v != u)
                .map(move |v| Edge(u, v))
        }),
    )
}

/// Auxiliary tree answering k-edge-connected component queries for every `k` in linear time.
///
/// Starting with all nodes available and an arbitrary source, an available sink is picked and
/// a minimum `s`-`t` cut `(S, T)` of value `w` is computed; for directed graphs the cheaper of
/// the `s`-`t` and `t`-`s` cuts is used. The tree gets the edge `(s, t)` of weight `w`, and the
/// construction continues on the available nodes of `S` with source `s` and of `T` with
/// source `t`. This needs `n - 1` flow computations (twice as many for directed graphs).
///
/// # Example
/// ```
/// use uconn::{prelude::*, algo::*, gens::*};
///
/// let graph: AdjArrayUndir = petersen_graph();
/// let aux = EdgeComponentAuxGraph::construct(&graph, FlowFunc::default()).unwrap();
///
/// assert_eq!(aux.tree_edges().len(), 9);
/// assert_eq!(aux.k_edge_components(3).unwrap().len(), 1);
/// assert_eq!(aux.k_edge_components(4).unwrap().len(), 10);
/// ```
pub struct EdgeComponentAuxGraph {
    arcs: AdjArrayIn,
    flow_func: FlowFunc,
    tree: Vec<(Edge, NumNodes)>,
}

impl EdgeComponentAuxGraph {
    /// Fails with [`Error::NotImplementedFor`] on multigraphs
    pub fn construct<G>(graph: &G, flow_func: FlowFunc) -> Result<Self>
    where
        G: StaticGraph,
    {
        if graph.is_multigraph() {
            return Err(Error::NotImplementedFor("multigraph"));
        }

        let arcs = arc_copy(graph);
        let auxiliary = AuxiliaryDigraph::for_edge_connectivity(&arcs);
        let mut residual = auxiliary.residual_network()?;
        let n = arcs.number_of_nodes();

        let mut tree = Vec::with_capacity(arcs.len().saturating_sub(1));
        let mut stack = Vec::new();
        if n > 0 {
            stack.push((0, arcs.vertices_range().collect_vec()));
        }

        while let Some((source, available)) = stack.pop() {
            let Some(&sink) = available.iter().find(|&&u| u != source) else {
                continue;
            };

            let (mut value, mut source_side) =
                cut_between(&mut residual, flow_func, source, sink)?;
            if G::is_directed() {
                let (reverse_value, sink_side) =
                    cut_between(&mut residual, flow_func, sink, source)?;
                if reverse_value < value {
                    value = reverse_value;
                    source_side = NodeBitSet::new_all_set(n);
                    for u in sink_side.iter_set_bits() {
                        source_side.clear_bit(u);
                    }
                }
            }

            trace!("aux tree edge ({source}, {sink}) of weight {value}");
            tree.push((Edge(source, sink), value));

            let (with_source, with_sink): (Vec<_>, Vec<_>) =
                available.into_iter().partition(|&u| source_side.get_bit(u));
            stack.push((sink, with_sink));
            stack.push((source, with_source));
        }

        debug!("auxiliary tree with {} edges", tree.len());
        Ok(Self {
            arcs,
            flow_func,
            tree,
        })
    }

    /// Edges of the auxiliary tree; the weight of `(s, t)` is the local edge connectivity
    /// used when `s` and `t` were split
    pub fn tree_edges(&self) -> &[(Edge, NumNodes)] {
        &self.tree
    }

    /// The k-edge-connected components: the connected components of the tree after deleting
    /// edges lighter than `k`
    pub fn k_edge_components(&self, k: NumNodes) -> Result<Vec<Vec<Node>>> {
        if k < 1 {
            return Err(Error::InvalidParameter("k must be at least 1"));
        }

        let heavy = AdjArrayUndir::from_edges(
            self.arcs.number_of_nodes(),
            self.tree.iter().filter(|&&(_, w)| w >= k).map(|&(e, _)| e),
        );
        Ok(sort_components(heavy.connected_components().collect()))
    }

    /// The k-edge-connected subgraphs, obtained by refining every k-edge-connected component
    /// with at least `k` nodes; smaller ones fall apart into singletons
    pub fn k_edge_subgraphs(&self, k: NumNodes) -> Result<Vec<Vec<Node>>> {
        let mut subgraphs = Vec::new();
        for component in self.k_edge_components(k)? {
            if (component.len() as NumNodes) < k {
                subgraphs.extend(component.into_iter().map(|u| vec![u]));
                continue;
            }

            let (part, _) = self.arcs.vertex_induced(&component);
            let refined = KEdgeSubgraphs::new(k, part, component).flow_func(self.flow_func);
            for subgraph in refined {
                subgraphs.push(subgraph?);
            }
        }

        Ok(sort_components(subgraphs))
    }
}

/// Maximum flow from `s` to `t`, returning its value and the source side of a minimum cut
fn cut_between(
    residual: &mut ResidualNetwork,
    flow_func: FlowFunc,
    s: Node,
    t: Node,
) -> Result<(NumNodes, NodeBitSet)> {
    let value = flow_func.value_only().run_on(residual, s, t, None)?;
    Ok((value as NumNodes, residual.min_cut_source_set(t)))
}

/// Lazy search for k-edge-connected subgraphs, see [`k_edge_subgraphs`].
///
/// Nodes of in- or out-degree below `k` are yielded as singletons right away. The remaining
/// strongly connected parts are split along global minimum edge cuts, one part per step.
pub struct KEdgeSubgraphs {
    k: NumNodes,
    flow_func: FlowFunc,
    ready: VecDeque<Vec<Node>>,
    /// Parts without low-degree nodes, with the original id of each node (sorted)
    pending: Vec<(AdjArrayIn, Vec<Node>)>,
}

impl KEdgeSubgraphs {
    fn new(k: NumNodes, graph: AdjArrayIn, ids: Vec<Node>) -> Self {
        let mut search = Self::listed(k, Vec::new());
        search.peel(graph, &ids);
        search
    }

    fn listed(k: NumNodes, subgraphs: Vec<Vec<Node>>) -> Self {
        Self {
            k,
            flow_func: FlowFunc::default(),
            ready: subgraphs.into(),
            pending: Vec::new(),
        }
    }

    /// Selects the maximum-flow algorithm for the minimum cuts (default: Edmonds-Karp)
    pub fn set_flow_func(&mut self, flow_func: FlowFunc) {
        self.flow_func = flow_func;
    }

    /// Builder variant of [`KEdgeSubgraphs::set_flow_func`]
    pub fn flow_func(mut self, flow_func: FlowFunc) -> Self {
        self.set_flow_func(flow_func);
        self
    }

    /// Removes nodes of in- or out-degree below `k` until none is left, then queues the
    /// strongly connected components of the rest
    fn peel(&mut self, graph: AdjArrayIn, ids: &[Node]) {
        let k = self.k;
        let mut in_degrees = graph.vertices_range().map(|u| graph.in_degree_of(u)).collect_vec();
        let mut out_degrees = graph.vertices_range().map(|u| graph.out_degree_of(u)).collect_vec();

        let mut removed = graph.vertex_bitset_unset();
        let mut queue = graph
            .vertices_range()
            .filter(|&u| in_degrees[u as usize] < k || out_degrees[u as usize] < k)
            .collect_vec();

        while let Some(u) = queue.pop() {
            if removed.set_bit(u) {
                continue;
            }
            self.ready.push_back(vec![ids[u as usize]]);

            for v in graph.out_neighbors_of(u) {
                in_degrees[v as usize] -= 1;
                if in_degrees[v as usize] < k && !removed.get_bit(v) {
                    queue.push(v);
                }
            }
            for v in graph.in_neighbors_of(u) {
                out_degrees[v as usize] -= 1;
                if out_degrees[v as usize] < k && !removed.get_bit(v) {
                    queue.push(v);
                }
            }
        }

        let rest = graph.vertices_range().filter(|&u| !removed.get_bit(u)).collect_vec();
        if rest.is_empty() {
            return;
        }

        let (core, _) = graph.vertex_induced(&rest);
        for mut scc in core.strongly_connected_components() {
            scc.sort_unstable();
            let (part, _) = core.vertex_induced(&scc);
            let part_ids = scc.iter().map(|&u| ids[rest[u as usize] as usize]).collect();
            self.pending.push((part, part_ids));
        }
    }

    /// Either accepts `part` or splits it along a minimum edge cut
    fn split(&mut self, mut part: AdjArrayIn, ids: Vec<Node>) -> Result<()> {
        if part.len() == 1 {
            self.ready.push_back(ids);
            return Ok(());
        }

        let cut = EdgeConnectivity::new(&part)?
            .flow_func(self.flow_func)
            .minimum_cut()?;
        if cut.len() as NumNodes >= self.k {
            debug!("{}-edge-connected subgraph of size {}", cut.len(), ids.len());
            self.ready.push_back(ids);
            return Ok(());
        }

        part.remove_edges(cut);
        self.peel(part, &ids);
        Ok(())
    }
}

impl Iterator for KEdgeSubgraphs {
    type Item = Result<Vec<Node>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(subgraph) = self.ready.pop_front() {
                return Some(Ok(subgraph));
            }

            let (part, ids) = self.pending.pop()?;
            if let Err(err) = self.split(part, ids) {
                self.pending.clear();
                return Some(Err(err));
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{gens::*, testing::log_init_test};
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    /// Two 4-cliques joined by the bridge (3, 4) and a pendant node 8 at 7
    fn cliques_with_pendant() -> AdjArrayUndir {
        let mut graph = AdjArrayUndir::new(9);
        for (u, v) in (0..4).tuple_combinations() {
            graph.add_edge(u, v);
            graph.add_edge(u + 4, v + 4);
        }
        graph.add_edge(3, 4);
        graph.add_edge(7, 8);
        graph
    }

    /// Nodes 0 and 1 joined by three paths over 2, 3 and 4
    fn three_paths() -> AdjArrayUndir {
        AdjArrayUndir::from_edges(5, [(0, 2), (2, 1), (0, 3), (3, 1), (0, 4), (4, 1)])
    }

    fn singletons(n: Node) -> Vec<Vec<Node>> {
        (0..n).map(|u| vec![u]).collect()
    }

    fn subgraphs_of<G: StaticGraph>(graph: &G, k: NumNodes) -> Vec<Vec<Node>> {
        let subgraphs: Result<Vec<_>> = k_edge_subgraphs(graph, k).unwrap().collect();
        sort_components(subgraphs.unwrap())
    }

    #[test]
    fn undirected_components() {
        log_init_test();
        let graph = cliques_with_pendant();
        assert_eq!(k_edge_components(&graph, 1).unwrap(), vec![(0..9).collect_vec()]);

        let blocks = vec![vec![0, 1, 2, 3], vec![4, 5, 6, 7], vec![8]];
        assert_eq!(k_edge_components(&graph, 2).unwrap(), blocks);
        assert_eq!(k_edge_components(&graph, 3).unwrap(), blocks);
        assert_eq!(k_edge_components(&graph, 4).unwrap(), singletons(9));

        for flow_func in FlowFunc::ALL {
            let aux = EdgeComponentAuxGraph::construct(&graph, flow_func).unwrap();
            assert_eq!(aux.tree_edges().len(), 8);
            assert_eq!(aux.k_edge_components(1).unwrap(), vec![(0..9).collect_vec()]);
            assert_eq!(aux.k_edge_components(2).unwrap(), blocks, "{}", flow_func.name());
            assert_eq!(aux.k_edge_subgraphs(3).unwrap(), blocks);
        }
    }

    #[test]
    fn components_versus_subgraphs() {
        let graph = three_paths();
        assert_eq!(
            k_edge_components(&graph, 3).unwrap(),
            vec![vec![0, 1], vec![2], vec![3], vec![4]]
        );
        assert_eq!(subgraphs_of(&graph, 3), singletons(5));

        let aux = EdgeComponentAuxGraph::construct(&graph, FlowFunc::Dinitz).unwrap();
        assert_eq!(aux.k_edge_subgraphs(3).unwrap(), singletons(5));
        assert_eq!(aux.k_edge_components(2).unwrap(), vec![(0..5).collect_vec()]);
    }

    #[test]
    fn directed_components() {
        // bidirected triangle 0, 1, 2 with the detour 2 -> 3 -> 0
        let graph = AdjArrayIn::from_edges(
            4,
            [(0, 1), (1, 0), (1, 2), (2, 1), (0, 2), (2, 0), (2, 3), (3, 0)],
        );

        assert_eq!(k_edge_components(&graph, 1).unwrap(), vec![vec![0, 1, 2, 3]]);
        assert_eq!(k_edge_components(&graph, 2).unwrap(), vec![vec![0, 1, 2], vec![3]]);
        assert_eq!(subgraphs_of(&graph, 2), vec![vec![0, 1, 2], vec![3]]);
        assert_eq!(k_edge_components(&graph, 3).unwrap(), singletons(4));

        let path = AdjArrayIn::from_edges(3, [(0, 1), (1, 2)]);
        assert_eq!(k_edge_components(&path, 1).unwrap(), singletons(3));
        assert_eq!(subgraphs_of(&path, 1), singletons(3));
    }

    #[test]
    fn known_graphs_are_one_subgraph() {
        for (name, graph, _, lambda) in crate::algo::connectivity::test::known_graphs() {
            let all = vec![graph.vertices_range().collect_vec()];
            assert_eq!(k_edge_components(&graph, lambda).unwrap(), all, "{name}");
            assert_eq!(subgraphs_of(&graph, lambda), all, "{name}");
            assert_eq!(subgraphs_of(&graph, lambda + 1).len(), graph.len(), "{name}");
        }
    }

    #[test]
    fn random_graphs() {
        log_init_test();
        let rng = &mut Pcg64Mcg::seed_from_u64(0x4b45);

        for round in 0..10 {
            let graph = AdjArrayUndir::gnp_no_loops(rng, 14, 0.35);
            let n = graph.len();

            for k in 1..5 {
                let components = k_edge_components(&graph, k).unwrap();
                let subgraphs = subgraphs_of(&graph, k);

                for partition in [&components, &subgraphs] {
                    let mut nodes = partition.iter().flatten().copied().collect_vec();
                    nodes.sort_unstable();
                    assert_eq!(nodes, (0..n as Node).collect_vec(), "round {round}, k = {k}");
                }

                for subgraph in &subgraphs {
                    assert!(
                        components.iter().any(|c| subgraph.iter().all(|u| c.contains(u))),
                        "round {round}, k = {k}: {subgraph:?} not in {components:?}"
                    );
                    if subgraph.len() > 1 {
                        let (sub, _) = graph.vertex_induced(subgraph);
                        let lambda = edge_connectivity(&sub, None, None, FlowFunc::default(), None);
                        assert!(lambda.unwrap() >= k);
                    }
                }

                for component in &components {
                    for (&s, &t) in component.iter().tuple_combinations() {
                        let lambda =
                            edge_connectivity(&graph, Some(s), Some(t), FlowFunc::default(), None);
                        assert!(lambda.unwrap() >= k, "round {round}, k = {k}: ({s}, {t})");
                    }
                }
            }
        }
    }

    #[test]
    fn random_digraphs() {
        let rng = &mut Pcg64Mcg::seed_from_u64(0x4b46);

        for round in 0..10 {
            let graph = AdjArrayIn::gnp_no_loops(rng, 9, 0.4);
            for k in 1..4 {
                let components = k_edge_components(&graph, k).unwrap();
                let subgraphs = subgraphs_of(&graph, k);
                assert_eq!(components.iter().map(Vec::len).sum::<usize>(), graph.len());
                assert_eq!(subgraphs.iter().map(Vec::len).sum::<usize>(), graph.len());

                for subgraph in &subgraphs {
                    assert!(components.iter().any(|c| subgraph.iter().all(|u| c.contains(u))));
                }

                for component in &components {
                    for (&s, &t) in component.iter().tuple_combinations() {
                        for (x, y) in [(s, t), (t, s)] {
                            let lambda =
                                edge_connectivity(&graph, Some(x), Some(y), FlowFunc::default(), None);
                            assert!(lambda.unwrap() >= k, "round {round}, k = {k}: ({x}, {y})");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn bridges() {
        let mut graph: AdjArrayUndir = cycle_graph(10);
        graph.remove_edge(4, 5);
        graph.remove_edge(9, 0);
        graph.add_edge(0, 4);
        graph.add_edge(5, 9);
        graph.add_edge(0, 5);

        assert_eq!(
            bridge_components(&graph).unwrap(),
            vec![vec![0, 1, 2, 3, 4], vec![5, 6, 7, 8, 9]]
        );

        let directed = AdjArrayIn::from_edges(2, [(0, 1)]);
        assert_eq!(
            bridge_components(&directed),
            Err(Error::NotImplementedFor("directed"))
        );
    }

    #[test]
    fn bad_input() {
        let graph = three_paths();
        assert_eq!(
            k_edge_components(&graph, 0),
            Err(Error::InvalidParameter("k must be at least 1"))
        );
        assert!(k_edge_subgraphs(&graph, 0).is_err());

        let multi = AdjArrayUndir::from_edges(3, [(0, 1), (0, 1), (1, 2)]);
        assert_eq!(
            k_edge_components(&multi, 3),
            Err(Error::NotImplementedFor("multigraph"))
        );
        assert!(k_edge_subgraphs(&multi, 3).is_err());
        assert!(EdgeComponentAuxGraph::construct(&multi, FlowFunc::default()).is_err());
        assert_eq!(
            bridge_components(&multi),
            Err(Error::NotImplementedFor("multigraph"))
        );
    }

    #[test]
    fn lazy_subgraphs() {
        let graph: AdjArrayUndir = path_graph(5);
        let mut subgraphs = k_edge_subgraphs(&graph, 3).unwrap();
        assert_eq!(subgraphs.next().map(|s| s.unwrap().len()), Some(1));
        assert_eq!(subgraphs.count(), 4);
    }
}
