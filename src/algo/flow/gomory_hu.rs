/*!
# Gomory-Hu Trees

A Gomory-Hu tree of an undirected capacitated graph is a weighted tree on the same nodes such
that for every pair `u != v` the minimum weight on the tree path between them equals the
minimum `u`-`v` cut value in the graph. Removing that lightest edge splits the tree into a
minimum `u`-`v` cut.

The tree is built with Gusfield's method: `n - 1` maximum flows on a single
[`ResidualNetwork`] and no node contractions.

```
use uconn::{prelude::*, algo::*};

let graph = AdjArrayUndir::from_edges(4, [(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)]);
let caps = Capacities::unit();
let tree = gomory_hu_tree(&graph, &caps, FlowFunc::default()).unwrap();

assert_eq!(tree.edges().count(), 3);
assert_eq!(tree.minimum_cut_value(1, 3).unwrap(), 2);
assert_eq!(tree.minimum_cut_value(0, 2).unwrap(), 3);
```
*/

use super::*;

/// Gomory-Hu tree stored as parent pointers towards node `0`.
/// The edge `(u, parent(u))` carries the weight of node `u`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GomoryHuTree {
    parent: Vec<Node>,
    weight: Vec<Capacity>,
}

impl GomoryHuTree {
    pub fn number_of_nodes(&self) -> NumNodes {
        self.parent.len() as NumNodes
    }

    /// Returns the tree neighbor of `u` towards the root or `None` for the root
    pub fn parent_of(&self, u: Node) -> Option<Node> {
        (u != 0).then(|| self.parent[u as usize])
    }

    /// Tree edges `(u, parent(u))` together with their weights
    pub fn edges(&self) -> impl Iterator<Item = (Edge, Capacity)> + '_ {
        (1..self.number_of_nodes()).map(|u| (Edge(u, self.parent[u as usize]), self.weight[u as usize]))
    }

    /// Returns the tree as an unweighted undirected graph
    pub fn to_graph<G>(&self) -> G
    where
        G: GraphFromScratch + GraphType<Dir = Undirected>,
    {
        G::from_edges(self.number_of_nodes(), self.edges().map(|(e, _)| e))
    }

    fn depth_of(&self, mut u: Node) -> NumNodes {
        let mut depth = 0;
        while u != 0 {
            u = self.parent[u as usize];
            depth += 1;
        }
        depth
    }

    /// Lightest edge on the tree path between `u` and `v`, identified by its endpoint farther
    /// from the root
    fn lightest_edge_between(&self, u: Node, v: Node) -> Result<Node> {
        for x in [u, v] {
            if x >= self.number_of_nodes() {
                return Err(Error::NodeNotFound(x));
            }
        }
        if u == v {
            return Err(Error::SourceIsSink(u));
        }

        let (mut u, mut v) = (u, v);
        let (mut du, mut dv) = (self.depth_of(u), self.depth_of(v));
        let mut lightest: Option<Node> = None;
        let climb = |x: &mut Node, lightest: &mut Option<Node>| {
            if lightest.is_none_or(|l| self.weight[*x as usize] < self.weight[l as usize]) {
                *lightest = Some(*x);
            }
            *x = self.parent[*x as usize];
        };

        while du > dv {
            climb(&mut u, &mut lightest);
            du -= 1;
        }
        while dv > du {
            climb(&mut v, &mut lightest);
            dv -= 1;
        }
        while u != v {
            climb(&mut u, &mut lightest);
            climb(&mut v, &mut lightest);
        }

        lightest.ok_or(Error::SourceIsSink(u))
    }

    /// Value of a minimum `u`-`v` cut: the lightest weight on the tree path between them
    pub fn minimum_cut_value(&self, u: Node, v: Node) -> Result<Capacity> {
        let lightest = self.lightest_edge_between(u, v)?;
        Ok(self.weight[lightest as usize])
    }

    /// Minimum `u`-`v` cut obtained by removing the lightest edge on the tree path.
    /// Returns the cut value and the partition `(u-side, v-side)`.
    pub fn minimum_cut(&self, u: Node, v: Node) -> Result<(Capacity, (Vec<Node>, Vec<Node>))> {
        let lightest = self.lightest_edge_between(u, v)?;

        let mut tree: AdjArrayUndir = self.to_graph();
        tree.remove_edge(lightest, self.parent[lightest as usize]);
        let below = NodeBitSet::new_with_bits_set(self.number_of_nodes(), tree.bfs(lightest));

        let (mut u_side, mut v_side): (Vec<Node>, Vec<Node>) =
            (0..self.number_of_nodes()).partition(|&x| below.get_bit(x));
        if !below.get_bit(u) {
            std::mem::swap(&mut u_side, &mut v_side);
        }

        Ok((self.weight[lightest as usize], (u_side, v_side)))
    }
}

/// Computes the Gomory-Hu tree of the undirected `graph` with `capacities` using `flow_func`
/// for the `n - 1` underlying maximum flows.
///
/// Fails with
/// - [`Error::NotImplementedFor`] if `graph` is directed or a multigraph,
/// - [`Error::InvalidParameter`] if `graph` has no nodes,
/// - [`Error::Unbounded`] if two nodes are joined by a path of infinite capacity.
pub fn gomory_hu_tree<G>(graph: &G, capacities: &Capacities, flow_func: FlowFunc) -> Result<GomoryHuTree>
where
    G: StaticGraph,
{
    if G::is_directed() {
        return Err(Error::NotImplementedFor("directed"));
    }
    if graph.is_empty() {
        return Err(Error::InvalidParameter("empty graph has no Gomory-Hu tree"));
    }

    let n = graph.number_of_nodes();
    let mut parent = vec![0 as Node; n as usize];
    let mut weight = vec![0 as Capacity; n as usize];

    let mut residual = ResidualNetwork::new(graph, capacities)?;
    let flow_func = flow_func.value_only();

    for s in 1..n {
        let t = parent[s as usize];
        let value = flow_func.run_on(&mut residual, s, t, None)?;
        let source_side = residual.min_cut_source_set(t);
        weight[s as usize] = value;

        for u in source_side.iter_set_bits() {
            if u != s && parent[u as usize] == t {
                parent[u as usize] = s;
            }
        }

        if t != 0 && source_side.get_bit(parent[t as usize]) {
            parent[s as usize] = parent[t as usize];
            parent[t as usize] = s;
            weight[s as usize] = weight[t as usize];
            weight[t as usize] = value;
        }
    }

    debug!("gomory-hu tree with {n} nodes computed using {}", flow_func.name());
    Ok(GomoryHuTree { parent, weight })
}

#[cfg(test)]
mod test {
    use super::*;
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64;

    use crate::{algo::flow::test::topcoder, gens::*, testing::log_init_test};

    fn cut_capacity<G: StaticGraph>(graph: &G, caps: &Capacities, side: &[Node]) -> Capacity {
        let side = NodeBitSet::new_with_bits_set(graph.number_of_nodes(), side.iter().copied());
        graph
            .edges(true)
            .filter(|e| side.get_bit(e.0) != side.get_bit(e.1))
            .map(|Edge(u, v)| caps.capacity_of(u, v, true).unwrap_or(0))
            .sum()
    }

    fn assert_represents_all_cuts<G: StaticGraph>(graph: &G, caps: &Capacities, flow_func: FlowFunc) {
        let tree = gomory_hu_tree(graph, caps, flow_func).unwrap();
        let as_graph: AdjArrayUndir = tree.to_graph();
        assert_eq!(as_graph.number_of_edges() as usize, graph.len() - 1);
        assert_eq!(as_graph.connected_components().count(), 1);

        for (u, v) in graph.vertices_range().tuple_combinations() {
            let expected = minimum_cut_value(graph, u, v, caps, flow_func).unwrap();
            assert_eq!(tree.minimum_cut_value(u, v).unwrap(), expected, "({u}, {v}) {}", flow_func.name());

            let (value, (u_side, v_side)) = tree.minimum_cut(v, u).unwrap();
            assert_eq!(value, expected);
            assert!(u_side.contains(&v) && v_side.contains(&u));
            assert_eq!(u_side.len() + v_side.len(), graph.len());
            assert_eq!(cut_capacity(graph, caps, &u_side), expected);
        }
    }

    #[test]
    fn known_networks() {
        log_init_test();

        let (graph, caps) = topcoder();
        let tree = gomory_hu_tree(&graph, &caps, FlowFunc::default()).unwrap();
        assert_eq!(tree.minimum_cut_value(0, 6).unwrap(), 4);

        for flow_func in FlowFunc::ALL {
            assert_represents_all_cuts(&graph, &caps, flow_func);

            let petersen: AdjArrayUndir = petersen_graph();
            assert_represents_all_cuts(&petersen, &Capacities::unit(), flow_func);
        }
    }

    #[test]
    fn random_graphs() {
        let rng = &mut Pcg64::seed_from_u64(0x6074_0e1a);

        for _ in 0..25 {
            let n = rng.random_range(2..14);
            let graph = AdjArrayUndir::gnp_no_loops(rng, n, 0.35);
            let caps: Capacities = graph
                .edges(true)
                .map(|e| (e, rng.random_range(0..8)))
                .collect();

            for flow_func in FlowFunc::ALL {
                assert_represents_all_cuts(&graph, &caps, flow_func);
            }
        }
    }

    #[test]
    fn disconnected_and_trivial() {
        let graph = AdjArrayUndir::from_edges(4, [(0, 1), (2, 3)]);
        let tree = gomory_hu_tree(&graph, &Capacities::uniform(3), FlowFunc::default()).unwrap();
        assert_eq!(tree.minimum_cut_value(0, 1).unwrap(), 3);
        assert_eq!(tree.minimum_cut_value(1, 2).unwrap(), 0);
        assert_eq!(tree.minimum_cut_value(3, 0).unwrap(), 0);

        let single = AdjArrayUndir::new(1);
        let tree = gomory_hu_tree(&single, &Capacities::unit(), FlowFunc::default()).unwrap();
        assert_eq!(tree.edges().count(), 0);
        assert_eq!(tree.parent_of(0), None);
        assert_eq!(tree.minimum_cut_value(0, 0).unwrap_err(), Error::SourceIsSink(0));
        assert_eq!(tree.minimum_cut_value(0, 1).unwrap_err(), Error::NodeNotFound(1));
    }

    #[test]
    fn bad_input() {
        let digraph = AdjArrayIn::from_edges(2, [(0, 1)]);
        assert_eq!(
            gomory_hu_tree(&digraph, &Capacities::unit(), FlowFunc::default()).unwrap_err(),
            Error::NotImplementedFor("directed")
        );

        let empty = AdjArrayUndir::new(0);
        assert_eq!(
            gomory_hu_tree(&empty, &Capacities::unit(), FlowFunc::default()).unwrap_err(),
            Error::InvalidParameter("empty graph has no Gomory-Hu tree")
        );

        let path = AdjArrayUndir::from_edges(3, [(0, 1), (1, 2)]);
        assert_eq!(
            gomory_hu_tree(&path, &Capacities::infinite(), FlowFunc::default()).unwrap_err(),
            Error::Unbounded
        );
    }
}
