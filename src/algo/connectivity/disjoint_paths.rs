/*!
# Disjoint Paths

A maximum flow in a unit-capacity [`AuxiliaryDigraph`] decomposes into paths: edge-disjoint
paths in the edge-duplication digraph and, after mapping `vA`/`vB` back to `v`, internally
node-disjoint paths in the node-splitting digraph. The flow is computed in two-phase mode, so
preflow-push yields a valid flow that can be decomposed.
*/

use super::*;

/// Returns edge-disjoint `s`-`t` paths, as many as possible (at most `cutoff` if given).
/// Every path is listed as its sequence of nodes from `s` to `t`.
///
/// Fails with [`Error::NoPath`] if `t` is not reachable from `s`.
///
/// # Example
/// ```
/// use uconn::{prelude::*, algo::*, gens::*};
///
/// let graph: AdjArrayUndir = icosahedral_graph();
/// let paths = edge_disjoint_paths(&graph, 0, 6, FlowFunc::default(), None).unwrap();
/// assert_eq!(paths.len(), 5);
/// ```
pub fn edge_disjoint_paths<G>(
    graph: &G,
    s: Node,
    t: Node,
    flow_func: FlowFunc,
    cutoff: Option<NumNodes>,
) -> Result<Vec<Vec<Node>>>
where
    G: StaticGraph,
{
    require_endpoints(graph, s, t)?;
    let auxiliary = AuxiliaryDigraph::for_edge_connectivity(graph);
    let mut residual = auxiliary.residual_network()?;

    decompose_flow(&auxiliary, &mut residual, flow_func, s, t, cutoff)?
        .ok_or(Error::NoPath(s, t))
}

/// Returns internally node-disjoint `s`-`t` paths, as many as possible (at most `cutoff` if
/// given). If `(s, t)` is an edge, `[s, t]` is one of them.
///
/// Fails with [`Error::NoPath`] if `t` is not reachable from `s`.
pub fn node_disjoint_paths<G>(
    graph: &G,
    s: Node,
    t: Node,
    flow_func: FlowFunc,
    cutoff: Option<NumNodes>,
) -> Result<Vec<Vec<Node>>>
where
    G: StaticGraph,
{
    require_endpoints(graph, s, t)?;
    let auxiliary = AuxiliaryDigraph::for_node_connectivity(graph);
    let mut residual = auxiliary.residual_network()?;

    let paths = decompose_flow(
        &auxiliary,
        &mut residual,
        flow_func,
        auxiliary.node_b(s),
        auxiliary.node_a(t),
        cutoff,
    )?
    .ok_or(Error::NoPath(s, t))?;

    Ok(paths
        .into_iter()
        .map(|path| {
            path.into_iter()
                .map(|x| auxiliary.id(x))
                .unique()
                .collect_vec()
        })
        .collect())
}

/// Computes a maximum `s`-`t` flow in the auxiliary digraph and splits it into paths of the
/// auxiliary digraph. Returns `None` if there is no flow at all.
fn decompose_flow(
    auxiliary: &AuxiliaryDigraph,
    residual: &mut ResidualNetwork,
    flow_func: FlowFunc,
    s: Node,
    t: Node,
    cutoff: Option<NumNodes>,
) -> Result<Option<Vec<Vec<Node>>>> {
    let aux = auxiliary.graph();
    let possible = aux.out_degree_of(s).min(aux.in_degree_of(t));
    let cutoff = cutoff.map_or(possible, |c| c.min(possible));
    if cutoff == 0 {
        return Ok(None);
    }

    let value = flow_func
        .two_phase()
        .run_on(residual, s, t, Some(Capacity::from(cutoff)))?;
    if value == 0 {
        return Ok(None);
    }

    // with unit capacities every arc carrying flow is saturated
    let mut successors = vec![Vec::new(); residual.number_of_nodes() as usize];
    for (Edge(u, v), _) in residual.flow_dict() {
        successors[u as usize].push(v);
    }
    for succs in &mut successors {
        succs.reverse();
    }

    // preflow-push ignores the cutoff
    let mut paths = Vec::new();
    while paths.len() < cutoff as usize {
        let mut path = vec![s];
        let mut u = s;
        let complete = loop {
            let Some(v) = successors[u as usize].pop() else {
                break false;
            };
            // cancel flow cycles
            match path.iter().position(|&x| x == v) {
                Some(i) => path.truncate(i + 1),
                None => path.push(v),
            }
            u = v;
            if u == t {
                break true;
            }
        };

        if !complete {
            break;
        }
        paths.push(path);
    }

    debug!("{} disjoint paths from {s} to {t}", paths.len());
    Ok(Some(paths))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        algo::connectivity::test::{known_graphs, two_paths},
        gens::*,
        testing::log_init_test,
    };
    use fxhash::FxHashSet;

    fn assert_paths_in_graph<G: StaticGraph>(graph: &G, paths: &[Vec<Node>], s: Node, t: Node) {
        for path in paths {
            assert_eq!(path.first(), Some(&s));
            assert_eq!(path.last(), Some(&t));
            for w in path.windows(2) {
                assert!(graph.has_edge(w[0], w[1]), "{path:?}");
            }
        }
    }

    #[test]
    fn edge_disjoint() {
        log_init_test();
        for (name, graph, _, lambda) in known_graphs() {
            let t = graph.number_of_nodes() - 1;
            let expected = edge_connectivity(&graph, Some(0), Some(t), FlowFunc::default(), None).unwrap();
            assert!(expected >= lambda);

            for flow_func in FlowFunc::ALL {
                let paths = edge_disjoint_paths(&graph, 0, t, flow_func, None).unwrap();
                assert_eq!(paths.len() as NumNodes, expected, "{name} {}", flow_func.name());
                assert_paths_in_graph(&graph, &paths, 0, t);

                let mut used = FxHashSet::default();
                for path in &paths {
                    for w in path.windows(2) {
                        assert!(used.insert(Edge(w[0], w[1]).normalized()), "{name}: {paths:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn node_disjoint() {
        for (name, graph, _, _) in known_graphs() {
            let t = graph.number_of_nodes() / 2;
            let expected = node_connectivity(&graph, Some(0), Some(t), FlowFunc::default()).unwrap();

            for flow_func in FlowFunc::ALL {
                let paths = node_disjoint_paths(&graph, 0, t, flow_func, None).unwrap();
                assert_eq!(paths.len() as NumNodes, expected, "{name} {}", flow_func.name());
                assert_paths_in_graph(&graph, &paths, 0, t);

                let mut used = FxHashSet::default();
                for path in &paths {
                    for &u in &path[1..path.len() - 1] {
                        assert!(used.insert(u), "{name}: {paths:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn adjacent_endpoints() {
        let graph: AdjArrayUndir = complete_graph(5);
        let paths = node_disjoint_paths(&graph, 1, 3, FlowFunc::default(), None).unwrap();
        assert_eq!(paths.len(), 4);
        assert!(paths.contains(&vec![1, 3]));
    }

    #[test]
    fn cutoff() {
        let graph: AdjArrayUndir = icosahedral_graph();
        for flow_func in FlowFunc::ALL {
            assert_eq!(edge_disjoint_paths(&graph, 0, 6, flow_func, Some(2)).unwrap().len(), 2);
            assert_eq!(node_disjoint_paths(&graph, 0, 6, flow_func, Some(3)).unwrap().len(), 3);
            assert_eq!(node_disjoint_paths(&graph, 0, 6, flow_func, Some(9)).unwrap().len(), 5);
        }
    }

    #[test]
    fn directed_paths() {
        let graph = AdjArrayIn::from_edges(5, [(0, 1), (1, 4), (0, 2), (2, 4), (0, 3), (3, 1)]);
        let paths = edge_disjoint_paths(&graph, 0, 4, FlowFunc::default(), None).unwrap();
        assert_eq!(paths.len(), 2);
        assert_paths_in_graph(&graph, &paths, 0, 4);

        assert_eq!(
            edge_disjoint_paths(&graph, 4, 0, FlowFunc::default(), None),
            Err(Error::NoPath(4, 0))
        );
    }

    #[test]
    fn no_path() {
        let graph = two_paths();
        for flow_func in FlowFunc::ALL {
            assert_eq!(
                edge_disjoint_paths(&graph, 0, 5, flow_func, None),
                Err(Error::NoPath(0, 5))
            );
            assert_eq!(
                node_disjoint_paths(&graph, 0, 5, flow_func, None),
                Err(Error::NoPath(0, 5))
            );
        }
        assert_eq!(
            node_disjoint_paths(&graph, 0, 0, FlowFunc::default(), None),
            Err(Error::SourceIsSink(0))
        );
        assert_eq!(
            edge_disjoint_paths(&graph, 0, 6, FlowFunc::default(), None),
            Err(Error::NodeNotFound(6))
        );
        assert_eq!(Error::NoPath(0, 5).kind(), ErrorKind::Precondition);
    }
}
