/*!
# k-Components

A *k-component* is a maximal node set inducing a subgraph of node connectivity at least `k`.
The components of one level may overlap in fewer than `k` nodes and every k-component lies
inside some (k-1)-component.

[`k_components`] follows Moody and White: starting from the biconnected components, each
subgraph is split along all of its minimum node cuts ([`AllNodeCuts`]), and the parts are
examined depth-first. A part whose connectivity exceeds that of its parent is a candidate at
its own level. Finally the levels are consolidated from the top down so that no level is
missing and the nesting holds.
*/

use std::collections::BTreeMap;

use fxhash::FxHashSet;

use super::*;

/// Connectivity level mapped to the node sets of that level; every node set is sorted
pub type KComponents = BTreeMap<NumNodes, Vec<Vec<Node>>>;

/// Computes the k-components of a connected undirected graph for every level `k >= 1`.
/// Parallel edges and loops are ignored.
///
/// Fails with [`Error::NotImplementedFor`] on directed graphs and with
/// [`Error::NotConnected`] on disconnected graphs.
///
/// # Example
/// ```
/// use uconn::{prelude::*, algo::*, gens::*};
///
/// // two cliques sharing the nodes 3 and 4
/// let mut graph: AdjArrayUndir = complete_graph(8);
/// for u in 0..3 {
///     for v in 5..8 {
///         graph.remove_edge(u, v);
///     }
/// }
///
/// let levels = k_components(&graph, FlowFunc::default()).unwrap();
/// assert_eq!(levels[&4], vec![vec![0, 1, 2, 3, 4], vec![3, 4, 5, 6, 7]]);
/// assert_eq!(levels[&2], vec![(0..8).collect::<Vec<_>>()]);
/// ```
pub fn k_components<G>(graph: &G, flow_func: FlowFunc) -> Result<KComponents>
where
    G: StaticGraph,
{
    if G::is_directed() {
        return Err(Error::NotImplementedFor("directed"));
    }
    if !graph.is_weakly_connected() {
        return Err(Error::NotConnected);
    }

    let host = simple_undirected_copy(graph);
    let mut found = KComponents::new();
    if host.len() > 1 {
        found.insert(1, vec![host.vertices_range().collect()]);
    }

    let bicomponents = host
        .biconnected_components()
        .into_iter()
        .filter(|bicomp| bicomp.len() > 2)
        .map(|mut bicomp| {
            bicomp.sort_unstable();
            bicomp
        })
        .collect_vec();
    if !bicomponents.is_empty() {
        found.insert(2, bicomponents.clone());
    }

    for bicomp in bicomponents {
        let (sub, _) = host.vertex_induced(&bicomp);
        let k = node_connectivity(&sub, None, None, flow_func)?;
        if k > 2 {
            debug!("{k}-component of size {}", bicomp.len());
            found.entry(k).or_default().push(bicomp.clone());
        }

        let cuts = minimum_cuts(&sub, k, flow_func)?;
        let mut stack = vec![(k, generate_partition(&sub, &bicomp, &cuts, k).into_iter())];

        while let Some((parent_k, parts)) = stack.last_mut() {
            let parent_k = *parent_k;
            let Some(nodes) = parts.next() else {
                stack.pop();
                continue;
            };

            let (part, _) = host.vertex_induced(&nodes);
            let this_k = node_connectivity(&part, None, None, flow_func)?;
            if this_k > parent_k && this_k > 2 {
                debug!("{this_k}-component of size {}", nodes.len());
                found.entry(this_k).or_default().push(nodes.clone());
            }

            let cuts = minimum_cuts(&part, this_k, flow_func)?;
            if !cuts.is_empty() {
                stack.push((this_k, generate_partition(&part, &nodes, &cuts, this_k).into_iter()));
            }
        }
    }

    Ok(reconstruct(found))
}

/// Maps every node to the highest level of a k-component containing it.
/// Nodes in no component are missing.
pub fn build_k_number_dict(components: &KComponents) -> BTreeMap<Node, NumNodes> {
    let mut k_numbers = BTreeMap::new();
    for (&k, level) in components {
        for &u in level.iter().flatten() {
            k_numbers.insert(u, k);
        }
    }
    k_numbers
}

fn minimum_cuts(graph: &AdjArrayUndir, k: NumNodes, flow_func: FlowFunc) -> Result<Vec<Vec<Node>>> {
    all_node_cuts(graph, Some(k), flow_func)?.collect()
}

/// Splits `graph`, the subgraph induced by `nodes`, along `cuts`: nodes of degree larger
/// than `k` outside all cuts form connected components, and every cut node adjacent to a
/// component joins it. Returned parts are proper subsets, in ids of the host graph.
fn generate_partition(
    graph: &AdjArrayUndir,
    nodes: &[Node],
    cuts: &[Vec<Node>],
    k: NumNodes,
) -> Vec<Vec<Node>> {
    let n = graph.number_of_nodes();
    let in_cut = NodeBitSet::new_with_bits_set(n, cuts.iter().flatten().copied());
    let excluded = graph
        .vertices_range()
        .filter(|&u| graph.degree_of(u) <= k || in_cut.get_bit(u))
        .collect_vec();

    let parts = graph
        .connected_components_exclude_nodes(excluded)
        .filter_map(|cc| {
            let members = NodeBitSet::new_with_bits_set(n, cc.iter().copied());
            let mut part = cc;
            part.extend(
                in_cut
                    .iter_set_bits()
                    .filter(|&u| graph.neighbors_of(u).any(|v| members.get_bit(v))),
            );
            (part.len() < graph.len()).then(|| {
                part.into_iter()
                    .map(|u| nodes[u as usize])
                    .sorted_unstable()
                    .collect_vec()
            })
        })
        .collect_vec();

    // merging may recreate the whole subgraph, which would never shrink
    consolidate(parts, k + 1)
        .into_iter()
        .filter(|part| part.len() < nodes.len())
        .collect()
}

/// Merges sets sharing at least `k` nodes, transitively. Input and output sets are sorted.
fn consolidate(sets: Vec<Vec<Node>>, k: NumNodes) -> Vec<Vec<Node>> {
    let overlaps = (0..sets.len() as Node).tuple_combinations().filter(|&(i, j)| {
        let (a, b) = (&sets[i as usize], &sets[j as usize]);
        a.iter().filter(|u| b.binary_search(u).is_ok()).count() >= k as usize
    });
    let meta = AdjArrayUndir::from_edges(sets.len() as NumNodes, overlaps);

    let merged = meta
        .connected_components()
        .map(|group| {
            group
                .into_iter()
                .flat_map(|i| sets[i as usize].iter().copied())
                .sorted_unstable()
                .dedup()
                .collect_vec()
        })
        .collect_vec();
    sort_components(merged)
}

/// Fills in missing levels from the level above and merges in components of higher levels
/// that are not covered by the nodes of their own level
fn reconstruct(found: KComponents) -> KComponents {
    let mut result = KComponents::new();
    let Some(&max_k) = found.keys().next_back() else {
        return result;
    };

    for k in (1..=max_k).rev() {
        let above = result.get(&(k + 1)).cloned().unwrap_or_default();
        let level = match found.get(&k) {
            Some(level) if k == max_k => consolidate(level.clone(), k),
            None => consolidate(above, k),
            Some(level) => {
                let covered: FxHashSet<Node> = level.iter().flatten().copied().collect();
                let mut sets = level.clone();
                sets.extend(above.into_iter().filter(|c| c.iter().any(|u| !covered.contains(u))));
                consolidate(sets, k)
            }
        };
        debug!("{} components at level {k}", level.len());
        result.insert(k, level);
    }

    result
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{algo::connectivity::test::two_paths, gens::*, testing::log_init_test};

    fn assert_nested(levels: &KComponents) {
        for (&k, level) in levels {
            let Some(below) = levels.get(&(k - 1)) else {
                assert_eq!(k, *levels.keys().next().unwrap());
                continue;
            };
            for comp in level {
                assert!(
                    below.iter().any(|outer| comp.iter().all(|u| outer.contains(u))),
                    "{k}: {comp:?} not nested in {below:?}"
                );
            }
        }
    }

    /// Two cliques on `a` and `b` nodes, sharing the nodes of the range `shared`
    fn overlapping_cliques(a: Node, b: Node, shared: Node) -> AdjArrayUndir {
        let n = a + b - shared;
        let mut graph = AdjArrayUndir::new(n);
        for (u, v) in (0..a).tuple_combinations() {
            graph.add_edge(u, v);
        }
        for (u, v) in (a - shared..n).tuple_combinations() {
            if !graph.has_edge(u, v) {
                graph.add_edge(u, v);
            }
        }
        graph
    }

    #[test]
    fn complete_graph_fills_all_levels() {
        log_init_test();
        let graph: AdjArrayUndir = complete_graph(5);
        let levels = k_components(&graph, FlowFunc::default()).unwrap();
        assert_eq!(levels.keys().copied().collect_vec(), [1, 2, 3, 4]);
        for level in levels.values() {
            assert_eq!(level, &vec![vec![0, 1, 2, 3, 4]]);
        }
    }

    #[test]
    fn known_graphs() {
        for (name, graph, kappa, _) in crate::algo::connectivity::test::known_graphs() {
            let levels = k_components(&graph, FlowFunc::default()).unwrap();
            assert_eq!(*levels.keys().next_back().unwrap(), kappa.max(1), "{name}");
            assert_nested(&levels);
            if kappa >= 3 {
                let all = graph.vertices_range().collect_vec();
                assert!(levels.values().all(|level| level == &vec![all.clone()]), "{name}");
            }
        }
    }

    #[test]
    fn cliques_joined_by_bridge() {
        let mut graph = overlapping_cliques(4, 4, 0);
        graph.add_edge(3, 4);

        let levels = k_components(&graph, FlowFunc::default()).unwrap();
        assert_eq!(levels[&3], vec![vec![0, 1, 2, 3], vec![4, 5, 6, 7]]);
        assert_eq!(levels[&2], levels[&3]);
        assert_eq!(levels[&1], vec![(0..8).collect_vec()]);
    }

    #[test]
    fn cliques_sharing_nodes() {
        log_init_test();
        for flow_func in FlowFunc::ALL {
            let graph = overlapping_cliques(5, 4, 1);
            let levels = k_components(&graph, flow_func).unwrap();
            assert_eq!(levels[&4], vec![vec![0, 1, 2, 3, 4]]);
            assert_eq!(levels[&3], vec![vec![0, 1, 2, 3, 4], vec![4, 5, 6, 7]]);
            assert_eq!(levels[&2], levels[&3]);
            assert_nested(&levels);

            let graph = overlapping_cliques(5, 5, 2);
            let levels = k_components(&graph, flow_func).unwrap();
            assert_eq!(levels[&4], vec![vec![0, 1, 2, 3, 4], vec![3, 4, 5, 6, 7]]);
            assert_eq!(levels[&3], levels[&4]);
            assert_eq!(levels[&2], vec![(0..8).collect_vec()]);
            assert_nested(&levels);
        }
    }

    #[test]
    fn k_numbers() {
        let graph = overlapping_cliques(5, 4, 1);
        let k_numbers = build_k_number_dict(&k_components(&graph, FlowFunc::default()).unwrap());
        assert_eq!(k_numbers.values().copied().collect_vec(), [4, 4, 4, 4, 4, 3, 3, 3]);

        let graph: AdjArrayUndir = path_graph(4);
        let levels = k_components(&graph, FlowFunc::default()).unwrap();
        assert_eq!(levels.keys().copied().collect_vec(), [1]);
        assert!(build_k_number_dict(&levels).values().all(|&k| k == 1));
    }

    #[test]
    fn consolidation() {
        let sets = vec![vec![0, 1, 2], vec![2, 3, 4], vec![3, 4, 5], vec![7, 8]];
        assert_eq!(
            consolidate(sets.clone(), 2),
            vec![vec![0, 1, 2], vec![2, 3, 4, 5], vec![7, 8]]
        );
        assert_eq!(consolidate(sets.clone(), 1), vec![vec![0, 1, 2, 3, 4, 5], vec![7, 8]]);
        assert_eq!(consolidate(sets, 3).len(), 4);
    }

    #[test]
    fn preconditions() {
        assert_eq!(
            k_components(&two_paths(), FlowFunc::default()),
            Err(Error::NotConnected)
        );

        let directed = AdjArrayIn::from_edges(3, [(0, 1), (1, 2), (2, 0)]);
        assert_eq!(
            k_components(&directed, FlowFunc::default()),
            Err(Error::NotImplementedFor("directed"))
        );

        let single = AdjArrayUndir::new(1);
        assert!(k_components(&single, FlowFunc::default()).unwrap().is_empty());
    }
}
