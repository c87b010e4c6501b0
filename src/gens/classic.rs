/*!
# Classic Graphs

Deterministic named graphs. Every generator is generic over the output representation;
directed representations receive both arcs of every edge (a symmetric digraph).

```rust
use uconn::{prelude::*, gens::*};

let petersen: AdjArrayUndir = petersen_graph();
assert_eq!(petersen.number_of_nodes(), 10);
assert_eq!(petersen.number_of_edges(), 15);
```
*/

use itertools::Itertools;

use super::*;

/// Builds a graph from undirected edges; directed graphs get both orientations
fn from_undirected_edges<G, I>(n: NumNodes, edges: I) -> G
where
    G: GraphFromScratch + GraphType,
    I: IntoIterator<Item = (Node, Node)>,
{
    let edges = edges
        .into_iter()
        .map(|(u, v)| Edge(u, v).normalized())
        .sorted_unstable()
        .dedup()
        .collect_vec();

    G::from_edges(
        n,
        edges.into_iter().flat_map(|e| {
            let reverse = (G::is_directed() && !e.is_loop()).then(|| e.reverse());
            std::iter::once(e).chain(reverse)
        }),
    )
}

/// Builds a graph from an adjacency dictionary `u -> [v, ...]`
fn from_adjacency<G>(n: NumNodes, adj: &[(Node, &[Node])]) -> G
where
    G: GraphFromScratch + GraphType,
{
    from_undirected_edges(
        n,
        adj.iter()
            .flat_map(|&(u, nbs)| nbs.iter().map(move |&v| (u, v))),
    )
}

/// The complete graph `K_n`
pub fn complete_graph<G: GraphFromScratch + GraphType>(n: NumNodes) -> G {
    from_undirected_edges(n, (0..n).tuple_combinations())
}

/// The path `0 - 1 - ... - (n-1)`
pub fn path_graph<G: GraphFromScratch + GraphType>(n: NumNodes) -> G {
    from_undirected_edges(n, (0..n).tuple_windows())
}

/// The cycle `0 - 1 - ... - (n-1) - 0`; requires `n >= 3` to be simple
pub fn cycle_graph<G: GraphFromScratch + GraphType>(n: NumNodes) -> G {
    from_undirected_edges(n, (0..n).map(|u| (u, (u + 1) % n)))
}

/// The `rows x cols` grid where node `(i, j)` is `i * cols + j`
pub fn grid_2d_graph<G: GraphFromScratch + GraphType>(rows: NumNodes, cols: NumNodes) -> G {
    let id = |i: Node, j: Node| i * cols + j;
    from_undirected_edges(
        rows * cols,
        (0..rows).cartesian_product(0..cols).flat_map(|(i, j)| {
            let right = (j + 1 < cols).then(|| (id(i, j), id(i, j + 1)));
            let down = (i + 1 < rows).then(|| (id(i, j), id(i + 1, j)));
            right.into_iter().chain(down)
        }),
    )
}

/// The Petersen graph: an outer 5-cycle, spokes `i - (i+5)` and an inner pentagram
pub fn petersen_graph<G: GraphFromScratch + GraphType>() -> G {
    from_undirected_edges(
        10,
        (0..5)
            .map(|i| (i, (i + 1) % 5))
            .chain((0..5).map(|i| (i, i + 5)))
            .chain((0..5).map(|i| (5 + i, 5 + (i + 2) % 5))),
    )
}

/// The octahedral graph (6 nodes, 4-regular)
pub fn octahedral_graph<G: GraphFromScratch + GraphType>() -> G {
    from_adjacency(
        6,
        &[
            (0, &[1, 2, 3, 4]),
            (1, &[2, 3, 5]),
            (2, &[4, 5]),
            (3, &[4, 5]),
            (4, &[5]),
        ],
    )
}

/// The icosahedral graph (12 nodes, 5-regular)
pub fn icosahedral_graph<G: GraphFromScratch + GraphType>() -> G {
    from_adjacency(
        12,
        &[
            (0, &[1, 5, 7, 8, 11]),
            (1, &[2, 5, 6, 8]),
            (2, &[3, 6, 8, 9]),
            (3, &[4, 6, 9, 10]),
            (4, &[5, 6, 10, 11]),
            (5, &[6, 11]),
            (7, &[8, 9, 10, 11]),
            (8, &[9]),
            (9, &[10]),
            (10, &[11]),
        ],
    )
}

/// The dodecahedral graph (20 nodes, 3-regular) given by LCF notation `[10,7,4,-4,-7,10,-4,7,-7,4]^2`
pub fn dodecahedral_graph<G: GraphFromScratch + GraphType>() -> G {
    const LCF: [i64; 10] = [10, 7, 4, -4, -7, 10, -4, 7, -7, 4];
    let n: i64 = 20;
    from_undirected_edges(
        n as NumNodes,
        (0..n)
            .map(|i| (i, (i + 1) % n))
            .chain((0..n).map(|i| (i, (i + LCF[i as usize % 10]).rem_euclid(n))))
            .map(|(u, v)| (u as Node, v as Node)),
    )
}

#[cfg(test)]
mod test {
    use super::*;

    fn assert_regular(graph: &AdjArrayUndir, n: NumNodes, m: NumEdges, deg: NumNodes) {
        assert_eq!(graph.number_of_nodes(), n);
        assert_eq!(graph.number_of_edges(), m);
        assert!(graph.degrees().all(|d| d == deg));
        assert!(!graph.is_multigraph());
    }

    #[test]
    fn named_graphs() {
        assert_regular(&petersen_graph(), 10, 15, 3);
        assert_regular(&octahedral_graph(), 6, 12, 4);
        assert_regular(&icosahedral_graph(), 12, 30, 5);
        assert_regular(&dodecahedral_graph(), 20, 30, 3);
        assert_regular(&complete_graph(7), 7, 21, 6);
        assert_regular(&cycle_graph(9), 9, 9, 2);
    }

    #[test]
    fn grids_and_paths() {
        let grid: AdjArrayUndir = grid_2d_graph(3, 4);
        assert_eq!(grid.number_of_nodes(), 12);
        assert_eq!(grid.number_of_edges(), 3 * 3 + 2 * 4);
        assert!(grid.has_edge(0, 1) && grid.has_edge(0, 4) && !grid.has_edge(3, 4));

        let path: AdjArrayUndir = path_graph(5);
        assert_eq!(path.number_of_edges(), 4);
    }

    #[test]
    fn symmetric_digraphs() {
        let k4: AdjArrayIn = complete_graph(4);
        assert_eq!(k4.number_of_edges(), 12);
        assert!(k4.vertices_range().all(|u| k4.in_degree_of(u) == 3));

        let petersen: AdjArrayIn = petersen_graph();
        assert_eq!(petersen.number_of_edges(), 30);
    }
}
