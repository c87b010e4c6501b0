/*!
# Substructure Generators

Adds common motifs (**paths**, **cycles**, **cliques**) to an already existing graph.

```rust
use uconn::{prelude::*, gens::*};

let mut g = AdjArrayIn::new(5);
g.connect_path([0, 1, 2]);
g.connect_cycle([2, 3, 4]);

assert_eq!(
    g.ordered_edges(false).collect::<Vec<Edge>>(),
    vec![Edge(0, 1), Edge(1, 2), Edge(2, 3), Edge(3, 4), Edge(4, 2)]
);
```
*/

use itertools::Itertools;

use super::*;

/// Trait for creating additional **substructures** (paths, cycles, cliques)
/// inside an already existing graph.
pub trait GeneratorSubstructures {
    /// Connects the given nodes in order with a **simple path**.
    fn connect_path<P>(&mut self, nodes_on_path: P)
    where
        P: IntoIterator<Item = Node>;

    /// Connects the given nodes with a **cycle**: consecutive nodes are joined and
    /// the last node is connected back to the first.
    fn connect_cycle<C>(&mut self, nodes_in_cycle: C)
    where
        C: IntoIterator<Item = Node>;

    /// Connects all given nodes into a **clique**. Directed graphs receive both arcs
    /// for every pair. Edges already present are not duplicated.
    fn connect_clique(&mut self, nodes: &[Node], with_loops: bool);
}

impl<G> GeneratorSubstructures for G
where
    G: GraphEdgeEditing + GraphType,
{
    fn connect_path<P>(&mut self, nodes_on_path: P)
    where
        P: IntoIterator<Item = Node>,
    {
        for (u, v) in nodes_on_path.into_iter().tuple_windows() {
            self.add_edge(u, v);
        }
    }

    fn connect_cycle<C>(&mut self, nodes_in_cycle: C)
    where
        C: IntoIterator<Item = Node>,
    {
        let mut iter = nodes_in_cycle.into_iter();

        if let Some(first) = iter.next() {
            let mut prev = first;
            for cur in iter {
                self.add_edge(prev, cur);
                prev = cur;
            }

            self.add_edge(prev, first);
        }
    }

    fn connect_clique(&mut self, nodes: &[Node], with_loops: bool) {
        for &u in nodes {
            for &v in nodes {
                let e = Edge(u, v);
                if (!with_loops && e.is_loop()) || (Self::is_undirected() && !e.is_normalized()) {
                    continue;
                }

                self.try_add_edge(u, v);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_path() {
        let mut g = AdjArrayIn::new(6);
        g.connect_path([]);
        g.connect_path([1]);
        assert_eq!(g.number_of_edges(), 0);

        g.connect_path([0, 3, 1, 4]);
        assert_eq!(
            g.ordered_edges(false).collect_vec(),
            vec![Edge(0, 3), Edge(1, 4), Edge(3, 1)]
        );
    }

    #[test]
    fn test_connect_cycle() {
        let mut g = AdjArrayIn::new(6);
        g.connect_cycle([1]);
        assert!(g.has_edge(1, 1));

        let mut g = AdjArrayUndir::new(6);
        g.connect_cycle([0, 2, 4]);
        assert_eq!(
            g.ordered_edges(true).collect_vec(),
            vec![Edge(0, 2), Edge(0, 4), Edge(2, 4)]
        );
    }

    #[test]
    fn test_connect_clique() {
        let mut g = AdjArrayIn::new(4);
        g.connect_clique(&[0, 1, 3], false);
        assert_eq!(g.number_of_edges(), 6);
        assert!(g.has_edge(3, 0) && g.has_edge(0, 3));

        let mut g = AdjArrayUndir::new(4);
        g.connect_clique(&[0, 1, 3], true);
        assert_eq!(g.number_of_edges(), 6);
        g.connect_clique(&[0, 1], false);
        assert_eq!(g.number_of_edges(), 6);
    }
}
