/*!
# Graph Operations

Traits describing what an algorithm can ask of a graph. Algorithms in [`crate::algo`]
are written against these traits (most of them through the bundle trait [`StaticGraph`])
and are thus independent of the concrete representation in [`crate::repr`].

Nodes are always `0..n`. Undirected graphs also implement [`DirectedAdjacencyList`]:
every neighbor of an undirected node is both an out- and an in-neighbor.
*/

use std::ops::Range;

use crate::{edge::*, error::*, node::*};

/// Marker for the direction of a graph
pub trait GraphDir {
    const DIRECTED: bool;
}

/// Marker type for directed graphs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Directed;

/// Marker type for undirected graphs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Undirected;

impl GraphDir for Directed {
    const DIRECTED: bool = true;
}

impl GraphDir for Undirected {
    const DIRECTED: bool = false;
}

/// Compile-time information about whether a graph is directed
pub trait GraphType {
    type Dir: GraphDir;

    /// Returns *true* if edges of this graph type have an orientation
    fn is_directed() -> bool {
        <Self::Dir as GraphDir>::DIRECTED
    }

    /// Returns *true* if `Edge(u, v)` and `Edge(v, u)` are the same edge
    fn is_undirected() -> bool {
        !Self::is_directed()
    }
}

/// Provides getters pertaining to the node-size of a graph
pub trait GraphNodeOrder {
    type VertexIter<'a>: Iterator<Item = Node> + 'a
    where
        Self: 'a;

    /// Returns the number of nodes of the graph
    fn number_of_nodes(&self) -> NumNodes;

    /// Return the number of nodes as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns an iterator over V.
    fn vertices(&self) -> Self::VertexIter<'_>;

    /// Returns the range `0..n`.
    /// In contrast to `self.vertices()`, the range does not borrow self.
    fn vertices_range(&self) -> Range<Node> {
        0..self.number_of_nodes()
    }

    /// Returns empty bitset with one entry per node
    fn vertex_bitset_unset(&self) -> NodeBitSet {
        NodeBitSet::new(self.number_of_nodes())
    }

    /// Returns *true* if the graph has no nodes (and thus no edges)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns *true* if `u` is a node of the graph
    fn has_vertex(&self, u: Node) -> bool {
        u < self.number_of_nodes()
    }

    /// Returns `Err(NodeNotFound(u))` if `u` is not a node of the graph
    fn require_vertex(&self, u: Node) -> Result<()> {
        if self.has_vertex(u) {
            Ok(())
        } else {
            Err(Error::NodeNotFound(u))
        }
    }
}

/// Provides getters pertaining to the edge-size of a graph
pub trait GraphEdgeOrder {
    /// Returns the number of edges of the graph
    fn number_of_edges(&self) -> NumEdges;

    /// Returns *true* if the graph has no edges
    fn is_singleton_graph(&self) -> bool {
        self.number_of_edges() == 0
    }
}

/// Traits pertaining getters for neighborhoods & edges
pub trait AdjacencyList: GraphNodeOrder + Sized {
    type NeighborIter<'a>: Iterator<Item = Node> + 'a
    where
        Self: 'a;

    /// Returns an iterator over the (open) neighborhood of a given vertex.
    /// ** Panics if `u >= n` **
    ///
    /// Note that for directed graphs, this is equivalent to `out_neighbors_of`
    fn neighbors_of(&self, u: Node) -> Self::NeighborIter<'_>;

    /// Returns the number of (outgoing) neighbors of `u`
    /// ** Panics if `u >= n` **
    fn degree_of(&self, u: Node) -> NumNodes;

    /// Returns an iterator over the degrees of all nodes
    fn degrees(&self) -> impl Iterator<Item = NumNodes> + '_ {
        self.vertices_range().map(|u| self.degree_of(u))
    }

    /// Returns the neighborhood of `u` as a bitset
    /// ** Panics if `u >= n` **
    fn neighbors_of_as_bitset(&self, u: Node) -> NodeBitSet {
        NodeBitSet::new_with_bits_set(self.number_of_nodes(), self.neighbors_of(u))
    }

    /// Returns an iterator over outgoing edges of a given vertex.
    /// If `only_normalized`, then only edges `(u, v)` with `u <= v` are considered.
    /// ** Panics if `u >= n` **
    fn edges_of(&self, u: Node, only_normalized: bool) -> impl Iterator<Item = Edge> + '_ {
        self.neighbors_of(u)
            .map(move |v| Edge(u, v))
            .filter(move |e| !only_normalized || e.is_normalized())
    }

    /// Returns an iterator over all edges in the graph.
    /// If `only_normalized`, then only edges `(u, v)` with `u <= v` are considered.
    fn edges(&self, only_normalized: bool) -> impl Iterator<Item = Edge> + '_ {
        self.vertices_range()
            .flat_map(move |u| self.edges_of(u, only_normalized))
    }

    /// Returns all edges in the graph in sorted order.
    /// If `only_normalized`, then only edges `(u, v)` with `u <= v` are considered.
    fn ordered_edges(&self, only_normalized: bool) -> impl Iterator<Item = Edge> + '_ {
        let mut edges: Vec<Edge> = self.edges(only_normalized).collect();
        edges.sort_unstable();
        edges.into_iter()
    }
}

/// Access to incoming neighborhoods.
pub trait DirectedAdjacencyList: AdjacencyList + GraphType {
    type InNeighborIter<'a>: Iterator<Item = Node> + 'a
    where
        Self: 'a;

    /// Returns an iterator over nodes `v` with edges `(v, u)`
    /// ** Panics if `u >= n` **
    fn in_neighbors_of(&self, u: Node) -> Self::InNeighborIter<'_>;

    /// Returns the number of incoming neighbors of a given vertex
    /// ** Panics if `u >= n` **
    fn in_degree_of(&self, u: Node) -> NumNodes;

    #[inline]
    fn out_neighbors_of(&self, u: Node) -> Self::NeighborIter<'_> {
        self.neighbors_of(u)
    }

    #[inline]
    fn out_degree_of(&self, u: Node) -> NumNodes {
        self.degree_of(u)
    }

    /// Returns the number of edges incident to `u`:
    /// `in + out` for directed graphs and the plain degree for undirected graphs.
    /// ** Panics if `u >= n` **
    #[inline]
    fn total_degree_of(&self, u: Node) -> NumNodes {
        if Self::is_directed() {
            self.out_degree_of(u) + self.in_degree_of(u)
        } else {
            self.degree_of(u)
        }
    }

    /// Returns the in-neighborhood of `u` as a bitset
    /// ** Panics if `u >= n` **
    fn in_neighbors_of_as_bitset(&self, u: Node) -> NodeBitSet {
        NodeBitSet::new_with_bits_set(self.number_of_nodes(), self.in_neighbors_of(u))
    }
}

/// Trait to test existence of certain structures in a graph.
pub trait AdjacencyTest: GraphNodeOrder {
    /// Returns *true* if the egde (u,v) exists in the graph.
    /// ** Panics if `u >= n || v >= n` **
    fn has_edge(&self, u: Node, v: Node) -> bool;
}

/// Trait for creating a new empty graph
pub trait GraphNew {
    /// Creates an empty graph with n singleton nodes
    fn new(n: NumNodes) -> Self;
}

/// Provides functions to insert/delete edges
pub trait GraphEdgeEditing: GraphNew {
    /// Adds the edge *(u,v)* to the graph without checking whether it already exists.
    /// Adding an existing edge again turns the graph into a multigraph.
    /// ** Panics if `u >= n || v >= n` **
    fn add_edge(&mut self, u: Node, v: Node);

    /// Adds the edge `(u, v)` to the graph if it is not present yet.
    /// Returns *true* exactly if the edge was present previously.
    /// ** Panics if `u >= n || v >= n` **
    fn try_add_edge(&mut self, u: Node, v: Node) -> bool;

    /// Adds all edges in the collection
    fn add_edges(&mut self, edges: impl IntoIterator<Item = impl Into<Edge>>) {
        for Edge(u, v) in edges.into_iter().map(|d| d.into()) {
            self.add_edge(u, v);
        }
    }

    /// Removes the directed edge *(u,v)* from the graph. I.e., the edge FROM u TO v.
    /// ** Panics if the edge is not present or u, v >= n **
    fn remove_edge(&mut self, u: Node, v: Node) {
        assert!(self.try_remove_edge(u, v));
    }

    /// Removes all edges in the collection
    /// ** Panics if the any edge (u, v) in `edges` is not present or u, v >= n **
    fn remove_edges(&mut self, edges: impl IntoIterator<Item = impl Into<Edge>>) {
        for Edge(u, v) in edges.into_iter().map(|d| d.into()) {
            self.remove_edge(u, v);
        }
    }

    /// Removes the directed edge *(u,v)* from the graph. I.e., the edge FROM u TO v.
    /// If the edge was removed, returns *true* and *false* otherwise.
    /// ** Panics if u, v >= n **
    fn try_remove_edge(&mut self, u: Node, v: Node) -> bool;
}

/// Trait extending the methods of the GraphEdgeEditing trait for directed as well as undirected graphs.
pub trait GraphLocalEdgeEditing: GraphEdgeEditing {
    /// Removes all edges adjacent to node u in the graph.
    /// ** Panics if `u >= n` **
    fn remove_edges_at_node(&mut self, u: Node);

    /// Removes all edges adjacent to any node u in an iterator in the graph.
    /// ** Panics if any node in `nodes` is `>= n` **
    fn remove_edges_at_nodes<I: IntoIterator<Item = Node>>(&mut self, nodes: I) {
        for node in nodes {
            self.remove_edges_at_node(node);
        }
    }
}

/// A super trait for creating a graph from scratch from a set of edges and a number of nodes
pub trait GraphFromScratch {
    /// Create a graph from a number of nodes and an iterator over Edges
    fn from_edges(n: NumNodes, edges: impl IntoIterator<Item = impl Into<Edge>>) -> Self;
}

impl<G: GraphNew + GraphEdgeEditing> GraphFromScratch for G {
    fn from_edges(n: NumNodes, edges: impl IntoIterator<Item = impl Into<Edge>>) -> Self {
        let mut graph = Self::new(n);
        graph.add_edges(edges);
        graph
    }
}

/// Everything the connectivity algorithms need from an input graph.
///
/// Blanket-implemented for all graphs with in- and out-neighborhoods and an edge test,
/// i.e. all representations in [`crate::repr`].
pub trait StaticGraph: DirectedAdjacencyList + AdjacencyTest + GraphEdgeOrder {
    /// Iterates over all nodes adjacent to `u` in either direction.
    /// For directed graphs, predecessors follow successors; a node that is both appears twice.
    /// ** Panics if `u >= n` **
    fn all_neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        let preds = Self::is_directed()
            .then(|| self.in_neighbors_of(u))
            .into_iter()
            .flatten();
        self.out_neighbors_of(u).chain(preds)
    }

    /// Returns the first node of minimum total degree together with that degree
    fn min_degree_node(&self) -> Option<(Node, NumNodes)> {
        self.vertices_range()
            .map(|u| (u, self.total_degree_of(u)))
            .min_by_key(|&(_, d)| d)
    }

    /// Returns *true* if some edge is stored more than once
    fn is_multigraph(&self) -> bool {
        let mut buffer = Vec::new();
        self.vertices_range().any(|u| {
            buffer.clear();
            buffer.extend(self.neighbors_of(u));
            buffer.sort_unstable();
            buffer.windows(2).any(|w| w[0] == w[1])
        })
    }
}

impl<G> StaticGraph for G where G: DirectedAdjacencyList + AdjacencyTest + GraphEdgeOrder {}
