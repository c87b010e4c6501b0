/*!
# Auxiliary Digraphs

Connectivity questions are answered by maximum flows in a derived unit-capacity digraph:

- **Node splitting** ([`AuxiliaryDigraph::for_node_connectivity`]): every node `v` of the
  input is split into `vA = v` and `vB = n + v`, joined by the *internal* arc `vA -> vB`.
  An edge `(u, v)` becomes the arc `uB -> vA` (and `vB -> uA` if the input is undirected).
  A maximum `sB`-`tA` flow then equals the number of internally node-disjoint `s`-`t` paths.
- **Edge duplication** ([`AuxiliaryDigraph::for_edge_connectivity`]): every undirected edge
  becomes two opposite arcs; directed inputs are copied.

Both are built in `O(n + m)` and can be reused for any number of queries on the same graph.
*/

use super::*;

/// A unit-capacity digraph on which connectivity is computed by maximum flows.
///
/// The `mapping` records the order `n` of the input graph for node-splitting digraphs and
/// is `None` for edge-duplication digraphs.
#[derive(Debug, Clone)]
pub struct AuxiliaryDigraph {
    graph: AdjArrayIn,
    mapping: Option<NumNodes>,
}

impl AuxiliaryDigraph {
    /// Builds the node-splitting digraph with `2n` nodes and `n + 2m` (undirected) or
    /// `n + m` (directed) arcs. Self-loops and parallel edges of the input are ignored.
    pub fn for_node_connectivity<G>(graph: &G) -> Self
    where
        G: StaticGraph,
    {
        let n = graph.number_of_nodes();
        let mut aux = AdjArrayIn::new(2 * n);

        for v in graph.vertices_range() {
            aux.add_edge(v, n + v);
        }
        for Edge(u, v) in graph.edges(G::is_undirected()) {
            if u == v {
                continue;
            }
            aux.try_add_edge(n + u, v);
            if G::is_undirected() {
                aux.try_add_edge(n + v, u);
            }
        }

        Self {
            graph: aux,
            mapping: Some(n),
        }
    }

    /// Builds the edge-duplication digraph on the nodes of `graph`
    pub fn for_edge_connectivity<G>(graph: &G) -> Self
    where
        G: StaticGraph,
    {
        let mut aux = AdjArrayIn::new(graph.number_of_nodes());
        for Edge(u, v) in graph.edges(G::is_undirected()) {
            if u == v {
                continue;
            }
            aux.try_add_edge(u, v);
            if G::is_undirected() {
                aux.try_add_edge(v, u);
            }
        }

        Self {
            graph: aux,
            mapping: None,
        }
    }

    /// The underlying digraph
    pub fn graph(&self) -> &AdjArrayIn {
        &self.graph
    }

    /// Order of the input graph if this is a node-splitting digraph
    pub fn mapping(&self) -> Option<NumNodes> {
        self.mapping
    }

    /// Returns the order of the input graph if this digraph splits the `n` nodes of some
    /// input graph and fails with [`Error::InvalidAuxiliary`] otherwise
    pub fn require_node_mapping(&self, n: NumNodes) -> Result<NumNodes> {
        match self.mapping {
            None => Err(Error::InvalidAuxiliary("missing node mapping")),
            Some(order) if order != n || self.graph.number_of_nodes() != 2 * n => {
                Err(Error::InvalidAuxiliary("built for a graph of another order"))
            }
            Some(order) => Ok(order),
        }
    }

    /// Fails with [`Error::InvalidAuxiliary`] unless this is an edge-duplication digraph of
    /// a graph with `n` nodes
    pub fn require_edge_form(&self, n: NumNodes) -> Result<()> {
        if self.mapping.is_some() {
            Err(Error::InvalidAuxiliary("node-splitting digraph used for edge connectivity"))
        } else if self.graph.number_of_nodes() != n {
            Err(Error::InvalidAuxiliary("built for a graph of another order"))
        } else {
            Ok(())
        }
    }

    fn order(&self) -> NumNodes {
        self.mapping.unwrap_or(self.graph.number_of_nodes())
    }

    /// The node `vA`, which receives all arcs entering `v`
    #[inline]
    pub fn node_a(&self, v: Node) -> Node {
        v
    }

    /// The node `vB`, which emits all arcs leaving `v`
    #[inline]
    pub fn node_b(&self, v: Node) -> Node {
        self.mapping.map_or(v, |n| n + v)
    }

    /// The node of the input graph that `x` stems from
    #[inline]
    pub fn id(&self, x: Node) -> Node {
        x % self.order()
    }

    /// Returns *true* if `(x, y)` is the internal arc of some input node
    pub fn is_internal_arc(&self, x: Node, y: Node) -> bool {
        self.mapping.is_some_and(|n| x < n && y == x + n)
    }

    /// Builds a fresh residual network with unit capacities
    pub fn residual_network(&self) -> Result<ResidualNetwork> {
        ResidualNetwork::with_unit_capacities(&self.graph)
    }

    /// Fails with [`Error::InvalidAuxiliary`] if `residual` was not built from this digraph
    pub fn require_residual(&self, residual: &ResidualNetwork) -> Result<()> {
        if residual.number_of_nodes() != self.graph.number_of_nodes() {
            Err(Error::InvalidAuxiliary("residual network of another digraph"))
        } else {
            Ok(())
        }
    }

    /// Adds the arc `(x, y)` with unit capacity unless it exists already
    pub(crate) fn add_arc(&mut self, x: Node, y: Node) {
        self.graph.try_add_edge(x, y);
    }
}

/// Builds the node-splitting auxiliary digraph of `graph`
pub fn build_auxiliary_node_connectivity<G>(graph: &G) -> AuxiliaryDigraph
where
    G: StaticGraph,
{
    AuxiliaryDigraph::for_node_connectivity(graph)
}

/// Builds the edge-duplication auxiliary digraph of `graph`
pub fn build_auxiliary_edge_connectivity<G>(graph: &G) -> AuxiliaryDigraph
where
    G: StaticGraph,
{
    AuxiliaryDigraph::for_edge_connectivity(graph)
}
