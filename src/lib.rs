/*!
`uconn` computes connectivity properties of **u**nlabelled graphs through maximum flows:
node and edge connectivity (local and global), minimum node and edge cuts, disjoint paths,
all minimum node cuts (Kanevsky), k-components (Moody-White) and k-edge-connected components
and subgraphs.

# Representation

We represent **nodes** as `u32` in the range `0..n` where `n` is the number of nodes in the graph.
For **edges**, we use a simple tuple-struct `Edge(Node, Node)`.

Both **directed** and **undirected** graphs are supported:

- In an **undirected** graph, `Edge(u, v)` is treated as equivalent to `Edge(v, u)`.
- In a **directed** graph, `Edge(u, v)` and `Edge(v, u)` are distinct.

See the [`repr`] module for the available storage backends.

# Flows

Every connectivity question is reduced to unit-capacity maximum flows in an auxiliary digraph
(see [`algo::AuxiliaryDigraph`]). The flow algorithm is a runtime choice through
[`algo::FlowFunc`]: Edmonds-Karp (default), Dinitz, shortest augmenting path, preflow-push or
Boykov-Kolmogorov. All of them agree on flow values and minimum cuts.

# Design

Algorithms are configurable structs (builder/setter pattern) that can be reused for many
queries on the same graph, e.g. [`algo::NodeConnectivity`] or [`algo::EdgeConnectivity`].
For one-off queries there are free functions such as [`algo::node_connectivity`].

Fallible operations return [`error::Result`]. The crate logs through the [`log`] facade and
never installs a logger itself.

# Usage

- [`prelude`] includes nodes, edges, errors, graph operation traits and all representations,
- [`algo`] includes traversals, components, flows and the connectivity algorithms,
- [`gens`] includes named classic graphs and seeded random graphs,
- [`utils`] includes the [`utils::NodeMapper`] of induced subgraphs.

In most use-cases, `use uconn::{prelude::*, algo::*};` suffices:

```
use uconn::{prelude::*, algo::*, gens::*};

let graph: AdjArrayUndir = petersen_graph();
assert_eq!(node_connectivity(&graph, None, None, FlowFunc::default()).unwrap(), 3);
assert_eq!(edge_connectivity(&graph, None, None, FlowFunc::Dinitz, None).unwrap(), 3);
```
*/

pub mod algo;
pub mod edge;
pub mod error;
pub mod gens;
pub mod node;
pub mod ops;
pub mod repr;
pub(crate) mod testing;
pub mod utils;

/// `uconn::prelude` includes definitions for nodes, edges and errors, all basic graph operation
/// traits as well as all implemented representations.
pub mod prelude {
    pub use super::{edge::*, error::*, node::*, ops::*, repr::*};
}
