/*!
# Graph Algorithms

Everything is re-exported at the top level of this module, so
```rust
use uconn::algo::*;
```
gives access to all of them:

- [`traversal`](Traversal): BFS/DFS iterators and reachability,
- [`components`](Connectivity): connected, weakly connected and strongly connected components,
- [`bridges`](Bridges): bridges and biconnected components,
- [`subgraph`](Subgraph): vertex-induced subgraphs,
- [`condensation`](Condensation): SCC condensation and antichain enumeration,
- [`flow`](FlowFunc): five maximum-flow algorithms on a shared residual network,
- [`connectivity`](NodeConnectivity): node/edge connectivity, minimum cuts, disjoint paths,
  all minimum node cuts and (edge) k-components.

If possible, algorithms are provided as **iterators**, making it easy to consume results lazily.
*/

mod bridges;
mod components;
mod condensation;
mod connectivity;
mod flow;
mod subgraph;
mod traversal;

use crate::{prelude::*, utils::*};

pub use bridges::*;
pub use components::*;
pub use condensation::*;
pub use connectivity::*;
pub use flow::*;
pub use subgraph::*;
pub use traversal::*;
