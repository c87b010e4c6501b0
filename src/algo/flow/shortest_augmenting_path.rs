/*!
# Shortest Augmenting Path

Maintains exact distance labels (*heights*) towards the sink and advances a DFS along
admissible arcs, relabeling nodes whenever their current arc runs off the end of the
adjacency list. Once some height level becomes empty (gap heuristic), no augmenting path is
left.

In the two-phase variant the label-based search stops as soon as the source is farther away
than `min(sqrt(m), 2 n^(2/3))`; the remaining (few, long) paths are then found by
Edmonds-Karp.
*/

use log::trace;

use super::{
    edmonds_karp::{augment_along, edmonds_karp_core},
    *,
};

/// Shortest augmenting path maximum-flow algorithm; honors `cutoff` after every augmentation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShortestAugmentingPath {
    two_phase: bool,
}

impl ShortestAugmentingPath {
    pub const fn new() -> Self {
        Self { two_phase: false }
    }

    /// If set, long augmenting paths are left to a final Edmonds-Karp phase
    pub fn set_two_phase(&mut self, two_phase: bool) {
        self.two_phase = two_phase;
    }

    /// Builder variant of [`ShortestAugmentingPath::set_two_phase`]
    pub fn two_phase(mut self, two_phase: bool) -> Self {
        self.set_two_phase(two_phase);
        self
    }

    pub fn is_two_phase(&self) -> bool {
        self.two_phase
    }

    fn run(
        &self,
        residual: &mut ResidualNetwork,
        s: Node,
        t: Node,
        cutoff: Option<Capacity>,
    ) -> Result<Capacity> {
        let n = residual.number_of_nodes();
        let Some(mut heights) = exact_heights(residual, t, s) else {
            return Ok(0);
        };

        let mut counts = vec![0 as NumNodes; 2 * n as usize - 1];
        for &h in &heights {
            counts[h as usize] += 1;
        }

        let pairs = (residual.number_of_arcs() / 2) as f64;
        let max_source_height = if self.two_phase {
            (pairs.sqrt()).min(2.0 * (n as f64).powf(2.0 / 3.0)) as NumNodes
        } else {
            n
        };

        let mut current = vec![0usize; n as usize];
        let mut path: Vec<usize> = Vec::new();
        let mut flow_value = 0;
        let mut relabels = 0usize;
        let mut u = s;
        let mut done = heights[s as usize] >= max_source_height;

        while !done {
            let mut height = heights[u as usize];

            loop {
                let arcs = residual.arcs_of(u);
                if let Some(&a) = arcs.get(current[u as usize]) {
                    let v = residual.head(a);
                    if height == heights[v as usize] + 1 && residual.residual(a) > 0 {
                        path.push(a);
                        u = v;
                        break;
                    }
                }

                current[u as usize] += 1;
                if current[u as usize] < arcs.len() {
                    continue;
                }
                current[u as usize] = 0;

                counts[height as usize] -= 1;
                if counts[height as usize] == 0 {
                    // gap: the nodes above `height` are cut off from the sink
                    trace!("gap at height {height} after {relabels} relabels");
                    return Ok(flow_value);
                }

                height = relabel(residual, &heights, u);
                relabels += 1;
                if u == s && height >= max_source_height {
                    if !self.two_phase {
                        return Ok(flow_value);
                    }
                    done = true;
                    break;
                }

                counts[height as usize] += 1;
                heights[u as usize] = height;

                if u != s {
                    // the last arc on the path is not admissible anymore
                    if let Some(a) = path.pop() {
                        u = residual.tail(a);
                    }
                    break;
                }
            }

            if u == t {
                flow_value += augment_along(residual, &path)?;
                if cutoff.is_some_and(|c| flow_value >= c) {
                    return Ok(flow_value);
                }
                path.clear();
                u = s;
            }
        }

        trace!("switching to edmonds-karp after {relabels} relabels");
        Ok(flow_value + edmonds_karp_core(residual, s, t, cutoff.map(|c| c - flow_value))?)
    }
}

impl FlowAlgorithm for ShortestAugmentingPath {
    fn compute(
        &self,
        residual: &mut ResidualNetwork,
        s: Node,
        t: Node,
        cutoff: Option<Capacity>,
    ) -> Result<Capacity> {
        residual.prepare(s, t)?;
        let value = self.run(residual, s, t, cutoff)?;
        residual.set_flow_value(value);
        Ok(value)
    }
}

/// Residual distances towards `t`; nodes that cannot reach `t` get height `n`.
/// Returns `None` if `s` cannot reach `t`.
fn exact_heights(residual: &ResidualNetwork, t: Node, s: Node) -> Option<Vec<NumNodes>> {
    let n = residual.number_of_nodes();
    let heights = reverse_bfs(residual, t, n);
    (heights[s as usize] < n).then_some(heights)
}

/// Residual distances towards `src`, `unreached` for nodes that cannot reach it
pub(super) fn reverse_bfs(residual: &ResidualNetwork, src: Node, unreached: NumNodes) -> Vec<NumNodes> {
    let mut heights = vec![unreached; residual.number_of_nodes() as usize];
    let mut visited = NodeBitSet::new(residual.number_of_nodes());
    visited.set_bit(src);
    heights[src as usize] = 0;

    let mut queue = std::collections::VecDeque::from(vec![src]);
    while let Some(u) = queue.pop_front() {
        for &a in residual.arcs_of(u) {
            let v = residual.head(a);
            if residual.residual(a ^ 1) > 0 && !visited.set_bit(v) {
                heights[v as usize] = heights[u as usize] + 1;
                queue.push_back(v);
            }
        }
    }

    heights
}

/// Smallest height that makes an arc leaving `u` admissible, capped at `n`
fn relabel(residual: &ResidualNetwork, heights: &[NumNodes], u: Node) -> NumNodes {
    let n = residual.number_of_nodes();
    residual
        .arcs_of(u)
        .iter()
        .filter(|&&a| residual.residual(a) > 0)
        .map(|&a| heights[residual.head(a) as usize])
        .fold(n - 1, NumNodes::min)
        + 1
}
