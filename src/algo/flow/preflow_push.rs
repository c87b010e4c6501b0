/*!
# Preflow-Push

Highest-label push-relabel. Phase 1 computes a maximum *preflow*: the excess collected at the
sink is the maximum flow value and the nodes still able to reach the sink form the sink side of
a minimum cut. Phase 2 returns all remaining excess to the source, turning the preflow into a
flow; it can be skipped with [`PreflowPush::value_only`].

Two heuristics keep the number of relabels small: the *gap heuristic* lifts every node above
an empty height level out of reach, and *global relabeling* recomputes exact heights after an
amount of relabeling work proportional to `(n + m) / global_relabel_freq`.
*/

use fxhash::FxHashSet;
use log::trace;

use super::{shortest_augmenting_path::reverse_bfs, *};

const UNREACHED: NumNodes = NumNodes::MAX;

/// Highest-label preflow-push maximum-flow algorithm. It ignores `cutoff`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreflowPush {
    global_relabel_freq: f64,
    value_only: bool,
}

impl Default for PreflowPush {
    fn default() -> Self {
        Self::new()
    }
}

impl PreflowPush {
    pub const fn new() -> Self {
        Self {
            global_relabel_freq: 1.0,
            value_only: false,
        }
    }

    /// Relative frequency of global relabeling; `0` disables it. Must not be negative.
    pub fn set_global_relabel_freq(&mut self, freq: f64) {
        self.global_relabel_freq = freq;
    }

    /// Builder variant of [`PreflowPush::set_global_relabel_freq`]
    pub fn global_relabel_freq(mut self, freq: f64) -> Self {
        self.set_global_relabel_freq(freq);
        self
    }

    /// If set, only the first phase runs: the flow value and minimum cut are exact, but the
    /// arc flows only form a preflow
    pub fn set_value_only(&mut self, value_only: bool) {
        self.value_only = value_only;
    }

    /// Builder variant of [`PreflowPush::set_value_only`]
    pub fn value_only(mut self, value_only: bool) -> Self {
        self.set_value_only(value_only);
        self
    }

    pub fn is_value_only(&self) -> bool {
        self.value_only
    }
}

impl FlowAlgorithm for PreflowPush {
    fn compute(
        &self,
        residual: &mut ResidualNetwork,
        s: Node,
        t: Node,
        _cutoff: Option<Capacity>,
    ) -> Result<Capacity> {
        if self.global_relabel_freq < 0.0 {
            return Err(Error::InvalidParameter("global_relabel_freq must be nonnegative"));
        }
        residual.prepare(s, t)?;
        residual.detect_unboundedness(s, t)?;

        let value = match PushRelabel::new(residual, s, t, self.global_relabel_freq) {
            None => 0,
            Some(mut state) => {
                state.find_max_preflow();
                if !self.value_only {
                    state.convert_to_flow();
                }
                trace!(
                    "preflow-push: {} relabels, {} global relabels",
                    state.relabels, state.global_relabels
                );
                state.excess[t as usize]
            }
        };

        residual.set_flow_value(value);
        Ok(value)
    }
}

#[derive(Default, Clone)]
struct Level {
    active: FxHashSet<Node>,
    inactive: FxHashSet<Node>,
}

impl Level {
    fn is_empty(&self) -> bool {
        self.active.is_empty() && self.inactive.is_empty()
    }
}

struct PushRelabel<'a> {
    residual: &'a mut ResidualNetwork,
    s: Node,
    t: Node,
    n: NumNodes,

    heights: Vec<NumNodes>,
    excess: Vec<Capacity>,
    current: Vec<usize>,
    levels: Vec<Level>,
    max_height: NumNodes,

    work: f64,
    work_threshold: f64,
    relabels: usize,
    global_relabels: usize,
}

impl<'a> PushRelabel<'a> {
    /// Initializes heights and saturates all arcs leaving `s`.
    /// Returns `None` if `t` cannot be reached from `s`.
    fn new(residual: &'a mut ResidualNetwork, s: Node, t: Node, freq: f64) -> Option<Self> {
        let n = residual.number_of_nodes();
        let mut heights = reverse_bfs(residual, t, UNREACHED);
        if heights[s as usize] == UNREACHED {
            return None;
        }

        let max_height = heights
            .iter()
            .enumerate()
            .filter(|&(u, &h)| u != s as usize && h != UNREACHED)
            .map(|(_, &h)| h)
            .max()
            .unwrap_or(0);
        heights[s as usize] = n;
        heights
            .iter_mut()
            .filter(|h| **h == UNREACHED)
            .for_each(|h| *h = n + 1);

        let work_threshold = if freq > 0.0 {
            (n as f64 + residual.number_of_arcs() as f64) / freq
        } else {
            f64::INFINITY
        };

        let mut state = Self {
            residual,
            s,
            t,
            n,
            heights,
            excess: vec![0; n as usize],
            current: vec![0; n as usize],
            levels: vec![Level::default(); 2 * n as usize],
            max_height,
            work: 0.0,
            work_threshold,
            relabels: 0,
            global_relabels: 0,
        };

        for i in 0..state.residual.arcs_of(s).len() {
            let a = state.residual.arcs_of(s)[i];
            let c = state.residual.capacity(a);
            if c > 0 {
                state.push(s, a, c);
            }
        }

        for u in 0..n {
            if u != s && u != t {
                let level = &mut state.levels[state.heights[u as usize] as usize];
                if state.excess[u as usize] > 0 {
                    level.active.insert(u);
                } else {
                    level.inactive.insert(u);
                }
            }
        }

        Some(state)
    }

    fn push(&mut self, u: Node, a: usize, delta: Capacity) {
        let v = self.residual.head(a);
        self.residual.push(a, delta);
        self.excess[u as usize] -= delta;
        self.excess[v as usize] += delta;
    }

    /// Moves `v` from the inactive to the active set of its level
    fn activate(&mut self, v: Node) {
        if v != self.s && v != self.t {
            let level = &mut self.levels[self.heights[v as usize] as usize];
            if level.inactive.remove(&v) {
                level.active.insert(v);
            }
        }
    }

    fn relabel(&mut self, u: Node) -> NumNodes {
        self.relabels += 1;
        self.work += self.residual.arcs_of(u).len() as f64;

        let residual = &*self.residual;
        residual
            .arcs_of(u)
            .iter()
            .filter(|&&a| residual.residual(a) > 0)
            .map(|&a| self.heights[residual.head(a) as usize])
            .fold(2 * self.n - 2, NumNodes::min)
            + 1
    }

    /// Discharges the active node `u` of highest height until it becomes inactive or, in
    /// phase 1, reaches height `n - 1`. Returns the next height to examine.
    fn discharge(&mut self, u: Node, is_phase1: bool) -> NumNodes {
        let mut height = self.heights[u as usize];
        let mut next_height = height;
        self.levels[height as usize].active.remove(&u);

        loop {
            let arcs = self.residual.arcs_of(u);
            let num_arcs = arcs.len();
            if let Some(&a) = arcs.get(self.current[u as usize]) {
                let v = self.residual.head(a);
                let remaining = self.residual.residual(a);
                if height == self.heights[v as usize] + 1 && remaining > 0 {
                    self.push(u, a, self.excess[u as usize].min(remaining));
                    self.activate(v);
                    if self.excess[u as usize] == 0 {
                        self.levels[height as usize].inactive.insert(u);
                        break;
                    }
                }
            }

            self.current[u as usize] += 1;
            if self.current[u as usize] >= num_arcs {
                self.current[u as usize] = 0;
                height = self.relabel(u);
                if is_phase1 && height >= self.n - 1 {
                    // `u` is on the source side of the minimum cut; leave it until phase 2
                    self.levels[height as usize].active.insert(u);
                    break;
                }
                // the current arc was not rewound on global relabeling, so the height may
                // not have increased
                next_height = height;
            }
        }

        self.heights[u as usize] = height;
        next_height
    }

    /// Lifts all nodes with heights in `height + 1..=max_height` to `n + 1`
    fn gap_heuristic(&mut self, height: NumNodes) {
        let top = (self.n + 1) as usize;
        for h in (height + 1)..=self.max_height {
            let level = std::mem::take(&mut self.levels[h as usize]);
            for &u in level.active.iter().chain(level.inactive.iter()) {
                self.heights[u as usize] = self.n + 1;
            }
            self.levels[top].active.extend(level.active);
            self.levels[top].inactive.extend(level.inactive);
        }
    }

    /// Recomputes exact heights, towards the sink in phase 1 and towards the source
    /// (shifted by `n`) in phase 2. Returns the new maximum height.
    fn global_relabel(&mut self, from_sink: bool) -> NumNodes {
        self.global_relabels += 1;
        let n = self.n;
        let src = if from_sink { self.t } else { self.s };

        let mut new_heights = reverse_bfs(self.residual, src, UNREACHED);
        if !from_sink {
            new_heights[self.t as usize] = UNREACHED;
        }

        let mut max_height = new_heights
            .iter()
            .copied()
            .filter(|&h| h != UNREACHED)
            .max()
            .unwrap_or(0);

        if from_sink {
            for (h, &old) in new_heights.iter_mut().zip(&self.heights) {
                if *h == UNREACHED && old < n {
                    *h = n + 1;
                }
            }
        } else {
            new_heights
                .iter_mut()
                .filter(|h| **h != UNREACHED)
                .for_each(|h| *h += n);
            max_height += n;
        }
        new_heights[src as usize] = UNREACHED;

        for u in 0..n {
            let new_height = new_heights[u as usize];
            let old_height = self.heights[u as usize];
            if new_height == UNREACHED || new_height == old_height || u == self.s || u == self.t {
                continue;
            }

            if self.levels[old_height as usize].active.remove(&u) {
                self.levels[new_height as usize].active.insert(u);
            } else {
                self.levels[old_height as usize].inactive.remove(&u);
                self.levels[new_height as usize].inactive.insert(u);
            }
            self.heights[u as usize] = new_height;
        }

        self.work = 0.0;
        max_height
    }

    fn next_active(&self, height: NumNodes) -> Option<Node> {
        self.levels[height as usize].active.iter().next().copied()
    }

    /// Phase 1: push as much flow as possible towards the sink
    fn find_max_preflow(&mut self) {
        let mut height = self.max_height;
        while height > 0 {
            while let Some(u) = self.next_active(height) {
                let old_height = height;
                height = self.discharge(u, true);

                if self.work >= self.work_threshold {
                    height = self.global_relabel(true);
                    self.max_height = height;
                } else if self.levels[old_height as usize].is_empty() {
                    self.gap_heuristic(old_height);
                    height = old_height - 1;
                    self.max_height = height;
                } else {
                    self.max_height = self.max_height.max(height);
                }
            }
            height = height.saturating_sub(1);
        }
    }

    /// Phase 2: return all excess to the source
    fn convert_to_flow(&mut self) {
        let n = self.n;
        let mut height = self.global_relabel(false);

        while height > n {
            while let Some(u) = self.next_active(height) {
                height = self.discharge(u, false);
                if self.work >= self.work_threshold {
                    height = self.global_relabel(false);
                }
            }
            height -= 1;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algo::flow::test::{digraph1, topcoder};

    #[test]
    fn both_phases_and_frequencies() {
        let (graph, caps) = topcoder();
        let mut residual = ResidualNetwork::new(&graph, &caps).unwrap();

        for freq in [0.0, 0.5, 1.0, 4.0] {
            let pp = PreflowPush::new().global_relabel_freq(freq);
            assert_eq!(pp.compute(&mut residual, 0, 6, None).unwrap(), 4);
            residual.debug_assert_valid_flow(0, 6);

            let pp = pp.value_only(true);
            assert!(pp.is_value_only());
            assert_eq!(pp.compute(&mut residual, 0, 6, None).unwrap(), 4);
            assert_eq!(residual.min_cut_partition(6).1, [5, 6]);
        }
    }

    #[test]
    fn ignores_cutoff() {
        let (graph, caps) = digraph1();
        let mut residual = ResidualNetwork::new(&graph, &caps).unwrap();
        assert_eq!(PreflowPush::new().compute(&mut residual, 0, 3, Some(1)).unwrap(), 2000);
    }

    #[test]
    fn negative_frequency() {
        let (graph, caps) = digraph1();
        let mut residual = ResidualNetwork::new(&graph, &caps).unwrap();
        assert!(matches!(
            PreflowPush::new().global_relabel_freq(-1.0).compute(&mut residual, 0, 3, None),
            Err(Error::InvalidParameter(_))
        ));
    }
}
