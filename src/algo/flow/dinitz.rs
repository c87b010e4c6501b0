/*!
# Dinitz

Alternates between a BFS computing distance levels from the source and a blocking flow on
the level graph. The blocking flow is found by an iterative DFS with current-arc pointers,
so nodes that turned out to be dead ends are never scanned twice within one phase.
*/

use std::collections::VecDeque;

use super::{edmonds_karp::augment_along, *};

const UNREACHED: NumNodes = NumNodes::MAX;

/// Dinitz' blocking-flow algorithm; honors `cutoff` after every augmentation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dinitz;

impl FlowAlgorithm for Dinitz {
    fn compute(
        &self,
        residual: &mut ResidualNetwork,
        s: Node,
        t: Node,
        cutoff: Option<Capacity>,
    ) -> Result<Capacity> {
        residual.prepare(s, t)?;

        let n = residual.number_of_nodes() as usize;
        let mut level = vec![UNREACHED; n];
        let mut current = vec![0usize; n];
        let mut path: Vec<usize> = Vec::new();
        let mut flow_value = 0;

        'phases: while cutoff.is_none_or(|c| flow_value < c) {
            if !compute_levels(residual, s, t, &mut level) {
                break;
            }
            current.iter_mut().for_each(|c| *c = 0);

            // blocking flow
            path.clear();
            let mut u = s;
            loop {
                if u == t {
                    flow_value += augment_along(residual, &path)?;
                    if cutoff.is_some_and(|c| flow_value >= c) {
                        break 'phases;
                    }
                    path.clear();
                    u = s;
                    continue;
                }

                let arcs = residual.arcs_of(u);
                let admissible = loop {
                    match arcs.get(current[u as usize]) {
                        None => break None,
                        Some(&a) => {
                            let v = residual.head(a);
                            if residual.residual(a) > 0
                                && level[v as usize] == level[u as usize] + 1
                            {
                                break Some(a);
                            }
                            current[u as usize] += 1;
                        }
                    }
                };

                match admissible {
                    Some(a) => {
                        path.push(a);
                        u = residual.head(a);
                    }
                    None => {
                        // dead end: no augmenting path of this phase passes `u`
                        level[u as usize] = UNREACHED;
                        match path.pop() {
                            None => break,
                            Some(a) => {
                                u = residual.tail(a);
                                current[u as usize] += 1;
                            }
                        }
                    }
                }
            }
        }

        residual.set_flow_value(flow_value);
        Ok(flow_value)
    }
}

/// BFS levels from `s` in the residual graph. Returns *true* if `t` was reached.
fn compute_levels(residual: &ResidualNetwork, s: Node, t: Node, level: &mut [NumNodes]) -> bool {
    level.iter_mut().for_each(|l| *l = UNREACHED);
    level[s as usize] = 0;

    let mut queue = VecDeque::from(vec![s]);
    while let Some(u) = queue.pop_front() {
        if u == t {
            // nodes farther away than `t` cannot be on a shortest path
            break;
        }
        for &a in residual.arcs_of(u) {
            let v = residual.head(a);
            if residual.residual(a) > 0 && level[v as usize] == UNREACHED {
                level[v as usize] = level[u as usize] + 1;
                queue.push_back(v);
            }
        }
    }

    level[t as usize] != UNREACHED
}
