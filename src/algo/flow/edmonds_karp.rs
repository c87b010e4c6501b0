/*!
# Edmonds-Karp

Repeatedly augments along a shortest residual path. Paths are found by a bidirectional BFS
that always expands the smaller of the two frontiers, which pays off on graphs with a few
nodes of very high degree.
*/

use log::trace;

use super::*;

const NO_ARC: usize = usize::MAX;

/// Edmonds-Karp maximum-flow algorithm; honors `cutoff` after every augmentation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdmondsKarp;

impl FlowAlgorithm for EdmondsKarp {
    fn compute(
        &self,
        residual: &mut ResidualNetwork,
        s: Node,
        t: Node,
        cutoff: Option<Capacity>,
    ) -> Result<Capacity> {
        residual.prepare(s, t)?;
        let value = edmonds_karp_core(residual, s, t, cutoff)?;
        residual.set_flow_value(value);
        Ok(value)
    }
}

/// Augments the current flow of `residual` along shortest paths until none is left or the
/// additional flow reaches `cutoff`. Returns the additional flow.
pub(super) fn edmonds_karp_core(
    residual: &mut ResidualNetwork,
    s: Node,
    t: Node,
    cutoff: Option<Capacity>,
) -> Result<Capacity> {
    let mut search = BidirectionalSearch::new(residual.number_of_nodes());
    let mut path = Vec::new();
    let mut flow_value = 0;

    while cutoff.is_none_or(|c| flow_value < c) {
        let Some(meet) = search.run(residual, s, t) else {
            break;
        };

        path.clear();
        let mut u = meet;
        while u != s {
            let a = search.pred[u as usize];
            path.push(a);
            u = residual.tail(a);
        }
        path.reverse();

        let mut u = meet;
        while u != t {
            let a = search.succ[u as usize];
            path.push(a);
            u = residual.head(a);
        }

        flow_value += augment_along(residual, &path)?;
    }

    Ok(flow_value)
}

/// Sends the bottleneck capacity along the arcs of `path` and returns it.
/// Fails with [`Error::Unbounded`] if the path has infinite capacity.
pub(super) fn augment_along(residual: &mut ResidualNetwork, path: &[usize]) -> Result<Capacity> {
    let delta = path
        .iter()
        .map(|&a| residual.residual(a))
        .fold(residual.inf(), Capacity::min);
    residual.check_bounded(delta)?;

    for &a in path {
        residual.push(a, delta);
    }
    trace!("augmented {delta} along {} arcs", path.len());

    Ok(delta)
}

struct BidirectionalSearch {
    pred: Vec<usize>,
    succ: Vec<usize>,
    from_source: NodeBitSet,
    to_sink: NodeBitSet,
}

impl BidirectionalSearch {
    fn new(n: NumNodes) -> Self {
        Self {
            pred: vec![NO_ARC; n as usize],
            succ: vec![NO_ARC; n as usize],
            from_source: NodeBitSet::new(n),
            to_sink: NodeBitSet::new(n),
        }
    }

    /// Returns a node on a shortest residual `s`-`t` path. Following `pred` from it leads
    /// back to `s`, following `succ` leads to `t`.
    fn run(&mut self, residual: &ResidualNetwork, s: Node, t: Node) -> Option<Node> {
        self.from_source.clear_all();
        self.to_sink.clear_all();
        self.from_source.set_bit(s);
        self.to_sink.set_bit(t);

        let mut source_queue = vec![s];
        let mut sink_queue = vec![t];

        loop {
            let mut next = Vec::new();
            if source_queue.len() <= sink_queue.len() {
                for &u in &source_queue {
                    for &a in residual.arcs_of(u) {
                        let v = residual.head(a);
                        if residual.residual(a) > 0 && !self.from_source.set_bit(v) {
                            self.pred[v as usize] = a;
                            if self.to_sink.get_bit(v) {
                                return Some(v);
                            }
                            next.push(v);
                        }
                    }
                }
                if next.is_empty() {
                    return None;
                }
                source_queue = next;
            } else {
                for &u in &sink_queue {
                    for &a in residual.arcs_of(u) {
                        // the reverse of an arc leaving `u` enters `u`
                        let v = residual.head(a);
                        if residual.residual(a ^ 1) > 0 && !self.to_sink.set_bit(v) {
                            self.succ[v as usize] = a ^ 1;
                            if self.from_source.get_bit(v) {
                                return Some(v);
                            }
                            next.push(v);
                        }
                    }
                }
                if next.is_empty() {
                    return None;
                }
                sink_queue = next;
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algo::flow::test::{digraph1, topcoder};

    #[test]
    fn known_values() {
        let (graph, caps) = topcoder();
        let mut residual = ResidualNetwork::new(&graph, &caps).unwrap();
        assert_eq!(EdmondsKarp.compute(&mut residual, 0, 6, None).unwrap(), 4);
        assert_eq!(residual.flow_value(), 4);

        let (graph, caps) = digraph1();
        let mut residual = ResidualNetwork::new(&graph, &caps).unwrap();
        assert_eq!(EdmondsKarp.compute(&mut residual, 0, 3, None).unwrap(), 2000);
        assert_eq!(EdmondsKarp.compute(&mut residual, 0, 3, Some(1000)).unwrap(), 1000);
    }

    #[test]
    fn core_continues_existing_flow() {
        let graph = AdjArrayIn::from_edges(4, [(0, 1), (0, 2), (1, 3), (2, 3)]);
        let mut residual = ResidualNetwork::with_unit_capacities(&graph).unwrap();
        residual.prepare(0, 3).unwrap();

        assert_eq!(edmonds_karp_core(&mut residual, 0, 3, Some(1)).unwrap(), 1);
        assert_eq!(edmonds_karp_core(&mut residual, 0, 3, None).unwrap(), 1);
        assert_eq!(edmonds_karp_core(&mut residual, 0, 3, None).unwrap(), 0);
    }
}
