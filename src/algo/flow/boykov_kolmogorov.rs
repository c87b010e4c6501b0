/*!
# Boykov-Kolmogorov

Grows a search tree from the source and one from the sink. As soon as the trees touch, the
connecting path is augmented. Arcs saturated by the augmentation split the trees into forests
whose *orphans* are then re-attached to a valid root (adoption) or freed. Unlike the other
algorithms, the trees are not rebuilt from scratch after every augmentation.

Distances and timestamps implement the marking heuristic: a node visited in the current
adoption stage is known to have a valid root without walking up to it again.
*/

use std::collections::VecDeque;

use log::trace;

use super::*;

const NO_ARC: usize = usize::MAX;

/// Boykov-Kolmogorov maximum-flow algorithm; honors `cutoff` after every augmentation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoykovKolmogorov;

/// The final search trees of [`BoykovKolmogorov`]. Together they describe a minimum cut:
/// every node of `source` is on the source side of it and every node of `target` on the
/// sink side. Nodes in neither tree may be assigned to either side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTrees {
    pub source: Vec<Node>,
    pub target: Vec<Node>,
}

impl BoykovKolmogorov {
    /// Like [`FlowAlgorithm::compute`] but additionally returns the final search trees
    pub fn compute_with_trees(
        &self,
        residual: &mut ResidualNetwork,
        s: Node,
        t: Node,
        cutoff: Option<Capacity>,
    ) -> Result<(Capacity, SearchTrees)> {
        residual.prepare(s, t)?;

        let mut search = TreeSearch::new(residual, s, t);
        let cutoff = cutoff.unwrap_or(search.residual.inf());

        let mut flow_value = 0;
        let mut augmentations = 0usize;
        while flow_value < cutoff {
            let Some(connecting_arc) = search.grow() else {
                break;
            };
            search.time += 1;
            flow_value += search.augment(connecting_arc);
            augmentations += 1;
            search.adopt();
        }
        trace!(
            "boykov-kolmogorov: {augmentations} augmentations, {} adoptions",
            search.adoptions
        );

        search.residual.check_bounded(flow_value)?;
        let trees = search.trees();
        residual.set_flow_value(flow_value);

        Ok((flow_value, trees))
    }
}

impl FlowAlgorithm for BoykovKolmogorov {
    fn compute(
        &self,
        residual: &mut ResidualNetwork,
        s: Node,
        t: Node,
        cutoff: Option<Capacity>,
    ) -> Result<Capacity> {
        Ok(self.compute_with_trees(residual, s, t, cutoff)?.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tree {
    Free,
    Source,
    Target,
}

struct TreeSearch<'a> {
    residual: &'a mut ResidualNetwork,
    s: Node,
    t: Node,

    tree: Vec<Tree>,
    /// Source tree: arc from the parent; target tree: arc to the parent
    parent_arc: Vec<usize>,
    dist: Vec<NumNodes>,
    timestamp: Vec<usize>,
    time: usize,

    active: VecDeque<Node>,
    is_active: NodeBitSet,
    orphans: VecDeque<Node>,
    adoptions: usize,
}

impl<'a> TreeSearch<'a> {
    fn new(residual: &'a mut ResidualNetwork, s: Node, t: Node) -> Self {
        let n = residual.number_of_nodes();
        let mut search = Self {
            residual,
            s,
            t,
            tree: vec![Tree::Free; n as usize],
            parent_arc: vec![NO_ARC; n as usize],
            dist: vec![0; n as usize],
            timestamp: vec![0; n as usize],
            time: 1,
            active: VecDeque::new(),
            is_active: NodeBitSet::new(n),
            orphans: VecDeque::new(),
            adoptions: 0,
        };

        search.tree[s as usize] = Tree::Source;
        search.tree[t as usize] = Tree::Target;
        search.timestamp[s as usize] = 1;
        search.timestamp[t as usize] = 1;
        search.activate(s);
        search.activate(t);
        search
    }

    fn activate(&mut self, u: Node) {
        if !self.is_active.set_bit(u) {
            self.active.push_back(u);
        }
    }

    fn deactivate(&mut self, u: Node) {
        if self.is_active.clear_bit(u) {
            self.active.retain(|&x| x != u);
        }
    }

    /// Arc between `u` and the head `v` of `a`, oriented away from the root of `tree`
    fn tree_arc(a: usize, tree: Tree) -> usize {
        if tree == Tree::Source { a } else { a ^ 1 }
    }

    fn parent_of(&self, u: Node) -> Option<Node> {
        let a = self.parent_arc[u as usize];
        if a == NO_ARC {
            return None;
        }
        Some(match self.tree[u as usize] {
            Tree::Source => self.residual.tail(a),
            _ => self.residual.head(a),
        })
    }

    fn is_closer(&self, u: Node, v: Node) -> bool {
        self.timestamp[v as usize] <= self.timestamp[u as usize]
            && self.dist[v as usize] > self.dist[u as usize] + 1
    }

    fn attach(&mut self, v: Node, parent: Node, arc: usize) {
        self.parent_arc[v as usize] = arc;
        self.dist[v as usize] = self.dist[parent as usize] + 1;
        self.timestamp[v as usize] = self.timestamp[parent as usize];
    }

    /// Growth stage: expands active nodes until the trees touch. Returns the connecting arc,
    /// which leads from a node of the source tree to a node of the target tree.
    fn grow(&mut self) -> Option<usize> {
        while let Some(&u) = self.active.front() {
            let this = self.tree[u as usize];

            for i in 0..self.residual.arcs_of(u).len() {
                let a = self.residual.arcs_of(u)[i];
                let v = self.residual.head(a);
                let arc = Self::tree_arc(a, this);
                if self.residual.residual(arc) <= 0 {
                    continue;
                }

                let other = self.tree[v as usize];
                if other == Tree::Free {
                    self.tree[v as usize] = this;
                    self.attach(v, u, arc);
                    self.activate(v);
                } else if other != this {
                    return Some(arc);
                } else if self.is_closer(u, v) {
                    self.attach(v, u, arc);
                }
            }

            self.active.pop_front();
            self.is_active.clear_bit(u);
        }
        None
    }

    /// Augmentation stage: pushes the bottleneck capacity along the path through
    /// `connecting_arc` and turns the heads of saturated tree arcs into orphans
    fn augment(&mut self, connecting_arc: usize) -> Capacity {
        let mut path = Vec::new();
        let mut w = self.residual.tail(connecting_arc);
        while w != self.s {
            let a = self.parent_arc[w as usize];
            path.push(a);
            w = self.residual.tail(a);
        }
        path.reverse();
        path.push(connecting_arc);
        let mut w = self.residual.head(connecting_arc);
        while w != self.t {
            let a = self.parent_arc[w as usize];
            path.push(a);
            w = self.residual.head(a);
        }

        let delta = path
            .iter()
            .map(|&a| self.residual.residual(a))
            .fold(self.residual.inf(), Capacity::min);

        let mut new_orphans = Vec::new();
        for &a in &path {
            self.residual.push(a, delta);
            if self.residual.residual(a) > 0 {
                continue;
            }

            let (u, v) = (self.residual.tail(a), self.residual.head(a));
            if self.tree[v as usize] == Tree::Source {
                self.parent_arc[v as usize] = NO_ARC;
                new_orphans.push(v);
            }
            if self.tree[u as usize] == Tree::Target {
                self.parent_arc[u as usize] = NO_ARC;
                new_orphans.push(u);
            }
        }

        new_orphans.sort_by_key(|&u| self.dist[u as usize]);
        self.orphans.extend(new_orphans);
        delta
    }

    /// Returns *true* if the root of `v` is `s` or `t`, updating distances on the way
    fn has_valid_root(&mut self, v: Node) -> bool {
        let mut path = Vec::new();
        let mut x = v;
        let base = loop {
            path.push(x);
            if x == self.s || x == self.t {
                break 0;
            }
            if self.timestamp[x as usize] == self.time {
                break self.dist[x as usize];
            }
            match self.parent_of(x) {
                Some(p) => x = p,
                None => return false,
            }
        };

        let len = path.len() as NumNodes;
        for (i, &u) in path.iter().enumerate() {
            self.dist[u as usize] = base + len - 1 - i as NumNodes;
            self.timestamp[u as usize] = self.time;
        }
        true
    }

    /// Adoption stage: finds a new parent for every orphan or frees it
    fn adopt(&mut self) {
        while let Some(u) = self.orphans.pop_front() {
            self.adoptions += 1;
            let this = self.tree[u as usize];

            // (dist, neighbor, arc oriented away from the root)
            let mut candidates: Vec<(NumNodes, Node, usize)> = self
                .residual
                .arcs_of(u)
                .iter()
                .filter(|&&a| self.tree[self.residual.head(a) as usize] == this)
                .map(|&a| {
                    let v = self.residual.head(a);
                    (self.dist[v as usize], v, Self::tree_arc(a ^ 1, this))
                })
                .collect();
            candidates.sort_by_key(|&(d, _, _)| d);

            let mut adopted = false;
            for &(_, v, arc) in &candidates {
                if self.residual.residual(arc) > 0 && self.has_valid_root(v) {
                    self.parent_arc[u as usize] = arc;
                    self.dist[u as usize] = self.dist[v as usize] + 1;
                    self.timestamp[u as usize] = self.time;
                    adopted = true;
                    break;
                }
            }
            if adopted {
                continue;
            }

            for &(_, v, arc) in &candidates {
                if self.residual.residual(arc) > 0 {
                    self.activate(v);
                }
                if self.parent_of(v) == Some(u) {
                    self.parent_arc[v as usize] = NO_ARC;
                    self.orphans.push_front(v);
                }
            }
            self.deactivate(u);
            self.tree[u as usize] = Tree::Free;
        }
    }

    fn trees(&self) -> SearchTrees {
        let mut trees = SearchTrees::default();
        for (u, &tree) in self.tree.iter().enumerate() {
            match tree {
                Tree::Source => trees.source.push(u as Node),
                Tree::Target => trees.target.push(u as Node),
                Tree::Free => {}
            }
        }
        trees
    }
}
