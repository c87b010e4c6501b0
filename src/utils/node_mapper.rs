/*!
# Node Mapper

Stores a partial bijection between *old* node ids (of some host graph) and *new* node ids
(of a graph derived from it, e.g. an induced subgraph). Both directions are answered in
constant time.
*/

use crate::node::*;

/// A partial bijection `old <-> new` over nodes
#[derive(Clone, Debug, Default)]
pub struct NodeMapper {
    new_ids: Vec<Node>,
    old_ids: Vec<Node>,
    len: NumNodes,
}

impl NodeMapper {
    /// Creates a mapper where the largest old node that can be inserted is `n-1`.
    pub fn with_capacity(n: NumNodes) -> Self {
        Self {
            new_ids: vec![INVALID_NODE; n as usize],
            old_ids: Vec::new(),
            len: 0,
        }
    }

    /// Stores a mapping `old <-> new`.
    /// ** Panics if `old` or `new` is already mapped **
    pub fn map_node_to(&mut self, old: Node, new: Node) {
        assert_eq!(self.new_ids[old as usize], INVALID_NODE);
        if self.old_ids.len() <= new as usize {
            self.old_ids.resize(new as usize + 1, INVALID_NODE);
        }
        assert_eq!(self.old_ids[new as usize], INVALID_NODE);

        self.new_ids[old as usize] = new;
        self.old_ids[new as usize] = old;
        self.len += 1;
    }

    /// If the mapping `(old, new)` exists, returns `Some(new)`, otherwise `None`.
    pub fn new_id_of(&self, old: Node) -> Option<Node> {
        self.new_ids
            .get(old as usize)
            .copied()
            .filter(|&x| x != INVALID_NODE)
    }

    /// If the mapping `(old, new)` exists, returns `Some(old)`, otherwise `None`.
    pub fn old_id_of(&self, new: Node) -> Option<Node> {
        self.old_ids
            .get(new as usize)
            .copied()
            .filter(|&x| x != INVALID_NODE)
    }

    /// Translates new ids back into old ids, skipping unmapped ones
    pub fn get_old_ids<'a>(
        &'a self,
        new_ids: impl IntoIterator<Item = Node> + 'a,
    ) -> impl Iterator<Item = Node> + 'a {
        new_ids.into_iter().filter_map(move |u| self.old_id_of(u))
    }

    /// Returns the number of stored mappings
    pub fn len(&self) -> NumNodes {
        self.len
    }

    /// Returns *true* if no mapping is stored
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn bijection() {
        let mut mapper = NodeMapper::with_capacity(10);
        for (new, old) in [7, 2, 9].into_iter().enumerate() {
            mapper.map_node_to(old, new as Node);
        }

        assert_eq!(mapper.len(), 3);
        assert_eq!(mapper.new_id_of(2), Some(1));
        assert_eq!(mapper.new_id_of(3), None);
        assert_eq!(mapper.new_id_of(100), None);
        assert_eq!(mapper.old_id_of(2), Some(9));
        assert_eq!(mapper.old_id_of(3), None);
        assert_eq!(mapper.get_old_ids([2, 0, 5]).collect_vec(), vec![9, 7]);
    }

    #[test]
    #[should_panic]
    fn double_mapping() {
        let mut mapper = NodeMapper::with_capacity(4);
        mapper.map_node_to(1, 0);
        mapper.map_node_to(2, 0);
    }
}
