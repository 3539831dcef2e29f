//! Parent/child graph derived from `nid` paths.
//!
//! The graph is rebuilt for every snapshot and never validated: a parent
//! that is not itself present in the snapshot simply contributes no edge,
//! and cycles are passed through untouched.

use crate::types::{Unit, UnitId};
use std::collections::BTreeSet;

/// Directed parent -> child graph for one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HierarchyGraph {
    nodes: BTreeSet<UnitId>,
    edges: BTreeSet<(UnitId, UnitId)>,
}

impl HierarchyGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the graph for a snapshot's units.
    pub fn from_units(units: &[Unit]) -> Self {
        let known: BTreeSet<UnitId> = units.iter().map(Unit::id).collect();
        let mut graph = Self::new();

        for unit in units {
            let id = unit.id();
            graph.add_node(id);
            if let Some(parent) = unit.parent_id() {
                if known.contains(&parent) {
                    graph.add_edge(parent, id);
                }
            }
        }

        graph
    }

    /// Adds a node. Adding an existing node is a no-op.
    pub fn add_node(&mut self, id: UnitId) {
        self.nodes.insert(id);
    }

    /// Adds a directed edge, inserting both endpoints as nodes.
    pub fn add_edge(&mut self, parent: UnitId, child: UnitId) {
        self.nodes.insert(parent);
        self.nodes.insert(child);
        self.edges.insert((parent, child));
    }

    /// Node ids in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = UnitId> + '_ {
        self.nodes.iter().copied()
    }

    /// Edges as `(parent, child)` in ascending order.
    pub fn edges(&self) -> impl Iterator<Item = (UnitId, UnitId)> + '_ {
        self.edges.iter().copied()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains_node(&self, id: UnitId) -> bool {
        self.nodes.contains(&id)
    }

    pub fn contains_edge(&self, parent: UnitId, child: UnitId) -> bool {
        self.edges.contains(&(parent, child))
    }

    /// Direct children of `id`, ascending.
    pub fn children(&self, id: UnitId) -> Vec<UnitId> {
        self.edges
            .range((id, UnitId::MIN)..=(id, UnitId::MAX))
            .map(|&(_, child)| child)
            .collect()
    }

    /// Direct parents of `id`, ascending. More than one parent only occurs
    /// when the same id appears under several paths in one snapshot.
    pub fn parents(&self, id: UnitId) -> Vec<UnitId> {
        self.edges
            .iter()
            .filter(|&&(_, child)| child == id)
            .map(|&(parent, _)| parent)
            .collect()
    }

    /// Nodes without an incoming edge, ascending.
    pub fn roots(&self) -> Vec<UnitId> {
        let with_parent: BTreeSet<UnitId> = self.edges.iter().map(|&(_, c)| c).collect();
        self.nodes
            .iter()
            .copied()
            .filter(|id| !with_parent.contains(id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position;
    use proptest::prelude::*;

    fn unit(nid: &[UnitId]) -> Unit {
        Unit::new(nid.to_vec(), Position::default()).unwrap()
    }

    #[test]
    fn test_absent_parent_omitted() {
        let units = vec![unit(&[1]), unit(&[1, 2]), unit(&[1, 3]), unit(&[9, 4])];
        let graph = HierarchyGraph::from_units(&units);

        assert_eq!(graph.nodes().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert_eq!(graph.edges().collect::<Vec<_>>(), vec![(1, 2), (1, 3)]);
        assert!(!graph.contains_node(9));
        assert!(graph.parents(4).is_empty());
        assert_eq!(graph.roots(), vec![1, 4]);
        assert_eq!(graph.children(1), vec![2, 3]);
    }

    #[test]
    fn test_empty_units() {
        let graph = HierarchyGraph::from_units(&[]);
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.roots().is_empty());
    }

    #[test]
    fn test_duplicate_ids_deduplicated() {
        let units = vec![unit(&[1]), unit(&[1, 2]), unit(&[1, 2])];
        let graph = HierarchyGraph::from_units(&units);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_cycle_passed_through() {
        // 1 claims parent 2, 2 claims parent 1
        let units = vec![unit(&[2, 1]), unit(&[1, 2])];
        let graph = HierarchyGraph::from_units(&units);
        assert!(graph.contains_edge(2, 1));
        assert!(graph.contains_edge(1, 2));
        assert!(graph.roots().is_empty());
    }

    #[test]
    fn test_only_immediate_parent_used() {
        // Grandparent 1 is present, but only 5 -> 6 is an edge candidate
        let units = vec![unit(&[1]), unit(&[1, 5, 6])];
        let graph = HierarchyGraph::from_units(&units);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.node_count(), 2);
    }

    fn arb_units() -> impl Strategy<Value = Vec<Unit>> {
        prop::collection::vec(prop::collection::vec(0u32..12, 1..4), 0..24)
            .prop_map(|paths| paths.iter().map(|p| unit(p)).collect())
    }

    proptest! {
        #[test]
        fn prop_nodes_are_unit_ids(units in arb_units()) {
            let graph = HierarchyGraph::from_units(&units);
            let ids: BTreeSet<UnitId> = units.iter().map(Unit::id).collect();
            let nodes: BTreeSet<UnitId> = graph.nodes().collect();
            prop_assert_eq!(nodes, ids);
        }

        #[test]
        fn prop_edge_iff_nid_rule(units in arb_units()) {
            let graph = HierarchyGraph::from_units(&units);
            let ids: BTreeSet<UnitId> = units.iter().map(Unit::id).collect();
            let expected: BTreeSet<(UnitId, UnitId)> = units
                .iter()
                .filter_map(|u| u.parent_id().map(|p| (p, u.id())))
                .filter(|(p, _)| ids.contains(p))
                .collect();
            let edges: BTreeSet<(UnitId, UnitId)> = graph.edges().collect();
            prop_assert_eq!(edges, expected);
        }
    }
}
