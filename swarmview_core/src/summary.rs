//! Per-snapshot structural summary, emitted as JSON by `--summary`.

use crate::hierarchy::HierarchyGraph;
use crate::types::{Snapshot, Unit, UnitId};
use serde::Serialize;

/// Structural statistics for one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotSummary {
    /// Index of the snapshot in its recording
    pub index: usize,

    /// Elapsed simulation time in seconds
    pub time_secs: f64,

    /// Number of unit records
    pub units: usize,

    /// Distinct unit ids (hierarchy nodes)
    pub nodes: usize,

    /// Parent -> child edges in the hierarchy
    pub edges: usize,

    /// Nodes without a parent in this snapshot
    pub roots: Vec<UnitId>,

    /// Units whose recorded parent is missing from the snapshot
    pub orphans: Vec<UnitId>,

    /// Longest recorded `nid` path, counted in ancestors
    pub max_depth: usize,
}

impl SnapshotSummary {
    /// Summarizes snapshot `index`.
    pub fn new(index: usize, snapshot: &Snapshot) -> Self {
        let graph = HierarchyGraph::from_units(&snapshot.uavs);

        let mut orphans: Vec<UnitId> = snapshot
            .uavs
            .iter()
            .filter(|u| u.parent_id().is_some_and(|p| !graph.contains_node(p)))
            .map(Unit::id)
            .collect();
        orphans.sort_unstable();
        orphans.dedup();

        Self {
            index,
            time_secs: snapshot.elapsed_secs(),
            units: snapshot.uavs.len(),
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            roots: graph.roots(),
            orphans,
            max_depth: snapshot.uavs.iter().map(Unit::depth).max().unwrap_or(0),
        }
    }
}
