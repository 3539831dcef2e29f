//! SwarmView core: snapshot model and hierarchy layout
//!
//! This crate holds everything about a swarm recording that does not
//! involve pixels:
//! - **Snapshots**: NDJSON records of unit positions and `nid` paths
//! - **Hierarchy**: the parent -> child graph implied by the `nid` paths
//! - **Layout**: 2D node placement for that graph (`dot`, `twopi`, `circo`)
//!
//! # Example
//!
//! ```ignore
//! use swarmview_core::{SimRecording, HierarchyGraph, compute_layout, LayoutStrategy};
//!
//! let recording = SimRecording::open("data/out-line")?;
//! let snapshot = recording.get(5)?;
//! let graph = HierarchyGraph::from_units(&snapshot.uavs);
//! let layout = compute_layout(&graph, LayoutStrategy::Dot);
//! ```

mod error;
mod types;
pub mod hierarchy;
pub mod layout;
pub mod loader;
pub mod summary;

pub use error::{Result, VisError};
pub use types::{Position, Snapshot, Unit, UnitId};
pub use hierarchy::HierarchyGraph;
pub use layout::{compute_layout, Layout, LayoutStrategy};
pub use loader::{load_snapshots, parse_snapshots, SimRecording};
pub use summary::SnapshotSummary;
