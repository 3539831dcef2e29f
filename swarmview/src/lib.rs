//! SwarmView figure pipeline.
//!
//! Turns recorded swarm snapshots into dual-panel figures: the unit
//! hierarchy as a tree diagram on the left and unit positions as a 3D
//! scatter on the right.
//!
//! # Pipeline
//!
//! ```text
//! NDJSON ──► SimRecording ──► Snapshot ──┬─► draw_tree ──────► Axes2d ──┐
//!                                        └─► draw_positions ─► Axes3d ──┴─► Figure ──► PNG / viewer
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use swarmview::{export_figures, StyleConfig};
//! use swarmview_core::SimRecording;
//!
//! let recording = SimRecording::open("data/050ms-0.10m/out-line-20240828-215415")?;
//! export_figures(&recording, &[1, 5, 6], &StyleConfig::default(), "line")?;
//! ```

pub mod axes;
pub mod demos;
pub mod driver;
pub mod figure;
pub mod font;
pub mod projection;
pub mod spatial;
pub mod style;
pub mod tree;
pub mod viewer;

pub use axes::{Axes2d, Axes3d, Mark2d};
pub use demos::DemoId;
pub use driver::{export_figures, figure_path, run_demos, show_snapshot, summarize};
pub use figure::Figure;
pub use spatial::draw_positions;
pub use style::{AxisRange, FigureStyle, SpatialStyle, StyleConfig, StylePreset, TreeStyle, ViewAngle};
pub use tree::draw_tree;
