//! Batch and interactive drivers.
//!
//! Every run loads a recording, composes one figure per requested snapshot
//! and then either writes the figures as numbered PNG files or hands them
//! to the viewer. Batch runs abort on the first failing snapshot.

use crate::demos::DemoId;
use crate::figure::Figure;
use crate::style::StyleConfig;
use crate::viewer;
use std::path::{Path, PathBuf};
use swarmview_core::{Result, SimRecording, Snapshot, SnapshotSummary, VisError};
use tracing::{debug, info, warn};

/// Output file for snapshot `index` of a batch: `{prefix}.{index:02}.png`.
pub fn figure_path(prefix: &str, index: usize) -> PathBuf {
    PathBuf::from(format!("{}.{:02}.png", prefix, index))
}

/// Figure title in interactive mode, whole seconds.
pub fn interactive_title(snapshot: &Snapshot) -> String {
    format!("{}s", snapshot.whole_secs())
}

/// Figure title in batch mode, one decimal.
pub fn export_title(snapshot: &Snapshot) -> String {
    format!("simulation time: {:.1}s", snapshot.elapsed_secs())
}

/// Renders `indices` of `recording` and saves each as [`figure_path`].
///
/// Files are named by the requested snapshot index, not by position in
/// `indices`. The first failure aborts the batch; files already written
/// are left in place.
pub fn export_figures(
    recording: &SimRecording,
    indices: &[usize],
    style: &StyleConfig,
    prefix: &str,
) -> Result<Vec<Figure>> {
    info!(
        "Exporting {} snapshot(s) of {} as {}.NN.png",
        indices.len(),
        recording.path.display(),
        prefix
    );

    let mut figures = Vec::with_capacity(indices.len());
    for &index in indices {
        let snapshot = recording.get(index)?;
        debug!("snapshot {}: {} units", index, snapshot.uavs.len());

        let figure = Figure::compose(&snapshot.uavs, export_title(snapshot), style)?;
        let path = figure_path(prefix, index);
        figure.save_png(&path)?;
        info!("Wrote {}", path.display());

        figures.push(figure);
    }
    Ok(figures)
}

/// Renders snapshot `index` and shows it, blocking until the viewer closes.
///
/// Builds without the viewer save the figure as
/// `{recording path without extension}.{index:02}.png` instead.
pub fn show_snapshot(recording: &SimRecording, index: usize, style: &StyleConfig) -> Result<()> {
    let snapshot = recording.get(index)?;
    let figure = Figure::compose(&snapshot.uavs, interactive_title(snapshot), style)?;

    if !viewer::is_available() {
        let path = figure_path(&fallback_prefix(recording), index);
        figure.save_png(&path)?;
        warn!(
            "No viewer in this build (enable the `viewer` feature); saved {} instead",
            path.display()
        );
        return Ok(());
    }

    let window_title = format!("{} [{}]", recording.path.display(), index);
    viewer::show(std::slice::from_ref(&figure), &window_title)
}

/// Output prefix used when a snapshot cannot be shown: the recording path
/// without its extension.
pub fn fallback_prefix(recording: &SimRecording) -> String {
    recording.path.with_extension("").to_string_lossy().into_owned()
}

/// Shows figures that were already written to disk. Without a viewer this
/// only points at the files.
pub fn show_written(figures: &[Figure], window_title: &str) -> Result<()> {
    if viewer::is_available() {
        viewer::show(figures, window_title)
    } else {
        warn!(
            "No viewer in this build (enable the `viewer` feature); {} figure(s) are on disk only",
            figures.len()
        );
        Ok(())
    }
}

/// Runs the selected demos in order, exporting each one's snapshots with
/// the demo name as prefix, then shows every figure if `show` is set.
///
/// `style` replaces each demo's own preset when given.
pub fn run_demos(
    data_dir: &Path,
    demos: &[DemoId],
    style: Option<&StyleConfig>,
    show: bool,
) -> Result<Vec<Figure>> {
    let mut all = Vec::new();

    for demo in demos {
        info!("Demo {}: {}", demo.name(), demo.description());
        let recording = SimRecording::open(demo.recording_path(data_dir))?;
        let demo_style = style.cloned().unwrap_or_else(|| demo.style());
        all.extend(export_figures(&recording, demo.indices(), &demo_style, demo.name())?);
    }

    if show {
        show_written(&all, "swarmview demo")?;
    }
    Ok(all)
}

/// Summarizes the given snapshots, or every snapshot when `indices` is empty.
pub fn summarize(recording: &SimRecording, indices: &[usize]) -> Result<Vec<SnapshotSummary>> {
    if indices.is_empty() {
        return Ok(recording
            .snapshots
            .iter()
            .enumerate()
            .map(|(i, s)| SnapshotSummary::new(i, s))
            .collect());
    }

    indices
        .iter()
        .map(|&i| recording.get(i).map(|s| SnapshotSummary::new(i, s)))
        .collect()
}

/// Pretty-printed JSON array of `summaries`.
pub fn summary_json(summaries: &[SnapshotSummary]) -> Result<String> {
    serde_json::to_string_pretty(summaries).map_err(VisError::render)
}
