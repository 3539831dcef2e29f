//! Newline-delimited JSON snapshot loading.

use crate::error::{Result, VisError};
use crate::types::Snapshot;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Parses one snapshot per non-blank line of `reader`, in order.
///
/// The first line that fails to decode aborts the whole parse; its 1-based
/// line number is reported in [`VisError::Parse`].
pub fn parse_snapshots<R: BufRead>(reader: R) -> Result<Vec<Snapshot>> {
    let mut snapshots = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| VisError::io("<reader>", source))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let snapshot = serde_json::from_str::<Snapshot>(line)
            .map_err(|source| VisError::Parse { line: idx + 1, source })?;
        snapshots.push(snapshot);
    }

    Ok(snapshots)
}

/// Loads every snapshot from an NDJSON file.
pub fn load_snapshots(path: impl AsRef<Path>) -> Result<Vec<Snapshot>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| VisError::io(path, source))?;

    let snapshots = parse_snapshots(BufReader::new(file)).map_err(|e| match e {
        VisError::Io { source, .. } => VisError::io(path, source),
        other => other,
    })?;

    debug!("Loaded {} snapshots from {}", snapshots.len(), path.display());
    Ok(snapshots)
}

/// A recording loaded from disk: the source path plus its snapshots.
#[derive(Debug, Clone)]
pub struct SimRecording {
    /// File the snapshots were read from
    pub path: PathBuf,

    /// Snapshots in file order
    pub snapshots: Vec<Snapshot>,
}

impl SimRecording {
    /// Loads a recording from an NDJSON file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let snapshots = load_snapshots(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            snapshots,
        })
    }

    /// Wraps already-parsed snapshots.
    pub fn from_snapshots(path: impl Into<PathBuf>, snapshots: Vec<Snapshot>) -> Self {
        Self {
            path: path.into(),
            snapshots,
        }
    }

    /// Number of snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Returns true if the recording holds no snapshots.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Returns snapshot `index`, or [`VisError::IndexOutOfRange`].
    pub fn get(&self, index: usize) -> Result<&Snapshot> {
        self.snapshots.get(index).ok_or(VisError::IndexOutOfRange {
            index,
            len: self.snapshots.len(),
        })
    }
}
