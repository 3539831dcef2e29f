//! Snapshot records as written by the swarm simulator.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Identifier of a single UAV, unique within one snapshot.
pub type UnitId = u32;

/// Position in the simulation frame, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    /// Creates a position from its three coordinates.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns the coordinates as `[x, y, z]`.
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// Wire shape of a unit before the `nid` path is checked.
#[derive(Deserialize)]
struct RawUnit {
    nid: Vec<UnitId>,
    p: Position,
}

impl TryFrom<RawUnit> for Unit {
    type Error = &'static str;

    fn try_from(raw: RawUnit) -> Result<Self, Self::Error> {
        Unit::new(raw.nid, raw.p).ok_or("nid must contain at least one identifier")
    }
}

/// One UAV observed in a snapshot.
///
/// The `nid` path lists identifiers from the swarm root down to this unit:
/// the last element is the unit's own id, the element before it is its
/// parent. A unit whose path has a single element is a root.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawUnit")]
pub struct Unit {
    nid: Vec<UnitId>,

    /// Position of the unit
    pub p: Position,
}

impl Unit {
    /// Creates a unit, returning `None` for an empty `nid` path.
    pub fn new(nid: Vec<UnitId>, p: Position) -> Option<Self> {
        if nid.is_empty() {
            None
        } else {
            Some(Self { nid, p })
        }
    }

    /// Full root-to-self identifier path.
    pub fn nid(&self) -> &[UnitId] {
        &self.nid
    }

    /// The unit's own identifier.
    pub fn id(&self) -> UnitId {
        // nid is non-empty by construction
        self.nid[self.nid.len() - 1]
    }

    /// Identifier of the parent, if this unit is not a root.
    pub fn parent_id(&self) -> Option<UnitId> {
        self.nid.len().checked_sub(2).map(|i| self.nid[i])
    }

    /// Identifier of the swarm root this unit belongs to.
    pub fn root_id(&self) -> UnitId {
        self.nid[0]
    }

    /// Returns true if the unit heads its own swarm.
    pub fn is_root(&self) -> bool {
        self.nid.len() == 1
    }

    /// Number of ancestors above this unit.
    pub fn depth(&self) -> usize {
        self.nid.len() - 1
    }
}

/// One time-sampled observation of every unit.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Snapshot {
    /// Simulated time since start, encoded as `{ "secs", "nanos" }`
    pub running_duration: Duration,

    /// Units in recording order
    pub uavs: Vec<Unit>,
}

impl Snapshot {
    /// Elapsed simulation time in fractional seconds.
    pub fn elapsed_secs(&self) -> f64 {
        self.running_duration.as_secs_f64()
    }

    /// Elapsed simulation time truncated to whole seconds.
    pub fn whole_secs(&self) -> u64 {
        self.running_duration.as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_path_queries() {
        let unit = Unit::new(vec![7, 3, 9], Position::new(1.0, 2.0, 3.0)).unwrap();
        assert_eq!(unit.id(), 9);
        assert_eq!(unit.parent_id(), Some(3));
        assert_eq!(unit.root_id(), 7);
        assert_eq!(unit.depth(), 2);
        assert!(!unit.is_root());

        let root = Unit::new(vec![7], Position::default()).unwrap();
        assert!(root.is_root());
        assert_eq!(root.parent_id(), None);
        assert_eq!(root.root_id(), 7);
    }

    #[test]
    fn test_empty_nid_rejected() {
        assert!(Unit::new(vec![], Position::default()).is_none());

        let json = r#"{"nid": [], "p": {"x": 0.0, "y": 0.0, "z": 0.0}}"#;
        assert!(serde_json::from_str::<Unit>(json).is_err());
    }

    #[test]
    fn test_snapshot_decode() {
        let json = r#"{
            "running_duration": {"secs": 12, "nanos": 500000000},
            "uavs": [
                {"nid": [1], "p": {"x": 0.5, "y": 1.5, "z": 2.5}, "v": {"vx": 0.0}},
                {"nid": [1, 2], "p": {"x": 3.0, "y": 4.0, "z": 5.0}}
            ]
        }"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.uavs.len(), 2);
        assert_eq!(snapshot.whole_secs(), 12);
        assert!((snapshot.elapsed_secs() - 12.5).abs() < 1e-9);
        assert_eq!(snapshot.uavs[1].id(), 2);
        assert_eq!(snapshot.uavs[0].p, Position::new(0.5, 1.5, 2.5));
    }
}
