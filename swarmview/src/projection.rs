//! Camera placement for the 3D panel.
//!
//! The panel is drawn on a plotters `Cartesian3d` chart whose vertical axis
//! carries altitude. [`Camera`] turns a [`ViewAngle`] into the chart's
//! yaw and pitch and ranks data points by depth, so far markers can be
//! painted first and shaded lighter.

use crate::style::{AxisRange, ViewAngle};
use nalgebra::{Point3, Vector3};

/// Half-diagonal of the unit cube: the largest depth any point inside the
/// limits can reach.
pub const CUBE_RADIUS: f64 = 0.866_025_403_784_438_6;

#[derive(Debug, Clone)]
pub struct Camera {
    view: ViewAngle,
    eye: Vector3<f64>,
    limits: [AxisRange; 3],
}

impl Camera {
    pub fn new(view: ViewAngle, limits: [AxisRange; 3]) -> Self {
        let elev = view.elevation.to_radians();
        let azim = view.azimuth.to_radians();
        let eye = Vector3::new(elev.cos() * azim.cos(), elev.cos() * azim.sin(), elev.sin());
        Self { view, eye, limits }
    }

    /// Unit vector pointing from the scene towards the viewer.
    pub fn eye(&self) -> Vector3<f64> {
        self.eye
    }

    /// Chart yaw in radians. Zero looks along the data y axis.
    pub fn yaw(&self) -> f64 {
        (self.view.azimuth - 90.0).to_radians()
    }

    /// Chart pitch in radians, positive looking down onto the x-y plane.
    pub fn pitch(&self) -> f64 {
        self.view.elevation.to_radians()
    }

    /// Maps a data point into the unit cube `[-0.5, 0.5]³`.
    pub fn normalize(&self, p: &Point3<f64>) -> Vector3<f64> {
        Vector3::new(
            self.limits[0].normalize(p.x),
            self.limits[1].normalize(p.y),
            self.limits[2].normalize(p.z),
        )
    }

    /// Distance towards the viewer in cube units, within `±CUBE_RADIUS`
    /// for points inside the limits.
    pub fn depth(&self, p: &Point3<f64>) -> f64 {
        self.normalize(p).dot(&self.eye)
    }

    /// Marker opacity for a point: nearest is opaque, farthest 0.3.
    pub fn shade(&self, p: &Point3<f64>) -> f64 {
        let t = (self.depth(p) + CUBE_RADIUS) / (2.0 * CUBE_RADIUS);
        (0.3 + 0.7 * t).clamp(0.3, 1.0)
    }

    pub fn limits(&self) -> &[AxisRange; 3] {
        &self.limits
    }
}
