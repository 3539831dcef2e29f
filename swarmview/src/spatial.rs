//! 3D position panel renderer.

use crate::axes::Axes3d;
use crate::style::SpatialStyle;
use nalgebra::Point3;
use swarmview_core::Unit;

/// Panel title of the position scatter.
pub const SPATIAL_TITLE: &str = "UAV positions";

/// Draws one marker per unit at its position, optionally annotated with the
/// unit id, and applies the style's limits, ticks and camera angle.
pub fn draw_positions(units: &[Unit], ax: &mut Axes3d, style: &SpatialStyle) {
    ax.scatter(
        units.iter().map(|u| Point3::new(u.p.x, u.p.y, u.p.z)),
        style.marker_size,
    );

    if style.show_labels {
        for unit in units {
            ax.text(
                Point3::new(unit.p.x, unit.p.y, unit.p.z),
                unit.id().to_string(),
                style.font_size,
            );
        }
    }

    ax.set_axis_labels("x(m)", "y(m)", "z(m)");
    ax.set_limits(style.bounds);
    ax.set_ticks(style.ticks.clone());
    ax.view_init(style.view);
    ax.set_title(SPATIAL_TITLE);
}
