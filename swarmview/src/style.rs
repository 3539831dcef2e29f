//! Figure styling.
//!
//! Every tunable of the figure pipeline lives here, with defaults matching
//! the `line` preset. Partial TOML files overlay the defaults:
//!
//! ```toml
//! [tree]
//! layout = "twopi"
//! node_size = 100.0
//!
//! [spatial]
//! show_labels = false
//! bounds = [[0.0, 25.0], [0.0, 25.0], [0.0, 25.0]]
//! ticks = [[0, 10, 20], [0, 10, 20], [0, 10, 20]]
//!
//! [spatial.view]
//! elevation = 15.0
//! azimuth = 5.0
//! ```
//!
//! Sizes follow plotting conventions: marker sizes are areas in points²,
//! font sizes are points, and `figure.dpi` converts both to pixels.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use swarmview_core::{LayoutStrategy, Result, VisError};

/// Styling of the hierarchy panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeStyle {
    /// Layout algorithm for node placement
    pub layout: LayoutStrategy,

    /// Node marker area in points²
    pub node_size: f64,

    /// Node label font size in points
    pub font_size: f64,
}

impl Default for TreeStyle {
    fn default() -> Self {
        Self {
            layout: LayoutStrategy::Dot,
            node_size: 300.0,
            font_size: 12.0,
        }
    }
}

/// Inclusive `(min, max)` range of one axis, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Midpoint of the range.
    pub fn center(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Maps `v` to `[-0.5, 0.5]` across the range.
    pub fn normalize(&self, v: f64) -> f64 {
        (v - self.min) / self.span() - 0.5
    }
}

impl From<(f64, f64)> for AxisRange {
    fn from((min, max): (f64, f64)) -> Self {
        Self { min, max }
    }
}

impl From<AxisRange> for (f64, f64) {
    fn from(range: AxisRange) -> Self {
        (range.min, range.max)
    }
}

/// Camera direction for the 3D panel, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewAngle {
    /// Angle above the x-y plane
    pub elevation: f64,

    /// Rotation about the z axis, measured from +x towards +y
    pub azimuth: f64,
}

impl Default for ViewAngle {
    fn default() -> Self {
        Self {
            elevation: 30.0,
            azimuth: 45.0,
        }
    }
}

/// Styling of the 3D position panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpatialStyle {
    /// Scatter marker area in points²
    pub marker_size: f64,

    /// Annotate each marker with its unit id
    pub show_labels: bool,

    /// Annotation font size in points
    pub font_size: f64,

    /// Camera direction
    pub view: ViewAngle,

    /// x, y, z axis limits
    pub bounds: [AxisRange; 3],

    /// x, y, z tick positions
    pub ticks: [Vec<f64>; 3],
}

impl Default for SpatialStyle {
    fn default() -> Self {
        Self {
            marker_size: 15.0,
            show_labels: true,
            font_size: 10.0,
            view: ViewAngle::default(),
            bounds: [AxisRange::new(0.0, 20.0); 3],
            ticks: [
                vec![0.0, 5.0, 10.0, 15.0],
                vec![0.0, 5.0, 10.0, 15.0],
                vec![0.0, 5.0, 10.0, 15.0, 20.0],
            ],
        }
    }
}

/// Canvas size and text settings shared by both panels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureStyle {
    pub width_px: u32,
    pub height_px: u32,

    /// Pixels per inch, used to convert point sizes
    pub dpi: f64,

    /// Figure title font size in points
    pub title_font_size: f64,

    /// Panel title font size in points
    pub panel_title_font_size: f64,

    /// TTF/OTF file for all text; the bundled DejaVu Sans when unset
    pub font: Option<PathBuf>,
}

impl Default for FigureStyle {
    fn default() -> Self {
        Self {
            width_px: 960,
            height_px: 480,
            dpi: 100.0,
            title_font_size: 15.0,
            panel_title_font_size: 12.0,
            font: None,
        }
    }
}

impl FigureStyle {
    /// Converts a length in points to pixels.
    pub fn points_to_px(&self, points: f64) -> f64 {
        points * self.dpi / 72.0
    }

    /// Radius in pixels of a round marker with the given area in points².
    pub fn marker_radius_px(&self, area_pt2: f64) -> f64 {
        self.points_to_px(area_pt2.max(0.0).sqrt() / 2.0)
    }
}

/// Complete style bundle for one figure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub tree: TreeStyle,
    pub spatial: SpatialStyle,
    pub figure: FigureStyle,
}

impl StyleConfig {
    /// Style used for the `lttr` recordings: radial tree, small markers,
    /// no position labels, low camera.
    pub fn lttr() -> Self {
        Self {
            tree: TreeStyle {
                layout: LayoutStrategy::Twopi,
                node_size: 100.0,
                font_size: 8.0,
            },
            spatial: SpatialStyle {
                marker_size: 12.0,
                show_labels: false,
                font_size: 8.0,
                view: ViewAngle {
                    elevation: 15.0,
                    azimuth: 5.0,
                },
                bounds: [AxisRange::new(0.0, 25.0); 3],
                ticks: [
                    vec![0.0, 10.0, 20.0],
                    vec![0.0, 10.0, 20.0],
                    vec![0.0, 10.0, 20.0],
                ],
            },
            figure: FigureStyle::default(),
        }
    }

    /// Parses a style from TOML and validates it.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let style: StyleConfig = toml::from_str(text)
            .map_err(|e| VisError::config(format!("invalid style file: {}", e)))?;
        style.validate()?;
        Ok(style)
    }

    /// Loads and validates a style file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| VisError::io(path, source))?;
        Self::from_toml_str(&text)
    }

    /// Checks every field for values the renderers cannot draw.
    pub fn validate(&self) -> Result<()> {
        positive("tree.node_size", self.tree.node_size)?;
        positive("tree.font_size", self.tree.font_size)?;
        positive("spatial.marker_size", self.spatial.marker_size)?;
        positive("spatial.font_size", self.spatial.font_size)?;
        positive("figure.dpi", self.figure.dpi)?;
        positive("figure.title_font_size", self.figure.title_font_size)?;
        positive("figure.panel_title_font_size", self.figure.panel_title_font_size)?;

        let view = self.spatial.view;
        if !view.elevation.is_finite() || !view.azimuth.is_finite() {
            return Err(VisError::config("spatial.view angles must be finite"));
        }

        for (axis, (range, ticks)) in ["x", "y", "z"]
            .iter()
            .zip(self.spatial.bounds.iter().zip(self.spatial.ticks.iter()))
        {
            if !(range.min.is_finite() && range.max.is_finite() && range.min < range.max) {
                return Err(VisError::config(format!(
                    "spatial.bounds for {} must satisfy min < max, got ({}, {})",
                    axis, range.min, range.max
                )));
            }
            if ticks.iter().any(|t| !t.is_finite()) {
                return Err(VisError::config(format!("spatial.ticks for {} must be finite", axis)));
            }
        }

        if self.figure.width_px < 64 || self.figure.height_px < 64 {
            return Err(VisError::config(format!(
                "figure size {}x{} is too small",
                self.figure.width_px, self.figure.height_px
            )));
        }

        Ok(())
    }
}

fn positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(VisError::config(format!("{} must be positive, got {}", name, value)))
    }
}

/// Built-in style presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StylePreset {
    /// Layered tree, labelled positions
    Line,

    /// Radial tree, unlabelled positions
    Lttr,
}

impl StylePreset {
    pub fn name(&self) -> &'static str {
        match self {
            StylePreset::Line => "line",
            StylePreset::Lttr => "lttr",
        }
    }

    pub fn style(&self) -> StyleConfig {
        match self {
            StylePreset::Line => StyleConfig::default(),
            StylePreset::Lttr => StyleConfig::lttr(),
        }
    }
}

impl std::str::FromStr for StylePreset {
    type Err = VisError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "line" | "default" => Ok(StylePreset::Line),
            "lttr" => Ok(StylePreset::Lttr),
            _ => Err(VisError::config(format!("Unknown style preset: {}", s))),
        }
    }
}
