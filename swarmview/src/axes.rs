//! Drawing surfaces for the two figure panels.
//!
//! Renderers draw into an axes object the way they would into a plotting
//! library's axes: they add marks and set titles, limits and camera angles.
//! Nothing is rasterized until the owning [`crate::figure::Figure`] paints,
//! so tests can inspect exactly what a renderer produced.

use crate::style::{AxisRange, ViewAngle};
use nalgebra::Point3;

/// Something drawn on the 2D panel, in layout coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Mark2d {
    /// Round node marker; `size` is its area in points²
    Node { at: (f64, f64), size: f64 },

    /// Arrowed line; the head stops at the rim of a node of area
    /// `target_size` centered on `to`
    Arrow {
        from: (f64, f64),
        to: (f64, f64),
        target_size: f64,
    },

    /// Text centered on `at`
    Label {
        at: (f64, f64),
        text: String,
        font_size: f64,
    },
}

/// 2D panel surface.
#[derive(Debug, Clone, Default)]
pub struct Axes2d {
    title: Option<String>,
    marks: Vec<Mark2d>,
}

impl Axes2d {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn node(&mut self, at: (f64, f64), size: f64) {
        self.marks.push(Mark2d::Node { at, size });
    }

    pub fn arrow(&mut self, from: (f64, f64), to: (f64, f64), target_size: f64) {
        self.marks.push(Mark2d::Arrow {
            from,
            to,
            target_size,
        });
    }

    pub fn label(&mut self, at: (f64, f64), text: impl Into<String>, font_size: f64) {
        self.marks.push(Mark2d::Label {
            at,
            text: text.into(),
            font_size,
        });
    }

    /// All marks in drawing order.
    pub fn marks(&self) -> &[Mark2d] {
        &self.marks
    }

    pub fn node_count(&self) -> usize {
        self.marks
            .iter()
            .filter(|m| matches!(m, Mark2d::Node { .. }))
            .count()
    }

    pub fn arrow_count(&self) -> usize {
        self.marks
            .iter()
            .filter(|m| matches!(m, Mark2d::Arrow { .. }))
            .count()
    }

    /// Text of every label, in drawing order.
    pub fn label_texts(&self) -> Vec<&str> {
        self.marks
            .iter()
            .filter_map(|m| match m {
                Mark2d::Label { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Bounding box of every anchor point, `((x_min, x_max), (y_min, y_max))`.
    pub fn data_bounds(&self) -> Option<((f64, f64), (f64, f64))> {
        let mut points = self.marks.iter().flat_map(|m| match m {
            Mark2d::Node { at, .. } | Mark2d::Label { at, .. } => vec![*at],
            Mark2d::Arrow { from, to, .. } => vec![*from, *to],
        });
        let (x0, y0) = points.next()?;
        Some(points.fold(((x0, x0), (y0, y0)), |((xl, xh), (yl, yh)), (x, y)| {
            ((xl.min(x), xh.max(x)), (yl.min(y), yh.max(y)))
        }))
    }
}

/// Scatter marker on the 3D panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker3d {
    pub at: Point3<f64>,
    /// Area in points²
    pub size: f64,
}

/// Text annotation on the 3D panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Text3d {
    pub at: Point3<f64>,
    pub text: String,
    pub font_size: f64,
}

/// 3D panel surface.
#[derive(Debug, Clone)]
pub struct Axes3d {
    title: Option<String>,
    axis_labels: [String; 3],
    limits: Option<[AxisRange; 3]>,
    ticks: Option<[Vec<f64>; 3]>,
    view: ViewAngle,
    markers: Vec<Marker3d>,
    texts: Vec<Text3d>,
}

impl Default for Axes3d {
    fn default() -> Self {
        Self {
            title: None,
            axis_labels: [String::new(), String::new(), String::new()],
            limits: None,
            ticks: None,
            view: ViewAngle::default(),
            markers: Vec::new(),
            texts: Vec::new(),
        }
    }
}

impl Axes3d {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Sets the x, y and z axis labels.
    pub fn set_axis_labels(&mut self, x: &str, y: &str, z: &str) {
        self.axis_labels = [x.to_string(), y.to_string(), z.to_string()];
    }

    pub fn axis_labels(&self) -> [&str; 3] {
        [
            self.axis_labels[0].as_str(),
            self.axis_labels[1].as_str(),
            self.axis_labels[2].as_str(),
        ]
    }

    pub fn set_limits(&mut self, limits: [AxisRange; 3]) {
        self.limits = Some(limits);
    }

    pub fn set_ticks(&mut self, ticks: [Vec<f64>; 3]) {
        self.ticks = Some(ticks);
    }

    pub fn view_init(&mut self, view: ViewAngle) {
        self.view = view;
    }

    pub fn view(&self) -> ViewAngle {
        self.view
    }

    /// Adds one marker per point.
    pub fn scatter<I>(&mut self, points: I, size: f64)
    where
        I: IntoIterator<Item = Point3<f64>>,
    {
        self.markers
            .extend(points.into_iter().map(|at| Marker3d { at, size }));
    }

    pub fn text(&mut self, at: Point3<f64>, text: impl Into<String>, font_size: f64) {
        self.texts.push(Text3d {
            at,
            text: text.into(),
            font_size,
        });
    }

    pub fn markers(&self) -> &[Marker3d] {
        &self.markers
    }

    pub fn texts(&self) -> &[Text3d] {
        &self.texts
    }

    /// Axis limits: the configured ones, or the data extent padded by 5%
    /// (unit range around a single value) when none were set. Either way
    /// each axis is widened to cover all of its configured ticks.
    pub fn limits(&self) -> [AxisRange; 3] {
        let mut limits = self.limits.unwrap_or_else(|| self.data_limits());

        if let Some(ticks) = &self.ticks {
            for (limit, axis_ticks) in limits.iter_mut().zip(ticks) {
                for &t in axis_ticks {
                    limit.min = limit.min.min(t);
                    limit.max = limit.max.max(t);
                }
            }
        }
        limits
    }

    fn data_limits(&self) -> [AxisRange; 3] {
        let mut limits = [AxisRange::new(0.0, 1.0); 3];
        let points: Vec<&Point3<f64>> = self
            .markers
            .iter()
            .map(|m| &m.at)
            .chain(self.texts.iter().map(|t| &t.at))
            .collect();
        if points.is_empty() {
            return limits;
        }

        for (axis, limit) in limits.iter_mut().enumerate() {
            let lo = points.iter().map(|p| p[axis]).fold(f64::INFINITY, f64::min);
            let hi = points.iter().map(|p| p[axis]).fold(f64::NEG_INFINITY, f64::max);
            let pad = if hi > lo { (hi - lo) * 0.05 } else { 0.5 };
            *limit = AxisRange::new(lo - pad, hi + pad);
        }
        limits
    }

    /// Tick positions: the configured ones, or five evenly spaced values
    /// across the limits when none were set.
    pub fn ticks(&self) -> [Vec<f64>; 3] {
        match &self.ticks {
            Some(ticks) => ticks.clone(),
            None => self.limits().map(|range| {
                (0..5)
                    .map(|i| range.min + range.span() * i as f64 / 4.0)
                    .collect()
            }),
        }
    }
}
