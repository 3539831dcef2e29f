//! Dual-panel figure: hierarchy on the left, 3D positions on the right.
//!
//! A figure is composed from a unit list, drawn into its two axes by the
//! panel renderers, then rasterized with plotters into an RGB buffer. The
//! same buffer is written as PNG and handed to the interactive viewer.

use crate::axes::{Axes2d, Axes3d, Mark2d};
use crate::font::{self, FONT_FAMILY};
use crate::projection::Camera;
use crate::spatial::draw_positions;
use crate::style::{AxisRange, FigureStyle, StyleConfig};
use crate::tree::draw_tree;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use swarmview_core::{Result, Unit, VisError};

type Panel<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

const NODE_COLOR: RGBColor = RGBColor(31, 119, 180);
const PANE_COLOR: RGBColor = RGBColor(242, 242, 242);
const GRID_COLOR: RGBColor = RGBColor(210, 210, 210);

/// A rendered figure.
#[derive(Debug, Clone)]
pub struct Figure {
    title: String,
    tree: Axes2d,
    spatial: Axes3d,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Figure {
    /// Draws both panels for `units` and rasterizes the result.
    pub fn compose(units: &[Unit], title: impl Into<String>, style: &StyleConfig) -> Result<Self> {
        let mut tree = Axes2d::new();
        draw_tree(units, &mut tree, &style.tree);

        let mut spatial = Axes3d::new();
        draw_positions(units, &mut spatial, &style.spatial);

        Self::from_axes(title, tree, spatial, &style.figure)
    }

    /// Rasterizes already-drawn axes.
    pub fn from_axes(
        title: impl Into<String>,
        tree: Axes2d,
        spatial: Axes3d,
        style: &FigureStyle,
    ) -> Result<Self> {
        let title = title.into();
        font::ensure_font(style.font.as_deref())?;

        let pixels = paint(&title, &tree, &spatial, style)?;
        Ok(Self {
            title,
            tree,
            spatial,
            width: style.width_px,
            height: style.height_px,
            pixels,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The hierarchy panel.
    pub fn tree(&self) -> &Axes2d {
        &self.tree
    }

    /// The position panel.
    pub fn spatial(&self) -> &Axes3d {
        &self.spatial
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major RGB8 pixels.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Encodes the figure as a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        image::save_buffer_with_format(
            path,
            &self.pixels,
            self.width,
            self.height,
            image::ColorType::Rgb8,
            image::ImageFormat::Png,
        )
        .map_err(|e| match e {
            image::ImageError::IoError(source) => VisError::io(path, source),
            other => VisError::Render(format!("failed to encode {}: {}", path.display(), other)),
        })
    }
}

fn paint(title: &str, tree: &Axes2d, spatial: &Axes3d, style: &FigureStyle) -> Result<Vec<u8>> {
    let (w, h) = (style.width_px, style.height_px);
    let mut pixels = vec![0u8; w as usize * h as usize * 3];

    {
        let root = BitMapBackend::with_buffer(&mut pixels, (w, h)).into_drawing_area();
        root.fill(&WHITE).map_err(VisError::render)?;

        let text = TextPainter::new(style);
        let title_h = (style.points_to_px(style.title_font_size) * 2.0).ceil() as u32;
        let (title_area, body) = root.split_vertically(title_h);
        text.draw(
            &title_area,
            title,
            ((w / 2) as i32, (title_h / 2) as i32),
            style.title_font_size,
            centered(),
        )?;

        let (left, right) = body.split_horizontally(w / 2);
        paint_tree(&left, tree, style, &text)?;
        paint_spatial(&right, spatial, style, &text)?;

        root.present().map_err(VisError::render)?;
    }

    Ok(pixels)
}

/// Draws text in [`FONT_FAMILY`] with point sizes scaled to the figure dpi.
struct TextPainter {
    dpi: f64,
}

impl TextPainter {
    fn new(style: &FigureStyle) -> Self {
        Self { dpi: style.dpi }
    }

    fn font(&self, points: f64) -> FontDesc<'static> {
        (FONT_FAMILY, points * self.dpi / 72.0).into_font()
    }

    fn style(&self, points: f64, anchor: Pos) -> TextStyle<'static> {
        TextStyle::from(self.font(points)).color(&BLACK).pos(anchor)
    }

    fn draw(&self, area: &Panel<'_>, text: &str, at: (i32, i32), points: f64, anchor: Pos) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        area.draw(&Text::new(text.to_string(), at, self.style(points, anchor)))
            .map_err(VisError::render)
    }
}

/// Splits a panel title strip off the top of `area`.
fn titled<'a>(
    area: &Panel<'a>,
    title: Option<&str>,
    style: &FigureStyle,
    text: &TextPainter,
) -> Result<Panel<'a>> {
    let strip = (style.points_to_px(style.panel_title_font_size) * 2.0).ceil() as u32;
    let (head, rest) = area.split_vertically(strip);
    if let Some(title) = title {
        let (w, _) = head.dim_in_pixel();
        text.draw(
            &head,
            title,
            ((w / 2) as i32, (strip / 2) as i32),
            style.panel_title_font_size,
            centered(),
        )?;
    }
    Ok(rest)
}

fn paint_tree(area: &Panel<'_>, ax: &Axes2d, style: &FigureStyle, text: &TextPainter) -> Result<()> {
    let plot = titled(area, ax.title(), style, text)?;
    let Some(((x_min, x_max), (y_min, y_max))) = ax.data_bounds() else {
        return Ok(());
    };

    let (w, h) = plot.dim_in_pixel();
    let largest_node = ax
        .marks()
        .iter()
        .filter_map(|m| match m {
            Mark2d::Node { size, .. } => Some(style.marker_radius_px(*size)),
            _ => None,
        })
        .fold(0.0, f64::max);
    let pad = largest_node + 8.0;

    let map_axis = |v: f64, lo: f64, hi: f64, extent: f64| -> f64 {
        let usable = (extent - 2.0 * pad).max(1.0);
        if hi > lo {
            pad + (v - lo) / (hi - lo) * usable
        } else {
            extent / 2.0
        }
    };
    let to_px = |(x, y): (f64, f64)| -> (f64, f64) {
        (
            map_axis(x, x_min, x_max, w as f64),
            h as f64 - map_axis(y, y_min, y_max, h as f64),
        )
    };

    for mark in ax.marks() {
        match mark {
            Mark2d::Arrow {
                from,
                to,
                target_size,
            } => {
                let clearance = style.marker_radius_px(*target_size);
                draw_arrow(&plot, to_px(*from), to_px(*to), clearance, style)?;
            }
            Mark2d::Node { at, size } => {
                let (x, y) = to_px(*at);
                let r = style.marker_radius_px(*size).round().max(1.0) as i32;
                plot.draw(&Circle::new(
                    (x.round() as i32, y.round() as i32),
                    r,
                    NODE_COLOR.filled(),
                ))
                .map_err(VisError::render)?;
            }
            Mark2d::Label {
                at,
                text: label,
                font_size,
            } => {
                let (x, y) = to_px(*at);
                text.draw(
                    &plot,
                    label,
                    (x.round() as i32, y.round() as i32),
                    *font_size,
                    centered(),
                )?;
            }
        }
    }

    Ok(())
}

/// Straight line with a filled head, both ends pulled back by `clearance`
/// so the arrow runs rim to rim.
fn draw_arrow(
    plot: &Panel<'_>,
    from: (f64, f64),
    to: (f64, f64),
    clearance: f64,
    style: &FigureStyle,
) -> Result<()> {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let len = (dx * dx + dy * dy).sqrt();
    if len <= 2.0 * clearance {
        return Ok(());
    }
    let (ux, uy) = (dx / len, dy / len);
    let start = (from.0 + ux * clearance, from.1 + uy * clearance);
    let tip = (to.0 - ux * clearance, to.1 - uy * clearance);

    let head_len = style.points_to_px(7.0);
    let head_half = head_len * 0.35;
    let base = (tip.0 - ux * head_len, tip.1 - uy * head_len);
    let px = |(x, y): (f64, f64)| (x.round() as i32, y.round() as i32);

    plot.draw(&PathElement::new(vec![px(start), px(base)], BLACK.stroke_width(1)))
        .map_err(VisError::render)?;
    plot.draw(&Polygon::new(
        vec![
            px(tip),
            px((base.0 - uy * head_half, base.1 + ux * head_half)),
            px((base.0 + uy * head_half, base.1 - ux * head_half)),
        ],
        BLACK.filled(),
    ))
    .map_err(VisError::render)?;
    Ok(())
}

fn paint_spatial(area: &Panel<'_>, ax: &Axes3d, style: &FigureStyle, text: &TextPainter) -> Result<()> {
    let plot = titled(area, ax.title(), style, text)?;

    let limits = ax.limits();
    let ticks = ax.ticks();
    let camera = Camera::new(ax.view(), limits);
    let [x, y, z] = limits.map(|r| r.min..r.max);
    let [x_ticks, y_ticks, z_ticks] = ticks;

    // Chart axes run (x, altitude, y): plotters keeps its second axis vertical
    let mut chart = ChartBuilder::on(&plot)
        .margin(style.points_to_px(12.0).round() as u32)
        .build_cartesian_3d(
            x.with_key_points(x_ticks),
            z.with_key_points(z_ticks),
            y.with_key_points(y_ticks),
        )
        .map_err(VisError::render)?;
    chart.with_projection(|mut pb| {
        pb.yaw = camera.yaw();
        pb.pitch = camera.pitch();
        pb.scale = 0.8;
        pb.into_matrix()
    });

    let tick_font = text.font(style.panel_title_font_size * 0.75);
    chart
        .configure_axes()
        .axis_panel_style(PANE_COLOR.filled())
        .bold_grid_style(GRID_COLOR.stroke_width(1))
        .label_style(tick_font)
        .x_formatter(&format_tick)
        .y_formatter(&format_tick)
        .z_formatter(&format_tick)
        .draw()
        .map_err(VisError::render)?;

    // Axis names sit past the far end of each axis from the low corner
    let [lx, ly, lz] = limits;
    let past = |r: &AxisRange| r.max + r.span() * 0.12;
    let [x_name, y_name, z_name] = ax.axis_labels();
    let name_font = style.panel_title_font_size * 0.85;
    let names = [
        (x_name, (past(&lx), lz.min, ly.min)),
        (y_name, (lx.min, lz.min, past(&ly))),
        (z_name, (lx.min, past(&lz), ly.min)),
    ];
    chart
        .draw_series(
            names
                .into_iter()
                .filter(|(name, _)| !name.is_empty())
                .map(|(name, at)| Text::new(name.to_string(), at, text.style(name_font, centered()))),
        )
        .map_err(VisError::render)?;

    // Far markers first, shaded lighter
    let mut markers: Vec<_> = ax.markers().iter().collect();
    markers.sort_by(|l, r| camera.depth(&l.at).total_cmp(&camera.depth(&r.at)));
    chart
        .draw_series(markers.into_iter().map(|m| {
            let r = style.marker_radius_px(m.size).round().max(1.0) as i32;
            Circle::new(
                (m.at.x, m.at.z, m.at.y),
                r,
                NODE_COLOR.mix(camera.shade(&m.at)).filled(),
            )
        }))
        .map_err(VisError::render)?;

    chart
        .draw_series(
            ax.texts()
                .iter()
                .filter(|label| !label.text.is_empty())
                .map(|label| {
                    Text::new(
                        label.text.clone(),
                        (label.at.x, label.at.z, label.at.y),
                        text.style(label.font_size, Pos::new(HPos::Left, VPos::Bottom)),
                    )
                }),
        )
        .map_err(VisError::render)?;

    Ok(())
}

fn centered() -> Pos {
    Pos::new(HPos::Center, VPos::Center)
}

fn format_tick(t: &f64) -> String {
    if t.fract() == 0.0 {
        format!("{}", *t as i64)
    } else {
        format!("{}", t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swarmview_core::Position;

    fn small_style() -> StyleConfig {
        let mut style = StyleConfig::default();
        style.figure.width_px = 200;
        style.figure.height_px = 100;
        style
    }

    fn sample_units() -> Vec<Unit> {
        vec![
            Unit::new(vec![1], Position::new(5.0, 5.0, 5.0)).unwrap(),
            Unit::new(vec![1, 2], Position::new(10.0, 5.0, 8.0)).unwrap(),
            Unit::new(vec![1, 3], Position::new(2.0, 12.0, 3.0)).unwrap(),
        ]
    }

    #[test]
    fn test_compose_fills_buffer() {
        let style = small_style();
        let figure = Figure::compose(&sample_units(), "simulation time: 1.0s", &style).unwrap();

        assert_eq!(figure.width(), 200);
        assert_eq!(figure.height(), 100);
        assert_eq!(figure.pixels().len(), 200 * 100 * 3);
        assert_eq!(figure.title(), "simulation time: 1.0s");
        assert_eq!(figure.tree().node_count(), 3);
        assert_eq!(figure.spatial().markers().len(), 3);
        // Something besides the white background was painted
        assert!(figure.pixels().iter().any(|&b| b != 255));
    }

    #[test]
    fn test_compose_empty_snapshot() {
        let figure = Figure::compose(&[], "0s", &small_style()).unwrap();
        assert_eq!(figure.tree().node_count(), 0);
        assert!(figure.spatial().markers().is_empty());
    }

    #[test]
    fn test_spatial_panel_draws_markers() {
        let style = small_style();
        let mut tree = Axes2d::new();
        tree.set_title("tree");
        let empty = Axes3d::new();
        let mut scattered = Axes3d::new();
        scattered.scatter(
            [
                nalgebra::Point3::new(5.0, 5.0, 5.0),
                nalgebra::Point3::new(10.0, 5.0, 8.0),
            ],
            400.0,
        );

        let bare = Figure::from_axes("t", tree.clone(), empty, &style.figure).unwrap();
        let drawn = Figure::from_axes("t", tree, scattered, &style.figure).unwrap();

        // Only the right half may differ
        let row = style.figure.width_px as usize * 3;
        let left = row / 2;
        let differs = |range: std::ops::Range<usize>| {
            bare.pixels()
                .chunks(row)
                .zip(drawn.pixels().chunks(row))
                .any(|(a, b)| a[range.clone()] != b[range.clone()])
        };
        assert!(!differs(0..left));
        assert!(differs(left..row));
    }

    #[test]
    fn test_save_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("figure.png");
        let figure = Figure::compose(&sample_units(), "t", &small_style()).unwrap();
        figure.save_png(&path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_save_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("figure.png");
        let figure = Figure::compose(&[], "t", &small_style()).unwrap();
        assert!(figure.save_png(&path).is_err());
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(&10.0), "10");
        assert_eq!(format_tick(&2.5), "2.5");
    }
}
