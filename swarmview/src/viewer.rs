//! Interactive figure viewer.
//!
//! With the `viewer` feature the figures open in a native eframe window
//! that blocks until closed; arrow keys or the toolbar page through them.
//! Without the feature [`show`] fails with [`VisError::Viewer`]; callers
//! check [`is_available`] and write PNG files instead.

use crate::figure::Figure;
use swarmview_core::{Result, VisError};

/// Returns whether this build can open a window.
pub fn is_available() -> bool {
    cfg!(feature = "viewer")
}

/// Displays `figures` and blocks until the window is closed.
pub fn show(figures: &[Figure], window_title: &str) -> Result<()> {
    if figures.is_empty() {
        tracing::debug!("Nothing to show");
        return Ok(());
    }
    window::run(figures, window_title)
}

#[cfg(feature = "viewer")]
mod window {
    use super::*;

    /// Height reserved for the navigation bar, in logical points.
    const TOOLBAR_HEIGHT: f32 = 36.0;

    struct Page {
        title: String,
        image: egui::ColorImage,
        texture: Option<egui::TextureHandle>,
    }

    struct FigureApp {
        pages: Vec<Page>,
        current: usize,
    }

    impl FigureApp {
        fn step(&mut self, forward: bool) {
            let n = self.pages.len();
            self.current = if forward {
                (self.current + 1) % n
            } else {
                (self.current + n - 1) % n
            };
        }
    }

    impl eframe::App for FigureApp {
        fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
            if ctx.input(|i| i.key_pressed(egui::Key::ArrowRight)) {
                self.step(true);
            }
            if ctx.input(|i| i.key_pressed(egui::Key::ArrowLeft)) {
                self.step(false);
            }

            let total = self.pages.len();
            egui::TopBottomPanel::top("navigation").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if ui.button("◀").clicked() {
                        self.step(false);
                    }
                    if ui.button("▶").clicked() {
                        self.step(true);
                    }
                    let page = &self.pages[self.current];
                    ui.label(format!("{}/{}  {}", self.current + 1, total, page.title));
                });
            });

            let index = self.current;
            egui::CentralPanel::default().show(ctx, |ui| {
                let page = &mut self.pages[index];
                let texture = page.texture.get_or_insert_with(|| {
                    ctx.load_texture(
                        format!("figure-{}", index),
                        page.image.clone(),
                        egui::TextureOptions::LINEAR,
                    )
                });
                ui.centered_and_justified(|ui| {
                    ui.add(egui::Image::new(&*texture).shrink_to_fit());
                });
            });
        }
    }

    pub(super) fn run(figures: &[Figure], window_title: &str) -> Result<()> {
        let pages: Vec<Page> = figures
            .iter()
            .map(|f| Page {
                title: f.title().to_string(),
                image: egui::ColorImage::from_rgb(
                    [f.width() as usize, f.height() as usize],
                    f.pixels(),
                ),
                texture: None,
            })
            .collect();

        let (w, h) = (figures[0].width() as f32, figures[0].height() as f32);
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([w, h + TOOLBAR_HEIGHT])
                .with_title(window_title),
            ..Default::default()
        };

        tracing::info!("Showing {} figure(s); close the window to continue", pages.len());
        eframe::run_native(
            window_title,
            options,
            Box::new(|_cc| Ok(Box::new(FigureApp { pages, current: 0 }))),
        )
        .map_err(|e| VisError::Viewer(e.to_string()))
    }
}

#[cfg(not(feature = "viewer"))]
mod window {
    use super::*;

    pub(super) fn run(figures: &[Figure], window_title: &str) -> Result<()> {
        Err(VisError::Viewer(format!(
            "cannot show {} figure(s) for '{}': built without the `viewer` feature",
            figures.len(),
            window_title
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_nothing_is_ok() {
        assert!(show(&[], "empty").is_ok());
    }

    #[cfg(not(feature = "viewer"))]
    #[test]
    fn test_headless_show_fails() {
        let figure = Figure::compose(&[], "0s", &crate::style::StyleConfig::default()).unwrap();
        assert!(!is_available());
        let err = show(&[figure], "headless").unwrap_err();
        assert!(matches!(err, VisError::Viewer(_)));
    }
}
