use eframe::App;
use eframe::egui::{self, CentralPanel};
use std::path::PathBuf;

use crate::constants::layout::PIXELS_PER_INCH;
use crate::error::{PlotError, Result};
use crate::export::{self, Snapshot};
use crate::state::{ControlEvent, JointPlot, ZoomSession};
use crate::ui::{self, theme::Theme};

/// Points to logical pixels at the figure resolution
fn points_to_pixels(points: f32) -> f32 {
    points * PIXELS_PER_INCH / 72.0
}

/// Window options for a figure of `size` inches
pub fn native_options(title: &str, size: (f32, f32)) -> eframe::NativeOptions {
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(title)
            .with_inner_size([size.0 * PIXELS_PER_INCH, size.1 * PIXELS_PER_INCH]),
        ..Default::default()
    }
}

/// Keys shared by both viewers: Escape or Q closes the window
fn close_requested(ctx: &egui::Context) -> bool {
    ctx.input(|i| i.key_pressed(egui::Key::Escape) || i.key_pressed(egui::Key::Q))
}

pub struct JointPlotApp {
    plot: JointPlot,
    snapshot: Option<Snapshot>,
}

impl JointPlotApp {
    pub fn new(plot: JointPlot) -> Self {
        Self {
            plot,
            snapshot: None,
        }
    }

    /// Capture the figure once it is drawn, then close the window
    pub(crate) fn with_snapshot(mut self, snapshot: Snapshot) -> Self {
        self.snapshot = Some(snapshot);
        self
    }
}

impl App for JointPlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let figure = &self.plot.figure;
        figure.theme.apply(ctx, points_to_pixels(figure.font_size));

        if close_requested(ctx) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        CentralPanel::default().show(ctx, |ui| {
            ui::render_joint(&self.plot, ui);
        });

        if let Some(snapshot) = &mut self.snapshot {
            if snapshot.on_frame(ctx) {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        }
    }
}

pub struct DynamicZoomApp<'a> {
    session: ZoomSession<'a>,
    theme: Theme,
}

impl<'a> DynamicZoomApp<'a> {
    pub fn new(session: ZoomSession<'a>, theme: Theme) -> Self {
        Self { session, theme }
    }
}

impl App for DynamicZoomApp<'_> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(self.theme.visuals());

        // Handle keyboard shortcuts
        if ctx.input(|i| i.key_pressed(egui::Key::R)) {
            self.session.handle(ControlEvent::Reset);
        }
        if close_requested(ctx) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        CentralPanel::default().show(ctx, |ui| {
            ui::render_zoom(&mut self.session, ui, self.theme);
        });
    }
}

impl JointPlot {
    fn window_title(&self) -> String {
        self.figure.title.clone().unwrap_or_else(|| "Joint plot".to_string())
    }

    /// Open the figure window; blocks until it is closed
    pub fn show(self) -> Result<()> {
        let title = self.window_title();
        let options = native_options(&title, self.figure.size);
        tracing::info!(title = %title, "opening joint plot window");

        eframe::run_native(
            &title,
            options,
            Box::new(|_cc| Ok(Box::new(JointPlotApp::new(self)))),
        )
        .map_err(|e| PlotError::Display(e.to_string()))
    }

    /// Render the figure in a window, write it to `path` as PNG and close
    pub fn save(self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        let title = self.window_title();
        let options = native_options(&title, self.figure.size);
        let (snapshot, outcome) = Snapshot::new(path.clone());
        tracing::info!(path = %path.display(), "rendering joint plot for export");

        eframe::run_native(
            &title,
            options,
            Box::new(|_cc| Ok(Box::new(JointPlotApp::new(self).with_snapshot(snapshot)))),
        )
        .map_err(|e| PlotError::Display(e.to_string()))?;
        export::take_outcome(&outcome)
    }
}

/// Open a dynamic zoom window over `session`; blocks until it is closed
pub fn show_zoom(session: ZoomSession<'_>, theme: Theme, size: (f32, f32)) -> Result<()> {
    let title = "Dynamic zoom";
    tracing::info!(samples = session.len(), "opening dynamic zoom window");

    eframe::run_native(
        title,
        native_options(title, size),
        Box::new(|_cc| Ok(Box::new(DynamicZoomApp::new(session, theme)))),
    )
    .map_err(|e| PlotError::Display(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_to_pixels() {
        assert!((points_to_pixels(72.0) - PIXELS_PER_INCH).abs() < 1e-6);
        assert!((points_to_pixels(8.0) - 11.111).abs() < 1e-3);
    }

    #[test]
    fn test_native_options_size() {
        let options = native_options("t", (6.0, 4.0));
        assert_eq!(
            options.viewport.inner_size,
            Some(egui::vec2(6.0 * PIXELS_PER_INCH, 4.0 * PIXELS_PER_INCH))
        );
    }
}
