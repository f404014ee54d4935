use super::theme::Theme;
use super::{fixed_plot, in_rect};
use crate::colormap::alpha_u8;
use crate::constants::zoom::{LINE_WIDTH, OVERLAY_ALPHA};
use crate::layout::ZoomLayout;
use crate::state::{ControlEvent, ZoomSession};
use crate::widgets::RangeControls;
use egui::{Align2, Color32, Rect, Stroke, Ui};
use egui_plot::{Line, PlotBounds, Points, Polygon};

const TRACE_COLOR: Color32 = Color32::RED;

/// Overlay band colour (green, half transparent)
fn overlay_fill() -> Color32 {
    Color32::from_rgba_unmultiplied(0, 128, 0, alpha_u8(OVERLAY_ALPHA))
}

/// Render both panels and the controls, then apply whatever the user did
pub fn render_zoom(session: &mut ZoomSession<'_>, ui: &mut Ui, theme: Theme) {
    profiling::scope!("render_zoom");

    let figure = ui.max_rect();
    let layout = ZoomLayout::compute();
    let mut event = None;

    let overview_rect = layout.overview.to_screen(figure);
    let clicked_at = in_rect(ui, overview_rect, |ui| {
        render_overview(session, ui, overview_rect, theme)
    });
    if let Some(x) = clicked_at {
        event = Some(ControlEvent::CenterOn(x));
    }

    let detail_rect = layout.detail.to_screen(figure);
    let hovered = in_rect(ui, detail_rect, |ui| {
        render_detail(session, ui, detail_rect, theme)
    });
    if let Some((i, x, y)) = hovered {
        ui.painter().text(
            detail_rect.right_top() + egui::vec2(-8.0, 8.0),
            Align2::RIGHT_TOP,
            format!("#{}  x = {:.5}  y = {:.4}", i, x, y),
            egui::TextStyle::Small.resolve(ui.style()),
            theme.text_color(),
        );
    }

    let controls = RangeControls::new(session.controls(), session.slider_max());
    // Control input takes precedence over an overview click in the same frame
    if let Some(control_event) = controls.show(ui, &layout, figure) {
        event = Some(control_event);
    }

    if let Some(event) = event {
        session.handle(event);
    }
    if session.take_redraw() {
        ui.ctx().request_repaint();
    }
    session.mark_rendered();
}

/// Returns the clicked x value, if the overview was clicked
fn render_overview(
    session: &ZoomSession<'_>,
    ui: &mut Ui,
    rect: Rect,
    theme: Theme,
) -> Option<f64> {
    let (x_min, x_max) = session.overview_x_bounds();
    let (y_min, y_max) = session.y_bounds();
    let clickable = session.is_x_sorted();

    let response = fixed_plot("zoom_overview", rect, theme.show_grid()).show(ui, |plot_ui| {
        plot_ui.set_plot_bounds(PlotBounds::from_min_max([x_min, y_min], [x_max, y_max]));
        plot_ui.line(
            Line::new("overview", session.overview_points().to_vec())
                .color(TRACE_COLOR)
                .width(LINE_WIDTH),
        );
        plot_ui.polygon(
            Polygon::new("window", session.overlay().polygon())
                .fill_color(overlay_fill())
                .stroke(Stroke::NONE),
        );

        if clickable && plot_ui.response().clicked() {
            plot_ui.pointer_coordinate().map(|p| p.x)
        } else {
            None
        }
    });

    if clickable && response.response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
    response.inner
}

/// Returns the sample under the pointer, if any
fn render_detail(
    session: &ZoomSession<'_>,
    ui: &mut Ui,
    rect: Rect,
    theme: Theme,
) -> Option<(usize, f64, f64)> {
    let (x_min, x_max) = session.detail_x_bounds();
    let (y_min, y_max) = session.y_bounds();

    fixed_plot("zoom_detail", rect, theme.show_grid())
        .show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max([x_min, y_min], [x_max, y_max]));
            plot_ui.line(
                Line::new("detail", session.detail_points().to_vec())
                    .color(TRACE_COLOR)
                    .width(LINE_WIDTH),
            );

            let nearest = plot_ui
                .pointer_coordinate()
                .and_then(|p| session.nearest_sample(p.x));
            if let Some((_, x, y)) = nearest {
                plot_ui.points(
                    Points::new("nearest", vec![[x, y]])
                        .radius(4.0)
                        .color(theme.text_color()),
                );
            }
            nearest
        })
        .inner
}
