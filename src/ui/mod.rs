//! Figure rendering
//!
//! Each panel is an `egui_plot::Plot` placed at its layout rectangle inside
//! the central panel. Plots are fixed: their bounds come from the model, so
//! drag, zoom and scroll are off.

mod joint;
pub mod theme;
mod zoom;

pub use joint::render_joint;
pub use zoom::render_zoom;

use egui::{Rect, Ui, UiBuilder};
use egui_plot::Plot;

/// A non-interactive plot sized to `rect`
fn fixed_plot<'a>(id: &str, rect: Rect, grid: bool) -> Plot<'a> {
    Plot::new(id)
        .width(rect.width())
        .height(rect.height())
        .show_grid(grid)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .allow_double_click_reset(false)
        .show_x(false)
        .show_y(false)
}

fn in_rect<R>(ui: &mut Ui, rect: Rect, add_contents: impl FnOnce(&mut Ui) -> R) -> R {
    ui.scope_builder(UiBuilder::new().max_rect(rect), add_contents)
        .inner
}
