//! Center/width sliders and reset button of the dynamic zoom viewer

use crate::layout::ZoomLayout;
use crate::state::{ControlEvent, ZoomControls};
use egui::{Color32, Rect, Ui, UiBuilder};

/// Slider and button face colour (light goldenrod yellow)
const CONTROL_FACE: Color32 = Color32::from_rgb(250, 250, 210);

/// Space left of each slider for its label
const LABEL_WIDTH: f32 = 90.0;

/// Range controls drawn at fixed figure positions.
///
/// The widget edits a copy of the session's controls and reports what the
/// user did; the session applies it.
pub struct RangeControls {
    controls: ZoomControls,
    max: f64,
}

impl RangeControls {
    pub fn new(controls: ZoomControls, max: f64) -> Self {
        Self { controls, max }
    }

    /// Show the controls; returns the event to apply, if any
    pub fn show(self, ui: &mut Ui, layout: &ZoomLayout, figure: Rect) -> Option<ControlEvent> {
        let mut values = self.controls;

        let center_changed = slider(
            ui,
            layout.center_slider.to_screen(figure),
            "Center Time",
            &mut values.center,
            self.max,
        );
        let width_changed = slider(
            ui,
            layout.width_slider.to_screen(figure),
            "Time Width",
            &mut values.half_width,
            self.max,
        );

        let reset_rect = layout.reset_button.to_screen(figure);
        let reset = ui
            .put(reset_rect, egui::Button::new("Reset").fill(CONTROL_FACE))
            .on_hover_text("Restore the initial window (R)")
            .clicked();

        if reset {
            Some(ControlEvent::Reset)
        } else if center_changed || width_changed {
            Some(ControlEvent::Changed(values))
        } else {
            None
        }
    }
}

fn slider(ui: &mut Ui, rect: Rect, label: &str, value: &mut f64, max: f64) -> bool {
    // The label sits to the left of the slider track, outside its rectangle
    let label_rect = Rect::from_min_max(
        rect.min - egui::vec2(LABEL_WIDTH, 0.0),
        egui::pos2(rect.min.x, rect.max.y),
    );
    ui.painter().text(
        label_rect.right_center() - egui::vec2(6.0, 0.0),
        egui::Align2::RIGHT_CENTER,
        label,
        egui::TextStyle::Body.resolve(ui.style()),
        ui.visuals().text_color(),
    );
    ui.painter().rect_filled(rect, 0.0, CONTROL_FACE);

    ui.scope_builder(UiBuilder::new().max_rect(rect), |ui| {
        ui.spacing_mut().slider_width = (rect.width() - 70.0).max(40.0);
        ui.add(egui::Slider::new(value, 0.0..=max).fixed_decimals(2))
            .changed()
    })
    .inner
}
