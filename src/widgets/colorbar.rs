//! Vertical colour bar painted next to the density plot

use crate::constants::joint::COLORBAR_TICKS;
use crate::state::ColorBar;
use egui::{Align2, Color32, FontId, Pos2, Rect, Stroke, Ui};

/// Gradient slices painted per bar
const SEGMENTS: usize = 64;

pub struct ColorBarWidget<'a> {
    bar: &'a ColorBar,
    font: FontId,
    text_color: Color32,
}

impl<'a> ColorBarWidget<'a> {
    pub fn new(bar: &'a ColorBar, font: FontId, text_color: Color32) -> Self {
        Self {
            bar,
            font,
            text_color,
        }
    }

    /// Paint the bar into `rect`, low values at the bottom
    pub fn show(self, ui: &mut Ui, rect: Rect) {
        let painter = ui.painter_at(rect.expand2(egui::vec2(60.0, 30.0)));
        let scale = &self.bar.scale;
        let seg_height = rect.height() / SEGMENTS as f32;

        for i in 0..SEGMENTS {
            let t = (i as f64 + 0.5) / SEGMENTS as f64;
            let bottom = rect.bottom() - i as f32 * seg_height;
            let seg = Rect::from_min_max(
                Pos2::new(rect.left(), bottom - seg_height - 0.5),
                Pos2::new(rect.right(), bottom),
            );
            painter.rect_filled(seg, 0.0, scale.cmap.eval(t));
        }
        painter.rect_stroke(rect, 0.0, Stroke::new(1.0, self.text_color), egui::StrokeKind::Inside);

        let span = scale.vmax - scale.vmin;
        for value in self.bar.ticks(COLORBAR_TICKS) {
            let frac = if span > 0.0 { ((value - scale.vmin) / span) as f32 } else { 0.0 };
            let y = rect.bottom() - frac * rect.height();
            painter.line_segment(
                [Pos2::new(rect.right(), y), Pos2::new(rect.right() + 3.0, y)],
                Stroke::new(1.0, self.text_color),
            );
            painter.text(
                Pos2::new(rect.right() + 5.0, y),
                Align2::LEFT_CENTER,
                format_tick(value),
                self.font.clone(),
                self.text_color,
            );
        }

        // Label sits just above the bar
        painter.text(
            Pos2::new(rect.center().x, rect.top() - 0.05 * rect.height()),
            Align2::CENTER_BOTTOM,
            &self.bar.label,
            self.font,
            self.text_color,
        );
    }
}

fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}
