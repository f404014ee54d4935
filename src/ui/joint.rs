use super::{fixed_plot, in_rect};
use crate::state::joint::count_axis_start;
use crate::state::{Axes, JointPlot, MarginalPanel, Orientation};
use crate::widgets::ColorBarWidget;
use egui::{Align2, Color32, FontId, Rect, Stroke, Ui};
use egui_plot::{Bar, BarChart, GridMark, Plot, PlotBounds, Polygon};
use std::ops::RangeInclusive;

/// Render the density plot, both marginals and the colour bar
pub fn render_joint(plot: &JointPlot, ui: &mut Ui) {
    profiling::scope!("render_joint");

    let figure = ui.max_rect();
    let theme = plot.figure.theme;
    let font = FontId::proportional(ui.style().text_styles[&egui::TextStyle::Body].size);

    if let Some(title) = &plot.figure.title {
        ui.painter().text(
            figure.center_top() + egui::vec2(0.0, 4.0),
            Align2::CENTER_TOP,
            title,
            font.clone(),
            theme.text_color(),
        );
    }

    let density = &plot.density;
    let density_rect = density.axes.rect.to_screen(figure);
    in_rect(ui, density_rect, |ui| {
        let hex_plot = axes_plot("joint_density", &density.axes, density_rect, theme.show_grid());
        hex_plot.show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(bounds(&density.axes));
            for cell in &density.grid.cells {
                let hex = density.grid.hexagon(cell.x, cell.y);
                plot_ui.polygon(
                    Polygon::new("", hex.to_vec())
                        .fill_color(density.cell_color(cell))
                        .stroke(Stroke::NONE),
                );
            }
        });
    });
    paint_title(ui, &density.axes, density_rect, &font, theme.text_color());

    for (id, panel) in [("joint_hist_x", &plot.hist_x), ("joint_hist_y", &plot.hist_y)] {
        render_marginal(ui, id, panel, figure, theme.show_grid());
        let rect = panel.axes.rect.to_screen(figure);
        paint_title(ui, &panel.axes, rect, &font, theme.text_color());
    }

    ColorBarWidget::new(&plot.colorbar, font, theme.text_color())
        .show(ui, plot.colorbar.rect.to_screen(figure));
}

fn render_marginal(ui: &mut Ui, id: &str, panel: &MarginalPanel, figure: Rect, grid: bool) {
    let rect = panel.axes.rect.to_screen(figure);
    let hist = &panel.histogram;
    let base = count_axis_start(panel.log_scale);

    let bars: Vec<Bar> = hist
        .counts
        .iter()
        .enumerate()
        .filter(|&(_, &count)| count > 0)
        .map(|(i, &count)| {
            let length = if panel.log_scale {
                (count as f64).log10() - base
            } else {
                count as f64
            };
            Bar::new(hist.bin_center(i), length)
                .width(hist.bin_width(i))
                .base_offset(base)
        })
        .collect();

    let mut chart = BarChart::new(id, bars).color(panel.color);
    if panel.orientation == Orientation::Horizontal {
        chart = chart.horizontal();
    }

    let mut plot = axes_plot(id, &panel.axes, rect, grid);
    if panel.log_scale {
        plot = match panel.orientation {
            Orientation::Vertical => plot.y_axis_formatter(decade_label),
            Orientation::Horizontal => plot.x_axis_formatter(decade_label),
        };
    }
    // Tick-label hiding is applied last so it wins over the decade formatter
    if !panel.axes.show_x_tick_labels {
        plot = plot.x_axis_formatter(|_mark, _range| String::new());
    }
    if !panel.axes.show_y_tick_labels {
        plot = plot.y_axis_formatter(|_mark, _range| String::new());
    }

    in_rect(ui, rect, |ui| {
        plot.show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(bounds(&panel.axes));
            plot_ui.bar_chart(chart);
        });
    });
}

fn axes_plot<'a>(id: &str, axes: &Axes, rect: Rect, grid: bool) -> Plot<'a> {
    let mut plot = fixed_plot(id, rect, grid);
    if let Some(label) = &axes.x_label {
        plot = plot.x_axis_label(label.clone());
    }
    if let Some(label) = &axes.y_label {
        plot = plot.y_axis_label(label.clone());
    }
    plot
}

fn bounds(axes: &Axes) -> PlotBounds {
    PlotBounds::from_min_max(
        [axes.x_range.0, axes.y_range.0],
        [axes.x_range.1, axes.y_range.1],
    )
}

fn paint_title(ui: &Ui, axes: &Axes, rect: Rect, font: &FontId, color: Color32) {
    if let Some(title) = &axes.title {
        ui.painter().text(
            rect.center_top() - egui::vec2(0.0, 2.0),
            Align2::CENTER_BOTTOM,
            title,
            font.clone(),
            color,
        );
    }
}

/// Tick labels of a log10 count axis: integer exponents only
fn decade_label(mark: GridMark, _range: &RangeInclusive<f64>) -> String {
    let exp = mark.value;
    if (exp - exp.round()).abs() < 1e-9 {
        format!("1e{}", exp.round() as i64)
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mark(value: f64) -> GridMark {
        GridMark { value, step_size: 1.0 }
    }

    #[test]
    fn test_decade_labels() {
        let range = 0.0..=3.0;
        assert_eq!(decade_label(mark(0.0), &range), "1e0");
        assert_eq!(decade_label(mark(2.0), &range), "1e2");
        assert_eq!(decade_label(mark(0.5), &range), "");
    }
}
