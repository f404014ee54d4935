//! Joint plot options and the computed figure model

use crate::colormap::{self, Colormap};
use crate::constants::joint::*;
use crate::data::binning::{self, Extent, HexCell, HexGrid, Histogram};
use crate::error::{self, PlotError, Result};
use crate::layout::{FracRect, JointLayout};
use crate::ui::theme::Theme;
use egui::Color32;
use serde::{Deserialize, Serialize};

/// Which parts of the joint plot use a logarithmic scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogScale {
    /// Colour the hexagons by `log10(count)`
    pub cmap: bool,
    /// Draw the marginal count axes in decades
    pub marginals: bool,
}

impl LogScale {
    pub fn both(on: bool) -> Self {
        Self {
            cmap: on,
            marginals: on,
        }
    }
}

/// Options of [`crate::joint_plot`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JointPlotConfig {
    /// Marginal histogram bin count
    pub marginal_bins: usize,
    /// Hexagons across the x range
    pub gridsize: usize,
    /// Symmetric half-extent of the viewport, derived from the data if unset
    pub plot_limits: Option<f64>,
    pub log_scale: LogScale,
    /// Colour map name, `_r` reverses
    pub cmap: String,
    /// Marginal histogram colour, picked from the colour map if unset
    pub marginal_color: Option<[u8; 3]>,
    /// Figure size in inches
    pub figsize: (f32, f32),
    pub font_size: f32,
    pub alpha_hexbin: f32,
    pub alpha_marginals: f32,
    pub theme: Theme,
}

impl Default for JointPlotConfig {
    fn default() -> Self {
        Self {
            marginal_bins: DEFAULT_MARGINAL_BINS,
            gridsize: DEFAULT_GRIDSIZE,
            plot_limits: None,
            log_scale: LogScale::default(),
            cmap: DEFAULT_CMAP.to_string(),
            marginal_color: None,
            figsize: DEFAULT_FIGSIZE,
            font_size: DEFAULT_FONT_SIZE,
            alpha_hexbin: DEFAULT_ALPHA_HEXBIN,
            alpha_marginals: DEFAULT_ALPHA_MARGINALS,
            theme: Theme::default(),
        }
    }
}

impl JointPlotConfig {
    pub fn marginal_bins(mut self, bins: usize) -> Self {
        self.marginal_bins = bins;
        self
    }

    pub fn gridsize(mut self, gridsize: usize) -> Self {
        self.gridsize = gridsize;
        self
    }

    pub fn plot_limits(mut self, limit: f64) -> Self {
        self.plot_limits = Some(limit);
        self
    }

    pub fn log_scale(mut self, log_scale: LogScale) -> Self {
        self.log_scale = log_scale;
        self
    }

    pub fn cmap(mut self, name: impl Into<String>) -> Self {
        self.cmap = name.into();
        self
    }

    pub fn marginal_color(mut self, rgb: [u8; 3]) -> Self {
        self.marginal_color = Some(rgb);
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.marginal_bins == 0 {
            return Err(PlotError::Validation("marginal_bins must be positive".to_string()));
        }
        if self.gridsize == 0 {
            return Err(PlotError::Validation("gridsize must be positive".to_string()));
        }
        for (name, alpha) in [
            ("alpha_hexbin", self.alpha_hexbin),
            ("alpha_marginals", self.alpha_marginals),
        ] {
            if !(0.0..=1.0).contains(&alpha) {
                return Err(PlotError::Validation(format!(
                    "{} must be within [0, 1], got {}",
                    name, alpha
                )));
            }
        }
        if let Some(limit) = self.plot_limits {
            if !(limit > 0.0 && limit.is_finite()) {
                return Err(PlotError::Validation(format!(
                    "plot_limits must be positive and finite, got {}",
                    limit
                )));
            }
        }
        if !(self.figsize.0 > 0.0 && self.figsize.1 > 0.0) {
            return Err(PlotError::Validation("figsize must be positive".to_string()));
        }
        Ok(())
    }
}

/// Mapping from cell values to colours, shared by the density plot and its colour bar
#[derive(Debug, Clone, Copy)]
pub struct ColorScale {
    pub cmap: Colormap,
    pub vmin: f64,
    pub vmax: f64,
    pub log: bool,
}

impl ColorScale {
    /// Value a cell is coloured by
    pub fn cell_value(&self, count: usize) -> f64 {
        if self.log {
            (count as f64).log10()
        } else {
            count as f64
        }
    }

    pub fn color(&self, value: f64, alpha: f32) -> Color32 {
        self.cmap
            .eval_alpha(colormap::normalize(value, self.vmin, self.vmax), alpha)
    }

    pub fn label(&self) -> &'static str {
        if self.log { "log10(N)" } else { "N" }
    }
}

/// Plot region with caller-editable decorations
#[derive(Debug, Clone)]
pub struct Axes {
    pub rect: FracRect,
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub show_x_tick_labels: bool,
    pub show_y_tick_labels: bool,
}

impl Axes {
    fn new(rect: FracRect, x_range: (f64, f64), y_range: (f64, f64)) -> Self {
        Self {
            rect,
            title: None,
            x_label: None,
            y_label: None,
            x_range,
            y_range,
            show_x_tick_labels: true,
            show_y_tick_labels: true,
        }
    }
}

/// Hexbin density region
#[derive(Debug, Clone)]
pub struct DensityPanel {
    pub axes: Axes,
    pub grid: HexGrid,
    pub scale: ColorScale,
    pub alpha: f32,
}

impl DensityPanel {
    pub fn cell_color(&self, cell: &HexCell) -> Color32 {
        self.scale.color(self.scale.cell_value(cell.count), self.alpha)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Bars grow upwards (x marginal)
    Vertical,
    /// Bars grow to the right (y marginal)
    Horizontal,
}

/// Marginal histogram region
#[derive(Debug, Clone)]
pub struct MarginalPanel {
    pub axes: Axes,
    pub histogram: Histogram,
    pub orientation: Orientation,
    pub color: Color32,
    pub log_scale: bool,
}

impl MarginalPanel {
    /// Largest bar length on the count axis, in plotted units
    pub fn count_extent(&self) -> f64 {
        let max = self.histogram.max_count().max(1) as f64;
        if self.log_scale { max.log10() + 0.5 } else { max * 1.05 }
    }
}

/// Colour legend bound to the density colour scale
#[derive(Debug, Clone)]
pub struct ColorBar {
    pub rect: FracRect,
    pub scale: ColorScale,
    pub label: String,
}

impl ColorBar {
    /// `n` evenly spaced tick values from `vmin` to `vmax`
    pub fn ticks(&self, n: usize) -> Vec<f64> {
        if n < 2 {
            return vec![self.scale.vmin];
        }
        let step = (self.scale.vmax - self.scale.vmin) / (n - 1) as f64;
        (0..n).map(|i| self.scale.vmin + i as f64 * step).collect()
    }
}

/// Window-level settings
#[derive(Debug, Clone)]
pub struct Figure {
    pub title: Option<String>,
    pub size: (f32, f32),
    pub font_size: f32,
    pub theme: Theme,
}

/// A computed joint plot; every panel is public so callers can add titles
/// and labels before showing it
#[derive(Debug, Clone)]
pub struct JointPlot {
    pub figure: Figure,
    pub density: DensityPanel,
    pub hist_x: MarginalPanel,
    pub hist_y: MarginalPanel,
    pub colorbar: ColorBar,
}

impl JointPlot {
    pub fn build(x: &[f64], y: &[f64], config: &JointPlotConfig) -> Result<Self> {
        profiling::scope!("JointPlot::build");

        error::check_pair(x, y)?;
        config.validate()?;
        let cmap = Colormap::from_name(&config.cmap)?;

        let limit = match config.plot_limits {
            Some(limit) => limit,
            None => auto_limits(x, y)?,
        };
        let range = (-limit, limit);
        let layout = JointLayout::compute();

        let grid = binning::hexbin(x, y, config.gridsize, Extent::symmetric(limit))?;
        let mut scale = ColorScale {
            cmap,
            vmin: 0.0,
            vmax: 1.0,
            log: config.log_scale.cmap,
        };
        let vmax = scale.cell_value(grid.max_count().max(1));
        // A single-sample maximum under log10 is 0; keep the scale non-degenerate
        scale.vmax = if vmax > 0.0 { vmax } else { 1.0 };

        let edges = binning::symmetric_edges(limit, config.marginal_bins)?;
        let marginal_color = marginal_color(&cmap, config.log_scale.cmap, config.marginal_color);
        let marginal_color = Color32::from_rgba_unmultiplied(
            marginal_color.r(),
            marginal_color.g(),
            marginal_color.b(),
            colormap::alpha_u8(config.alpha_marginals),
        );

        let mut hist_x_axes = Axes::new(layout.hist_x, range, (0.0, 1.0));
        hist_x_axes.show_x_tick_labels = false;
        let mut hist_y_axes = Axes::new(layout.hist_y, (0.0, 1.0), range);
        hist_y_axes.show_y_tick_labels = false;

        let mut hist_x = MarginalPanel {
            axes: hist_x_axes,
            histogram: binning::histogram(x, &edges),
            orientation: Orientation::Vertical,
            color: marginal_color,
            log_scale: config.log_scale.marginals,
        };
        hist_x.axes.y_range = (count_axis_start(hist_x.log_scale), hist_x.count_extent());

        let mut hist_y = MarginalPanel {
            axes: hist_y_axes,
            histogram: binning::histogram(y, &edges),
            orientation: Orientation::Horizontal,
            color: marginal_color,
            log_scale: config.log_scale.marginals,
        };
        hist_y.axes.x_range = (count_axis_start(hist_y.log_scale), hist_y.count_extent());

        tracing::info!(
            samples = x.len(),
            limit,
            cells = grid.cells.len(),
            cmap = %cmap.name(),
            "built joint plot"
        );

        Ok(Self {
            figure: Figure {
                title: None,
                size: config.figsize,
                font_size: config.font_size,
                theme: config.theme,
            },
            density: DensityPanel {
                axes: Axes::new(layout.density, range, range),
                grid,
                scale,
                alpha: config.alpha_hexbin,
            },
            hist_x,
            hist_y,
            colorbar: ColorBar {
                rect: layout.colorbar,
                scale,
                label: scale.label().to_string(),
            },
        })
    }
}

/// Where the count axis of a marginal starts, in plotted units
pub fn count_axis_start(log: bool) -> f64 {
    if log { LOG_COUNT_BASE } else { 0.0 }
}

/// Bars on a log count axis start at 10^-0.5 so that single counts stay visible
pub const LOG_COUNT_BASE: f64 = -0.5;

/// Square, zero-centred viewport half-extent: 1.1 x the largest |sample|
pub fn auto_limits(x: &[f64], y: &[f64]) -> Result<f64> {
    let max_abs = x
        .iter()
        .chain(y)
        .copied()
        .filter(|v| v.is_finite())
        .map(f64::abs)
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))));

    match max_abs {
        None => Err(PlotError::Validation(
            "cannot derive plot limits: no finite samples".to_string(),
        )),
        Some(m) if m == 0.0 => {
            tracing::warn!("all samples are zero, using unit plot limits");
            Ok(1.0)
        }
        Some(m) => Ok(m * AUTO_LIMIT_FACTOR),
    }
}

/// Marginal histogram colour: the override, or the colour map at its
/// midpoint (linear) or 70% point (log)
pub fn marginal_color(cmap: &Colormap, log: bool, override_rgb: Option<[u8; 3]>) -> Color32 {
    match override_rgb {
        Some([r, g, b]) => Color32::from_rgb(r, g, b),
        None if log => cmap.eval(MARGINAL_COLOR_LOG),
        None => cmap.eval(MARGINAL_COLOR_LINEAR),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::synthetic::standard_normal;
    use approx::assert_relative_eq;

    #[test]
    fn test_auto_limits_use_largest_absolute_value() {
        let x = [-3.0, 1.0, 2.0];
        let y = [0.5, -1.0, 2.5];
        assert_relative_eq!(auto_limits(&x, &y).unwrap(), 3.3, epsilon = 1e-12);
    }

    #[test]
    fn test_auto_limits_edge_cases() {
        assert_eq!(auto_limits(&[0.0], &[0.0]).unwrap(), 1.0);
        assert!(auto_limits(&[f64::NAN], &[f64::INFINITY]).is_err());
    }

    /// Marginal colours carry alpha, so compare their unmultiplied RGB
    fn assert_rgb_close(actual: Color32, expected: Color32) {
        let a = actual.to_srgba_unmultiplied();
        let e = expected.to_srgba_unmultiplied();
        for i in 0..3 {
            assert!(a[i].abs_diff(e[i]) <= 2, "{:?} vs {:?}", a, e);
        }
    }

    #[test]
    fn test_marginal_color_selection() {
        let cmap = Colormap::from_name("inferno_r").unwrap();

        assert_eq!(marginal_color(&cmap, false, None), cmap.eval(0.5));
        assert_eq!(marginal_color(&cmap, true, None), cmap.eval(0.7));
        assert_eq!(
            marginal_color(&cmap, true, Some([1, 2, 3])),
            Color32::from_rgb(1, 2, 3)
        );
    }

    #[test]
    fn test_build_defaults() {
        let x = standard_normal(1000, Some(1));
        let y = standard_normal(1000, Some(2));

        let plot = JointPlot::build(&x, &y, &JointPlotConfig::default()).unwrap();
        let limit = auto_limits(&x, &y).unwrap();

        assert_eq!(plot.density.axes.x_range, (-limit, limit));
        assert_eq!(plot.density.axes.y_range, (-limit, limit));
        assert_eq!(plot.density.grid.total_count(), 1000);
        assert_eq!(plot.hist_x.histogram.counts.len(), 50);
        assert_eq!(plot.hist_x.histogram.counts.iter().sum::<usize>(), 1000);
        assert_eq!(plot.hist_y.histogram.counts.iter().sum::<usize>(), 1000);
        assert_eq!(plot.hist_x.axes.x_range, plot.density.axes.x_range);
        assert_eq!(plot.hist_y.axes.y_range, plot.density.axes.y_range);
        assert!(!plot.hist_x.axes.show_x_tick_labels);
        assert!(!plot.hist_y.axes.show_y_tick_labels);
        assert_eq!(plot.colorbar.label, "N");
        assert_eq!(plot.colorbar.scale.vmax, plot.density.grid.max_count() as f64);

        let cmap = Colormap::from_name("inferno_r").unwrap();
        assert_rgb_close(plot.hist_x.color, cmap.eval(0.5));
        assert_eq!(plot.hist_x.color.a(), colormap::alpha_u8(DEFAULT_ALPHA_MARGINALS));
    }

    #[test]
    fn test_build_log_scale() {
        let x = standard_normal(500, Some(3));
        let y = standard_normal(500, Some(4));
        let config = JointPlotConfig::default().log_scale(LogScale::both(true));

        let plot = JointPlot::build(&x, &y, &config).unwrap();
        let cmap = Colormap::from_name("inferno_r").unwrap();

        assert_eq!(plot.colorbar.label, "log10(N)");
        assert_relative_eq!(
            plot.colorbar.scale.vmax,
            (plot.density.grid.max_count() as f64).log10()
        );
        assert_rgb_close(plot.hist_x.color, cmap.eval(0.7));
        assert_eq!(plot.hist_y.color, plot.hist_x.color);
        assert_eq!(plot.hist_x.axes.y_range.0, LOG_COUNT_BASE);
    }

    #[test]
    fn test_explicit_limits_drop_outside_samples() {
        let x = [0.0, 0.5, 5.0];
        let y = [0.0, -0.5, 0.0];
        let config = JointPlotConfig::default().plot_limits(1.0).gridsize(10);

        let plot = JointPlot::build(&x, &y, &config).unwrap();

        assert_eq!(plot.density.grid.total_count(), 2);
        assert_eq!(plot.hist_x.histogram.counts.iter().sum::<usize>(), 2);
    }

    #[test]
    fn test_build_rejects_bad_input() {
        let cfg = JointPlotConfig::default();
        assert!(matches!(
            JointPlot::build(&[1.0, 2.0], &[1.0], &cfg),
            Err(PlotError::LengthMismatch { .. })
        ));
        assert!(matches!(
            JointPlot::build(&[], &[], &cfg),
            Err(PlotError::EmptyDataset)
        ));
        assert!(matches!(
            JointPlot::build(&[1.0], &[1.0], &cfg.clone().cmap("jet")),
            Err(PlotError::UnknownColormap { .. })
        ));
        assert!(JointPlot::build(&[1.0], &[1.0], &cfg.clone().marginal_bins(0)).is_err());

        let mut bad_alpha = cfg.clone();
        bad_alpha.alpha_hexbin = 1.5;
        assert!(matches!(
            JointPlot::build(&[1.0], &[1.0], &bad_alpha),
            Err(PlotError::Validation(_))
        ));
    }

    #[test]
    fn test_colorbar_ticks() {
        let plot = JointPlot::build(&[0.0, 0.0, 0.1], &[0.0, 0.0, 0.1], &JointPlotConfig::default()).unwrap();
        let ticks = plot.colorbar.ticks(3);
        assert_eq!(ticks.len(), 3);
        assert_eq!(ticks[0], 0.0);
        assert_eq!(*ticks.last().unwrap(), plot.colorbar.scale.vmax);
    }

    #[test]
    fn test_config_partial_json() {
        let cfg: JointPlotConfig =
            serde_json::from_str(r#"{"gridsize": 30, "log_scale": {"cmap": true}}"#).unwrap();
        assert_eq!(cfg.gridsize, 30);
        assert!(cfg.log_scale.cmap);
        assert!(!cfg.log_scale.marginals);
        assert_eq!(cfg.cmap, "inferno_r");
    }
}
