//! qplots: joint density plots and a dynamic-zoom time-series viewer
//!
//! [`joint_plot`] bins two series into hexagons, adds a marginal histogram
//! per variable and a colour bar, and returns a [`JointPlot`] whose panels
//! can be decorated before [`JointPlot::show`] opens the window or
//! [`JointPlot::save`] writes it to a PNG file. [`joint_plot_from`] does the
//! same for two columns of a [`DataSource`].
//!
//! [`dynamic_zoom_plot`] opens an overview/detail viewer: the top panel shows
//! every `stride`-th sample with a band marking the window shown below, and
//! two sliders plus a reset button move that window.
//!
//! ```no_run
//! let x = qplots::data::synthetic::standard_normal(1000, None);
//! let y = qplots::data::synthetic::standard_normal(1000, None);
//! let mut plot = qplots::joint_plot(&x, &y, &qplots::JointPlotConfig::default())?;
//! plot.density.axes.x_label = Some("x".into());
//! plot.show()?;
//! # Ok::<(), qplots::PlotError>(())
//! ```

pub mod app;
pub mod colormap;
pub mod config;
pub mod constants;
pub mod data;
pub mod error;
pub mod export;
pub mod layout;
pub mod state;
pub mod ui;
pub mod widgets;

pub use colormap::Colormap;
pub use config::{PlotConfig, ZoomConfig};
pub use data::DataSource;
pub use error::{PlotError, Result};
pub use state::{
    ControlEvent, IndexWindow, JointPlot, JointPlotConfig, LogScale, OverlayRegion, ZoomControls,
    ZoomSession,
};
pub use ui::theme::Theme;

/// The dynamic zoom session, usable without opening a window
pub type DynamicZoom<'a> = ZoomSession<'a>;

/// Compute a joint plot of `x` against `y`
pub fn joint_plot(x: &[f64], y: &[f64], config: &JointPlotConfig) -> Result<JointPlot> {
    JointPlot::build(x, y, config)
}

/// Joint plot of two columns of `source`
///
/// The column names become the axis labels and a file-backed source names the
/// figure after its file stem.
pub fn joint_plot_from(
    source: &DataSource,
    x: &str,
    y: &str,
    config: &JointPlotConfig,
) -> Result<JointPlot> {
    let (xs, ys) = source.xy_columns(x, y)?;
    let mut plot = JointPlot::build(&xs, &ys, config)?;
    plot.density.axes.x_label = Some(x.to_string());
    plot.density.axes.y_label = Some(y.to_string());
    plot.figure.title = source
        .file_path()
        .and_then(|p| p.file_stem())
        .map(|stem| stem.to_string_lossy().into_owned());
    Ok(plot)
}

/// Open a dynamic zoom viewer; blocks until the window is closed
pub fn dynamic_zoom_plot(x: &[f64], y: &[f64], stride: usize, region_start_size: f64) -> Result<()> {
    dynamic_zoom_plot_with(
        x,
        y,
        &ZoomConfig {
            stride,
            region_start_size,
            ..ZoomConfig::default()
        },
    )
}

/// [`dynamic_zoom_plot`] with every option taken from `config`
pub fn dynamic_zoom_plot_with(x: &[f64], y: &[f64], config: &ZoomConfig) -> Result<()> {
    let session = ZoomSession::new(x, y, config.stride, config.region_start_size)?;
    app::show_zoom(session, config.theme, constants::zoom::DEFAULT_FIGSIZE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    #[test]
    fn test_joint_plot_from_dataframe_labels_axes() {
        let df = df!("speed" => [0.1, -0.4, 0.9, 1.2], "load" => [1.0, 0.3, -0.2, 0.5]).unwrap();
        let source = DataSource::from_dataframe(df);

        let plot = joint_plot_from(&source, "speed", "load", &JointPlotConfig::default()).unwrap();
        assert_eq!(plot.density.axes.x_label.as_deref(), Some("speed"));
        assert_eq!(plot.density.axes.y_label.as_deref(), Some("load"));
        assert_eq!(plot.figure.title, None);
    }

    #[test]
    fn test_joint_plot_from_file_uses_stem_as_title() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run_07.csv");
        std::fs::write(&path, "a,b\n1,2\n-1,0.5\n3,-2\n").unwrap();

        let source = DataSource::load(&path).unwrap();
        assert_eq!(source.file_path(), Some(path.as_path()));
        let plot = joint_plot_from(&source, "a", "b", &JointPlotConfig::default()).unwrap();
        assert_eq!(plot.figure.title.as_deref(), Some("run_07"));
    }

    #[test]
    fn test_joint_plot_from_missing_column() {
        let df = df!("a" => [1.0, 2.0]).unwrap();
        let source = DataSource::from_dataframe(df);
        let err = joint_plot_from(&source, "a", "zz", &JointPlotConfig::default()).unwrap_err();
        assert!(matches!(err, PlotError::ColumnNotFound { .. }));
    }
}
