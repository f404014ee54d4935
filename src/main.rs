//! qplots - joint density plots and a dynamic-zoom viewer from the command line

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use qplots::constants::config::CONFIG_FILE;
use qplots::data::{DataSource, synthetic};
use qplots::{Colormap, LogScale, PlotConfig, PlotError, Theme};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "qplots")]
#[command(about = "Joint density plots and dynamic-zoom time-series viewers", long_about = None)]
struct Cli {
    /// JSON configuration file (defaults to ./qplots.json when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the configured theme
    #[arg(long, global = true, value_parser = parse_theme)]
    theme: Option<Theme>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hexbin density plot with marginal histograms and a colour bar
    Joint {
        #[command(flatten)]
        input: Input,

        /// Number of synthetic normal samples when no file is given
        #[arg(long, default_value_t = 1000)]
        samples: usize,

        /// Seed for the synthetic samples
        #[arg(long)]
        seed: Option<u64>,

        /// Hexagons across the x range
        #[arg(long)]
        gridsize: Option<usize>,

        /// Marginal histogram bins
        #[arg(long)]
        bins: Option<usize>,

        /// Symmetric plot half-extent
        #[arg(long)]
        limits: Option<f64>,

        /// Log colour scale and log marginal counts
        #[arg(long)]
        log_scale: bool,

        /// Colour map name (append _r to reverse)
        #[arg(long)]
        cmap: Option<String>,

        /// Figure title
        #[arg(long)]
        title: Option<String>,

        /// Write the figure to this PNG file and close the window
        #[arg(long, value_name = "PATH")]
        save: Option<PathBuf>,
    },
    /// Overview/detail viewer with range sliders
    Zoom {
        #[command(flatten)]
        input: Input,

        /// Overview shows every N-th sample
        #[arg(long)]
        stride: Option<usize>,

        /// Initial half-width is len / N
        #[arg(long)]
        region_start_size: Option<f64>,
    },
    /// Write the effective configuration as JSON and exit
    SaveConfig {
        /// Destination file
        path: PathBuf,
    },
}

/// Columns to read from a CSV or Parquet file
#[derive(Args, Debug)]
struct Input {
    /// CSV or Parquet file; synthetic data is used when omitted
    #[arg(long)]
    file: Option<PathBuf>,

    /// Column plotted on the x axis
    #[arg(long, requires = "file")]
    x: Option<String>,

    /// Column plotted on the y axis
    #[arg(long, requires = "file")]
    y: Option<String>,
}

fn parse_theme(s: &str) -> std::result::Result<Theme, String> {
    serde_json::from_value(serde_json::Value::String(s.to_lowercase()))
        .map_err(|_| format!("unknown theme '{}', expected ticks, light or dark", s))
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", error_report(&err));
            ExitCode::FAILURE
        }
    }
}

/// Text printed once for a failed run
fn error_report(err: &anyhow::Error) -> String {
    match err.downcast_ref::<PlotError>() {
        Some(plot_err) => {
            let mut report = format!("{}: {}", plot_err.title(), plot_err.user_message());
            if matches!(plot_err, PlotError::UnknownColormap { .. }) {
                let names: Vec<_> = Colormap::available().collect();
                report.push_str(&format!(
                    "\nAvailable colour maps: {} (append _r to reverse)",
                    names.join(", ")
                ));
            }
            report
        }
        None => format!("Error: {:#}", err),
    }
}

fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("qplots=info")),
        )
        .init();

    #[cfg(feature = "profile-with-puffin")]
    let _puffin_server = start_puffin_server();

    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(theme) = cli.theme {
        config.joint.theme = theme;
        config.zoom.theme = theme;
    }

    match cli.command {
        Command::Joint {
            input,
            samples,
            seed,
            gridsize,
            bins,
            limits,
            log_scale,
            cmap,
            title,
            save,
        } => {
            let mut joint = config.joint;
            if let Some(g) = gridsize {
                joint = joint.gridsize(g);
            }
            if let Some(b) = bins {
                joint = joint.marginal_bins(b);
            }
            if let Some(l) = limits {
                joint = joint.plot_limits(l);
            }
            if log_scale {
                joint = joint.log_scale(LogScale::both(true));
            }
            if let Some(c) = cmap {
                joint = joint.cmap(c);
            }

            let mut plot = match input.file {
                Some(path) => {
                    let source = DataSource::load(&path)
                        .with_context(|| format!("Failed to load {}", path.display()))?;
                    let (x, y) = pick_columns(&source, input.x, input.y)?;
                    qplots::joint_plot_from(&source, &x, &y, &joint)
                        .with_context(|| format!("Failed to plot '{}' against '{}'", y, x))?
                }
                None => {
                    tracing::info!(samples, "no input file, using standard normal samples");
                    let x = synthetic::standard_normal(samples, seed);
                    let y = synthetic::standard_normal(samples, seed.map(|s| s.wrapping_add(1)));
                    let mut plot =
                        qplots::joint_plot(&x, &y, &joint).context("Failed to build joint plot")?;
                    plot.density.axes.x_label = Some("x".to_string());
                    plot.density.axes.y_label = Some("y".to_string());
                    plot
                }
            };
            if title.is_some() {
                plot.figure.title = title;
            }

            match save {
                Some(path) => plot
                    .save(&path)
                    .with_context(|| format!("Failed to save {}", path.display()))?,
                None => plot.show().context("Joint plot window failed")?,
            }
        }
        Command::Zoom {
            input,
            stride,
            region_start_size,
        } => {
            let mut zoom = config.zoom;
            if let Some(s) = stride {
                zoom.stride = s;
            }
            if let Some(r) = region_start_size {
                zoom.region_start_size = r;
            }

            let (x, y) = match input.file {
                Some(path) => load_columns(&path, input.x, input.y)?,
                None => {
                    tracing::info!("no input file, using a 5 Hz sine trace");
                    synthetic::sine_trace(5.0, 5.0, 1e-5, 1.0)
                }
            };

            qplots::dynamic_zoom_plot_with(&x, &y, &zoom)
                .context("Dynamic zoom viewer failed")?;
        }
        Command::SaveConfig { path } => {
            config
                .save(&path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Configuration written to {}", path.display());
        }
    }

    Ok(())
}

/// An explicit `--config` must exist; the default file is optional
fn load_config(path: Option<&Path>) -> Result<PlotConfig> {
    match path {
        Some(path) => PlotConfig::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => PlotConfig::load_or_default(Path::new(CONFIG_FILE))
            .with_context(|| format!("Failed to load {}", CONFIG_FILE)),
    }
}

/// Column names to plot; without names the first two columns are used
fn pick_columns(
    source: &DataSource,
    x: Option<String>,
    y: Option<String>,
) -> Result<(String, String)> {
    let columns = source.column_names();

    let x = match x {
        Some(x) => x,
        None => columns
            .first()
            .cloned()
            .context("Input file has no columns")?,
    };
    let y = match y {
        Some(y) => y,
        None => columns
            .iter()
            .find(|c| **c != x)
            .cloned()
            .context("Input file needs a second column for y")?,
    };
    Ok((x, y))
}

/// Read the two chosen columns of a file
fn load_columns(path: &Path, x: Option<String>, y: Option<String>) -> Result<(Vec<f64>, Vec<f64>)> {
    let source = DataSource::load(path).with_context(|| format!("Failed to load {}", path.display()))?;
    let (x, y) = pick_columns(&source, x, y)?;
    source
        .xy_columns(&x, &y)
        .with_context(|| format!("Failed to read columns '{}' and '{}'", x, y))
}

#[cfg(feature = "profile-with-puffin")]
fn start_puffin_server() -> Option<puffin_http::Server> {
    puffin::set_scopes_on(true);
    match puffin_http::Server::new("127.0.0.1:8585") {
        Ok(server) => {
            tracing::info!("puffin server listening on 127.0.0.1:8585");
            Some(server)
        }
        Err(e) => {
            tracing::warn!("failed to start puffin server: {}", e);
            None
        }
    }
}
