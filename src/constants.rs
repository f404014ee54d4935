//! Library-wide constants and default values
//!
//! Layout numbers are fractions of the figure with the origin at the
//! bottom-left corner.

/// Joint plot defaults
pub mod joint {
    /// Default number of marginal histogram bins
    pub const DEFAULT_MARGINAL_BINS: usize = 50;

    /// Default hexagon count along the x axis
    pub const DEFAULT_GRIDSIZE: usize = 50;

    /// Default colour map
    pub const DEFAULT_CMAP: &str = "inferno_r";

    /// Default figure size in inches
    pub const DEFAULT_FIGSIZE: (f32, f32) = (6.0, 6.0);

    /// Default font size in points
    pub const DEFAULT_FONT_SIZE: f32 = 8.0;

    /// Default hexbin opacity
    pub const DEFAULT_ALPHA_HEXBIN: f32 = 0.8;

    /// Default marginal histogram opacity
    pub const DEFAULT_ALPHA_MARGINALS: f32 = 0.7;

    /// Auto limits are this factor times the largest absolute sample
    pub const AUTO_LIMIT_FACTOR: f64 = 1.1;

    /// Colour-map position of the marginal colour on a linear colour scale
    pub const MARGINAL_COLOR_LINEAR: f64 = 0.5;

    /// Colour-map position of the marginal colour on a log colour scale
    pub const MARGINAL_COLOR_LOG: f64 = 0.7;

    /// Tick count on the colour bar
    pub const COLORBAR_TICKS: usize = 5;
}

/// Dynamic zoom defaults
pub mod zoom {
    /// Default initial half-width divisor
    pub const DEFAULT_REGION_START_SIZE: f64 = 1000.0;

    /// Default downsampling stride of the overview panel
    pub const DEFAULT_STRIDE: usize = 2000;

    /// Default figure size in inches
    pub const DEFAULT_FIGSIZE: (f32, f32) = (8.0, 6.0);

    /// Overlay opacity
    pub const OVERLAY_ALPHA: f32 = 0.5;

    /// Trace line width in points
    pub const LINE_WIDTH: f32 = 2.0;

    /// Vertical margin added around the data range (fraction of the range)
    pub const AXIS_MARGIN: f64 = 0.05;
}

/// Figure layout fractions
pub mod layout {
    /// Left edge of the density plot and x-marginal
    pub const JOINT_LEFT: f32 = 0.2;

    /// Width of the density plot and x-marginal
    pub const JOINT_WIDTH: f32 = 0.65 - 0.1;

    /// Bottom edge of the density plot and y-marginal
    pub const JOINT_BOTTOM: f32 = 0.1;

    /// Height of the density plot and y-marginal
    pub const JOINT_HEIGHT: f32 = 0.65 - 0.1;

    /// Gap between the density plot and the marginals
    pub const MARGINAL_SEPARATION: f32 = 0.01;

    /// Thickness of the marginal histograms
    pub const MARGINAL_THICKNESS: f32 = 0.2;

    /// Left edge of the colour bar
    pub const COLORBAR_LEFT: f32 = 0.03;

    /// Width of the colour bar
    pub const COLORBAR_WIDTH: f32 = 0.05;

    /// Extra height of the colour bar over the density plot width
    pub const COLORBAR_EXTRA: f32 = 0.02;

    /// Bottom of the subplot area in the zoom figure (space for sliders)
    pub const ZOOM_SUBPLOTS_BOTTOM: f32 = 0.25;

    /// Top of the subplot area in the zoom figure
    pub const ZOOM_SUBPLOTS_TOP: f32 = 0.88;

    /// Left edge of the zoom subplots
    pub const ZOOM_SUBPLOTS_LEFT: f32 = 0.125;

    /// Right edge of the zoom subplots
    pub const ZOOM_SUBPLOTS_RIGHT: f32 = 0.9;

    /// Vertical gap between the zoom subplots (fraction of the mean row height)
    pub const ZOOM_SUBPLOTS_HSPACE: f32 = 0.2;

    /// Center slider rectangle
    pub const CENTER_SLIDER: [f32; 4] = [0.25, 0.1, 0.65, 0.03];

    /// Width slider rectangle
    pub const WIDTH_SLIDER: [f32; 4] = [0.25, 0.15, 0.65, 0.03];

    /// Reset button rectangle
    pub const RESET_BUTTON: [f32; 4] = [0.8, 0.025, 0.1, 0.04];

    /// Logical pixels per figure inch
    pub const PIXELS_PER_INCH: f32 = 100.0;
}

/// Configuration file paths
pub mod config {
    /// Configuration file name
    pub const CONFIG_FILE: &str = "qplots.json";
}
