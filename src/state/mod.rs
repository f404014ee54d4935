//! Plot state
//!
//! `joint` holds the options and the computed model of a joint plot; `zoom`
//! holds the per-window session of the dynamic zoom viewer.

pub mod joint;
pub mod zoom;

pub use joint::{
    Axes, ColorBar, ColorScale, DensityPanel, Figure, JointPlot, JointPlotConfig, LogScale,
    MarginalPanel, Orientation,
};
pub use zoom::{ControlEvent, IndexWindow, OverlayRegion, SessionState, ZoomControls, ZoomSession};
