//! Reusable UI widgets for qplots

mod colorbar;
mod range_controls;

pub use colorbar::ColorBarWidget;
pub use range_controls::RangeControls;
