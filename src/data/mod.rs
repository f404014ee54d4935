pub mod binning;
pub mod downsample;
pub mod nearest;
pub mod source;
pub mod synthetic;

// Re-export key types for convenience
pub use binning::{Extent, HexCell, HexGrid, Histogram};
pub use nearest::{closest_index, take_closest};
pub use source::DataSource;
