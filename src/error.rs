//! Error types for qplots
//!
//! Every fallible builder and loader returns [`Result`], so malformed input is
//! reported before it reaches the plotting backend.

use thiserror::Error;

/// Main error type for qplots operations
#[derive(Error, Debug)]
pub enum PlotError {
    /// File I/O error
    #[error("Failed to access file: {0}")]
    FileIo(#[from] std::io::Error),

    /// Polars data processing error
    #[error("Data processing error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The native window could not be created or crashed
    #[error("Display error: {0}")]
    Display(String),

    /// A figure could not be written as an image
    #[error("Image export error: {0}")]
    ImageExport(String),

    /// Unsupported file format
    #[error("Unsupported file format: {extension}")]
    UnsupportedFormat { extension: String },

    /// Column not found in data
    #[error("Column '{column}' not found in dataset")]
    ColumnNotFound { column: String },

    /// Empty dataset error
    #[error("Dataset is empty or has no rows")]
    EmptyDataset,

    /// The two series of a plot differ in length
    #[error("Series lengths differ: x has {x_len} samples, y has {y_len}")]
    LengthMismatch { x_len: usize, y_len: usize },

    /// Insufficient data for operation
    #[error("Insufficient data: {operation} requires at least {required} points, but got {actual}")]
    InsufficientData {
        operation: String,
        required: usize,
        actual: usize,
    },

    /// Colour map name not known to the colour-map registry
    #[error("Unknown colour map: {name}")]
    UnknownColormap { name: String },

    /// Data or option validation error
    #[error("Data validation failed: {0}")]
    Validation(String),
}

/// Result type alias for qplots operations
pub type Result<T> = std::result::Result<T, PlotError>;

/// UI-friendly error message formatting
impl PlotError {
    /// Get a user-friendly error message suitable for displaying in UI
    pub fn user_message(&self) -> String {
        match self {
            PlotError::FileIo(e) => format!("File error: {}", e),
            PlotError::Polars(e) => format!("Data error: {}", e),
            PlotError::Json(e) => format!("JSON error: {}", e),
            PlotError::Display(e) => format!("Display error: {}", e),
            PlotError::ImageExport(e) => format!("Could not save image: {}", e),
            PlotError::UnsupportedFormat { extension } => {
                format!("Unsupported file format: '.{}'", extension)
            }
            PlotError::ColumnNotFound { column } => {
                format!("Column '{}' not found", column)
            }
            PlotError::EmptyDataset => "Dataset is empty".to_string(),
            PlotError::LengthMismatch { x_len, y_len } => {
                format!("x and y must have the same length ({} vs {})", x_len, y_len)
            }
            PlotError::InsufficientData {
                operation,
                required,
                actual,
            } => {
                format!(
                    "{} requires {} points, but only {} available",
                    operation, required, actual
                )
            }
            PlotError::UnknownColormap { name } => format!("Unknown colour map '{}'", name),
            PlotError::Validation(msg) => format!("Validation error: {}", msg),
        }
    }

    /// Get a short title for the error
    pub fn title(&self) -> &'static str {
        match self {
            PlotError::FileIo(_) => "File Error",
            PlotError::Polars(_) => "Data Error",
            PlotError::Json(_) => "JSON Error",
            PlotError::Display(_) => "Display Error",
            PlotError::ImageExport(_) => "Image Export Error",
            PlotError::UnsupportedFormat { .. } => "Unsupported Format",
            PlotError::ColumnNotFound { .. } => "Column Not Found",
            PlotError::EmptyDataset => "Empty Dataset",
            PlotError::LengthMismatch { .. } => "Length Mismatch",
            PlotError::InsufficientData { .. } => "Insufficient Data",
            PlotError::UnknownColormap { .. } => "Unknown Colour Map",
            PlotError::Validation(_) => "Validation Error",
        }
    }
}

/// Check that two series can be plotted against each other.
pub(crate) fn check_pair(x: &[f64], y: &[f64]) -> Result<()> {
    if x.len() != y.len() {
        return Err(PlotError::LengthMismatch {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    if x.is_empty() {
        return Err(PlotError::EmptyDataset);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PlotError::ColumnNotFound {
            column: "time".to_string(),
        };
        assert_eq!(err.user_message(), "Column 'time' not found");
        assert_eq!(err.title(), "Column Not Found");

        let err = PlotError::InsufficientData {
            operation: "Dynamic zoom".to_string(),
            required: 2,
            actual: 1,
        };
        assert_eq!(
            err.user_message(),
            "Dynamic zoom requires 2 points, but only 1 available"
        );
    }

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let plot_err: PlotError = io_err.into();
        assert!(matches!(plot_err, PlotError::FileIo(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + 'static>() {}
        assert_send_sync::<PlotError>();

        // Errors must survive a round trip through anyhow for the CLI
        let err = anyhow::Error::from(PlotError::EmptyDataset).context("loading");
        assert!(matches!(err.downcast_ref::<PlotError>(), Some(PlotError::EmptyDataset)));
    }

    #[test]
    fn test_check_pair() {
        assert!(check_pair(&[1.0, 2.0], &[3.0, 4.0]).is_ok());
        assert!(matches!(
            check_pair(&[1.0], &[1.0, 2.0]),
            Err(PlotError::LengthMismatch { x_len: 1, y_len: 2 })
        ));
        assert!(matches!(check_pair(&[], &[]), Err(PlotError::EmptyDataset)));
    }
}
