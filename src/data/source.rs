use crate::error::{PlotError, Result};
use polars::prelude::*;
use std::path::{Path, PathBuf};

/// DataSource wraps a materialized Polars DataFrame loaded from disk
pub struct DataSource {
    materialized: DataFrame,
    /// Original file path
    file_path: Option<PathBuf>,
}

impl DataSource {
    /// Load data from a file (CSV or Parquet)
    pub fn load(path: &Path) -> Result<Self> {
        profiling::scope!("DataSource::load");

        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| PlotError::UnsupportedFormat {
                extension: String::new(),
            })?;

        let df = match extension.to_lowercase().as_str() {
            "parquet" => LazyFrame::scan_parquet(path, Default::default())?,
            "csv" => LazyCsvReader::new(path)
                .with_has_header(true)
                .with_infer_schema_length(Some(100))
                .with_try_parse_dates(true)
                .finish()?,
            ext => {
                return Err(PlotError::UnsupportedFormat {
                    extension: ext.to_string(),
                })
            }
        };

        let materialized = df.collect()?;
        tracing::info!(
            path = %path.display(),
            rows = materialized.height(),
            cols = materialized.width(),
            "loaded data file"
        );

        Ok(Self {
            materialized,
            file_path: Some(path.to_path_buf()),
        })
    }

    /// Create DataSource from an already-loaded DataFrame
    pub fn from_dataframe(df: DataFrame) -> Self {
        Self {
            materialized: df,
            file_path: None,
        }
    }

    /// Get all column names
    pub fn column_names(&self) -> Vec<String> {
        self.materialized
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Get the number of rows
    pub fn height(&self) -> usize {
        self.materialized.height()
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    fn column_values(&self, col: &str) -> Result<Series> {
        self.materialized
            .column(col)
            .map(|c| c.as_materialized_series().clone())
            .map_err(|_| PlotError::ColumnNotFound {
                column: col.to_string(),
            })
    }

    /// Get a column's numeric values as Vec<f64>
    /// Non-numeric values are converted to NaN
    /// Datetime/Date columns are converted to Unix timestamps (seconds since epoch)
    pub fn column_as_f64(&self, col: &str) -> Result<Vec<f64>> {
        let series = self.column_values(col)?;

        match series.dtype() {
            DataType::Datetime(unit, _) => {
                let per_second = match unit {
                    TimeUnit::Nanoseconds => 1e9,
                    TimeUnit::Microseconds => 1e6,
                    TimeUnit::Milliseconds => 1e3,
                };
                let timestamps = series
                    .datetime()?
                    .into_iter()
                    .map(|opt| opt.map(|ts| ts as f64 / per_second).unwrap_or(f64::NAN))
                    .collect();
                return Ok(timestamps);
            }
            DataType::Date => {
                let timestamps = series
                    .date()?
                    .into_iter()
                    .map(|opt| opt.map(|days| days as f64 * 86400.0).unwrap_or(f64::NAN))
                    .collect();
                return Ok(timestamps);
            }
            _ => {}
        }

        match series.cast(&DataType::Float64) {
            Ok(s) => Ok(s
                .f64()?
                .into_iter()
                .map(|opt| opt.unwrap_or(f64::NAN))
                .collect()),
            Err(_) => {
                // For string columns, try to parse as f64
                if let Ok(str_series) = series.str() {
                    Ok(str_series
                        .into_iter()
                        .map(|opt| opt.and_then(|s| s.trim().parse::<f64>().ok()).unwrap_or(f64::NAN))
                        .collect())
                } else {
                    Ok(vec![f64::NAN; series.len()])
                }
            }
        }
    }

    /// Extract the two named columns as a plottable pair
    pub fn xy_columns(&self, x: &str, y: &str) -> Result<(Vec<f64>, Vec<f64>)> {
        let xs = self.column_as_f64(x)?;
        let ys = self.column_as_f64(y)?;
        if xs.is_empty() {
            return Err(PlotError::EmptyDataset);
        }
        Ok((xs, ys))
    }
}
