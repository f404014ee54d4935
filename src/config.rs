//! JSON configuration for both plot kinds

use crate::constants::zoom::{DEFAULT_REGION_START_SIZE, DEFAULT_STRIDE};
use crate::error::{PlotError, Result};
use crate::state::JointPlotConfig;
use crate::ui::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options of [`crate::dynamic_zoom_plot`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    /// Overview shows every `stride`-th sample
    pub stride: usize,
    /// Initial half-width is `len / region_start_size`
    pub region_start_size: f64,
    pub theme: Theme,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            stride: DEFAULT_STRIDE,
            region_start_size: DEFAULT_REGION_START_SIZE,
            theme: Theme::default(),
        }
    }
}

/// Contents of a configuration file; missing sections take their defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub joint: JointPlotConfig,
    pub zoom: ZoomConfig,
}

impl PlotConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents)?;
        tracing::info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        tracing::info!(path = %path.display(), "saved configuration");
        Ok(())
    }

    /// Load `path` if it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(PlotError::FileIo(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no configuration file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }
}
