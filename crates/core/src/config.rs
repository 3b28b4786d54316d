use std::path::Path;

use evstory_protocol::Canvas;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("canvas must have a positive size, got {width}x{height}")]
    InvalidCanvas { width: f64, height: f64 },
    #[error("top_n must be at least 1")]
    InvalidTopN,
}

/// Everything that shapes a story besides the data itself.
///
/// Every field has a default, so a config file only needs to name what
/// it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoryConfig {
    pub canvas: Canvas,
    /// Year preselected in the year selector.
    pub initial_year: i32,
    /// Rows whose `parameter` differs are dropped at load time.
    pub parameter: String,
    /// Rows whose `unit` differs are dropped at load time.
    pub unit: String,
    /// Region label holding the global total, plotted by the trend scene.
    pub world_region: String,
    /// Aggregate labels left out of per-country comparisons.
    pub excluded_regions: Vec<String>,
    /// How many countries the ranking scene keeps.
    pub top_n: usize,
    /// Year marked on the trend scene as the start of rapid growth.
    pub annotation_year: i32,
    pub dark: bool,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            initial_year: 2023,
            parameter: "EV sales".into(),
            unit: "Vehicles".into(),
            world_region: "World".into(),
            excluded_regions: vec![
                "World".into(),
                "EU 27".into(),
                "EU27".into(),
                "Europe".into(),
                "Rest of the world".into(),
            ],
            top_n: 15,
            annotation_year: 2020,
            dark: false,
        }
    }
}

impl StoryConfig {
    /// Parse a JSON config, filling unspecified fields with defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let Canvas { width, height } = self.canvas;
        if !(width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidCanvas { width, height });
        }
        if self.top_n == 0 {
            return Err(ConfigError::InvalidTopN);
        }
        Ok(())
    }

    /// Whether `region` is an aggregate rather than a single country.
    pub fn is_excluded(&self, region: &str) -> bool {
        self.excluded_regions.iter().any(|r| r == region)
    }
}
