//! Finder configuration.
//!
//! All fields have defaults, so an empty TOML document is a valid configuration:
//!
//! ```toml
//! max_matches = 100
//! debounce_ms = 200
//!
//! [highlight]
//! inactive = "yellow"
//! active = "#ffa500"
//!
//! [search_box]
//! width = 30
//! margin_top = 1
//! margin_right = 1
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Default cap on match records per scan.
pub const DEFAULT_MAX_MATCHES: usize = 100;

/// Default debounce delay between the last keystroke and the scan.
pub const DEFAULT_DEBOUNCE_MS: u64 = 200;

/// Errors produced while loading a [`FinderConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the config file failed.
    #[error("I/O error reading config: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML or does not match the schema.
    #[error("TOML parse error in config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A field has an unusable value.
    #[error("invalid config: {0}")]
    Validation(String),
}

/// Colors used for highlight regions, as color names or `#rrggbb` strings.
///
/// Interpretation is up to the host surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Background of regions in non-selected matches.
    pub inactive: String,
    /// Background of regions in the selected match.
    pub active: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            inactive: "yellow".to_string(),
            active: "#ffa500".to_string(),
        }
    }
}

/// Placement of the search input box, anchored to the top-right corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchBoxConfig {
    /// Box width in cells.
    pub width: u16,
    /// Distance from the top edge.
    pub margin_top: u16,
    /// Distance from the right edge.
    pub margin_right: u16,
}

impl Default for SearchBoxConfig {
    fn default() -> Self {
        Self {
            width: 30,
            margin_top: 1,
            margin_right: 1,
        }
    }
}

/// Top-level finder configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinderConfig {
    /// Maximum number of matches collected in one scan.
    pub max_matches: usize,
    /// Delay between the last keystroke and the scan, in milliseconds.
    pub debounce_ms: u64,
    /// Highlight colors.
    pub highlight: HighlightConfig,
    /// Search box placement.
    pub search_box: SearchBoxConfig,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            max_matches: DEFAULT_MAX_MATCHES,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            highlight: HighlightConfig::default(),
            search_box: SearchBoxConfig::default(),
        }
    }
}

impl FinderConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        log::info!("loading finder config from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Check field values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_matches == 0 {
            return Err(ConfigError::Validation(
                "max_matches must be at least 1".to_string(),
            ));
        }
        if self.search_box.width == 0 {
            return Err(ConfigError::Validation(
                "search_box.width must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Debounce delay as a [`Duration`].
    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
