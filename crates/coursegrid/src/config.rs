//! Configuration types for the schedule grid.
//!
//! All types implement [`serde::Deserialize`] for loading from external
//! sources such as a TOML file.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining grid and style settings.
//! - [`GridConfig`] - Controls which day columns the grid produces.
//! - [`StyleConfig`] - Colors used by renderers of the grid.
//!
//! # Example
//!
//! ```
//! # use coursegrid::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(!config.grid().include_saturday());
//! assert!(config.style().background_color().is_ok());
//! ```

use std::str::FromStr;

use color::DynamicColor;
use serde::Deserialize;

/// Top-level application configuration combining grid and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    grid: GridConfig,

    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(grid: GridConfig, style: StyleConfig) -> Self {
        Self { grid, style }
    }

    /// Returns the grid configuration.
    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Overrides whether a Saturday column is produced.
    pub fn set_include_saturday(&mut self, include_saturday: bool) {
        self.grid.include_saturday = include_saturday;
    }
}

/// Grid shape settings.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct GridConfig {
    /// Adds a sixth day column for Saturday meetings.
    #[serde(default)]
    include_saturday: bool,
}

impl GridConfig {
    pub fn new(include_saturday: bool) -> Self {
        Self { include_saturday }
    }

    pub fn include_saturday(&self) -> bool {
        self.include_saturday
    }
}

/// Visual styling for rendered grids.
///
/// Fields that are not set fall back to renderer defaults.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Background color, as a CSS color string.
    #[serde(default)]
    background_color: Option<String>,

    /// Tile fill color, as a CSS color string.
    #[serde(default)]
    tile_color: Option<String>,
}

impl StyleConfig {
    pub fn new(background_color: Option<String>, tile_color: Option<String>) -> Self {
        Self {
            background_color,
            tile_color,
        }
    }

    /// Returns the parsed background color, or `None` if none is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a valid CSS color.
    pub fn background_color(&self) -> Result<Option<DynamicColor>, String> {
        parse_color(self.background_color.as_deref(), "background")
    }

    /// Returns the parsed tile color, or `None` if none is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a valid CSS color.
    pub fn tile_color(&self) -> Result<Option<DynamicColor>, String> {
        parse_color(self.tile_color.as_deref(), "tile")
    }
}

fn parse_color(value: Option<&str>, which: &str) -> Result<Option<DynamicColor>, String> {
    value
        .map(DynamicColor::from_str)
        .transpose()
        .map_err(|err| format!("Invalid {which} color in config: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(!config.grid().include_saturday());
        assert!(config.style().background_color().unwrap().is_none());
        assert!(config.style().tile_color().unwrap().is_none());
    }

    #[test]
    fn test_deserialize_full() {
        let config: AppConfig = toml::from_str(
            r##"
            [grid]
            include_saturday = true

            [style]
            background_color = "white"
            tile_color = "#dbe9f6"
            "##,
        )
        .unwrap();

        assert!(config.grid().include_saturday());
        assert!(config.style().background_color().unwrap().is_some());
        assert!(config.style().tile_color().unwrap().is_some());
    }

    #[test]
    fn test_deserialize_partial_uses_defaults() {
        let config: AppConfig = toml::from_str("[style]\n").unwrap();
        assert!(!config.grid().include_saturday());
    }

    #[test]
    fn test_invalid_color_is_reported() {
        let style = StyleConfig::new(Some("not-a-color".to_string()), None);
        let err = style.background_color().unwrap_err();
        assert!(err.contains("background"));
    }

    #[test]
    fn test_set_include_saturday() {
        let mut config = AppConfig::default();
        config.set_include_saturday(true);
        assert!(config.grid().include_saturday());
    }
}
