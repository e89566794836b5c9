//! Configuration file support for glassmark.
//!
//! This module handles loading and validating user settings from the
//! configuration file at `~/.config/glassmark/config.toml`. Settings include
//! drawing defaults, panel placement, export location, performance tuning,
//! and keybindings.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod keybindings;
pub mod types;

// Re-export commonly used types at module level
pub use enums::{ColorSpec, PanelPosition};
pub use keybindings::{Action, KeyBinding, KeybindingsConfig};
pub use types::{DrawingConfig, PanelConfig, PerformanceConfig, SaveConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main configuration structure containing all user settings.
///
/// This is the root type deserialized from the TOML file. All fields have
/// defaults and are used when not specified in the file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_color = "red"
/// default_width = 5.0
///
/// [panel]
/// visible = true
/// position = "top-right"
///
/// [save]
/// directory = "~/Pictures/Glassmark"
/// filename_template = "annotation_%Y-%m-%d_%H%M%S"
///
/// [performance]
/// buffer_count = 3
/// enable_vsync = true
/// ```
#[derive(Debug, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Drawing tool defaults (paint, width, cap/join)
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Controller panel preferences
    #[serde(default)]
    pub panel: PanelConfig,

    /// Image export settings
    #[serde(default)]
    pub save: SaveConfig,

    /// Performance tuning options
    #[serde(default)]
    pub performance: PerformanceConfig,

    /// Keybinding overrides
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

impl Config {
    /// Validates and clamps configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value with a warning,
    /// so a bad config never produces undefined rendering behavior.
    ///
    /// Validated ranges:
    /// - `default_width`: 1.0 - 100.0
    /// - `buffer_count`: 2 - 4
    fn validate_and_clamp(&mut self) {
        if !(1.0..=100.0).contains(&self.drawing.default_width) {
            log::warn!(
                "Invalid default_width {:.1}, clamping to 1.0-100.0 range",
                self.drawing.default_width
            );
            self.drawing.default_width = self.drawing.default_width.clamp(1.0, 100.0);
        }

        if !(2..=4).contains(&self.performance.buffer_count) {
            log::warn!(
                "Invalid buffer_count {}, clamping to 2-4 range",
                self.performance.buffer_count
            );
            self.performance.buffer_count = self.performance.buffer_count.clamp(2, 4);
        }

        if self.save.filename_template.trim().is_empty() {
            log::warn!("Empty filename_template, falling back to default");
            self.save.filename_template = SaveConfig::default().filename_template;
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// Uses `$XDG_CONFIG_HOME/glassmark/config.toml`, falling back to
    /// `~/.config/glassmark/config.toml`.
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join("glassmark").join("config.toml"))
    }

    /// Loads the configuration from disk, falling back to defaults when the
    /// file does not exist.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// JSON schema for the configuration file, for external tooling.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let mut config = Config::default();
        config.validate_and_clamp();
        assert_eq!(config.drawing.default_width, 5.0);
        assert_eq!(config.performance.buffer_count, 3);
        assert!(config.performance.enable_vsync);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut config = Config::default();
        config.drawing.default_width = 500.0;
        config.performance.buffer_count = 10;
        config.validate_and_clamp();
        assert_eq!(config.drawing.default_width, 100.0);
        assert_eq!(config.performance.buffer_count, 4);
    }

    #[test]
    fn empty_filename_template_restored() {
        let mut config = Config::default();
        config.save.filename_template = "   ".to_string();
        config.validate_and_clamp();
        assert!(!config.save.filename_template.trim().is_empty());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [drawing]
            default_color = "blue"
            "#,
        )
        .unwrap();
        assert_eq!(config.drawing.default_width, 5.0);
        assert!(config.panel.visible);
    }

    #[test]
    fn rgb_color_spec_parses() {
        let config: Config = toml::from_str(
            r#"
            [drawing]
            default_color = [255, 128, 0]
            "#,
        )
        .unwrap();
        let color = config.drawing.default_color.to_color();
        assert_eq!(color.r, 1.0);
        assert_eq!(color.a, 1.0);
    }

    #[test]
    fn json_schema_is_generated() {
        let schema = Config::json_schema();
        let value = serde_json::to_value(&schema).unwrap();
        assert!(value.get("properties").is_some());
    }
}
