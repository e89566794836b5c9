//! Configuration type definitions.

use super::enums::{ColorSpec, PanelPosition};
use crate::draw::{LineCap, LineJoin};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Controls the tool state the overlay starts with. Users change these at
/// runtime through the panel or keybindings.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Default paint - either a named palette color (red, orange, yellow,
    /// green, blue, magenta, black, white) or an RGB array like `[255, 0, 0]`
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Default stroke width in pixels (valid range: 1.0 - 100.0)
    #[serde(default = "default_width")]
    pub default_width: f64,

    /// Stroke endpoint cap: "butt", "round", or "square"
    #[serde(default = "default_cap")]
    pub cap: LineCap,

    /// Stroke segment join: "miter", "round", or "bevel"
    #[serde(default = "default_join")]
    pub join: LineJoin,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            default_width: default_width(),
            cap: default_cap(),
            join: default_join(),
        }
    }
}

/// Controller panel preferences.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct PanelConfig {
    /// Show the panel when the overlay opens
    #[serde(default = "default_panel_visible")]
    pub visible: bool,

    /// Panel corner (top-left, top-right, bottom-left, bottom-right)
    #[serde(default = "default_panel_position")]
    pub position: PanelPosition,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            visible: default_panel_visible(),
            position: default_panel_position(),
        }
    }
}

/// Image export settings.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SaveConfig {
    /// Directory exported images are written to ("~" expands to $HOME)
    #[serde(default = "default_save_directory")]
    pub directory: String,

    /// Filename template (supports chrono format specifiers); ".png" is
    /// appended
    #[serde(default = "default_filename_template")]
    pub filename_template: String,
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            directory: default_save_directory(),
            filename_template: default_filename_template(),
        }
    }
}

/// Performance tuning options.
///
/// These settings control rendering performance and smoothness. Most users
/// won't need to change these from their defaults.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct PerformanceConfig {
    /// Number of shm buffers (valid range: 2 - 4)
    /// - 2 = double buffering (lower memory, potential tearing)
    /// - 3 = triple buffering (balanced, recommended)
    /// - 4 = quad buffering (highest memory, smoothest)
    #[serde(default = "default_buffer_count")]
    pub buffer_count: u32,

    /// Enable vsync frame synchronization to prevent tearing
    /// Set to false for lower latency at the cost of potential tearing
    #[serde(default = "default_enable_vsync")]
    pub enable_vsync: bool,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            buffer_count: default_buffer_count(),
            enable_vsync: default_enable_vsync(),
        }
    }
}

fn default_color() -> ColorSpec {
    ColorSpec::Name("red".to_string())
}

fn default_width() -> f64 {
    5.0
}

fn default_cap() -> LineCap {
    LineCap::Round
}

fn default_join() -> LineJoin {
    LineJoin::Round
}

fn default_panel_visible() -> bool {
    true
}

fn default_panel_position() -> PanelPosition {
    PanelPosition::TopRight
}

fn default_save_directory() -> String {
    "~/Pictures/Glassmark".to_string()
}

fn default_filename_template() -> String {
    "annotation_%Y-%m-%d_%H%M%S".to_string()
}

fn default_buffer_count() -> u32 {
    3
}

fn default_enable_vsync() -> bool {
    true
}
