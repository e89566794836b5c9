//! Configuration enum types.

use crate::draw::{Color, color::*};
use crate::palette;
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Panel position on screen.
///
/// Controls which corner the controller panel is anchored to.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum PanelPosition {
    /// Top-left corner
    TopLeft,
    /// Top-right corner
    TopRight,
    /// Bottom-left corner
    BottomLeft,
    /// Bottom-right corner
    BottomRight,
}

/// Color specification - either a named color or RGB values.
///
/// # Examples
/// ```toml
/// # Named color (resolved through the pen palette)
/// default_color = "red"
///
/// # Custom RGB color (0-255 per component)
/// default_color = [255, 128, 0]  # Orange
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color: red, orange, yellow, green, blue, magenta, black, white
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the color specification to a [`Color`].
    ///
    /// Named colors resolve through the pen palette; unknown names fall back
    /// to red with a warning. RGB arrays are converted from 0-255 to 0.0-1.0
    /// with full opacity.
    pub fn to_color(&self) -> Color {
        match self {
            ColorSpec::Name(name) => match palette::pen_index(name) {
                Some(idx) => palette::PALETTE[idx].paint(),
                None => {
                    warn!("Unknown color '{}', using red", name);
                    RED
                }
            },
            ColorSpec::Rgb([r, g, b]) => Color {
                r: *r as f64 / 255.0,
                g: *g as f64 / 255.0,
                b: *b as f64 / 255.0,
                a: 1.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_color_resolves_through_palette() {
        let spec = ColorSpec::Name("blue".to_string());
        assert_eq!(spec.to_color(), BLUE);
    }

    #[test]
    fn unknown_name_falls_back_to_red() {
        let spec = ColorSpec::Name("plaid".to_string());
        assert_eq!(spec.to_color(), RED);
    }

    #[test]
    fn rgb_array_scales_components() {
        let spec = ColorSpec::Rgb([255, 0, 128]);
        let color = spec.to_color();
        assert_eq!(color.r, 1.0);
        assert_eq!(color.g, 0.0);
        assert!((color.b - 128.0 / 255.0).abs() < 1e-9);
        assert_eq!(color.a, 1.0);
    }
}
