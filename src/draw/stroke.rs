//! Stroke data: committed point sequences plus their paint and line style.

use super::color::Color;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Line cap applied to stroke endpoints.
///
/// Mirrors the Cairo cap styles; serialized in config as lowercase names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum LineCap {
    /// Stroke ends exactly at the endpoint
    Butt,
    /// Stroke ends with a half circle centered on the endpoint
    Round,
    /// Stroke ends with a square extending half the width past the endpoint
    Square,
}

impl From<LineCap> for cairo::LineCap {
    fn from(cap: LineCap) -> Self {
        match cap {
            LineCap::Butt => cairo::LineCap::Butt,
            LineCap::Round => cairo::LineCap::Round,
            LineCap::Square => cairo::LineCap::Square,
        }
    }
}

/// Line join applied where stroke segments meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum LineJoin {
    /// Sharp corner
    Miter,
    /// Rounded corner
    Round,
    /// Cut-off corner
    Bevel,
}

impl From<LineJoin> for cairo::LineJoin {
    fn from(join: LineJoin) -> Self {
        match join {
            LineJoin::Miter => cairo::LineJoin::Miter,
            LineJoin::Round => cairo::LineJoin::Round,
            LineJoin::Bevel => cairo::LineJoin::Bevel,
        }
    }
}

/// Line style for a stroke: width in pixels plus cap/join behavior.
///
/// Replaced atomically via [`crate::input::ToolState::set_stroke`]; a style
/// change only affects strokes started afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    /// Line width in pixels
    pub width: f64,
    /// Endpoint cap
    pub cap: LineCap,
    /// Segment join
    pub join: LineJoin,
}

impl StrokeStyle {
    pub fn new(width: f64, cap: LineCap, join: LineJoin) -> Self {
        Self { width, cap, join }
    }

    /// Round cap/join marker style at the given width.
    pub fn round(width: f64) -> Self {
        Self::new(width, LineCap::Round, LineJoin::Round)
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::round(5.0)
    }
}

/// One continuous pointer-drag drawing action.
///
/// Paint and style are captured when the drag starts; the stroke is immutable
/// once committed to the canvas history.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    /// Sequence of (x, y) coordinates traced by the pointer
    pub points: Vec<(i32, i32)>,
    /// Paint color (alpha 0.0 marks an eraser stroke)
    pub paint: Color,
    /// Line width/cap/join
    pub style: StrokeStyle,
}

impl Stroke {
    /// Begins a stroke at a single point with the given paint and style.
    pub fn begin(x: i32, y: i32, paint: Color, style: StrokeStyle) -> Self {
        Self {
            points: vec![(x, y)],
            paint,
            style,
        }
    }

    /// Appends the next drag point.
    pub fn push_point(&mut self, x: i32, y: i32) {
        self.points.push((x, y));
    }

    /// Whether the stroke erases (restores transparency) instead of painting.
    pub fn is_eraser(&self) -> bool {
        self.paint.is_transparent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{RED, TRANSPARENT};

    #[test]
    fn begin_seeds_first_point() {
        let stroke = Stroke::begin(10, 20, RED, StrokeStyle::round(5.0));
        assert_eq!(stroke.points, vec![(10, 20)]);
        assert!(!stroke.is_eraser());
    }

    #[test]
    fn zero_alpha_paint_is_eraser() {
        let stroke = Stroke::begin(0, 0, TRANSPARENT, StrokeStyle::round(30.0));
        assert!(stroke.is_eraser());
    }
}
