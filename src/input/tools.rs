//! Active paint and stroke style.

use crate::draw::{Color, StrokeStyle};

/// The current tool selection: one paint and one stroke style.
///
/// Both are replaced atomically and only consulted when a new stroke starts;
/// the in-progress stroke copied them at press time, so changing either
/// mid-drag never affects it.
#[derive(Debug, Clone, Copy)]
pub struct ToolState {
    paint: Color,
    stroke: StrokeStyle,
}

impl ToolState {
    pub fn new(paint: Color, stroke: StrokeStyle) -> Self {
        Self { paint, stroke }
    }

    /// Replaces the active paint. Any color is accepted.
    pub fn set_paint(&mut self, paint: Color) {
        self.paint = paint;
    }

    /// Replaces the active stroke style. Any width is accepted.
    pub fn set_stroke(&mut self, stroke: StrokeStyle) {
        self.stroke = stroke;
    }

    pub fn paint(&self) -> Color {
        self.paint
    }

    pub fn stroke(&self) -> StrokeStyle {
        self.stroke
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLUE, RED};

    #[test]
    fn set_paint_replaces_whole_paint() {
        let mut tools = ToolState::new(RED, StrokeStyle::round(5.0));
        tools.set_paint(BLUE.with_alpha(0.5));
        assert_eq!(tools.paint(), BLUE.with_alpha(0.5));
        // Stroke style untouched
        assert_eq!(tools.stroke().width, 5.0);
    }

    #[test]
    fn set_stroke_replaces_whole_style() {
        let mut tools = ToolState::new(RED, StrokeStyle::round(5.0));
        tools.set_stroke(StrokeStyle::round(30.0));
        assert_eq!(tools.stroke().width, 30.0);
        assert_eq!(tools.paint(), RED);
    }
}
