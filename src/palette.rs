//! The data-driven paint palette shared by the panel and the keybindings.
//!
//! One table defines every selectable paint: the opaque pens, the
//! half-alpha highlighters, and the eraser. The panel renders its swatch
//! grids from this table and keyboard color actions resolve into it, so
//! adding a paint means adding one row here.

use crate::draw::Color;

/// Highlighter swatch alpha (matches the classic 128/255 overlay marking).
pub const HIGHLIGHTER_ALPHA: f64 = 0.5;

/// What kind of paint a palette entry is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintKind {
    /// Fully opaque marker
    Pen,
    /// Semi-transparent overlay marker
    Highlighter,
    /// Zero-alpha paint that restores transparency
    Eraser,
}

/// One selectable paint: a name for lookup, base RGB, alpha, and kind.
#[derive(Debug, Clone, Copy)]
pub struct PaletteEntry {
    /// Lookup name, also used for logging
    pub name: &'static str,
    /// Base color components (alpha ignored; see `alpha`)
    pub rgb: (f64, f64, f64),
    /// Paint alpha
    pub alpha: f64,
    pub kind: PaintKind,
}

impl PaletteEntry {
    const fn new(name: &'static str, rgb: (f64, f64, f64), alpha: f64, kind: PaintKind) -> Self {
        Self {
            name,
            rgb,
            alpha,
            kind,
        }
    }

    /// The paint this entry selects.
    pub fn paint(&self) -> Color {
        Color::new(self.rgb.0, self.rgb.1, self.rgb.2, self.alpha)
    }
}

/// The full palette, pens first, then highlighters, eraser last.
pub const PALETTE: &[PaletteEntry] = &[
    PaletteEntry::new("red", (1.0, 0.0, 0.0), 1.0, PaintKind::Pen),
    PaletteEntry::new("orange", (1.0, 0.5, 0.0), 1.0, PaintKind::Pen),
    PaletteEntry::new("yellow", (1.0, 1.0, 0.0), 1.0, PaintKind::Pen),
    PaletteEntry::new("green", (0.0, 1.0, 0.0), 1.0, PaintKind::Pen),
    PaletteEntry::new("blue", (0.0, 0.0, 1.0), 1.0, PaintKind::Pen),
    PaletteEntry::new("magenta", (1.0, 0.0, 1.0), 1.0, PaintKind::Pen),
    PaletteEntry::new("black", (0.0, 0.0, 0.0), 1.0, PaintKind::Pen),
    PaletteEntry::new("white", (1.0, 1.0, 1.0), 1.0, PaintKind::Pen),
    PaletteEntry::new("red", (1.0, 0.0, 0.0), HIGHLIGHTER_ALPHA, PaintKind::Highlighter),
    PaletteEntry::new("orange", (1.0, 0.5, 0.0), HIGHLIGHTER_ALPHA, PaintKind::Highlighter),
    PaletteEntry::new("yellow", (1.0, 1.0, 0.0), HIGHLIGHTER_ALPHA, PaintKind::Highlighter),
    PaletteEntry::new("green", (0.0, 1.0, 0.0), HIGHLIGHTER_ALPHA, PaintKind::Highlighter),
    PaletteEntry::new("blue", (0.0, 0.0, 1.0), HIGHLIGHTER_ALPHA, PaintKind::Highlighter),
    PaletteEntry::new("eraser", (0.0, 0.0, 0.0), 0.0, PaintKind::Eraser),
];

/// Named stroke width preset.
#[derive(Debug, Clone, Copy)]
pub struct WidthPreset {
    pub name: &'static str,
    pub width: f64,
}

/// The named width presets offered by the panel.
pub const WIDTH_PRESETS: &[WidthPreset] = &[
    WidthPreset {
        name: "Thin",
        width: 5.0,
    },
    WidthPreset {
        name: "Medium",
        width: 15.0,
    },
    WidthPreset {
        name: "Thick",
        width: 30.0,
    },
    WidthPreset {
        name: "Huge",
        width: 70.0,
    },
];

/// Finds a palette entry by name and kind.
pub fn find(name: &str, kind: PaintKind) -> Option<usize> {
    PALETTE
        .iter()
        .position(|entry| entry.kind == kind && entry.name.eq_ignore_ascii_case(name))
}

/// Finds the width preset index whose width equals the given value, if any.
pub fn width_preset_for(width: f64) -> Option<usize> {
    WIDTH_PRESETS
        .iter()
        .position(|preset| (preset.width - width).abs() < f64::EPSILON)
}

/// Maps a named base color to its pen palette entry index.
///
/// Used by the configuration system and the keyboard color actions.
pub fn pen_index(name: &str) -> Option<usize> {
    find(name, PaintKind::Pen)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_covers_pens_highlighters_and_eraser() {
        let pens = PALETTE.iter().filter(|e| e.kind == PaintKind::Pen).count();
        let highlighters = PALETTE
            .iter()
            .filter(|e| e.kind == PaintKind::Highlighter)
            .count();
        let erasers = PALETTE
            .iter()
            .filter(|e| e.kind == PaintKind::Eraser)
            .count();
        assert_eq!(pens, 8);
        assert_eq!(highlighters, 5);
        assert_eq!(erasers, 1);
    }

    #[test]
    fn eraser_paint_is_fully_transparent() {
        let idx = find("eraser", PaintKind::Eraser).unwrap();
        assert!(PALETTE[idx].paint().is_transparent());
    }

    #[test]
    fn highlighters_share_pen_base_colors() {
        for entry in PALETTE.iter().filter(|e| e.kind == PaintKind::Highlighter) {
            let pen = pen_index(entry.name).expect("every highlighter has a pen twin");
            assert_eq!(PALETTE[pen].rgb, entry.rgb);
            assert!(entry.alpha < 1.0);
        }
    }

    #[test]
    fn width_preset_lookup_matches_exact_widths() {
        assert_eq!(width_preset_for(15.0), Some(1));
        assert_eq!(width_preset_for(16.0), None);
    }
}
