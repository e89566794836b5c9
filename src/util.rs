//! Small path and color helpers shared across modules.

use std::path::PathBuf;

use crate::draw::Color;
use crate::palette::{PALETTE, PaintKind};

/// Expands a leading tilde (`~/`) in path strings to the home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

/// Maps a paint to a human-readable name for logging.
///
/// Palette paints resolve to their table names; anything else is "custom".
pub fn color_to_name(color: &Color) -> &'static str {
    if color.is_transparent() {
        return "eraser";
    }
    for entry in PALETTE {
        if entry.kind != PaintKind::Eraser && entry.paint() == *color {
            return entry.name;
        }
    }
    "custom"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{RED, TRANSPARENT};

    #[test]
    fn tilde_expansion() {
        let expanded = expand_tilde("~/Pictures");
        assert!(!expanded.to_string_lossy().starts_with('~'));

        let absolute = expand_tilde("/absolute/path");
        assert_eq!(absolute, PathBuf::from("/absolute/path"));
    }

    #[test]
    fn palette_paints_have_names() {
        assert_eq!(color_to_name(&RED), "red");
        assert_eq!(color_to_name(&TRANSPARENT), "eraser");
        assert_eq!(color_to_name(&Color::new(0.3, 0.3, 0.3, 1.0)), "custom");
    }
}
