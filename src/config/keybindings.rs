//! Keybinding configuration types and parsing.
//!
//! Every command in the application is named by an [`Action`]; the panel
//! buttons and the keyboard route through the same dispatch. This module
//! defines the configurable key-to-action mapping and its parser.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All commands that can be bound to keys (and wired to panel buttons).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // History commands
    Undo,
    Redo,
    ClearHistory,

    // Canvas commands
    ClearTransparent,
    ClearWhite,
    Save,

    // Session commands
    Quit,
    TogglePanel,
    BringToFront,
    SendToBack,

    // Stroke width
    IncreaseWidth,
    DecreaseWidth,
    SetWidthThin,
    SetWidthMedium,
    SetWidthThick,
    SetWidthHuge,

    // Paint selection (resolved through the palette table)
    SetColorRed,
    SetColorOrange,
    SetColorYellow,
    SetColorGreen,
    SetColorBlue,
    SetColorMagenta,
    SetColorBlack,
    SetColorWhite,
    ToggleHighlighter,
    SelectEraser,
}

/// A single keybinding: a key name with optional modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyBinding {
    /// Parse a keybinding string like "Ctrl+Shift+Z" or "Escape".
    ///
    /// Modifiers can appear in any order and may be surrounded by spaces
    /// (e.g., "Ctrl + Z"). The key itself may be '+' ("Ctrl++").
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty keybinding string".to_string());
        }

        let normalized = s.replace(" + ", "+").replace("+ ", "+").replace(" +", "+");
        let parts: Vec<&str> = normalized.split('+').collect();

        let mut ctrl = false;
        let mut shift = false;
        let mut alt = false;
        let mut key_parts = Vec::new();

        for part in parts {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => ctrl = true,
                "shift" => shift = true,
                "alt" => alt = true,
                _ => key_parts.push(part),
            }
        }

        if key_parts.is_empty() {
            return Err(format!("No key specified in: {}", s));
        }

        // Joining with '+' recovers the case where '+' itself is the key
        // ("Ctrl++" splits into empty fragments).
        let key = key_parts.join("+");
        let key = if key.is_empty() {
            "+".to_string()
        } else {
            key
        };

        Ok(Self {
            key,
            ctrl,
            shift,
            alt,
        })
    }

    /// Whether this binding matches a pressed key with the given modifiers.
    pub fn matches(&self, key: &str, ctrl: bool, shift: bool, alt: bool) -> bool {
        self.key.eq_ignore_ascii_case(key)
            && self.ctrl == ctrl
            && self.shift == shift
            && self.alt == alt
    }
}

/// Configuration for all keybindings.
///
/// Each action can have multiple keybindings. Users specify them in
/// config.toml as:
/// ```toml
/// [keybindings]
/// undo = ["Ctrl+Z"]
/// quit = ["Escape", "Ctrl+Q"]
/// clear_transparent = ["E"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct KeybindingsConfig {
    #[serde(default = "default_undo")]
    pub undo: Vec<String>,

    #[serde(default = "default_redo")]
    pub redo: Vec<String>,

    #[serde(default = "default_clear_history")]
    pub clear_history: Vec<String>,

    #[serde(default = "default_clear_transparent")]
    pub clear_transparent: Vec<String>,

    #[serde(default = "default_clear_white")]
    pub clear_white: Vec<String>,

    #[serde(default = "default_save")]
    pub save: Vec<String>,

    #[serde(default = "default_quit")]
    pub quit: Vec<String>,

    #[serde(default = "default_toggle_panel")]
    pub toggle_panel: Vec<String>,

    #[serde(default = "default_bring_to_front")]
    pub bring_to_front: Vec<String>,

    #[serde(default = "default_send_to_back")]
    pub send_to_back: Vec<String>,

    #[serde(default = "default_increase_width")]
    pub increase_width: Vec<String>,

    #[serde(default = "default_decrease_width")]
    pub decrease_width: Vec<String>,

    #[serde(default = "default_width_thin")]
    pub width_thin: Vec<String>,

    #[serde(default = "default_width_medium")]
    pub width_medium: Vec<String>,

    #[serde(default = "default_width_thick")]
    pub width_thick: Vec<String>,

    #[serde(default = "default_width_huge")]
    pub width_huge: Vec<String>,

    #[serde(default = "default_color_red")]
    pub color_red: Vec<String>,

    #[serde(default = "default_color_orange")]
    pub color_orange: Vec<String>,

    #[serde(default = "default_color_yellow")]
    pub color_yellow: Vec<String>,

    #[serde(default = "default_color_green")]
    pub color_green: Vec<String>,

    #[serde(default = "default_color_blue")]
    pub color_blue: Vec<String>,

    #[serde(default = "default_color_magenta")]
    pub color_magenta: Vec<String>,

    #[serde(default = "default_color_black")]
    pub color_black: Vec<String>,

    #[serde(default = "default_color_white")]
    pub color_white: Vec<String>,

    #[serde(default = "default_toggle_highlighter")]
    pub toggle_highlighter: Vec<String>,

    #[serde(default = "default_eraser")]
    pub eraser: Vec<String>,
}

fn default_undo() -> Vec<String> {
    vec!["Ctrl+Z".to_string()]
}

fn default_redo() -> Vec<String> {
    vec!["Ctrl+Shift+Z".to_string(), "Ctrl+Y".to_string()]
}

fn default_clear_history() -> Vec<String> {
    vec!["Ctrl+E".to_string()]
}

fn default_clear_transparent() -> Vec<String> {
    vec!["E".to_string()]
}

fn default_clear_white() -> Vec<String> {
    vec!["Shift+E".to_string()]
}

fn default_save() -> Vec<String> {
    vec!["Ctrl+S".to_string()]
}

fn default_quit() -> Vec<String> {
    vec!["Escape".to_string(), "Q".to_string()]
}

fn default_toggle_panel() -> Vec<String> {
    vec!["F10".to_string()]
}

fn default_bring_to_front() -> Vec<String> {
    vec!["F7".to_string()]
}

fn default_send_to_back() -> Vec<String> {
    vec!["F8".to_string()]
}

fn default_increase_width() -> Vec<String> {
    vec!["+".to_string()]
}

fn default_decrease_width() -> Vec<String> {
    vec!["-".to_string()]
}

fn default_width_thin() -> Vec<String> {
    vec!["1".to_string()]
}

fn default_width_medium() -> Vec<String> {
    vec!["2".to_string()]
}

fn default_width_thick() -> Vec<String> {
    vec!["3".to_string()]
}

fn default_width_huge() -> Vec<String> {
    vec!["4".to_string()]
}

fn default_color_red() -> Vec<String> {
    vec!["R".to_string()]
}

fn default_color_orange() -> Vec<String> {
    vec!["O".to_string()]
}

fn default_color_yellow() -> Vec<String> {
    vec!["Y".to_string()]
}

fn default_color_green() -> Vec<String> {
    vec!["G".to_string()]
}

fn default_color_blue() -> Vec<String> {
    vec!["B".to_string()]
}

fn default_color_magenta() -> Vec<String> {
    vec!["M".to_string()]
}

fn default_color_black() -> Vec<String> {
    vec!["K".to_string()]
}

fn default_color_white() -> Vec<String> {
    vec!["W".to_string()]
}

fn default_toggle_highlighter() -> Vec<String> {
    vec!["H".to_string()]
}

fn default_eraser() -> Vec<String> {
    vec!["X".to_string()]
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            undo: default_undo(),
            redo: default_redo(),
            clear_history: default_clear_history(),
            clear_transparent: default_clear_transparent(),
            clear_white: default_clear_white(),
            save: default_save(),
            quit: default_quit(),
            toggle_panel: default_toggle_panel(),
            bring_to_front: default_bring_to_front(),
            send_to_back: default_send_to_back(),
            increase_width: default_increase_width(),
            decrease_width: default_decrease_width(),
            width_thin: default_width_thin(),
            width_medium: default_width_medium(),
            width_thick: default_width_thick(),
            width_huge: default_width_huge(),
            color_red: default_color_red(),
            color_orange: default_color_orange(),
            color_yellow: default_color_yellow(),
            color_green: default_color_green(),
            color_blue: default_color_blue(),
            color_magenta: default_color_magenta(),
            color_black: default_color_black(),
            color_white: default_color_white(),
            toggle_highlighter: default_toggle_highlighter(),
            eraser: default_eraser(),
        }
    }
}

impl KeybindingsConfig {
    /// Builds the key-to-action lookup map, rejecting duplicate bindings.
    pub fn build_action_map(&self) -> Result<HashMap<KeyBinding, Action>, String> {
        let mut map = HashMap::new();

        let mut insert_all = |bindings: &[String], action: Action| -> Result<(), String> {
            for binding_str in bindings {
                let binding = KeyBinding::parse(binding_str)?;
                if let Some(existing) = map.insert(binding, action) {
                    return Err(format!(
                        "Duplicate keybinding '{}' assigned to both {:?} and {:?}",
                        binding_str, existing, action
                    ));
                }
            }
            Ok(())
        };

        insert_all(&self.undo, Action::Undo)?;
        insert_all(&self.redo, Action::Redo)?;
        insert_all(&self.clear_history, Action::ClearHistory)?;
        insert_all(&self.clear_transparent, Action::ClearTransparent)?;
        insert_all(&self.clear_white, Action::ClearWhite)?;
        insert_all(&self.save, Action::Save)?;
        insert_all(&self.quit, Action::Quit)?;
        insert_all(&self.toggle_panel, Action::TogglePanel)?;
        insert_all(&self.bring_to_front, Action::BringToFront)?;
        insert_all(&self.send_to_back, Action::SendToBack)?;
        insert_all(&self.increase_width, Action::IncreaseWidth)?;
        insert_all(&self.decrease_width, Action::DecreaseWidth)?;
        insert_all(&self.width_thin, Action::SetWidthThin)?;
        insert_all(&self.width_medium, Action::SetWidthMedium)?;
        insert_all(&self.width_thick, Action::SetWidthThick)?;
        insert_all(&self.width_huge, Action::SetWidthHuge)?;
        insert_all(&self.color_red, Action::SetColorRed)?;
        insert_all(&self.color_orange, Action::SetColorOrange)?;
        insert_all(&self.color_yellow, Action::SetColorYellow)?;
        insert_all(&self.color_green, Action::SetColorGreen)?;
        insert_all(&self.color_blue, Action::SetColorBlue)?;
        insert_all(&self.color_magenta, Action::SetColorMagenta)?;
        insert_all(&self.color_black, Action::SetColorBlack)?;
        insert_all(&self.color_white, Action::SetColorWhite)?;
        insert_all(&self.toggle_highlighter, Action::ToggleHighlighter)?;
        insert_all(&self.eraser, Action::SelectEraser)?;

        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain_key() {
        let binding = KeyBinding::parse("Escape").unwrap();
        assert_eq!(binding.key, "Escape");
        assert!(!binding.ctrl && !binding.shift && !binding.alt);
    }

    #[test]
    fn parse_modifiers_in_any_order() {
        let a = KeyBinding::parse("Ctrl+Shift+Z").unwrap();
        let b = KeyBinding::parse("Shift+Ctrl+Z").unwrap();
        assert_eq!(a, b);
        assert!(a.ctrl && a.shift);
    }

    #[test]
    fn parse_spaces_around_plus() {
        let binding = KeyBinding::parse("Ctrl + S").unwrap();
        assert!(binding.ctrl);
        assert_eq!(binding.key, "S");
    }

    #[test]
    fn parse_plus_as_key() {
        let binding = KeyBinding::parse("+").unwrap();
        assert_eq!(binding.key, "+");

        // A trailing '+' after modifiers is the plus key itself
        let ctrl_plus = KeyBinding::parse("Ctrl++").unwrap();
        assert!(ctrl_plus.ctrl);
        assert_eq!(ctrl_plus.key, "+");
    }

    #[test]
    fn parse_rejects_empty() {
        assert!(KeyBinding::parse("").is_err());
        assert!(KeyBinding::parse("   ").is_err());
    }

    #[test]
    fn matches_is_case_insensitive_on_key() {
        let binding = KeyBinding::parse("Ctrl+Z").unwrap();
        assert!(binding.matches("z", true, false, false));
        assert!(!binding.matches("z", false, false, false));
    }

    #[test]
    fn default_map_contains_expected_bindings() {
        let config = KeybindingsConfig::default();
        let map = config.build_action_map().unwrap();

        let escape = KeyBinding::parse("Escape").unwrap();
        assert_eq!(map.get(&escape), Some(&Action::Quit));

        let ctrl_z = KeyBinding::parse("Ctrl+Z").unwrap();
        assert_eq!(map.get(&ctrl_z), Some(&Action::Undo));

        let shift_e = KeyBinding::parse("Shift+E").unwrap();
        assert_eq!(map.get(&shift_e), Some(&Action::ClearWhite));
    }

    #[test]
    fn duplicate_keybindings_are_rejected() {
        let mut config = KeybindingsConfig::default();
        config.undo = vec!["Ctrl+Z".to_string()];
        config.redo = vec!["Ctrl+Z".to_string()];

        let result = config.build_action_map();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Duplicate"));
    }
}
