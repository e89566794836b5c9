//! Application state and the input-driven state machine.
//!
//! All state transitions happen here, on the event-dispatch thread: pointer
//! events drive the drawing state machine, key presses resolve through the
//! keybinding map, and panel clicks dispatch through the same
//! [`InputState::handle_action`] table as the keyboard.

use std::collections::HashMap;

use log::debug;

use crate::config::{Action, KeyBinding, PanelPosition};
use crate::draw::{
    Canvas, Color, Stroke, StrokeStyle,
    color::{TRANSPARENT, WHITE},
};
use crate::palette::{self, PALETTE, PaintKind, WIDTH_PRESETS};
use crate::ui::panel::{PanelHit, PanelLayout};

use super::events::{Key, Modifiers, MouseButton};
use super::tools::ToolState;

/// Current drawing mode state machine.
#[derive(Debug)]
pub enum DrawingState {
    /// Not actively drawing - waiting for input
    Idle,
    /// Pointer button held down; the stroke accumulates drag points.
    /// Paint and style were captured when the drag started.
    Drawing {
        /// The in-progress stroke
        stroke: Stroke,
    },
    /// Quit requested; waiting for the user to confirm or back out
    ConfirmQuit,
}

/// Work the input state cannot perform itself and hands to the backend:
/// surface z-order changes and image export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendRequest {
    /// Export the committed canvas to an image file
    Save,
    /// Move the overlay to the top layer (always on top)
    RaiseOverlay,
    /// Move the overlay below normal windows
    LowerOverlay,
}

/// Main application state for one overlay session.
///
/// Owned by the backend state and passed by reference into every event
/// handler; there are no globals. Holds the committed canvas, the active
/// tool selection, the drawing state machine, and the panel geometry.
pub struct InputState {
    /// Committed canvas operations and their undo/redo history
    pub canvas: Canvas,
    /// Active paint and stroke style
    pub tools: ToolState,
    /// Drawing state machine
    pub state: DrawingState,
    /// Current modifier key state
    pub modifiers: Modifiers,
    /// Whether the user confirmed quitting
    pub should_exit: bool,
    /// Whether the display needs to be redrawn
    pub needs_redraw: bool,
    /// Whether the controller panel is shown
    pub panel_visible: bool,
    /// Palette index of the selected swatch (drives the panel outline)
    pub selected_swatch: usize,
    /// Width preset index matching the current width, if any
    pub selected_width: Option<usize>,
    /// Screen width in pixels (set by the backend after configuration)
    pub screen_width: u32,
    /// Screen height in pixels (set by the backend after configuration)
    pub screen_height: u32,
    /// Configured panel corner
    panel_position: PanelPosition,
    /// Panel geometry for the current screen size
    panel: PanelLayout,
    /// Keybinding action map
    action_map: HashMap<KeyBinding, Action>,
    /// Pending request for the backend to pick up after dispatch
    pending_request: Option<BackendRequest>,
}

impl InputState {
    /// Creates the state with config-derived defaults.
    ///
    /// Screen dimensions start at 0 and are updated by the backend once the
    /// surface is configured (see [`InputState::update_screen_dimensions`]).
    pub fn with_defaults(
        paint: Color,
        stroke: StrokeStyle,
        panel_visible: bool,
        panel_position: PanelPosition,
        action_map: HashMap<KeyBinding, Action>,
    ) -> Self {
        let selected_swatch = PALETTE
            .iter()
            .position(|entry| entry.paint() == paint)
            .unwrap_or(0);
        let selected_width = palette::width_preset_for(stroke.width);
        debug!(
            "Initial paint '{}', width {:.0}px",
            crate::util::color_to_name(&paint),
            stroke.width
        );

        Self {
            canvas: Canvas::new(),
            tools: ToolState::new(paint, stroke),
            state: DrawingState::Idle,
            modifiers: Modifiers::new(),
            should_exit: false,
            needs_redraw: true,
            panel_visible,
            selected_swatch,
            selected_width,
            screen_width: 0,
            screen_height: 0,
            panel_position,
            panel: PanelLayout::new(panel_position, 0, 0),
            action_map,
            pending_request: None,
        }
    }

    /// Updates screen dimensions after backend configuration and rebuilds
    /// the panel geometry for the new size.
    pub fn update_screen_dimensions(&mut self, width: u32, height: u32) {
        self.screen_width = width;
        self.screen_height = height;
        self.panel = PanelLayout::new(self.panel_position, width, height);
    }

    /// Panel geometry for hit-testing and rendering.
    pub fn panel_layout(&self) -> &PanelLayout {
        &self.panel
    }

    /// The stroke currently being drawn, if any.
    pub fn in_progress_stroke(&self) -> Option<&Stroke> {
        match &self.state {
            DrawingState::Drawing { stroke } => Some(stroke),
            _ => None,
        }
    }

    /// Whether the quit confirmation prompt is up.
    pub fn confirming_quit(&self) -> bool {
        matches!(self.state, DrawingState::ConfirmQuit)
    }

    /// Takes and clears the pending backend request.
    pub fn take_pending_request(&mut self) -> Option<BackendRequest> {
        self.pending_request.take()
    }

    // ========================================================================
    // Keyboard
    // ========================================================================

    /// Processes a key press event.
    pub fn on_key_press(&mut self, key: Key) {
        match key {
            Key::Shift => {
                self.modifiers.shift = true;
                return;
            }
            Key::Ctrl => {
                self.modifiers.ctrl = true;
                return;
            }
            Key::Alt => {
                self.modifiers.alt = true;
                return;
            }
            _ => {}
        }

        // The confirmation prompt consumes everything until answered.
        if matches!(self.state, DrawingState::ConfirmQuit) {
            match key {
                Key::Return | Key::Char('y') | Key::Char('Y') => {
                    debug!("Quit confirmed");
                    self.should_exit = true;
                }
                Key::Escape | Key::Char('n') | Key::Char('N') => {
                    debug!("Quit cancelled");
                    self.state = DrawingState::Idle;
                    self.needs_redraw = true;
                }
                _ => {}
            }
            return;
        }

        let key_str = match key {
            Key::Char(c) => c.to_string(),
            Key::Escape => "Escape".to_string(),
            Key::Return => "Return".to_string(),
            Key::Plus => "+".to_string(),
            Key::Minus => "-".to_string(),
            Key::F7 => "F7".to_string(),
            Key::F8 => "F8".to_string(),
            Key::F10 => "F10".to_string(),
            _ => return,
        };

        if let Some(action) = self.find_action(&key_str) {
            self.handle_action(action);
        }
    }

    /// Processes a key release event (modifier tracking only).
    pub fn on_key_release(&mut self, key: Key) {
        match key {
            Key::Shift => self.modifiers.shift = false,
            Key::Ctrl => self.modifiers.ctrl = false,
            Key::Alt => self.modifiers.alt = false,
            _ => {}
        }
    }

    fn find_action(&self, key_str: &str) -> Option<Action> {
        for (binding, action) in &self.action_map {
            if binding.matches(
                key_str,
                self.modifiers.ctrl,
                self.modifiers.shift,
                self.modifiers.alt,
            ) {
                return Some(*action);
            }
        }
        None
    }

    // ========================================================================
    // Command dispatch
    // ========================================================================

    /// Applies one command to the application state.
    ///
    /// This is the single dispatch point for every command source: panel
    /// buttons and keybindings both end up here.
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Undo => {
                if self.canvas.undo() {
                    debug!("Undo");
                    self.needs_redraw = true;
                }
            }
            Action::Redo => {
                if self.canvas.redo() {
                    debug!("Redo");
                    self.needs_redraw = true;
                }
            }
            Action::ClearHistory => {
                debug!("Clearing history");
                self.canvas.clear_history();
            }
            Action::ClearTransparent => {
                debug!("Clearing canvas to transparent");
                self.canvas.clear(TRANSPARENT);
                self.needs_redraw = true;
            }
            Action::ClearWhite => {
                debug!("Clearing canvas to white");
                self.canvas.clear(WHITE);
                self.needs_redraw = true;
            }
            Action::Save => {
                self.pending_request = Some(BackendRequest::Save);
            }
            Action::BringToFront => {
                self.pending_request = Some(BackendRequest::RaiseOverlay);
            }
            Action::SendToBack => {
                self.pending_request = Some(BackendRequest::LowerOverlay);
            }
            Action::TogglePanel => {
                self.panel_visible = !self.panel_visible;
                self.needs_redraw = true;
            }
            Action::Quit => match self.state {
                DrawingState::Drawing { .. } => {
                    // Cancel the in-progress stroke without committing it
                    self.state = DrawingState::Idle;
                    self.needs_redraw = true;
                }
                DrawingState::Idle => {
                    self.state = DrawingState::ConfirmQuit;
                    self.needs_redraw = true;
                }
                DrawingState::ConfirmQuit => {
                    self.state = DrawingState::Idle;
                    self.needs_redraw = true;
                }
            },
            Action::IncreaseWidth => self.adjust_width(1.0),
            Action::DecreaseWidth => self.adjust_width(-1.0),
            Action::SetWidthThin => self.select_width_preset(0),
            Action::SetWidthMedium => self.select_width_preset(1),
            Action::SetWidthThick => self.select_width_preset(2),
            Action::SetWidthHuge => self.select_width_preset(3),
            Action::SetColorRed => self.select_color("red"),
            Action::SetColorOrange => self.select_color("orange"),
            Action::SetColorYellow => self.select_color("yellow"),
            Action::SetColorGreen => self.select_color("green"),
            Action::SetColorBlue => self.select_color("blue"),
            Action::SetColorMagenta => self.select_color("magenta"),
            Action::SetColorBlack => self.select_color("black"),
            Action::SetColorWhite => self.select_color("white"),
            Action::ToggleHighlighter => self.toggle_highlighter(),
            Action::SelectEraser => {
                if let Some(idx) = palette::find("eraser", PaintKind::Eraser) {
                    self.select_swatch(idx);
                }
            }
        }
    }

    /// Selects a palette swatch and makes its paint active.
    pub fn select_swatch(&mut self, idx: usize) {
        let entry = &PALETTE[idx];
        self.tools.set_paint(entry.paint());
        self.selected_swatch = idx;
        debug!("Selected {:?} swatch '{}'", entry.kind, entry.name);
        self.needs_redraw = true;
    }

    /// Selects a named width preset, keeping cap/join.
    pub fn select_width_preset(&mut self, idx: usize) {
        let preset = &WIDTH_PRESETS[idx];
        let mut style = self.tools.stroke();
        style.width = preset.width;
        self.tools.set_stroke(style);
        self.selected_width = Some(idx);
        debug!("Width preset '{}' ({}px)", preset.name, preset.width);
        self.needs_redraw = true;
    }

    /// Adjusts the stroke width continuously (scroll wheel), clamped to
    /// the accepted range.
    pub fn adjust_width(&mut self, delta: f64) {
        let mut style = self.tools.stroke();
        style.width = (style.width + delta).clamp(1.0, 100.0);
        self.tools.set_stroke(style);
        self.selected_width = palette::width_preset_for(style.width);
        debug!("Width adjusted to {:.0}px", style.width);
        self.needs_redraw = true;
    }

    /// Selects a base color, staying in the current paint kind when the
    /// palette offers it (a highlighter stays a highlighter).
    fn select_color(&mut self, name: &str) {
        let current_kind = PALETTE[self.selected_swatch].kind;
        let idx = if current_kind == PaintKind::Highlighter {
            palette::find(name, PaintKind::Highlighter).or_else(|| palette::pen_index(name))
        } else {
            palette::pen_index(name)
        };
        if let Some(idx) = idx {
            self.select_swatch(idx);
        }
    }

    /// Switches between a pen and its highlighter twin.
    fn toggle_highlighter(&mut self) {
        let entry = &PALETTE[self.selected_swatch];
        let target = match entry.kind {
            PaintKind::Pen => palette::find(entry.name, PaintKind::Highlighter),
            PaintKind::Highlighter => palette::pen_index(entry.name),
            PaintKind::Eraser => None,
        };
        if let Some(idx) = target {
            self.select_swatch(idx);
        }
    }

    // ========================================================================
    // Pointer
    // ========================================================================

    /// Processes a mouse button press.
    ///
    /// Left press on the panel operates the panel; left press elsewhere
    /// starts a stroke with the current paint and style. Right press cancels
    /// the in-progress stroke.
    pub fn on_mouse_press(&mut self, button: MouseButton, x: i32, y: i32) {
        match button {
            MouseButton::Left => {
                if matches!(self.state, DrawingState::ConfirmQuit) {
                    return;
                }

                if self.panel_visible {
                    if let Some(hit) = self.panel.hit_test(x as f64, y as f64) {
                        match hit {
                            PanelHit::Swatch(idx) => self.select_swatch(idx),
                            PanelHit::WidthPreset(idx) => self.select_width_preset(idx),
                            PanelHit::Command(action) => self.handle_action(action),
                            PanelHit::Chrome => {}
                        }
                        self.needs_redraw = true;
                        return;
                    }
                }

                if matches!(self.state, DrawingState::Idle) {
                    self.state = DrawingState::Drawing {
                        stroke: Stroke::begin(x, y, self.tools.paint(), self.tools.stroke()),
                    };
                    self.needs_redraw = true;
                }
            }
            MouseButton::Right => {
                if matches!(self.state, DrawingState::Drawing { .. }) {
                    debug!("Stroke cancelled");
                    self.state = DrawingState::Idle;
                    self.needs_redraw = true;
                }
            }
            _ => {}
        }
    }

    /// Processes pointer motion; extends the in-progress stroke.
    pub fn on_mouse_motion(&mut self, x: i32, y: i32) {
        if let DrawingState::Drawing { stroke } = &mut self.state {
            stroke.push_point(x, y);
            self.needs_redraw = true;
        }
    }

    /// Processes a mouse button release; commits the in-progress stroke as
    /// exactly one history entry.
    pub fn on_mouse_release(&mut self, button: MouseButton, x: i32, y: i32) {
        if button != MouseButton::Left {
            return;
        }

        if matches!(self.state, DrawingState::Drawing { .. }) {
            let finished = std::mem::replace(&mut self.state, DrawingState::Idle);
            if let DrawingState::Drawing { mut stroke } = finished {
                if stroke.points.last() != Some(&(x, y)) {
                    stroke.push_point(x, y);
                }
                debug!("Committing stroke with {} points", stroke.points.len());
                self.canvas.commit_stroke(stroke);
                self.needs_redraw = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeybindingsConfig;
    use crate::draw::CanvasOp;
    use crate::draw::color::RED;

    fn test_state() -> InputState {
        let action_map = KeybindingsConfig::default().build_action_map().unwrap();
        let mut state = InputState::with_defaults(
            RED,
            StrokeStyle::round(5.0),
            true,
            PanelPosition::TopLeft,
            action_map,
        );
        state.update_screen_dimensions(1920, 1080);
        state
    }

    fn drag(state: &mut InputState, from: (i32, i32), to: (i32, i32)) {
        state.on_mouse_press(MouseButton::Left, from.0, from.1);
        state.on_mouse_motion((from.0 + to.0) / 2, (from.1 + to.1) / 2);
        state.on_mouse_release(MouseButton::Left, to.0, to.1);
    }

    #[test]
    fn drag_commits_exactly_one_entry() {
        let mut state = test_state();
        drag(&mut state, (600, 600), (700, 650));
        assert_eq!(state.canvas.visible_len(), 1);
        assert!(matches!(state.state, DrawingState::Idle));
    }

    #[test]
    fn paint_change_mid_drag_leaves_stroke_untouched() {
        let mut state = test_state();
        state.on_mouse_press(MouseButton::Left, 600, 600);
        state.on_mouse_motion(650, 650);

        // Color key pressed while the button is still down
        state.on_key_press(Key::Char('b'));
        state.on_mouse_release(MouseButton::Left, 700, 700);

        let ops: Vec<_> = state.canvas.visible_ops().collect();
        match ops[0] {
            CanvasOp::Stroke(stroke) => assert_eq!(stroke.paint, RED),
            other => panic!("expected stroke, got {:?}", other),
        }
        // The next stroke gets the new paint
        assert_eq!(state.tools.paint(), crate::draw::color::BLUE);
    }

    #[test]
    fn right_click_cancels_without_committing() {
        let mut state = test_state();
        state.on_mouse_press(MouseButton::Left, 600, 600);
        state.on_mouse_motion(650, 650);
        state.on_mouse_press(MouseButton::Right, 650, 650);
        assert_eq!(state.canvas.visible_len(), 0);
        assert!(matches!(state.state, DrawingState::Idle));
    }

    #[test]
    fn panel_click_selects_swatch_without_drawing() {
        let mut state = test_state();
        let (rect, idx) = state.panel_layout().swatches()[2];
        let (cx, cy) = rect.center();

        state.on_mouse_press(MouseButton::Left, cx as i32, cy as i32);
        state.on_mouse_release(MouseButton::Left, cx as i32, cy as i32);

        assert_eq!(state.selected_swatch, idx);
        assert_eq!(state.tools.paint(), PALETTE[idx].paint());
        assert_eq!(state.canvas.visible_len(), 0);
        assert!(matches!(state.state, DrawingState::Idle));
    }

    #[test]
    fn panel_chrome_click_swallows_press() {
        let mut state = test_state();
        let bounds = state.panel_layout().bounds();

        state.on_mouse_press(MouseButton::Left, bounds.x as i32 + 1, bounds.y as i32 + 1);
        assert!(matches!(state.state, DrawingState::Idle));
        state.on_mouse_release(MouseButton::Left, bounds.x as i32 + 1, bounds.y as i32 + 1);
        assert_eq!(state.canvas.visible_len(), 0);
    }

    #[test]
    fn undo_keybinding_round_trips() {
        let mut state = test_state();
        drag(&mut state, (600, 600), (700, 650));

        state.on_key_press(Key::Ctrl);
        state.on_key_press(Key::Char('z'));
        assert_eq!(state.canvas.visible_len(), 0);

        // Ctrl+Shift+Z redoes
        state.on_key_press(Key::Shift);
        state.on_key_press(Key::Char('Z'));
        assert_eq!(state.canvas.visible_len(), 1);

        state.on_key_release(Key::Ctrl);
        state.on_key_release(Key::Shift);
        assert_eq!(state.modifiers, Modifiers::new());
    }

    #[test]
    fn clear_commands_commit_fill_entries() {
        let mut state = test_state();
        state.handle_action(Action::ClearWhite);
        state.handle_action(Action::ClearTransparent);

        let ops: Vec<_> = state.canvas.visible_ops().cloned().collect();
        assert_eq!(ops.len(), 2);
        assert!(matches!(ops[0], CanvasOp::Fill(c) if c == WHITE));
        assert!(matches!(ops[1], CanvasOp::Fill(c) if c == TRANSPARENT));

        // Both clears undo back to the empty canvas
        state.handle_action(Action::Undo);
        state.handle_action(Action::Undo);
        assert_eq!(state.canvas.visible_len(), 0);
    }

    #[test]
    fn quit_requires_confirmation() {
        let mut state = test_state();
        state.on_key_press(Key::Escape);
        assert!(state.confirming_quit());
        assert!(!state.should_exit);

        state.on_key_press(Key::Char('y'));
        assert!(state.should_exit);
    }

    #[test]
    fn quit_can_be_cancelled() {
        let mut state = test_state();
        state.on_key_press(Key::Escape);
        assert!(state.confirming_quit());

        state.on_key_press(Key::Escape);
        assert!(!state.confirming_quit());
        assert!(!state.should_exit);
    }

    #[test]
    fn escape_mid_drag_cancels_stroke_not_session() {
        let mut state = test_state();
        state.on_mouse_press(MouseButton::Left, 600, 600);
        state.on_key_press(Key::Escape);
        assert!(matches!(state.state, DrawingState::Idle));
        assert!(!state.confirming_quit());
        assert_eq!(state.canvas.visible_len(), 0);
    }

    #[test]
    fn width_preset_key_changes_only_later_strokes() {
        let mut state = test_state();
        drag(&mut state, (600, 600), (700, 650));

        state.on_key_press(Key::Char('2'));
        assert_eq!(state.selected_width, Some(1));
        assert_eq!(state.tools.stroke().width, 15.0);

        drag(&mut state, (600, 700), (700, 750));
        let ops: Vec<_> = state.canvas.visible_ops().collect();
        match (&ops[0], &ops[1]) {
            (CanvasOp::Stroke(first), CanvasOp::Stroke(second)) => {
                assert_eq!(first.style.width, 5.0);
                assert_eq!(second.style.width, 15.0);
            }
            other => panic!("expected two strokes, got {:?}", other),
        }
    }

    #[test]
    fn scroll_width_adjustment_clamps() {
        let mut state = test_state();
        for _ in 0..200 {
            state.adjust_width(1.0);
        }
        assert_eq!(state.tools.stroke().width, 100.0);
        for _ in 0..200 {
            state.adjust_width(-1.0);
        }
        assert_eq!(state.tools.stroke().width, 1.0);
    }

    #[test]
    fn highlighter_toggle_keeps_base_color() {
        let mut state = test_state();
        state.handle_action(Action::SetColorBlue);
        state.handle_action(Action::ToggleHighlighter);

        let entry = &PALETTE[state.selected_swatch];
        assert_eq!(entry.kind, PaintKind::Highlighter);
        assert_eq!(entry.name, "blue");
        assert!(state.tools.paint().a < 1.0);

        // Color keys stay in highlighter kind
        state.handle_action(Action::SetColorGreen);
        assert_eq!(PALETTE[state.selected_swatch].kind, PaintKind::Highlighter);

        state.handle_action(Action::ToggleHighlighter);
        assert_eq!(PALETTE[state.selected_swatch].kind, PaintKind::Pen);
    }

    #[test]
    fn eraser_strokes_carry_transparent_paint() {
        let mut state = test_state();
        state.handle_action(Action::SelectEraser);
        drag(&mut state, (600, 600), (700, 650));

        let ops: Vec<_> = state.canvas.visible_ops().collect();
        match ops[0] {
            CanvasOp::Stroke(stroke) => assert!(stroke.is_eraser()),
            other => panic!("expected stroke, got {:?}", other),
        }
    }

    #[test]
    fn backend_requests_are_taken_once() {
        let mut state = test_state();
        state.handle_action(Action::Save);
        assert_eq!(state.take_pending_request(), Some(BackendRequest::Save));
        assert_eq!(state.take_pending_request(), None);

        state.handle_action(Action::BringToFront);
        assert_eq!(
            state.take_pending_request(),
            Some(BackendRequest::RaiseOverlay)
        );
        state.handle_action(Action::SendToBack);
        assert_eq!(
            state.take_pending_request(),
            Some(BackendRequest::LowerOverlay)
        );
    }

    #[test]
    fn clear_history_via_action_preserves_canvas() {
        let mut state = test_state();
        drag(&mut state, (600, 600), (700, 650));
        drag(&mut state, (620, 620), (720, 670));
        let before: Vec<_> = state.canvas.visible_ops().cloned().collect();

        state.handle_action(Action::ClearHistory);
        let after: Vec<_> = state.canvas.visible_ops().cloned().collect();
        assert_eq!(before, after);

        state.handle_action(Action::Undo);
        let unchanged: Vec<_> = state.canvas.visible_ops().cloned().collect();
        assert_eq!(before, unchanged);
    }
}
