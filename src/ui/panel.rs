//! The controller panel: layout, hit-testing, and rendering.
//!
//! The panel is drawn into the overlay surface itself. Its geometry is
//! computed from the screen size and the configured corner, and every
//! control comes from a data table: swatches from [`crate::palette::PALETTE`],
//! width rows from [`crate::palette::WIDTH_PRESETS`], and command buttons
//! from [`COMMANDS`]. Pointer clicks are resolved with [`PanelLayout::hit_test`]
//! and dispatched through the same action handler as the keybindings.

use crate::config::{Action, PanelPosition};
use crate::palette::{PALETTE, PaintKind, WIDTH_PRESETS};

/// Distance between the panel and the screen edge.
const MARGIN: f64 = 16.0;
/// Panel width.
const PANEL_W: f64 = 176.0;
/// Inner padding.
const PAD: f64 = 10.0;
/// Swatch square edge length.
const SWATCH: f64 = 26.0;
/// Gap between swatches.
const SWATCH_GAP: f64 = 6.0;
/// Swatches per grid row.
const SWATCHES_PER_ROW: usize = 4;
/// Section title row height.
const TITLE_H: f64 = 20.0;
/// Width preset row height.
const WIDTH_ROW_H: f64 = 22.0;
/// Command button height.
const BUTTON_H: f64 = 24.0;
/// Gap between buttons and width rows.
const ROW_GAP: f64 = 5.0;
/// Gap below a swatch grid.
const SECTION_GAP: f64 = 8.0;

/// Command buttons, top to bottom. The label is what the panel renders; the
/// action is dispatched through `InputState::handle_action`, the same path
/// the keybindings take.
pub const COMMANDS: &[(&str, Action)] = &[
    ("Erase transparent", Action::ClearTransparent),
    ("Erase white", Action::ClearWhite),
    ("Undo", Action::Undo),
    ("Redo", Action::Redo),
    ("Clear history", Action::ClearHistory),
    ("Bring to front", Action::BringToFront),
    ("Send to back", Action::SendToBack),
    ("Save image", Action::Save),
    ("Quit", Action::Quit),
];

/// Axis-aligned rectangle in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// What a pointer press on the panel resolved to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelHit {
    /// A palette swatch (index into [`PALETTE`])
    Swatch(usize),
    /// A width preset row (index into [`WIDTH_PRESETS`])
    WidthPreset(usize),
    /// A command button
    Command(Action),
    /// Inside the panel but on no control; the click is swallowed so it
    /// cannot start a stroke underneath the panel
    Chrome,
}

/// Section title with its baseline position.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TitleSlot {
    pub rect: Rect,
    pub text: &'static str,
}

/// Computed panel geometry for one screen size and corner.
#[derive(Debug)]
pub struct PanelLayout {
    bounds: Rect,
    titles: Vec<TitleSlot>,
    swatches: Vec<(Rect, usize)>,
    widths: Vec<(Rect, usize)>,
    commands: Vec<(Rect, Action)>,
}

impl PanelLayout {
    /// Computes the layout for the given corner and screen size.
    pub fn new(position: PanelPosition, screen_width: u32, screen_height: u32) -> Self {
        let mut titles = Vec::new();
        let mut swatches = Vec::new();
        let mut widths = Vec::new();
        let mut commands = Vec::new();

        // Lay out at origin (0, 0) first, then shift into the chosen corner
        // once the total height is known.
        let mut y = PAD;

        let pens: Vec<usize> = PALETTE
            .iter()
            .enumerate()
            .filter(|(_, e)| e.kind == PaintKind::Pen)
            .map(|(i, _)| i)
            .collect();
        let others: Vec<usize> = PALETTE
            .iter()
            .enumerate()
            .filter(|(_, e)| e.kind != PaintKind::Pen)
            .map(|(i, _)| i)
            .collect();

        titles.push(TitleSlot {
            rect: Rect::new(PAD, y, PANEL_W - 2.0 * PAD, TITLE_H),
            text: "Pens",
        });
        y += TITLE_H;
        y = layout_swatch_grid(&mut swatches, &pens, y);
        y += SECTION_GAP;

        titles.push(TitleSlot {
            rect: Rect::new(PAD, y, PANEL_W - 2.0 * PAD, TITLE_H),
            text: "Highlighters",
        });
        y += TITLE_H;
        y = layout_swatch_grid(&mut swatches, &others, y);
        y += SECTION_GAP;

        titles.push(TitleSlot {
            rect: Rect::new(PAD, y, PANEL_W - 2.0 * PAD, TITLE_H),
            text: "Width",
        });
        y += TITLE_H;
        for (idx, _preset) in WIDTH_PRESETS.iter().enumerate() {
            let rect = Rect::new(PAD, y, PANEL_W - 2.0 * PAD, WIDTH_ROW_H);
            widths.push((rect, idx));
            y += WIDTH_ROW_H + ROW_GAP;
        }
        y += SECTION_GAP;

        for (_label, action) in COMMANDS.iter().copied() {
            let rect = Rect::new(PAD, y, PANEL_W - 2.0 * PAD, BUTTON_H);
            commands.push((rect, action));
            y += BUTTON_H + ROW_GAP;
        }

        let height = y - ROW_GAP + PAD;

        let origin_x = match position {
            PanelPosition::TopLeft | PanelPosition::BottomLeft => MARGIN,
            PanelPosition::TopRight | PanelPosition::BottomRight => {
                (screen_width as f64 - PANEL_W - MARGIN).max(0.0)
            }
        };
        let origin_y = match position {
            PanelPosition::TopLeft | PanelPosition::TopRight => MARGIN,
            PanelPosition::BottomLeft | PanelPosition::BottomRight => {
                (screen_height as f64 - height - MARGIN).max(0.0)
            }
        };

        let shift = |rect: Rect| Rect::new(rect.x + origin_x, rect.y + origin_y, rect.w, rect.h);
        for slot in &mut titles {
            slot.rect = shift(slot.rect);
        }
        for (rect, _) in &mut swatches {
            *rect = shift(*rect);
        }
        for (rect, _) in &mut widths {
            *rect = shift(*rect);
        }
        for (rect, _) in &mut commands {
            *rect = shift(*rect);
        }

        Self {
            bounds: Rect::new(origin_x, origin_y, PANEL_W, height),
            titles,
            swatches,
            widths,
            commands,
        }
    }

    /// The panel's outer rectangle.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Swatch rectangles paired with their palette indices.
    pub fn swatches(&self) -> &[(Rect, usize)] {
        &self.swatches
    }

    /// Width preset rectangles paired with their preset indices.
    pub fn widths(&self) -> &[(Rect, usize)] {
        &self.widths
    }

    /// Command button rectangles paired with their actions.
    pub fn commands(&self) -> &[(Rect, Action)] {
        &self.commands
    }

    pub(crate) fn titles(&self) -> &[TitleSlot] {
        &self.titles
    }

    /// Resolves a pointer position against the panel.
    ///
    /// Returns `None` when the point is outside the panel entirely, so the
    /// caller can treat the press as a drawing action.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<PanelHit> {
        if !self.bounds.contains(x, y) {
            return None;
        }
        for (rect, idx) in &self.swatches {
            if rect.contains(x, y) {
                return Some(PanelHit::Swatch(*idx));
            }
        }
        for (rect, idx) in &self.widths {
            if rect.contains(x, y) {
                return Some(PanelHit::WidthPreset(*idx));
            }
        }
        for (rect, action) in &self.commands {
            if rect.contains(x, y) {
                return Some(PanelHit::Command(*action));
            }
        }
        Some(PanelHit::Chrome)
    }
}

fn layout_swatch_grid(swatches: &mut Vec<(Rect, usize)>, entries: &[usize], start_y: f64) -> f64 {
    let mut y = start_y;
    for (pos, palette_idx) in entries.iter().enumerate() {
        let col = pos % SWATCHES_PER_ROW;
        let row = pos / SWATCHES_PER_ROW;
        let x = PAD + col as f64 * (SWATCH + SWATCH_GAP);
        let rect = Rect::new(x, start_y + row as f64 * (SWATCH + SWATCH_GAP), SWATCH, SWATCH);
        swatches.push((rect, *palette_idx));
        y = rect.y + SWATCH;
    }
    y
}

// ============================================================================
// Rendering
// ============================================================================

/// Renders the panel.
///
/// `selected_swatch` and `selected_width` control which controls get the
/// selection outline; `can_undo`/`can_redo` dim the history buttons when
/// there is nothing to step through. The panel is only ever drawn on the
/// live overlay, never into exported images.
pub fn render_panel(
    ctx: &cairo::Context,
    layout: &PanelLayout,
    selected_swatch: usize,
    selected_width: Option<usize>,
    can_undo: bool,
    can_redo: bool,
) {
    let bounds = layout.bounds();

    let _ = ctx.save();
    ctx.set_operator(cairo::Operator::Over);

    // Panel background
    ctx.set_source_rgba(0.08, 0.08, 0.10, 0.85);
    ctx.rectangle(bounds.x, bounds.y, bounds.w, bounds.h);
    let _ = ctx.fill();
    ctx.set_source_rgba(1.0, 1.0, 1.0, 0.25);
    ctx.set_line_width(1.0);
    ctx.rectangle(bounds.x + 0.5, bounds.y + 0.5, bounds.w - 1.0, bounds.h - 1.0);
    let _ = ctx.stroke();

    for slot in layout.titles() {
        draw_label(
            ctx,
            slot.rect.x,
            slot.rect.y + 2.0,
            slot.text,
            11.0,
            true,
            (1.0, 1.0, 1.0, 0.9),
        );
    }

    for (rect, palette_idx) in layout.swatches() {
        let entry = &PALETTE[*palette_idx];
        if entry.kind == PaintKind::Eraser {
            draw_eraser_swatch(ctx, rect);
        } else {
            let paint = entry.paint();
            ctx.set_source_rgba(paint.r, paint.g, paint.b, paint.a);
            ctx.rectangle(rect.x, rect.y, rect.w, rect.h);
            let _ = ctx.fill();
        }

        // Thin outline so dark swatches stay visible on the dark panel
        ctx.set_source_rgba(1.0, 1.0, 1.0, 0.35);
        ctx.set_line_width(1.0);
        ctx.rectangle(rect.x + 0.5, rect.y + 0.5, rect.w - 1.0, rect.h - 1.0);
        let _ = ctx.stroke();

        if *palette_idx == selected_swatch {
            draw_selection_outline(ctx, rect);
        }
    }

    for (rect, preset_idx) in layout.widths() {
        let preset = &WIDTH_PRESETS[*preset_idx];
        draw_label(
            ctx,
            rect.x + 2.0,
            rect.y + 3.0,
            preset.name,
            10.0,
            false,
            (1.0, 1.0, 1.0, 0.9),
        );

        // Line sample at the preset width, clamped to fit in the row
        let sample_h = preset.width.min(rect.h - 6.0).max(1.0);
        let sample_x = rect.x + rect.w * 0.45;
        let sample_y = rect.y + rect.h / 2.0;
        ctx.set_source_rgba(1.0, 1.0, 1.0, 0.9);
        ctx.set_line_width(sample_h);
        ctx.set_line_cap(cairo::LineCap::Round);
        ctx.move_to(sample_x, sample_y);
        ctx.line_to(rect.x + rect.w - 6.0, sample_y);
        let _ = ctx.stroke();

        if selected_width == Some(*preset_idx) {
            draw_selection_outline(ctx, rect);
        }
    }

    for (rect, action) in layout.commands() {
        let label = COMMANDS
            .iter()
            .find(|(_, a)| a == action)
            .map(|(label, _)| *label)
            .unwrap_or("");

        let enabled = match action {
            Action::Undo => can_undo,
            Action::Redo => can_redo,
            Action::ClearHistory => can_undo || can_redo,
            _ => true,
        };
        let label_alpha = if enabled { 0.95 } else { 0.35 };

        ctx.set_source_rgba(1.0, 1.0, 1.0, 0.08);
        ctx.rectangle(rect.x, rect.y, rect.w, rect.h);
        let _ = ctx.fill();
        ctx.set_source_rgba(1.0, 1.0, 1.0, 0.3);
        ctx.set_line_width(1.0);
        ctx.rectangle(rect.x + 0.5, rect.y + 0.5, rect.w - 1.0, rect.h - 1.0);
        let _ = ctx.stroke();

        draw_label(
            ctx,
            rect.x + 8.0,
            rect.y + 5.0,
            label,
            10.0,
            false,
            (1.0, 1.0, 1.0, label_alpha),
        );
    }

    let _ = ctx.restore();
}

/// Selection outline used by swatches and width rows.
fn draw_selection_outline(ctx: &cairo::Context, rect: &Rect) {
    ctx.set_source_rgba(1.0, 1.0, 1.0, 0.95);
    ctx.set_line_width(2.0);
    ctx.set_line_join(cairo::LineJoin::Miter);
    ctx.rectangle(rect.x + 1.0, rect.y + 1.0, rect.w - 2.0, rect.h - 2.0);
    let _ = ctx.stroke();
}

/// The eraser swatch: checkerboard with a diagonal slash.
fn draw_eraser_swatch(ctx: &cairo::Context, rect: &Rect) {
    let half = rect.w / 2.0;
    for (ix, iy) in [(0.0, 0.0), (1.0, 1.0)] {
        ctx.set_source_rgba(0.75, 0.75, 0.75, 1.0);
        ctx.rectangle(rect.x + ix * half, rect.y + iy * half, half, half);
        let _ = ctx.fill();
    }
    for (ix, iy) in [(1.0, 0.0), (0.0, 1.0)] {
        ctx.set_source_rgba(0.45, 0.45, 0.45, 1.0);
        ctx.rectangle(rect.x + ix * half, rect.y + iy * half, half, half);
        let _ = ctx.fill();
    }
    ctx.set_source_rgba(0.9, 0.2, 0.2, 0.9);
    ctx.set_line_width(2.0);
    ctx.move_to(rect.x + 3.0, rect.y + rect.h - 3.0);
    ctx.line_to(rect.x + rect.w - 3.0, rect.y + 3.0);
    let _ = ctx.stroke();
}

/// Draws a single-line Pango label with its top-left corner at (x, y).
pub(crate) fn draw_label(
    ctx: &cairo::Context,
    x: f64,
    y: f64,
    text: &str,
    size: f64,
    bold: bool,
    rgba: (f64, f64, f64, f64),
) {
    let layout = pangocairo::functions::create_layout(ctx);
    let desc_str = if bold {
        format!("Sans Bold {}", size)
    } else {
        format!("Sans {}", size)
    };
    let desc = pango::FontDescription::from_string(&desc_str);
    layout.set_font_description(Some(&desc));
    layout.set_text(text);

    ctx.set_source_rgba(rgba.0, rgba.1, rgba.2, rgba.3);
    ctx.move_to(x, y);
    pangocairo::functions::show_layout(ctx, &layout);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PALETTE;

    fn layout() -> PanelLayout {
        PanelLayout::new(PanelPosition::TopLeft, 1920, 1080)
    }

    #[test]
    fn layout_places_every_palette_entry() {
        let layout = layout();
        assert_eq!(layout.swatches().len(), PALETTE.len());
        assert_eq!(layout.widths().len(), WIDTH_PRESETS.len());
        assert_eq!(layout.commands().len(), COMMANDS.len());
    }

    #[test]
    fn every_control_hit_tests_to_itself() {
        let layout = layout();
        for (rect, idx) in layout.swatches() {
            let (cx, cy) = rect.center();
            assert_eq!(layout.hit_test(cx, cy), Some(PanelHit::Swatch(*idx)));
        }
        for (rect, idx) in layout.widths() {
            let (cx, cy) = rect.center();
            assert_eq!(layout.hit_test(cx, cy), Some(PanelHit::WidthPreset(*idx)));
        }
        for (rect, action) in layout.commands() {
            let (cx, cy) = rect.center();
            assert_eq!(layout.hit_test(cx, cy), Some(PanelHit::Command(*action)));
        }
    }

    #[test]
    fn dead_zone_clicks_are_swallowed() {
        let layout = layout();
        let bounds = layout.bounds();
        // Inner padding strip at the very top of the panel holds no control
        let hit = layout.hit_test(bounds.x + 1.0, bounds.y + 1.0);
        assert_eq!(hit, Some(PanelHit::Chrome));
    }

    #[test]
    fn outside_clicks_miss() {
        let layout = layout();
        assert_eq!(layout.hit_test(1000.0, 1000.0), None);
    }

    #[test]
    fn right_anchored_layout_stays_on_screen() {
        let layout = PanelLayout::new(PanelPosition::BottomRight, 1280, 720);
        let bounds = layout.bounds();
        assert!(bounds.x + bounds.w <= 1280.0);
        assert!(bounds.y >= 0.0);
    }

    #[test]
    fn controls_do_not_overlap() {
        let layout = layout();
        let mut rects: Vec<Rect> = Vec::new();
        rects.extend(layout.swatches().iter().map(|(r, _)| *r));
        rects.extend(layout.widths().iter().map(|(r, _)| *r));
        rects.extend(layout.commands().iter().map(|(r, _)| *r));

        for (i, a) in rects.iter().enumerate() {
            for b in rects.iter().skip(i + 1) {
                let overlap = a.x < b.x + b.w
                    && b.x < a.x + a.w
                    && a.y < b.y + b.h
                    && b.y < a.y + a.h;
                assert!(!overlap, "{:?} overlaps {:?}", a, b);
            }
        }
    }
}
