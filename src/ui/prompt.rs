//! Quit-confirmation prompt rendering.

use super::panel::draw_label;

const PROMPT_W: f64 = 380.0;
const PROMPT_H: f64 = 96.0;

/// Renders the centered quit-confirmation prompt.
///
/// Shown while the input state machine is in the confirm-quit state; the
/// overlay stays interactive underneath until the user answers.
pub fn render_quit_prompt(ctx: &cairo::Context, screen_width: u32, screen_height: u32) {
    let x = (screen_width as f64 - PROMPT_W) / 2.0;
    let y = (screen_height as f64 - PROMPT_H) / 2.0;

    let _ = ctx.save();
    ctx.set_operator(cairo::Operator::Over);

    ctx.set_source_rgba(0.08, 0.08, 0.10, 0.92);
    ctx.rectangle(x, y, PROMPT_W, PROMPT_H);
    let _ = ctx.fill();

    ctx.set_source_rgba(1.0, 1.0, 1.0, 0.4);
    ctx.set_line_width(1.0);
    ctx.rectangle(x + 0.5, y + 0.5, PROMPT_W - 1.0, PROMPT_H - 1.0);
    let _ = ctx.stroke();

    draw_label(
        ctx,
        x + 20.0,
        y + 16.0,
        "Quit and discard annotations?",
        14.0,
        true,
        (1.0, 1.0, 1.0, 1.0),
    );
    draw_label(
        ctx,
        x + 20.0,
        y + 52.0,
        "Enter / Y to quit    Esc / N to stay",
        11.0,
        false,
        (1.0, 1.0, 1.0, 0.8),
    );

    let _ = ctx.restore();
}
