//! Cairo-based replay of canvas operations.

use super::canvas::CanvasOp;
use super::color::Color;
use super::stroke::{Stroke, StrokeStyle};

/// Replays a sequence of canvas operations onto a Cairo context.
///
/// Operations are drawn in order (first = bottom). The caller is expected to
/// have cleared the surface beforehand; fills replace everything painted so
/// far, which is how clear-to-white and clear-to-transparent behave.
pub fn render_ops<'a>(ctx: &cairo::Context, ops: impl Iterator<Item = &'a CanvasOp>) {
    for op in ops {
        render_op(ctx, op);
    }
}

/// Renders a single canvas operation.
pub fn render_op(ctx: &cairo::Context, op: &CanvasOp) {
    match op {
        CanvasOp::Stroke(stroke) => {
            render_stroke_points(ctx, &stroke.points, stroke.paint, stroke.style);
        }
        CanvasOp::Fill(color) => fill_surface(ctx, *color),
    }
}

/// Renders a polyline stroke from a borrowed point slice.
///
/// Accepting a slice lets the in-progress stroke render every frame without
/// cloning its points. Zero-alpha paint erases: the stroke is composited with
/// the `Clear` operator so the pixels underneath become transparent again.
pub fn render_stroke_points(
    ctx: &cairo::Context,
    points: &[(i32, i32)],
    paint: Color,
    style: StrokeStyle,
) {
    if points.is_empty() {
        return;
    }

    let _ = ctx.save();

    if paint.is_transparent() {
        // Clear ignores the source; everything under the stroke coverage
        // becomes transparent.
        ctx.set_operator(cairo::Operator::Clear);
        ctx.set_source_rgba(0.0, 0.0, 0.0, 1.0);
    } else {
        ctx.set_operator(cairo::Operator::Over);
        ctx.set_source_rgba(paint.r, paint.g, paint.b, paint.a);
    }

    ctx.set_line_width(style.width);
    ctx.set_line_cap(style.cap.into());
    ctx.set_line_join(style.join.into());

    if points.len() == 1 {
        // A click without a drag: draw a dot the size of the pen tip.
        let (x, y) = points[0];
        ctx.arc(
            x as f64,
            y as f64,
            (style.width / 2.0).max(0.5),
            0.0,
            std::f64::consts::PI * 2.0,
        );
        let _ = ctx.fill();
    } else {
        let (x0, y0) = points[0];
        ctx.move_to(x0 as f64, y0 as f64);
        for &(x, y) in &points[1..] {
            ctx.line_to(x as f64, y as f64);
        }
        let _ = ctx.stroke();
    }

    let _ = ctx.restore();
}

/// Renders a committed stroke.
pub fn render_stroke(ctx: &cairo::Context, stroke: &Stroke) {
    render_stroke_points(ctx, &stroke.points, stroke.paint, stroke.style);
}

/// Fills the entire surface with a color, replacing whatever was painted.
///
/// Uses the `Source` operator so that filling with a transparent color clears
/// the surface rather than leaving it unchanged.
pub fn fill_surface(ctx: &cairo::Context, color: Color) {
    let _ = ctx.save();
    ctx.set_operator(cairo::Operator::Source);
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    let _ = ctx.paint();
    let _ = ctx.restore();
}

/// Clears the whole surface to full transparency.
///
/// Called at the top of every frame before the canvas ops are replayed.
pub fn clear_surface(ctx: &cairo::Context) -> Result<(), cairo::Error> {
    ctx.save()?;
    ctx.set_operator(cairo::Operator::Clear);
    ctx.paint()?;
    ctx.restore()?;
    Ok(())
}
