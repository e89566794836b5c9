//! Pixel-level round-trip checks: the rendered raster must track the history
//! cursor exactly.

use cairo::{Context, Format, ImageSurface};
use glassmark::draw::color::{BLUE, RED, TRANSPARENT, WHITE};
use glassmark::draw::{Canvas, Stroke, StrokeStyle};

const SIZE: i32 = 50;

fn rasterize(canvas: &Canvas) -> Vec<u8> {
    let mut surface = ImageSurface::create(Format::ARgb32, SIZE, SIZE).unwrap();
    {
        let ctx = Context::new(&surface).unwrap();
        glassmark::draw::render_ops(&ctx, canvas.visible_ops());
    }
    surface.flush();
    let data = surface.data().unwrap();
    data.to_vec()
}

fn stroke(from: (i32, i32), to: (i32, i32), paint: glassmark::draw::Color, width: f64) -> Stroke {
    let mut stroke = Stroke::begin(from.0, from.1, paint, StrokeStyle::round(width));
    stroke.push_point(to.0, to.1);
    stroke
}

fn is_blank(pixels: &[u8]) -> bool {
    pixels.iter().all(|byte| *byte == 0)
}

#[test]
fn undoing_every_stroke_restores_blank_pixels() {
    let mut canvas = Canvas::new();
    canvas.commit_stroke(stroke((5, 5), (40, 5), RED, 4.0));
    canvas.commit_stroke(stroke((5, 20), (40, 20), BLUE, 4.0));
    canvas.commit_stroke(stroke((5, 35), (40, 35), RED, 4.0));
    assert!(!is_blank(&rasterize(&canvas)));

    assert!(canvas.undo());
    assert!(canvas.undo());
    assert!(canvas.undo());
    assert!(is_blank(&rasterize(&canvas)));
}

#[test]
fn redo_restores_the_exact_pixels_before_undo() {
    let mut canvas = Canvas::new();
    canvas.commit_stroke(stroke((5, 5), (40, 40), RED, 6.0));
    canvas.commit_stroke(stroke((40, 5), (5, 40), BLUE, 6.0));
    let before = rasterize(&canvas);

    assert!(canvas.undo());
    assert_ne!(rasterize(&canvas), before);

    assert!(canvas.redo());
    assert_eq!(rasterize(&canvas), before);
}

#[test]
fn white_and_transparent_clears_undo_back_to_drawing() {
    let mut canvas = Canvas::new();
    canvas.commit_stroke(stroke((5, 25), (45, 25), RED, 8.0));
    let before = rasterize(&canvas);

    canvas.clear(WHITE);
    let white = rasterize(&canvas);
    // Every pixel is opaque white
    assert!(white.chunks_exact(4).all(|px| px == [255, 255, 255, 255]));

    canvas.clear(TRANSPARENT);
    assert!(is_blank(&rasterize(&canvas)));

    assert!(canvas.undo());
    assert_eq!(rasterize(&canvas), white);
    assert!(canvas.undo());
    assert_eq!(rasterize(&canvas), before);
}

#[test]
fn clear_history_leaves_pixels_untouched() {
    let mut canvas = Canvas::new();
    canvas.commit_stroke(stroke((5, 10), (45, 10), RED, 5.0));
    canvas.clear(WHITE);
    canvas.commit_stroke(stroke((5, 30), (45, 30), BLUE, 5.0));
    let before = rasterize(&canvas);

    canvas.clear_history();
    assert_eq!(rasterize(&canvas), before);

    // With the history gone, undo must not change the raster either
    assert!(!canvas.undo());
    assert_eq!(rasterize(&canvas), before);
}

#[test]
fn eraser_stroke_restores_transparency() {
    let mut canvas = Canvas::new();
    canvas.commit_stroke(stroke((5, 25), (45, 25), RED, 10.0));
    assert!(!is_blank(&rasterize(&canvas)));

    // A wide eraser pass over the same path removes all of it
    canvas.commit_stroke(stroke((5, 25), (45, 25), TRANSPARENT, 40.0));
    assert!(is_blank(&rasterize(&canvas)));

    // And the eraser pass itself is one undoable entry
    assert!(canvas.undo());
    assert!(!is_blank(&rasterize(&canvas)));
}

#[test]
fn highlighter_paint_is_semi_transparent() {
    let mut canvas = Canvas::new();
    canvas.commit_stroke(stroke((5, 25), (45, 25), BLUE.with_alpha(0.5), 20.0));

    let pixels = rasterize(&canvas);
    // Sample the stroke center; ARgb32 is BGRA in memory on little-endian
    let offset = ((25 * SIZE + 25) * 4) as usize;
    let alpha = pixels[offset + 3];
    assert!(
        (120..=136).contains(&alpha),
        "expected half-alpha at stroke center, got {}",
        alpha
    );
}

#[test]
fn single_point_stroke_renders_a_dot() {
    let mut canvas = Canvas::new();
    canvas.commit_stroke(Stroke::begin(25, 25, RED, StrokeStyle::round(8.0)));

    let pixels = rasterize(&canvas);
    let offset = ((25 * SIZE + 25) * 4) as usize;
    assert_eq!(pixels[offset + 3], 255, "dot center should be opaque");
}
