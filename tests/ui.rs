use cairo::{Context, Format, ImageSurface};
use glassmark::config::PanelPosition;
use glassmark::ui::{PanelLayout, render_panel, render_quit_prompt};

fn surface_with_context(width: i32, height: i32) -> (ImageSurface, Context) {
    let surface = ImageSurface::create(Format::ARgb32, width, height).unwrap();
    let ctx = Context::new(&surface).unwrap();
    (surface, ctx)
}

fn surface_has_pixels(surface: &mut ImageSurface) -> bool {
    surface
        .data()
        .map(|data| data.iter().any(|byte| *byte != 0))
        .unwrap_or(false)
}

#[test]
fn render_panel_draws_for_all_positions() {
    let positions = [
        PanelPosition::TopLeft,
        PanelPosition::TopRight,
        PanelPosition::BottomLeft,
        PanelPosition::BottomRight,
    ];

    for position in positions {
        let layout = PanelLayout::new(position, 800, 600);
        let (mut surface, ctx) = surface_with_context(800, 600);
        render_panel(&ctx, &layout, 0, Some(0), true, false);
        drop(ctx);
        assert!(
            surface_has_pixels(&mut surface),
            "panel should render pixels for {:?}",
            position
        );
    }
}

#[test]
fn panel_swatches_render_their_paint() {
    let layout = PanelLayout::new(PanelPosition::TopLeft, 800, 600);
    let (mut surface, ctx) = surface_with_context(800, 600);
    render_panel(&ctx, &layout, 0, None, false, false);
    drop(ctx);
    surface.flush();

    // First swatch is the red pen; its center pixel should be fully red.
    let (rect, _) = layout.swatches()[0];
    let (cx, cy) = rect.center();
    let data = surface.data().unwrap();
    let offset = ((cy as i32 * 800 + cx as i32) * 4) as usize;
    // ARgb32 is BGRA in memory on little-endian
    assert_eq!(data[offset + 2], 255, "red channel");
    assert_eq!(data[offset + 3], 255, "alpha channel");
    assert_eq!(data[offset], 0, "blue channel");
}

#[test]
fn render_quit_prompt_draws_content() {
    let (mut surface, ctx) = surface_with_context(800, 600);
    render_quit_prompt(&ctx, 800, 600);
    drop(ctx);
    assert!(surface_has_pixels(&mut surface));
}
