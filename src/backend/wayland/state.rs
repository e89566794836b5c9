// Holds the live Wayland protocol state shared by the backend loop and the handler
// submodules; provides rendering, z-order switching, and export routing.
use anyhow::{Context, Result};
use log::debug;
use smithay_client_toolkit::{
    compositor::CompositorState,
    output::OutputState,
    registry::RegistryState,
    seat::SeatState,
    shell::{
        WaylandSurface,
        wlr_layer::{Layer, LayerShell},
    },
    shm::Shm,
};
use wayland_client::{QueueHandle, protocol::wl_shm};

use crate::{
    config::Config,
    draw,
    export::{self, SaveOptions},
    input::{BackendRequest, InputState},
    notify, ui,
};

use super::surface::SurfaceState;

/// Internal Wayland state shared across modules.
pub(super) struct WaylandState {
    // Wayland protocol objects
    pub(super) registry_state: RegistryState,
    pub(super) compositor_state: CompositorState,
    pub(super) layer_shell: LayerShell,
    pub(super) shm: Shm,
    pub(super) output_state: OutputState,
    pub(super) seat_state: SeatState,

    // Surface and buffer management
    pub(super) surface: SurfaceState,

    // Configuration
    pub(super) config: Config,

    // Input state
    pub(super) input_state: InputState,

    // Export destination
    pub(super) save_options: SaveOptions,

    // Whether the surface sits on the Overlay layer (true) or Bottom (false)
    pub(super) on_top: bool,

    // Tokio runtime handle for async notifications
    pub(super) tokio_handle: tokio::runtime::Handle,
}

impl WaylandState {
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        registry_state: RegistryState,
        compositor_state: CompositorState,
        layer_shell: LayerShell,
        shm: Shm,
        output_state: OutputState,
        seat_state: SeatState,
        config: Config,
        input_state: InputState,
        save_options: SaveOptions,
        tokio_handle: tokio::runtime::Handle,
    ) -> Self {
        Self {
            registry_state,
            compositor_state,
            layer_shell,
            shm,
            output_state,
            seat_state,
            surface: SurfaceState::new(),
            config,
            input_state,
            save_options,
            on_top: true,
            tokio_handle,
        }
    }

    pub(super) fn render(&mut self, qh: &QueueHandle<Self>) -> Result<()> {
        debug!("=== RENDER START ===");
        let buffer_count = self.config.performance.buffer_count as usize;
        let width = self.surface.width();
        let height = self.surface.height();

        // Get a buffer from the pool
        let (buffer, canvas) = {
            let pool = self.surface.ensure_pool(&self.shm, buffer_count)?;
            debug!("Requesting buffer from pool");
            let result = pool
                .create_buffer(
                    width as i32,
                    height as i32,
                    (width * 4) as i32,
                    wl_shm::Format::Argb8888,
                )
                .context("Failed to create buffer")?;
            debug!("Buffer acquired from pool");
            result
        };

        // SAFETY: This unsafe block creates a Cairo surface from raw memory.
        // Invariants that must hold:
        // 1. `canvas` is a valid mutable slice from SlotPool with exactly
        //    (width * height * 4) bytes
        // 2. The ARgb32 format matches the allocation (4 bytes per pixel)
        // 3. The stride (width * 4) is the byte length of one row
        // 4. `cairo_surface` and `ctx` are dropped before the buffer is
        //    committed to Wayland, so Cairo never touches memory after
        //    ownership transfers
        // 5. No other references to this memory exist during Cairo's usage
        let cairo_surface = unsafe {
            cairo::ImageSurface::create_for_data_unsafe(
                canvas.as_mut_ptr(),
                cairo::Format::ARgb32,
                width as i32,
                height as i32,
                (width * 4) as i32,
            )
            .context("Failed to create Cairo surface")?
        };

        let ctx = cairo::Context::new(&cairo_surface).context("Failed to create Cairo context")?;

        // Clear with fully transparent background, then replay the canvas
        debug!("Clearing background");
        draw::clear_surface(&ctx).context("Failed to clear background")?;

        debug!(
            "Replaying {} committed operations",
            self.input_state.canvas.visible_len()
        );
        draw::render_ops(&ctx, self.input_state.canvas.visible_ops());

        // Render the in-progress stroke on top of the committed state
        if let Some(stroke) = self.input_state.in_progress_stroke() {
            debug!("Rendering in-progress stroke");
            draw::render_stroke(&ctx, stroke);
        }

        // Panel and prompt are overlay chrome: drawn last, never exported
        if self.input_state.panel_visible {
            ui::render_panel(
                &ctx,
                self.input_state.panel_layout(),
                self.input_state.selected_swatch,
                self.input_state.selected_width,
                self.input_state.canvas.can_undo(),
                self.input_state.canvas.can_redo(),
            );
        }

        if self.input_state.confirming_quit() {
            ui::render_quit_prompt(&ctx, width, height);
        }

        // Flush Cairo before handing the buffer to the compositor
        debug!("Flushing Cairo surface");
        cairo_surface.flush();
        drop(ctx);
        drop(cairo_surface);

        debug!("Attaching buffer and committing surface");
        let wl_surface = self
            .surface
            .layer_surface()
            .context("Layer surface not created")?
            .wl_surface();
        wl_surface.attach(Some(buffer.wl_buffer()), 0, 0);
        wl_surface.damage_buffer(0, 0, width as i32, height as i32);

        if self.config.performance.enable_vsync {
            debug!("Requesting frame callback (vsync enabled)");
            wl_surface.frame(qh, wl_surface.clone());
        } else {
            debug!("Skipping frame callback (vsync disabled - allows back-to-back renders)");
        }

        wl_surface.commit();
        debug!("=== RENDER COMPLETE ===");

        Ok(())
    }

    /// Applies one request handed over by the input state.
    pub(super) fn handle_request(&mut self, request: BackendRequest) {
        match request {
            BackendRequest::Save => self.save_canvas(),
            BackendRequest::RaiseOverlay => self.set_on_top(true),
            BackendRequest::LowerOverlay => self.set_on_top(false),
        }
    }

    /// Exports the committed canvas and reports the outcome to the user.
    ///
    /// Failures never touch the canvas or its history.
    fn save_canvas(&mut self) {
        let width = self.surface.width();
        let height = self.surface.height();

        match export::save_canvas(&self.input_state.canvas, width, height, &self.save_options) {
            Ok(path) => {
                log::info!("Canvas exported to {}", path.display());
                let filename = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                notify::send_notification_async(
                    &self.tokio_handle,
                    "Image Saved".to_string(),
                    format!("Saved as {}", filename),
                    Some("document-save".to_string()),
                );
            }
            Err(err) => {
                log::error!("Failed to export canvas: {}", err);
                notify::send_notification_async(
                    &self.tokio_handle,
                    "Save Failed".to_string(),
                    err.to_string(),
                    Some("dialog-error".to_string()),
                );
            }
        }
    }

    /// Moves the overlay between the top layer and the bottom layer.
    ///
    /// The Overlay layer keeps the surface above every window (always on
    /// top); Bottom drops it behind them while the session keeps running.
    fn set_on_top(&mut self, on_top: bool) {
        if self.on_top == on_top {
            debug!("Layer unchanged");
            return;
        }

        let layer = if on_top { Layer::Overlay } else { Layer::Bottom };
        if let Some(layer_surface) = self.surface.layer_surface() {
            log::info!("Switching layer to {:?}", layer);
            layer_surface.set_layer(layer);
            layer_surface.wl_surface().commit();
            self.on_top = on_top;
            self.input_state.needs_redraw = true;
        }
    }
}
