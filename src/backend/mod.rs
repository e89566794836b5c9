use std::path::PathBuf;

use anyhow::Result;

pub mod wayland;

/// Run the Wayland backend with the full event loop.
///
/// # Arguments
/// * `save_dir` - Optional override for the configured save directory
/// * `hide_panel` - Start with the controller panel hidden
pub fn run(save_dir: Option<PathBuf>, hide_panel: bool) -> Result<()> {
    let mut backend = wayland::WaylandBackend::new(save_dir, hide_panel)?;
    backend.run()
}
