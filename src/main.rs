use std::path::PathBuf;

use clap::{ArgAction, Parser};

mod backend;
mod config;
mod draw;
mod export;
mod input;
mod notify;
mod palette;
mod ui;
mod util;

#[derive(Parser, Debug)]
#[command(name = "glassmark")]
#[command(version, about = "Transparent screen annotation overlay for Wayland compositors")]
struct Cli {
    /// Override the configured save directory for exported images
    #[arg(long, value_name = "DIR")]
    save_dir: Option<PathBuf>,

    /// Start with the controller panel hidden (toggle with F10)
    #[arg(long, action = ArgAction::SetTrue)]
    no_panel: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    // Check for Wayland environment
    if std::env::var("WAYLAND_DISPLAY").is_err() {
        log::error!("WAYLAND_DISPLAY not set - this application requires Wayland.");
        log::error!("Please run on a Wayland compositor (Hyprland, Sway, etc.).");
        return Err(anyhow::anyhow!("Wayland environment required"));
    }

    log::info!("Starting annotation overlay...");
    log::info!("Controls:");
    log::info!("  - Draw: drag with the left button");
    log::info!("  - Panel: click swatches/buttons, F10 toggles visibility");
    log::info!("  - Colors: R G B Y O M K W, H toggles highlighter, X = eraser");
    log::info!("  - Width: 1-4 presets, scroll or +/- to adjust");
    log::info!("  - Undo: Ctrl+Z, Redo: Ctrl+Shift+Z");
    log::info!("  - Clear: E (transparent), Shift+E (white)");
    log::info!("  - Save image: Ctrl+S");
    log::info!("  - Z-order: F7 bring to front, F8 send to back");
    log::info!("  - Quit: Escape, then confirm");
    log::info!("");

    backend::run(cli.save_dir, cli.no_panel)?;

    log::info!("Annotation overlay closed.");
    Ok(())
}
