//! On-overlay UI: the controller panel and the quit prompt.

pub mod panel;
pub mod prompt;

pub use panel::{render_panel, PanelHit, PanelLayout};
pub use prompt::render_quit_prompt;
