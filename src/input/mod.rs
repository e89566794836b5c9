//! Input handling and the drawing state machine.
//!
//! This module translates backend keyboard and pointer events into canvas
//! operations. It owns the current tool selection, the in-progress stroke,
//! and the command dispatch shared by keybindings and panel buttons.

pub mod events;
pub mod state;
pub mod tools;

// Re-export commonly used types at module level
pub use events::{Key, Modifiers, MouseButton};
pub use state::{BackendRequest, DrawingState, InputState};
pub use tools::ToolState;
