//! Library exports for reusing glassmark subsystems.
//!
//! Exposes the canvas/history model, configuration data structures, and the
//! panel geometry so tests and external tooling (e.g. the config schema
//! dumper) can share them with the main binary.

pub mod config;
pub mod draw;
pub mod export;
pub mod input;
pub mod palette;
pub mod ui;
pub mod util;

pub use config::Config;
