//! PNG export of the committed canvas.
//!
//! Exporting replays the committed operations into an offscreen image
//! surface, so the file matches exactly what undo/redo would reproduce on
//! screen - the in-progress stroke, the panel, and any prompt are never
//! part of the output.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use chrono::Local;
use thiserror::Error;

use crate::draw::{self, Canvas};
use crate::util::expand_tilde;

/// Errors from exporting the canvas to a file.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("surface has no size yet")]
    NoSurface,
    #[error("failed to create save directory {}: {source}", path.display())]
    Directory {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to render canvas: {0}")]
    Render(#[from] cairo::Error),
    #[error("failed to create {}: {source}", path.display())]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: cairo::IoError,
    },
}

/// Where and how exported images are written.
#[derive(Debug, Clone)]
pub struct SaveOptions {
    /// Destination directory.
    pub directory: PathBuf,
    /// Filename template (chrono format specifiers); ".png" is appended.
    pub filename_template: String,
}

impl SaveOptions {
    /// Builds options from the user config, expanding a leading tilde.
    pub fn from_config(save: &crate::config::SaveConfig) -> Self {
        Self {
            directory: expand_tilde(&save.directory),
            filename_template: save.filename_template.clone(),
        }
    }
}

/// Generates the output filename from the template and the current time.
pub fn generate_filename(template: &str) -> String {
    let now = Local::now();
    format!("{}.png", now.format(template))
}

/// Ensures the save directory exists, creating it if necessary.
fn ensure_directory_exists(directory: &Path) -> Result<(), ExportError> {
    if !directory.exists() {
        log::info!("Creating save directory: {}", directory.display());
        fs::create_dir_all(directory).map_err(|source| ExportError::Directory {
            path: directory.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Renders the committed canvas into a new ARGB image surface.
///
/// The surface starts fully transparent; exported PNGs keep the alpha
/// channel, so erased regions stay see-through.
pub fn render_to_surface(
    canvas: &Canvas,
    width: u32,
    height: u32,
) -> Result<cairo::ImageSurface, ExportError> {
    if width == 0 || height == 0 {
        return Err(ExportError::NoSurface);
    }

    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width as i32, height as i32)?;
    let ctx = cairo::Context::new(&surface)?;
    draw::render_ops(&ctx, canvas.visible_ops());
    drop(ctx);
    surface.flush();
    Ok(surface)
}

/// Exports the committed canvas pixels to a PNG file.
///
/// Returns the path written. Failures leave the canvas and its history
/// untouched; the caller reports them to the user.
pub fn save_canvas(
    canvas: &Canvas,
    width: u32,
    height: u32,
    options: &SaveOptions,
) -> Result<PathBuf, ExportError> {
    ensure_directory_exists(&options.directory)?;

    let filename = generate_filename(&options.filename_template);
    let file_path = options.directory.join(&filename);

    log::info!(
        "Saving {}x{} canvas to {}",
        width,
        height,
        file_path.display()
    );

    let surface = render_to_surface(canvas, width, height)?;

    let mut file = File::create(&file_path).map_err(|source| ExportError::Create {
        path: file_path.clone(),
        source,
    })?;
    surface
        .write_to_png(&mut file)
        .map_err(|source| ExportError::Write {
            path: file_path.clone(),
            source,
        })?;

    log::info!("Canvas saved: {}", file_path.display());
    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::RED;
    use crate::draw::{Stroke, StrokeStyle};

    fn canvas_with_stroke() -> Canvas {
        let mut canvas = Canvas::new();
        let mut stroke = Stroke::begin(10, 10, RED, StrokeStyle::round(6.0));
        stroke.push_point(50, 50);
        canvas.commit_stroke(stroke);
        canvas
    }

    #[test]
    fn filename_uses_template_and_png_extension() {
        let filename = generate_filename("annotation_%Y");
        assert!(filename.starts_with("annotation_2"));
        assert!(filename.ends_with(".png"));
    }

    #[test]
    fn zero_size_surface_is_rejected() {
        let canvas = Canvas::new();
        assert!(matches!(
            render_to_surface(&canvas, 0, 100),
            Err(ExportError::NoSurface)
        ));
    }

    #[test]
    fn save_writes_png_file() {
        let dir = tempfile::tempdir().unwrap();
        let options = SaveOptions {
            directory: dir.path().to_path_buf(),
            filename_template: "test_%Y%m%d".to_string(),
        };

        let canvas = canvas_with_stroke();
        let path = save_canvas(&canvas, 100, 100, &options).unwrap();

        assert!(path.exists());
        let bytes = std::fs::read(&path).unwrap();
        // PNG magic
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn save_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let options = SaveOptions {
            directory: nested.clone(),
            filename_template: "shot".to_string(),
        };

        let canvas = canvas_with_stroke();
        let path = save_canvas(&canvas, 64, 64, &options).unwrap();
        assert!(path.starts_with(&nested));
    }
}
