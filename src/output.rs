//! PNG output: files, bytes and data URLs

use base64::Engine;
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, RgbaImage};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name used when an export has no explicit destination
pub const DEFAULT_EXPORT_FILENAME: &str = "pixel-matrix.png";

/// Error type for output operations
#[derive(Debug, Error)]
pub enum OutputError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Image encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Save an RGBA image to a PNG file, creating parent directories as needed.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let bytes = encode_png(image)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Encode an RGBA image as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, OutputError> {
    let mut png = Vec::new();
    PngEncoder::new(&mut png).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ColorType::Rgba8,
    )?;
    Ok(png)
}

/// Encode an RGBA image as a `data:image/png;base64,...` URL.
pub fn png_data_url(image: &RgbaImage) -> Result<String, OutputError> {
    let png = encode_png(image)?;
    Ok(format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(png)
    ))
}

/// Resolve where an export goes.
///
/// | `-o` argument | Output |
/// |---------------|--------|
/// | none | `pixel-matrix.png` |
/// | `dir/` or an existing directory | `dir/pixel-matrix.png` |
/// | `art.png` | `art.png` |
pub fn export_path(output_arg: Option<&Path>) -> PathBuf {
    match output_arg {
        Some(output) => {
            let is_dir = output.as_os_str().to_string_lossy().ends_with('/') || output.is_dir();
            if is_dir {
                output.join(DEFAULT_EXPORT_FILENAME)
            } else {
                output.to_path_buf()
            }
        }
        None => PathBuf::from(DEFAULT_EXPORT_FILENAME),
    }
}
