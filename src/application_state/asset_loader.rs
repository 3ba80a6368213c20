//! # Asset Loader
//!
//! Load-time file and image helpers for the startup path. Everything here
//! runs exactly once before the first frame, so every failure is terminal
//! for the process: callers get a structured [`AssetError`] and decide how
//! loudly to die.

use std::io::ErrorKind;
use std::path::Path;

use thiserror::Error;

/// Errors produced while loading startup assets.
///
/// These cover the whole load-time pipeline: reading a file from disk,
/// decoding a PNG into raw pixels, and creating a shader module on the
/// device. None of them are recoverable at runtime.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The requested file does not exist on disk.
    #[error("asset not found: {path}")]
    NotFound {
        /// Path that was requested.
        path: String,
    },

    /// The file exists but could not be read.
    #[error("failed to read asset {path}: {source}")]
    Io {
        /// Path that was requested.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file was read but is not a decodable image.
    #[error("failed to decode image {path}: {source}")]
    ImageDecode {
        /// Path that was requested.
        path: String,
        /// Underlying decoder error.
        source: image::ImageError,
    },

    /// The shader source failed device validation.
    #[error("shader '{label}' failed validation: {diagnostic}")]
    ShaderValidation {
        /// Debug label of the shader module.
        label: String,
        /// Validation diagnostic reported by the device.
        diagnostic: String,
    },
}

/// A decoded RGBA image ready for upload.
pub struct RgbaImage {
    /// Tightly packed RGBA8 pixel data, row-major.
    pub pixels: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Reads a whole file into memory as raw bytes.
///
/// A missing file is reported as [`AssetError::NotFound`] rather than a
/// sentinel value, so callers can never dereference a null-equivalent.
pub fn read_bytes(path: impl AsRef<Path>) -> Result<Vec<u8>, AssetError> {
    let path = path.as_ref();
    std::fs::read(path).map_err(|err| wrap_io_error(path, err))
}

/// Reads a whole file into memory as a UTF-8 string.
pub fn read_string(path: impl AsRef<Path>) -> Result<String, AssetError> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|err| wrap_io_error(path, err))
}

/// Decodes a PNG file into raw RGBA8 pixels plus dimensions.
///
/// # Arguments
/// * `path` - Path to the PNG asset
///
/// # Returns
/// The decoded image, converted to RGBA8 regardless of the source color
/// type.
pub fn decode_png(path: impl AsRef<Path>) -> Result<RgbaImage, AssetError> {
    let path = path.as_ref();
    let bytes = read_bytes(path)?;
    let decoded = image::load_from_memory(&bytes).map_err(|err| AssetError::ImageDecode {
        path: path.display().to_string(),
        source: err,
    })?;

    let rgba = decoded.into_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(RgbaImage {
        pixels: rgba.into_raw(),
        width,
        height,
    })
}

fn wrap_io_error(path: &Path, err: std::io::Error) -> AssetError {
    if err.kind() == ErrorKind::NotFound {
        AssetError::NotFound {
            path: path.display().to_string(),
        }
    } else {
        AssetError::Io {
            path: path.display().to_string(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reports_not_found() {
        let result = read_bytes("definitely/not/a/real/asset.bin");
        assert!(matches!(result, Err(AssetError::NotFound { .. })));
    }

    #[test]
    fn missing_png_reports_not_found() {
        let result = decode_png("definitely/not/a/real/asset.png");
        assert!(matches!(result, Err(AssetError::NotFound { .. })));
    }

    #[test]
    fn not_found_message_names_the_path() {
        let err = read_string("missing_shader.wgsl").unwrap_err();
        assert!(err.to_string().contains("missing_shader.wgsl"));
    }
}
