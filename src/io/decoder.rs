//! Image file decoding into uniform RGBA buffers

use crate::io::error::{MosaicError, Result, UnreadableReason};
use image::{ImageFormat, ImageReader, RgbaImage};
use std::path::Path;

/// Row-major RGBA8 pixel buffer shared by every pipeline stage
pub type PixelBuffer = RgbaImage;

/// Decode an image file into an RGBA buffer
///
/// The format is sniffed from the file contents, so a mislabeled extension
/// still decodes.
///
/// # Errors
///
/// Returns [`MosaicError::UnreadableImage`] if:
/// - Nothing exists at the path
/// - The path is not a regular file
/// - The file cannot be opened
/// - The contents are not a supported raster format
pub fn decode<P: AsRef<Path>>(path: P) -> Result<PixelBuffer> {
    let path = path.as_ref();
    let unreadable = |reason| MosaicError::UnreadableImage {
        path: path.to_path_buf(),
        reason,
    };

    if !path.exists() {
        return Err(unreadable(UnreadableReason::Missing));
    }
    if !path.is_file() {
        return Err(unreadable(UnreadableReason::NotAFile));
    }

    let reader = ImageReader::open(path)
        .and_then(ImageReader::with_guessed_format)
        .map_err(|e| unreadable(UnreadableReason::Io(e)))?;
    let image = reader
        .decode()
        .map_err(|e| unreadable(UnreadableReason::Decode(e)))?;

    Ok(image.into_rgba8())
}

/// Check whether the file extension names a format the decoder understands
pub fn is_supported_image(path: &Path) -> bool {
    ImageFormat::from_path(path).is_ok_and(|format| format.reading_enabled())
}
