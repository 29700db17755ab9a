//! Saving finished images to disk

use crate::io::configuration::DEFAULT_JPEG_QUALITY;
use crate::io::decoder::PixelBuffer;
use crate::io::error::{MosaicError, Result, invalid_request};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Encoding settings for saved images
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// JPEG quality from 1 to 100, ignored by lossless formats
    pub jpeg_quality: u8,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// Save an image, choosing the format from the file extension
///
/// Missing parent directories are created. JPEG output drops the alpha
/// channel and uses the configured quality.
///
/// # Errors
///
/// Returns an error if:
/// - The extension does not name a writable format
/// - The JPEG quality is outside 1..=100
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn save_image(image: &PixelBuffer, path: &Path, options: &ExportOptions) -> Result<()> {
    let format = ImageFormat::from_path(path)
        .ok()
        .filter(ImageFormat::writing_enabled)
        .ok_or_else(|| {
            invalid_request(
                "output",
                &path.display(),
                &"extension does not name a writable image format",
            )
        })?;

    if !(1..=100).contains(&options.jpeg_quality) {
        return Err(invalid_request(
            "jpeg_quality",
            &options.jpeg_quality,
            &"must be between 1 and 100",
        ));
    }

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| MosaicError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    let export_error = |source| MosaicError::ImageExport {
        path: path.to_path_buf(),
        source,
    };

    if format == ImageFormat::Jpeg {
        let file = File::create(path).map_err(|e| MosaicError::FileSystem {
            path: path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;
        let rgb = DynamicImage::ImageRgba8(image.clone()).into_rgb8();
        JpegEncoder::new_with_quality(BufWriter::new(file), options.jpeg_quality)
            .encode_image(&rgb)
            .map_err(export_error)?;
    } else {
        image.save_with_format(path, format).map_err(export_error)?;
    }

    log::info!(
        "Saved {}x{} image to '{}'",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(())
}
