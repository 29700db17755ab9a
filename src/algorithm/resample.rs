//! Tile and target resampling
//!
//! Tiles are center-cropped to the aspect ratio of the destination before the
//! bilinear resize, so remainder cells and non-square photos keep their
//! proportions instead of being stretched.

use crate::io::decoder::PixelBuffer;
use image::imageops::{self, FilterType};

/// Filter used for every resize in the pipeline
pub const RESAMPLE_FILTER: FilterType = FilterType::Triangle;

/// Pixel rectangle inside a source image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropArea {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// Largest centered rectangle of the source with the target aspect ratio
pub fn centered_crop(
    source_width: u32,
    source_height: u32,
    target_width: u32,
    target_height: u32,
) -> CropArea {
    let full = CropArea {
        x: 0,
        y: 0,
        width: source_width,
        height: source_height,
    };
    if source_width == 0 || source_height == 0 || target_width == 0 || target_height == 0 {
        return full;
    }

    let (sw, sh) = (u64::from(source_width), u64::from(source_height));
    let (tw, th) = (u64::from(target_width), u64::from(target_height));

    // Compare sw/sh with tw/th without division
    if sw * th > sh * tw {
        let width = ((sh * tw + th / 2) / th).clamp(1, sw);
        let width = u32::try_from(width).unwrap_or(source_width);
        CropArea {
            x: (source_width - width) / 2,
            width,
            ..full
        }
    } else if sw * th < sh * tw {
        let height = ((sw * th + tw / 2) / tw).clamp(1, sh);
        let height = u32::try_from(height).unwrap_or(source_height);
        CropArea {
            y: (source_height - height) / 2,
            height,
            ..full
        }
    } else {
        full
    }
}

/// Resample a tile to exactly `width` x `height` pixels
///
/// Equal sizes are returned as an unchanged copy.
pub fn fit_tile(tile: &PixelBuffer, width: u32, height: u32) -> PixelBuffer {
    if tile.dimensions() == (width, height) {
        return tile.clone();
    }

    let area = centered_crop(tile.width(), tile.height(), width, height);
    let cropped = imageops::crop_imm(tile, area.x, area.y, area.width, area.height).to_image();
    imageops::resize(&cropped, width, height, RESAMPLE_FILTER)
}

/// Square thumbnail of a tile with the given edge
pub fn square_thumbnail(tile: &PixelBuffer, edge: u32) -> PixelBuffer {
    fit_tile(tile, edge, edge)
}

/// Dimensions with the longest side equal to `longest_edge`
///
/// The aspect ratio is preserved and neither side drops below one pixel.
pub fn scaled_dimensions(width: u32, height: u32, longest_edge: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest == 0 {
        return (width, height);
    }

    let scale = |side: u32| {
        let scaled = (u64::from(side) * u64::from(longest_edge) + u64::from(longest) / 2)
            / u64::from(longest);
        u32::try_from(scaled.max(1)).unwrap_or(u32::MAX)
    };
    (scale(width), scale(height))
}

/// Resize the target so that its longest side equals `longest_edge`
pub fn resize_target(target: &PixelBuffer, longest_edge: u32) -> PixelBuffer {
    let (width, height) = scaled_dimensions(target.width(), target.height(), longest_edge);
    if (width, height) == target.dimensions() {
        return target.clone();
    }
    imageops::resize(target, width, height, RESAMPLE_FILTER)
}
