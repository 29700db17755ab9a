//! Unit tests mirroring the `src` module tree

mod analysis;

use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};

/// Opaque image filled with one color
pub(crate) fn solid(width: u32, height: u32, rgb: [u8; 3]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([rgb[0], rgb[1], rgb[2], 255]))
}

/// Write a solid PNG into `dir` and return its path
pub(crate) fn write_solid(dir: &Path, name: &str, size: u32, rgb: [u8; 3]) -> PathBuf {
    let path = dir.join(name);
    solid(size, size, rgb)
        .save(&path)
        .unwrap_or_else(|e| panic!("failed to write fixture {}: {e}", path.display()));
    path
}

/// Image whose left half is one color and right half another
pub(crate) fn split(width: u32, height: u32, left: [u8; 3], right: [u8; 3]) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, _| {
        let rgb = if x < width / 2 { left } else { right };
        Rgba([rgb[0], rgb[1], rgb[2], 255])
    })
}
