//! Linear blending between the original image and painted tiles

use image::Rgba;
use num_traits::ToPrimitive;

/// Clamp a transparency weight into `[0, 1]`
///
/// NaN collapses to zero so that the tile is painted unchanged.
pub fn clamp_transparency(transparency: f64) -> f64 {
    if transparency.is_nan() {
        return 0.0;
    }
    num_traits::clamp(transparency, 0.0, 1.0)
}

/// Blend one channel: `transparency * original + (1 - transparency) * tile`
///
/// `transparency` must already be clamped into `[0, 1]`.
pub fn blend_channel(original: u8, tile: u8, transparency: f64) -> u8 {
    let mixed =
        transparency.mul_add(f64::from(original), (1.0 - transparency) * f64::from(tile));
    mixed.round().clamp(0.0, 255.0).to_u8().unwrap_or(u8::MAX)
}

/// Blend every channel of a pixel, alpha included
pub fn blend_pixel(original: Rgba<u8>, tile: Rgba<u8>, transparency: f64) -> Rgba<u8> {
    let mut out = tile;
    for (channel, &source) in out.0.iter_mut().zip(original.0.iter()) {
        *channel = blend_channel(source, *channel, transparency);
    }
    out
}
