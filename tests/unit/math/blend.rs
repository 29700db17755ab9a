//! Tests for overlay blending arithmetic

#[cfg(test)]
mod tests {

    use image::Rgba;
    use photomosaic::math::blend::{blend_channel, blend_pixel, clamp_transparency};

    // Tests the endpoints reproduce either input exactly
    // Verified by swapping the original and tile weights
    #[test]
    fn test_blend_channel_endpoints() {
        for original in [0_u8, 1, 77, 128, 254, 255] {
            for tile in [0_u8, 3, 200, 255] {
                assert_eq!(blend_channel(original, tile, 1.0), original);
                assert_eq!(blend_channel(original, tile, 0.0), tile);
            }
        }
    }

    // Tests intermediate weights round to nearest
    // Verified by truncating the mixed value
    #[test]
    fn test_blend_channel_midpoint() {
        assert_eq!(blend_channel(255, 0, 0.5), 128);
        assert_eq!(blend_channel(100, 200, 0.25), 175);
    }

    // Tests out-of-range and NaN transparencies are clamped
    // Verified by passing the raw value through
    #[test]
    fn test_clamp_transparency() {
        assert!((clamp_transparency(-0.5) - 0.0).abs() < f64::EPSILON);
        assert!((clamp_transparency(1.5) - 1.0).abs() < f64::EPSILON);
        assert!((clamp_transparency(0.4) - 0.4).abs() < f64::EPSILON);
        assert!((clamp_transparency(f64::NAN) - 0.0).abs() < f64::EPSILON);
    }

    // Tests every channel including alpha is blended
    // Verified by leaving alpha untouched
    #[test]
    fn test_blend_pixel_all_channels() {
        let original = Rgba([200, 100, 0, 255]);
        let tile = Rgba([0, 100, 200, 55]);

        assert_eq!(blend_pixel(original, tile, 1.0), original);
        assert_eq!(blend_pixel(original, tile, 0.0), tile);
        assert_eq!(blend_pixel(original, tile, 0.5), Rgba([100, 100, 100, 155]));
    }
}
