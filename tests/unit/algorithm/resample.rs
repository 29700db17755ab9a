//! Tests for aspect-preserving tile fitting and target resizing

#[cfg(test)]
mod tests {

    use crate::{solid, split};
    use image::Rgba;
    use photomosaic::algorithm::resample::{
        CropArea, centered_crop, fit_tile, resize_target, scaled_dimensions, square_thumbnail,
    };

    // Tests crop of a wide source to a square target
    // Verified by anchoring the crop at the left edge
    #[test]
    fn test_centered_crop_wide_source() {
        assert_eq!(
            centered_crop(200, 100, 10, 10),
            CropArea {
                x: 50,
                y: 0,
                width: 100,
                height: 100
            }
        );
    }

    // Tests crop of a tall source to a wide target
    // Verified by cropping width instead of height
    #[test]
    fn test_centered_crop_tall_source() {
        assert_eq!(
            centered_crop(100, 300, 20, 10),
            CropArea {
                x: 0,
                y: 125,
                width: 100,
                height: 50
            }
        );
    }

    // Tests matching aspect ratios keep the whole source
    #[test]
    fn test_centered_crop_same_aspect() {
        assert_eq!(
            centered_crop(40, 20, 4, 2),
            CropArea {
                x: 0,
                y: 0,
                width: 40,
                height: 20
            }
        );
    }

    // Tests equal sizes are copied unchanged
    // Verified by always resizing
    #[test]
    fn test_fit_tile_identity() {
        let tile = split(8, 8, [10, 20, 30], [200, 100, 0]);
        assert_eq!(fit_tile(&tile, 8, 8), tile);
    }

    // Tests solid tiles stay exactly solid at any size
    // Verified by using a filter that darkens borders
    #[test]
    fn test_fit_tile_solid_stays_solid() {
        let tile = solid(37, 23, [12, 240, 99]);
        let fitted = fit_tile(&tile, 10, 4);

        assert_eq!(fitted.dimensions(), (10, 4));
        assert!(fitted.pixels().all(|p| *p == Rgba([12, 240, 99, 255])));
    }

    // Tests the center crop discards the sides of a wide tile
    // Verified by stretching the full tile
    #[test]
    fn test_fit_tile_crops_center() {
        // Left third red, right two thirds blue: centered square crop is mostly blue
        let tile = image::RgbaImage::from_fn(30, 10, |x, _| {
            if x < 10 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            }
        });
        let fitted = square_thumbnail(&tile, 10);

        assert_eq!(fitted.dimensions(), (10, 10));
        assert!(fitted.pixels().all(|p| p.0[2] == 255 && p.0[0] == 0));
    }

    // Tests longest-edge scaling preserves aspect ratio
    // Verified by scaling both sides to the edge
    #[test]
    fn test_scaled_dimensions() {
        assert_eq!(scaled_dimensions(400, 200, 100), (100, 50));
        assert_eq!(scaled_dimensions(200, 400, 100), (50, 100));
        assert_eq!(scaled_dimensions(300, 300, 300), (300, 300));
        assert_eq!(scaled_dimensions(1000, 1, 10), (10, 1));
        assert_eq!(scaled_dimensions(30, 20, 600), (600, 400));
        assert_eq!(scaled_dimensions(0, 0, 10), (0, 0));
    }

    // Tests target resize dimensions and the no-op path
    // Verified by skipping the resize entirely
    #[test]
    fn test_resize_target() {
        let target = solid(40, 20, [5, 6, 7]);

        let same = resize_target(&target, 40);
        assert_eq!(same, target);

        let smaller = resize_target(&target, 10);
        assert_eq!(smaller.dimensions(), (10, 5));
        assert!(smaller.pixels().all(|p| *p == Rgba([5, 6, 7, 255])));
    }
}
