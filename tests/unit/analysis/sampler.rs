//! Tests for sampling a target image into a color grid

#[cfg(test)]
mod tests {

    use crate::{solid, split};
    use photomosaic::MosaicError;
    use photomosaic::analysis::color::ColorSample;
    use photomosaic::analysis::sampler::sample;

    // Tests each cell receives the mean of its own pixels
    // Verified by sampling every cell from the image origin
    #[test]
    fn test_sample_split_image() {
        let target = split(200, 100, [255, 0, 0], [0, 0, 255]);
        let Ok(grid) = sample(&target, 100) else {
            unreachable!("sampling a valid image should succeed");
        };

        assert_eq!((grid.rows(), grid.cols()), (1, 2));
        assert_eq!(
            grid.get(0, 0).map(|c| c.color),
            Some(ColorSample::new(255, 0, 0))
        );
        assert_eq!(
            grid.get(0, 1).map(|c| c.color),
            Some(ColorSample::new(0, 0, 255))
        );
    }

    // Tests cells are emitted in row-major order with matching coordinates
    // Verified by emitting column-major order
    #[test]
    fn test_sample_row_major_order() {
        let target = solid(30, 20, [1, 2, 3]);
        let Ok(grid) = sample(&target, 10) else {
            unreachable!("sampling a valid image should succeed");
        };

        let coordinates: Vec<_> = grid.cells().iter().map(|c| (c.row, c.col)).collect();
        assert_eq!(
            coordinates,
            vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]
        );
        for cell in grid.cells() {
            assert_eq!(cell.bounds.x, cell.col as u32 * 10);
            assert_eq!(cell.bounds.y, cell.row as u32 * 10);
        }
    }

    // Tests remainder cells are sampled over their real extent
    // Verified by averaging remainder cells over a full tile
    #[test]
    fn test_sample_remainder_cells() {
        // 15 wide: cells cover x 0..10 and 10..15; the right cell is pure blue
        let target = split(20, 10, [255, 0, 0], [0, 0, 255]);
        let cropped = image::imageops::crop_imm(&target, 0, 0, 15, 10).to_image();
        let Ok(grid) = sample(&cropped, 10) else {
            unreachable!("sampling a valid image should succeed");
        };

        assert_eq!(grid.len(), 2);
        let remainder = grid.get(0, 1);
        assert_eq!(remainder.map(|c| c.bounds.width), Some(5));
        assert_eq!(
            remainder.map(|c| c.color),
            Some(ColorSample::new(0, 0, 255))
        );
        assert_eq!(grid.pixel_count(), 150);
    }

    // Tests zero tile size is rejected
    // Verified by removing the tile size check
    #[test]
    fn test_sample_zero_tile_size() {
        let target = solid(4, 4, [0, 0, 0]);
        assert!(matches!(
            sample(&target, 0),
            Err(MosaicError::InvalidRequest { parameter: "tile_size", .. })
        ));
    }
}
