//! Tests for tile selection and canvas painting

#[cfg(test)]
mod tests {

    use crate::{solid, split};
    use image::Rgba;
    use photomosaic::MosaicError;
    use photomosaic::algorithm::cancellation::CancellationToken;
    use photomosaic::algorithm::composer::{MosaicComposer, Overlay, Placement};
    use photomosaic::analysis::sampler::sample;
    use photomosaic::io::progress::NoProgress;
    use photomosaic::library::{Tile, TileLibrary};

    fn rgb_library() -> TileLibrary {
        let tiles = vec![
            Tile::new("blue.png", solid(8, 8, [0, 0, 255])),
            Tile::new("green.png", solid(8, 8, [0, 255, 0])),
            Tile::new("red.png", solid(8, 8, [255, 0, 0])),
        ];
        let Ok(library) = TileLibrary::from_tiles(tiles) else {
            unreachable!("non-empty tile list should build a library");
        };
        library
    }

    // Tests each cell is painted with its nearest tile
    // Verified by painting every cell with the first tile
    #[test]
    fn test_compose_picks_nearest_tiles() {
        let library = rgb_library();
        let target = split(20, 10, [250, 10, 10], [10, 10, 250]);
        let Ok(grid) = sample(&target, 10) else {
            unreachable!("sampling should succeed");
        };

        let mut composer = MosaicComposer::new(&library, Overlay::Disabled, 0);
        let Ok(mosaic) = composer.compose(
            &target,
            &grid,
            &mut NoProgress,
            &CancellationToken::new(),
        ) else {
            unreachable!("composition should succeed");
        };

        assert_eq!(mosaic.dimensions(), (20, 10));
        assert_eq!(*mosaic.get_pixel(2, 5), Rgba([255, 0, 0, 255]));
        assert_eq!(*mosaic.get_pixel(17, 5), Rgba([0, 0, 255, 255]));
        assert_eq!(
            composer.placements(),
            &[
                Placement {
                    row: 0,
                    col: 0,
                    tile: 2
                },
                Placement {
                    row: 0,
                    col: 1,
                    tile: 0
                },
            ]
        );
    }

    // Tests the window forces a different tile for repeated colors
    // Verified by ignoring the usage window
    #[test]
    fn test_compose_avoids_repetition() {
        let library = rgb_library();
        let target = solid(30, 10, [255, 0, 0]);
        let Ok(grid) = sample(&target, 10) else {
            unreachable!("sampling should succeed");
        };

        let mut composer = MosaicComposer::new(&library, Overlay::Disabled, 1);
        let Ok(_) = composer.compose(&target, &grid, &mut NoProgress, &CancellationToken::new())
        else {
            unreachable!("composition should succeed");
        };

        let tiles: Vec<_> = composer.placements().iter().map(|p| p.tile).collect();
        assert_eq!(tiles.len(), 3);
        assert_eq!(tiles[0], 2);
        assert_ne!(tiles[1], 2);
        assert_eq!(tiles[2], 2);
    }

    // Tests a window larger than the library falls back to plain nearest
    // Verified by failing when all tiles are excluded
    #[test]
    fn test_compose_window_larger_than_library() {
        let library = rgb_library();
        let target = solid(50, 10, [0, 250, 0]);
        let Ok(grid) = sample(&target, 10) else {
            unreachable!("sampling should succeed");
        };

        let mut composer = MosaicComposer::new(&library, Overlay::Disabled, 8);
        let result = composer.compose(&target, &grid, &mut NoProgress, &CancellationToken::new());

        assert!(result.is_ok());
        assert_eq!(composer.placements().len(), 5);
    }

    // Tests full transparency reproduces the target
    // Verified by weighting the tile instead of the original
    #[test]
    fn test_compose_full_transparency() {
        let library = rgb_library();
        let target = split(20, 20, [12, 34, 56], [200, 150, 100]);
        let Ok(grid) = sample(&target, 10) else {
            unreachable!("sampling should succeed");
        };

        let mut composer = MosaicComposer::new(&library, Overlay::blend(1.0), 8);
        let Ok(mosaic) = composer.compose(
            &target,
            &grid,
            &mut NoProgress,
            &CancellationToken::new(),
        ) else {
            unreachable!("composition should succeed");
        };

        assert_eq!(mosaic, target);
    }

    // Tests partial transparency mixes target and tile
    #[test]
    fn test_compose_half_transparency() {
        let library = rgb_library();
        let target = solid(10, 10, [200, 0, 0]);
        let Ok(grid) = sample(&target, 10) else {
            unreachable!("sampling should succeed");
        };

        let mut composer = MosaicComposer::new(&library, Overlay::from_toggle(true, 0.5), 8);
        let Ok(mosaic) = composer.compose(
            &target,
            &grid,
            &mut NoProgress,
            &CancellationToken::new(),
        ) else {
            unreachable!("composition should succeed");
        };

        assert_eq!(*mosaic.get_pixel(4, 4), Rgba([228, 0, 0, 255]));
    }

    // Tests overlay transparency is clamped on construction
    #[test]
    fn test_overlay_clamping() {
        let library = rgb_library();
        let composer = MosaicComposer::new(&library, Overlay::Blend { transparency: 4.0 }, 8);

        assert_eq!(composer.overlay(), Overlay::Blend { transparency: 1.0 });
        assert_eq!(Overlay::from_toggle(false, 0.4), Overlay::Disabled);
    }

    // Tests progress is reported once per cell and ends at one
    // Verified by reporting only at the end
    #[test]
    fn test_compose_progress() {
        let library = rgb_library();
        let target = solid(25, 25, [0, 0, 0]);
        let Ok(grid) = sample(&target, 10) else {
            unreachable!("sampling should succeed");
        };

        let mut reports = Vec::new();
        let mut reporter = |fraction: f64| reports.push(fraction);
        let mut composer = MosaicComposer::new(&library, Overlay::Disabled, 2);
        let Ok(mosaic) = composer.compose(
            &target,
            &grid,
            &mut reporter,
            &CancellationToken::new(),
        ) else {
            unreachable!("composition should succeed");
        };

        assert_eq!(mosaic.dimensions(), (25, 25));
        assert_eq!(reports.len(), 9);
        assert!(reports.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(reports.last().copied(), Some(1.0));
    }

    // Tests a cancelled token stops before the first cell
    // Verified by checking cancellation only after the loop
    #[test]
    fn test_compose_cancelled() {
        let library = rgb_library();
        let target = solid(20, 20, [0, 0, 0]);
        let Ok(grid) = sample(&target, 10) else {
            unreachable!("sampling should succeed");
        };
        let token = CancellationToken::new();
        token.cancel();

        let mut composer = MosaicComposer::new(&library, Overlay::Disabled, 8);
        let result = composer.compose(&target, &grid, &mut NoProgress, &token);

        assert!(matches!(
            result,
            Err(MosaicError::Cancelled {
                stage: "composition",
                completed: 0,
                total: 4
            })
        ));
    }

    // Tests a grid sampled from a different image is rejected
    #[test]
    fn test_compose_mismatched_grid() {
        let library = rgb_library();
        let Ok(grid) = sample(&solid(10, 10, [0, 0, 0]), 10) else {
            unreachable!("sampling should succeed");
        };
        let target = solid(20, 10, [0, 0, 0]);

        let mut composer = MosaicComposer::new(&library, Overlay::Disabled, 8);
        assert!(matches!(
            composer.compose(&target, &grid, &mut NoProgress, &CancellationToken::new()),
            Err(MosaicError::InvalidRequest {
                parameter: "grid",
                ..
            })
        ));
    }
}
