//! Tile selection and painting of the mosaic canvas
//!
//! Cells are visited in row-major order. Each cell takes the library tile
//! nearest to its mean color, skipping tiles in the anti-repetition window,
//! and paints a resampled copy of it over the cell's rectangle. With overlay
//! enabled every painted pixel is blended with the original target pixel.

use crate::algorithm::cancellation::CancellationToken;
use crate::algorithm::resample::fit_tile;
use crate::io::decoder::PixelBuffer;
use crate::io::error::{MosaicError, Result, computation_error, invalid_request};
use crate::io::progress::ProgressReporter;
use crate::library::tiles::TileLibrary;
use crate::library::window::UsageWindow;
use crate::math::blend::{blend_pixel, clamp_transparency};
use crate::spatial::grid::{Cell, Grid};
use image::imageops;
use std::path::PathBuf;

/// How painted tiles relate to the original target
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Overlay {
    /// Tiles are painted as-is
    Disabled,
    /// `output = transparency * original + (1 - transparency) * tile`
    Blend {
        /// Weight of the original image, within `[0, 1]`
        transparency: f64,
    },
}

impl Overlay {
    /// Blend mode with the transparency clamped into `[0, 1]`
    pub fn blend(transparency: f64) -> Self {
        Self::Blend {
            transparency: clamp_transparency(transparency),
        }
    }

    /// Overlay mode from a toggle and a transparency value
    pub fn from_toggle(enabled: bool, transparency: f64) -> Self {
        if enabled {
            Self::blend(transparency)
        } else {
            Self::Disabled
        }
    }
}

/// Tile placement chosen for one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Grid row of the cell
    pub row: usize,
    /// Grid column of the cell
    pub col: usize,
    /// Library index of the chosen tile
    pub tile: usize,
}

/// Paints a grid with tiles from a library
pub struct MosaicComposer<'a> {
    library: &'a TileLibrary,
    overlay: Overlay,
    window: UsageWindow,
    placements: Vec<Placement>,
}

impl<'a> MosaicComposer<'a> {
    /// Create a composer with an anti-repetition window of `repetition_window` tiles
    pub fn new(library: &'a TileLibrary, overlay: Overlay, repetition_window: usize) -> Self {
        let overlay = match overlay {
            Overlay::Blend { transparency } => Overlay::blend(transparency),
            Overlay::Disabled => Overlay::Disabled,
        };
        Self {
            library,
            overlay,
            window: UsageWindow::new(repetition_window, library.len()),
            placements: Vec::new(),
        }
    }

    /// Overlay mode in effect
    pub const fn overlay(&self) -> Overlay {
        self.overlay
    }

    /// Tiles chosen by the last composition, in row-major cell order
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Compose the mosaic for a sampled target
    ///
    /// The output has the dimensions of `target`. Progress is reported after
    /// every cell; cancellation is checked before every cell.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The grid does not cover the target exactly
    /// - The library holds no tiles
    /// - The cancellation token fires before the last cell
    pub fn compose(
        &mut self,
        target: &PixelBuffer,
        grid: &Grid,
        progress: &mut dyn ProgressReporter,
        cancellation: &CancellationToken,
    ) -> Result<PixelBuffer> {
        let (width, height) = target.dimensions();
        if grid.pixel_count() != u64::from(width) * u64::from(height) {
            return Err(invalid_request(
                "grid",
                &format!("{}x{} cells", grid.rows(), grid.cols()),
                &format!("does not cover the {width}x{height} target"),
            ));
        }

        self.window.clear();
        self.placements.clear();
        self.placements.reserve(grid.len());

        let mut canvas = PixelBuffer::new(width, height);
        let total = grid.len();

        for (index, cell) in grid.cells().iter().enumerate() {
            cancellation.check("composition", index, total)?;

            let painted = self.paint_cell(target, cell)?;
            imageops::replace(
                &mut canvas,
                &painted,
                i64::from(cell.bounds.x),
                i64::from(cell.bounds.y),
            );

            progress.report((index + 1) as f64 / total as f64);
        }

        if total == 0 {
            progress.report(1.0);
        }

        Ok(canvas)
    }

    /// Pick and render the tile for one cell, recording the placement
    fn paint_cell(&mut self, target: &PixelBuffer, cell: &Cell) -> Result<PixelBuffer> {
        let index = self
            .library
            .nearest_index(cell.color, Some(&self.window))
            .ok_or_else(|| MosaicError::EmptyLibrary {
                folder: PathBuf::new(),
                skipped: 0,
            })?;
        let tile = self.library.get(index).ok_or_else(|| {
            computation_error("tile selection", &format!("tile index {index} out of range"))
        })?;

        self.window.push(index);
        self.placements.push(Placement {
            row: cell.row,
            col: cell.col,
            tile: index,
        });

        let mut painted = fit_tile(tile.image(), cell.bounds.width, cell.bounds.height);
        if let Overlay::Blend { transparency } = self.overlay {
            for (x, y, pixel) in painted.enumerate_pixels_mut() {
                let original = target.get_pixel_checked(cell.bounds.x + x, cell.bounds.y + y);
                if let Some(original) = original {
                    *pixel = blend_pixel(*original, *pixel, transparency);
                }
            }
        }

        Ok(painted)
    }
}
