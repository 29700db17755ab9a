//! Grid sampling of the target image

use crate::analysis::color::ColorSample;
use crate::io::decoder::PixelBuffer;
use crate::io::error::{Result, invalid_request};
use crate::spatial::grid::{Cell, Grid, layout_cells};

/// Sample the target into a row-major grid of mean colors
///
/// Remainder cells at the right and bottom edges are averaged over their
/// actual extent.
///
/// # Errors
///
/// Returns an invalid request error if `tile_size` is zero
pub fn sample(target: &PixelBuffer, tile_size: u32) -> Result<Grid> {
    if tile_size == 0 {
        return Err(invalid_request(
            "tile_size",
            &tile_size,
            &"must be positive",
        ));
    }

    let (rows, cols, bounds) = layout_cells(target.width(), target.height(), tile_size);
    let cells = bounds
        .into_iter()
        .enumerate()
        .map(|(index, bounds)| {
            let color = ColorSample::mean_of_region(
                target,
                bounds.x,
                bounds.y,
                bounds.width,
                bounds.height,
            );
            Cell {
                row: index / cols,
                col: index % cols,
                bounds,
                color,
            }
        })
        .collect::<Vec<_>>();

    log::debug!(
        "Sampled {rows}x{cols} grid from {}x{} target",
        target.width(),
        target.height()
    );

    Ok(Grid::new(rows, cols, tile_size, cells))
}
