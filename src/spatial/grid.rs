//! Cell layout of the mosaic grid
//!
//! The target is split into square cells of the tile size in row-major order.
//! When the image is not an exact multiple of the tile size the last row and
//! column hold smaller remainder cells; nothing is padded or cropped, so the
//! cells partition the image exactly.

use crate::analysis::color::ColorSample;
use ndarray::Array2;

/// Pixel rectangle covered by one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellBounds {
    /// Left edge in pixels
    pub x: u32,
    /// Top edge in pixels
    pub y: u32,
    /// Width in pixels (tile size, or less for the last column)
    pub width: u32,
    /// Height in pixels (tile size, or less for the last row)
    pub height: u32,
}

impl CellBounds {
    /// Number of pixels inside the rectangle
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Whether the cell is smaller than a full tile
    pub const fn is_remainder(&self, tile_size: u32) -> bool {
        self.width < tile_size || self.height < tile_size
    }
}

/// One grid position and its sampled color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Grid row
    pub row: usize,
    /// Grid column
    pub col: usize,
    /// Covered pixel rectangle in the target image
    pub bounds: CellBounds,
    /// Mean color of the covered pixels
    pub color: ColorSample,
}

/// Row-major grid of sampled cells
#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    cols: usize,
    tile_size: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Assemble a grid from cells already in row-major order
    pub const fn new(rows: usize, cols: usize, tile_size: u32, cells: Vec<Cell>) -> Self {
        Self {
            rows,
            cols,
            tile_size,
            cells,
        }
    }

    /// Number of cell rows
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of cell columns
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Nominal edge of a full cell
    pub const fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Cells in row-major order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell at a grid position
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col)
    }

    /// Total pixels covered by all cells
    pub fn pixel_count(&self) -> u64 {
        self.cells.iter().map(|cell| cell.bounds.area()).sum()
    }

    /// Cell colors as a (rows, cols) matrix
    pub fn color_map(&self) -> Array2<ColorSample> {
        let mut map = Array2::default((self.rows, self.cols));
        for cell in &self.cells {
            if let Some(slot) = map.get_mut((cell.row, cell.col)) {
                *slot = cell.color;
            }
        }
        map
    }
}

/// Split an image extent into row-major cell rectangles
///
/// Returns `(rows, cols, bounds)`. A zero tile size or an empty image yields
/// no cells.
pub fn layout_cells(width: u32, height: u32, tile_size: u32) -> (usize, usize, Vec<CellBounds>) {
    if tile_size == 0 || width == 0 || height == 0 {
        return (0, 0, Vec::new());
    }

    let rows = height.div_ceil(tile_size);
    let cols = width.div_ceil(tile_size);
    let mut bounds = Vec::with_capacity(rows as usize * cols as usize);

    for row in 0..rows {
        let y = row * tile_size;
        let cell_height = tile_size.min(height - y);
        for col in 0..cols {
            let x = col * tile_size;
            bounds.push(CellBounds {
                x,
                y,
                width: tile_size.min(width - x),
                height: cell_height,
            });
        }
    }

    (rows as usize, cols as usize, bounds)
}
