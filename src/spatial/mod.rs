//! Spatial data structures for the mosaic grid

/// Cell layout and the sampled grid
pub mod grid;

pub use grid::Grid;
