//! Photo mosaic construction from a folder of tile images
//!
//! A target image is resized, split into a grid of cells and rebuilt by
//! painting each cell with the library tile whose mean color is nearest to
//! the cell's mean color, optionally blending the original back in.

#![forbid(unsafe_code)]

/// Request validation, tile composition and the build engine
pub mod algorithm;
/// Color sampling of images and grid cells
pub mod analysis;
/// Input/output operations, configuration and error handling
pub mod io;
/// Tile folder loading and nearest-color lookup
pub mod library;
/// Pixel blending arithmetic
pub mod math;
/// Grid layout of mosaic cells
pub mod spatial;

pub use algorithm::engine::{EngineState, MosaicEngine, MosaicResult, build_mosaic};
pub use algorithm::request::{MosaicRequest, SizePreset};
pub use io::error::{MosaicError, Result};
