//! Tile library construction and lookup
//!
//! This module contains:
//! - Folder scanning and parallel tile decoding
//! - The color-indexed tile library
//! - The anti-repetition window used during selection

/// Folder scanning and parallel decoding
pub mod loader;
/// Tiles and nearest-color lookup
pub mod tiles;
/// Recently used tile tracking
pub mod window;

pub use tiles::{Tile, TileLibrary};
