//! Pipeline constants and runtime configuration defaults

// Longest edge of the resized target for each image-size preset
/// Longest edge in pixels for the small image preset
pub const SMALL_IMAGE_EDGE: u32 = 600;
/// Longest edge in pixels for the medium image preset
pub const MEDIUM_IMAGE_EDGE: u32 = 1200;
/// Longest edge in pixels for the large image preset
pub const LARGE_IMAGE_EDGE: u32 = 2400;

// Edge of one square cell for each tile-size preset
/// Tile edge in pixels for the small tile preset
pub const SMALL_TILE_EDGE: u32 = 10;
/// Tile edge in pixels for the medium tile preset
pub const MEDIUM_TILE_EDGE: u32 = 20;
/// Tile edge in pixels for the large tile preset
pub const LARGE_TILE_EDGE: u32 = 40;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed edge for the resized target
pub const MAX_IMAGE_EDGE: u32 = 16_384;

/// Number of recently used tiles excluded from selection
pub const DEFAULT_REPETITION_WINDOW: usize = 8;

/// Default overlay transparency when blending is switched on
pub const DEFAULT_TRANSPARENCY: f64 = 0.3;

/// Fallback worker count when the available parallelism cannot be queried
pub const FALLBACK_DECODE_WORKERS: usize = 4;

// Output settings
/// Suffix added to the target stem for the default output file
pub const OUTPUT_SUFFIX: &str = "_mosaic";
/// Extension of the default output file
pub const DEFAULT_OUTPUT_EXTENSION: &str = "png";
/// JPEG quality used when none is requested
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Number of decode workers to use by default
pub fn default_decode_workers() -> usize {
    std::thread::available_parallelism()
        .map_or(FALLBACK_DECODE_WORKERS, std::num::NonZeroUsize::get)
}
