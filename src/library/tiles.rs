//! Tile library with nearest-color lookup
//!
//! Tiles are kept in lexicographic file-name order. Their mean colors are
//! mirrored into a contiguous `(tile, channel)` palette so that lookups scan a
//! single flat array instead of chasing per-tile allocations.
//!
//! A tile's color is measured on its centered square, the region that square
//! cells paint, so non-square photos match on what they actually show.

use crate::algorithm::cancellation::CancellationToken;
use crate::algorithm::resample::centered_crop;
use crate::analysis::color::ColorSample;
use crate::io::decoder::PixelBuffer;
use crate::io::error::{MosaicError, Result};
use crate::library::loader::{self, LibraryOptions};
use crate::library::window::UsageWindow;
use ndarray::Array2;
use std::path::{Path, PathBuf};

/// One candidate tile image
#[derive(Debug, Clone)]
pub struct Tile {
    name: String,
    path: PathBuf,
    image: PixelBuffer,
    color: ColorSample,
}

impl Tile {
    /// Create a tile, computing its mean color from the image
    pub fn new(path: impl Into<PathBuf>, image: PixelBuffer) -> Self {
        let color = Self::painted_color(&image);
        Self::with_color(path, image, color)
    }

    /// Mean color of the centered square that a cell paints from `image`
    pub fn painted_color(image: &PixelBuffer) -> ColorSample {
        let area = centered_crop(image.width(), image.height(), 1, 1);
        ColorSample::mean_of_region(image, area.x, area.y, area.width, area.height)
    }

    /// Create a tile with a precomputed mean color
    pub fn with_color(path: impl Into<PathBuf>, image: PixelBuffer, color: ColorSample) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        Self {
            name,
            path,
            image,
            color,
        }
    }

    /// File name used as the tile identifier
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source path of the tile
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Decoded (possibly thumbnailed) pixels
    pub const fn image(&self) -> &PixelBuffer {
        &self.image
    }

    /// Mean color of the centered square of the decoded image
    pub const fn color(&self) -> ColorSample {
        self.color
    }
}

/// Candidate file that was left out of the library
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedTile {
    /// Path of the skipped file
    pub path: PathBuf,
    /// Why it was skipped
    pub reason: String,
}

/// Ordered set of tiles indexed by mean color
#[derive(Debug, Clone)]
pub struct TileLibrary {
    tiles: Vec<Tile>,
    palette: Array2<u8>,
    skipped: Vec<SkippedTile>,
}

impl TileLibrary {
    /// Load every decodable image directly inside `folder`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The folder cannot be read
    /// - No file in the folder decodes as an image
    pub fn build<P: AsRef<Path>>(folder: P) -> Result<Self> {
        Self::build_with(folder, &LibraryOptions::default())
    }

    /// Load a tile folder with explicit worker and thumbnail settings
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The folder cannot be read
    /// - No file in the folder decodes as an image
    /// - A decode worker died without reporting a result
    pub fn build_with<P: AsRef<Path>>(folder: P, options: &LibraryOptions) -> Result<Self> {
        Self::build_cancellable(folder, options, &CancellationToken::new())
    }

    /// Load a tile folder, giving up once `cancellation` fires
    ///
    /// Decode jobs still queued when the token is set are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The folder cannot be read
    /// - The load is cancelled
    /// - No file in the folder decodes as an image
    /// - A decode worker died without reporting a result
    pub fn build_cancellable<P: AsRef<Path>>(
        folder: P,
        options: &LibraryOptions,
        cancellation: &CancellationToken,
    ) -> Result<Self> {
        let folder = folder.as_ref();
        let loaded = loader::load_folder_cancellable(folder, options, cancellation)?;
        let skipped = loaded.skipped;

        if loaded.tiles.is_empty() {
            return Err(MosaicError::EmptyLibrary {
                folder: folder.to_path_buf(),
                skipped: skipped.len(),
            });
        }

        log::info!(
            "Loaded {} tiles from '{}' ({} skipped)",
            loaded.tiles.len(),
            folder.display(),
            skipped.len()
        );

        let mut library = Self::from_sorted(loaded.tiles);
        library.skipped = skipped;
        Ok(library)
    }

    /// Build a library from tiles already in memory
    ///
    /// Tiles are reordered by file name.
    ///
    /// # Errors
    ///
    /// Returns an empty library error if `tiles` is empty
    pub fn from_tiles(mut tiles: Vec<Tile>) -> Result<Self> {
        if tiles.is_empty() {
            return Err(MosaicError::EmptyLibrary {
                folder: PathBuf::new(),
                skipped: 0,
            });
        }
        tiles.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(Self::from_sorted(tiles))
    }

    fn from_sorted(tiles: Vec<Tile>) -> Self {
        let mut palette = Array2::zeros((tiles.len(), 3));
        for (mut row, tile) in palette.outer_iter_mut().zip(&tiles) {
            for (slot, channel) in row.iter_mut().zip(tile.color.channels()) {
                *slot = channel;
            }
        }
        Self {
            tiles,
            palette,
            skipped: Vec::new(),
        }
    }

    /// Tile at an enumeration index
    pub fn get(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    /// Number of tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the library holds no tiles
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Mean colors as a `(tiles, 3)` matrix
    pub const fn palette(&self) -> &Array2<u8> {
        &self.palette
    }

    /// Files that failed to decode, with the reason
    pub fn skipped(&self) -> &[SkippedTile] {
        &self.skipped
    }

    /// Index of the tile closest in RGB space to `target`
    ///
    /// Ties resolve to the earliest tile in enumeration order. Tiles in
    /// `exclude` are passed over unless that would leave no candidate, in
    /// which case the exclusion is ignored. Returns `None` only for an empty
    /// library.
    pub fn nearest_index(
        &self,
        target: ColorSample,
        exclude: Option<&UsageWindow>,
    ) -> Option<usize> {
        let window = exclude.filter(|window| !window.excludes_all());
        self.scan_nearest(target, window)
            .or_else(|| self.scan_nearest(target, None))
    }

    /// Tile closest in RGB space to `target`
    ///
    /// See [`TileLibrary::nearest_index`] for tie and exclusion rules.
    pub fn nearest_tile(
        &self,
        target: ColorSample,
        exclude: Option<&UsageWindow>,
    ) -> Option<&Tile> {
        self.nearest_index(target, exclude)
            .and_then(|index| self.tiles.get(index))
    }

    fn scan_nearest(&self, target: ColorSample, exclude: Option<&UsageWindow>) -> Option<usize> {
        let mut best: Option<(usize, u32)> = None;

        for (index, row) in self.palette.outer_iter().enumerate() {
            if exclude.is_some_and(|window| window.contains(index)) {
                continue;
            }

            let Some(&[red, green, blue]) = row.as_slice() else {
                continue;
            };
            let distance = target.distance_squared(ColorSample::new(red, green, blue));

            // Strict comparison keeps the first of equidistant tiles
            if best.is_none_or(|(_, best_distance)| distance < best_distance) {
                best = Some((index, distance));
            }
        }

        best.map(|(index, _)| index)
    }
}
