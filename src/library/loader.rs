//! Tile folder scanning and parallel decoding
//!
//! Candidates are the regular, non-hidden files directly inside the folder
//! whose extension names a readable image format. Decoding fans out over a
//! thread pool; results come back over a channel tagged with their scan
//! index and are put back into file-name order before the library sees them.

use crate::algorithm::cancellation::CancellationToken;
use crate::algorithm::resample::square_thumbnail;
use crate::io::configuration::default_decode_workers;
use crate::io::decoder::{self, is_supported_image};
use crate::io::error::{MosaicError, Result, computation_error};
use crate::library::tiles::{SkippedTile, Tile};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use threadpool::ThreadPool;

/// Settings for loading a tile folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryOptions {
    /// Number of decode threads (at least one is always used)
    pub workers: usize,
    /// Square edge to shrink stored tile images to, if any
    ///
    /// Colors are always measured on the full decoded image.
    pub thumbnail_edge: Option<u32>,
}

impl Default for LibraryOptions {
    fn default() -> Self {
        Self {
            workers: default_decode_workers(),
            thumbnail_edge: None,
        }
    }
}

/// Decoded tiles and the candidates that failed, both in file-name order
#[derive(Debug)]
pub struct LoadedFolder {
    /// Successfully decoded tiles
    pub tiles: Vec<Tile>,
    /// Candidates that could not be decoded
    pub skipped: Vec<SkippedTile>,
}

/// List candidate tile files directly inside `folder`, sorted by file name
///
/// # Errors
///
/// Returns a file system error if the folder or one of its entries cannot be
/// read
pub fn scan_folder(folder: &Path) -> Result<Vec<PathBuf>> {
    let read_error = |source| MosaicError::FileSystem {
        path: folder.to_path_buf(),
        operation: "read tile folder",
        source,
    };

    let mut candidates = Vec::new();
    for entry in std::fs::read_dir(folder).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();

        let hidden = path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().starts_with('.'));
        if hidden || !path.is_file() {
            continue;
        }
        if !is_supported_image(&path) {
            log::debug!("Ignoring non-image file '{}'", path.display());
            continue;
        }
        candidates.push(path);
    }

    candidates.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(candidates)
}

/// Decode one candidate into a tile
///
/// The color is measured before thumbnailing, on the same centered square the
/// thumbnail keeps.
///
/// # Errors
///
/// Returns an unreadable image error if the file cannot be decoded
pub fn load_tile(path: &Path, thumbnail_edge: Option<u32>) -> Result<Tile> {
    let image = decoder::decode(path)?;
    let color = Tile::painted_color(&image);
    let image = match thumbnail_edge {
        Some(edge) if edge > 0 => square_thumbnail(&image, edge),
        _ => image,
    };
    Ok(Tile::with_color(path, image, color))
}

/// Scan a folder and decode every candidate on a thread pool
///
/// Undecodable candidates are logged and reported in
/// [`LoadedFolder::skipped`] rather than failing the whole load.
///
/// # Errors
///
/// Returns an error if:
/// - The folder cannot be read
/// - A worker stops without delivering its result
pub fn load_folder(folder: &Path, options: &LibraryOptions) -> Result<LoadedFolder> {
    load_folder_cancellable(folder, options, &CancellationToken::new())
}

/// Scan and decode a folder, skipping queued decodes once `cancellation` fires
///
/// # Errors
///
/// Returns an error if:
/// - The folder cannot be read
/// - The load is cancelled
/// - A worker stops without delivering its result
pub fn load_folder_cancellable(
    folder: &Path,
    options: &LibraryOptions,
    cancellation: &CancellationToken,
) -> Result<LoadedFolder> {
    let candidates = scan_folder(folder)?;
    let total = candidates.len();
    cancellation.check("tile loading", 0, total)?;

    let pool = ThreadPool::new(options.workers.clamp(1, total.max(1)));
    let (sender, receiver) = mpsc::channel();

    for (index, path) in candidates.iter().cloned().enumerate() {
        let sender = sender.clone();
        let thumbnail_edge = options.thumbnail_edge;
        let cancellation = cancellation.clone();
        pool.execute(move || {
            let outcome =
                (!cancellation.is_cancelled()).then(|| load_tile(&path, thumbnail_edge));
            // Receiver outlives the pool; a send failure means the load was abandoned
            let _ = sender.send((index, path, outcome));
        });
    }
    drop(sender);

    let mut results = receiver.iter().collect::<Vec<_>>();
    if results.len() != total {
        return Err(computation_error(
            "tile decoding",
            &format!(
                "{} of {total} decode workers reported no result",
                total - results.len()
            ),
        ));
    }

    let decoded = results.iter().filter(|(_, _, outcome)| outcome.is_some()).count();
    cancellation.check("tile loading", decoded, total)?;
    results.sort_by_key(|(index, _, _)| *index);

    let mut tiles = Vec::with_capacity(total);
    let mut skipped = Vec::new();
    for (_, path, outcome) in results {
        match outcome {
            Some(Ok(tile)) => tiles.push(tile),
            Some(Err(error)) => {
                log::warn!("Skipping tile '{}': {error}", path.display());
                skipped.push(SkippedTile {
                    path,
                    reason: error.to_string(),
                });
            }
            None => {
                return Err(computation_error(
                    "tile decoding",
                    &format!("decode of '{}' was skipped", path.display()),
                ));
            }
        }
    }

    Ok(LoadedFolder { tiles, skipped })
}
