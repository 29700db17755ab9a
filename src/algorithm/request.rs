//! Validated mosaic build requests
//!
//! A request is assembled through [`MosaicRequestBuilder`] and checked once in
//! [`MosaicRequestBuilder::build`]; afterwards it is read-only and can be
//! handed to any number of engines.

use crate::io::configuration::{
    DEFAULT_REPETITION_WINDOW, LARGE_IMAGE_EDGE, LARGE_TILE_EDGE, MAX_IMAGE_EDGE,
    MEDIUM_IMAGE_EDGE, MEDIUM_TILE_EDGE, SMALL_IMAGE_EDGE, SMALL_TILE_EDGE,
    default_decode_workers,
};
use crate::io::error::{Result, invalid_request};
use crate::math::blend::clamp_transparency;
use std::fmt;
use std::path::{Path, PathBuf};

/// Size choice offered for both the output image and the tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizePreset {
    /// Smallest preset
    Small,
    /// Middle preset
    #[default]
    Medium,
    /// Largest preset
    Large,
    /// Explicit pixel size
    Custom(u32),
}

impl SizePreset {
    /// Longest edge of the resized target in pixels
    pub const fn image_edge(self) -> u32 {
        match self {
            Self::Small => SMALL_IMAGE_EDGE,
            Self::Medium => MEDIUM_IMAGE_EDGE,
            Self::Large => LARGE_IMAGE_EDGE,
            Self::Custom(edge) => edge,
        }
    }

    /// Edge of one full cell in pixels
    pub const fn tile_edge(self) -> u32 {
        match self {
            Self::Small => SMALL_TILE_EDGE,
            Self::Medium => MEDIUM_TILE_EDGE,
            Self::Large => LARGE_TILE_EDGE,
            Self::Custom(edge) => edge,
        }
    }
}

impl fmt::Display for SizePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Small => write!(f, "small"),
            Self::Medium => write!(f, "medium"),
            Self::Large => write!(f, "large"),
            Self::Custom(edge) => write!(f, "custom({edge})"),
        }
    }
}

/// Immutable description of one mosaic build
#[derive(Debug, Clone, PartialEq)]
pub struct MosaicRequest {
    target_path: PathBuf,
    tile_folder: PathBuf,
    image_size: SizePreset,
    tile_size: SizePreset,
    overlay: bool,
    transparency: f64,
    repetition_window: usize,
    decode_workers: usize,
}

impl MosaicRequest {
    /// Start a request for a target image and a tile folder
    pub fn builder(
        target_path: impl Into<PathBuf>,
        tile_folder: impl Into<PathBuf>,
    ) -> MosaicRequestBuilder {
        MosaicRequestBuilder {
            target_path: target_path.into(),
            tile_folder: tile_folder.into(),
            image_size: SizePreset::default(),
            tile_size: SizePreset::default(),
            overlay: false,
            transparency: 0.0,
            repetition_window: DEFAULT_REPETITION_WINDOW,
            decode_workers: None,
        }
    }

    /// Target image to reconstruct
    pub fn target_path(&self) -> &Path {
        &self.target_path
    }

    /// Folder holding candidate tiles
    pub fn tile_folder(&self) -> &Path {
        &self.tile_folder
    }

    /// Requested output size
    pub const fn image_size(&self) -> SizePreset {
        self.image_size
    }

    /// Requested tile size
    pub const fn tile_size(&self) -> SizePreset {
        self.tile_size
    }

    /// Longest edge of the resized target in pixels
    pub const fn image_edge(&self) -> u32 {
        self.image_size.image_edge()
    }

    /// Edge of one full cell in pixels
    pub const fn tile_edge(&self) -> u32 {
        self.tile_size.tile_edge()
    }

    /// Whether the original is blended through the tiles
    pub const fn overlay(&self) -> bool {
        self.overlay
    }

    /// Weight of the original image when blending, within `[0, 1]`
    pub const fn transparency(&self) -> f64 {
        self.transparency
    }

    /// Number of recent tiles excluded from selection
    pub const fn repetition_window(&self) -> usize {
        self.repetition_window
    }

    /// Threads used to decode the tile folder
    pub const fn decode_workers(&self) -> usize {
        self.decode_workers
    }
}

/// Collects request parameters before validation
#[derive(Debug, Clone)]
pub struct MosaicRequestBuilder {
    target_path: PathBuf,
    tile_folder: PathBuf,
    image_size: SizePreset,
    tile_size: SizePreset,
    overlay: bool,
    transparency: f64,
    repetition_window: usize,
    decode_workers: Option<usize>,
}

impl MosaicRequestBuilder {
    /// Set the output size preset
    #[must_use]
    pub fn image_size(mut self, size: SizePreset) -> Self {
        self.image_size = size;
        self
    }

    /// Set the tile size preset
    #[must_use]
    pub fn tile_size(mut self, size: SizePreset) -> Self {
        self.tile_size = size;
        self
    }

    /// Blend the original image through the mosaic at the given transparency
    ///
    /// Values outside `[0, 1]` are clamped when the request is built.
    #[must_use]
    pub fn overlay(mut self, transparency: f64) -> Self {
        self.overlay = true;
        self.transparency = transparency;
        self
    }

    /// Paint tiles without blending
    #[must_use]
    pub fn no_overlay(mut self) -> Self {
        self.overlay = false;
        self
    }

    /// Set how many recently used tiles are excluded from selection
    #[must_use]
    pub fn repetition_window(mut self, window: usize) -> Self {
        self.repetition_window = window;
        self
    }

    /// Set the number of tile decode threads
    #[must_use]
    pub fn decode_workers(mut self, workers: usize) -> Self {
        self.decode_workers = Some(workers);
        self
    }

    /// Validate the parameters and freeze the request
    ///
    /// # Errors
    ///
    /// Returns an invalid request error if:
    /// - Either path is empty
    /// - The image or tile edge is zero
    /// - The image edge exceeds the supported maximum
    /// - The tile edge is larger than the image edge
    /// - Transparency is NaN
    /// - Zero decode workers were requested
    pub fn build(self) -> Result<MosaicRequest> {
        if self.target_path.as_os_str().is_empty() {
            return Err(invalid_request("target_path", &"", &"must not be empty"));
        }
        if self.tile_folder.as_os_str().is_empty() {
            return Err(invalid_request("tile_folder", &"", &"must not be empty"));
        }

        let image_edge = self.image_size.image_edge();
        let tile_edge = self.tile_size.tile_edge();
        if image_edge == 0 {
            return Err(invalid_request(
                "image_size",
                &self.image_size,
                &"must be positive",
            ));
        }
        if image_edge > MAX_IMAGE_EDGE {
            return Err(invalid_request(
                "image_size",
                &self.image_size,
                &format!("must not exceed {MAX_IMAGE_EDGE} pixels"),
            ));
        }
        if tile_edge == 0 {
            return Err(invalid_request(
                "tile_size",
                &self.tile_size,
                &"must be positive",
            ));
        }
        if tile_edge > image_edge {
            return Err(invalid_request(
                "tile_size",
                &self.tile_size,
                &format!("tile edge {tile_edge} exceeds image edge {image_edge}"),
            ));
        }
        if self.transparency.is_nan() {
            return Err(invalid_request(
                "transparency",
                &self.transparency,
                &"must be a number",
            ));
        }
        if self.decode_workers == Some(0) {
            return Err(invalid_request(
                "decode_workers",
                &0,
                &"at least one worker is required",
            ));
        }

        Ok(MosaicRequest {
            target_path: self.target_path,
            tile_folder: self.tile_folder,
            image_size: self.image_size,
            tile_size: self.tile_size,
            overlay: self.overlay,
            transparency: clamp_transparency(self.transparency),
            repetition_window: self.repetition_window,
            decode_workers: self.decode_workers.unwrap_or_else(default_decode_workers),
        })
    }
}
