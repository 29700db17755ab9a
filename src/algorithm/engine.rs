//! Mosaic build pipeline and its single-use engine
//!
//! The pipeline decodes the target, resizes it to the requested image edge,
//! samples it into a grid and composes the tiles. [`MosaicEngine`] wraps one
//! run in an explicit state machine so that results can only be read after a
//! successful build:
//!
//! ```text
//! Uninitialized -> Building -> Ready
//!                          \-> Failed
//! ```

use crate::algorithm::cancellation::CancellationToken;
use crate::algorithm::composer::{MosaicComposer, Overlay};
use crate::algorithm::request::MosaicRequest;
use crate::algorithm::resample::resize_target;
use crate::analysis::sampler;
use crate::io::decoder::{self, PixelBuffer};
use crate::io::error::{MosaicError, Result, invalid_request};
use crate::io::progress::{NoProgress, ProgressReporter};
use crate::library::loader::LibraryOptions;
use crate::library::tiles::TileLibrary;
use std::fmt;

/// Lifecycle of a [`MosaicEngine`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No build has been started
    Uninitialized,
    /// A build is running
    Building,
    /// The build succeeded and results are available
    Ready,
    /// The build failed or was cancelled
    Failed,
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "uninitialized"),
            Self::Building => write!(f, "building"),
            Self::Ready => write!(f, "ready"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Images produced by one successful build
#[derive(Debug, Clone)]
pub struct MosaicResult {
    /// Target resized to the requested image edge
    pub big_image: PixelBuffer,
    /// Composed mosaic, same dimensions as `big_image`
    pub mosaic_image: PixelBuffer,
}

/// Single-use mosaic builder with checked result access
#[derive(Debug)]
pub struct MosaicEngine {
    state: EngineState,
    result: Option<MosaicResult>,
    failure: Option<String>,
    cancellation: CancellationToken,
}

impl Default for MosaicEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MosaicEngine {
    /// Create an engine with its own cancellation token
    pub fn new() -> Self {
        Self::with_cancellation(CancellationToken::new())
    }

    /// Create an engine observing an external cancellation token
    pub const fn with_cancellation(cancellation: CancellationToken) -> Self {
        Self {
            state: EngineState::Uninitialized,
            result: None,
            failure: None,
            cancellation,
        }
    }

    /// Current lifecycle state
    pub const fn state(&self) -> EngineState {
        self.state
    }

    /// Token that cancels this engine's build
    pub const fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Message of the error that failed the build, if any
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Build the mosaic, loading tiles from the request's folder
    ///
    /// Cancellation is honored during the tile load as well as between cells.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The engine has already been used
    /// - The target cannot be decoded
    /// - The tile folder cannot be read or holds no usable tiles
    /// - The build is cancelled
    pub fn build(
        &mut self,
        request: &MosaicRequest,
        progress: &mut dyn ProgressReporter,
    ) -> Result<&MosaicResult> {
        self.run(progress, |progress, cancellation| {
            let options = library_options(request);
            let library =
                TileLibrary::build_cancellable(request.tile_folder(), &options, cancellation)?;
            run_pipeline(request, &library, progress, cancellation)
        })
    }

    /// Build the mosaic with an already loaded tile library
    ///
    /// The library is only borrowed, so it can be reused for further builds.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The engine has already been used
    /// - The target cannot be decoded
    /// - The build is cancelled
    pub fn build_with_library(
        &mut self,
        request: &MosaicRequest,
        library: &TileLibrary,
        progress: &mut dyn ProgressReporter,
    ) -> Result<&MosaicResult> {
        self.run(progress, |progress, cancellation| {
            run_pipeline(request, library, progress, cancellation)
        })
    }

    fn run<F>(
        &mut self,
        progress: &mut dyn ProgressReporter,
        pipeline: F,
    ) -> Result<&MosaicResult>
    where
        F: FnOnce(&mut dyn ProgressReporter, &CancellationToken) -> Result<MosaicResult>,
    {
        if self.state != EngineState::Uninitialized {
            return Err(invalid_request(
                "engine",
                &self.state,
                &"an engine builds exactly one mosaic",
            ));
        }

        self.state = EngineState::Building;
        match pipeline(progress, &self.cancellation) {
            Ok(result) => {
                self.state = EngineState::Ready;
                Ok(self.result.insert(result))
            }
            Err(error) => {
                log::warn!("Mosaic build failed: {error}");
                self.state = EngineState::Failed;
                self.failure = Some(error.to_string());
                Err(error)
            }
        }
    }

    /// Resized target image
    ///
    /// # Errors
    ///
    /// Returns a not-ready error unless the engine is `Ready`
    pub fn big_image(&self) -> Result<&PixelBuffer> {
        self.ready_result().map(|result| &result.big_image)
    }

    /// Composed mosaic image
    ///
    /// # Errors
    ///
    /// Returns a not-ready error unless the engine is `Ready`
    pub fn mosaic_image(&self) -> Result<&PixelBuffer> {
        self.ready_result().map(|result| &result.mosaic_image)
    }

    /// Take ownership of both images
    ///
    /// # Errors
    ///
    /// Returns a not-ready error unless the engine is `Ready`
    pub fn into_result(self) -> Result<MosaicResult> {
        let state = self.state;
        match (state, self.result) {
            (EngineState::Ready, Some(result)) => Ok(result),
            _ => Err(MosaicError::NotReady { state }),
        }
    }

    fn ready_result(&self) -> Result<&MosaicResult> {
        match (&self.state, &self.result) {
            (EngineState::Ready, Some(result)) => Ok(result),
            _ => Err(MosaicError::NotReady { state: self.state }),
        }
    }
}

/// Run the whole pipeline once without engine state
///
/// # Errors
///
/// Returns an error if:
/// - The target cannot be decoded
/// - The tile folder cannot be read or holds no usable tiles
pub fn build_mosaic(request: &MosaicRequest) -> Result<MosaicResult> {
    let mut engine = MosaicEngine::new();
    engine.build(request, &mut NoProgress)?;
    engine.into_result()
}

/// Library settings derived from a request
///
/// Stored tiles are shrunk to the tile edge, which is the largest size any
/// cell will paint them at.
pub fn library_options(request: &MosaicRequest) -> LibraryOptions {
    LibraryOptions {
        workers: request.decode_workers(),
        thumbnail_edge: Some(request.tile_edge()),
    }
}

/// Decode, resize, sample and compose
///
/// The token is checked around the target decode and before every cell.
///
/// # Errors
///
/// Returns an error if:
/// - The target cannot be decoded
/// - The build is cancelled
pub fn run_pipeline(
    request: &MosaicRequest,
    library: &TileLibrary,
    progress: &mut dyn ProgressReporter,
    cancellation: &CancellationToken,
) -> Result<MosaicResult> {
    cancellation.check("target decoding", 0, 1)?;
    let target = decoder::decode(request.target_path())?;
    let big_image = resize_target(&target, request.image_edge());
    cancellation.check("target decoding", 1, 1)?;
    log::info!(
        "Resized target '{}' from {}x{} to {}x{}",
        request.target_path().display(),
        target.width(),
        target.height(),
        big_image.width(),
        big_image.height()
    );
    drop(target);

    let grid = sampler::sample(&big_image, request.tile_edge())?;
    let overlay = Overlay::from_toggle(request.overlay(), request.transparency());
    let mut composer = MosaicComposer::new(library, overlay, request.repetition_window());
    let mosaic_image = composer.compose(&big_image, &grid, progress, cancellation)?;

    log::info!(
        "Composed {} cells ({}x{}) from {} tiles",
        grid.len(),
        grid.rows(),
        grid.cols(),
        library.len()
    );

    Ok(MosaicResult {
        big_image,
        mosaic_image,
    })
}
