//! Command-line front end: gathers build options, runs the engine and saves the images

use crate::algorithm::engine::MosaicEngine;
use crate::algorithm::request::{MosaicRequest, SizePreset};
use crate::io::configuration::{
    DEFAULT_JPEG_QUALITY, DEFAULT_OUTPUT_EXTENSION, DEFAULT_REPETITION_WINDOW,
    DEFAULT_TRANSPARENCY, OUTPUT_SUFFIX,
};
use crate::io::error::{Result, invalid_request};
use crate::io::export::{ExportOptions, save_image};
use crate::io::progress::{NoProgress, ProgressManager};
use clap::{ArgAction, Parser, ValueEnum};
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Preset names accepted for `--image-size` and `--tile-size`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SizeChoice {
    /// Small preset
    Small,
    /// Medium preset
    Medium,
    /// Large preset
    Large,
    /// Use the matching `--custom-*` value
    Custom,
}

impl SizeChoice {
    /// Combine the preset choice with its optional custom value
    ///
    /// # Errors
    ///
    /// Returns an invalid request error if `custom` is chosen without a value,
    /// or a value is given for a named preset
    pub fn resolve(self, custom: Option<u32>, parameter: &'static str) -> Result<SizePreset> {
        match (self, custom) {
            (Self::Custom, Some(edge)) => Ok(SizePreset::Custom(edge)),
            (Self::Custom, None) => Err(invalid_request(
                parameter,
                &"custom",
                &"a custom size needs an explicit pixel value",
            )),
            (_, Some(edge)) => Err(invalid_request(
                parameter,
                &edge,
                &"a pixel value is only accepted with the custom preset",
            )),
            (Self::Small, None) => Ok(SizePreset::Small),
            (Self::Medium, None) => Ok(SizePreset::Medium),
            (Self::Large, None) => Ok(SizePreset::Large),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "photomosaic")]
#[command(
    author,
    version,
    about = "Rebuild a photo from a folder of tile images"
)]
/// Command-line arguments for the mosaic builder
pub struct Cli {
    /// Image to reconstruct
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Folder of candidate tile images (not searched recursively)
    #[arg(value_name = "TILE_FOLDER")]
    pub tiles: PathBuf,

    /// Output file; the extension selects the format
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output image size preset (longest edge)
    #[arg(long, value_enum, default_value_t = SizeChoice::Medium)]
    pub image_size: SizeChoice,

    /// Longest edge in pixels when the image size is custom
    #[arg(long, value_name = "PIXELS")]
    pub custom_image_size: Option<u32>,

    /// Tile size preset (edge of one cell)
    #[arg(long, value_enum, default_value_t = SizeChoice::Medium)]
    pub tile_size: SizeChoice,

    /// Cell edge in pixels when the tile size is custom
    #[arg(long, value_name = "PIXELS")]
    pub custom_tile_size: Option<u32>,

    /// Blend the original image through the mosaic
    #[arg(long)]
    pub overlay: bool,

    /// Weight of the original image when overlaying (0 to 1)
    #[arg(short, long, default_value_t = DEFAULT_TRANSPARENCY)]
    pub transparency: f64,

    /// Number of recently used tiles that may not be repeated
    #[arg(long, default_value_t = DEFAULT_REPETITION_WINDOW)]
    pub repetition_window: usize,

    /// Threads used to decode tile images
    #[arg(short = 'j', long)]
    pub workers: Option<usize>,

    /// Also save the resized target image to this file
    #[arg(long, value_name = "PATH")]
    pub big_image: Option<PathBuf>,

    /// JPEG quality for JPEG outputs
    #[arg(
        long,
        default_value_t = DEFAULT_JPEG_QUALITY,
        value_parser = clap::value_parser!(u8).range(1..=100)
    )]
    pub jpeg_quality: u8,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log detail (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Translate the arguments into a validated request
    ///
    /// # Errors
    ///
    /// Returns an invalid request error if the size options are inconsistent
    /// or the request fails validation
    pub fn to_request(&self) -> Result<MosaicRequest> {
        let image_size = self
            .image_size
            .resolve(self.custom_image_size, "image_size")?;
        let tile_size = self.tile_size.resolve(self.custom_tile_size, "tile_size")?;

        let mut builder = MosaicRequest::builder(&self.target, &self.tiles)
            .image_size(image_size)
            .tile_size(tile_size)
            .repetition_window(self.repetition_window);
        if self.overlay {
            builder = builder.overlay(self.transparency);
        }
        if let Some(workers) = self.workers {
            builder = builder.decode_workers(workers);
        }
        builder.build()
    }

    /// File the mosaic is written to
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.target))
    }

    /// Encoding settings for saved images
    pub const fn export_options(&self) -> ExportOptions {
        ExportOptions {
            jpeg_quality: self.jpeg_quality,
        }
    }
}

/// Default mosaic path: `<stem>_mosaic.png` next to the target
pub fn default_output_path(target: &Path) -> PathBuf {
    let stem = target.file_stem().unwrap_or_default();
    let output_name = format!(
        "{}{OUTPUT_SUFFIX}.{DEFAULT_OUTPUT_EXTENSION}",
        stem.to_string_lossy()
    );

    if let Some(parent) = target.parent() {
        parent.join(output_name)
    } else {
        PathBuf::from(output_name)
    }
}

/// Runs one mosaic build from parsed arguments
pub struct MosaicCommand {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl MosaicCommand {
    /// Create a command for the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Progress bar the command will draw, if progress is shown
    pub fn progress_bar(&self) -> Option<ProgressBar> {
        self.progress_manager.as_ref().map(ProgressManager::bar)
    }

    /// Build the mosaic and save it, returning the output path
    ///
    /// # Errors
    ///
    /// Returns an error if the request is invalid, the build fails or an image
    /// cannot be saved
    pub fn run(&mut self) -> Result<PathBuf> {
        let start_time = Instant::now();
        let request = self.cli.to_request()?;
        let output_path = self.cli.output_path();
        let export_options = self.cli.export_options();

        let mut engine = MosaicEngine::new();
        let built = match self.progress_manager.as_mut() {
            Some(pm) => {
                let label = request
                    .target_path()
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .to_string();
                pm.start(&label);
                engine.build(&request, pm)
            }
            None => engine.build(&request, &mut NoProgress),
        };

        let result = match built {
            Ok(result) => result,
            Err(error) => {
                if let Some(ref pm) = self.progress_manager {
                    pm.abandon();
                }
                return Err(error);
            }
        };

        save_image(&result.mosaic_image, &output_path, &export_options)?;
        if let Some(ref big_image_path) = self.cli.big_image {
            save_image(&result.big_image, big_image_path, &export_options)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish(&format!(
                "{} ({:.1}s)",
                output_path.display(),
                start_time.elapsed().as_secs_f64()
            ));
        }

        Ok(output_path)
    }
}
