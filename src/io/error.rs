//! Error types for mosaic construction and export

use crate::algorithm::engine::EngineState;
use std::fmt;
use std::path::PathBuf;

/// Why an image file could not be turned into a pixel buffer
#[derive(Debug)]
pub enum UnreadableReason {
    /// Nothing exists at the path
    Missing,
    /// The path exists but is a directory or other non-regular file
    NotAFile,
    /// The bytes could not be decoded as a supported raster format
    Decode(image::ImageError),
    /// The file could not be opened or read
    Io(std::io::Error),
}

impl fmt::Display for UnreadableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "no such file"),
            Self::NotAFile => write!(f, "not a regular file"),
            Self::Decode(source) => write!(f, "{source}"),
            Self::Io(source) => write!(f, "{source}"),
        }
    }
}

/// Main error type for all mosaic operations
#[derive(Debug)]
pub enum MosaicError {
    /// A specific image file could not be decoded
    UnreadableImage {
        /// Path to the image file
        path: PathBuf,
        /// What went wrong while reading it
        reason: UnreadableReason,
    },

    /// The tile folder yielded no decodable images
    EmptyLibrary {
        /// Folder that was scanned
        folder: PathBuf,
        /// Number of candidate files that failed to decode
        skipped: usize,
    },

    /// Request parameters are non-positive or inconsistent
    InvalidRequest {
        /// Name of the offending parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Result accessed before a successful build
    NotReady {
        /// Engine state at the time of access
        state: EngineState,
    },

    /// Build aborted through its cancellation token
    Cancelled {
        /// Pipeline stage that observed the cancellation
        stage: &'static str,
        /// Work items of that stage finished before the abort
        completed: usize,
        /// Work items in the whole stage
        total: usize,
    },

    /// Failed to save an image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Internal computation produced no usable result
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },

    /// Logger could not be installed
    Logging {
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnreadableImage { path, reason } => {
                write!(f, "Unreadable image '{}': {reason}", path.display())
            }
            Self::EmptyLibrary { folder, skipped } => {
                write!(
                    f,
                    "No usable tile images in '{}' ({skipped} files skipped)",
                    folder.display()
                )
            }
            Self::InvalidRequest {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid request parameter '{parameter}' = '{value}': {reason}")
            }
            Self::NotReady { state } => {
                write!(f, "Mosaic is not ready (engine state: {state})")
            }
            Self::Cancelled {
                stage,
                completed,
                total,
            } => {
                write!(
                    f,
                    "Mosaic build cancelled during {stage} after {completed} of {total} steps"
                )
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
            Self::Logging { reason } => {
                write!(f, "Failed to initialize logging: {reason}")
            }
        }
    }
}

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnreadableImage { reason, .. } => match reason {
                UnreadableReason::Decode(source) => Some(source),
                UnreadableReason::Io(source) => Some(source),
                UnreadableReason::Missing | UnreadableReason::NotAFile => None,
            },
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for mosaic results
pub type Result<T> = std::result::Result<T, MosaicError>;

/// Create an invalid request error
pub fn invalid_request(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MosaicError {
    MosaicError::InvalidRequest {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> MosaicError {
    MosaicError::Computation {
        operation,
        reason: reason.to_string(),
    }
}
