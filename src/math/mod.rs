//! Mathematical utilities for the pipeline

/// Linear blending of pixels
pub mod blend;
