//! Color analysis of target and tile images

/// Mean colors of images and regions
pub mod color;
/// Grid sampling of the target image
pub mod sampler;
