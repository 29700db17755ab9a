/// Cooperative cancellation of running builds
pub mod cancellation;
/// Tile selection and canvas painting
pub mod composer;
/// Build pipeline and single-use engine state machine
pub mod engine;
/// Validated build requests and size presets
pub mod request;
/// Tile fitting and target resizing
pub mod resample;
