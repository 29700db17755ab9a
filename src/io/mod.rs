/// Command-line interface
pub mod cli;
/// Pipeline constants and defaults
pub mod configuration;
/// Image file decoding
pub mod decoder;
/// Error types
pub mod error;
/// Image saving
pub mod export;
/// Console logger setup
pub mod logging;
/// Progress reporting
pub mod progress;
