//! Build progress reporting and its terminal display

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

/// Number of steps the terminal bar is divided into
pub const PROGRESS_RESOLUTION: u64 = 1000;

/// Receives the fraction of grid cells completed during a build
///
/// Fractions arrive in non-decreasing order within `[0, 1]`; the last report
/// of a successful build is `1.0`.
pub trait ProgressReporter {
    /// Record the completed fraction
    fn report(&mut self, fraction: f64);
}

impl<F: FnMut(f64)> ProgressReporter for F {
    fn report(&mut self, fraction: f64) {
        self(fraction);
    }
}

/// Reporter that discards every update
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn report(&mut self, _fraction: f64) {}
}

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {msg} [{bar:40.cyan/blue}] {percent:>3}%")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Terminal progress bar for one mosaic build
pub struct ProgressManager {
    bar: ProgressBar,
    last_fraction: f64,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress bar drawn on stderr
    pub fn new() -> Self {
        Self::with_bar(ProgressBar::new(PROGRESS_RESOLUTION))
    }

    /// Create a manager around a bar that never draws
    pub fn hidden() -> Self {
        Self::with_bar(ProgressBar::hidden())
    }

    fn with_bar(bar: ProgressBar) -> Self {
        bar.set_length(PROGRESS_RESOLUTION);
        bar.set_style(PROGRESS_STYLE.clone());
        Self {
            bar,
            last_fraction: 0.0,
        }
    }

    /// Label the bar with the file being built
    pub fn start(&mut self, label: &str) {
        self.last_fraction = 0.0;
        self.bar.set_position(0);
        self.bar.set_message(label.to_string());
    }

    /// Handle to the underlying bar, shared with the logger
    pub fn bar(&self) -> ProgressBar {
        self.bar.clone()
    }

    /// Last fraction shown
    pub const fn fraction(&self) -> f64 {
        self.last_fraction
    }

    /// Current bar position out of [`PROGRESS_RESOLUTION`]
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Complete the bar and leave it on screen with a message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }

    /// Remove the bar from the terminal
    pub fn abandon(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressReporter for ProgressManager {
    fn report(&mut self, fraction: f64) {
        if fraction.is_nan() {
            return;
        }
        // Out-of-order updates never move the bar backwards
        let fraction = fraction.clamp(self.last_fraction, 1.0);
        self.last_fraction = fraction;
        self.bar
            .set_position((fraction * PROGRESS_RESOLUTION as f64).round() as u64);
    }
}
