//! Console logger setup for the command-line front end
//!
//! Records go to stderr, the same stream the progress bar draws on. When a bar
//! is attached it is cleared for the duration of each write and redrawn
//! afterwards, so warnings never land in the middle of a bar line.

use crate::io::error::{MosaicError, Result};
use indicatif::ProgressBar;
use log::{LevelFilter, Record};
use log4rs::append::Append;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

/// Line layout of every log record
pub const LOG_PATTERN: &str = "{d(%H:%M:%S)} {h({l:<5})} {t} - {m}{n}";

const STDERR_APPENDER: &str = "stderr";

/// Map the CLI verbosity flags onto a level filter
///
/// Quiet runs only show errors; each `-v` raises the level by one step from
/// the default of warnings.
pub const fn level_for(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Stderr appender that suspends an attached progress bar while writing
#[derive(Debug)]
pub struct BarAwareAppender {
    console: ConsoleAppender,
    bar: Option<ProgressBar>,
}

impl BarAwareAppender {
    /// Create a stderr appender, optionally coordinated with a progress bar
    pub fn new(bar: Option<ProgressBar>) -> Self {
        let console = ConsoleAppender::builder()
            .target(Target::Stderr)
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build();
        Self { console, bar }
    }
}

impl Append for BarAwareAppender {
    fn append(&self, record: &Record<'_>) -> anyhow::Result<()> {
        match &self.bar {
            Some(bar) => bar.suspend(|| self.console.append(record)),
            None => self.console.append(record),
        }
    }

    fn flush(&self) {
        self.console.flush();
    }
}

/// Build the stderr logging configuration
///
/// # Errors
///
/// Returns a logging error if the configuration is rejected
pub fn config(level: LevelFilter, bar: Option<ProgressBar>) -> Result<Config> {
    let appender = BarAwareAppender::new(bar);

    Config::builder()
        .appender(Appender::builder().build(STDERR_APPENDER, Box::new(appender)))
        .build(Root::builder().appender(STDERR_APPENDER).build(level))
        .map_err(|e| MosaicError::Logging {
            reason: e.to_string(),
        })
}

/// Install the stderr logger for the whole process
///
/// Pass the bar that will be drawn during the build, if any.
///
/// # Errors
///
/// Returns a logging error if the configuration is rejected or a logger is
/// already installed
pub fn init(level: LevelFilter, bar: Option<ProgressBar>) -> Result<()> {
    log4rs::init_config(config(level, bar)?).map_err(|e| MosaicError::Logging {
        reason: e.to_string(),
    })?;
    Ok(())
}
