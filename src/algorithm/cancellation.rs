use crate::io::error::{MosaicError, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cooperative cancellation flag shared between a build and its controller
///
/// Clones observe the same flag, so a UI thread can keep one handle and
/// cancel a build running on a worker thread. The build checks the flag
/// between cells and discards its partial canvas when it is set.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a token that is not cancelled
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of every build holding this token
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Fail with a cancelled error if cancellation has been requested
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::Cancelled`] naming `stage` and its progress
    pub fn check(&self, stage: &'static str, completed: usize, total: usize) -> Result<()> {
        if self.is_cancelled() {
            log::info!("Build cancelled during {stage} at step {completed} of {total}");
            return Err(MosaicError::Cancelled {
                stage,
                completed,
                total,
            });
        }
        Ok(())
    }
}
