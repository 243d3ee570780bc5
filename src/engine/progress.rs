use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Receives "`current` of `total` assets scanned" updates, once per asset.
pub trait ProgressSink: Sync {
    fn report(&self, current: usize, total: usize);
}

impl<F> ProgressSink for F
where
    F: Fn(usize, usize) + Sync,
{
    fn report(&self, current: usize, total: usize) {
        self(current, total)
    }
}

/// Discards progress.
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _current: usize, _total: usize) {}
}

/// Logs progress through `tracing`.
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn report(&self, current: usize, total: usize) {
        tracing::info!("{current} of {total} assets scanned");
    }
}

/// Cooperative cancellation flag, checked before each asset.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
