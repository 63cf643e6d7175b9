use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cooperative cancellation for long passes.
///
/// Clones share the same flag, so the host can keep one clone and cancel the
/// pass that polls another.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancellationToken {
    pub fn new() -> Self {
        CancellationToken::default()
    }

    /// A token that also expires after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Self {
        CancellationToken::new().limited_to(timeout)
    }

    /// Same flag, with the deadline moved to `timeout` from now unless an
    /// earlier one is already set.
    pub fn limited_to(&self, timeout: Duration) -> Self {
        let deadline = Instant::now().checked_add(timeout);
        let deadline = match (self.deadline, deadline) {
            (Some(existing), Some(new)) => Some(existing.min(new)),
            (existing, new) => existing.or(new),
        };
        CancellationToken {
            flag: self.flag.clone(),
            deadline,
        }
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
            || self.deadline.map_or(false, |deadline| Instant::now() >= deadline)
    }
}
