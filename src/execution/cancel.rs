//! Cooperative cancellation for the watch loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Interval for checking the cancellation flag while sleeping.
const CANCEL_CHECK_INTERVAL: Duration = Duration::from_millis(50);

/// Shared flag that asks a watch loop to stop after its current cycle.
///
/// Clones share the same flag, so one clone can be handed to another
/// thread and cancelled from there.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Sleeps for `period`, waking early if cancelled.
    ///
    /// Returns `true` if the token was cancelled.
    pub fn sleep(&self, period: Duration) -> bool {
        let deadline = Instant::now() + period;

        loop {
            if self.is_cancelled() {
                return true;
            }

            let now = Instant::now();
            if now >= deadline {
                return false;
            }

            thread::sleep(CANCEL_CHECK_INTERVAL.min(deadline - now));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_flag() {
        let token = CancelToken::new();
        let other = token.clone();

        assert!(!token.is_cancelled());
        other.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_sleep_full_period() {
        let token = CancelToken::new();
        let started = Instant::now();

        assert!(!token.sleep(Duration::from_millis(60)));
        assert!(started.elapsed() >= Duration::from_millis(60));
    }

    #[test]
    fn test_sleep_returns_immediately_when_cancelled() {
        let token = CancelToken::new();
        token.cancel();

        let started = Instant::now();
        assert!(token.sleep(Duration::from_secs(30)));
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_sleep_wakes_on_cancel_from_other_thread() {
        let token = CancelToken::new();
        let remote = token.clone();

        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(100));
            remote.cancel();
        });

        let started = Instant::now();
        assert!(token.sleep(Duration::from_secs(30)));
        assert!(started.elapsed() < Duration::from_secs(5));
        handle.join().unwrap();
    }
}
