use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::common::errors::{BayesError, Result};

/// Cancellation signal checked between trials.
///
/// Clones share the same flag, so a token handed to a running sampler can
/// be cancelled from another thread.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same flag, with a deadline `timeout` from now.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        CancelToken {
            cancelled: Arc::clone(&self.cancelled),
            deadline: Some(Instant::now() + timeout),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
            || self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Errors with the number of trials finished so far once cancelled.
    pub fn check(&self, completed: usize) -> Result<()> {
        if self.is_cancelled() {
            return Err(BayesError::Cancelled { completed });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_flag() {
        let token = CancelToken::new();
        let worker = token.clone();
        assert!(worker.check(0).is_ok());
        token.cancel();
        assert!(matches!(
            worker.check(12),
            Err(BayesError::Cancelled { completed: 12 })
        ));
    }

    #[test]
    fn test_expired_deadline() {
        let token = CancelToken::new().with_timeout(Duration::ZERO);
        assert!(token.is_cancelled());
    }
}
