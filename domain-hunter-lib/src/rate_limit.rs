//! Pacing between domain checks.
//!
//! The checker calls [`RateLimit::pause`] after every check, whatever the
//! outcome, so consecutive requests to the RDAP service and the resolver are
//! at least one interval apart.

use async_trait::async_trait;
use std::time::Duration;

/// Minimum-interval policy injected into the checker.
#[async_trait]
pub trait RateLimit: Send + Sync {
    /// Wait before the next check may start.
    async fn pause(&self);
}

/// Sleep for a fixed interval after every check.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl RateLimit for FixedDelay {
    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

/// No pacing at all. Meant for tests and offline runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl RateLimit for NoDelay {
    async fn pause(&self) {}
}
