use async_trait::async_trait;
use rivalscan_core::PacingConfig;
use std::time::Duration;
use tokio::time::sleep;

/// Pacing policy applied between consecutive search requests.
///
/// The throttle is part of the contract with the external source, not a
/// performance choice. A token-bucket limiter would slot in behind this
/// same trait.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self);
}

/// Fixed delay after every request.
pub struct FixedDelayPacer {
    delay: Duration,
}

impl FixedDelayPacer {
    pub fn new(config: &PacingConfig) -> Self {
        Self {
            delay: Duration::from_millis(config.inter_query_delay_ms),
        }
    }
}

#[async_trait]
impl Pacer for FixedDelayPacer {
    async fn pause(&self) {
        sleep(self.delay).await;
    }
}

/// No delay at all; for tests.
pub struct NoopPacer;

#[async_trait]
impl Pacer for NoopPacer {
    async fn pause(&self) {}
}
