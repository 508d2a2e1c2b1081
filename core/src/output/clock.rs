//! Time source seam

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Time source the orchestrator arms timers against.
///
/// Schedule calculators take explicit instants; everything that needs to
/// read or wait on the clock at runtime goes through this trait so tests
/// can drive time deterministically.
#[async_trait]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    async fn sleep(&self, duration: Duration);
}

/// Wall clock backed by the tokio timer.
#[derive(Debug, Default)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
