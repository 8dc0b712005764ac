use std::time::Duration;

use cw_core::ports::DelayPort;
use tracing::debug;

pub struct TokioDelay;

#[async_trait::async_trait]
impl DelayPort for TokioDelay {
    async fn sleep(&self, duration: Duration) {
        debug!(delay_ms = duration.as_millis() as u64, "waiting for backend to settle");
        tokio::time::sleep(duration).await;
    }
}
