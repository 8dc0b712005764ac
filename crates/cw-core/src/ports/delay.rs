use std::time::Duration;

/// Suspends the current operation without blocking the thread.
#[async_trait::async_trait]
pub trait DelayPort: Send + Sync {
    async fn sleep(&self, duration: Duration);
}
