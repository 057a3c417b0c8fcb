//! Timer abstract Trait

use std::time::Duration;

use async_trait::async_trait;

/// Timer Trait
///
/// Futures are not `Send`: browser timers live on the page's single thread.
///
/// Platform implementation:
/// - Browser: `GlooTimer` (`museum-page-web`, `gloo::timers`)
/// - Native: [`TokioTimer`]
#[async_trait(?Send)]
pub trait Timer {
    /// Resolve after `duration`
    async fn sleep(&self, duration: Duration);
}

/// Tokio-backed timer
///
/// Pauses with the runtime clock, so `#[tokio::test(start_paused = true)]` skips delays.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTimer;

#[async_trait(?Send)]
impl Timer for TokioTimer {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
