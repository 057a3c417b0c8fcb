//! Event rate limiting

use std::time::Duration;

/// Leading-edge throttle driven by event timestamps
///
/// The first event passes, then events are dropped until `window` has elapsed since the last
/// event that passed. Timestamps are milliseconds on any monotonic clock (the browser's
/// `Event.timeStamp` in practice), which keeps the throttle independent of wall-clock APIs.
#[derive(Debug, Clone)]
pub struct Throttle {
    window_ms: f64,
    last_passed_ms: Option<f64>,
}

impl Throttle {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window_ms: window.as_secs_f64() * 1000.0,
            last_passed_ms: None,
        }
    }

    /// Record an event at `now_ms`; returns whether it should be processed.
    pub fn allow(&mut self, now_ms: f64) -> bool {
        match self.last_passed_ms {
            // A clock that went backwards (page restored from cache) restarts the window.
            Some(last) if now_ms >= last && now_ms - last < self.window_ms => false,
            _ => {
                self.last_passed_ms = Some(now_ms);
                true
            }
        }
    }
}
