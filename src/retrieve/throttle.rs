//! Fixed-interval throttle between download attempts.
//!
//! Deliberately not adaptive: the pause is a constant duration applied after
//! every attempt, success or failure. Tests construct a zero-delay throttle
//! so batches run instantly.

use std::time::Duration;

use tracing::trace;

/// Fixed pause applied after every download attempt.
#[derive(Debug, Clone)]
pub struct Throttle {
    delay: Duration,
}

impl Throttle {
    /// Creates a throttle with the given inter-request delay.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Creates a throttle that never pauses.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Returns the configured delay.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Returns true when the throttle never pauses.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.delay.is_zero()
    }

    /// Pauses for the configured delay. A zero delay returns immediately
    /// without yielding to the timer.
    #[allow(clippy::cast_possible_truncation)]
    pub async fn pause(&self) {
        if self.delay.is_zero() {
            return;
        }
        trace!(delay_ms = self.delay.as_millis() as u64, "throttling");
        tokio::time::sleep(self.delay).await;
    }
}
