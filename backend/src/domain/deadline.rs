//! Per-call deadline carried into every facade operation.

use std::time::Duration;

use tokio::time::Instant;

/// Horizon used when a timeout would overflow the clock.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Point in time by which an operation must complete.
///
/// The instant is measured on the Tokio clock so paused-time tests can
/// advance it deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Deadline(Instant);

impl Deadline {
    /// Deadline `timeout` from now, saturating at roughly thirty years.
    pub fn after(timeout: Duration) -> Self {
        let now = Instant::now();
        Self(
            now.checked_add(timeout)
                .unwrap_or_else(|| now + FAR_FUTURE),
        )
    }

    /// Deadline at an explicit instant.
    pub fn at(instant: Instant) -> Self {
        Self(instant)
    }

    /// Instant at which the deadline expires.
    pub fn instant(&self) -> Instant {
        self.0
    }

    /// Whether the deadline has already passed.
    pub fn has_elapsed(&self) -> bool {
        Instant::now() >= self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn elapses_once_the_clock_passes_it() {
        let deadline = Deadline::after(Duration::from_millis(10));
        assert!(!deadline.has_elapsed());
        tokio::time::advance(Duration::from_millis(10)).await;
        assert!(deadline.has_elapsed());
    }

    #[tokio::test(start_paused = true)]
    async fn oversized_timeouts_saturate_instead_of_panicking() {
        let deadline = Deadline::after(Duration::MAX);
        assert!(!deadline.has_elapsed());
        assert_eq!(deadline.instant(), Instant::now() + FAR_FUTURE);
    }

    #[tokio::test(start_paused = true)]
    async fn at_preserves_the_instant() {
        let instant = Instant::now() + Duration::from_secs(1);
        assert_eq!(Deadline::at(instant).instant(), instant);
    }
}
