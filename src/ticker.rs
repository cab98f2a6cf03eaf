use std::time::{Duration, Instant};

/// Default UI poll interval in milliseconds
pub const DEFAULT_POLL_MS: u64 = 250;

/// Default timer interval in milliseconds (one tick per second)
pub const DEFAULT_TICK_MS: u64 = 1000;

/// Get UI poll duration
pub fn poll_duration(ms: u64) -> Duration {
    Duration::from_millis(ms.max(1))
}

/// Cancellable repeating timer handle.
///
/// Nothing fires on its own; the owner calls [`Ticker::poll`] and receives the
/// number of whole intervals that elapsed since the last boundary. Arming an
/// already armed ticker keeps the original phase, so there is never more than
/// one tick source.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    last_boundary: Option<Instant>,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            last_boundary: None,
        }
    }

    pub fn start(&mut self, now: Instant) {
        if self.last_boundary.is_none() {
            self.last_boundary = Some(now);
        }
    }

    pub fn cancel(&mut self) {
        self.last_boundary = None;
    }

    /// Count elapsed intervals and advance the boundary past them
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(last) = self.last_boundary else {
            return 0;
        };

        let elapsed = now.saturating_duration_since(last);
        let fired = (elapsed.as_nanos() / self.interval.as_nanos()) as u32;
        if fired > 0 {
            self.last_boundary = Some(last + self.interval * fired);
        }
        fired
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_TICK_MS))
    }
}
