use std::time::Duration;

use tokio::time::Instant;

/// Minimum time between two effective polls of the same sensor.
pub const MIN_TIME_BETWEEN_UPDATES: Duration = Duration::from_secs(30);

/// Admits at most one call per interval.
///
/// The window opens when a call is admitted, regardless of how that call
/// turns out.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Admit a call if the window has elapsed, recording it.
    pub fn try_acquire(&mut self) -> bool {
        let now = Instant::now();
        match self.last {
            Some(last) if now.duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// Time left before the next call is admitted; zero if it would be now.
    pub fn remaining(&self) -> Duration {
        self.last.map_or(Duration::ZERO, |last| {
            self.interval.saturating_sub(last.elapsed())
        })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(MIN_TIME_BETWEEN_UPDATES)
    }
}
