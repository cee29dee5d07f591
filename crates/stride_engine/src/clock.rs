//! Injectable time source.

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use std::sync::Arc;

/// Supplies the server write clock.
///
/// Injected so reconciliation decisions are deterministic under test and so
/// deployments can substitute a monotonic source if wall-clock skew is a
/// concern.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to a settable instant, for deterministic tests.
///
/// Clones share the same instant, so a test can keep a handle while the
/// engine owns another.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Arc<RwLock<DateTime<Utc>>>,
}

impl FixedClock {
    /// Creates a clock pinned to the given instant.
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(RwLock::new(now)),
        }
    }

    /// Pins the clock to a new instant.
    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.write() = now;
    }

    /// Moves the clock forward.
    pub fn advance(&self, duration: Duration) {
        let mut now = self.now.write();
        *now += duration;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn fixed_clock_is_settable() {
        let t0 = Utc.timestamp_opt(1_000, 0).unwrap();
        let clock = FixedClock::new(t0);
        assert_eq!(clock.now(), t0);

        clock.advance(Duration::seconds(5));
        assert_eq!(clock.now(), t0 + Duration::seconds(5));

        let t1 = Utc.timestamp_opt(2_000, 0).unwrap();
        clock.set(t1);
        assert_eq!(clock.now(), t1);
    }

    #[test]
    fn clones_share_the_instant() {
        let clock = FixedClock::new(Utc.timestamp_opt(1_000, 0).unwrap());
        let handle = clock.clone();
        handle.advance(Duration::seconds(1));
        assert_eq!(clock.now(), handle.now());
    }
}
