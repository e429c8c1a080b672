//! Nullable clock: deterministic time for testing.

use protocoin_types::Timestamp;
use std::cell::Cell;

/// Seconds in one day.
pub const DAY_SECS: u64 = 60 * 60 * 24;

/// A deterministic clock for testing.
///
/// Time only advances when you tell it to, and never moves backwards
/// through [`NullClock::advance`].
pub struct NullClock {
    current: Cell<u64>,
}

impl NullClock {
    pub fn new(initial_secs: u64) -> Self {
        Self {
            current: Cell::new(initial_secs),
        }
    }

    /// Get the current time.
    pub fn now(&self) -> Timestamp {
        Timestamp::new(self.current.get())
    }

    /// Advance time by a number of seconds.
    pub fn advance(&self, secs: u64) {
        self.current.set(self.current.get().saturating_add(secs));
    }

    /// Advance time by whole days.
    pub fn advance_days(&self, days: u64) {
        self.advance(days.saturating_mul(DAY_SECS));
    }

    /// Set the time to a specific value.
    pub fn set(&self, secs: u64) {
        self.current.set(secs);
    }
}

impl Default for NullClock {
    fn default() -> Self {
        Self::new(1_700_000_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_only_on_request() {
        let clock = NullClock::new(100);
        assert_eq!(clock.now(), Timestamp::new(100));
        clock.advance(5);
        assert_eq!(clock.now(), Timestamp::new(105));
        clock.advance_days(2);
        assert_eq!(clock.now(), Timestamp::new(105 + 2 * DAY_SECS));
        clock.set(7);
        assert_eq!(clock.now(), Timestamp::new(7));
    }
}
