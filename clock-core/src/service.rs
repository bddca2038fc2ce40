//! Services the accumulator needs from its host: a monotonic clock and a
//! way to be called back on the next tick.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// Monotonic time source. Readings are offsets from an arbitrary origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// One-shot tick requests. Each call must eventually lead to exactly one
/// `step` on the accumulator; no timing guarantee beyond that.
pub trait Scheduler {
    fn schedule_next_tick(&self);
}

/// Clock advanced by hand. Clones share the same reading.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    current: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) -> Duration {
        let next = self.current.get() + by;
        self.current.set(next);
        next
    }

    pub fn set(&self, to: Duration) {
        self.current.set(to);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.current.get()
    }
}

/// Scheduler that only counts outstanding requests, for driving ticks by
/// hand. Clones share the same counter.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    pending: Rc<Cell<usize>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.pending.get()
    }

    /// Consume one outstanding request. Returns false if none was queued.
    pub fn take(&self) -> bool {
        match self.pending.get() {
            0 => false,
            n => {
                self.pending.set(n - 1);
                true
            }
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_next_tick(&self) {
        self.pending.set(self.pending.get() + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_shared() {
        let clock = ManualClock::new();
        let other = clock.clone();
        assert_eq!(clock.now(), Duration::ZERO);
        other.advance(Duration::from_millis(250));
        assert_eq!(clock.now(), Duration::from_millis(250));
        clock.set(Duration::from_secs(3));
        assert_eq!(other.now(), Duration::from_secs(3));
    }

    #[test]
    fn test_manual_scheduler_counts() {
        let sched = ManualScheduler::new();
        assert!(!sched.take());
        sched.schedule_next_tick();
        sched.clone().schedule_next_tick();
        assert_eq!(sched.pending(), 2);
        assert!(sched.take());
        assert!(sched.take());
        assert!(!sched.take());
    }
}
