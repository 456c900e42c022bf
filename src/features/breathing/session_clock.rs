//! Whole-second session clock.
//!
//! Elapsed time comes only from a fixed one-second tick, never from phase
//! arithmetic, so the displayed total stays monotonic.

use std::time::Duration;

use crate::core::Timestamp;
use crate::features::breathing::limit::TimeLimit;
use crate::features::breathing::scheduler::{Fire, Scheduler, Task, TimerToken};

/// Tick period.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Counts whole seconds while a session runs.
#[derive(Debug, Default)]
pub struct SessionClock {
    elapsed_seconds: u64,
    tick: Option<TimerToken>,
}

impl SessionClock {
    /// Create a stopped clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to zero and begin ticking every second from `now`.
    pub fn start(&mut self, scheduler: &mut Scheduler, now: Timestamp, generation: u64) {
        self.stop(scheduler);
        self.elapsed_seconds = 0;
        self.tick = Some(scheduler.every(
            now,
            TICK_PERIOD,
            Fire {
                task: Task::SecondTick,
                generation,
            },
        ));
    }

    /// Cancel the repeating tick. Elapsed time is kept.
    pub fn stop(&mut self, scheduler: &mut Scheduler) {
        if let Some(token) = self.tick.take() {
            scheduler.cancel(token);
        }
    }

    /// Handle one tick. Counts only when `running`; returns the new total.
    pub fn tick(&mut self, running: bool) -> Option<u64> {
        if !running {
            return None;
        }
        self.elapsed_seconds += 1;
        Some(self.elapsed_seconds)
    }

    /// Whether `limit` has been reached. Always false without a limit.
    #[must_use]
    pub fn has_reached_limit(&self, limit: Option<TimeLimit>) -> bool {
        limit.is_some_and(|l| self.elapsed_seconds >= l.as_seconds())
    }

    /// Stop and return to zero.
    pub fn reset(&mut self, scheduler: &mut Scheduler) {
        self.stop(scheduler);
        self.elapsed_seconds = 0;
    }

    /// Whole seconds counted so far.
    #[must_use]
    pub const fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    /// Whether the tick is armed.
    #[must_use]
    pub const fn is_ticking(&self) -> bool {
        self.tick.is_some()
    }
}

/// Format whole seconds as `MM:SS`. Minutes are not wrapped at 60.
#[must_use]
pub fn format_mmss(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_k_ticks_while_running() {
        let mut clock = SessionClock::new();
        for _ in 0..42 {
            clock.tick(true);
        }
        assert_eq!(clock.elapsed_seconds(), 42);
    }

    #[test]
    fn test_ticks_while_stopped_do_nothing() {
        let mut clock = SessionClock::new();
        clock.tick(true);
        assert_eq!(clock.tick(false), None);
        assert_eq!(clock.elapsed_seconds(), 1);
    }

    #[test]
    fn test_has_reached_limit() {
        let mut clock = SessionClock::new();
        let limit = TimeLimit::from_minutes(2);

        for _ in 0..119 {
            clock.tick(true);
        }
        assert!(!clock.has_reached_limit(limit));

        clock.tick(true);
        assert!(clock.has_reached_limit(limit));

        clock.tick(true);
        assert!(clock.has_reached_limit(limit));
    }

    #[test]
    fn test_no_limit_never_reached() {
        let mut clock = SessionClock::new();
        for _ in 0..10_000 {
            clock.tick(true);
        }
        assert!(!clock.has_reached_limit(None));
    }

    #[test]
    fn test_start_resets_and_arms() {
        let mut clock = SessionClock::new();
        let mut scheduler = Scheduler::new();
        clock.tick(true);

        clock.start(&mut scheduler, Timestamp::ZERO, 1);
        assert_eq!(clock.elapsed_seconds(), 0);
        assert!(clock.is_ticking());
        assert_eq!(scheduler.pending(Task::SecondTick), 1);

        clock.stop(&mut scheduler);
        assert_eq!(scheduler.pending(Task::SecondTick), 0);
    }

    #[test]
    fn test_format_mmss() {
        assert_eq!(format_mmss(0), "00:00");
        assert_eq!(format_mmss(90), "01:30");
        assert_eq!(format_mmss(3_725), "62:05");
    }
}
