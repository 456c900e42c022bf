//! Inhale/Exhale phase tracking.
//!
//! The phase timer owns the current phase window and pulse marker and keeps
//! at most one pending transition in the scheduler.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::Timestamp;
use crate::features::breathing::scheduler::{Fire, Scheduler, Task, TimerToken};

/// Length of each phase.
pub const PHASE_DURATION: Duration = Duration::from_millis(5_500);

/// Length of the marker pulse after a transition.
pub const PULSE_DURATION: Duration = Duration::from_millis(500);

/// Instructed breathing action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Breathe in; the marker rises.
    #[default]
    Inhale,
    /// Breathe out; the marker falls.
    Exhale,
}

impl Phase {
    /// The other phase.
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Self::Inhale => Self::Exhale,
            Self::Exhale => Self::Inhale,
        }
    }

    /// Instruction text.
    #[must_use]
    pub const fn instruction(self) -> &'static str {
        match self {
            Self::Inhale => "Inhale",
            Self::Exhale => "Exhale",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.instruction())
    }
}

/// The current phase and when it began.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PhaseWindow {
    /// Phase in effect.
    pub phase: Phase,
    /// Boundary instant the phase began at.
    pub started_at: Timestamp,
}

impl PhaseWindow {
    /// Time spent in this phase at `now`, never negative.
    #[must_use]
    pub fn elapsed(&self, now: Timestamp) -> Duration {
        now.saturating_since(self.started_at)
    }
}

/// Start of the most recent marker pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PulseMarker {
    /// When the pulse began.
    pub started_at: Timestamp,
}

/// Owns phase identity and the single pending transition.
#[derive(Debug, Default)]
pub struct PhaseTimer {
    window: PhaseWindow,
    pulse: PulseMarker,
    pending: Option<TimerToken>,
    transitions: u64,
    limit_reached: bool,
}

impl PhaseTimer {
    /// Create a timer resting at Inhale.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin at Inhale and schedule the first transition.
    ///
    /// Any transition still pending from an earlier run is cancelled first.
    pub fn start(&mut self, scheduler: &mut Scheduler, now: Timestamp, generation: u64) {
        self.stop(scheduler);
        self.window = PhaseWindow {
            phase: Phase::Inhale,
            started_at: now,
        };
        self.pulse = PulseMarker { started_at: now };
        self.transitions = 0;
        self.limit_reached = false;
        self.schedule(scheduler, now, generation);
    }

    /// Cancel the pending transition, if any.
    pub fn stop(&mut self, scheduler: &mut Scheduler) {
        if let Some(token) = self.pending.take() {
            scheduler.cancel(token);
        }
    }

    /// Flip the phase at the boundary `at`, replacing the window and pulse.
    ///
    /// The timer that fired is consumed; call [`Self::schedule`] to continue.
    pub fn advance(&mut self, at: Timestamp) -> Phase {
        self.pending = None;
        self.window = PhaseWindow {
            phase: self.window.phase.flip(),
            started_at: at,
        };
        self.pulse = PulseMarker { started_at: at };
        self.transitions += 1;
        self.window.phase
    }

    /// Schedule the next transition one phase after `boundary`.
    pub fn schedule(&mut self, scheduler: &mut Scheduler, boundary: Timestamp, generation: u64) {
        self.stop(scheduler);
        self.pending = Some(scheduler.after(
            boundary,
            PHASE_DURATION,
            Fire {
                task: Task::PhaseTransition,
                generation,
            },
        ));
    }

    /// Record whether the time limit has been reached. Once set it stays set.
    pub fn latch_limit(&mut self, reached: bool) -> bool {
        self.limit_reached |= reached;
        self.limit_reached
    }

    /// Return to a resting Inhale with no history.
    pub fn reset(&mut self, scheduler: &mut Scheduler) {
        self.stop(scheduler);
        *self = Self::default();
    }

    /// Current phase window.
    #[must_use]
    pub const fn window(&self) -> PhaseWindow {
        self.window
    }

    /// Current pulse marker.
    #[must_use]
    pub const fn pulse(&self) -> PulseMarker {
        self.pulse
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.window.phase
    }

    /// Transitions since the last start.
    #[must_use]
    pub const fn transitions(&self) -> u64 {
        self.transitions
    }

    /// Whether a transition is waiting in the scheduler.
    #[must_use]
    pub const fn is_scheduled(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_flip() {
        assert_eq!(Phase::Inhale.flip(), Phase::Exhale);
        assert_eq!(Phase::Exhale.flip(), Phase::Inhale);
        assert_eq!(Phase::Inhale.to_string(), "Inhale");
    }

    #[test]
    fn test_nth_transition_alternates() {
        let mut timer = PhaseTimer::new();
        let mut scheduler = Scheduler::new();
        timer.start(&mut scheduler, Timestamp::ZERO, 1);

        for n in 1..=12u64 {
            let phase = timer.advance(Timestamp::from_millis(n * 5_500));
            let expected = if n % 2 == 0 { Phase::Inhale } else { Phase::Exhale };
            assert_eq!(phase, expected, "transition {n}");
        }
        assert_eq!(timer.transitions(), 12);
    }

    #[test]
    fn test_start_replaces_pending_transition() {
        let mut timer = PhaseTimer::new();
        let mut scheduler = Scheduler::new();

        timer.start(&mut scheduler, Timestamp::ZERO, 1);
        timer.start(&mut scheduler, Timestamp::from_millis(2_000), 2);

        assert_eq!(scheduler.pending(Task::PhaseTransition), 1);
        assert_eq!(scheduler.next_due(), Some(Timestamp::from_millis(7_500)));
    }

    #[test]
    fn test_advance_resets_window_and_pulse() {
        let mut timer = PhaseTimer::new();
        let mut scheduler = Scheduler::new();
        timer.start(&mut scheduler, Timestamp::ZERO, 1);

        let at = Timestamp::from_millis(5_500);
        timer.advance(at);

        assert_eq!(timer.window().started_at, at);
        assert_eq!(timer.pulse().started_at, at);
        assert!(!timer.is_scheduled());
    }

    #[test]
    fn test_limit_latch_is_sticky() {
        let mut timer = PhaseTimer::new();
        assert!(!timer.latch_limit(false));
        assert!(timer.latch_limit(true));
        assert!(timer.latch_limit(false));
    }

    #[test]
    fn test_window_elapsed_clamped() {
        let window = PhaseWindow {
            phase: Phase::Inhale,
            started_at: Timestamp::from_millis(1_000),
        };
        assert_eq!(window.elapsed(Timestamp::from_millis(500)), Duration::ZERO);
        assert_eq!(
            window.elapsed(Timestamp::from_millis(3_000)),
            Duration::from_millis(2_000)
        );
    }
}
