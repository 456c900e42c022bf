//! Deterministic single-threaded scheduler.
//!
//! Holds one-shot and repeating timers plus per-frame requests. Nothing here
//! runs callbacks: the host asks for whatever is due and hands each firing to
//! the session controller, which checks the firing's generation before acting.

use std::time::Duration;

use crate::core::Timestamp;

/// What a firing is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Flip Inhale/Exhale.
    PhaseTransition,
    /// One-second session clock tick.
    SecondTick,
    /// Per-frame render step.
    Frame,
    /// Start a session after yielding once (preset restart).
    DeferredStart,
}

impl Task {
    /// Order among timers due at the same instant. Lower runs first.
    ///
    /// The second tick runs before a phase transition due at the same
    /// instant, so the transition sees that second counted.
    const fn rank(self) -> u8 {
        match self {
            Self::SecondTick => 0,
            Self::PhaseTransition | Self::Frame | Self::DeferredStart => 1,
        }
    }
}

/// A scheduled unit of work tagged with the session generation it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fire {
    /// Work to perform.
    pub task: Task,
    /// Session generation at scheduling time.
    pub generation: u64,
}

/// A timer that came due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    /// The scheduled work.
    pub fire: Fire,
    /// Instant the timer was scheduled for (not when it was observed).
    pub due: Timestamp,
}

/// Handle for cancelling a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

/// Handle for cancelling a frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(u64);

#[derive(Debug, Clone)]
struct Pending {
    token: TimerToken,
    seq: u64,
    due: Timestamp,
    period: Option<Duration>,
    fire: Fire,
}

/// Timer queue driven by an external clock.
#[derive(Debug, Default)]
pub struct Scheduler {
    next_token: u64,
    next_seq: u64,
    timers: Vec<Pending>,
    frames: Vec<(FrameToken, Fire)>,
}

impl Scheduler {
    /// Create an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn token(&mut self) -> u64 {
        self.next_token += 1;
        self.next_token
    }

    fn seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    /// Fire once, `delay` after `from`.
    pub fn after(&mut self, from: Timestamp, delay: Duration, fire: Fire) -> TimerToken {
        let token = TimerToken(self.token());
        let seq = self.seq();
        self.timers.push(Pending {
            token,
            seq,
            due: from + delay,
            period: None,
            fire,
        });
        token
    }

    /// Fire every `period`, first at `from + period`.
    ///
    /// Each re-arm is computed from the previous scheduled instant, so late
    /// observation never accumulates drift.
    pub fn every(&mut self, from: Timestamp, period: Duration, fire: Fire) -> TimerToken {
        let token = TimerToken(self.token());
        let seq = self.seq();
        self.timers.push(Pending {
            token,
            seq,
            due: from + period,
            period: Some(period),
            fire,
        });
        token
    }

    /// Cancel a timer. Unknown or already-fired tokens are ignored.
    pub fn cancel(&mut self, token: TimerToken) {
        self.timers.retain(|p| p.token != token);
    }

    /// Ask for `fire` to run on the next display refresh.
    pub fn request_frame(&mut self, fire: Fire) -> FrameToken {
        let token = FrameToken(self.token());
        self.frames.push((token, fire));
        token
    }

    /// Withdraw a frame request.
    pub fn cancel_frame(&mut self, token: FrameToken) {
        self.frames.retain(|(t, _)| *t != token);
    }

    /// Pop the earliest timer due at or before `now`.
    ///
    /// Ties go to the second tick, then to scheduling order. Repeating timers are re-armed
    /// before being returned.
    pub fn pop_due(&mut self, now: Timestamp) -> Option<Fired> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= now)
            .min_by_key(|(_, p)| (p.due, p.fire.task.rank(), p.seq))
            .map(|(i, _)| i)?;

        let fired = Fired {
            fire: self.timers[index].fire,
            due: self.timers[index].due,
        };

        if let Some(period) = self.timers[index].period {
            let seq = self.seq();
            let pending = &mut self.timers[index];
            pending.due = pending.due + period;
            pending.seq = seq;
        } else {
            self.timers.swap_remove(index);
        }

        Some(fired)
    }

    /// Take every outstanding frame request, oldest first.
    pub fn take_frames(&mut self) -> Vec<Fire> {
        self.frames.drain(..).map(|(_, fire)| fire).collect()
    }

    /// Earliest pending timer deadline.
    #[must_use]
    pub fn next_due(&self) -> Option<Timestamp> {
        self.timers.iter().map(|p| p.due).min()
    }

    /// Number of pending timers for `task`.
    #[must_use]
    pub fn pending(&self, task: Task) -> usize {
        self.timers.iter().filter(|p| p.fire.task == task).count()
    }

    /// Number of outstanding frame requests.
    #[must_use]
    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }
}
