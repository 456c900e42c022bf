//! Session controller.
//!
//! Top-level state machine for a breathing session:
//!
//! ```text
//! Idle --start--> Running --pause--> Idle
//!                    |
//!                    +--limit reached at Inhale--> Complete --reset--> Idle
//! ```
//!
//! Every scheduled firing carries the generation it was scheduled under.
//! Each start and each teardown bumps the generation, so a firing that
//! outlives its session is ignored.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::{Clock, NoStayAwake, Silent, StayAwake, Surface, Timestamp, TonePlayer};
use crate::error::CohereError;
use crate::features::breathing::limit::TimeLimit;
use crate::features::breathing::phase::{Phase, PhaseTimer, PhaseWindow};
use crate::features::breathing::render::{FrameSnapshot, RenderLoop, Sketch, FULL_PHASE_LABEL};
use crate::features::breathing::scheduler::{Fire, Fired, FrameToken, Scheduler, Task, TimerToken};
use crate::features::breathing::session_clock::SessionClock;

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// Waiting on the start screen.
    #[default]
    Idle,
    /// Breathing in progress.
    Running,
    /// Time limit reached; terminal until reset.
    Complete,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Running => write!(f, "Running"),
            Self::Complete => write!(f, "Complete"),
        }
    }
}

/// Something the presentation layer may want to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    /// A new phase began.
    PhaseChanged(Phase),
    /// Total elapsed whole seconds changed.
    TotalTime(u64),
    /// Session state changed.
    StateChanged(SessionState),
    /// The countdown label changed.
    Countdown(&'static str),
}

/// Tunables for a controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionOptions {
    /// Chime on start and every transition.
    pub sound: bool,
    /// Hold the stay-awake resource while running.
    pub keep_awake: bool,
    /// Marker radius in surface units.
    pub base_radius: f64,
    /// Guide line inset in surface units.
    pub margin: f64,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            sound: false,
            keep_awake: true,
            base_radius: 1.5,
            margin: 2.0,
        }
    }
}

/// End-of-session report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    /// Final state.
    pub state: SessionState,
    /// Whole seconds counted.
    pub elapsed_seconds: u64,
    /// Configured limit, if any.
    pub time_limit_minutes: Option<u32>,
    /// Phase transitions since the last start.
    pub transitions: u64,
    /// Phase at the end.
    pub phase: Phase,
}

/// Owns the session state and the lifetimes of the phase timer, session
/// clock and render loop.
pub struct SessionController<C: Clock> {
    clock: C,
    scheduler: Scheduler,
    state: SessionState,
    generation: u64,
    phase_timer: PhaseTimer,
    session_clock: SessionClock,
    render_loop: RenderLoop,
    frame: Option<FrameToken>,
    deferred_start: Option<TimerToken>,
    time_limit: Option<TimeLimit>,
    sound: bool,
    keep_awake: bool,
    tone: Box<dyn TonePlayer>,
    awake: Box<dyn StayAwake>,
    awake_held: bool,
    sketch: Sketch,
    countdown: &'static str,
    last_frame: Option<FrameSnapshot>,
    notifications: Vec<Notification>,
}

impl<C: Clock> SessionController<C> {
    /// Create an idle controller with no tone and no stay-awake hold.
    pub fn new(clock: C, options: SessionOptions) -> Self {
        Self {
            clock,
            scheduler: Scheduler::new(),
            state: SessionState::Idle,
            generation: 0,
            phase_timer: PhaseTimer::new(),
            session_clock: SessionClock::new(),
            render_loop: RenderLoop::new(options.base_radius, options.margin),
            frame: None,
            deferred_start: None,
            time_limit: None,
            sound: options.sound,
            keep_awake: options.keep_awake,
            tone: Box::new(Silent),
            awake: Box::new(NoStayAwake),
            awake_held: false,
            sketch: Sketch::new(),
            countdown: FULL_PHASE_LABEL,
            last_frame: None,
            notifications: Vec::new(),
        }
    }

    /// Use `tone` for chimes.
    #[must_use]
    pub fn with_tone(mut self, tone: Box<dyn TonePlayer>) -> Self {
        self.tone = tone;
        self
    }

    /// Use `awake` to keep the display on.
    #[must_use]
    pub fn with_stay_awake(mut self, awake: Box<dyn StayAwake>) -> Self {
        self.awake = awake;
        self
    }

    // ---- user intents ----

    /// Idle → Running.
    ///
    /// Starting an already running session does nothing.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` from Complete; reset first.
    pub fn start(&mut self) -> Result<(), CohereError> {
        match self.state {
            SessionState::Idle => {
                self.begin();
                Ok(())
            }
            SessionState::Running => {
                debug!("start ignored, session already running");
                Ok(())
            }
            SessionState::Complete => Err(CohereError::InvalidState(
                "session is complete, reset before starting again".to_string(),
            )),
        }
    }

    /// Running → Idle. No-op in any other state.
    pub fn pause(&mut self) {
        if self.state != SessionState::Running {
            return;
        }
        self.teardown();
        self.set_state(SessionState::Idle);
        info!(elapsed = self.session_clock.elapsed_seconds(), "session paused");
    }

    /// Start when idle, pause when running.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` from Complete.
    pub fn toggle(&mut self) -> Result<(), CohereError> {
        if self.state == SessionState::Running {
            self.pause();
            Ok(())
        } else {
            self.start()
        }
    }

    /// Return to Idle with elapsed time, limit and phase cleared.
    pub fn reset(&mut self) {
        self.teardown();
        self.session_clock.reset(&mut self.scheduler);
        self.phase_timer.reset(&mut self.scheduler);
        self.time_limit = None;
        self.countdown = FULL_PHASE_LABEL;
        self.last_frame = None;
        self.set_state(SessionState::Idle);
        self.notify(Notification::TotalTime(0));
        self.notify(Notification::Countdown(FULL_PHASE_LABEL));
        debug!("session reset");
    }

    /// Flip sound on or off. Returns the new setting.
    pub fn toggle_sound(&mut self) -> bool {
        self.sound = !self.sound;
        debug!(sound = self.sound, "sound toggled");
        self.sound
    }

    /// Set or clear the time limit.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` unless the session is idle.
    pub fn set_time_limit(&mut self, limit: Option<TimeLimit>) -> Result<(), CohereError> {
        if self.state != SessionState::Idle {
            return Err(CohereError::InvalidState(format!(
                "time limit can only be changed when idle (session is {})",
                self.state
            )));
        }
        self.time_limit = limit;
        Ok(())
    }

    /// Set a preset limit and start.
    ///
    /// While running, the current session is stopped first and the new one
    /// starts on the next scheduler turn, so the two timer chains never overlap.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` from Complete.
    pub fn start_with_preset(&mut self, minutes: u32) -> Result<(), CohereError> {
        let limit = TimeLimit::from_minutes(minutes);
        match self.state {
            SessionState::Idle => {
                self.time_limit = limit;
                self.begin();
                Ok(())
            }
            SessionState::Running => {
                self.pause();
                self.time_limit = limit;
                let now = self.clock.now();
                let fire = self.fire(Task::DeferredStart);
                self.deferred_start = Some(self.scheduler.after(now, Duration::ZERO, fire));
                debug!(minutes, "restart with preset deferred one turn");
                Ok(())
            }
            SessionState::Complete => Err(CohereError::InvalidState(
                "session is complete, reset before choosing a preset".to_string(),
            )),
        }
    }

    // ---- host hooks ----

    /// Run every timer due at the current time.
    pub fn advance(&mut self) {
        let now = self.clock.now();
        while let Some(fired) = self.scheduler.pop_due(now) {
            self.dispatch(fired);
        }
    }

    /// Display refresh: run any pending frame requests.
    ///
    /// Returns the most recent frame, which may be from an earlier refresh if
    /// the surface is not ready yet.
    pub fn render_frame(&mut self) -> Option<FrameSnapshot> {
        for fire in self.scheduler.take_frames() {
            if !self.is_current(fire) {
                debug!(generation = fire.generation, "stale frame ignored");
                continue;
            }
            self.frame = None;
            self.on_frame();
        }
        self.last_frame
    }

    /// Take queued notifications, oldest first.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    // ---- firing handlers ----

    fn dispatch(&mut self, fired: Fired) {
        if fired.fire.generation != self.generation {
            debug!(task = ?fired.fire.task, generation = fired.fire.generation, "stale firing ignored");
            return;
        }
        match fired.fire.task {
            Task::PhaseTransition => self.on_phase_boundary(fired),
            Task::SecondTick => self.on_second_tick(),
            Task::DeferredStart => {
                self.deferred_start = None;
                if self.state == SessionState::Idle {
                    self.begin();
                }
            }
            Task::Frame => {}
        }
    }

    fn on_phase_boundary(&mut self, fired: Fired) {
        if self.state != SessionState::Running {
            return;
        }

        // A late firing starts the new phase at the current time.
        let now = self.clock.now().max(fired.due);
        let phase = self.phase_timer.advance(now);
        debug!(%phase, transition = self.phase_timer.transitions(), "phase changed");
        self.notify(Notification::PhaseChanged(phase));
        self.chime();

        let reached = self
            .phase_timer
            .latch_limit(self.session_clock.has_reached_limit(self.time_limit));

        if reached && phase == Phase::Inhale {
            self.complete();
        } else {
            self.phase_timer
                .schedule(&mut self.scheduler, now, self.generation);
        }
    }

    fn on_second_tick(&mut self) {
        if let Some(total) = self
            .session_clock
            .tick(self.state == SessionState::Running)
        {
            self.notify(Notification::TotalTime(total));
        }
    }

    fn on_frame(&mut self) {
        if self.state != SessionState::Running {
            return;
        }

        let now = self.clock.now();
        let window = self.phase_timer.window();
        let pulse = self.phase_timer.pulse();

        if let Some(frame) = self.render_loop.step(now, window, pulse, &mut self.sketch) {
            if frame.countdown != self.countdown {
                self.countdown = frame.countdown;
                self.notify(Notification::Countdown(frame.countdown));
            }
            self.last_frame = Some(frame);
        }

        // Unsized surfaces get retried on the next refresh too.
        let fire = self.fire(Task::Frame);
        self.frame = Some(self.scheduler.request_frame(fire));
    }

    // ---- transitions ----

    fn begin(&mut self) {
        self.generation += 1;
        let now = self.clock.now();

        self.phase_timer
            .start(&mut self.scheduler, now, self.generation);
        self.session_clock
            .start(&mut self.scheduler, now, self.generation);
        self.countdown = FULL_PHASE_LABEL;
        self.last_frame = None;
        let fire = self.fire(Task::Frame);
        self.frame = Some(self.scheduler.request_frame(fire));
        self.acquire_awake();

        self.set_state(SessionState::Running);
        self.notify(Notification::TotalTime(0));
        self.notify(Notification::PhaseChanged(Phase::Inhale));
        self.notify(Notification::Countdown(FULL_PHASE_LABEL));
        self.chime();

        info!(limit = ?self.time_limit.map(TimeLimit::minutes), "session started");
    }

    fn complete(&mut self) {
        self.teardown();
        self.set_state(SessionState::Complete);
        info!(
            elapsed = self.session_clock.elapsed_seconds(),
            transitions = self.phase_timer.transitions(),
            "session complete"
        );
    }

    /// Cancel every pending chain and release resources.
    fn teardown(&mut self) {
        self.generation += 1;
        self.phase_timer.stop(&mut self.scheduler);
        self.session_clock.stop(&mut self.scheduler);
        if let Some(token) = self.frame.take() {
            self.scheduler.cancel_frame(token);
        }
        if let Some(token) = self.deferred_start.take() {
            self.scheduler.cancel(token);
        }
        self.release_awake();
        self.sketch.clear();
    }

    // ---- helpers ----

    const fn fire(&self, task: Task) -> Fire {
        Fire {
            task,
            generation: self.generation,
        }
    }

    fn is_current(&self, fire: Fire) -> bool {
        fire.generation == self.generation && self.state == SessionState::Running
    }

    fn set_state(&mut self, state: SessionState) {
        if self.state != state {
            self.state = state;
            self.notify(Notification::StateChanged(state));
        }
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    fn chime(&mut self) {
        if self.sound {
            self.tone.play();
        }
    }

    fn acquire_awake(&mut self) {
        if !self.keep_awake || self.awake_held {
            return;
        }
        match self.awake.acquire() {
            Ok(()) => {
                self.awake_held = true;
                debug!("stay-awake acquired");
            }
            Err(e) => warn!(error = %e, "could not keep display awake"),
        }
    }

    fn release_awake(&mut self) {
        if !self.awake_held {
            return;
        }
        self.awake_held = false;
        match self.awake.release() {
            Ok(()) => debug!("stay-awake released"),
            Err(e) => warn!(error = %e, "could not release stay-awake hold"),
        }
    }

    // ---- accessors ----

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase_timer.phase()
    }

    /// Current phase and when it began.
    #[must_use]
    pub const fn phase_window(&self) -> PhaseWindow {
        self.phase_timer.window()
    }

    /// Whole seconds elapsed this session.
    #[must_use]
    pub const fn elapsed_seconds(&self) -> u64 {
        self.session_clock.elapsed_seconds()
    }

    /// Configured time limit.
    #[must_use]
    pub const fn time_limit(&self) -> Option<TimeLimit> {
        self.time_limit
    }

    /// Whether chimes are on.
    #[must_use]
    pub const fn sound_enabled(&self) -> bool {
        self.sound
    }

    /// Current countdown label.
    #[must_use]
    pub const fn countdown(&self) -> &'static str {
        self.countdown
    }

    /// Phase transitions since the last start.
    #[must_use]
    pub const fn transitions(&self) -> u64 {
        self.phase_timer.transitions()
    }

    /// Pending phase transitions in the scheduler. At most one.
    #[must_use]
    pub fn pending_transitions(&self) -> usize {
        self.scheduler.pending(Task::PhaseTransition)
    }

    /// Earliest pending timer deadline, for sizing the host's poll timeout.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.scheduler.next_due()
    }

    /// Current time on the controller's clock.
    #[must_use]
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Whether the stay-awake hold is currently taken.
    #[must_use]
    pub const fn holds_awake(&self) -> bool {
        self.awake_held
    }

    /// Drawing surface.
    #[must_use]
    pub const fn sketch(&self) -> &Sketch {
        &self.sketch
    }

    /// Drawing surface, for resizing during layout.
    pub fn sketch_mut(&mut self) -> &mut Sketch {
        &mut self.sketch
    }

    /// Snapshot for end-of-session reporting.
    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            state: self.state,
            elapsed_seconds: self.session_clock.elapsed_seconds(),
            time_limit_minutes: self.time_limit.map(TimeLimit::minutes),
            transitions: self.phase_timer.transitions(),
            phase: self.phase_timer.phase(),
        }
    }
}

impl<C: Clock> Drop for SessionController<C> {
    fn drop(&mut self) {
        self.release_awake();
    }
}
