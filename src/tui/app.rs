//! Application state for the TUI.

use std::time::Duration;

use tracing::debug;

use crate::core::Clock;
use crate::error::CohereError;
use crate::features::breathing::{
    format_mmss, sanitize_digits, Notification, Phase, SessionController, SessionState, TimeLimit,
    PHASE_DURATION,
};

/// Longest accepted session length input.
const MAX_LIMIT_DIGITS: usize = 4;

/// Application state.
pub struct App<C: Clock> {
    /// The breathing session.
    pub controller: SessionController<C>,
    /// Session length being typed on the start screen.
    pub limit_input: String,
    /// Preset session lengths.
    pub presets: Vec<TimeLimit>,
    /// Instruction currently shown.
    pub instruction: Phase,
    /// Total time shown, in whole seconds.
    pub total_seconds: u64,
    /// Countdown label shown.
    pub countdown: &'static str,
    /// Status message to display.
    pub status: Option<String>,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Time between display refreshes.
    pub frame_interval: Duration,
}

impl<C: Clock> App<C> {
    /// Create a new app instance on the start screen.
    pub fn new(
        controller: SessionController<C>,
        presets: Vec<TimeLimit>,
        default_limit: Option<TimeLimit>,
        frame_rate: u32,
    ) -> Self {
        let countdown = controller.countdown();
        Self {
            controller,
            limit_input: default_limit.map(|l| l.minutes().to_string()).unwrap_or_default(),
            presets,
            instruction: Phase::Inhale,
            total_seconds: 0,
            countdown,
            status: None,
            should_quit: false,
            frame_interval: Duration::from_millis(1000 / u64::from(frame_rate.clamp(1, 120))),
        }
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.controller.state()
    }

    /// Start a session with the typed limit.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot start from its current state.
    pub fn start(&mut self) -> Result<(), CohereError> {
        if self.state() == SessionState::Idle {
            let limit = TimeLimit::parse_input(&self.limit_input);
            self.controller.set_time_limit(limit)?;
        }
        self.controller.start()?;
        self.status = None;
        self.sync();
        Ok(())
    }

    /// Pause a running session.
    pub fn pause(&mut self) {
        self.controller.pause();
        self.status = Some(format!("Paused at {}", format_mmss(self.total_seconds)));
        self.sync();
    }

    /// Back to the start screen with everything cleared.
    pub fn reset(&mut self) {
        self.controller.reset();
        self.limit_input.clear();
        self.status = None;
        self.sync();
    }

    /// Flip the chime.
    pub fn toggle_sound(&mut self) {
        let on = self.controller.toggle_sound();
        self.status = Some(format!("Sound {}", if on { "on" } else { "off" }));
    }

    /// Start (or restart) with preset number `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is complete.
    pub fn start_preset(&mut self, index: usize) -> Result<(), CohereError> {
        let Some(preset) = self.presets.get(index).copied() else {
            return Ok(());
        };
        self.limit_input = preset.minutes().to_string();
        self.controller.start_with_preset(preset.minutes())?;
        self.status = Some(format!("{preset} session"));
        self.sync();
        Ok(())
    }

    /// Type into the session length field. Only digits are kept.
    pub fn push_limit_char(&mut self, c: char) {
        if self.state() != SessionState::Idle {
            return;
        }
        let mut input = self.limit_input.clone();
        input.push(c);
        let digits = sanitize_digits(&input);
        if digits.len() <= MAX_LIMIT_DIGITS {
            self.limit_input = digits;
        }
    }

    /// Delete the last character of the session length field.
    pub fn pop_limit_char(&mut self) {
        if self.state() == SessionState::Idle {
            self.limit_input.pop();
        }
    }

    /// Run due timers and the frame step, then apply notifications.
    pub fn tick(&mut self) {
        self.controller.advance();
        self.controller.render_frame();
        self.sync();
    }

    /// How long the event loop may wait before the next tick.
    pub fn poll_timeout(&self) -> Duration {
        if self.state() != SessionState::Running {
            return self.frame_interval.max(Duration::from_millis(100));
        }
        let until_due = self
            .controller
            .next_deadline()
            .map_or(PHASE_DURATION, |due| due.saturating_since(self.controller.now()));
        self.frame_interval.min(until_due)
    }

    fn sync(&mut self) {
        for note in self.controller.drain_notifications() {
            self.apply(note);
        }
    }

    fn apply(&mut self, note: Notification) {
        match note {
            Notification::PhaseChanged(phase) => self.instruction = phase,
            Notification::TotalTime(seconds) => self.total_seconds = seconds,
            Notification::Countdown(label) => self.countdown = label,
            Notification::StateChanged(state) => {
                debug!(%state, "screen change");
                if state == SessionState::Complete {
                    self.status = None;
                }
            }
        }
    }
}
