//! Guided breathing engine.
//!
//! Alternates Inhale and Exhale every 5.5 seconds and keeps three callback
//! chains in step with that cadence:
//! - Phase transitions (one pending at a time)
//! - A one-second session clock tick
//! - A per-frame render step for the moving marker
//!
//! The [`SessionController`] owns all three and decides when a session with
//! a time limit is complete.

pub mod controller;
pub mod limit;
pub mod phase;
pub mod render;
pub mod scheduler;
pub mod session_clock;
pub mod simulate;

pub use controller::{
    Notification, SessionController, SessionOptions, SessionState, SessionSummary,
};
pub use limit::{sanitize_digits, TimeLimit};
pub use phase::{Phase, PhaseTimer, PhaseWindow, PulseMarker, PHASE_DURATION, PULSE_DURATION};
pub use render::{countdown_label, progress, pulse_radius, FrameSnapshot, GuideLine, RenderLoop, Shape, Sketch};
pub use scheduler::{Fire, Fired, Scheduler, Task};
pub use session_clock::{format_mmss, SessionClock};
pub use simulate::{simulate, Timeline, TimelineEvent};
