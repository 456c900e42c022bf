//! Per-frame state derivation and drawing.
//!
//! Everything here is a pure function of the clock and the phase timer's
//! state. The render loop keeps no state between frames; it reads the phase
//! window, derives a [`FrameSnapshot`], and redraws a [`Surface`].

use std::f64::consts::PI;
use std::time::Duration;

use serde::Serialize;

use crate::core::{Surface, Timestamp};
use crate::features::breathing::phase::{
    Phase, PhaseWindow, PulseMarker, PHASE_DURATION, PULSE_DURATION,
};

/// Label shown for the first half second of a phase.
pub const FULL_PHASE_LABEL: &str = "5.5";

/// Countdown buckets: a label is shown while remaining time exceeds its threshold.
const COUNTDOWN_BUCKETS: [(Duration, &str); 5] = [
    (Duration::from_secs(5), FULL_PHASE_LABEL),
    (Duration::from_secs(4), "5"),
    (Duration::from_secs(3), "4"),
    (Duration::from_secs(2), "3"),
    (Duration::from_secs(1), "2"),
];

/// Fraction of the phase completed, in `[0, 1]`.
#[must_use]
pub fn progress(elapsed_in_phase: Duration) -> f64 {
    (elapsed_in_phase.as_secs_f64() / PHASE_DURATION.as_secs_f64()).clamp(0.0, 1.0)
}

/// Discrete countdown label for the time spent in the current phase.
///
/// Shows "5.5" only at the very start, then ticks "5" … "1", and holds "1"
/// for the final second and anything past the end of the phase.
#[must_use]
pub fn countdown_label(elapsed_in_phase: Duration) -> &'static str {
    let remaining = PHASE_DURATION.saturating_sub(elapsed_in_phase);
    COUNTDOWN_BUCKETS
        .iter()
        .find(|(threshold, _)| remaining > *threshold)
        .map_or("1", |(_, label)| label)
}

/// Marker radius `since_pulse` after a transition.
///
/// A half-sine bump peaking at 1.5x `base`, then flat at `base`.
#[must_use]
pub fn pulse_radius(base: f64, since_pulse: Duration) -> f64 {
    if since_pulse >= PULSE_DURATION {
        return base;
    }
    let t = since_pulse.as_secs_f64() / PULSE_DURATION.as_secs_f64();
    base + base * 0.5 * (PI * t).sin()
}

/// Vertical guide line the marker travels along.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GuideLine {
    /// Horizontal position.
    pub x: f64,
    /// Upper endpoint.
    pub top: f64,
    /// Lower endpoint.
    pub bottom: f64,
}

impl GuideLine {
    /// Centre a line in a `width` x `height` surface, inset by `margin`.
    ///
    /// A surface too short for the margin collapses the line to its midpoint.
    #[must_use]
    pub fn centered(width: f64, height: f64, margin: f64) -> Self {
        let top = margin.min(height / 2.0);
        let bottom = (height - margin).max(top);
        Self {
            x: width / 2.0,
            top,
            bottom,
        }
    }

    /// Marker position for `phase` at `progress`, clamped to the endpoints.
    ///
    /// Inhale travels bottom to top, Exhale top to bottom.
    #[must_use]
    pub fn marker_y(&self, phase: Phase, progress: f64) -> f64 {
        let span = self.bottom - self.top;
        let y = match phase {
            Phase::Inhale => self.bottom - progress * span,
            Phase::Exhale => self.top + progress * span,
        };
        y.clamp(self.top, self.bottom)
    }
}

/// Everything derived for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameSnapshot {
    /// Phase being animated.
    pub phase: Phase,
    /// Phase progress in `[0, 1]`.
    pub progress: f64,
    /// Countdown label.
    pub countdown: &'static str,
    /// Guide line geometry.
    pub line: GuideLine,
    /// Marker centre y.
    pub marker_y: f64,
    /// Marker radius including pulse.
    pub radius: f64,
}

/// Stateless per-frame step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderLoop {
    base_radius: f64,
    margin: f64,
}

impl RenderLoop {
    /// Create a render loop with the given marker radius and line inset.
    #[must_use]
    pub const fn new(base_radius: f64, margin: f64) -> Self {
        Self {
            base_radius,
            margin,
        }
    }

    /// Derive the frame at `now` without drawing.
    #[must_use]
    pub fn derive(
        &self,
        now: Timestamp,
        window: PhaseWindow,
        pulse: PulseMarker,
        size: (f64, f64),
    ) -> FrameSnapshot {
        let elapsed = window.elapsed(now);
        let progress = progress(elapsed);
        let line = GuideLine::centered(size.0, size.1, self.margin);

        FrameSnapshot {
            phase: window.phase,
            progress,
            countdown: countdown_label(elapsed),
            line,
            marker_y: line.marker_y(window.phase, progress),
            radius: pulse_radius(self.base_radius, now.saturating_since(pulse.started_at)),
        }
    }

    /// Derive the frame and redraw `surface`.
    ///
    /// Returns `None` without touching the surface if it has no size yet;
    /// the caller keeps requesting frames until it does.
    pub fn step(
        &self,
        now: Timestamp,
        window: PhaseWindow,
        pulse: PulseMarker,
        surface: &mut dyn Surface,
    ) -> Option<FrameSnapshot> {
        let size = surface.size()?;
        let frame = self.derive(now, window, pulse, size);

        surface.clear();
        surface.stroke_line(frame.line.x, frame.line.top, frame.line.bottom);
        surface.fill_circle(frame.line.x, frame.marker_y, frame.radius);

        Some(frame)
    }
}

/// A shape recorded on a [`Sketch`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Vertical stroke.
    Line {
        /// Horizontal position.
        x: f64,
        /// Upper end.
        y_top: f64,
        /// Lower end.
        y_bottom: f64,
    },
    /// Filled circle.
    Circle {
        /// Centre x.
        x: f64,
        /// Centre y.
        y: f64,
        /// Radius.
        radius: f64,
    },
}

/// Display-list surface. The TUI sizes it during layout and paints its shapes.
#[derive(Debug, Clone, Default)]
pub struct Sketch {
    size: Option<(f64, f64)>,
    shapes: Vec<Shape>,
}

impl Sketch {
    /// An unsized, empty sketch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the drawable size. Non-positive dimensions mark it not ready.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.size = (width > 0.0 && height > 0.0).then_some((width, height));
    }

    /// Recorded shapes, in draw order.
    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }
}

impl Surface for Sketch {
    fn size(&self) -> Option<(f64, f64)> {
        self.size
    }

    fn clear(&mut self) {
        self.shapes.clear();
    }

    fn stroke_line(&mut self, x: f64, y_top: f64, y_bottom: f64) {
        self.shapes.push(Shape::Line { x, y_top, y_bottom });
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64) {
        self.shapes.push(Shape::Circle { x, y, radius });
    }
}
