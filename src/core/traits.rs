//! Collaborator seams for the breathing engine.
//!
//! The session controller talks to the outside world only through these
//! traits, so the engine can be driven by a real terminal or by a manual
//! clock in tests.

use crate::core::time::Timestamp;
use crate::error::CohereError;

/// A monotonic time source.
pub trait Clock {
    /// Current time. Never goes backwards.
    fn now(&self) -> Timestamp;
}

/// Plays a short chime. Fire-and-forget.
#[cfg_attr(test, mockall::automock)]
pub trait TonePlayer {
    /// Play the tone once.
    fn play(&mut self);
}

/// Keeps the display from sleeping while a session runs.
///
/// Both operations are best-effort; the controller logs failures and carries on.
#[cfg_attr(test, mockall::automock)]
pub trait StayAwake {
    /// Take the stay-awake hold.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform facility is missing or refuses.
    fn acquire(&mut self) -> Result<(), CohereError>;

    /// Drop the hold. Releasing without a hold is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform facility fails to release.
    fn release(&mut self) -> Result<(), CohereError>;
}

/// A 2D drawing surface with y growing downwards.
pub trait Surface {
    /// Drawable size `(width, height)`, or `None` while the surface is not laid out.
    fn size(&self) -> Option<(f64, f64)>;

    /// Erase everything drawn so far.
    fn clear(&mut self);

    /// Stroke a vertical line at `x` from `y_top` to `y_bottom`.
    fn stroke_line(&mut self, x: f64, y_top: f64, y_bottom: f64);

    /// Fill a circle.
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64);
}

/// No-op tone player used when sound is unavailable.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl TonePlayer for Silent {
    fn play(&mut self) {}
}

/// Stay-awake implementation that never holds anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoStayAwake;

impl StayAwake for NoStayAwake {
    fn acquire(&mut self) -> Result<(), CohereError> {
        Ok(())
    }

    fn release(&mut self) -> Result<(), CohereError> {
        Ok(())
    }
}
