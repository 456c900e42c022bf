//! Headless session runs against a manual clock.
//!
//! Jumps the clock from deadline to deadline instead of waiting, which makes
//! a full session's timeline available instantly.

use std::time::Duration;

use serde::Serialize;

use crate::core::{Clock, ManualClock};
use crate::error::CohereError;
use crate::features::breathing::controller::{
    Notification, SessionController, SessionOptions, SessionState, SessionSummary,
};
use crate::features::breathing::limit::TimeLimit;
use crate::features::breathing::phase::Phase;

/// One recorded moment in a simulated session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TimelineEvent {
    /// A phase began.
    Phase {
        /// Milliseconds since start.
        at_ms: u64,
        /// Transition count (0 for the opening Inhale).
        index: u64,
        /// The new phase.
        phase: Phase,
        /// Whole seconds counted at that moment.
        elapsed_seconds: u64,
    },
    /// The session completed on its own.
    Complete {
        /// Milliseconds since start.
        at_ms: u64,
        /// Whole seconds counted.
        elapsed_seconds: u64,
    },
}

/// Result of a simulated session.
#[derive(Debug, Clone, Serialize)]
pub struct Timeline {
    /// Limit the session ran with.
    pub limit_minutes: Option<u32>,
    /// Events in order.
    pub events: Vec<TimelineEvent>,
    /// Final report.
    pub summary: SessionSummary,
}

/// Run a session until it completes or `horizon` passes.
///
/// # Errors
///
/// Returns an error if the controller refuses to start.
pub fn simulate(
    options: SessionOptions,
    limit: Option<TimeLimit>,
    horizon: Duration,
) -> Result<Timeline, CohereError> {
    let clock = ManualClock::new();
    let mut controller = SessionController::new(
        clock.clone(),
        SessionOptions {
            sound: false,
            keep_awake: false,
            ..options
        },
    );
    controller.set_time_limit(limit)?;
    controller.start()?;

    let mut events = Vec::new();
    record(&mut controller, &clock, &mut events);

    let end = clock.now() + horizon;
    while controller.state() == SessionState::Running {
        let Some(next) = controller.next_deadline() else {
            break;
        };
        if next > end {
            break;
        }
        clock.set(next);
        controller.advance();
        record(&mut controller, &clock, &mut events);
    }

    controller.pause();
    Ok(Timeline {
        limit_minutes: limit.map(TimeLimit::minutes),
        events,
        summary: controller.summary(),
    })
}

fn record(
    controller: &mut SessionController<ManualClock>,
    clock: &ManualClock,
    events: &mut Vec<TimelineEvent>,
) {
    let at_ms = u64::try_from(clock.now().offset().as_millis()).unwrap_or(u64::MAX);
    for note in controller.drain_notifications() {
        match note {
            Notification::PhaseChanged(phase) => events.push(TimelineEvent::Phase {
                at_ms,
                index: controller.transitions(),
                phase,
                elapsed_seconds: controller.elapsed_seconds(),
            }),
            Notification::StateChanged(SessionState::Complete) => {
                events.push(TimelineEvent::Complete {
                    at_ms,
                    elapsed_seconds: controller.elapsed_seconds(),
                });
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_minute_session() {
        let timeline = simulate(
            SessionOptions::default(),
            TimeLimit::from_minutes(1),
            Duration::from_secs(600),
        )
        .unwrap();

        assert_eq!(timeline.summary.state, SessionState::Complete);
        assert_eq!(timeline.summary.transitions, 12);

        let last = timeline.events.last().unwrap();
        assert!(matches!(last, TimelineEvent::Complete { at_ms: 66_000, .. }));

        // No Inhale boundary before the last one saw elapsed >= 60.
        let early_inhale_done = timeline.events.iter().any(|e| {
            matches!(e, TimelineEvent::Phase { phase: Phase::Inhale, at_ms, elapsed_seconds, .. }
                if *at_ms < 66_000 && *at_ms > 0 && *elapsed_seconds >= 60)
        });
        assert!(!early_inhale_done);
    }

    #[test]
    fn test_unbounded_session_stops_at_horizon() {
        let timeline =
            simulate(SessionOptions::default(), None, Duration::from_secs(30)).unwrap();

        assert_eq!(timeline.summary.state, SessionState::Idle);
        assert_eq!(timeline.summary.elapsed_seconds, 30);
        // Opening Inhale plus boundaries at 5.5, 11, 16.5, 22, 27.5.
        assert_eq!(timeline.events.len(), 6);
        assert!(timeline
            .events
            .iter()
            .all(|e| matches!(e, TimelineEvent::Phase { .. })));
    }

    #[test]
    fn test_events_alternate() {
        let timeline =
            simulate(SessionOptions::default(), None, Duration::from_secs(60)).unwrap();

        let phases: Vec<Phase> = timeline
            .events
            .iter()
            .filter_map(|e| match e {
                TimelineEvent::Phase { phase, .. } => Some(*phase),
                TimelineEvent::Complete { .. } => None,
            })
            .collect();
        for pair in phases.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
    }
}
