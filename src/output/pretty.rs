//! Human-readable output formatting for cohere.

use colored::Colorize;

use crate::features::breathing::{format_mmss, SessionState, SessionSummary, Timeline, TimelineEvent};

/// Format `at_ms` as `MM:SS.t`.
fn format_offset(at_ms: u64) -> String {
    let seconds = at_ms / 1000;
    let tenths = (at_ms % 1000) / 100;
    format!("{}.{tenths}", format_mmss(seconds))
}

/// Format a session summary for the terminal
pub fn format_summary_pretty(summary: &SessionSummary) -> String {
    let headline = match summary.state {
        SessionState::Complete => "Complete! Well done.".green().bold().to_string(),
        SessionState::Running | SessionState::Idle if summary.elapsed_seconds == 0 => {
            return "No session recorded.".dimmed().to_string();
        }
        SessionState::Running | SessionState::Idle => "Session stopped.".yellow().to_string(),
    };

    let mut output = vec![headline, "─".repeat(32)];
    output.push(format!("Total Time:   {}", format_mmss(summary.elapsed_seconds)));
    if let Some(minutes) = summary.time_limit_minutes {
        output.push(format!("Limit:        {minutes} min"));
    }
    output.push(format!("Transitions:  {}", summary.transitions));
    output.join("\n")
}

/// Format a simulated timeline for the terminal
pub fn format_timeline_pretty(timeline: &Timeline) -> String {
    let limit = timeline
        .limit_minutes
        .map_or_else(|| "none".to_string(), |m| format!("{m} min"));

    let mut output = vec![
        format!("Simulated session (limit: {limit})").bold().to_string(),
        "─".repeat(40),
    ];

    for event in &timeline.events {
        let line = match event {
            TimelineEvent::Phase {
                at_ms,
                index,
                phase,
                elapsed_seconds,
            } => format!(
                "{}  #{index:<3} {}  total {}",
                format_offset(*at_ms),
                format!("{:<8}", phase.instruction()).cyan(),
                format_mmss(*elapsed_seconds)
            ),
            TimelineEvent::Complete {
                at_ms,
                elapsed_seconds,
            } => format!(
                "{}  {}  total {}",
                format_offset(*at_ms),
                "Complete".green().bold(),
                format_mmss(*elapsed_seconds)
            ),
        };
        output.push(line);
    }

    output.push(String::new());
    output.push(format_summary_pretty(&timeline.summary));
    output.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::breathing::Phase;

    fn summary(state: SessionState, elapsed_seconds: u64) -> SessionSummary {
        SessionSummary {
            state,
            elapsed_seconds,
            time_limit_minutes: Some(1),
            transitions: 12,
            phase: Phase::Inhale,
        }
    }

    #[test]
    fn test_format_offset() {
        assert_eq!(format_offset(0), "00:00.0");
        assert_eq!(format_offset(5_500), "00:05.5");
        assert_eq!(format_offset(66_000), "01:06.0");
    }

    #[test]
    fn test_summary_complete() {
        colored::control::set_override(false);
        let out = format_summary_pretty(&summary(SessionState::Complete, 65));
        assert!(out.contains("Complete! Well done."));
        assert!(out.contains("Total Time:   01:05"));
        assert!(out.contains("Limit:        1 min"));
    }

    #[test]
    fn test_summary_empty() {
        colored::control::set_override(false);
        let out = format_summary_pretty(&summary(SessionState::Idle, 0));
        assert_eq!(out, "No session recorded.");
    }

    #[test]
    fn test_timeline_lists_events() {
        colored::control::set_override(false);
        let timeline = Timeline {
            limit_minutes: None,
            events: vec![
                TimelineEvent::Phase {
                    at_ms: 0,
                    index: 0,
                    phase: Phase::Inhale,
                    elapsed_seconds: 0,
                },
                TimelineEvent::Phase {
                    at_ms: 5_500,
                    index: 1,
                    phase: Phase::Exhale,
                    elapsed_seconds: 5,
                },
            ],
            summary: summary(SessionState::Idle, 6),
        };
        let out = format_timeline_pretty(&timeline);
        assert!(out.contains("limit: none"));
        assert!(out.contains("00:05.5"));
        assert!(out.contains("Exhale"));
        assert!(out.contains("Session stopped."));
    }
}
