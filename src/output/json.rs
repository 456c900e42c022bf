//! JSON output formatting for cohere.

use chrono::{DateTime, Local};
use serde::Serialize;
use serde_json::json;

use crate::error::CohereError;
use crate::features::breathing::SessionSummary;

/// Serialize any value as pretty JSON
///
/// # Errors
///
/// Returns `CohereError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, CohereError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Format a session summary as JSON
///
/// # Errors
///
/// Returns `CohereError::Parse` if JSON serialization fails.
pub fn format_summary_json(
    summary: &SessionSummary,
    ended_at: DateTime<Local>,
) -> Result<String, CohereError> {
    let output = json!({
        "ended_at": ended_at.to_rfc3339(),
        "state": summary.state,
        "elapsed_seconds": summary.elapsed_seconds,
        "time_limit_minutes": summary.time_limit_minutes,
        "transitions": summary.transitions,
        "phase": summary.phase,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}
