//! Output formatting for cohere.
//!
//! This module provides formatters for session summaries, simulated
//! timelines and configuration in pretty or JSON form.

mod json;
mod pretty;

use chrono::{DateTime, Local};

use crate::cli::args::OutputFormat;
use crate::config::Config;
use crate::error::CohereError;
use crate::features::breathing::{SessionSummary, Timeline};

pub use json::*;
pub use pretty::*;

/// Format an end-of-session summary based on output format
///
/// # Errors
///
/// Returns `CohereError::Parse` if JSON serialization fails.
pub fn format_summary(
    summary: &SessionSummary,
    ended_at: DateTime<Local>,
    format: OutputFormat,
) -> Result<String, CohereError> {
    match format {
        OutputFormat::Pretty => Ok(format_summary_pretty(summary)),
        OutputFormat::Json => format_summary_json(summary, ended_at),
    }
}

/// Format a simulated timeline based on output format
///
/// # Errors
///
/// Returns `CohereError::Parse` if JSON serialization fails.
pub fn format_timeline(timeline: &Timeline, format: OutputFormat) -> Result<String, CohereError> {
    match format {
        OutputFormat::Pretty => Ok(format_timeline_pretty(timeline)),
        OutputFormat::Json => to_json(timeline),
    }
}

/// Format the effective configuration based on output format
///
/// # Errors
///
/// Returns `CohereError::Parse` if serialization fails.
pub fn format_config(config: &Config, format: OutputFormat) -> Result<String, CohereError> {
    match format {
        OutputFormat::Pretty => Ok(serde_yaml::to_string(config)?.trim_end().to_string()),
        OutputFormat::Json => to_json(config),
    }
}
