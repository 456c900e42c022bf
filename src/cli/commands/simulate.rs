//! Headless timeline command.

use std::time::Duration;

use tracing::info;

use crate::cli::args::{OutputFormat, SimulateArgs};
use crate::config::Config;
use crate::error::CohereError;
use crate::features::breathing::{self, TimeLimit, PHASE_DURATION};
use crate::output::format_timeline;

/// Execute the simulate command.
///
/// Without a limit the run stops after `--seconds`. With one it runs until
/// the session completes, which is always within two phases of the limit.
///
/// # Errors
///
/// Returns an error if the engine refuses to start or formatting fails.
pub fn simulate(
    config: &Config,
    args: &SimulateArgs,
    format: OutputFormat,
) -> Result<String, CohereError> {
    let limit = args.limit.as_deref().and_then(TimeLimit::parse_input);
    let horizon = limit.map_or(Duration::from_secs(args.seconds), |l| {
        Duration::from_secs(l.as_seconds()) + PHASE_DURATION * 2
    });
    info!(?limit, ?horizon, "simulating session");

    let timeline = breathing::simulate(config.session_options(), limit, horizon)?;
    format_timeline(&timeline, format)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(limit: Option<&str>, seconds: u64) -> SimulateArgs {
        SimulateArgs {
            limit: limit.map(str::to_string),
            seconds,
        }
    }

    #[test]
    fn test_limit_runs_to_completion() {
        let out = simulate(&Config::default(), &args(Some("1"), 10), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["limit_minutes"], 1);
        assert_eq!(value["summary"]["state"], "complete");
        assert_eq!(value["summary"]["transitions"], 12);
    }

    #[test]
    fn test_zero_limit_is_unbounded() {
        let out = simulate(&Config::default(), &args(Some("0"), 12), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert!(value["limit_minutes"].is_null());
        assert_eq!(value["summary"]["state"], "idle");
        assert_eq!(value["summary"]["elapsed_seconds"], 12);
    }
}
