//! Interactive session command.

use chrono::Local;

use crate::cli::args::{OutputFormat, StartArgs};
use crate::config::Config;
use crate::core::SystemClock;
use crate::error::CohereError;
use crate::features::breathing::{SessionController, SessionOptions, TimeLimit};
use crate::output::format_summary;
use crate::system::{ProcessInhibitor, TerminalBell};
use crate::tui::{self, App};

/// Open the TUI. With `start` args, skip the start screen and begin at once.
///
/// Returns the summary of the session that was on screen at quit time.
///
/// # Errors
///
/// Returns an error if the terminal cannot be driven or the session refuses
/// to start.
pub fn session(
    config: &Config,
    start: Option<&StartArgs>,
    format: OutputFormat,
) -> Result<String, CohereError> {
    let (options, limit) = resolve(config, start);

    let controller = SessionController::new(SystemClock::new(), options)
        .with_tone(Box::new(TerminalBell::new()))
        .with_stay_awake(Box::new(ProcessInhibitor::new()));
    let mut app = App::new(controller, config.presets(), limit, config.display.frame_rate);

    if start.is_some() {
        app.start()?;
    }
    tui::run(&mut app)?;

    format_summary(&app.controller.summary(), Local::now(), format)
}

/// Engine options and pre-filled limit after applying command-line overrides.
fn resolve(config: &Config, start: Option<&StartArgs>) -> (SessionOptions, Option<TimeLimit>) {
    let mut options = config.session_options();
    let mut limit = config.default_limit();

    if let Some(args) = start {
        if let Some(sound) = args.sound_override() {
            options.sound = sound;
        }
        if let Some(input) = args.limit.as_deref() {
            limit = TimeLimit::parse_input(input);
        }
    }

    (options, limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults() {
        let mut config = Config::default();
        config.session.default_limit_minutes = Some(5);

        let (options, limit) = resolve(&config, None);
        assert!(!options.sound);
        assert_eq!(limit, TimeLimit::from_minutes(5));
    }

    #[test]
    fn test_resolve_overrides() {
        let mut config = Config::default();
        config.session.sound = true;
        config.session.default_limit_minutes = Some(5);

        let args = StartArgs {
            limit: Some("0".to_string()),
            sound: false,
            no_sound: true,
        };
        let (options, limit) = resolve(&config, Some(&args));
        assert!(!options.sound);
        assert!(limit.is_none());
    }

    #[test]
    fn test_resolve_keeps_config_without_flags() {
        let mut config = Config::default();
        config.session.sound = true;

        let (options, limit) = resolve(&config, Some(&StartArgs::default()));
        assert!(options.sound);
        assert!(limit.is_none());
    }
}
