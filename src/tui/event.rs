//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::Clock;
use crate::error::CohereError;
use crate::features::breathing::SessionState;
use crate::tui::app::App;

/// Help line shown on `?`.
const HELP: &str = "Enter:start | Space:pause | r:reset | s:sound | a/b/c:presets | q:quit";

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Start a session.
    Start,
    /// Pause the running session.
    Pause,
    /// Back to the start screen.
    Reset,
    /// Flip the chime.
    ToggleSound,
    /// Start with the preset at this index.
    Preset(usize),
    /// Type into the session length field.
    Input(char),
    /// Delete from the session length field.
    Backspace,
    /// Show key help.
    Help,
}

/// Map a key press to an action for the given screen.
pub fn map_key(state: SessionState, key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return Some(Action::Quit),
        KeyCode::Char('?') => return Some(Action::Help),
        _ => {}
    }

    match state {
        SessionState::Idle => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Start),
            KeyCode::Char('s') => Some(Action::ToggleSound),
            KeyCode::Char(c @ '0'..='9') => Some(Action::Input(c)),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Char(c) => preset_index(c).map(Action::Preset),
            _ => None,
        },
        SessionState::Running => match key.code {
            KeyCode::Char(' ' | 'p') => Some(Action::Pause),
            KeyCode::Char('r') => Some(Action::Reset),
            KeyCode::Char('s') => Some(Action::ToggleSound),
            KeyCode::Char(c) => preset_index(c).map(Action::Preset),
            _ => None,
        },
        SessionState::Complete => match key.code {
            KeyCode::Enter | KeyCode::Char('r') => Some(Action::Reset),
            _ => None,
        },
    }
}

fn preset_index(c: char) -> Option<usize> {
    match c {
        'a' => Some(0),
        'b' => Some(1),
        'c' => Some(2),
        _ => None,
    }
}

/// Handle terminal events.
///
/// Waits at most `timeout` for input. Editing and help keys are applied to
/// `app` directly; everything else is returned as an action.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events<C: Clock>(
    app: &mut App<C>,
    timeout: Duration,
) -> Result<Option<Action>, CohereError> {
    if !event::poll(timeout).map_err(|e| CohereError::terminal("poll events", e))? {
        return Ok(None);
    }

    let Event::Key(key) = event::read().map_err(|e| CohereError::terminal("read event", e))? else {
        return Ok(None);
    };
    if key.kind != KeyEventKind::Press {
        return Ok(None);
    }

    match map_key(app.state(), key) {
        Some(Action::Input(c)) => app.push_limit_char(c),
        Some(Action::Backspace) => app.pop_limit_char(),
        Some(Action::Help) => app.status = Some(HELP.to_string()),
        other => return Ok(other),
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_keys_everywhere() {
        for state in [SessionState::Idle, SessionState::Running, SessionState::Complete] {
            assert_eq!(map_key(state, key(KeyCode::Char('q'))), Some(Action::Quit));
            assert_eq!(map_key(state, key(KeyCode::Esc)), Some(Action::Quit));
            assert_eq!(
                map_key(
                    state,
                    KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
                ),
                Some(Action::Quit)
            );
        }
    }

    #[test]
    fn test_start_screen_keys() {
        let idle = SessionState::Idle;
        assert_eq!(map_key(idle, key(KeyCode::Enter)), Some(Action::Start));
        assert_eq!(map_key(idle, key(KeyCode::Char('7'))), Some(Action::Input('7')));
        assert_eq!(map_key(idle, key(KeyCode::Backspace)), Some(Action::Backspace));
        assert_eq!(map_key(idle, key(KeyCode::Char('s'))), Some(Action::ToggleSound));
        assert_eq!(map_key(idle, key(KeyCode::Char('b'))), Some(Action::Preset(1)));
        assert_eq!(map_key(idle, key(KeyCode::Char('z'))), None);
    }

    #[test]
    fn test_running_keys() {
        let running = SessionState::Running;
        assert_eq!(map_key(running, key(KeyCode::Char(' '))), Some(Action::Pause));
        assert_eq!(map_key(running, key(KeyCode::Char('p'))), Some(Action::Pause));
        assert_eq!(map_key(running, key(KeyCode::Char('r'))), Some(Action::Reset));
        assert_eq!(map_key(running, key(KeyCode::Char('c'))), Some(Action::Preset(2)));
        assert_eq!(map_key(running, key(KeyCode::Char('5'))), None);
    }

    #[test]
    fn test_complete_screen_keys() {
        let complete = SessionState::Complete;
        assert_eq!(map_key(complete, key(KeyCode::Enter)), Some(Action::Reset));
        assert_eq!(map_key(complete, key(KeyCode::Char('a'))), None);
    }
}
