//! Terminal User Interface (TUI) for cohere.
//!
//! Hosts a breathing session: drives the controller's timers from the event
//! loop, sizes and paints its drawing surface, and maps keys to intents.
//! Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::App;

use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::warn;

use crate::core::Clock;
use crate::error::CohereError;

/// Run the TUI until the user quits.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or run.
pub fn run<C: Clock>(app: &mut App<C>) -> Result<(), CohereError> {
    // Setup terminal
    enable_raw_mode().map_err(|e| CohereError::terminal("enable raw mode", e))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| CohereError::terminal("setup terminal", e))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal =
        Terminal::new(backend).map_err(|e| CohereError::terminal("create terminal", e))?;

    let result = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

/// Run the main application loop.
fn run_app<B: Backend, C: Clock>(
    terminal: &mut Terminal<B>,
    app: &mut App<C>,
) -> Result<(), CohereError> {
    loop {
        app.tick();

        // Draw UI
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| CohereError::terminal("draw", e))?;

        // Handle events
        let timeout = app.poll_timeout();
        if let Some(action) = event::handle_events(app, timeout)? {
            let outcome = match action {
                event::Action::Quit => {
                    app.should_quit = true;
                    Ok(())
                }
                event::Action::Start => app.start(),
                event::Action::Pause => {
                    app.pause();
                    Ok(())
                }
                event::Action::Reset => {
                    app.reset();
                    Ok(())
                }
                event::Action::ToggleSound => {
                    app.toggle_sound();
                    Ok(())
                }
                event::Action::Preset(index) => app.start_preset(index),
                event::Action::Input(_) | event::Action::Backspace | event::Action::Help => Ok(()),
            };
            if let Err(e) = outcome {
                warn!(error = %e, "action rejected");
                app.status = Some(e.to_string());
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
