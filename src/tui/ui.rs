//! UI rendering for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle, Line as CanvasLine},
        Block, Borders, Paragraph,
    },
    Frame,
};

use crate::core::Clock;
use crate::features::breathing::{format_mmss, SessionState, Shape, PHASE_DURATION};
use crate::tui::app::App;

const GUIDE_COLOR: Color = Color::Rgb(217, 119, 6);
const MARKER_COLOR: Color = Color::Rgb(255, 0, 0);
const INSTRUCTION_COLOR: Color = Color::Rgb(245, 158, 11);
const COUNTDOWN_COLOR: Color = Color::Rgb(240, 128, 128);

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f64 = 2.0;

/// Render the application UI.
pub fn render<C: Clock>(frame: &mut Frame<'_>, app: &mut App<C>) {
    // Create layout: header, body, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    match app.state() {
        SessionState::Idle => render_start(frame, app, chunks[1]),
        SessionState::Running => render_exercise(frame, app, chunks[1]),
        SessionState::Complete => render_complete(frame, app, chunks[1]),
    }
    render_status_bar(frame, app, chunks[2]);
}

/// Render the header.
fn render_header<C: Clock>(frame: &mut Frame<'_>, app: &App<C>, area: Rect) {
    let title = match app.state() {
        SessionState::Running => format!(" Total Time: {} ", format_mmss(app.total_seconds)),
        _ => " Coherent Breathing ".to_string(),
    };

    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    frame.render_widget(header, area);
}

/// Render the start screen.
fn render_start<C: Clock>(frame: &mut Frame<'_>, app: &App<C>, area: Rect) {
    let sound = if app.controller.sound_enabled() { "On" } else { "Off" };
    let phase_secs = PHASE_DURATION.as_secs_f64();

    let presets: Vec<Span<'_>> = app
        .presets
        .iter()
        .zip(['a', 'b', 'c'])
        .flat_map(|(preset, key)| {
            [
                Span::styled(format!("[{key}] "), Style::default().fg(Color::DarkGray)),
                Span::raw(format!("{} min   ", preset.minutes())),
            ]
        })
        .collect();

    let lines = vec![
        Line::from(vec![
            Span::raw("Sound: "),
            Span::styled(sound, Style::default().add_modifier(Modifier::BOLD)),
            Span::styled("  [s]", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw("Session Length (minutes, optional): "),
            Span::styled(
                format!("{}_", app.limit_input),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!("Inhale for {phase_secs}s, Exhale for {phase_secs}s."),
            Style::default().fg(INSTRUCTION_COLOR),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Enter] ", Style::default().fg(Color::DarkGray)),
            Span::styled("Start", Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
        Line::from(presets),
    ];

    let body = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(body, area);
}

/// Render the running session: instruction panel and animation.
fn render_exercise<C: Clock>(frame: &mut Frame<'_>, app: &mut App<C>, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let info = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            app.instruction.instruction(),
            Style::default()
                .fg(INSTRUCTION_COLOR)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            app.countdown,
            Style::default().fg(COUNTDOWN_COLOR),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Space] ", Style::default().fg(Color::DarkGray)),
            Span::raw("Pause"),
        ]),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(info, columns[0]);

    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(columns[1]);
    let width = f64::from(inner.width);
    let height = f64::from(inner.height) * CELL_ASPECT;
    app.controller.sketch_mut().resize(width, height);

    let shapes = app.controller.sketch().shapes().to_vec();
    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(move |ctx| {
            // Surface y grows downward, canvas y grows upward.
            for shape in &shapes {
                match *shape {
                    Shape::Line { x, y_top, y_bottom } => ctx.draw(&CanvasLine {
                        x1: x,
                        y1: height - y_top,
                        x2: x,
                        y2: height - y_bottom,
                        color: GUIDE_COLOR,
                    }),
                    Shape::Circle { x, y, radius } => {
                        let mut r = radius;
                        while r > 0.0 {
                            ctx.draw(&Circle {
                                x,
                                y: height - y,
                                radius: r,
                                color: MARKER_COLOR,
                            });
                            r -= 0.25;
                        }
                    }
                }
            }
        });

    frame.render_widget(canvas, columns[1]);
}

/// Render the completion screen.
fn render_complete<C: Clock>(frame: &mut Frame<'_>, app: &App<C>, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Complete! Well done.",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Total Time: {}", format_mmss(app.total_seconds))),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Enter] ", Style::default().fg(Color::DarkGray)),
            Span::raw("Back to Start"),
        ]),
    ];

    let body = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(body, area);
}

/// Render the status bar.
fn render_status_bar<C: Clock>(frame: &mut Frame<'_>, app: &App<C>, area: Rect) {
    let status_text = app.status.as_deref().unwrap_or("?:help | q:quit");

    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ManualClock;
    use crate::features::breathing::{SessionController, SessionOptions, TimeLimit};
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    fn app(clock: &ManualClock) -> App<ManualClock> {
        let controller = SessionController::new(
            clock.clone(),
            SessionOptions {
                keep_awake: false,
                ..SessionOptions::default()
            },
        );
        App::new(controller, vec![TimeLimit::from_minutes(2).unwrap()], None, 30)
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_start_screen_text() {
        let clock = ManualClock::new();
        let mut app = app(&clock);
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();

        terminal.draw(|f| render(f, &mut app)).unwrap();
        let text = screen_text(&terminal);

        assert!(text.contains("Coherent Breathing"));
        assert!(text.contains("Inhale for 5.5s, Exhale for 5.5s."));
        assert!(text.contains("Sound: Off"));
    }

    #[test]
    fn test_exercise_sizes_sketch() {
        let clock = ManualClock::new();
        let mut app = app(&clock);
        app.start().unwrap();
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();

        terminal.draw(|f| render(f, &mut app)).unwrap();
        clock.advance(Duration::from_millis(100));
        app.tick();
        terminal.draw(|f| render(f, &mut app)).unwrap();

        assert_eq!(app.controller.sketch().shapes().len(), 2);
        let text = screen_text(&terminal);
        assert!(text.contains("Total Time: 00:00"));
        assert!(text.contains("Inhale"));
    }
}
