//! Terminal setup, teardown, and the frame loop.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::SlideshowApp;
use crate::panel::{self, HEADING};
use crate::scene;

/// How long to wait for input before drawing the next frame.
const FRAME_BUDGET: Duration = Duration::from_millis(16);

/// Launch the slideshow.
pub fn run(mut app: SlideshowApp) -> Result<(), String> {
    enable_raw_mode().map_err(|e| format!("terminal error: {e}"))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| format!("terminal error: {e}"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| format!("terminal error: {e}"))?;

    let result = run_loop(&mut terminal, &mut app);

    app.quit();
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

/// Main loop: advance by real elapsed time, draw, then wait for input.
fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut SlideshowApp,
) -> Result<(), String> {
    let mut last = Instant::now();
    loop {
        let now = Instant::now();
        app.tick(now - last);
        last = now;

        terminal
            .draw(|frame| draw(frame, app))
            .map_err(|e| format!("draw error: {e}"))?;

        if app.should_quit {
            return Ok(());
        }

        if event::poll(FRAME_BUDGET).map_err(|e| format!("event error: {e}"))? {
            let event = event::read().map_err(|e| format!("event error: {e}"))?;
            handle_event(app, event);
        }
    }
}

/// Handle a crossterm event.
pub fn handle_event(app: &mut SlideshowApp, event: Event) {
    if let Event::Key(key) = event
        && key.kind == KeyEventKind::Press
    {
        handle_key(app, key);
    }
}

/// Handle keyboard input.
pub fn handle_key(app: &mut SlideshowApp, key: KeyEvent) {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    if app.show_help {
        // Any key closes the help
        app.show_help = false;
        if key.code != KeyCode::Char('q') {
            return;
        }
    }

    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Left | KeyCode::Char('h') => app.prev_step(),
        KeyCode::Right | KeyCode::Char('l') => app.next_step(),
        KeyCode::Char(' ') | KeyCode::Char('n') => app.narrate(),
        KeyCode::Char(c) => {
            if let Some(n) = c.to_digit(10) {
                app.jump(n as usize);
            }
        }
        _ => {}
    }
}

/// Status bar text.
pub fn status_text(app: &SlideshowApp) -> String {
    if app.is_narrating() {
        return format!(" {}  |  q: avsluta", panel::narration_label(true));
    }
    if let Some(notice) = app.notice() {
        return format!(" {notice}  |  ?: hjälp  q: avsluta");
    }
    " ←/→: byt steg  1-5: hoppa  space: lyssna  ?: hjälp  q: avsluta".to_string()
}

/// Main draw function.
fn draw(frame: &mut Frame, app: &SlideshowApp) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Heading
            Constraint::Min(0),    // Scene and card
            Constraint::Length(1), // Navigation
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let heading = Paragraph::new(HEADING)
        .style(Style::default().fg(Color::Yellow).bold())
        .alignment(Alignment::Center);
    frame.render_widget(heading, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[1]);

    scene::draw_scene(frame, columns[0], app.storm());
    panel::draw_panel(frame, columns[1], app.phase(), app.is_narrating());

    frame.render_widget(
        Paragraph::new(panel::nav_line(app.phase())).alignment(Alignment::Center),
        rows[2],
    );

    let status = Paragraph::new(status_text(app))
        .style(Style::default().fg(Color::Black).bg(Color::White));
    frame.render_widget(status, rows[3]);

    if app.show_help {
        crate::shared::draw_help_popup(frame);
    }
}
