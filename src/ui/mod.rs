pub mod app;
pub mod render;
pub mod scroll;
pub mod wrap;

use crate::model::{Filter, TaskList};
use crate::storage::TaskStore;
use anyhow::{anyhow, Result};
use app::{App, Input, Step};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetSize,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::prelude::Style;
use ratatui::Terminal;
use render::Fragment;
use std::io::{stdout, Stdout};
use std::thread;
use std::time::Duration;

const TOAST_DELAY: Duration = Duration::from_millis(700);

/// Runs the list screen until the user quits. A failed save ends the session
/// after the error screen is acknowledged and is returned as an error.
pub fn run(tasks: &mut TaskList, store: &mut dyn TaskStore, filter: Filter) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let mut app = App::new(tasks, store, filter);
    let result = event_loop(&mut app, &mut terminal);
    teardown_terminal(&mut terminal)?;
    result
}

fn event_loop<B: Backend>(app: &mut App<'_>, terminal: &mut Terminal<B>) -> Result<()> {
    loop {
        paint(terminal, &app.frame())?;
        match app.update(next_input()) {
            Step::Redraw => {}
            Step::Saved => {
                paint(terminal, &render::render_saved())?;
                thread::sleep(TOAST_DELAY);
            }
            Step::Fatal(message) => {
                paint(terminal, &render::render_error(&message))?;
                wait_for_key();
                return Err(anyhow!("saving tasks failed: {}", message));
            }
            Step::Quit => return Ok(()),
        }
    }
}

fn next_input() -> Input {
    loop {
        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => return Input::Key(key),
            Ok(Event::Resize(..)) => return Input::Resize,
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(%err, "input closed");
                return Input::Closed;
            }
        }
    }
}

fn wait_for_key() {
    loop {
        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => return,
            Ok(_) => {}
            Err(_) => return,
        }
    }
}

fn paint<B: Backend>(terminal: &mut Terminal<B>, fragments: &[Fragment]) -> Result<()> {
    terminal.draw(|f| draw_fragments(f, fragments))?;
    Ok(())
}

fn draw_fragments(f: &mut ratatui::Frame<'_>, fragments: &[Fragment]) {
    let area = f.size();
    let buf = f.buffer_mut();
    for frag in fragments {
        if frag.row >= area.height || frag.col >= area.width {
            continue;
        }
        buf.set_stringn(
            area.x + frag.col,
            area.y + frag.row,
            &frag.text,
            (area.width - frag.col) as usize,
            Style::default().fg(frag.tone.color()),
        );
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if let Err(err) = execute!(stdout, SetSize(render::WIDTH, render::HEIGHT)) {
        tracing::debug!(%err, "terminal refused resize");
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;
    Ok(terminal)
}

fn teardown_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
