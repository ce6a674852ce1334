//! Interactive terminal dashboard.
//!
//! Feature-gated behind `tui`. Launch with `--tui` on the CLI.

mod controls;
mod layout;
/// Dashboard application state.
pub mod runtime;
mod style;

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::config::ScenarioConfig;
use runtime::App;

type Term = Terminal<CrosstermBackend<Stdout>>;

/// How long the loop waits for input before redrawing.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Runs the dashboard for `scenario` until the user quits.
///
/// The terminal is restored even when the loop fails.
///
/// # Errors
///
/// Returns an `io::Error` if the first evaluation is rejected or the
/// terminal cannot be set up or drawn to.
pub fn run(scenario: &ScenarioConfig) -> io::Result<()> {
    let mut app = App::new(scenario).map_err(io::Error::other)?;
    let mut terminal = enter()?;
    let result = event_loop(&mut terminal, &mut app);
    leave(&mut terminal);
    result
}

fn enter() -> io::Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e);
    }
    Terminal::new(CrosstermBackend::new(stdout)).inspect_err(|_| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    })
}

fn leave(terminal: &mut Term) {
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();
}

/// Draw, then wait briefly for a key.
fn event_loop(terminal: &mut Term, app: &mut App) -> io::Result<()> {
    while !app.quit {
        terminal.draw(|frame| layout::render(frame, app))?;
        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                controls::handle_key(app, key);
            }
        }
    }
    Ok(())
}
