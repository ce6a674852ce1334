//! Keyboard input handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::runtime::App;

/// Maps a key event to an application action.
///
/// Guards on [`KeyEventKind::Press`] to avoid double-fire on some terminals.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit = true,
        KeyCode::Up => app.days_up(),
        KeyCode::Down => app.days_down(),
        KeyCode::Right | KeyCode::Char('+' | '=') => app.reduction_up(),
        KeyCode::Left | KeyCode::Char('-') => app.reduction_down(),
        KeyCode::Char('r') => app.reseed(),
        KeyCode::Char('c') => app.clear_cache(),
        KeyCode::Char('e') => app.export(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScenarioConfig;

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn arrows_drive_inputs() {
        let mut app = App::new(&ScenarioConfig::single_day()).unwrap();
        press(&mut app, KeyCode::Up);
        assert_eq!(app.days, 2);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.days, 1);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.reduction.percent(), 55.0);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.reduction.percent(), 50.0);
    }

    #[test]
    fn quit_keys() {
        let mut app = App::new(&ScenarioConfig::single_day()).unwrap();
        press(&mut app, KeyCode::Char('c'));
        assert!(!app.quit);
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.quit);

        let mut app = App::new(&ScenarioConfig::single_day()).unwrap();
        press(&mut app, KeyCode::Esc);
        assert!(app.quit);
    }
}
