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
        KeyCode::Right | KeyCode::Tab => app.next_climate(),
        KeyCode::Left | KeyCode::BackTab => app.prev_climate(),
        KeyCode::Char('+' | '=') | KeyCode::Up => app.budget_up(),
        KeyCode::Char('-') | KeyCode::Down => app.budget_down(),
        KeyCode::Char('r') => app.reset(),
        _ => {}
    }
}
