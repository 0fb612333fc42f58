use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the event loop to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    /// Zero-based index into the connected game's feature list
    Feature(usize),
    Ignore,
}

/// Map a key event to an action.
///
/// - Esc, `q`/`Q`, Ctrl+C quit
/// - `1`-`9` trigger the n-th listed feature
pub fn classify_key(event: &KeyEvent) -> KeyAction {
    // Windows reports both press and release
    if event.kind != KeyEventKind::Press {
        return KeyAction::Ignore;
    }

    match event.code {
        KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char(c @ '1'..='9') => KeyAction::Feature(c as usize - '1' as usize),
        _ => KeyAction::Ignore,
    }
}
