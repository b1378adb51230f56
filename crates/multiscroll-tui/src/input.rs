use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    DragLeft,
    DragRight,
    FlingLeft,
    FlingRight,
    Touch,        // 't': touch-down on the selected row
    ToggleAttach, // 'd': detach or re-attach the selected row
    AddAll,       // 'a': add every row to the group
    Clear,        // 'c': remove every row from the group
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Esc, _) => Action::Quit,

        // Row selection
        (KeyCode::Char('j'), KeyModifiers::NONE) => Action::MoveDown,
        (KeyCode::Char('k'), KeyModifiers::NONE) => Action::MoveUp,
        (KeyCode::Down, KeyModifiers::NONE) => Action::MoveDown,
        (KeyCode::Up, KeyModifiers::NONE) => Action::MoveUp,

        // Scrolling
        (KeyCode::Char('h'), KeyModifiers::NONE) => Action::DragLeft,
        (KeyCode::Char('l'), KeyModifiers::NONE) => Action::DragRight,
        (KeyCode::Left, KeyModifiers::NONE) => Action::DragLeft,
        (KeyCode::Right, KeyModifiers::NONE) => Action::DragRight,
        (KeyCode::Char('H'), _) => Action::FlingLeft,
        (KeyCode::Char('L'), _) => Action::FlingRight,
        (KeyCode::Left, KeyModifiers::SHIFT) => Action::FlingLeft,
        (KeyCode::Right, KeyModifiers::SHIFT) => Action::FlingRight,

        // Group membership
        (KeyCode::Char('t'), KeyModifiers::NONE) => Action::Touch,
        (KeyCode::Char('d'), KeyModifiers::NONE) => Action::ToggleAttach,
        (KeyCode::Char('a'), KeyModifiers::NONE) => Action::AddAll,
        (KeyCode::Char('c'), KeyModifiers::NONE) => Action::Clear,

        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_bindings() {
        assert_eq!(handle_key_event(key(KeyCode::Char('q'), KeyModifiers::NONE)), Action::Quit);
        assert_eq!(handle_key_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL)), Action::Quit);
        assert_eq!(handle_key_event(key(KeyCode::Char('c'), KeyModifiers::NONE)), Action::Clear);
        assert_eq!(handle_key_event(key(KeyCode::Char('l'), KeyModifiers::NONE)), Action::DragRight);
        assert_eq!(handle_key_event(key(KeyCode::Char('L'), KeyModifiers::SHIFT)), Action::FlingRight);
        assert_eq!(handle_key_event(key(KeyCode::Left, KeyModifiers::SHIFT)), Action::FlingLeft);
        assert_eq!(handle_key_event(key(KeyCode::Char('x'), KeyModifiers::NONE)), Action::None);
    }
}
