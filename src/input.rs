use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the clock to do.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    StartStop,
    Reset,
    Restart,
    Digit(u8),
    Clear,
    ToggleMode,
    ToggleHundredths,
    Help,
    Quit,
}

/// Map a terminal key event to a command. Top-row and keypad digits both
/// arrive as characters. Releases and unbound keys map to nothing.
pub fn map_key(key: &KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('d') => Some(Command::Quit),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Char(' ') => Some(Command::StartStop),
        KeyCode::Char('r') => Some(Command::Reset),
        KeyCode::Enter => Some(Command::Restart),
        KeyCode::Char(c @ '0'..='9') => Some(Command::Digit(c as u8 - b'0')),
        KeyCode::Delete | KeyCode::Backspace => Some(Command::Clear),
        KeyCode::Char('m') => Some(Command::ToggleMode),
        KeyCode::Char('h') => Some(Command::ToggleHundredths),
        KeyCode::Char('?') | KeyCode::F(1) => Some(Command::Help),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}
