// command.rs - Editing-mode commands and the key bindings that produce them

use crate::key::{Key, KeyAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    MoveLineStart,
    MoveLineEnd,
    PageUp,
    PageDown,
    InsertChar(u8),
    InsertNewline,
    /// Delete the byte before the cursor
    DeleteChar,
    /// Delete the byte under the cursor
    DeleteCharForward,
    Save,
    Find,
    Quit,
    Refresh,
}

/// Editing-mode key bindings. Keys without a binding return `None`.
pub fn key_to_command(key: Key) -> Option<Command> {
    match key {
        Key::Literal(byte) => Some(Command::InsertChar(byte)),
        Key::Action(action) => match action {
            KeyAction::ArrowLeft => Some(Command::MoveLeft),
            KeyAction::ArrowRight => Some(Command::MoveRight),
            KeyAction::ArrowUp => Some(Command::MoveUp),
            KeyAction::ArrowDown => Some(Command::MoveDown),
            KeyAction::Home => Some(Command::MoveLineStart),
            KeyAction::End => Some(Command::MoveLineEnd),
            KeyAction::PageUp => Some(Command::PageUp),
            KeyAction::PageDown => Some(Command::PageDown),
            KeyAction::Enter => Some(Command::InsertNewline),
            KeyAction::Backspace => Some(Command::DeleteChar),
            KeyAction::Delete => Some(Command::DeleteCharForward),
            KeyAction::Save => Some(Command::Save),
            KeyAction::Find => Some(Command::Find),
            KeyAction::Quit => Some(Command::Quit),
            KeyAction::Refresh => Some(Command::Refresh),
            KeyAction::Cancel | KeyAction::Interrupt => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_inserts() {
        assert_eq!(key_to_command(Key::Literal(b'q')), Some(Command::InsertChar(b'q')));
        assert_eq!(key_to_command(Key::Literal(b'\t')), Some(Command::InsertChar(b'\t')));
    }

    #[test]
    fn test_action_bindings() {
        assert_eq!(key_to_command(Key::Action(KeyAction::Enter)), Some(Command::InsertNewline));
        assert_eq!(
            key_to_command(Key::Action(KeyAction::Delete)),
            Some(Command::DeleteCharForward)
        );
        assert_eq!(key_to_command(Key::Action(KeyAction::Quit)), Some(Command::Quit));
    }

    #[test]
    fn test_cancel_and_interrupt_are_unbound() {
        assert_eq!(key_to_command(Key::Action(KeyAction::Cancel)), None);
        assert_eq!(key_to_command(Key::Action(KeyAction::Interrupt)), None);
    }
}
