// key.rs - Decoded keyboard input

/// Logical actions produced by control bytes and escape sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    Delete,
    PageUp,
    PageDown,
    Enter,
    Backspace,
    /// Bare ESC, or an escape sequence we don't recognise
    Cancel,
    /// Ctrl-C
    Interrupt,
    /// Ctrl-Q
    Quit,
    /// Ctrl-S
    Save,
    /// Ctrl-F
    Find,
    /// Ctrl-L
    Refresh,
}

/// One decoded key: either a raw byte to insert or a logical action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Literal(u8),
    Action(KeyAction),
}

pub const ESC: u8 = 0x1b;

/// Map a single control byte to its action, if it has one.
pub fn control_action(byte: u8) -> Option<KeyAction> {
    match byte {
        3 => Some(KeyAction::Interrupt),
        6 => Some(KeyAction::Find),
        8 | 127 => Some(KeyAction::Backspace),
        12 => Some(KeyAction::Refresh),
        13 => Some(KeyAction::Enter),
        17 => Some(KeyAction::Quit),
        19 => Some(KeyAction::Save),
        _ => None,
    }
}

impl Key {
    /// True for bytes a prompt accepts as query/filename text.
    pub fn is_printable(&self) -> bool {
        matches!(self, Key::Literal(b) if (0x20..0x7f).contains(b) || *b >= 0x80)
    }
}
