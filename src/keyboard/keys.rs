//! Logical keys shared by the on-screen keyboard and the physical one.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::models::InputType;

/// One logical keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VirtualKey {
    Char(char),
    Space,
    Backspace,
    Done,
    /// Physical only; closes like [`VirtualKey::Done`].
    Escape,
    Shift,
    Numbers,
    Abc,
}

impl VirtualKey {
    /// Parse a layout token: `{bksp}`, `{done}`, `{shift}`, `{numbers}`,
    /// `{abc}`, `{space}` or a single character.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "{bksp}" => Some(VirtualKey::Backspace),
            "{done}" => Some(VirtualKey::Done),
            "{shift}" => Some(VirtualKey::Shift),
            "{numbers}" => Some(VirtualKey::Numbers),
            "{abc}" => Some(VirtualKey::Abc),
            "{space}" => Some(VirtualKey::Space),
            _ => {
                let mut chars = token.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(VirtualKey::Char(c)),
                    _ => None,
                }
            }
        }
    }

    /// Map a physical key press.
    ///
    /// Bound keys: ASCII letters and digits, space, backspace, enter and
    /// escape. Releases, repeats of modifier chords and everything else map
    /// to `None`.
    pub fn from_key_event(event: &KeyEvent) -> Option<Self> {
        if event.kind == KeyEventKind::Release {
            return None;
        }
        if event
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
        {
            return None;
        }
        match event.code {
            KeyCode::Char(' ') => Some(VirtualKey::Space),
            KeyCode::Char(c) if c.is_ascii_alphanumeric() => Some(VirtualKey::Char(c)),
            KeyCode::Backspace => Some(VirtualKey::Backspace),
            KeyCode::Enter => Some(VirtualKey::Done),
            KeyCode::Esc => Some(VirtualKey::Escape),
            _ => None,
        }
    }

    /// Text appended to the value, if any.
    pub fn text(&self) -> Option<char> {
        match self {
            VirtualKey::Char(c) => Some(*c),
            VirtualKey::Space => Some(' '),
            _ => None,
        }
    }

    /// Cap label drawn on the on-screen key.
    pub fn label(&self, input_type: InputType) -> String {
        match self {
            VirtualKey::Char(c) => c.to_string(),
            VirtualKey::Space => "space".to_string(),
            VirtualKey::Backspace => "⌫".to_string(),
            VirtualKey::Done if input_type == InputType::Number => "OK".to_string(),
            VirtualKey::Done => "Done".to_string(),
            VirtualKey::Escape => "Esc".to_string(),
            VirtualKey::Shift => "⇧".to_string(),
            VirtualKey::Numbers => "123".to_string(),
            VirtualKey::Abc => "ABC".to_string(),
        }
    }

    /// Keys drawn with the special (darker) style.
    pub fn is_special(&self) -> bool {
        matches!(
            self,
            VirtualKey::Shift | VirtualKey::Numbers | VirtualKey::Abc | VirtualKey::Done
        )
    }
}
