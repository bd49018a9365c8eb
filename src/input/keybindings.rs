//! Default keybindings.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::HashMap;

use super::command::Command;

/// Represents a key combination (key code + modifiers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyCombo {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Creates a key combo with no modifiers.
    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    /// Creates a key combo with Control modifier.
    pub const fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    /// Combo for an incoming event. Shift is dropped from characters and
    /// BackTab, where the code already carries it.
    pub fn from_event(event: &KeyEvent) -> Self {
        let modifiers = match event.code {
            KeyCode::Char(_) | KeyCode::BackTab => event.modifiers.difference(KeyModifiers::SHIFT),
            _ => event.modifiers,
        };
        Self::new(event.code, modifiers)
    }

    /// Short display form such as `q`, `^C` or `→`.
    pub fn label(&self) -> String {
        let key = match self.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Left => "←".to_string(),
            KeyCode::Right => "→".to_string(),
            KeyCode::Up => "↑".to_string(),
            KeyCode::Down => "↓".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "S-Tab".to_string(),
            other => format!("{:?}", other),
        };
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            format!("^{}", key.to_uppercase())
        } else {
            key
        }
    }
}

/// Key → command table.
#[derive(Debug, Clone)]
pub struct KeybindingConfig {
    pub global: HashMap<KeyCombo, Command>,
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingConfig {
    /// Creates a new keybinding configuration with default bindings.
    pub fn new() -> Self {
        let mut global = HashMap::new();

        global.insert(KeyCombo::ctrl(KeyCode::Char('c')), Command::Quit);
        global.insert(KeyCombo::plain(KeyCode::Char('q')), Command::Quit);
        global.insert(KeyCombo::plain(KeyCode::Esc), Command::Dismiss);

        global.insert(KeyCombo::plain(KeyCode::Right), Command::NextScreen);
        global.insert(KeyCombo::plain(KeyCode::Left), Command::PreviousScreen);

        global.insert(KeyCombo::plain(KeyCode::Tab), Command::FocusNext);
        global.insert(KeyCombo::plain(KeyCode::BackTab), Command::FocusPrevious);
        global.insert(KeyCombo::plain(KeyCode::Enter), Command::ActivateFocused);
        global.insert(KeyCombo::plain(KeyCode::Char(' ')), Command::ActivateFocused);

        global.insert(KeyCombo::plain(KeyCode::Char('a')), Command::ToggleAuthorMode);
        global.insert(KeyCombo::plain(KeyCode::Char('c')), Command::Capture);
        global.insert(KeyCombo::plain(KeyCode::Char('x')), Command::Export);

        Self { global }
    }

    /// Command bound to a key press. Releases are ignored.
    pub fn lookup(&self, event: &KeyEvent) -> Option<Command> {
        if event.kind == KeyEventKind::Release {
            return None;
        }
        self.global.get(&KeyCombo::from_event(event)).copied()
    }

    /// First key bound to `command`, for hints.
    pub fn key_for(&self, command: Command) -> Option<KeyCombo> {
        let mut combos: Vec<KeyCombo> = self
            .global
            .iter()
            .filter(|(_, c)| **c == command)
            .map(|(k, _)| *k)
            .collect();
        combos.sort_by_key(|k| (k.modifiers.bits(), format!("{:?}", k.code)));
        combos.into_iter().next()
    }
}
