//! Key handling outside the virtual keyboard.
//!
//! ```text
//! KeyEvent -> KeyboardController (when visible) -> KeybindingConfig -> Command -> App
//! ```
//!
//! - [`command`] - the [`Command`] enum
//! - [`keybindings`] - default key table

pub mod command;
pub mod keybindings;

pub use command::Command;
pub use keybindings::{KeyCombo, KeybindingConfig};
