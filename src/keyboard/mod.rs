//! Virtual keyboard controller.
//!
//! A single `hidden ⇄ visible` state machine bound to one input field at a
//! time. On-screen presses and physical key events are both turned into a
//! [`VirtualKey`] and go through [`KeyboardController::press`], so the two
//! paths cannot diverge.

pub mod keys;
pub mod layout;

pub use keys::VirtualKey;
pub use layout::Layer;

use crossterm::event::KeyEvent;
use tokio::sync::watch;
use tracing::debug;

use crate::models::InputType;
use crate::signal::Signal;

/// Published keyboard state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardState {
    pub is_visible: bool,
    pub active_field: Option<String>,
    pub input_type: InputType,
    pub current_value: String,
    pub placeholder: String,
}

/// Result of a keystroke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The keyboard is hidden or stopped.
    Ignored,
    /// The value changed.
    Edited { field: String, value: String },
    /// The on-screen layer switched.
    LayerChanged(Layer),
    /// Done, enter or escape closed the keyboard. The value is kept.
    Closed { field: String, value: String },
}

#[derive(Debug, Default)]
pub struct KeyboardController {
    state: Signal<KeyboardState>,
    layer: Layer,
    started: bool,
}

impl KeyboardController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin accepting physical key events.
    pub fn start(&mut self) {
        self.started = true;
    }

    /// Stop accepting physical key events and hide.
    pub fn stop(&mut self) {
        self.started = false;
        if self.is_visible() {
            self.hide();
        }
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn state(&self) -> KeyboardState {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<KeyboardState> {
        self.state.subscribe()
    }

    pub fn is_visible(&self) -> bool {
        self.state.borrow().is_visible
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    /// Key rows for the current input type and layer.
    pub fn key_rows(&self) -> Vec<Vec<VirtualKey>> {
        layout::keys(self.state.borrow().input_type, self.layer)
    }

    /// Open the keyboard bound to `field`.
    pub fn show(
        &mut self,
        field: &str,
        input_type: InputType,
        current_value: &str,
        placeholder: &str,
    ) {
        debug!("Keyboard shown for {} ({})", field, input_type);
        self.layer = Layer::Default;
        self.state.set(KeyboardState {
            is_visible: true,
            active_field: Some(field.to_string()),
            input_type,
            current_value: current_value.to_string(),
            placeholder: placeholder.to_string(),
        });
    }

    /// Close the keyboard. Field and value are kept.
    pub fn hide(&mut self) {
        debug!("Keyboard hidden");
        self.state.update(|s| s.is_visible = false);
    }

    /// Replace the value. Ignored while hidden.
    pub fn update_value(&mut self, value: &str) -> bool {
        if !self.is_visible() {
            return false;
        }
        let value = value.to_string();
        self.state.update(|s| s.current_value = value);
        true
    }

    /// Remove one trailing character. Ignored while hidden or empty.
    pub fn backspace(&mut self) -> bool {
        let mut value = self.state.borrow().current_value.clone();
        if !self.is_visible() || value.pop().is_none() {
            return false;
        }
        self.update_value(&value)
    }

    /// Apply one logical keystroke.
    pub fn press(&mut self, key: VirtualKey) -> KeyOutcome {
        if !self.is_visible() {
            return KeyOutcome::Ignored;
        }

        if let Some(layer) = layout::switch_layer(self.layer, key) {
            self.layer = layer;
            return KeyOutcome::LayerChanged(layer);
        }

        match key {
            VirtualKey::Done | VirtualKey::Escape => {
                self.hide();
                let (field, value) = self.field_and_value();
                KeyOutcome::Closed { field, value }
            }
            VirtualKey::Backspace => {
                if !self.backspace() {
                    return KeyOutcome::Ignored;
                }
                let (field, value) = self.field_and_value();
                KeyOutcome::Edited { field, value }
            }
            other => {
                let Some(c) = other.text() else {
                    return KeyOutcome::Ignored;
                };
                let mut value = self.state.borrow().current_value.clone();
                value.push(c);
                self.update_value(&value);
                let (field, value) = self.field_and_value();
                KeyOutcome::Edited { field, value }
            }
        }
    }

    /// Route a physical key event. `None` when the event is not a typing
    /// key or the keyboard is stopped or hidden, so the caller may handle
    /// it itself.
    pub fn handle_key_event(&mut self, event: &KeyEvent) -> Option<KeyOutcome> {
        if !self.started || !self.is_visible() {
            return None;
        }
        let key = VirtualKey::from_key_event(event)?;
        let input_type = self.state.borrow().input_type;
        if !layout::accepts(input_type, key) {
            debug!("Ignoring {:?} for a {} field", key, input_type);
            return Some(KeyOutcome::Ignored);
        }
        Some(self.press(key))
    }

    fn field_and_value(&self) -> (String, String) {
        let state = self.state.borrow();
        (
            state.active_field.clone().unwrap_or_default(),
            state.current_value.clone(),
        )
    }
}
