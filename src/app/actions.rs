//! Carrying out hotspot actions and keyboard outcomes.

use tracing::{debug, info, warn};

use super::App;
use crate::error::ActionError;
use crate::keyboard::KeyOutcome;
use crate::models::Hotspot;
use crate::overlay::OverlayEvent;
use crate::store::ActionOutcome;

impl App {
    /// Resolve and perform a hotspot's action.
    pub fn activate(&mut self, hotspot: &Hotspot) {
        let outcome = self
            .store
            .resolve_action(hotspot, self.session.input_values());
        match outcome {
            Ok(ActionOutcome::Input { field, input_type }) => {
                let placeholder = hotspot.placeholder.clone().unwrap_or_default();
                let current = self.session.value(&field).to_string();
                self.keyboard
                    .show(&field, input_type, &current, &placeholder);
            }
            Ok(ActionOutcome::Navigate { target }) => {
                self.go_to(&target);
            }
            Ok(ActionOutcome::Login { target }) => self.complete_login(target),
            Err(e) => self.report_action_error(&hotspot.id, e),
        }
        self.mark_dirty();
    }

    fn complete_login(&mut self, target: Option<String>) {
        info!("Login accepted");
        self.session.clear();
        let target = target.or_else(|| self.workflow.next_steps().first().cloned());
        match target {
            Some(target) => {
                self.go_to(&target);
            }
            None => {
                debug!("Login has no target; staying on the current screen");
                self.notices.info("Signed in");
            }
        }
    }

    fn report_action_error(&mut self, hotspot_id: &str, error: ActionError) {
        warn!("[{}] hotspot {}: {}", error.error_code(), hotspot_id, error);
        let mut text = error.user_message();
        if error == ActionError::MissingInputValues {
            let step = self.workflow.current_step();
            let check = self
                .workflow
                .validate_step_inputs(&step, self.session.input_values());
            if let Some(first) = check.errors.first() {
                text = first.clone();
            }
        }
        self.notices.error(text);
    }

    /// Apply the result of a keystroke to the session.
    pub fn apply_key_outcome(&mut self, outcome: KeyOutcome) {
        match outcome {
            KeyOutcome::Ignored => return,
            KeyOutcome::Edited { field, value } => self.session.set_raw(&field, &value),
            KeyOutcome::LayerChanged(layer) => debug!("Keyboard layer {:?}", layer),
            KeyOutcome::Closed { field, value } => {
                self.session.commit(&field, &value);
            }
        }
        self.mark_dirty();
    }

    /// React to what the overlay reported.
    pub fn apply_overlay_event(&mut self, event: OverlayEvent) {
        match event {
            OverlayEvent::Activated(hotspot) => self.activate(&hotspot),
            OverlayEvent::Announce(text) => self.notices.info(text),
            OverlayEvent::Persisted {
                hotspot_id,
                created,
            } => {
                let verb = if created { "Added" } else { "Updated" };
                self.notices.info(format!("{} {}", verb, hotspot_id));
            }
            OverlayEvent::Discarded => self.notices.info("Too small; hotspot discarded"),
        }
        self.mark_dirty();
    }
}
