//! Navigation methods for the App.

use tracing::{debug, warn};

use super::App;
use crate::error::{ErrorContext, NavigationError, ProtoError};

impl App {
    /// Go to a screen by id. Failures become a notice.
    pub fn go_to(&mut self, screen_id: &str) -> bool {
        if !self.workflow.can_navigate_to(screen_id) {
            // Advisory only: prototypes often link outside the step graph.
            debug!(
                "{} is not a next step of {}",
                screen_id,
                self.workflow.current_step()
            );
        }
        let result = self.navigator.navigate_to(screen_id).map(|_| ());
        self.after_move(result)
    }

    /// Step to the next screen in list order.
    pub fn next_screen(&mut self) -> bool {
        let result = self.navigator.next().map(|_| ());
        self.after_move(result)
    }

    /// Step to the previous screen in list order.
    pub fn previous_screen(&mut self) -> bool {
        let result = self.navigator.previous().map(|_| ());
        self.after_move(result)
    }

    fn after_move(&mut self, result: Result<(), NavigationError>) -> bool {
        match result {
            Ok(()) => {
                self.sync_active_screen();
                true
            }
            Err(e) => {
                let mut context = ErrorContext::new("navigate").with_component("navigator");
                if let Some(screen_id) = self.navigator.current_screen_id() {
                    context = context.with_screen_id(screen_id);
                }
                let report = ProtoError::from(e).with_context(context);
                warn!("[{}] {}", report.error_code(), report);
                self.notices.warn(report.user_message());
                self.mark_dirty();
                false
            }
        }
    }

    /// Point the store, the workflow and the overlay at the navigator's
    /// current screen. An open keyboard is committed and closed.
    pub(crate) fn sync_active_screen(&mut self) {
        let Some(screen_id) = self.navigator.current_screen_id().map(str::to_string) else {
            return;
        };
        if self.keyboard.is_visible() {
            let state = self.keyboard.state();
            if let Some(field) = state.active_field.as_deref() {
                self.session.commit(field, &state.current_value);
            }
            self.keyboard.hide();
        }
        self.store.set_active_screen(&screen_id);
        self.workflow.set_current_step(&screen_id);
        self.overlay.refresh();
        self.mark_dirty();
    }
}
