//! Message, key and mouse handling for the App.

use std::time::Instant;

use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use tracing::{debug, info, warn};

use super::{App, AppMessage};
use crate::clipboard;
use crate::hotspot_sync::SyncEvent;
use crate::input::Command;
use crate::overlay::{OverlayMode, Point, CELL_HEIGHT_PX, CELL_WIDTH_PX};
use crate::ui::interaction::{rect_contains, ClickAction};

impl App {
    /// Handle an incoming async message.
    /// All message handlers mark the app as dirty since they update visible state.
    pub fn handle_message(&mut self, msg: AppMessage) {
        self.mark_dirty();
        match msg {
            AppMessage::Loaded(prototype) => self.apply_prototype(*prototype),
            AppMessage::LoadFailed(error) => self.apply_load_error(error),
            AppMessage::CaptureFinished(Ok(path)) => {
                self.notices.info(format!("Saved {}", path.display()));
            }
            AppMessage::CaptureFinished(Err(e)) if e.is_refusal() => {
                debug!("Capture refused: {}", e);
                self.notices.warn(e.user_message());
            }
            AppMessage::CaptureFinished(Err(e)) => {
                warn!("[{}] {}", e.error_code(), e);
                self.notices.error(e.user_message());
            }
            AppMessage::HotspotsSynced(event) => self.apply_sync_event(event),
        }
    }

    fn apply_sync_event(&mut self, event: SyncEvent) {
        match event {
            SyncEvent::Changed {
                screen_id,
                hotspots,
            } => {
                self.store.replace_screen(&screen_id, hotspots);
                self.overlay.refresh();
                self.notices.info(format!("Reloaded hotspots for {}", screen_id));
            }
            SyncEvent::Removed { screen_id } => {
                self.notices.warn(format!(
                    "Hotspot file for {} removed; keeping loaded hotspots",
                    screen_id
                ));
            }
            SyncEvent::Failed { screen_id, message } => {
                self.notices
                    .error(format!("Hotspots for {} not reloaded: {}", screen_id, message));
            }
        }
    }

    /// Drop expired notices. Returns `true` when something changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let expired = self.notices.expire(now);
        if expired {
            self.mark_dirty();
        }
        expired
    }

    // ========================================================================
    // Keyboard
    // ========================================================================

    /// Route a key press. The open virtual keyboard sees it first; global
    /// bindings get whatever it does not consume.
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if let Some(outcome) = self.keyboard.handle_key_event(&key) {
            self.apply_key_outcome(outcome);
            return;
        }
        if let Some(command) = self.keybindings.lookup(&key) {
            self.execute_command(command);
        }
    }

    pub fn execute_command(&mut self, command: Command) {
        debug!("Command {}", command.label());
        self.mark_dirty();

        // Before load only quitting, dismissing and exporting make sense.
        if !self.is_ready()
            && !matches!(command, Command::Quit | Command::Dismiss | Command::Export)
        {
            return;
        }

        match command {
            Command::Quit => self.should_quit = true,
            Command::Dismiss => self.dismiss(),
            Command::NextScreen => {
                self.next_screen();
            }
            Command::PreviousScreen => {
                self.previous_screen();
            }
            Command::FocusNext => {
                if let Some(event) = self.overlay.focus_next(self.session.input_values()) {
                    self.apply_overlay_event(event);
                }
            }
            Command::FocusPrevious => {
                if let Some(event) = self.overlay.focus_previous(self.session.input_values()) {
                    self.apply_overlay_event(event);
                }
            }
            Command::ActivateFocused => {
                if let Some(event) = self.overlay.activate_focused() {
                    self.apply_overlay_event(event);
                }
            }
            Command::ToggleAuthorMode => {
                let mode = self.overlay.toggle_mode();
                self.pointer_down = false;
                info!("Switched to {} mode", mode.label());
                self.notices.info(format!("{} mode", mode.label()));
            }
            Command::Capture => self.pending_capture = true,
            Command::Export => {
                let export = clipboard::export(self.store.serialize());
                self.notices.info(export.summary());
                self.export = Some(export);
            }
        }
    }

    /// Close the topmost transient surface.
    fn dismiss(&mut self) {
        if self.export.take().is_some() {
            return;
        }
        if self.notices.dismiss_banner() {
            return;
        }
        if self.keyboard.is_visible() {
            let outcome = self.keyboard.press(crate::keyboard::VirtualKey::Escape);
            self.apply_key_outcome(outcome);
        }
    }

    // ========================================================================
    // Mouse
    // ========================================================================

    /// Canvas pixel point under a terminal cell. Cells left of or above
    /// the canvas give negative coordinates.
    pub fn canvas_point(&self, column: u16, row: u16) -> Point {
        let canvas = self.layout.canvas;
        let col = f64::from(column) - f64::from(canvas.x);
        let row = f64::from(row) - f64::from(canvas.y);
        Point::new(
            col * CELL_WIDTH_PX + CELL_WIDTH_PX / 2.0,
            row * CELL_HEIGHT_PX + CELL_HEIGHT_PX / 2.0,
        )
    }

    fn in_canvas(&self, column: u16, row: u16) -> bool {
        rect_contains(self.layout.canvas, column, row)
    }

    pub fn handle_mouse_event(&mut self, event: MouseEvent) {
        let (column, row) = (event.column, event.row);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(action) = self.hit_areas.hit_test(column, row) {
                    self.handle_click(action);
                    return;
                }
                if !self.is_ready() || !self.in_canvas(column, row) {
                    return;
                }
                self.pointer_down = true;
                let point = self.canvas_point(column, row);
                if let Some(event) = self.overlay.pointer_down(point) {
                    self.apply_overlay_event(event);
                }
                self.mark_dirty();
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if self.pointer_down {
                    let point = self.canvas_point(column, row);
                    if self.overlay.pointer_drag(point) {
                        self.mark_dirty();
                    }
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if !std::mem::take(&mut self.pointer_down) {
                    return;
                }
                let point = self.canvas_point(column, row);
                if let Some(event) = self.overlay.pointer_up(point, &mut self.store) {
                    self.apply_overlay_event(event);
                }
                self.mark_dirty();
            }
            MouseEventKind::Moved => {
                let mut changed = self.hit_areas.update_hover(column, row);
                if self.overlay.mode() == OverlayMode::Run {
                    changed |= if self.in_canvas(column, row) {
                        let point = self.canvas_point(column, row);
                        self.overlay.pointer_move(point)
                    } else {
                        self.overlay.pointer_leave()
                    };
                }
                if changed {
                    self.mark_dirty();
                }
            }
            _ => {}
        }
    }

    fn handle_click(&mut self, action: ClickAction) {
        match action {
            ClickAction::Key(key) => {
                let outcome = self.keyboard.press(key);
                self.apply_key_outcome(outcome);
            }
            ClickAction::Command(command) => self.execute_command(command),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{prototype, ready_app};
    use super::*;
    use crate::error::{CaptureError, LoadError};
    use crate::keyboard::VirtualKey;
    use crate::models::{Hotspot, PercentBox};
    use crate::startup::AppConfig;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::layout::Rect;
    use std::path::PathBuf;
    use std::time::Duration;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_loaded_message_applies_prototype() {
        let mut app = App::new(AppConfig::default());
        app.handle_message(AppMessage::Loaded(Box::new(prototype())));
        assert!(app.is_ready());
        assert_eq!(app.navigator.current_screen_id(), Some("login"));
    }

    #[test]
    fn test_load_failed_message() {
        let mut app = App::new(AppConfig::default());
        app.handle_message(AppMessage::LoadFailed(LoadError::NotFound {
            asset: "hotspots.json".to_string(),
        }));
        assert!(app.notices.banner().is_some());
        app.execute_command(Command::Dismiss);
        assert!(app.notices.banner().is_none());
    }

    #[test]
    fn test_capture_refusal_is_warning() {
        let mut app = ready_app();
        app.handle_message(AppMessage::CaptureFinished(Err(CaptureError::Debounced {
            remaining: Duration::from_millis(100),
        })));
        let notice = app.notices.current(Instant::now()).unwrap();
        assert_eq!(notice.level, crate::notice::NoticeLevel::Warning);

        app.handle_message(AppMessage::CaptureFinished(Ok(PathBuf::from("/tmp/a.png"))));
        let notice = app.notices.current(Instant::now()).unwrap();
        assert!(notice.text.contains("/tmp/a.png"));
    }

    #[test]
    fn test_sync_changed_replaces_active_screen() {
        let mut app = ready_app();
        let hotspot = Hotspot::new("fresh", PercentBox::new(5.0, 5.0, 10.0, 10.0), "navigate")
            .with_target("home");
        app.handle_message(AppMessage::HotspotsSynced(SyncEvent::Changed {
            screen_id: "login".to_string(),
            hotspots: vec![hotspot],
        }));
        assert_eq!(app.overlay.shapes().len(), 1);
        assert!(app.overlay.shape("fresh").is_some());
    }

    #[test]
    fn test_sync_removed_keeps_hotspots() {
        let mut app = ready_app();
        app.handle_message(AppMessage::HotspotsSynced(SyncEvent::Removed {
            screen_id: "login".to_string(),
        }));
        assert_eq!(app.store.hotspots_for("login").len(), 3);
    }

    #[test]
    fn test_keyboard_consumes_typing_keys() {
        let mut app = ready_app();
        let mst = app.store.active_hotspot("mst").unwrap();
        app.activate(&mst);
        // 'q' would quit if the keyboard did not see it first; the number
        // pad has no 'q', so it is swallowed without editing.
        app.handle_key_event(key(KeyCode::Char('q')));
        assert!(!app.should_quit);
        assert_eq!(app.session.value("mst"), "");
        app.handle_key_event(key(KeyCode::Char('7')));
        assert_eq!(app.session.value("mst"), "7");

        app.handle_key_event(key(KeyCode::Enter));
        assert!(!app.keyboard.is_visible());
        app.handle_key_event(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_while_typing() {
        let mut app = ready_app();
        let mst = app.store.active_hotspot("mst").unwrap();
        app.activate(&mst);
        app.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_arrow_keys_move_between_screens() {
        let mut app = ready_app();
        app.handle_key_event(key(KeyCode::Right));
        assert_eq!(app.navigator.current_screen_id(), Some("home"));
        app.handle_key_event(key(KeyCode::Left));
        assert_eq!(app.navigator.current_screen_id(), Some("login"));
    }

    #[test]
    fn test_commands_wait_for_load() {
        let mut app = App::new(AppConfig::default());
        app.execute_command(Command::NextScreen);
        app.execute_command(Command::Capture);
        assert!(!app.pending_capture);
    }

    #[test]
    fn test_focus_then_activate() {
        let mut app = ready_app();
        app.execute_command(Command::FocusNext);
        assert_eq!(app.overlay.focused(), Some("mst"));
        app.execute_command(Command::ActivateFocused);
        assert!(app.keyboard.is_visible());
    }

    #[test]
    fn test_export_opens_panel() {
        let mut app = ready_app();
        app.execute_command(Command::Export);
        let export = app.export.as_ref().unwrap();
        assert!(export.json.contains("login_btn"));
        app.execute_command(Command::Dismiss);
        assert!(app.export.is_none());
    }

    #[test]
    fn test_click_activates_hotspot_in_run_mode() {
        let mut app = ready_app();
        // mst spans x 10%..90%, y 30%..36% of an 80x40 cell canvas
        app.handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 40, 13));
        app.handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 40, 13));
        assert_eq!(
            app.keyboard.state().active_field.as_deref(),
            Some("mst")
        );
    }

    #[test]
    fn test_click_on_keyboard_key() {
        let mut app = ready_app();
        let mst = app.store.active_hotspot("mst").unwrap();
        app.activate(&mst);
        app.hit_areas.register(
            Rect::new(0, 45, 4, 1),
            ClickAction::Key(VirtualKey::Char('7')),
        );
        app.handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 1, 45));
        assert_eq!(app.session.value("mst"), "7");
    }

    #[test]
    fn test_author_draw_creates_hotspot() {
        let mut app = ready_app();
        app.execute_command(Command::ToggleAuthorMode);
        app.go_to("profile");
        app.handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 10, 10));
        app.handle_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left), 20, 15));
        app.handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 20, 15));
        assert_eq!(app.store.hotspots_for("profile").len(), 1);
        assert_eq!(app.overlay.shapes().len(), 1);
    }

    #[test]
    fn test_canvas_point_offsets() {
        let mut app = ready_app();
        app.set_canvas(Rect::new(10, 2, 40, 20));
        assert_eq!(app.canvas_point(10, 2), Point::new(4.0, 8.0));
        assert_eq!(app.canvas_point(0, 0), Point::new(-76.0, -24.0));
    }

    #[test]
    fn test_tick_expires_notice() {
        let mut app = ready_app();
        app.notices.info("hello");
        app.needs_redraw = false;
        assert!(!app.tick(Instant::now()));
        assert!(app.tick(Instant::now() + crate::notice::NOTICE_TTL));
        assert!(app.needs_redraw);
    }
}
