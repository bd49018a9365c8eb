//! Application state and logic for the TUI.
//!
//! [`App`] owns every component of a prototyping session and is the only
//! place they talk to each other:
//! - [`HotspotStore`] holds the hotspot map and publishes the active list
//! - [`ScreenNavigator`] owns the current screen
//! - [`WorkflowGuard`] mirrors the current screen as the current step
//! - [`KeyboardController`] edits one input field at a time
//! - [`OverlayEngine`] turns pointer input into hotspot events
//! - [`CaptureService`] writes PNG captures of the canvas
//!
//! Background work reports back through [`AppMessage`].

mod actions;
mod handlers;
mod messages;
mod navigation;
mod session;

pub use messages::AppMessage;
pub use session::Session;

use std::sync::Arc;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::capture::{CaptureService, FrameSnapshot, SCREEN_TARGET};
use crate::clipboard::Export;
use crate::error::{ErrorContext, LoadError, ProtoError};
use crate::hotspot_sync::{spawn_hotspot_watcher, HotspotWatcher, STABILITY_WINDOW};
use crate::input::KeybindingConfig;
use crate::keyboard::KeyboardController;
use crate::navigator::ScreenNavigator;
use crate::notice::Notices;
use crate::overlay::{OverlayEngine, OverlayMode, Viewport};
use crate::startup::{load_prototype, AppConfig, Prototype};
use crate::store::HotspotStore;
use crate::traits::AssetLoader;
use crate::ui::interaction::HitAreaRegistry;
use crate::workflow::WorkflowGuard;

/// Region name of the on-screen keyboard in a frame snapshot.
pub const KEYBOARD_REGION: &str = "keyboard";
/// Region name of the whole terminal in a frame snapshot.
pub const FULL_REGION: &str = "full";

/// Where the startup load stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed,
}

/// Terminal areas recorded by the last render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutAreas {
    pub canvas: Rect,
    pub keyboard: Option<Rect>,
}

/// Main application state
pub struct App {
    pub config: AppConfig,
    pub store: HotspotStore,
    pub navigator: ScreenNavigator,
    pub workflow: WorkflowGuard,
    pub keyboard: KeyboardController,
    pub overlay: OverlayEngine,
    pub capture: Arc<CaptureService>,
    pub session: Session,
    pub notices: Notices,
    /// Clickable chrome registered during the last render
    pub hit_areas: HitAreaRegistry,
    pub keybindings: KeybindingConfig,
    pub load_state: LoadState,
    /// Last export, shown until dismissed
    pub export: Option<Export>,
    pub layout: LayoutAreas,
    /// A capture was requested; taken after the next draw
    pub pending_capture: bool,
    pub should_quit: bool,
    /// Dirty flag: set when state changes, cleared after a draw
    pub needs_redraw: bool,
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
    watcher: Option<HotspotWatcher>,
    pointer_down: bool,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("load_state", &self.load_state)
            .field("screen", &self.navigator.current_screen_id())
            .field("mode", &self.overlay.mode())
            .field("needs_redraw", &self.needs_redraw)
            .finish_non_exhaustive()
    }
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        let capture = Arc::new(CaptureService::new(config.capture_dir.clone()));
        let mut overlay = OverlayEngine::new();
        if config.author_mode {
            overlay.set_mode(OverlayMode::Author);
        }

        Self {
            config,
            store: HotspotStore::new(),
            navigator: ScreenNavigator::new(),
            workflow: WorkflowGuard::new(),
            keyboard: KeyboardController::new(),
            overlay,
            capture,
            session: Session::new(),
            notices: Notices::new(),
            hit_areas: HitAreaRegistry::new(),
            keybindings: KeybindingConfig::new(),
            load_state: LoadState::Loading,
            export: None,
            layout: LayoutAreas::default(),
            pending_capture: false,
            should_quit: false,
            needs_redraw: true,
            message_tx,
            message_rx: Some(message_rx),
            watcher: None,
            pointer_down: false,
        }
    }

    /// Replace the capture service, e.g. to point it at another directory.
    pub fn with_capture_service(mut self, capture: CaptureService) -> Self {
        self.capture = Arc::new(capture);
        self
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    /// Returns the dirty flag and clears it.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    pub fn is_ready(&self) -> bool {
        self.load_state == LoadState::Ready
    }

    // ========================================================================
    // Startup
    // ========================================================================

    /// Load the prototype in the background. The result arrives as
    /// [`AppMessage::Loaded`] or [`AppMessage::LoadFailed`].
    pub fn start_loading(&mut self, loader: Arc<dyn AssetLoader>) {
        self.load_state = LoadState::Loading;
        let tx = self.message_tx.clone();
        let config = self.config.clone();
        tokio::spawn(async move {
            let message = match load_prototype(loader, &config).await {
                Ok(prototype) => AppMessage::Loaded(Box::new(prototype)),
                Err(e) => AppMessage::LoadFailed(e),
            };
            let _ = tx.send(message);
        });
    }

    /// Install a loaded prototype and show its initial screen.
    pub fn apply_prototype(&mut self, prototype: Prototype) {
        let Prototype {
            screens,
            hotspots,
            workflow,
            merged_screens,
        } = prototype;

        self.store.load(hotspots);
        self.workflow.load(workflow);
        let initial = self.workflow.initial_screen().to_string();
        self.navigator.load(screens, &initial);
        self.overlay.start(&self.store);
        self.keyboard.start();
        self.load_state = LoadState::Ready;
        self.sync_active_screen();

        if !merged_screens.is_empty() {
            self.notices
                .info(format!("Merged hotspots for {}", merged_screens.join(", ")));
        }
        self.mark_dirty();
    }

    /// Show a load failure in the banner.
    pub fn apply_load_error(&mut self, error: LoadError) {
        let report = ProtoError::from(error.clone())
            .with_context(ErrorContext::new("load_prototype").with_component("startup"));
        warn!(
            "[{}] {}; {}",
            report.error_code(),
            report,
            report.recovery_hint()
        );
        self.load_state = LoadState::Failed;
        self.notices.set_banner(error);
        self.mark_dirty();
    }

    /// Watch the configured hotspot source directory. Must run inside a
    /// tokio runtime. Failure to watch is logged and shown, not fatal.
    pub fn start_watcher(&mut self) {
        let Some(dir) = self.config.hotspot_dir.clone() else {
            return;
        };
        let (sync_tx, mut sync_rx) = mpsc::unbounded_channel();
        match spawn_hotspot_watcher(&dir, STABILITY_WINDOW, sync_tx) {
            Ok(watcher) => {
                let tx = self.message_tx.clone();
                tokio::spawn(async move {
                    while let Some(event) = sync_rx.recv().await {
                        if tx.send(AppMessage::HotspotsSynced(event)).is_err() {
                            break;
                        }
                    }
                });
                self.watcher = Some(watcher);
            }
            Err(e) => {
                warn!("Hotspot watcher not started: {}", e);
                self.notices
                    .warn(format!("Not watching {}: {}", dir.display(), e));
            }
        }
    }

    pub fn is_watching(&self) -> bool {
        self.watcher.is_some()
    }

    // ========================================================================
    // Layout and capture
    // ========================================================================

    /// Record the canvas area and resize the overlay viewport to match.
    pub fn set_canvas(&mut self, canvas: Rect) {
        if self.layout.canvas == canvas {
            return;
        }
        self.layout.canvas = canvas;
        self.overlay
            .set_viewport(Viewport::from_cells(canvas.width, canvas.height));
    }

    pub fn set_keyboard_area(&mut self, area: Option<Rect>) {
        self.layout.keyboard = area;
    }

    /// Returns and clears the pending capture request.
    pub fn take_pending_capture(&mut self) -> bool {
        std::mem::take(&mut self.pending_capture)
    }

    /// Copy a rendered buffer with the regions a capture may target.
    pub fn build_snapshot(&self, buffer: &Buffer) -> FrameSnapshot {
        let mut frame = FrameSnapshot::new(buffer.clone());
        frame.add_region(FULL_REGION, buffer.area);
        frame.add_region(SCREEN_TARGET, self.layout.canvas);
        frame.set_outlines(
            SCREEN_TARGET,
            self.overlay.shapes().iter().map(|s| s.rect).collect(),
        );
        if let Some(area) = self.layout.keyboard {
            frame.add_region(KEYBOARD_REGION, area);
        }
        frame
    }

    /// Capture the canvas of `frame` in the background. The result arrives
    /// as [`AppMessage::CaptureFinished`].
    pub fn spawn_capture(&self, frame: FrameSnapshot) {
        let capture = Arc::clone(&self.capture);
        let tx = self.message_tx.clone();
        info!("Capture requested");
        tokio::spawn(async move {
            let result = capture.capture(SCREEN_TARGET, &frame).await;
            let _ = tx.send(AppMessage::CaptureFinished(result));
        });
    }
}
