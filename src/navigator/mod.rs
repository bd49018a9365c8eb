//! Screen navigator: the ordered screen list and the current index.
//!
//! The navigator is the only writer of the current index. Moves that fail
//! leave the index untouched and report why through [`NavigationError`].

pub mod probe;

pub use probe::{classify_dimensions, infer_screen_types, PROBE_TIMEOUT};

use tokio::sync::watch;
use tracing::{debug, info};

use crate::error::{NavigationError, StepDirection};
use crate::models::Screen;
use crate::signal::Signal;

#[derive(Debug, Default)]
pub struct ScreenNavigator {
    screens: Vec<Screen>,
    index: Signal<usize>,
    loaded: bool,
}

impl ScreenNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the screen list and jump to `initial_screen` when it names a
    /// loaded screen, else to the first one.
    pub fn load(&mut self, screens: Vec<Screen>, initial_screen: &str) {
        let initial = screens
            .iter()
            .position(|s| s.id == initial_screen)
            .unwrap_or(0);
        info!(
            "Loaded {} screens, starting at {} ({})",
            screens.len(),
            initial,
            initial_screen
        );
        self.screens = screens;
        self.loaded = true;
        self.index.set(initial);
    }

    /// `true` once [`load`](Self::load) has run.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn screens(&self) -> &[Screen] {
        &self.screens
    }

    pub fn current_index(&self) -> usize {
        *self.index.borrow()
    }

    /// The current screen, `None` while the list is empty.
    pub fn current_screen(&self) -> Option<&Screen> {
        self.screens.get(self.current_index())
    }

    pub fn current_screen_id(&self) -> Option<&str> {
        self.current_screen().map(|s| s.id.as_str())
    }

    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.index.subscribe()
    }

    /// Jump to an index. Out-of-range indices are ignored and `false`
    /// returned.
    pub fn set_current_index(&mut self, index: usize) -> bool {
        if index >= self.screens.len() {
            debug!("Ignoring out-of-range index {}", index);
            return false;
        }
        self.index.set(index);
        true
    }

    /// Go to the screen with the given id.
    pub fn navigate_to(&mut self, screen_id: &str) -> Result<usize, NavigationError> {
        self.ensure_loaded()?;
        let index = self
            .screens
            .iter()
            .position(|s| s.id == screen_id)
            .ok_or_else(|| NavigationError::ScreenNotFound {
                screen_id: screen_id.to_string(),
            })?;
        info!("Navigating to {} (index {})", screen_id, index);
        self.index.set(index);
        Ok(index)
    }

    /// Step forward. Refused on scrollable screens and at the end.
    pub fn next(&mut self) -> Result<usize, NavigationError> {
        self.step(StepDirection::Next)
    }

    /// Step back. Refused on scrollable screens and at the start.
    pub fn previous(&mut self) -> Result<usize, NavigationError> {
        self.step(StepDirection::Previous)
    }

    pub fn is_scrollable_screen(&self) -> bool {
        self.current_screen().is_some_and(Screen::is_scrollable)
    }

    fn step(&mut self, direction: StepDirection) -> Result<usize, NavigationError> {
        self.ensure_loaded()?;
        let Some(screen) = self.current_screen() else {
            return Err(NavigationError::AtBoundary { direction });
        };
        if screen.is_scrollable() {
            return Err(NavigationError::ScrollableScreen {
                screen_id: screen.id.clone(),
            });
        }

        let current = self.current_index();
        let target = match direction {
            StepDirection::Next if current + 1 < self.screens.len() => current + 1,
            StepDirection::Previous if current > 0 => current - 1,
            _ => return Err(NavigationError::AtBoundary { direction }),
        };
        debug!("Stepping {} to index {}", direction, target);
        self.index.set(target);
        Ok(target)
    }

    fn ensure_loaded(&self) -> Result<(), NavigationError> {
        if self.loaded {
            Ok(())
        } else {
            Err(NavigationError::NotReady)
        }
    }
}
