//! Canvas overlay engine.
//!
//! Projects the store's active hotspot list onto the canvas as pixel-space
//! shapes and turns pointer and focus input into overlay events. Shapes are
//! rebuilt from the store on every publication or viewport change; they
//! are never written back except through [`HotspotStore::add_hotspot`] and
//! [`HotspotStore::update_hotspot`].
//!
//! Two exclusive modes:
//!
//! - **Run**: hover highlights, press activates the hotspot under the
//!   pointer, Tab-style focus traversal announces hotspots.
//! - **Author**: press-drag on empty canvas draws a new hotspot, pressing a
//!   shape selects and drags it, pressing the selected shape's corner
//!   handle resizes it.

pub mod authoring;
pub mod geometry;
pub mod shape;

pub use authoring::{Gesture, DEFAULT_ACTION, DEFAULT_TARGET, HANDLE_REACH};
pub use geometry::{
    project, unproject, PixelRect, Point, Viewport, CELL_HEIGHT_PX, CELL_WIDTH_PX, MIN_SHAPE_SIZE,
};
pub use shape::{Emphasis, Shape, ShapeLayer};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::models::{Hotspot, InputValues};
use crate::store::HotspotStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverlayMode {
    #[default]
    Run,
    Author,
}

impl OverlayMode {
    pub fn label(&self) -> &'static str {
        match self {
            OverlayMode::Run => "RUN",
            OverlayMode::Author => "AUTHOR",
        }
    }
}

/// What the host should react to.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayEvent {
    /// A hotspot was clicked or activated from focus. Carries the store's
    /// record.
    Activated(Hotspot),
    /// Focus moved; text describing the focused hotspot.
    Announce(String),
    /// A drawn, moved or resized shape was written to the store.
    Persisted { hotspot_id: String, created: bool },
    /// A drawn rectangle was too small and was dropped.
    Discarded,
}

#[derive(Debug, Default)]
pub struct OverlayEngine {
    mode: OverlayMode,
    viewport: Option<Viewport>,
    layer: ShapeLayer,
    hotspots: Vec<Hotspot>,
    subscription: Option<watch::Receiver<Vec<Hotspot>>>,
    hovered: Option<String>,
    focused: Option<String>,
    selected: Option<String>,
    gesture: Gesture,
}

impl OverlayEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to the store's active list and project it.
    pub fn start(&mut self, store: &HotspotStore) {
        let mut rx = store.subscribe();
        self.hotspots = rx.borrow_and_update().clone();
        self.subscription = Some(rx);
        self.rebuild();
        debug!("Overlay started with {} hotspots", self.hotspots.len());
    }

    /// Release the subscription and every shape.
    pub fn stop(&mut self) {
        self.subscription = None;
        self.hotspots.clear();
        self.layer.clear();
        self.hovered = None;
        self.focused = None;
        self.selected = None;
        self.gesture = Gesture::Idle;
        debug!("Overlay stopped");
    }

    pub fn is_started(&self) -> bool {
        self.subscription.is_some()
    }

    /// Pick up a new publication if there is one. Returns `true` when the
    /// shapes were rebuilt.
    pub fn refresh(&mut self) -> bool {
        let Some(rx) = self.subscription.as_mut() else {
            return false;
        };
        if !rx.has_changed().unwrap_or(false) {
            return false;
        }
        self.hotspots = rx.borrow_and_update().clone();
        self.rebuild();
        true
    }

    /// Change the canvas size and re-project.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if self.viewport == Some(viewport) {
            return;
        }
        self.viewport = Some(viewport);
        self.gesture = Gesture::Idle;
        self.rebuild();
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn mode(&self) -> OverlayMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: OverlayMode) {
        if self.mode == mode {
            return;
        }
        info!("Overlay mode -> {}", mode.label());
        self.mode = mode;
        self.gesture = Gesture::Idle;
        self.hovered = None;
        self.selected = None;
        self.apply_flags();
    }

    pub fn toggle_mode(&mut self) -> OverlayMode {
        let next = match self.mode {
            OverlayMode::Run => OverlayMode::Author,
            OverlayMode::Author => OverlayMode::Run,
        };
        self.set_mode(next);
        next
    }

    pub fn shapes(&self) -> &[Shape] {
        self.layer.shapes()
    }

    pub fn shape(&self, hotspot_id: &str) -> Option<&Shape> {
        self.layer.get(hotspot_id)
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// `true` while the pointer is over an activatable shape in run mode.
    pub fn cursor_is_pointer(&self) -> bool {
        self.mode == OverlayMode::Run && self.hovered.is_some()
    }

    // ========================================================================
    // Pointer input
    // ========================================================================

    /// Pointer moved without a button held. Returns `true` when the hover
    /// state changed.
    pub fn pointer_move(&mut self, point: Point) -> bool {
        if self.mode != OverlayMode::Run {
            return false;
        }
        let hovered = self.layer.hit(point).map(|s| s.hotspot_id.clone());
        if hovered == self.hovered {
            return false;
        }
        self.hovered = hovered;
        self.apply_flags();
        true
    }

    /// Pointer left the canvas.
    pub fn pointer_leave(&mut self) -> bool {
        if self.hovered.take().is_some() {
            self.apply_flags();
            return true;
        }
        false
    }

    /// Button pressed on the canvas.
    pub fn pointer_down(&mut self, point: Point) -> Option<OverlayEvent> {
        let viewport = self.viewport?;
        match self.mode {
            OverlayMode::Run => {
                let id = self.layer.hit(point)?.hotspot_id.clone();
                let hotspot = self.record(&id)?;
                debug!("Hotspot {} activated by pointer", id);
                Some(OverlayEvent::Activated(hotspot))
            }
            OverlayMode::Author => {
                let point = viewport.clamp(point);
                self.begin_gesture(point);
                None
            }
        }
    }

    /// Pointer moved with the button held. Returns `true` when something
    /// visible changed.
    pub fn pointer_drag(&mut self, point: Point) -> bool {
        let Some(viewport) = self.viewport else {
            return false;
        };
        match &mut self.gesture {
            Gesture::Idle => false,
            Gesture::Drawing { current, .. } => {
                *current = viewport.clamp(point);
                true
            }
            Gesture::Dragging {
                hotspot_id,
                grab,
                origin,
            } => {
                let rect = authoring::dragged_rect(*origin, *grab, point, viewport);
                let id = hotspot_id.clone();
                self.move_shape(&id, rect)
            }
            Gesture::Resizing { hotspot_id, anchor } => {
                let rect = authoring::resized_rect(*anchor, point, viewport);
                let id = hotspot_id.clone();
                self.move_shape(&id, rect)
            }
        }
    }

    /// Button released. Finishes the author gesture and writes it to the
    /// store.
    pub fn pointer_up(&mut self, point: Point, store: &mut HotspotStore) -> Option<OverlayEvent> {
        let viewport = self.viewport?;
        let gesture = std::mem::take(&mut self.gesture);
        match gesture {
            Gesture::Idle => None,
            Gesture::Drawing { anchor, .. } => {
                let rect = PixelRect::from_corners(anchor, viewport.clamp(point));
                if rect.is_below_minimum() {
                    debug!(
                        "Discarding {:.1}x{:.1} rectangle below minimum size",
                        rect.width, rect.height
                    );
                    return Some(OverlayEvent::Discarded);
                }
                self.persist_new(rect, viewport, store)
            }
            Gesture::Dragging {
                hotspot_id,
                grab,
                origin,
            } => {
                let rect = authoring::dragged_rect(origin, grab, point, viewport);
                if rect == origin {
                    return None;
                }
                self.persist_geometry(&hotspot_id, rect, viewport, store)
            }
            Gesture::Resizing { hotspot_id, anchor } => {
                let rect = authoring::resized_rect(anchor, point, viewport);
                self.persist_geometry(&hotspot_id, rect, viewport, store)
            }
        }
    }

    /// Rectangle currently being drawn.
    pub fn draft(&self) -> Option<PixelRect> {
        self.gesture.preview()
    }

    // ========================================================================
    // Focus traversal
    // ========================================================================

    /// Focus the next hotspot, wrapping at the end.
    pub fn focus_next(&mut self, input_values: &InputValues) -> Option<OverlayEvent> {
        self.move_focus(1, input_values)
    }

    /// Focus the previous hotspot, wrapping at the start.
    pub fn focus_previous(&mut self, input_values: &InputValues) -> Option<OverlayEvent> {
        self.move_focus(-1, input_values)
    }

    /// Activate the focused hotspot.
    pub fn activate_focused(&self) -> Option<OverlayEvent> {
        let id = self.focused.as_deref()?;
        let hotspot = self.record(id)?;
        debug!("Hotspot {} activated from focus", id);
        Some(OverlayEvent::Activated(hotspot))
    }

    fn move_focus(&mut self, step: isize, input_values: &InputValues) -> Option<OverlayEvent> {
        let count = self.layer.len();
        if count == 0 {
            return None;
        }
        let current = self
            .focused
            .as_deref()
            .and_then(|id| self.layer.position(id));
        let next = match current {
            Some(i) => (i as isize + step).rem_euclid(count as isize) as usize,
            None if step >= 0 => 0,
            None => count - 1,
        };
        let id = self.layer.at(next)?.hotspot_id.clone();
        self.focused = Some(id.clone());
        self.apply_flags();
        let hotspot = self.record(&id)?;
        Some(OverlayEvent::Announce(hotspot.describe(input_values)))
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn record(&self, hotspot_id: &str) -> Option<Hotspot> {
        self.hotspots.iter().find(|h| h.id == hotspot_id).cloned()
    }

    fn begin_gesture(&mut self, point: Point) {
        if let Some(selected) = self.selected.clone() {
            if let Some(shape) = self.layer.get(&selected) {
                if shape.rect.near_corner(point, HANDLE_REACH) {
                    debug!("Resizing {}", selected);
                    self.gesture = Gesture::Resizing {
                        hotspot_id: selected,
                        anchor: Point::new(shape.rect.x, shape.rect.y),
                    };
                    return;
                }
            }
        }

        match self.layer.hit(point) {
            Some(shape) => {
                let id = shape.hotspot_id.clone();
                self.gesture = Gesture::Dragging {
                    hotspot_id: id.clone(),
                    grab: point,
                    origin: shape.rect,
                };
                self.select(Some(id));
            }
            None => {
                self.select(None);
                self.gesture = Gesture::Drawing {
                    anchor: point,
                    current: point,
                };
            }
        }
    }

    fn select(&mut self, hotspot_id: Option<String>) {
        if self.selected != hotspot_id {
            debug!("Selection -> {:?}", hotspot_id);
            self.selected = hotspot_id;
            self.apply_flags();
        }
    }

    fn move_shape(&mut self, hotspot_id: &str, rect: PixelRect) -> bool {
        match self.layer.get_mut(hotspot_id) {
            Some(shape) if shape.rect != rect => {
                shape.rect = rect;
                true
            }
            _ => false,
        }
    }

    fn persist_new(
        &mut self,
        rect: PixelRect,
        viewport: Viewport,
        store: &mut HotspotStore,
    ) -> Option<OverlayEvent> {
        let Some(screen_id) = store.active_screen().map(str::to_string) else {
            warn!("No active screen, dropping drawn hotspot");
            return None;
        };
        let id = store.next_hotspot_id(&screen_id);
        let hotspot =
            Hotspot::new(id.clone(), unproject(rect, viewport), DEFAULT_ACTION).with_target(DEFAULT_TARGET);
        info!("Created hotspot {} on {}", id, screen_id);
        store.add_hotspot(&screen_id, hotspot);
        self.refresh();
        self.select(Some(id.clone()));
        Some(OverlayEvent::Persisted {
            hotspot_id: id,
            created: true,
        })
    }

    fn persist_geometry(
        &mut self,
        hotspot_id: &str,
        rect: PixelRect,
        viewport: Viewport,
        store: &mut HotspotStore,
    ) -> Option<OverlayEvent> {
        let screen_id = store.active_screen()?.to_string();
        let mut hotspot = store
            .hotspots_for(&screen_id)
            .iter()
            .find(|h| h.id == hotspot_id)
            .cloned()?;
        hotspot.set_geometry(unproject(rect, viewport));
        if !store.update_hotspot(&screen_id, hotspot) {
            return None;
        }
        self.refresh();
        Some(OverlayEvent::Persisted {
            hotspot_id: hotspot_id.to_string(),
            created: false,
        })
    }

    fn rebuild(&mut self) {
        self.layer.clear();
        if let Some(viewport) = self.viewport {
            for hotspot in &self.hotspots {
                if let Some(geometry) = hotspot.geometry() {
                    self.layer.push(Shape::new(hotspot.id.clone(), project(geometry, viewport)));
                }
            }
        }
        if self.hovered.as_deref().is_some_and(|id| self.layer.get(id).is_none()) {
            self.hovered = None;
        }
        if self.focused.as_deref().is_some_and(|id| self.layer.get(id).is_none()) {
            self.focused = None;
        }
        if self.selected.as_deref().is_some_and(|id| self.layer.get(id).is_none()) {
            self.selected = None;
        }
        self.apply_flags();
    }

    fn apply_flags(&mut self) {
        let hovered = self.hovered.clone();
        let focused = self.focused.clone();
        let selected = self.selected.clone();
        for shape in self.layer.iter_mut() {
            shape.hovered = hovered.as_deref() == Some(shape.hotspot_id.as_str());
            shape.focused = focused.as_deref() == Some(shape.hotspot_id.as_str());
            shape.selected = selected.as_deref() == Some(shape.hotspot_id.as_str());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HotspotMap, PercentBox};

    fn store() -> HotspotStore {
        let mut map = HotspotMap::new();
        map.insert(
            "home".to_string(),
            vec![
                Hotspot::new("home_1", PercentBox::new(10.0, 10.0, 20.0, 10.0), "navigate")
                    .with_target("a"),
                Hotspot::new("home_2", PercentBox::new(50.0, 50.0, 20.0, 10.0), "navigate")
                    .with_target("b"),
            ],
        );
        let mut store = HotspotStore::new();
        store.load(map);
        store.set_active_screen("home");
        store
    }

    fn engine(store: &HotspotStore) -> OverlayEngine {
        let mut engine = OverlayEngine::new();
        engine.set_viewport(Viewport::new(1000.0, 1000.0));
        engine.start(store);
        engine
    }

    #[test]
    fn test_projects_active_list() {
        let store = store();
        let engine = engine(&store);
        assert_eq!(engine.shapes().len(), 2);
        assert_eq!(
            engine.shape("home_1").unwrap().rect,
            PixelRect::new(100.0, 100.0, 200.0, 100.0)
        );
    }

    #[test]
    fn test_viewport_change_reprojects() {
        let store = store();
        let mut engine = engine(&store);
        engine.set_viewport(Viewport::new(500.0, 2000.0));
        assert_eq!(
            engine.shape("home_1").unwrap().rect,
            PixelRect::new(50.0, 200.0, 100.0, 200.0)
        );
    }

    #[test]
    fn test_screen_switch_leaves_no_stale_shapes() {
        let mut store = store();
        let mut engine = engine(&store);
        store.set_active_screen("empty");
        assert!(engine.refresh());
        assert!(engine.shapes().is_empty());
    }

    #[test]
    fn test_hover_and_leave() {
        let store = store();
        let mut engine = engine(&store);
        assert!(engine.pointer_move(Point::new(150.0, 150.0)));
        assert_eq!(engine.hovered(), Some("home_1"));
        assert!(engine.cursor_is_pointer());
        assert_eq!(engine.shape("home_1").unwrap().emphasis(), Emphasis::Hovered);
        assert!(!engine.pointer_move(Point::new(160.0, 150.0)));

        assert!(engine.pointer_move(Point::new(900.0, 900.0)));
        assert_eq!(engine.hovered(), None);
        assert_eq!(engine.shape("home_1").unwrap().emphasis(), Emphasis::Normal);
    }

    #[test]
    fn test_click_activates_without_touching_geometry() {
        let mut store = store();
        let mut engine = engine(&store);
        let event = engine.pointer_down(Point::new(550.0, 550.0));
        match event {
            Some(OverlayEvent::Activated(h)) => assert_eq!(h.target.as_deref(), Some("b")),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(engine.pointer_up(Point::new(550.0, 550.0), &mut store), None);
        assert_eq!(store.hotspots_for("home")[1].x, "50%");
        assert!(engine.pointer_down(Point::new(990.0, 10.0)).is_none());
    }

    #[test]
    fn test_focus_wraps_and_announces() {
        let store = store();
        let mut engine = engine(&store);
        let values = InputValues::new();
        assert_eq!(
            engine.focus_next(&values),
            Some(OverlayEvent::Announce("Navigate to a".to_string()))
        );
        engine.focus_next(&values);
        assert_eq!(engine.focused(), Some("home_2"));
        engine.focus_next(&values);
        assert_eq!(engine.focused(), Some("home_1"));
        engine.focus_previous(&values);
        assert_eq!(engine.focused(), Some("home_2"));

        match engine.activate_focused() {
            Some(OverlayEvent::Activated(h)) => assert_eq!(h.id, "home_2"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_focus_previous_from_nothing_picks_last() {
        let store = store();
        let mut engine = engine(&store);
        engine.focus_previous(&InputValues::new());
        assert_eq!(engine.focused(), Some("home_2"));
    }

    #[test]
    fn test_draw_up_left_persists_normalized_box() {
        let mut store = store();
        let mut engine = engine(&store);
        engine.set_mode(OverlayMode::Author);

        engine.pointer_down(Point::new(100.0 + 800.0, 100.0 + 800.0));
        engine.pointer_drag(Point::new(870.0, 870.0));
        let event = engine.pointer_up(Point::new(850.0, 850.0), &mut store);

        assert_eq!(
            event,
            Some(OverlayEvent::Persisted {
                hotspot_id: "home_3".to_string(),
                created: true
            })
        );
        let shape = engine.shape("home_3").unwrap();
        assert_eq!(shape.rect, PixelRect::new(850.0, 850.0, 50.0, 50.0));
        assert!(shape.selected);

        let record = &store.hotspots_for("home")[2];
        assert_eq!(record.action, "navigate");
        assert_eq!(record.target.as_deref(), Some("dashboard"));
        assert_eq!(record.x, "85%");
        assert_eq!(record.width, "5%");
    }

    #[test]
    fn test_tiny_rectangle_is_discarded() {
        let mut store = store();
        let mut engine = engine(&store);
        engine.set_mode(OverlayMode::Author);
        engine.pointer_down(Point::new(900.0, 900.0));
        let event = engine.pointer_up(Point::new(903.0, 960.0), &mut store);
        assert_eq!(event, Some(OverlayEvent::Discarded));
        assert_eq!(store.hotspots_for("home").len(), 2);
    }

    #[test]
    fn test_drag_existing_shape_writes_back() {
        let mut store = store();
        let mut engine = engine(&store);
        engine.set_mode(OverlayMode::Author);

        engine.pointer_down(Point::new(150.0, 150.0));
        assert_eq!(engine.selected(), Some("home_1"));
        assert!(engine.pointer_drag(Point::new(250.0, 350.0)));
        let event = engine.pointer_up(Point::new(250.0, 350.0), &mut store);

        assert!(matches!(event, Some(OverlayEvent::Persisted { created: false, .. })));
        let record = &store.hotspots_for("home")[0];
        assert_eq!((record.x.as_str(), record.y.as_str()), ("20%", "30%"));
        assert_eq!(record.width, "20%");
    }

    #[test]
    fn test_resize_selected_by_handle() {
        let mut store = store();
        let mut engine = engine(&store);
        engine.set_mode(OverlayMode::Author);

        engine.pointer_down(Point::new(150.0, 150.0));
        engine.pointer_up(Point::new(150.0, 150.0), &mut store);

        engine.pointer_down(Point::new(298.0, 198.0));
        assert!(matches!(engine.gesture(), Gesture::Resizing { .. }));
        let event = engine.pointer_up(Point::new(400.0, 300.0), &mut store);

        assert!(matches!(event, Some(OverlayEvent::Persisted { created: false, .. })));
        let record = &store.hotspots_for("home")[0];
        assert_eq!((record.width.as_str(), record.height.as_str()), ("30%", "20%"));
    }

    #[test]
    fn test_single_selection() {
        let mut store = store();
        let mut engine = engine(&store);
        engine.set_mode(OverlayMode::Author);

        engine.pointer_down(Point::new(150.0, 150.0));
        engine.pointer_up(Point::new(150.0, 150.0), &mut store);
        engine.pointer_down(Point::new(550.0, 550.0));
        engine.pointer_up(Point::new(550.0, 550.0), &mut store);

        let selected: Vec<_> = engine.shapes().iter().filter(|s| s.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].hotspot_id, "home_2");
    }

    #[test]
    fn test_author_mode_does_not_activate() {
        let mut store = store();
        let mut engine = engine(&store);
        engine.set_mode(OverlayMode::Author);
        assert_eq!(engine.pointer_down(Point::new(150.0, 150.0)), None);
        assert_eq!(engine.pointer_up(Point::new(150.0, 150.0), &mut store), None);
    }

    #[test]
    fn test_stop_releases_subscription() {
        let store = store();
        let mut engine = engine(&store);
        assert_eq!(store.active_hotspots().len(), 2);
        engine.stop();
        assert!(!engine.is_started());
        assert!(engine.shapes().is_empty());
        assert!(!engine.refresh());
    }
}
