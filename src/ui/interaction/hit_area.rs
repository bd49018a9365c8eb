//! Hit area system for mouse interaction.
//!
//! Components register clickable regions while rendering; the event loop
//! asks the registry what a click at a cell means. The phone canvas itself
//! is not registered: clicks that miss every area go to the overlay.

use ratatui::layout::Rect;

use crate::input::Command;
use crate::keyboard::VirtualKey;

/// `true` when the cell at `x`, `y` lies inside `rect`.
#[inline]
pub fn rect_contains(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x
        && x < rect.x.saturating_add(rect.width)
        && y >= rect.y
        && y < rect.y.saturating_add(rect.height)
}

/// What a click on a hit area does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    /// A key of the on-screen keyboard
    Key(VirtualKey),
    /// A status-bar button
    Command(Command),
}

/// A clickable region with an associated action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitArea {
    pub rect: Rect,
    pub action: ClickAction,
}

impl HitArea {
    pub fn new(rect: Rect, action: ClickAction) -> Self {
        Self { rect, action }
    }

    /// Check if a point is within this hit area.
    #[inline]
    pub fn contains(&self, x: u16, y: u16) -> bool {
        rect_contains(self.rect, x, y)
    }
}

/// Registry of hit areas for the last rendered frame.
///
/// Cleared at the start of each render. Later registrations sit on top.
/// The pointer position survives a clear so the next render can style the
/// hovered area.
#[derive(Debug, Default)]
pub struct HitAreaRegistry {
    areas: Vec<HitArea>,
    pointer: Option<(u16, u16)>,
}

impl HitAreaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call this at the start of each render cycle.
    pub fn clear(&mut self) {
        self.areas.clear();
    }

    pub fn register(&mut self, rect: Rect, action: ClickAction) {
        self.areas.push(HitArea::new(rect, action));
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    pub fn areas(&self) -> &[HitArea] {
        &self.areas
    }

    /// Action of the topmost area containing the point.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<ClickAction> {
        self.find_index(x, y).map(|i| self.areas[i].action)
    }

    /// Track the pointer. Returns true if the hovered area changed.
    pub fn update_hover(&mut self, x: u16, y: u16) -> bool {
        let before = self.hovered().map(|a| a.rect);
        self.pointer = Some((x, y));
        before != self.hovered().map(|a| a.rect)
    }

    pub fn hovered(&self) -> Option<&HitArea> {
        let (x, y) = self.pointer?;
        self.find_index(x, y).map(|i| &self.areas[i])
    }

    /// `true` when the pointer is over `rect`, registered or not.
    pub fn is_hovered(&self, rect: Rect) -> bool {
        self.pointer.is_some_and(|(x, y)| rect_contains(rect, x, y))
    }

    fn find_index(&self, x: u16, y: u16) -> Option<usize> {
        self.areas.iter().rposition(|a| a.contains(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_edges() {
        let area = HitArea::new(
            Rect::new(2, 3, 4, 2),
            ClickAction::Command(Command::Capture),
        );
        assert!(area.contains(2, 3));
        assert!(area.contains(5, 4));
        assert!(!area.contains(6, 4));
        assert!(!area.contains(2, 5));
    }

    #[test]
    fn test_topmost_wins() {
        let mut registry = HitAreaRegistry::new();
        registry.register(Rect::new(0, 0, 10, 10), ClickAction::Command(Command::Export));
        registry.register(Rect::new(2, 2, 2, 2), ClickAction::Key(VirtualKey::Char('a')));
        assert_eq!(
            registry.hit_test(3, 3),
            Some(ClickAction::Key(VirtualKey::Char('a')))
        );
        assert_eq!(
            registry.hit_test(0, 0),
            Some(ClickAction::Command(Command::Export))
        );
        assert_eq!(registry.hit_test(20, 20), None);
    }

    #[test]
    fn test_hover_tracking() {
        let mut registry = HitAreaRegistry::new();
        let action = ClickAction::Command(Command::NextScreen);
        registry.register(Rect::new(0, 0, 4, 1), action);
        assert!(registry.update_hover(1, 0));
        assert!(registry.is_hovered(Rect::new(0, 0, 4, 1)));
        assert!(!registry.update_hover(2, 0));
        assert!(registry.update_hover(9, 9));
        assert!(registry.hovered().is_none());
    }

    #[test]
    fn test_clear_keeps_pointer() {
        let mut registry = HitAreaRegistry::new();
        registry.register(Rect::new(0, 0, 1, 1), ClickAction::Command(Command::Quit));
        registry.update_hover(0, 0);
        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.is_hovered(Rect::new(0, 0, 1, 1)));
    }
}
