//! Author-mode pointer gestures.

use super::geometry::{PixelRect, Point, Viewport, MIN_SHAPE_SIZE};

/// Action given to hotspots drawn on the canvas.
pub const DEFAULT_ACTION: &str = "navigate";
/// Target given to hotspots drawn on the canvas.
pub const DEFAULT_TARGET: &str = "dashboard";

/// Distance in pixels from the bottom-right corner that grabs the resize
/// handle of the selected shape.
pub const HANDLE_REACH: f64 = 12.0;

/// The gesture in progress between press and release.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    /// New rectangle anchored at the press point.
    Drawing { anchor: Point, current: Point },
    /// Moving an existing shape.
    Dragging {
        hotspot_id: String,
        grab: Point,
        origin: PixelRect,
    },
    /// Resizing an existing shape by its bottom-right handle.
    Resizing { hotspot_id: String, anchor: Point },
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }

    /// Rectangle being drawn, for previews.
    pub fn preview(&self) -> Option<PixelRect> {
        match self {
            Gesture::Drawing { anchor, current } => Some(PixelRect::from_corners(*anchor, *current)),
            _ => None,
        }
    }
}

/// Box of a dragged shape for the pointer's position.
pub fn dragged_rect(origin: PixelRect, grab: Point, pointer: Point, viewport: Viewport) -> PixelRect {
    origin
        .translated(pointer.x - grab.x, pointer.y - grab.y)
        .kept_inside(viewport)
}

/// Box of a resized shape: spanned by the fixed corner and the pointer,
/// never smaller than the minimum.
pub fn resized_rect(anchor: Point, pointer: Point, viewport: Viewport) -> PixelRect {
    let mut rect = PixelRect::from_corners(anchor, viewport.clamp(pointer));
    rect.width = rect.width.max(MIN_SHAPE_SIZE);
    rect.height = rect.height.max(MIN_SHAPE_SIZE);
    rect.kept_inside(viewport)
}
