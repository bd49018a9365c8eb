//! Percent ⇄ pixel projection.

use crate::models::PercentBox;

/// Smallest width or height, in pixels, a drawn rectangle may have.
pub const MIN_SHAPE_SIZE: f64 = 5.0;

/// Pixels per terminal cell, horizontally.
pub const CELL_WIDTH_PX: f64 = 8.0;
/// Pixels per terminal cell, vertically.
pub const CELL_HEIGHT_PX: f64 = 16.0;

/// Size of the canvas in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Canvas covering `cols` x `rows` terminal cells.
    pub fn from_cells(cols: u16, rows: u16) -> Self {
        Self::new(cols as f64 * CELL_WIDTH_PX, rows as f64 * CELL_HEIGHT_PX)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Pull a point inside the canvas.
    pub fn clamp(&self, point: Point) -> Point {
        Point {
            x: point.x.clamp(0.0, self.width.max(0.0)),
            y: point.y.clamp(0.0, self.height.max(0.0)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Centre of the cell at `col`, `row` relative to the canvas origin.
    pub fn cell_center(col: u16, row: u16) -> Self {
        Self {
            x: (col as f64 + 0.5) * CELL_WIDTH_PX,
            y: (row as f64 + 0.5) * CELL_HEIGHT_PX,
        }
    }
}

/// Axis-aligned pixel box. Width and height are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle spanned by two corners in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// `true` when `point` lies within `reach` of the bottom-right corner.
    pub fn near_corner(&self, point: Point, reach: f64) -> bool {
        (point.x - self.right()).abs() <= reach && (point.y - self.bottom()).abs() <= reach
    }

    pub fn is_below_minimum(&self) -> bool {
        self.width < MIN_SHAPE_SIZE || self.height < MIN_SHAPE_SIZE
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Shift the box so it lies inside the viewport, keeping its size where
    /// possible.
    pub fn kept_inside(&self, viewport: Viewport) -> Self {
        let width = self.width.min(viewport.width);
        let height = self.height.min(viewport.height);
        Self {
            x: self.x.clamp(0.0, (viewport.width - width).max(0.0)),
            y: self.y.clamp(0.0, (viewport.height - height).max(0.0)),
            width,
            height,
        }
    }
}

/// Percent geometry → pixel box for a viewport.
pub fn project(geometry: PercentBox, viewport: Viewport) -> PixelRect {
    PixelRect {
        x: geometry.x * viewport.width / 100.0,
        y: geometry.y * viewport.height / 100.0,
        width: geometry.width * viewport.width / 100.0,
        height: geometry.height * viewport.height / 100.0,
    }
}

/// Pixel box → percent geometry for a viewport.
pub fn unproject(rect: PixelRect, viewport: Viewport) -> PercentBox {
    if viewport.is_empty() {
        return PercentBox::new(0.0, 0.0, 0.0, 0.0);
    }
    PercentBox {
        x: rect.x * 100.0 / viewport.width,
        y: rect.y * 100.0 / viewport.height,
        width: rect.width * 100.0 / viewport.width,
        height: rect.height * 100.0 / viewport.height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_and_back() {
        let viewport = Viewport::new(400.0, 800.0);
        let rect = project(PercentBox::new(10.0, 25.0, 50.0, 12.5), viewport);
        assert_eq!(rect, PixelRect::new(40.0, 200.0, 200.0, 100.0));
        assert_eq!(unproject(rect, viewport), PercentBox::new(10.0, 25.0, 50.0, 12.5));
    }

    #[test]
    fn test_from_corners_normalizes_every_direction() {
        let expected = PixelRect::new(50.0, 50.0, 50.0, 50.0);
        let a = Point::new(50.0, 50.0);
        let b = Point::new(100.0, 100.0);
        assert_eq!(PixelRect::from_corners(a, b), expected);
        assert_eq!(PixelRect::from_corners(b, a), expected);
        assert_eq!(
            PixelRect::from_corners(Point::new(100.0, 50.0), Point::new(50.0, 100.0)),
            expected
        );
        assert_eq!(
            PixelRect::from_corners(Point::new(50.0, 100.0), Point::new(100.0, 50.0)),
            expected
        );
    }

    #[test]
    fn test_minimum_size() {
        assert!(PixelRect::new(0.0, 0.0, 4.9, 100.0).is_below_minimum());
        assert!(PixelRect::new(0.0, 0.0, 100.0, 4.0).is_below_minimum());
        assert!(!PixelRect::new(0.0, 0.0, 5.0, 5.0).is_below_minimum());
    }

    #[test]
    fn test_near_corner() {
        let rect = PixelRect::new(10.0, 10.0, 100.0, 50.0);
        assert!(rect.near_corner(Point::new(108.0, 62.0), 6.0));
        assert!(!rect.near_corner(Point::new(60.0, 35.0), 6.0));
    }

    #[test]
    fn test_kept_inside() {
        let viewport = Viewport::new(100.0, 100.0);
        let rect = PixelRect::new(80.0, -10.0, 40.0, 20.0).kept_inside(viewport);
        assert_eq!(rect, PixelRect::new(60.0, 0.0, 40.0, 20.0));
    }

    #[test]
    fn test_cell_mapping() {
        assert_eq!(Viewport::from_cells(40, 20), Viewport::new(320.0, 320.0));
        assert_eq!(Point::cell_center(0, 0), Point::new(4.0, 8.0));
        assert_eq!(Point::cell_center(3, 2), Point::new(28.0, 40.0));
    }

    #[test]
    fn test_unproject_empty_viewport() {
        let rect = PixelRect::new(1.0, 1.0, 1.0, 1.0);
        assert_eq!(unproject(rect, Viewport::new(0.0, 0.0)), PercentBox::new(0.0, 0.0, 0.0, 0.0));
    }
}
