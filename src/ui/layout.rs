//! Phone frame layout.
//!
//! The canvas keeps a phone's portrait proportions in pixels. With 8x16
//! pixel cells that makes it a little narrower in columns than it is tall
//! in rows. The status bar takes the bottom rows of the terminal; the
//! virtual keyboard, when open, covers the bottom of the canvas the way a
//! real one covers the screen.

use ratatui::layout::Rect;

use crate::overlay::{CELL_HEIGHT_PX, CELL_WIDTH_PX};

/// Width / height of a typical phone screen.
pub const PHONE_ASPECT: f64 = 9.0 / 19.5;

/// Rows of the status bar.
pub const STATUS_HEIGHT: u16 = 2;

/// Rows above the key rows: the border and the value line.
pub const KEYBOARD_CHROME: u16 = 2;

/// Terminals smaller than this get a "too small" message instead.
pub const MIN_WIDTH: u16 = 24;
pub const MIN_HEIGHT: u16 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhoneLayout {
    /// Frame around the canvas, borders included
    pub frame: Rect,
    /// Drawable screen area inside the frame
    pub canvas: Rect,
    pub status: Rect,
}

impl PhoneLayout {
    /// Lay out a terminal area. `None` when it is too small to be useful.
    pub fn compute(area: Rect) -> Option<Self> {
        if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
            return None;
        }
        let status = Rect::new(
            area.x,
            area.bottom() - STATUS_HEIGHT,
            area.width,
            STATUS_HEIGHT,
        );
        let main_height = area.height - STATUS_HEIGHT;

        let inner_height = main_height.saturating_sub(2);
        let inner_width = canvas_columns(inner_height).min(area.width.saturating_sub(2));
        let frame_width = inner_width + 2;
        let frame = Rect::new(
            area.x + (area.width - frame_width) / 2,
            area.y,
            frame_width,
            main_height,
        );
        let canvas = Rect::new(frame.x + 1, frame.y + 1, inner_width, inner_height);
        Some(Self {
            frame,
            canvas,
            status,
        })
    }

    /// Keyboard area for `key_rows` rows of keys, anchored to the canvas
    /// bottom and never taller than the canvas.
    pub fn keyboard(&self, key_rows: u16) -> Rect {
        let height = (key_rows + KEYBOARD_CHROME).min(self.canvas.height);
        Rect::new(
            self.canvas.x,
            self.canvas.bottom() - height,
            self.canvas.width,
            height,
        )
    }
}

/// Canvas width in columns for a height in rows.
pub fn canvas_columns(rows: u16) -> u16 {
    let pixels_high = f64::from(rows) * CELL_HEIGHT_PX;
    ((pixels_high * PHONE_ASPECT) / CELL_WIDTH_PX).round() as u16
}
