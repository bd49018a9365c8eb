//! What a capture reads: the last rendered frame and its named regions.

use std::collections::BTreeMap;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;

use crate::overlay::PixelRect;

/// Region name of the phone canvas.
pub const SCREEN_TARGET: &str = "screen";

/// Copy of a rendered frame, cheap enough to hand to a capture task.
#[derive(Debug, Clone, Default)]
pub struct FrameSnapshot {
    pub buffer: Buffer,
    regions: BTreeMap<String, Rect>,
    /// Overlay shapes in canvas pixels, keyed by region name.
    outlines: BTreeMap<String, Vec<PixelRect>>,
}

/// A resolved capture target.
#[derive(Debug, Clone)]
pub struct CaptureTarget<'a> {
    pub name: &'a str,
    pub area: Rect,
    pub buffer: &'a Buffer,
    pub outlines: &'a [PixelRect],
}

impl FrameSnapshot {
    pub fn new(buffer: Buffer) -> Self {
        Self {
            buffer,
            regions: BTreeMap::new(),
            outlines: BTreeMap::new(),
        }
    }

    /// Name a rectangle of the frame.
    pub fn add_region(&mut self, name: &str, area: Rect) {
        self.regions.insert(name.to_string(), area);
    }

    /// Attach overlay outlines to a named region.
    pub fn set_outlines(&mut self, name: &str, outlines: Vec<PixelRect>) {
        self.outlines.insert(name.to_string(), outlines);
    }

    pub fn region(&self, name: &str) -> Option<Rect> {
        self.regions.get(name).copied()
    }

    /// Resolve a target by name. Empty regions do not count.
    pub fn target<'a>(&'a self, name: &'a str) -> Option<CaptureTarget<'a>> {
        let area = self.region(name)?.intersection(self.buffer.area);
        if area.width == 0 || area.height == 0 {
            return None;
        }
        Some(CaptureTarget {
            name,
            area,
            buffer: &self.buffer,
            outlines: self.outlines.get(name).map(Vec::as_slice).unwrap_or(&[]),
        })
    }
}

/// Terminal colour → RGB. `Reset` resolves to `default`.
pub fn to_rgb(color: Color, default: [u8; 3]) -> [u8; 3] {
    match color {
        Color::Reset => default,
        Color::Black => [0, 0, 0],
        Color::Red => [205, 49, 49],
        Color::Green => [13, 188, 121],
        Color::Yellow => [229, 229, 16],
        Color::Blue => [36, 114, 200],
        Color::Magenta => [188, 63, 188],
        Color::Cyan => [17, 168, 205],
        Color::Gray => [204, 204, 204],
        Color::DarkGray => [102, 102, 102],
        Color::LightRed => [241, 76, 76],
        Color::LightGreen => [35, 209, 139],
        Color::LightYellow => [245, 245, 67],
        Color::LightBlue => [59, 142, 234],
        Color::LightMagenta => [214, 112, 214],
        Color::LightCyan => [41, 184, 219],
        Color::White => [255, 255, 255],
        Color::Rgb(r, g, b) => [r, g, b],
        Color::Indexed(i) => indexed_to_rgb(i),
    }
}

fn indexed_to_rgb(index: u8) -> [u8; 3] {
    const BASE: [Color; 16] = [
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
        Color::Gray,
        Color::DarkGray,
        Color::LightRed,
        Color::LightGreen,
        Color::LightYellow,
        Color::LightBlue,
        Color::LightMagenta,
        Color::LightCyan,
        Color::White,
    ];
    match index {
        0..=15 => to_rgb(BASE[index as usize], [0, 0, 0]),
        16..=231 => {
            let i = index - 16;
            let level = |v: u8| if v == 0 { 0 } else { 55 + v * 40 };
            [level(i / 36), level((i / 6) % 6), level(i % 6)]
        }
        _ => {
            let v = 8 + (index - 232) * 10;
            [v, v, v]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_resolution() {
        let mut frame = FrameSnapshot::new(Buffer::empty(Rect::new(0, 0, 20, 10)));
        frame.add_region(SCREEN_TARGET, Rect::new(2, 1, 10, 5));
        frame.add_region("offscreen", Rect::new(50, 50, 5, 5));

        let target = frame.target(SCREEN_TARGET).unwrap();
        assert_eq!(target.area, Rect::new(2, 1, 10, 5));
        assert!(target.outlines.is_empty());
        assert!(frame.target("offscreen").is_none());
        assert!(frame.target("missing").is_none());
    }

    #[test]
    fn test_indexed_colors() {
        assert_eq!(to_rgb(Color::Indexed(16), [9, 9, 9]), [0, 0, 0]);
        assert_eq!(to_rgb(Color::Indexed(231), [9, 9, 9]), [255, 255, 255]);
        assert_eq!(to_rgb(Color::Indexed(232), [9, 9, 9]), [8, 8, 8]);
        assert_eq!(to_rgb(Color::Indexed(1), [9, 9, 9]), to_rgb(Color::Red, [0, 0, 0]));
        assert_eq!(to_rgb(Color::Reset, [9, 9, 9]), [9, 9, 9]);
    }
}
