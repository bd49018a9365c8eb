//! Ways of turning a capture target into pixels.

use async_trait::async_trait;
use image::{Rgba, RgbaImage};

use super::frame::{to_rgb, CaptureTarget};
use crate::overlay::{CELL_HEIGHT_PX, CELL_WIDTH_PX};

/// Largest image either strategy will produce, in pixels.
pub const MAX_CAPTURE_PIXELS: u64 = 64 * 1024 * 1024;

const CANVAS_BACKGROUND: [u8; 3] = [0, 0, 0];
const DEFAULT_FOREGROUND: [u8; 3] = [230, 230, 230];
const OUTLINE_COLOR: [u8; 3] = [0, 122, 255];

/// One way of rasterizing a target.
#[async_trait]
pub trait CaptureStrategy: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Produce the image, or a reason it could not.
    async fn render(&self, target: &CaptureTarget<'_>) -> Result<RgbaImage, String>;
}

/// Pixel size of a target at the fixed cell scale.
pub fn image_size(target: &CaptureTarget<'_>) -> Result<(u32, u32), String> {
    let width = target.area.width as u32 * CELL_WIDTH_PX as u32;
    let height = target.area.height as u32 * CELL_HEIGHT_PX as u32;
    if width == 0 || height == 0 {
        return Err("empty capture area".to_string());
    }
    if width as u64 * height as u64 > MAX_CAPTURE_PIXELS {
        return Err(format!("capture area {}x{} too large", width, height));
    }
    Ok((width, height))
}

/// Paints every cell of the rendered buffer: background colour for the
/// whole cell, a foreground mark where the cell holds a glyph.
#[derive(Debug, Default, Clone, Copy)]
pub struct CellRasterizer;

#[async_trait]
impl CaptureStrategy for CellRasterizer {
    fn name(&self) -> &'static str {
        "cells"
    }

    async fn render(&self, target: &CaptureTarget<'_>) -> Result<RgbaImage, String> {
        let (width, height) = image_size(target)?;
        let cell_w = CELL_WIDTH_PX as u32;
        let cell_h = CELL_HEIGHT_PX as u32;
        let mut img = RgbaImage::new(width, height);

        for row in 0..target.area.height {
            for col in 0..target.area.width {
                let position = (target.area.x + col, target.area.y + row);
                let Some(cell) = target.buffer.cell(position) else {
                    return Err(format!("cell {:?} outside the frame", position));
                };
                let bg = to_rgb(cell.bg, CANVAS_BACKGROUND);
                let fg = to_rgb(cell.fg, DEFAULT_FOREGROUND);
                let has_glyph = !cell.symbol().trim().is_empty();

                let x0 = col as u32 * cell_w;
                let y0 = row as u32 * cell_h;
                for dy in 0..cell_h {
                    for dx in 0..cell_w {
                        let in_mark = has_glyph
                            && (cell_w / 4..cell_w - cell_w / 4).contains(&dx)
                            && (cell_h / 4..cell_h - cell_h / 4).contains(&dy);
                        let [r, g, b] = if in_mark { fg } else { bg };
                        img.put_pixel(x0 + dx, y0 + dy, Rgba([r, g, b, 255]));
                    }
                }
            }
        }
        Ok(img)
    }
}

/// Draws only the hotspot outlines on a plain background. Used when the
/// buffer cannot be read.
#[derive(Debug, Default, Clone, Copy)]
pub struct OutlineRasterizer;

#[async_trait]
impl CaptureStrategy for OutlineRasterizer {
    fn name(&self) -> &'static str {
        "outlines"
    }

    async fn render(&self, target: &CaptureTarget<'_>) -> Result<RgbaImage, String> {
        let (width, height) = image_size(target)?;
        let [r, g, b] = CANVAS_BACKGROUND;
        let mut img = RgbaImage::from_pixel(width, height, Rgba([r, g, b, 255]));
        let [r, g, b] = OUTLINE_COLOR;
        let stroke = Rgba([r, g, b, 255]);

        for rect in target.outlines {
            let left = rect.x.max(0.0) as u32;
            let top = rect.y.max(0.0) as u32;
            let right = (rect.right().max(0.0) as u32).min(width - 1);
            let bottom = (rect.bottom().max(0.0) as u32).min(height - 1);
            if left > right || top > bottom {
                continue;
            }
            for x in left..=right {
                img.put_pixel(x, top, stroke);
                img.put_pixel(x, bottom, stroke);
            }
            for y in top..=bottom {
                img.put_pixel(left, y, stroke);
                img.put_pixel(right, y, stroke);
            }
        }
        Ok(img)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::frame::FrameSnapshot;
    use crate::overlay::PixelRect;
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;
    use ratatui::style::Color;

    fn frame() -> FrameSnapshot {
        let mut buffer = Buffer::empty(Rect::new(0, 0, 4, 2));
        buffer[(1, 0)].set_symbol("A").set_fg(Color::White).set_bg(Color::Blue);
        let mut frame = FrameSnapshot::new(buffer);
        frame.add_region("screen", Rect::new(0, 0, 4, 2));
        frame.set_outlines("screen", vec![PixelRect::new(0.0, 0.0, 8.0, 8.0)]);
        frame
    }

    #[tokio::test]
    async fn test_cell_rasterizer_paints_cells() {
        let frame = frame();
        let target = frame.target("screen").unwrap();
        let img = CellRasterizer.render(&target).await.unwrap();
        assert_eq!(img.dimensions(), (32, 32));
        // Background of the blue cell, corner pixel.
        assert_eq!(img.get_pixel(8, 0).0, [36, 114, 200, 255]);
        // Glyph mark in its middle.
        assert_eq!(img.get_pixel(12, 8).0, [255, 255, 255, 255]);
        // Untouched cell uses the canvas background.
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
    }

    #[tokio::test]
    async fn test_outline_rasterizer_draws_box() {
        let frame = frame();
        let target = frame.target("screen").unwrap();
        let img = OutlineRasterizer.render(&target).await.unwrap();
        assert_eq!(img.get_pixel(0, 0).0, [0, 122, 255, 255]);
        assert_eq!(img.get_pixel(8, 4).0, [0, 122, 255, 255]);
        assert_eq!(img.get_pixel(4, 4).0, [0, 0, 0, 255]);
    }
}
