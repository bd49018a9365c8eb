//! Hotspot shapes drawn over the canvas.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders},
    Frame,
};

use super::theme::{shape_color, COLOR_DRAFT};
use crate::overlay::{Emphasis, OverlayEngine, OverlayMode, PixelRect, CELL_HEIGHT_PX, CELL_WIDTH_PX};

/// Corner handle drawn on the selected shape in author mode.
const HANDLE: &str = "◢";

/// Cells covered by a pixel rectangle, clipped to the canvas.
pub fn cell_rect(rect: PixelRect, canvas: Rect) -> Option<Rect> {
    let left = (rect.x / CELL_WIDTH_PX).floor().max(0.0);
    let top = (rect.y / CELL_HEIGHT_PX).floor().max(0.0);
    let right = (rect.right() / CELL_WIDTH_PX).ceil().min(f64::from(canvas.width));
    let bottom = (rect.bottom() / CELL_HEIGHT_PX).ceil().min(f64::from(canvas.height));
    if right <= left || bottom <= top {
        return None;
    }
    Some(Rect::new(
        canvas.x + left as u16,
        canvas.y + top as u16,
        (right - left) as u16,
        (bottom - top) as u16,
    ))
}

pub fn render(frame: &mut Frame, canvas: Rect, overlay: &OverlayEngine) {
    for shape in overlay.shapes() {
        let Some(area) = cell_rect(shape.rect, canvas) else {
            continue;
        };
        let emphasis = shape.emphasis();
        let mut style = Style::default().fg(shape_color(emphasis));
        if emphasis != Emphasis::Normal {
            style = style.add_modifier(Modifier::BOLD);
        }
        let border_type = match emphasis {
            Emphasis::Selected | Emphasis::Focused => BorderType::Thick,
            _ => BorderType::Rounded,
        };
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(border_type)
            .border_style(style);
        if area.width > 4 {
            block = block.title(Span::styled(shape.hotspot_id.clone(), style));
        }
        frame.render_widget(block, area);

        if shape.selected && overlay.mode() == OverlayMode::Author {
            let corner = Rect::new(area.right() - 1, area.bottom() - 1, 1, 1);
            frame.render_widget(Span::styled(HANDLE, style), corner);
        }
    }

    if let Some(draft) = overlay.draft().and_then(|r| cell_rect(r, canvas)) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Plain)
            .border_style(Style::default().fg(COLOR_DRAFT).add_modifier(Modifier::DIM));
        frame.render_widget(block, draft);
    }
}
