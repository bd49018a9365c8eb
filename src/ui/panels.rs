//! Load-error banner and the export panel.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_HEADER};
use crate::clipboard::Export;
use crate::error::LoadError;

/// Banner across the top of the terminal.
pub fn render_banner(frame: &mut Frame, area: Rect, error: &LoadError) {
    if area.height == 0 {
        return;
    }
    let row = Rect::new(area.x, area.y, area.width, 1);
    let line = Line::from(vec![
        Span::styled(
            " Could not load the prototype: ",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(error.user_message()),
        Span::raw("  [Esc] "),
    ]);
    frame.render_widget(Clear, row);
    frame.render_widget(
        Paragraph::new(line).style(Style::default().fg(COLOR_ACCENT).bg(COLOR_ERROR)),
        row,
    );
}

/// Centered dialog; returns its content area.
pub fn dialog(frame: &mut Frame, area: Rect, title: &str, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = (height + 2).min(area.height);
    let dialog = Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    );
    frame.render_widget(Clear, dialog);
    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER));
    let inner = block.inner(dialog);
    frame.render_widget(block, dialog);
    inner
}

/// The serialized hotspot map with the clipboard outcome.
pub fn render_export(frame: &mut Frame, area: Rect, export: &Export) {
    let width = area.width.saturating_mul(3) / 4;
    let height = area.height.saturating_mul(3) / 4;
    let inner = dialog(frame, area, "Hotspots", width, height);
    if inner.height < 2 {
        return;
    }

    let header = Line::from(vec![
        Span::styled(export.summary(), Style::default().fg(COLOR_ACCENT)),
        Span::styled("  [Esc] close", Style::default().fg(COLOR_DIM)),
    ]);
    frame.render_widget(Paragraph::new(header), Rect::new(inner.x, inner.y, inner.width, 1));

    let body = Rect::new(inner.x, inner.y + 1, inner.width, inner.height - 1);
    let lines: Vec<Line> = export
        .json
        .lines()
        .take(body.height as usize)
        .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(COLOR_DIM))))
        .collect();
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), body);
}
