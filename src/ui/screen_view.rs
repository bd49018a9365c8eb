//! The phone frame and the current screen.
//!
//! A terminal cannot show the screen image itself, so the canvas shows the
//! screen's identity: id, source and type. Scrollable screens get their
//! pinned header band.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::layout::PhoneLayout;
use super::theme::{
    COLOR_ACCENT, COLOR_BORDER, COLOR_CANVAS_BG, COLOR_DIM, COLOR_HEADER, COLOR_PINNED_BG,
};
use crate::app::{App, LoadState};
use crate::models::{parse_percent, Screen, ScreenType};

pub fn render(frame: &mut Frame, layout: &PhoneLayout, app: &App) {
    let title = app
        .navigator
        .current_screen()
        .map(|s| format!(" {} ", s.id))
        .unwrap_or_default();
    let position = if app.navigator.screens().is_empty() {
        String::new()
    } else {
        format!(
            " {}/{} ",
            app.navigator.current_index() + 1,
            app.navigator.screens().len()
        )
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(Span::styled(
            title,
            Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Line::from(Span::styled(position, Style::default().fg(COLOR_DIM))).right_aligned());
    frame.render_widget(block, layout.frame);

    let canvas = layout.canvas;
    frame.render_widget(
        Block::default().style(Style::default().bg(COLOR_CANVAS_BG)),
        canvas,
    );

    let placeholder = match app.load_state {
        LoadState::Loading => "Loading prototype…",
        LoadState::Failed => "Nothing to show",
        LoadState::Ready => match app.navigator.current_screen() {
            Some(screen) => return render_screen(frame, canvas, screen),
            None => "No screens",
        },
    };
    centered_lines(frame, canvas, vec![Line::from(dim(placeholder))]);
}

fn render_screen(frame: &mut Frame, canvas: Rect, screen: &Screen) {
    if let Some(rows) = pinned_rows(screen, canvas.height) {
        let band = Rect::new(canvas.x, canvas.y, canvas.width, rows);
        frame.render_widget(
            Paragraph::new(Line::from(dim("pinned header")))
                .alignment(Alignment::Right)
                .style(Style::default().bg(COLOR_PINNED_BG)),
            band,
        );
    }

    let kind = match screen.screen_type {
        Some(ScreenType::Scrollable) => "scrollable",
        Some(ScreenType::Static) => "static",
        None => "untyped",
    };
    let lines = vec![
        Line::from(Span::styled(
            screen.id.clone(),
            Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(dim(&screen.src)),
        Line::from(dim(kind)),
    ];
    centered_lines(frame, canvas, lines);
}

/// Rows covered by a scrollable screen's pinned header.
pub fn pinned_rows(screen: &Screen, canvas_rows: u16) -> Option<u16> {
    if !screen.is_scrollable() {
        return None;
    }
    let percent = screen
        .pinned_header_height
        .as_deref()
        .and_then(parse_percent)?;
    let rows = (f64::from(canvas_rows) * percent / 100.0).round() as u16;
    (rows > 0).then_some(rows.min(canvas_rows))
}

fn dim(text: &str) -> Span<'static> {
    Span::styled(text.to_string(), Style::default().fg(COLOR_DIM))
}

fn centered_lines(frame: &mut Frame, area: Rect, lines: Vec<Line<'static>>) {
    let height = (lines.len() as u16).min(area.height);
    let y = area.y + (area.height - height) / 2;
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        Rect::new(area.x, y, area.width, height),
    );
}
