//! Two-row status bar below the phone.
//!
//! ```text
//!  RUN  login 1/3 · static · next: home            Tax code must be 9 digits
//!  [← prev] [→ next] [a mode] [c capture] [x export] [q quit]
//! ```

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::time::Instant;
use unicode_width::UnicodeWidthStr;

use super::theme::{notice_color, COLOR_ACCENT, COLOR_AUTHOR, COLOR_DIM, COLOR_RUN};
use crate::app::App;
use crate::input::Command;
use crate::models::ScreenType;
use crate::overlay::OverlayMode;
use crate::ui::interaction::ClickAction;

/// Commands shown as buttons, in display order.
pub const BUTTONS: [Command; 6] = [
    Command::PreviousScreen,
    Command::NextScreen,
    Command::ToggleAuthorMode,
    Command::Capture,
    Command::Export,
    Command::Quit,
];

/// Left half of the info row.
pub fn info_spans(app: &App) -> Vec<Span<'static>> {
    let mode = app.overlay.mode();
    let badge_color = match mode {
        OverlayMode::Run => COLOR_RUN,
        OverlayMode::Author => COLOR_AUTHOR,
    };
    let mut spans = vec![Span::styled(
        format!(" {} ", mode.label()),
        Style::default()
            .fg(ratatui::style::Color::Black)
            .bg(badge_color)
            .add_modifier(Modifier::BOLD),
    )];

    let Some(screen) = app.navigator.current_screen() else {
        return spans;
    };
    let kind = match screen.screen_type {
        Some(ScreenType::Scrollable) => "scrollable",
        _ => "static",
    };
    spans.push(Span::styled(
        format!(" {} ", screen.id),
        Style::default().fg(COLOR_ACCENT),
    ));
    spans.push(Span::styled(
        format!(
            "{}/{} · {}",
            app.navigator.current_index() + 1,
            app.navigator.screens().len(),
            kind
        ),
        Style::default().fg(COLOR_DIM),
    ));
    let next = app.workflow.next_steps();
    if !next.is_empty() {
        spans.push(Span::styled(
            format!(" · next: {}", next.join(", ")),
            Style::default().fg(COLOR_DIM),
        ));
    }
    if app.capture.is_capturing() {
        spans.push(Span::styled(" · capturing…", Style::default().fg(COLOR_DIM)));
    }
    spans
}

pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
    if area.height == 0 {
        return;
    }
    let info_row = Rect::new(area.x, area.y, area.width, 1);
    frame.render_widget(Paragraph::new(Line::from(info_spans(app))), info_row);

    if let Some(notice) = app.notices.current(Instant::now()) {
        let width = (notice.text.width() as u16 + 1).min(area.width);
        let notice_area = Rect::new(area.right() - width, area.y, width, 1);
        frame.render_widget(
            Paragraph::new(Span::styled(
                notice.text.clone(),
                Style::default().fg(notice_color(notice.level)),
            )),
            notice_area,
        );
    }

    if area.height < 2 {
        return;
    }
    let mut x = area.x + 1;
    let y = area.y + 1;
    for command in BUTTONS {
        let key = app
            .keybindings
            .key_for(command)
            .map(|k| k.label())
            .unwrap_or_default();
        let text = format!("[{} {}]", key, command.label());
        let width = text.width() as u16;
        if x + width > area.right() {
            break;
        }
        let rect = Rect::new(x, y, width, 1);
        let style = if app.hit_areas.is_hovered(rect) {
            Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::REVERSED)
        } else {
            Style::default().fg(COLOR_DIM)
        };
        frame.render_widget(Paragraph::new(Span::styled(text, style)), rect);
        app.hit_areas.register(rect, ClickAction::Command(command));
        x += width + 1;
    }
}
