//! UI rendering for the prototyping canvas.
//!
//! One frame is, back to front:
//! - the phone frame and the current screen ([`screen_view`])
//! - hotspot shapes and the draft rectangle ([`overlay_view`])
//! - the virtual keyboard when open ([`keyboard_view`])
//! - the status bar with clickable buttons ([`status_bar`])
//! - the load-error banner and the export panel ([`panels`])
//!
//! Rendering records the canvas and keyboard areas on the [`App`] so mouse
//! input and captures use the geometry that was actually drawn.

pub mod interaction;
pub mod keyboard_view;
pub mod layout;
pub mod overlay_view;
pub mod panels;
pub mod screen_view;
pub mod status_bar;
pub mod theme;

pub use layout::PhoneLayout;

use ratatui::{
    layout::Alignment,
    style::Style,
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use theme::COLOR_DIM;

// ============================================================================
// Main UI Rendering
// ============================================================================

pub fn render(frame: &mut Frame, app: &mut App) {
    app.hit_areas.clear();
    let area = frame.area();

    let Some(layout) = PhoneLayout::compute(area) else {
        frame.render_widget(
            Paragraph::new("Terminal too small")
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .style(Style::default().fg(COLOR_DIM)),
            area,
        );
        return;
    };
    app.set_canvas(layout.canvas);

    screen_view::render(frame, &layout, app);
    overlay_view::render(frame, layout.canvas, &app.overlay);

    if app.keyboard.is_visible() {
        let rows = app.keyboard.key_rows().len() as u16;
        let keyboard_area = layout.keyboard(rows);
        app.set_keyboard_area(Some(keyboard_area));
        keyboard_view::render(frame, keyboard_area, &app.keyboard, &mut app.hit_areas);
    } else {
        app.set_keyboard_area(None);
    }

    status_bar::render(frame, layout.status, app);

    if let Some(error) = app.notices.banner() {
        panels::render_banner(frame, area, error);
    }
    if let Some(export) = &app.export {
        panels::render_export(frame, area, export);
    }
}
