//! On-screen keyboard.
//!
//! Keys in a row share the row width; the space bar and the layer keys are
//! wider. Every key is registered as a hit area so clicks reach
//! [`KeyboardController::press`](crate::keyboard::KeyboardController::press).

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::theme::{
    COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_KEY, COLOR_KEYBOARD_BG, COLOR_KEY_HOVER,
    COLOR_KEY_SPECIAL,
};
use crate::keyboard::{KeyboardController, VirtualKey};
use crate::models::InputType;
use crate::ui::interaction::{ClickAction, HitAreaRegistry};

/// Relative width of a key.
fn key_weight(key: VirtualKey) -> u16 {
    match key {
        VirtualKey::Space => 5,
        VirtualKey::Char(_) => 1,
        _ => 2,
    }
}

/// Mask a password value.
fn display_value(value: &str, input_type: InputType) -> String {
    if input_type == InputType::Password {
        "•".repeat(value.chars().count())
    } else {
        value.to_string()
    }
}

pub fn render(
    frame: &mut Frame,
    area: Rect,
    keyboard: &KeyboardController,
    registry: &mut HitAreaRegistry,
) {
    let state = keyboard.state();
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(COLOR_BORDER))
        .style(Style::default().bg(COLOR_KEYBOARD_BG));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let field = state.active_field.as_deref().unwrap_or_default();
    let value_line = if state.current_value.is_empty() {
        Line::from(vec![
            Span::styled(format!("{}: ", field), Style::default().fg(COLOR_DIM)),
            Span::styled(state.placeholder.clone(), Style::default().fg(COLOR_DIM).add_modifier(Modifier::ITALIC)),
        ])
    } else {
        Line::from(vec![
            Span::styled(format!("{}: ", field), Style::default().fg(COLOR_DIM)),
            Span::styled(
                display_value(&state.current_value, state.input_type),
                Style::default().fg(COLOR_ACCENT),
            ),
            Span::styled("▏", Style::default().fg(COLOR_ACCENT)),
        ])
    };
    frame.render_widget(
        Paragraph::new(value_line),
        Rect::new(inner.x, inner.y, inner.width, 1),
    );

    let rows = keyboard.key_rows();
    let keys_area = Rect::new(
        inner.x,
        inner.y + 1,
        inner.width,
        inner.height.saturating_sub(1),
    );
    let row_areas = Layout::vertical(vec![Constraint::Length(1); rows.len()]).split(keys_area);

    for (row, row_area) in rows.iter().zip(row_areas.iter()) {
        let constraints: Vec<Constraint> = row
            .iter()
            .map(|k| Constraint::Fill(key_weight(*k)))
            .collect();
        let cells = Layout::horizontal(constraints).spacing(1).split(*row_area);
        for (key, cell) in row.iter().zip(cells.iter()) {
            if cell.width == 0 || cell.height == 0 {
                continue;
            }
            let bg = if registry.is_hovered(*cell) {
                COLOR_KEY_HOVER
            } else if key.is_special() {
                COLOR_KEY_SPECIAL
            } else {
                COLOR_KEY
            };
            frame.render_widget(
                Paragraph::new(key.label(state.input_type))
                    .centered()
                    .style(Style::default().fg(COLOR_ACCENT).bg(bg)),
                *cell,
            );
            registry.register(*cell, ClickAction::Key(*key));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_password_is_masked() {
        assert_eq!(display_value("abc", InputType::Password), "•••");
        assert_eq!(display_value("abc", InputType::Text), "abc");
    }

    #[test]
    fn test_every_key_is_clickable() {
        let mut keyboard = KeyboardController::new();
        keyboard.show("mst", InputType::Number, "", "Tax code");
        let mut registry = HitAreaRegistry::new();
        let backend = TestBackend::new(40, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| render(f, Rect::new(0, 0, 40, 5), &keyboard, &mut registry))
            .unwrap();

        let expected: usize = keyboard.key_rows().iter().map(Vec::len).sum();
        assert_eq!(registry.len(), expected);
        let seven = registry
            .areas()
            .iter()
            .find(|a| a.action == ClickAction::Key(VirtualKey::Char('7')))
            .unwrap();
        assert_eq!(
            registry.hit_test(seven.rect.x, seven.rect.y),
            Some(ClickAction::Key(VirtualKey::Char('7')))
        );
    }
}
