//! Color theme constants for the prototyping UI.
//!
//! Defines the minimal dark palette used by the phone frame, the overlay
//! and the chrome around them.

use ratatui::style::Color;

use crate::notice::NoticeLevel;
use crate::overlay::Emphasis;

// ============================================================================
// Chrome
// ============================================================================

/// Phone frame and panel borders
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Highlights and important elements
pub const COLOR_ACCENT: Color = Color::White;

/// Panel titles
pub const COLOR_HEADER: Color = Color::White;

/// Dim text for less important info
pub const COLOR_DIM: Color = Color::DarkGray;

/// Canvas background, stands in for the screen image
pub const COLOR_CANVAS_BG: Color = Color::Rgb(24, 24, 32);

/// Pinned header band of scrollable screens
pub const COLOR_PINNED_BG: Color = Color::Rgb(36, 36, 52);

// ============================================================================
// Overlay
// ============================================================================

pub const COLOR_SHAPE: Color = Color::Rgb(0, 122, 204);
pub const COLOR_SHAPE_HOVER: Color = Color::Rgb(80, 170, 255);
pub const COLOR_SHAPE_FOCUS: Color = Color::Yellow;
pub const COLOR_SHAPE_SELECTED: Color = Color::LightGreen;
pub const COLOR_DRAFT: Color = Color::Magenta;

/// Author mode badge
pub const COLOR_AUTHOR: Color = Color::Magenta;

/// Run mode badge
pub const COLOR_RUN: Color = Color::Rgb(4, 181, 117);

// ============================================================================
// Keyboard
// ============================================================================

pub const COLOR_KEYBOARD_BG: Color = Color::Rgb(40, 40, 48);
pub const COLOR_KEY: Color = Color::Rgb(70, 70, 80);
pub const COLOR_KEY_SPECIAL: Color = Color::Rgb(50, 50, 60);
pub const COLOR_KEY_HOVER: Color = Color::Rgb(110, 110, 125);

// ============================================================================
// Notices
// ============================================================================

pub const COLOR_INFO: Color = Color::Gray;
pub const COLOR_WARNING: Color = Color::Yellow;
pub const COLOR_ERROR: Color = Color::Red;

pub fn shape_color(emphasis: Emphasis) -> Color {
    match emphasis {
        Emphasis::Normal => COLOR_SHAPE,
        Emphasis::Hovered => COLOR_SHAPE_HOVER,
        Emphasis::Focused => COLOR_SHAPE_FOCUS,
        Emphasis::Selected => COLOR_SHAPE_SELECTED,
    }
}

pub fn notice_color(level: NoticeLevel) -> Color {
    match level {
        NoticeLevel::Info => COLOR_INFO,
        NoticeLevel::Warning => COLOR_WARNING,
        NoticeLevel::Error => COLOR_ERROR,
    }
}
