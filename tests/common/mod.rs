//! Common test utilities for integration tests.
//!
//! Fixtures describe a three screen prototype (login → home → profile)
//! as the JSON documents a real asset directory would hold, plus helpers
//! to drive an [`App`] with synthetic terminal events.
//!
//! # Example
//!
//! ```ignore
//! mod common;
//!
//! let mut app = common::loaded_app().await;
//! common::click_hotspot(&mut app, "mst");
//! ```
#![allow(dead_code)]

use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use image::{ImageFormat, RgbaImage};
use ratatui::layout::Rect;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use tapcanvas::adapters::InMemoryAssets;
use tapcanvas::app::App;
use tapcanvas::overlay::{CELL_HEIGHT_PX, CELL_WIDTH_PX};
use tapcanvas::startup::{load_prototype, AppConfig};
use tapcanvas::traits::{HOTSPOTS_ASSET, SCREENS_ASSET, WORKFLOWS_ASSET};

/// Canvas used by [`loaded_app`]: 80x40 cells, 640x640 px.
pub const CANVAS: Rect = Rect {
    x: 2,
    y: 1,
    width: 80,
    height: 40,
};

pub const SCREENS_JSON: &str = r#"[
  { "id": "login", "src": "login.png", "type": "static" },
  { "id": "home", "src": "home.png", "type": "static" },
  { "id": "profile", "src": "profile.png", "type": "scrollable", "pinnedHeaderHeight": "15%" }
]"#;

pub const HOTSPOTS_JSON: &str = r#"{
  "screens": {
    "login": [
      { "id": "mst", "x": "10%", "y": "30%", "width": "80%", "height": "6%",
        "action": "input", "field": "mst", "inputType": "number", "placeholder": "Tax code" },
      { "id": "password", "x": "10%", "y": "40%", "width": "80%", "height": "6%",
        "action": "input", "field": "password", "inputType": "password" },
      { "id": "login_btn", "x": "10%", "y": "55%", "width": "80%", "height": "8%",
        "action": "login", "credentials": { "mst": "123456789", "password": "password123" } }
    ],
    "home": [
      { "id": "to_profile", "x": "0%", "y": "80%", "width": "50%", "height": "10%",
        "action": "navigate", "target": "profile" }
    ]
  }
}"#;

pub const WORKFLOWS_JSON: &str = r#"{
  "initialScreen": "login",
  "screens": {
    "login": {
      "nextSteps": ["home"],
      "requiredInputs": ["mst", "password"],
      "validations": [
        { "field": "mst", "rule": "minLength:9", "message": "Tax code must be 9 digits" }
      ]
    },
    "home": { "nextSteps": ["profile"], "previousSteps": ["login"] },
    "profile": { "previousSteps": ["home"] }
  }
}"#;

/// In-memory assets holding the three fixture documents.
pub fn prototype_assets() -> InMemoryAssets {
    InMemoryAssets::new()
        .with_text(SCREENS_ASSET, SCREENS_JSON)
        .with_text(HOTSPOTS_ASSET, HOTSPOTS_JSON)
        .with_text(WORKFLOWS_ASSET, WORKFLOWS_JSON)
}

/// Write the fixture documents into `dir`.
pub fn write_prototype_dir(dir: &Path) {
    std::fs::write(dir.join(SCREENS_ASSET), SCREENS_JSON).unwrap();
    std::fs::write(dir.join(HOTSPOTS_ASSET), HOTSPOTS_JSON).unwrap();
    std::fs::write(dir.join(WORKFLOWS_ASSET), WORKFLOWS_JSON).unwrap();
}

/// PNG bytes of a blank image.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    RgbaImage::new(width, height)
        .write_to(&mut out, ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

/// App with the fixture prototype applied and [`CANVAS`] laid out.
pub async fn loaded_app_with(config: AppConfig) -> App {
    let prototype = load_prototype(Arc::new(prototype_assets()), &config)
        .await
        .unwrap();
    let mut app = App::new(config);
    app.apply_prototype(prototype);
    app.set_canvas(CANVAS);
    app
}

pub async fn loaded_app() -> App {
    loaded_app_with(AppConfig::default()).await
}

// ============================================================================
// Event helpers
// ============================================================================

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

pub fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

/// Terminal cell containing a canvas pixel.
pub fn cell_at(x: f64, y: f64) -> (u16, u16) {
    (
        CANVAS.x + (x / CELL_WIDTH_PX) as u16,
        CANVAS.y + (y / CELL_HEIGHT_PX) as u16,
    )
}

/// Press and release the left button on one cell.
pub fn click(app: &mut App, column: u16, row: u16) {
    app.handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), column, row));
    app.handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), column, row));
}

/// Click the middle of a hotspot's shape on the active screen.
pub fn click_hotspot(app: &mut App, hotspot_id: &str) {
    let rect = app
        .overlay
        .shape(hotspot_id)
        .unwrap_or_else(|| panic!("no shape for {}", hotspot_id))
        .rect;
    let (column, row) = cell_at(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0);
    click(app, column, row);
}

/// Type `text` on the physical keyboard and press enter.
pub fn type_and_submit(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_key_event(key(KeyCode::Char(c)));
    }
    app.handle_key_event(key(KeyCode::Enter));
}
